use std::fmt;

use ecow::EcoString;

use crate::lex::SymbolKind;
use crate::source::Reference;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Declaration(Declaration),
    Expression(Expr),
}

/// `Type name = init;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub ty: TypeRef,
    pub name: EcoString,
    pub init: Option<Expr>,
    pub at: Reference,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub name: EcoString,
    pub args: Vec<TypeArg>,
    pub dims: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Extends,
    Super,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeArg {
    Type(TypeRef),
    Wildcard(Option<(Bound, TypeRef)>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(SymbolKind, EcoString),
    Name(EcoString),
    Unary(SymbolKind, Box<Expr>),
    Binary(SymbolKind, Box<Expr>, Box<Expr>),
}

fn spelling(op: SymbolKind) -> &'static str {
    op.fixed_text().unwrap_or("?")
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;

        if let Some((first, rest)) = self.args.split_first() {
            write!(f, "<{first}")?;
            for arg in rest {
                write!(f, ", {arg}")?;
            }
            write!(f, ">")?;
        }

        for _ in 0..self.dims {
            write!(f, "[]")?;
        }

        Ok(())
    }
}

impl fmt::Display for TypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(ty) => ty.fmt(f),
            Self::Wildcard(None) => write!(f, "?"),
            Self::Wildcard(Some((Bound::Extends, ty))) => write!(f, "? extends {ty}"),
            Self::Wildcard(Some((Bound::Super, ty))) => write!(f, "? super {ty}"),
        }
    }
}

/// Fully parenthesized, so precedence is visible.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(_, text) | Self::Name(text) => write!(f, "{text}"),
            Self::Unary(op, operand) => write!(f, "{}{operand}", spelling(*op)),
            Self::Binary(op, lhs, rhs) => write!(f, "({lhs} {} {rhs})", spelling(*op)),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declaration(Declaration {
                ty,
                name,
                init: Some(init),
                ..
            }) => write!(f, "{ty} {name} = {init};"),
            Self::Declaration(Declaration { ty, name, .. }) => write!(f, "{ty} {name};"),
            Self::Expression(expr) => write!(f, "{expr};"),
        }
    }
}
