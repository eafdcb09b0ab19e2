//! Variable declarations and expression statements over Java-like generic types.
//!
//! The interesting part is the closing `>` of a type argument list: the tokenizer
//! reads `List<List<int>>` as ending in one `>>` token, so closing the inner list
//! splits that token and consumes only its first character.

use ecow::EcoString;
use tracing::trace;

use super::tree::{Bound, Declaration, Expr, Statement, TypeArg, TypeRef};
use super::Parser;
use crate::error::{CompileError, CompileResult, ParserError};
use crate::lex::{LexicalElement, SymbolKind, Token};
use crate::stream::{TokenPointer, TokenStream};

use SymbolKind::*;

/// ```text
/// unit        := statement* EOF
/// statement   := declaration | expression ';'
/// declaration := type IDENT ('=' expression)? ';'
/// type        := (primitive | name typeArgs?) ('[' ']')*
/// typeArgs    := '<' typeArg (',' typeArg)* '>'
/// typeArg     := '?' (('extends' | 'super') type)? | type
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Declarations;

impl Parser for Declarations {
    type Output = Vec<Statement>;

    fn parse(&self, stream: &mut TokenStream<SymbolKind>) -> CompileResult<Vec<Statement>> {
        let ptr = stream.pointer();
        Session { stream, ptr }.unit()
    }
}

const fn binary_precedence(op: SymbolKind) -> Option<u8> {
    Some(match op {
        OrOr => 1,
        AndAnd => 2,
        Pipe => 3,
        Caret => 4,
        Amp => 5,
        EqEq | NotEq => 6,
        Lt | Gt | LtEq | GtEq => 7,
        Shl | Shr | UShr => 8,
        Plus | Minus => 9,
        Star | Slash | Percent => 10,
        _ => return None,
    })
}

fn width(token: &Token<SymbolKind>) -> u32 {
    u32::try_from(token.text().chars().count()).unwrap_or(u32::MAX)
}

struct Session<'s> {
    stream: &'s mut TokenStream<SymbolKind>,
    ptr: TokenPointer,
}

impl Session<'_> {
    fn kind(&self) -> Option<SymbolKind> {
        self.ptr.kind(self.stream)
    }

    fn at(&self, kinds: &[SymbolKind]) -> bool {
        self.ptr.match_one_of(self.stream, kinds)
    }

    fn bump(&mut self) -> CompileResult<Token<SymbolKind>> {
        Ok(self.ptr.bump(self.stream)?.clone())
    }

    fn unexpected(&self, expected: &[SymbolKind]) -> CompileError {
        match self.ptr.expect_token(self.stream) {
            Ok(found) => ParserError::unexpected(found, expected).into(),
            Err(fatal) => fatal.into(),
        }
    }

    fn expect(&mut self, kind: SymbolKind) -> CompileResult<Token<SymbolKind>> {
        if self.at(&[kind]) {
            self.bump()
        } else {
            Err(self.unexpected(&[kind]))
        }
    }

    fn unit(&mut self) -> CompileResult<Vec<Statement>> {
        let mut statements = Vec::new();

        while self.ptr.has_next() && !self.at(&[EndOfInput]) {
            statements.push(self.statement()?);
        }

        self.stream.set_current(self.ptr.node());
        Ok(statements)
    }

    /// Declaration first; on a syntax error rewind and read an expression instead.
    /// If both fail, the error that got further wins.
    fn statement(&mut self) -> CompileResult<Statement> {
        let saved = self.ptr.checkpoint();

        let as_declaration = match self.declaration() {
            Ok(declaration) => return Ok(Statement::Declaration(declaration)),
            Err(CompileError::Parser(err)) => err,
            Err(other) => return Err(other),
        };

        trace!(at = %as_declaration.at, "not a declaration, rereading as expression");
        self.ptr.restore(saved);

        match self.expression_statement() {
            Ok(expr) => Ok(Statement::Expression(expr)),
            Err(CompileError::Parser(as_expression)) if as_expression.at > as_declaration.at => {
                Err(as_expression.into())
            }
            Err(CompileError::Parser(_)) => Err(as_declaration.into()),
            Err(other) => Err(other),
        }
    }

    fn declaration(&mut self) -> CompileResult<Declaration> {
        let at = self.ptr.expect_token(self.stream)?.at();
        let ty = self.type_ref()?;
        let name = self.expect(Identifier)?.text().clone();

        let init = match self.kind() {
            Some(Assign) => {
                self.bump()?;
                Some(self.expression()?)
            }
            Some(Semicolon) => None,
            _ => return Err(self.unexpected(&[Assign, Semicolon])),
        };

        self.expect(Semicolon)?;
        Ok(Declaration { ty, name, init, at })
    }

    fn expression_statement(&mut self) -> CompileResult<Expr> {
        let expr = self.expression()?;
        self.expect(Semicolon)?;

        Ok(expr)
    }

    fn qualified_name(&mut self) -> CompileResult<EcoString> {
        let mut name = self.expect(Identifier)?.text().clone();

        while self.ptr.match_sequence(self.stream, &[Dot, Identifier]) {
            self.bump()?;
            name.push('.');
            name.push_str(self.bump()?.text());
        }

        Ok(name)
    }

    fn type_ref(&mut self) -> CompileResult<TypeRef> {
        let (name, args) = match self.kind() {
            Some(kind) if kind.is_primitive_type() => (self.bump()?.text().clone(), Vec::new()),
            Some(Identifier) => {
                let name = self.qualified_name()?;
                let args = if self.at(&[Lt]) {
                    self.type_args()?
                } else {
                    Vec::new()
                };
                (name, args)
            }
            _ => return Err(self.unexpected(&[Identifier])),
        };

        let mut dims = 0;
        while self.ptr.match_sequence(self.stream, &[LBracket, RBracket]) {
            self.bump()?;
            self.bump()?;
            dims += 1;
        }

        Ok(TypeRef { name, args, dims })
    }

    fn type_args(&mut self) -> CompileResult<Vec<TypeArg>> {
        self.expect(Lt)?;
        let mut args = vec![self.type_arg()?];

        while self.at(&[Comma]) {
            self.bump()?;
            args.push(self.type_arg()?);
        }

        self.close_angle()?;
        Ok(args)
    }

    fn type_arg(&mut self) -> CompileResult<TypeArg> {
        if !self.at(&[Question]) {
            return Ok(TypeArg::Type(self.type_ref()?));
        }

        self.bump()?;
        let bound = match self.kind() {
            Some(Extends) => Bound::Extends,
            Some(Super) => Bound::Super,
            _ => return Ok(TypeArg::Wildcard(None)),
        };

        self.bump()?;
        Ok(TypeArg::Wildcard(Some((bound, self.type_ref()?))))
    }

    /// Consumes one `>`, splitting it off a longer `>`-operator if need be.
    fn close_angle(&mut self) -> CompileResult<()> {
        match self.kind() {
            Some(Gt) => {}
            Some(kind) if kind.starts_with_gt() => {
                let token = self.ptr.expect_token(self.stream)?;
                let Some(rest) = SymbolKind::from_operator(&token.text()[1..]) else {
                    return Err(self.unexpected(&[Gt]));
                };

                trace!(at = %token.at(), text = %token.text(), "splitting merged `>`");
                self.stream.split_token(self.ptr.node(), 1, Gt, rest)?;
            }
            _ => return Err(self.unexpected(&[Gt])),
        }

        self.bump()?;
        Ok(())
    }

    fn expression(&mut self) -> CompileResult<Expr> {
        self.binary(1)
    }

    fn binary(&mut self, min: u8) -> CompileResult<Expr> {
        let mut lhs = self.unary()?;

        while let Some((op, pieces)) = self.operator() {
            let Some(precedence) = binary_precedence(op).filter(|it| *it >= min) else {
                break;
            };

            for _ in 0..pieces {
                self.bump()?;
            }

            let rhs = self.binary(precedence + 1)?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }

        Ok(lhs)
    }

    /// The operator at the pointer and how many tokens spell it.
    fn operator(&self) -> Option<(SymbolKind, usize)> {
        match self.kind()? {
            Gt => self.rejoined_operator().or(Some((Gt, 1))),
            kind => Some((kind, 1)),
        }
    }

    /// Adjacent pieces of an earlier `>` split, read back as the operator they spelled.
    ///
    /// Source text never leaves a `>` directly before `>` or `=`, the tokenizer would
    /// have merged them, so such a run can only come from a failed declaration attempt.
    fn rejoined_operator(&self) -> Option<(SymbolKind, usize)> {
        let mut id = self.ptr.node()?;
        let mut token = self.stream.get(id)?.as_token()?;
        let mut text = token.text().clone();
        let mut pieces = 1;
        let mut rejoined = None;

        while let Some(next_id) = self.stream.next_of(id) {
            let Some(next) = self.stream.get(next_id).and_then(LexicalElement::as_token) else {
                break;
            };

            let adjacent = next.at() == token.at().shifted(width(token));
            let piece = next.kind().starts_with_gt() || next.kind() == Assign;
            if !adjacent || !piece || text.len() + next.text().len() > 4 {
                break;
            }

            text.push_str(next.text());
            pieces += 1;

            if let Some(kind) = SymbolKind::from_operator(&text).filter(|it| it.starts_with_gt()) {
                rejoined = Some((kind, pieces));
            }

            id = next_id;
            token = next;
        }

        rejoined
    }

    fn unary(&mut self) -> CompileResult<Expr> {
        match self.kind() {
            Some(op @ (Minus | Plus | Bang | Tilde)) => {
                self.bump()?;
                Ok(Expr::Unary(op, Box::new(self.unary()?)))
            }
            _ => self.primary(),
        }
    }

    fn primary(&mut self) -> CompileResult<Expr> {
        match self.kind() {
            Some(kind) if kind.is_literal() => Ok(Expr::Literal(kind, self.bump()?.text().clone())),
            Some(Identifier) => Ok(Expr::Name(self.qualified_name()?)),
            Some(LParen) => {
                self.bump()?;
                let inner = self.expression()?;
                self.expect(RParen)?;

                Ok(inner)
            }
            _ => Err(self.unexpected(&[Identifier, LParen])),
        }
    }
}
