use core::fmt;

use colored::{ColoredString, Colorize};

use crate::lex::{LexicalElement, SymbolKind, Token, Trivia, TriviaKind};
use crate::parse::Statement;
use crate::stream::TokenStream;

pub fn pp_statements(statements: &[Statement]) {
    for statement in statements {
        println!(";; => {statement}");
    }
}

/// Renders a stream one element per line; `{:#}` leaves out the colors.
pub const fn pp_stream(stream: &TokenStream<SymbolKind>, trivia: bool) -> Dump<'_> {
    Dump { stream, trivia }
}

pub struct Dump<'s> {
    stream: &'s TokenStream<SymbolKind>,
    trivia: bool,
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (_, element) in self.stream.iter() {
            if element.is_trivia() && !self.trivia {
                continue;
            }

            if f.alternate() {
                writeln!(f, "{element:#}")?;
            } else {
                writeln!(f, "{element}")?;
            }
        }

        Ok(())
    }
}

fn paint(kind: SymbolKind, label: &str) -> ColoredString {
    use SymbolKind::*;

    match kind {
        Identifier => label.red(),
        IntLiteral | LongLiteral | FloatLiteral | DoubleLiteral => label.cyan(),
        CharLiteral | StringLiteral => label.bright_green(),
        BooleanLiteral => label.bright_blue(),
        NullLiteral => label.bold().blue(),
        EndOfInput => label.dimmed(),
        kw if kw.is_keyword() => label.purple(),
        _ => label.yellow(),
    }
}

const fn trivia_label(kind: TriviaKind) -> &'static str {
    match kind {
        TriviaKind::Whitespace => "whitespace",
        TriviaKind::LineTerminator => "line terminator",
        TriviaKind::LineComment => "line comment",
        TriviaKind::BlockComment => "block comment",
    }
}

impl fmt::Display for Token<SymbolKind> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = format!("{:<8}", self.at().to_string());
        let label = format!("{:<20}", self.kind().to_string());

        if f.alternate() {
            write!(f, "{at} {label} {:?}", self.text())
        } else {
            write!(f, "{} {} {:?}", at.dimmed(), paint(self.kind(), &label), self.text())
        }
    }
}

impl fmt::Display for Trivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = format!("{:<8}", self.at().to_string());
        let label = format!("{:<20}", trivia_label(self.kind()));

        if f.alternate() {
            write!(f, "{at} {label} {:?}", self.text())
        } else {
            write!(f, "{}", format!("{at} {label} {:?}", self.text()).bright_black())
        }
    }
}

impl fmt::Display for LexicalElement<SymbolKind> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self, f.alternate()) {
            (Self::Token(token), true) => write!(f, "{token:#}"),
            (Self::Token(token), false) => write!(f, "{token}"),
            (Self::Trivia(trivia), true) => write!(f, "{trivia:#}"),
            (Self::Trivia(trivia), false) => write!(f, "{trivia}"),
        }
    }
}
