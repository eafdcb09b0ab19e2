use std::fmt;

use ecow::EcoString;
use thiserror::Error;

use crate::lex::Token;
use crate::source::Reference;
use crate::stream::NodeId;

pub type CompileResult<T> = Result<T, CompileError>;

/// Anything that keeps a compilation unit from producing a tree.
#[derive(Error, Debug)]
pub enum CompileError {
    #[error(transparent)]
    Lexer(#[from] LexerError),

    #[error(transparent)]
    Parser(#[from] ParserError),

    #[error(transparent)]
    Fatal(#[from] FatalInternalError),
}

impl CompileError {
    /// Where the failure was detected, if it is tied to the source.
    pub const fn reference(&self) -> Option<Reference> {
        match self {
            Self::Lexer(e) => e.reference(),
            Self::Parser(e) => Some(e.at),
            Self::Fatal(_) => None,
        }
    }

    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LexerError {
    #[error("{at}: illegal symbol {text:?}")]
    IllegalSymbol { text: EcoString, at: Reference },

    #[error("{at}: unterminated literal {text:?}")]
    UnterminatedLiteral { text: EcoString, at: Reference },

    #[error("{at}: unterminated block comment")]
    UnterminatedComment { at: Reference },

    #[error("source is {len} bytes, the limit is {max}")]
    SourceTooLarge { len: usize, max: usize },
}

impl LexerError {
    pub const fn reference(&self) -> Option<Reference> {
        match self {
            Self::IllegalSymbol { at, .. }
            | Self::UnterminatedLiteral { at, .. }
            | Self::UnterminatedComment { at } => Some(*at),
            Self::SourceTooLarge { .. } => None,
        }
    }
}

/// A syntactically invalid token sequence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{at}: {message}")]
pub struct ParserError {
    pub at: Reference,
    pub found: EcoString,
    pub expected: Vec<EcoString>,
    pub message: EcoString,
}

impl ParserError {
    pub fn new(at: Reference, found: impl Into<EcoString>, message: impl Into<EcoString>) -> Self {
        Self {
            at,
            found: found.into(),
            expected: Vec::new(),
            message: message.into(),
        }
    }

    /// `expected one of ..., found ...` at `found`'s position.
    pub fn unexpected<K: Copy + fmt::Display>(found: &Token<K>, expected: &[K]) -> Self {
        let expected: Vec<EcoString> = expected
            .iter()
            .map(|kind| ecow::eco_format!("{kind}"))
            .collect();

        let found_text = if found.text().is_empty() {
            ecow::eco_format!("{}", found.kind())
        } else {
            ecow::eco_format!("`{}`", found.text())
        };

        let message = match expected.as_slice() {
            [] => ecow::eco_format!("unexpected {found_text}"),
            [only] => ecow::eco_format!("expected {only}, found {found_text}"),
            many => ecow::eco_format!(
                "expected one of {}, found {found_text}",
                many.iter().map(EcoString::as_str).collect::<Vec<_>>().join(", ")
            ),
        };

        Self {
            at: found.at(),
            found: found.text().clone(),
            expected,
            message,
        }
    }
}

/// A caller broke one of the stream's preconditions. This is a bug in the parser driving the
/// stream, never bad input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatalInternalError {
    #[error("internal error: cannot split at the top or bottom of the stream")]
    SplitAtBoundary,

    #[error("internal error: {0:?} does not belong to this stream")]
    UnknownNode(NodeId),

    #[error("internal error: {0:?} holds trivia where a token was required")]
    NotAToken(NodeId),

    #[error("internal error: cannot split {node:?} at byte {offset}")]
    InvalidSplitOffset { node: NodeId, offset: usize },

    #[error("internal error: advanced past the end of the token stream")]
    AdvancePastEnd,

    #[error("internal error: read a token at the end of the token stream")]
    NoTokenAtEnd,
}
