//! The boundary between the token stream and whatever grammar consumes it.

use crate::error::CompileResult;
use crate::lex::SymbolKind;
use crate::stream::TokenStream;

pub use decls::Declarations;
pub use tree::{Bound, Declaration, Expr, Statement, TypeArg, TypeRef};

pub mod decls;
pub mod tree;

/// A grammar driver.
///
/// Receives a fully populated stream, reads it through
/// [`TokenPointer`](crate::stream::TokenPointer)s and may split its tokens when context shows
/// the tokenizer merged too much.
/// Backtracking depth is bounded only by the implementation's own recursion.
pub trait Parser {
    type Output;

    fn parse(&self, stream: &mut TokenStream<SymbolKind>) -> CompileResult<Self::Output>;
}

impl<F, T> Parser for F
where
    F: Fn(&mut TokenStream<SymbolKind>) -> CompileResult<T>,
{
    type Output = T;

    fn parse(&self, stream: &mut TokenStream<SymbolKind>) -> CompileResult<T> {
        self(stream)
    }
}
