use tracing::trace;

use super::{NodeId, TokenStream};
use crate::error::FatalInternalError;
use crate::lex::Token;

/// Saved [`TokenPointer`] position.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(Option<NodeId>);

impl std::fmt::Debug for Checkpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Some(id) => write!(f, "Checkpoint({id:?})"),
            None => write!(f, "Checkpoint(end)"),
        }
    }
}

/// Backtracking cursor over the tokens of a stream.
///
/// Only ever rests on a token node or at the bottom of the stream. It is a plain
/// value: copying it or restoring a [`Checkpoint`] costs nothing, however far the
/// pointer has moved in between. The stream is passed to every call, so a pointer
/// must only be used with the stream that made it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPointer {
    node: Option<NodeId>,
}

impl TokenPointer {
    /// Pointer on the first token at or after `start`.
    pub fn new<K: Copy + PartialEq>(stream: &TokenStream<K>, start: Option<NodeId>) -> Self {
        Self {
            node: stream.token_from(start),
        }
    }

    /// The token node pointed at, `None` at the bottom.
    pub const fn node(&self) -> Option<NodeId> {
        self.node
    }

    /// False once the pointer has run off the last token.
    pub const fn has_next(&self) -> bool {
        self.node.is_some()
    }

    pub fn token<'s, K: Copy + PartialEq>(
        &self,
        stream: &'s TokenStream<K>,
    ) -> Option<&'s Token<K>> {
        self.node
            .and_then(|id| stream.get(id))
            .and_then(|element| element.as_token())
    }

    pub fn kind<K: Copy + PartialEq>(&self, stream: &TokenStream<K>) -> Option<K> {
        self.token(stream).map(Token::kind)
    }

    /// The current token; reading past the bottom is a driver bug.
    pub fn expect_token<'s, K: Copy + PartialEq>(
        &self,
        stream: &'s TokenStream<K>,
    ) -> Result<&'s Token<K>, FatalInternalError> {
        let id = self.node.ok_or(FatalInternalError::NoTokenAtEnd)?;

        stream
            .element(id)?
            .as_token()
            .ok_or(FatalInternalError::NotAToken(id))
    }

    /// Moves to the next token, skipping trivia. Past the last token the pointer sits at
    /// the bottom; advancing from there is an error.
    pub fn advance<K: Copy + PartialEq>(
        &mut self,
        stream: &TokenStream<K>,
    ) -> Result<(), FatalInternalError> {
        let id = self.node.ok_or(FatalInternalError::AdvancePastEnd)?;

        self.node = stream.token_after(id);
        Ok(())
    }

    /// Returns the current token and advances past it.
    pub fn bump<'s, K: Copy + PartialEq>(
        &mut self,
        stream: &'s TokenStream<K>,
    ) -> Result<&'s Token<K>, FatalInternalError> {
        let token = self.expect_token(stream)?;
        self.advance(stream)?;

        Ok(token)
    }

    /// The token `offset` tokens ahead, `0` being the current one.
    pub fn nth_token<'s, K: Copy + PartialEq>(
        &self,
        stream: &'s TokenStream<K>,
        offset: usize,
    ) -> Option<(NodeId, &'s Token<K>)> {
        stream.cursor_at(self.node).tokens().nth(offset)
    }

    /// True if the tokens from here on have exactly the `expected` kinds, in order.
    /// Does not move the pointer.
    pub fn match_sequence<K: Copy + PartialEq>(
        &self,
        stream: &TokenStream<K>,
        expected: &[K],
    ) -> bool {
        let mut tokens = stream.cursor_at(self.node).tokens();

        expected
            .iter()
            .all(|kind| tokens.next().is_some_and(|(_, token)| token.kind() == *kind))
    }

    /// True if the current token is any of `kinds`.
    pub fn match_one_of<K: Copy + PartialEq>(&self, stream: &TokenStream<K>, kinds: &[K]) -> bool {
        self.match_at(stream, 0, kinds)
    }

    /// True if the token `offset` ahead is any of `kinds`.
    pub fn match_at<K: Copy + PartialEq>(
        &self,
        stream: &TokenStream<K>,
        offset: usize,
        kinds: &[K],
    ) -> bool {
        self.nth_token(stream, offset)
            .is_some_and(|(_, token)| kinds.contains(&token.kind()))
    }

    pub const fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.node)
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        trace!(from = ?self.node, to = ?checkpoint.0, "restore token pointer");
        self.node = checkpoint.0;
    }
}
