use super::{NodeId, TokenStream};
use crate::lex::{LexicalElement, Token};

/// Advance-only view of a stream, starting at some node.
///
/// Has no effect on the stream and cannot be rewound; take a [`TokenPointer`](super::TokenPointer)
/// for anything that needs to go back.
pub struct Cursor<'s, K> {
    stream: &'s TokenStream<K>,
    next: Option<NodeId>,
}

impl<'s, K: Copy + PartialEq> Cursor<'s, K> {
    pub(super) const fn new(stream: &'s TokenStream<K>, start: Option<NodeId>) -> Self {
        Self { stream, next: start }
    }

    /// The node the next call to `next` yields.
    pub const fn node(&self) -> Option<NodeId> {
        self.next
    }

    pub fn peek(&self) -> Option<&'s LexicalElement<K>> {
        self.next.and_then(|id| self.stream.get(id))
    }

    /// Tokens only, trivia skipped.
    pub fn tokens(self) -> impl Iterator<Item = (NodeId, &'s Token<K>)> {
        self.filter_map(|(id, element)| element.as_token().map(|token| (id, token)))
    }
}

impl<'s, K: Copy + PartialEq> Iterator for Cursor<'s, K> {
    type Item = (NodeId, &'s LexicalElement<K>);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let element = self.stream.get(id)?;

        self.next = self.stream.next_of(id);
        Some((id, element))
    }
}

impl<K: Copy + PartialEq> std::iter::FusedIterator for Cursor<'_, K> {}
