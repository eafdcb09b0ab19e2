use std::fmt;

use tracing::trace;

use crate::error::FatalInternalError;
use crate::lex::{LexicalElement, Token};
use crate::source::Reference;

pub use cursor::Cursor;
pub use pointer::{Checkpoint, TokenPointer};

mod cursor;
mod pointer;

#[cfg(test)]
mod test;

/// Stable handle to one node of a [`TokenStream`].
///
/// Nodes are never removed, so a handle stays valid for the life of its stream.
/// A split keeps the handle on the left half.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Element test used by [`TokenStream::lookahead`] and [`TokenStream::match_backward`].
pub type Predicate<'p, K> = &'p dyn Fn(&LexicalElement<K>) -> bool;

#[derive(Debug, Clone)]
struct Node<K> {
    element: LexicalElement<K>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// Doubly linked sequence of lexical elements, stored in an arena.
///
/// Positions are `Option<NodeId>`: `None` is the bottom of the stream, past the
/// last element. The top needs no value of its own, walking backwards simply
/// runs out of `prev` links.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct TokenStream<K> {
    nodes: Vec<Node<K>>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    current: Option<NodeId>,
}

impl<K> Default for TokenStream<K> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            head: None,
            tail: None,
            current: None,
        }
    }
}

impl<K: Copy + PartialEq> TokenStream<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `element`. The first element pushed becomes the current position.
    pub(crate) fn push(&mut self, element: LexicalElement<K>) -> NodeId {
        let id = NodeId(self.nodes.len());

        self.nodes.push(Node {
            element,
            prev: self.tail,
            next: None,
        });

        match self.tail {
            Some(tail) => self.nodes[tail.index()].next = Some(id),
            None => {
                self.head = Some(id);
                self.current = Some(id);
            }
        }

        self.tail = Some(id);
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub const fn first(&self) -> Option<NodeId> {
        self.head
    }

    pub const fn last(&self) -> Option<NodeId> {
        self.tail
    }

    fn node(&self, id: NodeId) -> Result<&Node<K>, FatalInternalError> {
        self.nodes
            .get(id.index())
            .ok_or(FatalInternalError::UnknownNode(id))
    }

    pub fn get(&self, id: NodeId) -> Option<&LexicalElement<K>> {
        self.nodes.get(id.index()).map(|node| &node.element)
    }

    /// Like [`get`](Self::get), but a foreign handle is a caller bug.
    pub fn element(&self, id: NodeId) -> Result<&LexicalElement<K>, FatalInternalError> {
        self.node(id).map(|node| &node.element)
    }

    pub fn next_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(|node| node.next)
    }

    pub fn prev_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(|node| node.prev)
    }

    /// Every element in stream order.
    pub fn iter(&self) -> Cursor<'_, K> {
        Cursor::new(self, self.head)
    }

    pub const fn current(&self) -> Option<NodeId> {
        self.current
    }

    pub fn set_current(&mut self, position: Option<NodeId>) {
        self.current = position;
    }

    pub fn current_element(&self) -> Option<&LexicalElement<K>> {
        self.current.and_then(|id| self.get(id))
    }

    /// Position of the current element. On the first element, or with no element at
    /// all, this is [`Reference::START`]. At the bottom it is the last element's position.
    pub fn current_reference(&self) -> Reference {
        if self.current.is_some() && self.current == self.head {
            return Reference::START;
        }

        self.current
            .or(self.tail)
            .and_then(|id| self.get(id))
            .map_or(Reference::START, LexicalElement::at)
    }

    /// Forward-only scan from the current position.
    pub fn cursor(&self) -> Cursor<'_, K> {
        Cursor::new(self, self.current)
    }

    pub fn cursor_at(&self, start: Option<NodeId>) -> Cursor<'_, K> {
        Cursor::new(self, start)
    }

    /// Backtracking pointer on the first token at or after the current position.
    pub fn pointer(&self) -> TokenPointer {
        TokenPointer::new(self, self.current)
    }

    pub fn pointer_at(&self, start: NodeId) -> Result<TokenPointer, FatalInternalError> {
        self.node(start)?;
        Ok(TokenPointer::new(self, Some(start)))
    }

    /// First token node at or after `start`.
    pub(crate) fn token_from(&self, start: Option<NodeId>) -> Option<NodeId> {
        self.cursor_at(start).tokens().next().map(|(id, _)| id)
    }

    pub(crate) fn token_after(&self, id: NodeId) -> Option<NodeId> {
        self.token_from(self.next_of(id))
    }

    /// [`lookahead_from`](Self::lookahead_from) the current position.
    pub fn lookahead(&self, predicates: &[Predicate<'_, K>]) -> Vec<&LexicalElement<K>> {
        self.lookahead_from(self.current, predicates)
    }

    /// For each predicate in turn, scans forward to the first element satisfying it and
    /// continues after that element with the next predicate.
    ///
    /// Running out of stream yields the elements found so far; a result shorter than
    /// `predicates` means there was not enough lookahead, not an error.
    pub fn lookahead_from(
        &self,
        start: Option<NodeId>,
        predicates: &[Predicate<'_, K>],
    ) -> Vec<&LexicalElement<K>> {
        let mut found = Vec::with_capacity(predicates.len());
        let mut cursor = self.cursor_at(start);

        for predicate in predicates {
            match cursor.find(|(_, element)| predicate(element)) {
                Some((_, element)) => found.push(element),
                None => break,
            }
        }

        found
    }

    /// [`match_backward_from`](Self::match_backward_from) the current position.
    pub fn match_backward(&self, predicates: &[Predicate<'_, K>]) -> bool {
        self.match_backward_from(self.current, predicates)
    }

    /// True if the elements immediately before `position` satisfy `predicates`,
    /// the first predicate testing the nearest element. Never fails: reaching the
    /// top early is simply `false`. `None` stands for the bottom of the stream.
    pub fn match_backward_from(
        &self,
        position: Option<NodeId>,
        predicates: &[Predicate<'_, K>],
    ) -> bool {
        let mut before = match position {
            Some(id) => self.prev_of(id),
            None => self.tail,
        };

        for predicate in predicates {
            let Some(element) = before.and_then(|id| self.get(id)) else {
                return false;
            };

            if !predicate(element) {
                return false;
            }

            before = before.and_then(|id| self.prev_of(id));
        }

        true
    }

    /// Replaces the node at `at` with `left` followed by `right`.
    ///
    /// `left` takes over `at`'s handle, so every pointer and checkpoint on `at`
    /// ends up on the left half. Returns the handle of the right half.
    pub fn split(
        &mut self,
        at: Option<NodeId>,
        left: LexicalElement<K>,
        right: LexicalElement<K>,
    ) -> Result<NodeId, FatalInternalError> {
        let at = at.ok_or(FatalInternalError::SplitAtBoundary)?;
        let next = self.node(at)?.next;
        let right_id = NodeId(self.nodes.len());

        self.nodes.push(Node {
            element: right,
            prev: Some(at),
            next,
        });

        match next {
            Some(next) => self.nodes[next.index()].prev = Some(right_id),
            None => self.tail = Some(right_id),
        }

        let node = &mut self.nodes[at.index()];
        node.element = left;
        node.next = Some(right_id);

        trace!(left = ?at, right = ?right_id, "split stream node");
        Ok(right_id)
    }

    /// Splits the token at `at` in two at byte `offset` of its text, giving the halves
    /// the kinds `left` and `right`.
    pub fn split_token(
        &mut self,
        at: Option<NodeId>,
        offset: usize,
        left: K,
        right: K,
    ) -> Result<NodeId, FatalInternalError> {
        let id = at.ok_or(FatalInternalError::SplitAtBoundary)?;
        let token = self
            .element(id)?
            .as_token()
            .ok_or(FatalInternalError::NotAToken(id))?;

        let (head, tail): (Token<K>, Token<K>) = token
            .split_at(offset, left, right)
            .ok_or(FatalInternalError::InvalidSplitOffset { node: id, offset })?;

        self.split(at, head.into(), tail.into())
    }
}

impl<K: Copy + PartialEq> FromIterator<LexicalElement<K>> for TokenStream<K> {
    fn from_iter<T: IntoIterator<Item = LexicalElement<K>>>(iter: T) -> Self {
        let mut stream = Self::new();

        for element in iter {
            stream.push(element);
        }

        stream
    }
}
