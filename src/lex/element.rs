use ecow::EcoString;

use crate::source::Reference;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriviaKind {
    Whitespace,
    LineTerminator,
    LineComment,
    BlockComment,
}

/// A run of source text with no grammatical meaning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trivia {
    kind: TriviaKind,
    text: EcoString,
    at: Reference,
}

impl Trivia {
    pub fn new(kind: TriviaKind, text: impl Into<EcoString>, at: Reference) -> Self {
        Self {
            kind,
            text: text.into(),
            at,
        }
    }

    pub const fn kind(&self) -> TriviaKind {
        self.kind
    }

    pub const fn text(&self) -> &EcoString {
        &self.text
    }

    pub const fn at(&self) -> Reference {
        self.at
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token<K> {
    kind: K,
    text: EcoString,
    at: Reference,
}

impl<K: Copy> Token<K> {
    pub fn new(kind: K, text: impl Into<EcoString>, at: Reference) -> Self {
        Self {
            kind,
            text: text.into(),
            at,
        }
    }

    pub const fn kind(&self) -> K {
        self.kind
    }

    pub const fn text(&self) -> &EcoString {
        &self.text
    }

    pub const fn at(&self) -> Reference {
        self.at
    }

    /// Two new tokens covering this one's text, cut at byte `offset`.
    ///
    /// Tokens never span lines, so the right half starts on the same line.
    /// `None` if either half would be empty or `offset` is not a char boundary.
    #[must_use]
    pub fn split_at(&self, offset: usize, left: K, right: K) -> Option<(Self, Self)> {
        if offset == 0 || offset >= self.text.len() || !self.text.is_char_boundary(offset) {
            return None;
        }

        let (head, tail) = self.text.split_at(offset);
        let width = u32::try_from(head.chars().count()).ok()?;

        Some((
            Self::new(left, head, self.at),
            Self::new(right, tail, self.at.shifted(width)),
        ))
    }
}

/// Smallest unit the tokenizer produces.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexicalElement<K> {
    Token(Token<K>),
    Trivia(Trivia),
}

impl<K: Copy> LexicalElement<K> {
    pub fn token(kind: K, text: impl Into<EcoString>, at: Reference) -> Self {
        Self::Token(Token::new(kind, text, at))
    }

    pub fn trivia(kind: TriviaKind, text: impl Into<EcoString>, at: Reference) -> Self {
        Self::Trivia(Trivia::new(kind, text, at))
    }

    pub const fn at(&self) -> Reference {
        match self {
            Self::Token(token) => token.at,
            Self::Trivia(trivia) => trivia.at,
        }
    }

    pub const fn text(&self) -> &EcoString {
        match self {
            Self::Token(token) => &token.text,
            Self::Trivia(trivia) => &trivia.text,
        }
    }

    pub const fn as_token(&self) -> Option<&Token<K>> {
        match self {
            Self::Token(token) => Some(token),
            Self::Trivia(_) => None,
        }
    }

    /// Symbol kind, or `None` for trivia.
    pub const fn kind(&self) -> Option<K> {
        match self {
            Self::Token(token) => Some(token.kind),
            Self::Trivia(_) => None,
        }
    }

    pub const fn is_token(&self) -> bool {
        matches!(self, Self::Token(_))
    }

    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Trivia(_))
    }
}

impl<K> From<Token<K>> for LexicalElement<K> {
    fn from(token: Token<K>) -> Self {
        Self::Token(token)
    }
}

impl<K> From<Trivia> for LexicalElement<K> {
    fn from(trivia: Trivia) -> Self {
        Self::Trivia(trivia)
    }
}
