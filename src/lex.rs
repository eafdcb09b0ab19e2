pub use element::{LexicalElement, Token, Trivia, TriviaKind};
pub use kind::SymbolKind;
pub use scanner::{Scanner, Tokenizer};

use crate::error::LexerError;
use crate::stream::TokenStream;

mod element;
mod kind;
mod scanner;

/// Default upper bound on a single compilation unit, in bytes.
pub const DEFAULT_MAX_SOURCE_LEN: usize = 16 * 1024 * 1024;

/// No unit may be larger than this, whatever the configuration says;
/// line and column numbers are `u32`.
pub const HARD_MAX_SOURCE_LEN: usize = u32::MAX as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerConfig {
    max_source_len: usize,
}

impl TokenizerConfig {
    /// Sources longer than `max` bytes are rejected, `max` is clamped to [`HARD_MAX_SOURCE_LEN`].
    #[must_use]
    pub fn with_max_source_len(max: usize) -> Self {
        Self {
            max_source_len: max.min(HARD_MAX_SOURCE_LEN),
        }
    }

    pub const fn max_source_len(&self) -> usize {
        self.max_source_len
    }
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self::with_max_source_len(DEFAULT_MAX_SOURCE_LEN)
    }
}

/// Tokenize `source` with the default limits.
///
/// Classification is maximal munch: a run of `>` characters comes out as one
/// shift-like operator and is only broken up later, by the parser, through
/// [`TokenStream::split_token`].
pub fn tokenize(source: &str) -> Result<TokenStream<SymbolKind>, LexerError> {
    Tokenizer::default().tokenize(source)
}

/// Every element of `source`, whitespace and comments included, without building a stream.
pub const fn scan(source: &str) -> Scanner<'_> {
    Scanner::new(source)
}
