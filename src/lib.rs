#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]

//! A maximal-munch tokenizer for a Java-like language, and the token stream a parser
//! needs to undo its over-eager merges.
//!
//! ```
//! use munch::{compile::Compiler, parse::Declarations};
//!
//! let unit = Compiler::new(Declarations)
//!     .compile("example", "List<List<int>> xs;")
//!     .unwrap();
//! assert!(unit.outcome.is_parsed());
//! ```

pub mod compile;
pub mod config;
pub mod error;
pub mod lex;
pub mod parse;
pub mod print;
pub mod repl;
pub mod source;
pub mod stream;

pub use compile::{Compiler, Outcome, Unit};
pub use error::{CompileError, CompileResult, FatalInternalError, LexerError, ParserError};
pub use lex::{tokenize, LexicalElement, SymbolKind, Token, Tokenizer, TokenizerConfig};
pub use source::Reference;
pub use stream::{Checkpoint, Cursor, NodeId, TokenPointer, TokenStream};
