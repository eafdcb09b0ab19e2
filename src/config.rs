use std::path::PathBuf;

use crate::lex::TokenizerConfig;

/// Settings of the `munch` binary. The library itself only needs [`TokenizerConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub tokenizer: TokenizerConfig,
    pub history_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tokenizer: TokenizerConfig::default(),
            history_file: default_history_file(),
        }
    }
}

impl Config {
    #[must_use]
    pub fn with_max_source_len(mut self, max: Option<usize>) -> Self {
        if let Some(max) = max {
            self.tokenizer = TokenizerConfig::with_max_source_len(max);
        }
        self
    }

    #[must_use]
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        if let Some(path) = path {
            self.history_file = path;
        }
        self
    }
}

/// `history.txt` in the platform data dir, or `.munch-history` in the working directory
/// when there is no home to put it in.
pub fn default_history_file() -> PathBuf {
    directories_next::ProjectDirs::from("io", "munch", "munch").map_or_else(
        || PathBuf::from(".munch-history"),
        |it| it.data_dir().join("history.txt"),
    )
}
