use std::path::PathBuf;

use anyhow::Context;
use colored::Colorize;
use ecow::eco_format;
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};

use crate::compile::{Compiler, Outcome};
use crate::parse::Declarations;
use crate::print::pp_statements;

pub use highlighter::SourceHighlighter;

mod highlighter;

const HISTORY_LEN: usize = 50;

pub struct Term {
    prompt: DefaultPrompt,
    reedline: Reedline,
}

impl std::fmt::Debug for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(stringify!(Term)).finish_non_exhaustive()
    }
}

impl Term {
    pub fn new(history_file: PathBuf) -> anyhow::Result<Self> {
        let history = FileBackedHistory::with_file(HISTORY_LEN, history_file.clone())
            .with_context(|| format!("cannot open history file {}", history_file.display()))?;

        Ok(Self {
            prompt: DefaultPrompt {
                left_prompt: DefaultPromptSegment::Basic("munch".to_owned()),
                right_prompt: DefaultPromptSegment::Empty,
            },

            reedline: Reedline::create()
                .with_history(Box::new(history))
                .with_highlighter(Box::new(SourceHighlighter)),
        })
    }

    /// The next line, `None` once the user hits Ctrl-D or Ctrl-C.
    pub fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        match self.reedline.read_line(&self.prompt)? {
            Signal::Success(line) => Ok(Some(line)),
            Signal::CtrlD | Signal::CtrlC => Ok(None),
        }
    }
}

/// Compiles each line as its own unit and prints the statements.
pub fn run(compiler: &Compiler<Declarations>, term: &mut Term) -> anyhow::Result<()> {
    let mut count = 0usize;

    while let Some(line) = term.read_line()? {
        count += 1;

        let unit = compiler.compile(eco_format!("<repl:{count}>"), &line)?;
        match unit.outcome {
            Outcome::Parsed(statements) => pp_statements(&statements),
            Outcome::Failed(err) => eprintln!("{}", format!("error: {err}").red()),
        }
    }

    Ok(())
}
