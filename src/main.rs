use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use munch::{
    compile::{Compiler, Outcome},
    config::Config,
    parse::Declarations,
    print::pp_stream,
    repl::{self, Term},
    Tokenizer,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "munch")]
#[command(about = "Tokenize and check Java-like sources", version)]
struct Cli {
    /// Reject sources larger than this many bytes
    #[arg(long, env = "MUNCH_MAX_SOURCE_BYTES", global = true)]
    max_source_bytes: Option<usize>,

    /// Log filter, e.g. `munch=trace` (defaults to `RUST_LOG`, then `warn`)
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the token stream of a file
    Tokens {
        file: PathBuf,

        /// Include whitespace and comments
        #[arg(long)]
        trivia: bool,

        /// No colors
        #[arg(long)]
        plain: bool,
    },

    /// Parse files and report the first error of each
    Check {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Read and parse lines interactively
    Repl {
        /// History file
        #[arg(long, env = "MUNCH_HISTORY")]
        history: Option<PathBuf>,
    },
}

fn init_logging(filter: Option<&str>) {
    let filter = filter.map_or_else(
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        EnvFilter::new,
    );

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.log.as_deref());

    let config = Config::default().with_max_source_len(cli.max_source_bytes);

    match cli.command.unwrap_or(Commands::Repl { history: None }) {
        Commands::Tokens {
            file,
            trivia,
            plain,
        } => tokens(&config, &file, trivia, plain),
        Commands::Check { files } => check(&config, &files),
        Commands::Repl { history } => {
            let config = config.with_history_file(history);
            let compiler = Compiler::new(Declarations).with_tokenizer(config.tokenizer);
            let mut term = Term::new(config.history_file)?;

            repl::run(&compiler, &mut term)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn read(file: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("cannot read {}", file.display()))
}

fn tokens(config: &Config, file: &Path, trivia: bool, plain: bool) -> anyhow::Result<ExitCode> {
    let source = read(file)?;

    match Tokenizer::new(config.tokenizer).tokenize(&source) {
        Ok(stream) if plain => print!("{:#}", pp_stream(&stream, trivia)),
        Ok(stream) => print!("{}", pp_stream(&stream, trivia)),
        Err(err) => {
            eprintln!("{}: {}", file.display(), err.to_string().red());
            return Ok(ExitCode::FAILURE);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn check(config: &Config, files: &[PathBuf]) -> anyhow::Result<ExitCode> {
    let compiler = Compiler::new(Declarations).with_tokenizer(config.tokenizer);
    let mut failed = 0;

    for file in files {
        let source = read(file)?;
        let unit = compiler.compile(file.display().to_string(), &source)?;

        match unit.outcome {
            Outcome::Parsed(statements) => {
                println!("{}: {} ({} statements)", unit.name, "ok".green(), statements.len());
            }
            Outcome::Failed(err) => {
                failed += 1;
                println!("{}: {}", unit.name, err.to_string().red());
            }
        }
    }

    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
