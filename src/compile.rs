use ecow::EcoString;
use tracing::{debug, error, warn};

use crate::error::{CompileError, FatalInternalError};
use crate::lex::{Tokenizer, TokenizerConfig};
use crate::parse::Parser;

/// What became of one compilation unit.
#[derive(Debug)]
pub enum Outcome<T> {
    Parsed(T),
    Failed(CompileError),
}

impl<T> Outcome<T> {
    pub const fn is_parsed(&self) -> bool {
        matches!(self, Self::Parsed(_))
    }

    pub const fn error(&self) -> Option<&CompileError> {
        match self {
            Self::Parsed(_) => None,
            Self::Failed(err) => Some(err),
        }
    }

    pub fn into_result(self) -> Result<T, CompileError> {
        match self {
            Self::Parsed(output) => Ok(output),
            Self::Failed(err) => Err(err),
        }
    }
}

#[derive(Debug)]
pub struct Unit<T> {
    pub name: EcoString,
    pub outcome: Outcome<T>,
}

/// Tokenizes a source and hands the stream to a [`Parser`].
///
/// Bad input fails only its own unit. A [`FatalInternalError`] means the parser misused
/// the stream and is always returned to the caller.
#[derive(Debug, Clone, Default)]
pub struct Compiler<P> {
    tokenizer: Tokenizer,
    parser: P,
}

impl<P: Parser> Compiler<P> {
    pub fn new(parser: P) -> Self {
        Self {
            tokenizer: Tokenizer::default(),
            parser,
        }
    }

    #[must_use]
    pub fn with_tokenizer(mut self, config: TokenizerConfig) -> Self {
        self.tokenizer = Tokenizer::new(config);
        self
    }

    pub const fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn compile(
        &self,
        name: impl Into<EcoString>,
        source: &str,
    ) -> Result<Unit<P::Output>, FatalInternalError> {
        let name = name.into();

        let result = self
            .tokenizer
            .tokenize(source)
            .map_err(CompileError::from)
            .and_then(|mut stream| self.parser.parse(&mut stream));

        let outcome = match result {
            Ok(output) => {
                debug!(unit = %name, "compiled");
                Outcome::Parsed(output)
            }
            Err(CompileError::Fatal(fatal)) => {
                error!(unit = %name, "{fatal}");
                return Err(fatal);
            }
            Err(err) => {
                warn!(unit = %name, "{err}");
                Outcome::Failed(err)
            }
        };

        Ok(Unit { name, outcome })
    }

    /// Compiles every unit in order, stopping only on a fatal error.
    pub fn compile_all<'a, N, I>(
        &self,
        units: I,
    ) -> Result<Vec<Unit<P::Output>>, FatalInternalError>
    where
        N: Into<EcoString>,
        I: IntoIterator<Item = (N, &'a str)>,
    {
        units
            .into_iter()
            .map(|(name, source)| self.compile(name, source))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CompileResult, LexerError};
    use crate::lex::{LexicalElement, SymbolKind};
    use crate::parse::Declarations;
    use crate::source::Reference;
    use crate::stream::TokenStream;

    #[test]
    fn test_failures_stay_in_their_unit() {
        let compiler = Compiler::new(Declarations);

        let units = compiler
            .compile_all([
                ("ok.java", "int x = 1;"),
                ("lex.java", "int @x;"),
                ("parse.java", "int = 2;"),
                ("after.java", "List<List<int>> xs;"),
            ])
            .unwrap();

        let parsed: Vec<_> = units.iter().map(|it| it.outcome.is_parsed()).collect();
        assert_eq!(parsed, vec![true, false, false, true]);

        assert!(matches!(
            units[1].outcome.error(),
            Some(CompileError::Lexer(LexerError::IllegalSymbol { at, .. }))
                if *at == Reference::new(1, 5)
        ));
        assert!(matches!(units[2].outcome.error(), Some(CompileError::Parser(_))));

        let fatal: Vec<_> = units
            .iter()
            .filter_map(|it| it.outcome.error())
            .map(CompileError::is_fatal)
            .collect();
        assert_eq!(fatal, vec![false, false]);
        assert_eq!(units[3].name.as_str(), "after.java");
    }

    #[test]
    fn test_source_limit_applies() {
        let compiler = Compiler::new(Declarations)
            .with_tokenizer(TokenizerConfig::with_max_source_len(4));
        assert_eq!(compiler.tokenizer().config().max_source_len(), 4);

        let unit = compiler.compile("big", "int x;").unwrap();

        assert!(matches!(
            unit.outcome.into_result(),
            Err(CompileError::Lexer(LexerError::SourceTooLarge { len: 6, max: 4 }))
        ));
    }

    #[test]
    fn test_fatal_errors_propagate() {
        let misbehaving = |stream: &mut TokenStream<SymbolKind>| -> CompileResult<()> {
            let half = LexicalElement::token(SymbolKind::Gt, ">", Reference::START);
            stream.split(None, half.clone(), half)?;
            Ok(())
        };
        let compiler = Compiler::new(misbehaving);

        let result = compiler.compile_all([("first", "a"), ("second", "b")]);
        let fatal = result.unwrap_err();
        assert_eq!(fatal, FatalInternalError::SplitAtBoundary);
        assert!(CompileError::from(fatal).is_fatal());
    }

    #[test]
    fn test_units_compile_on_separate_threads() {
        let compiler = Compiler::new(Declarations);
        let sources = ["int a = 1;", "Map<K, List<V>> m;", "a < b >> c;", "x +;"];

        let parsed: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = sources
                .iter()
                .enumerate()
                .map(|(i, source)| {
                    let compiler = &compiler;
                    scope.spawn(move || compiler.compile(format!("unit{i}"), source))
                })
                .collect();

            handles
                .into_iter()
                .map(|it| it.join().unwrap().unwrap().outcome.is_parsed())
                .collect()
        });

        assert_eq!(parsed, vec![true, true, true, false]);
    }
}
