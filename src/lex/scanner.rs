use std::sync::LazyLock;

use regex::Regex;
use tap::Pipe;
use tracing::debug;

use super::{LexicalElement, SymbolKind, Token, TokenizerConfig, TriviaKind};
use crate::error::LexerError;
use crate::source::Reference;
use crate::stream::TokenStream;

type Element = LexicalElement<SymbolKind>;
type LexResult = Result<Element, LexerError>;

const DIGITS: &str = "[0-9](?:[0-9_]*[0-9])?";
const EXPONENT: &str = "[eE][+-]?[0-9](?:[0-9_]*[0-9])?";
const ESCAPE: &str = r#"\\(?:[btnfrs"'\\]|[0-3][0-7]{2}|[0-7]{1,2}|u+[0-9a-fA-F]{4})"#;

fn pattern(source: &str) -> Regex {
    Regex::new(source).unwrap_or_else(|err| panic!("invalid token pattern {source:?}: {err}"))
}

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| pattern(r"\A[ \t\x0C]+"));
static LINE_TERMINATOR: LazyLock<Regex> = LazyLock::new(|| pattern(r"\A(?:\r\n|\r|\n)"));
static LINE_COMMENT: LazyLock<Regex> = LazyLock::new(|| pattern(r"\A//[^\r\n]*"));
static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| pattern(r"\A/\*(?s:.*?)\*/"));

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"\A[\p{Alphabetic}_$][\p{Alphabetic}\p{N}_$]*"));

static HEX: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"\A0[xX][0-9a-fA-F](?:[0-9a-fA-F_]*[0-9a-fA-F])?[lL]?"));
static BINARY: LazyLock<Regex> = LazyLock::new(|| pattern(r"\A0[bB][01](?:[01_]*[01])?[lL]?"));
static OCTAL: LazyLock<Regex> = LazyLock::new(|| pattern(r"\A0[0-7_]*[0-7][lL]?"));
static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"\A(?:0|[1-9](?:[0-9_]*[0-9])?)[lL]?"));
static FLOATING: LazyLock<Regex> = LazyLock::new(|| {
    [
        r"\A(?:",
        DIGITS, r"\.(?:", DIGITS, ")?(?:", EXPONENT, ")?[fFdD]?",
        r"|\.", DIGITS, "(?:", EXPONENT, ")?[fFdD]?",
        "|", DIGITS, EXPONENT, "[fFdD]?",
        "|", DIGITS, "[fFdD]",
        ")",
    ]
    .concat()
    .pipe_ref(|it| pattern(it))
});

static CHAR_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| pattern(&format!(r"\A'(?:{ESCAPE}|[^'\\\r\n])'")));
static STRING_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| pattern(&format!(r#"\A"(?:{ESCAPE}|[^"\\\r\n])*""#)));

// same shape without escape validation, to tell a bad literal from an unclosed one
static LOOSE_CHAR_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"\A'(?:\\[^\r\n]|[^'\\\r\n])*(')?"));
static LOOSE_STRING_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| pattern(r#"\A"(?:\\[^\r\n]|[^"\\\r\n])*(")?"#));

/// Longest spelling first, so the leftmost-first alternation is maximal munch.
static OPERATOR: LazyLock<Regex> = LazyLock::new(|| {
    let mut spellings: Vec<&str> = SymbolKind::OPERATORS.iter().map(|(text, _)| *text).collect();
    spellings.sort_by_key(|text| std::cmp::Reverse(text.len()));

    spellings
        .into_iter()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|")
        .pipe(|alternation| pattern(&format!(r"\A(?:{alternation})")))
});

fn matched(re: &Regex, rest: &str) -> Option<usize> {
    re.find(rest).map(|it| it.end())
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

/// Single left-to-right pass over a source buffer, yielding tokens and trivia.
///
/// Stops for good after the first error.
#[derive(Debug, Clone)]
pub struct Scanner<'s> {
    source: &'s str,
    offset: usize,
    at: Reference,
    failed: bool,
}

impl<'s> Scanner<'s> {
    pub const fn new(source: &'s str) -> Self {
        Self {
            source,
            offset: 0,
            at: Reference::START,
            failed: false,
        }
    }

    /// Byte offset of the next unread character.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Position of the next unread character.
    pub const fn reference(&self) -> Reference {
        self.at
    }

    fn rest(&self) -> &'s str {
        &self.source[self.offset..]
    }

    fn take(&mut self, len: usize) -> (&'s str, Reference) {
        let at = self.at;
        let text = &self.source[self.offset..self.offset + len];

        self.at.advance_over(text);
        self.offset += len;

        (text, at)
    }

    fn token(&mut self, kind: SymbolKind, len: usize) -> Element {
        let (text, at) = self.take(len);
        LexicalElement::token(kind, text, at)
    }

    fn illegal(&mut self, len: usize) -> LexerError {
        let (text, at) = self.take(len);
        LexerError::IllegalSymbol {
            text: text.into(),
            at,
        }
    }

    fn trivia(&mut self, re: &Regex, kind: TriviaKind) -> LexResult {
        let rest = self.rest();
        let Some(len) = matched(re, rest) else {
            return Err(self.illegal(rest.chars().next().map_or(0, char::len_utf8)));
        };

        let (text, at) = self.take(len);
        Ok(LexicalElement::trivia(kind, text, at))
    }

    fn block_comment(&mut self) -> LexResult {
        if matched(&BLOCK_COMMENT, self.rest()).is_some() {
            return self.trivia(&BLOCK_COMMENT, TriviaKind::BlockComment);
        }

        let (_, at) = self.take(self.rest().len());
        Err(LexerError::UnterminatedComment { at })
    }

    fn word(&mut self, first: char) -> Element {
        let rest = self.rest();
        let len = matched(&IDENTIFIER, rest).unwrap_or(first.len_utf8());
        let kind = SymbolKind::from_word(&rest[..len]).unwrap_or(SymbolKind::Identifier);

        self.token(kind, len)
    }

    fn number(&mut self, first: char) -> LexResult {
        #[derive(Clone, Copy)]
        enum Form {
            Integral,
            Floating,
        }

        let rest = self.rest();
        let (len, form) = [
            (&*HEX, Form::Integral),
            (&*BINARY, Form::Integral),
            (&*FLOATING, Form::Floating),
            (&*OCTAL, Form::Integral),
            (&*DECIMAL, Form::Integral),
        ]
        .into_iter()
        .filter_map(|(re, form)| matched(re, rest).map(|len| (len, form)))
        // first of the longest wins
        .reduce(|best, next| if next.0 > best.0 { next } else { best })
        .unwrap_or((first.len_utf8(), Form::Integral));

        let tail = &rest[len..];
        if tail.starts_with(is_identifier_part) {
            let run = tail.find(|c| !is_identifier_part(c)).unwrap_or(tail.len());
            return Err(self.illegal(len + run));
        }

        let text = &rest[..len];
        let kind = match form {
            Form::Integral if text.ends_with(['l', 'L']) => SymbolKind::LongLiteral,
            Form::Integral => SymbolKind::IntLiteral,
            Form::Floating if text.ends_with(['f', 'F']) => SymbolKind::FloatLiteral,
            Form::Floating => SymbolKind::DoubleLiteral,
        };

        Ok(self.token(kind, len))
    }

    fn quoted(&mut self, strict: &Regex, loose: &Regex, kind: SymbolKind) -> LexResult {
        let rest = self.rest();
        if let Some(len) = matched(strict, rest) {
            return Ok(self.token(kind, len));
        }

        let (len, closed) = loose.captures(rest).map_or((1, false), |caps| {
            (caps.get(0).map_or(1, |it| it.end()), caps.get(1).is_some())
        });

        let (text, at) = self.take(len);
        let text = text.into();

        if closed {
            Err(LexerError::IllegalSymbol { text, at })
        } else {
            Err(LexerError::UnterminatedLiteral { text, at })
        }
    }

    fn operator(&mut self, first: char) -> LexResult {
        let rest = self.rest();

        let found = matched(&OPERATOR, rest)
            .and_then(|len| Some((len, SymbolKind::from_operator(&rest[..len])?)));

        match found {
            Some((len, kind)) => Ok(self.token(kind, len)),
            None => Err(self.illegal(first.len_utf8())),
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = LexResult;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let rest = self.rest();
        let first = rest.chars().next()?;

        let element = match first {
            ' ' | '\t' | '\x0C' => self.trivia(&WHITESPACE, TriviaKind::Whitespace),
            '\r' | '\n' => self.trivia(&LINE_TERMINATOR, TriviaKind::LineTerminator),
            '/' if rest.starts_with("//") => self.trivia(&LINE_COMMENT, TriviaKind::LineComment),
            '/' if rest.starts_with("/*") => self.block_comment(),
            c if is_identifier_start(c) => Ok(self.word(c)),
            '0'..='9' => self.number(first),
            '.' if rest[1..].starts_with(|c: char| c.is_ascii_digit()) => self.number(first),
            '\'' => self.quoted(&CHAR_LITERAL, &LOOSE_CHAR_LITERAL, SymbolKind::CharLiteral),
            '"' => self.quoted(&STRING_LITERAL, &LOOSE_STRING_LITERAL, SymbolKind::StringLiteral),
            _ => self.operator(first),
        };

        self.failed = element.is_err();
        Some(element)
    }
}

impl std::iter::FusedIterator for Scanner<'_> {}

/// Turns a whole source buffer into a [`TokenStream`].
///
/// Holds no state between calls; one instance can serve any number of threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer {
    config: TokenizerConfig,
}

impl Tokenizer {
    pub const fn new(config: TokenizerConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> TokenizerConfig {
        self.config
    }

    /// Every element of `source` in order, followed by a single [`SymbolKind::EndOfInput`] token.
    pub fn tokenize(&self, source: &str) -> Result<TokenStream<SymbolKind>, LexerError> {
        let max = self.config.max_source_len();
        if source.len() > max {
            return Err(LexerError::SourceTooLarge {
                len: source.len(),
                max,
            });
        }

        let mut scanner = Scanner::new(source);
        let mut stream = TokenStream::new();

        for element in scanner.by_ref() {
            stream.push(element?);
        }

        stream.push(Token::new(SymbolKind::EndOfInput, "", scanner.reference()).into());

        debug!(
            bytes = source.len(),
            elements = stream.len(),
            "tokenized source"
        );

        Ok(stream)
    }
}
