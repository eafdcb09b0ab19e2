use nu_ansi_term::{Color, Style};
use reedline::{Highlighter, StyledText};

use crate::lex::{self, LexicalElement, SymbolKind, TriviaKind};

/// Colors an input line by running the tokenizer over it.
///
/// Whatever follows the first lexical error is painted as one red run, so an unclosed
/// string or comment shows up while it is being typed.
#[derive(Debug, Default, Clone, Copy)]
pub struct SourceHighlighter;

const PAREN_COLORS: [Color; 3] = [
    Color::Rgb(255, 198, 124),
    Color::Rgb(228, 124, 255),
    Color::LightBlue,
];

const KEYWORD_COLOR: Color = Color::Rgb(138, 206, 0);

fn style_of(element: &LexicalElement<SymbolKind>, depth: usize) -> Style {
    use SymbolKind::*;

    let kind = match element {
        LexicalElement::Trivia(trivia) => {
            return match trivia.kind() {
                TriviaKind::LineComment | TriviaKind::BlockComment => {
                    Style::from(Color::DarkGray).bold()
                }
                TriviaKind::Whitespace | TriviaKind::LineTerminator => Style::new(),
            }
        }
        LexicalElement::Token(token) => token.kind(),
    };

    match kind {
        LParen | LBrace | LBracket | RParen | RBrace | RBracket => {
            Style::from(PAREN_COLORS[depth % 3])
        }
        Identifier => Style::from(Color::Purple),
        IntLiteral | LongLiteral | FloatLiteral | DoubleLiteral => Style::from(Color::Cyan),
        CharLiteral | StringLiteral => Style::from(Color::LightGreen),
        BooleanLiteral => Style::from(Color::Blue),
        NullLiteral => Style::from(Color::LightBlue).bold(),
        kw if kw.is_keyword() => Style::from(KEYWORD_COLOR),
        _ => Style::from(Color::LightRed),
    }
}

const fn opens(kind: Option<SymbolKind>) -> bool {
    matches!(
        kind,
        Some(SymbolKind::LParen | SymbolKind::LBrace | SymbolKind::LBracket)
    )
}

const fn closes(kind: Option<SymbolKind>) -> bool {
    matches!(
        kind,
        Some(SymbolKind::RParen | SymbolKind::RBrace | SymbolKind::RBracket)
    )
}

impl Highlighter for SourceHighlighter {
    fn highlight(&self, line: &str, _cursor: usize) -> StyledText {
        let mut styled_text = StyledText::new();
        let mut scanner = lex::scan(line);
        let mut depth: usize = 0;

        loop {
            let start = scanner.offset();

            let element = match scanner.next() {
                Some(Ok(element)) => element,
                Some(Err(_)) => {
                    let rest = line[start..].to_owned();
                    styled_text.push((Style::from(Color::Red).underline(), rest));
                    break;
                }
                None => break,
            };

            if closes(element.kind()) {
                depth = depth.saturating_sub(1);
            }

            styled_text.push((style_of(&element, depth), element.text().to_string()));

            if opens(element.kind()) {
                depth += 1;
            }
        }

        styled_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments(line: &str) -> Vec<(Style, String)> {
        SourceHighlighter.highlight(line, 0).buffer
    }

    #[test]
    fn test_segments_cover_the_line() {
        let line = "List<int> xs = f(1, \"a\"); // done";
        let text: String = segments(line).into_iter().map(|(_, it)| it).collect();

        assert_eq!(text, line);
    }

    #[test]
    fn test_styles_follow_kinds() {
        let styled = segments("int x = null;");

        assert_eq!(styled[0], (Style::from(KEYWORD_COLOR), "int".to_owned()));
        assert_eq!(styled[2], (Style::from(Color::Purple), "x".to_owned()));
        assert_eq!(styled[6], (Style::from(Color::LightBlue).bold(), "null".to_owned()));
    }

    #[test]
    fn test_matching_parens_share_a_color() {
        let styled = segments("((a))");
        let colors: Vec<_> = styled.iter().map(|(style, _)| style.foreground).collect();

        assert_eq!(colors[0], colors[4]);
        assert_eq!(colors[1], colors[3]);
        assert_ne!(colors[0], colors[1]);
    }

    #[test]
    fn test_error_run_starts_at_the_bad_element() {
        let line = "f(x) # y";
        let styled = segments(line);
        let (style, rest) = styled.last().unwrap();

        assert_eq!(rest, "# y");
        assert_eq!(*style, Style::from(Color::Red).underline());

        let text: String = styled.into_iter().map(|(_, it)| it).collect();
        assert_eq!(text, line);
    }

    #[test]
    fn test_rest_after_error_is_red() {
        let styled = segments("int x = \"open");
        let (style, rest) = styled.last().unwrap();

        assert_eq!(rest, "\"open");
        assert_eq!(*style, Style::from(Color::Red).underline());
    }
}
