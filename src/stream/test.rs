use crate::error::FatalInternalError;
use crate::lex::{tokenize, LexicalElement, SymbolKind, TriviaKind};
use crate::source::Reference;
use crate::stream::TokenStream;
use SymbolKind::*;

fn texts(stream: &TokenStream<SymbolKind>) -> Vec<String> {
    stream
        .iter()
        .map(|(_, element)| element.text().to_string())
        .collect()
}

fn is_kind(kind: SymbolKind) -> impl Fn(&LexicalElement<SymbolKind>) -> bool {
    move |element| element.kind() == Some(kind)
}

fn is_keyword(element: &LexicalElement<SymbolKind>) -> bool {
    element.kind().is_some_and(SymbolKind::is_keyword)
}

fn is_trivia(element: &LexicalElement<SymbolKind>) -> bool {
    element.is_trivia()
}

#[test]
fn test_lookahead_in_predicate_order() {
    let stream = tokenize("( int ) x").unwrap();
    let lparen = is_kind(LParen);

    let found = stream.lookahead(&[&lparen, &is_keyword]);

    let found: Vec<_> = found.iter().map(|it| it.text().as_str()).collect();
    assert_eq!(found, vec!["(", "int"]);
}

#[test]
fn test_lookahead_short_on_exhaustion() {
    let stream = tokenize("a b").unwrap();
    let ident = is_kind(Identifier);
    let semi = is_kind(Semicolon);

    assert_eq!(stream.lookahead(&[&ident, &ident, &ident]).len(), 2);
    assert_eq!(stream.lookahead(&[&ident, &semi, &ident]).len(), 1);
    assert!(stream.lookahead_from(None, &[&ident]).is_empty());
    assert!(TokenStream::<SymbolKind>::new().lookahead(&[&ident]).is_empty());
}

#[test]
fn test_match_backward() {
    let mut stream = tokenize("a >> b").unwrap();
    let b = stream
        .iter()
        .find(|(_, element)| element.text().as_str() == "b")
        .map(|(id, _)| id);
    stream.set_current(b);

    let shr = is_kind(Shr);
    let ident = is_kind(Identifier);

    assert!(stream.match_backward(&[&is_trivia, &shr, &is_trivia, &ident]));
    assert!(!stream.match_backward(&[&shr]));
    assert!(!stream.match_backward(&[&is_trivia, &shr, &is_trivia, &ident, &is_trivia]));
    assert!(stream.match_backward(&[]));

    stream.set_current(stream.first());
    assert!(!stream.match_backward(&[&ident]));

    // from the bottom, the last element comes first
    let end = is_kind(EndOfInput);
    assert!(stream.match_backward_from(None, &[&end, &ident]));
}

#[test]
fn test_split_merged_closing_brackets() {
    let mut stream = tokenize(">>").unwrap();
    let ptr = stream.pointer();

    assert!(!ptr.match_sequence(&stream, &[Gt, Gt]));

    let right = stream.split_token(ptr.node(), 1, Gt, Gt).unwrap();

    assert!(ptr.match_sequence(&stream, &[Gt, Gt, EndOfInput]));
    assert_eq!(texts(&stream), vec![">", ">", ""]);
    assert_eq!(stream.get(right).map(LexicalElement::at), Some(Reference::new(1, 2)));
}

#[test]
fn test_split_keeps_pointers_on_left_half() {
    let mut stream = tokenize("List<List<int>> x;").unwrap();
    let before = stream.len();

    let mut ptr = stream.pointer();
    while !ptr.match_one_of(&stream, &[Shr]) {
        ptr.advance(&stream).unwrap();
    }
    let other = ptr;
    let saved = ptr.checkpoint();

    let right = stream.split_token(ptr.node(), 1, Gt, Gt).unwrap();

    assert_eq!(stream.len(), before + 1);
    assert_eq!(other.kind(&stream), Some(Gt));
    assert_eq!(stream.next_of(ptr.node().unwrap()), Some(right));
    assert_eq!(stream.prev_of(right), ptr.node());

    ptr.advance(&stream).unwrap();
    assert_eq!(ptr.node(), Some(right));
    ptr.advance(&stream).unwrap();
    assert!(ptr.match_sequence(&stream, &[Identifier, Semicolon, EndOfInput]));

    ptr.restore(saved);
    assert_eq!(ptr, other);

    assert_eq!(
        texts(&stream),
        vec!["List", "<", "List", "<", "int", ">", ">", " ", "x", ";", ""]
    );
}

#[test]
fn test_split_last_node_moves_tail() {
    let mut stream: TokenStream<SymbolKind> = [LexicalElement::token(UShr, ">>>", Reference::START)]
        .into_iter()
        .collect();

    let right = stream.split_token(stream.first(), 1, Gt, Shr).unwrap();
    assert_eq!(stream.last(), Some(right));

    let tail = stream.split_token(Some(right), 1, Gt, Gt).unwrap();
    assert_eq!(stream.last(), Some(tail));
    assert_eq!(texts(&stream), vec![">", ">", ">"]);

    let columns: Vec<_> = stream.iter().map(|(_, it)| it.at().column).collect();
    assert_eq!(columns, vec![1, 2, 3]);
}

#[test]
fn test_split_preconditions_are_fatal() {
    let mut stream = tokenize("a b").unwrap();
    let space = stream.next_of(stream.first().unwrap());
    let a = LexicalElement::token(Identifier, "a", Reference::START);

    assert_eq!(
        stream.split(None, a.clone(), a.clone()),
        Err(FatalInternalError::SplitAtBoundary)
    );
    assert_eq!(
        stream.split_token(space, 1, Gt, Gt),
        Err(FatalInternalError::NotAToken(space.unwrap()))
    );
    assert_eq!(
        stream.split_token(stream.first(), 1, Gt, Gt),
        Err(FatalInternalError::InvalidSplitOffset {
            node: stream.first().unwrap(),
            offset: 1
        })
    );

    let other = tokenize("a b c d e f").unwrap();
    let foreign = other.last();
    assert!(matches!(
        stream.split(foreign, a.clone(), a),
        Err(FatalInternalError::UnknownNode(_))
    ));
}

#[test]
fn test_current_reference() {
    let empty = TokenStream::<SymbolKind>::new();
    assert_eq!(empty.current_reference(), Reference::START);

    let mut stream = tokenize("\n  x").unwrap();
    assert_eq!(stream.current_reference(), Reference::START);

    let x = stream.pointer().node();
    stream.set_current(x);
    assert_eq!(stream.current_reference(), Reference::new(2, 3));

    stream.set_current(None);
    assert_eq!(stream.current_reference(), Reference::new(2, 4));
}

#[test]
fn test_current_reference_on_first_element_is_start() {
    let mut stream: TokenStream<SymbolKind> = [
        LexicalElement::token(Identifier, "a", Reference::new(3, 5)),
        LexicalElement::token(Identifier, "b", Reference::new(3, 7)),
    ]
    .into_iter()
    .collect();

    let (a, b) = (stream.first(), stream.last());
    assert_eq!(stream.current(), a);
    assert_eq!(stream.current_reference(), Reference::START);

    stream.set_current(b);
    assert_eq!(stream.current_reference(), Reference::new(3, 7));

    stream.set_current(None);
    assert_eq!(stream.current_reference(), Reference::new(3, 7));

    stream.set_current(a);
    assert_eq!(stream.current_reference(), Reference::START);
}

#[test]
fn test_cursor_is_forward_only_and_side_effect_free() {
    let stream = tokenize("a /* c */ b").unwrap();
    let mut cursor = stream.cursor();

    assert_eq!(cursor.peek().map(|it| it.text().as_str()), Some("a"));
    cursor.next();
    assert!(matches!(
        cursor.peek(),
        Some(LexicalElement::Trivia(trivia)) if trivia.kind() == TriviaKind::Whitespace
    ));

    let tokens: Vec<_> = cursor.tokens().map(|(_, it)| it.text().as_str()).collect();
    assert_eq!(tokens, vec!["b", ""]);
    assert_eq!(stream.current(), stream.first());
}

#[test]
fn test_pointer_at_rejects_foreign_node() {
    let stream = tokenize("a").unwrap();
    let bigger = tokenize("a b c").unwrap();

    assert!(stream.pointer_at(bigger.last().unwrap()).is_err());
    assert!(stream.pointer_at(stream.first().unwrap()).is_ok());
}
