use munch::lex::{tokenize, LexicalElement, SymbolKind};
use munch::stream::{NodeId, Predicate, TokenStream};
use munch::Reference;
use proptest::collection::vec as prop_vec;
use proptest::prelude::*;
use proptest::sample::Index;

fn source_strategy() -> impl Strategy<Value = String> {
    "[a-z0-9 \n+<>=;(){}.*/\"_]{0,48}"
}

fn is_token(element: &LexicalElement<SymbolKind>) -> bool {
    element.is_token()
}

fn is_trivia(element: &LexicalElement<SymbolKind>) -> bool {
    element.is_trivia()
}

fn is_identifier(element: &LexicalElement<SymbolKind>) -> bool {
    element.kind() == Some(SymbolKind::Identifier)
}

fn is_closer(element: &LexicalElement<SymbolKind>) -> bool {
    element.kind().is_some_and(SymbolKind::starts_with_gt)
}

const PREDICATES: [Predicate<'static, SymbolKind>; 4] =
    [&is_token, &is_trivia, &is_identifier, &is_closer];

fn positions(stream: &TokenStream<SymbolKind>) -> Vec<Option<NodeId>> {
    stream
        .iter()
        .map(|(id, _)| Some(id))
        .chain(std::iter::once(None))
        .collect()
}

fn texts(stream: &TokenStream<SymbolKind>) -> String {
    stream.iter().map(|(_, it)| it.text().as_str()).collect()
}

// Property: the elements of a stream spell out the source, each at its own position
proptest! {
    #[test]
    fn prop_stream_reproduces_source(source in source_strategy()) {
        let Ok(stream) = tokenize(&source) else {
            return Ok(());
        };

        prop_assert_eq!(texts(&stream), source.clone());

        let ends: Vec<_> = stream
            .iter()
            .filter(|(_, it)| it.kind() == Some(SymbolKind::EndOfInput))
            .map(|(id, _)| id)
            .collect();
        prop_assert_eq!(ends, vec![stream.last().unwrap()]);

        let (mut line, mut column) = (1, 1);
        for (_, element) in stream.iter() {
            prop_assert_eq!(element.at(), Reference::new(line, column));

            for c in element.text().chars() {
                if c == '\n' {
                    line += 1;
                    column = 1;
                } else {
                    column += 1;
                }
            }
        }
    }
}

// Property: a pointer only ever stops on tokens
proptest! {
    #[test]
    fn prop_pointer_skips_trivia(
        trivia in "[ \t\n]{0,12}(//[a-z ]{0,8}\n)?(/\\*[a-z \n]{0,8}\\*/)?[ \n]{0,4}",
        word in "[a-z]{1,8}"
    ) {
        let stream = tokenize(&format!("{trivia}{word}")).unwrap();
        let mut ptr = stream.pointer();

        prop_assert_eq!(ptr.bump(&stream).unwrap().text().as_str(), word.as_str());
        prop_assert!(ptr.match_sequence(&stream, &[SymbolKind::EndOfInput]));

        ptr.advance(&stream).unwrap();
        prop_assert!(!ptr.has_next());
    }
}

// Property: a split adds exactly one node, keeps the text and leaves pointers on the left half
proptest! {
    #[test]
    fn prop_split_preserves_order(word in "[a-z]{2,12}", seed in any::<Index>()) {
        let source = format!("a {word} b");
        let offset = 1 + seed.index(word.len() - 1);

        let mut stream = tokenize(&source).unwrap();
        let before = stream.len();

        let mut ptr = stream.pointer();
        ptr.advance(&stream).unwrap();
        let other = ptr;
        let saved = ptr.checkpoint();
        let left = ptr.node().unwrap();

        let right = stream
            .split_token(Some(left), offset, SymbolKind::Identifier, SymbolKind::Identifier)
            .unwrap();

        prop_assert_eq!(stream.len(), before + 1);
        prop_assert_eq!(texts(&stream), source.clone());
        prop_assert_eq!(stream.next_of(left), Some(right));
        prop_assert_eq!(stream.prev_of(right), Some(left));

        prop_assert_eq!(stream.get(left).unwrap().text().as_str(), &word[..offset]);
        prop_assert_eq!(stream.get(right).unwrap().text().as_str(), &word[offset..]);
        prop_assert_eq!(
            stream.get(right).unwrap().at(),
            Reference::new(1, 3 + u32::try_from(offset).unwrap())
        );

        prop_assert_eq!(other.node(), Some(left));
        ptr.advance(&stream).unwrap();
        prop_assert_eq!(ptr.node(), Some(right));
        ptr.restore(saved);
        prop_assert_eq!(ptr, other);
    }
}

// Property: restoring a checkpoint is exact and repeatable
proptest! {
    #[test]
    fn prop_checkpoint_restore_is_idempotent(
        words in 1usize..20,
        steps in 0usize..20,
        extra in 0usize..20
    ) {
        let stream = tokenize(&"w ".repeat(words)).unwrap();
        let mut ptr = stream.pointer();

        for _ in 0..steps.min(words) {
            ptr.advance(&stream).unwrap();
        }
        let fresh = ptr;
        let saved = ptr.checkpoint();
        let ahead: Vec<_> = stream.cursor_at(ptr.node()).tokens().map(|(id, _)| id).collect();

        for _ in 0..extra {
            if ptr.advance(&stream).is_err() {
                break;
            }
        }

        ptr.restore(saved);
        prop_assert_eq!(ptr, fresh);
        ptr.restore(saved);
        prop_assert_eq!(ptr, fresh);

        let again: Vec<_> = stream.cursor_at(ptr.node()).tokens().map(|(id, _)| id).collect();
        prop_assert_eq!(again, ahead);
    }
}

// Property: lookahead and backward matching are total
proptest! {
    #[test]
    fn prop_lookahead_never_overshoots(
        source in source_strategy(),
        picks in prop_vec(0usize..PREDICATES.len(), 0..8),
        seed in any::<Index>()
    ) {
        let Ok(stream) = tokenize(&source) else {
            return Ok(());
        };

        let predicates: Vec<_> = picks.iter().map(|it| PREDICATES[*it]).collect();
        let positions = positions(&stream);
        let start = positions[seed.index(positions.len())];

        let found = stream.lookahead_from(start, &predicates);

        prop_assert!(found.len() <= predicates.len());
        for (element, predicate) in found.iter().zip(&predicates) {
            prop_assert!(predicate(*element));
        }
    }

    #[test]
    fn prop_match_backward_is_total(
        source in source_strategy(),
        picks in prop_vec(0usize..PREDICATES.len(), 0..8)
    ) {
        let Ok(stream) = tokenize(&source) else {
            return Ok(());
        };

        let predicates: Vec<_> = picks.iter().map(|it| PREDICATES[*it]).collect();

        for (before, position) in positions(&stream).into_iter().enumerate() {
            prop_assert!(stream.match_backward_from(position, &[]));

            let matched = stream.match_backward_from(position, &predicates);
            if predicates.len() > before {
                prop_assert!(!matched);
            }
        }
    }
}
