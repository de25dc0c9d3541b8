//! Token spans tile the input exactly in trivia mode.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use vitte_ir::{FileId, TokenKind};
use vitte_lexer::{lex, lex_with_trivia};

fn concat(src: &[u8]) -> Vec<u8> {
    lex_with_trivia(src, FileId(0))
        .iter()
        .flat_map(|t| t.text.iter().copied())
        .collect()
}

fn assert_contiguous(src: &[u8]) {
    let tokens = lex_with_trivia(src, FileId(0));
    let mut expected_start = 0;
    for tok in &tokens {
        assert_eq!(tok.span.start, expected_start, "gap before {:?}", tok.kind);
        assert_eq!(tok.span.len() as usize, tok.text.len());
        expected_start = tok.span.end;
    }
    assert_eq!(expected_start as usize, src.len());
}

#[test]
fn round_trip_sample_program() {
    let src = b"# demo\nfn add(a: int, b: int) -> int {\n  ret a + b // sum\n}\n\
                prog main\n  let s = \"hi\\n\"\n  say add(1, 2.5e3) /* inline */\n.end\n";
    assert_eq!(concat(src), src.to_vec());
    assert_contiguous(src);
}

#[test]
fn round_trip_with_errors() {
    let src = "let é = @ \"open\n'x".as_bytes();
    assert_eq!(concat(src), src.to_vec());
    assert_contiguous(src);
}

#[test]
fn lex_ends_with_single_eof() {
    let tokens = lex(b"say 1 ;", FileId(0));
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    assert_eq!(
        tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(),
        1
    );
}

proptest! {
    #[test]
    fn round_trip_arbitrary_text(src in "[a-z0-9_ \\t\\n#/*.+=<>!&|(){};:,\"'-]{0,200}") {
        let bytes = src.as_bytes();
        prop_assert_eq!(concat(bytes), bytes.to_vec());
    }

    #[test]
    fn round_trip_arbitrary_bytes(bytes in proptest::collection::vec(any::<u8>(), 0..200)) {
        prop_assert_eq!(concat(&bytes), bytes.clone());
    }
}
