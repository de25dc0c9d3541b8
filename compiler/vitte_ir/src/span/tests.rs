use super::*;
use pretty_assertions::assert_eq;

fn sp(start: u32, end: u32, line: u32, col: u32) -> Span {
    Span::new(FileId(3), start, end, line, col)
}

#[test]
fn test_span_len() {
    let span = sp(10, 20, 1, 11);
    assert_eq!(span.len(), 10);
    assert!(!span.is_empty());
    assert!(Span::DUMMY.is_empty());
}

#[test]
fn test_span_merge_keeps_earliest_position() {
    let a = sp(15, 30, 2, 4);
    let b = sp(10, 20, 1, 11);
    let merged = a.merge(b);
    assert_eq!(merged, sp(10, 30, 1, 11));
    assert_eq!(b.merge(a), merged);
}

#[test]
fn test_span_shrink_to_end() {
    let end = sp(4, 9, 1, 5).shrink_to_end();
    assert_eq!(end.start, 9);
    assert_eq!(end.end, 9);
    assert!(end.is_empty());
}

#[test]
fn test_span_display_matches_diagnostic_format() {
    assert_eq!(
        sp(1, 4, 2, 7).to_string(),
        "file=3 span=[1..4] line=2 col=7"
    );
    assert_eq!(format!("{:?}", sp(1, 4, 2, 7)), "1..4@2:7");
}

#[test]
fn test_span_to_range() {
    assert_eq!(sp(2, 5, 1, 3).to_range(), 2..5);
}
