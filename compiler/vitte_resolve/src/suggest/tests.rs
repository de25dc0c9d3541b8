use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_edit_distance() {
    assert_eq!(edit_distance("", "abc"), 3);
    assert_eq!(edit_distance("abc", ""), 3);
    assert_eq!(edit_distance("count", "count"), 0);
    assert_eq!(edit_distance("cont", "count"), 1);
    assert_eq!(edit_distance("kitten", "sitting"), 3);
}

#[test]
fn test_suggests_closest() {
    let names = ["counter", "count", "total"];
    assert_eq!(suggest_similar("cout", names), Some("count"));
}

#[test]
fn test_no_suggestion_when_far() {
    assert_eq!(suggest_similar("x", ["total", "alpha"]), None);
    assert_eq!(suggest_similar("value", ["value"]), None);
}

#[test]
fn test_ties_break_by_name() {
    assert_eq!(suggest_similar("ab", ["ac", "aa"]), Some("aa"));
}
