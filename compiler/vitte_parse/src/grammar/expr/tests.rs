use pretty_assertions::assert_eq;

use super::parse_int;

#[test]
fn test_decimal_with_separators() {
    assert_eq!(parse_int(b"1_000_000"), Ok(1_000_000));
    assert_eq!(parse_int(b"0"), Ok(0));
}

#[test]
fn test_prefixed_radixes() {
    assert_eq!(parse_int(b"0xff"), Ok(255));
    assert_eq!(parse_int(b"0XFF"), Ok(255));
    assert_eq!(parse_int(b"0b1010"), Ok(10));
    assert_eq!(parse_int(b"0o17"), Ok(15));
    assert_eq!(parse_int(b"0x_dead_beef"), Ok(0xdead_beef));
}

#[test]
fn test_i64_max_fits() {
    assert_eq!(parse_int(b"9223372036854775807"), Ok(i64::MAX));
}

#[test]
fn test_overflow() {
    assert_eq!(parse_int(b"9223372036854775808"), Err("integer literal too large"));
    assert_eq!(parse_int(b"0xffffffffffffffffff"), Err("integer literal too large"));
}

#[test]
fn test_prefix_without_digits() {
    assert_eq!(parse_int(b"0x"), Err("malformed integer literal"));
    assert_eq!(parse_int(b"0b__"), Err("malformed integer literal"));
}
