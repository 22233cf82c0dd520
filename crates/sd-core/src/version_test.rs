use super::*;
use std::cmp::Ordering;

fn v(s: &str) -> Version {
    Version::parse(s).unwrap()
}

#[test]
fn test_parse_dotted_and_underscored() {
    assert_eq!(v("1").segments(), &[1]);
    assert_eq!(v("1.2").segments(), &[1, 2]);
    assert_eq!(v("1_2_3").segments(), &[1, 2, 3]);
    assert_eq!(v("2_0.1").segments(), &[2, 0, 1]);
}

#[test]
fn test_parse_rejects_empty() {
    let err = Version::parse("").unwrap_err();
    assert!(matches!(err, CoreError::InvalidVersion { .. }));
}

#[test]
fn test_parse_rejects_non_numeric_segment() {
    assert!(Version::parse("1.a").is_err());
    assert!(Version::parse("v1").is_err());
    assert!(Version::parse("1..2").is_err());
    assert!(Version::parse("1.").is_err());
    assert!(Version::parse("+1").is_err());
    assert!(Version::parse("-1").is_err());
}

#[test]
fn test_parse_rejects_overflowing_segment() {
    assert!(Version::parse("99999999999999999999999").is_err());
}

#[test]
fn test_prefix_sorts_first() {
    assert!(v("1") < v("1.1"));
    assert!(v("1.1") < v("1.2"));
    assert!(v("1.2") < v("2"));
    assert!(v("1") < v("1.0"));
}

#[test]
fn test_numeric_not_lexical_order() {
    assert!(v("2") < v("10"));
    assert!(v("1.9") < v("1.10"));
}

#[test]
fn test_compare_is_antisymmetric() {
    let pairs = [("1", "2"), ("1", "1.1"), ("1_1", "1.2"), ("3.4.5", "3.5")];
    for (a, b) in pairs {
        assert_eq!(v(a).cmp(&v(b)), Ordering::Less, "{a} < {b}");
        assert_eq!(v(b).cmp(&v(a)), Ordering::Greater, "{b} > {a}");
        assert_eq!(v(a).cmp(&v(a)), Ordering::Equal);
    }
}

#[test]
fn test_separators_are_equivalent() {
    assert_eq!(v("1_2"), v("1.2"));
}

#[test]
fn test_display_uses_dots() {
    assert_eq!(v("1_2_3").to_string(), "1.2.3");
    assert_eq!(v("007").to_string(), "7");
}

#[test]
fn test_from_str() {
    let parsed: Version = "4.2".parse().unwrap();
    assert_eq!(parsed, v("4_2"));
}

#[test]
fn test_serializes_as_string() {
    let json = serde_json::to_string(&v("1_2")).unwrap();
    assert_eq!(json, r#""1.2""#);
}
