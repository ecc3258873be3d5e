#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

#[test_case("warn" ; "bare level")]
#[test_case("as3gen=debug" ; "target directive")]
#[test_case("info,as3gen=trace" ; "mixed directives")]
fn parse_filter___valid_directives___succeeds(directives: &str) {
    assert!(parse_filter(directives).is_ok());
}

#[test]
fn parse_filter___bad_level___returns_error_naming_input() {
    let err = parse_filter("as3gen=loud").unwrap_err();

    assert!(err.to_string().contains("as3gen=loud"));
}
