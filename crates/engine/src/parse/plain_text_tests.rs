// SPDX-License-Identifier: MIT

use super::*;

use std::path::PathBuf;

#[test]
fn recognizes_allow_listed_extensions() {
    let parser = PlainTextParser;
    assert!(parser.supports("md"));
    assert!(parser.supports("rs"));
    assert!(!parser.supports("pdf"));
    assert!(!parser.supports("docx"));
}

#[test]
fn parses_valid_utf8() {
    let parser = PlainTextParser;
    let text = parser.parse(&PathBuf::from("a.txt"), b"hello world").expect("parse");
    assert_eq!(text, "hello world");
}

#[test]
fn rejects_invalid_utf8() {
    let parser = PlainTextParser;
    let err = parser.parse(&PathBuf::from("a.txt"), &[0xff, 0xfe, 0x00]).unwrap_err();
    assert!(matches!(err, ParseError::NotUtf8));
}
