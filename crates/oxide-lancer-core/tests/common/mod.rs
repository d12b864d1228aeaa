#![allow(dead_code)]

use oxide_lancer_core::ast::{PragmaBody, PragmaStatement, PragmaValue};
use oxide_lancer_core::{ParseError, Parser};

pub fn parse(sql: &str) -> PragmaStatement {
    Parser::new(sql)
        .parse_pragma()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    Parser::new(sql)
        .parse_pragma()
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn assigned(sql: &str) -> PragmaValue {
    match parse(sql).body {
        PragmaBody::Assign(v) => v,
        other => panic!("Expected assignment, got {other:?}"),
    }
}

pub fn word(w: &str) -> PragmaValue {
    PragmaValue::Keyword(String::from(w))
}
