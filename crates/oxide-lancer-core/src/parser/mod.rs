//! `SQLite` statement parser.
//!
//! A hand-written recursive descent parser over the token stream of
//! [`crate::lexer::Lexer`]. It reads back the statements the fuzzer emits.

mod error;
mod parser;

pub use error::ParseError;
pub use parser::Parser;
