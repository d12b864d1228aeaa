//! Lexer for PRAGMA statements.
//!
//! Turns statement text into [`Token`]s carrying byte [`Span`]s, which the
//! parser uses to recover the exact source spelling of words.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
