//! Parser implementation.

use super::error::ParseError;
use crate::ast::{PragmaBody, PragmaStatement, PragmaValue};
use crate::lexer::{Keyword, Lexer, Token, TokenKind};

/// Magnitude of `i64::MIN`, which only fits once negated.
const I64_MIN_MAGNITUDE: &str = "9223372036854775808";

/// `SQLite` statement parser.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Creates a new parser for the given input.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Lexer::new(input);
        let current = lexer.next_token();
        Self { lexer, current }
    }

    /// Parses a single PRAGMA statement.
    ///
    /// ```text
    /// PRAGMA [schema.]name [= value | ( [value] )] [;]
    /// ```
    ///
    /// A value is a signed number or a bare word. String literals are
    /// accepted and read as words, as `SQLite` does.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the input is not exactly one PRAGMA
    /// statement.
    pub fn parse_pragma(&mut self) -> Result<PragmaStatement, ParseError> {
        self.expect_keyword(Keyword::Pragma)?;

        let first = self.expect_name("pragma name")?;
        let (schema, name) = if self.check(&TokenKind::Dot) {
            self.advance();
            (Some(first), self.expect_name("pragma name")?)
        } else {
            (None, first)
        };

        let body = match self.current.kind {
            TokenKind::Eq => {
                self.advance();
                PragmaBody::Assign(self.parse_pragma_value()?)
            }
            TokenKind::LeftParen => {
                self.advance();
                let value = if self.check(&TokenKind::RightParen) {
                    None
                } else {
                    Some(self.parse_pragma_value()?)
                };
                self.expect(&TokenKind::RightParen, ")")?;
                PragmaBody::Call(value)
            }
            _ => PragmaBody::Query,
        };

        if self.check(&TokenKind::Semicolon) {
            self.advance();
        }
        if !self.current.is_eof() {
            return Err(ParseError::unexpected(
                "end of statement",
                self.current.kind.clone(),
                self.current.span,
            ));
        }

        Ok(PragmaStatement { schema, name, body })
    }

    fn parse_pragma_value(&mut self) -> Result<PragmaValue, ParseError> {
        let negative = match self.current.kind {
            TokenKind::Minus => {
                self.advance();
                true
            }
            TokenKind::Plus => {
                self.advance();
                false
            }
            _ => false,
        };

        let value = match &self.current.kind {
            TokenKind::Integer(n) if negative => PragmaValue::Integer(n.wrapping_neg()),
            TokenKind::Integer(n) => PragmaValue::Integer(*n),
            TokenKind::Float(_) if negative && self.current_text() == I64_MIN_MAGNITUDE => {
                PragmaValue::Integer(i64::MIN)
            }
            TokenKind::Float(f) => PragmaValue::Real(if negative { -f } else { *f }),
            _ if negative => {
                return Err(ParseError::unexpected(
                    "numeric value",
                    self.current.kind.clone(),
                    self.current.span,
                ));
            }
            TokenKind::String(s) => PragmaValue::Keyword(s.clone()),
            _ => return Ok(PragmaValue::Keyword(self.expect_name("pragma value")?)),
        };
        self.advance();
        Ok(value)
    }

    /// The source text of the current token.
    fn current_text(&self) -> &'a str {
        self.current.span.text(self.lexer.source())
    }

    /// Consumes a name. Keywords keep their spelling from the source.
    fn expect_name(&mut self, expected: &str) -> Result<String, ParseError> {
        let name = match &self.current.kind {
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::Keyword(_) => String::from(self.current_text()),
            _ => {
                return Err(ParseError::unexpected(
                    expected,
                    self.current.kind.clone(),
                    self.current.span,
                ));
            }
        };
        self.advance();
        Ok(name)
    }

    fn advance(&mut self) {
        self.current = self.lexer.next_token();
    }

    fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(&self.current.kind) == core::mem::discriminant(kind)
    }

    fn check_keyword(&self, keyword: Keyword) -> bool {
        self.current.as_keyword() == Some(keyword)
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::unexpected(
                expected,
                self.current.kind.clone(),
                self.current.span,
            ))
        }
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> Result<(), ParseError> {
        if self.check_keyword(keyword) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError::unexpected(
                keyword.as_str(),
                self.current.kind.clone(),
                self.current.span,
            ))
        }
    }
}
