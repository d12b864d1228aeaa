//! # oxide-lancer-core
//!
//! SQL building blocks shared by the `SQLite` fuzzing components.
//!
//! This crate provides:
//! - An annotated expression tree: every node can carry the value the
//!   fuzzer expects it to evaluate to, plus its explicit and implicit
//!   collation
//! - Rendering of expressions and statements to `SQLite` syntax
//! - [`Query`]: a statement paired with the error messages it may
//!   legitimately raise
//! - A hand-written lexer and a parser that reads generated PRAGMA
//!   statements back
//!
//! ## Annotated expressions
//!
//! ```rust
//! use oxide_lancer_core::ast::{Collation, Expr};
//!
//! let expr = Expr::column("c0")
//!     .with_expected("a")
//!     .with_implicit_collation(Collation::NoCase)
//!     .eq(Expr::text("A"))
//!     .with_expected(1_i64);
//!
//! assert_eq!(expr.to_string(), "(c0) = ('A')");
//! ```
//!
//! ## Reading statements back
//!
//! ```rust
//! use oxide_lancer_core::ast::{PragmaBody, PragmaValue};
//! use oxide_lancer_core::Parser;
//!
//! let stmt = Parser::new("PRAGMA temp.busy_timeout = 10000;")
//!     .parse_pragma()
//!     .unwrap();
//! assert_eq!(stmt.schema.as_deref(), Some("temp"));
//! assert_eq!(stmt.body, PragmaBody::Assign(PragmaValue::Integer(10_000)));
//! ```

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod query;
mod render;

pub use ast::{Expr, ExprKind, PragmaStatement, SelectStatement, Value};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{ParseError, Parser};
pub use query::{ExpectedErrors, Query};
