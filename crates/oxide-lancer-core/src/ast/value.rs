//! Evaluated values and collation annotations.

use core::fmt;
use core::fmt::Write as _;

/// A `SQLite` value as produced by the expected-value evaluator.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// NULL.
    Null,
    /// 64-bit signed integer.
    Integer(i64),
    /// IEEE 754 double.
    Real(f64),
    /// Text value.
    Text(String),
    /// Binary blob.
    Blob(Vec<u8>),
}

impl Value {
    /// Returns the SQL literal for this value.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Null => String::from("NULL"),
            Self::Integer(n) => format!("{n}"),
            Self::Real(f) => real_to_sql(*f),
            Self::Text(s) => {
                let escaped = s.replace('\'', "''");
                format!("'{escaped}'")
            }
            Self::Blob(b) => {
                let hex = b.iter().fold(String::new(), |mut out, byte| {
                    let _ = write!(out, "{byte:02X}");
                    out
                });
                format!("X'{hex}'")
            }
        }
    }
}

// SQLite has no literal for infinities; 1e999 overflows to them on parse.
#[allow(clippy::float_cmp)]
fn real_to_sql(f: f64) -> String {
    if f.is_nan() {
        String::from("NULL")
    } else if f.is_infinite() {
        if f.is_sign_positive() {
            String::from("1e999")
        } else {
            String::from("-1e999")
        }
    } else if f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        format!("{f}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(String::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Integer(i64::from(value))
    }
}

/// A collating sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collation {
    /// Byte-wise comparison (the default).
    Binary,
    /// ASCII case-insensitive comparison.
    NoCase,
    /// Binary comparison ignoring trailing spaces.
    Rtrim,
}

impl Collation {
    /// All built-in collations.
    pub const ALL: [Self; 3] = [Self::Binary, Self::NoCase, Self::Rtrim];

    /// Returns the SQL name of the collation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Binary => "BINARY",
            Self::NoCase => "NOCASE",
            Self::Rtrim => "RTRIM",
        }
    }
}

impl fmt::Display for Collation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Evaluator output attached to an expression node.
///
/// All fields are filled in by whoever evaluated the tree. Nodes that are
/// never evaluated (type literals, window frames) leave them empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Annotation {
    /// The value the node is expected to produce.
    pub expected: Option<Value>,
    /// Collation declared with an explicit `COLLATE`.
    pub explicit_collation: Option<Collation>,
    /// Collation inferred from the operands.
    pub implicit_collation: Option<Collation>,
}

impl Annotation {
    /// An annotation carrying only an expected value.
    #[must_use]
    pub const fn expected(value: Value) -> Self {
        Self {
            expected: Some(value),
            explicit_collation: None,
            implicit_collation: None,
        }
    }
}
