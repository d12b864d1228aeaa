//! Type names used in CAST targets and type literals.

use core::fmt;

/// A `SQLite` type name.
///
/// `SQLite` derives column affinity from the declared name, so the exact
/// spelling matters and is kept as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeName {
    /// `INT` (INTEGER affinity).
    Int,
    /// `INTEGER` (INTEGER affinity).
    Integer,
    /// `REAL` (REAL affinity).
    Real,
    /// `TEXT` (TEXT affinity).
    Text,
    /// `BLOB` (BLOB affinity).
    Blob,
    /// `NUMERIC` (NUMERIC affinity).
    Numeric,
    /// Any other spelling, e.g. `VARCHAR(10)` or `FLOATING POINT`.
    Custom(String),
}

impl TypeName {
    /// Returns the SQL representation of the type name.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Int => String::from("INT"),
            Self::Integer => String::from("INTEGER"),
            Self::Real => String::from("REAL"),
            Self::Text => String::from("TEXT"),
            Self::Blob => String::from("BLOB"),
            Self::Numeric => String::from("NUMERIC"),
            Self::Custom(name) => name.clone(),
        }
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
