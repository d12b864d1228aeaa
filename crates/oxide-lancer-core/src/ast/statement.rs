//! SQL statement AST types.

use core::fmt;

use super::expression::{Expr, ExprKind};

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// INNER JOIN.
    Inner,
    /// LEFT OUTER JOIN.
    Left,
    /// RIGHT OUTER JOIN.
    Right,
    /// FULL OUTER JOIN.
    Full,
    /// CROSS JOIN.
    Cross,
    /// NATURAL JOIN.
    Natural,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
            Self::Natural => "NATURAL JOIN",
        }
    }
}

/// A table reference in a FROM or JOIN clause.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRef {
    /// Table name.
    pub name: String,
    /// Alias.
    pub alias: Option<String>,
}

impl TableRef {
    /// Creates a simple table reference.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    /// Adds an alias to this table reference.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    /// The type of join.
    pub join_type: JoinType,
    /// The table to join.
    pub table: TableRef,
    /// The join condition (absent for CROSS and NATURAL joins).
    pub on: Option<Expr>,
}

impl Join {
    /// Creates a join with an ON clause.
    #[must_use]
    pub const fn on(join_type: JoinType, table: TableRef, on: Expr) -> Self {
        Self {
            join_type,
            table,
            on: Some(on),
        }
    }
}

/// Compound select operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    Union,
    UnionAll,
    Intersect,
    Except,
}

impl SetOperator {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::UnionAll => "UNION ALL",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

/// A SELECT statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectStatement {
    /// Whether to select DISTINCT values.
    pub distinct: bool,
    /// The fetch columns.
    pub columns: Vec<Expr>,
    /// Tables of the FROM clause.
    pub from: Vec<TableRef>,
    /// JOIN clauses following the FROM tables.
    pub joins: Vec<Join>,
    /// The WHERE clause.
    pub where_clause: Option<Expr>,
    /// GROUP BY expressions.
    pub group_by: Vec<Expr>,
    /// HAVING clause.
    pub having: Option<Expr>,
    /// ORDER BY terms.
    pub order_by: Vec<Expr>,
    /// LIMIT clause.
    pub limit: Option<Expr>,
    /// OFFSET clause.
    pub offset: Option<Expr>,
}

impl SelectStatement {
    /// Creates an empty SELECT.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the fetch columns that are aggregate calls.
    pub fn aggregates(&self) -> impl Iterator<Item = &Expr> {
        self.columns
            .iter()
            .filter(|c| matches!(c.kind, ExprKind::Aggregate { .. }))
    }
}

/// A value assigned to or passed to a pragma.
#[derive(Debug, Clone, PartialEq)]
pub enum PragmaValue {
    /// Integer value, possibly negative.
    Integer(i64),
    /// Real value (integers too large for `i64` read back as reals).
    Real(f64),
    /// A bare word such as `FULL`, `true` or `WAL`.
    Keyword(String),
}

impl fmt::Display for PragmaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Real(r) => write!(f, "{r:?}"),
            Self::Keyword(k) => f.write_str(k),
        }
    }
}

/// What follows the pragma name.
#[derive(Debug, Clone, PartialEq)]
pub enum PragmaBody {
    /// `PRAGMA name`
    Query,
    /// `PRAGMA name = value`
    Assign(PragmaValue),
    /// `PRAGMA name(value)` or `PRAGMA name()`
    Call(Option<PragmaValue>),
}

/// A PRAGMA statement.
#[derive(Debug, Clone, PartialEq)]
pub struct PragmaStatement {
    /// Schema qualifier (`main`, `temp`, or an attached database).
    pub schema: Option<String>,
    /// Pragma name.
    pub name: String,
    /// Value part.
    pub body: PragmaBody,
}

impl PragmaStatement {
    /// Creates an unqualified query-only pragma.
    #[must_use]
    pub fn query(name: impl Into<String>) -> Self {
        Self {
            schema: None,
            name: name.into(),
            body: PragmaBody::Query,
        }
    }

    /// Returns the pragma value, whichever form carries it.
    #[must_use]
    pub const fn value(&self) -> Option<&PragmaValue> {
        match &self.body {
            PragmaBody::Query | PragmaBody::Call(None) => None,
            PragmaBody::Assign(v) | PragmaBody::Call(Some(v)) => Some(v),
        }
    }
}

impl fmt::Display for PragmaStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PRAGMA ")?;
        if let Some(schema) = &self.schema {
            write!(f, "{schema}.")?;
        }
        f.write_str(&self.name)?;
        match &self.body {
            PragmaBody::Query => Ok(()),
            PragmaBody::Assign(v) => write!(f, " = {v}"),
            PragmaBody::Call(None) => f.write_str("()"),
            PragmaBody::Call(Some(v)) => write!(f, "({v})"),
        }
    }
}
