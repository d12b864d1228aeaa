//! Expression AST types.
//!
//! Every node owns its children and carries an [`Annotation`] with the
//! value the evaluator expects it to produce.

use super::statement::{Join, SelectStatement, SetOperator, TableRef};
use super::types::TypeName;
use super::value::{Annotation, Collation, Value};

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // String
    Concat,

    // Bitwise
    BitAnd,
    BitOr,
    LeftShift,
    RightShift,

    // Logical
    And,
    Or,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Is,
    IsNot,
    Like,
    Glob,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Concat => "||",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Is => "IS",
            Self::IsNot => "IS NOT",
            Self::Like => "LIKE",
            Self::Glob => "GLOB",
        }
    }
}

/// Prefix unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `+`
    Plus,
    /// `-`
    Neg,
    /// `NOT`
    Not,
    /// `~`
    BitNot,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Neg => "-",
            Self::Not => "NOT",
            Self::BitNot => "~",
        }
    }
}

/// Postfix unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOp {
    IsNull,
    NotNull,
    IsTrue,
    IsFalse,
    IsNotTrue,
    IsNotFalse,
}

impl PostfixOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::IsNull => "ISNULL",
            Self::NotNull => "NOTNULL",
            Self::IsTrue => "IS TRUE",
            Self::IsFalse => "IS FALSE",
            Self::IsNotTrue => "IS NOT TRUE",
            Self::IsNotFalse => "IS NOT FALSE",
        }
    }
}

/// Aggregate functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    Avg,
    Count,
    GroupConcat,
    Max,
    Min,
    Sum,
    Total,
}

impl AggregateFunction {
    /// Returns the SQL function name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Avg => "AVG",
            Self::Count => "COUNT",
            Self::GroupConcat => "GROUP_CONCAT",
            Self::Max => "MAX",
            Self::Min => "MIN",
            Self::Sum => "SUM",
            Self::Total => "TOTAL",
        }
    }
}

/// Built-in window functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowFunctionName {
    RowNumber,
    Rank,
    DenseRank,
    PercentRank,
    CumeDist,
    Ntile,
    Lag,
    Lead,
    FirstValue,
    LastValue,
    NthValue,
}

impl WindowFunctionName {
    /// Returns the SQL function name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RowNumber => "row_number",
            Self::Rank => "rank",
            Self::DenseRank => "dense_rank",
            Self::PercentRank => "percent_rank",
            Self::CumeDist => "cume_dist",
            Self::Ntile => "ntile",
            Self::Lag => "lag",
            Self::Lead => "lead",
            Self::FirstValue => "first_value",
            Self::LastValue => "last_value",
            Self::NthValue => "nth_value",
        }
    }
}

/// A scalar function call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// The function name.
    pub name: String,
    /// The arguments.
    pub args: Vec<Expr>,
    /// Whether DISTINCT was specified.
    pub distinct: bool,
}

/// A WHEN/THEN pair of a CASE expression.
#[derive(Debug, Clone, PartialEq)]
pub struct CasePair {
    /// The WHEN operand.
    pub condition: Expr,
    /// The THEN result.
    pub then: Expr,
}

impl CasePair {
    /// Creates a new WHEN/THEN pair.
    #[must_use]
    pub const fn new(condition: Expr, then: Expr) -> Self {
        Self { condition, then }
    }
}

/// Right-hand side of an IN expression.
#[derive(Debug, Clone, PartialEq)]
pub enum InRhs {
    /// `IN (a, b, c)`
    List(Vec<Expr>),
    /// `IN (SELECT ...)`
    Select(Box<SelectStatement>),
}

/// Frame units of a window frame specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameUnits {
    Rows,
    Range,
    Groups,
}

impl FrameUnits {
    /// Returns the SQL keyword.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rows => "ROWS",
            Self::Range => "RANGE",
            Self::Groups => "GROUPS",
        }
    }
}

/// One end of a window frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameBound {
    UnboundedPreceding,
    Preceding(Box<Expr>),
    CurrentRow,
    Following(Box<Expr>),
    UnboundedFollowing,
}

/// The `OVER (...)` part of a window function invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSpec {
    /// The windowed function (a window function or an aggregate).
    pub function: Expr,
    /// PARTITION BY expressions.
    pub partition_by: Vec<Expr>,
    /// ORDER BY terms.
    pub order_by: Vec<Expr>,
    /// A `FrameTerm` or `FrameBetween` node.
    pub frame: Option<Expr>,
}

/// Ordering direction of an ORDER BY term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// The closed set of expression node kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// A column reference (optionally qualified with table name).
    Column {
        /// Table name or alias (optional).
        table: Option<String>,
        /// Column name.
        name: String,
    },

    /// A literal value.
    Constant(Value),

    /// Verbatim SQL text.
    Text(String),

    /// A bare type name.
    TypeLiteral(TypeName),

    /// A binary arithmetic, logical or comparison operation.
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    /// `left MATCH right`
    Match { left: Box<Expr>, right: Box<Expr> },

    /// `expr [NOT] BETWEEN low AND high`
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        negated: bool,
    },

    /// A prefix unary operation.
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// A postfix unary operation.
    Postfix { op: PostfixOp, operand: Box<Expr> },

    /// `expr COLLATE collation`
    Collate {
        expr: Box<Expr>,
        collation: Collation,
    },

    /// `CAST(expr AS type_name)`
    Cast {
        expr: Box<Expr>,
        type_name: TypeName,
    },

    /// `DISTINCT expr`
    Distinct(Box<Expr>),

    /// A scalar function call.
    Function(FunctionCall),

    /// A built-in window function call.
    WindowFunction {
        name: WindowFunctionName,
        args: Vec<Expr>,
    },

    /// An aggregate call. `arg` is `None` for `COUNT(*)`.
    Aggregate {
        func: AggregateFunction,
        arg: Option<Box<Expr>>,
    },

    /// `expr [NOT] IN (...)`
    In {
        expr: Box<Expr>,
        rhs: InRhs,
        negated: bool,
    },

    /// A scalar subquery given as SQL text.
    Subquery(String),

    /// `[NOT] EXISTS expr`
    Exists { expr: Box<Expr>, negated: bool },

    /// A nested SELECT.
    Select(Box<SelectStatement>),

    /// A join clause.
    Join(Box<Join>),

    /// An ORDER BY term.
    OrderingTerm {
        expr: Box<Expr>,
        direction: OrderDirection,
    },

    /// A compound select, e.g. `left UNION right`.
    SetClause {
        left: Box<Expr>,
        op: SetOperator,
        right: Box<Expr>,
    },

    /// `CASE [base] WHEN ... THEN ... [ELSE ...] END`
    Case {
        base: Option<Box<Expr>>,
        pairs: Vec<CasePair>,
        else_expr: Option<Box<Expr>>,
    },

    /// `(a, b, ...)`
    RowValue(Vec<Expr>),

    /// Free text following an optional expression.
    PostfixText {
        expr: Option<Box<Expr>>,
        text: String,
    },

    /// `function OVER (...)`
    Window(Box<WindowSpec>),

    /// `ROWS <bound>`
    FrameTerm { units: FrameUnits, bound: FrameBound },

    /// `ROWS BETWEEN <start> AND <end>`
    FrameBetween {
        units: FrameUnits,
        start: FrameBound,
        end: FrameBound,
    },

    /// A table named in a FROM clause.
    TableRef(TableRef),
}

/// An annotated SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// The node kind and its children.
    pub kind: ExprKind,
    /// Expected value and collations computed by the evaluator.
    pub annotation: Annotation,
}

impl From<ExprKind> for Expr {
    fn from(kind: ExprKind) -> Self {
        Self::new(kind)
    }
}

impl Expr {
    /// Creates an unannotated node.
    #[must_use]
    pub fn new(kind: ExprKind) -> Self {
        Self {
            kind,
            annotation: Annotation::default(),
        }
    }

    /// Sets the expected value.
    #[must_use]
    pub fn with_expected(mut self, value: impl Into<Value>) -> Self {
        self.annotation.expected = Some(value.into());
        self
    }

    /// Sets the explicit collation.
    #[must_use]
    pub const fn with_explicit_collation(mut self, collation: Collation) -> Self {
        self.annotation.explicit_collation = Some(collation);
        self
    }

    /// Sets the implicit collation.
    #[must_use]
    pub const fn with_implicit_collation(mut self, collation: Collation) -> Self {
        self.annotation.implicit_collation = Some(collation);
        self
    }

    /// Returns the expected value, if the node was evaluated.
    #[must_use]
    pub const fn expected(&self) -> Option<&Value> {
        self.annotation.expected.as_ref()
    }

    /// Creates a new column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::new(ExprKind::Column {
            table: None,
            name: name.into(),
        })
    }

    /// Creates a new qualified column reference.
    #[must_use]
    pub fn qualified_column(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(ExprKind::Column {
            table: Some(table.into()),
            name: name.into(),
        })
    }

    /// Creates a constant. A constant's expected value is itself.
    #[must_use]
    pub fn constant(value: impl Into<Value>) -> Self {
        let value = value.into();
        Self {
            kind: ExprKind::Constant(value.clone()),
            annotation: Annotation::expected(value),
        }
    }

    /// Creates an integer constant.
    #[must_use]
    pub fn integer(value: i64) -> Self {
        Self::constant(Value::Integer(value))
    }

    /// Creates a text constant.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::constant(Value::Text(value.into()))
    }

    /// Creates a NULL constant.
    #[must_use]
    pub fn null() -> Self {
        Self::constant(Value::Null)
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: Self) -> Self {
        Self::new(ExprKind::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
        })
    }

    /// Creates an equality expression.
    #[must_use]
    pub fn eq(self, right: Self) -> Self {
        self.binary(BinaryOp::Eq, right)
    }

    /// Creates a less-than expression.
    #[must_use]
    pub fn lt(self, right: Self) -> Self {
        self.binary(BinaryOp::Lt, right)
    }

    /// Creates a greater-than expression.
    #[must_use]
    pub fn gt(self, right: Self) -> Self {
        self.binary(BinaryOp::Gt, right)
    }

    /// Creates an AND expression.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        self.binary(BinaryOp::And, right)
    }

    /// Creates an OR expression.
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        self.binary(BinaryOp::Or, right)
    }

    /// Creates a MATCH expression.
    #[must_use]
    pub fn matches(self, right: Self) -> Self {
        Self::new(ExprKind::Match {
            left: Box::new(self),
            right: Box::new(right),
        })
    }

    /// Creates a prefix unary expression.
    #[must_use]
    pub fn unary(op: UnaryOp, operand: Self) -> Self {
        Self::new(ExprKind::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    /// Creates a postfix unary expression.
    #[must_use]
    pub fn postfix(self, op: PostfixOp) -> Self {
        Self::new(ExprKind::Postfix {
            op,
            operand: Box::new(self),
        })
    }

    /// Creates a BETWEEN expression.
    #[must_use]
    pub fn between(self, low: Self, high: Self) -> Self {
        Self::new(ExprKind::Between {
            expr: Box::new(self),
            low: Box::new(low),
            high: Box::new(high),
            negated: false,
        })
    }

    /// Creates an IN expression over an explicit list.
    #[must_use]
    pub fn in_list(self, list: Vec<Self>) -> Self {
        Self::new(ExprKind::In {
            expr: Box::new(self),
            rhs: InRhs::List(list),
            negated: false,
        })
    }

    /// Creates an IN expression over a subquery.
    #[must_use]
    pub fn in_select(self, select: SelectStatement) -> Self {
        Self::new(ExprKind::In {
            expr: Box::new(self),
            rhs: InRhs::Select(Box::new(select)),
            negated: false,
        })
    }

    /// Creates a COLLATE expression.
    #[must_use]
    pub fn collate(self, collation: Collation) -> Self {
        Self::new(ExprKind::Collate {
            expr: Box::new(self),
            collation,
        })
    }

    /// Creates a CAST expression.
    #[must_use]
    pub fn cast(self, type_name: TypeName) -> Self {
        Self::new(ExprKind::Cast {
            expr: Box::new(self),
            type_name,
        })
    }

    /// Creates a scalar function call.
    #[must_use]
    pub fn function(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::new(ExprKind::Function(FunctionCall {
            name: name.into(),
            args,
            distinct: false,
        }))
    }

    /// Creates an aggregate call.
    #[must_use]
    pub fn aggregate(func: AggregateFunction, arg: Self) -> Self {
        Self::new(ExprKind::Aggregate {
            func,
            arg: Some(Box::new(arg)),
        })
    }

    /// Creates a CASE expression.
    #[must_use]
    pub fn case(base: Option<Self>, pairs: Vec<CasePair>, else_expr: Option<Self>) -> Self {
        Self::new(ExprKind::Case {
            base: base.map(Box::new),
            pairs,
            else_expr: else_expr.map(Box::new),
        })
    }

    /// Creates an ORDER BY term.
    #[must_use]
    pub fn ordering(self, direction: OrderDirection) -> Self {
        Self::new(ExprKind::OrderingTerm {
            expr: Box::new(self),
            direction,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_expects_itself() {
        let c = Expr::integer(7);
        assert_eq!(c.expected(), Some(&Value::Integer(7)));
        assert!(c.annotation.explicit_collation.is_none());
    }

    #[test]
    fn test_expr_builders() {
        let col = Expr::column("c0");
        assert!(matches!(col.kind, ExprKind::Column { ref name, .. } if name == "c0"));
        assert!(col.expected().is_none());

        let collated = Expr::column("c0")
            .with_explicit_collation(Collation::NoCase)
            .with_implicit_collation(Collation::Binary);
        assert_eq!(
            collated.annotation.explicit_collation,
            Some(Collation::NoCase)
        );
        assert_eq!(
            collated.annotation.implicit_collation,
            Some(Collation::Binary)
        );
    }

    #[test]
    fn test_expr_chaining() {
        let expr = Expr::column("a")
            .gt(Expr::integer(1))
            .and(Expr::column("b").eq(Expr::text("x")));
        assert!(matches!(
            expr.kind,
            ExprKind::Binary {
                op: BinaryOp::And,
                ..
            }
        ));
    }

    #[test]
    fn test_operator_spelling() {
        assert_eq!(UnaryOp::Not.as_str(), "NOT");
        assert_eq!(PostfixOp::IsNotFalse.as_str(), "IS NOT FALSE");
        assert_eq!(AggregateFunction::GroupConcat.as_str(), "GROUP_CONCAT");
        assert_eq!(WindowFunctionName::RowNumber.as_str(), "row_number");
        assert_eq!(FrameUnits::Groups.as_str(), "GROUPS");
    }
}
