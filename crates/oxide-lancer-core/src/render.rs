//! Plain SQL rendering of the AST.
//!
//! `Display` on an [`Expr`] yields the canonical `SQLite` text of the node,
//! ignoring its annotation. Operands of operators are always parenthesized,
//! so the output never depends on precedence rules.

use core::fmt;

use crate::ast::{
    CasePair, Expr, ExprKind, FrameBound, FunctionCall, InRhs, Join, SelectStatement, TableRef,
    WindowSpec,
};

/// Writes `items` separated by `", "`.
fn comma_separated<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn not_prefix(negated: bool) -> &'static str {
    if negated { "NOT " } else { "" }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Column { table, name } => match table {
                Some(t) => write!(f, "{t}.{name}"),
                None => f.write_str(name),
            },
            ExprKind::Constant(value) => write!(f, "{value}"),
            ExprKind::Text(text) => f.write_str(text),
            ExprKind::TypeLiteral(type_name) => write!(f, "{type_name}"),
            ExprKind::Binary { left, op, right } => {
                write!(f, "({left}) {} ({right})", op.as_str())
            }
            ExprKind::Match { left, right } => write!(f, "({left}) MATCH ({right})"),
            ExprKind::Between {
                expr,
                low,
                high,
                negated,
            } => write!(
                f,
                "({expr}) {}BETWEEN ({low}) AND ({high})",
                not_prefix(*negated)
            ),
            ExprKind::Unary { op, operand } => write!(f, "{} ({operand})", op.as_str()),
            ExprKind::Postfix { op, operand } => write!(f, "({operand}) {}", op.as_str()),
            ExprKind::Collate { expr, collation } => write!(f, "({expr}) COLLATE {collation}"),
            ExprKind::Cast { expr, type_name } => write!(f, "CAST({expr} AS {type_name})"),
            ExprKind::Distinct(expr) => write!(f, "DISTINCT {expr}"),
            ExprKind::Function(call) => write!(f, "{call}"),
            ExprKind::WindowFunction { name, args } => {
                write!(f, "{}(", name.as_str())?;
                comma_separated(f, args)?;
                f.write_str(")")
            }
            ExprKind::Aggregate { func, arg } => match arg {
                Some(arg) => write!(f, "{}({arg})", func.as_str()),
                None => write!(f, "{}(*)", func.as_str()),
            },
            ExprKind::In { expr, rhs, negated } => {
                write!(f, "({expr}) {}IN (", not_prefix(*negated))?;
                match rhs {
                    InRhs::List(list) => comma_separated(f, list)?,
                    InRhs::Select(select) => write!(f, "{select}")?,
                }
                f.write_str(")")
            }
            ExprKind::Subquery(sql) => write!(f, "({sql})"),
            ExprKind::Exists { expr, negated } => {
                write!(f, "{}EXISTS ({expr})", not_prefix(*negated))
            }
            ExprKind::Select(select) => write!(f, "{select}"),
            ExprKind::Join(join) => write!(f, "{join}"),
            ExprKind::OrderingTerm { expr, direction } => {
                write!(f, "{expr} {}", direction.as_str())
            }
            ExprKind::SetClause { left, op, right } => {
                write!(f, "{left} {} {right}", op.as_str())
            }
            ExprKind::Case {
                base,
                pairs,
                else_expr,
            } => {
                f.write_str("CASE")?;
                if let Some(base) = base {
                    write!(f, " {base}")?;
                }
                for pair in pairs {
                    write!(f, " {pair}")?;
                }
                if let Some(else_expr) = else_expr {
                    write!(f, " ELSE {else_expr}")?;
                }
                f.write_str(" END")
            }
            ExprKind::RowValue(exprs) => {
                f.write_str("(")?;
                comma_separated(f, exprs)?;
                f.write_str(")")
            }
            ExprKind::PostfixText { expr, text } => match expr {
                Some(expr) => write!(f, "{expr} {text}"),
                None => f.write_str(text),
            },
            ExprKind::Window(spec) => write!(f, "{spec}"),
            ExprKind::FrameTerm { units, bound } => write!(f, "{} {bound}", units.as_str()),
            ExprKind::FrameBetween { units, start, end } => {
                write!(f, "{} BETWEEN {start} AND {end}", units.as_str())
            }
            ExprKind::TableRef(table) => write!(f, "{table}"),
        }
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        comma_separated(f, &self.args)?;
        f.write_str(")")
    }
}

impl fmt::Display for CasePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WHEN {} THEN {}", self.condition, self.then)
    }
}

impl fmt::Display for FrameBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnboundedPreceding => f.write_str("UNBOUNDED PRECEDING"),
            Self::Preceding(expr) => write!(f, "{expr} PRECEDING"),
            Self::CurrentRow => f.write_str("CURRENT ROW"),
            Self::Following(expr) => write!(f, "{expr} FOLLOWING"),
            Self::UnboundedFollowing => f.write_str("UNBOUNDED FOLLOWING"),
        }
    }
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} OVER (", self.function)?;
        let mut needs_space = false;
        if !self.partition_by.is_empty() {
            f.write_str("PARTITION BY ")?;
            comma_separated(f, &self.partition_by)?;
            needs_space = true;
        }
        if !self.order_by.is_empty() {
            if needs_space {
                f.write_str(" ")?;
            }
            f.write_str("ORDER BY ")?;
            comma_separated(f, &self.order_by)?;
            needs_space = true;
        }
        if let Some(frame) = &self.frame {
            if needs_space {
                f.write_str(" ")?;
            }
            write!(f, "{frame}")?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {alias}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.join_type.as_str(), self.table)?;
        if let Some(on) = &self.on {
            write!(f, " ON {on}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        if self.columns.is_empty() {
            f.write_str("*")?;
        } else {
            comma_separated(f, &self.columns)?;
        }
        if !self.from.is_empty() {
            f.write_str(" FROM ")?;
            comma_separated(f, &self.from)?;
        }
        for join in &self.joins {
            write!(f, " {join}")?;
        }
        if let Some(where_clause) = &self.where_clause {
            write!(f, " WHERE {where_clause}")?;
        }
        if !self.group_by.is_empty() {
            f.write_str(" GROUP BY ")?;
            comma_separated(f, &self.group_by)?;
        }
        if let Some(having) = &self.having {
            write!(f, " HAVING {having}")?;
        }
        if !self.order_by.is_empty() {
            f.write_str(" ORDER BY ")?;
            comma_separated(f, &self.order_by)?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        if let Some(offset) = &self.offset {
            write!(f, " OFFSET {offset}")?;
        }
        Ok(())
    }
}
