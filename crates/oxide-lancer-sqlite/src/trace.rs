//! Expected-value traces.
//!
//! When the oracle flags a query, the trace shows, node by node, what the
//! fuzzer expected each sub-expression to evaluate to. Each line reads
//!
//! ```text
//! <tabs><sql> -- <expected> explicit collate: <collation> implicit collate: <collation>
//! ```
//!
//! with `null` for anything unknown. Nesting depth is one tab per level,
//! and the root itself sits at depth one.
//!
//! Not every node emits a line. Window clauses, frame specifications,
//! table references and type names are skipped. A SELECT contributes no
//! line of its own, only its aggregate columns, joins, WHERE and HAVING.
//! A CASE without a base expression prints only its branches, while a
//! CASE with a base expression also prints itself.

use std::fmt;

use oxide_lancer_core::ast::{Annotation, Collation, InRhs, Join, SelectStatement, Value};
use oxide_lancer_core::{Expr, ExprKind};

const INDENT: char = '\t';

/// Traces an expression tree.
#[must_use]
pub fn trace(root: &Expr) -> String {
    let mut visitor = ExpectedValueTrace::default();
    visitor.visit(root);
    visitor.finish()
}

/// Traces a SELECT as if it were the root expression.
#[must_use]
pub fn trace_select(select: &SelectStatement) -> String {
    let mut visitor = ExpectedValueTrace::default();
    visitor.nested(|v| v.visit_select(select));
    visitor.finish()
}

/// Renders an optional field, writing `null` when absent.
struct OrNull<'a, T>(Option<&'a T>);

impl<T: fmt::Display> fmt::Display for OrNull<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => v.fmt(f),
            None => f.write_str("null"),
        }
    }
}

#[derive(Debug, Default)]
struct ExpectedValueTrace {
    out: String,
    depth: usize,
    lines: usize,
}

impl ExpectedValueTrace {
    fn finish(self) -> String {
        tracing::trace!(lines = self.lines, "traced expected values");
        self.out
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }

    fn print(&mut self, rendered: &dyn fmt::Display, annotation: &Annotation) {
        self.out.extend(std::iter::repeat_n(INDENT, self.depth));
        self.out.push_str(&format!(
            "{rendered} -- {} explicit collate: {} implicit collate: {}\n",
            OrNull(annotation.expected.as_ref()),
            OrNull::<Collation>(annotation.explicit_collation.as_ref()),
            OrNull::<Collation>(annotation.implicit_collation.as_ref()),
        ));
        self.lines += 1;
    }

    fn print_expr(&mut self, expr: &Expr) {
        self.print(expr, &expr.annotation);
    }

    fn visit(&mut self, expr: &Expr) {
        self.nested(|v| v.visit_kind(expr));
    }

    fn visit_all(&mut self, exprs: &[Expr]) {
        for expr in exprs {
            self.visit(expr);
        }
    }

    /// Descends into a known value as if it were a constant node.
    fn visit_expected(&mut self, expected: Option<&Value>) {
        if let Some(value) = expected {
            self.visit(&Expr::constant(value.clone()));
        }
    }

    fn visit_kind(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Column { .. } | ExprKind::Constant(_) | ExprKind::Text(_) => {
                self.print_expr(expr);
            }
            ExprKind::TypeLiteral(_)
            | ExprKind::Window(_)
            | ExprKind::FrameTerm { .. }
            | ExprKind::FrameBetween { .. }
            | ExprKind::TableRef(_) => {}
            ExprKind::Binary { left, right, .. }
            | ExprKind::Match { left, right }
            | ExprKind::SetClause { left, right, .. } => {
                self.print_expr(expr);
                self.visit(left);
                self.visit(right);
            }
            // Single-operand nodes. A BETWEEN counts as one: its bounds are
            // not traced.
            ExprKind::Between { expr: operand, .. }
            | ExprKind::Unary { operand, .. }
            | ExprKind::Postfix { operand, .. }
            | ExprKind::Collate { expr: operand, .. }
            | ExprKind::Cast { expr: operand, .. }
            | ExprKind::Distinct(operand)
            | ExprKind::Exists { expr: operand, .. } => {
                self.print_expr(expr);
                self.visit(operand);
            }
            ExprKind::Function(call) => {
                self.print_expr(expr);
                self.visit_all(&call.args);
            }
            ExprKind::WindowFunction { args, .. } | ExprKind::RowValue(args) => {
                self.print_expr(expr);
                self.visit_all(args);
            }
            ExprKind::Aggregate { .. } | ExprKind::Subquery(_) => {
                self.print_expr(expr);
                self.visit_expected(expr.expected());
            }
            ExprKind::In { expr: lhs, rhs, .. } => {
                self.print_expr(expr);
                self.visit(lhs);
                match rhs {
                    InRhs::List(items) => self.visit_all(items),
                    InRhs::Select(select) => self.nested(|v| v.visit_select(select)),
                }
            }
            ExprKind::Select(select) => self.visit_select(select),
            ExprKind::Join(join) => {
                self.print_expr(expr);
                if let Some(on) = &join.on {
                    self.visit(on);
                }
            }
            ExprKind::OrderingTerm { expr: term, .. } => {
                self.out.push('(');
                self.print_expr(expr);
                self.visit(term);
                self.out.push(')');
            }
            ExprKind::Case {
                base,
                pairs,
                else_expr,
            } => {
                if let Some(base) = base {
                    self.print_expr(expr);
                    self.visit(base);
                }
                for pair in pairs {
                    self.print_expr(&pair.condition);
                    self.visit(&pair.condition);
                    self.print_expr(&pair.then);
                    self.visit(&pair.then);
                }
                if let Some(else_expr) = else_expr {
                    self.print_expr(else_expr);
                    self.visit(else_expr);
                }
            }
            ExprKind::PostfixText { expr: inner, .. } => {
                self.print_expr(expr);
                if let Some(inner) = inner {
                    self.visit(inner);
                }
            }
        }
    }

    fn visit_select(&mut self, select: &SelectStatement) {
        for column in select.aggregates() {
            self.visit(column);
        }
        for join in &select.joins {
            self.nested(|v| v.visit_join(join));
        }
        if let Some(where_clause) = &select.where_clause {
            self.visit(where_clause);
        }
        if let Some(having) = &select.having {
            self.visit(having);
        }
    }

    fn visit_join(&mut self, join: &Join) {
        self.print(join, &Annotation::default());
        if let Some(on) = &join.on {
            self.visit(on);
        }
    }
}
