//! Abstract Syntax Tree (AST) types for annotated `SQLite` expressions.

mod expression;
mod statement;
mod types;
mod value;

pub use expression::{
    AggregateFunction, BinaryOp, CasePair, Expr, ExprKind, FrameBound, FrameUnits, FunctionCall,
    InRhs, OrderDirection, PostfixOp, UnaryOp, WindowFunctionName, WindowSpec,
};
pub use statement::{
    Join, JoinType, PragmaBody, PragmaStatement, PragmaValue, SelectStatement, SetOperator,
    TableRef,
};
pub use types::TypeName;
pub use value::{Annotation, Collation, Value};
