//! Statements inside process bodies.

use crate::expr::Expr;
use litehdl_source::Span;
use serde::{Deserialize, Serialize};

/// A sequential statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    /// `target <= value;`
    Assign {
        /// A name, index or slice.
        target: Expr,
        /// Assigned value.
        value: Expr,
        /// Source location.
        span: Span,
    },
    /// `if test then ... else ... end if;`. An `elif` chain is a nested
    /// `If` as the only statement of `else_body`.
    If {
        /// Condition.
        test: Expr,
        /// Body when the condition holds.
        then_body: Vec<Statement>,
        /// Body otherwise; empty when there is no `else`.
        else_body: Vec<Statement>,
        /// Source location.
        span: Span,
    },
}
