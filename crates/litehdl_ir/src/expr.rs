//! Expression trees for process bodies, port maps and generic maps.

use litehdl_common::{Ident, Logic};
use serde::{Deserialize, Serialize};

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// Bitwise or logical and.
    And,
    /// Bitwise or logical or.
    Or,
    /// Exclusive or.
    Xor,
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    Le,
    /// `>=`
    Ge,
}

/// The callee of a one-argument call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallKind {
    /// `v(x)`, to `std_logic_vector`.
    ToVector,
    /// `u(x)`, to `unsigned`.
    ToUnsigned,
    /// `s(x)`, to `signed`.
    ToSigned,
    /// `int(x)`, to `integer`.
    ToInteger,
    /// Any other function, emitted by name.
    Other(Ident),
}

impl CallKind {
    /// Classifies a callee name.
    pub fn from_name(name: &str, ident: Ident) -> Self {
        match name {
            "v" => CallKind::ToVector,
            "u" => CallKind::ToUnsigned,
            "s" => CallKind::ToSigned,
            "int" => CallKind::ToInteger,
            _ => CallKind::Other(ident),
        }
    }
}

/// An expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// A signal, port or generic.
    Ident(Ident),
    /// A non-negative integer.
    IntLiteral(u64),
    /// A single std_logic value.
    BitLiteral(Logic),
    /// A vector literal of std_logic characters.
    BitString(String),
    /// `lhs op rhs`
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        lhs: Box<Expr>,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// Negation.
    Not(Box<Expr>),
    /// A cast or function call with at most one argument.
    Call {
        /// Callee.
        func: CallKind,
        /// Argument, if any.
        arg: Option<Box<Expr>>,
    },
    /// `base(high downto low)`; a missing bound renders as `0`.
    Slice {
        /// Sliced value.
        base: Box<Expr>,
        /// Upper bound.
        high: Option<Box<Expr>>,
        /// Lower bound.
        low: Option<Box<Expr>>,
    },
    /// `base(index)`
    Index {
        /// Indexed value.
        base: Box<Expr>,
        /// Index.
        index: Box<Expr>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_kinds_from_names() {
        let id = Ident::from_raw(0);
        assert_eq!(CallKind::from_name("v", id), CallKind::ToVector);
        assert_eq!(CallKind::from_name("u", id), CallKind::ToUnsigned);
        assert_eq!(CallKind::from_name("s", id), CallKind::ToSigned);
        assert_eq!(CallKind::from_name("int", id), CallKind::ToInteger);
        assert_eq!(CallKind::from_name("resize", id), CallKind::Other(id));
    }
}
