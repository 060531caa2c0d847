//! Hardware types of ports and signals.

use litehdl_common::Ident;
use litehdl_source::Span;
use serde::{Deserialize, Serialize};

/// The VHDL base type behind a vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VectorKind {
    /// `STD_LOGIC_VECTOR`
    Std,
    /// `UNSIGNED`
    Unsigned,
    /// `SIGNED`
    Signed,
}

/// A vector width or array depth as written in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Width {
    /// An integer literal.
    Literal(u64),
    /// A name, normally a generic.
    Symbol(Ident),
}

impl Width {
    /// The inclusive upper index of a range of this size.
    ///
    /// Literal widths are reduced arithmetically; symbolic ones are kept as
    /// `W-1` and never folded.
    pub fn upper_bound(self) -> Bound {
        match self {
            Width::Literal(n) => Bound::Literal(n.saturating_sub(1)),
            Width::Symbol(name) => Bound::SymbolMinusOne(name),
        }
    }
}

/// The upper index of a range, see [`Width::upper_bound`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bound {
    /// `N-1` already computed.
    Literal(u64),
    /// `W-1`, kept symbolic.
    SymbolMinusOne(Ident),
}

/// The type of a port or signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Type {
    /// A single `STD_LOGIC`.
    Bit,
    /// A one-dimensional vector.
    Vector {
        /// Number of bits.
        width: Width,
        /// Base type.
        kind: VectorKind,
    },
    /// A signal of a named array type; see [`ArrayTypeDecl`].
    Array {
        /// Name of the declared array type, `t_<signal>_array`.
        type_name: Ident,
        /// Element base type.
        element: VectorKind,
        /// Element width.
        width: Width,
        /// Number of elements.
        depth: Width,
    },
}

/// `type t_mem_array is array (0 to D-1) of <element>(W-1 downto 0);`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayTypeDecl {
    /// Type name.
    pub name: Ident,
    /// Element base type. Only `Std` or `Unsigned` are produced.
    pub element: VectorKind,
    /// Element width.
    pub width: Width,
    /// Number of elements.
    pub depth: Width,
    /// Span of the signal declaration that introduced the type.
    pub span: Span,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_bound_is_reduced() {
        assert_eq!(Width::Literal(8).upper_bound(), Bound::Literal(7));
        assert_eq!(Width::Literal(1).upper_bound(), Bound::Literal(0));
    }

    #[test]
    fn symbolic_bound_is_kept() {
        let w = Ident::from_raw(3);
        assert_eq!(Width::Symbol(w).upper_bound(), Bound::SymbolMinusOne(w));
    }
}
