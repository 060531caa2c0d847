//! Sub-module instantiations.

use crate::expr::Expr;
use litehdl_common::Ident;
use litehdl_source::Span;
use serde::{Deserialize, Serialize};

/// Port connections of an instance.
///
/// Positional and named connections are collected separately and both are
/// emitted, positional first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMap {
    /// Actuals in port order.
    pub positional: Vec<Expr>,
    /// `port => actual` pairs.
    pub named: Vec<(Ident, Expr)>,
}

impl PortMap {
    /// Whether no connection was given.
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }
}

/// `label : entity work.Module generic map (...) port map (...);`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Instance label.
    pub name: Ident,
    /// Instantiated entity.
    pub module: Ident,
    /// Generic map, in source order.
    pub generics: Vec<(Ident, Expr)>,
    /// Port map.
    pub ports: PortMap,
    /// Source location.
    pub span: Span,
}
