//! The compilation unit.

use crate::instance::Instance;
use crate::process::Process;
use crate::types::{ArrayTypeDecl, Type};
use litehdl_common::Ident;
use litehdl_source::Span;
use serde::{Deserialize, Serialize};

/// `NAME : INTEGER := default`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Generic {
    /// Generic name.
    pub name: Ident,
    /// Default value.
    pub default: i64,
    /// Source location of the header parameter.
    pub span: Span,
}

/// Direction of a port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    /// `IN`
    In,
    /// `OUT`
    Out,
}

/// A port of the entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    /// Port name.
    pub name: Ident,
    /// Direction.
    pub direction: PortDirection,
    /// Type. Never [`Type::Array`].
    pub ty: Type,
    /// Source location.
    pub span: Span,
}

/// An architecture-level signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    /// Signal name.
    pub name: Ident,
    /// Type.
    pub ty: Type,
    /// Source location.
    pub span: Span,
}

/// A module ready for emission.
///
/// Every list keeps source order. A port name never appears again as a
/// signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Entity name.
    pub name: Ident,
    /// Generics.
    pub generics: Vec<Generic>,
    /// Ports.
    pub ports: Vec<Port>,
    /// Signals.
    pub signals: Vec<Signal>,
    /// Array types introduced by two-dimensional signal declarations.
    pub array_types: Vec<ArrayTypeDecl>,
    /// Processes.
    pub processes: Vec<Process>,
    /// Instances.
    pub instances: Vec<Instance>,
    /// Source location of the module.
    pub span: Span,
}
