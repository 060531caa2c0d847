//! The LiteHDL hardware IR.
//!
//! A [`Module`] holds everything the VHDL emitter needs: generics, ports,
//! signals, array type declarations, processes and instances, all in
//! declaration order. Names are interned [`Ident`](litehdl_common::Ident)s.
//! The IR is built once by elaboration and is immutable afterwards.

#![warn(missing_docs)]

pub mod expr;
pub mod instance;
pub mod module;
pub mod process;
pub mod stmt;
pub mod types;

pub use expr::{BinaryOp, CallKind, Expr};
pub use instance::{Instance, PortMap};
pub use module::{Generic, Module, Port, PortDirection, Signal};
pub use process::{Edge, Process, Reset};
pub use stmt::Statement;
pub use types::{ArrayTypeDecl, Bound, Type, VectorKind, Width};
