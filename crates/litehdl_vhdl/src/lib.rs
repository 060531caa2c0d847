//! VHDL text generation from the LiteHDL IR.
//!
//! - [`ExprTranslator`] renders expressions and `if` conditions.
//! - [`stmt`] renders statements and the two process shapes.
//! - [`types`] maps IR types to VHDL subtype indications.
//! - [`emit_module`] assembles the library clause, entity and architecture.
//!
//! Output is a pure function of the module, the interner contents and the
//! [`EmitOptions`]; the same input always yields byte-identical text.

#![warn(missing_docs)]

pub mod emitter;
pub mod expr;
pub mod stmt;
pub mod types;

pub use emitter::{emit_module, render_instance, EmitOptions};
pub use expr::ExprTranslator;
pub use stmt::{render_process, render_statement};
pub use types::{array_type_decl, vhdl_type};
