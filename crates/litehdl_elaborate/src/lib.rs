//! AST-to-IR elaboration for LiteHDL.
//!
//! Walks the single module of a parsed file once, filling a
//! [`ModuleBuilder`](context::ModuleBuilder) that is consumed into an
//! [`litehdl_ir::Module`]. Problems in the source are reported to the sink
//! (`E200`--`E209`, `W200`--`W204`) and the offending construct is left out
//! of the IR; only internal compiler bugs return `Err`.
//!
//! # Usage
//!
//! ```ignore
//! let module = elaborate(&ast, &interner, &sink)?;
//! ```

#![warn(missing_docs)]

pub mod context;
pub mod errors;
pub mod expr;
pub mod module;
pub mod stmt;
pub mod types;

use litehdl_common::{Interner, InternalError, LiteResult};
use litehdl_diagnostics::DiagnosticSink;
use litehdl_ir::Module;
use litehdl_parser::SourceFileAst;

use context::{ElabContext, ModuleBuilder};

/// Elaborates a parsed file into an IR [`Module`].
///
/// The caller is expected to skip this stage when parsing reported errors;
/// a file without a module is an internal error.
pub fn elaborate(
    ast: &SourceFileAst,
    interner: &Interner,
    sink: &DiagnosticSink,
) -> LiteResult<Module> {
    let decl = ast
        .module
        .as_ref()
        .ok_or_else(|| InternalError::new("elaboration reached a file without a module"))?;

    let ctx = ElabContext::new(interner, sink);
    let mut builder = ModuleBuilder::new(decl.name, decl.name_span, decl.span);
    module::elaborate_module(decl, &mut builder, &ctx);
    Ok(builder.finish(&ctx))
}
