//! Conformance test helpers for the LiteHDL compiler.
//!
//! Runs DSL source text through the whole pipeline (lex, parse, elaborate,
//! emit) in memory and returns structured results for assertion in the
//! integration tests under `tests/`.

#![warn(missing_docs)]

use litehdl_common::Interner;
use litehdl_config::ProjectConfig;
use litehdl_diagnostics::{Diagnostic, DiagnosticSink};
use litehdl_ir::Module;
use litehdl_source::SourceDb;
use litehdl_vhdl::EmitOptions;

/// Result of one in-memory compilation.
pub struct CompileResult {
    /// Generated VHDL, present only when no error was reported.
    pub vhdl: Option<String>,
    /// Elaborated module, present when parsing succeeded.
    pub module: Option<Module>,
    /// Interner that resolves the names in `module`.
    pub interner: Interner,
    /// All diagnostics, in emission order.
    pub diagnostics: Vec<Diagnostic>,
    /// Whether any error was reported.
    pub has_errors: bool,
    /// Number of errors.
    pub error_count: usize,
    /// Number of warnings.
    pub warning_count: usize,
}

impl CompileResult {
    /// Diagnostic codes as strings (`"E101"`, `"W201"`, ...), in order.
    pub fn codes(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.code.to_string()).collect()
    }

    /// Diagnostic headline messages, in order.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.message.clone()).collect()
    }

    /// The generated VHDL.
    ///
    /// # Panics
    ///
    /// Panics with the collected diagnostics if compilation failed.
    pub fn expect_vhdl(&self) -> &str {
        match &self.vhdl {
            Some(vhdl) => vhdl,
            None => panic!("compilation failed: {:#?}", self.diagnostics),
        }
    }
}

/// Compiles `source` with the default configuration.
pub fn compile_source(source: &str) -> CompileResult {
    compile_source_with_config(source, &ProjectConfig::default())
}

/// Compiles `source` with an explicit configuration.
pub fn compile_source_with_config(source: &str, config: &ProjectConfig) -> CompileResult {
    let mut source_db = SourceDb::new();
    let interner = Interner::new();
    let sink = DiagnosticSink::new();

    let file_id = source_db.add_source("test.lhdl", source.to_string());
    let ast = litehdl_parser::parse_file(file_id, &source_db, &interner, &sink);

    let mut module = None;
    let mut vhdl = None;
    if !sink.has_errors() {
        if let Ok(elaborated) = litehdl_elaborate::elaborate(&ast, &interner, &sink) {
            if !sink.has_errors() {
                let options = EmitOptions {
                    architecture: config.output.architecture.clone(),
                };
                vhdl = Some(litehdl_vhdl::emit_module(&elaborated, &interner, &options));
            }
            module = Some(elaborated);
        }
    }

    CompileResult {
        vhdl,
        module,
        has_errors: sink.has_errors(),
        error_count: sink.error_count(),
        warning_count: sink.warning_count(),
        diagnostics: sink.take_all(),
        interner,
    }
}
