//! In-memory compilation and output helpers.
//!
//! [`compile_text`] runs lexing, parsing, elaboration and emission over one
//! source file and hands back everything the caller needs to report and
//! write results. The file system is only touched by [`write_if_changed`].

use std::path::{Path, PathBuf};

use litehdl_common::{ContentHash, Ident, Interner};
use litehdl_diagnostics::{Diagnostic, DiagnosticRenderer, DiagnosticSink, TerminalRenderer};
use litehdl_ir::Module;
use litehdl_source::SourceDb;
use litehdl_vhdl::EmitOptions;
use serde::Serialize;

use crate::error::CliError;
use crate::ReportFormat;

/// Everything produced by one compilation.
pub struct Compilation {
    /// Holds the input text for diagnostic rendering.
    pub source_db: SourceDb,
    /// Names used by the AST and IR.
    pub interner: Interner,
    /// Diagnostics from every stage.
    pub sink: DiagnosticSink,
    /// The elaborated module, when parsing produced one.
    pub module: Option<Module>,
    /// Generated VHDL; `None` when any error was reported.
    pub vhdl: Option<String>,
}

/// Compiles `content`, registered in the source database under `name`.
///
/// Elaboration is skipped after parse errors and emission after any error.
pub fn compile_text(
    name: impl Into<PathBuf>,
    content: String,
    options: &EmitOptions,
) -> Result<Compilation, CliError> {
    let mut source_db = SourceDb::new();
    let interner = Interner::new();
    let sink = DiagnosticSink::new();

    let file_id = source_db.add_source(name, content);
    let ast = litehdl_parser::parse_file(file_id, &source_db, &interner, &sink);

    let mut module = None;
    let mut vhdl = None;
    if !sink.has_errors() {
        let elaborated = litehdl_elaborate::elaborate(&ast, &interner, &sink)?;
        if !sink.has_errors() {
            vhdl = Some(litehdl_vhdl::emit_module(&elaborated, &interner, options));
        }
        module = Some(elaborated);
    }

    Ok(Compilation {
        source_db,
        interner,
        sink,
        module,
        vhdl,
    })
}

/// Default output path: the input with its extension replaced.
pub fn derive_output_path(input: &Path, extension: &str) -> PathBuf {
    input.with_extension(extension)
}

/// What [`write_if_changed`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WriteStatus {
    /// The file was created or overwritten.
    Written,
    /// The file already held exactly this text.
    Unchanged,
}

/// Writes `text` to `path` unless the file already has the same content hash.
pub fn write_if_changed(path: &Path, text: &str) -> Result<WriteStatus, CliError> {
    if let Ok(existing) = std::fs::read(path) {
        if ContentHash::from_bytes(&existing) == ContentHash::of_str(text) {
            return Ok(WriteStatus::Unchanged);
        }
    }
    std::fs::write(path, text).map_err(|source| CliError::Io {
        action: "failed to write",
        path: path.to_path_buf(),
        source,
    })?;
    Ok(WriteStatus::Written)
}

/// Prints the collected diagnostics to stderr (text) or stdout (JSON).
pub fn render_diagnostics(
    diagnostics: &[Diagnostic],
    source_db: &SourceDb,
    format: ReportFormat,
    color: bool,
) {
    match format {
        ReportFormat::Text => {
            let renderer = TerminalRenderer::new(color, 100);
            for diag in diagnostics {
                eprintln!("{}", renderer.render(diag, source_db));
            }
        }
        ReportFormat::Json => {
            let json =
                serde_json::to_string_pretty(diagnostics).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Serialized form of `--emit ir`.
///
/// Identifiers in the IR are raw interner indices; `symbols[i]` is the name
/// behind index `i`.
#[derive(Serialize)]
struct IrDump<'a> {
    symbols: Vec<&'a str>,
    module: &'a Module,
}

/// Pretty JSON for the elaborated module and its symbol table.
pub fn ir_json(module: &Module, interner: &Interner) -> Result<String, CliError> {
    let symbols = (0..interner.len())
        .filter_map(|i| u32::try_from(i).ok())
        .map(|i| interner.resolve(Ident::from_raw(i)))
        .collect();
    let mut json = serde_json::to_string_pretty(&IrDump { symbols, module })?;
    json.push('\n');
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDER: &str = "\
module Adder(W=8):
    in:
        a: u[W]
        b: u[W]
    out:
        y: u[W]
    comb:
        y = a + b
";

    #[test]
    fn compiles_clean_source() {
        let comp = compile_text("adder.lhdl", ADDER.to_string(), &EmitOptions::default()).unwrap();
        assert!(!comp.sink.has_errors());
        let vhdl = comp.vhdl.unwrap();
        assert!(vhdl.contains("entity Adder is"));
        assert!(vhdl.contains("        y <= (a + b);"));
        assert!(comp.module.is_some());
    }

    #[test]
    fn parse_errors_stop_before_elaboration() {
        let comp = compile_text("bad.lhdl", "module M(:\n".to_string(), &EmitOptions::default())
            .unwrap();
        assert!(comp.sink.has_errors());
        assert!(comp.module.is_none());
        assert!(comp.vhdl.is_none());
    }

    #[test]
    fn elaboration_errors_suppress_output() {
        let src = "module M():\n    in:\n        a: q[4]\n";
        let comp = compile_text("m.lhdl", src.to_string(), &EmitOptions::default()).unwrap();
        assert!(comp.sink.has_errors());
        assert!(comp.vhdl.is_none());
    }

    #[test]
    fn output_path_replaces_extension() {
        assert_eq!(
            derive_output_path(Path::new("rtl/adder.lhdl"), "vhd"),
            PathBuf::from("rtl/adder.vhd")
        );
        assert_eq!(
            derive_output_path(Path::new("adder"), "json"),
            PathBuf::from("adder.json")
        );
    }

    #[test]
    fn unchanged_output_is_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.vhd");
        assert_eq!(write_if_changed(&path, "abc").unwrap(), WriteStatus::Written);
        assert_eq!(write_if_changed(&path, "abc").unwrap(), WriteStatus::Unchanged);
        assert_eq!(write_if_changed(&path, "abcd").unwrap(), WriteStatus::Written);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "abcd");
    }

    #[test]
    fn ir_dump_resolves_symbols() {
        let comp = compile_text("adder.lhdl", ADDER.to_string(), &EmitOptions::default()).unwrap();
        let module = comp.module.as_ref().unwrap();
        let json = ir_json(module, &comp.interner).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let symbols = value["symbols"].as_array().unwrap();
        let name_index = value["module"]["name"].as_u64().unwrap() as usize;
        assert_eq!(symbols[name_index], "Adder");
    }
}
