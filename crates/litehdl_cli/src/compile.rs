//! The single `litehdl <INPUT>` command.

use std::path::Path;

use litehdl_config::ProjectConfig;
use litehdl_vhdl::EmitOptions;

use crate::error::CliError;
use crate::pipeline::{
    compile_text, derive_output_path, ir_json, render_diagnostics, write_if_changed, WriteStatus,
};
use crate::{Cli, EmitKind, ReportFormat};

/// Compiles `cli.input` and writes the result.
///
/// Returns exit code 0 on success and 1 when errors were reported (or
/// warnings under `deny_warnings`). Missing input, I/O and configuration
/// problems are returned as [`CliError`].
pub fn run(cli: &Cli) -> Result<i32, CliError> {
    if !cli.input.is_file() {
        return Err(CliError::InputNotFound(cli.input.clone()));
    }
    let config = load_config(cli)?;

    if !cli.quiet {
        eprintln!("   Compiling {}", cli.input.display());
    }

    let content = std::fs::read_to_string(&cli.input).map_err(|source| CliError::Io {
        action: "failed to read",
        path: cli.input.clone(),
        source,
    })?;
    let options = EmitOptions {
        architecture: config.output.architecture.clone(),
    };
    let comp = compile_text(&cli.input, content, &options)?;

    let diagnostics = comp.sink.diagnostics();
    if !diagnostics.is_empty() {
        render_diagnostics(&diagnostics, &comp.source_db, cli.format, cli.use_color());
    }

    let errors = comp.sink.error_count();
    let warnings = comp.sink.warning_count();
    let denied = config.diagnostics.deny_warnings && warnings > 0;
    if errors > 0 || denied {
        if !cli.quiet && cli.format == ReportFormat::Text {
            if denied && errors == 0 {
                eprintln!("    Failed with {warnings} warning(s) (deny_warnings is set)");
            } else {
                eprintln!("    Failed with {errors} error(s)");
            }
        }
        return Ok(1);
    }

    let Some(module) = comp.module.as_ref() else {
        return Err(CliError::Internal(
            "compilation succeeded without a module".into(),
        ));
    };
    let (text, extension) = match cli.emit {
        EmitKind::Vhdl => match comp.vhdl {
            Some(ref vhdl) => (vhdl.clone(), config.output.extension.as_str()),
            None => {
                return Err(CliError::Internal(
                    "compilation succeeded without output".into(),
                ))
            }
        },
        EmitKind::Ir => (ir_json(module, &comp.interner)?, "json"),
    };

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| derive_output_path(&cli.input, extension));
    let status = write_if_changed(&output, &text)?;

    if cli.verbose {
        print!("{text}");
    }
    if !cli.quiet {
        let suffix = match status {
            WriteStatus::Written => "",
            WriteStatus::Unchanged => " (unchanged)",
        };
        eprintln!(
            "    Finished {} -> {}{suffix}",
            comp.interner.resolve(module.name),
            output.display()
        );
    }
    Ok(0)
}

/// `--config` if given, else `litehdl.toml` next to the input, else defaults.
fn load_config(cli: &Cli) -> Result<ProjectConfig, CliError> {
    if let Some(path) = &cli.config {
        return Ok(litehdl_config::load_config_file(path)?);
    }
    let dir = cli
        .input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    Ok(litehdl_config::load_config(dir)?)
}
