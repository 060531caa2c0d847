//! LiteHDL CLI: compiles one `.lhdl` file into a VHDL entity/architecture.
//!
//! ```text
//! litehdl counter.lhdl              # writes counter.vhd
//! litehdl counter.lhdl -o rtl/c.vhd
//! litehdl counter.lhdl --emit ir    # writes counter.json
//! ```

#![warn(missing_docs)]

mod compile;
mod error;
mod pipeline;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};

/// LiteHDL: a Python-flavoured hardware DSL compiled to VHDL.
#[derive(Parser, Debug)]
#[command(name = "litehdl", version, about = "LiteHDL to VHDL compiler")]
pub struct Cli {
    /// Input `.lhdl` file.
    pub input: PathBuf,

    /// Output path (default: the input with its extension replaced).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also print the generated text to stdout.
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress status lines.
    #[arg(short, long)]
    pub quiet: bool,

    /// Control colored output.
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `litehdl.toml` to use instead of the one next to the input.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format for diagnostics.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// What to write to the output file.
    #[arg(long, value_enum, default_value_t = EmitKind::Vhdl)]
    pub emit: EmitKind,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stderr is a terminal.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Artifact written to the output path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum EmitKind {
    /// VHDL source.
    Vhdl,
    /// The elaborated module as JSON.
    Ir,
}

impl Cli {
    /// Resolves `--color auto` against the terminal.
    pub fn use_color(&self) -> bool {
        match self.color {
            ColorChoice::Auto => std::io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match compile::run(&cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults() {
        let cli = Cli::parse_from(["litehdl", "adder.lhdl"]);
        assert_eq!(cli.input, PathBuf::from("adder.lhdl"));
        assert!(cli.output.is_none());
        assert!(!cli.verbose);
        assert!(!cli.quiet);
        assert_eq!(cli.color, ColorChoice::Auto);
        assert!(cli.config.is_none());
        assert_eq!(cli.format, ReportFormat::Text);
        assert_eq!(cli.emit, EmitKind::Vhdl);
    }

    #[test]
    fn parse_all_flags() {
        let cli = Cli::parse_from([
            "litehdl",
            "top.lhdl",
            "-o",
            "build/top.vhd",
            "--verbose",
            "--color",
            "never",
            "--config",
            "cfg/litehdl.toml",
            "--format",
            "json",
            "--emit",
            "ir",
        ]);
        assert_eq!(cli.output, Some(PathBuf::from("build/top.vhd")));
        assert!(cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
        assert_eq!(cli.config, Some(PathBuf::from("cfg/litehdl.toml")));
        assert_eq!(cli.format, ReportFormat::Json);
        assert_eq!(cli.emit, EmitKind::Ir);
    }

    #[test]
    fn parse_short_flags() {
        let cli = Cli::parse_from(["litehdl", "-q", "-v", "x.lhdl"]);
        assert!(cli.quiet);
        assert!(cli.verbose);
    }

    #[test]
    fn input_is_required() {
        assert!(Cli::try_parse_from(["litehdl"]).is_err());
    }

    #[test]
    fn color_choice() {
        let cli = Cli::parse_from(["litehdl", "x.lhdl", "--color", "always"]);
        assert!(cli.use_color());
        let cli = Cli::parse_from(["litehdl", "x.lhdl", "--color", "never"]);
        assert!(!cli.use_color());
    }
}
