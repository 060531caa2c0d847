//! Human-readable diagnostic output.

use litehdl_source::{SourceDb, Span};

use crate::code::Severity;
use crate::diagnostic::{Diagnostic, LabelStyle};

/// Turns a diagnostic into text.
pub trait DiagnosticRenderer {
    /// Renders `diag`, reading source lines from `source_db`.
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String;
}

/// rustc-style renderer.
///
/// ```text
/// error[E101]: expected `:` after `comb`
///  --> adder.lhdl:7:9
///   |
/// 7 |     comb
///   |         ^ expected `:`
///   |
///   = help: blocks open with `comb:`
/// ```
pub struct TerminalRenderer {
    /// Emit ANSI colors.
    pub color: bool,
    /// Maximum line width; longer source lines are cut.
    pub width: u16,
}

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[1;31m";
const YELLOW: &str = "\x1b[1;33m";
const BLUE: &str = "\x1b[1;34m";
const GREEN: &str = "\x1b[1;32m";

impl TerminalRenderer {
    /// Creates a renderer.
    pub fn new(color: bool, width: u16) -> Self {
        Self { color, width }
    }

    fn paint(&self, style: &str, text: &str) -> String {
        if self.color {
            format!("{style}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn severity_style(severity: Severity) -> &'static str {
        match severity {
            Severity::Error => RED,
            Severity::Warning => YELLOW,
            Severity::Note => BLUE,
            Severity::Help => GREEN,
        }
    }

    /// Appends the source line under `span` with an underline.
    fn render_snippet(
        &self,
        out: &mut String,
        source_db: &SourceDb,
        span: Span,
        marker: char,
        message: &str,
        gutter: usize,
    ) {
        let file = source_db.get_file(span.file);
        let (line, col) = file.line_col(span.start);
        let text = file.line_text(line);
        let shown: String = text.chars().take(self.width as usize).collect();
        let pad = " ".repeat(gutter);
        let bar = self.paint(BLUE, "|");
        let line_no = self.paint(BLUE, &format!("{line:>gutter$}"));
        out.push_str(&format!("{line_no} {bar} {shown}\n"));

        let col = col as usize - 1;
        let remaining = text.len().saturating_sub(col).max(1);
        let width = (span.len() as usize).clamp(1, remaining);
        let underline = marker.to_string().repeat(width);
        let style = if marker == '^' { RED } else { BLUE };
        let mut marks = format!("{}{}", " ".repeat(col), self.paint(style, &underline));
        if !message.is_empty() {
            marks.push(' ');
            marks.push_str(&self.paint(style, message));
        }
        out.push_str(&format!("{pad} {bar} {marks}\n"));
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic, source_db: &SourceDb) -> String {
        let mut out = String::new();
        let head = format!("{}[{}]", diag.severity, diag.code);
        out.push_str(&format!(
            "{}: {}\n",
            self.paint(Self::severity_style(diag.severity), &head),
            self.paint(BOLD, &diag.message)
        ));

        let located: Vec<_> = diag
            .labels
            .iter()
            .filter(|l| !l.span.is_dummy() && l.span.file == diag.primary_span.file)
            .collect();
        let gutter = if diag.primary_span.is_dummy() {
            1
        } else {
            let last_line = std::iter::once(diag.primary_span)
                .chain(located.iter().map(|l| l.span))
                .map(|s| source_db.get_file(s.file).line_col(s.start).0)
                .max()
                .unwrap_or(1);
            last_line.to_string().len()
        };
        let pad = " ".repeat(gutter);
        let bar = self.paint(BLUE, "|");

        if !diag.primary_span.is_dummy() {
            let resolved = source_db.resolve_span(diag.primary_span);
            out.push_str(&format!("{pad}{} {resolved}\n", self.paint(BLUE, "-->")));
            out.push_str(&format!("{pad} {bar}\n"));

            let primary_msg = located
                .iter()
                .find(|l| l.style == LabelStyle::Primary)
                .map_or("", |l| l.message.as_str());
            self.render_snippet(
                &mut out,
                source_db,
                diag.primary_span,
                '^',
                primary_msg,
                gutter,
            );
            for label in located.iter().filter(|l| l.style == LabelStyle::Secondary) {
                self.render_snippet(&mut out, source_db, label.span, '-', &label.message, gutter);
            }
            if !diag.notes.is_empty() || !diag.help.is_empty() {
                out.push_str(&format!("{pad} {bar}\n"));
            }
        }

        for note in &diag.notes {
            out.push_str(&format!("{pad} = {}: {note}\n", self.paint(BOLD, "note")));
        }
        for help in &diag.help {
            out.push_str(&format!("{pad} = {}: {help}\n", self.paint(BOLD, "help")));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::{Category, DiagnosticCode};
    use crate::diagnostic::Label;

    const SRC: &str = "module top():\n    comb\n        y = a\n";

    fn db() -> (SourceDb, litehdl_source::FileId) {
        let mut db = SourceDb::new();
        let id = db.add_source("top.lhdl", SRC.to_string());
        (db, id)
    }

    #[test]
    fn renders_header_location_and_caret() {
        let (db, id) = db();
        let span = Span::new(id, 22, 23);
        let diag = Diagnostic::error(
            DiagnosticCode::new(Category::Error, 101),
            "expected `:` after `comb`",
            span,
        )
        .with_label(Label::primary(span, "expected `:`"));
        let out = TerminalRenderer::new(false, 100).render(&diag, &db);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "error[E101]: expected `:` after `comb`");
        assert_eq!(lines[1], " --> top.lhdl:2:9");
        assert_eq!(lines[2], "  |");
        assert_eq!(lines[3], "2 |     comb");
        assert_eq!(lines[4], "  |         ^ expected `:`");
    }

    #[test]
    fn secondary_labels_use_dashes() {
        let (db, id) = db();
        let diag = Diagnostic::error(
            DiagnosticCode::new(Category::Error, 205),
            "statement after reset guard",
            Span::new(id, 31, 32),
        )
        .with_label(Label::secondary(Span::new(id, 18, 22), "block opened here"));
        let out = TerminalRenderer::new(false, 100).render(&diag, &db);
        assert!(out.contains("3 |         y = a"));
        assert!(out.contains("  |     ---- block opened here"));
    }

    #[test]
    fn notes_and_help_without_span() {
        let db = SourceDb::new();
        let diag = Diagnostic::warning(
            DiagnosticCode::new(Category::Warning, 201),
            "module `top` has no ports",
            Span::DUMMY,
        )
        .with_note("the Port clause is omitted")
        .with_help("declare ports in an `in:` or `out:` block");
        let out = TerminalRenderer::new(false, 100).render(&diag, &db);
        assert!(out.starts_with("warning[W201]: module `top` has no ports\n"));
        assert!(!out.contains("-->"));
        assert!(out.contains("= note: the Port clause is omitted"));
        assert!(out.contains("= help: declare ports in an `in:` or `out:` block"));
    }

    #[test]
    fn color_wraps_in_ansi() {
        let db = SourceDb::new();
        let diag = Diagnostic::error(
            DiagnosticCode::new(Category::Error, 200),
            "boom",
            Span::DUMMY,
        );
        let out = TerminalRenderer::new(true, 100).render(&diag, &db);
        assert!(out.starts_with("\x1b[1;31merror[E200]"));
    }
}
