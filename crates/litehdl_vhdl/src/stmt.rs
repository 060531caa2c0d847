//! Statements and processes.
//!
//! Statements are rendered into a `Vec<String>` of lines so nested bodies can
//! be indented by the caller; processes are joined into a single block of
//! text without a trailing newline.

use crate::expr::ExprTranslator;
use litehdl_ir::{Edge, Process, Statement};

/// Renders one statement at `indent` spaces, appending its lines to `out`.
///
/// An `elif` chain arrives as an `If` nested in the else body and is
/// rendered as a nested `if`, never folded into `elsif`.
pub fn render_statement(
    stmt: &Statement,
    indent: usize,
    tr: &ExprTranslator<'_>,
    out: &mut Vec<String>,
) {
    let sp = " ".repeat(indent);
    match stmt {
        Statement::Assign { target, value, .. } => {
            out.push(format!(
                "{sp}{} <= {};",
                tr.translate(target),
                tr.translate(value)
            ));
        }
        Statement::If {
            test,
            then_body,
            else_body,
            ..
        } => {
            out.push(format!("{sp}if {} then", tr.render_condition(test)));
            render_body(then_body, indent + 4, tr, out);
            if !else_body.is_empty() {
                out.push(format!("{sp}else"));
                render_body(else_body, indent + 4, tr, out);
            }
            out.push(format!("{sp}end if;"));
        }
    }
}

fn render_body(body: &[Statement], indent: usize, tr: &ExprTranslator<'_>, out: &mut Vec<String>) {
    for stmt in body {
        render_statement(stmt, indent, tr, out);
    }
}

/// Renders a complete `process ... end process;` block at architecture
/// indentation.
pub fn render_process(process: &Process, tr: &ExprTranslator<'_>) -> String {
    let mut lines = Vec::new();
    match process {
        Process::Combinational { body, .. } => {
            lines.push("    process(all)".to_string());
            lines.push("    begin".to_string());
            render_body(body, 8, tr, &mut lines);
        }
        Process::Synchronous {
            clock,
            edge,
            reset,
            reset_body,
            clock_body,
            ..
        } => {
            let clock = tr.name(*clock);
            let edge_test = match edge {
                Edge::Rising => format!("rising_edge({clock})"),
                Edge::Falling => format!("falling_edge({clock})"),
            };
            match reset {
                Some(reset) => {
                    let rst = tr.name(reset.signal);
                    lines.push(format!("    process({clock}, {rst})"));
                    lines.push("    begin".to_string());
                    lines.push(format!("        if {rst} = '{}' then", reset.active));
                    render_body(reset_body, 12, tr, &mut lines);
                    lines.push(format!("        elsif {edge_test} then"));
                }
                None => {
                    lines.push(format!("    process({clock})"));
                    lines.push("    begin".to_string());
                    lines.push(format!("        if {edge_test} then"));
                }
            }
            render_body(clock_body, 12, tr, &mut lines);
            lines.push("        end if;".to_string());
        }
    }
    lines.push("    end process;".to_string());
    lines.join("\n")
}
