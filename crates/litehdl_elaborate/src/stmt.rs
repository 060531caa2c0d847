//! Statement and process lowering.
//!
//! `elif` chains become nested `If`s in the else branch. A `sync` block
//! with a reset argument whose first statement tests that reset is split
//! into a reset body (the `if` branch) and a clock body (the rest of the
//! chain); every other block is all clock body.

use litehdl_common::{Ident, Logic};
use litehdl_ir::{Edge, Process, Reset, Statement};
use litehdl_parser::ast::{Expr as AstExpr, IfStmt, Stmt, UnaryOp};
use litehdl_source::Span;

use crate::context::ElabContext;
use crate::errors;
use crate::expr::lower_expr;

/// Lowers a statement list, dropping `pass` and failed statements.
pub fn lower_body(stmts: &[Stmt], ctx: &ElabContext<'_>) -> Vec<Statement> {
    stmts.iter().filter_map(|s| lower_stmt(s, ctx)).collect()
}

/// Lowers one statement. `pass` gives `None` without a diagnostic.
pub fn lower_stmt(stmt: &Stmt, ctx: &ElabContext<'_>) -> Option<Statement> {
    match stmt {
        Stmt::Assign {
            target,
            value,
            span,
        } => {
            let target = lower_expr(target, ctx);
            let value = lower_expr(value, ctx);
            Some(Statement::Assign {
                target: target?,
                value: value?,
                span: *span,
            })
        }
        Stmt::If(if_stmt) => lower_if(if_stmt, ctx),
        Stmt::Pass(_) | Stmt::Error(_) => None,
    }
}

fn lower_if(stmt: &IfStmt, ctx: &ElabContext<'_>) -> Option<Statement> {
    let test = lower_expr(&stmt.test, ctx);
    let then_body = lower_body(&stmt.then_body, ctx);
    let else_body = lower_else_chain(stmt, ctx);
    Some(Statement::If {
        test: test?,
        then_body,
        else_body,
        span: stmt.span,
    })
}

/// The else branch of `stmt`: its `elif` clauses folded into nested `If`s,
/// ending with the `else` body.
fn lower_else_chain(stmt: &IfStmt, ctx: &ElabContext<'_>) -> Vec<Statement> {
    let mut tail = stmt
        .else_body
        .as_deref()
        .map(|body| lower_body(body, ctx))
        .unwrap_or_default();

    let mut clauses = Vec::with_capacity(stmt.elifs.len());
    for clause in &stmt.elifs {
        let test = lower_expr(&clause.test, ctx);
        clauses.push((test, lower_body(&clause.body, ctx), clause.span));
    }
    for (test, body, span) in clauses.into_iter().rev() {
        let Some(test) = test else {
            continue;
        };
        tail = vec![Statement::If {
            test,
            then_body: body,
            else_body: tail,
            span,
        }];
    }
    tail
}

/// A `sync` argument: a signal name and whether it was inverted.
pub fn sync_signal(expr: &AstExpr, role: &str, ctx: &ElabContext<'_>) -> Option<(Ident, bool)> {
    match expr.unparen() {
        AstExpr::Name { name, .. } => Some((*name, false)),
        AstExpr::Unary { operand, .. } => match operand.unparen() {
            AstExpr::Name { name, .. } => Some((*name, true)),
            _ => {
                ctx.emit(errors::error_sync_argument(role, expr.span()));
                None
            }
        },
        AstExpr::Error(_) => None,
        _ => {
            ctx.emit(errors::error_sync_argument(role, expr.span()));
            None
        }
    }
}

/// If `test` is `rst`, `not rst` or `~rst`, whether it is negated.
fn tests_signal(test: &AstExpr, signal: Ident) -> Option<bool> {
    match test.unparen() {
        AstExpr::Name { name, .. } if *name == signal => Some(false),
        AstExpr::Unary {
            op: UnaryOp::Not | UnaryOp::Invert,
            operand,
            ..
        } => match operand.unparen() {
            AstExpr::Name { name, .. } if *name == signal => Some(true),
            _ => None,
        },
        _ => None,
    }
}

/// Lowers a `sync(clock[, reset]):` block to a synchronous process.
pub fn lower_sync(
    clock: &AstExpr,
    reset: Option<&AstExpr>,
    body: &[Stmt],
    span: Span,
    ctx: &ElabContext<'_>,
) -> Option<Process> {
    let clock = sync_signal(clock, "clock", ctx);
    let reset = match reset {
        Some(expr) => sync_signal(expr, "reset", ctx).map(|(signal, inverted)| {
            Some(Reset {
                signal,
                active: if inverted { Logic::Zero } else { Logic::One },
            })
        }),
        None => Some(None),
    };

    let guard = match (reset.flatten(), body.first()) {
        (Some(reset), Some(Stmt::If(guard))) => {
            tests_signal(&guard.test, reset.signal).map(|negated| {
                // The argument alone decides polarity, so a negated guard on an
                // active-high reset runs its branch while reset is asserted.
                if negated && reset.active == Logic::One {
                    ctx.emit(errors::warn_negated_reset_guard(
                        ctx.name(reset.signal),
                        guard.test.span(),
                    ));
                }
                guard
            })
        }
        _ => None,
    };

    let (reset_body, clock_body) = match guard {
        Some(guard) => {
            if let Some(extra) = body.get(1) {
                let last = body.last().map_or(extra.span(), Stmt::span);
                ctx.emit(errors::error_after_reset_guard(
                    extra.span().merge(last),
                    guard.test.span(),
                ));
            }
            (
                lower_body(&guard.then_body, ctx),
                lower_else_chain(guard, ctx),
            )
        }
        None => (Vec::new(), lower_body(body, ctx)),
    };

    let (clock, inverted) = clock?;
    Some(Process::Synchronous {
        clock,
        edge: if inverted { Edge::Falling } else { Edge::Rising },
        reset: reset?,
        reset_body,
        clock_body,
        span,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use litehdl_common::Interner;
    use litehdl_diagnostics::{Diagnostic, DiagnosticSink};
    use litehdl_ir::Expr;
    use litehdl_parser::ast::Item;
    use litehdl_source::SourceDb;

    fn lower_first_sync(src: &str) -> (Option<Process>, Interner, Vec<Diagnostic>) {
        let mut db = SourceDb::new();
        let file = db.add_source("t.lhdl", src.to_string());
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let ast = litehdl_parser::parse_file(file, &db, &interner, &sink);
        assert!(!sink.has_errors(), "parse errors: {:?}", sink.diagnostics());
        let module = ast.module.expect("module");
        let ctx = ElabContext::new(&interner, &sink);
        let process = module.items.iter().find_map(|item| match item {
            Item::Sync {
                clock,
                reset,
                body,
                span,
            } => Some(lower_sync(clock, reset.as_ref(), body, *span, &ctx)),
            _ => None,
        });
        (process.flatten(), interner, sink.take_all())
    }

    #[test]
    fn active_low_reset_with_guard() {
        let (process, interner, diags) = lower_first_sync(
            "module R():
    sync(clk, ~rst):
        if rst:
            q = '0'
        else:
            q = d
",
        );
        assert!(diags.is_empty());
        match process.expect("process") {
            Process::Synchronous {
                clock,
                edge,
                reset,
                reset_body,
                clock_body,
                ..
            } => {
                assert_eq!(interner.resolve(clock), "clk");
                assert_eq!(edge, Edge::Rising);
                let reset = reset.expect("reset");
                assert_eq!(interner.resolve(reset.signal), "rst");
                assert_eq!(reset.active, Logic::Zero);
                assert_eq!(reset_body.len(), 1);
                assert_eq!(clock_body.len(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn falling_edge_without_reset() {
        let (process, _, diags) = lower_first_sync("module R():\n    sync(~clk):\n        q = d\n");
        assert!(diags.is_empty());
        assert!(matches!(
            process,
            Some(Process::Synchronous {
                edge: Edge::Falling,
                reset: None,
                ref reset_body,
                ref clock_body,
                ..
            }) if reset_body.is_empty() && clock_body.len() == 1
        ));
    }

    #[test]
    fn first_if_on_other_signal_is_clock_logic() {
        let (process, _, _) = lower_first_sync(
            "module R():
    sync(clk, rst):
        if en:
            q = d
        r = q
",
        );
        match process.expect("process") {
            Process::Synchronous {
                reset_body,
                clock_body,
                reset,
                ..
            } => {
                assert_eq!(reset.map(|r| r.active), Some(Logic::One));
                assert!(reset_body.is_empty());
                assert_eq!(clock_body.len(), 2);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn guard_elif_chain_becomes_clock_body() {
        let (process, _, diags) = lower_first_sync(
            "module R():
    sync(clk, rst):
        if not rst:
            q = '0'
        elif en:
            q = d
        else:
            q = q
",
        );
        assert!(diags.is_empty());
        match process.expect("process") {
            Process::Synchronous { clock_body, .. } => match clock_body.as_slice() {
                [Statement::If { else_body, .. }] => assert_eq!(else_body.len(), 1),
                other => panic!("unexpected clock body {other:?}"),
            },
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn negated_guard_on_active_high_reset_warns() {
        let (process, _, diags) = lower_first_sync(
            "module M():
    sync(clk, rst):
        if not rst:
            q = '0'
        else:
            q = d
",
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, errors::W204);
        match process {
            Some(Process::Synchronous { reset: Some(reset), reset_body, .. }) => {
                assert_eq!(reset.active, Logic::One);
                assert_eq!(reset_body.len(), 1);
            }
            other => panic!("expected synchronous process with reset, got {other:?}"),
        }
    }

    #[test]
    fn negated_guard_on_active_low_reset_is_quiet() {
        for guard in ["not rst", "~rst", "rst"] {
            let src = format!(
                "module M():\n    sync(clk, ~rst):\n        if {guard}:\n            q = '0'\n        else:\n            q = d\n"
            );
            let (process, _, diags) = lower_first_sync(&src);
            assert!(diags.is_empty(), "{guard}: {diags:?}");
            assert!(matches!(
                process,
                Some(Process::Synchronous { reset: Some(_), .. })
            ));
        }
    }

    #[test]
    fn statements_after_guard_rejected() {
        let (_, _, diags) = lower_first_sync(
            "module R():
    sync(clk, rst):
        if rst:
            q = '0'
        r = q
        s = r
",
        );
        let codes: Vec<String> = diags.iter().map(|d| d.code.to_string()).collect();
        assert_eq!(codes, vec!["E205"]);
    }

    #[test]
    fn malformed_sync_arguments() {
        let (process, _, diags) = lower_first_sync("module R():\n    sync(clk & en):\n        q = d\n");
        assert!(process.is_none());
        assert_eq!(diags[0].code.to_string(), "E204");

        let (process, _, diags) =
            lower_first_sync("module R():\n    sync(clk, ~(a | b)):\n        q = d\n");
        assert!(process.is_none());
        assert_eq!(diags[0].code.to_string(), "E204");
    }

    #[test]
    fn elif_lowers_to_nested_if() {
        let sink = DiagnosticSink::new();
        let interner = Interner::new();
        let mut db = SourceDb::new();
        let file = db.add_source(
            "t.lhdl",
            "module M():\n    comb:\n        if a:\n            y = 1\n        elif b:\n            y = 2\n        elif c:\n            y = 3\n".to_string(),
        );
        let ast = litehdl_parser::parse_file(file, &db, &interner, &sink);
        let module = ast.module.expect("module");
        let Item::Comb { body, .. } = &module.items[0] else {
            panic!("expected comb");
        };
        let ctx = ElabContext::new(&interner, &sink);
        let lowered = lower_body(body, &ctx);
        let Statement::If { else_body, .. } = &lowered[0] else {
            panic!("expected if");
        };
        let Statement::If {
            test,
            else_body: innermost,
            ..
        } = &else_body[0]
        else {
            panic!("expected nested if");
        };
        assert_eq!(*test, Expr::Ident(interner.get_or_intern("b")));
        assert!(matches!(&innermost[..], [Statement::If { else_body, .. }] if else_body.is_empty()));
    }
}
