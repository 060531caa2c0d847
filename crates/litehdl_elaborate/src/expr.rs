//! Expression lowering from the LiteHDL AST to the IR.
//!
//! Word and symbol operators merge here (`&`/`and`, `|`/`or`, `^`/`xor`,
//! `~`/`not`), parentheses disappear, and string literals are checked
//! against the std_logic character set. Each function returns `None` after
//! reporting a diagnostic; sub-expressions are always visited so every
//! problem in an expression is reported in one pass.

use litehdl_common::Logic;
use litehdl_ir::{BinaryOp, CallKind, Expr};
use litehdl_parser::ast::{self, Expr as AstExpr};
use litehdl_source::Span;

use crate::context::ElabContext;
use crate::errors;

fn lower_binary_op(op: ast::BinaryOp) -> BinaryOp {
    match op {
        ast::BinaryOp::Or | ast::BinaryOp::BitOr => BinaryOp::Or,
        ast::BinaryOp::And | ast::BinaryOp::BitAnd => BinaryOp::And,
        ast::BinaryOp::Xor | ast::BinaryOp::BitXor => BinaryOp::Xor,
        ast::BinaryOp::Add => BinaryOp::Add,
        ast::BinaryOp::Sub => BinaryOp::Sub,
        ast::BinaryOp::Mul => BinaryOp::Mul,
        ast::BinaryOp::Eq => BinaryOp::Eq,
        ast::BinaryOp::Ne => BinaryOp::Ne,
        ast::BinaryOp::Lt => BinaryOp::Lt,
        ast::BinaryOp::Gt => BinaryOp::Gt,
        ast::BinaryOp::Le => BinaryOp::Le,
        ast::BinaryOp::Ge => BinaryOp::Ge,
    }
}

/// Lowers an expression.
pub fn lower_expr(expr: &AstExpr, ctx: &ElabContext<'_>) -> Option<Expr> {
    match expr {
        AstExpr::Name { name, .. } => Some(Expr::Ident(*name)),
        AstExpr::Int { value, .. } => Some(Expr::IntLiteral(*value)),
        AstExpr::Str { text, span } => lower_literal(text, *span, ctx),
        AstExpr::Binary { op, lhs, rhs, .. } => {
            let lhs = lower_expr(lhs, ctx);
            let rhs = lower_expr(rhs, ctx);
            Some(Expr::Binary {
                op: lower_binary_op(*op),
                lhs: Box::new(lhs?),
                rhs: Box::new(rhs?),
            })
        }
        AstExpr::Unary { operand, .. } => {
            let operand = lower_expr(operand, ctx)?;
            Some(Expr::Not(Box::new(operand)))
        }
        AstExpr::Call { func, args, span } => {
            let lowered: Vec<Option<Expr>> = args.iter().map(|a| lower_expr(a, ctx)).collect();
            if args.len() > 1 {
                ctx.emit(errors::error_call_arity(ctx.name(*func), args.len(), *span));
                return None;
            }
            match lowered.into_iter().next() {
                Some(arg) => Some(Expr::Call {
                    func: CallKind::from_name(ctx.name(*func), *func),
                    arg: Some(Box::new(arg?)),
                }),
                None => Some(Expr::Call {
                    func: CallKind::Other(*func),
                    arg: None,
                }),
            }
        }
        AstExpr::Index { base, index, .. } => {
            let base = lower_subscript_base(base, ctx);
            let index = lower_expr(index, ctx);
            Some(Expr::Index {
                base: Box::new(base?),
                index: Box::new(index?),
            })
        }
        AstExpr::Slice {
            base, high, low, ..
        } => {
            let base = lower_subscript_base(base, ctx);
            let high = lower_bound(high.as_deref(), ctx);
            let low = lower_bound(low.as_deref(), ctx);
            Some(Expr::Slice {
                base: Box::new(base?),
                high: high?,
                low: low?,
            })
        }
        AstExpr::Paren { inner, .. } => lower_expr(inner, ctx),
        AstExpr::Tuple { span, items } => {
            for item in items {
                lower_expr(item, ctx);
            }
            ctx.emit(errors::error_misplaced_tuple(*span));
            None
        }
        AstExpr::Error(_) => None,
    }
}

/// Lowers an optional slice bound; the outer `Option` is failure.
fn lower_bound(bound: Option<&AstExpr>, ctx: &ElabContext<'_>) -> Option<Option<Box<Expr>>> {
    match bound {
        Some(expr) => lower_expr(expr, ctx).map(|e| Some(Box::new(e))),
        None => Some(None),
    }
}

/// Only names, calls and other subscripts can be indexed or sliced in VHDL.
fn lower_subscript_base(base: &AstExpr, ctx: &ElabContext<'_>) -> Option<Expr> {
    match base.unparen() {
        inner @ (AstExpr::Name { .. }
        | AstExpr::Call { .. }
        | AstExpr::Index { .. }
        | AstExpr::Slice { .. }
        | AstExpr::Error(_)) => lower_expr(inner, ctx),
        other => {
            lower_expr(other, ctx);
            ctx.emit(errors::error_unsupported(
                "only names, calls and subscripts can be indexed or sliced",
                other.span(),
            ));
            None
        }
    }
}

/// `'1'` becomes a bit literal, `"1010"` a bit string.
fn lower_literal(text: &str, span: Span, ctx: &ElabContext<'_>) -> Option<Expr> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => match Logic::from_char(c) {
            Some(bit) => Some(Expr::BitLiteral(bit)),
            None => {
                ctx.emit(errors::error_bad_literal(text, span));
                None
            }
        },
        _ if Logic::is_bit_string(text) => {
            let canonical = text
                .chars()
                .filter_map(Logic::from_char)
                .map(Logic::to_char)
                .collect();
            Some(Expr::BitString(canonical))
        }
        _ => {
            ctx.emit(errors::error_bad_literal(text, span));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use litehdl_common::Interner;
    use litehdl_diagnostics::{Diagnostic, DiagnosticSink};
    use litehdl_source::SourceDb;

    /// Parses `y = <src>` inside a comb block and lowers the right-hand side.
    fn lower_src(src: &str) -> (Option<Expr>, Interner, Vec<Diagnostic>) {
        let mut db = SourceDb::new();
        let text = format!("module M():\n    comb:\n        y = {src}\n");
        let file = db.add_source("t.lhdl", text);
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let ast = litehdl_parser::parse_file(file, &db, &interner, &sink);
        assert!(!sink.has_errors(), "parse errors: {:?}", sink.diagnostics());
        let module = ast.module.expect("module");
        let value = match &module.items[0] {
            ast::Item::Comb { body, .. } => match &body[0] {
                ast::Stmt::Assign { value, .. } => value.clone(),
                other => panic!("unexpected statement {other:?}"),
            },
            other => panic!("unexpected item {other:?}"),
        };
        let ctx = ElabContext::new(&interner, &sink);
        let lowered = lower_expr(&value, &ctx);
        (lowered, interner, sink.take_all())
    }

    fn lower_ok(src: &str) -> (Expr, Interner) {
        let (expr, interner, diags) = lower_src(src);
        assert!(diags.is_empty(), "unexpected diagnostics: {diags:?}");
        (expr.expect("lowered"), interner)
    }

    fn lower_err(src: &str) -> Vec<String> {
        let (expr, _, diags) = lower_src(src);
        assert!(expr.is_none());
        diags.into_iter().map(|d| d.code.to_string()).collect()
    }

    #[test]
    fn word_and_symbol_operators_merge() {
        let (a, _) = lower_ok("a & b");
        let (b, _) = lower_ok("a and b");
        assert_eq!(a, b);
        let (a, _) = lower_ok("a ^ b");
        let (b, _) = lower_ok("a xor b");
        assert_eq!(a, b);
        let (a, _) = lower_ok("~a");
        let (b, _) = lower_ok("not a");
        assert_eq!(a, b);
    }

    #[test]
    fn parentheses_vanish() {
        let (a, _) = lower_ok("((a + b))");
        assert!(matches!(a, Expr::Binary { op: BinaryOp::Add, .. }));
    }

    #[test]
    fn bit_literals() {
        let (e, _) = lower_ok("'1'");
        assert_eq!(e, Expr::BitLiteral(Logic::One));
        let (e, _) = lower_ok("'z'");
        assert_eq!(e, Expr::BitLiteral(Logic::HighZ));
        let (e, _) = lower_ok("\"10x1\"");
        assert_eq!(e, Expr::BitString("10X1".to_string()));
    }

    #[test]
    fn casts_and_calls() {
        let (e, _) = lower_ok("u(a)");
        assert!(matches!(e, Expr::Call { func: CallKind::ToUnsigned, arg: Some(_) }));
        let (e, interner) = lower_ok("resize(a)");
        match e {
            Expr::Call { func: CallKind::Other(f), .. } => assert_eq!(interner.resolve(f), "resize"),
            other => panic!("unexpected {other:?}"),
        }
        let (e, _) = lower_ok("v()");
        assert!(matches!(e, Expr::Call { func: CallKind::Other(_), arg: None }));
    }

    #[test]
    fn slices_keep_missing_bounds() {
        let (e, _) = lower_ok("a[:2]");
        assert!(matches!(e, Expr::Slice { high: None, low: Some(_), .. }));
    }

    #[test]
    fn errors() {
        assert_eq!(lower_err("'q'"), vec!["E206"]);
        assert_eq!(lower_err("\"\""), vec!["E206"]);
        assert_eq!(lower_err("f(a, b)"), vec!["E207"]);
        assert_eq!(lower_err("(a, b)"), vec!["E209"]);
        assert_eq!(lower_err("(a + b)[0]"), vec!["E200"]);
    }

    #[test]
    fn every_error_in_an_expression_is_reported() {
        assert_eq!(lower_err("'q' & (a, b)"), vec!["E206", "E209"]);
    }
}
