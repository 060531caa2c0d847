//! Type annotation lowering.
//!
//! `bit` maps to [`Type::Bit`]; `v[W]`, `u[W]` and `s[W]` to vectors; any
//! of those tags with two subscripts, `tag[W][D]`, to an array of `D`
//! elements of width `W`.

use litehdl_ir::{Type, VectorKind, Width};
use litehdl_parser::ast::{Expr as AstExpr, TypeExpr};

use crate::context::{ElabContext, ModuleBuilder};
use crate::errors;

/// A lowered annotation, before the caller decides what an array becomes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoweredType {
    /// A port or signal type.
    Scalar(Type),
    /// `tag[W][D]`: needs an array type declaration.
    Array {
        /// Element base type.
        element: VectorKind,
        /// Element width.
        width: Width,
        /// Number of elements.
        depth: Width,
    },
}

fn vector_kind(tag: &str) -> Option<VectorKind> {
    match tag {
        "v" => Some(VectorKind::Std),
        "u" => Some(VectorKind::Unsigned),
        "s" => Some(VectorKind::Signed),
        _ => None,
    }
}

/// Array elements are `std_logic_vector` only for the plain vector tag;
/// `u` and `s` both give `unsigned`.
fn array_element(kind: VectorKind) -> VectorKind {
    match kind {
        VectorKind::Std => VectorKind::Std,
        VectorKind::Unsigned | VectorKind::Signed => VectorKind::Unsigned,
    }
}

/// Lowers a type annotation. Reports and returns `None` when it is invalid.
pub fn lower_type(
    ty: &TypeExpr,
    builder: &ModuleBuilder,
    ctx: &ElabContext<'_>,
) -> Option<LoweredType> {
    let tag = ctx.name(ty.tag);
    if tag == "bit" {
        if !ty.dims.is_empty() {
            ctx.emit(errors::error_type_shape("type `bit` takes no width", ty.span));
            return None;
        }
        return Some(LoweredType::Scalar(Type::Bit));
    }

    let Some(kind) = vector_kind(tag) else {
        ctx.emit(errors::error_unknown_type(tag, ty.span));
        return None;
    };

    match ty.dims.as_slice() {
        [] => {
            ctx.emit(errors::error_type_shape(
                &format!("type `{tag}` needs a width, e.g. `{tag}[8]`"),
                ty.span,
            ));
            None
        }
        [width] => {
            let width = lower_width(width, builder, ctx)?;
            Some(LoweredType::Scalar(Type::Vector { width, kind }))
        }
        [width, depth] => {
            let width = lower_width(width, builder, ctx);
            let depth = lower_width(depth, builder, ctx);
            Some(LoweredType::Array {
                element: array_element(kind),
                width: width?,
                depth: depth?,
            })
        }
        _ => {
            ctx.emit(errors::error_type_shape(
                "types have at most two subscripts, `tag[width][depth]`",
                ty.span,
            ));
            None
        }
    }
}

/// Lowers a width or depth subscript.
pub fn lower_width(
    expr: &AstExpr,
    builder: &ModuleBuilder,
    ctx: &ElabContext<'_>,
) -> Option<Width> {
    match expr.unparen() {
        AstExpr::Int { value: 0, span } => {
            ctx.emit(errors::error_bad_width("width must be at least 1", *span));
            None
        }
        AstExpr::Int { value, .. } => Some(Width::Literal(*value)),
        AstExpr::Name { name, span } => {
            if !builder.is_generic(*name) {
                ctx.emit(errors::warn_unknown_width_symbol(ctx.name(*name), *span));
            }
            Some(Width::Symbol(*name))
        }
        AstExpr::Error(_) => None,
        other => {
            ctx.emit(errors::error_bad_width(
                "width must be an integer literal or a name",
                other.span(),
            ));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use litehdl_common::{Ident, Interner};
    use litehdl_diagnostics::DiagnosticSink;
    use litehdl_ir::Generic;
    use litehdl_source::Span;

    fn type_expr(interner: &Interner, tag: &str, dims: Vec<AstExpr>) -> TypeExpr {
        TypeExpr {
            tag: interner.get_or_intern(tag),
            dims,
            span: Span::DUMMY,
        }
    }

    fn int(value: u64) -> AstExpr {
        AstExpr::Int {
            value,
            span: Span::DUMMY,
        }
    }

    fn name(interner: &Interner, text: &str) -> AstExpr {
        AstExpr::Name {
            name: interner.get_or_intern(text),
            span: Span::DUMMY,
        }
    }

    fn builder_with_generic(interner: &Interner, generic: &str) -> ModuleBuilder {
        let mut builder = ModuleBuilder::new(Ident::from_raw(0), Span::DUMMY, Span::DUMMY);
        builder.add_generic(Generic {
            name: interner.get_or_intern(generic),
            default: 8,
            span: Span::DUMMY,
        });
        builder
    }

    #[test]
    fn scalar_types() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let ctx = ElabContext::new(&interner, &sink);
        let builder = builder_with_generic(&interner, "W");

        assert_eq!(
            lower_type(&type_expr(&interner, "bit", vec![]), &builder, &ctx),
            Some(LoweredType::Scalar(Type::Bit))
        );
        assert_eq!(
            lower_type(&type_expr(&interner, "s", vec![int(4)]), &builder, &ctx),
            Some(LoweredType::Scalar(Type::Vector {
                width: Width::Literal(4),
                kind: VectorKind::Signed,
            }))
        );
        assert_eq!(
            lower_type(&type_expr(&interner, "u", vec![name(&interner, "W")]), &builder, &ctx),
            Some(LoweredType::Scalar(Type::Vector {
                width: Width::Symbol(interner.get_or_intern("W")),
                kind: VectorKind::Unsigned,
            }))
        );
        assert!(!sink.has_errors());
        assert_eq!(sink.warning_count(), 0);
    }

    #[test]
    fn array_element_kinds() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let ctx = ElabContext::new(&interner, &sink);
        let builder = builder_with_generic(&interner, "W");

        let element = |tag: &str| match lower_type(
            &type_expr(&interner, tag, vec![int(8), int(16)]),
            &builder,
            &ctx,
        ) {
            Some(LoweredType::Array { element, .. }) => element,
            other => panic!("expected array, got {other:?}"),
        };
        assert_eq!(element("v"), VectorKind::Std);
        assert_eq!(element("u"), VectorKind::Unsigned);
        assert_eq!(element("s"), VectorKind::Unsigned);
    }

    #[test]
    fn invalid_annotations() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let ctx = ElabContext::new(&interner, &sink);
        let builder = builder_with_generic(&interner, "W");

        assert!(lower_type(&type_expr(&interner, "word", vec![int(8)]), &builder, &ctx).is_none());
        assert!(lower_type(&type_expr(&interner, "v", vec![]), &builder, &ctx).is_none());
        assert!(lower_type(&type_expr(&interner, "bit", vec![int(2)]), &builder, &ctx).is_none());
        assert!(lower_type(
            &type_expr(&interner, "v", vec![int(1), int(2), int(3)]),
            &builder,
            &ctx
        )
        .is_none());
        assert!(lower_type(&type_expr(&interner, "v", vec![int(0)]), &builder, &ctx).is_none());

        let codes: Vec<String> = sink.diagnostics().iter().map(|d| d.code.to_string()).collect();
        assert_eq!(codes, vec!["E201", "E201", "E201", "E201", "E202"]);
    }

    #[test]
    fn unknown_width_symbol_warns() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let ctx = ElabContext::new(&interner, &sink);
        let builder = builder_with_generic(&interner, "W");

        let width = lower_width(&name(&interner, "DEPTH"), &builder, &ctx);
        assert_eq!(width, Some(Width::Symbol(interner.get_or_intern("DEPTH"))));
        assert_eq!(sink.warning_count(), 1);
        assert!(!sink.has_errors());
    }
}
