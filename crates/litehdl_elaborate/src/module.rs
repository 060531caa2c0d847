//! Module-level elaboration: header parameters, port blocks, signals,
//! processes and instances.

use litehdl_ir::{ArrayTypeDecl, Generic, Instance, Port, PortDirection, PortMap, Process, Signal, Type};
use litehdl_parser::ast::{
    BlockDirection, Connection, Decl, Expr as AstExpr, InstanceDecl, Item, ModuleDecl,
};

use crate::context::{ElabContext, ModuleBuilder};
use crate::errors;
use crate::expr::lower_expr;
use crate::stmt::{lower_body, lower_sync};
use crate::types::{lower_type, LoweredType};

/// Walks a module declaration into `builder`.
pub fn elaborate_module(decl: &ModuleDecl, builder: &mut ModuleBuilder, ctx: &ElabContext<'_>) {
    for param in &decl.params {
        elaborate_generic(param, builder, ctx);
    }
    for item in &decl.items {
        elaborate_item(item, builder, ctx);
    }
}

fn elaborate_generic(
    param: &litehdl_parser::ast::Param,
    builder: &mut ModuleBuilder,
    ctx: &ElabContext<'_>,
) {
    let AstExpr::Int { value, span } = &param.default else {
        return;
    };
    match i64::try_from(*value) {
        Ok(default) => builder.add_generic(Generic {
            name: param.name,
            default,
            span: param.span,
        }),
        Err(_) => ctx.emit(errors::error_generic_range(ctx.name(param.name), *span)),
    }
}

fn elaborate_item(item: &Item, builder: &mut ModuleBuilder, ctx: &ElabContext<'_>) {
    match item {
        Item::Ports {
            direction, decls, ..
        } => {
            let direction = match direction {
                BlockDirection::In => PortDirection::In,
                BlockDirection::Out => PortDirection::Out,
            };
            for decl in decls {
                elaborate_port(decl, direction, builder, ctx);
            }
        }
        Item::Signal(decl) => elaborate_signal(decl, builder, ctx),
        Item::Comb { body, span } => builder.add_process(Process::Combinational {
            body: lower_body(body, ctx),
            span: *span,
        }),
        Item::Sync {
            clock,
            reset,
            body,
            span,
        } => {
            if let Some(process) = lower_sync(clock, reset.as_ref(), body, *span, ctx) {
                builder.add_process(process);
            }
        }
        Item::Instance(inst) => {
            if let Some(instance) = elaborate_instance(inst, ctx) {
                builder.add_instance(instance);
            }
        }
        Item::Pass(_) | Item::Error(_) => {}
    }
}

fn elaborate_port(
    decl: &Decl,
    direction: PortDirection,
    builder: &mut ModuleBuilder,
    ctx: &ElabContext<'_>,
) {
    if let Some(first) = builder.port(decl.name) {
        ctx.emit(errors::warn_duplicate_port(
            ctx.name(decl.name),
            decl.name_span,
            first.span,
        ));
        return;
    }
    match lower_type(&decl.ty, builder, ctx) {
        Some(LoweredType::Scalar(ty)) => builder.add_port(Port {
            name: decl.name,
            direction,
            ty,
            span: decl.span,
        }),
        Some(LoweredType::Array { .. }) => {
            ctx.emit(errors::error_array_port(ctx.name(decl.name), decl.ty.span));
        }
        None => {}
    }
}

/// A signal whose name is already a port is skipped without a diagnostic.
fn elaborate_signal(decl: &Decl, builder: &mut ModuleBuilder, ctx: &ElabContext<'_>) {
    if builder.port(decl.name).is_some() {
        return;
    }
    match lower_type(&decl.ty, builder, ctx) {
        Some(LoweredType::Scalar(ty)) => builder.add_signal(Signal {
            name: decl.name,
            ty,
            span: decl.span,
        }),
        Some(LoweredType::Array {
            element,
            width,
            depth,
        }) => {
            let type_name = ctx
                .interner
                .get_or_intern(&format!("t_{}_array", ctx.name(decl.name)));
            builder.add_array_type(ArrayTypeDecl {
                name: type_name,
                element,
                width,
                depth,
                span: decl.span,
            });
            builder.add_signal(Signal {
                name: decl.name,
                ty: Type::Array {
                    type_name,
                    element,
                    width,
                    depth,
                },
                span: decl.span,
            });
        }
        None => {}
    }
}

fn elaborate_instance(inst: &InstanceDecl, ctx: &ElabContext<'_>) -> Option<Instance> {
    let mut ok = true;

    let mut generics = Vec::with_capacity(inst.generics.len());
    for arg in &inst.generics {
        match lower_expr(&arg.value, ctx) {
            Some(value) => generics.push((arg.name, value)),
            None => ok = false,
        }
    }

    let mut ports = PortMap::default();
    for conn in &inst.connections {
        match conn {
            Connection::Group { conns, .. } | Connection::Named { conns, .. } => {
                for named in conns {
                    match lower_expr(&named.value, ctx) {
                        Some(value) => ports.named.push((named.port, value)),
                        None => ok = false,
                    }
                }
            }
            Connection::Positional { exprs, .. } => {
                for expr in exprs {
                    let items = match expr.unparen() {
                        AstExpr::Tuple { items, .. } => items.as_slice(),
                        _ => std::slice::from_ref(expr),
                    };
                    for item in items {
                        match lower_expr(item, ctx) {
                            Some(value) => ports.positional.push(value),
                            None => ok = false,
                        }
                    }
                }
            }
            Connection::Pass(_) | Connection::Error(_) => {}
        }
    }

    ok.then(|| Instance {
        name: inst.name,
        module: inst.module,
        generics,
        ports,
        span: inst.span,
    })
}
