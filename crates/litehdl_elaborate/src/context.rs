//! Shared elaboration state.
//!
//! [`ElabContext`] carries the read-only collaborators (interner and
//! diagnostic sink). [`ModuleBuilder`] accumulates the IR lists during the
//! walk and is consumed by [`ModuleBuilder::finish`].

use litehdl_common::{Ident, Interner};
use litehdl_diagnostics::{Diagnostic, DiagnosticSink};
use litehdl_ir::{ArrayTypeDecl, Generic, Instance, Module, Port, Process, Signal, Type};
use litehdl_source::Span;

use crate::errors;

/// Interner and sink used throughout one elaboration.
pub struct ElabContext<'a> {
    /// The string interner shared with the parser.
    pub interner: &'a Interner,
    /// The diagnostic sink for error reporting.
    pub sink: &'a DiagnosticSink,
}

impl<'a> ElabContext<'a> {
    /// Creates a context.
    pub fn new(interner: &'a Interner, sink: &'a DiagnosticSink) -> Self {
        Self { interner, sink }
    }

    /// Resolves an identifier to its text.
    pub fn name(&self, ident: Ident) -> &'a str {
        self.interner.resolve(ident)
    }

    /// Reports a diagnostic.
    pub fn emit(&self, diag: Diagnostic) {
        self.sink.emit(diag);
    }
}

/// The module under construction.
#[derive(Debug)]
pub struct ModuleBuilder {
    name: Ident,
    name_span: Span,
    span: Span,
    generics: Vec<Generic>,
    ports: Vec<Port>,
    signals: Vec<Signal>,
    array_types: Vec<ArrayTypeDecl>,
    processes: Vec<Process>,
    instances: Vec<Instance>,
}

impl ModuleBuilder {
    /// Starts a module.
    pub fn new(name: Ident, name_span: Span, span: Span) -> Self {
        Self {
            name,
            name_span,
            span,
            generics: Vec::new(),
            ports: Vec::new(),
            signals: Vec::new(),
            array_types: Vec::new(),
            processes: Vec::new(),
            instances: Vec::new(),
        }
    }

    /// Whether `name` is a generic declared so far.
    pub fn is_generic(&self, name: Ident) -> bool {
        self.generics.iter().any(|g| g.name == name)
    }

    /// The port called `name`, if declared so far.
    pub fn port(&self, name: Ident) -> Option<&Port> {
        self.ports.iter().find(|p| p.name == name)
    }

    /// Appends a generic.
    pub fn add_generic(&mut self, generic: Generic) {
        self.generics.push(generic);
    }

    /// Appends a port.
    pub fn add_port(&mut self, port: Port) {
        self.ports.push(port);
    }

    /// Appends a signal.
    pub fn add_signal(&mut self, signal: Signal) {
        self.signals.push(signal);
    }

    /// Appends an array type declaration.
    pub fn add_array_type(&mut self, decl: ArrayTypeDecl) {
        self.array_types.push(decl);
    }

    /// Appends a process.
    pub fn add_process(&mut self, process: Process) {
        self.processes.push(process);
    }

    /// Appends an instance.
    pub fn add_instance(&mut self, instance: Instance) {
        self.instances.push(instance);
    }

    /// Completes the module.
    ///
    /// Signals declared before a port of the same name are dropped with a
    /// warning, along with their array type. Warns if the module ended up
    /// without ports.
    pub fn finish(mut self, ctx: &ElabContext<'_>) -> Module {
        let (shadowed, signals): (Vec<Signal>, Vec<Signal>) = std::mem::take(&mut self.signals)
            .into_iter()
            .partition(|signal| self.port(signal.name).is_some());
        for signal in &shadowed {
            let port_span = self.port(signal.name).map_or(signal.span, |p| p.span);
            ctx.emit(errors::warn_signal_shadowed_by_port(
                ctx.name(signal.name),
                signal.span,
                port_span,
            ));
            if let Type::Array { type_name, .. } = &signal.ty {
                self.array_types.retain(|decl| decl.name != *type_name);
            }
        }

        if self.ports.is_empty() {
            ctx.emit(errors::warn_no_ports(ctx.name(self.name), self.name_span));
        }
        Module {
            name: self.name,
            generics: self.generics,
            ports: self.ports,
            signals,
            array_types: self.array_types,
            processes: self.processes,
            instances: self.instances,
            span: self.span,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use litehdl_ir::PortDirection;

    #[test]
    fn finish_keeps_order_and_warns_without_ports() {
        let interner = Interner::new();
        let sink = DiagnosticSink::new();
        let ctx = ElabContext::new(&interner, &sink);
        let name = interner.get_or_intern("Empty");
        let mut builder = ModuleBuilder::new(name, Span::DUMMY, Span::DUMMY);
        builder.add_generic(Generic {
            name: interner.get_or_intern("N"),
            default: 1,
            span: Span::DUMMY,
        });
        assert!(builder.is_generic(interner.get_or_intern("N")));

        let module = builder.finish(&ctx);
        assert_eq!(module.name, name);
        assert_eq!(module.generics.len(), 1);
        assert_eq!(sink.warning_count(), 1);
    }

    #[test]
    fn port_lookup() {
        let interner = Interner::new();
        let a = interner.get_or_intern("a");
        let mut builder = ModuleBuilder::new(interner.get_or_intern("M"), Span::DUMMY, Span::DUMMY);
        builder.add_port(Port {
            name: a,
            direction: PortDirection::In,
            ty: Type::Bit,
            span: Span::DUMMY,
        });
        assert!(builder.port(a).is_some());
        assert!(builder.port(interner.get_or_intern("b")).is_none());
    }
}
