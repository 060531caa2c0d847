//! Whole-file VHDL generation.
//!
//! # Format
//!
//! ```text
//! library IEEE;
//! use IEEE.STD_LOGIC_1164.ALL;
//! use IEEE.NUMERIC_STD.ALL;
//!
//! entity Counter is
//!     Generic (
//!         W : INTEGER := 8
//!     );
//!     Port (
//!         clk : IN STD_LOGIC;
//!         q : OUT UNSIGNED(W-1 downto 0)
//!     );
//! end Counter;
//!
//! architecture Behavioral of Counter is
//!     signal count : UNSIGNED(W-1 downto 0);
//! begin
//!
//!     <instances, each followed by a blank line>
//!     <processes, each followed by a blank line>
//! end Behavioral;
//! ```
//!
//! The `Generic` clause is left out when the module has no generics. The
//! `Port` clause is left out too when there are no ports, even though every
//! other entity carries one: VHDL does not accept an empty `Port ();`, and
//! the elaborator has already warned (W201) about the port-less module.

use crate::expr::ExprTranslator;
use crate::stmt::render_process;
use crate::types::{array_type_decl, vhdl_type};
use litehdl_common::Interner;
use litehdl_ir::{Instance, Module, PortDirection};

/// Settings that shape the generated text but not its meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitOptions {
    /// Architecture name.
    pub architecture: String,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self {
            architecture: "Behavioral".to_string(),
        }
    }
}

/// Generates the complete VHDL file for `module`.
pub fn emit_module(module: &Module, interner: &Interner, options: &EmitOptions) -> String {
    let tr = ExprTranslator::new(interner);
    let name = tr.name(module.name);
    let arch = options.architecture.as_str();
    let mut out = String::new();

    out.push_str("library IEEE;\n");
    out.push_str("use IEEE.STD_LOGIC_1164.ALL;\n");
    out.push_str("use IEEE.NUMERIC_STD.ALL;\n\n");

    out.push_str(&format!("entity {name} is\n"));
    if !module.generics.is_empty() {
        let entries: Vec<String> = module
            .generics
            .iter()
            .map(|g| format!("        {} : INTEGER := {}", tr.name(g.name), g.default))
            .collect();
        out.push_str("    Generic (\n");
        out.push_str(&entries.join(";\n"));
        out.push_str("\n    );\n");
    }
    if !module.ports.is_empty() {
        let entries: Vec<String> = module
            .ports
            .iter()
            .map(|p| {
                let dir = match p.direction {
                    PortDirection::In => "IN",
                    PortDirection::Out => "OUT",
                };
                format!("        {} : {dir} {}", tr.name(p.name), vhdl_type(&p.ty, &tr))
            })
            .collect();
        out.push_str("    Port (\n");
        out.push_str(&entries.join(";\n"));
        out.push_str("\n    );\n");
    }
    out.push_str(&format!("end {name};\n\n"));

    out.push_str(&format!("architecture {arch} of {name} is\n"));
    for decl in &module.array_types {
        out.push_str(&array_type_decl(decl, &tr));
        out.push('\n');
    }
    for signal in &module.signals {
        out.push_str(&format!(
            "    signal {} : {};\n",
            tr.name(signal.name),
            vhdl_type(&signal.ty, &tr)
        ));
    }
    out.push_str("begin\n\n");

    for instance in &module.instances {
        out.push_str(&render_instance(instance, &tr));
        out.push_str("\n\n");
    }
    for process in &module.processes {
        out.push_str(&render_process(process, &tr));
        out.push_str("\n\n");
    }

    out.push_str(&format!("end {arch};\n"));
    out
}

/// Renders a direct entity instantiation, without a trailing newline.
///
/// Positional actuals share one line and come before the named ones.
pub fn render_instance(instance: &Instance, tr: &ExprTranslator<'_>) -> String {
    let mut lines = vec![format!(
        "    {} : entity work.{}",
        tr.name(instance.name),
        tr.name(instance.module)
    )];

    let has_ports = !instance.ports.is_empty();
    if !instance.generics.is_empty() {
        let entries: Vec<String> = instance
            .generics
            .iter()
            .map(|(g, value)| format!("        {} => {}", tr.name(*g), tr.translate(value)))
            .collect();
        lines.push("    generic map (".to_string());
        lines.push(entries.join(",\n"));
        lines.push(if has_ports { "    )" } else { "    );" }.to_string());
    }

    if has_ports {
        let mut entries = Vec::new();
        if !instance.ports.positional.is_empty() {
            let actuals: Vec<String> = instance
                .ports
                .positional
                .iter()
                .map(|e| tr.translate(e))
                .collect();
            entries.push(format!("        {}", actuals.join(", ")));
        }
        entries.extend(
            instance
                .ports
                .named
                .iter()
                .map(|(port, value)| format!("        {} => {}", tr.name(*port), tr.translate(value))),
        );
        lines.push("    port map (".to_string());
        lines.push(entries.join(",\n"));
        lines.push("    );".to_string());
    }

    if instance.generics.is_empty() && !has_ports {
        if let Some(head) = lines.first_mut() {
            head.push(';');
        }
    }
    lines.join("\n")
}
