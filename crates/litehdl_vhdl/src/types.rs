//! VHDL subtype indications for ports, signals and array types.

use crate::expr::ExprTranslator;
use litehdl_ir::{ArrayTypeDecl, Type, VectorKind};

/// `STD_LOGIC`, `UNSIGNED(7 downto 0)`, `t_mem_array`, ...
pub fn vhdl_type(ty: &Type, tr: &ExprTranslator<'_>) -> String {
    match ty {
        Type::Bit => "STD_LOGIC".to_string(),
        Type::Vector { width, kind } => {
            let base = match kind {
                VectorKind::Std => "STD_LOGIC_VECTOR",
                VectorKind::Unsigned => "UNSIGNED",
                VectorKind::Signed => "SIGNED",
            };
            format!("{base}({} downto 0)", tr.bound(width.upper_bound()))
        }
        Type::Array { type_name, .. } => tr.name(*type_name).to_string(),
    }
}

/// The `type ... is array ...;` line declaring an array type, indented for
/// the architecture declarative part.
pub fn array_type_decl(decl: &ArrayTypeDecl, tr: &ExprTranslator<'_>) -> String {
    let element = match decl.element {
        VectorKind::Std => "std_logic_vector",
        // signed arrays are declared over unsigned elements
        VectorKind::Unsigned | VectorKind::Signed => "unsigned",
    };
    format!(
        "    type {} is array (0 to {}) of {element}({} downto 0);",
        tr.name(decl.name),
        tr.bound(decl.depth.upper_bound()),
        tr.bound(decl.width.upper_bound()),
    )
}
