//! Ports, signals, generics and their diagnostics.

use litehdl_conformance::{compile_source, compile_source_with_config};
use litehdl_config::load_config_from_str;
use litehdl_ir::{PortDirection, Type, VectorKind, Width};

#[test]
fn port_order_follows_source() {
    let src = "\
module Order():
    out:
        y: bit
    in:
        b: bit
        a: bit
";
    let result = compile_source(src);
    let expected = "\
    Port (
        y : OUT STD_LOGIC;
        b : IN STD_LOGIC;
        a : IN STD_LOGIC
    );
";
    assert!(result.expect_vhdl().contains(expected));
    let module = result.module.as_ref().unwrap();
    assert_eq!(module.ports[0].direction, PortDirection::Out);
}

#[test]
fn signal_shadowing_a_port_is_dropped() {
    let src = "\
module M():
    in:
        a: bit
    out:
        q: v[4]
    q: v[4]
    r: bit
";
    let result = compile_source(src);
    assert!(result.diagnostics.is_empty());
    let vhdl = result.expect_vhdl();
    assert!(!vhdl.contains("signal q"));
    assert!(vhdl.contains("    signal r : STD_LOGIC;\n"));
}

#[test]
fn duplicate_port_is_a_warning() {
    let src = "\
module M():
    in:
        a: bit
        a: v[2]
";
    let result = compile_source(src);
    assert_eq!(result.codes(), vec!["W202"]);
    assert!(!result.has_errors);
    assert_eq!(result.expect_vhdl().matches("a : IN").count(), 1);
}

#[test]
fn module_without_ports_warns_and_omits_port_clause() {
    let result = compile_source("module Empty():\n    pass\n");
    assert_eq!(result.codes(), vec!["W201"]);
    let expected = "\
entity Empty is
end Empty;
";
    assert!(result.expect_vhdl().contains(expected));
}

#[test]
fn signed_array_uses_unsigned_elements() {
    let src = "\
module A():
    in:
        clk: bit
    regs: s[16][4]
    words: u[8][2]
";
    let result = compile_source(src);
    let vhdl = result.expect_vhdl();
    assert!(vhdl.contains("    type t_regs_array is array (0 to 3) of unsigned(15 downto 0);\n"));
    assert!(vhdl.contains("    type t_words_array is array (0 to 1) of unsigned(7 downto 0);\n"));
    assert!(vhdl.contains("    signal regs : t_regs_array;\n"));
}

#[test]
fn ir_types() {
    let src = "\
module T(W=4):
    in:
        a: u[W]
    sig: s[12]
";
    let result = compile_source(src);
    let module = result.module.as_ref().unwrap();
    let w = result.interner.get("W").unwrap();
    assert_eq!(
        module.ports[0].ty,
        Type::Vector {
            width: Width::Symbol(w),
            kind: VectorKind::Unsigned
        }
    );
    assert_eq!(
        module.signals[0].ty,
        Type::Vector {
            width: Width::Literal(12),
            kind: VectorKind::Signed
        }
    );
}

#[test]
fn unknown_width_symbol_still_emits() {
    let src = "module M():\n    in:\n        a: v[N]\n";
    let result = compile_source(src);
    assert_eq!(result.codes(), vec!["W200"]);
    assert!(result.expect_vhdl().contains("a : IN STD_LOGIC_VECTOR(N-1 downto 0)"));
}

#[test]
fn type_errors() {
    let cases = [
        ("a: q[8]", "E201"),
        ("a: bit[2]", "E201"),
        ("a: v", "E201"),
        ("a: v[0]", "E202"),
        ("a: v[2 + 2]", "E202"),
        ("a: v[8][4]", "E203"),
    ];
    for (decl, code) in cases {
        let src = format!("module M():\n    in:\n        clk: bit\n        {decl}\n");
        let result = compile_source(&src);
        assert!(result.has_errors, "{decl} should fail");
        assert!(
            result.codes().contains(&code.to_string()),
            "{decl}: expected {code}, got {:?}",
            result.codes()
        );
        assert!(result.vhdl.is_none());
    }
}

#[test]
fn architecture_name_from_config() {
    let config = load_config_from_str("[output]\narchitecture = \"rtl\"\n").unwrap();
    let result = compile_source_with_config("module M():\n    in:\n        a: bit\n", &config);
    let vhdl = result.expect_vhdl();
    assert!(vhdl.contains("architecture rtl of M is\n"));
    assert!(vhdl.ends_with("end rtl;\n"));
}

#[test]
fn signal_before_port_of_same_name_is_dropped() {
    let src = "module M():\n    q: bit\n    in:\n        a: bit\n    out:\n        q: bit\n    comb:\n        q = a\n";
    let result = compile_source(src);
    assert_eq!(result.codes(), vec!["W203"]);
    let vhdl = result.expect_vhdl();
    assert!(vhdl.contains("        q : OUT STD_LOGIC\n"));
    assert!(!vhdl.contains("signal q"));
}
