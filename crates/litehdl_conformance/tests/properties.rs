//! Whole-file golden tests for the core translation guarantees: gate logic,
//! reset polarity, clock edges, vector and array declarations, instance
//! maps, determinism and symbolic bounds.

use litehdl_conformance::compile_source;

#[test]
fn and_gate_full_text() {
    let src = "\
module AndGate():
    in:
        a: bit
        b: bit
    out:
        y: bit
    comb:
        y = a and b
";
    let result = compile_source(src);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
    let expected = "\
library IEEE;
use IEEE.STD_LOGIC_1164.ALL;
use IEEE.NUMERIC_STD.ALL;

entity AndGate is
    Port (
        a : IN STD_LOGIC;
        b : IN STD_LOGIC;
        y : OUT STD_LOGIC
    );
end AndGate;

architecture Behavioral of AndGate is
begin

    process(all)
    begin
        y <= (a and b);
    end process;

end Behavioral;
";
    assert_eq!(result.expect_vhdl(), expected);
}

#[test]
fn active_low_reset_from_inverted_argument() {
    let src = "\
module Dff():
    in:
        clk: bit
        rst: bit
        d: bit
    out:
        q: bit
    sync(clk, ~rst):
        if rst:
            q = '0'
        else:
            q = d
";
    let result = compile_source(src);
    let expected_process = "\
    process(clk, rst)
    begin
        if rst = '0' then
            q <= '0';
        elsif rising_edge(clk) then
            q <= d;
        end if;
    end process;
";
    assert!(
        result.expect_vhdl().contains(expected_process),
        "{}",
        result.expect_vhdl()
    );
}

#[test]
fn active_high_reset_from_plain_argument() {
    let src = "\
module Dff():
    in:
        clk: bit
        rst: bit
        d: bit
    out:
        q: bit
    sync(clk, rst):
        if rst:
            q = '0'
        else:
            q = d
";
    let vhdl = compile_source(src).expect_vhdl().to_string();
    assert!(vhdl.contains("        if rst = '1' then\n"));
    assert!(vhdl.contains("    process(clk, rst)\n"));
}

#[test]
fn falling_edge_without_reset() {
    let src = "\
module Neg():
    in:
        clk: bit
        d: bit
    out:
        q: bit
    sync(~clk):
        q = d
";
    let result = compile_source(src);
    let expected_process = "\
    process(clk)
    begin
        if falling_edge(clk) then
            q <= d;
        end if;
    end process;
";
    let vhdl = result.expect_vhdl();
    assert!(vhdl.contains(expected_process), "{vhdl}");
    assert!(!vhdl.contains("elsif"));
}

#[test]
fn vector_and_array_signals() {
    let src = "\
module Ram():
    in:
        clk: bit
    x: v[8]
    mem: v[8][16]
";
    let result = compile_source(src);
    let vhdl = result.expect_vhdl();
    let expected_decls = "\
architecture Behavioral of Ram is
    type t_mem_array is array (0 to 15) of std_logic_vector(7 downto 0);
    signal x : STD_LOGIC_VECTOR(7 downto 0);
    signal mem : t_mem_array;
begin
";
    assert!(vhdl.contains(expected_decls), "{vhdl}");
    assert_eq!(vhdl.matches("type ").count(), 1);
}

#[test]
fn instance_with_generic_and_named_ports() {
    let src = "\
module Top():
    in:
        x: u[8]
        y: u[8]
    u = Adder(W=8):
        a => x, b => y
";
    let result = compile_source(src);
    let vhdl = result.expect_vhdl();
    let expected_instance = "\
begin

    u : entity work.Adder
    generic map (
        W => 8
    )
    port map (
        a => x,
        b => y
    );

end Behavioral;
";
    assert!(vhdl.contains(expected_instance), "{vhdl}");
}

#[test]
fn translation_is_deterministic() {
    let src = "\
module Counter(WIDTH=8):
    in:
        clk: bit
        rst: bit
        en: bit
    out:
        q: u[WIDTH]
    count: u[WIDTH]
    sync(clk, rst):
        if rst:
            count = 0
        else:
            if en:
                count = count + 1
    comb:
        q = count
";
    let first = compile_source(src);
    let second = compile_source(src);
    assert_eq!(first.expect_vhdl(), second.expect_vhdl());
    assert_eq!(
        first.expect_vhdl().as_bytes(),
        second.expect_vhdl().as_bytes()
    );
}

#[test]
fn symbolic_widths_stay_symbolic() {
    let src = "\
module Sym(W=16, D=4):
    in:
        a: v[W]
        b: u[8]
    out:
        y: s[W]
    buf: u[W][D]
    one: v[1]
";
    let result = compile_source(src);
    let vhdl = result.expect_vhdl();
    assert!(vhdl.contains("        a : IN STD_LOGIC_VECTOR(W-1 downto 0);\n"));
    assert!(vhdl.contains("        b : IN UNSIGNED(7 downto 0);\n"));
    assert!(vhdl.contains("        y : OUT SIGNED(W-1 downto 0)\n"));
    assert!(vhdl.contains(
        "    type t_buf_array is array (0 to D-1) of unsigned(W-1 downto 0);\n"
    ));
    assert!(vhdl.contains("    signal one : STD_LOGIC_VECTOR(0 downto 0);\n"));
    assert!(!vhdl.contains("15 downto"));
}

#[test]
fn generic_clause() {
    let src = "\
module G(WIDTH=8, DEPTH=0x10):
    in:
        a: bit
";
    let vhdl = compile_source(src).expect_vhdl().to_string();
    let expected = "\
entity G is
    Generic (
        WIDTH : INTEGER := 8;
        DEPTH : INTEGER := 16
    );
    Port (
        a : IN STD_LOGIC
    );
end G;
";
    assert!(vhdl.contains(expected), "{vhdl}");
}
