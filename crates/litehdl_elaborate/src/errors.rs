//! Diagnostic codes and helper functions for elaboration errors and warnings.
//!
//! Error codes `E200`--`E209` cover constructs that cannot be translated to
//! VHDL (unknown types, malformed widths, misplaced tuples, etc.). Warning
//! codes `W200`--`W204` cover input that is still translated but probably
//! not what was meant.

use litehdl_diagnostics::{Category, Diagnostic, DiagnosticCode, Label};
use litehdl_source::Span;

/// Construct with no VHDL translation.
pub const E200: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 200,
};

/// Unknown or malformed type annotation.
pub const E201: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 201,
};

/// Width or depth that is neither a positive integer nor a name.
pub const E202: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 202,
};

/// Array type used for a port.
pub const E203: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 203,
};

/// Malformed `sync` clock or reset argument.
pub const E204: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 204,
};

/// Statement following the reset guard of a `sync` block.
pub const E205: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 205,
};

/// String literal that is not made of std_logic characters.
pub const E206: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 206,
};

/// Call with more than one argument.
pub const E207: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 207,
};

/// Generic default out of range.
pub const E208: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 208,
};

/// Tuple outside an instance's positional connection list.
pub const E209: DiagnosticCode = DiagnosticCode {
    category: Category::Error,
    number: 209,
};

/// Symbolic width that does not name a generic.
pub const W200: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 200,
};

/// Module without ports.
pub const W201: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 201,
};

/// Port declared twice.
pub const W202: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 202,
};

/// Signal declared before a port of the same name.
pub const W203: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 203,
};

/// Negated reset guard in a block whose reset is active-high.
pub const W204: DiagnosticCode = DiagnosticCode {
    category: Category::Warning,
    number: 204,
};

/// Creates a diagnostic for a construct with no VHDL translation.
pub fn error_unsupported(what: &str, span: Span) -> Diagnostic {
    Diagnostic::error(E200, format!("unsupported construct: {what}"), span)
}

/// Creates a diagnostic for an unknown type tag.
pub fn error_unknown_type(tag: &str, span: Span) -> Diagnostic {
    Diagnostic::error(E201, format!("unknown type `{tag}`"), span)
        .with_help("expected `bit`, `v[W]`, `u[W]`, `s[W]` or an array `v[W][D]`")
}

/// Creates a diagnostic for a known tag with the wrong number of subscripts.
pub fn error_type_shape(msg: &str, span: Span) -> Diagnostic {
    Diagnostic::error(E201, msg.to_string(), span)
}

/// Creates a diagnostic for a malformed width or depth.
pub fn error_bad_width(msg: &str, span: Span) -> Diagnostic {
    Diagnostic::error(E202, msg.to_string(), span)
        .with_help("use a positive integer literal or the name of a generic")
}

/// Creates a diagnostic for an array-typed port.
pub fn error_array_port(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(E203, format!("port `{name}` cannot have an array type"), span)
        .with_note("array types are declared inside the architecture and are not visible to the entity")
}

/// Creates a diagnostic for a malformed `sync` argument.
pub fn error_sync_argument(role: &str, span: Span) -> Diagnostic {
    Diagnostic::error(
        E204,
        format!("the {role} of `sync` must be a signal name, optionally inverted with `~` or `not`"),
        span,
    )
}

/// Creates a diagnostic for a statement after the reset guard.
pub fn error_after_reset_guard(span: Span, guard_span: Span) -> Diagnostic {
    Diagnostic::error(
        E205,
        "statements after the reset `if` of a `sync` block are not supported",
        span,
    )
    .with_label(Label::secondary(guard_span, "reset guard"))
    .with_help("move these statements into the guard's `else:` branch")
}

/// Creates a diagnostic for a string literal that is not std_logic.
pub fn error_bad_literal(text: &str, span: Span) -> Diagnostic {
    Diagnostic::error(E206, format!("`\"{text}\"` is not a std_logic literal"), span)
        .with_note("literals may only contain the characters U X 0 1 Z W L H -")
}

/// Creates a diagnostic for a call with too many arguments.
pub fn error_call_arity(name: &str, count: usize, span: Span) -> Diagnostic {
    Diagnostic::error(
        E207,
        format!("`{name}` is called with {count} arguments; at most one is supported"),
        span,
    )
}

/// Creates a diagnostic for a generic default that does not fit.
pub fn error_generic_range(name: &str, span: Span) -> Diagnostic {
    Diagnostic::error(E208, format!("default of generic `{name}` is out of range"), span)
        .with_note("generic defaults must fit in a 64-bit signed integer")
}

/// Creates a diagnostic for a misplaced tuple.
pub fn error_misplaced_tuple(span: Span) -> Diagnostic {
    Diagnostic::error(E209, "tuples are only allowed as positional port lists", span)
}

/// Creates a warning for a width that names something other than a generic.
pub fn warn_unknown_width_symbol(name: &str, span: Span) -> Diagnostic {
    Diagnostic::warning(W200, format!("width `{name}` is not a generic of this module"), span)
        .with_note("it is emitted as written and must be visible to the VHDL compiler")
}

/// Creates a warning for a module without ports.
pub fn warn_no_ports(module: &str, span: Span) -> Diagnostic {
    Diagnostic::warning(W201, format!("module `{module}` declares no ports"), span)
        .with_note("the entity is emitted without a port clause")
}

/// Creates a warning for a repeated port declaration.
pub fn warn_duplicate_port(name: &str, span: Span, first: Span) -> Diagnostic {
    Diagnostic::warning(W202, format!("port `{name}` is already declared"), span)
        .with_label(Label::secondary(first, "first declared here"))
        .with_note("this declaration is ignored")
}

/// Creates a warning for a signal that a later port declaration shadows.
pub fn warn_signal_shadowed_by_port(name: &str, span: Span, port: Span) -> Diagnostic {
    Diagnostic::warning(W203, format!("signal `{name}` is also declared as a port"), span)
        .with_label(Label::secondary(port, "port declared here"))
        .with_note("the signal declaration is dropped")
}

/// Creates a warning for `if not rst:` guarding an active-high reset.
pub fn warn_negated_reset_guard(reset: &str, span: Span) -> Diagnostic {
    Diagnostic::warning(
        W204,
        format!("reset guard is negated but `{reset}` is active-high"),
        span,
    )
    .with_note(format!("the guarded branch runs while `{reset}` is '1'"))
    .with_help(format!("write `sync(clk, ~{reset})` for an active-low reset"))
}
