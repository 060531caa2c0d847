//! Structured compiler diagnostics.
//!
//! Every user-facing problem (syntax errors, translation failures, warnings)
//! is a [`Diagnostic`] pushed into a [`DiagnosticSink`]. Stages keep going after
//! an error where they can, so one run reports as much as possible. The CLI
//! renders the collected diagnostics with [`TerminalRenderer`] or dumps them
//! as JSON.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod renderer;
pub mod sink;

pub use code::{Category, DiagnosticCode, Severity};
pub use diagnostic::{Diagnostic, Label, LabelStyle};
pub use renderer::{DiagnosticRenderer, TerminalRenderer};
pub use sink::DiagnosticSink;
