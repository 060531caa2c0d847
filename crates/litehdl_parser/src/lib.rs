//! Indentation-sensitive parser for LiteHDL.
//!
//! The main entry point is [`parse_file`], which lexes a source file and
//! parses its single module into a [`SourceFileAst`].
//!
//! # Architecture
//!
//! - **Lexer** ([`lexer`]): source text to tokens, with explicit
//!   `Newline`/`Indent`/`Dedent` layout tokens.
//! - **Parser** ([`parser`]): recursive descent over items and statements,
//!   Pratt parsing for expressions, line-based error recovery.
//! - **AST** ([`ast`]): node types with spans and serde support.

#![warn(missing_docs)]

pub mod ast;
mod expr;
pub mod lexer;
pub mod parser;
mod stmt;
pub mod token;

pub use ast::SourceFileAst;
pub use token::{LiteToken, Token};

use litehdl_common::Interner;
use litehdl_diagnostics::DiagnosticSink;
use litehdl_source::{FileId, SourceDb};

/// Parses a LiteHDL source file into an AST.
///
/// Errors are reported to the sink (`E100` from the lexer, `E101` from the
/// parser) and left in the tree as `Error` nodes.
pub fn parse_file(
    file_id: FileId,
    source_db: &SourceDb,
    interner: &Interner,
    sink: &DiagnosticSink,
) -> SourceFileAst {
    let source = &source_db.get_file(file_id).content;
    let tokens = lexer::lex(source, file_id, sink);
    let mut parser = parser::LiteParser::new(tokens, source, interner, sink);
    parser.parse_source_file()
}
