//! Source text ownership and location tracking.
//!
//! [`SourceDb`] owns every loaded file; [`Span`]s point into it by byte offset
//! and are turned into `path:line:col` form through [`ResolvedSpan`] when a
//! diagnostic is rendered.

#![warn(missing_docs)]

pub mod source_db;
pub mod span;

pub use source_db::{ResolvedSpan, SourceDb, SourceFile};
pub use span::{FileId, Span};
