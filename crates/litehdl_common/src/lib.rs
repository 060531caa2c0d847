//! Shared foundational types for the LiteHDL compiler.
//!
//! Interned identifiers, IEEE 1164 bit values, content hashes for output
//! freshness checks, and the internal-error result type used by every stage.

#![warn(missing_docs)]

pub mod hash;
pub mod ident;
pub mod logic;
pub mod result;

pub use hash::ContentHash;
pub use ident::{Ident, Interner};
pub use logic::Logic;
pub use result::{InternalError, LiteResult};
