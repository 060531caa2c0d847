//! Interned identifiers.
//!
//! Every DSL name (module, generic, port, signal, instance, callee) is interned
//! once per compilation and carried through the AST and IR as an [`Ident`].

use lasso::ThreadedRodeo;
use serde::{Deserialize, Serialize};

/// Handle to an interned name.
///
/// Equality and hashing work on the handle, so two `Ident`s from the same
/// [`Interner`] are equal exactly when their strings are equal.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Ident(u32);

impl Ident {
    /// Builds an `Ident` from its raw index. Intended for tests and deserialized IR.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// The raw index behind this handle.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

// SAFETY: the index always fits in a `u32`, and `try_from_usize` refuses
// anything that would not round-trip.
unsafe impl lasso::Key for Ident {
    fn into_usize(self) -> usize {
        self.0 as usize
    }

    fn try_from_usize(int: usize) -> Option<Self> {
        u32::try_from(int).ok().map(Ident)
    }
}

/// String interner shared by the parser, the IR builder and the emitter.
///
/// Backed by [`lasso::ThreadedRodeo`], so a single interner may be shared by
/// compilations running on different threads.
pub struct Interner {
    rodeo: ThreadedRodeo<Ident>,
}

impl Interner {
    /// Creates an empty interner.
    pub fn new() -> Self {
        Self {
            rodeo: ThreadedRodeo::new(),
        }
    }

    /// Interns `s`, returning the existing handle if it was seen before.
    pub fn get_or_intern(&self, s: &str) -> Ident {
        self.rodeo.get_or_intern(s)
    }

    /// Looks up `s` without interning it.
    pub fn get(&self, s: &str) -> Option<Ident> {
        self.rodeo.get(s)
    }

    /// Returns the string for `ident`.
    ///
    /// # Panics
    ///
    /// Panics if `ident` came from a different interner.
    pub fn resolve(&self, ident: Ident) -> &str {
        self.rodeo.resolve(&ident)
    }

    /// Number of distinct names interned so far.
    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    /// Whether nothing has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_interned_name() {
        let interner = Interner::new();
        let clk = interner.get_or_intern("clk");
        assert_eq!(interner.resolve(clk), "clk");
    }

    #[test]
    fn interning_is_idempotent() {
        let interner = Interner::new();
        let a = interner.get_or_intern("rst");
        let b = interner.get_or_intern("rst");
        assert_eq!(a, b);
        assert_eq!(interner.len(), 1);
    }

    #[test]
    fn get_does_not_intern() {
        let interner = Interner::new();
        assert!(interner.get("WIDTH").is_none());
        assert!(interner.is_empty());
        let w = interner.get_or_intern("WIDTH");
        assert_eq!(interner.get("WIDTH"), Some(w));
    }

    #[test]
    fn names_are_case_sensitive() {
        let interner = Interner::new();
        assert_ne!(interner.get_or_intern("q"), interner.get_or_intern("Q"));
    }

    #[test]
    fn serde_roundtrip() {
        let id = Ident::from_raw(7);
        let json = serde_json::to_string(&id).unwrap();
        let back: Ident = serde_json::from_str(&json).unwrap();
        assert_eq!(back.as_raw(), 7);
    }
}
