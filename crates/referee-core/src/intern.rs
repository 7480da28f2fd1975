//! String interning for identifiers (module names, member names, bound
//! context names).
//!
//! Grounded on `examples/Brahmastra-Labs-logicaffeine/src/intern.rs` and the
//! `Symbol`/`Interner` split used by rustc-style compilers (see
//! `examples/other_examples/a9c977a9_paradigmxyz-solar__crates-interface-src-symbol.rs.rs`):
//! a dense `u32` handle plus a side table, so every downstream node can carry
//! `Copy` identifiers instead of owned strings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// An interned identifier. Two symbols are equal iff the strings they were
/// interned from are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(u32);

impl Symbol {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Owns the string table. One `Interner` is shared by a [`crate::store::Store`]
/// and every [`crate::module::Module`] built against it.
#[derive(Debug, Default)]
pub struct Interner {
    map: HashMap<Box<str>, Symbol>,
    strings: Vec<Box<str>>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `s`, returning its (possibly pre-existing) symbol.
    pub fn intern(&mut self, s: &str) -> Symbol {
        if let Some(&sym) = self.map.get(s) {
            return sym;
        }
        let sym = Symbol(self.strings.len() as u32);
        let boxed: Box<str> = s.into();
        self.strings.push(boxed.clone());
        self.map.insert(boxed, sym);
        sym
    }

    /// Looks up a string without interning it.
    pub fn lookup(&self, s: &str) -> Option<Symbol> {
        self.map.get(s).copied()
    }

    /// Resolves a symbol back to its string. Panics if `sym` was not
    /// produced by this interner, which would indicate a programming error
    /// (symbols are never handed out except by `intern`).
    pub fn resolve(&self, sym: Symbol) -> &str {
        &self.strings[sym.index()]
    }
}
