//! Interned identifiers.
//!
//! A process-wide registry behind an `RwLock`, keyed by string content, that
//! hands back a small `Copy` handle instead of an owned `String`.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::RwLock;

/// An interned identifier: `O(1)` equality and hashing, cheap to copy.
///
/// Two `Ident`s compare equal iff they were interned from the same string
/// (case-sensitive — VHDL's case-insensitivity is a name-resolution concern
/// handled by the external parser before identifiers reach this core).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ident(u32);

struct Interner {
    strings: Vec<&'static str>,
    lookup: FxHashMap<&'static str, Ident>,
}

impl Interner {
    fn new() -> Self {
        Self {
            strings: Vec::new(),
            lookup: FxHashMap::default(),
        }
    }

    fn intern(&mut self, s: &str) -> Ident {
        if let Some(id) = self.lookup.get(s) {
            return *id;
        }
        // Leaked once per distinct identifier string; the identifier table
        // lives for the process lifetime, so this never grows unbounded
        // relative to the input program's vocabulary.
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let id = Ident(self.strings.len() as u32);
        self.strings.push(leaked);
        self.lookup.insert(leaked, id);
        id
    }

    fn resolve(&self, id: Ident) -> &'static str {
        self.strings[id.0 as usize]
    }
}

static INTERNER: Lazy<RwLock<Interner>> = Lazy::new(|| RwLock::new(Interner::new()));

impl Ident {
    /// Intern `s`, returning the handle for it (allocating a fresh entry the
    /// first time a given spelling is seen).
    pub fn new(s: &str) -> Self {
        INTERNER.write().unwrap().intern(s)
    }

    /// The interned text.
    pub fn as_str(self) -> &'static str {
        INTERNER.read().unwrap().resolve(self)
    }

    /// Build a new interned identifier representing `a<sep>b`, e.g. used by
    /// the evaluator's internal loop-scratch names and by the checker's
    /// qualified diagnostic names.
    pub fn prefix(a: Ident, b: Ident, sep: &str) -> Self {
        Ident::new(&format!("{}{}{}", a.as_str(), sep, b.as_str()))
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
