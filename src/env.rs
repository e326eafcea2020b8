//! The binding environment: name -> type scheme.
//!
//! Kept separate from `InferCtx` (the unification table and level state)
//! because bindings are scoped -- a clause or a let body extends them
//! locally and the extension must not leak to the caller, whereas the
//! table and level counters are genuinely shared, linearly-threaded
//! mutable state for the whole inference run.

use rustc_hash::FxHashMap;

use crate::ty::Scheme;

/// An ordered name -> scheme mapping with most-recent-wins shadowing.
///
/// A `HashMap` gives shadowing for free: inserting an existing key
/// replaces its value, so lookup always observes the most recent binding
/// for a name without needing to track insertion order explicitly.
#[derive(Clone, Debug, Default)]
pub struct Env {
    bindings: FxHashMap<String, Scheme>,
}

impl Env {
    pub fn new() -> Self {
        Env { bindings: FxHashMap::default() }
    }

    /// Bind `name` to `scheme`, replacing any prior binding.
    pub fn insert(&mut self, name: impl Into<String>, scheme: Scheme) {
        self.bindings.insert(name.into(), scheme);
    }

    pub fn get(&self, name: &str) -> Option<&Scheme> {
        self.bindings.get(name)
    }

    /// Extend a copy of this environment with one additional binding,
    /// for use in a clause-local or function-body scope. The original is
    /// untouched.
    pub fn extended(&self, name: impl Into<String>, scheme: Scheme) -> Env {
        let mut next = self.clone();
        next.insert(name, scheme);
        next
    }
}
