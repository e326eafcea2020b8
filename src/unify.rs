//! The mutable type-variable store, unification, occurs-check, and
//! level-based generalization / instantiation.
//!
//! `InferCtx` owns the unification table and the current nesting level.
//! It is threaded mutably through the driver alongside `Env` (bindings);
//! the two are kept separate because the table/level state is genuinely
//! shared mutable state while bindings are scoped per call (see `env.rs`).

use ena::unify::InPlaceUnificationTable;
use rustc_hash::FxHashMap;

use crate::error::TypeError;
use crate::ty::{Scheme, Ty, TyVar, VarBinding};

/// Owns the unification table and level bookkeeping.
pub struct InferCtx {
    table: InPlaceUnificationTable<TyVar>,
    /// Level each variable was created at, indexed by `TyVar.0`. Lowered
    /// in place by `occurs_check_and_adjust` as links are established.
    var_levels: Vec<u32>,
    current_level: u32,
}

impl InferCtx {
    pub fn new() -> Self {
        InferCtx {
            table: InPlaceUnificationTable::new(),
            var_levels: Vec::new(),
            current_level: 0,
        }
    }

    /// Number of variables minted so far. Monotonically non-decreasing
    /// across any sequence of calls; stands in for the threaded
    /// fresh-variable counter.
    pub fn counter(&self) -> u32 {
        self.var_levels.len() as u32
    }

    // ── Levels ───────────────────────────────────────────────────────

    pub fn current_level(&self) -> u32 {
        self.current_level
    }

    /// Enter the body of a let that just generalized a binding.
    pub fn enter_level(&mut self) {
        self.current_level += 1;
    }

    /// Return from a let body to its enclosing level.
    pub fn leave_level(&mut self) {
        debug_assert!(self.current_level > 0, "cannot leave level 0");
        self.current_level -= 1;
    }

    // ── Variable creation ────────────────────────────────────────────

    /// Allocate a fresh, unbound variable at the given level.
    pub fn fresh_var_at(&mut self, level: u32) -> Ty {
        let var = self.table.new_key(None);
        debug_assert_eq!(var.0 as usize, self.var_levels.len());
        self.var_levels.push(level);
        Ty::Var(var)
    }

    /// Allocate a fresh variable at the current level.
    pub fn fresh_var(&mut self) -> Ty {
        self.fresh_var_at(self.current_level)
    }

    // ── Resolution ───────────────────────────────────────────────────

    /// Follow variable links (recursively, through nested structure) to
    /// produce the most-resolved view of a type. Unbound variables
    /// resolve to their union-find root so that variables in the same
    /// equivalence class always print and compare identically.
    pub fn resolve(&mut self, ty: &Ty) -> Ty {
        match ty {
            Ty::Var(v) => match self.table.probe_value(*v) {
                Some(VarBinding(inner)) => self.resolve(&inner),
                None => Ty::Var(self.table.find(*v)),
            },
            Ty::List(elem) => Ty::list(self.resolve(elem)),
            Ty::Arrow(params, ret) => {
                let params = params.iter().map(|p| self.resolve(p)).collect();
                Ty::arrow(params, self.resolve(ret))
            }
            Ty::Clause(pat, guard, res) => Ty::clause(
                self.resolve(pat),
                guard.as_deref().map(|g| self.resolve(g)),
                self.resolve(res),
            ),
            Ty::Const(_) | Ty::QVar(_) => ty.clone(),
        }
    }

    /// Recursively resolve every variable down to a cell-free tree. Used
    /// only at the top-level entry point to hand callers a pure value.
    pub fn resolve_deep(&mut self, ty: &Ty) -> Ty {
        self.resolve(ty)
    }

    // ── Occurs-check-and-adjust ──────────────────────────────────────

    /// Walk `ty` looking for `label`. Fails with `CircularType` if found.
    /// Every other unbound variable encountered has its level tightened
    /// to `min(existing, level)`, which is what stops a variable that
    /// would have been generalized at an outer level from being smuggled
    /// through a link into a type nested at an inner one.
    fn occurs_check_and_adjust(
        &mut self,
        label: TyVar,
        level: u32,
        ty: &Ty,
    ) -> Result<(), TypeError> {
        match ty {
            Ty::Var(v) => {
                let root = self.table.find(*v);
                if root == self.table.find(label) {
                    return Err(TypeError::CircularType(label.label()));
                }
                match self.table.probe_value(root) {
                    Some(VarBinding(inner)) => self.occurs_check_and_adjust(label, level, &inner),
                    None => {
                        let idx = root.0 as usize;
                        if self.var_levels[idx] > level {
                            self.var_levels[idx] = level;
                        }
                        Ok(())
                    }
                }
            }
            Ty::Const(_) | Ty::QVar(_) => Ok(()),
            Ty::List(elem) => self.occurs_check_and_adjust(label, level, elem),
            Ty::Arrow(params, ret) => {
                for p in params {
                    self.occurs_check_and_adjust(label, level, p)?;
                }
                self.occurs_check_and_adjust(label, level, ret)
            }
            Ty::Clause(pat, guard, res) => {
                self.occurs_check_and_adjust(label, level, pat)?;
                if let Some(g) = guard {
                    self.occurs_check_and_adjust(label, level, g)?;
                }
                self.occurs_check_and_adjust(label, level, res)
            }
        }
    }

    // ── Unification ──────────────────────────────────────────────────

    /// Destructively unify `a` and `b`.
    pub fn unify(&mut self, a: &Ty, b: &Ty) -> Result<(), TypeError> {
        let a = self.resolve(a);
        let b = self.resolve(b);

        match (&a, &b) {
            (Ty::Const(c1), Ty::Const(c2)) if c1 == c2 => Ok(()),

            (Ty::Var(v1), Ty::Var(v2)) if self.table.find(*v1) == self.table.find(*v2) => Ok(()),

            (Ty::Var(v), _) => self.bind_var(*v, b.clone()),
            (_, Ty::Var(v)) => self.bind_var(*v, a.clone()),

            (Ty::List(e1), Ty::List(e2)) => self.unify(e1, e2),

            (Ty::Arrow(p1, r1), Ty::Arrow(p2, r2)) => {
                if p1.len() != p2.len() {
                    return Err(TypeError::MismatchedArity {
                        expected: p1.len(),
                        found: p2.len(),
                    });
                }
                for (x, y) in p1.iter().zip(p2.iter()) {
                    self.unify(x, y)?;
                }
                self.unify(r1, r2)
            }

            (Ty::Clause(p1, _, r1), Ty::Clause(p2, _, r2)) => {
                self.unify(p1, p2)?;
                self.unify(r1, r2)
            }

            _ => Err(TypeError::CannotUnify(a.clone(), b.clone())),
        }
    }

    /// Bind an unbound variable `v` to `ty`, after the occurs-check has
    /// tightened levels reachable through `ty`. `v` is assumed already
    /// resolved to its union-find root and unbound (callers only reach
    /// here via `unify`'s `Ty::Var` arms, which hold after `resolve`).
    fn bind_var(&mut self, v: TyVar, ty: Ty) -> Result<(), TypeError> {
        let level = self.var_levels[v.0 as usize];
        self.occurs_check_and_adjust(v, level, &ty)?;
        self.table
            .unify_var_value(v, Some(VarBinding(ty)))
            .expect("binding an unbound var after occurs-check should not fail");
        Ok(())
    }

    // ── Generalization ───────────────────────────────────────────────

    /// Generalize `ty` at `level`: every reachable unbound variable whose
    /// level is strictly greater than `level` becomes a `QVar`. Variables
    /// at or below `level` are still unifiable with the surrounding
    /// context and are left as `Var`.
    pub fn generalize(&mut self, level: u32, ty: &Ty) -> Scheme {
        let resolved = self.resolve(ty);
        let mut vars = Vec::new();
        let quantified = self.generalize_walk(level, &resolved, &mut vars);
        let mut seen = rustc_hash::FxHashSet::default();
        vars.retain(|v| seen.insert(v.clone()));
        Scheme { vars, ty: quantified }
    }

    fn generalize_walk(&mut self, level: u32, ty: &Ty, vars: &mut Vec<String>) -> Ty {
        match ty {
            Ty::Var(v) => {
                let var_level = self.var_levels[v.0 as usize];
                if var_level > level {
                    let name = v.label();
                    vars.push(name.clone());
                    Ty::QVar(name)
                } else {
                    ty.clone()
                }
            }
            Ty::Const(_) | Ty::QVar(_) => ty.clone(),
            Ty::List(elem) => Ty::list(self.generalize_walk(level, elem, vars)),
            Ty::Arrow(params, ret) => {
                let params = params
                    .iter()
                    .map(|p| self.generalize_walk(level, p, vars))
                    .collect();
                let ret = self.generalize_walk(level, ret, vars);
                Ty::arrow(params, ret)
            }
            Ty::Clause(pat, guard, res) => Ty::clause(
                self.generalize_walk(level, pat, vars),
                guard.as_deref().map(|g| self.generalize_walk(level, g, vars)),
                self.generalize_walk(level, res, vars),
            ),
        }
    }

    // ── Instantiation ────────────────────────────────────────────────

    /// Refresh `scheme` into a monotype at `level`: every `QVar` is
    /// replaced by a fresh, distinct unbound variable, with repeated
    /// occurrences of the same `QVar` mapped to the same fresh variable.
    pub fn instantiate(&mut self, scheme: &Scheme, level: u32) -> Ty {
        if scheme.vars.is_empty() {
            return scheme.ty.clone();
        }
        let mut cache: FxHashMap<String, Ty> = FxHashMap::default();
        self.instantiate_walk(&scheme.ty, level, &mut cache)
    }

    fn instantiate_walk(&mut self, ty: &Ty, level: u32, cache: &mut FxHashMap<String, Ty>) -> Ty {
        match ty {
            Ty::QVar(name) => {
                if let Some(fresh) = cache.get(name) {
                    fresh.clone()
                } else {
                    let fresh = self.fresh_var_at(level);
                    cache.insert(name.clone(), fresh.clone());
                    fresh
                }
            }
            Ty::Var(_) | Ty::Const(_) => ty.clone(),
            Ty::List(elem) => Ty::list(self.instantiate_walk(elem, level, cache)),
            Ty::Arrow(params, ret) => {
                let params = params
                    .iter()
                    .map(|p| self.instantiate_walk(p, level, cache))
                    .collect();
                let ret = self.instantiate_walk(ret, level, cache);
                Ty::arrow(params, ret)
            }
            Ty::Clause(pat, guard, res) => Ty::clause(
                self.instantiate_walk(pat, level, cache),
                guard.as_deref().map(|g| self.instantiate_walk(g, level, cache)),
                self.instantiate_walk(res, level, cache),
            ),
        }
    }

    // ── Deep copy ────────────────────────────────────────────────────

    /// Deep-copy a resolved type, minting a fresh variable for every
    /// distinct unbound variable reached (same original variable maps to
    /// the same fresh one). Used at call sites so that unifying against
    /// the copy can never mutate the original scheme's variables.
    ///
    /// Unlike `instantiate`, this operates directly on `Var`s rather than
    /// `QVar`s -- it is applied to a function's *monomorphic* inferred
    /// type at its use site, not to a generalized scheme.
    pub fn deep_copy(&mut self, ty: &Ty) -> Ty {
        let resolved = self.resolve(ty);
        let mut cache: FxHashMap<TyVar, Ty> = FxHashMap::default();
        self.deep_copy_walk(&resolved, &mut cache)
    }

    fn deep_copy_walk(&mut self, ty: &Ty, cache: &mut FxHashMap<TyVar, Ty>) -> Ty {
        match ty {
            Ty::Var(v) => {
                if let Some(fresh) = cache.get(v) {
                    fresh.clone()
                } else {
                    let level = self.var_levels[v.0 as usize];
                    let fresh = self.fresh_var_at(level);
                    cache.insert(*v, fresh.clone());
                    fresh
                }
            }
            Ty::Const(_) | Ty::QVar(_) => ty.clone(),
            Ty::List(elem) => Ty::list(self.deep_copy_walk(elem, cache)),
            Ty::Arrow(params, ret) => {
                let params = params.iter().map(|p| self.deep_copy_walk(p, cache)).collect();
                let ret = self.deep_copy_walk(ret, cache);
                Ty::arrow(params, ret)
            }
            Ty::Clause(pat, guard, res) => Ty::clause(
                self.deep_copy_walk(pat, cache),
                guard.as_deref().map(|g| self.deep_copy_walk(g, cache)),
                self.deep_copy_walk(res, cache),
            ),
        }
    }
}

impl Default for InferCtx {
    fn default() -> Self {
        Self::new()
    }
}
