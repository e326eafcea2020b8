//! Type representation for the core.
//!
//! Defines the `Ty` enum, ground-type constants (`Const`), and type
//! variables (`TyVar`). A `Var` is a reference into the mutable
//! unification table owned by `Env` (see `unify.rs`) rather than a
//! standalone heap cell -- one table entry per variable gives the same
//! "one canonical location, linked-to transitively" guarantee a
//! heap-allocated cell would, with none of the per-variable allocation.

use std::fmt;

/// A ground (nullary) type constant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Const {
    Int,
    Float,
    Atom,
    Bool,
    String,
    Unit,
}

impl fmt::Display for Const {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Const::Int => "Int",
            Const::Float => "Float",
            Const::Atom => "Atom",
            Const::Bool => "Bool",
            Const::String => "String",
            Const::Unit => "Unit",
        };
        write!(f, "{s}")
    }
}

/// A type variable: an index into the unification table.
///
/// Variables are never freed individually; the table grows monotonically
/// for the lifetime of an `Env`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TyVar(pub u32);

impl TyVar {
    /// The label used in error messages and in generalized `QVar` names.
    /// Derived from the id so labels are unique within a run without
    /// needing a separate name-allocation step.
    pub fn label(self) -> String {
        format!("t{}", self.0)
    }
}

impl ena::unify::UnifyKey for TyVar {
    type Value = Option<VarBinding>;

    fn index(&self) -> u32 {
        self.0
    }

    fn from_index(u: u32) -> Self {
        TyVar(u)
    }

    fn tag() -> &'static str {
        "TyVar"
    }
}

/// What a table entry is bound to once unification links it to a type.
///
/// An unbound `TyVar` is represented by a `None` table entry; the
/// variable's level lives in `Env`'s side array, not here, since it must
/// remain readable (and lowerable) even while the entry is unbound.
#[derive(Clone, Debug, PartialEq)]
pub struct VarBinding(pub Ty);

impl ena::unify::EqUnifyValue for VarBinding {}

/// A type in the source language.
#[derive(Clone, Debug, PartialEq)]
pub enum Ty {
    /// A ground type.
    Const(Const),
    /// A homogeneous list.
    List(Box<Ty>),
    /// A function of arity `params.len()`.
    Arrow(Vec<Ty>, Box<Ty>),
    /// One pattern-match arm: pattern type, optional (currently unused)
    /// guard type, result type.
    Clause(Box<Ty>, Option<Box<Ty>>, Box<Ty>),
    /// An inference variable.
    Var(TyVar),
    /// A universally-quantified variable, bound by the enclosing scheme.
    QVar(String),
}

impl Ty {
    pub fn int() -> Ty {
        Ty::Const(Const::Int)
    }
    pub fn float() -> Ty {
        Ty::Const(Const::Float)
    }
    pub fn atom() -> Ty {
        Ty::Const(Const::Atom)
    }
    pub fn bool() -> Ty {
        Ty::Const(Const::Bool)
    }
    pub fn string() -> Ty {
        Ty::Const(Const::String)
    }
    pub fn unit() -> Ty {
        Ty::Const(Const::Unit)
    }
    pub fn list(elem: Ty) -> Ty {
        Ty::List(Box::new(elem))
    }
    pub fn arrow(params: Vec<Ty>, ret: Ty) -> Ty {
        Ty::Arrow(params, Box::new(ret))
    }
    pub fn clause(pat: Ty, guard: Option<Ty>, res: Ty) -> Ty {
        Ty::Clause(Box::new(pat), guard.map(Box::new), Box::new(res))
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Const(c) => write!(f, "{c}"),
            Ty::List(elem) => write!(f, "[{elem}]"),
            Ty::Arrow(params, ret) => {
                write!(f, "(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, ") -> {ret}")
            }
            Ty::Clause(pat, guard, res) => {
                write!(f, "{pat}")?;
                if let Some(g) = guard {
                    write!(f, " when {g}")?;
                }
                write!(f, " -> {res}")
            }
            Ty::Var(v) => write!(f, "?{}", v.label()),
            Ty::QVar(name) => write!(f, "'{name}"),
        }
    }
}

/// A polymorphic type scheme: the quantified variable names, plus a type
/// that may reference them via `Ty::QVar`.
#[derive(Clone, Debug, PartialEq)]
pub struct Scheme {
    pub vars: Vec<String>,
    pub ty: Ty,
}

impl Scheme {
    /// A closed (monomorphic) scheme: no quantified variables.
    pub fn mono(ty: Ty) -> Scheme {
        Scheme { vars: Vec::new(), ty }
    }
}
