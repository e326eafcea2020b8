//! Error kinds raised by unification and the inference driver.
//!
//! Every rule short-circuits on the first error and returns it unchanged;
//! there is no retry or partial recovery.

use std::fmt;

use crate::ty::Ty;

/// A type error.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeError {
    /// Two types could not be made equal.
    CannotUnify(Ty, Ty),
    /// An arrow-arrow unification had a differing number of parameters.
    MismatchedArity { expected: usize, found: usize },
    /// Occurs-check failure: the named variable appears in the type it
    /// would have to be linked to.
    CircularType(String),
    /// A `Symbol` referenced a name absent from the environment.
    UnboundVariable(String),
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeError::CannotUnify(a, b) => {
                write!(f, "cannot unify `{a}` with `{b}`")
            }
            TypeError::MismatchedArity { expected, found } => {
                write!(f, "arity mismatch: expected {expected} arguments, found {found}")
            }
            TypeError::CircularType(name) => {
                write!(f, "circular type: `'{name}` occurs in the type it would be bound to")
            }
            TypeError::UnboundVariable(name) => {
                write!(f, "unbound variable `{name}`")
            }
        }
    }
}

impl std::error::Error for TypeError {}
