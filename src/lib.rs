//! Algorithm W with level-based generalization over a mutable
//! type-variable store (destructive unification, Remy/Kiselyov levels).
//!
//! This crate is the type-checking core only: no lexer, no parser, no
//! concrete syntax tree. Callers build [`ast::Expr`] values themselves
//! (typically as the output of their own parser) and hand them to
//! [`Session::type_of`].
//!
//! ```
//! use mlcheck::Session;
//! use mlcheck::ast::{Expr, FunDef, Literal, Param};
//!
//! let mut session = Session::new();
//! let double = Expr::Fun(FunDef {
//!     name: None,
//!     args: vec![Param::Symbol("x".into())],
//!     body: Box::new(Expr::Apply {
//!         func: Box::new(Expr::Symbol("+".into())),
//!         args: vec![Expr::Symbol("x".into()), Expr::Symbol("x".into())],
//!     }),
//! });
//! let ty = session.type_of(&double).unwrap();
//! assert_eq!(ty.to_string(), "(Int) -> Int");
//! ```

pub mod ast;
pub mod builtins;
pub mod env;
pub mod error;
pub mod infer;
pub mod ty;
pub mod unify;

pub use env::Env;
pub use error::TypeError;
pub use ty::{Const, Scheme, Ty, TyVar};
pub use unify::InferCtx;

/// A single inference run: the mutable variable store paired with the
/// binding environment, seeded with the minimum builtin suite.
///
/// Most callers only need [`Session::new`] and [`Session::type_of`]; the
/// lower-level pieces (`InferCtx`, `Env`, the free functions in `infer`)
/// are exposed separately for callers supplying their own builtin seed or
/// driving inference at an explicit level.
pub struct Session {
    pub ctx: InferCtx,
    pub env: Env,
}

impl Session {
    /// A fresh session seeded with the baseline arithmetic builtins.
    pub fn new() -> Self {
        let mut env = Env::new();
        builtins::register_builtins(&mut env);
        Session { ctx: InferCtx::new(), env }
    }

    /// A session over a caller-supplied environment, with no builtins of
    /// our own added. Use this when the driver program owns the full
    /// builtin seed.
    pub fn with_env(env: Env) -> Self {
        Session { ctx: InferCtx::new(), env }
    }

    /// Infer the type of `expr` at the top level and fully resolve it.
    pub fn type_of(&mut self, expr: &ast::Expr) -> Result<Ty, TypeError> {
        infer::type_of(&mut self.ctx, &self.env, expr)
    }

    /// Infer the type of `expr` starting at an explicit nesting level,
    /// returning the (unresolved) type alongside the variable counter.
    pub fn type_of_at_level(
        &mut self,
        level: u32,
        expr: &ast::Expr,
    ) -> Result<(Ty, u32), TypeError> {
        infer::type_of_at_level(&mut self.ctx, &self.env, level, expr)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// A fresh [`Env`] seeded with the baseline builtins, for callers that
/// want to manage their own [`InferCtx`] alongside it.
pub fn new_env() -> Env {
    let mut env = Env::new();
    builtins::register_builtins(&mut env);
    env
}
