//! The expression-directed inference driver.
//!
//! A recursive walk of `ast::Expr` that produces the type of every
//! expression, threading `InferCtx` (mutable unification state) and a
//! read-only `Env` snapshot extended locally wherever a rule introduces a
//! new binding. No rule ever needs to return an environment upward --
//! only the updated `InferCtx` counter escapes a recursive call, which is
//! what keeps a let body's or a clause's local bindings from leaking to
//! the caller.

use crate::ast::{Clause, Expr, FunDef, Literal, Param, Pattern};
use crate::env::Env;
use crate::error::TypeError;
use crate::ty::{Scheme, Ty};
use crate::unify::InferCtx;

/// Top-level entry point: infer at level 0 and fully resolve the result,
/// leaving no cell/variable indirection in the returned type.
pub fn type_of(ctx: &mut InferCtx, env: &Env, expr: &Expr) -> Result<Ty, TypeError> {
    let ty = infer_expr(ctx, env, 0, expr)?;
    Ok(ctx.resolve_deep(&ty))
}

/// Recursive entry point, exposed for tests that want to start inference
/// at a specific nesting level. Returns the (unresolved) inferred type
/// alongside the variable counter after inference, so callers can assert
/// counter monotonicity.
pub fn type_of_at_level(
    ctx: &mut InferCtx,
    env: &Env,
    level: u32,
    expr: &Expr,
) -> Result<(Ty, u32), TypeError> {
    let ty = infer_expr(ctx, env, level, expr)?;
    Ok((ty, ctx.counter()))
}

fn infer_expr(ctx: &mut InferCtx, env: &Env, level: u32, expr: &Expr) -> Result<Ty, TypeError> {
    match expr {
        Expr::Lit(lit) => Ok(infer_literal(lit)),

        Expr::Symbol(name) => {
            let scheme = env
                .get(name)
                .ok_or_else(|| TypeError::UnboundVariable(name.clone()))?;
            Ok(ctx.instantiate(scheme, level))
        }

        Expr::Apply { func, args } => infer_apply(ctx, env, level, func, args),

        Expr::Match { scrutinee, clauses } => infer_match(ctx, env, level, scrutinee, clauses),

        Expr::Fun(def) => infer_fun_def(ctx, env, level, def),

        Expr::FunBinding { def, body } => {
            let name = def
                .name
                .clone()
                .expect("a `let f = fun ... in ...` binding must name its function");
            // Infer the bound function one level deeper than the let itself,
            // then generalize back at the outer level: only variables minted
            // during this inference (level+1) can ever satisfy `l > level`
            // and become quantified. The body continues at the outer level
            // unchanged, so a chain of sibling lets doesn't keep deepening.
            let bound_ty = infer_fun_def(ctx, env, level + 1, def)?;
            let scheme = ctx.generalize(level, &bound_ty);
            let inner_env = env.extended(name, scheme);
            infer_expr(ctx, &inner_env, level, body)
        }

        Expr::VarBinding { name, value, body } => {
            let bound_ty = infer_expr(ctx, env, level + 1, value)?;
            let scheme = ctx.generalize(level, &bound_ty);
            let inner_env = env.extended(name.clone(), scheme);
            infer_expr(ctx, &inner_env, level, body)
        }
    }
}

fn infer_literal(lit: &Literal) -> Ty {
    match lit {
        Literal::Int(_) => Ty::int(),
        Literal::Float(_) => Ty::float(),
        Literal::Atom(_) => Ty::atom(),
        Literal::Str(_) => Ty::string(),
        Literal::Bool(_) => Ty::bool(),
    }
}

/// `f(a1, ..., an)`. The function expression is inferred once, up front;
/// for a `Symbol` this already went through `instantiate` (fresh copies of
/// every quantified variable, once per call site -- not once per argument).
/// A plain, non-generalized parameter reference resolves to the same
/// variable on every use, which is what lets `f (f x)` share `f`'s
/// constraint across both occurrences instead of inferring it twice.
fn infer_apply(
    ctx: &mut InferCtx,
    env: &Env,
    level: u32,
    func: &Expr,
    args: &[Expr],
) -> Result<Ty, TypeError> {
    let fn_ty = infer_expr(ctx, env, level, func)?;

    let mut arg_tys = Vec::with_capacity(args.len());
    for arg in args {
        arg_tys.push(infer_expr(ctx, env, level, arg)?);
    }

    let result_ty = ctx.fresh_var_at(level);
    ctx.unify(&fn_ty, &Ty::arrow(arg_tys, result_ty.clone()))?;
    Ok(result_ty)
}

fn infer_match(
    ctx: &mut InferCtx,
    env: &Env,
    level: u32,
    scrutinee: &Expr,
    clauses: &[Clause],
) -> Result<Ty, TypeError> {
    let scrutinee_ty = infer_expr(ctx, env, level, scrutinee)?;

    let mut clause_tys = Vec::with_capacity(clauses.len());
    for clause in clauses {
        clause_tys.push(infer_clause(ctx, env, level, clause)?);
    }

    // Unify clauses pairwise against the first; unification's equivalence
    // classes make this equivalent to unifying every distinct pair.
    for other in &clause_tys[1..] {
        ctx.unify(&clause_tys[0], other)?;
    }

    let (pat_ty, _guard_ty, res_ty) = match &clause_tys[0] {
        Ty::Clause(pat, guard, res) => ((**pat).clone(), guard.as_deref().cloned(), (**res).clone()),
        other => unreachable!("infer_clause must produce Ty::Clause, got {other}"),
    };

    ctx.unify(&scrutinee_ty, &pat_ty)?;
    Ok(res_ty)
}

fn infer_clause(ctx: &mut InferCtx, env: &Env, level: u32, clause: &Clause) -> Result<Ty, TypeError> {
    let (pat_ty, clause_env) = match &clause.pattern {
        Pattern::Symbol(name) => {
            let pat_ty = ctx.fresh_var_at(level);
            let clause_env = env.extended(name.clone(), Scheme::mono(pat_ty.clone()));
            (pat_ty, clause_env)
        }
        Pattern::Wildcard => {
            let pat_ty = ctx.fresh_var_at(level);
            (pat_ty, env.clone())
        }
        Pattern::Expr(pat_expr) => {
            let pat_ty = infer_expr(ctx, env, level, pat_expr)?;
            (pat_ty, env.clone())
        }
    };

    // The guard slot is reserved: inferred for well-formedness but never
    // unified against Bool.
    if let Some(guard) = &clause.guard {
        infer_expr(ctx, &clause_env, level, guard)?;
    }

    let res_ty = infer_expr(ctx, &clause_env, level, &clause.result)?;
    Ok(Ty::clause(pat_ty, None, res_ty))
}

/// A function's own name is never bound inside its body: direct
/// recursion is not supported at this layer.
///
/// A parameter symbol already bound earlier in the *same* parameter list
/// reuses that binding instead of minting a second, independent
/// variable, so a degenerate repeated-name parameter list types the
/// repeated occurrences identically.
fn infer_fun_def(ctx: &mut InferCtx, env: &Env, level: u32, def: &FunDef) -> Result<Ty, TypeError> {
    let mut local_env = env.clone();
    let mut param_tys = Vec::with_capacity(def.args.len());

    for param in &def.args {
        match param {
            Param::Unit => param_tys.push(Ty::unit()),
            Param::Symbol(name) => {
                let ty = if let Some(scheme) = local_env.get(name).cloned() {
                    ctx.instantiate(&scheme, level)
                } else {
                    let fresh = ctx.fresh_var_at(level);
                    local_env.insert(name.clone(), Scheme::mono(fresh.clone()));
                    fresh
                };
                param_tys.push(ty);
            }
        }
    }

    let body_ty = infer_expr(ctx, &local_env, level, &def.body)?;
    Ok(Ty::arrow(param_tys, body_ty))
}
