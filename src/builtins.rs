//! Built-in seed: the minimal arithmetic-capable operator suite.
//!
//! A real driver program supplies the full built-in list externally; this
//! module registers the baseline operator suite the core's own tests and
//! `new_env` rely on so the crate is independently testable without a
//! parser or a caller-supplied seed. No trait/operator-overloading
//! resolution backs these entries -- each name is just a closed,
//! monomorphic scheme.
use crate::env::Env;
use crate::ty::{Scheme, Ty};

/// Register the minimum arithmetic suite (`+ - * /` over `Int` and their
/// dotted `Float` equivalents), plus comparison and logical operators, for
/// a minimal arithmetic-capable language.
pub fn register_builtins(env: &mut Env) {
    let int_binop = || Scheme::mono(Ty::arrow(vec![Ty::int(), Ty::int()], Ty::int()));
    let float_binop = || Scheme::mono(Ty::arrow(vec![Ty::float(), Ty::float()], Ty::float()));

    env.insert("+", int_binop());
    env.insert("-", int_binop());
    env.insert("*", int_binop());
    env.insert("/", int_binop());

    env.insert("+.", float_binop());
    env.insert("-.", float_binop());
    env.insert("*.", float_binop());
    env.insert("/.", float_binop());

    // ── Comparison (Int, returns Bool) ──────────────────────────────
    let int_cmp = || Scheme::mono(Ty::arrow(vec![Ty::int(), Ty::int()], Ty::bool()));
    env.insert("==", int_cmp());
    env.insert("!=", int_cmp());
    env.insert("<", int_cmp());
    env.insert(">", int_cmp());
    env.insert("<=", int_cmp());
    env.insert(">=", int_cmp());

    // ── Logical operators ────────────────────────────────────────────
    let bool_binop = Scheme::mono(Ty::arrow(vec![Ty::bool(), Ty::bool()], Ty::bool()));
    env.insert("and", bool_binop.clone());
    env.insert("or", bool_binop);
    env.insert("not", Scheme::mono(Ty::arrow(vec![Ty::bool()], Ty::bool())));
}
