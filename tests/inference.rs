//! Integration tests for the type inference driver.
//!
//! There is no parser in this crate, so each scenario below builds its
//! `ast::Expr` tree by hand rather than parsing source text. The shapes
//! mirror small ML-style snippets (shown in each test's comment) that
//! exercise literals, function definitions, let-polymorphism, nested
//! `match` clauses, and the standard error cases.

use mlcheck::ast::{Clause, Expr, FunDef, Literal, Param, Pattern};
use mlcheck::error::TypeError;
use mlcheck::ty::Ty;
use mlcheck::Session;

// ── Helpers ──────────────────────────────────────────────────────────────

fn sym(name: &str) -> Expr {
    Expr::Symbol(name.into())
}

fn int(n: i64) -> Expr {
    Expr::Lit(Literal::Int(n))
}

fn float(n: f64) -> Expr {
    Expr::Lit(Literal::Float(n))
}

fn atom(name: &str) -> Expr {
    Expr::Lit(Literal::Atom(name.into()))
}

fn apply(func: Expr, args: Vec<Expr>) -> Expr {
    Expr::Apply { func: Box::new(func), args }
}

fn fun(args: Vec<&str>, body: Expr) -> FunDef {
    FunDef { name: None, args: args.into_iter().map(|a| Param::Symbol(a.into())).collect(), body: Box::new(body) }
}

/// Infer the type of a bare top-level function definition (no enclosing
/// let), as scenarios 1, 2, 6, and 7 are written in the scenario table.
fn type_of_top_level_fun(args: Vec<&str>, body: Expr) -> Result<Ty, TypeError> {
    let mut session = Session::new();
    session.type_of(&Expr::Fun(fun(args, body)))
}

fn assert_result_type(result: &Result<Ty, TypeError>, expected: Ty) {
    match result {
        Ok(ty) => assert_eq!(
            ty.to_string(),
            expected.to_string(),
            "expected type `{expected}`, got `{ty}`"
        ),
        Err(e) => panic!("expected `{expected}`, got error: {e}"),
    }
}

fn assert_has_error<F: Fn(&TypeError) -> bool>(result: &Result<Ty, TypeError>, pred: F, desc: &str) {
    match result {
        Ok(ty) => panic!("expected error matching `{desc}`, got a type: {ty}"),
        Err(e) => assert!(pred(e), "expected error matching `{desc}`, got: {e}"),
    }
}

// ── Scenario 1: `double x = x + x` ────────────────────────────────────────

#[test]
fn double_adds_its_argument_to_itself() {
    let body = apply(sym("+"), vec![sym("x"), sym("x")]);
    let result = type_of_top_level_fun(vec!["x"], body);
    assert_result_type(&result, Ty::arrow(vec![Ty::int()], Ty::int()));
}

// ── Scenario 2: `apply f x = f x` ─────────────────────────────────────────

#[test]
fn apply_has_two_free_variables() {
    let body = apply(sym("f"), vec![sym("x")]);
    let result = type_of_top_level_fun(vec!["f", "x"], body).unwrap();
    match result {
        Ty::Arrow(params, ret) => {
            assert_eq!(params.len(), 2);
            match &params[0] {
                Ty::Arrow(inner_params, inner_ret) => {
                    assert_eq!(inner_params.len(), 1);
                    // f's argument and apply's second parameter are the same
                    // free variable; f's result and apply's overall result
                    // are the same free variable.
                    assert_eq!(inner_params[0], params[1]);
                    assert_eq!(**inner_ret, *ret);
                }
                other => panic!("expected the first parameter to be an arrow, got {other}"),
            }
        }
        other => panic!("expected an arrow type, got {other}"),
    }
}

// ── Scenario 3: `doubler x = let double y = y + y in double x` ───────────

#[test]
fn doubler_uses_an_inner_let_bound_double() {
    let inner_double = FunDef {
        name: Some("double".into()),
        args: vec![Param::Symbol("y".into())],
        body: Box::new(apply(sym("+"), vec![sym("y"), sym("y")])),
    };
    let body = Expr::FunBinding {
        def: inner_double,
        body: Box::new(apply(sym("double"), vec![sym("x")])),
    };
    let result = type_of_top_level_fun(vec!["x"], body);
    assert_result_type(&result, Ty::arrow(vec![Ty::int()], Ty::int()));
}

// ── Scenario 4: single-use `two_times`, still concrete ────────────────────

#[test]
fn double_app_applies_two_times_once() {
    // double_app int =
    //   let two_times f x = f (f x) in
    //   let int_double i = i + i in
    //   two_times int_double int
    let two_times = FunDef {
        name: Some("two_times".into()),
        args: vec![Param::Symbol("f".into()), Param::Symbol("x".into())],
        body: Box::new(apply(sym("f"), vec![apply(sym("f"), vec![sym("x")])])),
    };
    let int_double = FunDef {
        name: Some("int_double".into()),
        args: vec![Param::Symbol("i".into())],
        body: Box::new(apply(sym("+"), vec![sym("i"), sym("i")])),
    };
    let body = Expr::FunBinding {
        def: two_times,
        body: Box::new(Expr::FunBinding {
            def: int_double,
            body: Box::new(apply(sym("two_times"), vec![sym("int_double"), sym("int")])),
        }),
    };
    let result = type_of_top_level_fun(vec!["int"], body);
    assert_result_type(&result, Ty::arrow(vec![Ty::int()], Ty::int()));
}

// ── Scenario 5: `two_times` reused polymorphically ────────────────────────

#[test]
fn double_application_reuses_two_times_at_two_element_types() {
    // double_application a b =
    //   let two_times f x = f (f x) in
    //   let id = \i -> i + i in
    //   let fd = \j -> j +. j in
    //   let _ = two_times id a in
    //   two_times fd b
    let two_times = FunDef {
        name: Some("two_times".into()),
        args: vec![Param::Symbol("f".into()), Param::Symbol("x".into())],
        body: Box::new(apply(sym("f"), vec![apply(sym("f"), vec![sym("x")])])),
    };
    let id_def = FunDef {
        name: Some("id".into()),
        args: vec![Param::Symbol("i".into())],
        body: Box::new(apply(sym("+"), vec![sym("i"), sym("i")])),
    };
    let fd_def = FunDef {
        name: Some("fd".into()),
        args: vec![Param::Symbol("j".into())],
        body: Box::new(apply(sym("+."), vec![sym("j"), sym("j")])),
    };
    let body = Expr::FunBinding {
        def: two_times,
        body: Box::new(Expr::FunBinding {
            def: id_def,
            body: Box::new(Expr::FunBinding {
                def: fd_def,
                body: Box::new(Expr::VarBinding {
                    name: "_".into(),
                    value: Box::new(apply(sym("two_times"), vec![sym("id"), sym("a")])),
                    body: Box::new(apply(sym("two_times"), vec![sym("fd"), sym("b")])),
                }),
            }),
        }),
    };
    let result = type_of_top_level_fun(vec!["a", "b"], body);
    assert_result_type(&result, Ty::arrow(vec![Ty::int(), Ty::float()], Ty::float()));
}

// ── Scenario 6: mismatched match arms ──────────────────────────────────────

#[test]
fn mismatched_match_arms_fail_to_unify() {
    // f x = match x with | i -> i + 1 | 'atom -> 2
    let body = Expr::Match {
        scrutinee: Box::new(sym("x")),
        clauses: vec![
            Clause {
                pattern: Pattern::Symbol("i".into()),
                guard: None,
                result: Box::new(apply(sym("+"), vec![sym("i"), int(1)])),
            },
            Clause { pattern: Pattern::Expr(Box::new(atom("atom"))), guard: None, result: Box::new(int(2)) },
        ],
    };
    let result = type_of_top_level_fun(vec!["x"], body);
    assert_has_error(&result, |e| matches!(e, TypeError::CannotUnify(_, _)), "CannotUnify");
}

// ── Scenario 7: match over an arithmetic scrutinee ─────────────────────────

#[test]
fn match_over_arithmetic_scrutinee_returns_atom() {
    // f x = match x + 1 with | 1 -> 'x_was_zero | 2 -> 'x_was_one | _ -> 'x_was_more_than_one
    let body = Expr::Match {
        scrutinee: Box::new(apply(sym("+"), vec![sym("x"), int(1)])),
        clauses: vec![
            Clause { pattern: Pattern::Expr(Box::new(int(1))), guard: None, result: Box::new(atom("x_was_zero")) },
            Clause { pattern: Pattern::Expr(Box::new(int(2))), guard: None, result: Box::new(atom("x_was_one")) },
            Clause {
                pattern: Pattern::Wildcard,
                guard: None,
                result: Box::new(atom("x_was_more_than_one")),
            },
        ],
    };
    let result = type_of_top_level_fun(vec!["x"], body);
    assert_result_type(&result, Ty::arrow(vec![Ty::int()], Ty::atom()));
}

// ── Clause-level tests ──────────────────────────────────────────────────

#[test]
fn clause_with_literal_pattern_is_fully_concrete() {
    let mut session = Session::new();
    let expr = Expr::Match {
        scrutinee: Box::new(int(1)),
        clauses: vec![Clause {
            pattern: Pattern::Expr(Box::new(int(1))),
            guard: None,
            result: Box::new(atom("true")),
        }],
    };
    let ty = session.type_of(&expr).unwrap();
    assert_eq!(ty, Ty::atom());
}

#[test]
fn clause_with_symbol_pattern_binds_a_fresh_variable() {
    // Clause(Symbol("x"), AtomLit(true)) -> Clause(Unbound(_, 0), none, Atom)
    let mut session = Session::new();
    let expr = Expr::Match {
        scrutinee: Box::new(int(1)),
        clauses: vec![Clause { pattern: Pattern::Symbol("x".into()), guard: None, result: Box::new(atom("true")) }],
    };
    let ty = session.type_of(&expr).unwrap();
    assert_eq!(ty, Ty::atom());
}

#[test]
fn clause_with_symbol_pattern_used_in_its_result_is_constrained() {
    // Clause(Symbol("x"), Apply(+, [Symbol("x"), IntLit(2)])) -> Clause(Int, none, Int)
    let body = apply(sym("+"), vec![sym("x"), int(2)]);
    let result = type_of_top_level_fun(vec!["x"], body);
    assert_result_type(&result, Ty::arrow(vec![Ty::int()], Ty::int()));
}

// ── §8.1 quantified invariants ────────────────────────────────────────────

#[test]
fn generalization_boundary_let_bound_self_application_types() {
    // let id = \x -> x in id id
    let id_def = FunDef { name: Some("id".into()), args: vec![Param::Symbol("x".into())], body: Box::new(sym("x")) };
    let expr = Expr::FunBinding { def: id_def, body: Box::new(apply(sym("id"), vec![sym("id")])) };
    let mut session = Session::new();
    assert!(session.type_of(&expr).is_ok());
}

#[test]
fn generalization_boundary_direct_self_application_does_not_type() {
    // (\id -> id id)(\x -> x)
    let inner = apply(sym("id"), vec![sym("id")]);
    let outer = Expr::Fun(fun(vec!["id"], inner));
    let identity = Expr::Fun(fun(vec!["x"], sym("x")));
    let expr = apply(outer, vec![identity]);
    let mut session = Session::new();
    assert!(session.type_of(&expr).is_err());
}

#[test]
fn occurs_check_rejects_self_applied_parameter() {
    // \x -> x x
    let body = apply(sym("x"), vec![sym("x")]);
    let result = type_of_top_level_fun(vec!["x"], body);
    assert_has_error(&result, |e| matches!(e, TypeError::CircularType(_)), "CircularType");
}

#[test]
fn binary_builtin_applied_to_one_argument_is_an_arity_error() {
    let mut session = Session::new();
    let result = session.type_of(&apply(sym("+"), vec![int(1)]));
    assert_has_error(
        &result,
        |e| matches!(e, TypeError::MismatchedArity { expected: 2, found: 1 } | TypeError::CannotUnify(_, _)),
        "MismatchedArity or CannotUnify",
    );
}

#[test]
fn unknown_symbol_reports_unbound_variable() {
    let mut session = Session::new();
    let result = session.type_of(&sym("nope"));
    assert_eq!(result, Err(TypeError::UnboundVariable("nope".into())));
}

#[test]
fn repeated_calls_to_a_polymorphic_scheme_do_not_interfere() {
    // Non-mutation of caller's scheme: two separate top-level inference
    // runs both instantiate `id`'s scheme independently, even though they
    // share no `Session` -- the stronger, same-session version of this is
    // exercised by `double_application_reuses_two_times_at_two_element_types`.
    let id_def = FunDef { name: Some("id".into()), args: vec![Param::Symbol("x".into())], body: Box::new(sym("x")) };
    let int_use = Expr::FunBinding {
        def: id_def.clone(),
        body: Box::new(apply(sym("id"), vec![int(1)])),
    };
    let float_use = Expr::FunBinding { def: id_def, body: Box::new(apply(sym("id"), vec![float(1.0)])) };

    let mut first_session = Session::new();
    assert_result_type(&first_session.type_of(&int_use), Ty::int());
    let mut second_session = Session::new();
    assert_result_type(&second_session.type_of(&float_use), Ty::float());
}

#[test]
fn counter_is_monotonic_across_a_multi_step_inference() {
    let mut session = Session::new();
    let before = session.ctx.counter();
    let body = apply(sym("+"), vec![sym("x"), sym("x")]);
    session.type_of(&Expr::Fun(fun(vec!["x"], body))).unwrap();
    assert!(session.ctx.counter() >= before);
}
