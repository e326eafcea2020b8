//! Abstract shape of the AST nodes consumed by the inference driver.
//!
//! The lexer, parser, and concrete node definitions live outside this
//! crate. What follows is the minimal shape the driver needs to pattern
//! match on -- an external parser builds these, typically by lowering a
//! richer concrete tree into this one.

/// A literal kind. Booleans and atoms are kept distinct from `Const` kinds
/// so callers can carry source-level literal values through unchanged.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Atom(String),
    Str(String),
    Bool(bool),
}

/// A single clause pattern. Only the two binding forms are distinguished;
/// anything else is typed by recursing into `Expr` (e.g. a literal pattern).
#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    /// `x` -- binds the scrutinee to a fresh variable.
    Symbol(String),
    /// `_` -- matches anything, binds nothing.
    Wildcard,
    /// Any other pattern expression (e.g. a literal), typed structurally.
    Expr(Box<Expr>),
}

/// One arm of a `match`.
#[derive(Clone, Debug, PartialEq)]
pub struct Clause {
    pub pattern: Pattern,
    /// Reserved: parsed but not yet unified against `Bool`.
    pub guard: Option<Box<Expr>>,
    pub result: Box<Expr>,
}

/// A function argument: either a plain binder or the unit placeholder `()`.
#[derive(Clone, Debug, PartialEq)]
pub enum Param {
    Symbol(String),
    Unit,
}

/// A function definition. `name` is `None` for an anonymous lambda and
/// `Some` for a named `let`-bound function -- the name is never visible
/// inside `body` (direct recursion is not supported).
#[derive(Clone, Debug, PartialEq)]
pub struct FunDef {
    pub name: Option<String>,
    pub args: Vec<Param>,
    pub body: Box<Expr>,
}

/// An expression in the source language's abstract syntax.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Lit(Literal),
    /// A reference to a bound name, including a pre-resolved builtin.
    Symbol(String),
    /// `f(a1, ..., an)`. `func` is typically a `Symbol`.
    Apply { func: Box<Expr>, args: Vec<Expr> },
    Match { scrutinee: Box<Expr>, clauses: Vec<Clause> },
    Fun(FunDef),
    /// `let f = fun ... in body`.
    FunBinding { def: FunDef, body: Box<Expr> },
    /// `let x = value in body`.
    VarBinding { name: String, value: Box<Expr>, body: Box<Expr> },
}
