//! Statement forms produced by the statement parser.

use super::expressions::Expr;

/// One `case` arm of a match statement.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchArm {
    pub pattern: Pattern,
    pub body: Vec<Stmt>,
}

/// Match patterns: literals, the constant words, bracketed list patterns,
/// braced key:value dict patterns and bare identifier bindings, built
/// recursively from the same grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Literal(String),
    Capture(String),
    List(Vec<Pattern>),
    Dict(Vec<(Pattern, Pattern)>),
    /// Produced when no pattern form matches; consumes nothing.
    Wildcard,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    FunctionDef {
        name: String,
        params: Vec<String>,
        body: Vec<Stmt>,
        decorators: Vec<String>,
        is_async: bool,
    },
    /// `async` followed by something other than def/with/for.
    AsyncStmt,
    If {
        condition: Expr,
        body: Vec<Stmt>,
        elif_clauses: Vec<(Expr, Vec<Stmt>)>,
        else_body: Option<Vec<Stmt>>,
    },
    For {
        target: String,
        iterable: Expr,
        body: Vec<Stmt>,
        is_async: bool,
    },
    While { condition: Expr, body: Vec<Stmt> },
    Try {
        body: Vec<Stmt>,
        handlers: Vec<Vec<Stmt>>,
        finally_body: Option<Vec<Stmt>>,
    },
    ClassDef {
        name: String,
        bases: Vec<String>,
        body: Vec<Stmt>,
    },
    Import { names: Vec<String> },
    FromImport { module: String, names: Vec<String> },
    With {
        context: Expr,
        binding: Option<String>,
        body: Vec<Stmt>,
        is_async: bool,
    },
    Match { subject: Expr, arms: Vec<MatchArm> },
    Return(Option<Expr>),
    Yield(Option<Expr>),
    Raise(Expr),
    Break,
    Continue,
    Pass,
    Global(Vec<String>),
    Nonlocal(Vec<String>),
    Assert {
        condition: Expr,
        message: Option<Expr>,
    },
    Del(Vec<String>),
    /// Target list with an optional `=`/`:=` and value list; a bare target
    /// list parses to `op: None, values: []`.
    Assignment {
        targets: Vec<String>,
        op: Option<String>,
        values: Vec<Expr>,
    },
    /// A COMMENT token passed through as a standalone node.
    Comment(String),
    /// An ERROR token passed through as a standalone node.
    Error(String),
    Expr(Expr),
}
