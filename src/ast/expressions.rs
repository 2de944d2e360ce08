//! Expression forms produced by the precedence chain.

/// One `for` clause with its element expression and trailing `if` guards.
/// The grammar allows exactly one `for` per comprehension.
#[derive(Debug, Clone, PartialEq)]
pub struct Comprehension {
    pub element: Expr,
    pub var: String,
    pub iterable: Expr,
    pub conditions: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DictComprehension {
    pub key: Expr,
    pub value: Expr,
    pub var: String,
    pub iterable: Expr,
    pub conditions: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A NUMBER, STRING, FSTRING or constant-word token, carried as text.
    Literal(String),
    Identifier(String),
    /// Only the bare `name(args)` shape; calls chained after attribute
    /// access or grouped primaries are not represented as calls.
    Call { callee: String, args: Vec<Expr> },
    Attribute { value: Box<Expr>, attr: String },
    Tuple(Vec<Expr>),
    List(Vec<Expr>),
    Set(Vec<Expr>),
    Dict(Vec<(Expr, Expr)>),
    ListComp(Box<Comprehension>),
    DictComp(Box<DictComprehension>),
    Lambda { params: Vec<String>, body: Box<Expr> },
    /// `body if condition else else_body`; built only when the `else`
    /// branch is present.
    IfExpr {
        body: Box<Expr>,
        condition: Box<Expr>,
        else_body: Box<Expr>,
    },
    LogicalOr(Box<Expr>, Box<Expr>),
    LogicalAnd(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
    Comparison {
        left: Box<Expr>,
        op: String,
        right: Box<Expr>,
    },
    In(Box<Expr>, Box<Expr>),
    NotIn(Box<Expr>, Box<Expr>),
    Is(Box<Expr>, Box<Expr>),
    IsNot(Box<Expr>, Box<Expr>),
    BitwiseOr(Box<Expr>, Box<Expr>),
    BitwiseXor(Box<Expr>, Box<Expr>),
    BitwiseAnd(Box<Expr>, Box<Expr>),
    Shift {
        left: Box<Expr>,
        op: String,
        right: Box<Expr>,
    },
    Arith {
        left: Box<Expr>,
        op: String,
        right: Box<Expr>,
    },
    Term {
        left: Box<Expr>,
        op: String,
        right: Box<Expr>,
    },
    Unary { op: String, operand: Box<Expr> },
    Power(Box<Expr>, Box<Expr>),
    /// An interpolated fragment re-parsed by a nested tokenizer/parser pair.
    FStringExpr(Box<Expr>),
    /// An ERROR token passed through in expression position.
    Error(String),
    /// Placeholder built when no primary form matches. Does not consume
    /// input; the surrounding capped loops bound the repetition.
    Empty,
}
