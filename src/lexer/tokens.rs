use lazy_static::lazy_static;
use std::{collections::HashSet, fmt::Display};

lazy_static! {
    /// Reserved words of the grammar. Checked after `CONSTANTS`, so the
    /// three constant words never classify as plain keywords.
    pub static ref KEYWORDS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("def");
        set.insert("for");
        set.insert("if");
        set.insert("else");
        set.insert("while");
        set.insert("elif");
        set.insert("try");
        set.insert("except");
        set.insert("finally");
        set.insert("class");
        set.insert("None");
        set.insert("lambda");
        set.insert("with");
        set.insert("as");
        set.insert("import");
        set.insert("from");
        set.insert("async");
        set.insert("await");
        set.insert("break");
        set.insert("continue");
        set.insert("pass");
        set.insert("return");
        set.insert("True");
        set.insert("False");
        set.insert("global");
        set.insert("nonlocal");
        set.insert("assert");
        set.insert("raise");
        set.insert("del");
        set.insert("match");
        set.insert("case");
        set.insert("and");
        set.insert("or");
        set.insert("not");
        set.insert("in");
        set.insert("is");
        set
    };

    /// Operator and punctuation vocabulary. A single character starts an
    /// operator token only if it appears here as a one-character entry;
    /// two-character entries are reachable through greedy extension only.
    /// `!=` has no one-character prefix in the set, so a lone `!` lexes as
    /// an ERROR token.
    pub static ref OPERATORS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("+");
        set.insert("-");
        set.insert("*");
        set.insert("/");
        set.insert("=");
        set.insert("==");
        set.insert("<");
        set.insert(">");
        set.insert("<=");
        set.insert(">=");
        set.insert("%");
        set.insert("//");
        set.insert("**");
        set.insert("&");
        set.insert("|");
        set.insert("^");
        set.insert("~");
        set.insert("<<");
        set.insert(">>");
        set.insert("@");
        set.insert(":=");
        set.insert("!=");
        set.insert(":");
        set.insert(",");
        set.insert("(");
        set.insert(")");
        set.insert("[");
        set.insert("]");
        set.insert("{");
        set.insert("}");
        set.insert(".");
        set.insert(";");
        set
    };

    /// The three constant words, classified LITERAL rather than KEYWORD.
    pub static ref CONSTANTS: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("True");
        set.insert("False");
        set.insert("None");
        set
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Keyword,
    Operator,
    Identifier,
    /// One of the constant words `True`/`False`/`None`.
    Literal,
    Number,
    String,
    /// A literal text segment of an interpolated string, including the
    /// opening or closing quote when the segment touches one.
    FString,
    /// A `{…}` fragment captured inside an interpolated string, braces
    /// included.
    FStringExpr,
    Comment,
    Error,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Smallest lexical unit: kind, exact source text and start position.
///
/// `line` is 1-based; `column` is 1-based so that `column - 1` is the
/// 0-based character offset of the token's first character within its line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: u32,
    pub column: u32,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{} {} {:?}",
            self.line, self.column, self.kind, self.text
        )
    }
}

impl Token {
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == word
    }

    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == op
    }
}
