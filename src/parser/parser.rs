//! Parser state and the top-level parse entry point.
//!
//! The parser owns the full token sequence for one pass and a cursor into
//! it. It never fails: `expect` is a try-consume that always moves forward,
//! and every accumulating loop is bounded by `MAX_ITERATIONS`, so a pass
//! either covers the whole stream or is cut off with a partial result and a
//! non-fatal diagnostic.

use crate::{
    ast::statements::Stmt,
    errors::errors::{Diagnostic, DiagnosticKind},
    lexer::tokens::{Token, TokenKind},
};

use super::stmt::parse_stmt;

/// Fixed cap on every accumulating loop. Guarantees termination on
/// adversarial token patterns where a sub-parse makes no progress.
pub const MAX_ITERATIONS: usize = 10_000;

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            tokens,
            pos: 0,
            diagnostics: vec![],
        }
    }

    /// Returns the current token, or None past the end of the stream.
    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// One token of lookahead.
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos + 1)
    }

    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Try-consume: advances exactly one token whether or not the current
    /// token matches, and reports the match. Misses leave their mark in the
    /// surrounding node shape, never in control flow.
    pub fn expect(&mut self, kind: TokenKind, text: Option<&str>) -> bool {
        let matched = self
            .current()
            .map_or(false, |t| t.kind == kind && text.map_or(true, |v| t.text == v));
        self.advance();
        matched
    }

    pub fn at_kind(&self, kind: TokenKind) -> bool {
        self.current().map_or(false, |t| t.kind == kind)
    }

    pub fn at_keyword(&self, word: &str) -> bool {
        self.current().map_or(false, |t| t.is_keyword(word))
    }

    pub fn at_operator(&self, op: &str) -> bool {
        self.current().map_or(false, |t| t.is_operator(op))
    }

    /// Reads the current identifier's name, or "" when the current token is
    /// not an identifier, then consumes one token either way.
    pub fn identifier_or_empty(&mut self) -> String {
        let name = match self.current() {
            Some(t) if t.kind == TokenKind::Identifier => t.text.clone(),
            _ => String::new(),
        };
        self.expect(TokenKind::Identifier, None);
        name
    }

    fn position(&self) -> (u32, u32) {
        self.current()
            .or_else(|| self.tokens.last())
            .map_or((1, 1), |t| (t.line, t.column))
    }

    pub fn note_iteration_limit(&mut self, context: &'static str) {
        let (line, column) = self.position();
        self.diagnostics.push(Diagnostic::new(
            DiagnosticKind::IterationLimit { context },
            line,
            column,
        ));
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Folds diagnostics from a nested pass (interpolation sub-parses) into
    /// this parser's list.
    pub fn extend_diagnostics(&mut self, extra: Vec<Diagnostic>) {
        self.diagnostics.extend(extra);
    }
}

/// Parses a token stream into an ordered sequence of statement nodes
/// covering the whole stream, plus any non-fatal diagnostics raised along
/// the way. Total: malformed regions become partial or passthrough nodes.
pub fn parse(tokens: Vec<Token>) -> (Vec<Stmt>, Vec<Diagnostic>) {
    let mut parser = Parser::new(tokens);

    let mut statements = vec![];
    let mut iterations = 0;
    while parser.current().is_some() && iterations < MAX_ITERATIONS {
        statements.push(parse_stmt(&mut parser));
        iterations += 1;
    }
    if iterations >= MAX_ITERATIONS {
        parser.note_iteration_limit("statement list");
    }

    let diagnostics = parser.take_diagnostics();
    (statements, diagnostics)
}
