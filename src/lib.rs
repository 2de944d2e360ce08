#![allow(clippy::module_inception)]

//! Error-tolerant front end for a Python-like scripting grammar.
//!
//! Two stages: [`lexer::lexer::tokenize`] turns source text into a flat
//! token stream, and [`parser::parser::parse`] turns that stream into a
//! statement tree plus non-fatal diagnostics. Neither stage can fail on any
//! input, which is what a highlighter needs when the buffer is mid-edit.

use crate::{ast::statements::Stmt, errors::errors::Diagnostic, lexer::tokens::Token};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Everything one pass over a buffer produces.
#[derive(Debug)]
pub struct ScanResult {
    pub tokens: Vec<Token>,
    pub statements: Vec<Stmt>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Runs both stages over a source buffer.
pub fn scan(source: &str) -> ScanResult {
    let tokens = lexer::lexer::tokenize(source);
    let (statements, diagnostics) = parser::parser::parse(tokens.clone());
    ScanResult {
        tokens,
        statements,
        diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::statements::Stmt;

    #[test]
    fn test_scan_smoke() {
        let result = super::scan("x = 1");
        assert_eq!(result.tokens.len(), 3);
        assert_eq!(result.statements.len(), 1);
        assert!(result.diagnostics.is_empty());
        assert!(matches!(result.statements[0], Stmt::Assignment { .. }));
    }

    #[test]
    fn test_scan_empty_source() {
        let result = super::scan("");
        assert!(result.tokens.is_empty());
        assert!(result.statements.is_empty());
        assert!(result.diagnostics.is_empty());
    }
}
