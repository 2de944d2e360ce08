//! Parser module for building a statement tree from tokens.
//!
//! This module contains the recursive-descent parser that transforms the
//! lexer's token stream into a sequence of statement nodes. It handles:
//!
//! - Statement parsing (definitions, control flow, imports, assignments)
//! - Expression parsing through a fixed precedence chain
//! - Structural match patterns
//! - Error tolerance: mismatches never abort, loops are iteration-capped
//!
//! The parser is built for highlighting rather than execution: it always
//! produces a statement list covering the whole stream, degrading malformed
//! regions into partial or passthrough nodes instead of failing.

pub mod expr;
pub mod parser;
pub mod stmt;
