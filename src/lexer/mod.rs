//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a flat stream of classified tokens. It handles:
//!
//! - Tokenization of source text using regex patterns
//! - Recognition of keywords, identifiers, literals, and operators
//! - F-string segmentation with embedded interpolation tokens
//! - Token position tracking (1-based line and column)
//! - Comments, docstring-style blocks, and whitespace
//!
//! The lexer never fails: characters no rule claims become single-character
//! ERROR tokens, so every input produces a full token stream.

pub mod lexer;
pub mod tokens;
