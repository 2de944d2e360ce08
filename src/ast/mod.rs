//! Syntax tree definitions.
//!
//! Every construct is one variant of a closed enum carrying only the fields
//! that construct needs; children are owned by value, so a tree is dropped
//! wholesale when the next pass replaces it.
//!
//! Submodules:
//! - expressions: expression forms and comprehensions
//! - statements: statement forms, match arms and patterns
pub mod expressions;
pub mod statements;
