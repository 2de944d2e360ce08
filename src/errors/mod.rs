//! Non-fatal diagnostics surfaced by the parser.
//!
//! Nothing in this crate fails: lexical problems become ERROR tokens,
//! structural problems become best-effort nodes, and the only condition
//! reported through this module is an internal loop reaching its iteration
//! cap, which ends the loop early with a partial result.

pub mod errors;
