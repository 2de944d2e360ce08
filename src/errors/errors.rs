use std::fmt::Display;

use thiserror::Error;

/// A non-fatal condition noticed during a parse pass, with the source
/// position the parser was looking at when it occurred.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    kind: DiagnosticKind,
    line: u32,
    column: u32,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, line: u32, column: u32) -> Self {
        Diagnostic { kind, line, column }
    }

    pub fn kind(&self) -> &DiagnosticKind {
        &self.kind
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.kind)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A list-accumulating loop (or the top-level statement loop) ran for
    /// the full iteration cap and was cut off with a partial result.
    #[error("iteration limit reached while parsing {context}")]
    IterationLimit { context: &'static str },
}
