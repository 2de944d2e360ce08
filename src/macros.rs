//! Utility macros for the scanner.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//!
//! Reduces boilerplate in the lexer handlers, which all end by
//! materializing a token at a recorded start position.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$text` - The token's source text
/// * `$line` - 1-based source line of the token's first character
/// * `$column` - 1-based column of the token's first character
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), 1, 5);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $text:expr, $line:expr, $column:expr) => {
        Token {
            kind: $kind,
            text: $text,
            line: $line,
            column: $column,
        }
    };
}
