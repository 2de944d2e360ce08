use regex::Regex;

use crate::MK_TOKEN;

use super::tokens::{Token, TokenKind, CONSTANTS, KEYWORDS, OPERATORS};

pub type RuleHandler = fn(&mut Lexer, &Regex);

/// One entry of the priority-ordered rule table: a probe regex that must
/// match at the cursor, and the handler that consumes the construct.
#[derive(Clone)]
pub struct LexRule {
    regex: Regex,
    handler: RuleHandler,
}

/// Scanner state for one tokenize pass. Owns the character buffer and the
/// cursor; discarded when the pass returns.
#[derive(Clone)]
pub struct Lexer {
    rules: Vec<LexRule>,
    tokens: Vec<Token>,
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            pos: 0,
            line: 1,
            column: 1,
            tokens: vec![],
            rules: vec![
                LexRule {
                    regex: Regex::new(r"\s+").unwrap(),
                    handler: whitespace_handler,
                },
                LexRule {
                    regex: Regex::new(r"#[^\n]*").unwrap(),
                    handler: comment_handler,
                },
                LexRule {
                    regex: Regex::new(r#""{3}|'{3}"#).unwrap(),
                    handler: block_comment_handler,
                },
                LexRule {
                    regex: Regex::new(r"[+\-*/=<>%&|^~@:,()\[\]{}.;]").unwrap(),
                    handler: operator_handler,
                },
                LexRule {
                    regex: Regex::new(r"[\w--\d]\w*").unwrap(),
                    handler: word_handler,
                },
                LexRule {
                    regex: Regex::new(r"[0-9]").unwrap(),
                    handler: number_handler,
                },
                LexRule {
                    regex: Regex::new(r#"["']"#).unwrap(),
                    handler: string_handler,
                },
            ],
            chars: source.chars().collect(),
        }
    }

    pub fn advance(&mut self) {
        self.pos += 1;
        self.column += 1;
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
        self.column += n as u32;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn current(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    pub fn char_at(&self, idx: usize) -> Option<char> {
        self.chars.get(idx).copied()
    }

    pub fn remainder(&self) -> String {
        self.chars[self.pos..].iter().collect()
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.chars.len()
    }

    /// True if the characters at the cursor spell out `text` exactly.
    fn lookahead_is(&self, text: &str) -> bool {
        let mut idx = self.pos;
        for c in text.chars() {
            if self.char_at(idx) != Some(c) {
                return false;
            }
            idx += 1;
        }
        true
    }
}

fn whitespace_handler(lexer: &mut Lexer, regex: &Regex) {
    let remaining = lexer.remainder();
    let Some(matched) = regex.find(&remaining) else {
        return;
    };
    for c in matched.as_str().chars() {
        if c == '\n' {
            lexer.line += 1;
            lexer.column = 0;
        }
        lexer.advance();
    }
}

fn comment_handler(lexer: &mut Lexer, regex: &Regex) {
    let remaining = lexer.remainder();
    let Some(matched) = regex.find(&remaining) else {
        return;
    };
    let text = matched.as_str().to_string();
    let len = text.chars().count();
    let (line, column) = (lexer.line, lexer.column);
    lexer.push(MK_TOKEN!(TokenKind::Comment, text, line, column));
    lexer.advance_n(len);
}

/// A triple `"""`/`'''` block is one COMMENT token, terminator included when
/// present. Runs to end-of-input when unterminated and stays a COMMENT.
fn block_comment_handler(lexer: &mut Lexer, regex: &Regex) {
    let remaining = lexer.remainder();
    let Some(matched) = regex.find(&remaining) else {
        return;
    };
    let delimiter = matched.as_str().to_string();
    let mut comment = delimiter.clone();
    let start_line = lexer.line;
    let start_column = lexer.column;
    lexer.advance_n(3);
    while let Some(c) = lexer.current() {
        if lexer.lookahead_is(&delimiter) {
            break;
        }
        if c == '\n' {
            lexer.line += 1;
            lexer.column = 0;
        }
        comment.push(c);
        lexer.advance();
    }
    if lexer.current().is_some() {
        comment.push_str(&delimiter);
        lexer.advance_n(3);
    }
    lexer.push(MK_TOKEN!(
        TokenKind::Comment,
        comment,
        start_line,
        start_column
    ));
}

/// Greedy two-character extension: the pair is taken only when it is itself
/// in the operator set. Nothing longer than two characters is recognized.
fn operator_handler(lexer: &mut Lexer, _regex: &Regex) {
    let Some(first) = lexer.current() else {
        return;
    };
    let mut op = first.to_string();
    let start_column = lexer.column;
    lexer.advance();
    if let Some(next) = lexer.current() {
        let mut pair = op.clone();
        pair.push(next);
        if OPERATORS.contains(pair.as_str()) {
            op = pair;
            lexer.advance();
        }
    }
    let line = lexer.line;
    lexer.push(MK_TOKEN!(TokenKind::Operator, op, line, start_column));
}

fn word_handler(lexer: &mut Lexer, regex: &Regex) {
    let remaining = lexer.remainder();
    let Some(matched) = regex.find(&remaining) else {
        return;
    };
    let word = matched.as_str();
    let kind = if CONSTANTS.contains(word) {
        TokenKind::Literal
    } else if KEYWORDS.contains(word) {
        TokenKind::Keyword
    } else {
        TokenKind::Identifier
    };
    let text = word.to_string();
    let len = text.chars().count();
    let (line, column) = (lexer.line, lexer.column);
    lexer.push(MK_TOKEN!(kind, text, line, column));
    lexer.advance_n(len);
}

/// Digits with at most one `.`. A second `.` emits an ERROR token holding the
/// accumulated text and stops consuming; the NUMBER token for the same text
/// is still emitted afterwards, and the offending `.` is left for the next
/// scan iteration. Both tokens are part of the stable output shape.
fn number_handler(lexer: &mut Lexer, _regex: &Regex) {
    let mut number = String::new();
    let start_column = lexer.column;
    let line = lexer.line;
    let mut is_float = false;
    while let Some(c) = lexer.current() {
        if !c.is_ascii_digit() && c != '.' {
            break;
        }
        if c == '.' {
            if is_float {
                let text = number.clone();
                lexer.push(MK_TOKEN!(TokenKind::Error, text, line, start_column));
                break;
            }
            is_float = true;
        }
        number.push(c);
        lexer.advance();
    }
    lexer.push(MK_TOKEN!(TokenKind::Number, number, line, start_column));
}

/// Strings close on a quote character that is not immediately doubled; a
/// doubled quote stays inside the token. There is no backslash handling. An
/// interpolated string is recognized when the character just before the
/// opening quote is `f`/`F`, and splits into FSTRING text segments and
/// brace-balanced FSTRING_EXPR fragments.
fn string_handler(lexer: &mut Lexer, _regex: &Regex) {
    let Some(quote) = lexer.current() else {
        return;
    };
    let mut string = quote.to_string();
    let mut start_line = lexer.line;
    let mut start_column = lexer.column;
    let is_f_string = lexer.pos > 0 && {
        let prev = lexer.chars[lexer.pos - 1];
        prev == 'f' || prev == 'F'
    };
    lexer.advance();
    while let Some(c) = lexer.current() {
        if c == quote && lexer.char_at(lexer.pos + 1) != Some(quote) {
            string.push(c);
            lexer.advance();
            let kind = if is_f_string {
                TokenKind::FString
            } else {
                TokenKind::String
            };
            lexer.push(MK_TOKEN!(kind, string, start_line, start_column));
            return;
        }
        if is_f_string && c == '{' {
            if !string.is_empty() {
                lexer.push(MK_TOKEN!(
                    TokenKind::FString,
                    string,
                    start_line,
                    start_column
                ));
                string = String::new();
                start_line = lexer.line;
                start_column = lexer.column;
            }
            lexer.advance();
            let mut expr = String::from("{");
            let mut brace_count = 1u32;
            while brace_count > 0 {
                let Some(inner) = lexer.current() else {
                    break;
                };
                if inner == '\n' {
                    lexer.line += 1;
                    lexer.column = 0;
                }
                if inner == '{' {
                    brace_count += 1;
                } else if inner == '}' {
                    brace_count -= 1;
                }
                expr.push(inner);
                lexer.advance();
            }
            let kind = if brace_count == 0 && lexer.current().is_some() {
                TokenKind::FStringExpr
            } else {
                TokenKind::Error
            };
            lexer.push(MK_TOKEN!(kind, expr, start_line, start_column));
            continue;
        }
        if c == '\n' {
            lexer.line += 1;
            lexer.column = 0;
        }
        string.push(c);
        lexer.advance();
    }
    // No closing quote before end-of-input.
    lexer.push(MK_TOKEN!(
        TokenKind::Error,
        string,
        start_line,
        start_column
    ));
}

/// Converts the full text into an ordered token sequence. Total: any
/// fragment no rule accepts becomes an ERROR token, never a failure.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut lex = Lexer::new(source);

    while !lex.at_eof() {
        let mut matched = false;
        let remaining = lex.remainder();

        for rule in lex.rules.clone().iter() {
            if let Some(found) = rule.regex.find(&remaining) {
                if found.start() == 0 {
                    (rule.handler)(&mut lex, &rule.regex);
                    matched = true;
                    break;
                }
            }
        }

        if !matched {
            if let Some(c) = lex.current() {
                let (line, column) = (lex.line, lex.column);
                lex.push(MK_TOKEN!(TokenKind::Error, c.to_string(), line, column));
            }
            lex.advance();
        }
    }

    lex.tokens
}
