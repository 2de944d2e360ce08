//! Statement-level grammar.
//!
//! Dispatch keys on the leading token: a keyword selects its construct, an
//! identifier starts an assignment, COMMENT/ERROR tokens pass through as
//! standalone nodes, and everything else falls back to a bare expression
//! statement. Suites have no indentation tracking; a suite ends at a token
//! that would start an `elif`/`else`/`except`/`finally` clause or at
//! end-of-input.

use crate::{
    ast::statements::{MatchArm, Pattern, Stmt},
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_expression, parse_expression_list},
    parser::{Parser, MAX_ITERATIONS},
};

pub fn parse_stmt(parser: &mut Parser) -> Stmt {
    let (kind, text) = match parser.current() {
        Some(token) => (token.kind, token.text.clone()),
        None => return parse_expression_stmt(parser),
    };

    match kind {
        TokenKind::Keyword => match text.as_str() {
            "def" => parse_function_def(parser),
            "async" => parse_async_stmt(parser),
            "if" => parse_if_stmt(parser),
            "for" => parse_for_stmt(parser),
            "while" => parse_while_stmt(parser),
            "try" => parse_try_stmt(parser),
            "class" => parse_class_def(parser),
            "import" => parse_import_stmt(parser),
            "from" => parse_from_import_stmt(parser),
            "with" => parse_with_stmt(parser),
            "match" => parse_match_stmt(parser),
            "break" | "continue" | "pass" | "return" | "raise" | "yield" => {
                parse_control_stmt(parser)
            }
            "global" => parse_global_stmt(parser),
            "nonlocal" => parse_nonlocal_stmt(parser),
            "assert" => parse_assert_stmt(parser),
            "del" => parse_del_stmt(parser),
            _ => parse_expression_stmt(parser),
        },
        TokenKind::Identifier => parse_assignment(parser),
        TokenKind::Comment => {
            parser.advance();
            Stmt::Comment(text)
        }
        TokenKind::Error => {
            parser.advance();
            Stmt::Error(text)
        }
        _ => parse_expression_stmt(parser),
    }
}

pub fn parse_function_def(parser: &mut Parser) -> Stmt {
    let mut decorators = vec![];
    while parser.at_operator("@") {
        decorators.push(parse_decorator(parser));
    }
    let mut is_async = false;
    if parser.at_keyword("async") {
        parser.expect(TokenKind::Keyword, Some("async"));
        is_async = true;
    }
    parser.expect(TokenKind::Keyword, Some("def"));
    let name = parser.identifier_or_empty();
    parser.expect(TokenKind::Operator, Some("("));
    let params = parse_param_list(parser);
    parser.expect(TokenKind::Operator, Some(")"));
    parser.expect(TokenKind::Operator, Some(":"));
    let body = parse_suite(parser);
    Stmt::FunctionDef {
        name,
        params,
        body,
        decorators,
        is_async,
    }
}

fn parse_decorator(parser: &mut Parser) -> String {
    parser.expect(TokenKind::Operator, Some("@"));
    parser.identifier_or_empty()
}

pub fn parse_param_list(parser: &mut Parser) -> Vec<String> {
    let mut params = vec![];
    let mut iterations = 0;
    while parser.at_kind(TokenKind::Identifier) && iterations < MAX_ITERATIONS {
        params.push(parser.identifier_or_empty());
        if parser.at_operator(",") {
            parser.expect(TokenKind::Operator, Some(","));
        } else {
            break;
        }
        iterations += 1;
    }
    if iterations >= MAX_ITERATIONS {
        parser.note_iteration_limit("parameter list");
    }
    params
}

/// Consumes the suite's leading `:` (tolerantly) and then statements until
/// a clause keyword of the enclosing compound statement or end-of-input.
pub fn parse_suite(parser: &mut Parser) -> Vec<Stmt> {
    let mut statements = vec![];
    parser.expect(TokenKind::Operator, Some(":"));
    let mut iterations = 0;
    while parser.current().is_some() && iterations < MAX_ITERATIONS {
        if let Some(token) = parser.current() {
            if token.kind == TokenKind::Keyword
                && matches!(token.text.as_str(), "elif" | "else" | "except" | "finally")
            {
                break;
            }
        }
        statements.push(parse_stmt(parser));
        iterations += 1;
    }
    if iterations >= MAX_ITERATIONS {
        parser.note_iteration_limit("suite");
    }
    statements
}

pub fn parse_async_stmt(parser: &mut Parser) -> Stmt {
    parser.expect(TokenKind::Keyword, Some("async"));
    if parser.at_keyword("def") {
        parse_function_def(parser)
    } else if parser.at_keyword("with") {
        parse_with_stmt(parser)
    } else if parser.at_keyword("for") {
        parse_for_stmt(parser)
    } else {
        Stmt::AsyncStmt
    }
}

pub fn parse_if_stmt(parser: &mut Parser) -> Stmt {
    parser.expect(TokenKind::Keyword, Some("if"));
    let condition = parse_expression(parser);
    parser.expect(TokenKind::Operator, Some(":"));
    let body = parse_suite(parser);
    let mut elif_clauses = vec![];
    while parser.at_keyword("elif") {
        parser.expect(TokenKind::Keyword, Some("elif"));
        let elif_condition = parse_expression(parser);
        parser.expect(TokenKind::Operator, Some(":"));
        let elif_body = parse_suite(parser);
        elif_clauses.push((elif_condition, elif_body));
    }
    let else_body = if parser.at_keyword("else") {
        parser.expect(TokenKind::Keyword, Some("else"));
        parser.expect(TokenKind::Operator, Some(":"));
        Some(parse_suite(parser))
    } else {
        None
    };
    Stmt::If {
        condition,
        body,
        elif_clauses,
        else_body,
    }
}

pub fn parse_for_stmt(parser: &mut Parser) -> Stmt {
    let mut is_async = false;
    if parser.at_keyword("async") {
        parser.expect(TokenKind::Keyword, Some("async"));
        is_async = true;
    }
    parser.expect(TokenKind::Keyword, Some("for"));
    let target = parser.identifier_or_empty();
    parser.expect(TokenKind::Keyword, Some("in"));
    let iterable = parse_expression(parser);
    parser.expect(TokenKind::Operator, Some(":"));
    let body = parse_suite(parser);
    Stmt::For {
        target,
        iterable,
        body,
        is_async,
    }
}

pub fn parse_while_stmt(parser: &mut Parser) -> Stmt {
    parser.expect(TokenKind::Keyword, Some("while"));
    let condition = parse_expression(parser);
    parser.expect(TokenKind::Operator, Some(":"));
    let body = parse_suite(parser);
    Stmt::While { condition, body }
}

pub fn parse_try_stmt(parser: &mut Parser) -> Stmt {
    parser.expect(TokenKind::Keyword, Some("try"));
    parser.expect(TokenKind::Operator, Some(":"));
    let body = parse_suite(parser);
    let mut handlers = vec![];
    while parser.at_keyword("except") {
        parser.expect(TokenKind::Keyword, Some("except"));
        parser.expect(TokenKind::Operator, Some(":"));
        handlers.push(parse_suite(parser));
    }
    let finally_body = if parser.at_keyword("finally") {
        parser.expect(TokenKind::Keyword, Some("finally"));
        parser.expect(TokenKind::Operator, Some(":"));
        Some(parse_suite(parser))
    } else {
        None
    };
    Stmt::Try {
        body,
        handlers,
        finally_body,
    }
}

pub fn parse_class_def(parser: &mut Parser) -> Stmt {
    parser.expect(TokenKind::Keyword, Some("class"));
    let name = parser.identifier_or_empty();
    let mut bases = vec![];
    if parser.at_operator("(") {
        parser.expect(TokenKind::Operator, Some("("));
        if parser.at_kind(TokenKind::Identifier) {
            bases.push(parser.identifier_or_empty());
            let mut iterations = 0;
            while parser.at_operator(",") && iterations < MAX_ITERATIONS {
                parser.expect(TokenKind::Operator, Some(","));
                if parser.at_kind(TokenKind::Identifier) {
                    bases.push(parser.identifier_or_empty());
                }
                iterations += 1;
            }
            if iterations >= MAX_ITERATIONS {
                parser.note_iteration_limit("class bases");
            }
        }
        parser.expect(TokenKind::Operator, Some(")"));
    }
    parser.expect(TokenKind::Operator, Some(":"));
    let body = parse_suite(parser);
    Stmt::ClassDef { name, bases, body }
}

pub fn parse_import_stmt(parser: &mut Parser) -> Stmt {
    parser.expect(TokenKind::Keyword, Some("import"));
    let names = parse_name_list(parser);
    Stmt::Import { names }
}

pub fn parse_from_import_stmt(parser: &mut Parser) -> Stmt {
    parser.expect(TokenKind::Keyword, Some("from"));
    let module = parser.identifier_or_empty();
    parser.expect(TokenKind::Keyword, Some("import"));
    let names = parse_name_list(parser);
    Stmt::FromImport { module, names }
}

fn parse_name_list(parser: &mut Parser) -> Vec<String> {
    let mut names = vec![];
    if parser.at_kind(TokenKind::Identifier) {
        names.push(parser.identifier_or_empty());
        let mut iterations = 0;
        while parser.at_operator(",") && iterations < MAX_ITERATIONS {
            parser.expect(TokenKind::Operator, Some(","));
            if parser.at_kind(TokenKind::Identifier) {
                names.push(parser.identifier_or_empty());
            }
            iterations += 1;
        }
        if iterations >= MAX_ITERATIONS {
            parser.note_iteration_limit("import names");
        }
    }
    names
}

pub fn parse_with_stmt(parser: &mut Parser) -> Stmt {
    let mut is_async = false;
    if parser.at_keyword("async") {
        parser.expect(TokenKind::Keyword, Some("async"));
        is_async = true;
    }
    parser.expect(TokenKind::Keyword, Some("with"));
    let context = parse_expression(parser);
    let binding = if parser.at_keyword("as") {
        parser.expect(TokenKind::Keyword, Some("as"));
        Some(parser.identifier_or_empty())
    } else {
        None
    };
    parser.expect(TokenKind::Operator, Some(":"));
    let body = parse_suite(parser);
    Stmt::With {
        context,
        binding,
        body,
        is_async,
    }
}

pub fn parse_match_stmt(parser: &mut Parser) -> Stmt {
    parser.expect(TokenKind::Keyword, Some("match"));
    let subject = parse_expression(parser);
    parser.expect(TokenKind::Operator, Some(":"));
    let mut arms = vec![];
    let mut iterations = 0;
    while parser.at_keyword("case") && iterations < MAX_ITERATIONS {
        parser.expect(TokenKind::Keyword, Some("case"));
        let pattern = parse_pattern(parser);
        parser.expect(TokenKind::Operator, Some(":"));
        let body = parse_suite(parser);
        arms.push(MatchArm { pattern, body });
        iterations += 1;
    }
    if iterations >= MAX_ITERATIONS {
        parser.note_iteration_limit("match arms");
    }
    Stmt::Match { subject, arms }
}

pub fn parse_pattern(parser: &mut Parser) -> Pattern {
    let (kind, text) = match parser.current() {
        Some(token) => (token.kind, token.text.clone()),
        None => return Pattern::Wildcard,
    };
    match kind {
        TokenKind::Number | TokenKind::String | TokenKind::FString | TokenKind::Literal => {
            parser.advance();
            Pattern::Literal(text)
        }
        TokenKind::Operator if text == "[" => {
            parser.expect(TokenKind::Operator, Some("["));
            let patterns = parse_pattern_list(parser);
            parser.expect(TokenKind::Operator, Some("]"));
            Pattern::List(patterns)
        }
        TokenKind::Operator if text == "{" => {
            parser.expect(TokenKind::Operator, Some("{"));
            let items = parse_dict_pattern_list(parser);
            parser.expect(TokenKind::Operator, Some("}"));
            Pattern::Dict(items)
        }
        TokenKind::Identifier => {
            parser.expect(TokenKind::Identifier, None);
            Pattern::Capture(text)
        }
        _ => Pattern::Wildcard,
    }
}

fn parse_pattern_list(parser: &mut Parser) -> Vec<Pattern> {
    let mut patterns = vec![];
    let mut iterations = 0;
    while iterations < MAX_ITERATIONS {
        let stop = match parser.current() {
            None => true,
            Some(token) => token.is_operator("]"),
        };
        if stop {
            break;
        }
        patterns.push(parse_pattern(parser));
        if parser.at_operator(",") {
            parser.expect(TokenKind::Operator, Some(","));
        } else {
            break;
        }
        iterations += 1;
    }
    if iterations >= MAX_ITERATIONS {
        parser.note_iteration_limit("pattern list");
    }
    patterns
}

fn parse_dict_pattern_list(parser: &mut Parser) -> Vec<(Pattern, Pattern)> {
    let mut items = vec![];
    let mut iterations = 0;
    while iterations < MAX_ITERATIONS {
        let stop = match parser.current() {
            None => true,
            Some(token) => token.is_operator("}"),
        };
        if stop {
            break;
        }
        let key = parse_pattern(parser);
        parser.expect(TokenKind::Operator, Some(":"));
        let value = parse_pattern(parser);
        items.push((key, value));
        if parser.at_operator(",") {
            parser.expect(TokenKind::Operator, Some(","));
        } else {
            break;
        }
        iterations += 1;
    }
    if iterations >= MAX_ITERATIONS {
        parser.note_iteration_limit("dict pattern list");
    }
    items
}

pub fn parse_control_stmt(parser: &mut Parser) -> Stmt {
    let word = parser.current().map(|t| t.text.clone()).unwrap_or_default();
    parser.expect(TokenKind::Keyword, Some(word.as_str()));
    match word.as_str() {
        "return" | "yield" => {
            let has_value = parser
                .current()
                .map_or(false, |t| t.kind != TokenKind::Operator);
            let value = if has_value {
                Some(parse_expression(parser))
            } else {
                None
            };
            if word == "return" {
                Stmt::Return(value)
            } else {
                Stmt::Yield(value)
            }
        }
        "raise" => Stmt::Raise(parse_expression(parser)),
        "break" => Stmt::Break,
        "continue" => Stmt::Continue,
        _ => Stmt::Pass,
    }
}

pub fn parse_global_stmt(parser: &mut Parser) -> Stmt {
    parser.expect(TokenKind::Keyword, Some("global"));
    Stmt::Global(parse_binding_list(parser, "global names"))
}

pub fn parse_nonlocal_stmt(parser: &mut Parser) -> Stmt {
    parser.expect(TokenKind::Keyword, Some("nonlocal"));
    Stmt::Nonlocal(parse_binding_list(parser, "nonlocal names"))
}

fn parse_binding_list(parser: &mut Parser, context: &'static str) -> Vec<String> {
    let mut names = vec![];
    let mut iterations = 0;
    while parser.at_kind(TokenKind::Identifier) && iterations < MAX_ITERATIONS {
        names.push(parser.identifier_or_empty());
        if parser.at_operator(",") {
            parser.expect(TokenKind::Operator, Some(","));
        } else {
            break;
        }
        iterations += 1;
    }
    if iterations >= MAX_ITERATIONS {
        parser.note_iteration_limit(context);
    }
    names
}

pub fn parse_assert_stmt(parser: &mut Parser) -> Stmt {
    parser.expect(TokenKind::Keyword, Some("assert"));
    let condition = parse_expression(parser);
    let message = if parser.at_operator(",") {
        parser.expect(TokenKind::Operator, Some(","));
        Some(parse_expression(parser))
    } else {
        None
    };
    Stmt::Assert { condition, message }
}

pub fn parse_del_stmt(parser: &mut Parser) -> Stmt {
    parser.expect(TokenKind::Keyword, Some("del"));
    Stmt::Del(parse_target_list(parser))
}

pub fn parse_assignment(parser: &mut Parser) -> Stmt {
    let targets = parse_target_list(parser);
    if parser.at_operator("=") || parser.at_operator(":=") {
        let op = parser.current().map(|t| t.text.clone()).unwrap_or_default();
        parser.expect(TokenKind::Operator, Some(op.as_str()));
        let values = parse_expression_list(parser);
        Stmt::Assignment {
            targets,
            op: Some(op),
            values,
        }
    } else {
        Stmt::Assignment {
            targets,
            op: None,
            values: vec![],
        }
    }
}

/// Comma-separated identifiers; a bracketed or parenthesized group
/// re-enters target-list parsing and its contents replace whatever was
/// gathered before the group.
pub fn parse_target_list(parser: &mut Parser) -> Vec<String> {
    let mut targets = vec![];
    let mut iterations = 0;
    while parser.at_kind(TokenKind::Identifier) && iterations < MAX_ITERATIONS {
        targets.push(parser.identifier_or_empty());
        if parser.at_operator(",") {
            parser.expect(TokenKind::Operator, Some(","));
        } else {
            break;
        }
        iterations += 1;
    }
    if iterations >= MAX_ITERATIONS {
        parser.note_iteration_limit("target list");
    }
    if parser.at_operator("(") || parser.at_operator("[") {
        let delim = parser.current().map(|t| t.text.clone()).unwrap_or_default();
        parser.expect(TokenKind::Operator, Some(delim.as_str()));
        targets = parse_target_list(parser);
        let closer = if delim == "[" { "]" } else { ")" };
        parser.expect(TokenKind::Operator, Some(closer));
    }
    targets
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Stmt {
    Stmt::Expr(parse_expression(parser))
}
