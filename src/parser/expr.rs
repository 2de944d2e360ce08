//! Expression grammar.
//!
//! A fixed precedence chain from loosest to tightest: conditional
//! expression, `or`, `and`, `not`, comparison, `|`, `^`, `&`, shifts,
//! additive, multiplicative, unary, `**`, primary. Attribute access binds
//! loosest of all: the `.ident` fold runs at the outermost entry point, so
//! `a + b.c` parses as `(a + b).c`.

use crate::{
    ast::expressions::{Comprehension, DictComprehension, Expr},
    lexer::{lexer::tokenize, tokens::TokenKind},
};

use super::{
    parser::{Parser, MAX_ITERATIONS},
    stmt::parse_param_list,
};

pub fn parse_expression(parser: &mut Parser) -> Expr {
    let mut expr = parse_if_expr(parser);
    while parser.at_operator(".") {
        parser.expect(TokenKind::Operator, Some("."));
        if parser.at_kind(TokenKind::Identifier) {
            let attr = parser.identifier_or_empty();
            expr = Expr::Attribute {
                value: Box::new(expr),
                attr,
            };
        } else {
            break;
        }
    }
    expr
}

fn parse_if_expr(parser: &mut Parser) -> Expr {
    let expr = parse_logical_or(parser);
    if parser.at_keyword("if") {
        parser.expect(TokenKind::Keyword, Some("if"));
        let condition = parse_logical_or(parser);
        if parser.at_keyword("else") {
            parser.expect(TokenKind::Keyword, Some("else"));
            let else_body = parse_if_expr(parser);
            return Expr::IfExpr {
                body: Box::new(expr),
                condition: Box::new(condition),
                else_body: Box::new(else_body),
            };
        }
        // `if` with no `else`: the condition parses but the node is not built
    }
    expr
}

fn parse_logical_or(parser: &mut Parser) -> Expr {
    let mut expr = parse_logical_and(parser);
    let mut iterations = 0;
    while parser.at_keyword("or") && iterations < MAX_ITERATIONS {
        parser.expect(TokenKind::Keyword, Some("or"));
        let right = parse_logical_and(parser);
        expr = Expr::LogicalOr(Box::new(expr), Box::new(right));
        iterations += 1;
    }
    expr
}

fn parse_logical_and(parser: &mut Parser) -> Expr {
    let mut expr = parse_not_expr(parser);
    let mut iterations = 0;
    while parser.at_keyword("and") && iterations < MAX_ITERATIONS {
        parser.expect(TokenKind::Keyword, Some("and"));
        let right = parse_not_expr(parser);
        expr = Expr::LogicalAnd(Box::new(expr), Box::new(right));
        iterations += 1;
    }
    expr
}

fn parse_not_expr(parser: &mut Parser) -> Expr {
    if parser.at_keyword("not") {
        parser.expect(TokenKind::Keyword, Some("not"));
        return Expr::Not(Box::new(parse_not_expr(parser)));
    }
    parse_comparison(parser)
}

/// Left-folding comparison chain. `in not` and `is not` are recognized by
/// one token of lookahead; `!=` never reaches here in practice because `!`
/// does not lex as an operator.
fn parse_comparison(parser: &mut Parser) -> Expr {
    let mut expr = parse_bitwise_or(parser);
    let mut iterations = 0;
    while iterations < MAX_ITERATIONS {
        if parser.at_keyword("in") {
            let negated = parser.peek().map_or(false, |t| t.is_keyword("not"));
            parser.expect(TokenKind::Keyword, Some("in"));
            if negated {
                parser.expect(TokenKind::Keyword, Some("not"));
                let right = parse_bitwise_or(parser);
                expr = Expr::NotIn(Box::new(expr), Box::new(right));
            } else {
                let right = parse_bitwise_or(parser);
                expr = Expr::In(Box::new(expr), Box::new(right));
            }
        } else if parser.at_keyword("is") {
            let negated = parser.peek().map_or(false, |t| t.is_keyword("not"));
            parser.expect(TokenKind::Keyword, Some("is"));
            if negated {
                parser.expect(TokenKind::Keyword, Some("not"));
                let right = parse_bitwise_or(parser);
                expr = Expr::IsNot(Box::new(expr), Box::new(right));
            } else {
                let right = parse_bitwise_or(parser);
                expr = Expr::Is(Box::new(expr), Box::new(right));
            }
        } else {
            let op = match parser.current() {
                Some(t)
                    if t.kind == TokenKind::Operator
                        && matches!(t.text.as_str(), "<" | ">" | "==" | ">=" | "<=" | "!=") =>
                {
                    t.text.clone()
                }
                _ => break,
            };
            parser.advance();
            let right = parse_bitwise_or(parser);
            expr = Expr::Comparison {
                left: Box::new(expr),
                op,
                right: Box::new(right),
            };
        }
        iterations += 1;
    }
    expr
}

fn parse_bitwise_or(parser: &mut Parser) -> Expr {
    let mut expr = parse_bitwise_xor(parser);
    let mut iterations = 0;
    while parser.at_operator("|") && iterations < MAX_ITERATIONS {
        parser.expect(TokenKind::Operator, Some("|"));
        let right = parse_bitwise_xor(parser);
        expr = Expr::BitwiseOr(Box::new(expr), Box::new(right));
        iterations += 1;
    }
    expr
}

fn parse_bitwise_xor(parser: &mut Parser) -> Expr {
    let mut expr = parse_bitwise_and(parser);
    let mut iterations = 0;
    while parser.at_operator("^") && iterations < MAX_ITERATIONS {
        parser.expect(TokenKind::Operator, Some("^"));
        let right = parse_bitwise_and(parser);
        expr = Expr::BitwiseXor(Box::new(expr), Box::new(right));
        iterations += 1;
    }
    expr
}

fn parse_bitwise_and(parser: &mut Parser) -> Expr {
    let mut expr = parse_shift(parser);
    let mut iterations = 0;
    while parser.at_operator("&") && iterations < MAX_ITERATIONS {
        parser.expect(TokenKind::Operator, Some("&"));
        let right = parse_shift(parser);
        expr = Expr::BitwiseAnd(Box::new(expr), Box::new(right));
        iterations += 1;
    }
    expr
}

fn parse_shift(parser: &mut Parser) -> Expr {
    let mut expr = parse_arith(parser);
    let mut iterations = 0;
    while iterations < MAX_ITERATIONS {
        let op = match parser.current() {
            Some(t) if t.is_operator("<<") || t.is_operator(">>") => t.text.clone(),
            _ => break,
        };
        parser.expect(TokenKind::Operator, Some(op.as_str()));
        let right = parse_arith(parser);
        expr = Expr::Shift {
            left: Box::new(expr),
            op,
            right: Box::new(right),
        };
        iterations += 1;
    }
    expr
}

fn parse_arith(parser: &mut Parser) -> Expr {
    let mut expr = parse_term(parser);
    let mut iterations = 0;
    while iterations < MAX_ITERATIONS {
        let op = match parser.current() {
            Some(t) if t.is_operator("+") || t.is_operator("-") => t.text.clone(),
            _ => break,
        };
        parser.expect(TokenKind::Operator, Some(op.as_str()));
        let right = parse_term(parser);
        expr = Expr::Arith {
            left: Box::new(expr),
            op,
            right: Box::new(right),
        };
        iterations += 1;
    }
    expr
}

fn parse_term(parser: &mut Parser) -> Expr {
    let mut expr = parse_factor(parser);
    let mut iterations = 0;
    while iterations < MAX_ITERATIONS {
        let op = match parser.current() {
            Some(t)
                if t.kind == TokenKind::Operator
                    && matches!(t.text.as_str(), "*" | "/" | "//" | "%") =>
            {
                t.text.clone()
            }
            _ => break,
        };
        parser.expect(TokenKind::Operator, Some(op.as_str()));
        let right = parse_factor(parser);
        expr = Expr::Term {
            left: Box::new(expr),
            op,
            right: Box::new(right),
        };
        iterations += 1;
    }
    expr
}

fn parse_factor(parser: &mut Parser) -> Expr {
    let op = match parser.current() {
        Some(t)
            if t.kind == TokenKind::Operator && matches!(t.text.as_str(), "+" | "-" | "~") =>
        {
            t.text.clone()
        }
        _ => return parse_power(parser),
    };
    parser.expect(TokenKind::Operator, Some(op.as_str()));
    let operand = parse_factor(parser);
    Expr::Unary {
        op,
        operand: Box::new(operand),
    }
}

fn parse_power(parser: &mut Parser) -> Expr {
    let expr = parse_primary(parser);
    if parser.at_operator("**") {
        parser.expect(TokenKind::Operator, Some("**"));
        let right = parse_factor(parser);
        return Expr::Power(Box::new(expr), Box::new(right));
    }
    expr
}

pub fn parse_primary(parser: &mut Parser) -> Expr {
    if parser.at_keyword("lambda") {
        return parse_lambda(parser);
    }
    let (kind, text) = match parser.current() {
        Some(token) => (token.kind, token.text.clone()),
        None => return Expr::Empty,
    };
    match kind {
        TokenKind::Number | TokenKind::String | TokenKind::FString | TokenKind::Literal => {
            parser.advance();
            Expr::Literal(text)
        }
        TokenKind::FStringExpr => parse_fstring_expr(parser),
        TokenKind::Operator if text == "[" => {
            parser.expect(TokenKind::Operator, Some("["));
            if parser.peek().map_or(false, |t| t.is_keyword("for")) {
                let comp = parse_comprehension(parser);
                parser.expect(TokenKind::Operator, Some("]"));
                Expr::ListComp(Box::new(comp))
            } else {
                let exprs = parse_expression_list(parser);
                parser.expect(TokenKind::Operator, Some("]"));
                Expr::List(exprs)
            }
        }
        TokenKind::Operator if text == "{" => {
            parser.expect(TokenKind::Operator, Some("{"));
            if parser.peek().map_or(false, |t| t.is_operator(":")) {
                let items = parse_dict_item_list(parser);
                parser.expect(TokenKind::Operator, Some("}"));
                Expr::Dict(items)
            } else if parser.peek().map_or(false, |t| t.is_keyword("for")) {
                let comp = parse_dict_comprehension(parser);
                parser.expect(TokenKind::Operator, Some("}"));
                Expr::DictComp(Box::new(comp))
            } else {
                let exprs = parse_expression_list(parser);
                parser.expect(TokenKind::Operator, Some("}"));
                Expr::Set(exprs)
            }
        }
        TokenKind::Operator if text == "(" => {
            parser.expect(TokenKind::Operator, Some("("));
            if parser.at_operator(")") {
                parser.expect(TokenKind::Operator, Some(")"));
                return Expr::Tuple(vec![]);
            }
            let expr = parse_expression(parser);
            if parser.at_operator(",") {
                parser.expect(TokenKind::Operator, Some(","));
                let mut exprs = vec![expr];
                exprs.extend(parse_expression_list(parser));
                parser.expect(TokenKind::Operator, Some(")"));
                return Expr::Tuple(exprs);
            }
            parser.expect(TokenKind::Operator, Some(")"));
            expr
        }
        TokenKind::Identifier => {
            parser.advance();
            if parser.at_operator("(") {
                parser.expect(TokenKind::Operator, Some("("));
                let args = parse_expression_list(parser);
                parser.expect(TokenKind::Operator, Some(")"));
                Expr::Call { callee: text, args }
            } else {
                Expr::Identifier(text)
            }
        }
        TokenKind::Error => {
            parser.advance();
            Expr::Error(text)
        }
        _ => Expr::Empty,
    }
}

fn parse_lambda(parser: &mut Parser) -> Expr {
    parser.expect(TokenKind::Keyword, Some("lambda"));
    let params = parse_param_list(parser);
    parser.expect(TokenKind::Operator, Some(":"));
    let body = parse_expression(parser);
    Expr::Lambda {
        params,
        body: Box::new(body),
    }
}

/// Strips the braces off an interpolation token and runs a fresh tokenize
/// and parse pass over the inner text. Diagnostics from the nested pass
/// fold into the enclosing parser.
fn parse_fstring_expr(parser: &mut Parser) -> Expr {
    let text = parser.current().map(|t| t.text.clone()).unwrap_or_default();
    parser.advance();
    let inner = if text.len() >= 2 {
        &text[1..text.len() - 1]
    } else {
        ""
    };
    let tokens = tokenize(inner);
    let mut sub = Parser::new(tokens);
    let expr = parse_expression(&mut sub);
    let nested = sub.take_diagnostics();
    parser.extend_diagnostics(nested);
    Expr::FStringExpr(Box::new(expr))
}

fn parse_comprehension(parser: &mut Parser) -> Comprehension {
    let element = parse_expression(parser);
    parser.expect(TokenKind::Keyword, Some("for"));
    let var = parser.identifier_or_empty();
    parser.expect(TokenKind::Keyword, Some("in"));
    let iterable = parse_expression(parser);
    let conditions = parse_guard_list(parser);
    Comprehension {
        element,
        var,
        iterable,
        conditions,
    }
}

fn parse_dict_comprehension(parser: &mut Parser) -> DictComprehension {
    let key = parse_expression(parser);
    parser.expect(TokenKind::Operator, Some(":"));
    let value = parse_expression(parser);
    parser.expect(TokenKind::Keyword, Some("for"));
    let var = parser.identifier_or_empty();
    parser.expect(TokenKind::Keyword, Some("in"));
    let iterable = parse_expression(parser);
    let conditions = parse_guard_list(parser);
    DictComprehension {
        key,
        value,
        var,
        iterable,
        conditions,
    }
}

fn parse_guard_list(parser: &mut Parser) -> Vec<Expr> {
    let mut conditions = vec![];
    let mut iterations = 0;
    while parser.at_keyword("if") && iterations < MAX_ITERATIONS {
        parser.expect(TokenKind::Keyword, Some("if"));
        conditions.push(parse_expression(parser));
        iterations += 1;
    }
    if iterations >= MAX_ITERATIONS {
        parser.note_iteration_limit("comprehension guards");
    }
    conditions
}

/// Comma-separated expressions, stopping at a closing delimiter or `:`.
/// A missing comma after an element also ends the list.
pub fn parse_expression_list(parser: &mut Parser) -> Vec<Expr> {
    let mut exprs = vec![];
    let mut iterations = 0;
    while iterations < MAX_ITERATIONS {
        let stop = match parser.current() {
            None => true,
            Some(t) => {
                t.kind == TokenKind::Operator
                    && matches!(t.text.as_str(), "]" | ")" | "}" | ":")
            }
        };
        if stop {
            break;
        }
        exprs.push(parse_expression(parser));
        if parser.at_operator(",") {
            parser.expect(TokenKind::Operator, Some(","));
        } else {
            break;
        }
        iterations += 1;
    }
    if iterations >= MAX_ITERATIONS {
        parser.note_iteration_limit("expression list");
    }
    exprs
}

fn parse_dict_item_list(parser: &mut Parser) -> Vec<(Expr, Expr)> {
    let mut items = vec![];
    let mut iterations = 0;
    while iterations < MAX_ITERATIONS {
        let stop = match parser.current() {
            None => true,
            Some(t) => t.is_operator("}"),
        };
        if stop {
            break;
        }
        let key = parse_expression(parser);
        parser.expect(TokenKind::Operator, Some(":"));
        let value = parse_expression(parser);
        items.push((key, value));
        if parser.at_operator(",") {
            parser.expect(TokenKind::Operator, Some(","));
        } else {
            break;
        }
        iterations += 1;
    }
    if iterations >= MAX_ITERATIONS {
        parser.note_iteration_limit("dict items");
    }
    items
}
