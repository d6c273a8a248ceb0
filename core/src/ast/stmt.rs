//! file: core/src/ast/stmt.rs
//! description: parsing helpers for statements.
//!
//! Turns `statement` pairs from the pest-generated `RulesParser` into
//! `AstNode` structures. Every node carries the `Location`/`Span` of the
//! rule it came from so later passes can point back into the source.
//!
use pest::iterators::Pair;

use crate::{
    ast::{AstNode, AstNodeKind, DeclarationKind, Rule, SyntaxError, rules},
    script,
};

use super::rules::ParseResult;

/// Parse a single `statement` rule into an `AstNode`.
///
/// # Errors
///
/// Returns a `SyntaxError` when the inner rule is not one of the statement
/// alternatives, or when a nested expression fails to parse.
pub(crate) fn parse_statement_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let next_rule = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    match next_rule.as_rule() {
        Rule::function_declaration => parse_function_declaration_rule(next_rule, script),
        Rule::variable_declaration => parse_variable_declaration_rule(next_rule, script),
        Rule::if_statement => parse_if_statement_rule(next_rule, script),
        Rule::while_statement => parse_while_statement_rule(next_rule, script),
        Rule::return_statement => parse_return_statement_rule(next_rule, script),
        Rule::block_statement => parse_block_rule(next_rule, script),
        Rule::expression_statement => {
            let mut inner = next_rule.into_inner();
            let expr_pair = rules::fetch_next_pair(&mut inner, &location, &span)?;
            let expression = super::expr::parse_expression_rule(expr_pair, script)?;
            Ok(AstNode::new(
                AstNodeKind::ExpressionStatement { expression: Box::new(expression) },
                location,
                span,
            ))
        }
        Rule::empty_statement => Ok(AstNode::new(AstNodeKind::EmptyStatement, location, span)),
        Rule::break_statement => Ok(AstNode::new(AstNodeKind::BreakStatement, location, span)),
        Rule::continue_statement => Ok(AstNode::new(AstNodeKind::ContinueStatement, location, span)),
        _ => Err(rules::unexpected_rule(&next_rule, "statement", "elpian.stmt.parse_statement_rule", script)),
    }
}

pub(crate) fn parse_block_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    let (inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let mut body = Vec::new();

    for stmt_pair in inner_pairs {
        body.push(parse_statement_rule(stmt_pair, script)?);
    }

    Ok(AstNode::new(AstNodeKind::BlockStatement { body }, location, span))
}

fn parse_function_declaration_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    rules::expect_keyword(&mut inner_pairs, Rule::kw_function, &location, &span)?;
    let name_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    let params_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    let body_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;

    let params = params_pair
        .into_inner()
        .map(|p| p.as_str().to_string())
        .collect();

    Ok(AstNode::new(
        AstNodeKind::FunctionDeclaration {
            name: name_pair.as_str().to_string(),
            params,
            body: Box::new(parse_block_rule(body_pair, script)?),
        },
        location,
        span,
    ))
}

fn parse_variable_declaration_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let kind_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;

    let kind = match kind_pair.as_str() {
        "let" => DeclarationKind::Let,
        "const" => DeclarationKind::Const,
        "var" => DeclarationKind::Var,
        other => {
            return Err(SyntaxError::with(
                format!("Unknown declaration keyword `{}`.", other),
                "elpian.stmt.parse_variable_declaration_rule".into(),
                location,
                span,
            )
            .boxed());
        }
    };
    if kind != DeclarationKind::Var {
        rules::require_es2015(&format!("'{}' declaration", kind_pair.as_str()), script, &location, &span)?;
    }

    let mut declarations = Vec::new();
    for declarator_pair in inner_pairs {
        declarations.push(parse_variable_declarator_rule(declarator_pair, script)?);
    }

    Ok(AstNode::new(
        AstNodeKind::VariableDeclaration { kind, declarations },
        location,
        span,
    ))
}

fn parse_variable_declarator_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let id_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    let id = super::expr::parse_identifier_rule(id_pair, script)?;

    let init = match inner_pairs.next() {
        Some(expr_pair) => Some(Box::new(super::expr::parse_expression_rule(expr_pair, script)?)),
        None => None,
    };

    Ok(AstNode::new(
        AstNodeKind::VariableDeclarator { id: Box::new(id), init },
        location,
        span,
    ))
}

fn parse_if_statement_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    rules::expect_keyword(&mut inner_pairs, Rule::kw_if, &location, &span)?;
    let test_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    let consequent_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;

    let test = super::expr::parse_expression_rule(test_pair, script)?;
    let consequent = parse_statement_rule(consequent_pair, script)?;

    // Optional `else` branch: keyword token followed by a statement.
    let alternate = if inner_pairs.peek().is_some() {
        rules::expect_keyword(&mut inner_pairs, Rule::kw_else, &location, &span)?;
        let alternate_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
        Some(Box::new(parse_statement_rule(alternate_pair, script)?))
    } else {
        None
    };

    Ok(AstNode::new(
        AstNodeKind::IfStatement {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate,
        },
        location,
        span,
    ))
}

fn parse_while_statement_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    rules::expect_keyword(&mut inner_pairs, Rule::kw_while, &location, &span)?;
    let test_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    let body_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;

    let test = super::expr::parse_expression_rule(test_pair, script)?;
    let body = parse_statement_rule(body_pair, script)?;

    Ok(AstNode::new(
        AstNodeKind::WhileStatement { test: Box::new(test), body: Box::new(body) },
        location,
        span,
    ))
}

fn parse_return_statement_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    rules::expect_keyword(&mut inner_pairs, Rule::kw_return, &location, &span)?;

    let argument = match inner_pairs.next() {
        Some(expr_pair) => Some(Box::new(super::expr::parse_expression_rule(expr_pair, script)?)),
        None => None,
    };

    Ok(AstNode::new(AstNodeKind::ReturnStatement { argument }, location, span))
}
