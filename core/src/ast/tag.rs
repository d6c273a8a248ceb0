//! Parsing for inline tag literals such as `<button label="Ok" onPress={save}/>`.
//!
//! Text children are recorded exactly as written, whitespace included;
//! trimming happens during lowering.

use pest::iterators::Pair;

use crate::{
    ast::{AstNode, AstNodeKind, LiteralValue, Rule, SyntaxError, TagAttribute, rules},
    script,
};

use super::rules::ParseResult;

pub(crate) fn parse_tag_element_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let opening = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    let self_closing = opening.as_rule() == Rule::tag_self_closing;

    let (name, attributes) = parse_opening_rule(opening, script)?;

    let mut children = Vec::new();
    if !self_closing {
        let mut closed = false;
        for child in inner_pairs {
            match child.as_rule() {
                Rule::tag_close => {
                    check_closing_name(&name, child, script)?;
                    closed = true;
                }
                _ => children.push(parse_tag_child_rule(child, script)?),
            }
        }
        if !closed {
            return Err(SyntaxError::with(
                format!("Unterminated tag <{}>.", name),
                "elpian.tag.parse_tag_element_rule".into(),
                location,
                span,
            )
            .boxed());
        }
    }

    Ok(AstNode::new(
        AstNodeKind::TagElement { name, attributes, children },
        location,
        span,
    ))
}

fn parse_opening_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<(String, Vec<TagAttribute>)> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let name_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;

    let attributes = inner_pairs
        .map(|attr_pair| parse_attribute_rule(attr_pair, script))
        .collect::<ParseResult<Vec<TagAttribute>>>()?;

    Ok((name_pair.as_str().to_string(), attributes))
}

fn parse_attribute_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<TagAttribute> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let name_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;

    let value = match inner_pairs.next() {
        None => None,
        Some(value_pair) => {
            let (mut value_inner, value_location, value_span) = rules::get_data_from_rule(&value_pair, script);
            let node_pair = rules::fetch_next_pair(&mut value_inner, &value_location, &value_span)?;
            let node = match node_pair.as_rule() {
                Rule::string => {
                    // Attribute strings are raw: backslashes stay literal.
                    let (mut string_inner, _, _) = rules::get_data_from_rule(&node_pair, script);
                    let text = rules::fetch_next_pair(&mut string_inner, &value_location, &value_span)?
                        .as_str()
                        .to_string();
                    AstNode::new(
                        AstNodeKind::Literal { value: LiteralValue::String(text) },
                        value_location,
                        value_span,
                    )
                }
                Rule::tag_expression_container => parse_expression_container_rule(node_pair, script)?,
                Rule::tag_element => parse_tag_element_rule(node_pair, script)?,
                _ => {
                    return Err(rules::unexpected_rule(&node_pair, "attribute value", "elpian.tag.parse_attribute_rule", script));
                }
            };
            Some(node)
        }
    };

    Ok(TagAttribute { name: name_pair.as_str().to_string(), value })
}

fn parse_tag_child_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    match pair.as_rule() {
        Rule::tag_element => parse_tag_element_rule(pair, script),
        Rule::tag_expression_container => parse_expression_container_rule(pair, script),
        Rule::tag_text => {
            let (_, location, span) = rules::get_data_from_rule(&pair, script);
            Ok(AstNode::new(
                AstNodeKind::TagText { value: pair.as_str().to_string() },
                location,
                span,
            ))
        }
        _ => Err(rules::unexpected_rule(&pair, "tag child", "elpian.tag.parse_tag_child_rule", script)),
    }
}

fn parse_expression_container_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let expr_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    let expression = super::expr::parse_expression_rule(expr_pair, script)?;
    Ok(AstNode::new(
        AstNodeKind::TagExpressionContainer { expression: Box::new(expression) },
        location,
        span,
    ))
}

fn check_closing_name(name: &str, close_pair: Pair<Rule>, script: &script::Script) -> ParseResult<()> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&close_pair, script);
    let close_name = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    if close_name.as_str() == name {
        return Ok(());
    }
    Err(SyntaxError::with(
        format!(
            "Expected corresponding closing tag for <{}>, found </{}>.",
            name,
            close_name.as_str()
        ),
        "elpian.tag.check_closing_name".into(),
        location,
        span,
    )
    .boxed())
}
