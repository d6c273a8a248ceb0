use pest::iterators::Pair;

use crate::{
    ast::{
        AssignmentOperator, AstNode, AstNodeKind, BinaryOperator, LiteralValue, LogicalOperator,
        Property, PropertyKey, Rule, SyntaxError, UnaryOperator, UpdateOperator, rules,
    },
    location::{Location, Span},
    script,
};

use super::rules::ParseResult;

type OperandParser = fn(Pair<'_, Rule>, &script::Script) -> ParseResult<AstNode>;

pub(crate) fn parse_expression_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let first = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    match first.as_rule() {
        Rule::arrow_function => parse_arrow_function_rule(first, script),
        Rule::conditional => {
            let target = parse_conditional_rule(first, script)?;
            let Some(op_pair) = inner_pairs.next() else {
                return Ok(target);
            };
            let value_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;

            if !target.kind.is_assignment_target() {
                return Err(SyntaxError::with(
                    format!("Invalid assignment target: {}", target.kind),
                    "elpian.expr.parse_expression_rule".into(),
                    target.location.clone(),
                    target.span.clone(),
                )
                .boxed());
            }
            let operator = match AssignmentOperator::from_symbol(op_pair.as_str()) {
                Some(op) => op,
                None => {
                    return Err(SyntaxError::with(
                        format!("Invalid assignment operator `{}`.", op_pair.as_str()),
                        "elpian.expr.parse_expression_rule".into(),
                        location,
                        span,
                    )
                    .boxed());
                }
            };
            let value = parse_expression_rule(value_pair, script)?;

            Ok(AstNode::new(
                AstNodeKind::AssignmentExpression {
                    operator,
                    left: Box::new(target),
                    right: Box::new(value),
                },
                location,
                span,
            ))
        }
        _ => Err(rules::unexpected_rule(&first, "expression", "elpian.expr.parse_expression_rule", script)),
    }
}

fn parse_arrow_function_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    rules::require_es2015("Arrow function", script, &location, &span)?;

    let params_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    let body_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;

    let params = params_pair
        .into_inner()
        .map(|p| p.as_str().to_string())
        .collect();

    let mut body_inner = body_pair.into_inner();
    let body_node = rules::fetch_next_pair(&mut body_inner, &location, &span)?;
    let body = match body_node.as_rule() {
        Rule::block_statement => super::stmt::parse_block_rule(body_node, script)?,
        Rule::expression => parse_expression_rule(body_node, script)?,
        _ => {
            return Err(rules::unexpected_rule(
                &body_node,
                "arrow function body",
                "elpian.expr.parse_arrow_function_rule",
                script,
            ));
        }
    };

    Ok(AstNode::new(
        AstNodeKind::ArrowFunctionExpression { params, body: Box::new(body) },
        location,
        span,
    ))
}

fn parse_conditional_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let test_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    let test = parse_logical_or_rule(test_pair, script)?;

    let Some(consequent_pair) = inner_pairs.next() else {
        return Ok(test);
    };
    let alternate_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;

    Ok(AstNode::new(
        AstNodeKind::ConditionalExpression {
            test: Box::new(test),
            consequent: Box::new(parse_expression_rule(consequent_pair, script)?),
            alternate: Box::new(parse_expression_rule(alternate_pair, script)?),
        },
        location,
        span,
    ))
}

fn parse_logical_or_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    parse_left_associative_rule(pair, script, parse_logical_and_rule)
}

fn parse_logical_and_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    parse_left_associative_rule(pair, script, parse_equality_rule)
}

fn parse_equality_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    parse_left_associative_rule(pair, script, parse_relational_rule)
}

fn parse_relational_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    parse_left_associative_rule(pair, script, parse_additive_rule)
}

fn parse_additive_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    parse_left_associative_rule(pair, script, parse_multiplicative_rule)
}

fn parse_multiplicative_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    parse_left_associative_rule(pair, script, parse_unary_rule)
}

/// Fold `operand (op operand)*` into a left-leaning tree.
///
/// The binary node takes the operator token's position, so diagnostics
/// about an operator point at the operator itself.
fn parse_left_associative_rule(
    pair: Pair<Rule>,
    script: &script::Script,
    operand: OperandParser,
) -> ParseResult<AstNode> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);

    let left_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    let mut node = operand(left_pair, script)?;

    while let Some(op_pair) = inner_pairs.next() {
        let right_pair = match inner_pairs.next() {
            Some(rp) => rp,
            None => {
                return Err(SyntaxError::with(
                    format!("Missing right-hand operand for `{}`.", op_pair.as_str()),
                    "elpian.expr.parse_left_associative_rule".into(),
                    location.clone(),
                    span.clone(),
                )
                .boxed());
            }
        };
        let right = operand(right_pair, script)?;
        let op_location = rules::get_location_from_pair(&op_pair, script);
        let op_span = rules::get_span_from_pair(&op_pair, script);

        let kind = match op_pair.as_rule() {
            Rule::or_op | Rule::and_op => AstNodeKind::LogicalExpression {
                operator: if op_pair.as_rule() == Rule::or_op {
                    LogicalOperator::Or
                } else {
                    LogicalOperator::And
                },
                left: Box::new(node),
                right: Box::new(right),
            },
            _ => match BinaryOperator::from_symbol(op_pair.as_str()) {
                Some(operator) => AstNodeKind::BinaryExpression {
                    operator,
                    left: Box::new(node),
                    right: Box::new(right),
                },
                None => {
                    return Err(SyntaxError::with(
                        format!("Invalid binary operator `{}`.", op_pair.as_str()),
                        "elpian.expr.parse_left_associative_rule".into(),
                        op_location,
                        op_span,
                    )
                    .boxed());
                }
            },
        };
        node = AstNode::new(kind, op_location, op_span);
    }

    Ok(node)
}

fn parse_unary_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let next_rule = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    match next_rule.as_rule() {
        Rule::prefix_op => {
            let operand_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
            let argument = Box::new(parse_unary_rule(operand_pair, script)?);
            let kind = match next_rule.as_str() {
                "++" => AstNodeKind::UpdateExpression { operator: UpdateOperator::Increment, argument, prefix: true },
                "--" => AstNodeKind::UpdateExpression { operator: UpdateOperator::Decrement, argument, prefix: true },
                "!" => AstNodeKind::UnaryExpression { operator: UnaryOperator::Not, argument },
                "-" => AstNodeKind::UnaryExpression { operator: UnaryOperator::Minus, argument },
                "+" => AstNodeKind::UnaryExpression { operator: UnaryOperator::Plus, argument },
                other => {
                    return Err(SyntaxError::with(
                        format!("Invalid unary operator `{}`.", other),
                        "elpian.expr.parse_unary_rule".into(),
                        location,
                        span,
                    )
                    .boxed());
                }
            };
            Ok(AstNode::new(kind, location, span))
        }
        Rule::postfix => parse_postfix_rule(next_rule, script),
        _ => Err(rules::unexpected_rule(&next_rule, "unary expression", "elpian.expr.parse_unary_rule", script)),
    }
}

fn parse_postfix_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let primary_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    let mut node = parse_primary_rule(primary_pair, script)?;

    // Remaining pairs are calls, member accesses and a trailing `++`/`--`,
    // applied left to right.
    for op_pair in inner_pairs {
        let op_location = rules::get_location_from_pair(&op_pair, script);
        let op_span = rules::get_span_from_pair(&op_pair, script);
        let kind = match op_pair.as_rule() {
            Rule::call_arguments => {
                let arguments = op_pair
                    .into_inner()
                    .map(|arg_pair| parse_expression_rule(arg_pair, script))
                    .collect::<ParseResult<Vec<AstNode>>>()?;
                AstNodeKind::CallExpression { callee: Box::new(node), arguments }
            }
            Rule::member_access => {
                let mut op_inner = op_pair.into_inner();
                let name_pair = rules::fetch_next_pair(&mut op_inner, &op_location, &op_span)?;
                let property = parse_identifier_rule(name_pair, script)?;
                AstNodeKind::MemberExpression {
                    object: Box::new(node),
                    property: Box::new(property),
                    computed: false,
                }
            }
            Rule::index_access => {
                let mut op_inner = op_pair.into_inner();
                let index_pair = rules::fetch_next_pair(&mut op_inner, &op_location, &op_span)?;
                AstNodeKind::MemberExpression {
                    object: Box::new(node),
                    property: Box::new(parse_expression_rule(index_pair, script)?),
                    computed: true,
                }
            }
            Rule::update_op => AstNodeKind::UpdateExpression {
                operator: if op_pair.as_str() == "++" {
                    UpdateOperator::Increment
                } else {
                    UpdateOperator::Decrement
                },
                argument: Box::new(node),
                prefix: false,
            },
            _ => {
                return Err(rules::unexpected_rule(&op_pair, "postfix operator", "elpian.expr.parse_postfix_rule", script));
            }
        };
        node = AstNode::new(kind, op_location, op_span);
    }

    Ok(node)
}

fn parse_primary_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let next_rule = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    match next_rule.as_rule() {
        Rule::tag_element => super::tag::parse_tag_element_rule(next_rule, script),
        Rule::template_literal => parse_template_literal_rule(next_rule, script),
        Rule::number => {
            let value = parse_number(next_rule.as_str(), &location, &span)?;
            Ok(literal(LiteralValue::Number(value), location, span))
        }
        Rule::string => {
            let value = parse_string_rule(next_rule, script)?;
            Ok(literal(LiteralValue::String(value), location, span))
        }
        Rule::boolean => Ok(literal(LiteralValue::Boolean(next_rule.as_str() == "true"), location, span)),
        Rule::null => Ok(literal(LiteralValue::Null, location, span)),
        Rule::array_literal => {
            let elements = next_rule
                .into_inner()
                .map(|elem_pair| parse_expression_rule(elem_pair, script))
                .collect::<ParseResult<Vec<AstNode>>>()?;
            Ok(AstNode::new(AstNodeKind::ArrayExpression { elements }, location, span))
        }
        Rule::object_literal => {
            let properties = next_rule
                .into_inner()
                .map(|prop_pair| parse_property_rule(prop_pair, script))
                .collect::<ParseResult<Vec<Property>>>()?;
            Ok(AstNode::new(AstNodeKind::ObjectExpression { properties }, location, span))
        }
        Rule::identifier => parse_identifier_rule(next_rule, script),
        Rule::expression => parse_expression_rule(next_rule, script),
        _ => Err(rules::unexpected_rule(&next_rule, "primary expression", "elpian.expr.parse_primary_rule", script)),
    }
}

fn parse_property_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<Property> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let first = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    match first.as_rule() {
        // `{ name }` shorthand binds the key to the identifier of the same name.
        Rule::identifier => {
            let value = parse_identifier_rule(first.clone(), script)?;
            Ok(Property { key: PropertyKey::Identifier(first.as_str().to_string()), value })
        }
        Rule::property_key => {
            let mut key_inner = first.into_inner();
            let key_pair = rules::fetch_next_pair(&mut key_inner, &location, &span)?;
            let key = match key_pair.as_rule() {
                Rule::property_name => PropertyKey::Identifier(key_pair.as_str().to_string()),
                Rule::string => PropertyKey::Literal(LiteralValue::String(parse_string_rule(key_pair, script)?)),
                Rule::number => PropertyKey::Literal(LiteralValue::Number(parse_number(key_pair.as_str(), &location, &span)?)),
                _ => {
                    return Err(rules::unexpected_rule(&key_pair, "property key", "elpian.expr.parse_property_rule", script));
                }
            };
            let value_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
            Ok(Property { key, value: parse_expression_rule(value_pair, script)? })
        }
        _ => Err(rules::unexpected_rule(&first, "property", "elpian.expr.parse_property_rule", script)),
    }
}

fn parse_template_literal_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    let (inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    rules::require_es2015("Template literal", script, &location, &span)?;

    // There is always one more text segment than there are substitutions,
    // empty segments included.
    let mut quasis = Vec::new();
    let mut expressions = Vec::new();
    let mut current = String::new();
    for part in inner_pairs {
        match part.as_rule() {
            Rule::template_chars => {
                let part_location = rules::get_location_from_pair(&part, script);
                let part_span = rules::get_span_from_pair(&part, script);
                current.push_str(&unescape(part.as_str(), &part_location, &part_span)?);
            }
            Rule::template_substitution => {
                let part_location = rules::get_location_from_pair(&part, script);
                let part_span = rules::get_span_from_pair(&part, script);
                let mut sub_inner = part.into_inner();
                let expr_pair = rules::fetch_next_pair(&mut sub_inner, &part_location, &part_span)?;
                expressions.push(parse_expression_rule(expr_pair, script)?);
                quasis.push(std::mem::take(&mut current));
            }
            _ => {
                return Err(rules::unexpected_rule(&part, "template part", "elpian.expr.parse_template_literal_rule", script));
            }
        }
    }
    quasis.push(current);

    Ok(AstNode::new(
        AstNodeKind::TemplateLiteral { quasis, expressions },
        location,
        span,
    ))
}

fn parse_string_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<String> {
    let (mut inner_pairs, location, span) = rules::get_data_from_rule(&pair, script);
    let chars_pair = rules::fetch_next_pair(&mut inner_pairs, &location, &span)?;
    unescape(chars_pair.as_str(), &location, &span)
}

pub(crate) fn parse_identifier_rule(pair: Pair<Rule>, script: &script::Script) -> ParseResult<AstNode> {
    let (_, location, span) = rules::get_data_from_rule(&pair, script);
    Ok(AstNode::new(
        AstNodeKind::Identifier { name: pair.as_str().to_string() },
        location,
        span,
    ))
}

fn literal(value: LiteralValue, location: Option<Location>, span: Option<Span>) -> AstNode {
    AstNode::new(AstNodeKind::Literal { value }, location, span)
}

fn parse_number(text: &str, location: &Option<Location>, span: &Option<Span>) -> ParseResult<f64> {
    let parsed = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        // Wider than 64 bits is still a valid literal; fold the digits as f64.
        hex.chars()
            .try_fold(0f64, |acc, c| c.to_digit(16).map(|d| acc * 16.0 + f64::from(d)))
            .filter(|_| !hex.is_empty())
    } else {
        text.parse::<f64>().ok()
    };
    match parsed {
        Some(value) if value.is_finite() => Ok(value),
        Some(_) => Err(SyntaxError::with(
            format!("Number literal `{}` is out of range.", text),
            "elpian.expr.parse_number".into(),
            location.clone(),
            span.clone(),
        )
        .boxed()),
        None => Err(SyntaxError::with(
            format!("Invalid number format `{}`.", text),
            "elpian.expr.parse_number".into(),
            location.clone(),
            span.clone(),
        )
        .boxed()),
    }
}

/// Resolve backslash escapes in string and template text.
fn unescape(raw: &str, location: &Option<Location>, span: &Option<Span>) -> ParseResult<String> {
    let invalid = |what: &str| {
        SyntaxError::with(
            format!("Invalid escape sequence: {}", what),
            "elpian.expr.unescape".into(),
            location.clone(),
            span.clone(),
        )
        .boxed()
    };

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escaped) = chars.next() else {
            return Err(invalid("trailing backslash"));
        };
        match escaped {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0' => out.push('\0'),
            // Line continuation.
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            'x' => {
                let hex: String = chars.by_ref().take(2).collect();
                let code = u32::from_str_radix(&hex, 16).map_err(|_| invalid(&format!("\\x{}", hex)))?;
                out.push(char::from_u32(code).ok_or_else(|| invalid(&format!("\\x{}", hex)))?);
            }
            'u' => {
                let hex: String = if chars.peek() == Some(&'{') {
                    chars.next();
                    let digits: String = chars.by_ref().take_while(|c| *c != '}').collect();
                    digits
                } else {
                    chars.by_ref().take(4).collect()
                };
                let mut code = u32::from_str_radix(&hex, 16).map_err(|_| invalid(&format!("\\u{}", hex)))?;
                if (0xD800..0xDC00).contains(&code) {
                    code = combine_surrogates(code, &mut chars).ok_or_else(|| invalid(&format!("\\u{}", hex)))?;
                }
                out.push(char::from_u32(code).ok_or_else(|| invalid(&format!("\\u{}", hex)))?);
            }
            other => out.push(other),
        }
    }
    Ok(out)
}

/// Join a high surrogate with a following `\uXXXX` low surrogate.
fn combine_surrogates(high: u32, chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<u32> {
    let mut lookahead = chars.clone();
    if lookahead.next()? != '\\' || lookahead.next()? != 'u' {
        return None;
    }
    let hex: String = lookahead.by_ref().take(4).collect();
    let low = u32::from_str_radix(&hex, 16).ok().filter(|low| (0xDC00..0xE000).contains(low))?;
    *chars = lookahead;
    Some(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00))
}
