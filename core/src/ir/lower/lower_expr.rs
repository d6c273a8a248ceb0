//! Expression lowering: one `AstNode` expression in, one `IrNode` value out.
//!
//! Lowering is purely structural. Identifiers are not resolved against any
//! scope and operators are carried through by symbol; the virtual machine
//! gives them meaning.

use crate::ast::{AssignmentOperator, AstNode, AstNodeKind, LiteralValue, PropertyKey};
use crate::ir::node::IrNode;

use super::err::UnsupportedConstructError;
use super::lowering_context::{Intrinsic, LoweringContext};
use super::{LowerResult, lower_objects, lower_stmt};

pub fn lower_expression(node: &AstNode, ctx: &mut LoweringContext) -> LowerResult<IrNode> {
    ctx.stats.expressions += 1;

    match node.get_kind() {
        AstNodeKind::Literal { value } => lower_literal(value, node),
        AstNodeKind::TemplateLiteral { quasis, expressions } => {
            if !expressions.is_empty() {
                log::warn!(
                    "{}: template substitutions are not supported, keeping only the leading text",
                    describe_location(node)
                );
            }
            let text = quasis.first().map(String::as_str).unwrap_or_default();
            Ok(IrNode::string(text))
        }
        AstNodeKind::Identifier { name } => Ok(IrNode::identifier(name)),
        AstNodeKind::MemberExpression { object, property, .. } => {
            let target = lower_expression(object, ctx)?;
            // Dispatch on the property's node kind, not on `computed`:
            // `a[key]` indexes by the text "key", exactly like `a.key`.
            let index = match property.get_kind() {
                AstNodeKind::Literal { .. } => lower_expression(property, ctx)?,
                AstNodeKind::Identifier { name } => IrNode::string(name),
                _ => {
                    return Err(UnsupportedConstructError::new(property, "elpian.lower.expr.member")
                        .with_detail("member keys must be a literal or an identifier")
                        .boxed());
                }
            };
            Ok(IrNode::Indexer { target: Box::new(target), index: Box::new(index) })
        }
        AstNodeKind::CallExpression { callee, arguments } => {
            let callee_ir = lower_expression(callee, ctx)?;
            let intrinsic = callee_ir.as_identifier().and_then(|name| ctx.intrinsic(name));
            match intrinsic {
                Some(Intrinsic::Cast) => lower_cast(node, arguments, ctx),
                None => {
                    let args = arguments
                        .iter()
                        .map(|arg| lower_expression(arg, ctx))
                        .collect::<LowerResult<Vec<IrNode>>>()?;
                    Ok(IrNode::FunctionCall { callee: Box::new(callee_ir), args })
                }
            }
        }
        AstNodeKind::AssignmentExpression { operator, left, right } => {
            let left_side = lower_expression(left, ctx)?;
            let value = lower_expression(right, ctx)?;
            let right_side = match operator.binary() {
                None => value,
                // `a op= b` stores `a op b`.
                Some(binary) => IrNode::Arithmetic {
                    operand1: Box::new(left_side.clone()),
                    operand2: Box::new(value),
                    operation: binary.symbol().to_string(),
                },
            };
            if *operator != AssignmentOperator::Assign {
                log::debug!("{}: expanded `{}` into assignment", describe_location(node), operator.symbol());
            }
            Ok(IrNode::Assignment { left_side: Box::new(left_side), right_side: Box::new(right_side) })
        }
        AstNodeKind::BinaryExpression { operator, left, right } => Ok(IrNode::Arithmetic {
            operand1: Box::new(lower_expression(left, ctx)?),
            operand2: Box::new(lower_expression(right, ctx)?),
            operation: operator.symbol().to_string(),
        }),
        AstNodeKind::ArrayExpression { elements } => {
            let value = elements
                .iter()
                .map(|element| lower_expression(element, ctx))
                .collect::<LowerResult<Vec<IrNode>>>()?;
            Ok(IrNode::Array { value })
        }
        AstNodeKind::ObjectExpression { properties } => lower_objects::lower_object_expression(properties, ctx),
        AstNodeKind::ArrowFunctionExpression { params, body } => {
            let body = match body.get_kind() {
                AstNodeKind::BlockStatement { body } => lower_stmt::lower_statements(body, ctx)?,
                // Expression bodies return their value implicitly.
                _ => vec![IrNode::ReturnOperation { value: Some(Box::new(lower_expression(body, ctx)?)) }],
            };
            Ok(IrNode::Callback { params: params.clone(), body })
        }
        AstNodeKind::TagElement { name, attributes, children } => {
            lower_objects::lower_tag_element(name, attributes, children, ctx)
        }
        AstNodeKind::TagExpressionContainer { expression } => lower_expression(expression, ctx),
        AstNodeKind::TagText { value } => Ok(lower_objects::lower_tag_text(value)),
        _ => Err(UnsupportedConstructError::new(node, "elpian.lower.expr").boxed()),
    }
}

fn lower_literal(value: &LiteralValue, node: &AstNode) -> LowerResult<IrNode> {
    match value {
        LiteralValue::Number(n) => Ok(lower_number(*n, node)),
        LiteralValue::String(s) => Ok(IrNode::string(s)),
        LiteralValue::Boolean(b) => Ok(IrNode::Bool { value: *b }),
        LiteralValue::Null => Err(UnsupportedConstructError::new(node, "elpian.lower.expr.literal")
            .with_detail("`null` has no IR representation")
            .boxed()),
    }
}

/// Numbers lower to `i64`, truncating any fraction. Only values whose
/// integral part does not fit in an `i64` fall back to `f64`.
fn lower_number(n: f64, node: &AstNode) -> IrNode {
    let truncated = n.trunc();
    // 2^63 is exactly representable; anything at or above it overflows.
    if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < 9_223_372_036_854_775_808.0 {
        IrNode::I64 { value: truncated as i64 }
    } else {
        log::warn!("{}: numeric literal {} is outside the i64 range, lowering to f64", describe_location(node), n);
        IrNode::F64 { value: n }
    }
}

fn lower_cast(node: &AstNode, arguments: &[AstNode], ctx: &mut LoweringContext) -> LowerResult<IrNode> {
    let malformed = || {
        UnsupportedConstructError::new(node, "elpian.lower.expr.cast")
            .with_detail("`cast` expects a value and a string literal type name")
            .boxed()
    };

    let [value, target] = arguments else {
        return Err(malformed());
    };
    let target_type = match target.get_kind() {
        AstNodeKind::Literal { value: LiteralValue::String(name) } => name.clone(),
        _ => return Err(malformed()),
    };

    Ok(IrNode::Cast { value: Box::new(lower_expression(value, ctx)?), target_type })
}

/// Render an object key the way the source language prints it.
pub(crate) fn property_key_text(key: &PropertyKey, node: &AstNode) -> LowerResult<String> {
    match key {
        PropertyKey::Identifier(name) => Ok(name.clone()),
        PropertyKey::Literal(LiteralValue::String(s)) => Ok(s.clone()),
        PropertyKey::Literal(LiteralValue::Number(n)) => Ok(number_key_text(*n)),
        PropertyKey::Literal(_) => Err(UnsupportedConstructError::new(node, "elpian.lower.expr.property_key")
            .with_detail("object keys must be identifiers, strings or numbers")
            .boxed()),
    }
}

// Integral keys below 1e21 print every digit; larger or tiny magnitudes use
// exponent form with an explicit sign, as in `1e+21` and `1e-7`.
fn number_key_text(n: f64) -> String {
    let magnitude = n.abs();
    if n == 0.0 {
        "0".to_string()
    } else if magnitude >= 1e21 || magnitude < 1e-6 {
        let text = format!("{:e}", n);
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{}e+{}", mantissa, exponent),
            _ => text,
        }
    } else if n.fract() == 0.0 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

fn describe_location(node: &AstNode) -> String {
    match node.get_location() {
        Some(loc) => loc.to_string(),
        None => "<unknown>".to_string(),
    }
}
