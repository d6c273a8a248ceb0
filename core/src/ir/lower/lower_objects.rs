//! Lowering of object-shaped values: object literals and tag literals.
//!
//! A tag element `<name attr={v}>children</name>` becomes an `object` node
//! whose `value` map holds, in this order:
//!
//! - `type`: the tag name as a string,
//! - `child`: one selected child (see [`select_child`]), or a `container`
//!   placeholder object when no child is selected,
//! - `children`: an array with every child, whitespace-only text included,
//! - one entry per attribute, keyed by attribute name.
//!
//! An attribute named `type`, `child` or `children` overwrites the seeded
//! entry in place.

use indexmap::IndexMap;

use crate::ast::{AstNode, Property, TagAttribute};
use crate::ir::node::IrNode;

use super::LowerResult;
use super::lower_expr::{lower_expression, property_key_text};
use super::lowering_context::LoweringContext;

pub fn lower_object_expression(properties: &[Property], ctx: &mut LoweringContext) -> LowerResult<IrNode> {
    let mut value = IndexMap::with_capacity(properties.len());
    for property in properties {
        let key = property_key_text(&property.key, &property.value)?;
        value.insert(key, lower_expression(&property.value, ctx)?);
    }
    Ok(IrNode::object(value))
}

pub fn lower_tag_element(
    name: &str,
    attributes: &[TagAttribute],
    children: &[AstNode],
    ctx: &mut LoweringContext,
) -> LowerResult<IrNode> {
    ctx.stats.tag_elements += 1;

    let mut value = IndexMap::new();
    value.insert("type".to_string(), IrNode::string(name));
    value.insert("child".to_string(), container_placeholder());
    value.insert("children".to_string(), IrNode::Array { value: Vec::new() });

    for attribute in attributes {
        let attr_value = match &attribute.value {
            Some(node) => lower_expression(node, ctx)?,
            // A bare attribute is a flag.
            None => IrNode::Bool { value: true },
        };
        value.insert(attribute.name.clone(), attr_value);
    }

    if let Some(child) = select_child(children) {
        value.insert("child".to_string(), lower_expression(child, ctx)?);
    }

    let lowered_children = children
        .iter()
        .map(|child| lower_expression(child, ctx))
        .collect::<LowerResult<Vec<IrNode>>>()?;
    value.insert("children".to_string(), IrNode::Array { value: lowered_children });

    Ok(IrNode::object(value))
}

/// Pick the child stored under `child`.
///
/// Only lists of at most three children select one: the child at index 1
/// when there are two or three (skipping the leading whitespace text that
/// formatted source puts before a nested element), otherwise the only
/// child. With two children this is the second one, whatever it is.
pub fn select_child(children: &[AstNode]) -> Option<&AstNode> {
    match children.len() {
        1 => children.first(),
        2 | 3 => children.get(1),
        _ => None,
    }
}

pub fn lower_tag_text(text: &str) -> IrNode {
    let mut value = IndexMap::with_capacity(2);
    value.insert("type".to_string(), IrNode::string("text"));
    value.insert("data".to_string(), IrNode::string(text.trim()));
    IrNode::object(value)
}

fn container_placeholder() -> IrNode {
    let mut value = IndexMap::with_capacity(1);
    value.insert("type".to_string(), IrNode::string("container"));
    IrNode::object(value)
}
