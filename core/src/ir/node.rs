//! The instruction tree handed to the virtual machine.
//!
//! Every node serializes as `{ "type": <tag>, "data": <payload> }`. Tags and
//! payload field names are part of the wire format and must not change.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum IrNode {
    Identifier {
        name: String,
    },
    #[serde(rename = "string")]
    Str {
        value: String,
    },
    I64 {
        value: i64,
    },
    F64 {
        value: f64,
    },
    Bool {
        value: bool,
    },
    /// Keys keep insertion order.
    Object {
        value: IndexMap<String, IrNode>,
    },
    Array {
        value: Vec<IrNode>,
    },
    Indexer {
        target: Box<IrNode>,
        index: Box<IrNode>,
    },
    FunctionCall {
        callee: Box<IrNode>,
        args: Vec<IrNode>,
    },
    #[serde(rename_all = "camelCase")]
    Cast {
        value: Box<IrNode>,
        target_type: String,
    },
    Callback {
        params: Vec<String>,
        body: Vec<IrNode>,
    },
    #[serde(rename_all = "camelCase")]
    Assignment {
        left_side: Box<IrNode>,
        right_side: Box<IrNode>,
    },
    Arithmetic {
        operand1: Box<IrNode>,
        operand2: Box<IrNode>,
        operation: String,
    },
    #[serde(rename_all = "camelCase")]
    Definition {
        left_side: Box<IrNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        right_side: Option<Box<IrNode>>,
    },
    ReturnOperation {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Box<IrNode>>,
    },
    FunctionDefinition {
        name: String,
        params: Vec<String>,
        body: Vec<IrNode>,
    },
    #[serde(rename_all = "camelCase")]
    IfStmt {
        condition: Box<IrNode>,
        body: Vec<IrNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        else_stmt: Option<Box<IrNode>>,
    },
    #[serde(rename_all = "camelCase")]
    ElseifStmt {
        condition: Box<IrNode>,
        body: Vec<IrNode>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        else_stmt: Option<Box<IrNode>>,
    },
    ElseStmt {
        body: Vec<IrNode>,
    },
}

impl IrNode {
    pub fn identifier(name: &str) -> Self {
        IrNode::Identifier { name: name.to_string() }
    }

    pub fn string(value: &str) -> Self {
        IrNode::Str { value: value.to_string() }
    }

    pub fn object(value: IndexMap<String, IrNode>) -> Self {
        IrNode::Object { value }
    }

    /// `Some(name)` when this node is a bare identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            IrNode::Identifier { name } => Some(name),
            _ => None,
        }
    }
}
