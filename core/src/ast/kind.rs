//! file: core/src/ast/kind.rs
//! description: AST node kind definitions and operator enums.
//!
//! `AstNodeKind` is the closed vocabulary the front end produces. It covers
//! the subset the lowering passes understand plus a handful of kinds that
//! parse but do not lower, so lowering can name them when it rejects them.
//!
use super::node::AstNode;

/// Binary operators that lower to `arithmetic` IR nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    StrictEq, // ===
    StrictNe, // !==
    Eq,       // ==
    Ne,       // !=
    Lt,       // <
    Le,       // <=
    Gt,       // >
    Ge,       // >=
    Add,      // +
    Sub,      // -
    Mul,      // *
    Div,      // /
    Mod,      // %
}

impl BinaryOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "===" => BinaryOperator::StrictEq,
            "!==" => BinaryOperator::StrictNe,
            "==" => BinaryOperator::Eq,
            "!=" => BinaryOperator::Ne,
            "<" => BinaryOperator::Lt,
            "<=" => BinaryOperator::Le,
            ">" => BinaryOperator::Gt,
            ">=" => BinaryOperator::Ge,
            "+" => BinaryOperator::Add,
            "-" => BinaryOperator::Sub,
            "*" => BinaryOperator::Mul,
            "/" => BinaryOperator::Div,
            "%" => BinaryOperator::Mod,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOperator::StrictEq => "===",
            BinaryOperator::StrictNe => "!==",
            BinaryOperator::Eq => "==",
            BinaryOperator::Ne => "!=",
            BinaryOperator::Lt => "<",
            BinaryOperator::Le => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::Ge => ">=",
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOperator {
    Assign,    // =
    AddAssign, // +=
    SubAssign, // -=
    MulAssign, // *=
    DivAssign, // /=
    ModAssign, // %=
}

impl AssignmentOperator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "=" => AssignmentOperator::Assign,
            "+=" => AssignmentOperator::AddAssign,
            "-=" => AssignmentOperator::SubAssign,
            "*=" => AssignmentOperator::MulAssign,
            "/=" => AssignmentOperator::DivAssign,
            "%=" => AssignmentOperator::ModAssign,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::AddAssign => "+=",
            AssignmentOperator::SubAssign => "-=",
            AssignmentOperator::MulAssign => "*=",
            AssignmentOperator::DivAssign => "/=",
            AssignmentOperator::ModAssign => "%=",
        }
    }

    /// The arithmetic a compound assignment applies before storing.
    pub fn binary(&self) -> Option<BinaryOperator> {
        match self {
            AssignmentOperator::Assign => None,
            AssignmentOperator::AddAssign => Some(BinaryOperator::Add),
            AssignmentOperator::SubAssign => Some(BinaryOperator::Sub),
            AssignmentOperator::MulAssign => Some(BinaryOperator::Mul),
            AssignmentOperator::DivAssign => Some(BinaryOperator::Div),
            AssignmentOperator::ModAssign => Some(BinaryOperator::Mod),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOperator {
    And, // &&
    Or,  // ||
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Not,   // !
    Minus, // -
    Plus,  // +
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOperator {
    Increment, // ++
    Decrement, // --
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationKind {
    Let,
    Var,
    Const,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Numbers are kept as parsed doubles; lowering decides the IR width.
    Number(f64),
    String(String),
    Boolean(bool),
    Null,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Identifier(String),
    Literal(LiteralValue),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: PropertyKey,
    pub value: AstNode,
}

/// `name="text"`, `name={expr}`, `name=<el/>` or a bare `name`.
#[derive(Debug, Clone, PartialEq)]
pub struct TagAttribute {
    pub name: String,
    pub value: Option<AstNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AstNodeKind {
    Program { body: Vec<AstNode> },

    // Statements
    FunctionDeclaration { name: String, params: Vec<String>, body: Box<AstNode> },
    VariableDeclaration { kind: DeclarationKind, declarations: Vec<AstNode> },
    VariableDeclarator { id: Box<AstNode>, init: Option<Box<AstNode>> },
    IfStatement { test: Box<AstNode>, consequent: Box<AstNode>, alternate: Option<Box<AstNode>> },
    WhileStatement { test: Box<AstNode>, body: Box<AstNode> },
    ReturnStatement { argument: Option<Box<AstNode>> },
    ExpressionStatement { expression: Box<AstNode> },
    BlockStatement { body: Vec<AstNode> },
    EmptyStatement,
    BreakStatement,
    ContinueStatement,

    // Expressions
    Identifier { name: String },
    Literal { value: LiteralValue },
    TemplateLiteral { quasis: Vec<String>, expressions: Vec<AstNode> },
    ArrayExpression { elements: Vec<AstNode> },
    ObjectExpression { properties: Vec<Property> },
    MemberExpression { object: Box<AstNode>, property: Box<AstNode>, computed: bool },
    CallExpression { callee: Box<AstNode>, arguments: Vec<AstNode> },
    AssignmentExpression { operator: AssignmentOperator, left: Box<AstNode>, right: Box<AstNode> },
    BinaryExpression { operator: BinaryOperator, left: Box<AstNode>, right: Box<AstNode> },
    LogicalExpression { operator: LogicalOperator, left: Box<AstNode>, right: Box<AstNode> },
    UnaryExpression { operator: UnaryOperator, argument: Box<AstNode> },
    UpdateExpression { operator: UpdateOperator, argument: Box<AstNode>, prefix: bool },
    ConditionalExpression { test: Box<AstNode>, consequent: Box<AstNode>, alternate: Box<AstNode> },
    /// `body` is either a `BlockStatement` or a single expression.
    ArrowFunctionExpression { params: Vec<String>, body: Box<AstNode> },

    // Tag literals
    TagElement { name: String, attributes: Vec<TagAttribute>, children: Vec<AstNode> },
    TagExpressionContainer { expression: Box<AstNode> },
    TagText { value: String },
}

impl AstNodeKind {
    pub fn name(&self) -> &'static str {
        match self {
            AstNodeKind::Program { .. } => "Program",
            AstNodeKind::FunctionDeclaration { .. } => "FunctionDeclaration",
            AstNodeKind::VariableDeclaration { .. } => "VariableDeclaration",
            AstNodeKind::VariableDeclarator { .. } => "VariableDeclarator",
            AstNodeKind::IfStatement { .. } => "IfStatement",
            AstNodeKind::WhileStatement { .. } => "WhileStatement",
            AstNodeKind::ReturnStatement { .. } => "ReturnStatement",
            AstNodeKind::ExpressionStatement { .. } => "ExpressionStatement",
            AstNodeKind::BlockStatement { .. } => "BlockStatement",
            AstNodeKind::EmptyStatement => "EmptyStatement",
            AstNodeKind::BreakStatement => "BreakStatement",
            AstNodeKind::ContinueStatement => "ContinueStatement",
            AstNodeKind::Identifier { .. } => "Identifier",
            AstNodeKind::Literal { .. } => "Literal",
            AstNodeKind::TemplateLiteral { .. } => "TemplateLiteral",
            AstNodeKind::ArrayExpression { .. } => "ArrayExpression",
            AstNodeKind::ObjectExpression { .. } => "ObjectExpression",
            AstNodeKind::MemberExpression { .. } => "MemberExpression",
            AstNodeKind::CallExpression { .. } => "CallExpression",
            AstNodeKind::AssignmentExpression { .. } => "AssignmentExpression",
            AstNodeKind::BinaryExpression { .. } => "BinaryExpression",
            AstNodeKind::LogicalExpression { .. } => "LogicalExpression",
            AstNodeKind::UnaryExpression { .. } => "UnaryExpression",
            AstNodeKind::UpdateExpression { .. } => "UpdateExpression",
            AstNodeKind::ConditionalExpression { .. } => "ConditionalExpression",
            AstNodeKind::ArrowFunctionExpression { .. } => "ArrowFunctionExpression",
            AstNodeKind::TagElement { .. } => "TagElement",
            AstNodeKind::TagExpressionContainer { .. } => "TagExpressionContainer",
            AstNodeKind::TagText { .. } => "TagText",
        }
    }

    /// Only plain bindings and member slots may appear left of `=`.
    pub fn is_assignment_target(&self) -> bool {
        matches!(self, AstNodeKind::Identifier { .. } | AstNodeKind::MemberExpression { .. })
    }
}

use std::fmt;

impl fmt::Display for AstNodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
