//! Lowering helpers for statement nodes.
//!
//! Each statement becomes zero or more IR statement nodes appended in
//! source order. Embedded expressions go through `lower_expr`. These
//! routines perform no IO.

use crate::ast::{AstNode, AstNodeKind};
use crate::ir::node::IrNode;

use super::LowerResult;
use super::err::UnsupportedConstructError;
use super::lower_expr::lower_expression;
use super::lowering_context::LoweringContext;

pub fn lower_statements(statements: &[AstNode], ctx: &mut LoweringContext) -> LowerResult<Vec<IrNode>> {
    let mut out = Vec::with_capacity(statements.len());
    for statement in statements {
        lower_statement(statement, ctx, &mut out)?;
    }
    Ok(out)
}

pub fn lower_statement(stmt: &AstNode, ctx: &mut LoweringContext, out: &mut Vec<IrNode>) -> LowerResult<()> {
    ctx.stats.statements += 1;

    match stmt.get_kind() {
        AstNodeKind::ReturnStatement { argument } => {
            let value = match argument {
                Some(arg) => Some(Box::new(lower_expression(arg, ctx)?)),
                None => None,
            };
            out.push(IrNode::ReturnOperation { value });
        }
        AstNodeKind::FunctionDeclaration { name, params, body } => {
            log::debug!("lowering function `{}`", name);
            out.push(IrNode::FunctionDefinition {
                name: name.clone(),
                params: params.clone(),
                body: lower_statements(body.statement_body(), ctx)?,
            });
        }
        AstNodeKind::IfStatement { .. } => out.push(lower_if_chain(stmt, ctx)?),
        AstNodeKind::WhileStatement { test, body } => {
            // The VM has no loop instruction; a `while` runs its body at most once.
            log::warn!(
                "{}: `while` lowers to a single-shot conditional",
                stmt.get_location().map(|l| l.to_string()).unwrap_or_default()
            );
            out.push(IrNode::IfStmt {
                condition: Box::new(lower_expression(test, ctx)?),
                body: lower_statements(body.statement_body(), ctx)?,
                else_stmt: None,
            });
        }
        AstNodeKind::ExpressionStatement { expression } => out.push(lower_expression(expression, ctx)?),
        AstNodeKind::VariableDeclaration { declarations, .. } => {
            for declarator in declarations {
                out.push(lower_declarator(declarator, ctx)?);
            }
        }
        // `;` on its own produces nothing.
        AstNodeKind::EmptyStatement => {}
        _ => return Err(UnsupportedConstructError::new(stmt, "elpian.lower.stmt").boxed()),
    }
    Ok(())
}

fn lower_declarator(declarator: &AstNode, ctx: &mut LoweringContext) -> LowerResult<IrNode> {
    match declarator.get_kind() {
        AstNodeKind::VariableDeclarator { id, init } => {
            let right_side = match init {
                Some(init) => Some(Box::new(lower_expression(init, ctx)?)),
                None => None,
            };
            Ok(IrNode::Definition { left_side: Box::new(lower_expression(id, ctx)?), right_side })
        }
        _ => Err(UnsupportedConstructError::new(declarator, "elpian.lower.stmt.declarator").boxed()),
    }
}

/// Lower `if / else if / else` into `ifStmt` with a nested `elseStmt` chain.
///
/// The chain is walked iteratively so long `else if` ladders do not
/// recurse; every branch is lowered in source order before the nodes are
/// linked back to front.
fn lower_if_chain(stmt: &AstNode, ctx: &mut LoweringContext) -> LowerResult<IrNode> {
    let mut branches: Vec<(IrNode, Vec<IrNode>)> = Vec::new();
    let mut else_body: Option<Vec<IrNode>> = None;

    let mut current = Some(stmt);
    while let Some(node) = current.take() {
        match node.get_kind() {
            AstNodeKind::IfStatement { test, consequent, alternate } => {
                let condition = lower_expression(test, ctx)?;
                let body = lower_statements(consequent.statement_body(), ctx)?;
                branches.push((condition, body));
                current = alternate.as_deref();
            }
            _ => else_body = Some(lower_statements(node.statement_body(), ctx)?),
        }
    }

    let mut tail = else_body.map(|body| Box::new(IrNode::ElseStmt { body }));
    let mut branches = branches.into_iter();
    let (condition, body) = match branches.next() {
        Some(first) => first,
        None => return Err(UnsupportedConstructError::new(stmt, "elpian.lower.stmt.if").boxed()),
    };
    for (elif_condition, elif_body) in branches.rev() {
        tail = Some(Box::new(IrNode::ElseifStmt {
            condition: Box::new(elif_condition),
            body: elif_body,
            else_stmt: tail,
        }));
    }

    Ok(IrNode::IfStmt { condition: Box::new(condition), body, else_stmt: tail })
}
