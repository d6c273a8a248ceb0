//! AST to IR lowering.
//!
//! `lower_program` walks the top-level statements of a `Program` node and
//! produces the flat instruction list the virtual machine executes. The
//! first construct outside the supported subset aborts lowering with an
//! `UnsupportedConstructError`; no partial output is returned.

pub mod err;
pub mod lower_expr;
pub mod lower_objects;
pub mod lower_stmt;
pub mod lowering_context;

mod declare_builtins;

use crate::ast::{AstNode, AstNodeKind};
use crate::error::ElpianErrorExt;

use super::node::IrNode;

pub use err::UnsupportedConstructError;
pub use lowering_context::{Intrinsic, LoweringContext, LoweringStats};

pub type LowerResult<T> = Result<T, Box<dyn ElpianErrorExt>>;

/// Lower a `Program` node into its ordered list of IR statements.
pub fn lower_program(ast: &AstNode) -> LowerResult<Vec<IrNode>> {
    let mut ctx = LoweringContext::new();
    lower_program_with(ast, &mut ctx)
}

/// Same as [`lower_program`] but with a caller-supplied context, so the
/// statistics remain readable afterwards.
pub fn lower_program_with(ast: &AstNode, ctx: &mut LoweringContext) -> LowerResult<Vec<IrNode>> {
    let body = match ast.get_kind() {
        AstNodeKind::Program { body } => body,
        _ => {
            return Err(UnsupportedConstructError::new(ast, "elpian.lower.program")
                .with_detail("lowering starts from a Program node")
                .boxed());
        }
    };

    let program = lower_stmt::lower_statements(body, ctx)?;
    log::info!(
        "lowered {} statements ({} expressions, {} tag elements) into {} instructions",
        ctx.stats.statements,
        ctx.stats.expressions,
        ctx.stats.tag_elements,
        program.len()
    );
    Ok(program)
}
