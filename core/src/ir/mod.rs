pub mod emit;
pub mod lower;
pub mod node;

pub use self::emit::{OutputError, emit_program, serialize_program};
pub use self::lower::{LowerResult, UnsupportedConstructError, lower_program};
pub use self::node::IrNode;

/// Lower a parsed `Program` into the instruction list.
pub fn lower_ast_to_ir(ast: &crate::ast::AstNode) -> LowerResult<Vec<IrNode>> {
    lower_program(ast)
}
