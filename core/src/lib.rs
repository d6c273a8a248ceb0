pub mod ast;
pub mod error;
pub mod ir;
pub mod location;
pub mod options;
pub mod script;

pub use ast::{RulesParser, generate_ast_from_source};
pub use error::{ElpianErrorExt, ErrorKind, Level};
pub use ir::{IrNode, emit_program, lower_ast_to_ir, serialize_program};
pub use location::{Location, Span};
pub use options::CompileOptions;
pub use script::{EcmaVersion, Script};

pub fn generate_error_report(error: &dyn ElpianErrorExt) -> String {
    let level = error.level();
    let location = match error.location() {
        Some(loc) => loc.to_string(),
        None => "unknown location".to_string(),
    };
    let message = error.message();

    format!("ELPIAN | {} | {} | {}", level, location, message)
}

/// Parse and lower a script into its IR instruction list.
///
/// `options.ecma_version` overrides the edition stored on the script.
pub fn compile_program(script: &Script, options: &CompileOptions) -> Result<Vec<IrNode>, Box<dyn ElpianErrorExt>> {
    let script = script.clone().with_ecma_version(options.ecma_version);
    if script.is_empty() {
        log::warn!("{} contains no statements", script.name);
    }
    let ast = ast::generate_ast_from_source(&script)?;
    ir::lower_ast_to_ir(&ast)
}

/// Compile a script all the way to the serialized JSON IR document.
pub fn compile_source_to_ir(script: &Script, options: &CompileOptions) -> Result<String, Box<dyn ElpianErrorExt>> {
    let program = compile_program(script, options)?;
    ir::serialize_program(&program, options.pretty)
}
