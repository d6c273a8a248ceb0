//! Syntax front end: source text to `AstNode` tree.
//!
//! Parsing is driven by the pest grammar in `grammar.pest`; the `stmt`,
//! `expr` and `tag` modules turn the resulting pairs into `AstNode`s with
//! source locations attached for diagnostics.

pub mod err;
pub mod expr;
pub mod kind;
pub mod node;
pub mod rules;
pub mod stmt;
pub mod tag;

use pest::Parser;

pub use crate::error::ElpianErrorExt;
pub use err::SyntaxError;
pub use kind::{
    AssignmentOperator, AstNodeKind, BinaryOperator, DeclarationKind, LiteralValue,
    LogicalOperator, Property, PropertyKey, TagAttribute, UnaryOperator, UpdateOperator,
};
pub use node::AstNode;
pub use rules::{Rule, RulesParser};

/// Parse a whole script into a `Program` node.
///
/// The first grammar failure aborts parsing and is returned as a
/// `SyntaxError`; no partial tree is produced.
pub fn generate_ast_from_source(script: &crate::script::Script) -> Result<AstNode, Box<dyn ElpianErrorExt>> {
    log::debug!("parsing {} ({} bytes)", script.name, script.content.len());

    let mut pairs = RulesParser::parse(Rule::program, &script.content)
        .map_err(|e| SyntaxError::from_pest(e, script).boxed())?;

    let program_pair = match pairs.next() {
        Some(pair) => pair,
        None => {
            return Err(SyntaxError::with(
                "The parser produced no program.".into(),
                "elpian.ast.generate_ast_from_source".into(),
                None,
                None,
            )
            .boxed());
        }
    };

    let (inner_pairs, location, span) = rules::get_data_from_rule(&program_pair, script);
    let mut body = Vec::new();
    for pair in inner_pairs {
        match pair.as_rule() {
            Rule::statement => body.push(stmt::parse_statement_rule(pair, script)?),
            Rule::EOI => {}
            _ => return Err(rules::unexpected_rule(&pair, "program item", "elpian.ast.generate_ast_from_source", script)),
        }
    }

    log::debug!("parsed {} top-level statements from {}", body.len(), script.name);
    Ok(AstNode::new(AstNodeKind::Program { body }, location, span))
}
