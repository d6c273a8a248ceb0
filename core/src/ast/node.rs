use crate::location;

use super::kind::AstNodeKind;

#[derive(Debug, Clone, PartialEq)]
pub struct AstNode {
    pub kind: AstNodeKind,
    pub location: Option<location::Location>,
    pub span: Option<location::Span>,
}

impl AstNode {
    pub fn new(
        kind: AstNodeKind,
        location: Option<location::Location>,
        span: Option<location::Span>,
    ) -> Self {
        AstNode { kind, location, span }
    }

    pub fn get_kind(&self) -> &AstNodeKind {
        &self.kind
    }
    pub fn get_location(&self) -> Option<&location::Location> {
        self.location.as_ref()
    }

    /// Statements of a block, or the node itself for a single-statement body.
    pub fn statement_body(&self) -> &[AstNode] {
        match &self.kind {
            AstNodeKind::BlockStatement { body } => body,
            _ => std::slice::from_ref(self),
        }
    }
}

use std::fmt;

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(loc) => write!(f, "{} at {}", self.kind, loc),
            None => write!(f, "{}", self.kind),
        }
    }
}
