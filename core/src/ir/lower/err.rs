use crate::ast::AstNode;
use crate::error::{ElpianErrorExt, ErrorKind, Level};
use crate::location::{Location, Span};

/// Raised when lowering meets a node outside the supported subset.
#[derive(Debug, Clone)]
pub struct UnsupportedConstructError {
    construct: String,
    detail: Option<String>,
    issuer: String,
    location: Option<Location>,
    span: Option<Span>,
}

impl UnsupportedConstructError {
    pub fn new(node: &AstNode, issuer: &str) -> Self {
        UnsupportedConstructError {
            construct: node.kind.name().to_string(),
            detail: None,
            issuer: issuer.to_string(),
            location: node.location.clone(),
            span: node.span.clone(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn boxed(self) -> Box<dyn ElpianErrorExt> {
        Box::new(self)
    }
}

impl std::fmt::Display for UnsupportedConstructError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())?;
        if let Some(loc) = &self.location {
            write!(f, " at {}", loc)?;
        }
        Ok(())
    }
}

impl std::error::Error for UnsupportedConstructError {}

impl ElpianErrorExt for UnsupportedConstructError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::UnsupportedConstruct
    }

    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        match &self.detail {
            Some(detail) => format!("Unsupported construct `{}`: {}", self.construct, detail),
            None => format!("Unsupported construct `{}`", self.construct),
        }
    }

    fn issuer(&self) -> String {
        self.issuer.clone()
    }

    fn span(&self) -> Option<Span> {
        self.span.clone()
    }

    fn location(&self) -> Option<Location> {
        self.location.clone()
    }
}
