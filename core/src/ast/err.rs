use crate::error::{ElpianErrorExt, ErrorKind, Level};
use crate::location::{Location, Span};
use crate::script::Script;

use super::rules::Rule;

#[derive(Debug, Clone)]
pub struct SyntaxError {
    level: Level,
    message: String,
    issuer: String,
    location: Option<Location>,
    span: Option<Span>,
}

impl SyntaxError {
    pub fn with(message: String, issuer: String, location: Option<Location>, span: Option<Span>) -> Self {
        SyntaxError {
            level: Level::Error,
            message,
            issuer,
            location,
            span,
        }
    }

    /// Translate a grammar failure into a positioned syntax error.
    pub fn from_pest(error: pest::error::Error<Rule>, script: &Script) -> Self {
        use pest::error::LineColLocation;

        let ((line, column), end) = match error.line_col {
            LineColLocation::Pos(pos) => (pos, None),
            LineColLocation::Span(start, end) => (start, Some(end)),
        };
        let location = Location::new(script.name.clone(), line, column);
        let span = end.map(|(end_line, end_column)| {
            Span::new(location.clone(), Location::new(script.name.clone(), end_line, end_column))
        });
        SyntaxError::with(
            error.variant.message().to_string(),
            "elpian.ast.parse".into(),
            Some(location),
            span,
        )
    }

    pub fn boxed(self) -> Box<dyn ElpianErrorExt> {
        Box::new(self)
    }
}

impl std::fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(loc) = &self.location {
            write!(f, "{} (at {})", self.message, loc)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for SyntaxError {}

impl ElpianErrorExt for SyntaxError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Syntax
    }

    fn level(&self) -> Level {
        self.level
    }

    fn message(&self) -> String {
        self.message.clone()
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
