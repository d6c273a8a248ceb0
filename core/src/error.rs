use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Info,
    Warning,
    Error,
    Critical,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level_str = match self {
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        };
        write!(f, "{}", level_str)
    }
}

/// Which stage of the pipeline rejected the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The front end could not parse the source text.
    Syntax,
    /// Lowering met a node outside the supported subset.
    UnsupportedConstruct,
    /// Serializing or writing the IR document failed.
    Output,
    /// The host harness could not read the source file.
    MissingScript,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind_str = match self {
            ErrorKind::Syntax => "SyntaxError",
            ErrorKind::UnsupportedConstruct => "UnsupportedConstruct",
            ErrorKind::Output => "OutputError",
            ErrorKind::MissingScript => "MissingScript",
        };
        write!(f, "{}", kind_str)
    }
}

pub trait ElpianErrorExt {
    fn kind(&self) -> ErrorKind;
    fn level(&self) -> Level;
    fn message(&self) -> String;
    fn issuer(&self) -> String;
    fn span(&self) -> Option<crate::location::Span>;
    fn location(&self) -> Option<crate::location::Location>;
}

impl fmt::Debug for dyn ElpianErrorExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let loc_str = match self.location() {
            Some(loc) => loc.to_string(),
            None => "unknown".to_string(),
        };
        let span_str = match self.span() {
            Some(span) => span.to_string(),
            None => "span:none".to_string(),
        };

        write!(
            f,
            "ELPIAN | {} | {} | {} | {} | {} | {}",
            self.level(),
            self.kind(),
            loc_str,
            self.issuer(),
            span_str,
            self.message()
        )
    }
}

impl fmt::Display for dyn ElpianErrorExt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location() {
            Some(loc) => write!(f, "{}: {} (at {})", self.kind(), self.message(), loc),
            None => write!(f, "{}: {}", self.kind(), self.message()),
        }
    }
}

