use std::fmt;
use std::path::PathBuf;

use crate::error::{ElpianErrorExt, ErrorKind, Level};

/// Language edition the front end accepts.
///
/// Editions before 2015 reject arrow functions, template literals and
/// block-scoped (`let`/`const`) declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EcmaVersion(u16);

impl EcmaVersion {
    pub const ES5: EcmaVersion = EcmaVersion(2009);
    pub const ES2015: EcmaVersion = EcmaVersion(2015);
    pub const ES2020: EcmaVersion = EcmaVersion(2020);
    pub const LATEST: EcmaVersion = EcmaVersion(2020);

    pub fn supports_es2015(&self) -> bool {
        *self >= Self::ES2015
    }

    /// Parse a version selector: an edition number (`5`, `6`..`11`), a year
    /// (`2015`..`2020`) or `latest`.
    pub fn parse(selector: &str) -> Option<Self> {
        let selector = selector.trim();
        if selector.eq_ignore_ascii_case("latest") {
            return Some(Self::LATEST);
        }
        match selector.parse::<u16>().ok()? {
            3 | 5 => Some(Self::ES5),
            n @ 6..=11 => Some(EcmaVersion(2009 + n)),
            n @ 2015..=2020 => Some(EcmaVersion(n)),
            _ => None,
        }
    }
}

impl Default for EcmaVersion {
    fn default() -> Self {
        Self::ES2020
    }
}

impl fmt::Display for EcmaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::ES5 {
            write!(f, "5")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Script {
    pub name: String,
    pub path: PathBuf,
    pub content: String,
    pub ecma_version: EcmaVersion,
}

impl Script {
    pub fn new(path: PathBuf) -> Result<Self, Box<dyn ElpianErrorExt>> {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(MissingScriptError { path: path.clone(), reason: e.to_string() })
                as Box<dyn ElpianErrorExt>
        })?;
        Ok(Script {
            name,
            path,
            content,
            ecma_version: EcmaVersion::default(),
        })
    }

    /// Wrap in-memory source text; `name` is used in diagnostics.
    pub fn from_source(name: &str, content: &str) -> Self {
        Script {
            name: name.to_string(),
            path: PathBuf::from(name),
            content: content.to_string(),
            ecma_version: EcmaVersion::default(),
        }
    }

    pub fn with_ecma_version(mut self, version: EcmaVersion) -> Self {
        self.ecma_version = version;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.content.trim().is_empty()
    }
}

impl fmt::Display for Script {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Script: {} at {:?} (ecmaVersion {})", self.name, self.path, self.ecma_version)
    }
}

#[derive(Debug, Clone)]
pub struct MissingScriptError {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for MissingScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Missing script at {:?}: {}", self.path, self.reason)
    }
}

impl std::error::Error for MissingScriptError {}

impl ElpianErrorExt for MissingScriptError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::MissingScript
    }

    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        self.to_string()
    }

    fn issuer(&self) -> String {
        "elpian.script".to_string()
    }

    fn span(&self) -> Option<crate::location::Span> {
        None
    }

    fn location(&self) -> Option<crate::location::Location> {
        None
    }
}
