//! Serialization of a lowered program into the JSON IR document.

use std::io::Write;

use crate::error::{ElpianErrorExt, ErrorKind, Level};
use crate::location::{Location, Span};

use super::node::IrNode;

/// Raised when the IR document cannot be produced or written.
#[derive(Debug, Clone)]
pub struct OutputError {
    message: String,
    issuer: String,
}

impl OutputError {
    pub fn new(message: impl Into<String>, issuer: &str) -> Self {
        OutputError { message: message.into(), issuer: issuer.to_string() }
    }

    pub fn boxed(self) -> Box<dyn ElpianErrorExt> {
        Box::new(self)
    }
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for OutputError {}

impl ElpianErrorExt for OutputError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Output
    }

    fn level(&self) -> Level {
        Level::Error
    }

    fn message(&self) -> String {
        self.message.clone()
    }

    fn issuer(&self) -> String {
        self.issuer.clone()
    }

    fn span(&self) -> Option<Span> {
        None
    }

    fn location(&self) -> Option<Location> {
        None
    }
}

/// Serialize the program as a JSON array, compact unless `pretty`.
pub fn serialize_program(program: &[IrNode], pretty: bool) -> Result<String, Box<dyn ElpianErrorExt>> {
    let result = if pretty { serde_json::to_string_pretty(program) } else { serde_json::to_string(program) };
    result.map_err(|e| OutputError::new(format!("Failed to serialize IR: {}", e), "elpian.ir.emit").boxed())
}

/// Write the serialized program to `writer`, followed by a newline.
///
/// The document is fully serialized before anything is written, so a
/// serialization failure leaves the sink untouched.
pub fn emit_program<W: Write>(program: &[IrNode], writer: &mut W, pretty: bool) -> Result<(), Box<dyn ElpianErrorExt>> {
    let document = serialize_program(program, pretty)?;
    let write_failed = |e: std::io::Error| OutputError::new(format!("Failed to write IR: {}", e), "elpian.ir.emit").boxed();
    writer.write_all(document.as_bytes()).map_err(write_failed)?;
    writer.write_all(b"\n").map_err(write_failed)?;
    writer.flush().map_err(write_failed)?;
    log::debug!("wrote {} bytes of IR", document.len() + 1);
    Ok(())
}
