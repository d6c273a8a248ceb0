use crate::script::EcmaVersion;

/// Knobs for one compilation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Language edition the front end accepts.
    pub ecma_version: EcmaVersion,
    /// Indent the emitted JSON document.
    pub pretty: bool,
}
