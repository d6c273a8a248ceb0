//! file: core/src/ir/lower/lowering_context.rs
//! description: per-compilation state shared by the lowering passes.
//!
//! The context owns the intrinsic table consulted when lowering calls and
//! counts what was lowered for the end-of-compilation summary. One context
//! serves one compilation; nothing in it outlives the `lower_program` call.

use std::collections::HashMap;

/// Calls the lowering recognises by callee name and rewrites into
/// dedicated IR nodes instead of a generic `functionCall`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intrinsic {
    /// `cast(value, "type")` lowers to a `cast` node.
    Cast,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoweringStats {
    pub statements: usize,
    pub expressions: usize,
    pub tag_elements: usize,
}

#[derive(Debug, Clone)]
pub struct LoweringContext {
    intrinsics: HashMap<&'static str, Intrinsic>,
    pub stats: LoweringStats,
}

impl LoweringContext {
    /// Create a context with the builtin intrinsics declared.
    pub fn new() -> Self {
        let mut ctx = LoweringContext {
            intrinsics: HashMap::new(),
            stats: LoweringStats::default(),
        };
        super::declare_builtins::declare_intrinsics(&mut ctx);
        ctx
    }

    pub fn declare_intrinsic(&mut self, name: &'static str, intrinsic: Intrinsic) {
        self.intrinsics.insert(name, intrinsic);
    }

    pub fn intrinsic(&self, name: &str) -> Option<Intrinsic> {
        self.intrinsics.get(name).copied()
    }
}

impl Default for LoweringContext {
    fn default() -> Self {
        Self::new()
    }
}
