//! file: core/src/ir/lower/declare_builtins.rs
//! description: register the intrinsic calls the lowering rewrites.
//!
//! Host functions such as `askHost` or `render` stay ordinary
//! `functionCall`s; only names listed here get a dedicated IR node.
//!
use super::lowering_context::{Intrinsic, LoweringContext};

pub(crate) fn declare_intrinsics(ctx: &mut LoweringContext) {
    let intrinsics = [("cast", Intrinsic::Cast)];
    for (name, intrinsic) in intrinsics {
        ctx.declare_intrinsic(name, intrinsic);
    }
}
