pub mod backend;
pub mod config;
pub mod error;
pub mod stats;
pub mod vnode;

mod mount;
mod patch;

pub use backend::{Backend, DomError, MemoryDom, Mutation, NodeId};
pub use config::{PatchOptions, TextUpdate};
pub use error::{CongruenceViolation, Error, StructuralError};
pub use patch::Reconciler;
pub use stats::PatchStats;
pub use vnode::{Callback, PropValue, Props, VNode};

/// Create a fresh, detached real tree for `vnode` with default options.
pub fn mount<B: Backend>(backend: &mut B, vnode: &VNode) -> Result<B::Node, Error<B::Error>> {
    Reconciler::new(backend).mount(vnode)
}

/// Patch `real` from `old` to `new` with default options.
///
/// See [`Reconciler::patch`].
pub fn patch<B: Backend>(
    backend: &mut B,
    real: B::Node,
    new: Option<&VNode>,
    old: &VNode,
) -> Result<Option<B::Node>, Error<B::Error>> {
    Reconciler::new(backend).patch(real, new, old)
}
