mod memory;

use std::fmt::Debug;

use crate::vnode::PropValue;

pub use memory::{DomError, MemoryDom, Mutation, NodeId};

/// The primitive operations a rendering substrate must provide.
///
/// Handles must stay valid while a node is attached; the reconciler resolves
/// every child handle before it starts mutating siblings. All failures are
/// returned as `Self::Error` and passed straight up to the caller.
pub trait Backend {
    type Node: Copy + Eq + Debug;
    type Error: std::error::Error + 'static;

    // Creation. New nodes are detached.
    fn create_element(&mut self, tag: &str) -> Result<Self::Node, Self::Error>;
    fn create_text(&mut self, value: &str) -> Result<Self::Node, Self::Error>;

    // Structure
    /// Append `child` as the last child of `parent`.
    fn append_child(&mut self, parent: Self::Node, child: Self::Node) -> Result<(), Self::Error>;
    /// Detach `node` from its parent and discard it.
    fn remove(&mut self, node: Self::Node) -> Result<(), Self::Error>;
    /// Put `new` at `old`'s position in its parent and discard `old`.
    fn replace(&mut self, old: Self::Node, new: Self::Node) -> Result<(), Self::Error>;
    /// Drop a detached node and its subtree that will never be attached.
    ///
    /// Called after a freshly mounted subtree could not be put in place.
    /// Backends whose nodes are reclaimed on their own can keep the default.
    fn discard(&mut self, node: Self::Node) -> Result<(), Self::Error> {
        let _ = node;
        Ok(())
    }

    // Properties
    fn set_property(
        &mut self,
        node: Self::Node,
        name: &str,
        value: &PropValue,
    ) -> Result<(), Self::Error>;
    fn remove_property(&mut self, node: Self::Node, name: &str) -> Result<(), Self::Error>;
    fn property(&self, node: Self::Node, name: &str) -> Result<Option<PropValue>, Self::Error>;

    /// Overwrite the value of a text node.
    fn set_text(&mut self, node: Self::Node, value: &str) -> Result<(), Self::Error>;

    // Inspection
    /// Tag of an element node, `None` for a text node.
    fn tag(&self, node: Self::Node) -> Result<Option<&str>, Self::Error>;
    fn child_count(&self, node: Self::Node) -> Result<usize, Self::Error>;
    fn child_at(&self, node: Self::Node, index: usize) -> Result<Option<Self::Node>, Self::Error>;
}
