use std::fmt;

use slotmap::{Key, SlotMap};
use thiserror::Error;

use super::Backend;
use crate::vnode::{PropValue, Props, VNode};

slotmap::new_key_type! {
    /// Handle to a node in a [`MemoryDom`].
    ///
    /// Handles are generational: once a node is freed its handle stays
    /// invalid even after the slot is reused.
    pub struct NodeId;
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:?}", self.data())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("node {0} has no parent")]
    Detached(NodeId),

    #[error("node {0} already has a parent")]
    AlreadyAttached(NodeId),

    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    #[error("node {0} is not a text node")]
    NotText(NodeId),

    #[error("appending {child} to {parent} would create a cycle")]
    Cycle { parent: NodeId, child: NodeId },
}

/// One mutating call made against a [`MemoryDom`].
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    CreateElement { node: NodeId, tag: String },
    CreateText { node: NodeId, value: String },
    AppendChild { parent: NodeId, child: NodeId },
    Remove { node: NodeId },
    Replace { old: NodeId, new: NodeId },
    SetProperty { node: NodeId, name: String, value: PropValue },
    RemoveProperty { node: NodeId, name: String },
    SetText { node: NodeId, value: String },
    Discard { node: NodeId },
}

#[derive(Debug, Clone)]
enum Data {
    Text(String),
    Element {
        tag: String,
        props: Props,
        children: Vec<NodeId>,
    },
}

#[derive(Debug, Clone)]
struct Slot {
    data: Data,
    parent: Option<NodeId>,
}

/// An in-memory tree implementing [`Backend`].
///
/// Nodes live in a [`SlotMap`]. Removed, replaced and discarded subtrees are
/// freed and their slots reused, so a stale handle fails with
/// [`DomError::UnknownNode`]. Every mutating call is appended to a journal
/// that tests can inspect.
#[derive(Debug, Default)]
pub struct MemoryDom {
    nodes: SlotMap<NodeId, Slot>,
    journal: Vec<Mutation>,
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (not freed) nodes, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Nodes the arena can hold before it has to grow.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.slot(node).is_ok()
    }

    pub fn parent(&self, node: NodeId) -> Result<Option<NodeId>, DomError> {
        Ok(self.slot(node)?.parent)
    }

    /// Children of an element. Empty for text nodes.
    pub fn children(&self, node: NodeId) -> Result<&[NodeId], DomError> {
        match &self.slot(node)?.data {
            Data::Text(_) => Ok(&[]),
            Data::Element { children, .. } => Ok(children.as_slice()),
        }
    }

    pub fn text(&self, node: NodeId) -> Result<Option<&str>, DomError> {
        match &self.slot(node)?.data {
            Data::Text(value) => Ok(Some(value.as_str())),
            Data::Element { .. } => Ok(None),
        }
    }

    // Journal

    pub fn journal(&self) -> &[Mutation] {
        &self.journal
    }

    pub fn take_journal(&mut self) -> Vec<Mutation> {
        std::mem::take(&mut self.journal)
    }

    pub fn clear_journal(&mut self) {
        self.journal.clear();
    }

    /// Snapshot the subtree at `node` as a virtual tree.
    pub fn to_vnode(&self, node: NodeId) -> Result<VNode, DomError> {
        // An element is visited twice: once to queue its children, and again
        // after all of them are finished on `built`.
        let mut stack = vec![(node, false)];
        let mut built: Vec<VNode> = Vec::new();

        while let Some((id, expanded)) = stack.pop() {
            match &self.slot(id)?.data {
                Data::Text(value) => built.push(VNode::Text(value.clone())),
                Data::Element {
                    tag,
                    props,
                    children,
                } if expanded => {
                    let first = built.len() - children.len();
                    let children = built.split_off(first);
                    built.push(VNode::Element {
                        tag: tag.clone(),
                        props: props.clone(),
                        children,
                    });
                }
                Data::Element { children, .. } => {
                    stack.push((id, true));
                    stack.extend(children.iter().rev().map(|&child| (child, false)));
                }
            }
        }

        built.pop().ok_or(DomError::UnknownNode(node))
    }

    /// Render the subtree at `node` as indented markup, one node per line.
    pub fn dump(&self, node: NodeId) -> Result<String, DomError> {
        let mut out = String::new();
        let mut stack = vec![(0usize, node)];

        while let Some((depth, id)) = stack.pop() {
            let indent = "  ".repeat(depth);
            match &self.slot(id)?.data {
                Data::Text(value) => out.push_str(&format!("{indent}{value:?}\n")),
                Data::Element {
                    tag,
                    props,
                    children,
                } => {
                    out.push_str(&format!("{indent}<{tag}"));
                    for (name, value) in props {
                        out.push_str(&format!(" {name}={value}"));
                    }
                    out.push_str(">\n");
                    stack.extend(children.iter().rev().map(|&child| (depth + 1, child)));
                }
            }
        }

        Ok(out)
    }

    fn slot(&self, node: NodeId) -> Result<&Slot, DomError> {
        self.nodes.get(node).ok_or(DomError::UnknownNode(node))
    }

    fn slot_mut(&mut self, node: NodeId) -> Result<&mut Slot, DomError> {
        self.nodes.get_mut(node).ok_or(DomError::UnknownNode(node))
    }

    fn children_mut(&mut self, node: NodeId) -> Result<&mut Vec<NodeId>, DomError> {
        match &mut self.slot_mut(node)?.data {
            Data::Element { children, .. } => Ok(children),
            Data::Text(_) => Err(DomError::NotAnElement(node)),
        }
    }

    fn props_mut(&mut self, node: NodeId) -> Result<&mut Props, DomError> {
        match &mut self.slot_mut(node)?.data {
            Data::Element { props, .. } => Ok(props),
            Data::Text(_) => Err(DomError::NotAnElement(node)),
        }
    }

    fn insert(&mut self, data: Data) -> NodeId {
        self.nodes.insert(Slot { data, parent: None })
    }

    /// Position of `node` in its parent's child list.
    fn position(&self, node: NodeId) -> Result<(NodeId, usize), DomError> {
        let parent = self.slot(node)?.parent.ok_or(DomError::Detached(node))?;
        let index = self
            .children(parent)?
            .iter()
            .position(|&child| child == node)
            .ok_or(DomError::Detached(node))?;
        Ok((parent, index))
    }

    fn ensure_detached(&self, node: NodeId) -> Result<(), DomError> {
        match self.slot(node)?.parent {
            Some(_) => Err(DomError::AlreadyAttached(node)),
            None => Ok(()),
        }
    }

    /// `child` must not be `parent` or one of its ancestors.
    fn ensure_acyclic(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if child == parent {
            return Err(DomError::Cycle { parent, child });
        }
        // A node without children is nobody's ancestor.
        if self.children(child)?.is_empty() {
            return Ok(());
        }

        let mut cursor = Some(parent);
        while let Some(id) = cursor {
            if id == child {
                return Err(DomError::Cycle { parent, child });
            }
            cursor = self.slot(id)?.parent;
        }
        Ok(())
    }

    /// Free `node` and everything below it.
    fn free(&mut self, node: NodeId) {
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            if let Some(slot) = self.nodes.remove(id) {
                if let Data::Element { children, .. } = slot.data {
                    stack.extend(children);
                }
            }
        }
    }
}

impl Backend for MemoryDom {
    type Node = NodeId;
    type Error = DomError;

    fn create_element(&mut self, tag: &str) -> Result<NodeId, DomError> {
        let node = self.insert(Data::Element {
            tag: tag.to_string(),
            props: Props::new(),
            children: Vec::new(),
        });
        self.journal.push(Mutation::CreateElement {
            node,
            tag: tag.to_string(),
        });
        Ok(node)
    }

    fn create_text(&mut self, value: &str) -> Result<NodeId, DomError> {
        let node = self.insert(Data::Text(value.to_string()));
        self.journal.push(Mutation::CreateText {
            node,
            value: value.to_string(),
        });
        Ok(node)
    }

    fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.ensure_detached(child)?;
        self.ensure_acyclic(parent, child)?;

        self.children_mut(parent)?.push(child);
        self.slot_mut(child)?.parent = Some(parent);
        self.journal.push(Mutation::AppendChild { parent, child });
        Ok(())
    }

    fn remove(&mut self, node: NodeId) -> Result<(), DomError> {
        let (parent, index) = self.position(node)?;
        self.children_mut(parent)?.remove(index);
        self.free(node);
        self.journal.push(Mutation::Remove { node });
        Ok(())
    }

    fn replace(&mut self, old: NodeId, new: NodeId) -> Result<(), DomError> {
        self.ensure_detached(new)?;
        let (parent, index) = self.position(old)?;
        self.ensure_acyclic(parent, new)?;
        self.children_mut(parent)?[index] = new;
        self.slot_mut(new)?.parent = Some(parent);
        self.free(old);
        self.journal.push(Mutation::Replace { old, new });
        Ok(())
    }

    fn discard(&mut self, node: NodeId) -> Result<(), DomError> {
        self.ensure_detached(node)?;
        self.free(node);
        self.journal.push(Mutation::Discard { node });
        Ok(())
    }

    fn set_property(&mut self, node: NodeId, name: &str, value: &PropValue) -> Result<(), DomError> {
        self.props_mut(node)?.insert(name.to_string(), value.clone());
        self.journal.push(Mutation::SetProperty {
            node,
            name: name.to_string(),
            value: value.clone(),
        });
        Ok(())
    }

    fn remove_property(&mut self, node: NodeId, name: &str) -> Result<(), DomError> {
        self.props_mut(node)?.remove(name);
        self.journal.push(Mutation::RemoveProperty {
            node,
            name: name.to_string(),
        });
        Ok(())
    }

    fn property(&self, node: NodeId, name: &str) -> Result<Option<PropValue>, DomError> {
        match &self.slot(node)?.data {
            Data::Element { props, .. } => Ok(props.get(name).cloned()),
            Data::Text(_) => Err(DomError::NotAnElement(node)),
        }
    }

    fn set_text(&mut self, node: NodeId, value: &str) -> Result<(), DomError> {
        match &mut self.slot_mut(node)?.data {
            Data::Text(text) => *text = value.to_string(),
            Data::Element { .. } => return Err(DomError::NotText(node)),
        }
        self.journal.push(Mutation::SetText {
            node,
            value: value.to_string(),
        });
        Ok(())
    }

    fn tag(&self, node: NodeId) -> Result<Option<&str>, DomError> {
        match &self.slot(node)?.data {
            Data::Text(_) => Ok(None),
            Data::Element { tag, .. } => Ok(Some(tag.as_str())),
        }
    }

    fn child_count(&self, node: NodeId) -> Result<usize, DomError> {
        Ok(self.children(node)?.len())
    }

    fn child_at(&self, node: NodeId, index: usize) -> Result<Option<NodeId>, DomError> {
        Ok(self.children(node)?.get(index).copied())
    }
}
