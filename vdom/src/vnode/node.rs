use super::{PropValue, Props};
use crate::error::StructuralError;

/// Immutable description of one piece of UI: a text leaf or an element.
///
/// Children are identified by position only; there is no key.
#[derive(Debug, Clone, PartialEq)]
pub enum VNode {
    Text(String),
    Element {
        tag: String,
        props: Props,
        children: Vec<VNode>,
    },
}

impl VNode {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn element(tag: impl Into<String>) -> Self {
        Self::Element {
            tag: tag.into(),
            props: Props::new(),
            children: Vec::new(),
        }
    }

    // Builders. These do nothing on text nodes.

    pub fn prop(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        if let Self::Element { props, .. } = &mut self {
            props.insert(name.into(), value.into());
        }
        self
    }

    pub fn child(mut self, child: impl Into<VNode>) -> Self {
        if let Self::Element { children, .. } = &mut self {
            children.push(child.into());
        }
        self
    }

    pub fn children<I>(mut self, new_children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<VNode>,
    {
        if let Self::Element { children, .. } = &mut self {
            children.extend(new_children.into_iter().map(Into::into));
        }
        self
    }

    // Accessors

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// Element tag, `None` for text.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Text(_) => None,
            Self::Element { tag, .. } => Some(tag.as_str()),
        }
    }

    /// Text value, `None` for elements.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            Self::Element { .. } => None,
        }
    }

    pub fn props(&self) -> Option<&Props> {
        match self {
            Self::Text(_) => None,
            Self::Element { props, .. } => Some(props),
        }
    }

    /// Child nodes. Always empty for text.
    pub fn child_nodes(&self) -> &[VNode] {
        match self {
            Self::Text(_) => &[],
            Self::Element { children, .. } => children.as_slice(),
        }
    }

    /// Check the shape of this node only, not its descendants.
    ///
    /// Traversals call this on every node they visit so a malformed node
    /// aborts the call where it is found.
    pub fn validate(&self) -> Result<(), StructuralError> {
        let Self::Element { tag, props, .. } = self else {
            return Ok(());
        };

        if tag.is_empty() {
            return Err(StructuralError::EmptyTag);
        }
        if tag.chars().any(char::is_whitespace) {
            return Err(StructuralError::InvalidTag(tag.clone()));
        }
        if props.keys().any(String::is_empty) {
            return Err(StructuralError::EmptyPropName { tag: tag.clone() });
        }

        Ok(())
    }
}

// The derived drop would recurse once per level. Flatten the subtree onto a
// heap stack instead, so every node is dropped with no children left.
impl Drop for VNode {
    fn drop(&mut self) {
        let Self::Element { children, .. } = self else {
            return;
        };
        let mut pending = std::mem::take(children);
        while let Some(mut node) = pending.pop() {
            if let Self::Element { children, .. } = &mut node {
                pending.append(children);
            }
        }
    }
}

impl From<&str> for VNode {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for VNode {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
