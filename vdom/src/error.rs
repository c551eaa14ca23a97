use thiserror::Error;

/// A virtual node that is neither text nor a well-formed element.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    #[error("element has an empty tag")]
    EmptyTag,

    #[error("element tag {0:?} contains whitespace")]
    InvalidTag(String),

    #[error("<{tag}> has a property with an empty name")]
    EmptyPropName { tag: String },
}

/// The real tree does not have the shape of the old virtual tree it was
/// supposedly rendered from.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CongruenceViolation {
    #[error("expected a text node, found <{found}>")]
    ExpectedText { found: String },

    #[error("expected <{expected}>, found a text node")]
    ExpectedElement { expected: String },

    #[error("expected <{expected}>, found <{found}>")]
    TagMismatch { expected: String, found: String },

    #[error("<{tag}> has {found} children, expected {expected}")]
    ChildCount {
        tag: String,
        expected: usize,
        found: usize,
    },

    #[error("<{tag}> has no child at index {index}")]
    MissingChild { tag: String, index: usize },
}

/// Errors returned by [`mount`](crate::mount()) and [`patch`](crate::patch()).
///
/// `E` is the backend's own error type. Backend failures are passed through
/// untouched; nothing is retried.
#[derive(Debug, Error)]
pub enum Error<E> {
    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error(transparent)]
    Congruence(#[from] CongruenceViolation),

    #[error(transparent)]
    Backend(E),
}

impl<E> Error<E> {
    /// The backend error, if this is one.
    pub fn backend(&self) -> Option<&E> {
        match self {
            Self::Backend(err) => Some(err),
            _ => None,
        }
    }
}
