//! Reconciler configuration types.

/// Options for a [`Reconciler`](crate::Reconciler).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchOptions {
    /// What to do when a text node's value changes.
    pub text_update: TextUpdate,

    /// Verify that each visited real node has the shape of the old virtual
    /// node (kind, tag, child count) before touching it.
    /// A mismatch fails with [`Error::Congruence`](crate::Error::Congruence)
    /// instead of patching misaligned children.
    pub check_congruence: bool,
}

impl Default for PatchOptions {
    fn default() -> Self {
        Self {
            text_update: TextUpdate::Replace,
            check_congruence: true,
        }
    }
}

impl PatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the text update strategy.
    pub fn text_update(mut self, strategy: TextUpdate) -> Self {
        self.text_update = strategy;
        self
    }

    /// Update changed text nodes in place.
    pub fn text_in_place(mut self) -> Self {
        self.text_update = TextUpdate::InPlace;
        self
    }

    /// Turn the congruence check on or off.
    pub fn check_congruence(mut self, check: bool) -> Self {
        self.check_congruence = check;
        self
    }
}

/// Strategy for a text node whose value changed.
///
/// Both strategies leave the same rendered text behind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextUpdate {
    /// Create a new text node and replace the old one.
    #[default]
    Replace,

    /// Overwrite the existing node's value with
    /// [`Backend::set_text`](crate::Backend::set_text). The real node keeps
    /// its identity.
    InPlace,
}
