use std::fmt;

/// Counts of backend operations issued by one `mount` or `patch` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchStats {
    /// Nodes created, text and element.
    pub created: usize,
    /// Nodes appended to an existing parent during child reconciliation.
    pub appended: usize,
    pub removed: usize,
    pub replaced: usize,
    pub props_set: usize,
    pub props_removed: usize,
    pub texts_updated: usize,
}

impl PatchStats {
    /// True when the call did not touch the backend at all.
    pub fn is_noop(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for PatchStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "created={} appended={} removed={} replaced={} props_set={} props_removed={} texts_updated={}",
            self.created,
            self.appended,
            self.removed,
            self.replaced,
            self.props_set,
            self.props_removed,
            self.texts_updated,
        )
    }
}
