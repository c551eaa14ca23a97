mod frame;
mod props;

use frame::{push_children, Frame, PatchStep};
use props::{diff_props, PropChange};

use crate::backend::Backend;
use crate::config::{PatchOptions, TextUpdate};
use crate::error::{CongruenceViolation, Error};
use crate::mount::{discard, mount_tree};
use crate::stats::PatchStats;
use crate::vnode::{Props, VNode};

/// Mounts and patches real trees through a borrowed [`Backend`].
///
/// Traversal is depth-first over an explicit stack, so tree depth is not
/// limited by the call stack. Every change is sent to the backend as soon as
/// it is found.
pub struct Reconciler<'b, B: Backend> {
    backend: &'b mut B,
    options: PatchOptions,
    stats: PatchStats,
}

impl<'b, B: Backend> Reconciler<'b, B> {
    pub fn new(backend: &'b mut B) -> Self {
        Self::with_options(backend, PatchOptions::default())
    }

    pub fn with_options(backend: &'b mut B, options: PatchOptions) -> Self {
        Self {
            backend,
            options,
            stats: PatchStats::default(),
        }
    }

    pub fn options(&self) -> &PatchOptions {
        &self.options
    }

    /// Counters from the most recent `mount` or `patch` call.
    pub fn stats(&self) -> &PatchStats {
        &self.stats
    }

    pub fn backend(&self) -> &B {
        &*self.backend
    }

    /// Create a fresh, detached real tree for `vnode`.
    /// Attaching it somewhere is up to the caller.
    pub fn mount(&mut self, vnode: &VNode) -> Result<B::Node, Error<B::Error>> {
        self.stats = PatchStats::default();
        let node = mount_tree(self.backend, vnode, &mut self.stats)?;
        log::debug!("mount {node:?}: {}", self.stats);
        Ok(node)
    }

    /// Update `real`, which was rendered from `old`, so it matches `new`.
    ///
    /// Passing `None` for `new` removes `real` from its parent.
    ///
    /// Returns the node that now occupies `real`'s position: `real` itself
    /// when it was updated in place, a freshly mounted node when it had to be
    /// replaced, or `None` when it was removed.
    ///
    /// `real` must have the shape of `old`. With
    /// [`PatchOptions::check_congruence`] on, a mismatch is reported as
    /// [`Error::Congruence`]; with it off, the result is unspecified.
    pub fn patch(
        &mut self,
        real: B::Node,
        new: Option<&VNode>,
        old: &VNode,
    ) -> Result<Option<B::Node>, Error<B::Error>> {
        self.stats = PatchStats::default();

        let mut stack = Vec::new();
        let outcome = self.step(PatchStep { real, new, old }, &mut stack)?;

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Patch(step) => {
                    self.step(step, &mut stack)?;
                }
                Frame::Append { parent, vnode } => self.append(parent, vnode)?,
            }
        }

        log::debug!("patch {real:?}: {}", self.stats);
        Ok(outcome)
    }

    fn step<'v>(
        &mut self,
        step: PatchStep<'v, B::Node>,
        stack: &mut Vec<Frame<'v, B::Node>>,
    ) -> Result<Option<B::Node>, Error<B::Error>> {
        let PatchStep { real, new, old } = step;

        old.validate()?;
        if self.options.check_congruence {
            self.check_congruence(real, old)?;
        }

        let Some(new) = new else {
            self.backend.remove(real).map_err(Error::Backend)?;
            self.stats.removed += 1;
            log::trace!("removed {real:?}");
            return Ok(None);
        };

        new.validate()?;

        match (old, new) {
            (VNode::Text(old_value), VNode::Text(new_value)) => {
                if old_value == new_value {
                    return Ok(Some(real));
                }
                match self.options.text_update {
                    TextUpdate::Replace => self.replace(real, new).map(Some),
                    TextUpdate::InPlace => {
                        self.backend
                            .set_text(real, new_value)
                            .map_err(Error::Backend)?;
                        self.stats.texts_updated += 1;
                        log::trace!("set text of {real:?}");
                        Ok(Some(real))
                    }
                }
            }
            (
                VNode::Element {
                    tag: old_tag,
                    props: old_props,
                    children: old_children,
                },
                VNode::Element {
                    tag: new_tag,
                    props: new_props,
                    children: new_children,
                },
            ) if old_tag == new_tag => {
                self.patch_props(real, old_props, new_props)?;

                let mut existing = Vec::with_capacity(old_children.len());
                for (index, old_child) in old_children.iter().enumerate() {
                    let child = self
                        .backend
                        .child_at(real, index)
                        .map_err(Error::Backend)?
                        .ok_or_else(|| CongruenceViolation::MissingChild {
                            tag: old_tag.clone(),
                            index,
                        })?;
                    existing.push(PatchStep {
                        real: child,
                        new: new_children.get(index),
                        old: old_child,
                    });
                }

                let appended = new_children
                    .get(old_children.len()..)
                    .unwrap_or_default();
                push_children(stack, real, existing, appended);

                Ok(Some(real))
            }
            // Text against element, or two different tags.
            _ => self.replace(real, new).map(Some),
        }
    }

    fn patch_props(
        &mut self,
        real: B::Node,
        old: &Props,
        new: &Props,
    ) -> Result<(), Error<B::Error>> {
        for change in diff_props(old, new) {
            match change {
                PropChange::Set(name, value) => {
                    self.backend
                        .set_property(real, name, value)
                        .map_err(Error::Backend)?;
                    self.stats.props_set += 1;
                    log::trace!("set {name} on {real:?}");
                }
                PropChange::Remove(name) => {
                    self.backend
                        .remove_property(real, name)
                        .map_err(Error::Backend)?;
                    self.stats.props_removed += 1;
                    log::trace!("removed {name} from {real:?}");
                }
            }
        }
        Ok(())
    }

    /// Mount `new` and swap it in for `real`.
    fn replace(&mut self, real: B::Node, new: &VNode) -> Result<B::Node, Error<B::Error>> {
        let fresh = mount_tree(self.backend, new, &mut self.stats)?;
        if let Err(err) = self.backend.replace(real, fresh) {
            discard(self.backend, fresh);
            return Err(Error::Backend(err));
        }
        self.stats.replaced += 1;
        log::trace!("replaced {real:?} with {fresh:?}");
        Ok(fresh)
    }

    fn append(&mut self, parent: B::Node, vnode: &VNode) -> Result<(), Error<B::Error>> {
        let node = mount_tree(self.backend, vnode, &mut self.stats)?;
        if let Err(err) = self.backend.append_child(parent, node) {
            discard(self.backend, node);
            return Err(Error::Backend(err));
        }
        self.stats.appended += 1;
        log::trace!("appended {node:?} to {parent:?}");
        Ok(())
    }

    fn check_congruence(&self, real: B::Node, old: &VNode) -> Result<(), Error<B::Error>> {
        let found = self.backend.tag(real).map_err(Error::Backend)?;

        let violation = match (old, found) {
            (VNode::Text(_), None) => return Ok(()),
            (VNode::Text(_), Some(found)) => CongruenceViolation::ExpectedText {
                found: found.to_string(),
            },
            (VNode::Element { tag, .. }, None) => CongruenceViolation::ExpectedElement {
                expected: tag.clone(),
            },
            (VNode::Element { tag, .. }, Some(found)) if tag != found => {
                CongruenceViolation::TagMismatch {
                    expected: tag.clone(),
                    found: found.to_string(),
                }
            }
            (VNode::Element { tag, children, .. }, Some(_)) => {
                let count = self.backend.child_count(real).map_err(Error::Backend)?;
                if count == children.len() {
                    return Ok(());
                }
                CongruenceViolation::ChildCount {
                    tag: tag.clone(),
                    expected: children.len(),
                    found: count,
                }
            }
        };

        Err(violation.into())
    }
}
