use crate::vnode::VNode;

/// One pending unit of work on the reconciler's stack.
#[derive(Debug)]
pub(crate) enum Frame<'v, N> {
    Patch(PatchStep<'v, N>),
    /// Mount `vnode` and append it as the last child of `parent`.
    Append { parent: N, vnode: &'v VNode },
}

/// Reconcile `real`, currently rendered from `old`, so it matches `new`.
/// `new == None` removes the node.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PatchStep<'v, N> {
    pub real: N,
    pub new: Option<&'v VNode>,
    pub old: &'v VNode,
}

/// Queue the child work for an element whose own properties are done.
///
/// Frames are popped last-in first-out, so this pushes the appends first
/// (highest index at the bottom) and then the existing children in
/// ascending order. The result runs existing children from the highest
/// index down to zero, then the appends from low to high.
pub(crate) fn push_children<'v, N: Copy>(
    stack: &mut Vec<Frame<'v, N>>,
    parent: N,
    existing: impl IntoIterator<Item = PatchStep<'v, N>>,
    appended: &'v [VNode],
) {
    stack.extend(
        appended
            .iter()
            .rev()
            .map(|vnode| Frame::Append { parent, vnode }),
    );
    stack.extend(existing.into_iter().map(Frame::Patch));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(stack: &mut Vec<Frame<'_, usize>>) -> Vec<String> {
        let mut out = Vec::new();
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Patch(step) => out.push(format!("patch {}", step.real)),
                Frame::Append { vnode, .. } => {
                    out.push(format!("append {}", vnode.as_text().unwrap_or_default()))
                }
            }
        }
        out
    }

    #[test]
    fn test_existing_children_run_in_descending_order_before_appends() {
        let old = VNode::text("old");
        let appended = [VNode::text("d"), VNode::text("e")];
        let existing = (0..3).map(|i| PatchStep {
            real: i,
            new: None,
            old: &old,
        });

        let mut stack = Vec::new();
        push_children(&mut stack, 99, existing, &appended);

        assert_eq!(
            order(&mut stack),
            vec!["patch 2", "patch 1", "patch 0", "append d", "append e"]
        );
    }

    #[test]
    fn test_frames_below_are_untouched() {
        let old = VNode::text("old");
        let mut stack = vec![Frame::Patch(PatchStep {
            real: 7,
            new: None,
            old: &old,
        })];

        push_children(&mut stack, 0, std::iter::empty(), &[]);

        assert_eq!(order(&mut stack), vec!["patch 7"]);
    }
}
