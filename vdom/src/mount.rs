use crate::backend::Backend;
use crate::error::Error;
use crate::stats::PatchStats;
use crate::vnode::VNode;

/// Build a detached real tree for `vnode`.
///
/// Nodes are created depth-first in document order. Each element gets its
/// properties before it is attached, and children are appended in order.
/// If anything fails, whatever was already built is discarded.
pub(crate) fn mount_tree<B: Backend>(
    backend: &mut B,
    vnode: &VNode,
    stats: &mut PatchStats,
) -> Result<B::Node, Error<B::Error>> {
    let root = create_node(backend, vnode, stats)?;

    match mount_children(backend, root, vnode, stats) {
        Ok(()) => Ok(root),
        Err(err) => {
            discard(backend, root);
            Err(err)
        }
    }
}

fn mount_children<B: Backend>(
    backend: &mut B,
    root: B::Node,
    vnode: &VNode,
    stats: &mut PatchStats,
) -> Result<(), Error<B::Error>> {
    let mut stack: Vec<(B::Node, &VNode)> = vnode
        .child_nodes()
        .iter()
        .rev()
        .map(|child| (root, child))
        .collect();

    while let Some((parent, vnode)) = stack.pop() {
        let node = create_node(backend, vnode, stats)?;
        if let Err(err) = backend.append_child(parent, node) {
            discard(backend, node);
            return Err(Error::Backend(err));
        }
        stack.extend(vnode.child_nodes().iter().rev().map(|child| (node, child)));
    }

    Ok(())
}

/// Create one node and set its properties. Children are not touched.
fn create_node<B: Backend>(
    backend: &mut B,
    vnode: &VNode,
    stats: &mut PatchStats,
) -> Result<B::Node, Error<B::Error>> {
    vnode.validate()?;

    let node = match vnode {
        VNode::Text(value) => backend.create_text(value).map_err(Error::Backend)?,
        VNode::Element { tag, props, .. } => {
            let node = backend.create_element(tag).map_err(Error::Backend)?;
            for (name, value) in props {
                if let Err(err) = backend.set_property(node, name, value) {
                    discard(backend, node);
                    return Err(Error::Backend(err));
                }
                stats.props_set += 1;
            }
            node
        }
    };

    stats.created += 1;
    log::trace!("created {node:?}");
    Ok(node)
}

/// Drop a detached subtree that will not be attached.
///
/// The error that got us here is the one reported, so a failed discard is
/// not surfaced.
pub(crate) fn discard<B: Backend>(backend: &mut B, node: B::Node) {
    if backend.discard(node).is_ok() {
        log::trace!("discarded {node:?}");
    }
}
