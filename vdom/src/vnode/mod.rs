mod node;
mod prop;

pub use node::VNode;
pub use prop::{Callback, PropValue, Props};

/// Count the nodes in a virtual tree, including `root`.
pub fn node_count(root: &VNode) -> usize {
    let mut count = 0;
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        count += 1;
        stack.extend(node.child_nodes());
    }

    count
}
