use vdom::vnode::node_count;
use vdom::{
    Backend, Callback, Error, MemoryDom, Mutation, PropValue, Reconciler, StructuralError, VNode,
};

fn card() -> VNode {
    VNode::element("div")
        .prop("class", "card")
        .prop("tabindex", 0i64)
        .child(VNode::element("h2").child("Title"))
        .child(
            VNode::element("p")
                .child("Hello, ")
                .child(VNode::element("b").child("world"))
                .child("!"),
        )
}

// ============================================================================
// Text and elements
// ============================================================================

#[test]
fn test_mount_text() {
    let mut dom = MemoryDom::new();
    let node = vdom::mount(&mut dom, &VNode::text("hi")).unwrap();

    assert_eq!(dom.text(node).unwrap(), Some("hi"));
    assert_eq!(dom.parent(node).unwrap(), None);
    assert_eq!(
        dom.journal(),
        &[Mutation::CreateText {
            node,
            value: "hi".to_string()
        }]
    );
}

#[test]
fn test_mount_empty_element() {
    let mut dom = MemoryDom::new();
    let node = vdom::mount(&mut dom, &VNode::element("div")).unwrap();

    assert_eq!(dom.tag(node).unwrap(), Some("div"));
    assert_eq!(dom.child_count(node).unwrap(), 0);
}

#[test]
fn test_mount_sets_every_prop() {
    let mut dom = MemoryDom::new();
    let onclick = Callback::new(|| {});
    let tree = VNode::element("button")
        .prop("class", "primary")
        .prop("disabled", false)
        .prop("onclick", onclick.clone());

    let node = vdom::mount(&mut dom, &tree).unwrap();

    assert_eq!(
        dom.property(node, "class").unwrap(),
        Some(PropValue::Str("primary".into()))
    );
    assert_eq!(
        dom.property(node, "disabled").unwrap(),
        Some(PropValue::Bool(false))
    );
    assert_eq!(
        dom.property(node, "onclick").unwrap(),
        Some(PropValue::Callback(onclick))
    );
}

#[test]
fn test_mount_preserves_child_order() {
    let mut dom = MemoryDom::new();
    let tree = VNode::element("ul")
        .children(["a", "b", "c"].map(|label| VNode::element("li").child(label)));

    let node = vdom::mount(&mut dom, &tree).unwrap();

    let texts: Vec<_> = dom
        .children(node)
        .unwrap()
        .iter()
        .map(|&li| {
            let text = dom.child_at(li, 0).unwrap().unwrap();
            dom.text(text).unwrap().unwrap().to_string()
        })
        .collect();
    assert_eq!(texts, vec!["a", "b", "c"]);
}

#[test]
fn test_mount_roundtrips_nested_tree() {
    let mut dom = MemoryDom::new();
    let tree = card();

    let node = vdom::mount(&mut dom, &tree).unwrap();

    assert_eq!(dom.to_vnode(node).unwrap(), tree);
    assert_eq!(dom.node_count(), node_count(&tree));
}

#[test]
fn test_mount_creates_parent_before_children() {
    let mut dom = MemoryDom::new();
    let tree = VNode::element("p").child("x");

    let root = vdom::mount(&mut dom, &tree).unwrap();
    let text = dom.child_at(root, 0).unwrap().unwrap();

    assert_eq!(
        dom.journal(),
        &[
            Mutation::CreateElement {
                node: root,
                tag: "p".to_string()
            },
            Mutation::CreateText {
                node: text,
                value: "x".to_string()
            },
            Mutation::AppendChild {
                parent: root,
                child: text
            },
        ]
    );
}

#[test]
fn test_mount_stats() {
    let mut dom = MemoryDom::new();
    let tree = card();
    let mut reconciler = Reconciler::new(&mut dom);

    reconciler.mount(&tree).unwrap();

    let stats = reconciler.stats();
    assert_eq!(stats.created, node_count(&tree));
    assert_eq!(stats.props_set, 2);
    assert_eq!(stats.removed, 0);
    assert_eq!(stats.replaced, 0);
}

#[test]
fn test_mount_deep_tree() {
    let depth = 100_000;
    let mut tree = VNode::text("leaf");
    for _ in 0..depth {
        tree = VNode::element("div").child(tree);
    }

    let mut dom = MemoryDom::new();
    vdom::mount(&mut dom, &tree).unwrap();

    assert_eq!(dom.node_count(), depth + 1);
}

// ============================================================================
// Builders
// ============================================================================

#[test]
fn test_builders_ignore_text_nodes() {
    let text = VNode::text("leaf").prop("class", "x").child("nested");

    assert!(text.is_text());
    assert_eq!(text.props(), None);
    assert!(text.child_nodes().is_empty());
    assert_eq!(text, VNode::text("leaf"));
}

#[test]
fn test_builder_overwrites_duplicate_prop() {
    let el = VNode::element("div").prop("id", "a").prop("id", "b");

    let props = el.props().unwrap();
    assert_eq!(props.len(), 1);
    assert_eq!(props["id"], PropValue::Str("b".into()));
}

#[test]
fn test_mounted_callback_is_callable() {
    use std::cell::Cell;
    use std::rc::Rc;

    let clicks = Rc::new(Cell::new(0));
    let counter = clicks.clone();
    let tree = VNode::element("button").prop(
        "onclick",
        Callback::new(move || counter.set(counter.get() + 1)),
    );
    let mut dom = MemoryDom::new();
    let node = vdom::mount(&mut dom, &tree).unwrap();

    if let Some(PropValue::Callback(cb)) = dom.property(node, "onclick").unwrap() {
        cb.call();
        cb.call();
    }

    assert_eq!(clicks.get(), 2);
}

// ============================================================================
// Structural errors
// ============================================================================

#[test]
fn test_mount_rejects_empty_tag() {
    let mut dom = MemoryDom::new();

    let err = vdom::mount(&mut dom, &VNode::element("")).unwrap_err();

    assert!(matches!(err, Error::Structural(StructuralError::EmptyTag)));
    assert!(dom.journal().is_empty(), "nothing is created for a bad root");
}

#[test]
fn test_mount_rejects_whitespace_in_tag() {
    let mut dom = MemoryDom::new();

    let err = vdom::mount(&mut dom, &VNode::element("my div")).unwrap_err();

    assert!(matches!(
        err,
        Error::Structural(StructuralError::InvalidTag(tag)) if tag == "my div"
    ));
}

#[test]
fn test_mount_rejects_empty_prop_name() {
    let mut dom = MemoryDom::new();
    let tree = VNode::element("div").child(VNode::element("span").prop("", "x"));

    let err = vdom::mount(&mut dom, &tree).unwrap_err();

    assert!(matches!(
        err,
        Error::Structural(StructuralError::EmptyPropName { tag }) if tag == "span"
    ));
}

#[test]
fn test_mount_stops_at_first_bad_node() {
    let mut dom = MemoryDom::new();
    let tree = VNode::element("div")
        .child("ok")
        .child(VNode::element(""))
        .child("never");

    assert!(vdom::mount(&mut dom, &tree).is_err());

    let created_text: Vec<_> = dom
        .journal()
        .iter()
        .filter_map(|m| match m {
            Mutation::CreateText { value, .. } => Some(value.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(created_text, vec!["ok"]);
}

#[test]
fn test_failed_mount_leaves_nothing_behind() {
    let mut dom = MemoryDom::new();
    let tree = VNode::element("div")
        .child(VNode::element("p").child("kept until the error"))
        .child(VNode::element("b a d"));

    assert!(vdom::mount(&mut dom, &tree).is_err());

    assert_eq!(dom.node_count(), 0);
    assert!(matches!(
        dom.journal().last(),
        Some(Mutation::Discard { .. })
    ));
}
