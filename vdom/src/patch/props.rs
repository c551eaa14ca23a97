use std::collections::BTreeSet;

use crate::vnode::{PropValue, Props};

/// A single property change to apply to a real element.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PropChange<'v> {
    Set(&'v str, &'v PropValue),
    Remove(&'v str),
}

/// Compare two property maps over the union of their keys.
///
/// Missing from `new`: remove. Missing from `old` or different: set.
/// Equal values produce nothing.
pub(crate) fn diff_props<'v>(old: &'v Props, new: &'v Props) -> Vec<PropChange<'v>> {
    let names: BTreeSet<&str> = old.keys().chain(new.keys()).map(String::as_str).collect();

    names
        .into_iter()
        .filter_map(|name| match (old.get(name), new.get(name)) {
            (_, None) => Some(PropChange::Remove(name)),
            (Some(old_value), Some(new_value)) if old_value == new_value => None,
            (_, Some(new_value)) => Some(PropChange::Set(name, new_value)),
        })
        .collect()
}
