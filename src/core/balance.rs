//! Height equalization — give every sibling column the same rendered height.

use super::node::{NodeId, NodeTree};

/// Set every column's explicit height to the tallest natural height among
/// them.
///
/// Each column's override is cleared first so its natural content height can
/// be measured; running this twice without a content change is therefore a
/// no-op the second time.
pub fn equalize(tree: &mut NodeTree, columns: &[NodeId]) {
    let mut max_height = 0;
    for &column in columns {
        tree.get_mut(column).height_override = None;
        max_height = max_height.max(tree.natural_height(column));
    }
    for &column in columns {
        tree.get_mut(column).height_override = Some(max_height);
    }
}
