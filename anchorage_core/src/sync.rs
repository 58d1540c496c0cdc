// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render synchronization.
//!
//! Translates a logical position in a container's view list into
//! [`Renderer`] calls. Only adjacent-sibling information is used: a view is
//! placed right after the last node of the view before it (or right after the
//! container anchor when it is first), never by rebuilding the parent's
//! children.

use alloc::vec::Vec;

use crate::renderer::Renderer;
use crate::view::{ContainerId, ViewId, ViewTree};

/// Inserts `view`'s root nodes into the render tree after `prev`.
///
/// `prev` is the view immediately before `view` in `container`'s list, or
/// `None` when `view` is first. If `prev` (and every view before it) renders
/// nothing, the container anchor is used instead.
///
/// Nothing is inserted while the anchor itself is unmounted; the nodes come
/// along when whatever holds the anchor is attached.
///
/// Returns the number of nodes inserted.
pub fn render_attach<N, R>(
    tree: &ViewTree<N>,
    renderer: &mut R,
    container: ContainerId,
    prev: Option<ViewId>,
    view: ViewId,
) -> usize
where
    N: Clone,
    R: Renderer<Node = N> + ?Sized,
{
    let anchor = insertion_anchor(tree, container, prev);
    let Some(parent) = renderer.parent_node(anchor) else {
        return 0;
    };
    let next = renderer.next_sibling(anchor);

    let mut nodes = Vec::new();
    tree.root_nodes_into(view, &mut nodes);
    for node in &nodes {
        // Always insert before the reported sibling, even if it is a host
        // placeholder.
        renderer.insert_before(&parent, node, next.as_ref());
    }
    nodes.len()
}

/// Removes `view`'s root nodes from wherever they currently sit.
///
/// Returns the number of nodes removed.
pub fn render_detach<N, R>(tree: &ViewTree<N>, renderer: &mut R, view: ViewId) -> usize
where
    N: Clone,
    R: Renderer<Node = N> + ?Sized,
{
    let mut nodes = Vec::new();
    tree.root_nodes_into(view, &mut nodes);
    let mut removed = 0;
    for node in &nodes {
        if let Some(parent) = renderer.parent_node(node) {
            renderer.remove_child(&parent, node);
            removed += 1;
        }
    }
    removed
}

/// Finds the node that `view`'s nodes must follow.
fn insertion_anchor<'t, N: Clone>(
    tree: &'t ViewTree<N>,
    container: ContainerId,
    prev: Option<ViewId>,
) -> &'t N {
    let Some(prev) = prev else {
        return tree.anchor(container);
    };
    if let Some(last) = tree.last_root_node(prev) {
        return last;
    }
    // `prev` renders nothing: keep walking back through the list.
    let views = tree.views(container).as_slice();
    let end = views.iter().position(|&v| v == prev).unwrap_or(0);
    views[..end]
        .iter()
        .rev()
        .find_map(|&v| tree.last_root_node(v))
        .unwrap_or_else(|| tree.anchor(container))
}
