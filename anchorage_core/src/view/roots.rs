// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Root render node collection.
//!
//! A view's template decides what sits at its top level. Each entry is either
//! a plain render node or the anchor of a nested container. A nested anchor
//! contributes its own node followed by the root nodes of every view attached
//! to that container, recursively. Detached views contribute nothing.

use alloc::vec::Vec;

use super::id::{ContainerId, ViewId};
use super::store::ViewTree;

/// One top-level entry of a view's render output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RootSlot<N> {
    /// A render node produced directly by the view.
    Node(N),
    /// A nested container whose anchor sits at the view's top level.
    Anchor(ContainerId),
}

impl<N: Clone> ViewTree<N> {
    /// Returns the view's root render nodes in order.
    #[must_use]
    pub fn root_nodes(&self, view: ViewId) -> Vec<N> {
        let mut out = Vec::new();
        self.root_nodes_into(view, &mut out);
        out
    }

    /// Appends the view's root render nodes to `out`, in order.
    pub fn root_nodes_into(&self, view: ViewId, out: &mut Vec<N>) {
        self.validate_view(view);
        for slot in &self.roots[view.idx as usize] {
            match slot {
                RootSlot::Node(node) => out.push(node.clone()),
                RootSlot::Anchor(container) => self.container_nodes_into(*container, out),
            }
        }
    }

    /// Returns the last root render node of a view without collecting the
    /// whole sequence.
    ///
    /// Returns `None` for a view that produces no nodes at all.
    #[must_use]
    pub fn last_root_node(&self, view: ViewId) -> Option<&N> {
        self.validate_view(view);
        self.roots[view.idx as usize]
            .iter()
            .rev()
            .find_map(|slot| match slot {
                RootSlot::Node(node) => Some(node),
                RootSlot::Anchor(container) => self.container_last_node(*container),
            })
    }

    fn container_nodes_into(&self, container: ContainerId, out: &mut Vec<N>) {
        if !self.is_container_alive(container) {
            return;
        }
        out.push(self.anchor(container).clone());
        for view in self.views(container) {
            self.root_nodes_into(view, out);
        }
    }

    fn container_last_node(&self, container: ContainerId) -> Option<&N> {
        if !self.is_container_alive(container) {
            return None;
        }
        self.views(container)
            .as_slice()
            .iter()
            .rev()
            .find_map(|&view| self.last_root_node(view))
            .or_else(|| Some(self.anchor(container)))
    }
}
