// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ancestry traversal for query invalidation.

use super::id::{ContainerId, ViewId};
use super::store::ViewTree;

/// One step on the way from a view to the root of its declaration chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Ancestor {
    /// A container enclosing the view.
    Container(ContainerId),
    /// The view whose template holds that container's anchor.
    View(ViewId),
}

/// An iterator over the query-bearing ancestors of a view.
///
/// Created by [`ViewTree::query_ancestors`].
#[derive(Debug)]
pub struct QueryAncestors<'a, N> {
    tree: &'a ViewTree<N>,
    next: Option<Ancestor>,
    budget: u32,
}

impl<N> ViewTree<N> {
    /// Returns the ancestors whose queries can observe `view`.
    ///
    /// Queries follow the declaration chain, not the attach chain: the walk
    /// starts at the view's declared container, then alternates between host
    /// views and their own declared containers. A view keeps its declaration
    /// while detached, so the same ancestors are marked on attach and detach.
    ///
    /// The walk yields at most as many containers as the tree holds.
    #[must_use]
    pub fn query_ancestors(&self, view: ViewId) -> QueryAncestors<'_, N> {
        QueryAncestors {
            tree: self,
            next: self.declared_container(view).map(Ancestor::Container),
            budget: self.container_len,
        }
    }
}

impl<N> Iterator for QueryAncestors<'_, N> {
    type Item = Ancestor;

    fn next(&mut self) -> Option<Ancestor> {
        let current = self.next.take()?;
        self.next = match current {
            Ancestor::Container(container) => {
                if self.budget == 0 {
                    return None;
                }
                self.budget -= 1;
                self.tree.host_view(container).map(Ancestor::View)
            }
            Ancestor::View(view) => self
                .tree
                .declared_container(view)
                .map(Ancestor::Container),
        };
        Some(current)
    }
}
