// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Query invalidation hook.
//!
//! Every structural change tells a [`QueryInvalidator`] which view moved, so
//! the queries that could observe it are re-evaluated on the next
//! change-detection pass. The invalidator is passed explicitly to
//! [`ViewContainerOps`](crate::ops::ViewContainerOps); there is no global
//! service to look it up from.
//!
//! [`QueryTracker`] is a ready-made implementation that records dirty
//! ancestors with [`understory_dirty`]. Query evaluation itself is out of
//! scope: callers drain the tracker with [`QueryTracker::take_dirty`] and
//! re-run whatever queries hang off the returned slots.

use alloc::vec::Vec;

use understory_dirty::{CycleHandling, DirtyTracker};

use crate::dirty;
use crate::view::{Ancestor, ContainerId, ViewId, ViewTree};

/// Marks queries over a view's ancestors as stale.
pub trait QueryInvalidator<N> {
    /// Called after `view` was attached, detached, or moved.
    ///
    /// `tree` already reflects the change. Calling this more than once for
    /// the same change must leave the same dirty state as calling it once.
    fn mark_ancestor_queries_dirty(&mut self, tree: &ViewTree<N>, view: ViewId);
}

/// A [`QueryInvalidator`] that ignores every change.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopInvalidator;

impl<N> QueryInvalidator<N> for NoopInvalidator {
    fn mark_ancestor_queries_dirty(&mut self, tree: &ViewTree<N>, view: ViewId) {
        _ = (tree, view);
    }
}

/// Containers and views whose queries need re-evaluation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DirtyQueries {
    /// Containers whose content queries are stale.
    pub containers: Vec<ContainerId>,
    /// Views whose template queries are stale.
    pub views: Vec<ViewId>,
}

impl DirtyQueries {
    /// Returns whether nothing is dirty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.containers.is_empty() && self.views.is_empty()
    }
}

/// Dirty-set backed [`QueryInvalidator`].
///
/// Marks every ancestor yielded by [`ViewTree::query_ancestors`]. Marks are
/// set-based, so redundant calls are harmless.
#[derive(Debug)]
pub struct QueryTracker {
    dirty: DirtyTracker<u32>,
}

impl Default for QueryTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryTracker {
    /// Creates a tracker with nothing marked.
    #[must_use]
    pub fn new() -> Self {
        Self {
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
        }
    }

    /// Drains every dirty mark.
    ///
    /// Slots destroyed since they were marked are skipped. Output order is
    /// deterministic.
    pub fn take_dirty<N>(&mut self, tree: &ViewTree<N>) -> DirtyQueries {
        let containers = self
            .dirty
            .drain(dirty::CONTAINER_QUERIES)
            .deterministic()
            .run()
            .filter_map(|idx| tree.live_container_at(idx))
            .collect();
        let views = self
            .dirty
            .drain(dirty::VIEW_QUERIES)
            .deterministic()
            .run()
            .filter_map(|idx| tree.live_view_at(idx))
            .collect();
        DirtyQueries { containers, views }
    }
}

impl<N> QueryInvalidator<N> for QueryTracker {
    fn mark_ancestor_queries_dirty(&mut self, tree: &ViewTree<N>, view: ViewId) {
        for ancestor in tree.query_ancestors(view) {
            match ancestor {
                Ancestor::Container(c) => self.dirty.mark(c.idx, dirty::CONTAINER_QUERIES),
                Ancestor::View(v) => self.dirty.mark(v.idx, dirty::VIEW_QUERIES),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn marks_declaration_chain() {
        let mut tree = ViewTree::new();
        let outer = tree.create_container(0_u32, None);
        let host = tree.create_view(Some(outer), vec![]);
        let inner = tree.create_container(1, Some(host));
        let view = tree.create_view(Some(inner), vec![]);

        let mut tracker = QueryTracker::new();
        tracker.mark_ancestor_queries_dirty(&tree, view);
        let dirty = tracker.take_dirty(&tree);

        assert_eq!(dirty.containers.len(), 2);
        assert!(dirty.containers.contains(&outer), "got: {dirty:?}");
        assert!(dirty.containers.contains(&inner), "got: {dirty:?}");
        assert_eq!(dirty.views, vec![host]);
    }

    #[test]
    fn redundant_marks_are_idempotent() {
        let mut tree = ViewTree::new();
        let c = tree.create_container(0_u32, None);
        let view = tree.create_view(Some(c), vec![]);

        let mut tracker = QueryTracker::new();
        tracker.mark_ancestor_queries_dirty(&tree, view);
        tracker.mark_ancestor_queries_dirty(&tree, view);
        let dirty = tracker.take_dirty(&tree);
        assert_eq!(dirty.containers, vec![c]);
        assert!(dirty.views.is_empty(), "no host views in this tree");
    }

    #[test]
    fn take_dirty_drains() {
        let mut tree = ViewTree::new();
        let c = tree.create_container(0_u32, None);
        let view = tree.create_view(Some(c), vec![]);

        let mut tracker = QueryTracker::new();
        tracker.mark_ancestor_queries_dirty(&tree, view);
        assert!(!tracker.take_dirty(&tree).is_empty(), "first drain sees the mark");
        assert!(tracker.take_dirty(&tree).is_empty(), "second drain is empty");
    }

    #[test]
    fn destroyed_slots_are_skipped() {
        let mut tree = ViewTree::new();
        let c = tree.create_container(0_u32, None);
        let view = tree.create_view(Some(c), vec![]);

        let mut tracker = QueryTracker::new();
        tracker.mark_ancestor_queries_dirty(&tree, view);
        tree.destroy_container(c);
        assert!(tracker.take_dirty(&tree).is_empty(), "container is gone");
    }

    #[test]
    fn noop_invalidator_accepts_calls() {
        let mut tree = ViewTree::<u32>::new();
        let view = tree.create_view(None, vec![]);
        NoopInvalidator.mark_ancestor_queries_dirty(&tree, view);
    }
}
