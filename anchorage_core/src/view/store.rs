// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays storage for embedded views and view containers.

use alloc::vec::Vec;

use super::id::{ContainerId, INVALID, ViewId};
use super::list::ViewList;
use super::roots::RootSlot;

/// Storage for all embedded views and view containers of one UI tree.
///
/// Views and containers are addressed by [`ViewId`] and [`ContainerId`]
/// handles. Each occupies a slot in parallel arrays; destroyed slots are
/// recycled via a free list, and generation counters prevent stale handle
/// access.
///
/// A container owns its views through its [`ViewList`]. Every link pointing
/// the other way (a view's attach container, its declared container, a
/// container's host view) is a non-owning index or handle.
///
/// `N` is the renderer's node handle type.
#[derive(Debug)]
pub struct ViewTree<N> {
    // -- Views --
    pub(crate) attached_to: Vec<u32>,
    pub(crate) declared_in: Vec<Option<ContainerId>>,
    pub(crate) roots: Vec<Vec<RootSlot<N>>>,
    pub(crate) view_generation: Vec<u32>,
    pub(crate) view_free: Vec<u32>,
    pub(crate) view_len: u32,

    // -- Containers --
    pub(crate) anchor: Vec<Option<N>>,
    pub(crate) host: Vec<Option<ViewId>>,
    pub(crate) views: Vec<ViewList>,
    pub(crate) projected: Vec<Option<Vec<ViewId>>>,
    pub(crate) container_generation: Vec<u32>,
    pub(crate) container_free: Vec<u32>,
    pub(crate) container_len: u32,
}

impl<N> Default for ViewTree<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> ViewTree<N> {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            attached_to: Vec::new(),
            declared_in: Vec::new(),
            roots: Vec::new(),
            view_generation: Vec::new(),
            view_free: Vec::new(),
            view_len: 0,
            anchor: Vec::new(),
            host: Vec::new(),
            views: Vec::new(),
            projected: Vec::new(),
            container_generation: Vec::new(),
            container_free: Vec::new(),
            container_len: 0,
        }
    }

    // -- Container allocation --

    /// Creates a container anchored at `anchor`.
    ///
    /// `host` is the view whose template holds the anchor, or `None` for an
    /// anchor that lives outside any embedded view.
    ///
    /// # Panics
    ///
    /// Panics if `host` is stale.
    pub fn create_container(&mut self, anchor: N, host: Option<ViewId>) -> ContainerId {
        if let Some(host) = host {
            self.validate_view(host);
        }
        let idx = if let Some(idx) = self.container_free.pop() {
            self.container_generation[idx as usize] += 1;
            self.anchor[idx as usize] = Some(anchor);
            self.host[idx as usize] = host;
            self.views[idx as usize] = ViewList::new();
            self.projected[idx as usize] = None;
            idx
        } else {
            let idx = self.container_len;
            self.container_len += 1;
            self.anchor.push(Some(anchor));
            self.host.push(host);
            self.views.push(ViewList::new());
            self.projected.push(None);
            self.container_generation.push(0);
            idx
        };

        ContainerId {
            idx,
            generation: self.container_generation[idx as usize],
        }
    }

    /// Destroys a container, freeing its slot for reuse.
    ///
    /// Views declared in this container but attached elsewhere stay attached;
    /// their declared-container link simply stops resolving.
    ///
    /// # Panics
    ///
    /// Panics if views are still attached to the container or the handle is
    /// stale.
    pub fn destroy_container(&mut self, id: ContainerId) {
        self.validate_container(id);
        let idx = id.idx as usize;
        assert!(
            self.views[idx].is_empty(),
            "cannot destroy container with attached views"
        );
        self.anchor[idx] = None;
        self.host[idx] = None;
        self.projected[idx] = None;
        self.container_generation[idx] += 1;
        self.container_free.push(id.idx);
    }

    /// Returns whether the given handle refers to a live container.
    #[must_use]
    pub fn is_container_alive(&self, id: ContainerId) -> bool {
        id.idx < self.container_len
            && self.container_generation[id.idx as usize] == id.generation
            && !self.container_free.contains(&id.idx)
    }

    // -- View allocation --

    /// Creates a detached view.
    ///
    /// `declared` is the container the view was authored in; it is fixed for
    /// the lifetime of the view. `roots` describes the view's top-level render
    /// output as produced by its template.
    ///
    /// # Panics
    ///
    /// Panics if `declared` or any container referenced from `roots` is stale.
    pub fn create_view(
        &mut self,
        declared: Option<ContainerId>,
        roots: Vec<RootSlot<N>>,
    ) -> ViewId {
        if let Some(declared) = declared {
            self.validate_container(declared);
        }
        for slot in &roots {
            if let RootSlot::Anchor(container) = slot {
                self.validate_container(*container);
            }
        }

        let idx = if let Some(idx) = self.view_free.pop() {
            self.view_generation[idx as usize] += 1;
            self.attached_to[idx as usize] = INVALID;
            self.declared_in[idx as usize] = declared;
            self.roots[idx as usize] = roots;
            idx
        } else {
            let idx = self.view_len;
            self.view_len += 1;
            self.attached_to.push(INVALID);
            self.declared_in.push(declared);
            self.roots.push(roots);
            self.view_generation.push(0);
            idx
        };

        ViewId {
            idx,
            generation: self.view_generation[idx as usize],
        }
    }

    /// Appends a root slot to a detached view.
    ///
    /// Used while instantiating a template whose anchors belong to containers
    /// hosted by the view itself, which can only be created once the view
    /// exists.
    ///
    /// # Panics
    ///
    /// Panics if the view is attached, or if either handle is stale.
    pub fn push_root_slot(&mut self, view: ViewId, slot: RootSlot<N>) {
        self.validate_view(view);
        if let RootSlot::Anchor(container) = &slot {
            self.validate_container(*container);
        }
        assert!(
            self.attached_to[view.idx as usize] == INVALID,
            "cannot change the roots of an attached view"
        );
        self.roots[view.idx as usize].push(slot);
    }

    /// Destroys a detached view, freeing its slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the view is still attached or the handle is stale.
    pub fn destroy_view(&mut self, id: ViewId) {
        self.validate_view(id);
        let idx = id.idx as usize;
        assert!(
            self.attached_to[idx] == INVALID,
            "cannot destroy attached view"
        );
        self.declared_in[idx] = None;
        self.roots[idx] = Vec::new();
        self.view_generation[idx] += 1;
        self.view_free.push(id.idx);
    }

    /// Returns whether the given handle refers to a live view.
    #[must_use]
    pub fn is_view_alive(&self, id: ViewId) -> bool {
        id.idx < self.view_len
            && self.view_generation[id.idx as usize] == id.generation
            && !self.view_free.contains(&id.idx)
    }

    // -- View queries --

    /// Returns the container the view is currently attached to.
    #[must_use]
    pub fn container_of(&self, view: ViewId) -> Option<ContainerId> {
        self.validate_view(view);
        self.container_at(self.attached_to[view.idx as usize])
    }

    /// Returns the container the view was declared in, if it is still alive.
    #[must_use]
    pub fn declared_container(&self, view: ViewId) -> Option<ContainerId> {
        self.validate_view(view);
        self.declared_in[view.idx as usize].filter(|&c| self.is_container_alive(c))
    }

    /// Returns whether the view is attached somewhere other than its declared
    /// container.
    #[must_use]
    pub fn is_projected(&self, view: ViewId) -> bool {
        match (self.declared_container(view), self.container_of(view)) {
            (Some(declared), Some(attached)) => declared != attached,
            _ => false,
        }
    }

    /// Returns the template-supplied root slots of a view.
    #[must_use]
    pub fn root_slots(&self, view: ViewId) -> &[RootSlot<N>] {
        self.validate_view(view);
        &self.roots[view.idx as usize]
    }

    // -- Container queries --

    /// Returns the container's anchor render node.
    #[must_use]
    pub fn anchor(&self, container: ContainerId) -> &N {
        self.validate_container(container);
        match &self.anchor[container.idx as usize] {
            Some(node) => node,
            None => unreachable!("live container without an anchor"),
        }
    }

    /// Returns the view whose template holds the container's anchor.
    #[must_use]
    pub fn host_view(&self, container: ContainerId) -> Option<ViewId> {
        self.validate_container(container);
        self.host[container.idx as usize].filter(|&v| self.is_view_alive(v))
    }

    /// Returns the ordered list of views attached to the container.
    #[must_use]
    pub fn views(&self, container: ContainerId) -> &ViewList {
        self.validate_container(container);
        &self.views[container.idx as usize]
    }

    /// Returns the number of views attached to the container.
    #[must_use]
    pub fn len(&self, container: ContainerId) -> usize {
        self.views(container).len()
    }

    /// Returns the view at `index` in the container.
    #[must_use]
    pub fn view_at(&self, container: ContainerId, index: usize) -> Option<ViewId> {
        self.views(container).get(index)
    }

    /// Returns the position of `view` in the container.
    #[must_use]
    pub fn index_of(&self, container: ContainerId, view: ViewId) -> Option<usize> {
        self.views(container).index_of(view)
    }

    /// Returns the views declared in this container but attached elsewhere.
    ///
    /// The order carries no meaning.
    #[must_use]
    pub fn projected_views(&self, container: ContainerId) -> &[ViewId] {
        self.validate_container(container);
        self.projected[container.idx as usize]
            .as_deref()
            .unwrap_or(&[])
    }

    // -- Internal helpers --

    /// Resolves a raw container slot index into a handle.
    pub(crate) fn container_at(&self, idx: u32) -> Option<ContainerId> {
        (idx != INVALID).then(|| ContainerId {
            idx,
            generation: self.container_generation[idx as usize],
        })
    }

    /// Resolves a raw view slot index into a handle, skipping freed slots.
    pub(crate) fn live_view_at(&self, idx: u32) -> Option<ViewId> {
        let id = ViewId {
            idx,
            generation: *self.view_generation.get(idx as usize)?,
        };
        self.is_view_alive(id).then_some(id)
    }

    /// Resolves a raw container slot index into a handle, skipping freed
    /// slots.
    pub(crate) fn live_container_at(&self, idx: u32) -> Option<ContainerId> {
        let id = ContainerId {
            idx,
            generation: *self.container_generation.get(idx as usize)?,
        };
        self.is_container_alive(id).then_some(id)
    }

    /// Panics if the handle is stale.
    pub(crate) fn validate_view(&self, id: ViewId) {
        assert!(
            id.idx < self.view_len && self.view_generation[id.idx as usize] == id.generation,
            "stale ViewId: {id:?} (current gen: {})",
            if id.idx < self.view_len {
                self.view_generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Panics if the handle is stale.
    pub(crate) fn validate_container(&self, id: ContainerId) {
        assert!(
            id.idx < self.container_len
                && self.container_generation[id.idx as usize] == id.generation,
            "stale ContainerId: {id:?} (current gen: {})",
            if id.idx < self.container_len {
                self.container_generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn create_and_destroy_view() {
        let mut tree = ViewTree::<u32>::new();
        let view = tree.create_view(None, vec![RootSlot::Node(1)]);
        assert!(tree.is_view_alive(view));
        assert_eq!(tree.container_of(view), None);
        tree.destroy_view(view);
        assert!(!tree.is_view_alive(view));
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut tree = ViewTree::<u32>::new();
        let v1 = tree.create_view(None, vec![]);
        tree.destroy_view(v1);
        let v2 = tree.create_view(None, vec![]);
        assert!(!tree.is_view_alive(v1));
        assert!(tree.is_view_alive(v2));
        assert_eq!(v1.idx, v2.idx);
        assert_ne!(v1.generation, v2.generation);
    }

    #[test]
    fn container_starts_empty() {
        let mut tree = ViewTree::new();
        let c = tree.create_container(7_u32, None);
        assert_eq!(*tree.anchor(c), 7);
        assert_eq!(tree.len(c), 0);
        assert!(tree.projected_views(c).is_empty());
        assert_eq!(tree.host_view(c), None);
    }

    #[test]
    fn declared_container_stops_resolving_after_destroy() {
        let mut tree = ViewTree::new();
        let c = tree.create_container(0_u32, None);
        let view = tree.create_view(Some(c), vec![]);
        assert_eq!(tree.declared_container(view), Some(c));
        tree.destroy_container(c);
        assert_eq!(tree.declared_container(view), None);
    }

    #[test]
    fn host_view_is_weak() {
        let mut tree = ViewTree::new();
        let host = tree.create_view(None, vec![]);
        let c = tree.create_container(0_u32, Some(host));
        assert_eq!(tree.host_view(c), Some(host));
        tree.destroy_view(host);
        assert_eq!(tree.host_view(c), None);
    }

    #[test]
    fn reused_container_slot_is_reset() {
        let mut tree = ViewTree::new();
        let c1 = tree.create_container(1_u32, None);
        tree.destroy_container(c1);
        let c2 = tree.create_container(2_u32, None);
        assert_eq!(c1.idx, c2.idx);
        assert!(!tree.is_container_alive(c1));
        assert_eq!(*tree.anchor(c2), 2);
    }

    #[test]
    #[should_panic(expected = "stale ViewId")]
    fn destroyed_view_panics_on_query() {
        let mut tree = ViewTree::<u32>::new();
        let view = tree.create_view(None, vec![]);
        tree.destroy_view(view);
        let _ = tree.container_of(view);
    }

    #[test]
    #[should_panic(expected = "stale ContainerId")]
    fn destroyed_container_panics_on_query() {
        let mut tree = ViewTree::new();
        let c = tree.create_container(0_u32, None);
        tree.destroy_container(c);
        let _ = tree.len(c);
    }

    #[test]
    #[should_panic(expected = "stale ContainerId")]
    fn create_view_rejects_stale_declared_container() {
        let mut tree = ViewTree::new();
        let c = tree.create_container(0_u32, None);
        tree.destroy_container(c);
        let _ = tree.create_view(Some(c), vec![]);
    }

    #[test]
    fn push_root_slot_links_hosted_anchor() {
        let mut tree = ViewTree::new();
        let host = tree.create_view(None, vec![RootSlot::Node(1_u32)]);
        let inner = tree.create_container(2, Some(host));
        tree.push_root_slot(host, RootSlot::Anchor(inner));
        assert_eq!(tree.root_slots(host).len(), 2);
        assert_eq!(tree.host_view(inner), Some(host));
    }

    #[test]
    #[should_panic(expected = "cannot change the roots of an attached view")]
    fn push_root_slot_rejects_attached_view() {
        let mut tree = ViewTree::new();
        let c = tree.create_container(0_u32, None);
        let view = tree.create_view(None, vec![]);
        tree.views[c.idx as usize].insert(0, view);
        tree.attached_to[view.idx as usize] = c.idx;
        tree.push_root_slot(view, RootSlot::Node(1));
    }
}
