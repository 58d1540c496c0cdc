// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The ordered view sequence owned by each container.

use alloc::vec::Vec;
use core::slice;

use super::id::ViewId;

/// Ordered list of the views attached to one container.
///
/// List order is render order. Insertion at the end and removal of the last
/// entry take the `push`/`pop` path; anything else shifts the tail.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ViewList {
    items: Vec<ViewId>,
}

impl ViewList {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Returns the number of attached views.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether no views are attached.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the view at `index`, if any.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<ViewId> {
        self.items.get(index).copied()
    }

    /// Returns the last view, if any.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<ViewId> {
        self.items.last().copied()
    }

    /// Returns the position of `view`, if it is in the list.
    #[must_use]
    pub fn index_of(&self, view: ViewId) -> Option<usize> {
        self.items.iter().position(|&v| v == view)
    }

    /// Returns whether `view` is in the list.
    #[must_use]
    pub fn contains(&self, view: ViewId) -> bool {
        self.items.contains(&view)
    }

    /// Returns the views in order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[ViewId] {
        &self.items
    }

    /// Returns an iterator over the views in order.
    pub fn iter(&self) -> core::iter::Copied<slice::Iter<'_, ViewId>> {
        self.items.iter().copied()
    }

    /// Inserts `view` at `index`, shifting later entries.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub(crate) fn insert(&mut self, index: usize, view: ViewId) {
        if index == self.items.len() {
            self.items.push(view);
        } else {
            self.items.insert(index, view);
        }
    }

    /// Removes and returns the view at `index`, shifting later entries.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub(crate) fn remove(&mut self, index: usize) -> ViewId {
        if index + 1 == self.items.len() {
            if let Some(view) = self.items.pop() {
                return view;
            }
        }
        self.items.remove(index)
    }
}

impl<'a> IntoIterator for &'a ViewList {
    type Item = ViewId;
    type IntoIter = core::iter::Copied<slice::Iter<'a, ViewId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
