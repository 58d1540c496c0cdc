// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projected-view bookkeeping.
//!
//! A view attached to a container other than the one it was declared in is a
//! *projected* view. Its declared container keeps a membership-only record of
//! it, so content queries on the declaring side can still find it. The set
//! has no order; reordering a view inside its attach container never touches
//! it.

use alloc::vec::Vec;

use crate::view::{ContainerId, ViewId, ViewTree};

impl<N> ViewTree<N> {
    /// Records `view` as projected if `attached` differs from its declared
    /// container.
    ///
    /// Returns the declared container when the view was added to its set.
    pub(crate) fn track_projection(
        &mut self,
        view: ViewId,
        attached: ContainerId,
    ) -> Option<ContainerId> {
        let declared = self.declared_container(view)?;
        if declared == attached {
            return None;
        }
        let set = self.projected[declared.idx as usize].get_or_insert_with(Vec::new);
        if set.contains(&view) {
            return None;
        }
        set.push(view);
        Some(declared)
    }

    /// Drops `view` from its declared container's projected set, if present.
    ///
    /// Returns the declared container when the view was removed.
    pub(crate) fn untrack_projection(&mut self, view: ViewId) -> Option<ContainerId> {
        let declared = self.declared_container(view)?;
        let set = self.projected[declared.idx as usize].as_mut()?;
        let pos = set.iter().position(|&v| v == view)?;
        set.swap_remove(pos);
        Some(declared)
    }
}
