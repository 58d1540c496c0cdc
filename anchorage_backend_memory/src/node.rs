// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node handles and child iteration.

use core::fmt;

use crate::renderer::MemoryRenderer;

/// Sentinel for "no node" in link fields.
pub(crate) const NONE: u32 = u32::MAX;

/// A handle to a node in a [`MemoryRenderer`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// An iterator over the visible children of a node.
///
/// Host placeholders are skipped. Created by [`MemoryRenderer::children`].
#[derive(Debug)]
pub struct Children<'a> {
    tree: &'a MemoryRenderer,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(tree: &'a MemoryRenderer, first: u32) -> Self {
        Self {
            tree,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while self.current != NONE {
            let idx = self.current;
            self.current = self.tree.next_sibling[idx as usize];
            if !self.tree.placeholder[idx as usize] {
                return Some(NodeId(idx));
            }
        }
        None
    }
}
