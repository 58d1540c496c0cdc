// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View and container identity types.

use core::fmt;

/// Sentinel value indicating "no view" or "no container" in index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to an embedded view in a [`ViewTree`](super::ViewTree).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a view is destroyed and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl ViewId {
    /// Rebuilds a handle from its index and generation.
    ///
    /// Meant for decoding recorded diagnostics. A fabricated handle that does
    /// not match a live view is rejected as stale by every tree operation.
    #[inline]
    #[must_use]
    pub const fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self {
            idx: index,
            generation,
        }
    }

    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ViewId({}@gen{})", self.idx, self.generation)
    }
}

/// A handle to a view container (an anchor point) in a
/// [`ViewTree`](super::ViewTree).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId {
    pub(crate) idx: u32,
    pub(crate) generation: u32,
}

impl ContainerId {
    /// Rebuilds a handle from its index and generation.
    ///
    /// Meant for decoding recorded diagnostics. A fabricated handle that does
    /// not match a live container is rejected as stale by every tree operation.
    #[inline]
    #[must_use]
    pub const fn from_raw_parts(index: u32, generation: u32) -> Self {
        Self {
            idx: index,
            generation,
        }
    }

    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContainerId({}@gen{})", self.idx, self.generation)
    }
}
