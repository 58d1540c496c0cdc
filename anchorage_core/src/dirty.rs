// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants for query invalidation.
//!
//! [`QueryTracker`](crate::query::QueryTracker) records stale queries with
//! [`understory_dirty`]. Containers and views live in separate slot spaces,
//! so each gets its own channel and raw slot indices never collide.
//!
//! Both channels are local-only: the ancestor walk already names every slot
//! that needs marking, so no dependency edges are registered.

use understory_dirty::Channel;

/// Queries anchored on a container (content queries over its views).
pub const CONTAINER_QUERIES: Channel = Channel::new(0);

/// Queries declared by a view's template.
pub const VIEW_QUERIES: Channel = Channel::new(1);
