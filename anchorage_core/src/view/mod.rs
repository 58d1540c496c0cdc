// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! View tree data model.
//!
//! An *embedded view* is a dynamically instantiated piece of UI (one loop
//! iteration, one branch of a conditional). A *view container* is an anchor
//! point in the render tree that owns an ordered list of embedded views.
//!
//! - Identity: [`ViewId`] and [`ContainerId`] are generational handles that
//!   become stale when the slot is destroyed.
//! - Ownership: a container owns its views through its [`ViewList`]. The
//!   reverse links (attach container, declared container, host view) are
//!   plain indices and never keep anything alive.
//! - Render output: a view's top level is described by [`RootSlot`]s. The
//!   flattened node sequence, including nested attached views, comes from
//!   [`ViewTree::root_nodes`].
//! - Projection: a view attached somewhere other than the container it was
//!   declared in is listed in its declared container's
//!   [`projected_views`](ViewTree::projected_views).
//!
//! Mutating the attach state goes through
//! [`ViewContainerOps`](crate::ops::ViewContainerOps); this module only
//! allocates, destroys, and answers queries.

mod id;
mod list;
mod roots;
mod store;
mod traverse;

pub use id::{ContainerId, INVALID, ViewId};
pub use list::ViewList;
pub use roots::RootSlot;
pub use store::ViewTree;
pub use traverse::{Ancestor, QueryAncestors};
