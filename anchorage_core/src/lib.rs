// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered embedded views in view containers, kept in sync with a render tree.
//!
//! `anchorage_core` maintains the order of dynamically created *embedded
//! views* (loop rows, conditional branches, dynamic inserts) inside the anchor
//! points that hold them, and keeps the physical render tree's node order in
//! step with that logical order. It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! A structural directive (outside this crate) decides *when* to change
//! things and calls one of three operations:
//!
//! ```text
//!   attach / detach / move_view
//!       │
//!       ▼
//!   ViewList (logical order) ──► projected-view sets
//!       │
//!       ▼
//!   QueryInvalidator::mark_ancestor_queries_dirty()
//!       │
//!       ▼
//!   sync::render_attach / render_detach ──► Renderer primitives
//! ```
//!
//! **[`view`]**: Struct-of-arrays storage for views and containers with
//! generational handles, the ordered [`ViewList`](view::ViewList), and root
//! render node collection.
//!
//! **[`ops`]**: [`ViewContainerOps`](ops::ViewContainerOps): attach, detach,
//! move, and clear.
//!
//! **[`sync`]**: Places a view's root nodes using only the neighbouring
//! view's last node (or the container anchor) and the renderer's sibling
//! primitives.
//!
//! **[`renderer`]**: The [`Renderer`](renderer::Renderer) trait that
//! render-tree backends implement.
//!
//! **[`query`]**: The [`QueryInvalidator`](query::QueryInvalidator) hook and
//! a dirty-set implementation on top of `understory_dirty`.
//!
//! **[`dirty`]**: Dirty-tracking channels used by the query tracker.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! structural-update instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Concurrency
//!
//! Operations borrow the tree mutably for their whole duration, so one
//! container sees exactly one mutator at a time and calls are totally ordered
//! by the borrow checker. Nothing blocks or suspends.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Adds one event per
//!   render-sync pass.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod dirty;
pub mod error;
pub mod ops;
mod projection;
pub mod query;
pub mod renderer;
pub mod sync;
pub mod trace;
pub mod view;
