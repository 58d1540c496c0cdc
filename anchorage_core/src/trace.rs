// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for structural updates.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that
//! [`ViewContainerOps`](crate::ops::ViewContainerOps) calls as it attaches,
//! detaches, and moves views. All method bodies default to no-ops, so
//! implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies.
//! - `trace-rich` (implies `trace`) gates [`RenderSyncEvent`] and the
//!   corresponding `TraceSink` method.

use crate::error::ViewError;
use crate::view::{ContainerId, ViewId};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which container operation an event belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// [`attach`](crate::ops::ViewContainerOps::attach).
    Attach,
    /// [`detach`](crate::ops::ViewContainerOps::detach).
    Detach,
    /// [`move_view`](crate::ops::ViewContainerOps::move_view).
    Move,
}

/// How a projected-view set changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProjectionChange {
    /// The view joined its declared container's set.
    Added,
    /// The view left its declared container's set.
    Removed,
}

/// Which renderer primitive a render-sync pass issued.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RenderAction {
    /// Nodes were inserted before a reference sibling.
    Insert,
    /// Nodes were removed from their parent.
    Remove,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted after a view was attached.
#[derive(Clone, Copy, Debug)]
pub struct AttachEvent {
    /// Container the view joined.
    pub container: ContainerId,
    /// The attached view.
    pub view: ViewId,
    /// Position the view now occupies.
    pub index: usize,
    /// Container length after the attach.
    pub len: usize,
}

/// Emitted after a view was detached.
#[derive(Clone, Copy, Debug)]
pub struct DetachEvent {
    /// Container the view left.
    pub container: ContainerId,
    /// The detached view.
    pub view: ViewId,
    /// Position the view occupied.
    pub index: usize,
    /// Container length after the detach.
    pub len: usize,
}

/// Emitted after a view was moved within its container.
#[derive(Clone, Copy, Debug)]
pub struct MoveEvent {
    /// Container holding the view.
    pub container: ContainerId,
    /// The moved view.
    pub view: ViewId,
    /// Previous position.
    pub from: usize,
    /// New position.
    pub to: usize,
}

/// Emitted when a projected-view set gains or loses a member.
#[derive(Clone, Copy, Debug)]
pub struct ProjectionEvent {
    /// Container the view was declared in.
    pub declared: ContainerId,
    /// The projected view.
    pub view: ViewId,
    /// Whether it joined or left.
    pub change: ProjectionChange,
}

/// Emitted when an operation was refused.
#[derive(Clone, Copy, Debug)]
pub struct RejectedEvent {
    /// Which operation was refused.
    pub op: OpKind,
    /// Container the operation targeted.
    pub container: ContainerId,
    /// Why.
    pub error: ViewError,
}

/// Emitted once per render-sync pass.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct RenderSyncEvent {
    /// The view whose root nodes were relocated.
    pub view: ViewId,
    /// Which primitive was issued.
    pub action: RenderAction,
    /// How many nodes the renderer was asked to relocate.
    pub nodes: usize,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the view container operations.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called after a view was attached.
    fn on_attach(&mut self, e: &AttachEvent) {
        _ = e;
    }

    /// Called after a view was detached.
    fn on_detach(&mut self, e: &DetachEvent) {
        _ = e;
    }

    /// Called after a view was moved.
    fn on_move(&mut self, e: &MoveEvent) {
        _ = e;
    }

    /// Called when a projected-view set changes.
    fn on_projection(&mut self, e: &ProjectionEvent) {
        _ = e;
    }

    /// Called when an operation is refused.
    fn on_rejected(&mut self, e: &RejectedEvent) {
        _ = e;
    }

    /// Called after each render-sync pass (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_render_sync(&mut self, e: &RenderSyncEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits an [`AttachEvent`].
    #[inline]
    pub fn attach(&mut self, e: &AttachEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_attach(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DetachEvent`].
    #[inline]
    pub fn detach(&mut self, e: &DetachEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_detach(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`MoveEvent`].
    #[inline]
    pub fn moved(&mut self, e: &MoveEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_move(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ProjectionEvent`].
    #[inline]
    pub fn projection(&mut self, e: &ProjectionEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_projection(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RejectedEvent`].
    #[inline]
    pub fn rejected(&mut self, e: &RejectedEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_rejected(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RenderSyncEvent`] (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn render_sync(&mut self, e: &RenderSyncEvent) {
        if let Some(s) = &mut self.sink {
            s.on_render_sync(e);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
