// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attach, detach, and move embedded views.
//!
//! Each operation runs to completion synchronously and, in order:
//!
//! 1. updates the container's ordered [`ViewList`](crate::view::ViewList) and
//!    the view's attach-container link,
//! 2. updates projected-view bookkeeping (attach and detach only),
//! 3. reports the view to the [`QueryInvalidator`],
//! 4. relocates the view's root nodes through the [`Renderer`].
//!
//! Rejected calls return a [`ViewError`] before step 1, leaving the list,
//! the projection sets, and the render tree untouched.
//!
//! A structural pass borrows the tree, renderer, and invalidator together:
//!
//! ```rust,ignore
//! let mut ops = ViewContainerOps::new(&mut tree, &mut renderer, &mut queries);
//! ops.attach(container, None, row)?;
//! ops.move_view(container, 3, Some(0))?;
//! let removed = ops.detach(container, None);
//! ```

use alloc::vec::Vec;

use crate::error::ViewError;
use crate::query::QueryInvalidator;
use crate::renderer::Renderer;
use crate::sync;
use crate::trace::{
    AttachEvent, DetachEvent, MoveEvent, OpKind, ProjectionChange, ProjectionEvent,
    RejectedEvent, TraceSink, Tracer,
};
#[cfg(feature = "trace-rich")]
use crate::trace::{RenderAction, RenderSyncEvent};
use crate::view::{ContainerId, INVALID, ViewId, ViewTree};

/// The three structural operations over a [`ViewTree`], bound to the renderer
/// and query invalidator of one update pass.
pub struct ViewContainerOps<'a, N, R: ?Sized, Q: ?Sized> {
    tree: &'a mut ViewTree<N>,
    renderer: &'a mut R,
    queries: &'a mut Q,
    tracer: Tracer<'a>,
}

impl<N, R: ?Sized, Q: ?Sized> core::fmt::Debug for ViewContainerOps<'_, N, R, Q> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ViewContainerOps")
            .field("tracer", &self.tracer)
            .finish_non_exhaustive()
    }
}

impl<'a, N, R, Q> ViewContainerOps<'a, N, R, Q>
where
    N: Clone,
    R: Renderer<Node = N> + ?Sized,
    Q: QueryInvalidator<N> + ?Sized,
{
    /// Binds the operations to a tree and its collaborators.
    #[must_use]
    pub fn new(tree: &'a mut ViewTree<N>, renderer: &'a mut R, queries: &'a mut Q) -> Self {
        Self {
            tree,
            renderer,
            queries,
            tracer: Tracer::none(),
        }
    }

    /// Routes trace events for this pass to `sink`.
    #[must_use]
    pub fn with_tracer(mut self, sink: &'a mut dyn TraceSink) -> Self {
        self.tracer = Tracer::new(sink);
        self
    }

    /// Returns the tree being mutated.
    #[must_use]
    pub fn tree(&self) -> &ViewTree<N> {
        &*self.tree
    }

    /// Attaches a detached `view` to `container` at `index`.
    ///
    /// `None` appends. Fails with [`ViewError::AlreadyAttached`] if the view
    /// already belongs to a container, and with
    /// [`ViewError::IndexOutOfRange`] if `index` is past the end.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale.
    pub fn attach(
        &mut self,
        container: ContainerId,
        index: Option<usize>,
        view: ViewId,
    ) -> Result<(), ViewError> {
        let len = self.tree.len(container);
        if let Some(current) = self.tree.container_of(view) {
            return Err(self.reject(
                OpKind::Attach,
                container,
                ViewError::AlreadyAttached {
                    view,
                    container: current,
                },
            ));
        }
        let index = index.unwrap_or(len);
        if index > len {
            return Err(self.reject(
                OpKind::Attach,
                container,
                ViewError::IndexOutOfRange { index, len },
            ));
        }

        self.tree.views[container.idx as usize].insert(index, view);
        self.tree.attached_to[view.idx as usize] = container.idx;
        if let Some(declared) = self.tree.track_projection(view, container) {
            self.tracer.projection(&ProjectionEvent {
                declared,
                view,
                change: ProjectionChange::Added,
            });
        }

        self.queries.mark_ancestor_queries_dirty(&*self.tree, view);

        let prev = index
            .checked_sub(1)
            .and_then(|i| self.tree.view_at(container, i));
        self.insert_nodes(container, prev, view);

        self.tracer.attach(&AttachEvent {
            container,
            view,
            index,
            len: len + 1,
        });
        Ok(())
    }

    /// Detaches the view at `index` from `container` and returns it.
    ///
    /// `None`, or an index at or past the end, detaches the last view. An
    /// empty container yields `None` and nothing changes.
    ///
    /// # Panics
    ///
    /// Panics if the container handle is stale.
    pub fn detach(&mut self, container: ContainerId, index: Option<usize>) -> Option<ViewId> {
        let len = self.tree.len(container);
        let index = match index {
            Some(i) if i < len => i,
            _ => len.checked_sub(1)?,
        };

        let view = self.tree.views[container.idx as usize].remove(index);
        self.tree.attached_to[view.idx as usize] = INVALID;
        if let Some(declared) = self.tree.untrack_projection(view) {
            self.tracer.projection(&ProjectionEvent {
                declared,
                view,
                change: ProjectionChange::Removed,
            });
        }

        self.queries.mark_ancestor_queries_dirty(&*self.tree, view);

        self.remove_nodes(view);

        self.tracer.detach(&DetachEvent {
            container,
            view,
            index,
            len: len - 1,
        });
        Some(view)
    }

    /// Moves the view at `old_index` to `new_index` and returns it.
    ///
    /// `new_index` addresses the list with the view already taken out; `None`
    /// moves it to the end. Both indices must be below the current length,
    /// otherwise [`ViewError::IndexOutOfRange`] is returned.
    ///
    /// Projected-view sets are not touched: they carry no order, and the
    /// view's attach container does not change.
    ///
    /// # Panics
    ///
    /// Panics if the container handle is stale.
    pub fn move_view(
        &mut self,
        container: ContainerId,
        old_index: usize,
        new_index: Option<usize>,
    ) -> Result<ViewId, ViewError> {
        let len = self.tree.len(container);
        if old_index >= len {
            return Err(self.reject(
                OpKind::Move,
                container,
                ViewError::IndexOutOfRange {
                    index: old_index,
                    len,
                },
            ));
        }
        let new_index = new_index.unwrap_or(len - 1);
        if new_index >= len {
            return Err(self.reject(
                OpKind::Move,
                container,
                ViewError::IndexOutOfRange {
                    index: new_index,
                    len,
                },
            ));
        }

        let list = &mut self.tree.views[container.idx as usize];
        let view = list.remove(old_index);
        list.insert(new_index, view);

        self.queries.mark_ancestor_queries_dirty(&*self.tree, view);

        self.remove_nodes(view);
        let prev = new_index
            .checked_sub(1)
            .and_then(|i| self.tree.view_at(container, i));
        self.insert_nodes(container, prev, view);

        self.tracer.moved(&MoveEvent {
            container,
            view,
            from: old_index,
            to: new_index,
        });
        Ok(view)
    }

    /// Detaches every view of `container`, returning them in their former
    /// order.
    ///
    /// # Panics
    ///
    /// Panics if the container handle is stale.
    pub fn clear(&mut self, container: ContainerId) -> Vec<ViewId> {
        let mut detached = Vec::with_capacity(self.tree.len(container));
        while let Some(view) = self.detach(container, None) {
            detached.push(view);
        }
        detached.reverse();
        detached
    }

    // -- Internal helpers --

    fn reject(&mut self, op: OpKind, container: ContainerId, error: ViewError) -> ViewError {
        self.tracer.rejected(&RejectedEvent {
            op,
            container,
            error,
        });
        error
    }

    fn insert_nodes(&mut self, container: ContainerId, prev: Option<ViewId>, view: ViewId) {
        let nodes =
            sync::render_attach(&*self.tree, &mut *self.renderer, container, prev, view);
        #[cfg(feature = "trace-rich")]
        self.tracer.render_sync(&RenderSyncEvent {
            view,
            action: RenderAction::Insert,
            nodes,
        });
        #[cfg(not(feature = "trace-rich"))]
        {
            _ = nodes;
        }
    }

    fn remove_nodes(&mut self, view: ViewId) {
        let nodes = sync::render_detach(&*self.tree, &mut *self.renderer, view);
        #[cfg(feature = "trace-rich")]
        self.tracer.render_sync(&RenderSyncEvent {
            view,
            action: RenderAction::Remove,
            nodes,
        });
        #[cfg(not(feature = "trace-rich"))]
        {
            _ = nodes;
        }
    }
}
