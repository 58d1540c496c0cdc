// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderer contract for render-tree backends.
//!
//! The physical render tree (DOM elements, native widgets, an in-memory tree
//! in tests) is owned by a backend. This crate never creates or destroys a
//! render node; it only asks the backend to relocate existing ones through the
//! four primitives of [`Renderer`].
//!
//! # Sibling semantics
//!
//! [`insert_before`](Renderer::insert_before) with `Some(reference)` must
//! place the node immediately before `reference`, whatever `reference` is.
//! Some hosts never report "no next sibling" and hand out a trailing
//! placeholder instead; inserting before that placeholder must still land the
//! node in the right place. With `None`, the node is appended as the parent's
//! last child.

/// Node-relationship primitives consumed by the view container operations.
pub trait Renderer {
    /// Opaque handle to a render node.
    type Node;

    /// Returns the parent of `node`, or `None` if it is not mounted.
    fn parent_node(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Returns the node following `node` under the same parent, if any.
    fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Places `node` under `parent`, immediately before `reference`, or last
    /// if `reference` is `None`.
    ///
    /// A node that is already mounted elsewhere is moved.
    fn insert_before(
        &mut self,
        parent: &Self::Node,
        node: &Self::Node,
        reference: Option<&Self::Node>,
    );

    /// Removes `node` from `parent`.
    fn remove_child(&mut self, parent: &Self::Node, node: &Self::Node);
}
