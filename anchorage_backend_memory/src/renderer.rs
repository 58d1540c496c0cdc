// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory render tree.
//!
//! Nodes live in struct-of-arrays storage with parent, first/last-child, and
//! sibling links, so every primitive is O(1) apart from the ones that
//! inherently walk (rendering, child iteration).

use alloc::string::String;
use alloc::vec::Vec;

use anchorage_core::renderer::Renderer;

use crate::node::{Children, NONE, NodeId};

/// One mutating renderer call, in the order it was received.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderCall {
    /// [`Renderer::insert_before`].
    InsertBefore {
        /// Parent the node was placed under.
        parent: NodeId,
        /// The node that was placed.
        node: NodeId,
        /// The sibling it was placed before, if any.
        reference: Option<NodeId>,
    },
    /// [`Renderer::remove_child`].
    RemoveChild {
        /// Parent the node was removed from.
        parent: NodeId,
        /// The node that was removed.
        node: NodeId,
    },
}

/// A render tree held entirely in memory.
///
/// Nodes are created with [`create_node`](Self::create_node) and arranged
/// with [`append_child`](Self::append_child) to build the static part of a
/// scene; after that, [`Renderer`] calls move them around and are logged in
/// [`calls`](Self::calls).
///
/// [`with_placeholder_siblings`](Self::with_placeholder_siblings) models
/// hosts that never report a missing next sibling: every node gets a hidden
/// trailing child, so the last visible child always has a sibling to insert
/// before.
#[derive(Debug, Default)]
pub struct MemoryRenderer {
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) last_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,
    pub(crate) label: Vec<String>,
    pub(crate) placeholder: Vec<bool>,
    placeholders: bool,
    calls: Vec<RenderCall>,
}

impl MemoryRenderer {
    /// Creates an empty tree whose last children report no next sibling.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tree where every node ends with a hidden placeholder
    /// child.
    #[must_use]
    pub fn with_placeholder_siblings() -> Self {
        Self {
            placeholders: true,
            ..Self::default()
        }
    }

    /// Creates an unmounted node.
    pub fn create_node(&mut self, label: impl Into<String>) -> NodeId {
        let node = self.alloc(label.into(), false);
        if self.placeholders {
            let end = self.alloc(String::new(), true);
            self.link_before(node.0, end.0, NONE);
        }
        node
    }

    /// Appends `child` under `parent` without logging a call.
    ///
    /// Intended for building the static scaffold before any view is attached.
    ///
    /// # Panics
    ///
    /// Panics if `child` is already mounted.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        assert!(
            self.parent[child.0 as usize] == NONE,
            "child already has a parent"
        );
        let end = self.trailing_placeholder(parent.0);
        self.link_before(parent.0, child.0, end);
    }

    /// Returns the label a node was created with.
    #[must_use]
    pub fn label(&self, node: NodeId) -> &str {
        &self.label[node.0 as usize]
    }

    /// Returns the parent of a node, if mounted.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        let p = self.parent[node.0 as usize];
        (p != NONE).then_some(NodeId(p))
    }

    /// Returns an iterator over the visible children of a node.
    #[must_use]
    pub fn children(&self, node: NodeId) -> Children<'_> {
        Children::new(self, self.first_child[node.0 as usize])
    }

    /// Returns the labels of a node's visible children, in order.
    #[must_use]
    pub fn child_labels(&self, node: NodeId) -> Vec<&str> {
        self.children(node).map(|c| self.label(c)).collect()
    }

    /// Renders the subtree under `node` as `label(child, child(...))`.
    #[must_use]
    pub fn render(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.render_into(node, &mut out);
        out
    }

    /// Returns the mutating calls received so far.
    #[must_use]
    pub fn calls(&self) -> &[RenderCall] {
        &self.calls
    }

    /// Returns and clears the call log.
    pub fn take_calls(&mut self) -> Vec<RenderCall> {
        core::mem::take(&mut self.calls)
    }

    // -- Internal helpers --

    fn alloc(&mut self, label: String, placeholder: bool) -> NodeId {
        let idx = u32::try_from(self.parent.len()).unwrap_or(NONE);
        assert!(idx != NONE, "node arena exhausted");
        self.parent.push(NONE);
        self.first_child.push(NONE);
        self.last_child.push(NONE);
        self.next_sibling.push(NONE);
        self.prev_sibling.push(NONE);
        self.label.push(label);
        self.placeholder.push(placeholder);
        NodeId(idx)
    }

    fn trailing_placeholder(&self, parent: u32) -> u32 {
        let last = self.last_child[parent as usize];
        if last != NONE && self.placeholder[last as usize] {
            last
        } else {
            NONE
        }
    }

    /// Links unmounted `idx` under `p` before `next` (`NONE` appends).
    fn link_before(&mut self, p: u32, idx: u32, next: u32) {
        let prev = if next == NONE {
            self.last_child[p as usize]
        } else {
            self.prev_sibling[next as usize]
        };

        self.parent[idx as usize] = p;
        self.prev_sibling[idx as usize] = prev;
        self.next_sibling[idx as usize] = next;

        if prev == NONE {
            self.first_child[p as usize] = idx;
        } else {
            self.next_sibling[prev as usize] = idx;
        }
        if next == NONE {
            self.last_child[p as usize] = idx;
        } else {
            self.prev_sibling[next as usize] = idx;
        }
    }

    /// Removes `idx` from its parent's child list.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev == NONE {
            self.first_child[p as usize] = next;
        } else {
            self.next_sibling[prev as usize] = next;
        }
        if next == NONE {
            self.last_child[p as usize] = prev;
        } else {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = NONE;
        self.prev_sibling[idx as usize] = NONE;
        self.next_sibling[idx as usize] = NONE;
    }

    fn render_into(&self, node: NodeId, out: &mut String) {
        out.push_str(self.label(node));
        let mut children = self.children(node).peekable();
        if children.peek().is_none() {
            return;
        }
        out.push('(');
        for (i, child) in children.enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            self.render_into(child, out);
        }
        out.push(')');
    }
}

impl Renderer for MemoryRenderer {
    type Node = NodeId;

    fn parent_node(&self, node: &NodeId) -> Option<NodeId> {
        self.parent(*node)
    }

    fn next_sibling(&self, node: &NodeId) -> Option<NodeId> {
        let next = self.next_sibling[node.0 as usize];
        (next != NONE).then_some(NodeId(next))
    }

    fn insert_before(&mut self, parent: &NodeId, node: &NodeId, reference: Option<&NodeId>) {
        self.calls.push(RenderCall::InsertBefore {
            parent: *parent,
            node: *node,
            reference: reference.copied(),
        });
        if self.parent[node.0 as usize] != NONE {
            self.unlink_from_parent(node.0);
        }
        let next = match reference {
            Some(r) => {
                assert!(
                    self.parent[r.0 as usize] == parent.0,
                    "reference {r:?} is not a child of {parent:?}"
                );
                r.0
            }
            None => self.trailing_placeholder(parent.0),
        };
        self.link_before(parent.0, node.0, next);
    }

    fn remove_child(&mut self, parent: &NodeId, node: &NodeId) {
        self.calls.push(RenderCall::RemoveChild {
            parent: *parent,
            node: *node,
        });
        assert!(
            self.parent[node.0 as usize] == parent.0,
            "{node:?} is not a child of {parent:?}"
        );
        self.unlink_from_parent(node.0);
    }
}

impl core::fmt::Display for MemoryRenderer {
    /// Writes every root (unmounted, non-placeholder node that has children)
    /// on its own line.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for idx in (0_u32..).take(self.parent.len()) {
            let node = NodeId(idx);
            let i = idx as usize;
            if self.parent[i] == NONE && !self.placeholder[i] && self.children(node).next().is_some() {
                writeln!(f, "{}", self.render(node))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use super::*;

    fn scaffold(r: &mut MemoryRenderer) -> (NodeId, NodeId, NodeId) {
        let root = r.create_node("root");
        let a = r.create_node("a");
        let b = r.create_node("b");
        r.append_child(root, a);
        r.append_child(root, b);
        (root, a, b)
    }

    #[test]
    fn append_builds_children_in_order() {
        let mut r = MemoryRenderer::new();
        let (root, a, _) = scaffold(&mut r);
        assert_eq!(r.child_labels(root), vec!["a", "b"]);
        assert_eq!(r.parent(a), Some(root));
        assert!(r.calls().is_empty(), "scaffolding is not logged");
    }

    #[test]
    fn insert_before_reference() {
        let mut r = MemoryRenderer::new();
        let (root, _, b) = scaffold(&mut r);
        let x = r.create_node("x");
        r.insert_before(&root, &x, Some(&b));
        assert_eq!(r.render(root), "root(a, x, b)");
    }

    #[test]
    fn insert_without_reference_appends() {
        let mut r = MemoryRenderer::new();
        let (root, _, _) = scaffold(&mut r);
        let x = r.create_node("x");
        r.insert_before(&root, &x, None);
        assert_eq!(r.render(root), "root(a, b, x)");
    }

    #[test]
    fn insert_moves_mounted_node() {
        let mut r = MemoryRenderer::new();
        let (root, a, _) = scaffold(&mut r);
        r.insert_before(&root, &a, None);
        assert_eq!(r.render(root), "root(b, a)");
    }

    #[test]
    fn remove_child_unmounts() {
        let mut r = MemoryRenderer::new();
        let (root, a, _) = scaffold(&mut r);
        r.remove_child(&root, &a);
        assert_eq!(r.parent(a), None);
        assert_eq!(r.render(root), "root(b)");
        assert_eq!(
            r.take_calls(),
            vec![RenderCall::RemoveChild {
                parent: root,
                node: a
            }]
        );
        assert!(r.calls().is_empty(), "log drained");
    }

    #[test]
    fn placeholder_hosts_always_report_a_sibling() {
        let mut r = MemoryRenderer::with_placeholder_siblings();
        let (root, _, b) = scaffold(&mut r);
        let end = r.next_sibling(&b);
        assert!(end.is_some(), "last child still has a sibling");
        let x = r.create_node("x");
        r.insert_before(&root, &x, end.as_ref());
        assert_eq!(r.render(root), "root(a, b, x)");
    }

    #[test]
    fn nested_render() {
        let mut r = MemoryRenderer::new();
        let (_, a, _) = scaffold(&mut r);
        let leaf = r.create_node("leaf");
        r.append_child(a, leaf);
        assert_eq!(r.to_string(), "root(a(leaf), b)\n");
    }

    #[test]
    #[should_panic(expected = "is not a child of")]
    fn foreign_reference_panics() {
        let mut r = MemoryRenderer::new();
        let (root, a, _) = scaffold(&mut r);
        let other = r.create_node("other");
        let stray = r.create_node("stray");
        r.append_child(other, stray);
        r.insert_before(&root, &a, Some(&stray));
    }
}
