// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory render tree backend for anchorage.
//!
//! [`MemoryRenderer`] implements [`Renderer`](anchorage_core::renderer::Renderer)
//! over a plain node arena with labelled nodes. It logs every mutating call
//! as a [`RenderCall`] and can print its tree, which makes it the backend of
//! choice for tests, demos, and headless tooling.
//!
//! ```rust,ignore
//! let mut r = MemoryRenderer::new();
//! let page = r.create_node("page");
//! let anchor = r.create_node("list");
//! r.append_child(page, anchor);
//!
//! let mut tree = ViewTree::new();
//! let list = tree.create_container(anchor, None);
//! ```
//!
//! Hosts that keep an end marker after the last child (so "next sibling" is
//! never empty) are modelled by
//! [`MemoryRenderer::with_placeholder_siblings`].

#![no_std]

extern crate alloc;

mod node;
mod renderer;

pub use node::{Children, NodeId};
pub use renderer::{MemoryRenderer, RenderCall};

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use anchorage_core::error::ViewError;
    use anchorage_core::ops::ViewContainerOps;
    use anchorage_core::query::{NoopInvalidator, QueryTracker};
    use anchorage_core::trace::{
        AttachEvent, DetachEvent, MoveEvent, ProjectionEvent, RejectedEvent, RenderSyncEvent,
        TraceSink,
    };
    use anchorage_core::view::{ContainerId, RootSlot, ViewId, ViewTree};

    use super::*;

    /// A page with one container anchored at `list`.
    struct Scene {
        renderer: MemoryRenderer,
        tree: ViewTree<NodeId>,
        queries: NoopInvalidator,
        page: NodeId,
        list: ContainerId,
    }

    impl Scene {
        fn new(renderer: MemoryRenderer) -> Self {
            let mut renderer = renderer;
            let page = renderer.create_node("page");
            let header = renderer.create_node("header");
            let anchor = renderer.create_node("list");
            let footer = renderer.create_node("footer");
            renderer.append_child(page, header);
            renderer.append_child(page, anchor);
            renderer.append_child(page, footer);
            let mut tree = ViewTree::new();
            let list = tree.create_container(anchor, None);
            Self {
                renderer,
                tree,
                queries: NoopInvalidator,
                page,
                list,
            }
        }

        fn row(&mut self, label: &str) -> ViewId {
            let node = self.renderer.create_node(label);
            self.tree
                .create_view(Some(self.list), vec![RootSlot::Node(node)])
        }

        fn ops(&mut self) -> ViewContainerOps<'_, NodeId, MemoryRenderer, NoopInvalidator> {
            ViewContainerOps::new(&mut self.tree, &mut self.renderer, &mut self.queries)
        }

        fn page(&self) -> String {
            self.renderer.render(self.page)
        }
    }

    #[test]
    fn reorder_trace_keeps_render_tree_in_step() {
        let mut s = Scene::new(MemoryRenderer::new());
        let list = s.list;
        let v1 = s.row("v1");
        let v2 = s.row("v2");

        s.ops().attach(list, None, v1).unwrap();
        assert_eq!(s.page(), "page(header, list, v1, footer)");

        s.ops().attach(list, Some(0), v2).unwrap();
        assert_eq!(s.page(), "page(header, list, v2, v1, footer)");

        assert_eq!(s.ops().move_view(list, 1, Some(0)), Ok(v1));
        assert_eq!(s.page(), "page(header, list, v1, v2, footer)");

        assert_eq!(s.ops().detach(list, None), Some(v2));
        assert_eq!(s.page(), "page(header, list, v1, footer)");

        assert_eq!(s.ops().detach(list, None), Some(v1));
        assert_eq!(s.page(), "page(header, list, footer)");

        assert_eq!(s.ops().detach(list, None), None);
        assert_eq!(s.page(), "page(header, list, footer)");
    }

    #[test]
    fn placeholder_hosts_render_identically() {
        fn run(renderer: MemoryRenderer) -> Vec<String> {
            let mut s = Scene::new(renderer);
            let list = s.list;
            let rows: Vec<ViewId> = ["a", "b", "c", "d"].iter().map(|l| s.row(l)).collect();
            let mut seen = Vec::new();
            for &row in &rows {
                s.ops().attach(list, None, row).unwrap();
                seen.push(s.page());
            }
            s.ops().move_view(list, 3, Some(0)).unwrap();
            seen.push(s.page());
            s.ops().move_view(list, 0, None).unwrap();
            seen.push(s.page());
            s.ops().detach(list, Some(1));
            seen.push(s.page());
            seen
        }

        let plain = run(MemoryRenderer::new());
        let marked = run(MemoryRenderer::with_placeholder_siblings());
        assert_eq!(plain, marked);
        assert_eq!(
            plain.last().map(String::as_str),
            Some("page(header, list, a, c, d, footer)")
        );
    }

    #[test]
    fn last_child_container_appends_without_sibling() {
        let mut renderer = MemoryRenderer::new();
        let page = renderer.create_node("page");
        let anchor = renderer.create_node("list");
        renderer.append_child(page, anchor);
        let row = renderer.create_node("row");

        let mut tree = ViewTree::new();
        let list = tree.create_container(anchor, None);
        let view = tree.create_view(None, vec![RootSlot::Node(row)]);
        ViewContainerOps::new(&mut tree, &mut renderer, &mut NoopInvalidator)
            .attach(list, None, view)
            .unwrap();

        assert_eq!(
            renderer.calls(),
            &[RenderCall::InsertBefore {
                parent: page,
                node: row,
                reference: None
            }]
        );
        assert_eq!(renderer.render(page), "page(list, row)");
    }

    #[test]
    fn multi_node_views_move_as_a_block() {
        let mut s = Scene::new(MemoryRenderer::new());
        let list = s.list;
        let a = s.row("a");
        let (x, y) = (s.renderer.create_node("x"), s.renderer.create_node("y"));
        let pair = s
            .tree
            .create_view(Some(list), vec![RootSlot::Node(x), RootSlot::Node(y)]);

        s.ops().attach(list, None, a).unwrap();
        s.ops().attach(list, None, pair).unwrap();
        assert_eq!(s.page(), "page(header, list, a, x, y, footer)");

        s.ops().move_view(list, 1, Some(0)).unwrap();
        assert_eq!(s.page(), "page(header, list, x, y, a, footer)");
    }

    #[test]
    fn nested_container_nodes_travel_with_their_host() {
        let mut s = Scene::new(MemoryRenderer::new());
        let list = s.list;

        let card = s.renderer.create_node("card");
        let slot = s.renderer.create_node("slot");
        let host = s.tree.create_view(Some(list), vec![RootSlot::Node(card)]);
        let inner = s.tree.create_container(slot, Some(host));
        s.tree.push_root_slot(host, RootSlot::Anchor(inner));

        // The inner anchor is unmounted, so nothing reaches the renderer yet.
        let item = s.renderer.create_node("item");
        let child = s.tree.create_view(Some(inner), vec![RootSlot::Node(item)]);
        s.ops().attach(inner, None, child).unwrap();
        assert!(s.renderer.calls().is_empty(), "got: {:?}", s.renderer.calls());

        s.ops().attach(list, None, host).unwrap();
        assert_eq!(s.page(), "page(header, list, card, slot, item, footer)");

        // Once mounted, the inner container syncs directly.
        let more = s.renderer.create_node("more");
        let second = s.tree.create_view(Some(inner), vec![RootSlot::Node(more)]);
        s.ops().attach(inner, None, second).unwrap();
        assert_eq!(s.page(), "page(header, list, card, slot, item, more, footer)");

        assert_eq!(s.ops().detach(list, None), Some(host));
        assert_eq!(s.page(), "page(header, list, footer)");
    }

    #[test]
    fn projected_view_is_tracked_in_declaring_container() {
        let mut s = Scene::new(MemoryRenderer::new());
        let list = s.list;
        let elsewhere_anchor = s.renderer.create_node("aside");
        s.renderer.append_child(s.page, elsewhere_anchor);
        let aside = s.tree.create_container(elsewhere_anchor, None);

        let row = s.row("r");
        s.ops().attach(aside, None, row).unwrap();
        assert!(s.tree.is_projected(row));
        assert_eq!(s.tree.projected_views(list), &[row]);
        assert!(s.tree.projected_views(aside).is_empty());
        assert_eq!(s.page(), "page(header, list, footer, aside, r)");

        s.ops().detach(aside, None);
        assert!(s.tree.projected_views(list).is_empty());
    }

    #[test]
    fn failed_move_issues_no_renderer_calls() {
        let mut s = Scene::new(MemoryRenderer::new());
        let list = s.list;
        let a = s.row("a");
        s.ops().attach(list, None, a).unwrap();
        let _ = s.renderer.take_calls();
        let before = s.page();

        assert_eq!(
            s.ops().move_view(list, 1, Some(0)),
            Err(ViewError::IndexOutOfRange { index: 1, len: 1 })
        );
        assert!(s.renderer.calls().is_empty());
        assert_eq!(s.page(), before);
        assert_eq!(s.tree.views(list).as_slice(), &[a]);
    }

    #[test]
    fn already_attached_is_rejected_without_calls() {
        let mut s = Scene::new(MemoryRenderer::new());
        let list = s.list;
        let a = s.row("a");
        s.ops().attach(list, None, a).unwrap();
        let _ = s.renderer.take_calls();

        assert_eq!(
            s.ops().attach(list, Some(0), a),
            Err(ViewError::AlreadyAttached {
                view: a,
                container: list
            })
        );
        assert!(s.renderer.calls().is_empty());
    }

    #[test]
    fn clear_empties_render_tree_and_list() {
        let mut s = Scene::new(MemoryRenderer::with_placeholder_siblings());
        let list = s.list;
        let rows: Vec<ViewId> = ["a", "b", "c"].iter().map(|l| s.row(l)).collect();
        for &row in &rows {
            s.ops().attach(list, None, row).unwrap();
        }
        assert_eq!(s.ops().clear(list), rows);
        assert_eq!(s.page(), "page(header, list, footer)");
        assert_eq!(s.tree.len(list), 0);
    }

    #[test]
    fn query_tracker_sees_every_structural_change() {
        let mut s = Scene::new(MemoryRenderer::new());
        let list = s.list;
        let a = s.row("a");
        let b = s.row("b");
        let mut queries = QueryTracker::new();

        {
            let mut ops = ViewContainerOps::new(&mut s.tree, &mut s.renderer, &mut queries);
            ops.attach(list, None, a).unwrap();
            ops.attach(list, None, b).unwrap();
        }
        assert_eq!(queries.take_dirty(&s.tree).containers, vec![list]);

        ViewContainerOps::new(&mut s.tree, &mut s.renderer, &mut queries)
            .move_view(list, 0, None)
            .unwrap();
        assert_eq!(queries.take_dirty(&s.tree).containers, vec![list]);
        assert!(queries.take_dirty(&s.tree).is_empty());
    }

    #[test]
    fn tracer_reports_each_step() {
        #[derive(Default)]
        struct Log(Vec<String>);
        impl TraceSink for Log {
            fn on_attach(&mut self, e: &AttachEvent) {
                self.0.push(alloc::format!("attach {}@{}", e.view.index(), e.index));
            }
            fn on_detach(&mut self, e: &DetachEvent) {
                self.0.push(alloc::format!("detach {}@{}", e.view.index(), e.index));
            }
            fn on_move(&mut self, e: &MoveEvent) {
                self.0
                    .push(alloc::format!("move {} {}->{}", e.view.index(), e.from, e.to));
            }
            fn on_projection(&mut self, e: &ProjectionEvent) {
                self.0.push(alloc::format!("projection {:?}", e.change));
            }
            fn on_rejected(&mut self, e: &RejectedEvent) {
                self.0.push(alloc::format!("rejected {:?}", e.op));
            }
            fn on_render_sync(&mut self, e: &RenderSyncEvent) {
                self.0.push(alloc::format!("{:?} {}", e.action, e.nodes));
            }
        }

        let mut s = Scene::new(MemoryRenderer::new());
        let list = s.list;
        let a = s.row("a");
        let b = s.row("b");
        let mut log = Log::default();
        {
            let mut ops = ViewContainerOps::new(&mut s.tree, &mut s.renderer, &mut s.queries)
                .with_tracer(&mut log);
            ops.attach(list, None, a).unwrap();
            ops.attach(list, None, b).unwrap();
            ops.move_view(list, 1, Some(0)).unwrap();
            let _ = ops.move_view(list, 2, None);
            ops.detach(list, Some(0));
        }

        assert_eq!(
            log.0,
            vec![
                "Insert 1",
                "attach 0@0",
                "Insert 1",
                "attach 1@1",
                "Remove 1",
                "Insert 1",
                "move 1 1->0",
                "rejected Move",
                "Remove 1",
                "detach 1@0",
            ]
        );
    }
}
