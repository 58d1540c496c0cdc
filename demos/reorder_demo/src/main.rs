// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reorders a small list of rows and shows what reaches the render tree.
//!
//! Every operation is traced to both a
//! [`PrettyPrintSink`](anchorage_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](anchorage_debug::recorder::RecorderSink); the page is
//! printed after each step, and the recording is exported as JSON at the end.

use std::fs::File;
use std::io::BufWriter;

use anchorage_backend_memory::{MemoryRenderer, NodeId};
use anchorage_core::ops::ViewContainerOps;
use anchorage_core::query::QueryTracker;
use anchorage_core::trace::{
    AttachEvent, DetachEvent, MoveEvent, ProjectionEvent, RejectedEvent, RenderSyncEvent,
    TraceSink,
};
use anchorage_core::view::{RootSlot, ViewTree};

use anchorage_debug::pretty::PrettyPrintSink;
use anchorage_debug::recorder::RecorderSink;

/// Forwards every event to two sinks.
struct Tee<'a> {
    first: &'a mut dyn TraceSink,
    second: &'a mut dyn TraceSink,
}

impl TraceSink for Tee<'_> {
    fn on_attach(&mut self, e: &AttachEvent) {
        self.first.on_attach(e);
        self.second.on_attach(e);
    }

    fn on_detach(&mut self, e: &DetachEvent) {
        self.first.on_detach(e);
        self.second.on_detach(e);
    }

    fn on_move(&mut self, e: &MoveEvent) {
        self.first.on_move(e);
        self.second.on_move(e);
    }

    fn on_projection(&mut self, e: &ProjectionEvent) {
        self.first.on_projection(e);
        self.second.on_projection(e);
    }

    fn on_rejected(&mut self, e: &RejectedEvent) {
        self.first.on_rejected(e);
        self.second.on_rejected(e);
    }

    fn on_render_sync(&mut self, e: &RenderSyncEvent) {
        self.first.on_render_sync(e);
        self.second.on_render_sync(e);
    }
}

/// Everything one structural pass needs, kept between steps.
struct Scene {
    renderer: MemoryRenderer,
    tree: ViewTree<NodeId>,
    queries: QueryTracker,
    page: NodeId,
}

impl Scene {
    /// Runs `f` as one traced pass, then prints the page.
    fn step<T>(
        &mut self,
        label: &str,
        sink: &mut dyn TraceSink,
        f: impl FnOnce(&mut ViewContainerOps<'_, NodeId, MemoryRenderer, QueryTracker>) -> T,
    ) -> T {
        let out = {
            let mut ops =
                ViewContainerOps::new(&mut self.tree, &mut self.renderer, &mut self.queries)
                    .with_tracer(sink);
            f(&mut ops)
        };
        println!("  => {label}: {}", self.renderer.render(self.page));
        out
    }
}

fn main() {
    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();

    // -- static scaffold ---------------------------------------------------
    let mut renderer = MemoryRenderer::with_placeholder_siblings();
    let page = renderer.create_node("page");
    let header = renderer.create_node("header");
    let anchor = renderer.create_node("list");
    let footer = renderer.create_node("footer");
    for node in [header, anchor, footer] {
        renderer.append_child(page, node);
    }

    let mut tree = ViewTree::new();
    let list = tree.create_container(anchor, None);
    let rows: Vec<_> = ["v1", "v2"]
        .into_iter()
        .map(|label| {
            let node = renderer.create_node(label);
            tree.create_view(Some(list), vec![RootSlot::Node(node)])
        })
        .collect();
    let (v1, v2) = (rows[0], rows[1]);

    let mut scene = Scene {
        renderer,
        tree,
        queries: QueryTracker::new(),
        page,
    };
    println!("  => start: {}", scene.renderer.render(page));

    // -- structural passes -------------------------------------------------
    {
        let mut sink = Tee {
            first: &mut pretty,
            second: &mut recorder,
        };

        scene
            .step("attach v1 at end", &mut sink, |ops| ops.attach(list, None, v1))
            .expect("v1 is detached");
        scene
            .step("attach v2 at 0", &mut sink, |ops| ops.attach(list, Some(0), v2))
            .expect("v2 is detached");
        scene
            .step("move 1 -> 0", &mut sink, |ops| ops.move_view(list, 1, Some(0)))
            .expect("index 1 exists");
        let refused = scene.step("move 5 -> end", &mut sink, |ops| {
            ops.move_view(list, 5, None)
        });
        if let Err(err) = refused {
            println!("     refused: {err}");
        }
        for _ in 0..3 {
            let detached = scene.step("detach last", &mut sink, |ops| ops.detach(list, None));
            println!("     detached {detached:?}");
        }
    }

    let dirty = scene.queries.take_dirty(&scene.tree);
    println!("dirty query containers: {:?}", dirty.containers);

    // -- export JSON --------------------------------------------------------
    let path = "reorder_trace.json";
    let file = File::create(path).expect("failed to create reorder_trace.json");
    let mut writer = BufWriter::new(file);
    anchorage_debug::json::export(recorder.as_bytes(), &mut writer)
        .expect("failed to write JSON trace");

    println!("Wrote {path}");
}
