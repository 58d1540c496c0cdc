// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use anchorage_core::error::ViewError;
use anchorage_core::trace::{
    AttachEvent, DetachEvent, MoveEvent, OpKind, ProjectionChange, ProjectionEvent,
    RejectedEvent, RenderAction, RenderSyncEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn op_name(op: OpKind) -> &'static str {
    match op {
        OpKind::Attach => "attach",
        OpKind::Detach => "detach",
        OpKind::Move => "move",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_attach(&mut self, e: &AttachEvent) {
        let _ = writeln!(
            self.writer,
            "[attach] container={} view={} at={} len={}",
            e.container.index(),
            e.view.index(),
            e.index,
            e.len,
        );
    }

    fn on_detach(&mut self, e: &DetachEvent) {
        let _ = writeln!(
            self.writer,
            "[detach] container={} view={} at={} len={}",
            e.container.index(),
            e.view.index(),
            e.index,
            e.len,
        );
    }

    fn on_move(&mut self, e: &MoveEvent) {
        let _ = writeln!(
            self.writer,
            "[move] container={} view={} {}->{}",
            e.container.index(),
            e.view.index(),
            e.from,
            e.to,
        );
    }

    fn on_projection(&mut self, e: &ProjectionEvent) {
        let sign = match e.change {
            ProjectionChange::Added => '+',
            ProjectionChange::Removed => '-',
        };
        let _ = writeln!(
            self.writer,
            "[projection] declared={} {sign}view={}",
            e.declared.index(),
            e.view.index(),
        );
    }

    fn on_rejected(&mut self, e: &RejectedEvent) {
        let why = match e.error {
            ViewError::IndexOutOfRange { index, len } => {
                format!("index {index} out of range (len {len})")
            }
            ViewError::AlreadyAttached { view, container } => format!(
                "view {} already in container {}",
                view.index(),
                container.index()
            ),
        };
        let _ = writeln!(
            self.writer,
            "[rejected] {} container={}: {why}",
            op_name(e.op),
            e.container.index(),
        );
    }

    fn on_render_sync(&mut self, e: &RenderSyncEvent) {
        let action = match e.action {
            RenderAction::Insert => "insert",
            RenderAction::Remove => "remove",
        };
        let _ = writeln!(
            self.writer,
            "[render:{action}] view={} nodes={}",
            e.view.index(),
            e.nodes,
        );
    }
}

#[cfg(test)]
mod tests {
    use anchorage_core::view::{ContainerId, ViewId};

    use super::*;

    fn output(f: impl FnOnce(&mut PrettyPrintSink<Vec<u8>>)) -> String {
        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        f(&mut sink);
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn one_line_per_event() {
        let c = ContainerId::from_raw_parts(0, 0);
        let v = ViewId::from_raw_parts(2, 0);
        let out = output(|s| {
            s.on_attach(&AttachEvent {
                container: c,
                view: v,
                index: 0,
                len: 1,
            });
            s.on_move(&MoveEvent {
                container: c,
                view: v,
                from: 1,
                to: 0,
            });
            s.on_render_sync(&RenderSyncEvent {
                view: v,
                action: RenderAction::Remove,
                nodes: 3,
            });
        });
        assert_eq!(
            out,
            "[attach] container=0 view=2 at=0 len=1\n\
             [move] container=0 view=2 1->0\n\
             [render:remove] view=2 nodes=3\n"
        );
    }

    #[test]
    fn rejection_names_the_cause() {
        let out = output(|s| {
            s.on_rejected(&RejectedEvent {
                op: OpKind::Move,
                container: ContainerId::from_raw_parts(4, 1),
                error: ViewError::IndexOutOfRange { index: 5, len: 2 },
            });
        });
        assert_eq!(
            out,
            "[rejected] move container=4: index 5 out of range (len 2)\n"
        );
    }

    #[test]
    fn projection_marks_direction() {
        let out = output(|s| {
            s.on_projection(&ProjectionEvent {
                declared: ContainerId::from_raw_parts(1, 0),
                view: ViewId::from_raw_parts(7, 0),
                change: ProjectionChange::Removed,
            });
        });
        assert_eq!(out, "[projection] declared=1 -view=7\n");
    }
}
