// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Handles are stored as `(index, generation)` pairs and positions as `u64`.

use anchorage_core::error::ViewError;
use anchorage_core::trace::{
    AttachEvent, DetachEvent, MoveEvent, OpKind, ProjectionChange, ProjectionEvent,
    RejectedEvent, RenderAction, RenderSyncEvent, TraceSink,
};
use anchorage_core::view::{ContainerId, ViewId};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_ATTACH: u8 = 1;
const TAG_DETACH: u8 = 2;
const TAG_MOVE: u8 = 3;
const TAG_PROJECTION: u8 = 4;
const TAG_REJECTED: u8 = 5;
const TAG_RENDER_SYNC: u8 = 6;

const ERR_INDEX_OUT_OF_RANGE: u8 = 0;
const ERR_ALREADY_ATTACHED: u8 = 1;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_usize(&mut self, v: usize) {
        self.write_u64(u64::try_from(v).unwrap_or(u64::MAX));
    }

    fn write_view(&mut self, v: ViewId) {
        self.write_u32(v.index());
        self.write_u32(v.generation());
    }

    fn write_container(&mut self, c: ContainerId) {
        self.write_u32(c.index());
        self.write_u32(c.generation());
    }

    fn write_op(&mut self, op: OpKind) {
        self.write_u8(match op {
            OpKind::Attach => 0,
            OpKind::Detach => 1,
            OpKind::Move => 2,
        });
    }
}

impl TraceSink for RecorderSink {
    fn on_attach(&mut self, e: &AttachEvent) {
        self.write_u8(TAG_ATTACH);
        self.write_container(e.container);
        self.write_view(e.view);
        self.write_usize(e.index);
        self.write_usize(e.len);
    }

    fn on_detach(&mut self, e: &DetachEvent) {
        self.write_u8(TAG_DETACH);
        self.write_container(e.container);
        self.write_view(e.view);
        self.write_usize(e.index);
        self.write_usize(e.len);
    }

    fn on_move(&mut self, e: &MoveEvent) {
        self.write_u8(TAG_MOVE);
        self.write_container(e.container);
        self.write_view(e.view);
        self.write_usize(e.from);
        self.write_usize(e.to);
    }

    fn on_projection(&mut self, e: &ProjectionEvent) {
        self.write_u8(TAG_PROJECTION);
        self.write_container(e.declared);
        self.write_view(e.view);
        self.write_u8(match e.change {
            ProjectionChange::Added => 0,
            ProjectionChange::Removed => 1,
        });
    }

    fn on_rejected(&mut self, e: &RejectedEvent) {
        self.write_u8(TAG_REJECTED);
        self.write_op(e.op);
        self.write_container(e.container);
        match e.error {
            ViewError::IndexOutOfRange { index, len } => {
                self.write_u8(ERR_INDEX_OUT_OF_RANGE);
                self.write_usize(index);
                self.write_usize(len);
            }
            ViewError::AlreadyAttached { view, container } => {
                self.write_u8(ERR_ALREADY_ATTACHED);
                self.write_view(view);
                self.write_container(container);
            }
        }
    }

    fn on_render_sync(&mut self, e: &RenderSyncEvent) {
        self.write_u8(TAG_RENDER_SYNC);
        self.write_view(e.view);
        self.write_u8(match e.action {
            RenderAction::Insert => 0,
            RenderAction::Remove => 1,
        });
        self.write_usize(e.nodes);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// An [`AttachEvent`].
    Attach(AttachEvent),
    /// A [`DetachEvent`].
    Detach(DetachEvent),
    /// A [`MoveEvent`].
    Move(MoveEvent),
    /// A [`ProjectionEvent`].
    Projection(ProjectionEvent),
    /// A [`RejectedEvent`].
    Rejected(RejectedEvent),
    /// A [`RenderSyncEvent`].
    RenderSync(RenderSyncEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
///
/// Decoding stops at the first unknown tag or truncated record.
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const LEN: usize>(&mut self) -> Option<[u8; LEN]> {
        let bytes = self.data.get(self.pos..self.pos + LEN)?.try_into().ok()?;
        self.pos += LEN;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[b]| b)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_usize(&mut self) -> Option<usize> {
        let v = self.take().map(u64::from_le_bytes)?;
        Some(usize::try_from(v).unwrap_or(usize::MAX))
    }

    fn read_view(&mut self) -> Option<ViewId> {
        Some(ViewId::from_raw_parts(self.read_u32()?, self.read_u32()?))
    }

    fn read_container(&mut self) -> Option<ContainerId> {
        Some(ContainerId::from_raw_parts(
            self.read_u32()?,
            self.read_u32()?,
        ))
    }

    fn read_op(&mut self) -> Option<OpKind> {
        Some(match self.read_u8()? {
            0 => OpKind::Attach,
            1 => OpKind::Detach,
            _ => OpKind::Move,
        })
    }

    fn decode_attach(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Attach(AttachEvent {
            container: self.read_container()?,
            view: self.read_view()?,
            index: self.read_usize()?,
            len: self.read_usize()?,
        }))
    }

    fn decode_detach(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Detach(DetachEvent {
            container: self.read_container()?,
            view: self.read_view()?,
            index: self.read_usize()?,
            len: self.read_usize()?,
        }))
    }

    fn decode_move(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Move(MoveEvent {
            container: self.read_container()?,
            view: self.read_view()?,
            from: self.read_usize()?,
            to: self.read_usize()?,
        }))
    }

    fn decode_projection(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Projection(ProjectionEvent {
            declared: self.read_container()?,
            view: self.read_view()?,
            change: match self.read_u8()? {
                0 => ProjectionChange::Added,
                _ => ProjectionChange::Removed,
            },
        }))
    }

    fn decode_rejected(&mut self) -> Option<RecordedEvent> {
        let op = self.read_op()?;
        let container = self.read_container()?;
        let error = match self.read_u8()? {
            ERR_INDEX_OUT_OF_RANGE => ViewError::IndexOutOfRange {
                index: self.read_usize()?,
                len: self.read_usize()?,
            },
            ERR_ALREADY_ATTACHED => ViewError::AlreadyAttached {
                view: self.read_view()?,
                container: self.read_container()?,
            },
            _ => return None,
        };
        Some(RecordedEvent::Rejected(RejectedEvent {
            op,
            container,
            error,
        }))
    }

    fn decode_render_sync(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::RenderSync(RenderSyncEvent {
            view: self.read_view()?,
            action: match self.read_u8()? {
                0 => RenderAction::Insert,
                _ => RenderAction::Remove,
            },
            nodes: self.read_usize()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_ATTACH => self.decode_attach(),
            TAG_DETACH => self.decode_detach(),
            TAG_MOVE => self.decode_move(),
            TAG_PROJECTION => self.decode_projection(),
            TAG_REJECTED => self.decode_rejected(),
            TAG_RENDER_SYNC => self.decode_render_sync(),
            _ => None,
        }
    }
}
