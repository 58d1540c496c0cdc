// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes them as a JSON array, one object per event, in recording order.

use std::io::{self, Write};

use serde_json::{Value, json};

use anchorage_core::error::ViewError;
use anchorage_core::view::{ContainerId, ViewId};

use crate::recorder::{RecordedEvent, decode};

/// Exports recorded events as a pretty-printed JSON array.
///
/// Every object carries `"seq"` (position in the recording) and `"name"`;
/// handles are written as `"index@generation"` strings.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = decode(bytes)
        .enumerate()
        .map(|(seq, recorded)| event_json(seq, &recorded))
        .collect();

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn event_json(seq: usize, recorded: &RecordedEvent) -> Value {
    match recorded {
        RecordedEvent::Attach(e) => json!({
            "seq": seq,
            "name": "Attach",
            "container": container(e.container),
            "view": view(e.view),
            "index": e.index,
            "len": e.len,
        }),
        RecordedEvent::Detach(e) => json!({
            "seq": seq,
            "name": "Detach",
            "container": container(e.container),
            "view": view(e.view),
            "index": e.index,
            "len": e.len,
        }),
        RecordedEvent::Move(e) => json!({
            "seq": seq,
            "name": "Move",
            "container": container(e.container),
            "view": view(e.view),
            "from": e.from,
            "to": e.to,
        }),
        RecordedEvent::Projection(e) => json!({
            "seq": seq,
            "name": "Projection",
            "declared": container(e.declared),
            "view": view(e.view),
            "change": format!("{:?}", e.change),
        }),
        RecordedEvent::Rejected(e) => {
            let error = match e.error {
                ViewError::IndexOutOfRange { index, len } => json!({
                    "kind": "IndexOutOfRange",
                    "index": index,
                    "len": len,
                }),
                ViewError::AlreadyAttached {
                    view: v,
                    container: c,
                } => json!({
                    "kind": "AlreadyAttached",
                    "view": view(v),
                    "container": container(c),
                }),
            };
            json!({
                "seq": seq,
                "name": "Rejected",
                "op": format!("{:?}", e.op),
                "container": container(e.container),
                "error": error,
            })
        }
        RecordedEvent::RenderSync(e) => json!({
            "seq": seq,
            "name": "RenderSync",
            "view": view(e.view),
            "action": format!("{:?}", e.action),
            "nodes": e.nodes,
        }),
    }
}

fn view(v: ViewId) -> String {
    format!("{}@{}", v.index(), v.generation())
}

fn container(c: ContainerId) -> String {
    format!("{}@{}", c.index(), c.generation())
}
