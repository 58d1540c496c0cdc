// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the view container operations.

use core::fmt;

use crate::view::{ContainerId, ViewId};

/// A rejected view container operation.
///
/// Every error is reported before the operation mutates anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    /// An index was outside the range the operation accepts.
    IndexOutOfRange {
        /// The index that was passed.
        index: usize,
        /// The length the index was checked against.
        len: usize,
    },
    /// The view is already attached to a container.
    AlreadyAttached {
        /// The view that was passed.
        view: ViewId,
        /// The container that currently holds it.
        container: ContainerId,
    },
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for {len} attached views")
            }
            Self::AlreadyAttached { view, container } => {
                write!(f, "{view:?} is already attached to {container:?}")
            }
        }
    }
}

impl core::error::Error for ViewError {}
