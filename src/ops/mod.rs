// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations on a live canvas.
//!
//! Each operation resolves its targets, computes, and writes whole data records back without
//! suspending. The low-level operations leave saving to the caller so batches can coalesce; the
//! `*_selected*` entry points request one save through the [`CanvasHost`] and post a notice.

use std::fmt;

use crate::model::{Canvas, CanvasError, DataIdMismatch, ElementId, ElementKind, IdError};
use crate::query::NothingSelected;

pub mod edges;
pub mod focus;
pub mod registry;
pub mod select;

pub use edges::{
    adjust_edge_onside, adjust_selected_edges, assign_edge_sides, reverse_batch, reverse_edge,
    reverse_selected_edges,
};
pub use focus::{decode_and_focus, on_open_document, FocusOutcome, PendingFocus, Trigger};
pub use registry::{change_selected_element_id, rebind_id, resolve_by_id};
pub use select::{
    copy_selected_references, select_downstream, select_upstream, select_via_edges,
    toggle_node_edge_select,
};

/// Host capabilities the operations need beyond the canvas itself.
pub trait CanvasHost {
    /// Fire-and-forget request to persist the canvas.
    fn request_save(&mut self);
    /// Move the viewport so the current selection is visible.
    fn zoom_to_selection(&mut self, canvas: &Canvas);
    /// Show a transient message to the user.
    fn notice(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpError {
    NotFound { id: String },
    DuplicateId { id: ElementId, existing: ElementKind },
    KindMismatch { id: ElementId, expected: ElementKind },
    NothingSelected,
    AmbiguousSelection { count: usize },
    InvalidId(IdError),
    DataIdMismatch(DataIdMismatch),
}

impl fmt::Display for OpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { id } => write!(f, "element not found (id={id})"),
            Self::DuplicateId { id, existing } => {
                write!(f, "element id '{id}' is already used by a {existing}")
            }
            Self::KindMismatch { id, expected } => write!(f, "element '{id}' is not a {expected}"),
            Self::NothingSelected => f.write_str("nothing selected"),
            Self::AmbiguousSelection { count } => {
                write!(f, "exactly one element must be selected (selected={count})")
            }
            Self::InvalidId(err) => write!(f, "invalid element id: {err}"),
            Self::DataIdMismatch(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for OpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidId(err) => Some(err),
            Self::DataIdMismatch(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CanvasError> for OpError {
    fn from(err: CanvasError) -> Self {
        match err {
            CanvasError::DuplicateId { id, existing } => Self::DuplicateId { id, existing },
            CanvasError::NotFound { id } => Self::NotFound { id: id.into_string() },
            CanvasError::KindMismatch { id, expected } => Self::KindMismatch { id, expected },
            CanvasError::DataIdMismatch(err) => Self::DataIdMismatch(err),
        }
    }
}

impl From<NothingSelected> for OpError {
    fn from(_: NothingSelected) -> Self {
        Self::NothingSelected
    }
}

impl From<IdError> for OpError {
    fn from(err: IdError) -> Self {
        Self::InvalidId(err)
    }
}
