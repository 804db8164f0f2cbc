// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A canvas holds nodes and edges keyed by stable element ids, plus the current selection.

pub mod canvas;
pub mod classify;
pub mod element;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod geometry;
pub mod ids;
pub mod reference;

pub use canvas::{Canvas, CanvasError, Selection};
pub use classify::{classify, decode_record, is_edge, is_node, ElementRecord, RecordError};
pub use element::{
    DataIdMismatch, Edge, EdgeData, Element, ElementKind, EndStyle, Endpoint, Node, NodeData,
};
pub use geometry::{nearest_sides, BoundingBox, ParseSideError, Point, Side};
pub use ids::{ElementId, IdError};
pub use reference::{
    decode_subpath, encode_reference, encode_references, ParseReferenceError, Reference,
    BLOCK_MARKER,
};
