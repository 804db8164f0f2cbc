// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for `.canvas` documents on disk.
//!
//! Records pass through the classifier on load; unknown fields ride along in each record and are
//! written back unchanged.

pub mod canvas_file;

pub use canvas_file::{
    canvas_to_string, load_canvas, parse_canvas, read_node_records, save_canvas, StoreError,
};

#[cfg(test)]
mod tests;
