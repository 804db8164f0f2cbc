// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canvas Ref: stable element references, navigation and graph editing for JSON canvases.
//!
//! The model keeps a live canvas (nodes, edges, selection) keyed by element id; queries derive
//! reachable sets and link suggestions from it; ops mutate it and report through a host trait.

pub mod commands;
pub mod config;
pub mod model;
pub mod notice;
pub mod ops;
pub mod query;
pub mod store;
