// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over canvases and documents.
//!
//! Queries provide derived views (reachable nodes, link suggestions, references in text) that
//! power the commands and the editor hooks.

pub mod suggest;
pub mod text_refs;
pub mod traverse;

pub use suggest::{
    fuzzy_score, suggest, suggest_for_query, LinkMode, LinkResolver, SuggestQuery, Suggestion,
    SuggestionTicket, SuggestionTracker, VaultResolver,
};
pub use text_refs::{find_references, rewrite_references, FoundReference};
pub use traverse::{
    edges_between_nodes, expand_selection, nodes_around_edges, selected_edges,
    selected_edges_including_betweens, selected_nodes, Direction, Expansion, NothingSelected,
    SelectedEdges, DEFAULT_MAX_DEPTH,
};
