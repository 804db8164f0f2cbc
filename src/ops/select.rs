// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use log::debug;

use super::{CanvasHost, OpError};
use crate::model::{encode_references, Canvas};
use crate::notice::{copied_notice, expansion_notice};
use crate::query::{
    edges_between_nodes, expand_selection, nodes_around_edges, selected_edges, selected_nodes,
    Direction, Expansion,
};

/// Replaces the selection with every node reachable from the selected nodes within
/// `max_depth` hops in `direction`.
pub fn select_via_edges<H: CanvasHost + ?Sized>(
    canvas: &mut Canvas,
    host: &mut H,
    max_depth: usize,
    direction: Direction,
) -> Result<Expansion, OpError> {
    if canvas.selection().is_empty() {
        return Err(OpError::NothingSelected);
    }
    let start = selected_nodes(canvas);
    let expansion = expand_selection(canvas, &start, max_depth, direction)?;

    canvas.deselect_all();
    for node_id in &expansion.collected {
        canvas.select(node_id.as_str());
    }

    debug!(
        direction = direction.as_str(), start = start.len(),
        collected = expansion.collected.len(), depth_reached = expansion.depth_reached;
        "selection expanded"
    );
    let nodes = expansion.collected.iter().filter_map(|id| canvas.element(id.as_str()));
    host.notice(&expansion_notice(nodes, direction, expansion.depth_reached));
    Ok(expansion)
}

pub fn select_downstream<H: CanvasHost + ?Sized>(
    canvas: &mut Canvas,
    host: &mut H,
    max_depth: usize,
) -> Result<Expansion, OpError> {
    select_via_edges(canvas, host, max_depth, Direction::Downstream)
}

pub fn select_upstream<H: CanvasHost + ?Sized>(
    canvas: &mut Canvas,
    host: &mut H,
    max_depth: usize,
) -> Result<Expansion, OpError> {
    select_via_edges(canvas, host, max_depth, Direction::Upstream)
}

/// Swaps a node/edge selection for its counterpart: the nodes around the selected edges plus
/// the edges between the selected nodes. Returns the new selection size.
pub fn toggle_node_edge_select(canvas: &mut Canvas) -> Result<usize, OpError> {
    if canvas.selection().is_empty() {
        return Err(OpError::NothingSelected);
    }
    let nodes = nodes_around_edges(canvas, &selected_edges(canvas));
    let edges = edges_between_nodes(canvas, &selected_nodes(canvas));

    canvas.deselect_all();
    for id in nodes.iter().chain(&edges) {
        canvas.select(id.as_str());
    }
    debug!(nodes = nodes.len(), edges = edges.len(); "node/edge selection toggled");
    Ok(canvas.selection().len())
}

/// Encodes a reference to every selected element, one per line.
pub fn copy_selected_references<H: CanvasHost + ?Sized>(
    canvas: &Canvas,
    host: &mut H,
    document_path: &str,
) -> Result<String, OpError> {
    if canvas.selection().is_empty() {
        return Err(OpError::NothingSelected);
    }
    let text = encode_references(document_path, canvas.selection().iter());
    host.notice(&copied_notice(document_path, canvas.selected_elements()));
    debug!(path = document_path, count = canvas.selection().len(); "references copied");
    Ok(text)
}
