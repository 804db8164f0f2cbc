// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashSet;

use indexmap::IndexSet;
use log::{debug, warn};

use super::{CanvasHost, OpError};
use crate::model::{nearest_sides, Canvas, EdgeData, ElementId, ElementKind, Side};
use crate::notice::{adjusted_notice, reversed_notice};
use crate::query::selected_edges_including_betweens;

/// A detached copy of an edge record, or the reason there is none.
fn fresh_edge_data(canvas: &Canvas, edge_id: &str) -> Result<EdgeData, OpError> {
    if let Some(data) = canvas.edge_data(edge_id) {
        return Ok(data);
    }
    match canvas.element(edge_id) {
        Some(element) => Err(OpError::KindMismatch {
            id: element.id().clone(),
            expected: ElementKind::Edge,
        }),
        None => Err(OpError::NotFound { id: edge_id.to_owned() }),
    }
}

/// Overwrites both attachment sides of an edge, writing the whole record back.
pub fn assign_edge_sides(
    canvas: &mut Canvas,
    edge_id: &str,
    from_side: Side,
    to_side: Side,
) -> Result<(), OpError> {
    let mut data = fresh_edge_data(canvas, edge_id)?;
    data.from_side = Some(from_side);
    data.to_side = Some(to_side);
    canvas.set_edge_data(data)?;
    Ok(())
}

/// Reattaches an edge on the facing sides of its endpoint nodes.
///
/// Returns `Ok(false)` when an endpoint node is missing; the edge is left untouched.
pub fn adjust_edge_onside(canvas: &mut Canvas, edge_id: &str) -> Result<bool, OpError> {
    let data = fresh_edge_data(canvas, edge_id)?;
    let (Some(from), Some(to)) =
        (canvas.node(data.from_node.as_str()), canvas.node(data.to_node.as_str()))
    else {
        warn!(edge_id = edge_id; "edge endpoint node not found, skipped");
        return Ok(false);
    };

    let (from_side, to_side) = nearest_sides(&from.bbox(), &to.bbox());
    assign_edge_sides(canvas, edge_id, from_side, to_side)?;
    Ok(true)
}

fn selected_edge_ids(canvas: &Canvas) -> Vec<ElementId> {
    selected_edges_including_betweens(canvas)
        .map(|edge| edge.id().clone())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Adjusts every selected edge and every edge between selected nodes, once each.
pub fn adjust_selected_edges<H: CanvasHost + ?Sized>(
    canvas: &mut Canvas,
    host: &mut H,
) -> Result<usize, OpError> {
    let edge_ids = selected_edge_ids(canvas);
    if edge_ids.is_empty() {
        return Err(OpError::NothingSelected);
    }

    let mut adjusted = 0;
    for edge_id in &edge_ids {
        if adjust_edge_onside(canvas, edge_id.as_str())? {
            adjusted += 1;
        }
    }
    if adjusted > 0 {
        host.request_save();
    }
    debug!(selected = edge_ids.len(), adjusted = adjusted; "edge sides adjusted");
    host.notice(&adjusted_notice(adjusted));
    Ok(adjusted)
}

/// Swaps the two endpoints of an edge as whole `(node, side, end)` tuples.
pub fn reverse_edge(canvas: &mut Canvas, edge_id: &str) -> Result<(), OpError> {
    let mut data = fresh_edge_data(canvas, edge_id)?;
    let (from, to) = (data.from_endpoint(), data.to_endpoint());
    data.set_endpoints(to, from);
    canvas.set_edge_data(data)?;
    Ok(())
}

/// Reverses each listed edge at most once. Ids that are not edges are logged and skipped.
///
/// Returns how many edges were reversed.
pub fn reverse_batch<I>(canvas: &mut Canvas, edge_ids: I) -> usize
where
    I: IntoIterator<Item = ElementId>,
{
    let mut seen: HashSet<ElementId> = HashSet::new();
    let mut reversed = 0;
    for edge_id in edge_ids {
        if !seen.insert(edge_id.clone()) {
            continue;
        }
        match reverse_edge(canvas, edge_id.as_str()) {
            Ok(()) => reversed += 1,
            Err(err) => warn!(edge_id = edge_id.as_str(), error:% = err; "edge not reversed"),
        }
    }
    reversed
}

/// Reverses the selected edges plus the edges running between selected nodes.
pub fn reverse_selected_edges<H: CanvasHost + ?Sized>(
    canvas: &mut Canvas,
    host: &mut H,
) -> Result<usize, OpError> {
    // Collected first: the walk borrows the canvas that the batch mutates.
    let edge_ids = selected_edges_including_betweens(canvas)
        .map(|edge| edge.id().clone())
        .collect::<Vec<_>>();
    if edge_ids.is_empty() {
        return Err(OpError::NothingSelected);
    }

    let reversed = reverse_batch(canvas, edge_ids);
    if reversed > 0 {
        host.request_save();
    }
    debug!(reversed = reversed; "selected edges reversed");
    host.notice(&reversed_notice(reversed));
    Ok(reversed)
}
