// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeSet, HashSet, VecDeque};
use std::fmt;

use log::debug;

use crate::model::{Canvas, Edge, Element, ElementId};

pub const DEFAULT_MAX_DEPTH: usize = 1;

/// Which way edges are followed during selection expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Follow edges from their source to their target.
    Downstream,
    /// Follow edges from their target back to their source.
    Upstream,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Downstream => "downstream",
            Self::Upstream => "upstream",
        }
    }

    /// The neighbour reached from `node_id` over `edge`, if the edge leaves in this direction.
    fn step<'a>(self, edge: &'a Edge, node_id: &ElementId) -> Option<&'a ElementId> {
        match self {
            Self::Downstream => (edge.from_node() == node_id).then(|| edge.to_node()),
            Self::Upstream => (edge.to_node() == node_id).then(|| edge.from_node()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// Start nodes first (in the given order), then discovered nodes in BFS order.
    pub collected: Vec<ElementId>,
    /// Largest hop count of any dequeued node.
    pub depth_reached: usize,
}

/// The traversal had no node to start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NothingSelected;

impl fmt::Display for NothingSelected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("no node selected")
    }
}

impl std::error::Error for NothingSelected {}

/// Bounded breadth-first expansion from a set of start nodes.
///
/// Start ids that are not nodes of the canvas are skipped. A node at `max_depth` hops is still
/// collected but not expanded. Each node is collected at most once, so cycles terminate.
pub fn expand_selection(
    canvas: &Canvas,
    start_nodes: &[ElementId],
    max_depth: usize,
    direction: Direction,
) -> Result<Expansion, NothingSelected> {
    let mut visited: HashSet<&ElementId> = HashSet::new();
    let mut queue: VecDeque<(&ElementId, usize)> = VecDeque::new();
    let mut collected: Vec<ElementId> = Vec::new();

    for start in start_nodes {
        let Some(node) = canvas.node(start.as_str()) else {
            debug!(node_id = start.as_str(); "start id is not a node, skipped");
            continue;
        };
        if visited.insert(node.id()) {
            queue.push_back((node.id(), 0));
            collected.push(node.id().clone());
        }
    }

    if collected.is_empty() {
        return Err(NothingSelected);
    }

    let mut depth_reached = 0;
    while let Some((node_id, depth)) = queue.pop_front() {
        depth_reached = depth_reached.max(depth);
        if depth >= max_depth {
            continue;
        }

        for edge in canvas.edges_for_node(node_id.as_str()) {
            let Some(next_id) = direction.step(edge, node_id) else {
                continue;
            };
            // Stale edges may point at nodes that no longer exist.
            let Some(next) = canvas.node(next_id.as_str()) else {
                continue;
            };
            if visited.insert(next.id()) {
                collected.push(next.id().clone());
                queue.push_back((next.id(), depth + 1));
            }
        }
    }

    Ok(Expansion { collected, depth_reached })
}

/// Ids of the selected nodes, in selection order.
pub fn selected_nodes(canvas: &Canvas) -> Vec<ElementId> {
    canvas
        .selected_elements()
        .filter(Element::is_node)
        .map(|element| element.id().clone())
        .collect()
}

/// Ids of the selected edges, in selection order.
pub fn selected_edges(canvas: &Canvas) -> Vec<ElementId> {
    canvas
        .selected_elements()
        .filter(Element::is_edge)
        .map(|element| element.id().clone())
        .collect()
}

/// Lazy walk over the selected edges plus the edges running between selected nodes.
///
/// Produced by [`selected_edges_including_betweens`]. Each call starts a fresh walk.
/// An edge that is selected and also runs between two selected nodes is yielded twice;
/// callers deduplicate.
pub struct SelectedEdges<'a> {
    canvas: &'a Canvas,
    selection: Vec<&'a ElementId>,
    position: usize,
    pending: VecDeque<&'a Edge>,
}

impl<'a> Iterator for SelectedEdges<'a> {
    type Item = &'a Edge;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(edge) = self.pending.pop_front() {
                return Some(edge);
            }

            let id = *self.selection.get(self.position)?;
            self.position += 1;

            match self.canvas.element(id.as_str()) {
                Some(Element::Edge(edge)) => return Some(edge),
                Some(Element::Node(node)) => {
                    // Only outgoing edges, so an edge between two selected nodes is seen once.
                    let selection = self.canvas.selection();
                    self.pending.extend(self.canvas.edges_for_node(id.as_str()).filter(|edge| {
                        edge.from_node() == node.id() && selection.contains(edge.to_node())
                    }));
                }
                None => {}
            }
        }
    }
}

pub fn selected_edges_including_betweens(canvas: &Canvas) -> SelectedEdges<'_> {
    SelectedEdges {
        canvas,
        selection: canvas.selection().iter().collect(),
        position: 0,
        pending: VecDeque::new(),
    }
}

/// Endpoint nodes of the given edges, deduplicated, in order of first appearance.
pub fn nodes_around_edges<'a>(
    canvas: &Canvas,
    edge_ids: impl IntoIterator<Item = &'a ElementId>,
) -> Vec<ElementId> {
    let mut seen: HashSet<ElementId> = HashSet::new();
    let mut nodes = Vec::new();
    for edge_id in edge_ids {
        let Some(edge) = canvas.edge(edge_id.as_str()) else {
            continue;
        };
        for node_id in [edge.from_node(), edge.to_node()] {
            if canvas.node(node_id.as_str()).is_some() && seen.insert(node_id.clone()) {
                nodes.push(node_id.clone());
            }
        }
    }
    nodes
}

/// Edges whose both endpoints are among the given nodes, ordered by edge id.
pub fn edges_between_nodes<'a>(
    canvas: &Canvas,
    node_ids: impl IntoIterator<Item = &'a ElementId>,
) -> Vec<ElementId> {
    let nodes: BTreeSet<&ElementId> = node_ids.into_iter().collect();
    let mut edges: BTreeSet<ElementId> = BTreeSet::new();
    for node_id in &nodes {
        for edge in canvas.edges_for_node(node_id.as_str()) {
            if nodes.contains(edge.from_node()) && nodes.contains(edge.to_node()) {
                edges.insert(edge.id().clone());
            }
        }
    }
    edges.into_iter().collect()
}
