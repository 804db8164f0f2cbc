// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use super::element::{DataIdMismatch, Edge, EdgeData, Element, ElementKind, Node, NodeData};
use super::geometry::BoundingBox;
use super::ids::ElementId;

/// The set of highlighted elements, in selection order.
///
/// Read-only from the outside; all mutation goes through [`Canvas`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    items: IndexSet<ElementId>,
}

impl Selection {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.items.contains(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ElementId> + '_ {
        self.items.iter()
    }

    pub fn first(&self) -> Option<&ElementId> {
        self.items.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    DuplicateId { id: ElementId, existing: ElementKind },
    NotFound { id: ElementId },
    KindMismatch { id: ElementId, expected: ElementKind },
    DataIdMismatch(DataIdMismatch),
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateId { id, existing } => {
                write!(f, "element id '{id}' is already used by a {existing}")
            }
            Self::NotFound { id } => write!(f, "element not found (id={id})"),
            Self::KindMismatch { id, expected } => {
                write!(f, "element '{id}' is not a {expected}")
            }
            Self::DataIdMismatch(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CanvasError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DataIdMismatch(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DataIdMismatch> for CanvasError {
    fn from(err: DataIdMismatch) -> Self {
        Self::DataIdMismatch(err)
    }
}

/// The live graph of one open canvas document.
///
/// Invariants kept by every method:
/// - each element is stored under its own id, and ids are unique across nodes and edges;
/// - `incident` maps every endpoint node id to the ids of the edges touching it;
/// - the selection only holds ids of existing elements.
///
/// Nodes and edges keep their insertion order, which is the document's z-order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Canvas {
    nodes: IndexMap<ElementId, Node>,
    edges: IndexMap<ElementId, Edge>,
    incident: BTreeMap<ElementId, BTreeSet<ElementId>>,
    retained_nodes: Vec<Value>,
    retained_edges: Vec<Value>,
    selection: Selection,
    rev: u64,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &IndexMap<ElementId, Node> {
        &self.nodes
    }

    pub fn edges(&self) -> &IndexMap<ElementId, Edge> {
        &self.edges
    }

    /// Keeps a raw record the canvas could not take (malformed, bad id, duplicate) so that it
    /// is written back untouched. `array` names the document array it came from.
    pub fn retain_raw_record(&mut self, array: ElementKind, record: Value) {
        match array {
            ElementKind::Node => self.retained_nodes.push(record),
            ElementKind::Edge => self.retained_edges.push(record),
        }
    }

    pub fn raw_records(&self, array: ElementKind) -> &[Value] {
        match array {
            ElementKind::Node => &self.retained_nodes,
            ElementKind::Edge => &self.retained_edges,
        }
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.get(id)
    }

    /// Looks the id up among nodes first, then edges.
    pub fn element(&self, id: &str) -> Option<Element<'_>> {
        self.nodes
            .get(id)
            .map(Element::Node)
            .or_else(|| self.edges.get(id).map(Element::Edge))
    }

    pub fn kind_of(&self, id: &str) -> Option<ElementKind> {
        self.element(id).map(|element| element.kind())
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }

    fn ensure_free(&self, id: &ElementId) -> Result<(), CanvasError> {
        match self.kind_of(id.as_str()) {
            Some(existing) => Err(CanvasError::DuplicateId { id: id.clone(), existing }),
            None => Ok(()),
        }
    }

    pub fn insert_node(&mut self, data: NodeData) -> Result<(), CanvasError> {
        self.ensure_free(&data.id)?;
        self.nodes.insert(data.id.clone(), Node::new(data));
        self.bump_rev();
        Ok(())
    }

    /// Adds an edge. Endpoints are not required to exist (stale edges are tolerated).
    pub fn insert_edge(&mut self, data: EdgeData) -> Result<(), CanvasError> {
        self.ensure_free(&data.id)?;
        self.index_edge(&data);
        self.edges.insert(data.id.clone(), Edge::new(data));
        self.bump_rev();
        Ok(())
    }

    /// Removes a node together with every edge attached to it.
    pub fn remove_node(&mut self, id: &str) -> Option<NodeData> {
        let node = self.nodes.shift_remove(id)?;
        let edge_ids = self.incident.remove(id).unwrap_or_default();
        for edge_id in edge_ids {
            self.remove_edge(edge_id.as_str());
        }
        self.selection.items.shift_remove(id);
        self.bump_rev();
        Some(node.into_data())
    }

    pub fn remove_edge(&mut self, id: &str) -> Option<EdgeData> {
        let edge = self.edges.shift_remove(id)?;
        self.unindex_edge(edge.data_ref());
        self.selection.items.shift_remove(id);
        self.bump_rev();
        Some(edge.into_data())
    }

    fn index_edge(&mut self, data: &EdgeData) {
        for node_id in [&data.from_node, &data.to_node] {
            self.incident.entry(node_id.clone()).or_default().insert(data.id.clone());
        }
    }

    fn unindex_edge(&mut self, data: &EdgeData) {
        for node_id in [&data.from_node, &data.to_node] {
            if let Some(edge_ids) = self.incident.get_mut(node_id) {
                edge_ids.remove(&data.id);
                if edge_ids.is_empty() {
                    self.incident.remove(node_id);
                }
            }
        }
    }

    /// Edges attached to the node in either direction, ordered by edge id.
    pub fn edges_for_node<'a>(&'a self, node_id: &str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.incident
            .get(node_id)
            .into_iter()
            .flatten()
            .filter_map(|edge_id| self.edges.get(edge_id))
    }

    pub fn node_data(&self, id: &str) -> Option<NodeData> {
        self.nodes.get(id).map(Node::data)
    }

    pub fn edge_data(&self, id: &str) -> Option<EdgeData> {
        self.edges.get(id).map(Edge::data)
    }

    /// Writes a whole node record back. The record id must match an existing node.
    pub fn set_node_data(&mut self, data: NodeData) -> Result<(), CanvasError> {
        let Some(node) = self.nodes.get_mut(data.id.as_str()) else {
            return Err(self.missing_as(&data.id, ElementKind::Node));
        };
        node.set_data(data)?;
        self.bump_rev();
        Ok(())
    }

    /// Writes a whole edge record back, re-indexing its endpoints.
    pub fn set_edge_data(&mut self, data: EdgeData) -> Result<(), CanvasError> {
        let previous = match self.edges.get_mut(data.id.as_str()) {
            Some(edge) => {
                let previous = edge.data();
                edge.set_data(data.clone())?;
                previous
            }
            None => return Err(self.missing_as(&data.id, ElementKind::Edge)),
        };
        self.unindex_edge(&previous);
        self.index_edge(&data);
        self.bump_rev();
        Ok(())
    }

    fn missing_as(&self, id: &ElementId, expected: ElementKind) -> CanvasError {
        if self.element(id.as_str()).is_some() {
            CanvasError::KindMismatch { id: id.clone(), expected }
        } else {
            CanvasError::NotFound { id: id.clone() }
        }
    }

    /// Moves an element to a new id, keeping every index consistent.
    ///
    /// Nothing is touched when `new_id` is already in use by any element (node or edge). When a
    /// node moves, the edges attached to it follow. A selected element stays selected.
    pub fn rebind_id(
        &mut self,
        old_id: &ElementId,
        new_id: ElementId,
    ) -> Result<ElementKind, CanvasError> {
        let Some(kind) = self.kind_of(old_id.as_str()) else {
            return Err(CanvasError::NotFound { id: old_id.clone() });
        };
        if &new_id == old_id {
            return Ok(kind);
        }
        self.ensure_free(&new_id)?;

        match kind {
            ElementKind::Node => {
                let Some((index, _, mut node)) = self.nodes.shift_remove_full(old_id) else {
                    return Err(CanvasError::NotFound { id: old_id.clone() });
                };
                node.set_id(new_id.clone());
                self.nodes.shift_insert(index, new_id.clone(), node);

                let edge_ids = self.incident.remove(old_id).unwrap_or_default();
                for edge_id in &edge_ids {
                    if let Some(edge) = self.edges.get_mut(edge_id) {
                        edge.retarget_node(old_id, &new_id);
                    }
                }
                // Stale edges may already point at the new id.
                if !edge_ids.is_empty() {
                    self.incident.entry(new_id.clone()).or_default().extend(edge_ids);
                }
            }
            ElementKind::Edge => {
                let Some((index, _, mut edge)) = self.edges.shift_remove_full(old_id) else {
                    return Err(CanvasError::NotFound { id: old_id.clone() });
                };
                self.unindex_edge(edge.data_ref());
                edge.set_id(new_id.clone());
                self.index_edge(edge.data_ref());
                self.edges.shift_insert(index, new_id.clone(), edge);
            }
        }

        if let Some(index) = self.selection.items.get_index_of(old_id.as_str()) {
            self.selection.items.shift_remove_index(index);
            self.selection.items.shift_insert(index, new_id);
        }

        self.bump_rev();
        Ok(kind)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Adds the element to the selection. Unknown ids are ignored.
    pub fn select(&mut self, id: &str) -> bool {
        let Some(element) = self.element(id) else {
            return false;
        };
        let id = element.id().clone();
        self.selection.items.insert(id)
    }

    pub fn deselect(&mut self, id: &str) -> bool {
        self.selection.items.shift_remove(id)
    }

    /// Replaces the selection with exactly this element.
    pub fn select_only(&mut self, id: &str) -> bool {
        if self.element(id).is_none() {
            return false;
        }
        self.deselect_all();
        self.select(id)
    }

    pub fn deselect_all(&mut self) {
        self.selection.items.clear();
    }

    pub fn selected_elements(&self) -> impl Iterator<Item = Element<'_>> + '_ {
        self.selection.iter().filter_map(|id| self.element(id.as_str()))
    }

    /// Union of the bounding boxes of the selected nodes and of the endpoints of selected edges.
    pub fn selection_bbox(&self) -> Option<BoundingBox> {
        let mut bbox: Option<BoundingBox> = None;
        let mut extend = |other: BoundingBox| {
            bbox = Some(match bbox {
                Some(current) => current.union(&other),
                None => other,
            });
        };

        for element in self.selected_elements() {
            match element {
                Element::Node(node) => extend(node.bbox()),
                Element::Edge(edge) => {
                    for node_id in [edge.from_node(), edge.to_node()] {
                        if let Some(node) = self.nodes.get(node_id) {
                            extend(node.bbox());
                        }
                    }
                }
            }
        }

        bbox
    }
}

#[cfg(test)]
mod tests {
    use super::{Canvas, CanvasError};
    use crate::model::{EdgeData, ElementId, ElementKind, NodeData};

    fn eid(value: &str) -> ElementId {
        ElementId::new(value).expect("element id")
    }

    fn canvas_ab() -> Canvas {
        let mut canvas = Canvas::new();
        canvas.insert_node(NodeData::text_node(eid("a"), 0.0, 0.0, "A")).expect("a");
        canvas.insert_node(NodeData::text_node(eid("b"), 400.0, 0.0, "B")).expect("b");
        canvas.insert_edge(EdgeData::new(eid("ab"), eid("a"), eid("b"))).expect("ab");
        canvas
    }

    fn edge_ids(canvas: &Canvas, node: &str) -> Vec<String> {
        canvas.edges_for_node(node).map(|edge| edge.id().to_string()).collect()
    }

    #[test]
    fn ids_are_unique_across_nodes_and_edges() {
        let mut canvas = canvas_ab();
        let err = canvas.insert_edge(EdgeData::new(eid("a"), eid("a"), eid("b"))).unwrap_err();
        assert_eq!(err, CanvasError::DuplicateId { id: eid("a"), existing: ElementKind::Node });
    }

    #[test]
    fn rebind_node_moves_key_and_retargets_edges() {
        let mut canvas = canvas_ab();
        canvas.select("a");

        let kind = canvas.rebind_id(&eid("a"), eid("alpha")).expect("rebind");
        assert_eq!(kind, ElementKind::Node);

        assert!(canvas.node("a").is_none());
        let node = canvas.node("alpha").expect("moved node");
        assert_eq!(node.id(), &eid("alpha"));
        assert_eq!(canvas.edge("ab").expect("edge").from_node(), &eid("alpha"));
        assert_eq!(edge_ids(&canvas, "alpha"), vec!["ab"]);
        assert!(edge_ids(&canvas, "a").is_empty());
        assert!(canvas.selection().contains(&eid("alpha")));
    }

    #[test]
    fn rebind_node_onto_stale_endpoint_merges_incident_edges() {
        let mut canvas = canvas_ab();
        canvas.insert_node(NodeData::text_node(eid("z"), 0.0, 400.0, "Z")).expect("z");
        canvas.insert_edge(EdgeData::new(eid("s"), eid("b"), eid("ghost"))).expect("stale");

        canvas.rebind_id(&eid("a"), eid("ghost")).expect("rebind");
        assert_eq!(edge_ids(&canvas, "ghost"), vec!["ab", "s"]);

        canvas.remove_node("ghost").expect("removed");
        assert!(canvas.edge("s").is_none());
        assert!(canvas.edge("ab").is_none());
    }

    #[test]
    fn rebind_keeps_insertion_order() {
        let mut canvas = canvas_ab();
        canvas.rebind_id(&eid("a"), eid("zeta")).expect("rebind");
        let order = canvas.nodes().keys().map(ElementId::as_str).collect::<Vec<_>>();
        assert_eq!(order, ["zeta", "b"]);
    }

    #[test]
    fn rebind_edge_keeps_incident_index() {
        let mut canvas = canvas_ab();
        canvas.rebind_id(&eid("ab"), eid("link")).expect("rebind");
        assert_eq!(edge_ids(&canvas, "a"), vec!["link"]);
        assert_eq!(edge_ids(&canvas, "b"), vec!["link"]);
        assert_eq!(canvas.edge("link").expect("edge").id(), &eid("link"));
    }

    #[test]
    fn rebind_to_taken_id_changes_nothing() {
        let mut canvas = canvas_ab();
        let before = canvas.clone();
        let err = canvas.rebind_id(&eid("a"), eid("ab")).unwrap_err();
        assert_eq!(err, CanvasError::DuplicateId { id: eid("ab"), existing: ElementKind::Edge });
        assert_eq!(canvas, before);
    }

    #[test]
    fn remove_node_drops_incident_edges_and_selection() {
        let mut canvas = canvas_ab();
        canvas.select("ab");
        canvas.select("b");
        canvas.remove_node("a").expect("removed");
        assert!(canvas.edge("ab").is_none());
        assert_eq!(canvas.selection().iter().map(ElementId::as_str).collect::<Vec<_>>(), ["b"]);
        assert!(edge_ids(&canvas, "b").is_empty());
    }

    #[test]
    fn set_edge_data_reindexes_endpoints() {
        let mut canvas = canvas_ab();
        canvas.insert_node(NodeData::text_node(eid("c"), 0.0, 400.0, "C")).expect("c");

        let mut data = canvas.edge_data("ab").expect("edge data");
        data.to_node = eid("c");
        canvas.set_edge_data(data).expect("set data");

        assert!(edge_ids(&canvas, "b").is_empty());
        assert_eq!(edge_ids(&canvas, "c"), vec!["ab"]);
    }

    #[test]
    fn set_data_on_wrong_kind_is_reported() {
        let mut canvas = canvas_ab();
        let err = canvas.set_edge_data(EdgeData::new(eid("a"), eid("a"), eid("b"))).unwrap_err();
        assert_eq!(err, CanvasError::KindMismatch { id: eid("a"), expected: ElementKind::Edge });
    }

    #[test]
    fn select_only_replaces_selection_and_ignores_unknown_ids() {
        let mut canvas = canvas_ab();
        canvas.select("a");
        canvas.select("b");
        assert!(!canvas.select_only("missing"));
        assert_eq!(canvas.selection().len(), 2);

        assert!(canvas.select_only("ab"));
        assert_eq!(canvas.selection().first(), Some(&eid("ab")));
        assert_eq!(canvas.selection().len(), 1);
    }

    #[test]
    fn mutations_bump_revision() {
        let mut canvas = canvas_ab();
        let rev = canvas.rev();
        canvas.rebind_id(&eid("ab"), eid("e")).expect("rebind");
        assert_eq!(canvas.rev(), rev + 1);
    }
}
