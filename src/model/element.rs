// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::geometry::{BoundingBox, Side};
use super::ids::ElementId;

/// Which of the two element variants an id or record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Node,
    Edge,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Node => f.write_str("node"),
            Self::Edge => f.write_str("edge"),
        }
    }
}

/// Terminator drawn at an edge endpoint. Never interpreted, only carried around.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EndStyle {
    None,
    Arrow,
    Other(String),
}

impl From<String> for EndStyle {
    fn from(value: String) -> Self {
        match value.as_str() {
            "none" => Self::None,
            "arrow" => Self::Arrow,
            _ => Self::Other(value),
        }
    }
}

impl From<EndStyle> for String {
    fn from(end: EndStyle) -> Self {
        match end {
            EndStyle::None => "none".to_owned(),
            EndStyle::Arrow => "arrow".to_owned(),
            EndStyle::Other(value) => value,
        }
    }
}

/// Persisted record of a node, as stored in a `.canvas` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub id: ElementId,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl NodeData {
    pub fn new(id: ElementId, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            id,
            kind: None,
            x,
            y,
            width,
            height,
            text: None,
            label: None,
            url: None,
            file: None,
            color: None,
            extra: Map::new(),
        }
    }

    pub fn text_node(id: ElementId, x: f64, y: f64, text: impl Into<String>) -> Self {
        let mut data = Self::new(id, x, y, 250.0, 60.0);
        data.kind = Some("text".to_owned());
        data.text = Some(text.into());
        data
    }

    /// Display text: the text payload, else the group label, else the link, else the file.
    pub fn title(&self) -> Option<&str> {
        self.text
            .as_deref()
            .or(self.label.as_deref())
            .or(self.url.as_deref())
            .or(self.file.as_deref())
    }
}

/// One end of an edge: the node it attaches to, the face, and the terminator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub node: ElementId,
    pub side: Option<Side>,
    pub end: Option<EndStyle>,
}

impl Endpoint {
    pub fn new(node: ElementId) -> Self {
        Self { node, side: None, end: None }
    }
}

/// Persisted record of an edge, as stored in a `.canvas` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeData {
    pub id: ElementId,
    pub from_node: ElementId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_side: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_end: Option<EndStyle>,
    pub to_node: ElementId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_side: Option<Side>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_end: Option<EndStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EdgeData {
    pub fn new(id: ElementId, from_node: ElementId, to_node: ElementId) -> Self {
        Self {
            id,
            from_node,
            from_side: None,
            from_end: None,
            to_node,
            to_side: None,
            to_end: None,
            label: None,
            color: None,
            extra: Map::new(),
        }
    }

    pub fn from_endpoint(&self) -> Endpoint {
        Endpoint {
            node: self.from_node.clone(),
            side: self.from_side,
            end: self.from_end.clone(),
        }
    }

    pub fn to_endpoint(&self) -> Endpoint {
        Endpoint {
            node: self.to_node.clone(),
            side: self.to_side,
            end: self.to_end.clone(),
        }
    }

    /// Replaces both endpoints at once.
    pub fn set_endpoints(&mut self, from: Endpoint, to: Endpoint) {
        self.from_node = from.node;
        self.from_side = from.side;
        self.from_end = from.end;
        self.to_node = to.node;
        self.to_side = to.side;
        self.to_end = to.end;
    }
}

/// Returned when a data record is written back to an element with a different id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataIdMismatch {
    expected: ElementId,
    found: ElementId,
}

impl DataIdMismatch {
    pub fn expected(&self) -> &ElementId {
        &self.expected
    }

    pub fn found(&self) -> &ElementId {
        &self.found
    }
}

impl fmt::Display for DataIdMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "data record id mismatch (expected {}, found {}); use rebind to change ids",
            self.expected, self.found
        )
    }
}

impl std::error::Error for DataIdMismatch {}

fn check_data_id(expected: &ElementId, found: &ElementId) -> Result<(), DataIdMismatch> {
    if expected != found {
        return Err(DataIdMismatch { expected: expected.clone(), found: found.clone() });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    data: NodeData,
}

impl Node {
    pub fn new(data: NodeData) -> Self {
        Self { data }
    }

    pub fn id(&self) -> &ElementId {
        &self.data.id
    }

    pub fn x(&self) -> f64 {
        self.data.x
    }

    pub fn y(&self) -> f64 {
        self.data.y
    }

    pub fn width(&self) -> f64 {
        self.data.width
    }

    pub fn height(&self) -> f64 {
        self.data.height
    }

    pub fn text(&self) -> Option<&str> {
        self.data.text.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.data.label.as_deref()
    }

    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::from_rect(self.data.x, self.data.y, self.data.width, self.data.height)
    }

    pub fn title(&self) -> Option<&str> {
        self.data.title()
    }

    /// A detached copy of the persisted record.
    pub fn data(&self) -> NodeData {
        self.data.clone()
    }

    pub fn data_ref(&self) -> &NodeData {
        &self.data
    }

    pub(crate) fn set_data(&mut self, data: NodeData) -> Result<(), DataIdMismatch> {
        check_data_id(&self.data.id, &data.id)?;
        self.data = data;
        Ok(())
    }

    pub(crate) fn set_id(&mut self, id: ElementId) {
        self.data.id = id;
    }

    pub(crate) fn into_data(self) -> NodeData {
        self.data
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    data: EdgeData,
}

impl Edge {
    pub fn new(data: EdgeData) -> Self {
        Self { data }
    }

    pub fn id(&self) -> &ElementId {
        &self.data.id
    }

    pub fn from_node(&self) -> &ElementId {
        &self.data.from_node
    }

    pub fn to_node(&self) -> &ElementId {
        &self.data.to_node
    }

    pub fn from_side(&self) -> Option<Side> {
        self.data.from_side
    }

    pub fn to_side(&self) -> Option<Side> {
        self.data.to_side
    }

    pub fn label(&self) -> Option<&str> {
        self.data.label.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.label()
    }

    pub fn data(&self) -> EdgeData {
        self.data.clone()
    }

    pub fn data_ref(&self) -> &EdgeData {
        &self.data
    }

    pub(crate) fn set_data(&mut self, data: EdgeData) -> Result<(), DataIdMismatch> {
        check_data_id(&self.data.id, &data.id)?;
        self.data = data;
        Ok(())
    }

    pub(crate) fn set_id(&mut self, id: ElementId) {
        self.data.id = id;
    }

    pub(crate) fn retarget_node(&mut self, old: &ElementId, new: &ElementId) {
        if &self.data.from_node == old {
            self.data.from_node = new.clone();
        }
        if &self.data.to_node == old {
            self.data.to_node = new.clone();
        }
    }

    pub(crate) fn into_data(self) -> EdgeData {
        self.data
    }
}

/// Borrowed view of a canvas element with its variant already decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Element<'a> {
    Node(&'a Node),
    Edge(&'a Edge),
}

impl<'a> Element<'a> {
    pub fn id(&self) -> &'a ElementId {
        match self {
            Self::Node(node) => node.id(),
            Self::Edge(edge) => edge.id(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Node(_) => ElementKind::Node,
            Self::Edge(_) => ElementKind::Edge,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node(_))
    }

    pub fn is_edge(&self) -> bool {
        matches!(self, Self::Edge(_))
    }

    pub fn as_node(&self) -> Option<&'a Node> {
        match self {
            Self::Node(node) => Some(node),
            Self::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<&'a Edge> {
        match self {
            Self::Node(_) => None,
            Self::Edge(edge) => Some(edge),
        }
    }

    pub fn title(&self) -> Option<&'a str> {
        match self {
            Self::Node(node) => node.title(),
            Self::Edge(edge) => edge.title(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DataIdMismatch, EdgeData, Endpoint, EndStyle, Node, NodeData};
    use crate::model::{ElementId, Side};

    fn eid(value: &str) -> ElementId {
        ElementId::new(value).expect("element id")
    }

    #[test]
    fn node_title_falls_back_from_text_to_file() {
        let mut data = NodeData::new(eid("n1"), 0.0, 0.0, 10.0, 10.0);
        assert_eq!(Node::new(data.clone()).title(), None);

        data.file = Some("notes/a.md".to_owned());
        assert_eq!(Node::new(data.clone()).title(), Some("notes/a.md"));

        data.url = Some("https://example.com".to_owned());
        assert_eq!(Node::new(data.clone()).title(), Some("https://example.com"));

        data.label = Some("Group".to_owned());
        assert_eq!(Node::new(data.clone()).title(), Some("Group"));

        data.text = Some("Hello".to_owned());
        assert_eq!(Node::new(data).title(), Some("Hello"));
    }

    #[test]
    fn node_data_copy_is_detached() {
        let node = Node::new(NodeData::text_node(eid("n1"), 0.0, 0.0, "before"));
        let mut copy = node.data();
        copy.text = Some("after".to_owned());
        assert_eq!(node.text(), Some("before"));
    }

    #[test]
    fn set_data_rejects_foreign_id() {
        let mut node = Node::new(NodeData::new(eid("n1"), 0.0, 0.0, 10.0, 10.0));
        let err = node.set_data(NodeData::new(eid("n2"), 0.0, 0.0, 10.0, 10.0)).unwrap_err();
        assert_eq!(err, DataIdMismatch { expected: eid("n1"), found: eid("n2") });
        assert_eq!(node.id(), &eid("n1"));
    }

    #[test]
    fn edge_endpoints_can_be_swapped_as_a_whole() {
        let mut data = EdgeData::new(eid("e1"), eid("a"), eid("b"));
        data.from_side = Some(Side::Right);
        data.to_side = Some(Side::Left);
        data.to_end = Some(EndStyle::Arrow);

        let (from, to) = (data.from_endpoint(), data.to_endpoint());
        data.set_endpoints(to, from);

        assert_eq!(data.from_node, eid("b"));
        assert_eq!(data.from_side, Some(Side::Left));
        assert_eq!(data.from_end, Some(EndStyle::Arrow));
        assert_eq!(data.to_node, eid("a"));
        assert_eq!(data.to_side, Some(Side::Right));
        assert_eq!(data.to_end, None);
        assert_eq!(Endpoint::new(eid("a")).side, None);
    }

    #[test]
    fn edge_record_uses_camel_case_and_keeps_unknown_ends() {
        let json = r#"{"id":"e1","fromNode":"a","fromSide":"bottom","toNode":"b","toSide":"top","toEnd":"diamond","styleAttributes":{}}"#;
        let data: EdgeData = serde_json::from_str(json).expect("edge record");
        assert_eq!(data.from_side, Some(Side::Bottom));
        assert_eq!(data.to_end, Some(EndStyle::Other("diamond".to_owned())));
        assert!(data.extra.contains_key("styleAttributes"));

        let value = serde_json::to_value(&data).expect("serialize");
        assert_eq!(value["toEnd"], "diamond");
        assert_eq!(value["fromNode"], "a");
        assert!(value.get("fromEnd").is_none());
    }
}
