// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Structural discrimination of raw canvas records.
//!
//! Canvas documents carry no reliable variant tag for edges, so a record is a node when it has
//! planar coordinates and an edge when it has both endpoints. The decision is taken once, here,
//! and travels as an [`ElementRecord`] afterwards.

use std::fmt;

use log::warn;
use serde_json::Value;

use super::element::{EdgeData, ElementKind, NodeData};

const NODE_FIELDS: [&str; 2] = ["x", "y"];
const EDGE_FIELDS: [&str; 2] = ["fromNode", "toNode"];

fn has_fields(record: &Value, fields: &[&str]) -> bool {
    record
        .as_object()
        .is_some_and(|object| fields.iter().all(|field| object.contains_key(*field)))
}

/// `true` for records with planar coordinates and no endpoints.
pub fn is_node(record: &Value) -> bool {
    has_fields(record, &NODE_FIELDS) && !has_fields(record, &EDGE_FIELDS)
}

/// `true` for records with both endpoints and no planar coordinates.
pub fn is_edge(record: &Value) -> bool {
    has_fields(record, &EDGE_FIELDS) && !has_fields(record, &NODE_FIELDS)
}

/// Variant of a raw record, or `None` for records that are neither (logged).
pub fn classify(record: &Value) -> Option<ElementKind> {
    if is_node(record) {
        return Some(ElementKind::Node);
    }
    if is_edge(record) {
        return Some(ElementKind::Edge);
    }
    let id = record.get("id").and_then(Value::as_str).unwrap_or("<missing>");
    warn!(record_id = id; "canvas record is neither a node nor an edge");
    None
}

/// A raw record decoded into its typed variant.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementRecord {
    Node(NodeData),
    Edge(EdgeData),
}

impl ElementRecord {
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Node(_) => ElementKind::Node,
            Self::Edge(_) => ElementKind::Edge,
        }
    }
}

#[derive(Debug)]
pub enum RecordError {
    Unclassified,
    Malformed { kind: ElementKind, source: serde_json::Error },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unclassified => f.write_str("record is neither a node nor an edge"),
            Self::Malformed { kind, source } => write!(f, "malformed {kind} record: {source}"),
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unclassified => None,
            Self::Malformed { source, .. } => Some(source),
        }
    }
}

pub fn decode_record(record: Value) -> Result<ElementRecord, RecordError> {
    match classify(&record).ok_or(RecordError::Unclassified)? {
        ElementKind::Node => serde_json::from_value(record)
            .map(ElementRecord::Node)
            .map_err(|source| RecordError::Malformed { kind: ElementKind::Node, source }),
        ElementKind::Edge => serde_json::from_value(record)
            .map(ElementRecord::Edge)
            .map_err(|source| RecordError::Malformed { kind: ElementKind::Edge, source }),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{classify, decode_record, is_edge, is_node, ElementRecord, RecordError};
    use crate::model::ElementKind;

    #[test]
    fn node_and_edge_are_mutually_exclusive() {
        let node = json!({"id": "n1", "type": "text", "x": 0, "y": 0, "width": 10, "height": 10});
        let edge = json!({"id": "e1", "fromNode": "n1", "toNode": "n2"});

        assert!(is_node(&node));
        assert!(!is_edge(&node));
        assert!(is_edge(&edge));
        assert!(!is_node(&edge));
        assert_eq!(classify(&node), Some(ElementKind::Node));
        assert_eq!(classify(&edge), Some(ElementKind::Edge));
    }

    #[test]
    fn malformed_records_are_neither() {
        for record in [
            json!(null),
            json!("n1"),
            json!({"id": "x", "x": 1}),
            json!({"id": "x", "fromNode": "a"}),
            json!({"id": "x", "x": 1, "y": 2, "fromNode": "a", "toNode": "b"}),
        ] {
            assert!(!is_node(&record));
            assert!(!is_edge(&record));
            assert_eq!(classify(&record), None);
        }
    }

    #[test]
    fn decode_record_produces_typed_variant() {
        let record = json!({"id": "n1", "x": 5, "y": 6, "width": 10, "height": 20, "text": "hi"});
        let ElementRecord::Node(data) = decode_record(record).expect("decode") else {
            panic!("expected node record");
        };
        assert_eq!(data.id.as_str(), "n1");
        assert_eq!(data.x, 5.0);
        assert_eq!(data.text.as_deref(), Some("hi"));
    }

    #[test]
    fn decode_record_reports_bad_ids() {
        let record = json!({"id": "", "fromNode": "a", "toNode": "b"});
        let err = decode_record(record).unwrap_err();
        assert!(matches!(err, RecordError::Malformed { kind: ElementKind::Edge, .. }));
    }
}
