// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{decode_record, Canvas, EdgeData, ElementKind, ElementRecord, NodeData};

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

/// On-disk shape of a `.canvas` document. Records stay raw until classified.
#[derive(Debug, Default, Deserialize)]
struct CanvasDocumentJson {
    #[serde(default)]
    nodes: Vec<Value>,
    #[serde(default)]
    edges: Vec<Value>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RecordOut<'a, T> {
    Live(&'a T),
    Raw(&'a Value),
}

#[derive(Debug, Serialize)]
struct CanvasDocumentOut<'a> {
    nodes: Vec<RecordOut<'a, NodeData>>,
    edges: Vec<RecordOut<'a, EdgeData>>,
}

/// Decodes one array of a canvas document, pairing each record with its raw form. Records of
/// the other variant or that fail to decode are logged and handed to `reject` unchanged.
fn decode_records(
    records: Vec<Value>,
    expected: ElementKind,
    mut reject: impl FnMut(Value),
) -> Vec<(ElementRecord, Value)> {
    let mut decoded = Vec::with_capacity(records.len());
    for raw in records {
        match decode_record(raw.clone()) {
            Ok(record) if record.kind() == expected => decoded.push((record, raw)),
            Ok(record) => {
                warn!(expected:% = expected, found:% = record.kind(); "canvas record in the wrong array, skipped");
                reject(raw);
            }
            Err(err) => {
                warn!(error:% = err; "canvas record skipped");
                reject(raw);
            }
        }
    }
    decoded
}

/// Builds a live canvas from document text.
///
/// Malformed or duplicate records are logged and kept raw on the canvas, so a later save
/// writes them back unchanged.
pub fn parse_canvas(path: &Path, source: &str) -> Result<Canvas, StoreError> {
    let document: CanvasDocumentJson = if source.trim().is_empty() {
        CanvasDocumentJson::default()
    } else {
        serde_json::from_str(source)
            .map_err(|source| StoreError::Json { path: path.to_path_buf(), source })?
    };

    let mut rejected_nodes = Vec::new();
    let mut rejected_edges = Vec::new();
    let mut canvas = Canvas::new();
    let nodes = decode_records(document.nodes, ElementKind::Node, |raw| rejected_nodes.push(raw));
    for (record, raw) in nodes {
        if let ElementRecord::Node(data) = record {
            if let Err(err) = canvas.insert_node(data) {
                warn!(error:% = err; "canvas record skipped");
                rejected_nodes.push(raw);
            }
        }
    }
    let edges = decode_records(document.edges, ElementKind::Edge, |raw| rejected_edges.push(raw));
    for (record, raw) in edges {
        if let ElementRecord::Edge(data) = record {
            if let Err(err) = canvas.insert_edge(data) {
                warn!(error:% = err; "canvas record skipped");
                rejected_edges.push(raw);
            }
        }
    }
    for raw in rejected_nodes {
        canvas.retain_raw_record(ElementKind::Node, raw);
    }
    for raw in rejected_edges {
        canvas.retain_raw_record(ElementKind::Edge, raw);
    }

    debug!(
        path:? = path, nodes = canvas.nodes().len(), edges = canvas.edges().len();
        "canvas loaded"
    );
    Ok(canvas)
}

pub fn load_canvas(path: &Path) -> Result<Canvas, StoreError> {
    let source = fs::read_to_string(path)
        .map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;
    parse_canvas(path, &source)
}

/// Pretty JSON with nodes and edges in canvas order, followed by the retained raw records.
pub fn canvas_to_string(canvas: &Canvas) -> Result<String, serde_json::Error> {
    let document = CanvasDocumentOut {
        nodes: canvas
            .nodes()
            .values()
            .map(|node| RecordOut::Live(node.data_ref()))
            .chain(canvas.raw_records(ElementKind::Node).iter().map(RecordOut::Raw))
            .collect(),
        edges: canvas
            .edges()
            .values()
            .map(|edge| RecordOut::Live(edge.data_ref()))
            .chain(canvas.raw_records(ElementKind::Edge).iter().map(RecordOut::Raw))
            .collect(),
    };
    let mut out = serde_json::to_string_pretty(&document)?;
    out.push('\n');
    Ok(out)
}

/// Writes through a sibling temp file and a rename, so readers never see half a document.
pub fn save_canvas(path: &Path, canvas: &Canvas) -> Result<(), StoreError> {
    let contents = canvas_to_string(canvas)
        .map_err(|source| StoreError::Json { path: path.to_path_buf(), source })?;

    let mut tmp_name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, contents.as_bytes())
        .map_err(|source| StoreError::Io { path: tmp_path.clone(), source })?;
    fs::rename(&tmp_path, path).map_err(|source| {
        let _ = fs::remove_file(&tmp_path);
        StoreError::Io { path: path.to_path_buf(), source }
    })?;

    debug!(path:? = path, rev = canvas.rev(); "canvas saved");
    Ok(())
}

/// Reads only the node records of a canvas document, without building a live canvas.
///
/// This is the one suspension point of the suggestion path.
pub async fn read_node_records(path: &Path) -> Result<Vec<NodeData>, StoreError> {
    let source = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| StoreError::Io { path: path.to_path_buf(), source })?;
    if source.trim().is_empty() {
        return Ok(Vec::new());
    }
    let document: CanvasDocumentJson = serde_json::from_str(&source)
        .map_err(|source| StoreError::Json { path: path.to_path_buf(), source })?;

    Ok(decode_records(document.nodes, ElementKind::Node, drop)
        .into_iter()
        .filter_map(|(record, _)| match record {
            ElementRecord::Node(data) => Some(data),
            ElementRecord::Edge(_) => None,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{canvas_to_string, parse_canvas, StoreError};
    use crate::model::{ElementKind, EndStyle, Side};

    const SAMPLE: &str = r#"{
  "nodes": [
    {"id": "a", "type": "text", "text": "Alpha", "x": 0, "y": 0, "width": 250, "height": 60},
    {"id": "g", "type": "group", "label": "Group", "x": -50, "y": -50, "width": 800, "height": 400},
    {"id": "broken", "type": "text"},
    {"id": "misplaced", "fromNode": "a", "toNode": "g"}
  ],
  "edges": [
    {"id": "ag", "fromNode": "a", "fromSide": "right", "toNode": "g", "toSide": "left", "toEnd": "arrow"},
    {"id": "a", "fromNode": "g", "toNode": "a"},
    {"id": "stale", "fromNode": "a", "toNode": "deleted"}
  ]
}"#;

    #[test]
    fn parse_keeps_valid_records_and_skips_the_rest() {
        let canvas = parse_canvas(Path::new("Board.canvas"), SAMPLE).expect("parse");

        let node_ids = canvas.nodes().keys().map(|id| id.as_str()).collect::<Vec<_>>();
        assert_eq!(node_ids, ["a", "g"]);
        let edge_ids = canvas.edges().keys().map(|id| id.as_str()).collect::<Vec<_>>();
        assert_eq!(edge_ids, ["ag", "stale"]);

        let edge = canvas.edge("ag").expect("edge");
        assert_eq!(edge.from_side(), Some(Side::Right));
        assert_eq!(edge.data_ref().to_end, Some(EndStyle::Arrow));
        assert_eq!(canvas.node("g").expect("group").title(), Some("Group"));
    }

    #[test]
    fn empty_document_is_an_empty_canvas() {
        let canvas = parse_canvas(Path::new("Empty.canvas"), "  ").expect("parse");
        assert!(canvas.is_empty());
        let canvas = parse_canvas(Path::new("Empty.canvas"), "{}").expect("parse");
        assert!(canvas.is_empty());
    }

    #[test]
    fn invalid_json_reports_path() {
        let err = parse_canvas(Path::new("Bad.canvas"), "{").unwrap_err();
        match err {
            StoreError::Json { path, .. } => assert_eq!(path, Path::new("Bad.canvas")),
            other => panic!("expected Json error, got: {other:?}"),
        }
    }

    #[test]
    fn serialized_document_preserves_node_type_and_extra_fields() {
        let source = r##"{"nodes":[{"id":"n","type":"file","file":"a.md","x":1,"y":2,"width":3,"height":4,"subpath":"#h"}],"edges":[]}"##;
        let canvas = parse_canvas(Path::new("x.canvas"), source).expect("parse");
        let out = canvas_to_string(&canvas).expect("serialize");
        let value: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(value["nodes"][0]["type"], "file");
        assert_eq!(value["nodes"][0]["subpath"], "#h");
        assert_eq!(value["nodes"][0]["x"], 1.0);
        assert_eq!(value["edges"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn save_keeps_document_order_and_records_the_canvas_rejected() {
        let source = r#"{
  "nodes": [
    {"id": "z", "type": "text", "text": "Zed", "x": 0, "y": 0, "width": 10, "height": 10},
    {"id": "weird]]id", "type": "text", "text": "Odd", "x": 5, "y": 5, "width": 10, "height": 10},
    {"id": "a", "type": "text", "text": "Alpha", "x": 20, "y": 0, "width": 10, "height": 10},
    {"id": "a", "type": "text", "text": "Again", "x": 40, "y": 0, "width": 10, "height": 10}
  ],
  "edges": [
    {"id": "za", "fromNode": "z", "toNode": "a"},
    {"id": "half", "fromNode": "z"}
  ]
}"#;
        let canvas = parse_canvas(Path::new("Board.canvas"), source).expect("parse");
        assert_eq!(canvas.raw_records(ElementKind::Node).len(), 2);
        assert_eq!(canvas.raw_records(ElementKind::Edge).len(), 1);

        let out = canvas_to_string(&canvas).expect("serialize");
        let value: serde_json::Value = serde_json::from_str(&out).expect("json");
        let node_ids = value["nodes"]
            .as_array()
            .expect("nodes")
            .iter()
            .map(|node| node["id"].as_str().expect("id"))
            .collect::<Vec<_>>();
        assert_eq!(node_ids, ["z", "a", "weird]]id", "a"]);
        assert_eq!(value["nodes"][3]["text"], "Again");
        assert_eq!(value["edges"][1]["id"], "half");

        let reparsed = parse_canvas(Path::new("Board.canvas"), &out).expect("reparse");
        assert_eq!(canvas_to_string(&reparsed).expect("serialize"), out);
    }
}
