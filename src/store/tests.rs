// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::env;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use rstest::{fixture, rstest};

use super::{load_canvas, read_node_records, save_canvas, StoreError};
use crate::model::fixtures::{canvas_pair, eid};
use crate::model::Side;

static TEMP_DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_DIR_COUNTER.fetch_add(1, Ordering::Relaxed);
        let mut path = env::temp_dir();
        path.push(format!("canvas-ref-{prefix}-{}-{nanos}-{counter}", std::process::id()));
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[fixture]
fn tmp() -> TempDir {
    TempDir::new("store")
}

#[rstest]
fn save_then_load_keeps_graph_and_leaves_no_temp_file(tmp: TempDir) {
    let path = tmp.path().join("Board.canvas");
    let mut canvas = canvas_pair();
    let mut data = canvas.edge_data("ab").unwrap();
    data.from_side = Some(Side::Right);
    data.to_side = Some(Side::Left);
    canvas.set_edge_data(data).unwrap();

    save_canvas(&path, &canvas).unwrap();

    let loaded = load_canvas(&path).unwrap();
    assert_eq!(loaded.nodes().len(), 2);
    let edge = loaded.edge("ab").unwrap();
    assert_eq!(edge.from_node(), &eid("a"));
    assert_eq!(edge.from_side(), Some(Side::Right));
    assert_eq!(edge.to_side(), Some(Side::Left));
    assert_eq!(loaded.node("b").unwrap().x(), 400.0);

    let leftovers = std::fs::read_dir(tmp.path())
        .unwrap()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
        .count();
    assert_eq!(leftovers, 0);
}

#[rstest]
fn missing_file_is_an_io_error(tmp: TempDir) {
    let path = tmp.path().join("Missing.canvas");
    let err = load_canvas(&path).unwrap_err();
    match err {
        StoreError::Io { path: err_path, source } => {
            assert_eq!(err_path, path);
            assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        }
        other => panic!("expected Io error, got: {other:?}"),
    }
}

#[rstest]
fn save_overwrites_existing_document(tmp: TempDir) {
    let path = tmp.path().join("Board.canvas");
    std::fs::write(&path, "not json").unwrap();

    save_canvas(&path, &canvas_pair()).unwrap();
    let loaded = load_canvas(&path).unwrap();
    assert_eq!(loaded.edges().len(), 1);
}

#[rstest]
#[tokio::test]
async fn node_records_are_read_without_edges(tmp: TempDir) {
    let path = tmp.path().join("Board.canvas");
    save_canvas(&path, &canvas_pair()).unwrap();

    let nodes = read_node_records(&path).await.unwrap();
    let ids = nodes.iter().map(|data| data.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, ["a", "b"]);
    assert_eq!(nodes[0].text.as_deref(), Some("A"));
}
