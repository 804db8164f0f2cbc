// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::canvas::Canvas;
use super::element::{EdgeData, NodeData};
use super::ids::ElementId;

pub(crate) fn eid(value: &str) -> ElementId {
    ElementId::new(value).expect("element id")
}

pub(crate) fn add_node(canvas: &mut Canvas, id: &str, x: f64, y: f64) {
    let data = NodeData::text_node(eid(id), x, y, id.to_uppercase());
    canvas.insert_node(data).expect("insert node");
}

pub(crate) fn add_edge(canvas: &mut Canvas, id: &str, from: &str, to: &str) {
    canvas
        .insert_edge(EdgeData::new(eid(id), eid(from), eid(to)))
        .expect("insert edge");
}

pub(crate) fn ids<'a>(values: impl IntoIterator<Item = &'a ElementId>) -> Vec<String> {
    values.into_iter().map(|id| id.as_str().to_owned()).collect()
}

pub(crate) fn selection_ids(canvas: &Canvas) -> Vec<String> {
    ids(canvas.selection().iter())
}

/// A(0,0) -> B(400,0).
pub(crate) fn canvas_pair() -> Canvas {
    let mut canvas = Canvas::new();
    add_node(&mut canvas, "a", 0.0, 0.0);
    add_node(&mut canvas, "b", 400.0, 0.0);
    add_edge(&mut canvas, "ab", "a", "b");
    canvas
}

/// a -> b -> c -> a.
pub(crate) fn canvas_cycle() -> Canvas {
    let mut canvas = Canvas::new();
    add_node(&mut canvas, "a", 0.0, 0.0);
    add_node(&mut canvas, "b", 400.0, 0.0);
    add_node(&mut canvas, "c", 200.0, 300.0);
    add_edge(&mut canvas, "ab", "a", "b");
    add_edge(&mut canvas, "bc", "b", "c");
    add_edge(&mut canvas, "ca", "c", "a");
    canvas
}

/// A small DAG with a diamond and a detached tail:
///
/// ```text
/// a -> b -> d -> e
/// a -> c -> d
/// x -> y
/// ```
pub(crate) fn canvas_diamond() -> Canvas {
    let mut canvas = Canvas::new();
    for (id, x, y) in [
        ("a", 0.0, 0.0),
        ("b", 400.0, -200.0),
        ("c", 400.0, 200.0),
        ("d", 800.0, 0.0),
        ("e", 1200.0, 0.0),
        ("x", 0.0, 800.0),
        ("y", 400.0, 800.0),
    ] {
        add_node(&mut canvas, id, x, y);
    }
    add_edge(&mut canvas, "e:ab", "a", "b");
    add_edge(&mut canvas, "e:ac", "a", "c");
    add_edge(&mut canvas, "e:bd", "b", "d");
    add_edge(&mut canvas, "e:cd", "c", "d");
    add_edge(&mut canvas, "e:de", "d", "e");
    add_edge(&mut canvas, "e:xy", "x", "y");
    canvas
}
