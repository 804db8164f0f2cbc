// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use canvas_ref::model::{Canvas, EdgeData, ElementId, NodeData};

fn id(value: String) -> ElementId {
    ElementId::new(value).expect("element id")
}

/// Layered grid: `layers` columns of `width` nodes, every node linked to `fan_out` nodes of the
/// next column. Node ids are `n{layer}_{row}`.
pub fn layered(layers: usize, width: usize, fan_out: usize) -> Canvas {
    let mut canvas = Canvas::new();
    for layer in 0..layers {
        for row in 0..width {
            let node = NodeData::text_node(
                id(format!("n{layer}_{row}")),
                layer as f64 * 400.0,
                row as f64 * 120.0,
                format!("Layer {layer} row {row}"),
            );
            canvas.insert_node(node).expect("insert node");
        }
    }
    for layer in 0..layers.saturating_sub(1) {
        for row in 0..width {
            for hop in 0..fan_out {
                let target = (row + hop * 7) % width;
                let edge = EdgeData::new(
                    id(format!("e{layer}_{row}_{hop}")),
                    id(format!("n{layer}_{row}")),
                    id(format!("n{}_{target}", layer + 1)),
                );
                canvas.insert_edge(edge).expect("insert edge");
            }
        }
    }
    canvas
}

pub fn start_nodes(width: usize) -> Vec<ElementId> {
    (0..width.min(4)).map(|row| id(format!("n0_{row}"))).collect()
}
