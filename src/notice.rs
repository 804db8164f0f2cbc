// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! User-facing notice texts.

use std::fmt::Write as _;

use crate::model::{Element, ElementId};
use crate::query::traverse::Direction;

/// Longest title preview in the copied-references notice, in characters.
pub const COPIED_TITLE_PREVIEW: usize = 10;
/// Longest title preview in the selection-expansion notice, in characters.
pub const EXPANSION_TITLE_PREVIEW: usize = 15;
/// Titles listed in the selection-expansion notice before the remainder is summarised.
pub const EXPANSION_LISTED: usize = 3;

pub const NO_ELEMENT_SELECTED: &str = "No canvas node/edge selected";
pub const NO_NODE_SELECTED: &str = "No node selected";

/// Replaces line breaks with spaces.
pub fn one_line(text: &str) -> String {
    text.replace("\r\n", " ").replace('\n', " ")
}

/// Truncates to `max_chars` characters with a trailing `...`, then flattens to one line.
pub fn preview(text: &str, max_chars: usize) -> String {
    let truncated = match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    };
    one_line(&truncated)
}

fn short_id(id: &ElementId) -> &str {
    let id = id.as_str();
    match id.char_indices().nth(4) {
        Some((cut, _)) => &id[..cut],
        None => id,
    }
}

pub fn copied_notice<'a>(
    document_path: &str,
    elements: impl IntoIterator<Item = Element<'a>>,
) -> String {
    let elements = elements.into_iter().collect::<Vec<_>>();
    let verb = if elements.len() > 1 { "are" } else { "is" };
    let mut text = format!(
        "{document_path}: Path(s) of {} canvas element(s) {verb} copied to clipboard!",
        elements.len()
    );

    for (index, element) in elements.iter().enumerate() {
        let kind = match element {
            Element::Node(_) => "Node",
            Element::Edge(_) => "Link",
        };
        let _ = write!(text, "\n{}. {kind} ^{}", index + 1, element.id());
        if let Some(title) = element.title() {
            let _ = write!(text, "\n    with content \"{}\"", preview(title, COPIED_TITLE_PREVIEW));
        }
        if let Element::Node(node) = element {
            let _ = write!(text, "\n    @ ({},{})", node.x(), node.y());
        }
    }
    text
}

pub fn expansion_notice<'a>(
    nodes: impl IntoIterator<Item = Element<'a>>,
    direction: Direction,
    depth_reached: usize,
) -> String {
    let nodes = nodes.into_iter().collect::<Vec<_>>();
    let mut text = format!(
        "Selected {} {} nodes (depth: {depth_reached})",
        nodes.len(),
        direction.as_str()
    );

    for (index, node) in nodes.iter().take(EXPANSION_LISTED).enumerate() {
        let title = match node.title() {
            Some(title) if !title.is_empty() => preview(title, EXPANSION_TITLE_PREVIEW),
            _ => format!("Node {}", short_id(node.id())),
        };
        let _ = write!(text, "\n{}. {title}", index + 1);
    }
    if nodes.len() > EXPANSION_LISTED {
        let _ = write!(text, "\n...and {} more", nodes.len() - EXPANSION_LISTED);
    }
    text
}

pub fn rename_notice(old_id: &ElementId, new_id: &ElementId) -> String {
    format!("Element ID changed from \"{old_id}\" to \"{new_id}\"")
}

pub fn reversed_notice(count: usize) -> String {
    format!("Reversed {count} edge(s)")
}

pub fn adjusted_notice(count: usize) -> String {
    format!("Adjusted sides of {count} edge(s)")
}

pub fn not_found_notice(id: &str) -> String {
    format!("Canvas element not found: ^{id}")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{copied_notice, expansion_notice, one_line, preview, rename_notice};
    use crate::model::fixtures::{canvas_diamond, canvas_pair, eid};
    use crate::model::{Canvas, NodeData};
    use crate::query::traverse::Direction;

    #[rstest]
    #[case("short", 10, "short")]
    #[case("exactly10!", 10, "exactly10!")]
    #[case("longer than ten", 10, "longer tha...")]
    #[case("two\nlines", 10, "two lines")]
    #[case("ünïcödé text", 4, "ünïc...")]
    fn preview_truncates_by_characters(
        #[case] text: &str,
        #[case] max: usize,
        #[case] expected: &str,
    ) {
        assert_eq!(preview(text, max), expected);
    }

    #[test]
    fn one_line_handles_crlf() {
        assert_eq!(one_line("a\r\nb\nc"), "a b c");
    }

    #[test]
    fn copied_notice_lists_kind_id_title_and_position() {
        let canvas = canvas_pair();
        let elements = ["a", "ab"].into_iter().filter_map(|id| canvas.element(id));
        let text = copied_notice("Board.canvas", elements);
        assert_eq!(
            text,
            "Board.canvas: Path(s) of 2 canvas element(s) are copied to clipboard!\n\
             1. Node ^a\n    with content \"A\"\n    @ (0,0)\n\
             2. Link ^ab"
        );
    }

    #[test]
    fn expansion_notice_summarises_beyond_three() {
        let canvas = canvas_diamond();
        let nodes = ["a", "b", "c", "d", "e"].into_iter().filter_map(|id| canvas.element(id));
        let text = expansion_notice(nodes, Direction::Downstream, 3);
        assert_eq!(
            text,
            "Selected 5 downstream nodes (depth: 3)\n1. A\n2. B\n3. C\n...and 2 more"
        );
    }

    #[test]
    fn expansion_notice_falls_back_to_short_id() {
        let mut canvas = Canvas::new();
        canvas.insert_node(NodeData::new(eid("1234abcd"), 0.0, 0.0, 10.0, 10.0)).expect("insert");

        let text = expansion_notice(canvas.element("1234abcd"), Direction::Upstream, 0);
        assert_eq!(text, "Selected 1 upstream nodes (depth: 0)\n1. Node 1234");
    }

    #[test]
    fn rename_notice_quotes_both_ids() {
        assert_eq!(
            rename_notice(&eid("old"), &eid("new")),
            "Element ID changed from \"old\" to \"new\""
        );
    }
}
