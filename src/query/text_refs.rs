// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Element references embedded in free text.

use std::ops::Range;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::model::{encode_reference, ElementId, Reference};

fn reference_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Greedy path: the separator is the last `#^` inside the brackets.
    RE.get_or_init(|| {
        Regex::new(r"\[\[([^\]\r\n]+)#\^([^\]\r\n]+)\]\]")
            .expect("reference regex must compile")
    })
}

/// A reference token found in a text, with its byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundReference {
    pub span: Range<usize>,
    pub reference: Reference,
}

fn parse_capture(caps: &Captures<'_>) -> Option<Reference> {
    let path = caps.get(1)?.as_str();
    let element_id = ElementId::new(caps.get(2)?.as_str()).ok()?;
    Reference::new(path, element_id).ok()
}

/// Every well-formed `[[path#^id]]` token in `text`, in order of appearance.
pub fn find_references(text: &str) -> Vec<FoundReference> {
    reference_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let span = caps.get(0)?.range();
            Some(FoundReference { span, reference: parse_capture(&caps)? })
        })
        .collect()
}

/// Rewrites tokens pointing at `old_id` in `document_path` so they point at `new_id`.
///
/// Returns the rewritten text and the number of tokens changed.
pub fn rewrite_references(
    text: &str,
    document_path: &str,
    old_id: &ElementId,
    new_id: &ElementId,
) -> (String, usize) {
    let mut count = 0;
    let rewritten = reference_regex().replace_all(text, |caps: &Captures<'_>| {
        let whole = caps.get(0).map_or("", |m| m.as_str());
        match parse_capture(caps) {
            Some(reference)
                if reference.document_path() == document_path
                    && reference.element_id() == old_id =>
            {
                count += 1;
                encode_reference(document_path, new_id)
            }
            _ => whole.to_owned(),
        }
    });
    (rewritten.into_owned(), count)
}
