// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Link suggestions for `[[Board.canvas#^...` style queries typed in a text editor.

use std::cell::Cell;
use std::path::{Path, PathBuf};

use log::debug;

use crate::model::{ElementId, NodeData, BLOCK_MARKER};
use crate::notice::one_line;
use crate::store::{read_node_records, StoreError};

const HEADING_MARKER: &str = "#";
const NBSP: char = '\u{00A0}';

/// Which flavour of subpath link is being typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkMode {
    /// `Board.canvas#...`: only nodes with a text payload are offered.
    Heading,
    /// `Board.canvas#^...`: nodes with a text payload or a group label are offered.
    Block,
}

impl LinkMode {
    fn accepts(self, node: &NodeData) -> bool {
        match self {
            Self::Heading => node.text.is_some(),
            Self::Block => node.text.is_some() || node.label.is_some(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestQuery {
    pub document_path: String,
    pub mode: LinkMode,
    pub needle: String,
}

impl SuggestQuery {
    /// Splits a raw editor query into document path, link mode and search text.
    ///
    /// Returns `None` when the query does not address a canvas document subpath.
    pub fn parse(query: &str, extension: &str) -> Option<Self> {
        let query = query.replace(NBSP, " ");
        let path_end = query.rfind(extension)? + extension.len();
        let document_path = query[..path_end].to_owned();

        let block = format!("{extension}{BLOCK_MARKER}");
        let heading = format!("{extension}{HEADING_MARKER}");
        let (mode, rest) = if let Some(at) = query.find(&block) {
            (LinkMode::Block, &query[at + block.len()..])
        } else if let Some(at) = query.find(&heading) {
            (LinkMode::Heading, &query[at + heading.len()..])
        } else {
            return None;
        };

        let marker = match mode {
            LinkMode::Block => BLOCK_MARKER,
            LinkMode::Heading => HEADING_MARKER,
        };
        let needle = rest.split(marker).next().unwrap_or_default().to_owned();

        Some(Self { document_path, mode, needle })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub document_path: String,
    pub subpath: ElementId,
    pub content: String,
    pub display: String,
    pub score: i64,
}

#[derive(Debug, Clone, Copy)]
struct SubsequenceStats {
    first: usize,
    span: usize,
    consecutive: usize,
    start_boundary: bool,
}

fn is_boundary_char(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '-' | '_' | '/' | '.' | ':' | '#' | '(' | '[')
}

fn subsequence_stats(needle: &str, haystack: &str) -> Option<SubsequenceStats> {
    let mut needle_iter = needle.chars().peekable();
    let mut first: Option<usize> = None;
    let mut last: usize = 0;
    let mut prev_match: Option<usize> = None;
    let mut consecutive: usize = 0;
    let mut start_boundary = false;
    let mut prev_hay: Option<char> = None;

    for (idx, ch) in haystack.chars().enumerate() {
        let Some(&want) = needle_iter.peek() else {
            break;
        };

        if ch == want {
            needle_iter.next();
            if first.is_none() {
                first = Some(idx);
                start_boundary = prev_hay.map_or(true, is_boundary_char);
            }
            if prev_match.is_some_and(|prev| idx == prev + 1) {
                consecutive += 1;
            }
            prev_match = Some(idx);
            last = idx;
        }
        prev_hay = Some(ch);
    }

    if needle_iter.peek().is_some() {
        return None;
    }
    let first = first?;
    Some(SubsequenceStats { first, span: last - first, consecutive, start_boundary })
}

/// Case-insensitive fuzzy score; `None` when `needle` is not a subsequence of `haystack`.
///
/// An empty needle matches everything with score 0.
pub fn fuzzy_score(needle: &str, haystack: &str) -> Option<i64> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return Some(0);
    }
    let haystack = haystack.to_lowercase();

    let subseq = subsequence_stats(&needle, &haystack)?;
    let ratio = rapidfuzz::fuzz::ratio(needle.chars(), haystack.chars());
    let mut score = (ratio * 1000.0).round() as i64;
    score -= subseq.span as i64;
    score -= (subseq.first as i64) / 4;
    score += (subseq.consecutive as i64) * 40;
    if subseq.start_boundary {
        score += 150;
    }
    score += if haystack.contains(&needle) { 2000 } else { 500 };
    Some(score)
}

/// Ranks the candidate nodes of one document against a parsed query.
///
/// Sorted by score, best first; equal scores keep node id order.
pub fn suggest<'a>(
    query: &SuggestQuery,
    nodes: impl IntoIterator<Item = &'a NodeData>,
) -> Vec<Suggestion> {
    let mut suggestions = nodes
        .into_iter()
        .filter(|node| query.mode.accepts(node))
        .filter_map(|node| {
            let content = node.title()?;
            let score = fuzzy_score(&query.needle, content)?;
            Some(Suggestion {
                document_path: query.document_path.clone(),
                subpath: node.id.clone(),
                content: content.to_owned(),
                display: one_line(content),
                score,
            })
        })
        .collect::<Vec<_>>();

    suggestions.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.subpath.cmp(&b.subpath)));
    suggestions
}

/// Maps a link path typed by the user to a document on disk.
pub trait LinkResolver {
    fn resolve(&self, link_path: &str, source: Option<&Path>) -> Option<PathBuf>;
}

/// Resolves links relative to the linking document first, then relative to a vault root.
#[derive(Debug, Clone)]
pub struct VaultResolver {
    root: PathBuf,
}

impl VaultResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl LinkResolver for VaultResolver {
    fn resolve(&self, link_path: &str, source: Option<&Path>) -> Option<PathBuf> {
        let beside_source = source
            .and_then(Path::parent)
            .map(|dir| dir.join(link_path))
            .filter(|path| path.is_file());
        beside_source.or_else(|| Some(self.root.join(link_path)).filter(|path| path.is_file()))
    }
}

/// Full suggestion path: parse, resolve, read the document, rank.
///
/// `Ok(None)` means "no suggestions of ours"; the host keeps its own result.
pub async fn suggest_for_query<R: LinkResolver + ?Sized>(
    resolver: &R,
    extensions: &[String],
    query: &str,
    source: Option<&Path>,
) -> Result<Option<Vec<Suggestion>>, StoreError> {
    let Some(parsed) =
        extensions.iter().find_map(|extension| SuggestQuery::parse(query, extension))
    else {
        return Ok(None);
    };
    let Some(path) = resolver.resolve(&parsed.document_path, source) else {
        debug!(link_path = parsed.document_path.as_str(); "suggestion target not resolved");
        return Ok(None);
    };

    let nodes = read_node_records(&path).await?;
    let suggestions = suggest(&parsed, &nodes);
    debug!(
        link_path = parsed.document_path.as_str(), candidates = nodes.len(),
        matches = suggestions.len();
        "suggestions computed"
    );
    Ok((!suggestions.is_empty()).then_some(suggestions))
}

/// Generation ticket for one suggestion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestionTicket(u64);

/// Discards results of queries that were superseded while their file read was in flight.
#[derive(Debug, Default)]
pub struct SuggestionTracker {
    generation: Cell<u64>,
}

impl SuggestionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new request, superseding every earlier ticket.
    pub fn begin(&self) -> SuggestionTicket {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        SuggestionTicket(next)
    }

    pub fn is_current(&self, ticket: SuggestionTicket) -> bool {
        self.generation.get() == ticket.0
    }

    /// Passes `result` through only when `ticket` is still the latest request.
    pub fn accept<T>(&self, ticket: SuggestionTicket, result: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(result)
        } else {
            debug!(ticket = ticket.0; "stale suggestion result dropped");
            None
        }
    }
}
