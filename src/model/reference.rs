// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use super::ids::{ElementId, IdError};

const LINK_OPEN: &str = "[[";
const LINK_CLOSE: &str = "]]";
/// Separates the document path from the element id, and prefixes the id inside a subpath.
pub const BLOCK_MARKER: &str = "#^";

/// Stable reference to one element of one canvas document.
///
/// Canonical format: `[[<document-path>#^<element-id>]]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Reference {
    document_path: String,
    element_id: ElementId,
}

impl Reference {
    pub fn new(
        document_path: impl Into<String>,
        element_id: ElementId,
    ) -> Result<Self, ParseReferenceError> {
        let document_path = document_path.into();
        validate_document_path(&document_path)?;
        Ok(Self { document_path, element_id })
    }

    pub fn document_path(&self) -> &str {
        &self.document_path
    }

    pub fn element_id(&self) -> &ElementId {
        &self.element_id
    }

    /// The subpath part as the host hands it to the navigation hook, e.g. `#^abc123`.
    pub fn subpath(&self) -> String {
        format!("{BLOCK_MARKER}{}", self.element_id)
    }

    pub fn parse(input: &str) -> Result<Self, ParseReferenceError> {
        let inner = input
            .strip_prefix(LINK_OPEN)
            .ok_or(ParseReferenceError::MissingLinkOpen)?
            .strip_suffix(LINK_CLOSE)
            .ok_or(ParseReferenceError::MissingLinkClose)?;

        // Ids never contain the marker, so the last one is the separator.
        let (path, element_id) =
            inner.rsplit_once(BLOCK_MARKER).ok_or(ParseReferenceError::MissingMarker)?;

        validate_document_path(path)?;
        let element_id =
            ElementId::new(element_id.to_owned()).map_err(ParseReferenceError::InvalidElementId)?;

        Ok(Self { document_path: path.to_owned(), element_id })
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{LINK_OPEN}{}{BLOCK_MARKER}{}{LINK_CLOSE}", self.document_path, self.element_id)
    }
}

impl FromStr for Reference {
    type Err = ParseReferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn validate_document_path(path: &str) -> Result<(), ParseReferenceError> {
    if path.is_empty() {
        return Err(ParseReferenceError::MissingDocumentPath);
    }
    if path.contains(LINK_CLOSE) {
        return Err(ParseReferenceError::InvalidDocumentPath);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseReferenceError {
    MissingLinkOpen,
    MissingLinkClose,
    MissingMarker,
    MissingDocumentPath,
    InvalidDocumentPath,
    InvalidElementId(IdError),
}

impl fmt::Display for ParseReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingLinkOpen => f.write_str("reference must start with '[['"),
            Self::MissingLinkClose => f.write_str("reference must end with ']]'"),
            Self::MissingMarker => f.write_str("reference is missing the '#^' element marker"),
            Self::MissingDocumentPath => f.write_str("reference is missing the document path"),
            Self::InvalidDocumentPath => f.write_str("document path must not contain ']]'"),
            Self::InvalidElementId(err) => write!(f, "invalid element id: {err}"),
        }
    }
}

impl std::error::Error for ParseReferenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidElementId(err) => Some(err),
            _ => None,
        }
    }
}

/// `[[<path>#^<id>]]`.
pub fn encode_reference(document_path: &str, element_id: &ElementId) -> String {
    format!("{LINK_OPEN}{document_path}{BLOCK_MARKER}{element_id}{LINK_CLOSE}")
}

/// One reference per line, no leading or trailing separator.
pub fn encode_references<'a>(
    document_path: &str,
    element_ids: impl IntoIterator<Item = &'a ElementId>,
) -> String {
    element_ids
        .into_iter()
        .map(|element_id| encode_reference(document_path, element_id))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Recovers the element id from a navigation subpath such as `#^abc123`.
///
/// A bare id without the marker is accepted as well.
pub fn decode_subpath(subpath: &str) -> Result<ElementId, IdError> {
    let raw = subpath.strip_prefix(BLOCK_MARKER).unwrap_or(subpath);
    ElementId::new(raw.to_owned())
}
