// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier of a single canvas element (node or edge).
///
/// The value is opaque (hosts usually generate 16 hex digits) but it has to survive inside a
/// reference token like `[[notes/Plan.canvas#^<id>]]`, so it must not contain the `#^` marker,
/// the `]]` terminator, or a line break.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ElementId {
    value: String,
}

impl ElementId {
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        validate_element_id(&value)?;
        Ok(Self { value })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for ElementId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for ElementId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for ElementId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl TryFrom<String> for ElementId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ElementId> for String {
    fn from(id: ElementId) -> Self {
        id.value
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    Empty,
    ContainsMarker,
    ContainsLinkEnd,
    ContainsLineBreak,
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("element id must not be empty"),
            Self::ContainsMarker => f.write_str("element id must not contain '#^'"),
            Self::ContainsLinkEnd => f.write_str("element id must not contain ']]'"),
            Self::ContainsLineBreak => f.write_str("element id must not contain line breaks"),
        }
    }
}

impl std::error::Error for IdError {}

fn validate_element_id(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.contains("#^") {
        return Err(IdError::ContainsMarker);
    }
    if value.contains("]]") {
        return Err(IdError::ContainsLinkEnd);
    }
    if value.contains(['\n', '\r']) {
        return Err(IdError::ContainsLineBreak);
    }
    Ok(())
}
