// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! User settings, stored as a small camelCase JSON document.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::query::DEFAULT_MAX_DEPTH;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Extensions of documents handled as canvases.
    pub canvas_extensions: Vec<String>,
    /// Extensions of documents handled as project graphs (JSON canvases of an external tool).
    pub project_graph_extensions: Vec<String>,
    /// Not read by Canvas Ref; kept so existing settings files load and save unchanged.
    pub project_graph_executable_path: String,
    pub debug_mode: bool,
    /// Hop limit for downstream/upstream selection.
    pub max_traversal_depth: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_extensions: vec![".canvas".to_owned()],
            project_graph_extensions: vec![".pgraph".to_owned()],
            project_graph_executable_path: String::new(),
            debug_mode: false,
            max_traversal_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io { path: PathBuf, source: io::Error },
    Json { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read settings {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "invalid settings {path:?}: {source}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
        }
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    let name = path.to_string_lossy();
    extensions.iter().any(|extension| !extension.is_empty() && name.ends_with(extension.as_str()))
}

impl Settings {
    /// Reads settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let source = match fs::read_to_string(path) {
            Ok(source) => source,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path:? = path; "settings file not found, using defaults");
                return Ok(Self::default());
            }
            Err(source) => return Err(SettingsError::Io { path: path.to_path_buf(), source }),
        };
        serde_json::from_str(&source)
            .map_err(|source| SettingsError::Json { path: path.to_path_buf(), source })
    }

    pub fn is_canvas_path(&self, path: &Path) -> bool {
        has_extension(path, &self.canvas_extensions)
    }

    pub fn is_project_graph_path(&self, path: &Path) -> bool {
        has_extension(path, &self.project_graph_extensions)
    }
}
