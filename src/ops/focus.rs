// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Navigation into a canvas: `Board.canvas#^id` selects and frames the element.
//!
//! Nothing here returns an error. A reference that does not resolve is logged and dropped so
//! the host's navigation carries on undisturbed.

use std::path::Path;

use log::{debug, info, warn};

use super::CanvasHost;
use crate::config::Settings;
use crate::model::{decode_subpath, Canvas, ElementId};

/// What started the navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A click on a link inside the canvas. The click's own selection handling runs after the
    /// hook, so focusing must wait one turn of the event loop.
    Pointer,
    /// Anything else; focusing happens immediately.
    Programmatic,
}

/// A focus request waiting for the host's next turn.
///
/// The element is resolved again when the request is applied, since the canvas may have
/// changed in between.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending focus does nothing until applied"]
pub struct PendingFocus {
    element_id: ElementId,
}

impl PendingFocus {
    pub fn element_id(&self) -> &ElementId {
        &self.element_id
    }

    pub fn apply<H: CanvasHost + ?Sized>(self, canvas: &mut Canvas, host: &mut H) -> bool {
        focus_element(canvas, host, &self.element_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusOutcome {
    /// Not a canvas document, or no subpath.
    Ignored,
    /// The subpath does not name an element of the canvas.
    NotFound,
    Focused(ElementId),
    Deferred(PendingFocus),
}

fn focus_element<H: CanvasHost + ?Sized>(
    canvas: &mut Canvas,
    host: &mut H,
    element_id: &ElementId,
) -> bool {
    if !canvas.select_only(element_id.as_str()) {
        warn!(element_id = element_id.as_str(); "focus target no longer exists, skipped");
        return false;
    }
    host.zoom_to_selection(canvas);
    debug!(element_id = element_id.as_str(); "element focused");
    true
}

/// Resolves a `#^id` subpath and selects only that element, then frames the selection.
pub fn decode_and_focus<H: CanvasHost + ?Sized>(
    canvas: &mut Canvas,
    host: &mut H,
    subpath: &str,
    trigger: Trigger,
) -> FocusOutcome {
    let element_id = match decode_subpath(subpath) {
        Ok(element_id) => element_id,
        Err(err) => {
            warn!(subpath = subpath, error:% = err; "invalid element subpath");
            return FocusOutcome::NotFound;
        }
    };
    if canvas.element(element_id.as_str()).is_none() {
        warn!(element_id = element_id.as_str(); "element not found in canvas");
        return FocusOutcome::NotFound;
    }

    match trigger {
        Trigger::Pointer => FocusOutcome::Deferred(PendingFocus { element_id }),
        Trigger::Programmatic => {
            focus_element(canvas, host, &element_id);
            FocusOutcome::Focused(element_id)
        }
    }
}

/// Navigation hook for a document the host has just opened.
pub fn on_open_document<H: CanvasHost + ?Sized>(
    settings: &Settings,
    path: &Path,
    canvas: Option<&mut Canvas>,
    subpath: Option<&str>,
    host: &mut H,
    trigger: Trigger,
) -> FocusOutcome {
    if settings.is_project_graph_path(path) {
        info!(path:? = path; "project graph document opened");
        return FocusOutcome::Ignored;
    }
    if !settings.is_canvas_path(path) {
        return FocusOutcome::Ignored;
    }
    let (Some(canvas), Some(subpath)) = (canvas, subpath.filter(|subpath| !subpath.is_empty()))
    else {
        return FocusOutcome::Ignored;
    };
    decode_and_focus(canvas, host, subpath, trigger)
}
