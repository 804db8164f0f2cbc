// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use log::{debug, warn};

use super::{CanvasHost, OpError};
use crate::model::{Canvas, Element, ElementId, ElementKind};
use crate::notice::rename_notice;

/// Looks an element up by id, nodes first.
pub fn resolve_by_id<'a>(canvas: &'a Canvas, id: &str) -> Result<Element<'a>, OpError> {
    canvas.element(id).ok_or_else(|| OpError::NotFound { id: id.to_owned() })
}

/// Moves an element to `new_id`. Fails before touching anything when `new_id` is taken.
///
/// Does not request a save.
pub fn rebind_id(
    canvas: &mut Canvas,
    old_id: &ElementId,
    new_id: ElementId,
) -> Result<ElementKind, OpError> {
    let kind = canvas.rebind_id(old_id, new_id.clone())?;
    debug!(kind:% = kind, old_id = old_id.as_str(), new_id = new_id.as_str(); "element id rebound");
    Ok(kind)
}

/// Renames the single selected element and returns its previous id.
pub fn change_selected_element_id<H: CanvasHost + ?Sized>(
    canvas: &mut Canvas,
    host: &mut H,
    new_id: &str,
) -> Result<ElementId, OpError> {
    let old_id = match canvas.selection().len() {
        0 => return Err(OpError::NothingSelected),
        1 => canvas.selection().first().cloned().ok_or(OpError::NothingSelected)?,
        count => return Err(OpError::AmbiguousSelection { count }),
    };
    let new_id = ElementId::new(new_id).map_err(|err| {
        warn!(old_id = old_id.as_str(), error:% = err; "rejected new element id");
        OpError::InvalidId(err)
    })?;

    rebind_id(canvas, &old_id, new_id.clone())?;
    host.request_save();
    host.notice(&rename_notice(&old_id, &new_id));
    Ok(old_id)
}
