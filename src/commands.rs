// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Command palette and context-menu surface.
//!
//! Every failure of an operation ends here as a notice plus a log line; nothing propagates to
//! the host.

use std::fmt;
use std::str::FromStr;

use log::{debug, warn};

use crate::config::Settings;
use crate::model::{Canvas, ElementId};
use crate::notice::{not_found_notice, NO_ELEMENT_SELECTED, NO_NODE_SELECTED};
use crate::ops::{
    adjust_selected_edges, change_selected_element_id, copy_selected_references,
    reverse_selected_edges, select_downstream, select_upstream, toggle_node_edge_select,
    CanvasHost, OpError,
};

/// Where a command is offered in the host's context menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Menu {
    Node,
    Edge,
    Selection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    CopyReference,
    ReverseSelectedEdges,
    ToggleNodeEdgeSelect,
    AdjustEdgeOnside,
    ChangeElementId,
    SelectDownstream,
    SelectUpstream,
}

impl Command {
    pub const ALL: [Command; 7] = [
        Self::CopyReference,
        Self::ReverseSelectedEdges,
        Self::ToggleNodeEdgeSelect,
        Self::AdjustEdgeOnside,
        Self::ChangeElementId,
        Self::SelectDownstream,
        Self::SelectUpstream,
    ];

    /// Stable id, used for key bindings.
    pub fn id(self) -> &'static str {
        match self {
            Self::CopyReference => "copy-canvas-element-reference",
            Self::ReverseSelectedEdges => "reverse-selected-canvas-edge",
            Self::ToggleNodeEdgeSelect => "toggle-node-edge-select",
            Self::AdjustEdgeOnside => "adjust-edge-onside",
            Self::ChangeElementId => "change-canvas-element-id",
            Self::SelectDownstream => "select-downstream-nodes",
            Self::SelectUpstream => "select-upstream-nodes",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::CopyReference => "Copy canvas element reference(s)",
            Self::ReverseSelectedEdges => "Reverse selected canvas edge(s)",
            Self::ToggleNodeEdgeSelect => "Toggle node/edge selection",
            Self::AdjustEdgeOnside => "Adjust the connection position of the selected edge(s)",
            Self::ChangeElementId => "Change canvas element ID",
            Self::SelectDownstream => "Select downstream nodes",
            Self::SelectUpstream => "Select upstream nodes",
        }
    }

    pub fn menus(self) -> &'static [Menu] {
        match self {
            Self::CopyReference => &[Menu::Edge, Menu::Node, Menu::Selection],
            Self::ReverseSelectedEdges | Self::AdjustEdgeOnside => &[Menu::Edge, Menu::Selection],
            Self::ToggleNodeEdgeSelect => &[Menu::Selection],
            Self::ChangeElementId => &[Menu::Edge, Menu::Node],
            Self::SelectDownstream | Self::SelectUpstream => &[Menu::Node, Menu::Selection],
        }
    }

    /// Palette check: a canvas must be active; toggling also needs a selection.
    pub fn is_available(self, active: Option<&Canvas>) -> bool {
        let Some(canvas) = active else {
            return false;
        };
        match self {
            Self::ToggleNodeEdgeSelect => !canvas.selection().is_empty(),
            _ => true,
        }
    }

    fn nothing_selected_notice(self) -> &'static str {
        match self {
            Self::SelectDownstream | Self::SelectUpstream => NO_NODE_SELECTED,
            _ => NO_ELEMENT_SELECTED,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command: {}", self.0)
    }
}

impl std::error::Error for UnknownCommand {}

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|command| command.id() == s)
            .ok_or_else(|| UnknownCommand(s.to_owned()))
    }
}

/// Commands offered in one context menu, in palette order.
pub fn menu_commands(menu: Menu) -> Vec<Command> {
    Command::ALL.into_iter().filter(|command| command.menus().contains(&menu)).collect()
}

/// Interactive capabilities some commands need on top of [`CanvasHost`].
pub trait CommandHost: CanvasHost {
    /// Asks the user for a replacement id. `None` when the prompt was dismissed.
    fn prompt_element_id(&mut self, current: &ElementId) -> Option<String>;
    fn copy_to_clipboard(&mut self, text: &str);
}

/// The canvas the command runs against.
#[derive(Debug)]
pub struct ActiveCanvas<'a> {
    pub document_path: &'a str,
    pub canvas: &'a mut Canvas,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No canvas is active.
    Unavailable,
    /// The user dismissed a prompt.
    Cancelled,
    Applied,
    /// The operation failed; the user has been notified.
    Failed(OpError),
}

pub fn run_command<H: CommandHost + ?Sized>(
    settings: &Settings,
    active: Option<ActiveCanvas<'_>>,
    host: &mut H,
    command: Command,
) -> Outcome {
    let Some(ActiveCanvas { document_path, canvas }) = active else {
        debug!(command = command.id(); "command ignored, no active canvas");
        return Outcome::Unavailable;
    };
    let depth = settings.max_traversal_depth;

    let result = match command {
        Command::CopyReference => copy_selected_references(canvas, host, document_path)
            .map(|text| host.copy_to_clipboard(&text)),
        Command::ReverseSelectedEdges => reverse_selected_edges(canvas, host).map(drop),
        Command::ToggleNodeEdgeSelect => toggle_node_edge_select(canvas).map(drop),
        Command::AdjustEdgeOnside => adjust_selected_edges(canvas, host).map(drop),
        Command::ChangeElementId => {
            let current = match canvas.selection().len() {
                0 => return fail(host, command, OpError::NothingSelected),
                1 => canvas.selection().first().cloned(),
                count => return fail(host, command, OpError::AmbiguousSelection { count }),
            };
            let Some(current) = current else {
                return fail(host, command, OpError::NothingSelected);
            };
            let Some(new_id) = host.prompt_element_id(&current) else {
                return Outcome::Cancelled;
            };
            change_selected_element_id(canvas, host, &new_id).map(drop)
        }
        Command::SelectDownstream => select_downstream(canvas, host, depth).map(drop),
        Command::SelectUpstream => select_upstream(canvas, host, depth).map(drop),
    };

    match result {
        Ok(()) => {
            debug!(command = command.id(), path = document_path; "command applied");
            Outcome::Applied
        }
        Err(err) => fail(host, command, err),
    }
}

fn fail<H: CanvasHost + ?Sized>(host: &mut H, command: Command, err: OpError) -> Outcome {
    warn!(command = command.id(), error:% = err; "command failed");
    let message = match &err {
        OpError::NothingSelected => command.nothing_selected_notice().to_owned(),
        OpError::NotFound { id } => not_found_notice(id),
        other => other.to_string(),
    };
    host.notice(&message);
    Outcome::Failed(err)
}
