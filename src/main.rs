// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-CanvasRef-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Canvas Ref and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Canvas Ref CLI entrypoint.
//!
//! Runs one command against a `.canvas` file. Commands that change the graph write the file
//! back; selection-only commands print the resulting selection.

use std::error::Error;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use log::{debug, info, warn, LevelFilter};

use canvas_ref::commands::{run_command, ActiveCanvas, Command, CommandHost, Outcome};
use canvas_ref::config::Settings;
use canvas_ref::model::{encode_reference, Canvas, ElementId};
use canvas_ref::ops::{on_open_document, CanvasHost, FocusOutcome, Trigger};
use canvas_ref::query::{rewrite_references, suggest_for_query, VaultResolver};
use canvas_ref::store::{load_canvas, save_canvas};

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [--settings <file>] [--log-level <level>] <file.canvas> <command> [args]\n\nCommands:\n  refs <id>...                       print a reference to each element\n  reverse <id>...                    reverse the edges (and edges between the nodes)\n  adjust <id>...                     reattach the edges on their nearest sides\n  rename <old> <new> [<note>...]     change an element id, rewriting references in notes\n  downstream <id>... [--depth <n>]   select the nodes reachable downstream\n  upstream <id>... [--depth <n>]     select the nodes reachable upstream\n  toggle <id>...                     swap a node/edge selection for its counterpart\n  focus <subpath>                    resolve `#^id` and print the framed element\n  suggest <query>                    link suggestions for `Board.canvas#^text`\n\n--log-level defaults to `warn` (`debug` when debugMode is set in the settings)."
    );
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CliCommand {
    Refs(Vec<String>),
    Reverse(Vec<String>),
    Adjust(Vec<String>),
    Rename { old_id: String, new_id: String, notes: Vec<String> },
    Downstream { ids: Vec<String>, depth: Option<usize> },
    Upstream { ids: Vec<String>, depth: Option<usize> },
    Toggle(Vec<String>),
    Focus(String),
    Suggest(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    settings: Option<String>,
    log_level: Option<String>,
    document: String,
    command: CliCommand,
}

fn parse_ids(args: Vec<String>) -> Result<Vec<String>, ()> {
    if args.is_empty() || args.iter().any(|arg| arg.starts_with('-')) {
        return Err(());
    }
    Ok(args)
}

fn parse_traversal(args: Vec<String>) -> Result<(Vec<String>, Option<usize>), ()> {
    let mut ids = Vec::new();
    let mut depth = None;
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        if arg == "--depth" {
            if depth.is_some() {
                return Err(());
            }
            let raw = args.next().ok_or(())?;
            depth = Some(raw.parse::<usize>().map_err(|_| ())?);
        } else {
            ids.push(arg);
        }
    }
    Ok((parse_ids(ids)?, depth))
}

fn parse_command(name: &str, args: Vec<String>) -> Result<CliCommand, ()> {
    match name {
        "refs" => Ok(CliCommand::Refs(parse_ids(args)?)),
        "reverse" => Ok(CliCommand::Reverse(parse_ids(args)?)),
        "adjust" => Ok(CliCommand::Adjust(parse_ids(args)?)),
        "toggle" => Ok(CliCommand::Toggle(parse_ids(args)?)),
        "rename" => {
            let mut args = parse_ids(args)?.into_iter();
            let old_id = args.next().ok_or(())?;
            let new_id = args.next().ok_or(())?;
            Ok(CliCommand::Rename { old_id, new_id, notes: args.collect() })
        }
        "downstream" => {
            let (ids, depth) = parse_traversal(args)?;
            Ok(CliCommand::Downstream { ids, depth })
        }
        "upstream" => {
            let (ids, depth) = parse_traversal(args)?;
            Ok(CliCommand::Upstream { ids, depth })
        }
        "focus" | "suggest" => {
            let [value]: [String; 1] = args.try_into().map_err(|_| ())?;
            Ok(if name == "focus" { CliCommand::Focus(value) } else { CliCommand::Suggest(value) })
        }
        _ => Err(()),
    }
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut settings = None;
    let mut log_level = None;

    let document = loop {
        let arg = args.next().ok_or(())?;
        match arg.as_str() {
            "--settings" => {
                if settings.is_some() {
                    return Err(());
                }
                settings = Some(args.next().ok_or(())?);
            }
            "--log-level" => {
                if log_level.is_some() {
                    return Err(());
                }
                log_level = Some(args.next().ok_or(())?);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => break arg,
        }
    };

    let name = args.next().ok_or(())?;
    let command = parse_command(&name, args.collect())?;
    Ok(CliOptions { settings, log_level, document, command })
}

/// Host for a one-shot CLI run: notices go to stderr, the clipboard to stdout.
#[derive(Debug, Default)]
struct CliHost {
    save_requested: bool,
    reply: Option<String>,
}

impl CanvasHost for CliHost {
    fn request_save(&mut self) {
        self.save_requested = true;
    }

    fn zoom_to_selection(&mut self, canvas: &Canvas) {
        if let Some(bbox) = canvas.selection_bbox() {
            debug!(
                min_x = bbox.min_x, min_y = bbox.min_y, max_x = bbox.max_x, max_y = bbox.max_y;
                "zoom to selection"
            );
        }
    }

    fn notice(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

impl CommandHost for CliHost {
    fn prompt_element_id(&mut self, _current: &ElementId) -> Option<String> {
        self.reply.take()
    }

    fn copy_to_clipboard(&mut self, text: &str) {
        println!("{text}");
    }
}

fn select_ids(canvas: &mut Canvas, ids: &[String]) {
    canvas.deselect_all();
    for id in ids {
        if !canvas.select(id) {
            warn!(element_id = id.as_str(); "element not found, not selected");
        }
    }
}

fn print_selection(canvas: &Canvas) {
    for id in canvas.selection().iter() {
        println!("{id}");
    }
}

fn init_logger(log_level: Option<&str>, settings: &Settings) {
    let default_level = if settings.debug_mode { LevelFilter::Debug } else { LevelFilter::Warn };
    let level = match log_level {
        Some(raw) => LevelFilter::from_str(raw).unwrap_or_else(|_| {
            eprintln!("Invalid log level: {raw}. Using '{default_level}' instead.");
            default_level
        }),
        None => default_level,
    };
    env_logger::Builder::from_env(env_logger::Env::default()).filter_level(level).init();
}

fn run(options: CliOptions) -> Result<bool, Box<dyn Error>> {
    let settings = match &options.settings {
        Some(path) => Settings::load(Path::new(path))?,
        None => Settings::default(),
    };
    init_logger(options.log_level.as_deref(), &settings);
    info!(document = options.document.as_str(); "starting canvas-ref");

    let document_path = options.document.as_str();
    if let CliCommand::Suggest(query) = &options.command {
        let resolver = VaultResolver::new(".");
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
        let suggestions = runtime.block_on(suggest_for_query(
            &resolver,
            &settings.canvas_extensions,
            query,
            Some(Path::new(document_path)),
        ))?;
        for suggestion in suggestions.unwrap_or_default() {
            println!(
                "{}\t{}\t{}",
                encode_reference(&suggestion.document_path, &suggestion.subpath),
                suggestion.score,
                suggestion.display
            );
        }
        return Ok(true);
    }

    let path = Path::new(document_path);
    let mut canvas = load_canvas(path)?;
    let mut host = CliHost::default();
    let mut depth_settings = settings.clone();

    let (command, print_result) = match options.command {
        CliCommand::Refs(ids) => {
            select_ids(&mut canvas, &ids);
            (Command::CopyReference, false)
        }
        CliCommand::Reverse(ids) => {
            select_ids(&mut canvas, &ids);
            (Command::ReverseSelectedEdges, false)
        }
        CliCommand::Adjust(ids) => {
            select_ids(&mut canvas, &ids);
            (Command::AdjustEdgeOnside, false)
        }
        CliCommand::Toggle(ids) => {
            select_ids(&mut canvas, &ids);
            (Command::ToggleNodeEdgeSelect, true)
        }
        CliCommand::Downstream { ids, depth } => {
            select_ids(&mut canvas, &ids);
            depth_settings.max_traversal_depth = depth.unwrap_or(settings.max_traversal_depth);
            (Command::SelectDownstream, true)
        }
        CliCommand::Upstream { ids, depth } => {
            select_ids(&mut canvas, &ids);
            depth_settings.max_traversal_depth = depth.unwrap_or(settings.max_traversal_depth);
            (Command::SelectUpstream, true)
        }
        CliCommand::Rename { old_id, new_id, notes } => {
            select_ids(&mut canvas, std::slice::from_ref(&old_id));
            host.reply = Some(new_id.clone());
            let active = ActiveCanvas { document_path, canvas: &mut canvas };
            if run_command(&settings, Some(active), &mut host, Command::ChangeElementId)
                != Outcome::Applied
            {
                return Ok(false);
            }
            save_canvas(path, &canvas)?;
            let (old_id, new_id) = (ElementId::new(old_id)?, ElementId::new(new_id)?);
            for note in notes {
                let text = fs::read_to_string(&note)?;
                let (rewritten, count) =
                    rewrite_references(&text, document_path, &old_id, &new_id);
                if count > 0 {
                    fs::write(&note, rewritten)?;
                    eprintln!("{note}: rewrote {count} reference(s)");
                }
            }
            return Ok(true);
        }
        CliCommand::Focus(subpath) => {
            let outcome = on_open_document(
                &settings,
                path,
                Some(&mut canvas),
                Some(&subpath),
                &mut host,
                Trigger::Programmatic,
            );
            if let FocusOutcome::Focused(id) = &outcome {
                println!("{id}");
                if let Some(bbox) = canvas.selection_bbox() {
                    println!("{} {} {} {}", bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y);
                }
            }
            return Ok(matches!(outcome, FocusOutcome::Focused(_)));
        }
        CliCommand::Suggest(_) => return Ok(true),
    };

    let active = ActiveCanvas { document_path, canvas: &mut canvas };
    let outcome = run_command(&depth_settings, Some(active), &mut host, command);
    if host.save_requested {
        save_canvas(path, &canvas)?;
    }
    if print_result && outcome == Outcome::Applied {
        print_selection(&canvas);
    }
    Ok(outcome == Outcome::Applied)
}

fn main() {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "canvas-ref".to_owned());

    let options = match parse_options(args) {
        Ok(options) => options,
        Err(()) => {
            print_usage(&program);
            std::process::exit(2);
        }
    };

    match run(options) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("canvas-ref: {err}");
            std::process::exit(1);
        }
    }
}
