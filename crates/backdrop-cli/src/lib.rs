//! CLI logic for the Backdrop decoration tool.
//!
//! This module contains the core CLI logic: rendering deck manifests to SVG
//! surfaces and linting the heading order of HTML documents.

pub mod error_adapter;

mod args;
mod config;
mod deck;

pub use args::{Args, Command, LintArgs, RenderArgs};

use std::{fs, path::Path};

use log::info;

use backdrop::{BackdropError, Renderer, Trigger, export::export_deck, lint::lint_html};

/// Run the Backdrop CLI application
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `BackdropError` for:
/// - File I/O errors
/// - Configuration or manifest parsing errors
/// - Export errors
/// - Heading order violations (`lint`)
pub fn run(args: &Args) -> Result<(), BackdropError> {
    match &args.command {
        Command::Render(render) => run_render(render),
        Command::Lint(lint) => run_lint(lint),
    }
}

fn run_render(args: &RenderArgs) -> Result<(), BackdropError> {
    info!(
        deck_path = args.deck,
        output_dir = args.output;
        "Rendering deck"
    );

    // Load configuration, then let the manifest override it
    let user_config = config::load_config(args.config.as_ref())?;
    let (mut deck, deck_config) = deck::load_manifest(&args.deck)?.into_parts();
    let user_config = match deck_config {
        Some(deck_config) => user_config.merged(&deck_config),
        None => user_config,
    };

    let renderer = Renderer::new(user_config);
    let mut rendered = renderer.handle(&mut deck, Trigger::Ready);
    if let Some(fragment) = &args.fragment {
        rendered = renderer.handle(&mut deck, Trigger::FragmentChanged(fragment.clone()));
    }

    let written = export_deck(&deck, Path::new(&args.output))?;

    info!(containers = rendered, files = written.len(); "Surfaces exported successfully");

    Ok(())
}

fn run_lint(args: &LintArgs) -> Result<(), BackdropError> {
    info!(input_path = args.input; "Checking heading order");

    let html = fs::read_to_string(&args.input)?;
    let headings = lint_html(&html)?;

    for heading in &headings {
        info!("  {heading}");
    }

    Ok(())
}
