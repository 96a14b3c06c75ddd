//! Command-line argument definitions for the Backdrop CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. A subcommand selects between rendering a deck and linting
//! an HTML document; logging verbosity applies to both.

use std::str::FromStr;

use clap::{Parser, Subcommand};
use log::LevelFilter;

/// Command-line arguments for the Backdrop decoration tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Returns the requested log level, or `None` if `--log-level` is not a
    /// level name.
    pub fn level_filter(&self) -> Option<LevelFilter> {
        LevelFilter::from_str(&self.log_level).ok()
    }
}

/// The operation to run
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render decoration surfaces for every matching container of a deck
    Render(RenderArgs),

    /// Check that the headings of an HTML document do not skip levels
    Lint(LintArgs),
}

impl Command {
    /// Returns the subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Render(_) => "render",
            Self::Lint(_) => "lint",
        }
    }
}

/// Arguments of the `render` subcommand
#[derive(clap::Args, Debug)]
pub struct RenderArgs {
    /// Path to the deck manifest (TOML)
    #[arg(help = "Path to the deck manifest")]
    pub deck: String,

    /// Directory the SVG surfaces are written to
    #[arg(short, long, default_value = "out")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Navigate to this fragment after the initial render
    #[arg(long)]
    pub fragment: Option<String>,
}

/// Arguments of the `lint` subcommand
#[derive(clap::Args, Debug)]
pub struct LintArgs {
    /// Path to the HTML document
    #[arg(help = "Path to the HTML document")]
    pub input: String,
}
