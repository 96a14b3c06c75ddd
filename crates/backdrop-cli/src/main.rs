//! Backdrop CLI entry point.

use std::process;

use clap::Parser;
use log::{LevelFilter, debug, error, info};

use backdrop_cli::{Args, error_adapter::to_reportables};

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();

    // Unknown level names fall back to `warn`
    let log_level = args.level_filter().unwrap_or_else(|| {
        eprintln!(
            "Invalid log level: {}. Using 'warn' instead.",
            args.log_level
        );
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    let command = args.command.name();
    info!(command, log_level:?; "Starting Backdrop");
    debug!(args:?; "Parsed arguments");

    let Err(err) = backdrop_cli::run(&args) else {
        info!(command; "Completed successfully");
        return;
    };

    // Lint failures carry one diagnostic per heading issue
    let reportables = to_reportables(&err);
    let reporter = miette::GraphicalReportHandler::new();
    for reportable in &reportables {
        let mut writer = String::new();
        reporter
            .render_report(&mut writer, reportable)
            .expect("Writing to String buffer is infallible");
        error!("{writer}");
    }

    debug!(command, diagnostics = reportables.len(); "Exiting with failure");
    process::exit(1);
}
