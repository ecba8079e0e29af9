//! lcdb-test-data - builds example sequencing data with Snakemake
//!
//! Prepares the target directory and its conda environment, then hands the
//! remaining arguments to Snakemake running inside that environment.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::{Cli, GlobalArgs};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use lcdb_builder::{Assets, BuildReport, Builder};
use lcdb_config::Config;
use lcdb_events::EventReceiver;
use lcdb_platform::PlatformContext;
use std::process;
use tokio::select;
use tracing::{error, info};
use uuid::Uuid;

#[tokio::main]
async fn main() {
    // Parse command line arguments first to check for JSON mode
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    init_tracing(json_mode, cli.global.debug);

    if let Err(e) = run(cli).await {
        if json_mode {
            error!("Application error: {}", e);
        } else {
            eprintln!("Error: {e}");
        }
        process::exit(1);
    }
}

/// Main application logic
async fn run(cli: Cli) -> Result<(), CliError> {
    info!("Starting lcdb-test-data v{}", env!("CARGO_PKG_VERSION"));

    // Defaults, then file, then environment, then flags
    let mut config = Config::load_or_default(cli.global.config.as_deref()).await?;
    config.merge_env()?;
    apply_cli_config(&mut config, &cli.global);

    let assets = Assets::resolve(&config.assets).await?;

    let (event_sender, event_receiver) = lcdb_events::channel();
    let context =
        PlatformContext::new(Some(event_sender)).with_correlation_id(Uuid::new_v4().to_string());

    let renderer = OutputRenderer::new(cli.global.json, config.general.color);
    let mut event_handler = EventHandler::new(
        renderer.colors_enabled(),
        cli.global.json,
        cli.global.debug,
    );

    let mut builder = Builder::new(cli.data_dir, config, assets).with_context(context);
    let report = build_with_events(
        &mut builder,
        &cli.snakemake_args,
        event_receiver,
        &mut event_handler,
    )
    .await?;

    renderer.render_report(&report)?;

    info!("Build completed successfully");
    Ok(())
}

/// Run the build while draining its events
async fn build_with_events(
    builder: &mut Builder,
    args: &[String],
    mut event_receiver: EventReceiver,
    event_handler: &mut EventHandler,
) -> Result<BuildReport, CliError> {
    let mut build_future = Box::pin(builder.build(args));

    loop {
        select! {
            result = &mut build_future => {
                // Drain any remaining events
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result.map_err(CliError::from);
            }

            event = event_receiver.recv() => {
                match event {
                    Some(event) => event_handler.handle_event(event),
                    None => { /* Channel closed: keep waiting for the build to finish */ }
                }
            }
        }
    }
}

/// Initialize tracing/logging
///
/// Logs always go to stderr. `--json` switches them to JSON records and keeps
/// only the final error unless debugging, so stdout carries only events.
fn init_tracing(json_mode: bool, debug_enabled_flag: bool) {
    let debug_enabled = std::env::var("RUST_LOG").is_ok() || debug_enabled_flag;

    let filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            if debug_enabled {
                tracing_subscriber::EnvFilter::new("info,lcdb_test_data=debug")
            } else {
                // Events are already shown by the handler
                tracing_subscriber::EnvFilter::new("warn,lcdb_test_data::logging=off")
            }
        })
    };

    if json_mode {
        if debug_enabled {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(filter())
                .init();
        } else {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter("lcdb_test_data=error,lcdb_test_data::logging=off")
                .init();
        }
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter())
            .init();
    }
}

/// Apply CLI configuration overrides (highest precedence)
fn apply_cli_config(config: &mut Config, global: &GlobalArgs) {
    if let Some(color) = global.color {
        config.general.color = color;
    }
}
