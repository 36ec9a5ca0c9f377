use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use modlink::app::AppState;
use modlink::cli::handlers;
use modlink::cli::ui::{print_activity, print_error};
use modlink::cli::{Cli, Commands};
use modlink::config::LinkerConfig;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    if cli.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Run the application
    if let Err(error) = run_app(cli) {
        print_error(&error);
        process::exit(1);
    }
}

fn run_app(cli: Cli) -> Result<()> {
    let config_path = config_path(&cli)?;
    let config = LinkerConfig::load(&config_path)
        .with_context(|| format!("Could not load settings from {}", config_path.display()))?;

    if !config.ui.colored {
        std::env::set_var("NO_COLOR", "1");
    }
    init_logging(cli.verbose, &config.ui.log_level);

    let mut state = AppState::from_env(config, config_path)?;
    state.log.set_echo(print_activity);

    match cli.command {
        Commands::Link { source, target, project, subdir, yes, no } => {
            handlers::handle_link(
                &mut state,
                &source,
                target.as_deref(),
                project.as_deref(),
                subdir.as_deref(),
                yes,
                no,
            )?;
        }
        Commands::Status { path, json } => {
            handlers::handle_status(&state, &path, json)?;
        }
        Commands::Check => handlers::handle_check()?,
        Commands::Config { cmd } => handlers::handle_config(&mut state, cmd)?,
    }
    Ok(())
}

fn config_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(path.clone()),
        None => Ok(LinkerConfig::global_config_path()?),
    }
}

fn init_logging(verbose: bool, configured: &str) {
    let level = if verbose { "debug" } else { configured };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("modlink={}", level)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
