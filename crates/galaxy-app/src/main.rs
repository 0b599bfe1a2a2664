//! Spiral galaxy viewer.
//!
//! Configuration is loaded from `config.ron` in the platform config
//! directory and can be overridden via CLI flags, e.g.
//! `spiral-galaxy --stars 50000 --arms 2 --seed 42`.

use std::process::ExitCode;

use clap::Parser;
use galaxy_app::{AppError, PlatformDirs, build_scene};
use galaxy_config::{CliArgs, Config};
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match args.config.clone() {
        Some(config_dir) => PlatformDirs::from_config_dir(config_dir),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("{e}, using the working directory");
                PlatformDirs::from_config_dir(".".into())
            }
        },
    };

    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create {}: {e}", dirs.config_dir.display());
    }

    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    galaxy_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!("Config directory: {}", dirs.config_dir.display());

    match run_viewer(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Generate the galaxy, then hand it to the window loop. Invalid
/// parameters fail here, before any window or GPU buffer exists.
fn run_viewer(config: Config) -> Result<(), AppError> {
    let scene = build_scene(&config)?;
    galaxy_app::run(config, scene)
}
