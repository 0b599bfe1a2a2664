//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Spiral galaxy viewer command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "spiral-galaxy", about = "Procedural spiral galaxy viewer")]
pub struct CliArgs {
    /// Number of spiral-arm stars.
    #[arg(long)]
    pub stars: Option<u32>,

    /// Number of spiral arms.
    #[arg(long)]
    pub arms: Option<u32>,

    /// Lateral jitter around each arm.
    #[arg(long)]
    pub arm_spread: Option<f32>,

    /// Maximum radial extent of the galaxy.
    #[arg(long)]
    pub radius_spread: Option<f32>,

    /// Seed for a reproducible galaxy.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Rotation per frame in radians.
    #[arg(long)]
    pub rotation_speed: Option<f32>,

    /// Background starfield image.
    #[arg(long)]
    pub background: Option<PathBuf>,

    /// Window width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Window height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(n) = args.stars {
            self.galaxy.num_stars = n;
        }
        if let Some(arms) = args.arms {
            self.galaxy.spiral_arms = arms;
        }
        if let Some(spread) = args.arm_spread {
            self.galaxy.arm_spread = spread;
        }
        if let Some(spread) = args.radius_spread {
            self.galaxy.radius_spread = spread;
        }
        if let Some(seed) = args.seed {
            self.galaxy.seed = Some(seed);
        }
        if let Some(speed) = args.rotation_speed {
            self.scene.rotation_speed = speed;
        }
        if let Some(ref path) = args.background {
            self.scene.background_image = path.clone();
        }
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
