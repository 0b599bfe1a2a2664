//! Configuration for the galaxy viewer.
//!
//! Settings persist to disk as a RON file, every section falls back to its
//! defaults when missing, and selected values can be overridden from the
//! command line.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, DebugConfig, GalaxyConfig, LightConfig, SceneConfig, WindowConfig,
    CONFIG_FILE_NAME,
};
pub use error::ConfigError;
