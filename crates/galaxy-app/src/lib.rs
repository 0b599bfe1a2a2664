//! Desktop viewer for the procedural spiral galaxy: window and GPU setup,
//! mouse-driven orbit camera, asynchronous background loading and the
//! frame loop.

mod error;
mod loader;
mod mouse;
mod platform;
mod renderer;
mod setup;
mod window;

pub use error::{AppError, CameraConfigError};
pub use loader::{BackgroundLoader, LoadResult};
pub use mouse::MouseState;
pub use platform::{PlatformDirs, PlatformError};
pub use renderer::{SceneRenderer, linear_vertices};
pub use setup::{
    ambient_light, background_sphere, build_scene, galaxy_params, orbit_settings,
    validate_camera,
};
pub use window::{AppState, camera_from_config, run, window_attributes_from_config};
