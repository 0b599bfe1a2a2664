//! CPU-side scene for the galaxy viewer: the rotating container that holds
//! the star clouds, background sphere and ambient light, plus damped orbit
//! camera controls.

mod orbit;
mod scene;

pub use orbit::{CameraPose, OrbitControls, OrbitInput, OrbitSettings};
pub use scene::{AmbientLight, BackgroundSphere, GalaxyScene, PointCloud, SceneGroup};
