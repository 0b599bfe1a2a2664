//! Configuration structs with their defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Star-field generation parameters.
    pub galaxy: GalaxyConfig,
    /// Scene composition and animation settings.
    pub scene: SceneConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    /// Window title.
    pub title: String,
}

/// Shape parameters for the procedural star field.
///
/// `num_stars`, `spiral_arms`, `arm_spread` and `radius_spread` are the
/// primary knobs; the rest are the shape constants of the bulge taper and the
/// color jitter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GalaxyConfig {
    /// Number of spiral-arm stars. The bulge gets `axial_fraction` of this.
    pub num_stars: u32,
    /// Number of spiral arms.
    pub spiral_arms: u32,
    /// Lateral jitter magnitude around each arm.
    pub arm_spread: f32,
    /// Maximum radial extent of the disk and half-height of the bulge.
    pub radius_spread: f32,
    /// Fixed RNG seed. `None` draws a fresh galaxy every launch.
    pub seed: Option<u64>,
    /// Fraction of `num_stars` placed in the central bulge.
    pub axial_fraction: f64,
    /// Lower bound of the bulge's lateral spread.
    pub axis_spread_min: f32,
    /// Bulge spread per star, used when it exceeds `axis_spread_min`.
    pub axis_spread_scale: f32,
    /// Exponent applied to the taper factor.
    pub taper_exponent: f32,
    /// Smallest taper factor; keeps the bulge ends from collapsing.
    pub taper_floor: f32,
    /// Half-width of the uniform noise added to the taper factor.
    pub taper_jitter: f32,
    /// Base star color as `#rrggbb`.
    pub base_color: String,
    /// Half-width of the uniform HSL lightness offset per star.
    pub lightness_jitter: f32,
}

/// Scene composition settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Rotation added to the galaxy container (and again to the spiral arms)
    /// every frame, in radians.
    pub rotation_speed: f32,
    /// Equirectangular starfield image wrapped around the background sphere.
    pub background_image: PathBuf,
    /// Radius of the background sphere.
    pub background_radius: f32,
    /// Horizontal segments of the background sphere mesh.
    pub background_width_segments: u32,
    /// Vertical segments of the background sphere mesh.
    pub background_height_segments: u32,
    /// Camera and orbit-control settings.
    pub camera: CameraConfig,
    /// Ambient light settings.
    pub light: LightConfig,
}

/// Camera and orbit-control configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    /// Starting camera position; the orbit target is the origin.
    pub initial_position: [f32; 3],
    /// Closest allowed zoom distance.
    pub min_distance: f32,
    /// Farthest allowed zoom distance.
    pub max_distance: f32,
    /// Fraction of the pending orbit motion applied per frame (0, 1].
    pub damping_factor: f32,
    /// Orbit speed multiplier for mouse drags.
    pub rotate_speed: f32,
    /// Zoom speed multiplier for the scroll wheel.
    pub zoom_speed: f32,
}

/// Ambient light configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LightConfig {
    /// Linear RGB color of the ambient light.
    pub color: [f32; 3],
    /// Light intensity multiplier.
    pub intensity: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            vsync: true,
            title: "Spiral Galaxy".to_string(),
        }
    }
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            num_stars: 20_000,
            spiral_arms: 4,
            arm_spread: 40.0,
            radius_spread: 400.0,
            seed: None,
            axial_fraction: 0.2,
            axis_spread_min: 50.0,
            axis_spread_scale: 0.0009,
            taper_exponent: 0.8,
            taper_floor: 0.5,
            taper_jitter: 0.15,
            base_color: "#fef7b8".to_string(),
            lightness_jitter: 0.1,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            rotation_speed: 0.0005,
            background_image: PathBuf::from("assets/starfield.jpg"),
            background_radius: 2000.0,
            background_width_segments: 64,
            background_height_segments: 32,
            camera: CameraConfig::default(),
            light: LightConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 10_000.0,
            initial_position: [0.0, 250.0, 700.0],
            min_distance: 100.0,
            max_distance: 1500.0,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            let config = read_config(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path.clone(),
            source,
        })?;
        Ok(())
    }
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("num_stars: 20000"));
        assert!(ron_str.contains("spiral_arms: 4"));
        assert!(ron_str.contains("\"#fef7b8\""));
    }

    #[test]
    fn test_magic_constants_are_defaults() {
        let galaxy = GalaxyConfig::default();
        assert_eq!(galaxy.axial_fraction, 0.2);
        assert_eq!(galaxy.axis_spread_scale, 0.0009);
        assert_eq!(galaxy.taper_exponent, 0.8);
        assert_eq!(SceneConfig::default().rotation_speed, 0.0005);
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.galaxy.seed = Some(42);
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(window: (), galaxy: (num_stars: 10))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.galaxy.num_stars, 10);
        assert_eq!(config.galaxy.spiral_arms, 4);
        assert_eq!(config.scene, SceneConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let ron_str = "(future_setting: true)";
        let result: Result<Config, _> = ron::from_str(ron_str);
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.galaxy.num_stars = 500;
        config.scene.camera.max_distance = 900.0;
        config.scene.background_image = PathBuf::from("/tmp/sky.png");

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE_NAME).exists());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }
}
