//! Turning the loaded [`Config`] into generator parameters and a composed
//! scene.

use galaxy_config::{CameraConfig, Config, GalaxyConfig, SceneConfig};
use galaxy_gen::{GalaxyGenerator, GalaxyParams, GenerationError, parse_hex_color};
use galaxy_scene::{AmbientLight, BackgroundSphere, GalaxyScene, OrbitSettings};
use glam::Vec3;
use tracing::info;

use crate::error::{AppError, CameraConfigError};

/// Generator parameters from the `galaxy` config section, validated.
///
/// # Errors
///
/// [`GenerationError::InvalidParameter`] when the base color does not parse
/// or any field is out of range.
pub fn galaxy_params(config: &GalaxyConfig) -> Result<GalaxyParams, GenerationError> {
    let params = GalaxyParams {
        num_stars: config.num_stars,
        spiral_arms: config.spiral_arms,
        arm_spread: config.arm_spread,
        radius_spread: config.radius_spread,
        axial_fraction: config.axial_fraction,
        axis_spread_min: config.axis_spread_min,
        axis_spread_scale: config.axis_spread_scale,
        taper_exponent: config.taper_exponent,
        taper_floor: config.taper_floor,
        taper_jitter: config.taper_jitter,
        base_color: parse_hex_color(&config.base_color)?,
        lightness_jitter: config.lightness_jitter,
    };
    params.validate()?;
    Ok(params)
}

pub fn background_sphere(config: &SceneConfig) -> BackgroundSphere {
    BackgroundSphere {
        radius: config.background_radius,
        width_segments: config.background_width_segments,
        height_segments: config.background_height_segments,
        texture_path: config.background_image.clone(),
    }
}

pub fn ambient_light(config: &SceneConfig) -> AmbientLight {
    AmbientLight {
        color: Vec3::from_array(config.light.color),
        intensity: config.light.intensity,
    }
}

/// Check the `scene.camera` section before anything is built from it.
///
/// # Errors
///
/// [`CameraConfigError`] naming the first field that is non-finite or out of
/// range: distances must satisfy `0 <= min_distance <= max_distance`,
/// `damping_factor` must lie in `(0, 1]` and the projection needs
/// `0 < near < far` with a field of view inside `(0, 180)` degrees.
pub fn validate_camera(camera: &CameraConfig) -> Result<(), CameraConfigError> {
    let finite = [
        ("fov_y_degrees", camera.fov_y_degrees),
        ("near", camera.near),
        ("far", camera.far),
        ("min_distance", camera.min_distance),
        ("max_distance", camera.max_distance),
        ("damping_factor", camera.damping_factor),
        ("rotate_speed", camera.rotate_speed),
        ("zoom_speed", camera.zoom_speed),
    ];
    for (name, value) in finite {
        if !value.is_finite() {
            return Err(invalid_camera(name, format!("must be finite, got {value}")));
        }
    }
    if camera.initial_position.iter().any(|v| !v.is_finite()) {
        return Err(invalid_camera(
            "initial_position",
            format!("must be finite, got {:?}", camera.initial_position),
        ));
    }

    if camera.fov_y_degrees <= 0.0 || camera.fov_y_degrees >= 180.0 {
        return Err(invalid_camera(
            "fov_y_degrees",
            format!("must be in (0, 180), got {}", camera.fov_y_degrees),
        ));
    }
    if camera.near <= 0.0 {
        return Err(invalid_camera("near", format!("must be > 0, got {}", camera.near)));
    }
    if camera.far <= camera.near {
        return Err(invalid_camera(
            "far",
            format!("must exceed near ({}), got {}", camera.near, camera.far),
        ));
    }
    if camera.min_distance < 0.0 {
        return Err(invalid_camera(
            "min_distance",
            format!("must be non-negative, got {}", camera.min_distance),
        ));
    }
    if camera.max_distance < camera.min_distance {
        return Err(invalid_camera(
            "max_distance",
            format!(
                "must be at least min_distance ({}), got {}",
                camera.min_distance, camera.max_distance
            ),
        ));
    }
    if camera.damping_factor <= 0.0 || camera.damping_factor > 1.0 {
        return Err(invalid_camera(
            "damping_factor",
            format!("must be in (0, 1], got {}", camera.damping_factor),
        ));
    }
    Ok(())
}

fn invalid_camera(name: &'static str, reason: String) -> CameraConfigError {
    CameraConfigError { name, reason }
}

/// Orbit tunables. There is no pan input, so the galaxy center is always
/// the look-at point.
pub fn orbit_settings(camera: &CameraConfig) -> OrbitSettings {
    OrbitSettings {
        min_distance: camera.min_distance,
        max_distance: camera.max_distance,
        enable_damping: true,
        damping_factor: camera.damping_factor,
        rotate_speed: camera.rotate_speed,
        zoom_speed: camera.zoom_speed,
    }
}

/// Generate the galaxy and compose the scene around it.
///
/// # Errors
///
/// Fails before generating anything if the galaxy parameters or the camera
/// section are invalid.
pub fn build_scene(config: &Config) -> Result<GalaxyScene, AppError> {
    validate_camera(&config.scene.camera)?;
    let params = galaxy_params(&config.galaxy)?;
    let generator = match config.galaxy.seed {
        Some(seed) => GalaxyGenerator::new(params, seed),
        None => GalaxyGenerator::from_entropy(params),
    };

    let galaxy = generator.generate()?;
    info!(
        "Generated {} stars in {} arms (seed: {:?})",
        galaxy.len(),
        generator.params().spiral_arms,
        generator.seed()
    );

    Ok(GalaxyScene::from_galaxy(
        &galaxy,
        background_sphere(&config.scene),
        ambient_light(&config.scene),
        config.scene.rotation_speed,
    ))
}
