//! Scene graph: one rotating container, built in its final shape.

use std::path::PathBuf;

use galaxy_gen::{Galaxy, StarSample};
use glam::{Mat4, Vec3};

/// A set of colored points drawn as a single primitive.
#[derive(Clone, Debug)]
pub struct PointCloud {
    label: String,
    positions: Vec<[f32; 3]>,
    colors: Vec<[f32; 3]>,
    /// Rotation about the local Y axis, in radians.
    pub rotation_y: f32,
}

impl PointCloud {
    /// Build a cloud from generated stars, keeping their order.
    pub fn from_samples(label: impl Into<String>, samples: &[StarSample]) -> Self {
        Self {
            label: label.into(),
            positions: samples.iter().map(|s| s.position.to_array()).collect(),
            colors: samples.iter().map(|s| s.color).collect(),
            rotation_y: 0.0,
        }
    }

    /// Debug label, also used for GPU resource labels.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Flat position buffer.
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Flat sRGB color buffer, parallel to [`positions`](Self::positions).
    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// `true` if the cloud has no points.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Transform from cloud space into its parent's space.
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y)
    }
}

/// Inward-facing sphere textured with a starfield image.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundSphere {
    /// Sphere radius.
    pub radius: f32,
    /// Segments around the equator.
    pub width_segments: u32,
    /// Segments from pole to pole.
    pub height_segments: u32,
    /// Image wrapped around the inside of the sphere.
    pub texture_path: PathBuf,
}

/// Uniform light applied to every lit surface regardless of orientation.
#[derive(Clone, Debug, PartialEq)]
pub struct AmbientLight {
    /// Linear RGB color.
    pub color: Vec3,
    /// Intensity multiplier.
    pub intensity: f32,
}

impl AmbientLight {
    /// Pre-multiplied color packed for GPU upload; alpha is always 1.
    pub fn to_uniform(&self) -> [f32; 4] {
        let c = self.color * self.intensity;
        [c.x, c.y, c.z, 1.0]
    }
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: Vec3::ONE,
            intensity: 1.0,
        }
    }
}

/// Everything that rotates with the galaxy. The camera is not a member.
#[derive(Clone, Debug)]
pub struct SceneGroup {
    /// Rotation of the whole group about Y, in radians.
    pub rotation_y: f32,
    /// Central bulge.
    pub axial: PointCloud,
    /// Spiral arms; also rotated on their own on top of the group.
    pub spiral: PointCloud,
    /// Starfield backdrop.
    pub background: BackgroundSphere,
    /// Ambient light.
    pub light: AmbientLight,
}

impl SceneGroup {
    /// Transform from group space into world space.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.rotation_y)
    }
}

/// The composed scene and its animation state.
#[derive(Clone, Debug)]
pub struct GalaxyScene {
    /// The rotating container.
    pub container: SceneGroup,
    rotation_speed: f32,
    frame: u64,
}

impl GalaxyScene {
    /// Compose the scene from a generated galaxy.
    pub fn from_galaxy(
        galaxy: &Galaxy,
        background: BackgroundSphere,
        light: AmbientLight,
        rotation_speed: f32,
    ) -> Self {
        let container = SceneGroup {
            rotation_y: 0.0,
            axial: PointCloud::from_samples("galaxy axial stars", &galaxy.axial),
            spiral: PointCloud::from_samples("galaxy spiral stars", &galaxy.spiral),
            background,
            light,
        };
        log::info!(
            "Composed galaxy scene: {} axial + {} spiral points",
            container.axial.len(),
            container.spiral.len()
        );
        Self {
            container,
            rotation_speed,
            frame: 0,
        }
    }

    /// Advance one frame: the container turns by `rotation_speed` and the
    /// spiral arms turn by the same amount again inside it.
    pub fn step(&mut self) {
        self.container.rotation_y += self.rotation_speed;
        self.container.spiral.rotation_y += self.rotation_speed;
        self.frame += 1;
    }

    /// Frames stepped so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Radians added per frame.
    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    /// Change the per-frame rotation.
    pub fn set_rotation_speed(&mut self, rotation_speed: f32) {
        self.rotation_speed = rotation_speed;
    }

    /// World transform of the bulge cloud.
    pub fn axial_world_matrix(&self) -> Mat4 {
        self.container.model_matrix() * self.container.axial.local_matrix()
    }

    /// World transform of the spiral cloud.
    pub fn spiral_world_matrix(&self) -> Mat4 {
        self.container.model_matrix() * self.container.spiral.local_matrix()
    }

    /// World transform of the background sphere.
    pub fn background_world_matrix(&self) -> Mat4 {
        self.container.model_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galaxy_gen::{GalaxyGenerator, GalaxyParams};

    fn test_scene(speed: f32) -> GalaxyScene {
        let galaxy = GalaxyGenerator::new(GalaxyParams::new(100, 3, 10.0, 50.0), 4)
            .generate()
            .unwrap();
        let background = BackgroundSphere {
            radius: 500.0,
            width_segments: 16,
            height_segments: 8,
            texture_path: PathBuf::from("sky.jpg"),
        };
        GalaxyScene::from_galaxy(&galaxy, background, AmbientLight::default(), speed)
    }

    fn rotation_about_y(m: Mat4) -> f32 {
        // Column 0 of a Y rotation is (cos, 0, -sin).
        (-m.x_axis.z).atan2(m.x_axis.x)
    }

    #[test]
    fn test_clouds_keep_sample_order() {
        let samples = [
            StarSample {
                position: Vec3::new(1.0, 2.0, 3.0),
                color: [0.1, 0.2, 0.3],
            },
            StarSample {
                position: Vec3::new(-1.0, 0.0, 4.0),
                color: [0.4, 0.5, 0.6],
            },
        ];
        let cloud = PointCloud::from_samples("test", &samples);
        assert_eq!(cloud.len(), 2);
        assert_eq!(cloud.positions(), &[[1.0, 2.0, 3.0], [-1.0, 0.0, 4.0]]);
        assert_eq!(cloud.colors()[1], [0.4, 0.5, 0.6]);
        assert_eq!(cloud.label(), "test");
    }

    #[test]
    fn test_scene_holds_both_populations() {
        let scene = test_scene(0.0005);
        assert_eq!(scene.container.axial.len(), 20);
        assert_eq!(scene.container.spiral.len(), 100);
        assert_eq!(scene.frame(), 0);
    }

    #[test]
    fn test_step_rotates_container_and_spiral() {
        let mut scene = test_scene(0.0005);
        scene.step();
        assert_eq!(scene.container.rotation_y, 0.0005);
        assert_eq!(scene.container.spiral.rotation_y, 0.0005);
        assert_eq!(scene.container.axial.rotation_y, 0.0);
        assert_eq!(scene.frame(), 1);
    }

    #[test]
    fn test_spiral_turns_twice_as_fast_in_world() {
        let mut scene = test_scene(0.01);
        for _ in 0..50 {
            scene.step();
        }
        let container = rotation_about_y(scene.axial_world_matrix());
        let spiral = rotation_about_y(scene.spiral_world_matrix());
        assert!((container - 0.5).abs() < 1e-4);
        assert!((spiral - 1.0).abs() < 1e-4);
        assert!((rotation_about_y(scene.background_world_matrix()) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_rotation_speed_change_applies_next_step() {
        let mut scene = test_scene(0.0);
        scene.step();
        assert_eq!(scene.container.rotation_y, 0.0);
        scene.set_rotation_speed(0.25);
        scene.step();
        assert_eq!(scene.container.rotation_y, 0.25);
        assert_eq!(scene.rotation_speed(), 0.25);
    }

    #[test]
    fn test_ambient_uniform_premultiplies_intensity() {
        let light = AmbientLight {
            color: Vec3::new(1.0, 0.5, 0.25),
            intensity: 2.0,
        };
        assert_eq!(light.to_uniform(), [2.0, 1.0, 0.5, 1.0]);
    }
}
