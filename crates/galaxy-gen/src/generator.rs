//! Star placement for the bulge and the spiral arms.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::color::offset_lightness;
use crate::error::GenerationError;
use crate::params::GalaxyParams;

/// A single generated star.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarSample {
    /// Position in galaxy space. The disk lies in the XZ plane, Y is the axis.
    pub position: Vec3,
    /// sRGB color, every channel in `[0, 1]`.
    pub color: [f32; 3],
}

/// Both star populations, in generation order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Galaxy {
    /// Central bulge stars, swept along the Y axis.
    pub axial: Vec<StarSample>,
    /// Disk stars wound into arms.
    pub spiral: Vec<StarSample>,
}

impl Galaxy {
    /// Total number of stars across both populations.
    pub fn len(&self) -> usize {
        self.axial.len() + self.spiral.len()
    }

    /// `true` when neither population has stars.
    pub fn is_empty(&self) -> bool {
        self.axial.is_empty() && self.spiral.is_empty()
    }
}

/// Number of bulge stars for a given spiral star count.
pub fn axial_count(num_stars: u32, axial_fraction: f64) -> usize {
    (axial_fraction * f64::from(num_stars)).floor() as usize
}

/// Height of bulge star `i` of `count` before lateral jitter. Starts at
/// `-radius_spread` and stops one step short of `+radius_spread`.
pub fn axial_sweep_y(i: usize, count: usize, radius_spread: f32) -> f32 {
    (i as f32 / count as f32) * 2.0 * radius_spread - radius_spread
}

/// Pre-jitter polar angle of spiral star `i`. The whole population wraps
/// `spiral_arms` full turns.
pub fn spiral_angle(i: usize, num_stars: u32, spiral_arms: u32) -> f64 {
    (i as f64 / f64::from(num_stars)) * std::f64::consts::TAU * f64::from(spiral_arms)
}

/// Generate both populations from `params`, drawing every random value from
/// `rng`.
///
/// Per bulge star the draws are: taper jitter, x, z, lightness. Per spiral
/// star: radius, x offset, z offset, lightness. The spiral star's height is
/// half its z offset, so it reuses that draw instead of taking its own.
pub fn generate<R: Rng>(params: &GalaxyParams, rng: &mut R) -> Result<Galaxy, GenerationError> {
    params.validate()?;

    let axial = generate_axial(params, rng);
    let spiral = generate_spiral(params, rng);

    log::debug!(
        "Generated galaxy: {} axial stars, {} spiral stars across {} arms",
        axial.len(),
        spiral.len(),
        params.spiral_arms
    );

    Ok(Galaxy { axial, spiral })
}

fn generate_axial<R: Rng>(params: &GalaxyParams, rng: &mut R) -> Vec<StarSample> {
    let count = axial_count(params.num_stars, params.axial_fraction);
    let radius = params.radius_spread;
    let base_spread = params
        .axis_spread_min
        .max(params.num_stars as f32 * params.axis_spread_scale);

    let mut stars = Vec::with_capacity(count);
    for i in 0..count {
        let y = axial_sweep_y(i, count, radius);
        let falloff = if radius > 0.0 {
            y.abs() / (2.0 * radius)
        } else {
            0.0
        };
        let jitter = symmetric(rng, 2.0 * params.taper_jitter);
        let taper = (1.0 - falloff + jitter).max(params.taper_floor);
        let spread = base_spread * taper.powf(params.taper_exponent);

        let x = symmetric(rng, spread);
        let z = symmetric(rng, spread);

        stars.push(StarSample {
            position: Vec3::new(x, y, z),
            color: jittered_color(params, rng),
        });
    }
    stars
}

fn generate_spiral<R: Rng>(params: &GalaxyParams, rng: &mut R) -> Vec<StarSample> {
    let count = params.num_stars as usize;

    let mut stars = Vec::with_capacity(count);
    for i in 0..count {
        let angle = spiral_angle(i, params.num_stars, params.spiral_arms);
        let radius = rng.random::<f32>() * params.radius_spread;
        let offset_x = symmetric(rng, params.arm_spread);
        let offset_z = symmetric(rng, params.arm_spread);

        let x = angle.cos() as f32 * radius + offset_x;
        let z = angle.sin() as f32 * radius + offset_z;
        let y = offset_z / 2.0;

        stars.push(StarSample {
            position: Vec3::new(x, y, z),
            color: jittered_color(params, rng),
        });
    }
    stars
}

/// Uniform sample in `[-width/2, width/2)`.
fn symmetric<R: Rng>(rng: &mut R, width: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * width
}

fn jittered_color<R: Rng>(params: &GalaxyParams, rng: &mut R) -> [f32; 3] {
    let delta = symmetric(rng, 2.0 * params.lightness_jitter);
    offset_lightness(params.base_color, delta)
}

/// Seeded wrapper around [`generate`] backed by ChaCha8.
pub struct GalaxyGenerator {
    params: GalaxyParams,
    seed: Option<u64>,
}

impl GalaxyGenerator {
    /// Generator that reproduces the same galaxy for the same seed.
    pub fn new(params: GalaxyParams, seed: u64) -> Self {
        Self {
            params,
            seed: Some(seed),
        }
    }

    /// Generator that draws a fresh galaxy every call.
    pub fn from_entropy(params: GalaxyParams) -> Self {
        Self { params, seed: None }
    }

    /// The fixed seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Parameters this generator was built with.
    pub fn params(&self) -> &GalaxyParams {
        &self.params
    }

    /// Generate the galaxy. Deterministic when a seed is set.
    pub fn generate(&self) -> Result<Galaxy, GenerationError> {
        let mut rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        };
        generate(&self.params, &mut rng)
    }
}
