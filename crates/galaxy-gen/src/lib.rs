//! Procedural spiral galaxy generation.
//!
//! Produces two point populations: a tapered central bulge aligned with the
//! galaxy's axis, and a flattened disk of stars wound into spiral arms. The
//! random source is always supplied by the caller so a seeded generator
//! reproduces the same galaxy bit for bit.

mod color;
mod error;
mod generator;
mod params;

pub use color::{hsl_to_rgb, offset_lightness, parse_hex_color, rgb_to_hsl, srgb_to_linear};
pub use error::GenerationError;
pub use generator::{
    Galaxy, GalaxyGenerator, StarSample, axial_count, axial_sweep_y, generate, spiral_angle,
};
pub use params::GalaxyParams;
