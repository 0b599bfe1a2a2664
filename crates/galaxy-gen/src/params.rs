//! Generation parameters and their validation.

use crate::error::GenerationError;

/// Inputs to [`generate`](crate::generate).
///
/// The four primary knobs come first; the remaining fields shape the bulge
/// taper and the color jitter and default to the reference look.
#[derive(Debug, Clone, PartialEq)]
pub struct GalaxyParams {
    /// Spiral-arm star count. Must be positive.
    pub num_stars: u32,
    /// Number of arms. Must be positive.
    pub spiral_arms: u32,
    /// Lateral jitter magnitude around each arm.
    pub arm_spread: f32,
    /// Maximum radius of the disk and half-height of the bulge.
    pub radius_spread: f32,
    /// Fraction of `num_stars` placed in the bulge, in `[0, 1]`.
    pub axial_fraction: f64,
    /// Lower bound of the bulge's base spread.
    pub axis_spread_min: f32,
    /// Base bulge spread per star.
    pub axis_spread_scale: f32,
    /// Exponent applied to the taper factor.
    pub taper_exponent: f32,
    /// Floor of the taper factor.
    pub taper_floor: f32,
    /// Half-width of the noise added to the taper factor.
    pub taper_jitter: f32,
    /// Base star color, sRGB.
    pub base_color: [f32; 3],
    /// Half-width of the HSL lightness jitter.
    pub lightness_jitter: f32,
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            num_stars: 20_000,
            spiral_arms: 4,
            arm_spread: 40.0,
            radius_spread: 400.0,
            axial_fraction: 0.2,
            axis_spread_min: 50.0,
            axis_spread_scale: 0.0009,
            taper_exponent: 0.8,
            taper_floor: 0.5,
            taper_jitter: 0.15,
            base_color: [254.0 / 255.0, 247.0 / 255.0, 184.0 / 255.0],
            lightness_jitter: 0.1,
        }
    }
}

impl GalaxyParams {
    /// Primary knobs with the default shape constants.
    pub fn new(num_stars: u32, spiral_arms: u32, arm_spread: f32, radius_spread: f32) -> Self {
        Self {
            num_stars,
            spiral_arms,
            arm_spread,
            radius_spread,
            ..Self::default()
        }
    }

    /// Check every field. Zero spreads are allowed and collapse that axis.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.num_stars == 0 {
            return Err(GenerationError::invalid("num_stars", "must be positive"));
        }
        if self.spiral_arms == 0 {
            return Err(GenerationError::invalid("spiral_arms", "must be positive"));
        }

        let non_negative = [
            ("arm_spread", self.arm_spread),
            ("radius_spread", self.radius_spread),
            ("axis_spread_min", self.axis_spread_min),
            ("axis_spread_scale", self.axis_spread_scale),
            ("taper_exponent", self.taper_exponent),
            ("taper_floor", self.taper_floor),
            ("taper_jitter", self.taper_jitter),
            ("lightness_jitter", self.lightness_jitter),
        ];
        for (name, value) in non_negative {
            check_non_negative(name, value)?;
        }

        if !(0.0..=1.0).contains(&self.axial_fraction) {
            return Err(GenerationError::invalid(
                "axial_fraction",
                format!("must be within [0, 1], got {}", self.axial_fraction),
            ));
        }
        if self
            .base_color
            .iter()
            .any(|c| !(0.0..=1.0).contains(c))
        {
            return Err(GenerationError::invalid(
                "base_color",
                "channels must be within [0, 1]",
            ));
        }
        Ok(())
    }
}

fn check_non_negative(name: &'static str, value: f32) -> Result<(), GenerationError> {
    if !value.is_finite() {
        Err(GenerationError::invalid(
            name,
            format!("must be finite, got {value}"),
        ))
    } else if value < 0.0 {
        Err(GenerationError::invalid(
            name,
            format!("must not be negative, got {value}"),
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid_name(params: &GalaxyParams) -> Option<&'static str> {
        match params.validate() {
            Err(GenerationError::InvalidParameter { name, .. }) => Some(name),
            Ok(()) => None,
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(GalaxyParams::default().validate().is_ok());
        assert!(GalaxyParams::new(10, 4, 10.0, 100.0).validate().is_ok());
    }

    #[test]
    fn test_zero_spread_is_valid() {
        assert!(GalaxyParams::new(10, 1, 0.0, 0.0).validate().is_ok());
    }

    #[test]
    fn test_zero_counts_rejected() {
        assert_eq!(invalid_name(&GalaxyParams::new(0, 4, 1.0, 1.0)), Some("num_stars"));
        assert_eq!(invalid_name(&GalaxyParams::new(5, 0, 1.0, 1.0)), Some("spiral_arms"));
    }

    #[test]
    fn test_negative_or_non_finite_spread_rejected() {
        assert_eq!(
            invalid_name(&GalaxyParams::new(5, 2, -1.0, 1.0)),
            Some("arm_spread")
        );
        assert_eq!(
            invalid_name(&GalaxyParams::new(5, 2, 1.0, f32::NAN)),
            Some("radius_spread")
        );
        assert_eq!(
            invalid_name(&GalaxyParams::new(5, 2, f32::INFINITY, 1.0)),
            Some("arm_spread")
        );
    }

    #[test]
    fn test_shape_constants_checked() {
        let params = GalaxyParams {
            axial_fraction: 1.5,
            ..GalaxyParams::default()
        };
        assert_eq!(invalid_name(&params), Some("axial_fraction"));

        let params = GalaxyParams {
            taper_exponent: f32::NAN,
            ..GalaxyParams::default()
        };
        assert_eq!(invalid_name(&params), Some("taper_exponent"));

        let params = GalaxyParams {
            base_color: [1.2, 0.0, 0.0],
            ..GalaxyParams::default()
        };
        assert_eq!(invalid_name(&params), Some("base_color"));
    }

    #[test]
    fn test_error_message_names_parameter() {
        let err = GalaxyParams::new(5, 2, -3.0, 1.0).validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid parameter `arm_spread`: must not be negative, got -3"
        );
    }
}
