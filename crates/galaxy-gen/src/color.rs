//! Star colors: hex parsing and HSL lightness jitter.
//!
//! HSL here is the usual hexcone model over sRGB components in `[0, 1]`.
//! Hue is stored as a fraction of a full turn.

use crate::error::GenerationError;

/// Parse `#rrggbb` (the leading `#` is optional) into sRGB components.
pub fn parse_hex_color(hex: &str) -> Result<[f32; 3], GenerationError> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(GenerationError::invalid(
            "base_color",
            format!("expected #rrggbb, got {hex:?}"),
        ));
    }

    let mut rgb = [0.0; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        let byte = u8::from_str_radix(&digits[i * 2..i * 2 + 2], 16).map_err(|_| {
            GenerationError::invalid("base_color", format!("non-hex digits in {hex:?}"))
        })?;
        *channel = f32::from(byte) / 255.0;
    }
    Ok(rgb)
}

/// Convert sRGB components to `[hue, saturation, lightness]`.
pub fn rgb_to_hsl([r, g, b]: [f32; 3]) -> [f32; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lightness = (min + max) / 2.0;

    if max == min {
        return [0.0, 0.0, lightness];
    }

    let delta = max - min;
    let saturation = if lightness <= 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };
    let hue = if max == r {
        (g - b) / delta + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / delta + 2.0
    } else {
        (r - g) / delta + 4.0
    };

    [hue / 6.0, saturation, lightness]
}

/// Convert `[hue, saturation, lightness]` back to sRGB.
///
/// Hue wraps around; saturation and lightness are clamped into `[0, 1]`.
pub fn hsl_to_rgb([h, s, l]: [f32; 3]) -> [f32; 3] {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return [l, l, l];
    }

    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
    .map(|c| c.clamp(0.0, 1.0))
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Shift the HSL lightness of `rgb` by `delta`, keeping hue and saturation.
pub fn offset_lightness(rgb: [f32; 3], delta: f32) -> [f32; 3] {
    let [h, s, l] = rgb_to_hsl(rgb);
    hsl_to_rgb([h, s, l + delta])
}

/// Decode one sRGB component to linear light.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
