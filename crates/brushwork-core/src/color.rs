//! Device colors, linear light and the conversions between them.
//!
//! Device colors are 0-255 per channel. All blending in the painter happens
//! in linear light (0-1), using a plain power-law gamma of 2.4 rather than
//! the piecewise sRGB curve.

use serde::{Deserialize, Serialize};

/// Exponent taking device values to linear light.
pub const TO_LINEAR_POWER: f64 = 2.4;
/// Exponent taking linear light back to device values.
pub const TO_DEVICE_POWER: f64 = 1.0 / TO_LINEAR_POWER;

/// Convert a device channel (0-255) to linear light (0-1).
#[inline]
pub fn to_linear(v: f64) -> f64 {
    (v / 255.0).powf(TO_LINEAR_POWER)
}

/// Convert linear light (0-1) back to a device channel (0-255).
#[inline]
pub fn to_device(v: f64) -> f64 {
    v.powf(TO_DEVICE_POWER) * 255.0
}

/// Fractional part of `x`, mapped into `[0, 1)` for negative inputs too.
///
/// Handy for hue arithmetic: the opposite hue of `h` is `wrap_unit(h + 0.5)`.
#[inline]
pub fn wrap_unit(x: f64) -> f64 {
    let n = x - x.trunc();
    if n < 0.0 { 1.0 + n } else { n }
}

/// A device-space RGB color, 0-255 per channel.
///
/// Channels are `f64` so mixes and noise-derived colors keep their fraction
/// until they are converted to linear light.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// A linear-light RGB color, 0-1 per channel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LinearRgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::new(255.0, 255.0, 255.0);

    #[inline]
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Build a color from HSL, each component in `[0, 1]`.
    pub fn from_hsl(h: f64, s: f64, l: f64) -> Self {
        if s == 0.0 {
            let v = l * 255.0;
            return Self::new(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Self::new(
            hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0,
            hue_to_channel(p, q, h) * 255.0,
            hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0,
        )
    }

    /// Interpolate toward `other` per channel: `t = 0` is `self`, `t = 1` is `other`.
    #[inline]
    pub fn mix(self, other: Color, t: f64) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    /// Convert to linear light.
    #[inline]
    pub fn to_linear(self) -> LinearRgb {
        LinearRgb {
            r: to_linear(self.r) as f32,
            g: to_linear(self.g) as f32,
            b: to_linear(self.b) as f32,
        }
    }

    /// Format as `#rrggbb`, rounding and clamping each channel.
    pub fn to_hex(self) -> String {
        let channel = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

impl LinearRgb {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Convert back to a device color.
    #[inline]
    pub fn to_device(self) -> Color {
        Color::new(
            to_device(self.r as f64),
            to_device(self.g as f64),
            to_device(self.b as f64),
        )
    }

    /// Euclidean distance between two linear colors.
    #[inline]
    pub fn distance(self, other: LinearRgb) -> f32 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-6 && (a.g - b.g).abs() < 1e-6 && (a.b - b.b).abs() < 1e-6
    }

    #[test]
    fn linear_endpoints() {
        assert_eq!(to_linear(0.0), 0.0);
        assert!((to_linear(255.0) - 1.0).abs() < 1e-12);
        assert_eq!(to_device(0.0), 0.0);
        assert!((to_device(1.0) - 255.0).abs() < 1e-9);
    }

    #[test]
    fn linear_is_darker_than_device() {
        // Mid grey sits well below 0.5 in linear light
        assert!(to_linear(128.0) < 0.25);
    }

    #[test]
    fn hsl_primaries() {
        assert!(close(Color::from_hsl(0.0, 1.0, 0.5), Color::new(255.0, 0.0, 0.0)));
        assert!(close(Color::from_hsl(1.0 / 3.0, 1.0, 0.5), Color::new(0.0, 255.0, 0.0)));
        assert!(close(Color::from_hsl(2.0 / 3.0, 1.0, 0.5), Color::new(0.0, 0.0, 255.0)));
    }

    #[test]
    fn hsl_greyscale() {
        assert!(close(Color::from_hsl(0.3, 0.0, 0.5), Color::new(127.5, 127.5, 127.5)));
        assert!(close(Color::from_hsl(0.7, 0.8, 1.0), Color::WHITE));
        assert!(close(Color::from_hsl(0.7, 0.8, 0.0), Color::BLACK));
    }

    #[test]
    fn mix_endpoints_and_middle() {
        let a = Color::new(0.0, 100.0, 200.0);
        let b = Color::new(100.0, 100.0, 0.0);
        assert_eq!(a.mix(b, 0.0), a);
        assert_eq!(a.mix(b, 1.0), b);
        assert_eq!(a.mix(b, 0.5), Color::new(50.0, 100.0, 100.0));
    }

    #[test]
    fn hex_format() {
        assert_eq!(Color::new(255.0, 0.0, 16.0).to_hex(), "#ff0010");
        assert_eq!(Color::new(300.0, -4.0, 127.6).to_hex(), "#ff0080");
    }

    #[test]
    fn wrap_unit_handles_negatives() {
        assert!((wrap_unit(1.25) - 0.25).abs() < 1e-12);
        assert!((wrap_unit(-0.25) - 0.75).abs() < 1e-12);
        assert_eq!(wrap_unit(0.0), 0.0);
    }

    #[test]
    fn linear_color_round_trip() {
        let c = Color::new(12.0, 128.0, 250.0);
        let back = c.to_linear().to_device();
        assert!((back.r - c.r).abs() < 0.01);
        assert!((back.g - c.g).abs() < 0.01);
        assert!((back.b - c.b).abs() < 0.01);
    }

    proptest! {
        #[test]
        fn device_round_trip(v in 0u8..=255) {
            let v = v as f64;
            prop_assert!((to_device(to_linear(v)) - v).abs() <= 0.5);
        }

        #[test]
        fn hsl_stays_in_range(h in 0.0f64..=1.0, s in 0.0f64..=1.0, l in 0.0f64..=1.0) {
            let c = Color::from_hsl(h, s, l);
            for v in [c.r, c.g, c.b] {
                prop_assert!((-1e-9..=255.0 + 1e-9).contains(&v));
            }
        }
    }
}
