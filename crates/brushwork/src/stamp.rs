//! Stamp brush: a textured dab repeated along the stroke.
//!
//! Cheaper and flatter than the bristle brush. The brush is a square RGBA
//! texture whose alpha is a keep factor: `1` leaves the canvas alone, `0`
//! covers it completely. Paint is scattered densest in the middle.

use std::f64::consts::{PI, TAU};

use brushwork_core::{Color, Point};
use rand::{Rng, SeedableRng};

use crate::canvas::{CHANNELS, LinearBuffer};
use crate::rng::Lcg;
use crate::stroke::Stroker;

/// Distance between stamps, as a fraction of the brush size.
pub const STAMP_SPACING: f64 = 0.2;
/// Nominal stamps per soak; the brush re-soaks at 80% of this.
pub const RESOAK_INTERVAL: u32 = 50;
const RESOAK_THRESHOLD: f64 = 0.8;
/// Rate at which texels pick up canvas color where they are transparent.
const PICKUP: f32 = 0.05;

#[derive(Debug, Clone)]
pub struct StampBrush<R = Lcg> {
    size: usize,
    /// `size * size` texels, RGBA, linear light.
    texture: Vec<f32>,
    stamps: u32,
    color: Color,
    rng: R,
}

impl StampBrush<Lcg> {
    pub fn seeded(size: usize, color: Color, seed: u64) -> Self {
        Self::new(size, color, Lcg::seed_from_u64(seed))
    }
}

impl<R: Rng> StampBrush<R> {
    /// A `size x size` stamp, already soaked in `color`.
    pub fn new(size: usize, color: Color, rng: R) -> Self {
        let mut brush = Self {
            size,
            texture: vec![0.0; size * size * CHANNELS],
            stamps: 0,
            color,
            rng,
        };
        brush.soak(color);
        brush
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The pigment of the last soak.
    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Stamps made since the last soak.
    #[inline]
    pub fn stamps(&self) -> u32 {
        self.stamps
    }

    #[inline]
    pub fn texture(&self) -> &[f32] {
        &self.texture
    }

    /// Re-ink the stamp with `color`.
    ///
    /// Clears the texture, then scatters `floor(h^2 * pi)` texels around the
    /// center (`h = (size - 2) / 2`), radius biased inward. Alpha grows with
    /// distance from the center so the middle paints hardest.
    pub fn soak(&mut self, color: Color) {
        self.stamps = 0;
        self.color = color;

        for texel in self.texture.chunks_exact_mut(CHANNELS) {
            texel[3] = 0.0;
        }

        let h = (self.size as f64 - 2.0) / 2.0;
        if h <= 0.0 {
            return;
        }

        let lin = color.to_linear();
        let count = (h * h * PI).floor() as usize;
        for _ in 0..count {
            let angle = self.rng.random::<f64>() * TAU;
            let u = self.rng.random::<f64>();
            let radius = u * u * h;
            let (x, y) = (angle.cos() * radius, angle.sin() * radius);

            let tx = (h + x) as usize;
            let ty = (h + y) as usize;
            let off = (ty * self.size + tx) * CHANNELS;
            self.texture[off..off + CHANNELS].copy_from_slice(&[
                lin.r,
                lin.g,
                lin.b,
                (0.001 + radius / h) as f32,
            ]);
        }
    }

    /// Press the stamp onto the canvas centered on `at`.
    ///
    /// Each texel is read through a random mirroring, so repeated stamps
    /// never line up. The outermost row and column of the buffer are never
    /// written.
    pub fn stamp(&mut self, buffer: &mut LinearBuffer, at: Point) {
        let size = self.size as i32;
        let half = size / 2;
        let (width, height) = (buffer.width() as i32, buffer.height() as i32);

        for y in -half..half {
            for x in -half..half {
                let (tx, ty) = match self.rng.random_range(0..4u8) {
                    0 => (half + x, half + y),
                    1 => (half - x, half + y),
                    2 => (half - x, half - y),
                    _ => (half + x, half - y),
                };
                if tx < 0 || ty < 0 || tx >= size || ty >= size {
                    continue;
                }

                let px = (at.x + x as f64) as i32;
                let py = (at.y + y as f64) as i32;
                if px <= 0 || py <= 0 || px >= width || py >= height {
                    continue;
                }

                let toff = (ty * size + tx) as usize * CHANNELS;
                let keep = self.texture[toff + 3];
                if keep == 0.0 {
                    continue;
                }
                let Some(poff) = buffer.offset(px, py) else {
                    continue;
                };

                let pickup = (1.0 - keep) * PICKUP;
                let pixel = &mut buffer.data_mut()[poff..poff + 3];
                let texel = &mut self.texture[toff..toff + 3];
                for (p, t) in pixel.iter_mut().zip(texel.iter_mut()) {
                    let ink = *t;
                    *t += (*p - ink) * pickup;
                    *p = ink + (*p - ink) * keep;
                }
            }
        }
    }

    /// Stamp along the straight line from `from` to `to`.
    ///
    /// Re-soaks afterwards once the brush has stamped past its interval, in
    /// `color` or, without one, in its previous color.
    pub fn stroke(&mut self, buffer: &mut LinearBuffer, from: Point, to: Point, color: Option<Color>) {
        let delta = to - from;
        let len = delta.length();
        let spacing = self.size as f64 * STAMP_SPACING;

        if len > 0.0 && spacing > 0.0 {
            let advance = delta * (spacing / len);
            let mut at = from;
            for _ in 0..(len / spacing).floor() as usize {
                self.stamp(buffer, at);
                self.stamps += 1;
                at = at + advance;
            }
        }

        // The stroke itself counts once, after the check
        let exhausted = self.stamps as f64 > RESOAK_INTERVAL as f64 * RESOAK_THRESHOLD;
        self.stamps += 1;
        if exhausted {
            let pigment = color.unwrap_or(self.color);
            log::trace!("stamp re-soaking after {} stamps", self.stamps);
            self.soak(pigment);
        }
    }
}

impl<R: Rng> Stroker for StampBrush<R> {
    #[inline]
    fn stroke(&mut self, buffer: &mut LinearBuffer, from: Point, to: Point, color: Option<Color>) {
        StampBrush::stroke(self, buffer, from, to, color);
    }
}
