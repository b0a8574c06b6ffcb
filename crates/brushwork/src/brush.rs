//! Bristle brush simulation.
//!
//! A brush is a disc of individual bristles, each carrying its own pigment.
//! A stroke is a jittered cubic curve; at every integer step along it, every
//! bristle touches the canvas once: it picks up a little of the color under
//! it and deposits some of its own.
//!
//! Bristles near their resting position hold still on the canvas while the
//! brush moves on, which drags them out behind the stroke. Once a bristle is
//! stretched half a brush width away from its anchor it is carried along
//! again. That splaying is what gives strokes their streaky look.

use std::f64::consts::{PI, TAU};

use brushwork_core::{Aabb, Color, LinearRgb, Point};
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::canvas::{CHANNELS, CanvasSize, LinearBuffer};
use crate::flatten::{Cubic, STROKE_APPROXIMATION_SCALE};
use crate::noise::{NoiseField, SimplexField};
use crate::raster::{LineSteps, clip_line, step_count};
use crate::rng::Lcg;
use crate::stroke::Stroker;

/// Bristles per unit of brush area.
pub const BRISTLE_DENSITY: f64 = 0.2;
/// Radial bias of the bristle layout; below 1 pushes bristles outward.
const BRISTLE_RADIUS_EXPONENT: f64 = 0.6;

/// How much of the canvas survives a bristle touch (1 = untouched).
pub const PAINT_FACTOR: f32 = 0.95;
/// How much canvas color a bristle picks up per touch.
pub const DIRTY_FACTOR: f32 = 0.003;

const TEXTURE_NOISE_SCALE: f64 = 0.2;
const TEXTURE_NOISE_AMPLITUDE: f64 = 0.04;

/// Range of the per-bristle blend factor used by `soak`.
const SOAK_BLEND_MIN: f64 = 0.2;
const SOAK_BLEND_MAX: f64 = 0.6;

/// Texture-noise frequencies are drawn from `[MIN, MIN + SPAN)`.
const FREQUENCY_MIN: f64 = 0.001;
const FREQUENCY_SPAN: f64 = 0.001;

/// Noise z planes sampled for the red, green and blue re-soak channels.
const RESOAK_PLANES: [f64; 3] = [0.0, 2.0, 2.0];

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Tunable brush behavior.
///
/// Deserializing fills every missing field from `Default`, so a partial
/// config like `{"cp_variance": 10}` only overrides what it names.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushOptions {
    /// Jitter applied to the stroke start point, per axis (total width).
    pub line_start_variance: f64,
    /// Jitter applied to the stroke end point, per axis (total width).
    pub line_end_variance: f64,
    /// Jitter applied to both curve control points, per axis (total width).
    pub cp_variance: f64,
    /// Steps the brush can paint before it re-soaks on its own.
    pub dry_limit: u32,
}

impl Default for BrushOptions {
    fn default() -> Self {
        Self {
            line_start_variance: 0.0,
            line_end_variance: 0.0,
            cp_variance: 40.0,
            dry_limit: 200,
        }
    }
}

impl BrushOptions {
    pub fn with_line_start_variance(mut self, variance: f64) -> Self {
        self.line_start_variance = variance;
        self
    }

    pub fn with_line_end_variance(mut self, variance: f64) -> Self {
        self.line_end_variance = variance;
        self
    }

    pub fn with_cp_variance(mut self, variance: f64) -> Self {
        self.cp_variance = variance;
        self
    }

    pub fn with_dry_limit(mut self, dry_limit: u32) -> Self {
        self.dry_limit = dry_limit;
        self
    }
}

// ============================================================================
// BRISTLES
// ============================================================================

/// One simulated bristle.
///
/// Stored in a flat `Vec<Bristle>`; the layout is seven `f32`s:
///
/// | field    | meaning                                             |
/// |----------|-----------------------------------------------------|
/// | `x, y`   | offset from the current stroke position             |
/// | `r, g, b`| carried pigment, linear light                       |
/// | `ox, oy` | anchor offset: where the bristle rests in the brush |
///
/// ## Rust Lesson #26: `#[repr(C)]`
///
/// Rust is free to reorder struct fields. `repr(C)` pins them in declaration
/// order with C padding rules, so a `&[Bristle]` can be viewed as a flat
/// run of `f32`s (seven per bristle) by code that wants raw access.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bristle {
    pub x: f32,
    pub y: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub ox: f32,
    pub oy: f32,
}

impl Bristle {
    fn at_rest(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            ox: x,
            oy: y,
            ..Self::default()
        }
    }

    #[inline]
    pub fn offset(&self) -> Point {
        Point::new(self.x as f64, self.y as f64)
    }

    #[inline]
    pub fn anchor(&self) -> Point {
        Point::new(self.ox as f64, self.oy as f64)
    }

    #[inline]
    pub fn color(&self) -> LinearRgb {
        LinearRgb::new(self.r, self.g, self.b)
    }
}

/// Number of bristles in a brush of diameter `size`.
pub fn bristle_count(size: f64) -> usize {
    (size * size * PI * BRISTLE_DENSITY).floor().max(0.0) as usize
}

// ============================================================================
// BRUSH
// ============================================================================

/// A simulated bristle brush.
///
/// Randomness (`R`) and noise (`N`) are injected at construction; a brush
/// built from the same seeds paints the same pixels.
#[derive(Debug, Clone)]
pub struct BristleBrush<R = Lcg, N = SimplexField> {
    size: f64,
    bristles: Vec<Bristle>,
    paint_count: u32,
    /// Noise frequencies for the ambient re-soak color: `[rx, ry, gx, gy, bx, by]`.
    frequencies: [f64; 6],
    canvas: CanvasSize,
    options: BrushOptions,
    rng: R,
    noise: N,
}

impl BristleBrush<Lcg, SimplexField> {
    /// A brush with the default generator and noise field, both seeded from `seed`.
    pub fn seeded(size: f64, canvas: CanvasSize, options: BrushOptions, seed: u64) -> Self {
        Self::new(
            size,
            canvas,
            options,
            Lcg::seed_from_u64(seed),
            SimplexField::new(seed as u32),
        )
    }
}

impl<R: Rng, N: NoiseField> BristleBrush<R, N> {
    /// Build a brush of diameter `size`.
    ///
    /// The brush starts dry: the first stroke soaks it before painting.
    pub fn new(size: f64, canvas: CanvasSize, options: BrushOptions, mut rng: R, noise: N) -> Self {
        let half = size / 2.0;

        let bristles = (0..bristle_count(size))
            .map(|_| {
                let angle = rng.random::<f64>() * TAU;
                let radius = rng.random::<f64>().powf(BRISTLE_RADIUS_EXPONENT) * half;
                Bristle::at_rest(
                    (angle.cos() * radius).trunc() as f32,
                    (angle.sin() * radius).trunc() as f32,
                )
            })
            .collect();

        let frequencies =
            std::array::from_fn(|_| FREQUENCY_MIN + FREQUENCY_SPAN * rng.random::<f64>());

        Self {
            size,
            bristles,
            paint_count: options.dry_limit,
            frequencies,
            canvas,
            options,
            rng,
            noise,
        }
    }

    #[inline]
    pub fn size(&self) -> f64 {
        self.size
    }

    #[inline]
    pub fn bristles(&self) -> &[Bristle] {
        &self.bristles
    }

    /// Steps painted since the last soak.
    #[inline]
    pub fn paint_count(&self) -> u32 {
        self.paint_count
    }

    #[inline]
    pub fn is_dry(&self) -> bool {
        self.paint_count >= self.options.dry_limit
    }

    #[inline]
    pub fn options(&self) -> &BrushOptions {
        &self.options
    }

    #[inline]
    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    #[inline]
    pub fn frequencies(&self) -> [f64; 6] {
        self.frequencies
    }

    /// Dip the brush into `color`.
    ///
    /// Every bristle moves part of the way toward the new pigment, each by
    /// its own random amount, so old paint lingers unevenly.
    pub fn soak(&mut self, color: Color) {
        self.paint_count = 0;
        let target = color.to_linear();

        for bristle in &mut self.bristles {
            let f = self.rng.random_range(SOAK_BLEND_MIN..SOAK_BLEND_MAX) as f32;
            bristle.r += (target.r - bristle.r) * f;
            bristle.g += (target.g - bristle.g) * f;
            bristle.b += (target.b - bristle.b) * f;
        }
    }

    /// The color a dry brush reaches for at `at` when no pigment is given.
    pub fn ambient_color(&self, at: Point) -> Color {
        let [rx, ry, gx, gy, bx, by] = self.frequencies;
        let channel = |fx: f64, fy: f64, z: f64| {
            (127.5 + 127.5 * self.noise.sample(at.x * fx, at.y * fy, z)).clamp(0.0, 255.0)
        };
        Color::new(
            channel(rx, ry, RESOAK_PLANES[0]),
            channel(gx, gy, RESOAK_PLANES[1]),
            channel(bx, by, RESOAK_PLANES[2]),
        )
    }

    /// Paint one stroke from `from` to `to`.
    ///
    /// A dry brush re-soaks first, in the ambient color at `from`. The
    /// bristle brush takes its pigment from the noise field only, so
    /// `_color` is ignored; call [`soak`](Self::soak) to dip it explicitly.
    ///
    /// Pixels outside the buffer or the brush's canvas are skipped. Parts of
    /// the path too far off the canvas for any bristle to reach are not
    /// stepped through, but still count toward drying the brush.
    pub fn stroke(&mut self, buffer: &mut LinearBuffer, from: Point, to: Point, _color: Option<Color>) {
        if self.is_dry() {
            let pigment = self.ambient_color(from);
            log::trace!(
                "brush dry after {} steps, re-soaking in {}",
                self.paint_count,
                pigment.to_hex()
            );
            self.soak(pigment);
        }

        let BrushOptions {
            line_start_variance,
            line_end_variance,
            cp_variance,
            ..
        } = self.options;

        let start = self.jittered(from, line_start_variance).trunc();
        let end = self.jittered(to, line_end_variance).trunc();
        let chord = end - start;
        let ctrl1 = self.jittered(start + chord * (1.0 / 3.0), cp_variance);
        let ctrl2 = self.jittered(start + chord * (2.0 / 3.0), cp_variance);

        // Bristles sit less than `size` from the stroke position
        let margin = self.size.max(0.0) + 1.0;
        let reachable = Aabb {
            min_x: -margin,
            min_y: -margin,
            max_x: self.canvas.width.min(buffer.width()) as f64 + margin,
            max_y: self.canvas.height.min(buffer.height()) as f64 + margin,
        };

        let mut prev: Option<(i64, i64)> = None;
        Cubic::new(start, ctrl1, ctrl2, end).for_each_segment(STROKE_APPROXIMATION_SCALE, |segment| {
            let total = step_count(&segment);
            let Some(visible) = clip_line(segment, &reachable) else {
                self.paint_count = self.paint_count.saturating_add(total);
                return;
            };
            let skipped = total.saturating_sub(step_count(&visible));
            self.paint_count = self.paint_count.saturating_add(skipped);

            let steps = LineSteps::new(
                visible.x1 as i64,
                visible.y1 as i64,
                visible.x2 as i64,
                visible.y2 as i64,
            );
            for (x, y) in steps {
                self.paint_step(buffer, x, y, prev);
                prev = Some((x, y));
            }
        });
    }

    /// `p` moved by `U(-variance/2, variance/2)` on each axis.
    fn jittered(&mut self, p: Point, variance: f64) -> Point {
        let mut jitter = || variance * self.rng.random::<f64>() - variance / 2.0;
        let dx = jitter();
        let dy = jitter();
        Point::new(p.x + dx, p.y + dy)
    }

    /// Touch every bristle down at stroke position `(x, y)`.
    fn paint_step(&mut self, buffer: &mut LinearBuffer, x: i64, y: i64, prev: Option<(i64, i64)>) {
        let (mx, my) = prev.map_or((0.0, 0.0), |(px, py)| ((x - px) as f32, (y - py) as f32));
        let reach = (self.size / 2.0) as f32;

        let stride = buffer.width();
        let width = self.canvas.width.min(buffer.width());
        let height = self.canvas.height.min(buffer.height());
        let data = buffer.data_mut();
        let noise = &self.noise;

        for bristle in &mut self.bristles {
            // Holding still on the canvas means moving against the brush.
            let cx = bristle.x - mx;
            let cy = bristle.y - my;
            let (dx, dy) = (cx - bristle.ox, cy - bristle.oy);
            if (dx * dx + dy * dy).sqrt() < reach {
                bristle.x = cx;
                bristle.y = cy;
            }

            let px = x + bristle.x as i64;
            let py = y + bristle.y as i64;
            if px < 0 || py < 0 || px as usize >= width || py as usize >= height {
                continue;
            }

            let off = (py as usize * stride + px as usize) * CHANNELS;
            let pixel = &mut data[off..off + 3];

            bristle.r += (pixel[0] - bristle.r) * DIRTY_FACTOR;
            bristle.g += (pixel[1] - bristle.g) * DIRTY_FACTOR;
            bristle.b += (pixel[2] - bristle.b) * DIRTY_FACTOR;

            let texture = noise.sample(
                px as f64 * TEXTURE_NOISE_SCALE,
                py as f64 * TEXTURE_NOISE_SCALE,
                0.0,
            );
            let keep = (PAINT_FACTOR as f64 - TEXTURE_NOISE_AMPLITUDE * texture) as f32;

            pixel[0] = bristle.r + (pixel[0] - bristle.r) * keep;
            pixel[1] = bristle.g + (pixel[1] - bristle.g) * keep;
            pixel[2] = bristle.b + (pixel[2] - bristle.b) * keep;
        }

        self.paint_count = self.paint_count.saturating_add(1);
    }
}

impl<R: Rng, N: NoiseField> Stroker for BristleBrush<R, N> {
    #[inline]
    fn stroke(&mut self, buffer: &mut LinearBuffer, from: Point, to: Point, color: Option<Color>) {
        BristleBrush::stroke(self, buffer, from, to, color);
    }
}

// ============================================================================
// TESTS
// ============================================================================
