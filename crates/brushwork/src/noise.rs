//! Coherent noise fields.
//!
//! The brush samples noise in two places: to pick an ambient tint when it
//! runs dry and re-soaks, and to vary the opacity of every bristle touch.
//! Both go through the `NoiseField` trait so tests can swap in a flat field.

use ::noise::{NoiseFn, Simplex};

/// A smooth 3D scalar field with values roughly in `[-1, 1]`.
pub trait NoiseField {
    fn sample(&self, x: f64, y: f64, z: f64) -> f64;
}

/// Simplex noise, the default field.
#[derive(Clone)]
pub struct SimplexField {
    simplex: Simplex,
}

impl SimplexField {
    pub fn new(seed: u32) -> Self {
        Self {
            simplex: Simplex::new(seed),
        }
    }
}

impl Default for SimplexField {
    fn default() -> Self {
        Self::new(0)
    }
}

impl std::fmt::Debug for SimplexField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimplexField").finish_non_exhaustive()
    }
}

impl NoiseField for SimplexField {
    #[inline]
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        self.simplex.get([x, y, z])
    }
}

/// A field with the same value everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConstantField(pub f64);

impl NoiseField for ConstantField {
    #[inline]
    fn sample(&self, _x: f64, _y: f64, _z: f64) -> f64 {
        self.0
    }
}

// ## Rust Lesson #24: Blanket Implementations
//
// A reference to a field is a field too. This lets a caller keep ownership
// of one noise source and lend it to several brushes.
impl<N: NoiseField + ?Sized> NoiseField for &N {
    #[inline]
    fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        (**self).sample(x, y, z)
    }
}
