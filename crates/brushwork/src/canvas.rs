//! The linear-light pixel buffer brushes paint into.
//!
//! Pixels are stored as four `f32` per pixel (RGBA), row-major. Color
//! channels hold linear light; alpha is always [`OPAQUE`] and never takes
//! part in blending. Conversion to and from device colors only happens at
//! the edges: when the buffer is built from bytes or an image, and when it
//! is turned back into one.

use brushwork_core::color::{to_device, to_linear};
use brushwork_core::{Color, LinearRgb};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

/// Values per pixel.
pub const CHANNELS: usize = 4;
/// The alpha value every pixel carries.
pub const OPAQUE: f32 = 1.0;

/// Errors at the device edge of the buffer.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BufferError {
    #[error("expected {expected} bytes for a {width}x{height} RGBA buffer, got {actual}")]
    LengthMismatch {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
    #[error("{width}x{height} does not fit an image")]
    TooLarge { width: usize, height: usize },
}

/// Width and height of the paintable canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CanvasSize {
    pub width: usize,
    pub height: usize,
}

impl CanvasSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// Linear-light RGBA pixels, `width * height * 4` values.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearBuffer {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl LinearBuffer {
    /// A black buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Color::BLACK)
    }

    /// A buffer with every pixel set to `color`.
    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        let lin = color.to_linear();
        let data = std::iter::repeat_n([lin.r, lin.g, lin.b, OPAQUE], width * height)
            .flatten()
            .collect();
        Self { width, height, data }
    }

    /// Decode device RGBA8 bytes into linear light. The input alpha is dropped.
    pub fn from_rgba8(width: usize, height: usize, bytes: &[u8]) -> Result<Self, BufferError> {
        let expected = width * height * CHANNELS;
        if bytes.len() != expected {
            return Err(BufferError::LengthMismatch {
                width,
                height,
                expected,
                actual: bytes.len(),
            });
        }

        let data = bytes
            .chunks_exact(CHANNELS)
            .flat_map(|px| {
                [
                    to_linear(px[0] as f64) as f32,
                    to_linear(px[1] as f64) as f32,
                    to_linear(px[2] as f64) as f32,
                    OPAQUE,
                ]
            })
            .collect();

        Ok(Self { width, height, data })
    }

    /// Encode back to device RGBA8 bytes, fully opaque.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let encode = |v: f32| to_device(v.clamp(0.0, 1.0) as f64).round() as u8;
        self.data
            .chunks_exact(CHANNELS)
            .flat_map(|px| [encode(px[0]), encode(px[1]), encode(px[2]), 255])
            .collect()
    }

    pub fn from_image(image: &RgbaImage) -> Result<Self, BufferError> {
        let (width, height) = image.dimensions();
        Self::from_rgba8(width as usize, height as usize, image.as_raw())
    }

    pub fn to_image(&self) -> Result<RgbaImage, BufferError> {
        let too_large = || BufferError::TooLarge {
            width: self.width,
            height: self.height,
        };
        let width = u32::try_from(self.width).map_err(|_| too_large())?;
        let height = u32::try_from(self.height).map_err(|_| too_large())?;
        RgbaImage::from_raw(width, height, self.to_rgba8()).ok_or_else(too_large)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn size(&self) -> CanvasSize {
        CanvasSize::new(self.width, self.height)
    }

    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Index of the first value of pixel `(x, y)`, or `None` outside the buffer.
    #[inline]
    pub fn offset(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width && y < self.height).then(|| (y * self.width + x) * CHANNELS)
    }

    /// The linear color at `(x, y)`.
    pub fn pixel(&self, x: i32, y: i32) -> Option<LinearRgb> {
        let off = self.offset(x, y)?;
        Some(LinearRgb::new(
            self.data[off],
            self.data[off + 1],
            self.data[off + 2],
        ))
    }

    /// Overwrite the color at `(x, y)`. Out-of-bounds writes are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: LinearRgb) {
        if let Some(off) = self.offset(x, y) {
            self.data[off] = color.r;
            self.data[off + 1] = color.g;
            self.data[off + 2] = color.b;
        }
    }
}
