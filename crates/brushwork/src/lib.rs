//! # brushwork
//!
//! Painterly rendering: simulated bristle brushes paint hatch strokes into a
//! linear-light pixel buffer.
//!
//! ```no_run
//! use brushwork::{BristleBrush, BrushOptions, CanvasSize, Color, HatchFiller, LinearBuffer, Polygon};
//!
//! let mut buffer = LinearBuffer::filled(200, 200, Color::WHITE);
//! let mut brush = BristleBrush::seeded(12.0, buffer.size(), BrushOptions::default(), 42);
//! let cell = Polygon::from_coords(&[(20.0, 20.0), (180.0, 40.0), (100.0, 170.0)]);
//!
//! brush.soak(Color::new(200.0, 60.0, 40.0));
//! let strokes = HatchFiller::default().fill(&mut buffer, &mut brush, None, &cell);
//! assert!(strokes > 0);
//! let image = buffer.to_image()?;
//! # let _ = (image, CanvasSize::default());
//! # Ok::<(), brushwork::BufferError>(())
//! ```
//!
//! ## Rust Lesson #25: Workspace Crates
//!
//! The pure math (colors, points, polygon clipping) lives in `brushwork-core`,
//! which has no randomness and no image types. This crate adds the stateful
//! parts on top and re-exports the core types, so most users only ever
//! depend on `brushwork`.

pub mod brush;
pub mod canvas;
pub mod flatten;
pub mod hatch;
pub mod noise;
pub mod raster;
pub mod rng;
pub mod stamp;
pub mod stroke;

pub use brush::{Bristle, BristleBrush, BrushOptions};
pub use canvas::{BufferError, CanvasSize, LinearBuffer};
pub use flatten::Cubic;
pub use hatch::{HatchFiller, HatchOptions, Scanlines, hatch_direction};
pub use noise::{ConstantField, NoiseField, SimplexField};
pub use rng::Lcg;
pub use stamp::StampBrush;
pub use stroke::Stroker;

pub use brushwork_core::{Aabb, Color, LinearRgb, Line, Point, Polygon};
