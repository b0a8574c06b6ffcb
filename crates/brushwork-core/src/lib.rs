//! # brushwork-core
//!
//! Geometry, intersection and color-space primitives shared by the
//! brushwork painter. Everything here is pure: no randomness, no buffers.
//!
//! ## Rust Lesson #7: Modules
//!
//! - `mod foo;` = load from `foo.rs` or `foo/mod.rs`
//! - `pub mod foo;` = also export it publicly
//! - `pub use foo::Bar;` = re-export Bar at this level

pub mod color;
pub mod geometry;
pub mod intersect;

// Re-export common types at crate root for convenience.
pub use color::{Color, LinearRgb, to_device, to_linear, wrap_unit};
pub use geometry::{Aabb, Line, Point, Polygon};
pub use intersect::{segment_intersection, segment_polygon_intersections};
