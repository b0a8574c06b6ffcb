//! Segment intersection against segments and polygons.
//!
//! This is the HOT PATH of hatch filling - every scanline of every cell
//! is clipped here.

use crate::geometry::{Point, Polygon};

// ============================================================================
// SEGMENT-SEGMENT INTERSECTION
// ============================================================================

/// Find the intersection point between segment `p0 -> p1` and `q0 -> q1`.
///
/// Solves both segments parametrically; the hit is only reported when both
/// parameters lie in `[0, 1]` (endpoints included). Parallel segments
/// (zero denominator) never intersect here, even when collinear.
#[inline]
pub fn segment_intersection(p0: Point, p1: Point, q0: Point, q1: Point) -> Option<Point> {
    let d0 = p1 - p0;
    let d1 = q1 - q0;
    let d3 = p0 - q0;

    let denom = d1.y * d0.x - d1.x * d0.y;
    if denom == 0.0 {
        return None;
    }

    let ua = (d1.x * d3.y - d1.y * d3.x) / denom;
    let ub = (d0.x * d3.y - d0.y * d3.x) / denom;

    if (0.0..=1.0).contains(&ua) && (0.0..=1.0).contains(&ub) {
        Some(p0 + d0 * ua)
    } else {
        None
    }
}

// ============================================================================
// SEGMENT-POLYGON INTERSECTION
// ============================================================================

/// Find every crossing between a segment and a polygon boundary.
///
/// Edges are tested closing edge first, then in vertex order, and hits are
/// returned in that discovery order. Nothing is sorted or deduplicated: a
/// segment passing exactly through a vertex reports that vertex once for
/// each adjacent edge.
///
/// ## Rust Lesson #28: filter_map
///
/// `filter_map` maps and drops `None`s in one pass: the per-edge test
/// already returns `Option<Point>`, so the misses simply vanish.
pub fn segment_polygon_intersections(p0: Point, p1: Point, polygon: &Polygon) -> Vec<Point> {
    polygon
        .edges()
        .filter_map(|(q0, q1)| segment_intersection(p0, p1, q0, q1))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
