//! Core geometry types for brushwork.
//!
//! ## Rust Lesson #3: Structs & Derives
//!
//! The `#[derive(...)]` macro auto-generates common functionality:
//! - `Debug` = print with `{:?}`
//! - `Clone` / `Copy` = duplicate the value (Copy = implicitly, small values only)
//! - `PartialEq` = compare with `==`
//! - `Serialize` / `Deserialize` = serde can read and write it (JSON, TOML, ...)

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A 2D point with x,y coordinates in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A line segment defined by two endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// A closed polygon: an ordered, cyclic list of vertices.
///
/// The closing edge (last -> first) is implicit. No winding order is
/// required, and nothing checks for self-intersection; hatch filling simply
/// assumes cells are mostly convex.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polygon {
    pub vertices: Vec<Point>,
}

/// Axis-aligned bounding box, built by folding points into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: Point) -> f64 {
        (*self - other).length()
    }

    /// Length of this point read as a vector from the origin.
    #[inline]
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Both coordinates truncated toward zero.
    #[inline]
    pub fn trunc(&self) -> Self {
        Self::new(self.x.trunc(), self.y.trunc())
    }
}

// ## Rust Lesson #29: Operator Overloading
//
// Implementing `Add`, `Sub`, `Mul` lets us write `a + b * 2.0` for points,
// just like for numbers. The compiler turns it into plain method calls.

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl Line {
    #[inline]
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    pub fn from_points(start: Point, end: Point) -> Self {
        Self::new(start.x, start.y, end.x, end.y)
    }

    #[inline]
    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    #[inline]
    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    #[inline]
    pub fn midpoint(&self) -> Point {
        Point::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    #[inline]
    pub fn length(&self) -> f64 {
        self.start().distance(self.end())
    }
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Build a polygon from `(x, y)` tuples.
    pub fn from_coords(coords: &[(f64, f64)]) -> Self {
        Self::new(coords.iter().map(|&(x, y)| Point::new(x, y)).collect())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Get the bounding box, or `None` for a polygon without vertices.
    pub fn bounding_box(&self) -> Option<Aabb> {
        if self.vertices.is_empty() {
            return None;
        }
        Some(Aabb::from_points(self.vertices.iter().copied()))
    }

    /// Iterate the edges, closing edge first, then in vertex order.
    ///
    /// `(last, first), (v0, v1), (v1, v2), ...` - the same order in which
    /// intersections are discovered when clipping against the polygon.
    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let prev = self.vertices.last().copied();
        self.vertices.iter().scan(prev, |prev, &p| {
            let start = prev.replace(p)?;
            Some((start, p))
        })
    }

    /// The vertex pair with the greatest separation, and that separation.
    ///
    /// Pairs are visited `(i, j)` with `i < j`; a later pair only wins when
    /// it is strictly longer. Returns `None` when no pair is further apart
    /// than zero (fewer than two distinct vertices).
    pub fn farthest_pair(&self) -> Option<(Point, Point, f64)> {
        let mut best: Option<(Point, Point, f64)> = None;
        for (i, &a) in self.vertices.iter().enumerate() {
            for &b in &self.vertices[i + 1..] {
                let len = a.distance(b);
                if len > best.map_or(0.0, |(_, _, l)| l) {
                    best = Some((a, b, len));
                }
            }
        }
        best
    }
}

impl Aabb {
    /// An empty box: folding any point into it yields that point's box.
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Fold a sequence of points into a box.
    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Self {
        points.into_iter().fold(Self::empty(), |mut aabb, p| {
            aabb.add(p);
            aabb
        })
    }

    /// Extend the box to contain `p`.
    #[inline]
    pub fn add(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    /// Grow the box by `margin` on every side.
    #[inline]
    pub fn grow(&mut self, margin: f64) {
        self.min_x -= margin;
        self.min_y -= margin;
        self.max_x += margin;
        self.max_y += margin;
    }

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Length of the box diagonal.
    #[inline]
    pub fn diagonal(&self) -> f64 {
        Point::new(self.width(), self.height()).length()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: f64) -> Polygon {
        Polygon::from_coords(&[(0.0, 0.0), (size, 0.0), (size, size), (0.0, size)])
    }

    #[test]
    fn point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert_eq!(p1.distance(p2), 5.0);
    }

    #[test]
    fn point_ops() {
        let p = Point::new(1.0, 2.0) + Point::new(3.0, 4.0) * 2.0 - Point::new(1.0, 1.0);
        assert_eq!(p, Point::new(6.0, 9.0));
        assert_eq!(Point::new(-2.7, 3.9).trunc(), Point::new(-2.0, 3.0));
    }

    #[test]
    fn line_length() {
        let line = Line::new(0.0, 0.0, 3.0, 4.0);
        assert_eq!(line.length(), 5.0);
        assert_eq!(line.midpoint(), Point::new(1.5, 2.0));
    }

    #[test]
    fn polygon_bbox() {
        let poly = Polygon::from_coords(&[(0.0, 0.0), (10.0, 0.0), (10.0, 5.0), (0.0, 5.0)]);
        let aabb = poly.bounding_box().unwrap();
        assert_eq!(aabb.width(), 10.0);
        assert_eq!(aabb.height(), 5.0);
        assert_eq!(aabb.center(), Point::new(5.0, 2.5));
    }

    #[test]
    fn empty_polygon_bbox() {
        assert_eq!(Polygon::default().bounding_box(), None);
        assert!(Aabb::empty().is_empty());
    }

    #[test]
    fn aabb_grow() {
        let mut aabb = square(100.0).bounding_box().unwrap();
        aabb.grow(10.0);
        assert_eq!(aabb.min_x, -10.0);
        assert_eq!(aabb.max_y, 110.0);
        assert_eq!(aabb.width(), 120.0);
        assert_eq!(aabb.center(), Point::new(50.0, 50.0));
    }

    #[test]
    fn aabb_diagonal() {
        let aabb = Polygon::from_coords(&[(0.0, 0.0), (3.0, 4.0)]).bounding_box().unwrap();
        assert_eq!(aabb.diagonal(), 5.0);
    }

    #[test]
    fn edges_start_with_closing_edge() {
        let poly = square(10.0);
        let edges: Vec<_> = poly.edges().collect();
        assert_eq!(edges.len(), 4);
        assert_eq!(edges[0], (Point::new(0.0, 10.0), Point::new(0.0, 0.0)));
        assert_eq!(edges[1], (Point::new(0.0, 0.0), Point::new(10.0, 0.0)));
        assert_eq!(edges[3], (Point::new(10.0, 10.0), Point::new(0.0, 10.0)));
    }

    #[test]
    fn farthest_pair_first_diagonal_wins() {
        // Both diagonals have the same length; the first one found is kept.
        let (a, b, len) = square(100.0).farthest_pair().unwrap();
        assert_eq!(a, Point::new(0.0, 0.0));
        assert_eq!(b, Point::new(100.0, 100.0));
        assert!((len - 100.0 * 2f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn farthest_pair_degenerate() {
        assert!(Polygon::default().farthest_pair().is_none());
        let single = Polygon::from_coords(&[(5.0, 5.0)]);
        assert!(single.farthest_pair().is_none());
        let repeated = Polygon::from_coords(&[(5.0, 5.0), (5.0, 5.0), (5.0, 5.0)]);
        assert!(repeated.farthest_pair().is_none());
    }
}
