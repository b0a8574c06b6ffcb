//! Curve flattening for stroke paths.
//!
//! A stroke is a cubic Bézier; the brush can only rasterize straight
//! segments. lyon_geom does the flattening, this module adapts the
//! tolerance convention and guarantees the segments join up.

use brushwork_core::{Line, Point};
use lyon_geom::{CubicBezierSegment, point};

/// Approximation scale used for stroke paths.
///
/// The scale is the number of device pixels per curve unit; the distance
/// tolerance is half a device pixel, expressed in curve units.
pub const STROKE_APPROXIMATION_SCALE: f64 = 0.2;

/// Distance tolerance matching an approximation scale.
#[inline]
pub fn tolerance_for_scale(approximation_scale: f64) -> f64 {
    0.5 / approximation_scale
}

/// A cubic Bézier from `from` to `to` with two control points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cubic {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

impl Cubic {
    pub fn new(from: Point, ctrl1: Point, ctrl2: Point, to: Point) -> Self {
        Self { from, ctrl1, ctrl2, to }
    }

    /// Evaluate the curve at `t` in `[0, 1]`.
    pub fn sample(&self, t: f64) -> Point {
        let curve = self.to_lyon();
        let p = curve.sample(t);
        Point::new(p.x, p.y)
    }

    fn to_lyon(&self) -> CubicBezierSegment<f64> {
        CubicBezierSegment {
            from: point(self.from.x, self.from.y),
            ctrl1: point(self.ctrl1.x, self.ctrl1.y),
            ctrl2: point(self.ctrl2.x, self.ctrl2.y),
            to: point(self.to.x, self.to.y),
        }
    }

    /// Flatten into line segments, calling `consumer` once per segment in
    /// path order.
    ///
    /// If one segment does not start where the previous one ended, an extra
    /// connecting segment is emitted first so the path never has gaps.
    pub fn for_each_segment<F>(&self, approximation_scale: f64, mut consumer: F)
    where
        F: FnMut(Line),
    {
        let mut prev_end: Option<Point> = None;
        self.to_lyon().for_each_flattened(
            tolerance_for_scale(approximation_scale),
            &mut |segment| {
                let start = Point::new(segment.from.x, segment.from.y);
                let end = Point::new(segment.to.x, segment.to.y);
                if let Some(prev) = prev_end.filter(|&prev| prev != start) {
                    consumer(Line::from_points(prev, start));
                }
                consumer(Line::from_points(start, end));
                prev_end = Some(end);
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(cubic: &Cubic, scale: f64) -> Vec<Line> {
        let mut lines = Vec::new();
        cubic.for_each_segment(scale, |l| lines.push(l));
        lines
    }

    #[test]
    fn tolerance_from_scale() {
        assert_eq!(tolerance_for_scale(STROKE_APPROXIMATION_SCALE), 2.5);
        assert_eq!(tolerance_for_scale(1.0), 0.5);
    }

    #[test]
    fn straight_curve_stays_on_its_line() {
        let cubic = Cubic::new(
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(20.0, 0.0),
            Point::new(30.0, 0.0),
        );
        let lines = collect(&cubic, STROKE_APPROXIMATION_SCALE);
        assert!(!lines.is_empty());
        assert_eq!(lines[0].start(), Point::new(0.0, 0.0));
        assert!(lines.last().unwrap().end().distance(Point::new(30.0, 0.0)) < 1e-9);
        assert!(lines.iter().all(|l| l.y1.abs() < 1e-9 && l.y2.abs() < 1e-9));
    }

    #[test]
    fn segments_are_continuous_and_end_at_curve_end() {
        let cubic = Cubic::new(
            Point::new(0.0, 0.0),
            Point::new(0.0, 100.0),
            Point::new(100.0, 100.0),
            Point::new(100.0, 0.0),
        );
        let lines = collect(&cubic, STROKE_APPROXIMATION_SCALE);
        assert!(lines.len() > 1);
        assert!(lines[0].start().distance(cubic.from) < 1e-9);
        let last = lines.last().unwrap().end();
        assert!(last.distance(cubic.to) < 1e-9);
        for pair in lines.windows(2) {
            assert!(pair[0].end().distance(pair[1].start()) < 1e-9);
        }
    }

    #[test]
    fn finer_scale_gives_more_segments() {
        let cubic = Cubic::new(
            Point::new(0.0, 0.0),
            Point::new(0.0, 100.0),
            Point::new(100.0, 100.0),
            Point::new(100.0, 0.0),
        );
        let coarse = collect(&cubic, STROKE_APPROXIMATION_SCALE);
        let fine = collect(&cubic, 4.0);
        assert!(fine.len() > coarse.len());
    }

    #[test]
    fn sample_endpoints() {
        let cubic = Cubic::new(
            Point::new(1.0, 2.0),
            Point::new(5.0, 9.0),
            Point::new(7.0, -3.0),
            Point::new(10.0, 4.0),
        );
        assert!(cubic.sample(0.0).distance(cubic.from) < 1e-12);
        assert!(cubic.sample(1.0).distance(cubic.to) < 1e-12);
    }
}
