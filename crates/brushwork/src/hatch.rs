//! Hatch filling: sweep a polygon with parallel brush strokes.
//!
//! The strokes run perpendicular to the polygon's longest vertex-to-vertex
//! chord and step along it, one `line_distance` apart. Each scanline is
//! clipped against the polygon; a scanline crossing it exactly twice becomes
//! one stroke.

use brushwork_core::{Color, Line, Point, Polygon, segment_polygon_intersections};
use serde::{Deserialize, Serialize};

use crate::canvas::LinearBuffer;
use crate::stroke::Stroker;

/// Spacing and reach of hatch strokes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HatchOptions {
    /// Distance between neighboring strokes.
    pub line_distance: f64,
    /// How far the scan area extends past the polygon's bounding box.
    pub margin: f64,
}

impl Default for HatchOptions {
    fn default() -> Self {
        Self {
            line_distance: 20.0,
            margin: 10.0,
        }
    }
}

impl HatchOptions {
    /// Slightly denser strokes.
    pub fn fast() -> Self {
        Self {
            line_distance: 16.0,
            ..Self::default()
        }
    }

    pub fn with_line_distance(mut self, line_distance: f64) -> Self {
        self.line_distance = line_distance;
        self
    }

    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }
}

/// Unit direction the strokes run in for `polygon`.
///
/// Perpendicular to the longest chord between two vertices, `(cy, -cx)`.
/// `None` when the polygon has no two distinct vertices.
pub fn hatch_direction(polygon: &Polygon) -> Option<Point> {
    let (a, b, len) = polygon.farthest_pair()?;
    let chord = b - a;
    Some(Point::new(chord.y / len, -chord.x / len))
}

/// `1` for positive values, `-1` for everything else (zero included).
#[inline]
fn sign_or_negative(v: f64) -> f64 {
    if v > 0.0 { 1.0 } else { -1.0 }
}

/// Fills polygons with hatch strokes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HatchFiller {
    options: HatchOptions,
}

impl HatchFiller {
    pub fn new(options: HatchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &HatchOptions {
        &self.options
    }

    /// The strokes that would fill `polygon`, in painting order.
    pub fn scanlines<'a>(&self, polygon: &'a Polygon) -> Scanlines<'a> {
        let line_distance = self.options.line_distance;
        if !(line_distance > 0.0) {
            return Scanlines::exhausted(polygon);
        }
        let Some(direction) = hatch_direction(polygon) else {
            return Scanlines::exhausted(polygon);
        };
        let Some(mut bounds) = polygon.bounding_box() else {
            return Scanlines::exhausted(polygon);
        };
        bounds.grow(self.options.margin);

        // Start in the corner behind the first scanline, half a step in.
        let step = Point::new(-direction.y, direction.x) * line_distance;
        let corner = bounds.center()
            + Point::new(
                sign_or_negative(direction.y) * bounds.width() / 2.0,
                sign_or_negative(-direction.x) * bounds.height() / 2.0,
            );
        let diagonal = bounds.diagonal();

        Scanlines {
            polygon,
            position: (corner + step * 0.5).trunc(),
            step,
            reach: direction * diagonal,
            iteration: 0,
            max_iterations: (diagonal / line_distance).ceil() as usize,
            drawn: false,
            done: false,
        }
    }

    /// Paint `polygon` with `brush`, returning the number of strokes.
    pub fn fill<S: Stroker + ?Sized>(
        &self,
        buffer: &mut LinearBuffer,
        brush: &mut S,
        color: Option<Color>,
        polygon: &Polygon,
    ) -> usize {
        let mut strokes = 0;
        for line in self.scanlines(polygon) {
            brush.stroke(buffer, line.start(), line.end(), color);
            strokes += 1;
        }
        strokes
    }

    /// Paint every `(polygon, color)` cell in order with one brush.
    pub fn fill_all<'a, S, I>(&self, buffer: &mut LinearBuffer, brush: &mut S, cells: I) -> usize
    where
        S: Stroker + ?Sized,
        I: IntoIterator<Item = (&'a Polygon, Option<Color>)>,
    {
        let mut cell_count = 0;
        let strokes: usize = cells
            .into_iter()
            .map(|(polygon, color)| {
                cell_count += 1;
                self.fill(buffer, brush, color, polygon)
            })
            .sum();
        log::debug!("filled {cell_count} cells with {strokes} strokes");
        strokes
    }
}

/// Iterator over the hatch strokes of one polygon.
///
/// ## Rust Lesson #27: Lazy Iterators
///
/// Nothing is computed until `next()` is called. A caller that only wants
/// the first stroke, or just wants to count them, never paints anything and
/// never clips more scanlines than it consumes.
#[derive(Debug, Clone)]
pub struct Scanlines<'a> {
    polygon: &'a Polygon,
    position: Point,
    step: Point,
    /// Half of the scan segment: the stroke direction scaled to the scan diagonal.
    reach: Point,
    iteration: usize,
    max_iterations: usize,
    drawn: bool,
    done: bool,
}

impl<'a> Scanlines<'a> {
    fn exhausted(polygon: &'a Polygon) -> Self {
        Self {
            polygon,
            position: Point::default(),
            step: Point::default(),
            reach: Point::default(),
            iteration: 0,
            max_iterations: 0,
            drawn: false,
            done: true,
        }
    }
}

impl Iterator for Scanlines<'_> {
    type Item = Line;

    fn next(&mut self) -> Option<Line> {
        while !self.done {
            if self.iteration > self.max_iterations {
                log::warn!(
                    "hatch scan gave up after {} scanlines on a {}-vertex polygon",
                    self.iteration,
                    self.polygon.len()
                );
                self.done = true;
                break;
            }
            self.iteration += 1;

            let hits = segment_polygon_intersections(
                self.position - self.reach,
                self.position + self.reach,
                self.polygon,
            );
            self.position = self.position + self.step;

            if let [a, b] = hits[..] {
                self.drawn = true;
                return Some(Line::from_points(a, b));
            }
            // Past the far side of the polygon
            if self.drawn {
                self.done = true;
            }
        }
        None
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Records strokes instead of painting them.
    #[derive(Default)]
    struct Recorder {
        strokes: Vec<(Point, Point, Option<Color>)>,
    }

    impl Stroker for Recorder {
        fn stroke(&mut self, _buffer: &mut LinearBuffer, from: Point, to: Point, color: Option<Color>) {
            self.strokes.push((from, to, color));
        }
    }

    fn square() -> Polygon {
        Polygon::from_coords(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)])
    }

    fn on_square_boundary(p: Point) -> bool {
        let near = |a: f64, b: f64| (a - b).abs() < 1e-9;
        let inside = |v: f64| (-1e-9..=100.0 + 1e-9).contains(&v);
        inside(p.x) && inside(p.y) && (near(p.x, 0.0) || near(p.x, 100.0) || near(p.y, 0.0) || near(p.y, 100.0))
    }

    #[test]
    fn options_defaults() {
        let opts = HatchOptions::default();
        assert_eq!(opts.line_distance, 20.0);
        assert_eq!(opts.margin, 10.0);
        assert_eq!(HatchOptions::fast().line_distance, 16.0);
        assert_eq!(HatchOptions::fast().margin, 10.0);
    }

    #[test]
    fn partial_options_from_json() {
        let opts: HatchOptions = serde_json::from_str(r#"{"margin": 4}"#).unwrap();
        assert_eq!(opts, HatchOptions::default().with_margin(4.0));
    }

    #[test]
    fn direction_is_perpendicular_to_longest_chord() {
        let dir = hatch_direction(&square()).unwrap();
        let h = std::f64::consts::FRAC_1_SQRT_2;
        assert!((dir.x - h).abs() < 1e-12);
        assert!((dir.y + h).abs() < 1e-12);

        let wide = Polygon::from_coords(&[(0.0, 0.0), (50.0, 0.0), (100.0, 0.0), (50.0, 1.0)]);
        let dir = hatch_direction(&wide).unwrap();
        assert_eq!(dir, Point::new(0.0, -1.0));
    }

    #[test]
    fn degenerate_polygons_have_no_direction() {
        assert_eq!(hatch_direction(&Polygon::default()), None);
        assert_eq!(hatch_direction(&Polygon::from_coords(&[(3.0, 3.0)])), None);
        assert_eq!(hatch_direction(&Polygon::from_coords(&[(3.0, 3.0), (3.0, 3.0)])), None);
    }

    #[test]
    fn square_gets_seven_strokes() {
        let filler = HatchFiller::default();
        let lines: Vec<Line> = filler.scanlines(&square()).collect();
        assert_eq!(lines.len(), 7);
        for line in &lines {
            assert!(on_square_boundary(line.start()));
            assert!(on_square_boundary(line.end()));
        }
    }

    #[test]
    fn square_strokes_are_evenly_spaced_along_the_chord() {
        let filler = HatchFiller::default();
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let along = |p: Point| p.x * h + p.y * h;

        let positions: Vec<f64> = filler.scanlines(&square()).map(|l| along(l.midpoint())).collect();
        for pair in positions.windows(2) {
            assert!((pair[1] - pair[0] - 20.0).abs() < 1e-6);
        }
        // The strokes span the square corner to corner
        assert!(positions[0] < 20.0);
        assert!(*positions.last().unwrap() > along(Point::new(100.0, 100.0)) - 20.0);
    }

    #[test]
    fn fast_options_give_more_strokes() {
        let normal = HatchFiller::default().scanlines(&square()).count();
        let fast = HatchFiller::new(HatchOptions::fast()).scanlines(&square()).count();
        assert_eq!(fast, 8);
        assert!(fast > normal);
    }

    #[test]
    fn fill_passes_strokes_and_color_to_brush() {
        let filler = HatchFiller::default();
        let mut buf = LinearBuffer::new(4, 4);
        let mut brush = Recorder::default();
        let color = Some(Color::new(10.0, 20.0, 30.0));

        let count = filler.fill(&mut buf, &mut brush, color, &square());
        assert_eq!(count, 7);
        assert_eq!(brush.strokes.len(), 7);
        assert!(brush.strokes.iter().all(|&(_, _, c)| c == color));

        let expected: Vec<Line> = filler.scanlines(&square()).collect();
        for (line, &(from, to, _)) in expected.iter().zip(&brush.strokes) {
            assert_eq!((line.start(), line.end()), (from, to));
        }
    }

    #[test]
    fn degenerate_polygon_draws_nothing() {
        let filler = HatchFiller::default();
        let mut buf = LinearBuffer::new(4, 4);
        let mut brush = Recorder::default();
        let point = Polygon::from_coords(&[(1.0, 1.0), (1.0, 1.0), (1.0, 1.0)]);
        assert_eq!(filler.fill(&mut buf, &mut brush, None, &point), 0);
        assert_eq!(filler.fill(&mut buf, &mut brush, None, &Polygon::default()), 0);
        assert!(brush.strokes.is_empty());
    }

    #[test]
    fn scan_is_capped_when_no_line_crosses_twice() {
        // Doubled-back edges: every scanline hits four times
        let folded = Polygon::from_coords(&[(0.0, 0.0), (100.0, 0.0), (0.0, 0.0), (100.0, 0.0)]);
        let filler = HatchFiller::default();
        assert_eq!(filler.scanlines(&folded).count(), 0);
    }

    #[test]
    fn non_positive_distance_draws_nothing() {
        let filler = HatchFiller::new(HatchOptions::default().with_line_distance(0.0));
        assert_eq!(filler.scanlines(&square()).count(), 0);
    }

    #[test]
    fn triangle_strokes_stay_on_its_edges() {
        let tri = Polygon::from_coords(&[(10.0, 10.0), (90.0, 20.0), (40.0, 80.0)]);
        let lines: Vec<Line> = HatchFiller::default().scanlines(&tri).collect();
        assert!(!lines.is_empty());
        let bounds = tri.bounding_box().unwrap();
        for line in lines {
            for p in [line.start(), line.end()] {
                assert!(p.x >= bounds.min_x - 1e-9 && p.x <= bounds.max_x + 1e-9);
                assert!(p.y >= bounds.min_y - 1e-9 && p.y <= bounds.max_y + 1e-9);
            }
        }
    }

    #[test]
    fn fill_all_sums_strokes() {
        let filler = HatchFiller::default();
        let mut buf = LinearBuffer::new(4, 4);
        let mut brush = Recorder::default();
        let a = square();
        let b = Polygon::default();
        let total = filler.fill_all(&mut buf, &mut brush, [(&a, None), (&b, None), (&a, Some(Color::WHITE))]);
        assert_eq!(total, 14);
        assert_eq!(brush.strokes.len(), 14);
        assert_eq!(brush.strokes[7].2, Some(Color::WHITE));
    }
}
