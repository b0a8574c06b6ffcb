//! Integer line stepping (Bresenham) and clipping to the paintable area.

use brushwork_core::{Aabb, Line};

/// Iterator over the integer positions of a line, both endpoints included.
///
/// Every item is one "step" of a stroke: the brush visits these positions
/// in order and paints all of its bristles at each of them.
///
/// Coordinates are `i64`; the endpoints must be less than `i64::MAX / 2`
/// apart on each axis. Clip with [`clip_line`] first when they may not be.
#[derive(Debug, Clone)]
pub struct LineSteps {
    x: i64,
    y: i64,
    x1: i64,
    y1: i64,
    dx: i64,
    dy: i64,
    sx: i64,
    sy: i64,
    err: i64,
    done: bool,
}

impl LineSteps {
    pub fn new(x0: i64, y0: i64, x1: i64, y1: i64) -> Self {
        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        Self {
            x: x0,
            y: y0,
            x1,
            y1,
            dx,
            dy,
            sx: if x0 < x1 { 1 } else { -1 },
            sy: if y0 < y1 { 1 } else { -1 },
            err: dx - dy,
            done: false,
        }
    }
}

impl Iterator for LineSteps {
    type Item = (i64, i64);

    fn next(&mut self) -> Option<(i64, i64)> {
        if self.done {
            return None;
        }

        let current = (self.x, self.y);
        if self.x == self.x1 && self.y == self.y1 {
            self.done = true;
            return Some(current);
        }

        let e2 = 2 * self.err;
        if e2 > -self.dy {
            self.err -= self.dy;
            self.x += self.sx;
        }
        if e2 < self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }

        Some(current)
    }
}

/// Number of steps a [`LineSteps`] over `line`'s truncated endpoints yields.
///
/// Computed in `f64`, so it is safe for endpoints of any magnitude; the
/// result saturates at `u32::MAX`.
pub fn step_count(line: &Line) -> u32 {
    let dx = (line.x2.trunc() - line.x1.trunc()).abs();
    let dy = (line.y2.trunc() - line.y1.trunc()).abs();
    (dx.max(dy) + 1.0) as u32
}

/// Clip `line` to `bounds` (Liang-Barsky), keeping its direction.
///
/// Endpoints already inside `bounds` are returned unchanged, bit for bit.
/// `None` when the line misses the box.
pub fn clip_line(line: Line, bounds: &Aabb) -> Option<Line> {
    let (dx, dy) = (line.x2 - line.x1, line.y2 - line.y1);
    let mut t0: f64 = 0.0;
    let mut t1: f64 = 1.0;

    for (p, q) in [
        (-dx, line.x1 - bounds.min_x),
        (dx, bounds.max_x - line.x1),
        (-dy, line.y1 - bounds.min_y),
        (dy, bounds.max_y - line.y1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let start = if t0 > 0.0 { (line.x1 + t0 * dx, line.y1 + t0 * dy) } else { (line.x1, line.y1) };
    let end = if t1 < 1.0 { (line.x1 + t1 * dx, line.y1 + t1 * dy) } else { (line.x2, line.y2) };
    Some(Line::new(start.0, start.1, end.0, end.1))
}
