//! The seam between hatch filling and brushes.

use brushwork_core::{Color, Point};

use crate::canvas::LinearBuffer;

/// Anything that can paint a stroke between two points.
///
/// `color` is advisory. The stamp brush re-inks in it when it runs out;
/// the bristle brush always re-soaks from its noise field and ignores it.
pub trait Stroker {
    fn stroke(&mut self, buffer: &mut LinearBuffer, from: Point, to: Point, color: Option<Color>);
}

impl<S: Stroker + ?Sized> Stroker for &mut S {
    #[inline]
    fn stroke(&mut self, buffer: &mut LinearBuffer, from: Point, to: Point, color: Option<Color>) {
        (**self).stroke(buffer, from, to, color);
    }
}
