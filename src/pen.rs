//! The drawing interface shared by every outline producer.

use kurbo::{BezPath, Point};

/// Something that accepts segment-oriented drawing commands.
///
/// This mirrors the fontTools "pen" protocol. Shape generators and the
/// vectorizer only ever talk to a `PathSink`, so they can draw into a UFO
/// glyph ([`GlyphPen`](crate::GlyphPen)) or into a [`BezPath`] for
/// inspection.
pub trait PathSink {
    /// Starts a new subpath at `p`.
    fn move_to(&mut self, p: Point);
    /// Draws a straight line to `p`.
    fn line_to(&mut self, p: Point);
    /// Draws a cubic Bézier to `p` with control points `c1` and `c2`.
    fn curve_to(&mut self, c1: Point, c2: Point, p: Point);
    /// Closes the current subpath.
    fn close_path(&mut self);
}

impl PathSink for BezPath {
    fn move_to(&mut self, p: Point) {
        BezPath::move_to(self, p)
    }

    fn line_to(&mut self, p: Point) {
        BezPath::line_to(self, p)
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        BezPath::curve_to(self, c1, c2, p)
    }

    fn close_path(&mut self) {
        BezPath::close_path(self)
    }
}

impl<T: PathSink + ?Sized> PathSink for &mut T {
    fn move_to(&mut self, p: Point) {
        (**self).move_to(p)
    }

    fn line_to(&mut self, p: Point) {
        (**self).line_to(p)
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        (**self).curve_to(c1, c2, p)
    }

    fn close_path(&mut self) {
        (**self).close_path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    fn triangle(sink: &mut impl PathSink) {
        sink.move_to(Point::new(0.0, 0.0));
        sink.line_to(Point::new(10.0, 0.0));
        sink.curve_to(Point::new(10.0, 5.0), Point::new(5.0, 10.0), Point::new(0.0, 10.0));
        sink.close_path();
    }

    #[test]
    fn bezpath_records_commands() {
        let mut path = BezPath::new();
        triangle(&mut path);
        assert_eq!(
            path.elements(),
            &[
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::LineTo(Point::new(10.0, 0.0)),
                PathEl::CurveTo(Point::new(10.0, 5.0), Point::new(5.0, 10.0), Point::new(0.0, 10.0)),
                PathEl::ClosePath,
            ]
        );
    }

    #[test]
    fn borrowed_sinks_forward() {
        let mut path = BezPath::new();
        let mut borrowed = &mut path;
        triangle(&mut borrowed);
        assert_eq!(path.elements().len(), 4);
    }
}
