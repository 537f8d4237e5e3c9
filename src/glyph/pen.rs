//! A segment pen that draws into a glyph.
//!
//! [`GlyphPen`] takes the move/line/curve/close commands of a [fontTools pen]
//! and stores them the way a glif does: as point lists where closed contours
//! have no move point and start at their first on-curve point.
//!
//! [fontTools pen]: https://fonttools.readthedocs.io/en/latest/pens/basePen.html

use kurbo::Point;

use super::{Contour, ContourPoint, Glyph, PointType};
use crate::PathSink;

/// A [`PathSink`] appending contours to a [`Glyph`].
///
/// A path left open when the next one starts, or when the pen is dropped, is
/// kept as an open contour. A lone move draws nothing.
#[derive(Debug)]
pub struct GlyphPen<'a> {
    glyph: &'a mut Glyph,
    scratch_contour: Option<Contour>,
}

impl<'a> GlyphPen<'a> {
    pub(crate) fn new(glyph: &'a mut Glyph) -> Self {
        GlyphPen { glyph, scratch_contour: None }
    }

    /// Keeps the path being drawn as an open contour.
    pub fn end_path(&mut self) {
        if let Some(contour) = self.scratch_contour.take() {
            if contour.points.len() > 1 {
                self.glyph.contours.push(contour);
            }
        }
    }

    /// The contour being drawn. A segment without a preceding move starts a
    /// path at `start` instead of drawing from nowhere.
    fn current_contour(&mut self, start: Point) -> &mut Contour {
        self.scratch_contour.get_or_insert_with(|| {
            log::warn!("segment drawn without a move, starting the path at {start:?}");
            Contour::new(vec![ContourPoint::at(start, PointType::Move)])
        })
    }
}

impl PathSink for GlyphPen<'_> {
    fn move_to(&mut self, p: Point) {
        self.end_path();
        self.scratch_contour = Some(Contour::new(vec![ContourPoint::at(p, PointType::Move)]));
    }

    fn line_to(&mut self, p: Point) {
        if self.scratch_contour.is_none() {
            // the line has no start, so only its end point is kept
            self.current_contour(p);
            return;
        }
        let contour = self.current_contour(p);
        contour.points.push(ContourPoint::at(p, PointType::Line));
    }

    fn curve_to(&mut self, c1: Point, c2: Point, p: Point) {
        let contour = self.current_contour(c1);
        contour.points.push(ContourPoint::at(c1, PointType::OffCurve));
        contour.points.push(ContourPoint::at(c2, PointType::OffCurve));
        contour.points.push(ContourPoint::at(p, PointType::Curve));
    }

    /// Closes the current path.
    ///
    /// If the path ends where it started, the final point is merged into the
    /// first one, which takes over its segment type.
    fn close_path(&mut self) {
        let Some(mut contour) = self.scratch_contour.take() else {
            return;
        };
        let points = &mut contour.points;
        let returns_to_start = points.len() > 1
            && points.first().map(ContourPoint::to_point)
                == points.last().map(ContourPoint::to_point);
        if returns_to_start {
            if let Some(last) = points.pop() {
                points[0].typ = last.typ;
            }
        } else {
            points[0].typ = PointType::Line;
        }
        self.glyph.contours.push(contour);
    }
}

impl Drop for GlyphPen<'_> {
    fn drop(&mut self) {
        self.end_path();
    }
}
