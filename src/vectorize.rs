//! Turning a bitmap region into a glyph outline.

use kurbo::{Point, Rect};

use crate::trace::{self, Contour};
use crate::{BinaryMask, PathSink};

/// One contour of a [`GlyphOutline`], in glyph design space.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineContour {
    pub points: Vec<Point>,
    pub closed: bool,
}

/// Contours fitted into a glyph box, ready to be drawn with straight lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphOutline {
    contours: Vec<OutlineContour>,
}

impl GlyphOutline {
    pub fn contours(&self) -> &[OutlineContour] {
        &self.contours
    }

    /// Returns `true` if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.contours.is_empty()
    }

    /// The bounding box of every point, or `None` for an empty outline.
    pub fn bounding_box(&self) -> Option<Rect> {
        bounding_box(self.contours.iter().flat_map(|c| c.points.iter()))
    }

    /// Draws each contour as a move, a run of lines and, for closed contours,
    /// a close.
    pub fn draw(&self, sink: &mut impl PathSink) {
        for contour in &self.contours {
            let Some((first, rest)) = contour.points.split_first() else {
                continue;
            };
            sink.move_to(*first);
            for point in rest {
                sink.line_to(*point);
            }
            if contour.closed {
                sink.close_path();
            }
        }
    }
}

/// Traces `mask` and fits the result into a `width`×`height` glyph box.
pub fn vectorize(mask: &BinaryMask, width: f64, height: f64) -> GlyphOutline {
    fit(&trace::trace(mask), width, height)
}

/// Scales `contours` uniformly to the largest size that fits a
/// `width`×`height` box and centers them in it.
///
/// Contour points are in pixel space, with y growing downward; the box is
/// in design space with y growing upward, so the outline is mirrored
/// vertically inside the box. Every output coordinate lies in
/// `[0, width]`×`[0, height]`. Contour order and point order are kept.
pub fn fit(contours: &[Contour], width: f64, height: f64) -> GlyphOutline {
    let Some(bounds) = bounding_box(contours.iter().flat_map(|c| c.points().iter())) else {
        return GlyphOutline::default();
    };

    let scale_x = if bounds.width() > 0.0 { width / bounds.width() } else { f64::INFINITY };
    let scale_y = if bounds.height() > 0.0 { height / bounds.height() } else { f64::INFINITY };
    let scale = match scale_x.min(scale_y) {
        s if s.is_finite() => s,
        _ => 1.0,
    };
    let x_offset = (width - bounds.width() * scale) / 2.0;
    let y_offset = (height - bounds.height() * scale) / 2.0;

    let contours = contours
        .iter()
        .map(|contour| OutlineContour {
            points: contour
                .points()
                .iter()
                .map(|p| {
                    let x = (p.x - bounds.x0) * scale + x_offset;
                    let y = (p.y - bounds.y0) * scale + y_offset;
                    Point::new(x, height - y)
                })
                .collect(),
            closed: contour.is_closed(),
        })
        .collect();
    GlyphOutline { contours }
}

fn bounding_box<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Rect> {
    points.into_iter().fold(None, |acc: Option<Rect>, p| match acc {
        None => Some(Rect::from_points(*p, *p)),
        Some(rect) => Some(rect.union_pt(*p)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{BezPath, PathEl};

    const EPSILON: f64 = 1e-9;

    fn square_mask() -> BinaryMask {
        BinaryMask::from_fn(200, 200, |x, y| (75..125).contains(&x) && (75..125).contains(&y))
    }

    #[test]
    fn square_keeps_aspect_ratio() {
        let outline = vectorize(&square_mask(), 600.0, 700.0);
        let bounds = outline.bounding_box().unwrap();
        assert!((bounds.width() / bounds.height() - 1.0).abs() < EPSILON);
        // width limits: fills 600, centered vertically
        assert!((bounds.width() - 600.0).abs() < EPSILON);
        assert!((bounds.y0 - 50.0).abs() < EPSILON);
        assert!((bounds.y1 - 650.0).abs() < EPSILON);
    }

    #[test]
    fn rectangle_keeps_aspect_ratio() {
        let mask = BinaryMask::from_fn(100, 100, |x, y| (10..30).contains(&x) && (5..85).contains(&y));
        let outline = vectorize(&mask, 600.0, 500.0);
        let bounds = outline.bounding_box().unwrap();
        assert!((bounds.width() / bounds.height() - 20.0 / 80.0).abs() < EPSILON);
        assert!((bounds.height() - 500.0).abs() < EPSILON);
        assert!((bounds.x0 - (600.0 - bounds.width()) / 2.0).abs() < EPSILON);
    }

    #[test]
    fn output_stays_in_box() {
        let mask = BinaryMask::from_fn(60, 40, |x, y| (x * 3 + y * 7) % 13 < 5);
        let outline = vectorize(&mask, 600.0, 700.0);
        assert!(!outline.is_empty());
        for point in outline.contours().iter().flat_map(|c| c.points.iter()) {
            assert!((-EPSILON..=600.0 + EPSILON).contains(&point.x), "{point:?}");
            assert!((-EPSILON..=700.0 + EPSILON).contains(&point.y), "{point:?}");
        }
    }

    #[test]
    fn y_axis_points_up() {
        // a "T" without its left arm: wide bar on top of a narrow stem
        let mask = BinaryMask::from_fn(10, 10, |x, y| {
            ((2..8).contains(&x) && (1..3).contains(&y))
                || ((2..4).contains(&x) && (1..9).contains(&y))
        });
        let outline = vectorize(&mask, 100.0, 100.0);
        let bounds = outline.bounding_box().unwrap();
        assert!((bounds.y1 - 100.0).abs() < EPSILON);

        let points: Vec<_> =
            outline.contours().iter().flat_map(|c| c.points.iter().copied()).collect();
        // the bar's right end is high up, the lower half only holds the stem
        assert!(points.iter().any(|p| (p.x - 87.5).abs() < EPSILON && p.y > 50.0));
        assert!(points.iter().filter(|p| p.y < 50.0).all(|p| p.x <= 37.5 + EPSILON));
    }

    #[test]
    fn empty_mask_draws_nothing() {
        let outline = vectorize(&BinaryMask::new(200, 200), 600.0, 700.0);
        assert!(outline.is_empty());
        assert!(outline.bounding_box().is_none());
        let mut path = BezPath::new();
        outline.draw(&mut path);
        assert!(path.elements().is_empty());
    }

    #[test]
    fn closed_and_open_contours() {
        let closed = Contour::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 0.0),
        ]);
        let open = Contour::new(vec![Point::new(0.0, 6.0), Point::new(4.0, 8.0)]);
        let outline = fit(&[closed, open], 100.0, 100.0);

        let mut path = BezPath::new();
        outline.draw(&mut path);
        let closes = path.elements().iter().filter(|el| matches!(el, PathEl::ClosePath)).count();
        let moves = path.elements().iter().filter(|el| matches!(el, PathEl::MoveTo(_))).count();
        assert_eq!((moves, closes), (2, 1));
        assert_eq!(path.elements().len(), 4 + 1 + 2);
    }

    #[test]
    fn degenerate_extent_uses_other_axis() {
        let line = Contour::new(vec![Point::new(3.0, 1.0), Point::new(3.0, 11.0)]);
        let outline = fit(&[line], 600.0, 500.0);
        let bounds = outline.bounding_box().unwrap();
        assert_eq!(bounds.width(), 0.0);
        assert!((bounds.height() - 500.0).abs() < EPSILON);
        assert!((bounds.x0 - 300.0).abs() < EPSILON);

        let dot = Contour::new(vec![Point::new(3.0, 1.0)]);
        let outline = fit(&[dot], 600.0, 500.0);
        assert_eq!(outline.contours()[0].points, vec![Point::new(300.0, 250.0)]);
    }
}
