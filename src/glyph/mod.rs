//! Glyph outlines in the shape they take inside a glif file.

mod pen;
mod serialize;

use std::path::Path;

use indexmap::IndexSet;
use kurbo::Point;

use crate::error::GlifWriteError;
use crate::PathSink;

pub use pen::GlyphPen;

/// One named outline of a [`Font`](crate::Font), written out as glif
/// format 2 ([reference][glif]).
///
/// [glif]: http://unifiedfontobject.org/versions/ufo3/glyphs/glif/
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    name: String,
    /// Horizontal advance in font units.
    pub width: f64,
    /// Characters mapped to this glyph, in insertion order. The first one is
    /// the primary mapping.
    pub codepoints: IndexSet<char>,
    /// Free-form text stored alongside the outline.
    pub note: Option<String>,
    pub contours: Vec<Contour>,
}

impl Glyph {
    /// Creates a glyph called `name` with no outline, codepoints or width.
    ///
    /// # Panics
    ///
    /// If `name` is empty or holds a control character, neither of which a
    /// UFO allows in glyph names.
    pub fn new(name: &str) -> Self {
        assert!(
            !name.is_empty() && !name.chars().any(char::is_control),
            "invalid glyph name {name:?}"
        );
        Glyph {
            name: name.to_owned(),
            width: 0.0,
            codepoints: IndexSet::new(),
            note: None,
            contours: vec![],
        }
    }

    /// The name this glyph is stored under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a pen that appends contours to this glyph.
    ///
    /// The last open path is added when the pen is dropped.
    pub fn pen(&mut self) -> GlyphPen<'_> {
        GlyphPen::new(self)
    }

    /// Draws every contour into `sink`.
    pub fn draw(&self, sink: &mut impl PathSink) {
        self.contours.iter().for_each(|contour| contour.draw(sink));
    }

    pub(crate) fn save(&self, path: &Path) -> Result<(), GlifWriteError> {
        let data = self.encode_xml()?;
        close_already::fs::write(path, data)?;
        Ok(())
    }
}

/// One path of a glyph, as the points glif stores for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    pub points: Vec<ContourPoint>,
}

impl Contour {
    pub fn new(points: Vec<ContourPoint>) -> Self {
        Contour { points }
    }

    /// `false` only for a path whose first point is a `move`.
    pub fn is_closed(&self) -> bool {
        !matches!(self.points.first(), Some(pt) if pt.typ == PointType::Move)
    }

    /// Draws the contour into `sink` as segments.
    ///
    /// A closed contour starts at its last on-curve point, so that trailing
    /// off-curve points are drawn with the segment they belong to.
    pub fn draw(&self, sink: &mut impl PathSink) {
        let len = self.points.len();
        let closed = self.is_closed();
        let start = if closed {
            match self.points.iter().rposition(|pt| pt.typ != PointType::OffCurve) {
                Some(idx) => idx,
                None => return,
            }
        } else {
            0
        };
        let Some(first) = self.points.get(start) else {
            return;
        };

        sink.move_to(first.to_point());
        let mut offs: Vec<Point> = Vec::new();
        let points = self.points.iter().cycle().skip(start + 1).take(len - 1);
        // a closing line is implied by the close
        let closing = (closed && first.typ == PointType::Curve).then_some(first);
        for pt in points.chain(closing) {
            match pt.typ {
                PointType::OffCurve => offs.push(pt.to_point()),
                PointType::Line | PointType::Move => sink.line_to(pt.to_point()),
                PointType::Curve => match offs.as_slice() {
                    [c1, c2] => sink.curve_to(*c1, *c2, pt.to_point()),
                    [] => sink.line_to(pt.to_point()),
                    other => {
                        log::warn!("curve with {} off-curve points drawn as a line", other.len());
                        sink.line_to(pt.to_point());
                    }
                },
            }
            if pt.typ != PointType::OffCurve {
                offs.clear();
            }
        }
        if closed {
            sink.close_path();
        }
    }
}

/// A point of a [`Contour`] in font units, y up.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourPoint {
    pub x: f64,
    pub y: f64,
    pub typ: PointType,
    /// Tangent continuity through an on-curve point. Never set on
    /// `offcurve` points.
    pub smooth: bool,
}

impl ContourPoint {
    pub fn new(x: f64, y: f64, typ: PointType, smooth: bool) -> Self {
        ContourPoint { x, y, typ, smooth }
    }

    pub(crate) fn at(point: Point, typ: PointType) -> Self {
        ContourPoint::new(point.x, point.y, typ, false)
    }

    pub fn to_point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// The glif `type` of a [`ContourPoint`].
///
/// Only cubic outlines are generated, so there is no `qcurve`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointType {
    /// Start of an open contour. Only valid as the first point.
    Move,
    /// End of a straight segment.
    Line,
    /// Control point of the next `curve`.
    OffCurve,
    /// End of a cubic segment whose two control points precede it.
    Curve,
}

impl PointType {
    /// The value of the glif `type` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            PointType::Move => "move",
            PointType::Line => "line",
            PointType::OffCurve => "offcurve",
            PointType::Curve => "curve",
        }
    }
}

impl std::fmt::Display for PointType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
