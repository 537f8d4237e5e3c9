//! Tracing ink boundaries into polylines.
//!
//! This is a marching squares pass over the mask, treating ink as 1.0 and
//! background as 0.0 and following the 0.5 iso-line. Every 2×2 block of
//! cells contributes up to two directed segments whose endpoints sit on the
//! block's edges; segments are oriented so ink is always on the same side,
//! which means a crossing point is the end of exactly one segment and the
//! start of exactly one other, except where a boundary leaves the mask.
//! Chaining segments head to tail gives the contours.

use std::collections::HashMap;

use kurbo::Point;

use crate::BinaryMask;

/// The iso-level traced between ink (1.0) and background (0.0).
const LEVEL: f64 = 0.5;

/// First and last points closer than this many pixels make a closed contour.
pub const CLOSE_TOLERANCE: f64 = 1.0;

/// A traced boundary in pixel coordinates (x = column, y = row).
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    points: Vec<Point>,
}

impl Contour {
    pub fn new(points: Vec<Point>) -> Self {
        Contour { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns `true` if the first and last points are within
    /// [`CLOSE_TOLERANCE`] of each other.
    ///
    /// Loops found by the tracer repeat their first point at the end;
    /// boundaries cut off by the mask edge are open.
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if self.points.len() > 1 => {
                first.distance(*last) < CLOSE_TOLERANCE
            }
            _ => false,
        }
    }
}

/// A cell edge the iso-line can cross.
///
/// `Horizontal(x, y)` joins cells `(x, y)` and `(x + 1, y)`;
/// `Vertical(x, y)` joins cells `(x, y)` and `(x, y + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Edge {
    Horizontal(u32, u32),
    Vertical(u32, u32),
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    from: Edge,
    to: Edge,
}

/// Traces every ink/background boundary in `mask`.
///
/// Contours are returned in the raster order of the block where they were
/// first reached, so identical masks always give identical output. A mask
/// without ink (or without background) has no contours.
pub fn trace(mask: &BinaryMask) -> Vec<Contour> {
    let segments = segments(mask);
    if segments.is_empty() {
        return Vec::new();
    }

    let mut starting_at = HashMap::with_capacity(segments.len());
    let mut ending_at = HashMap::with_capacity(segments.len());
    for (idx, seg) in segments.iter().enumerate() {
        starting_at.insert(seg.from, idx);
        ending_at.insert(seg.to, idx);
    }

    let mut used = vec![false; segments.len()];
    let mut contours = Vec::new();
    for seed in 0..segments.len() {
        if used[seed] {
            continue;
        }
        // walk back to the head of an open chain; a loop starts at the seed
        let mut head = seed;
        while let Some(&prev) = ending_at.get(&segments[head].from) {
            if prev == seed {
                head = seed;
                break;
            }
            if used[prev] {
                break;
            }
            head = prev;
        }

        let mut points = vec![edge_point(mask, segments[head].from)];
        let mut current = Some(head);
        while let Some(idx) = current.filter(|idx| !used[*idx]) {
            used[idx] = true;
            points.push(edge_point(mask, segments[idx].to));
            current = starting_at.get(&segments[idx].to).copied();
        }
        contours.push(Contour::new(points));
    }
    log::trace!("traced {} contours from {} segments", contours.len(), segments.len());
    contours
}

/// Builds the oriented segments of every 2×2 block, in raster order.
///
/// Walking along a segment, ink is on the left in `(x, y)` coordinates.
/// Blocks with ink only on one diagonal keep the two ink cells apart.
fn segments(mask: &BinaryMask) -> Vec<Segment> {
    let (width, height) = mask.dimensions();
    let mut segments = Vec::new();
    if width < 2 || height < 2 {
        return segments;
    }
    for y in 0..height - 1 {
        for x in 0..width - 1 {
            let top = Edge::Horizontal(x, y);
            let bottom = Edge::Horizontal(x, y + 1);
            let left = Edge::Vertical(x, y);
            let right = Edge::Vertical(x + 1, y);

            let case = u8::from(mask.is_ink(x, y))
                | u8::from(mask.is_ink(x + 1, y)) << 1
                | u8::from(mask.is_ink(x + 1, y + 1)) << 2
                | u8::from(mask.is_ink(x, y + 1)) << 3;

            let mut push = |from, to| segments.push(Segment { from, to });
            match case {
                0 | 15 => (),
                1 => push(top, left),
                2 => push(right, top),
                3 => push(right, left),
                4 => push(bottom, right),
                5 => {
                    push(top, left);
                    push(bottom, right);
                }
                6 => push(bottom, top),
                7 => push(bottom, left),
                8 => push(left, bottom),
                9 => push(top, bottom),
                10 => {
                    push(right, top);
                    push(left, bottom);
                }
                11 => push(right, bottom),
                12 => push(left, right),
                13 => push(top, right),
                14 => push(left, top),
                _ => unreachable!("case index has four bits"),
            }
        }
    }
    segments
}

/// The point where the iso-line crosses `edge`.
fn edge_point(mask: &BinaryMask, edge: Edge) -> Point {
    let value = |x, y| if mask.is_ink(x, y) { 1.0 } else { 0.0 };
    match edge {
        Edge::Horizontal(x, y) => {
            let t = interpolate(value(x, y), value(x + 1, y));
            Point::new(f64::from(x) + t, f64::from(y))
        }
        Edge::Vertical(x, y) => {
            let t = interpolate(value(x, y), value(x, y + 1));
            Point::new(f64::from(x), f64::from(y) + t)
        }
    }
}

fn interpolate(a: f64, b: f64) -> f64 {
    if a == b {
        return 0.5;
    }
    (LEVEL - a) / (b - a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: u32, x0: u32, y0: u32, side: u32) -> BinaryMask {
        BinaryMask::from_fn(size, size, |x, y| {
            (x0..x0 + side).contains(&x) && (y0..y0 + side).contains(&y)
        })
    }

    fn bounds(contour: &Contour) -> (f64, f64, f64, f64) {
        contour.points().iter().fold(
            (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
            |(x0, y0, x1, y1), p| (x0.min(p.x), y0.min(p.y), x1.max(p.x), y1.max(p.y)),
        )
    }

    #[test]
    fn empty_and_full_masks_have_no_contours() {
        assert!(trace(&BinaryMask::new(20, 20)).is_empty());
        assert!(trace(&BinaryMask::from_fn(20, 20, |_, _| true)).is_empty());
        assert!(trace(&BinaryMask::new(1, 1)).is_empty());
    }

    #[test]
    fn single_pixel_is_a_diamond() {
        let contours = trace(&square(5, 2, 2, 1));
        assert_eq!(contours.len(), 1);
        let contour = &contours[0];
        assert!(contour.is_closed());
        // four crossings plus the repeated first point
        assert_eq!(contour.len(), 5);
        assert_eq!(contour.points()[0], contour.points()[4]);
        assert_eq!(bounds(contour), (1.5, 1.5, 2.5, 2.5));
    }

    #[test]
    fn filled_square_bounds() {
        let contours = trace(&square(200, 75, 75, 50));
        assert_eq!(contours.len(), 1);
        assert!(contours[0].is_closed());
        assert_eq!(bounds(&contours[0]), (74.5, 74.5, 124.5, 124.5));
    }

    #[test]
    fn hole_makes_two_contours() {
        let ring = BinaryMask::from_fn(12, 12, |x, y| {
            let outer = (2..10).contains(&x) && (2..10).contains(&y);
            let inner = (5..7).contains(&x) && (5..7).contains(&y);
            outer && !inner
        });
        let contours = trace(&ring);
        assert_eq!(contours.len(), 2);
        assert!(contours.iter().all(Contour::is_closed));
        assert_eq!(bounds(&contours[0]), (1.5, 1.5, 9.5, 9.5));
        assert_eq!(bounds(&contours[1]), (4.5, 4.5, 6.5, 6.5));
    }

    #[test]
    fn diagonal_ink_stays_separate() {
        let mask = BinaryMask::from_fn(4, 4, |x, y| (x, y) == (1, 1) || (x, y) == (2, 2));
        let contours = trace(&mask);
        assert_eq!(contours.len(), 2);
        assert!(contours.iter().all(|c| c.is_closed() && c.len() == 5));
    }

    #[test]
    fn ink_touching_the_border_is_open() {
        // left third of the mask is ink, boundary runs top to bottom
        let mask = BinaryMask::from_fn(9, 6, |x, _| x < 3);
        let contours = trace(&mask);
        assert_eq!(contours.len(), 1);
        let contour = &contours[0];
        assert!(!contour.is_closed());
        assert_eq!(contour.len(), 6);
        assert!(contour.points().iter().all(|p| p.x == 2.5));
        assert_eq!(contour.points()[0].y, 0.0);
        assert_eq!(contour.points()[5].y, 5.0);
    }

    #[test]
    fn tracing_is_deterministic() {
        let mask = BinaryMask::from_fn(40, 30, |x, y| (x * x + y * 3) % 7 < 3);
        assert_eq!(trace(&mask), trace(&mask));
    }

    #[test]
    fn every_contour_is_connected() {
        let mask = BinaryMask::from_fn(40, 30, |x, y| (x * 5 + y * y) % 11 < 4);
        for contour in trace(&mask) {
            for pair in contour.points().windows(2) {
                // consecutive crossings lie on edges of the same block
                assert!((pair[0].x - pair[1].x).abs() <= 1.0);
                assert!((pair[0].y - pair[1].y).abs() <= 1.0);
            }
        }
    }
}
