//! Procedural glyph art: circles, stroked lines and polygons.
//!
//! Each shape family draws from its own generator, created fresh from the
//! character's seed (see [`char_rng`]). A glyph therefore looks the same
//! whatever order characters are generated in, and adding a family does not
//! change the shapes of the others.

use std::f64::consts::TAU;

use kurbo::{Point, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::FontMetrics;
use crate::sample::char_rng;
use crate::PathSink;

/// Control point distance, relative to the radius, for a quarter circle
/// drawn as a cubic Bézier.
pub const BEZIER_CIRCLE_RATIO: f64 = 0.552284749831;

/// No circle is drawn with a larger radius than this.
pub const MAX_RADIUS: i64 = 200;

/// The broad shape category of a character.
///
/// The class fixes where shapes are placed vertically and how large they
/// are drawn, and which height an extracted outline is fitted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    Uppercase,
    Lowercase,
    Digit,
    Symbol,
}

/// A vertical range in design units, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub bottom: i64,
    pub top: i64,
}

impl CharacterClass {
    pub fn of(ch: char) -> Self {
        if ch.is_alphabetic() && ch.is_uppercase() {
            CharacterClass::Uppercase
        } else if ch.is_alphabetic() && ch.is_lowercase() {
            CharacterClass::Lowercase
        } else if ch.is_numeric() {
            CharacterClass::Digit
        } else {
            CharacterClass::Symbol
        }
    }

    /// The vertical range shape anchors are placed in.
    pub fn band(self, metrics: &FontMetrics) -> Band {
        match self {
            CharacterClass::Uppercase => Band { bottom: 200, top: metrics.cap_height.into() },
            CharacterClass::Lowercase => Band { bottom: 100, top: metrics.x_height.into() },
            CharacterClass::Digit => Band { bottom: 150, top: 650 },
            CharacterClass::Symbol => Band { bottom: 150, top: 550 },
        }
    }

    /// The radius a circle is drawn at before random variation.
    pub fn base_radius(self, metrics: &FontMetrics) -> f64 {
        match self {
            CharacterClass::Uppercase => f64::from(metrics.cap_height) / 5.0,
            CharacterClass::Lowercase => f64::from(metrics.x_height) / 5.0,
            CharacterClass::Digit => 100.0,
            CharacterClass::Symbol => 80.0,
        }
    }

    /// The stroke width a line is drawn at before random variation.
    pub fn base_stroke(self) -> f64 {
        match self {
            CharacterClass::Uppercase => 25.0,
            CharacterClass::Lowercase => 20.0,
            CharacterClass::Digit => 22.0,
            CharacterClass::Symbol => 18.0,
        }
    }

    /// The height of the box an extracted outline is fitted into.
    pub fn extraction_height(self, metrics: &FontMetrics) -> u32 {
        match self {
            CharacterClass::Uppercase | CharacterClass::Digit => metrics.cap_height,
            CharacterClass::Lowercase | CharacterClass::Symbol => metrics.x_height,
        }
    }
}

/// How many shapes of each family go into one glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[serde(rename_all = "camelCase")]
pub struct ShapeCounts {
    pub circles: usize,
    pub lines: usize,
    pub polygons: usize,
}

impl Default for ShapeCounts {
    fn default() -> Self {
        ShapeCounts { circles: 3, lines: 4, polygons: 0 }
    }
}

/// Draws a closed circle as four cubic quadrants, starting at the rightmost
/// point and going clockwise.
pub fn draw_circle(sink: &mut impl PathSink, center: Point, radius: f64) {
    let c = BEZIER_CIRCLE_RATIO * radius;
    let at = |dx: f64, dy: f64| center + Vec2::new(dx, dy);

    sink.move_to(at(radius, 0.0));
    sink.curve_to(at(radius, -c), at(c, -radius), at(0.0, -radius));
    sink.curve_to(at(-c, -radius), at(-radius, -c), at(-radius, 0.0));
    sink.curve_to(at(-radius, c), at(-c, radius), at(0.0, radius));
    sink.curve_to(at(c, radius), at(radius, c), at(radius, 0.0));
    sink.close_path();
}

/// Draws the rectangle covering a line from `from` to `to` drawn `width`
/// units wide.
pub fn draw_stroked_line(sink: &mut impl PathSink, from: Point, to: Point, width: f64) {
    let angle = (to - from).atan2();
    let offset = Vec2::from_angle(angle + std::f64::consts::FRAC_PI_2) * (width / 2.0);

    sink.move_to(from + offset);
    sink.line_to(to + offset);
    sink.line_to(to - offset);
    sink.line_to(from - offset);
    sink.close_path();
}

/// Draws a closed regular polygon whose first vertex is at `rotation`
/// radians from the positive x axis.
pub fn draw_polygon(
    sink: &mut impl PathSink,
    center: Point,
    radius: f64,
    sides: usize,
    rotation: f64,
) {
    if sides < 3 {
        return;
    }
    let step = TAU / sides as f64;
    let vertex = |i: usize| center + Vec2::from_angle(rotation + step * i as f64) * radius;
    sink.move_to(vertex(0));
    for i in 1..sides {
        sink.line_to(vertex(i));
    }
    sink.close_path();
}

/// A random circle radius for `class`.
fn random_radius(rng: &mut impl Rng, class: CharacterClass, metrics: &FontMetrics) -> f64 {
    let variance = 0.5 + rng.gen::<f64>();
    let radius = (class.base_radius(metrics) * variance) as i64;
    radius.min(MAX_RADIUS) as f64
}

/// A random shape center: horizontally 100 units away from either side of
/// the advance, vertically inside the class band.
fn random_center(rng: &mut impl Rng, band: Band, metrics: &FontMetrics) -> Point {
    let width = i64::from(metrics.glyph_width);
    let x = rng.gen_range(100..=width - 100);
    let y = rng.gen_range(band.bottom..=band.top);
    Point::new(x as f64, y as f64)
}

/// Draws `count` random circles for `ch`.
pub fn circles(
    sink: &mut impl PathSink,
    rng: &mut impl Rng,
    ch: char,
    metrics: &FontMetrics,
    count: usize,
) {
    let class = CharacterClass::of(ch);
    let band = class.band(metrics);
    for _ in 0..count {
        let center = random_center(rng, band, metrics);
        let radius = random_radius(rng, class, metrics);
        draw_circle(sink, center, radius);
    }
}

/// Draws `count` random stroked lines for `ch`.
///
/// Lines start inside the class band and run 100 to 400 units in a random
/// direction; the far end is pulled back inside the glyph box.
pub fn stroked_lines(
    sink: &mut impl PathSink,
    rng: &mut impl Rng,
    ch: char,
    metrics: &FontMetrics,
    count: usize,
) {
    let class = CharacterClass::of(ch);
    let band = class.band(metrics);
    let width = i64::from(metrics.glyph_width);
    for _ in 0..count {
        let x1 = rng.gen_range(50..=width - 50);
        let y1 = rng.gen_range(band.bottom..=band.top);
        let length = f64::from(rng.gen_range(100..=400_i32));
        let angle = rng.gen_range(0.0..TAU);

        let x2 = (x1 as f64 + length * angle.cos()) as i64;
        let y2 = (y1 as f64 + length * angle.sin()) as i64;
        let x2 = x2.clamp(20, width - 20);
        let y2 = y2.clamp(20, band.top);

        let stroke = (class.base_stroke() * (0.6 + rng.gen::<f64>() * 0.8)) as i64;
        draw_stroked_line(
            sink,
            Point::new(x1 as f64, y1 as f64),
            Point::new(x2 as f64, y2 as f64),
            stroke as f64,
        );
    }
}

/// Draws `count` random polygons with three to six sides for `ch`.
pub fn polygons(
    sink: &mut impl PathSink,
    rng: &mut impl Rng,
    ch: char,
    metrics: &FontMetrics,
    count: usize,
) {
    let class = CharacterClass::of(ch);
    let band = class.band(metrics);
    for _ in 0..count {
        let center = random_center(rng, band, metrics);
        let radius = random_radius(rng, class, metrics);
        let sides = rng.gen_range(3..=6);
        let rotation = rng.gen_range(0.0..TAU);
        draw_polygon(sink, center, radius, sides, rotation);
    }
}

/// Draws the full procedural glyph for `ch`: circles, then lines, then
/// polygons, each family from a freshly seeded generator.
pub fn draw_glyph(sink: &mut impl PathSink, ch: char, metrics: &FontMetrics, counts: ShapeCounts) {
    circles(sink, &mut char_rng(ch), ch, metrics, counts.circles);
    stroked_lines(sink, &mut char_rng(ch), ch, metrics, counts.lines);
    polygons(sink, &mut char_rng(ch), ch, metrics, counts.polygons);
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{BezPath, PathEl};

    fn glyph(ch: char, counts: ShapeCounts) -> BezPath {
        let mut path = BezPath::new();
        draw_glyph(&mut path, ch, &FontMetrics::default(), counts);
        path
    }

    /// Splits a path into its subpaths.
    fn subpaths(path: &BezPath) -> Vec<Vec<PathEl>> {
        let mut result: Vec<Vec<PathEl>> = Vec::new();
        for el in path.elements() {
            if matches!(el, PathEl::MoveTo(_)) {
                result.push(Vec::new());
            }
            result.last_mut().unwrap().push(*el);
        }
        result
    }

    #[test]
    fn classes() {
        assert_eq!(CharacterClass::of('Q'), CharacterClass::Uppercase);
        assert_eq!(CharacterClass::of('q'), CharacterClass::Lowercase);
        assert_eq!(CharacterClass::of('7'), CharacterClass::Digit);
        assert_eq!(CharacterClass::of('%'), CharacterClass::Symbol);
        assert_eq!(CharacterClass::of('É'), CharacterClass::Uppercase);

        let metrics = FontMetrics::default();
        assert_eq!(CharacterClass::Uppercase.band(&metrics), Band { bottom: 200, top: 700 });
        assert_eq!(CharacterClass::Lowercase.base_radius(&metrics), 100.0);
        assert_eq!(CharacterClass::Digit.extraction_height(&metrics), 700);
        assert_eq!(CharacterClass::Symbol.extraction_height(&metrics), 500);
    }

    fn points(path: &BezPath) -> Vec<Point> {
        path.elements()
            .iter()
            .flat_map(|el| match *el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => vec![p],
                PathEl::CurveTo(a, b, p) => vec![a, b, p],
                _ => Vec::new(),
            })
            .collect()
    }

    fn assert_points(found: &[Point], expected: &[(f64, f64)]) {
        assert_eq!(found.len(), expected.len());
        for (found, (x, y)) in found.iter().zip(expected) {
            assert!((found.x - x).abs() < 1e-9 && (found.y - y).abs() < 1e-9, "{found:?}");
        }
    }

    #[test]
    fn circle_is_four_quadrants() {
        let mut path = BezPath::new();
        draw_circle(&mut path, Point::new(300.0, 400.0), 100.0);
        let els = path.elements();
        assert_eq!(els.len(), 6);
        assert!(els[1..5].iter().all(|el| matches!(el, PathEl::CurveTo(..))));
        assert_eq!(els[5], PathEl::ClosePath);

        let c = 55.2284749831;
        let points = points(&path);
        assert_points(
            &points[..4],
            &[(400.0, 400.0), (400.0, 400.0 - c), (300.0 + c, 300.0), (300.0, 300.0)],
        );
        assert_points(&points[10..], &[(300.0 + c, 500.0), (400.0, 400.0 + c), (400.0, 400.0)]);
    }

    #[test]
    fn stroked_line_is_a_rectangle() {
        let mut path = BezPath::new();
        draw_stroked_line(&mut path, Point::new(100.0, 200.0), Point::new(300.0, 200.0), 20.0);
        assert_points(
            &points(&path),
            &[(100.0, 210.0), (300.0, 210.0), (300.0, 190.0), (100.0, 190.0)],
        );
        assert_eq!(path.elements().last(), Some(&PathEl::ClosePath));
    }

    #[test]
    fn polygon_vertices_on_circle() {
        let mut path = BezPath::new();
        draw_polygon(&mut path, Point::new(0.0, 0.0), 50.0, 5, 0.3);
        assert_eq!(path.elements().len(), 6);
        for el in &path.elements()[..5] {
            let (PathEl::MoveTo(p) | PathEl::LineTo(p)) = el else { panic!("{el:?}") };
            assert!((p.to_vec2().hypot() - 50.0).abs() < 1e-9);
        }

        let mut empty = BezPath::new();
        draw_polygon(&mut empty, Point::ORIGIN, 50.0, 2, 0.0);
        assert!(empty.elements().is_empty());
    }

    #[test]
    fn default_glyph_has_seven_shapes() {
        let shapes = subpaths(&glyph('A', ShapeCounts::default()));
        assert_eq!(shapes.len(), 7);
        // circles: move, four curves, close
        assert!(shapes[..3].iter().all(|s| s.len() == 6));
        // lines: move, three lines, close
        assert!(shapes[3..].iter().all(|s| s.len() == 5));
    }

    #[test]
    fn same_character_same_art() {
        assert_eq!(glyph('g', ShapeCounts::default()), glyph('g', ShapeCounts::default()));
        assert_ne!(glyph('g', ShapeCounts::default()), glyph('h', ShapeCounts::default()));
    }

    #[test]
    fn independent_of_generation_order() {
        let metrics = FontMetrics::default();
        let forward: Vec<_> = "AbZ9".chars().map(|ch| glyph(ch, ShapeCounts::default())).collect();
        let mut backward: Vec<_> = "AbZ9"
            .chars()
            .rev()
            .map(|ch| {
                let mut path = BezPath::new();
                draw_glyph(&mut path, ch, &metrics, ShapeCounts::default());
                path
            })
            .collect();
        backward.reverse();
        assert_eq!(forward, backward);
    }

    #[test]
    fn families_do_not_disturb_each_other() {
        let with_polygons = ShapeCounts { polygons: 2, ..Default::default() };
        let plain = subpaths(&glyph('k', ShapeCounts::default()));
        let extended = subpaths(&glyph('k', with_polygons));
        assert_eq!(extended.len(), 9);
        assert_eq!(&extended[..7], &plain[..]);
    }

    #[test]
    fn anchors_stay_in_band() {
        let metrics = FontMetrics::default();
        for ch in "Ax7@".chars() {
            let band = CharacterClass::of(ch).band(&metrics);
            let in_band = |y: f64| (band.bottom as f64..=band.top as f64).contains(&y);

            let mut path = BezPath::new();
            circles(&mut path, &mut char_rng(ch), ch, &metrics, 20);
            for shape in subpaths(&path) {
                // a circle starts at its rightmost point, level with the center
                let PathEl::MoveTo(start) = shape[0] else { unreachable!() };
                let PathEl::CurveTo(_, _, bottom) = shape[1] else { unreachable!() };
                let radius = start.y - bottom.y;
                assert!(in_band(start.y), "{ch}: {start:?}");
                assert!((0.0..=MAX_RADIUS as f64).contains(&radius));
                let center_x = start.x - radius;
                assert!((100.0..=500.0).contains(&center_x));
            }

            let mut path = BezPath::new();
            stroked_lines(&mut path, &mut char_rng(ch), ch, &metrics, 20);
            for shape in subpaths(&path) {
                // the start point sits halfway between the first and last corner
                let (PathEl::MoveTo(a), PathEl::LineTo(d)) = (shape[0], shape[3]) else {
                    unreachable!()
                };
                let start = a.midpoint(d);
                assert!(in_band(start.y.round()), "{ch}: {start:?}");
                assert!((50.0..=550.0).contains(&start.x.round()));
                // and the far end is clamped into the glyph box
                let (PathEl::LineTo(b), PathEl::LineTo(c)) = (shape[1], shape[2]) else {
                    unreachable!()
                };
                let end = b.midpoint(c);
                assert!((20.0..=580.0).contains(&end.x.round()));
                assert!((20.0..=band.top as f64).contains(&end.y.round()));
            }
        }
    }
}
