//! Testing saving files.

use std::collections::BTreeMap;

use glyphgen::{Font, FontMetrics, PathSink};
use kurbo::Point;

#[test]
fn save_new_file() {
    let mut font = Font::new("Test Sans", &FontMetrics::default());
    let mut glyph = font.new_glyph("A", Some('A'));
    glyph.note = Some("I did a glyph!".into());
    {
        let mut pen = glyph.pen();
        pen.move_to(Point::new(100.0, 0.0));
        pen.line_to(Point::new(300.0, 700.0));
        pen.line_to(Point::new(500.0, 0.0));
        pen.close_path();
    }
    font.insert_glyph(glyph);
    font.add_required_glyphs();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Test.ufo");
    font.save(&path).unwrap();

    assert!(path.join("metainfo.plist").exists());
    assert!(path.join("fontinfo.plist").exists());
    assert!(path.join("layercontents.plist").exists());
    assert!(path.join("glyphs").exists());
    assert!(path.join("glyphs/contents.plist").exists());
    assert!(path.join("glyphs/A_.glif").exists());

    let glif = std::fs::read_to_string(path.join("glyphs/A_.glif")).unwrap();
    assert!(glif.contains(r#"<glyph name="A" format="2">"#));
    assert!(glif.contains("<note>I did a glyph!</note>"));
    assert_eq!(glif.matches("<point ").count(), 3);
    assert_eq!(glif.matches(r#"type="line""#).count(), 3);
}

#[test]
fn every_glyph_has_a_file() {
    let mut font = Font::new("Test Sans", &FontMetrics::default());
    for ch in "aAbB0.".chars() {
        font.insert_glyph(font.new_glyph(&glyphgen::glyph_name(ch), Some(ch)));
    }
    font.add_required_glyphs();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Letters.ufo");
    font.save(&path).unwrap();

    let contents: BTreeMap<String, String> =
        plist::from_file(path.join("glyphs/contents.plist")).unwrap();
    assert_eq!(contents.len(), 11);
    assert_eq!(contents["zero"], "zero.glif");
    assert_eq!(contents["period"], "period.glif");
    assert_eq!(contents["B"], "B_.glif");
    let glif_count = std::fs::read_dir(path.join("glyphs"))
        .unwrap()
        .filter(|entry| entry.as_ref().unwrap().path().extension().unwrap() == "glif")
        .count();
    assert_eq!(glif_count, contents.len());
}

#[test]
fn resave_replaces_previous_font() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Again.ufo");
    let metrics = FontMetrics::default();

    let mut first = Font::new("First", &metrics);
    first.insert_glyph(first.new_glyph("x", Some('x')));
    first.save(&path).unwrap();
    assert!(path.join("glyphs/x.glif").exists());

    let mut second = Font::new("Second", &metrics);
    second.insert_glyph(second.new_glyph("y", Some('y')));
    second.save(&path).unwrap();
    assert!(!path.join("glyphs/x.glif").exists());
    assert!(path.join("glyphs/y.glif").exists());
}
