//! Building a font from procedural glyph art.

use indexmap::IndexSet;

use crate::config::{FontMetrics, SynthesisConfig};
use crate::glyph_names::glyph_name;
use crate::procedural::{draw_glyph, ShapeCounts};
use crate::{Error, Font};

/// Letters, digits and the printable ASCII punctuation.
pub static PROCEDURAL_GLYPH_SET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789.,;:!?()[]{}@#$%&*-_+=<>/\\|";

/// Creates a font with one procedural glyph per character of `chars`, plus
/// the required glyphs.
///
/// Repeated characters are generated once.
pub fn procedural_font(
    family_name: &str,
    chars: &str,
    metrics: &FontMetrics,
    counts: ShapeCounts,
) -> Font {
    let mut font = Font::new(family_name, metrics);
    for ch in chars.chars().collect::<IndexSet<_>>() {
        let mut glyph = font.new_glyph(&glyph_name(ch), Some(ch));
        draw_glyph(&mut glyph.pen(), ch, metrics, counts);
        log::info!("generated '{ch}' as {} ({} contours)", glyph.name(), glyph.contours.len());
        font.insert_glyph(glyph);
    }
    font.add_required_glyphs();
    font
}

/// Generates the font described by `config` and saves it to its UFO path.
pub fn run(config: &SynthesisConfig) -> Result<Font, Error> {
    config.validate()?;
    let font = procedural_font(
        &config.family_name,
        &config.character_set,
        &config.metrics,
        config.shapes,
    );
    font.save(&config.ufo_path)?;
    Ok(font)
}
