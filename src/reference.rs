//! Rendering reference glyphs to compare candidate regions against.

use std::path::Path;

use crate::{BinaryMask, Error};

/// Rasterizer coverage at or above this value is ink.
pub const COVERAGE_INK: u8 = 128;

/// An antialiased glyph bitmap.
///
/// `data` holds `width * height` coverage values, row-major, top row first;
/// 0 is untouched and 255 is fully covered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coverage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl Coverage {
    fn is_ink(&self, x: usize, y: usize) -> bool {
        self.data[y * self.width + x] >= COVERAGE_INK
    }

    /// The ink bounding box `(x0, y0, x1, y1)`, exclusive max.
    fn ink_bounds(&self) -> Option<(usize, usize, usize, usize)> {
        let mut bounds: Option<(usize, usize, usize, usize)> = None;
        for y in 0..self.height {
            for x in (0..self.width).filter(|x| self.is_ink(*x, y)) {
                bounds = Some(match bounds {
                    None => (x, y, x + 1, y + 1),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x + 1), y1.max(y + 1)),
                });
            }
        }
        bounds
    }
}

/// Something that can turn a character into a coverage bitmap.
pub trait GlyphRasterizer: Send + Sync {
    /// Rasterizes `ch` at a nominal size of `px` pixels per em.
    fn rasterize(&self, ch: char, px: f32) -> Coverage;
}

/// A [`GlyphRasterizer`] backed by a TrueType or OpenType font file.
pub struct FontRasterizer {
    font: fontdue::Font,
}

impl FontRasterizer {
    /// Loads and parses the font at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .map_err(|source| Error::FontLoad { path: path.to_owned(), source })?;
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|reason| Error::FontParse { path: path.to_owned(), reason: reason.into() })?;
        Ok(FontRasterizer { font })
    }
}

impl GlyphRasterizer for FontRasterizer {
    fn rasterize(&self, ch: char, px: f32) -> Coverage {
        let (metrics, data) = self.font.rasterize(ch, px);
        Coverage { width: metrics.width, height: metrics.height, data }
    }
}

/// A character rendered into a fixed box, used as a comparison template.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceMask {
    mask: BinaryMask,
    ink_ratio: f64,
}

impl ReferenceMask {
    pub fn mask(&self) -> &BinaryMask {
        &self.mask
    }

    /// Ink cells divided by the box area.
    pub fn ink_ratio(&self) -> f64 {
        self.ink_ratio
    }
}

/// Renders characters centered and scaled to fill a box.
pub struct ReferenceRenderer<R> {
    rasterizer: R,
}

impl<R: GlyphRasterizer> ReferenceRenderer<R> {
    pub fn new(rasterizer: R) -> Self {
        ReferenceRenderer { rasterizer }
    }

    /// Renders `ch` into a `width`×`height` box.
    ///
    /// The glyph is first measured at twice the box width, then re-rendered
    /// at the largest size whose ink still fits the box without changing its
    /// aspect ratio, and finally centered. The result only depends on the
    /// arguments.
    pub fn render(&self, ch: char, width: u32, height: u32) -> ReferenceMask {
        let mut mask = BinaryMask::new(width, height);
        if width == 0 || height == 0 {
            return ReferenceMask { mask, ink_ratio: 0.0 };
        }

        let nominal = (width * 2) as f32;
        let natural = self.rasterizer.rasterize(ch, nominal);
        let Some((nx0, ny0, nx1, ny1)) = natural.ink_bounds() else {
            return ReferenceMask { mask, ink_ratio: 0.0 };
        };
        let scale = f32::min(width as f32 / (nx1 - nx0) as f32, height as f32 / (ny1 - ny0) as f32);

        let coverage = self.rasterizer.rasterize(ch, nominal * scale);
        if let Some((x0, y0, x1, y1)) = coverage.ink_bounds() {
            let tx = (i64::from(width) - (x1 - x0) as i64).div_euclid(2);
            let ty = (i64::from(height) - (y1 - y0) as i64).div_euclid(2);
            for y in y0..y1 {
                for x in (x0..x1).filter(|x| coverage.is_ink(*x, y)) {
                    let dx = tx + (x - x0) as i64;
                    let dy = ty + (y - y0) as i64;
                    if (0..i64::from(width)).contains(&dx) && (0..i64::from(height)).contains(&dy) {
                        mask.set(dx as u32, dy as u32, true);
                    }
                }
            }
        }

        let ink_ratio = mask.ink_ratio();
        log::debug!("reference '{ch}' at {:.1}px: ink ratio {ink_ratio:.3}", nominal * scale);
        ReferenceMask { mask, ink_ratio }
    }
}
