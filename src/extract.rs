//! Extracting glyph outlines from a source image.
//!
//! For every character, a reference glyph is rendered into the sampling
//! window, windows with a similar amount of ink are drawn from the
//! thresholded source, and the window closest to the reference is traced
//! into an outline.
//!
//! With a diagnostics directory configured, the intermediate images are
//! written below it:
//!
//! ```text
//! thresholded.png
//! <char>/glyph_reference.png
//! <char>/selected_crop_<n>.png
//! best/<char>.png
//! ```
//!
//! where `<char>` is the character's glyph name made safe to use as a file
//! name, so every character gets its own directory. A character directory
//! left over from an earlier run is emptied first.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::config::{Config, FontMetrics};
use crate::glyph_names::glyph_name;
use crate::mask::{self, BinaryMask};
use crate::procedural::CharacterClass;
use crate::reference::{FontRasterizer, GlyphRasterizer, ReferenceRenderer};
use crate::sample::{char_rng, RegionSampler};
use crate::score::best_match;
use crate::util::user_name_to_file_name;
use crate::vectorize::{vectorize, GlyphOutline};
use crate::{Error, Font};

static THRESHOLDED_FILE: &str = "thresholded.png";
static REFERENCE_FILE: &str = "glyph_reference.png";
static BEST_DIR: &str = "best";

/// The outline extracted for one character.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub ch: char,
    /// Mean absolute difference between the chosen window and the reference.
    pub score: f64,
    /// The chosen window's top-left corner in the source image.
    pub origin: (u32, u32),
    /// The traced window, fitted into the glyph box.
    pub outline: GlyphOutline,
}

/// The outcome of extracting a whole character set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionReport {
    /// Extracted characters, in character set order.
    pub extracted: Vec<Extraction>,
    /// Characters for which no window passed the ink ratio filter.
    pub skipped: Vec<char>,
}

impl ExtractionReport {
    /// Builds a font with one glyph per extracted character, plus the
    /// required glyphs.
    pub fn to_font(&self, family_name: &str, metrics: &FontMetrics) -> Font {
        let mut font = Font::new(family_name, metrics);
        for extraction in &self.extracted {
            let mut glyph = font.new_glyph(&glyph_name(extraction.ch), Some(extraction.ch));
            extraction.outline.draw(&mut glyph.pen());
            font.insert_glyph(glyph);
        }
        font.add_required_glyphs();
        font
    }
}

/// Runs the extraction pipeline over a thresholded source image.
pub struct Extractor<R = FontRasterizer> {
    mask: BinaryMask,
    renderer: ReferenceRenderer<R>,
    sampler: RegionSampler,
    metrics: FontMetrics,
    diagnostics: Option<PathBuf>,
}

impl Extractor<FontRasterizer> {
    /// Thresholds the configured source image and loads the reference font.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        config.validate()?;
        let mask = mask::preprocess(&config.source_image, config.threshold)?;
        let rasterizer = FontRasterizer::load(&config.reference_font)?;
        Extractor::new(config, mask, rasterizer)
    }
}

impl<R: GlyphRasterizer> Extractor<R> {
    /// Creates an extractor sampling from `mask`, with reference glyphs drawn
    /// by `rasterizer`.
    ///
    /// Fails if the configuration is invalid or the sampling window does not
    /// fit in the mask. If diagnostics are enabled, the mask is written out.
    pub fn new(config: &Config, mask: BinaryMask, rasterizer: R) -> Result<Self, Error> {
        config.validate()?;
        if config.window_width > mask.width() || config.window_height > mask.height() {
            return Err(Error::WindowTooLarge {
                window_width: config.window_width,
                window_height: config.window_height,
                mask_width: mask.width(),
                mask_height: mask.height(),
            });
        }
        if let Some(dir) = &config.diagnostics_dir {
            create_dir(dir)?;
            create_dir(&dir.join(BEST_DIR))?;
            save_image(&mask, &dir.join(THRESHOLDED_FILE))?;
        }
        Ok(Extractor {
            mask,
            renderer: ReferenceRenderer::new(rasterizer),
            sampler: RegionSampler::from_config(config),
            metrics: config.metrics,
            diagnostics: config.diagnostics_dir.clone(),
        })
    }

    /// The thresholded source image.
    pub fn mask(&self) -> &BinaryMask {
        &self.mask
    }

    /// Extracts the outline for `ch`.
    ///
    /// Returns `Ok(None)` if no sampled window had an ink ratio close enough
    /// to the reference's.
    pub fn extract_char(&self, ch: char) -> Result<Option<Extraction>, Error> {
        log::info!("processing '{ch}'");
        let (window_width, window_height) = self.sampler.window_size();
        let char_dir = match &self.diagnostics {
            Some(dir) => {
                let char_dir = dir.join(diagnostics_name(ch, ""));
                reset_dir(&char_dir)?;
                Some(char_dir)
            }
            None => None,
        };

        let reference = self.renderer.render(ch, window_width, window_height);
        if let Some(dir) = &char_dir {
            save_image(reference.mask(), &dir.join(REFERENCE_FILE))?;
        }

        let candidates = self.sampler.sample(&self.mask, reference.ink_ratio(), &mut char_rng(ch))?;
        if let Some(dir) = &char_dir {
            for (i, candidate) in candidates.iter().enumerate() {
                save_image(candidate.mask(), &dir.join(format!("selected_crop_{}.png", i + 1)))?;
            }
        }

        let Some(best) = best_match(candidates, &reference) else {
            log::warn!("no window matched '{ch}', skipping it");
            return Ok(None);
        };
        let origin = best.region.origin();
        log::debug!("best window for '{ch}' at {origin:?}, score {:.4}", best.score);
        if let Some(dir) = &self.diagnostics {
            let best_file = dir.join(BEST_DIR).join(diagnostics_name(ch, ".png"));
            save_image(best.region.mask(), &best_file)?;
        }

        let class = CharacterClass::of(ch);
        let width = f64::from(self.metrics.glyph_width);
        let height = f64::from(class.extraction_height(&self.metrics));
        let outline = vectorize(&best.region.into_mask(), width, height);
        Ok(Some(Extraction { ch, score: best.score, origin, outline }))
    }

    /// Extracts every character of `chars`, in order.
    ///
    /// Characters nothing matched are skipped and listed in the report; any
    /// other error stops the run. Repeated characters are extracted once.
    pub fn extract_all(&self, chars: &str) -> Result<ExtractionReport, Error> {
        let chars: Vec<char> = chars.chars().collect::<IndexSet<_>>().into_iter().collect();

        #[cfg(feature = "rayon")]
        let iter = chars.par_iter();
        #[cfg(not(feature = "rayon"))]
        let iter = chars.iter();

        let results: Vec<(char, Option<Extraction>)> = iter
            .map(|&ch| self.extract_char(ch).map(|extraction| (ch, extraction)))
            .collect::<Result<_, _>>()?;

        let mut report = ExtractionReport::default();
        for (ch, extraction) in results {
            match extraction {
                Some(extraction) => report.extracted.push(extraction),
                None => report.skipped.push(ch),
            }
        }
        if !report.skipped.is_empty() {
            let skipped: String = report.skipped.iter().collect();
            log::warn!("skipped {} characters: '{skipped}'", report.skipped.len());
        }
        Ok(report)
    }
}

/// Extracts the configured character set and saves the font to the
/// configured UFO path.
pub fn run(config: &Config) -> Result<ExtractionReport, Error> {
    let extractor = Extractor::from_config(config)?;
    let report = extractor.extract_all(&config.character_set)?;
    let font = report.to_font(&config.family_name, &config.metrics);
    font.save(&config.ufo_path)?;
    Ok(report)
}

/// The file name diagnostics for `ch` are written under. Glyph names are
/// unique per character and only hold characters that survive the file name
/// conversion.
fn diagnostics_name(ch: char, suffix: &str) -> String {
    user_name_to_file_name(&glyph_name(ch), "", suffix)
}

/// Creates an empty directory at `path`, removing whatever was there.
fn reset_dir(path: &Path) -> Result<(), Error> {
    if path.exists() {
        fs::remove_dir_all(path)
            .map_err(|source| Error::RemoveDir { path: path.into(), source })?;
    }
    create_dir(path)
}

fn create_dir(path: &Path) -> Result<(), Error> {
    fs::create_dir_all(path).map_err(|source| Error::CreateDir { path: path.into(), source })
}

fn save_image(mask: &BinaryMask, path: &Path) -> Result<(), Error> {
    mask.save(path)?;
    log::debug!("wrote {}", path.display());
    Ok(())
}
