//! Synthesizing typefaces from scanned images or procedural art.
//!
//! There are two ways to get glyph outlines:
//!
//! - [`extract`] cuts glyph shaped regions out of a source image, picking
//!   for every character the window closest to a rendered reference glyph,
//!   and traces it into an outline.
//! - [`synthesize`] draws every glyph from circles and stroked lines placed
//!   by a generator seeded with the character.
//!
//! Either way the result is a [`Font`], saved as a [Unified Font
//! Object][ufo] and optionally compiled to OTF with [`FontCompiler`].
//!
//! [ufo]: http://unifiedfontobject.org/versions/ufo3
//!
//! # Basic usage:
//!
//! ```no_run
//! use glyphgen::{Config, FontCompiler};
//!
//! let config = Config::load("glyphgen.plist").expect("failed to load config");
//! let report = glyphgen::extract::run(&config).expect("extraction failed");
//! println!("skipped {:?}", report.skipped);
//! FontCompiler::default().compile(&config.ufo_path, &config.otf_path).expect("fontmake failed");
//! ```

#[macro_use]
extern crate serde_repr;

pub mod compile;
pub mod config;
pub mod error;
pub mod extract;
mod font;
mod fontinfo;
pub mod glyph;
mod glyph_names;
pub mod mask;
mod pen;
pub mod procedural;
pub mod reference;
pub mod sample;
pub mod score;
pub mod synthesize;
pub mod trace;
mod util;
pub mod vectorize;

pub use compile::FontCompiler;
pub use config::{Config, FontMetrics, SynthesisConfig};
pub use error::{CompileError, ConfigError, Error, FontWriteError, GlifWriteError};
pub use extract::{Extraction, ExtractionReport, Extractor};
pub use font::{Font, FormatVersion, MetaInfo};
pub use fontinfo::{FontInfo, OS2WidthClass};
pub use glyph::{Contour, ContourPoint, Glyph, GlyphPen, PointType};
pub use glyph_names::{glyph_name, glyph_name_for_char};
pub use mask::BinaryMask;
pub use pen::PathSink;
pub use procedural::{CharacterClass, ShapeCounts};
pub use reference::{FontRasterizer, GlyphRasterizer, ReferenceMask, ReferenceRenderer};
pub use sample::{CandidateRegion, RegionSampler};
pub use score::ScoredCandidate;
pub use util::user_name_to_file_name;
pub use vectorize::GlyphOutline;
