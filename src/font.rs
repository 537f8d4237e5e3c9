//! Writing Unified Font Object directories.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use kurbo::Point;
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::FontMetrics;
use crate::error::FontWriteError;
use crate::fontinfo::FontInfo;
use crate::glyph::Glyph;
use crate::util::FileNames;
use crate::PathSink;

static CONTENTS_FILE: &str = "contents.plist";
static LAYER_CONTENTS_FILE: &str = "layercontents.plist";
static METAINFO_FILE: &str = "metainfo.plist";
static FONTINFO_FILE: &str = "fontinfo.plist";
static DEFAULT_LAYER_NAME: &str = "public.default";
static DEFAULT_GLYPHS_DIRNAME: &str = "glyphs";
static DEFAULT_METAINFO_CREATOR: &str = "glyphgen";

/// The UFO major version written to `metainfo.plist`. Only [UFO 3] output
/// is supported.
///
/// [UFO 3]: http://unifiedfontobject.org/versions/ufo3
#[derive(Debug, Clone, Copy, Serialize_repr, Deserialize_repr, PartialEq, Eq)]
#[repr(u8)]
pub enum FormatVersion {
    V3 = 3,
}

/// Which tool wrote the UFO and in which format version ([`metainfo.plist`]).
///
/// [`metainfo.plist`]: http://unifiedfontobject.org/versions/ufo3/metainfo.plist/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaInfo {
    pub creator: String,
    pub format_version: FormatVersion,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub format_version_minor: u32,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl Default for MetaInfo {
    fn default() -> Self {
        MetaInfo {
            creator: DEFAULT_METAINFO_CREATOR.to_string(),
            format_version: FormatVersion::V3,
            format_version_minor: 0,
        }
    }
}

/// A font with a single (default) layer of glyphs.
///
/// Glyphs are kept in insertion order, which is also the order they are
/// written in.
#[derive(Debug, Clone)]
pub struct Font {
    pub meta: MetaInfo,
    pub font_info: FontInfo,
    glyphs: IndexMap<String, Glyph>,
    metrics: FontMetrics,
}

impl Font {
    /// Creates an empty font for `family_name` with the given metrics.
    pub fn new(family_name: &str, metrics: &FontMetrics) -> Self {
        Font {
            meta: MetaInfo::default(),
            font_info: FontInfo::for_family(family_name, metrics),
            glyphs: IndexMap::new(),
            metrics: *metrics,
        }
    }

    /// The metrics the font was created with.
    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// Returns a glyph with the font's advance width, mapped to `codepoint`.
    ///
    /// The glyph is not added to the font; see [`Font::insert_glyph`].
    pub fn new_glyph(&self, name: &str, codepoint: Option<char>) -> Glyph {
        let mut glyph = Glyph::new(name);
        glyph.width = self.metrics.glyph_width.into();
        if let Some(codepoint) = codepoint {
            glyph.codepoints.insert(codepoint);
        }
        glyph
    }

    /// Adds a glyph, replacing (and returning) any glyph with the same name.
    ///
    /// A replaced glyph keeps its position in the glyph order.
    pub fn insert_glyph(&mut self, glyph: Glyph) -> Option<Glyph> {
        self.glyphs.insert(glyph.name().to_owned(), glyph)
    }

    /// Returns the glyph with the given name, if it exists.
    pub fn get_glyph(&self, name: &str) -> Option<&Glyph> {
        self.glyphs.get(name)
    }

    /// Returns `true` if the font contains a glyph named `name`.
    pub fn contains_glyph(&self, name: &str) -> bool {
        self.glyphs.contains_key(name)
    }

    /// The number of glyphs in the font.
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Iterates over the glyphs in insertion order.
    pub fn iter_glyphs(&self) -> impl Iterator<Item = &Glyph> + '_ {
        self.glyphs.values()
    }

    /// Adds `.notdef`, `space`, `tab`, `NULL` and `CR`.
    ///
    /// `.notdef` is a crossed box, the others are blank. Glyphs already in
    /// the font are left as they are.
    pub fn add_required_glyphs(&mut self) {
        let width = f64::from(self.metrics.glyph_width);
        let required = [
            (".notdef", None, width),
            ("space", Some(' '), (width / 2.0).floor()),
            ("tab", Some('\t'), width * 2.0),
            ("NULL", Some('\0'), 0.0),
            ("CR", Some('\r'), (width / 2.0).floor()),
        ];
        for (name, codepoint, advance) in required {
            if self.contains_glyph(name) {
                log::debug!("keeping existing glyph '{name}'");
                continue;
            }
            let mut glyph = self.new_glyph(name, codepoint);
            glyph.width = advance;
            if name == ".notdef" {
                draw_notdef(&mut glyph.pen());
            }
            self.insert_glyph(glyph);
        }
    }

    /// Writes the font to `path` as a UFO v3 directory.
    ///
    /// An existing directory at `path` is removed first.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FontWriteError> {
        let path = path.as_ref();
        if path.exists() {
            fs::remove_dir_all(path)
                .map_err(|source| FontWriteError::Cleanup { path: path.into(), source })?;
        }
        fs::create_dir_all(path)
            .map_err(|source| FontWriteError::CreateDir { path: path.into(), source })?;

        write_plist(&path.join(METAINFO_FILE), &self.meta)?;
        write_plist(&path.join(FONTINFO_FILE), &self.font_info)?;
        let layers = vec![(DEFAULT_LAYER_NAME, DEFAULT_GLYPHS_DIRNAME)];
        write_plist(&path.join(LAYER_CONTENTS_FILE), &layers)?;

        self.save_glyphs(&path.join(DEFAULT_GLYPHS_DIRNAME))?;
        log::info!("saved {} glyphs to {}", self.glyphs.len(), path.display());
        Ok(())
    }

    fn save_glyphs(&self, dir: &Path) -> Result<(), FontWriteError> {
        fs::create_dir(dir)
            .map_err(|source| FontWriteError::CreateDir { path: dir.into(), source })?;

        let mut names = FileNames::default();
        let to_write: Vec<(&Glyph, String)> = self
            .glyphs
            .values()
            .map(|glyph| (glyph, names.file_name_for(glyph.name())))
            .collect();

        #[cfg(feature = "rayon")]
        let iter = to_write.par_iter();
        #[cfg(not(feature = "rayon"))]
        let mut iter = to_write.iter();

        iter.try_for_each(|(glyph, file_name)| {
            glyph
                .save(&dir.join(file_name))
                .map_err(|source| FontWriteError::Glif { name: glyph.name().into(), source })
        })?;

        let contents: BTreeMap<&str, &str> =
            to_write.iter().map(|(glyph, file_name)| (glyph.name(), file_name.as_str())).collect();
        write_plist(&dir.join(CONTENTS_FILE), &contents)
    }
}

fn write_plist(path: &Path, value: &impl Serialize) -> Result<(), FontWriteError> {
    plist::to_file_xml(path, value)
        .map_err(|source| FontWriteError::Plist { path: path.into(), source })
}

fn draw_notdef(sink: &mut impl PathSink) {
    let (left, bottom, right, top) = (100.0, 100.0, 500.0, 700.0);
    sink.move_to(Point::new(left, bottom));
    sink.line_to(Point::new(right, bottom));
    sink.line_to(Point::new(right, top));
    sink.line_to(Point::new(left, top));
    sink.close_path();

    sink.move_to(Point::new(left, bottom));
    sink.line_to(Point::new(right, top));
    sink.move_to(Point::new(right, bottom));
    sink.line_to(Point::new(left, top));
}
