//! Run configuration.
//!
//! A [`Config`] is normally read from a property list file:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
//! <plist version="1.0">
//! <dict>
//!   <key>sourceImage</key>
//!   <string>inputs/cross_section.png</string>
//!   <key>referenceFont</key>
//!   <string>/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf</string>
//!   <key>characterSet</key>
//!   <string>ABCDEFGHIJKLMNOPQRSTUVW</string>
//!   <key>threshold</key>
//!   <real>0.6</real>
//! </dict>
//! </plist>
//! ```
//!
//! Every key other than `sourceImage`, `referenceFont` and `characterSet` has
//! a default.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::procedural::ShapeCounts;
use crate::synthesize::PROCEDURAL_GLYPH_SET;

static DEFAULT_FAMILY_NAME: &str = "BitmapFont";
static DEFAULT_UFO_PATH: &str = "outputs/font.ufo";
static DEFAULT_OTF_PATH: &str = "outputs/font.otf";
static DEFAULT_PROCEDURAL_FAMILY_NAME: &str = "CircleFont";
static DEFAULT_PROCEDURAL_UFO_PATH: &str = "outputs/circlefont.ufo";
static DEFAULT_PROCEDURAL_OTF_PATH: &str = "outputs/circlefont.otf";

/// Settings for a glyph extraction run.
///
/// Fields are public so a configuration can be built in code; call
/// [`Config::validate`] before handing a hand-built value to the pipeline.
/// [`Config::load`] always validates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// The scanned or rasterized image glyph shapes are cut from.
    pub source_image: PathBuf,
    /// The TrueType/OpenType font reference glyphs are rendered with.
    pub reference_font: PathBuf,
    /// The characters to generate, in order.
    pub character_set: String,
    /// Intensities at or below this value (in `[0, 1]`) are ink.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Number of windows drawn per character.
    #[serde(default = "default_sample_count")]
    pub sample_count: usize,
    /// Sampling window width, also the reference box width.
    #[serde(default = "default_window_size")]
    pub window_width: u32,
    /// Sampling window height, also the reference box height.
    #[serde(default = "default_window_size")]
    pub window_height: u32,
    /// Maximum difference between a window's ink ratio and the reference's.
    #[serde(default = "default_ratio_tolerance")]
    pub ratio_tolerance: f64,
    /// The family name written to the font.
    #[serde(default = "default_family_name")]
    pub family_name: String,
    /// Where the UFO font source is written.
    #[serde(default = "default_ufo_path")]
    pub ufo_path: PathBuf,
    /// Where the compiled OTF is written.
    #[serde(default = "default_otf_path")]
    pub otf_path: PathBuf,
    /// If set, intermediate images are written below this directory.
    #[serde(default)]
    pub diagnostics_dir: Option<PathBuf>,
    /// Vertical metrics and advance width.
    #[serde(default)]
    pub metrics: FontMetrics,
}

/// The font-wide metrics shared by every generated glyph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[serde(rename_all = "camelCase")]
pub struct FontMetrics {
    /// Advance width of every generated glyph.
    pub glyph_width: u32,
    pub units_per_em: u32,
    pub ascender: i32,
    pub descender: i32,
    pub x_height: u32,
    pub cap_height: u32,
    pub line_gap: u32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        FontMetrics {
            glyph_width: 600,
            units_per_em: 1000,
            ascender: 800,
            descender: -200,
            x_height: 500,
            cap_height: 700,
            line_gap: 200,
        }
    }
}

impl FontMetrics {
    /// Checks that shapes can be placed inside the metrics.
    ///
    /// The procedural generators draw circles at least 100 units from either
    /// side of the advance and place shapes in bands starting at y=200
    /// (uppercase) and y=100 (lowercase).
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_metric("glyphWidth", self.glyph_width.into(), 200)?;
        check_metric("unitsPerEm", self.units_per_em.into(), 16)?;
        check_metric("xHeight", self.x_height.into(), 100)?;
        check_metric("capHeight", self.cap_height.into(), 200)?;
        Ok(())
    }
}

fn check_metric(name: &'static str, found: i64, min: i64) -> Result<(), ConfigError> {
    if found < min {
        return Err(ConfigError::Metric { name, min, found });
    }
    Ok(())
}

impl Config {
    /// Returns a configuration with default parameters for the given inputs.
    pub fn new(
        source_image: impl Into<PathBuf>,
        reference_font: impl Into<PathBuf>,
        character_set: impl Into<String>,
    ) -> Self {
        Config {
            source_image: source_image.into(),
            reference_font: reference_font.into(),
            character_set: character_set.into(),
            threshold: default_threshold(),
            sample_count: default_sample_count(),
            window_width: default_window_size(),
            window_height: default_window_size(),
            ratio_tolerance: default_ratio_tolerance(),
            family_name: default_family_name(),
            ufo_path: default_ufo_path(),
            otf_path: default_otf_path(),
            diagnostics_dir: None,
            metrics: FontMetrics::default(),
        }
    }

    /// Reads and validates a configuration from an XML or binary plist.
    pub fn load(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let config: Config = plist::from_file(path)
            .map_err(|source| ConfigError::Load { path: path.to_owned(), source })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::Threshold(self.threshold));
        }
        if !(0.0..=1.0).contains(&self.ratio_tolerance) {
            return Err(ConfigError::RatioTolerance(self.ratio_tolerance));
        }
        if self.sample_count == 0 {
            return Err(ConfigError::SampleCount);
        }
        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::WindowSize {
                width: self.window_width,
                height: self.window_height,
            });
        }
        if self.character_set.is_empty() {
            return Err(ConfigError::EmptyCharacterSet);
        }
        self.metrics.validate()
    }
}

/// Settings for a procedural art run.
///
/// Every key is optional; an empty plist dictionary generates the full
/// printable ASCII set as "CircleFont".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[serde(rename_all = "camelCase")]
pub struct SynthesisConfig {
    pub character_set: String,
    pub family_name: String,
    pub ufo_path: PathBuf,
    pub otf_path: PathBuf,
    /// Shapes drawn per glyph.
    pub shapes: ShapeCounts,
    pub metrics: FontMetrics,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        SynthesisConfig {
            character_set: PROCEDURAL_GLYPH_SET.to_string(),
            family_name: DEFAULT_PROCEDURAL_FAMILY_NAME.to_string(),
            ufo_path: DEFAULT_PROCEDURAL_UFO_PATH.into(),
            otf_path: DEFAULT_PROCEDURAL_OTF_PATH.into(),
            shapes: ShapeCounts::default(),
            metrics: FontMetrics::default(),
        }
    }
}

impl SynthesisConfig {
    /// Reads and validates a configuration from an XML or binary plist.
    pub fn load(path: impl AsRef<Path>) -> Result<SynthesisConfig, ConfigError> {
        let path = path.as_ref();
        let config: SynthesisConfig = plist::from_file(path)
            .map_err(|source| ConfigError::Load { path: path.to_owned(), source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.character_set.is_empty() {
            return Err(ConfigError::EmptyCharacterSet);
        }
        self.metrics.validate()
    }
}

fn default_threshold() -> f64 {
    0.6
}

fn default_sample_count() -> usize {
    300
}

fn default_window_size() -> u32 {
    200
}

fn default_ratio_tolerance() -> f64 {
    0.4
}

fn default_family_name() -> String {
    DEFAULT_FAMILY_NAME.to_string()
}

fn default_ufo_path() -> PathBuf {
    DEFAULT_UFO_PATH.into()
}

fn default_otf_path() -> PathBuf {
    DEFAULT_OTF_PATH.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_plist(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let xml = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
{body}
</dict>
</plist>"#
        );
        std::io::Write::write_all(&mut file, xml.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_fills_defaults() {
        let file = write_plist(
            "<key>sourceImage</key><string>in.png</string>
             <key>referenceFont</key><string>ref.ttf</string>
             <key>characterSet</key><string>AB</string>
             <key>threshold</key><real>0.5</real>",
        );
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.source_image, PathBuf::from("in.png"));
        assert_eq!(config.threshold, 0.5);
        assert_eq!(config.sample_count, 300);
        assert_eq!((config.window_width, config.window_height), (200, 200));
        assert_eq!(config.ratio_tolerance, 0.4);
        assert_eq!(config.metrics, FontMetrics::default());
        assert!(config.diagnostics_dir.is_none());
    }

    #[test]
    fn load_reads_nested_metrics() {
        let file = write_plist(
            "<key>sourceImage</key><string>in.png</string>
             <key>referenceFont</key><string>ref.ttf</string>
             <key>characterSet</key><string>a</string>
             <key>metrics</key>
             <dict><key>xHeight</key><integer>520</integer></dict>",
        );
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.metrics.x_height, 520);
        assert_eq!(config.metrics.cap_height, 700);
    }

    #[test]
    fn load_rejects_unknown_keys() {
        let file = write_plist(
            "<key>sourceImage</key><string>in.png</string>
             <key>referenceFont</key><string>ref.ttf</string>
             <key>characterSet</key><string>a</string>
             <key>nsamp</key><integer>3</integer>",
        );
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Load { .. })));
    }

    #[test]
    fn load_rejects_out_of_range_threshold() {
        let file = write_plist(
            "<key>sourceImage</key><string>in.png</string>
             <key>referenceFont</key><string>ref.ttf</string>
             <key>characterSet</key><string>a</string>
             <key>threshold</key><real>1.5</real>",
        );
        assert!(matches!(Config::load(file.path()), Err(ConfigError::Threshold(t)) if t == 1.5));
    }

    #[test]
    fn synthesis_defaults() {
        let file =
            write_plist("<key>shapes</key><dict><key>polygons</key><integer>2</integer></dict>");
        let config = SynthesisConfig::load(file.path()).unwrap();
        assert_eq!(config.family_name, "CircleFont");
        assert_eq!(config.character_set, PROCEDURAL_GLYPH_SET);
        assert_eq!(config.shapes, ShapeCounts { circles: 3, lines: 4, polygons: 2 });
        assert_eq!(config.ufo_path, PathBuf::from("outputs/circlefont.ufo"));

        let config = SynthesisConfig { character_set: String::new(), ..Default::default() };
        assert!(matches!(config.validate(), Err(ConfigError::EmptyCharacterSet)));
    }

    #[test]
    fn validate_bounds() {
        let base = Config::new("in.png", "ref.ttf", "abc");
        assert!(base.validate().is_ok());

        let mut config = base.clone();
        config.ratio_tolerance = -0.1;
        assert!(matches!(config.validate(), Err(ConfigError::RatioTolerance(_))));

        let mut config = base.clone();
        config.sample_count = 0;
        assert!(matches!(config.validate(), Err(ConfigError::SampleCount)));

        let mut config = base.clone();
        config.window_height = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::WindowSize { width: 200, height: 0 })
        ));

        let mut config = base.clone();
        config.character_set.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyCharacterSet)));

        let mut config = base;
        config.metrics.glyph_width = 150;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Metric { name: "glyphWidth", min: 200, found: 150 })
        ));
    }
}
