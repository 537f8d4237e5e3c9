use serde::{Deserialize, Serialize};

use crate::config::FontMetrics;

static DEFAULT_STYLE_NAME: &str = "Regular";
static DEFAULT_VENDOR_ID: &str = "NONE";
static LICENSE: &str = "SIL Open Font License, Version 1.1";
static LICENSE_URL: &str = "https://openfontlicense.org";

/// The contents of the [`fontinfo.plist`][] file.
///
/// Only the attributes a generated font fills in are modelled.
///
/// [`fontinfo.plist`]: http://unifiedfontobject.org/versions/ufo3/fontinfo.plist/
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[serde(rename_all = "camelCase")]
pub struct FontInfo {
    // fields stay in key order: serde writes them as declared
    pub ascender: Option<i32>,
    pub cap_height: Option<u32>,
    pub copyright: Option<String>,
    pub descender: Option<i32>,
    pub family_name: Option<String>,
    pub open_type_hhea_ascender: Option<i32>,
    pub open_type_hhea_descender: Option<i32>,
    pub open_type_hhea_line_gap: Option<u32>,
    pub open_type_name_license: Option<String>,
    #[serde(rename = "openTypeNameLicenseURL")]
    pub open_type_name_license_url: Option<String>,
    #[serde(rename = "openTypeNameUniqueID")]
    pub open_type_name_unique_id: Option<String>,
    pub open_type_name_version: Option<String>,
    #[serde(rename = "openTypeOS2CodePageRanges")]
    pub open_type_os2_code_page_ranges: Option<Vec<u8>>,
    #[serde(rename = "openTypeOS2Type")]
    pub open_type_os2_type: Option<Vec<u8>>,
    #[serde(rename = "openTypeOS2TypoAscender")]
    pub open_type_os2_typo_ascender: Option<i32>,
    #[serde(rename = "openTypeOS2TypoDescender")]
    pub open_type_os2_typo_descender: Option<i32>,
    #[serde(rename = "openTypeOS2TypoLineGap")]
    pub open_type_os2_typo_line_gap: Option<u32>,
    #[serde(rename = "openTypeOS2UnicodeRanges")]
    pub open_type_os2_unicode_ranges: Option<Vec<u8>>,
    #[serde(rename = "openTypeOS2VendorID")]
    pub open_type_os2_vendor_id: Option<String>,
    #[serde(rename = "openTypeOS2WeightClass")]
    pub open_type_os2_weight_class: Option<u32>,
    #[serde(rename = "openTypeOS2WidthClass")]
    pub open_type_os2_width_class: Option<OS2WidthClass>,
    #[serde(rename = "openTypeOS2WinAscent")]
    pub open_type_os2_win_ascent: Option<u32>,
    #[serde(rename = "openTypeOS2WinDescent")]
    pub open_type_os2_win_descent: Option<u32>,
    pub postscript_font_name: Option<String>,
    pub postscript_full_name: Option<String>,
    pub postscript_underline_position: Option<i32>,
    pub postscript_underline_thickness: Option<u32>,
    pub style_name: Option<String>,
    pub units_per_em: Option<u32>,
    pub version_major: Option<i32>,
    pub version_minor: Option<u32>,
    pub x_height: Option<u32>,
}

impl FontInfo {
    /// Font info for a regular weight, version 1.0 font of `family_name`.
    ///
    /// The OS/2 and hhea vertical metrics all follow the ascender, descender
    /// and line gap of `metrics`, so the font has the same line spacing on
    /// every platform.
    pub fn for_family(family_name: &str, metrics: &FontMetrics) -> Self {
        // PostScript names may not contain spaces
        let ps_family = family_name.replace(' ', "");
        FontInfo {
            ascender: Some(metrics.ascender),
            cap_height: Some(metrics.cap_height),
            copyright: Some(format!("Copyright © {family_name} authors")),
            descender: Some(metrics.descender),
            family_name: Some(family_name.to_owned()),
            open_type_hhea_ascender: Some(metrics.ascender),
            open_type_hhea_descender: Some(metrics.descender),
            open_type_hhea_line_gap: Some(metrics.line_gap),
            open_type_name_license: Some(LICENSE.into()),
            open_type_name_license_url: Some(LICENSE_URL.into()),
            open_type_name_unique_id: Some(format!("{ps_family}-{DEFAULT_STYLE_NAME}")),
            open_type_name_version: Some("Version 1.000".into()),
            // Latin 1
            open_type_os2_code_page_ranges: Some(vec![0, 1]),
            // installable, no subsetting restriction, bitmap embedding allowed
            open_type_os2_type: Some(vec![3, 8, 9]),
            open_type_os2_typo_ascender: Some(metrics.ascender),
            open_type_os2_typo_descender: Some(metrics.descender),
            open_type_os2_typo_line_gap: Some(metrics.line_gap),
            // Basic Latin
            open_type_os2_unicode_ranges: Some(vec![0]),
            open_type_os2_vendor_id: Some(DEFAULT_VENDOR_ID.into()),
            open_type_os2_weight_class: Some(400),
            open_type_os2_width_class: Some(OS2WidthClass::Normal),
            open_type_os2_win_ascent: Some(metrics.ascender.max(0).unsigned_abs()),
            open_type_os2_win_descent: Some(metrics.descender.min(0).unsigned_abs()),
            postscript_font_name: Some(format!("{ps_family}-{DEFAULT_STYLE_NAME}")),
            postscript_full_name: Some(format!("{family_name} {DEFAULT_STYLE_NAME}")),
            postscript_underline_position: Some(-100),
            postscript_underline_thickness: Some(50),
            style_name: Some(DEFAULT_STYLE_NAME.into()),
            units_per_em: Some(metrics.units_per_em),
            version_major: Some(1),
            version_minor: Some(0),
            x_height: Some(metrics.x_height),
        }
    }
}

/// Corresponds to the allowed values for [openTypeOS2WidthClass](http://unifiedfontobject.org/versions/ufo3/fontinfo.plist/#opentype-os2-table-fields).
#[derive(Debug, Clone, Copy, Serialize_repr, Deserialize_repr, PartialEq)]
#[repr(u8)]
pub enum OS2WidthClass {
    UltraCondensed = 1,
    ExtraCondensed = 2,
    Condensed = 3,
    SemiCondensed = 4,
    Normal = 5,
    SemiExpanded = 6,
    Expanded = 7,
    ExtraExpanded = 8,
    UltraExpanded = 9,
}
