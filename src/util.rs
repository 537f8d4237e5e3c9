//! File names for glyphs and per-character output directories.

use std::collections::HashSet;

/// Longest file name most file systems accept, in bytes.
const MAX_FILE_NAME_LEN: usize = 255;

/// Characters that are not allowed in a file name on some platform.
static FORBIDDEN: &[char] = &['"', '\\', '*', '+', '/', ':', '<', '>', '?', '[', ']', '|'];

/// The `.glif` file name for a glyph, following the UFO 3 user name
/// convention. Clashes are not resolved; see [`FileNames`].
pub fn default_file_name_for_glyph_name(name: impl AsRef<str>) -> String {
    user_name_to_file_name(name.as_ref(), "", ".glif")
}

/// Hands out glyph file names, adding a counter to any name that another
/// glyph already took on a case-insensitive file system.
#[derive(Debug, Default)]
pub(crate) struct FileNames {
    taken: HashSet<String>,
}

impl FileNames {
    pub(crate) fn file_name_for(&mut self, name: &str) -> String {
        let file_name = default_file_name_for_glyph_name(name);
        if self.taken.insert(file_name.to_lowercase()) {
            return file_name;
        }
        let stem = file_name.trim_end_matches(".glif");
        (1u64..)
            .map(|counter| format!("{stem}{counter:015}.glif"))
            .find(|candidate| self.taken.insert(candidate.to_lowercase()))
            .unwrap_or(file_name)
    }
}

/// Turns a glyph name or a character into a portable file or directory name.
///
/// Forbidden and control characters become `_`, as does a leading `.`.
/// Every uppercase ASCII letter gets a trailing `_`, so `A` and `a` never
/// share a file. The result, suffix included, fits in 255 bytes.
pub fn user_name_to_file_name(name: &str, prefix: &str, suffix: &str) -> String {
    let mut stem = String::from(prefix);
    for c in name.chars() {
        let replace = c.is_control() || FORBIDDEN.contains(&c) || (c == '.' && stem.is_empty());
        if replace {
            stem.push('_');
            continue;
        }
        stem.push(c);
        if c.is_ascii_uppercase() {
            stem.push('_');
        }
    }

    let budget = MAX_FILE_NAME_LEN.saturating_sub(suffix.len());
    if stem.len() > budget {
        let cut = stem
            .char_indices()
            .map(|(idx, _)| idx)
            .take_while(|&idx| idx <= budget)
            .last()
            .unwrap_or(0);
        stem.truncate(cut);
    }
    stem + suffix
}
