//! postscript glyph name utilities.
//!
//! Names for Basic Latin follow the Adobe Glyph List For New Fonts, at
//! https://github.com/adobe-type-tools/agl-aglfn/blob/master/aglfn.txt

/// Given a `char`, returns the AGLFN name for that `char`s glyph, if it is
/// in Basic Latin.
pub fn glyph_name_for_char(chr: char) -> Option<&'static str> {
    let name = match chr {
        ' ' => "space",
        '!' => "exclam",
        '"' => "quotedbl",
        '#' => "numbersign",
        '$' => "dollar",
        '%' => "percent",
        '&' => "ampersand",
        '\'' => "quotesingle",
        '(' => "parenleft",
        ')' => "parenright",
        '*' => "asterisk",
        '+' => "plus",
        ',' => "comma",
        '-' => "hyphen",
        '.' => "period",
        '/' => "slash",
        '0' => "zero",
        '1' => "one",
        '2' => "two",
        '3' => "three",
        '4' => "four",
        '5' => "five",
        '6' => "six",
        '7' => "seven",
        '8' => "eight",
        '9' => "nine",
        ':' => "colon",
        ';' => "semicolon",
        '<' => "less",
        '=' => "equal",
        '>' => "greater",
        '?' => "question",
        '@' => "at",
        '[' => "bracketleft",
        '\\' => "backslash",
        ']' => "bracketright",
        '^' => "asciicircum",
        '_' => "underscore",
        '`' => "grave",
        '{' => "braceleft",
        '|' => "bar",
        '}' => "braceright",
        '~' => "asciitilde",
        _ => return None,
    };
    Some(name)
}

/// Returns the glyph name used for `chr`.
///
/// ASCII letters are named after themselves, the rest of Basic Latin after
/// the AGLFN, and everything else `uniXXXX`.
pub fn glyph_name(chr: char) -> String {
    if chr.is_ascii_alphabetic() {
        return chr.to_string();
    }
    match glyph_name_for_char(chr) {
        Some(name) => name.to_string(),
        None if (chr as u32) <= 0xFFFF => format!("uni{:04X}", chr as u32),
        None => format!("u{:05X}", chr as u32),
    }
}
