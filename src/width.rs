use unicode_width::UnicodeWidthChar;

/// Columns a horizontal tab occupies on the print head.
pub const TAB_WIDTH: usize = 4;

/// East-Asian Fullwidth code points. `unicode-width` reports these as two
/// columns, but only Wide code points get two here.
const FULLWIDTH: &[(char, char)] = &[
    ('\u{3000}', '\u{3000}'),
    ('\u{FF01}', '\u{FF60}'),
    ('\u{FFE0}', '\u{FFE6}'),
];

/// East-Asian Wide combining marks that `unicode-width` reports as zero.
const WIDE_COMBINING: &[(char, char)] = &[('\u{302A}', '\u{302F}'), ('\u{3099}', '\u{309A}')];

fn in_ranges(c: char, ranges: &[(char, char)]) -> bool {
    ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&c))
}

/// Whether `c` has the East-Asian Width property Wide.
fn is_east_asian_wide(c: char) -> bool {
    if in_ranges(c, WIDE_COMBINING) {
        return true;
    }
    c.width() == Some(2) && !in_ranges(c, FULLWIDTH)
}

/// Display width of a single code point in printer columns.
///
/// Tabs count as [`TAB_WIDTH`], line breaks and other control characters
/// take no room, East-Asian Wide glyphs take two columns and everything
/// else, Fullwidth forms included, takes one.
pub fn rune_width(c: char) -> usize {
    match c {
        '\t' => TAB_WIDTH,
        '\n' => 0,
        c if c.is_control() => 0,
        c if is_east_asian_wide(c) => 2,
        _ => 1,
    }
}

/// Sum of [`rune_width`] over every code point in `s`.
pub fn str_width(s: &str) -> usize {
    s.chars().map(rune_width).sum()
}
