use std::borrow::Cow;

const FULLWIDTH_START: u32 = 0xFF01;
const FULLWIDTH_END: u32 = 0xFF5E;
const FULLWIDTH_OFFSET: u32 = 0xFF01 - 0x21;
const IDEOGRAPHIC_SPACE: char = '\u{3000}';

/// Narrow form of a full-width compatibility character, if it has one.
fn narrow(c: char) -> Option<char> {
    match c {
        IDEOGRAPHIC_SPACE => Some(' '),
        c if (FULLWIDTH_START..=FULLWIDTH_END).contains(&(c as u32)) => {
            char::from_u32(c as u32 - FULLWIDTH_OFFSET)
        }
        '\u{FF5F}' => Some('\u{2985}'), // ⦅
        '\u{FF60}' => Some('\u{2986}'), // ⦆
        '\u{FFE0}' => Some('\u{A2}'),   // ¢
        '\u{FFE1}' => Some('\u{A3}'),   // £
        '\u{FFE2}' => Some('\u{AC}'),   // ¬
        '\u{FFE3}' => Some('\u{AF}'),   // ¯
        '\u{FFE4}' => Some('\u{A6}'),   // ¦
        '\u{FFE5}' => Some('\u{A5}'),   // ¥
        '\u{FFE6}' => Some('\u{20A9}'), // ₩
        _ => None,
    }
}

/// Folds every East-Asian Fullwidth form (U+3000, U+FF01..=U+FF60,
/// U+FFE0..=U+FFE6) to its narrow equivalent. Borrows when nothing changes.
pub fn fold_fullwidth(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| narrow(c).is_some()) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(text.chars().map(|c| narrow(c).unwrap_or(c)).collect())
}
