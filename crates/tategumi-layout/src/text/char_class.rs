//! Character classes for Japanese line breaking.
//!
//! [Requirements for Japanese Text Layout § 3.1.7](https://www.w3.org/TR/jlreq/#characters_not_starting_a_line)
//!
//! Some characters may not start a line (closing brackets, small kana,
//! stops and commas) and some may not end one (opening brackets). These
//! sets drive hanging punctuation and the hyphenation sweep.

/// Characters that must not begin a line (gyoutou kinsoku).
const HEAD_NG: &str = "）〕］｝〉》」』】〙〗〟’”｠»ヽヾーァィゥェォッャュョヮヵヶぁぃぅぇぉっゃゅょゎゕゖㇰㇱㇲㇳㇴㇵㇶㇷㇸㇹㇺㇻㇼㇽㇾㇿ々〻‐゠–〜？！‼⁇⁈⁉・：；。、．，)]},.:;!?";

/// Characters that must not end a line (gyoumatsu kinsoku).
const TAIL_NG: &str = "（〔［｛〈《「『【〘〖〝‘“｟«([{";

const KAKKO_START: &str = "（〔［｛〈《「『【〘〖〝‘“｟«";

const KAKKO_END: &str = "）〕］｝〉》」』】〙〗〟’”｠»";

const KUTEN_TOUTEN: &str = "。、．，";

/// Returns `true` if `c` must not begin a line.
#[must_use]
pub fn is_head_ng(c: char) -> bool {
    HEAD_NG.contains(c)
}

/// Returns `true` if `c` must not end a line.
#[must_use]
pub fn is_tail_ng(c: char) -> bool {
    TAIL_NG.contains(c)
}

/// Opening bracket.
#[must_use]
pub fn is_kakko_start(c: char) -> bool {
    KAKKO_START.contains(c)
}

/// Closing bracket.
#[must_use]
pub fn is_kakko_end(c: char) -> bool {
    KAKKO_END.contains(c)
}

/// Ideographic full stop or comma.
#[must_use]
pub fn is_kuten_touten(c: char) -> bool {
    KUTEN_TOUTEN.contains(c)
}

/// Characters whose glyph occupies half an em when kerning is on.
#[must_use]
pub fn is_kerning_char(c: char) -> bool {
    is_kakko_start(c) || is_kakko_end(c) || is_kuten_touten(c)
}

/// Collapsible whitespace. The ideographic space U+3000 is content.
#[must_use]
pub const fn is_white_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\u{000c}')
}

/// Full-width characters. Half-width katakana count as half-width.
#[must_use]
pub const fn is_zenkaku(c: char) -> bool {
    !c.is_ascii() && !matches!(c, '\u{ff61}'..='\u{ff9f}' | '\u{00a0}'..='\u{02af}')
}

/// Characters that join into a half-width word token.
#[must_use]
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, '\u{00c0}'..='\u{02af}')
        || "._-:;,'\"!?&%@#$/+=*~^|\\<>".contains(c)
}
