//! Ideographic spacing.
//!
//! [Requirements for Japanese Text Layout § 3.1.6](https://www.w3.org/TR/jlreq/#positioning_of_consecutive_opening_brackets_closing_brackets_commas_full_stops_and_middle_dots)
//!
//! With kerning on, brackets and stops get a half-em body. Half an em of
//! space is then given back on their open side, unless the neighbour on
//! that side is itself a bracket or stop. Half-width words set between
//! full-width characters get a quarter em on each touching side.

use crate::style::values::floor_px;
use crate::text::char_class::{is_kakko_end, is_kakko_start, is_kerning_char, is_kuten_touten};
use crate::text::token::{TextKind, TextToken};

/// Space rate around brackets and stops.
const KAKKO_SPACE_RATE: f64 = 0.5;

/// Space rate between a half-width word and full-width neighbours.
const WORD_SPACE_RATE: f64 = 0.25;

fn rate_of(font_size: i32, rate: f64) -> i32 {
    floor_px(f64::from(font_size) * rate)
}

fn is_kerning_neighbour(token: Option<&TextToken>) -> bool {
    token
        .and_then(TextToken::as_char)
        .is_some_and(is_kerning_char)
}

/// Set `space_before`/`space_after` of `cur` from its neighbours.
///
/// `cur` must already carry metrics.
pub fn apply_spacing(cur: &mut TextToken, prev: Option<&TextToken>, next: Option<&TextToken>) {
    cur.space_before = 0;
    cur.space_after = 0;
    match cur.kind {
        TextKind::Char => {
            let Some(c) = cur.as_char() else {
                return;
            };
            if is_kakko_start(c) && !is_kerning_neighbour(prev) && prev.is_some() {
                cur.space_before = rate_of(cur.font_size, KAKKO_SPACE_RATE);
            }
            if (is_kakko_end(c) || is_kuten_touten(c)) && !is_kerning_neighbour(next) {
                cur.space_after = rate_of(cur.font_size, KAKKO_SPACE_RATE);
            }
        }
        TextKind::Word => {
            if prev.is_some_and(|p| p.kind == TextKind::Char && p.is_zenkaku() && !is_kerning_neighbour(Some(p))) {
                cur.space_before = rate_of(cur.font_size, WORD_SPACE_RATE);
            }
            if next.is_some_and(|n| n.kind == TextKind::Char && n.is_zenkaku() && !is_kerning_neighbour(Some(n))) {
                cur.space_after = rate_of(cur.font_size, WORD_SPACE_RATE);
            }
        }
        TextKind::Tcy | TextKind::Ruby => {}
    }
}
