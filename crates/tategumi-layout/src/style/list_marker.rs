//! List marker text.
//!
//! [CSS Lists § 3 Markers](https://www.w3.org/TR/css-lists-3/#markers)

use std::str::FromStr;

use crate::style::keywords::{ListStylePosition, ListStyleType};

/// `list-style` of a list or list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListStyle {
    /// Marker kind.
    pub kind: ListStyleType,
    /// Marker placement.
    pub position: ListStylePosition,
}

impl ListStyle {
    /// Parse the `list-style` shorthand, e.g. `decimal inside`.
    ///
    /// Unknown words are ignored.
    #[must_use]
    pub fn parse_shorthand(value: &str) -> Self {
        let mut style = Self::default();
        for word in value.split_whitespace() {
            if let Ok(kind) = ListStyleType::from_str(word) {
                style.kind = kind;
            } else if let Ok(position) = ListStylePosition::from_str(word) {
                style.position = position;
            }
        }
        style
    }

    /// Returns `true` for outside markers.
    #[must_use]
    pub const fn is_outside(&self) -> bool {
        matches!(self.position, ListStylePosition::Outside)
    }

    /// Marker text for the item at 1-based `order`.
    #[must_use]
    pub fn marker_text(&self, order: usize) -> String {
        match self.kind {
            ListStyleType::None => String::new(),
            ListStyleType::Disc => "•".to_string(),
            ListStyleType::Circle => "◦".to_string(),
            ListStyleType::Square => "▪".to_string(),
            ListStyleType::Decimal => format!("{order}."),
            ListStyleType::LowerAlpha => format!("{}.", alpha(order)),
            ListStyleType::UpperAlpha => format!("{}.", alpha(order).to_uppercase()),
            ListStyleType::LowerRoman => format!("{}.", roman(order).to_lowercase()),
            ListStyleType::UpperRoman => format!("{}.", roman(order)),
            ListStyleType::CjkIdeographic => format!("{}、", cjk(order)),
        }
    }
}

/// 1 → a, 26 → z, 27 → aa.
fn alpha(order: usize) -> String {
    let mut n = order;
    let mut out = Vec::new();
    while n > 0 {
        n -= 1;
        out.push(char::from(b'a' + u8::try_from(n % 26).unwrap_or(0)));
        n /= 26;
    }
    out.iter().rev().collect()
}

fn roman(order: usize) -> String {
    const TABLE: [(usize, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];
    let mut n = order;
    let mut out = String::new();
    for (value, numeral) in TABLE {
        while n >= value {
            out.push_str(numeral);
            n -= value;
        }
    }
    out
}

const CJK_DIGITS: [char; 10] = ['〇', '一', '二', '三', '四', '五', '六', '七', '八', '九'];

/// Kanji numerals: 11 → 十一, 20 → 二十. From 100 on, digit by digit.
fn cjk(order: usize) -> String {
    let digit = |d: usize| CJK_DIGITS[d % 10];
    match order {
        0..=9 => digit(order).to_string(),
        10..=99 => {
            let (tens, ones) = (order / 10, order % 10);
            let mut out = String::new();
            if tens > 1 {
                out.push(digit(tens));
            }
            out.push('十');
            if ones > 0 {
                out.push(digit(ones));
            }
            out
        }
        _ => order
            .to_string()
            .chars()
            .filter_map(|c| c.to_digit(10).and_then(|d| usize::try_from(d).ok()))
            .map(digit)
            .collect(),
    }
}
