//! Integration tests for text tokens: lexing, classes, metrics and spacing.

use tategumi_layout::text::char_class::{is_head_ng, is_kuten_touten, is_tail_ng, is_zenkaku};
use tategumi_layout::text::spacing::apply_spacing;
use tategumi_layout::text::token::{rt_extent, rt_font_size};
use tategumi_layout::text::{
    ApproximateFontMetrics, FontMetrics, TextKind, TextOrientation, TextToken, lex_ruby,
    lex_text,
};
use tategumi_layout::{BoxFlow, LayoutConfig};

const FLOW: BoxFlow = BoxFlow::VerticalRl;

fn measured(mut token: TextToken) -> TextToken {
    token.set_metrics(&ApproximateFontMetrics, 16, FLOW, &LayoutConfig::default());
    token
}

fn kinds(text: &str) -> Vec<(TextKind, String)> {
    lex_text(text, TextOrientation::Mixed)
        .tokens()
        .iter()
        .map(|token| (token.kind, token.data.clone()))
        .collect()
}

// ---------------------------------------------------------------------------
// Lexing
// ---------------------------------------------------------------------------

#[test]
fn test_lex_chars_and_words() {
    assert_eq!(
        kinds("本はRust製"),
        vec![
            (TextKind::Char, "本".to_string()),
            (TextKind::Char, "は".to_string()),
            (TextKind::Word, "Rust".to_string()),
            (TextKind::Char, "製".to_string()),
        ]
    );
}

#[test]
fn test_lex_space_splits_words() {
    assert_eq!(
        kinds("a b"),
        vec![
            (TextKind::Word, "a".to_string()),
            (TextKind::Char, " ".to_string()),
            (TextKind::Word, "b".to_string()),
        ]
    );
}

#[test]
fn test_lex_stamps_positions() {
    let stream = lex_text("一二三", TextOrientation::Mixed);
    let positions: Vec<Option<usize>> = stream.tokens().iter().map(|t| t.pos).collect();
    assert_eq!(positions, vec![Some(0), Some(1), Some(2)]);
}

#[test]
fn test_lex_upright_has_no_words() {
    let stream = lex_text("ab", TextOrientation::Upright);
    assert!(stream.tokens().iter().all(|t| t.kind == TextKind::Char));
    assert_eq!(stream.len(), 2);
}

#[test]
fn test_lex_ruby_pairs() {
    let stream = lex_ruby("漢<rp>(</rp><rt>かん</rt><rp>)</rp>字<rt>じ</rt>");
    let pairs: Vec<(String, Option<String>)> = stream
        .tokens()
        .iter()
        .map(|t| (t.data.clone(), t.rt.clone()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("漢".to_string(), Some("かん".to_string())),
            ("字".to_string(), Some("じ".to_string())),
        ]
    );
}

// ---------------------------------------------------------------------------
// Character classes
//
// [JLREQ § 3.1.7](https://www.w3.org/TR/jlreq/#characters_not_starting_a_line)
// ---------------------------------------------------------------------------

#[test]
fn test_line_head_and_tail_classes() {
    assert!(is_head_ng('。'));
    assert!(is_head_ng('」'));
    assert!(is_head_ng('ゃ'));
    assert!(!is_head_ng('あ'));
    assert!(is_tail_ng('「'));
    assert!(!is_tail_ng('」'));
    assert!(is_kuten_touten('、'));
    assert!(!is_kuten_touten('」'));
}

#[test]
fn test_zenkaku() {
    assert!(is_zenkaku('あ'));
    assert!(!is_zenkaku('a'));
    assert!(!is_zenkaku('ｱ'));
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

#[test]
fn test_approximate_metrics() {
    let metrics = ApproximateFontMetrics;
    assert_eq!(metrics.char_advance('あ', 16, FLOW), 16);
    assert_eq!(metrics.char_advance('a', 16, FLOW), 8);
    assert_eq!(metrics.text_advance("abc", 16, FLOW), 24);
}

#[test]
fn test_kerning_char_is_half_em() {
    assert_eq!(measured(TextToken::char('「')).body_size, 8);
    let config = LayoutConfig {
        kerning: false,
        ..LayoutConfig::default()
    };
    let mut token = TextToken::char('「');
    token.set_metrics(&ApproximateFontMetrics, 16, FLOW, &config);
    assert_eq!(token.body_size, 16);
}

#[test]
fn test_vertical_space_is_half_em() {
    assert_eq!(measured(TextToken::char(' ')).body_size, 8);
}

#[test]
fn test_tcy_is_one_em() {
    assert_eq!(measured(TextToken::tcy("12")).body_size, 16);
}

#[test]
fn test_ruby_takes_wider_side() {
    let token = measured(TextToken::ruby("字", Some("かんじ")));
    // Three 8px annotation characters beat one 16px base character.
    assert_eq!(token.body_size, 24);
}

#[test]
fn test_rt_sizes() {
    let config = LayoutConfig::default();
    assert_eq!(rt_font_size(16, &config), 8);
    assert_eq!(rt_font_size(15, &config), 7);
    assert_eq!(rt_extent(15, &config), 8);
}

// ---------------------------------------------------------------------------
// Cutting words
// ---------------------------------------------------------------------------

#[test]
fn test_cut_measure_splits_word() {
    let mut word = measured(TextToken::word("abcdef"));
    let head = word
        .cut_measure(&ApproximateFontMetrics, FLOW, 20)
        .expect("two characters fit");
    assert_eq!(head.data, "ab");
    assert_eq!(head.body_size, 16);
    assert!(head.divided);
    assert_eq!(word.data, "cdef");
    assert_eq!(word.body_size, 32);
    assert!(word.divided);
}

#[test]
fn test_cut_measure_needs_one_character() {
    let mut word = measured(TextToken::word("abc"));
    assert!(word.cut_measure(&ApproximateFontMetrics, FLOW, 4).is_none());
    assert_eq!(word.data, "abc");
}

#[test]
fn test_cut_measure_only_words() {
    let mut token = measured(TextToken::char('あ'));
    assert!(token.cut_measure(&ApproximateFontMetrics, FLOW, 100).is_none());
}

#[test]
fn test_cut_tail() {
    let mut word = measured(TextToken::word("abc"));
    let tail = word
        .cut_tail(&ApproximateFontMetrics, FLOW)
        .expect("word has two characters");
    assert_eq!(word.data, "ab");
    assert_eq!(tail.data, "c");
    assert!(measured(TextToken::word("a"))
        .cut_tail(&ApproximateFontMetrics, FLOW)
        .is_none());
}

// ---------------------------------------------------------------------------
// Spacing
//
// [JLREQ § 3.1.6](https://www.w3.org/TR/jlreq/#positioning_of_consecutive_opening_brackets_closing_brackets_commas_full_stops_and_middle_dots)
// ---------------------------------------------------------------------------

#[test]
fn test_stop_gets_space_after() {
    let mut stop = measured(TextToken::char('。'));
    let next = measured(TextToken::char('あ'));
    apply_spacing(&mut stop, None, Some(&next));
    assert_eq!(stop.space_after, 8);
    assert_eq!(stop.advance(0), 16);
}

#[test]
fn test_consecutive_brackets_share_space() {
    let mut close = measured(TextToken::char('」'));
    let stop = measured(TextToken::char('。'));
    apply_spacing(&mut close, None, Some(&stop));
    assert_eq!(close.space_after, 0);
    assert_eq!(close.advance(0), 8);
}

#[test]
fn test_open_bracket_space_before() {
    let prev = measured(TextToken::char('あ'));
    let mut open = measured(TextToken::char('「'));
    apply_spacing(&mut open, Some(&prev), None);
    assert_eq!(open.space_before, 8);

    let mut first = measured(TextToken::char('「'));
    apply_spacing(&mut first, None, None);
    assert_eq!(first.space_before, 0);
}

#[test]
fn test_word_between_zenkaku() {
    let prev = measured(TextToken::char('本'));
    let next = measured(TextToken::char('製'));
    let mut word = measured(TextToken::word("Rust"));
    apply_spacing(&mut word, Some(&prev), Some(&next));
    assert_eq!(word.space_before, 4);
    assert_eq!(word.space_after, 4);
}
