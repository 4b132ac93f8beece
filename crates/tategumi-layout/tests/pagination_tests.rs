//! End-to-end tests: markup in, pages out.

use std::rc::Rc;

use quickcheck_macros::quickcheck;
use tategumi_layout::{
    BoxFlow, LayoutBox, LayoutConfig, LayoutEngine, LayoutError, Page, StyleSheet,
    TextTreeRenderer, render_page,
};

fn horizontal() -> LayoutConfig {
    LayoutConfig {
        default_flow: BoxFlow::HorizontalTb,
        ..LayoutConfig::default()
    }
}

/// Helper: an engine on a horizontal 100x100 page (six 16px characters
/// per line, three 32px lines per page) with `css` added to the
/// user-agent sheet.
fn engine_with(markup: &str, css: &str, config: LayoutConfig) -> LayoutEngine {
    let mut sheet = StyleSheet::user_agent();
    sheet.add_css(css);
    LayoutEngine::new(markup, 100, 100, config, Rc::new(sheet)).expect("page size is valid")
}

fn engine(markup: &str) -> LayoutEngine {
    engine_with(markup, "", horizontal())
}

fn collect_lines(layout_box: &LayoutBox, out: &mut Vec<String>) {
    if layout_box.line_no.is_some() {
        out.push(layout_box.text());
        return;
    }
    for child in layout_box.boxes() {
        collect_lines(child, out);
    }
}

/// The text of every root line of `page`, in order.
fn lines(page: &Page) -> Vec<String> {
    let mut out = Vec::new();
    collect_lines(&page.root, &mut out);
    out
}

fn all_lines(pages: &[Page]) -> Vec<String> {
    pages.iter().flat_map(lines).collect()
}

// ---------------------------------------------------------------------------
// Documents and pages
// ---------------------------------------------------------------------------

#[test]
fn test_invalid_page_size() {
    let err = LayoutEngine::with_defaults("本", 0, 100).expect_err("zero width");
    assert_eq!(
        err,
        LayoutError::InvalidPageSize {
            width: 0,
            height: 100
        }
    );
}

#[test]
fn test_empty_document_has_no_pages() {
    let mut engine = engine("");
    assert!(!engine.has_next_page());
    assert!(matches!(engine.try_next_page(), Ok(None)));
    assert_eq!(engine.page_count(), 0);
}

#[test]
fn test_single_page_outline() {
    let mut engine = engine("<p>あい</p>");
    let page = engine.try_next_page().expect("layout").expect("one page");
    assert!(!engine.has_next_page());

    let mut renderer = TextTreeRenderer::new();
    render_page(&mut renderer, &page);
    assert_eq!(
        renderer.finish(),
        "page 1\n\
         \x20 block <body> 100x100\n\
         \x20   block <p> 100x32\n\
         \x20     line-block <p> 100x16\n\
         \x20       text-block <p> 32x16 \"あい\"\n"
    );
}

#[test]
fn test_html_wrapper_is_optional() {
    let wrapped: Vec<Page> =
        engine("<html><body><p>あい</p></body></html>").collect();
    let bare: Vec<Page> = engine("<p>あい</p>").collect();
    assert_eq!(all_lines(&wrapped), all_lines(&bare));
}

#[test]
fn test_long_paragraph_paginates() {
    let text = "あ".repeat(200);
    let mut engine = engine(&format!("<p>{text}</p>"));
    let pages: Vec<Page> = engine.by_ref().collect();

    // 200 characters at six per line make 34 lines, three to a page.
    assert_eq!(pages.len(), 12);
    assert_eq!(engine.page_count(), 12);
    assert_eq!(engine.line_count(), 34);
    assert!(pages.iter().all(|page| lines(page).len() <= 3));
    assert_eq!(lines(&pages[0]), vec!["ああああああ"; 3]);
    assert_eq!(lines(&pages[11]), vec!["ああ"]);
    assert_eq!(all_lines(&pages).concat(), text);
    assert!(engine.diagnostics().is_empty());
}

#[test]
fn test_pages_are_numbered() {
    let pages: Vec<Page> = engine(&format!("<p>{}</p>", "あ".repeat(40))).collect();
    let indices: Vec<usize> = pages.iter().map(|page| page.index).collect();
    assert_eq!(indices, (0..pages.len()).collect::<Vec<_>>());
}

#[test]
fn test_page_break() {
    let pages: Vec<Page> = engine("<p>あ</p><end-page><p>い</p>").collect();
    assert_eq!(pages.len(), 2);
    assert_eq!(lines(&pages[0]), vec!["あ"]);
    assert_eq!(lines(&pages[1]), vec!["い"]);
}

#[test]
fn test_break_before_property() {
    let pages: Vec<Page> = engine_with(
        "<p>あ</p><h2>い</h2>",
        "h2 { break-before: page; }",
        horizontal(),
    )
    .collect();
    assert_eq!(pages.len(), 2);
}

#[test]
fn test_anchor_pages() {
    let mut engine = engine(r#"<p id="first">あ</p><end-page><p id="second">い</p>"#);
    let pages = engine.by_ref().count();
    assert_eq!(pages, 2);
    assert_eq!(engine.anchor_page("first"), Some(0));
    assert_eq!(engine.anchor_page("second"), Some(1));
    assert_eq!(engine.anchor_page("missing"), None);
}

#[test]
fn test_page_limit() {
    let config = LayoutConfig {
        max_page_count: 2,
        ..horizontal()
    };
    let markup = format!("<p>{}</p>", "あ".repeat(200));

    let mut engine = engine_with(&markup, "", config.clone());
    assert!(engine.try_next_page().expect("first page").is_some());
    assert!(engine.try_next_page().expect("second page").is_some());
    assert!(matches!(
        engine.try_next_page(),
        Err(LayoutError::PageLimit(2))
    ));
    assert!(!engine.has_next_page());

    let mut engine = engine_with(&markup, "", config);
    assert_eq!(engine.by_ref().count(), 2);
    assert_eq!(engine.diagnostics(), &[LayoutError::PageLimit(2)]);
}

// ---------------------------------------------------------------------------
// Line breaking
//
// [§ 5.2 Breaking Rules for Letters](https://www.w3.org/TR/css-text-3/#line-break-property)
//
// "Certain characters must not be placed at the start of a line."
// ---------------------------------------------------------------------------

#[test]
fn test_forced_break() {
    let pages: Vec<Page> = engine("<p>あ<br>い</p>").collect();
    assert_eq!(all_lines(&pages), vec!["あ", "い"]);
}

#[test]
fn test_pre_keeps_newlines() {
    let pages: Vec<Page> = engine("<pre>あ\nい</pre>").collect();
    assert_eq!(all_lines(&pages), vec!["あ", "い"]);
}

#[test]
fn test_line_head_stop_sweeps_back() {
    let pages: Vec<Page> = engine("<p>ああああああ。いい</p>").collect();
    // The stop may not start the second line, so it takes the last
    // character of the first one along.
    assert_eq!(all_lines(&pages), vec!["あああああ", "あ。いい"]);
}

#[test]
fn test_keep_all_disables_sweep() {
    let pages: Vec<Page> = engine_with(
        "<p>ああああああ。いい</p>",
        "p { word-break: keep-all; }",
        horizontal(),
    )
    .collect();
    assert_eq!(all_lines(&pages), vec!["ああああああ", "。いい"]);
}

#[test]
fn test_hanging_stop() {
    let pages: Vec<Page> = engine_with(
        "<p>ああああああ。いい</p>",
        "p { hanging-punctuation: allow-end; }",
        horizontal(),
    )
    .collect();
    assert_eq!(all_lines(&pages), vec!["ああああああ。", "いい"]);
}

#[test]
fn test_hanging_closing_bracket() {
    let pages: Vec<Page> = engine_with(
        "<p>ああああああ」いい</p>",
        "p { hanging-punctuation: allow-end; }",
        horizontal(),
    )
    .collect();
    assert_eq!(all_lines(&pages), vec!["ああああああ」", "いい"]);
}

#[test]
fn test_hanging_skips_run_of_head_stops() {
    let pages: Vec<Page> = engine_with(
        "<p>ああああああ」。いい</p>",
        "p { hanging-punctuation: allow-end; }",
        horizontal(),
    )
    .collect();
    // Two stops cannot both hang, so the line sweeps back instead.
    let lines = all_lines(&pages);
    assert_eq!(lines.concat(), "ああああああ」。いい");
    assert!(lines.iter().all(|line| !line.starts_with('。')));
}

#[test]
fn test_line_of_stops_terminates() {
    let text = "。".repeat(50);
    let mut engine = engine(&format!("<p>{text}</p>"));
    let pages: Vec<Page> = engine.by_ref().collect();
    assert!(!pages.is_empty());
    assert!(!engine.has_next_page());
    assert_eq!(all_lines(&pages).concat(), text);
}

#[test]
fn test_paragraph_text_survives_pagination() {
    let markup = "<p>吾輩は猫である。名前はまだ無い。</p>\
                  <p>どこで生れたかとんと見当がつかぬ。</p>\
                  <p>何でも薄暗いじめじめした所でニャーニャー泣いていた事だけは記憶している。</p>";
    let pages: Vec<Page> = engine(markup).collect();
    assert!(pages.len() > 1);
    let text: String = all_lines(&pages).concat();
    assert_eq!(
        text,
        "吾輩は猫である。名前はまだ無い。\
         どこで生れたかとんと見当がつかぬ。\
         何でも薄暗いじめじめした所でニャーニャー泣いていた事だけは記憶している。"
    );
}

/// Helper: characters the line-break rules treat specially, plus one that
/// they do not.
const BREAK_ALPHABET: [char; 8] = ['あ', 'い', '。', '、', '「', '」', 'ー', 'っ'];

#[quickcheck]
fn prop_line_breaking_terminates(picks: Vec<u8>) -> bool {
    let text: String = picks
        .iter()
        .take(30)
        .map(|&i| BREAK_ALPHABET[usize::from(i) % BREAK_ALPHABET.len()])
        .collect();
    let config = LayoutConfig {
        max_page_count: 50,
        ..horizontal()
    };
    let mut engine = engine_with(&format!("<p>{text}</p>"), "", config);
    let pages: Vec<Page> = engine.by_ref().collect();
    if engine.has_next_page() || pages.len() > 50 {
        return false;
    }
    // Without a recorded failure nothing may be lost on the way.
    !engine.diagnostics().is_empty() || all_lines(&pages).concat() == text
}

// ---------------------------------------------------------------------------
// Vertical flows
//
// [§ 3.1 Block Flow Direction](https://www.w3.org/TR/css-writing-modes-3/#block-flow)
//
// The measure runs along the page height and lines stack across its width.
// ---------------------------------------------------------------------------

fn first_line(layout_box: &LayoutBox) -> Option<&LayoutBox> {
    if layout_box.line_no.is_some() {
        return Some(layout_box);
    }
    layout_box.boxes().find_map(first_line)
}

fn assert_vertical_pagination(flow: BoxFlow) {
    let config = LayoutConfig {
        default_flow: flow,
        ..LayoutConfig::default()
    };
    let text = "あ".repeat(200);
    let mut engine = engine_with(&format!("<p>{text}</p>"), "", config);
    let pages: Vec<Page> = engine.by_ref().collect();

    assert_eq!(pages.len(), 12);
    assert_eq!(engine.line_count(), 34);
    assert_eq!(lines(&pages[0]), vec!["ああああああ"; 3]);
    assert_eq!(all_lines(&pages).concat(), text);
    let line = first_line(&pages[0].root).expect("a line on the first page");
    assert_eq!(line.flow, flow);
    assert!(engine.diagnostics().is_empty());
}

#[test]
fn test_vertical_rl_paginates() {
    assert_eq!(LayoutConfig::default().default_flow, BoxFlow::VerticalRl);
    assert_vertical_pagination(BoxFlow::VerticalRl);
}

#[test]
fn test_vertical_lr_paginates() {
    assert_vertical_pagination(BoxFlow::VerticalLr);
}

#[test]
fn test_vertical_stop_sweeps_back() {
    let pages: Vec<Page> =
        engine_with("<p>ああああああ。いい</p>", "", LayoutConfig::default()).collect();
    assert_eq!(all_lines(&pages), vec!["あああああ", "あ。いい"]);
}

// ---------------------------------------------------------------------------
// Lists, tables and floats
// ---------------------------------------------------------------------------

fn page_text(pages: &[Page]) -> String {
    pages.iter().map(|page| page.root.text()).collect()
}

#[test]
fn test_list_items_get_markers() {
    let pages: Vec<Page> = engine("<ul><li>あ</li><li>い</li></ul>").collect();
    let text = page_text(&pages);
    assert_eq!(text.matches('•').count(), 2);
    assert!(text.contains('あ'));
    assert!(text.contains('い'));
}

#[test]
fn test_ordered_list_markers_count_up() {
    let pages: Vec<Page> = engine("<ol><li>あ</li><li>い</li></ol>").collect();
    let text = page_text(&pages);
    assert!(text.contains("1."));
    assert!(text.contains("2."));
}

#[test]
fn test_table_cells_are_laid_out() {
    let pages: Vec<Page> =
        engine("<table><tr><td>あ</td><td>い</td></tr></table>").collect();
    let text = page_text(&pages);
    assert!(text.contains('あ'));
    assert!(text.contains('い'));
}

#[test]
fn test_float_and_flow_share_page() {
    let mut engine = engine(r#"<div style="float: start; measure: 40px">あ</div><p>い</p>"#);
    let pages: Vec<Page> = engine.by_ref().collect();
    assert_eq!(pages.len(), 1);
    let text = page_text(&pages);
    assert!(text.contains('あ'));
    assert!(text.contains('い'));
    assert!(!engine.has_next_page());
}

#[test]
fn test_image_beside_float_moves_below_it() {
    let mut engine = engine(
        r#"<div style="float: start; measure: 60px">あ</div><p><img width="50" height="16">い</p>"#,
    );
    let pages: Vec<Page> = engine.by_ref().collect();
    // 50px does not fit the 40px beside the float but fits the full line.
    let images: usize = pages.iter().map(|page| count_markup(&page.root, "img")).sum();
    assert_eq!(images, 1);
    let text = page_text(&pages);
    assert!(text.contains('あ'));
    assert!(text.contains('い'));
    assert!(!engine.has_next_page());
}

fn count_markup(layout_box: &LayoutBox, markup: &str) -> usize {
    usize::from(layout_box.markup == markup)
        + layout_box
            .boxes()
            .map(|child| count_markup(child, markup))
            .sum::<usize>()
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

#[test]
fn test_page_serializes_to_json() {
    let page = engine("<p>あい</p>").next().expect("one page");
    let json = serde_json::to_value(&page.root).expect("boxes serialize");
    assert_eq!(json["type"], "block");
    assert_eq!(json["markup"], "body");
    assert_eq!(json["size"]["width"], 100);
    assert_eq!(json["size"]["height"], 100);
}
