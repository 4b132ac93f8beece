//! Integration tests for rendering contexts: adding elements, the rollback
//! cache and its bound.

use std::rc::Rc;

use quickcheck_macros::quickcheck;
use tategumi_layout::{
    ApproximateFontMetrics, BoxEdge, BoxFlow, BoxSize, BoxType, ContextId, ContextState, Element,
    LayoutBox, LayoutConfig, LayoutEngine, LayoutError, LayoutResult, LogicalSide, StyleSheet,
    TextToken,
};

const FLOW: BoxFlow = BoxFlow::HorizontalTb;

/// An engine on a horizontal 100x100 page with an inline root ready to
/// take elements.
fn line_engine() -> (LayoutEngine, ContextId) {
    let (mut engine, root) = block_engine();
    let inline = engine.create_inline_root(root);
    engine.init_layout_context(inline);
    (engine, inline)
}

/// An engine on a horizontal 100x100 page with its body ready to take
/// block-level boxes.
fn block_engine() -> (LayoutEngine, ContextId) {
    let config = LayoutConfig {
        default_flow: FLOW,
        ..LayoutConfig::default()
    };
    let mut engine = LayoutEngine::new(
        "<p>本文</p>",
        100,
        100,
        config,
        Rc::new(StyleSheet::user_agent()),
    )
    .expect("page size is valid");
    let root = engine.root_context();
    engine.init_layout_context(root);
    (engine, root)
}

fn text_box(measure: i32) -> LayoutBox {
    LayoutBox::new(
        BoxType::TextBlock,
        FLOW,
        BoxSize {
            width: measure,
            height: 16,
        },
    )
}

fn block_box(extent: i32) -> LayoutBox {
    LayoutBox::new(
        BoxType::Block,
        FLOW,
        BoxSize {
            width: 100,
            height: extent,
        },
    )
}

/// Helper: a block box with margins on its before and after sides.
fn block_with_margins(extent: i32, before: i32, after: i32) -> LayoutBox {
    let mut edge = BoxEdge::default();
    edge.margin.set(FLOW, LogicalSide::Before, before);
    edge.margin.set(FLOW, LogicalSide::After, after);
    let mut output = block_box(extent);
    output.edge = Some(edge);
    output
}

fn measured_char(c: char) -> TextToken {
    let mut token = TextToken::char(c);
    token.set_metrics(&ApproximateFontMetrics, 16, FLOW, &LayoutConfig::default());
    token
}

fn cur_extent(engine: &LayoutEngine, id: ContextId) -> i32 {
    engine
        .context(id)
        .layout()
        .expect("context was initialized")
        .block
        .cur_extent
}

fn block_break_after(engine: &LayoutEngine, id: ContextId) -> bool {
    engine
        .context(id)
        .layout()
        .expect("context was initialized")
        .block
        .break_after
}

fn cur_measure(engine: &LayoutEngine, id: ContextId) -> i32 {
    engine
        .context(id)
        .layout()
        .expect("context was initialized")
        .inline
        .cur_measure
}

#[test]
fn test_fresh_context() {
    let (engine, inline) = line_engine();
    assert!(engine.is_inline_root(inline));
    assert!(engine.is_fresh(inline));
    assert_eq!(engine.context_max_measure(inline), 100);
    assert_eq!(engine.context(inline).state(), ContextState::Accumulating);
}

#[test]
fn test_element_that_fits_is_added() {
    let (mut engine, inline) = line_engine();
    assert_eq!(engine.add_inline_element(inline, Some(text_box(40))), LayoutResult::Ok);
    assert_eq!(cur_measure(&engine, inline), 40);
    assert!(!engine.is_fresh(inline));
}

#[test]
fn test_exact_fit_ends_line() {
    let (mut engine, inline) = line_engine();
    assert_eq!(
        engine.add_inline_element(inline, Some(text_box(100))),
        LayoutResult::Overflow
    );
    assert_eq!(cur_measure(&engine, inline), 100);
    assert!(engine.context(inline).cached().is_empty());
}

#[test]
fn test_no_element_is_eof() {
    let (mut engine, inline) = line_engine();
    assert_eq!(engine.add_inline_element(inline, None), LayoutResult::Eof);
}

#[test]
fn test_zero_measure_element() {
    let (mut engine, inline) = line_engine();
    assert_eq!(engine.add_inline_element(inline, Some(text_box(0))), LayoutResult::Zero);
}

// ---------------------------------------------------------------------------
// Overflow and the rollback cache
//
// An element that does not fit now may fit on the next line, so it is
// cached. An element wider than any line of the page never fits and is
// skipped.
// ---------------------------------------------------------------------------

#[test]
fn test_unfittable_element_is_skipped_not_cached() {
    let (mut engine, inline) = line_engine();
    assert_eq!(
        engine.add_inline_element(inline, Some(text_box(150))),
        LayoutResult::Skip
    );
    assert!(engine.context(inline).cached().is_empty());
    assert_eq!(cur_measure(&engine, inline), 0);
}

#[test]
fn test_overflowing_element_is_cached() {
    let (mut engine, inline) = line_engine();
    assert_eq!(engine.add_inline_element(inline, Some(text_box(95))), LayoutResult::Ok);
    assert_eq!(
        engine.add_inline_element(inline, Some(text_box(20))),
        LayoutResult::Overflow
    );
    assert_eq!(cur_measure(&engine, inline), 95);
    let cached = engine.context(inline).cached();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].as_box().map(|b| b.size.width), Some(20));
}

#[test]
fn test_cache_replays_last_in_first_out() {
    let (mut engine, inline) = line_engine();
    assert_eq!(engine.push_cache(inline, text_box(10).into()), LayoutResult::Ok);
    assert_eq!(engine.push_cache(inline, text_box(20).into()), LayoutResult::Ok);
    let first = engine.pop_cache(inline).expect("two elements cached");
    let second = engine.pop_cache(inline).expect("one element cached");
    assert_eq!(first.as_box().map(|b| b.size.width), Some(20));
    assert_eq!(second.as_box().map(|b| b.size.width), Some(10));
    assert!(engine.pop_cache(inline).is_none());
}

#[test]
fn test_replay_clears_line_end_flags() {
    let (mut engine, inline) = line_engine();
    let mut element = text_box(30);
    element.break_after = true;
    element.line_over = true;
    assert_eq!(engine.push_cache(inline, element.into()), LayoutResult::Ok);
    let Some(Element::Box(replayed)) = engine.pop_cache(inline) else {
        panic!("expected the cached box back");
    };
    assert!(!replayed.break_after);
    assert!(!replayed.line_over);
    assert_eq!(replayed.size.width, 30);
    assert_eq!(replayed.cache_count, 1);
}

#[test]
fn test_replayed_element_fits_next_line() {
    let (mut engine, inline) = line_engine();
    let _ = engine.add_inline_element(inline, Some(text_box(95)));
    let _ = engine.add_inline_element(inline, Some(text_box(20)));

    engine.init_layout_context(inline);
    let Some(Element::Box(replayed)) = engine.pop_cache(inline) else {
        panic!("expected the overflowed box");
    };
    assert_eq!(engine.add_inline_element(inline, Some(*replayed)), LayoutResult::Ok);
    assert_eq!(cur_measure(&engine, inline), 20);
}

#[test]
fn test_rollback_bound_terminates_context() {
    let (mut engine, inline) = line_engine();
    let max = engine.config().max_rollback_count;
    let mut result = engine.push_cache(inline, text_box(10).into());
    let mut pushes = 1;
    while result == LayoutResult::Ok {
        let element = engine.pop_cache(inline).expect("element was cached");
        result = engine.push_cache(inline, element);
        pushes += 1;
    }
    assert_eq!(result, LayoutResult::TooManyRollback);
    assert_eq!(pushes, max);
    assert_eq!(engine.context(inline).state(), ContextState::Terminated);
    assert!(engine.context(inline).cached().is_empty());
    assert!(matches!(
        engine.diagnostics(),
        [LayoutError::RollbackExhausted { count, .. }] if *count == max
    ));
}

#[test]
fn test_element_wider_than_narrow_line_waits_in_cache() {
    let (mut engine, inline) = line_engine();
    // A line shortened by a float: the box fits the page, just not here.
    engine.layout_mut(inline).expect("initialized").inline.max_measure = 50;
    assert_eq!(
        engine.add_inline_element(inline, Some(text_box(60))),
        LayoutResult::Overflow
    );
    assert_eq!(engine.context(inline).cached().len(), 1);
    assert_eq!(cur_measure(&engine, inline), 0);
}

#[test]
fn test_text_wider_than_narrow_line_waits_in_cache() {
    let (mut engine, inline) = line_engine();
    engine.layout_mut(inline).expect("initialized").inline.max_measure = 10;
    assert_eq!(
        engine.add_text_element(inline, Some(measured_char('あ'))),
        LayoutResult::Overflow
    );
    assert_eq!(engine.context(inline).cached().len(), 1);
    assert_eq!(cur_measure(&engine, inline), 0);
}

#[test]
fn test_text_wider_than_page_is_skipped() {
    let (mut engine, inline) = line_engine();
    let mut token = measured_char('あ');
    token.body_size = 150;
    assert_eq!(engine.add_text_element(inline, Some(token)), LayoutResult::Skip);
    assert!(engine.context(inline).cached().is_empty());
}

// ---------------------------------------------------------------------------
// Block elements
//
// [§ 8.3.1 Collapsing margins](https://www.w3.org/TR/CSS2/box.html#collapsing-margins)
//
// A block that does not fit gives up its after edge first. What still does
// not fit waits in the cache for the next page.
// ---------------------------------------------------------------------------

#[test]
fn test_no_block_is_eof() {
    let (mut engine, root) = block_engine();
    assert_eq!(engine.add_block_element(root, None), LayoutResult::Eof);
}

#[test]
fn test_block_that_fits_is_added() {
    let (mut engine, root) = block_engine();
    assert_eq!(engine.add_block_element(root, Some(block_box(40))), LayoutResult::Ok);
    assert_eq!(cur_extent(&engine, root), 40);
    assert!(!engine.is_fresh(root));
}

#[test]
fn test_block_filling_page_breaks_after() {
    let (mut engine, root) = block_engine();
    assert_eq!(engine.add_block_element(root, Some(block_box(60))), LayoutResult::Ok);
    assert_eq!(
        engine.add_block_element(root, Some(block_box(40))),
        LayoutResult::BreakAfter
    );
    assert_eq!(cur_extent(&engine, root), 100);
    assert!(block_break_after(&engine, root));
}

#[test]
fn test_block_after_edge_is_cancelled_to_fit() {
    let (mut engine, root) = block_engine();
    assert_eq!(engine.add_block_element(root, Some(block_box(70))), LayoutResult::Ok);
    // 20 of content and a 20 after margin: losing 10 of the margin fits.
    assert_eq!(
        engine.add_block_element(root, Some(block_with_margins(20, 0, 20))),
        LayoutResult::BreakAfter
    );
    assert_eq!(cur_extent(&engine, root), 100);
    assert!(engine.context(root).cached().is_empty());
}

#[test]
fn test_overflowing_block_is_cached() {
    let (mut engine, root) = block_engine();
    assert_eq!(engine.add_block_element(root, Some(block_box(70))), LayoutResult::Ok);
    assert_eq!(
        engine.add_block_element(root, Some(block_box(40))),
        LayoutResult::BreakAfter
    );
    assert_eq!(cur_extent(&engine, root), 70);
    assert!(block_break_after(&engine, root));
    let cached = engine.context(root).cached();
    assert_eq!(cached.len(), 1);
    assert_eq!(cached[0].as_box().map(|b| b.size.height), Some(40));
}

#[test]
fn test_block_larger_than_page_is_skipped() {
    let (mut engine, root) = block_engine();
    assert_eq!(engine.add_block_element(root, Some(block_box(150))), LayoutResult::Skip);
    assert!(engine.context(root).cached().is_empty());
    assert_eq!(cur_extent(&engine, root), 0);
}

#[test]
fn test_oversize_block_trimmed_to_page() {
    let (mut engine, root) = block_engine();
    // 120 in all, but without its after margin the block fills the page.
    assert_eq!(
        engine.add_block_element(root, Some(block_with_margins(90, 10, 20))),
        LayoutResult::BreakAfter
    );
    assert_eq!(cur_extent(&engine, root), 100);
}

#[test]
fn test_oversize_block_still_too_large_is_skipped() {
    let (mut engine, root) = block_engine();
    assert_eq!(
        engine.add_block_element(root, Some(block_with_margins(95, 10, 10))),
        LayoutResult::Skip
    );
    assert!(engine.context(root).cached().is_empty());
}

#[test]
fn test_child_break_after_is_inherited() {
    let (mut engine, root) = block_engine();
    let mut child = block_box(10);
    child.break_after = true;
    assert_eq!(engine.add_block_element(root, Some(child)), LayoutResult::BreakAfter);
    assert_eq!(cur_extent(&engine, root), 10);
    assert!(block_break_after(&engine, root));
}

#[test]
fn test_void_block() {
    let (mut engine, root) = block_engine();
    assert_eq!(engine.add_block_element(root, Some(block_box(0))), LayoutResult::Skip);
    assert!(!block_break_after(&engine, root));

    let mut page_break = block_box(0);
    page_break.break_after = true;
    assert_eq!(
        engine.add_block_element(root, Some(page_break)),
        LayoutResult::BreakAfter
    );
    assert_eq!(cur_extent(&engine, root), 0);
    assert!(block_break_after(&engine, root));
}

#[test]
fn test_oversize_markup_names_inner_box() {
    let mut image = block_box(150);
    image.markup = "img".to_string();
    let mut text = text_box(20);
    text.markup = "p".to_string();
    let mut line = LayoutBox::new(
        BoxType::LineBlock,
        FLOW,
        BoxSize {
            width: 100,
            height: 150,
        },
    );
    line.markup = "body".to_string();
    line.elements = vec![Element::from(text), Element::from(image)];
    assert_eq!(line.oversize_markup(FLOW, 100), "img");
    assert_eq!(line.oversize_markup(FLOW, 200), "body");
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[quickcheck]
fn prop_line_stays_within_budget(measures: Vec<u8>) -> bool {
    let (mut engine, inline) = line_engine();
    for measure in measures {
        let measure = i32::from(measure);
        let result = engine.add_inline_element(inline, Some(text_box(measure)));
        if result == LayoutResult::Skip && measure <= 100 {
            return false;
        }
        let line = &engine
            .context(inline)
            .layout()
            .expect("context was initialized")
            .inline;
        if line.cur_measure > line.max_measure {
            return false;
        }
    }
    true
}

#[quickcheck]
fn prop_replayed_element_behaves_like_fresh_one(fill: u8, measure: u8, replays: u8) -> bool {
    let fill = 1 + i32::from(fill % 100);
    let measure = 1 + i32::from(measure % 100);
    if fill + measure <= 100 {
        return true;
    }

    let (mut fresh_engine, fresh_inline) = line_engine();
    let expected = fresh_engine.add_inline_element(fresh_inline, Some(text_box(measure)));

    let (mut engine, inline) = line_engine();
    let _ = engine.add_inline_element(inline, Some(text_box(fill)));
    if engine.add_inline_element(inline, Some(text_box(measure))) != LayoutResult::Overflow {
        return false;
    }
    engine.init_layout_context(inline);
    // Replaying more than once, below the bound, changes nothing.
    let bound = engine.config().max_rollback_count;
    for _ in 0..u32::from(replays) % (bound - 1) {
        let Some(element) = engine.pop_cache(inline) else {
            return false;
        };
        if engine.push_cache(inline, element) != LayoutResult::Ok {
            return false;
        }
    }
    let Some(Element::Box(replayed)) = engine.pop_cache(inline) else {
        return false;
    };
    let result = engine.add_inline_element(inline, Some(*replayed));
    result == expected && cur_measure(&engine, inline) == cur_measure(&fresh_engine, fresh_inline)
}
