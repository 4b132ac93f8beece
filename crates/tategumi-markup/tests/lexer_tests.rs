//! Integration tests for the markup lexer and tag model.

use tategumi_markup::{HtmlLexer, MarkupToken, Tag};

/// Helper to lex a string into sibling tokens.
fn tokenize(input: &str) -> Vec<MarkupToken> {
    HtmlLexer::new(input).tokenize()
}

fn tag(token: &MarkupToken) -> &Tag {
    token.as_tag().expect("expected a tag token")
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("吾輩は猫である");
    assert_eq!(tokens, vec![MarkupToken::Text("吾輩は猫である".to_string())]);
}

#[test]
fn test_tag_swallows_content() {
    let tokens = tokenize("<p>本文<b>強調</b></p>後");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tag(&tokens[0]).name(), "p");
    assert_eq!(tag(&tokens[0]).content(), "本文<b>強調</b>");
    assert_eq!(tokens[1], MarkupToken::Text("後".to_string()));
}

#[test]
fn test_nested_same_name() {
    let tokens = tokenize("<div>a<div>b</div>c</div>");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tag(&tokens[0]).content(), "a<div>b</div>c");
}

#[test]
fn test_single_tags_have_no_content() {
    let tokens = tokenize("一<br>二<img src='a.png' width=100>");
    assert_eq!(tokens.len(), 4);
    assert_eq!(tag(&tokens[1]).name(), "br");
    assert!(tag(&tokens[1]).is_self_closing());
    assert_eq!(tag(&tokens[3]).attr("width"), Some("100"));
}

#[test]
fn test_comments_are_dropped() {
    let tokens = tokenize("<!-- note -->本<!DOCTYPE html>");
    assert_eq!(tokens, vec![MarkupToken::Text("本".to_string())]);
}

#[test]
fn test_stray_close_tag() {
    let tokens = tokenize("</p>本");
    assert!(tag(&tokens[0]).is_close_tag());
}

#[test]
fn test_entities_decoded() {
    let tokens = tokenize("a &lt; b &amp; c");
    assert_eq!(tokens, vec![MarkupToken::Text("a < b & c".to_string())]);
}

#[test]
fn test_unclosed_tag_takes_rest() {
    let tokens = tokenize("<p>前<p>後");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tag(&tokens[0]).content(), "前<p>後");
}

// ---------------------------------------------------------------------------
// Attributes
// ---------------------------------------------------------------------------

#[test]
fn test_attribute_forms() {
    let t = Tag::new(r#"<td class="a b" id='x' data-weight=3 hidden>"#);
    assert_eq!(t.name(), "td");
    assert_eq!(t.classes(), ["a".to_string(), "b".to_string()]);
    assert_eq!(t.id(), Some("x"));
    assert_eq!(t.attrs().data("weight"), Some("3"));
    assert!(t.attrs().has("hidden"));
}

#[test]
fn test_unclosed_attribute_literal_is_dropped() {
    let t = Tag::new(r#"<p class="open>"#);
    assert_eq!(t.name(), "p");
    assert!(t.classes().is_empty());
}

// ---------------------------------------------------------------------------
// Structural flags
// ---------------------------------------------------------------------------

#[test]
fn test_structural_flags() {
    let tokens = tokenize("<li>a</li> <li>b</li> <p>c</p>");
    let tags: Vec<&Tag> = tokens.iter().filter_map(MarkupToken::as_tag).collect();
    assert_eq!(tags.len(), 3);
    assert!(tags[0].flags().first_child);
    assert!(tags[0].flags().first_of_type);
    assert!(!tags[0].flags().last_of_type);
    assert!(tags[1].flags().last_of_type);
    assert!(tags[2].flags().last_child);
    assert!(tags[2].flags().only_of_type);
    assert!(!tags[2].flags().only_child);
}

#[test]
fn test_filtered_tokens() {
    let lexer = HtmlLexer::new("<td>1</td>\n<th>2</th><p>x</p>");
    let tokens = lexer.tokenize_filtered(&["td", "th"]);
    assert_eq!(tokens.len(), 2);
    assert!(tag(&tokens[1]).flags().last_child);
}
