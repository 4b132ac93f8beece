//! User-Agent Stylesheet
//!
//! [WHATWG HTML § 15 Rendering](https://html.spec.whatwg.org/multipage/rendering.html)
//!
//! "User agents are expected to have a default style sheet that presents elements
//! of HTML documents in ways consistent with general user expectations."
//!
//! Edges are written with flow-relative names (`margin-block-start` and
//! friends) so the same sheet serves vertical and horizontal pages.

/// Default rules for the markup the engine lays out.
pub const UA_STYLESHEET: &str = r#"
/* [§ 15.3.1 Hidden elements](https://html.spec.whatwg.org/multipage/rendering.html#hidden-elements) */
area, base, datalist, head, link, meta, noembed, noframes, param, rp,
script, style, template, title {
    display: none;
}

/* [§ 15.3.3 Flow content](https://html.spec.whatwg.org/multipage/rendering.html#flow-content-3) */
address, article, aside, blockquote, body, center, dd, details, div, dl, dt,
fieldset, figcaption, figure, footer, form, h1, h2, h3, h4, h5, h6, header,
hr, html, main, nav, ol, p, pre, section, summary, ul, li-body, float-root,
float-space {
    display: block;
}

p {
    margin-block-end: 1em;
}

blockquote {
    margin-inline-start: 2em;
    margin-block-start: 1em;
    margin-block-end: 1em;
}

hr {
    margin-block-start: 0.5em;
    margin-block-end: 0.5em;
}

pre {
    white-space: pre;
}

/* [§ 15.3.6 Sections and headings](https://html.spec.whatwg.org/multipage/rendering.html#sections-and-headings) */
h1 {
    font-size: 2em;
    font-weight: bold;
    margin-block-end: 0.5em;
}

h2 {
    font-size: 1.5em;
    font-weight: bold;
    margin-block-end: 0.5em;
}

h3 {
    font-size: 1.17em;
    font-weight: bold;
    margin-block-end: 0.5em;
}

h4, h5, h6 {
    font-weight: bold;
    margin-block-end: 0.5em;
}

/* [§ 15.3.7 Lists](https://html.spec.whatwg.org/multipage/rendering.html#lists) */
li {
    display: list-item;
}

ul {
    list-style-type: disc;
    margin-block-end: 1em;
}

ol {
    list-style-type: decimal;
    margin-block-end: 1em;
}

::marker {
    display: inline;
}

/* [§ 15.3.8 Tables](https://html.spec.whatwg.org/multipage/rendering.html#tables-2) */
table {
    display: table;
    margin-block-end: 1em;
}

caption {
    display: table-caption;
}

thead {
    display: table-header-group;
}

tbody {
    display: table-row-group;
}

tfoot {
    display: table-footer-group;
}

tr {
    display: table-row;
}

td, th {
    display: table-cell;
}

th {
    font-weight: bold;
}

/* [§ 15.3.4 Phrasing content](https://html.spec.whatwg.org/multipage/rendering.html#phrasing-content-3) */
b, strong {
    font-weight: bold;
}

em, i, cite, var, dfn {
    font-style: italic;
}

small {
    font-size: small;
}

rt {
    font-size: 0.5em;
}

tcy {
    text-combine-upright: all;
}
"#;
