//! Starting a float root.

use tategumi_common::warning::warn_once;
use tategumi_markup::{MarkupToken, Tag};

use crate::error::LayoutError;
use crate::generator::GeneratorKind;
use crate::layout::LayoutBox;
use crate::rendering::create::force_css;
use crate::rendering::{ContextId, LayoutEngine, RenderingContext};
use crate::style::StyleId;
use crate::style::values::CssMap;

impl LayoutEngine {
    /// Start a float root for the floated `style` just read by `parent`.
    ///
    /// The floats that follow it directly, and fit beside it, join the same
    /// root. The rest of `parent`'s content becomes the float space. A
    /// first float that cannot be placed here is retried after a white
    /// space fills the rest of the page, or dropped when the page is empty.
    pub(crate) fn create_float_generator(
        &mut self,
        parent: ContextId,
        style: StyleId,
    ) -> Result<Option<LayoutBox>, LayoutError> {
        let Some((max_measure, rest_extent)) = self
            .layout_of(parent)
            .map(|l| (l.inline.max_measure, l.rest_extent()))
        else {
            return Ok(None);
        };
        let node = self.styles.get(style);
        let float_measure = node.measure;
        let too_large =
            float_measure > max_measure || node.static_extent.is_some_and(|e| e > rest_extent);
        if too_large {
            if self.is_fresh(parent) {
                warn_once(
                    "Layout",
                    &format!(
                        "float <{}> does not fit in an empty page, skipped",
                        self.styles.get(style).markup_name()
                    ),
                );
                self.styles.remove_child(style);
                return Ok(None);
            }
            self.rewind_markup(parent)?;
            self.styles.remove_child(style);
            let space = self.create_white_space(parent);
            let parent_style = self.ctx(parent).style;
            let child = self.create_lazy_context(parent, parent_style, space);
            self.ctx_mut(parent).child = Some(child);
            return Ok(None);
        }

        // STEP 1: Collect the floats that follow.
        let mut floats = vec![style];
        let mut total = float_measure;
        let parent_style = self.ctx(parent).style;
        loop {
            let Some(token) = self.markup_stream(parent).and_then(|s| s.peek(0).cloned()) else {
                break;
            };
            let tag = match token {
                MarkupToken::Text(text) if text.chars().all(char::is_whitespace) => {
                    let _ = self.markup_stream(parent).and_then(|s| s.get());
                    continue;
                }
                MarkupToken::Tag(tag) if !tag.is_close_tag() => tag,
                _ => break,
            };
            let next = self.create_style(tag.clone(), Some(parent_style), &CssMap::new());
            let (floated, measure) = {
                let node = self.styles.get(next);
                (node.is_floated(), node.measure)
            };
            if !floated || total + measure > max_measure {
                self.styles.remove_child(next);
                break;
            }
            total += measure;
            let _ = self.markup_stream(parent).and_then(|s| s.get());
            self.register_anchor(&tag);
            floats.push(next);
        }

        // STEP 2: The float root, its floats and its space.
        let root_style = self.create_style(
            Tag::with_content("float-root", ""),
            Some(parent_style),
            &force_css([("display", "block".into())]),
        );
        let root = self.add_context(RenderingContext::new(
            root_style,
            None,
            Some(parent),
            GeneratorKind::Float,
        ));
        for float in floats {
            let child = self.create_child_block_generator(root, float);
            self.ctx_mut(root).floats.push(child);
        }
        self.ctx_mut(root).child = None;

        let space_style = self.create_style(
            Tag::with_content("float-space", ""),
            Some(root_style),
            &force_css([("display", "block".into())]),
        );
        let mut space = RenderingContext::new(
            space_style,
            self.ctx(parent).stream,
            Some(root),
            GeneratorKind::Block,
        );
        space.float_space = true;
        let space = self.add_context(space);
        self.ctx_mut(root).space = Some(space);
        self.ctx_mut(parent).child = Some(root);
        Ok(None)
    }
}
