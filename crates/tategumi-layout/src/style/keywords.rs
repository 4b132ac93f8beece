//! Keyword-valued properties.
//!
//! Each enum parses its css keyword through `strum`'s `EnumString`, and
//! prints it back through `Display`.

use serde::Serialize;
use strum_macros::{AsRefStr, Display, EnumString};

/// [§ 2 Box Layout Modes](https://www.w3.org/TR/css-display-3/#the-display-properties)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum DisplayKind {
    /// Not laid out at all.
    None,
    /// Participates in a line.
    #[default]
    Inline,
    /// Stacks along the block axis.
    Block,
    /// A block laid out as one unit inside a line.
    InlineBlock,
    /// A block with a list marker.
    ListItem,
    /// A table wrapper.
    Table,
    /// A table caption.
    TableCaption,
    /// `<thead>`
    TableHeaderGroup,
    /// `<tbody>`
    TableRowGroup,
    /// `<tfoot>`
    TableFooterGroup,
    /// `<tr>`
    TableRow,
    /// `<td>`, `<th>`
    TableCell,
}

impl DisplayKind {
    /// Returns `true` for displays that stack along the block axis.
    #[must_use]
    pub const fn is_block_level(self) -> bool {
        !matches!(self, Self::None | Self::Inline | Self::InlineBlock)
    }

    /// Returns `true` for plain inline content.
    #[must_use]
    pub const fn is_inline(self) -> bool {
        matches!(self, Self::Inline)
    }

    /// Returns `true` for `inline-block`.
    #[must_use]
    pub const fn is_inline_block(self) -> bool {
        matches!(self, Self::InlineBlock)
    }

    /// Returns `true` for the table and its internal parts.
    #[must_use]
    pub const fn is_table_part(self) -> bool {
        matches!(
            self,
            Self::Table
                | Self::TableCaption
                | Self::TableHeaderGroup
                | Self::TableRowGroup
                | Self::TableFooterGroup
                | Self::TableRow
                | Self::TableCell
        )
    }
}

/// Which edges a size declaration includes.
///
/// `margin-box` is the default: a static measure covers the whole box,
/// margins included, which is what a page layout wants when it splits a
/// fixed page measure among sibling columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum BoxSizing {
    /// Size includes margin, border and padding.
    #[default]
    MarginBox,
    /// Size includes border and padding.
    BorderBox,
    /// Size is the content size.
    ContentBox,
}

/// [§ 3 White Space Processing](https://www.w3.org/TR/css-text-3/#white-space-property)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum WhiteSpace {
    /// Collapse runs of whitespace to one space.
    #[default]
    Normal,
    /// Keep whitespace; newlines break lines.
    #[strum(serialize = "pre", serialize = "pre-wrap", serialize = "pre-line")]
    Pre,
}

/// [§ 5.2 Breaking Rules for Letters](https://www.w3.org/TR/css-text-3/#word-break-property)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum WordBreak {
    /// Words wider than the line are cut, others move to the next line.
    #[default]
    Normal,
    /// Words are cut wherever the line ends.
    BreakAll,
    /// No line-start hyphenation sweep.
    KeepAll,
}

/// [§ 7.1 Text Alignment](https://www.w3.org/TR/css-text-3/#text-align-property)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum TextAlign {
    /// Align to the line start.
    #[default]
    #[strum(serialize = "start", serialize = "left", serialize = "justify")]
    Start,
    /// Align to the line end.
    #[strum(serialize = "end", serialize = "right")]
    End,
    /// Center within the line.
    Center,
}

/// Float direction, in logical terms.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum FloatDirection {
    /// Float to the inline start.
    #[strum(serialize = "start", serialize = "left")]
    Start,
    /// Float to the inline end.
    #[strum(serialize = "end", serialize = "right")]
    End,
}

/// Which float directions a block must clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ClearKind {
    /// Clear start floats.
    #[strum(serialize = "start", serialize = "left")]
    Start,
    /// Clear end floats.
    #[strum(serialize = "end", serialize = "right")]
    End,
    /// Clear both directions.
    Both,
}

/// [§ 3.1 Hanging Punctuation](https://www.w3.org/TR/css-text-3/#hanging-punctuation-property)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum HangingPunctuation {
    /// Never hang.
    #[default]
    None,
    /// A stop or comma at the end of a full line may hang.
    #[strum(serialize = "allow-end", serialize = "force-end")]
    AllowEnd,
}

/// [§ 3.1 Marker position](https://www.w3.org/TR/css-lists-3/#list-style-position-property)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ListStylePosition {
    /// Marker is laid out in its own column.
    #[default]
    Outside,
    /// Marker is the first inline content of the item.
    Inside,
}

/// [§ 3.2 Marker type](https://www.w3.org/TR/css-lists-3/#text-markers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ListStyleType {
    /// No marker.
    None,
    /// •
    #[default]
    Disc,
    /// ◦
    Circle,
    /// ▪
    Square,
    /// 1. 2. 3.
    Decimal,
    /// a. b. c.
    LowerAlpha,
    /// A. B. C.
    UpperAlpha,
    /// i. ii. iii.
    LowerRoman,
    /// I. II. III.
    UpperRoman,
    /// 一、二、三、
    CjkIdeographic,
}
