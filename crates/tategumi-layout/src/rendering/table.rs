//! Tables.
//!
//! [§ 17.5.2.2 Automatic table layout](https://www.w3.org/TR/CSS2/tables.html#auto-table-layout)
//!
//! The table scans its rows once before layout. Each cell's weight is an
//! estimate of its longest line, clamped between an even share and half the
//! table measure; rows with the same cell count are merged so their columns
//! line up. A row then lays its cells out as parallel columns.

use tategumi_markup::{HtmlLexer, MarkupToken, Tag};

use crate::generator::GeneratorKind;
use crate::layout::{Partition, PartitionSet, PartitionUnit};
use crate::rendering::create::force_css;
use crate::rendering::{ContextId, LayoutEngine, RenderingContext};
use crate::style::StyleId;
use crate::style::values::CssValue;

impl LayoutEngine {
    /// A `<table>` context with its column partitions.
    pub(crate) fn create_table(&mut self, parent: ContextId, style: StyleId) -> ContextId {
        let table = self.create_markup_context(parent, style, GeneratorKind::Table);
        let node = self.styles.get(style);
        let mut partitions = PartitionSet::new();
        scan_rows(&node.content, node.content_measure, node.font.size, &mut partitions);
        self.ctx_mut(table).table_partition = Some(partitions);
        table
    }

    /// A `<tr>` context whose cells are columns sized by the nearest table.
    pub(crate) fn create_table_row(&mut self, parent: ContextId, style: StyleId) -> ContextId {
        let row = self.add_context(RenderingContext::new(style, None, Some(parent), GeneratorKind::TableRow));
        let node = self.styles.get(style);
        let measure = node.content_measure;
        let cells = cell_tags(&node.content);
        let sizes = self
            .lineage(parent)
            .find_map(|c| self.ctx(c).table_partition.as_ref())
            .cloned()
            .unwrap_or_default()
            .get_sizes(cells.len(), measure);

        let mut columns = Vec::with_capacity(cells.len());
        for (cell, size) in cells.into_iter().zip(sizes) {
            let cell_style = self.create_style(
                cell,
                Some(style),
                &force_css([
                    ("display", "table-cell".into()),
                    ("measure", CssValue::Int(size)),
                ]),
            );
            columns.push(self.create_markup_context(row, cell_style, GeneratorKind::TableCell));
        }
        self.ctx_mut(row).parallel = columns;
        row
    }
}

/// Add a partition for every row in `content`, row groups included.
fn scan_rows(content: &str, measure: i32, font_size: i32, partitions: &mut PartitionSet) {
    for token in HtmlLexer::new(content).tokenize() {
        let MarkupToken::Tag(tag) = token else {
            continue;
        };
        match tag.name() {
            "thead" | "tbody" | "tfoot" => scan_rows(tag.content(), measure, font_size, partitions),
            "tr" if !tag.is_close_tag() => {
                let cells = cell_tags(tag.content());
                let count = cells.len();
                let units = cells
                    .iter()
                    .map(|cell| cell_unit(cell, count, measure, font_size))
                    .collect();
                partitions.add(count, Partition::new(units));
            }
            _ => {}
        }
    }
}

fn cell_tags(content: &str) -> Vec<Tag> {
    HtmlLexer::new(content)
        .tokenize()
        .into_iter()
        .filter_map(|token| match token {
            MarkupToken::Tag(tag) if matches!(tag.name(), "td" | "th") && !tag.is_close_tag() => Some(tag),
            _ => None,
        })
        .collect()
}

/// The claim of one cell among `count` on a row of `measure`.
///
/// An explicit size pins the column. Otherwise the weight is the longest
/// line of the raw cell markup in ems, at least an even share and at most
/// half the row. Tags count as text, so markup-heavy cells weigh more.
fn cell_unit(cell: &Tag, count: usize, measure: i32, font_size: i32) -> PartitionUnit {
    let fixed = cell
        .attr("measure")
        .or_else(|| cell.attr("width"))
        .and_then(|size| size.trim().trim_end_matches("px").parse::<i32>().ok());
    if let Some(size) = fixed {
        return PartitionUnit::fixed(size);
    }
    let max_weight = measure / 2;
    let min_weight = measure / (2 * i32::try_from(count.max(1)).unwrap_or(i32::MAX));
    let longest = cell
        .content()
        .replace("<br />", "\n")
        .replace("<br>", "\n")
        .split('\n')
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let length = i32::try_from(longest).unwrap_or(i32::MAX).saturating_mul(font_size);
    PartitionUnit::new(font_size.max(min_weight.max(length.min(max_weight))))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: the units of the first row of `content`.
    fn row_units(content: &str, measure: i32, font_size: i32) -> Vec<PartitionUnit> {
        let cells = cell_tags(content);
        cells
            .iter()
            .map(|cell| cell_unit(cell, cells.len(), measure, font_size))
            .collect()
    }

    #[test]
    fn test_cell_weight_counts_markup() {
        let units = row_units(r#"<td><span class="x">あ</span></td><td>いいい</td>"#, 600, 16);
        assert_eq!(units, vec![PartitionUnit::new(300), PartitionUnit::new(150)]);
    }

    #[test]
    fn test_cell_weight_longest_br_line() {
        let units = row_units("<td>あ<br>いいいい</td><td>う<br />え</td><td>お</td>", 600, 16);
        // Four and one characters, both raised to an even share of 100.
        assert_eq!(
            units,
            vec![PartitionUnit::new(100), PartitionUnit::new(100), PartitionUnit::new(100)]
        );
        let units = row_units("<td>いいいいいいいいいい<br>あ</td><td>お</td>", 600, 16);
        assert_eq!(units, vec![PartitionUnit::new(160), PartitionUnit::new(150)]);
    }

    #[test]
    fn test_cell_measure_attribute_pins_column() {
        let units = row_units(r#"<td measure="120" width="80">あ</td><td width="90px">い</td>"#, 600, 16);
        assert_eq!(units, vec![PartitionUnit::fixed(120), PartitionUnit::fixed(90)]);
    }

    #[test]
    fn test_scan_rows_merges_row_groups() {
        let mut partitions = PartitionSet::new();
        scan_rows(
            "<thead><tr><td>あ</td><td>い</td></tr></thead><tr><td>う</td><td>え</td></tr>",
            600,
            16,
            &mut partitions,
        );
        assert_eq!(partitions.get_sizes(2, 600), vec![300, 300]);
    }
}
