//! How headers and cells become measurable content.

use tabula_core::{ColumnDescriptor, TableRow};
use tabula_layout::{MeasureNode, TextStyle};

/// Produces the content nodes auto-fit measures for a column.
pub trait CellContent<R> {
    /// Header content. Defaults to the header text.
    fn header(&self, column: &ColumnDescriptor) -> MeasureNode {
        MeasureNode::text(column.header.clone())
    }

    /// Body cell content for one row.
    fn cell(&self, column: &ColumnDescriptor, row: &R) -> MeasureNode;
}

/// Renders every cell as its display text in a single style.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlainText {
    /// Style for body cells
    pub style: TextStyle,
    /// Style for headers
    pub header_style: TextStyle,
    /// Horizontal padding on each side of a cell
    pub padding: f32,
}

impl PlainText {
    /// Plain text with default styles and no padding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a bold header.
    #[must_use]
    pub fn bold_header(mut self) -> Self {
        self.header_style.bold = true;
        self
    }

    /// Set cell padding.
    #[must_use]
    pub const fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }
}

impl<R: TableRow> CellContent<R> for PlainText {
    fn header(&self, column: &ColumnDescriptor) -> MeasureNode {
        MeasureNode::text(column.header.clone())
            .style(self.header_style.clone())
            .padding(self.padding)
    }

    fn cell(&self, column: &ColumnDescriptor, row: &R) -> MeasureNode {
        MeasureNode::text(row.cell_value(&column.id).display())
            .style(self.style.clone())
            .padding(self.padding)
    }
}
