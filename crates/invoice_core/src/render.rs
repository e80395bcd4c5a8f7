//! Item table rendering seam.

use shared::protocol::LineItem;

pub const TABLE_HEADERS: [&str; 6] = ["Description", "HSN/SAC", "Qty", "Rate", "GST %", "Total"];

/// Destination for rendered item rows, e.g. a table body in some UI.
pub trait ItemTable {
    fn clear_rows(&mut self);
    fn push_row(&mut self, cells: [&str; 6]);
}

/// Clears the table and emits one row per item in list order. Cells are the
/// stored text, unformatted.
pub fn render_item_table(table: &mut dyn ItemTable, items: &[LineItem]) {
    table.clear_rows();
    for item in items {
        table.push_row(item.cells());
    }
    tracing::debug!(rows = items.len(), "rendered item table");
}

/// Keeps rendered rows in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingTable {
    pub rows: Vec<[String; 6]>,
    pub renders: usize,
}

impl ItemTable for RecordingTable {
    fn clear_rows(&mut self) {
        self.rows.clear();
        self.renders += 1;
    }

    fn push_row(&mut self, cells: [&str; 6]) {
        self.rows.push(cells.map(str::to_string));
    }
}
