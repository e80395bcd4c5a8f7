//! Terminal rendering of the item table, form state and notices.

use std::io::{self, Write};

use invoice_core::{
    InvoiceFormController, ItemTable, SaveError, SaveReceipt, ValidationError, TABLE_HEADERS,
};
use shared::domain::FieldId;
use tracing::warn;

fn format_row(cells: [&str; 6]) -> String {
    format!(
        "{:<24} {:<10} {:>8} {:>10} {:>6} {:>12}",
        cells[0], cells[1], cells[2], cells[3], cells[4], cells[5]
    )
}

/// Prints the table to a writer every time it is rebuilt.
pub struct TerminalTable<W: Write> {
    out: W,
}

impl<W: Write> TerminalTable<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    fn write_line(&mut self, cells: [&str; 6]) {
        if let Err(err) = writeln!(self.out, "{}", format_row(cells)) {
            warn!(error = %err, "failed to print item table row");
        }
    }
}

impl<W: Write> ItemTable for TerminalTable<W> {
    fn clear_rows(&mut self) {
        self.write_line(TABLE_HEADERS);
    }

    fn push_row(&mut self, cells: [&str; 6]) {
        self.write_line(cells);
    }
}

pub fn write_form<T: ItemTable>(
    out: &mut impl Write,
    controller: &InvoiceFormController<T>,
) -> io::Result<()> {
    for field in FieldId::all() {
        writeln!(out, "{:<12} {}", field.as_str(), controller.field(field))?;
    }
    writeln!(out)?;
    writeln!(out, "{}", format_row(TABLE_HEADERS))?;
    for item in controller.items() {
        writeln!(out, "{}", format_row(item.cells()))?;
    }
    writeln!(out, "{}", controller.totals().summary_line())?;
    writeln!(out, "[{}]", controller.save_state().save_label())
}

pub fn fields_help() -> String {
    FieldId::all()
        .map(FieldId::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn validation_notice(err: ValidationError) -> String {
    format!("error: {}", err.user_message())
}

pub fn save_error_notice(err: &SaveError) -> String {
    match err {
        SaveError::Validation(validation) => validation_notice(*validation),
        SaveError::InProgress => "busy: a save is already in progress".to_string(),
        SaveError::Server { message, .. } => format!("error saving invoice: {message}"),
        SaveError::Transport(_) => format!("network error: {err}"),
        SaveError::Download(_) => format!("error: {err}"),
    }
}

pub fn save_success_notice(receipt: &SaveReceipt) -> String {
    format!("ok: {}", receipt.notice())
}
