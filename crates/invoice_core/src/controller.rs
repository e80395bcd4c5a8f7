//! The invoice form controller: owns the form fields and the item list and
//! exposes one handler per form action.

use std::{path::PathBuf, sync::Arc};

use chrono::{NaiveDate, Utc};
use shared::{
    domain::FieldId,
    protocol::{document_filename, InvoicePayload, LineItem},
};
use tracing::{debug, error, info, warn};

use crate::{
    download::DownloadSink,
    error::{SaveError, TransportError, ValidationError},
    form::FormFields,
    item::build_line_item,
    render::{render_item_table, ItemTable},
    totals::InvoiceTotals,
    transport::{InvoiceTransport, SubmitOutcome},
};

pub type Clock = Arc<dyn Fn() -> NaiveDate + Send + Sync>;

pub fn utc_today() -> NaiveDate {
    Utc::now().date_naive()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Idle,
    Saving,
}

impl SaveState {
    pub fn save_label(self) -> &'static str {
        match self {
            SaveState::Idle => "Save Invoice",
            SaveState::Saving => "Saving...",
        }
    }

    pub fn save_enabled(self) -> bool {
        self == SaveState::Idle
    }
}

/// A save that passed validation and is waiting on the transport.
#[derive(Debug, Clone)]
pub struct PendingSave {
    payload: InvoicePayload,
    filename: String,
}

impl PendingSave {
    pub fn payload(&self) -> &InvoicePayload {
        &self.payload
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    pub invoice_number: String,
    pub filename: String,
    pub path: PathBuf,
    pub size_bytes: usize,
}

impl SaveReceipt {
    pub fn notice(&self) -> String {
        format!("Invoice saved and downloaded to {}", self.path.display())
    }
}

pub struct InvoiceFormController<T: ItemTable> {
    form: FormFields,
    items: Vec<LineItem>,
    save_state: SaveState,
    table: T,
    clock: Clock,
}

impl<T: ItemTable> InvoiceFormController<T> {
    pub fn new(table: T) -> Self {
        Self::with_clock(table, Arc::new(utc_today))
    }

    pub fn with_clock(table: T, clock: Clock) -> Self {
        let mut controller = Self {
            form: FormFields::default(),
            items: Vec::new(),
            save_state: SaveState::Idle,
            table,
            clock,
        };
        controller.reset_dates();
        controller
    }

    pub fn field(&self, field: impl Into<FieldId>) -> &str {
        self.form.get(field)
    }

    pub fn set_field(&mut self, field: impl Into<FieldId>, value: impl Into<String>) {
        self.form.set(field, value);
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    pub fn save_state(&self) -> SaveState {
        self.save_state
    }

    pub fn totals(&self) -> InvoiceTotals {
        InvoiceTotals::from_items(&self.items)
    }

    /// Builds an item from the entry fields, appends it and clears the entry
    /// fields. Nothing changes when validation fails.
    pub fn add_item(&mut self) -> Result<&LineItem, ValidationError> {
        let item = build_line_item(self.form.item_draft())?;
        debug!(
            description = %item.description,
            total = %item.total_cost,
            "item added"
        );
        self.items.push(item);
        self.render();
        self.form.clear_item_entry();
        Ok(self.items.last().expect("item was just appended"))
    }

    /// Empties the customer fields and the item list and resets both dates.
    pub fn clear_all(&mut self) {
        self.form.clear_customer();
        self.reset_dates();
        self.items.clear();
        self.render();
    }

    /// Validates the form and moves to `Saving`. The returned snapshot is what
    /// gets submitted; the form stays editable meanwhile.
    pub fn begin_save(&mut self) -> Result<PendingSave, SaveError> {
        if self.save_state == SaveState::Saving {
            warn!("save rejected: another save is in flight");
            return Err(SaveError::InProgress);
        }

        let customer_details = self.form.customer_details();
        if customer_details.inv_num.is_empty() || customer_details.cust_name.is_empty() {
            return Err(ValidationError::MissingInvoiceIdentity.into());
        }
        if self.items.is_empty() {
            return Err(ValidationError::NoItems.into());
        }

        let filename = document_filename(&customer_details.inv_num);
        info!(
            invoice = %customer_details.inv_num,
            items = self.items.len(),
            "saving invoice"
        );
        self.save_state = SaveState::Saving;
        Ok(PendingSave {
            payload: InvoicePayload {
                customer_details,
                items: self.items.clone(),
            },
            filename,
        })
    }

    /// Returns to `Idle` and applies the transport's answer. Only a delivered
    /// document clears the form.
    pub fn finish_save(
        &mut self,
        pending: PendingSave,
        outcome: Result<SubmitOutcome, TransportError>,
        sink: &mut dyn DownloadSink,
    ) -> Result<SaveReceipt, SaveError> {
        self.save_state = SaveState::Idle;

        let document = match outcome {
            Ok(SubmitOutcome::Document(bytes)) => bytes,
            Ok(SubmitOutcome::Rejected { status, message }) => {
                warn!(status, %message, "server rejected invoice");
                return Err(SaveError::Server { status, message });
            }
            Err(err) => {
                error!(error = %err, "invoice request failed");
                return Err(err.into());
            }
        };

        let path = sink
            .deliver(&pending.filename, &document)
            .map_err(SaveError::Download)?;

        let invoice_number = pending.payload.customer_details.inv_num;
        self.clear_all();
        info!(invoice = %invoice_number, "invoice saved");

        Ok(SaveReceipt {
            invoice_number,
            filename: pending.filename,
            path,
            size_bytes: document.len(),
        })
    }

    pub async fn save_invoice(
        &mut self,
        transport: &dyn InvoiceTransport,
        sink: &mut dyn DownloadSink,
    ) -> Result<SaveReceipt, SaveError> {
        let pending = self.begin_save()?;
        let outcome = transport.submit(pending.payload()).await;
        self.finish_save(pending, outcome, sink)
    }

    fn reset_dates(&mut self) {
        self.form.set_dates((self.clock)());
    }

    fn render(&mut self) {
        render_item_table(&mut self.table, &self.items);
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
