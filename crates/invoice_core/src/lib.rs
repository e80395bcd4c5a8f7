//! Invoice form controller: item entry, live table rendering, totals and
//! submission of the assembled invoice.

pub mod controller;
pub mod download;
pub mod error;
pub mod form;
pub mod item;
pub mod render;
pub mod totals;
pub mod transport;

pub use controller::{
    utc_today, Clock, InvoiceFormController, PendingSave, SaveReceipt, SaveState,
};
pub use download::{DirectoryDownloadSink, DownloadSink, MemoryDownloadSink};
pub use error::{SaveError, SaveErrorKind, TransportError, ValidationError};
pub use render::{ItemTable, RecordingTable, TABLE_HEADERS};
pub use totals::InvoiceTotals;
pub use transport::{HttpInvoiceTransport, InvoiceTransport, SubmitOutcome};
