//! Error taxonomy for form handlers.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required field")]
    MissingRequiredField,
    #[error("non-numeric field")]
    NonNumericField,
    #[error("missing invoice number or customer name")]
    MissingInvoiceIdentity,
    #[error("no items")]
    NoItems,
}

impl ValidationError {
    /// Prompt shown to the person filling in the form.
    pub fn user_message(self) -> &'static str {
        match self {
            ValidationError::MissingRequiredField => "Please enter a Description and HSN/SAC.",
            ValidationError::NonNumericField => "Quantity, Cost, and GST must be numbers.",
            ValidationError::MissingInvoiceIdentity => {
                "Invoice Number and Customer Name are required."
            }
            ValidationError::NoItems => "Please add at least one item.",
        }
    }
}

/// The request never produced an HTTP response.
#[derive(Debug, Error)]
#[error("request to {endpoint} failed: {message}")]
pub struct TransportError {
    pub endpoint: String,
    pub message: String,
}

impl TransportError {
    pub fn new(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveErrorKind {
    Validation,
    Busy,
    Server,
    Transport,
    Download,
}

#[derive(Debug, Error)]
pub enum SaveError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("a save is already in progress")]
    InProgress,
    #[error("server rejected invoice ({status}): {message}")]
    Server { status: u16, message: String },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("failed to deliver generated document: {0:#}")]
    Download(anyhow::Error),
}

impl SaveError {
    pub fn kind(&self) -> SaveErrorKind {
        match self {
            SaveError::Validation(_) => SaveErrorKind::Validation,
            SaveError::InProgress => SaveErrorKind::Busy,
            SaveError::Server { .. } => SaveErrorKind::Server,
            SaveError::Transport(_) => SaveErrorKind::Transport,
            SaveError::Download(_) => SaveErrorKind::Download,
        }
    }
}
