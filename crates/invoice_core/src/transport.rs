//! Outbound submission of an assembled invoice.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::{
    error::ErrorBody,
    protocol::{InvoicePayload, SAVE_INVOICE_PATH},
};
use url::Url;

use crate::error::TransportError;

/// What the endpoint answered, once an HTTP response arrived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 2xx; the body is the generated document.
    Document(Vec<u8>),
    /// Non-2xx with the server's error message.
    Rejected { status: u16, message: String },
}

#[async_trait]
pub trait InvoiceTransport: Send + Sync {
    async fn submit(&self, payload: &InvoicePayload) -> Result<SubmitOutcome, TransportError>;
}

pub struct HttpInvoiceTransport {
    http: Client,
    endpoint: Url,
}

impl HttpInvoiceTransport {
    pub fn new(server_url: &str) -> Result<Self> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self> {
        let base = Url::parse(server_url.trim())
            .with_context(|| format!("invalid server url '{server_url}'"))?;
        let endpoint = base
            .join(SAVE_INVOICE_PATH)
            .with_context(|| format!("cannot derive invoice endpoint from '{server_url}'"))?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn transport_error(&self, err: reqwest::Error) -> TransportError {
        TransportError::new(self.endpoint.as_str(), err.to_string())
    }
}

#[async_trait]
impl InvoiceTransport for HttpInvoiceTransport {
    async fn submit(&self, payload: &InvoicePayload) -> Result<SubmitOutcome, TransportError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|err| self.transport_error(err))?;

        if status.is_success() {
            return Ok(SubmitOutcome::Document(body.to_vec()));
        }

        let message = match serde_json::from_slice::<ErrorBody>(&body) {
            Ok(parsed) => parsed.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string(),
        };
        Ok(SubmitOutcome::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
