//! Error types for the invoice2html library.
//!
//! Rendering itself never fails: every stage of [`crate::pipeline`] degrades
//! to leaving its input untouched, so the markdown functions return a plain
//! `String`. [`InvoiceError`] only covers the layers around the pipeline:
//! fetching the payload from the webhook, loading configuration and themes,
//! and writing output files.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the invoice2html library.
#[derive(Debug, Error)]
pub enum InvoiceError {
    // ── Request errors ────────────────────────────────────────────────────
    /// No invoice id was supplied.
    #[error("Invoice ID is required")]
    MissingInvoiceId,

    // ── Webhook errors ────────────────────────────────────────────────────
    /// No webhook URL was configured.
    #[error("No invoice webhook configured.\nSet MAKE_WEBHOOK_URL or pass --webhook-url.")]
    WebhookNotConfigured,

    /// The configured webhook URL could not be parsed.
    #[error("Invalid webhook URL '{url}': {reason}")]
    InvalidWebhookUrl { url: String, reason: String },

    /// The webhook did not answer within the configured timeout.
    #[error("Request to invoice data webhook timed out after {secs}s ('{url}')")]
    WebhookTimeout { url: String, secs: u64 },

    /// Transport-level failure (DNS, TLS, connection reset, redirect loop).
    #[error("Failed to reach invoice webhook '{url}': {reason}")]
    WebhookFailed { url: String, reason: String },

    /// The automation scenario answered with its placeholder redirect page.
    #[error(
        "Webhook '{url}' returned 'Redirecting...'.\n\
Ensure the automation scenario returns the invoice data as its final response."
    )]
    WebhookRedirecting { url: String },

    /// The webhook answered with a non-2xx status.
    #[error("Failed to fetch invoice data from webhook: {status} - {reason}. Raw response: \"{body_preview}...\"")]
    WebhookHttp {
        status: u16,
        reason: String,
        body_preview: String,
    },

    // ── Theme / output errors ─────────────────────────────────────────────
    /// A theme override file could not be read or parsed.
    #[error("Failed to load theme '{path}': {detail}")]
    ThemeLoadFailed { path: PathBuf, detail: String },

    /// Could not create or write the output HTML file.
    #[error("Failed to write output file '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl InvoiceError {
    /// HTTP status an invoice proxy endpoint answers with for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            InvoiceError::MissingInvoiceId => 400,
            InvoiceError::WebhookTimeout { .. } => 504,
            InvoiceError::WebhookHttp { status, .. } => *status,
            _ => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_mapping() {
        assert_eq!(InvoiceError::MissingInvoiceId.http_status(), 400);
        assert_eq!(
            InvoiceError::WebhookTimeout {
                url: "https://hook.example/x".into(),
                secs: 30
            }
            .http_status(),
            504
        );
        assert_eq!(
            InvoiceError::WebhookHttp {
                status: 404,
                reason: "Not Found".into(),
                body_preview: String::new()
            }
            .http_status(),
            404
        );
        assert_eq!(
            InvoiceError::WebhookRedirecting {
                url: "https://hook.example/x".into()
            }
            .http_status(),
            500
        );
    }

    #[test]
    fn webhook_http_display() {
        let e = InvoiceError::WebhookHttp {
            status: 502,
            reason: "Bad Gateway".into(),
            body_preview: "upstream down".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("502 - Bad Gateway"), "got: {msg}");
        assert!(msg.contains("upstream down"), "got: {msg}");
    }

    #[test]
    fn timeout_display() {
        let e = InvoiceError::WebhookTimeout {
            url: "https://hook.example/x".into(),
            secs: 30,
        };
        assert!(e.to_string().contains("30s"));
    }
}
