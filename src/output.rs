//! Result types returned by the render entry points.

use crate::payload::InvoicePayload;
use serde::{Deserialize, Serialize};

/// A fully rendered invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedInvoice {
    /// Id the payload was requested with (empty for payloads read from disk
    /// without one).
    pub invoice_id: String,
    /// Decoded payload.
    pub payload: InvoicePayload,
    /// Output of the markdown pipeline for `payload.content`.
    pub content_html: String,
    /// Complete HTML document.
    pub page_html: String,
    pub stats: RenderStats,
}

/// Timing and size figures for one render.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderStats {
    /// Time spent waiting on the webhook. Zero when no fetch happened.
    pub fetch_duration_ms: u64,
    pub render_duration_ms: u64,
    /// Bytes of markdown in the payload's `content`.
    pub content_bytes: usize,
    /// Bytes of the complete page document.
    pub html_bytes: usize,
}
