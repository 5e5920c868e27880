//! Render entry points: payload text or invoice id → [`RenderedInvoice`].
//!
//! [`render_payload`] is the pure core: decode, run the pipeline, wrap the
//! page. [`render_invoice`] adds the webhook fetch in front of it, and
//! [`render_invoice_to_file`] writes the page out atomically.

use crate::config::RenderConfig;
use crate::error::InvoiceError;
use crate::fetch::fetch_invoice_text;
use crate::output::{RenderStats, RenderedInvoice};
use crate::page::render_ready_page;
use crate::payload::InvoicePayload;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// Decode and render a URL-encoded payload that is already in hand.
///
/// # Example
/// ```rust
/// use invoice2html::{render_payload, RenderConfig};
///
/// let body = "invoiceNo=Invoice%20%2342&content=**Subtotal:**%20%24100.00&finalBalance=100";
/// let rendered = render_payload(body, "42", &RenderConfig::default());
/// assert!(rendered.content_html.contains("$100.00"));
/// assert!(rendered.page_html.contains("Invoice #42"));
/// ```
pub fn render_payload(body: &str, invoice_id: &str, config: &RenderConfig) -> RenderedInvoice {
    let start = Instant::now();
    let payload = InvoicePayload::parse(body);
    let content_html = payload.render_content(&config.theme);
    let page_html = render_ready_page(&payload, &content_html, invoice_id, config);

    let stats = RenderStats {
        fetch_duration_ms: 0,
        render_duration_ms: start.elapsed().as_millis() as u64,
        content_bytes: payload.content.len(),
        html_bytes: page_html.len(),
    };

    RenderedInvoice {
        invoice_id: invoice_id.to_string(),
        payload,
        content_html,
        page_html,
        stats,
    }
}

/// Fetch invoice `invoice_id` from the configured webhook and render it.
///
/// # Errors
/// Only the fetch can fail; see [`crate::fetch::fetch_invoice_text`].
pub async fn render_invoice(
    invoice_id: impl AsRef<str>,
    config: &RenderConfig,
) -> Result<RenderedInvoice, InvoiceError> {
    let invoice_id = invoice_id.as_ref().trim();
    info!("Starting invoice render: {}", invoice_id);

    let fetch_start = Instant::now();
    let body = fetch_invoice_text(invoice_id, config).await?;
    let fetch_duration_ms = fetch_start.elapsed().as_millis() as u64;

    let mut rendered = render_payload(&body, invoice_id, config);
    rendered.stats.fetch_duration_ms = fetch_duration_ms;

    info!(
        "Render complete: {} ({} bytes HTML, fetch {}ms, render {}ms)",
        invoice_id,
        rendered.stats.html_bytes,
        rendered.stats.fetch_duration_ms,
        rendered.stats.render_duration_ms
    );
    Ok(rendered)
}

/// Synchronous wrapper around [`render_invoice`].
///
/// Creates a temporary tokio runtime internally.
pub fn render_invoice_sync(
    invoice_id: impl AsRef<str>,
    config: &RenderConfig,
) -> Result<RenderedInvoice, InvoiceError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| InvoiceError::Internal(format!("Failed to create tokio runtime: {}", e)))?
        .block_on(render_invoice(invoice_id, config))
}

/// Fetch, render and write the page for `invoice_id` to `output_path`.
pub async fn render_invoice_to_file(
    invoice_id: impl AsRef<str>,
    output_path: impl AsRef<Path>,
    config: &RenderConfig,
) -> Result<RenderStats, InvoiceError> {
    let rendered = render_invoice(invoice_id, config).await?;
    write_html(output_path, &rendered.page_html).await?;
    Ok(rendered.stats)
}

/// Write `html` to `path` through a sibling temp file and a rename, creating
/// parent directories as needed. Readers never observe a partial file.
pub async fn write_html(path: impl AsRef<Path>, html: &str) -> Result<(), InvoiceError> {
    let path = path.as_ref();
    let write_err = |source| InvoiceError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(write_err)?;
    }

    let tmp_path = path.with_extension("html.tmp");
    tokio::fs::write(&tmp_path, html).await.map_err(write_err)?;
    tokio::fs::rename(&tmp_path, path).await.map_err(write_err)?;

    info!("Wrote {} bytes to {}", html.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_payload_stats() {
        let body = "content=%23%23%20Scope%0A%0A-%20Walls&finalBalance=12.5";
        let rendered = render_payload(body, "7", &RenderConfig::default());
        assert_eq!(rendered.invoice_id, "7");
        assert_eq!(rendered.stats.fetch_duration_ms, 0);
        assert_eq!(rendered.stats.content_bytes, "## Scope\n\n- Walls".len());
        assert_eq!(rendered.stats.html_bytes, rendered.page_html.len());
        assert!(rendered.page_html.contains(&rendered.content_html));
        assert!(rendered.page_html.contains("$12.50"));
    }

    #[test]
    fn test_write_html_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/invoice.html");
        tokio_test::block_on(write_html(&path, "<p>hi</p>")).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>hi</p>");
        assert!(!path.with_extension("html.tmp").exists());
    }

    #[test]
    fn test_render_invoice_sync_missing_id() {
        let err = render_invoice_sync("", &RenderConfig::default()).unwrap_err();
        assert!(matches!(err, InvoiceError::MissingInvoiceId));
    }
}
