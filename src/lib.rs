//! # invoice2html
//!
//! Render painting-company invoices, delivered as URL-encoded webhook
//! payloads with a markdown body, into styled HTML pages.
//!
//! ## Why a fixed pipeline?
//!
//! The invoice body is written by one known automation in a narrow markdown
//! dialect: a title block, headings, bullet lists, a pipe table of line items,
//! bolded money labels, and `+$` add-on offers. A general CommonMark renderer
//! gets the table and pricing layout wrong, so the body instead goes through
//! a fixed sequence of text passes that each recognise one construct and emit
//! class-bearing HTML.
//!
//! ## Pipeline Overview
//!
//! ```text
//! invoice id
//!  │
//!  ├─ 1. Fetch    GET {webhook}?id=…  (reqwest, timeout, "Redirecting..." check)
//!  ├─ 2. Decode   URL-encoded form → InvoicePayload
//!  ├─ 3. Render   markdown → HTML fragment (preamble, table, structure,
//!  │              list, inline, pricing, paragraph)
//!  ├─ 4. Page     header + content + pricing panel + pay/terms actions
//!  └─ 5. Output   RenderedInvoice + stats, optional atomic file write
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use invoice2html::{render_invoice, RenderConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RenderConfig::builder()
//!         .webhook_url("https://hook.example.com/invoice")
//!         .build()?;
//!     let rendered = render_invoice("315", &config).await?;
//!     println!("{}", rendered.page_html);
//!     Ok(())
//! }
//! ```
//!
//! Only the markdown body is needed? [`render_markdown`] is a pure function:
//!
//! ```rust
//! let html = invoice2html::render_markdown("## Scope\n\n- Walls\n- Trim", 0.0);
//! assert!(html.starts_with("<h2"));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `invoice2html` binary (clap + anyhow + tracing-subscriber) |

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod convert;
pub mod error;
pub mod fetch;
pub mod output;
pub mod page;
pub mod payload;
pub mod pipeline;
pub mod theme;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{RenderConfig, RenderConfigBuilder};
pub use convert::{render_invoice, render_invoice_sync, render_invoice_to_file, render_payload, write_html};
pub use error::InvoiceError;
pub use fetch::{fetch_invoice, fetch_invoice_text};
pub use output::{RenderStats, RenderedInvoice};
pub use page::{format_currency, render_page, PageState};
pub use payload::InvoicePayload;
pub use pipeline::{render_markdown, render_markdown_with};
pub use theme::Theme;
