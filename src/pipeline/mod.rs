//! Markdown → HTML pipeline for the invoice body.
//!
//! The invoice `content` field is a constrained markdown dialect produced by
//! one known upstream automation. Rather than a general parser, the body goes
//! through a fixed sequence of text passes. Each pass is a pure
//! `&str → String` function, independently testable, and may rely on earlier
//! passes having consumed their syntax.
//!
//! ## Stage order
//!
//! ```text
//! preamble ──▶ table ──▶ structure ──▶ list ──▶ inline ──▶ pricing ──▶ paragraph
//! ```
//!
//! 1. [`preamble`]: line endings, redundant title block, zero-value
//!    "additional work" section
//! 2. [`table`]: line-items section → responsive rows, then residual pipe
//!    syntax removed
//! 3. [`structure`]: `#`..`####` headings and `---` rules
//! 4. [`list`]: bullet runs → lists, per block
//! 5. [`inline`]: `**bold**` spans; must follow the table and list stages
//! 6. [`pricing`]: subtotal / tax / total / deposit / add-on rows
//! 7. [`paragraph`]: prose blocks → `<p>`, line breaks
//!
//! Nothing here fails: an unrecognised construct is left as text.

pub mod inline;
pub mod list;
pub mod paragraph;
pub mod preamble;
pub mod pricing;
pub mod structure;
pub mod table;

use crate::theme::Theme;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// Boundary between blocks: a newline, any whitespace, another newline.
pub(crate) static RE_BLOCK_BOUNDARY: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Render an invoice body with the default theme.
///
/// `additional_total` gates the `**ADDITIONAL WORK**` section: exactly zero
/// removes it, any other value keeps it.
///
/// ```rust
/// let html = invoice2html::render_markdown("**Subtotal:** $100.00", 0.0);
/// assert!(html.contains("$100.00"));
/// ```
pub fn render_markdown(markdown: &str, additional_total: f64) -> String {
    render_markdown_with(markdown, additional_total, &Theme::default())
}

/// Render an invoice body with an explicit class table.
pub fn render_markdown_with(markdown: &str, additional_total: f64, theme: &Theme) -> String {
    if markdown.is_empty() {
        return String::new();
    }

    let s = preamble::normalise_line_endings(markdown);
    let s = preamble::strip_client_header(&s);
    let s = preamble::remove_additional_work(&s, additional_total);
    let s = table::cleanup_remaining_tables(table::extract_line_items(&s, theme));
    let s = structure::render_headings(&s, theme);
    let s = structure::render_rules(&s, theme);
    let s = list::render_lists(&s, theme);
    let s = inline::render_bold(&s, theme);
    let s = pricing::render_pricing_summary(&s, theme);
    let html = paragraph::finalize_paragraphs(&s, theme);

    debug!(
        "Rendered invoice markdown: {} bytes → {} bytes HTML",
        markdown.len(),
        html.len()
    );
    html
}
