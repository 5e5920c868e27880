//! Line-items table: the `DETAILED LINE ITEMS` section and residual pipe syntax.
//!
//! ## Extraction
//!
//! The section runs from its heading to the next `##` heading, the next line
//! starting with a bolded label, or the end of the document. Inside it every
//! line containing `|` (minus separator rows) is a table row; the first one is
//! the header and is dropped. A data row needs at least five cells:
//!
//! ```text
//! | Item | Description | Qty | Unit Price | Total Price |
//! |------|-------------|-----|------------|-------------|
//! | 1    | **Walls**   | 2   | $50.00     | $100.00     |
//! ```
//!
//! A section without a single valid data row is kept verbatim. Malformed
//! upstream tables stay visible instead of disappearing.
//!
//! ## Cleanup
//!
//! Anything else that still looks like a pipe table after extraction is
//! deleted line by line, so raw `| a | b |` syntax never reaches the page.
//! Preserved sections are exempt.

use crate::pipeline::inline::emphasize;
use crate::theme::{TableClasses, Theme};
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};
use std::fmt::Write as _;

/// Minimum cell count for a data row to be rendered.
const MIN_CELLS: usize = 5;

static RE_SECTION_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*#+[ \t]*DETAILED[ \t]+LINE[ \t]+ITEMS\b[^\n]*").unwrap()
});

static RE_SECTION_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*(?:##|\*\*)").unwrap());

static RE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

static RE_PIPE_ROW: Lazy<Regex> = Lazy::new(|| Regex::new(r"\|.*\|").unwrap());

/// One piece of the document after line-item extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Ordinary document text; subject to table cleanup.
    Text(String),
    /// A line-items section rendered to HTML.
    Rendered(String),
    /// A line-items section with no valid data row, kept as written.
    Preserved(String),
}

/// One data row of the itemised table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub item: String,
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub total_price: String,
}

impl LineItem {
    /// Parse a pipe-delimited row. Outer delimiters are optional; rows with
    /// fewer than five cells yield `None`, extra cells are ignored.
    pub fn parse(row: &str) -> Option<Self> {
        let trimmed = row.trim();
        let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
        let inner = inner.strip_suffix('|').unwrap_or(inner);

        let cells: Vec<&str> = inner.split('|').map(str::trim).collect();
        if cells.len() < MIN_CELLS {
            return None;
        }
        Some(Self {
            item: cells[0].to_string(),
            description: cells[1].to_string(),
            quantity: cells[2].to_string(),
            unit_price: cells[3].to_string(),
            total_price: cells[4].to_string(),
        })
    }
}

/// Split the document into text and line-items sections, rendering each
/// section that has at least one valid data row.
pub fn extract_line_items(input: &str, theme: &Theme) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    while let Some(heading) = RE_SECTION_HEADING.find_at(input, cursor) {
        let end = RE_SECTION_END
            .find_at(input, heading.end())
            .map_or(input.len(), |m| m.start());

        if heading.start() > cursor {
            segments.push(Segment::Text(input[cursor..heading.start()].to_string()));
        }

        let section = &input[heading.start()..end];
        match render_section(section, theme) {
            Some(html) => segments.push(Segment::Rendered(html)),
            None => segments.push(Segment::Preserved(section.to_string())),
        }
        cursor = end;
    }

    if cursor < input.len() {
        segments.push(Segment::Text(input[cursor..].to_string()));
    }
    segments
}

/// Delete every line of pipe-table syntax from the text segments and join
/// all segments back into one document.
pub fn cleanup_remaining_tables(segments: Vec<Segment>) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text(text) => {
                for line in text.split_inclusive('\n') {
                    if !RE_PIPE_ROW.is_match(line) {
                        out.push_str(line);
                    }
                }
            }
            Segment::Rendered(html) | Segment::Preserved(html) => out.push_str(&html),
        }
    }
    out
}

/// A row consisting solely of pipes, dashes, colons and whitespace.
fn is_separator_row(line: &str) -> bool {
    line.trim()
        .chars()
        .all(|c| matches!(c, '|' | '-' | ':') || c.is_whitespace())
}

fn render_section(section: &str, theme: &Theme) -> Option<String> {
    let items: Vec<LineItem> = section
        .lines()
        .filter(|line| line.contains('|') && !is_separator_row(line))
        .skip(1)
        .filter_map(LineItem::parse)
        .collect();

    if items.is_empty() {
        return None;
    }
    Some(render_table(&items, theme))
}

fn render_table(items: &[LineItem], theme: &Theme) -> String {
    let t = &theme.table;
    let mut html = String::with_capacity(1024 * (items.len() + 1));

    let _ = writeln!(
        html,
        "<h2 class=\"{}\">DETAILED LINE ITEMS</h2>",
        theme.headings.h2
    );
    let _ = writeln!(html, "<div class=\"{}\">", t.container);
    let _ = write!(html, "<div class=\"{}\">", t.header);
    for title in ["Item", "Description", "Qty", "Unit Price", "Total Price"] {
        let _ = write!(html, "<div class=\"{}\">{}</div>", t.header_cell, title);
    }
    html.push_str("</div>\n");

    for (index, item) in items.iter().enumerate() {
        html.push_str(&render_row(item, index, theme));
        html.push('\n');
    }
    html.push_str("</div>");
    html
}

fn render_row(item: &LineItem, index: usize, theme: &Theme) -> String {
    let t = &theme.table;
    let background = if index % 2 == 0 { &t.row_even } else { &t.row_odd };
    let line_break = format!("<br class=\"{}\">", t.description_break);
    let description = RE_BREAK
        .replace_all(&emphasize(&item.description, theme), NoExpand(line_break.as_str()))
        .into_owned();

    let mut row = format!("<div class=\"{} {} {}\">", t.row, background, t.row_layout);
    row.push_str(&cell(t, &t.item_cell, "Item", &t.cell_value, &item.item));
    row.push_str(&cell(t, &t.cell, "Description", &t.cell_value, &description));
    row.push_str(&cell(t, &t.cell, "Qty", &t.cell_value, &item.quantity));
    row.push_str(&cell(t, &t.cell, "Unit Price", &t.price_value, &item.unit_price));
    row.push_str(&cell(t, &t.last_cell, "Total Price", &t.price_value, &item.total_price));
    row.push_str("</div>");
    row
}

fn cell(t: &TableClasses, wrapper: &str, label: &str, value_class: &str, value: &str) -> String {
    format!(
        "<div class=\"{wrapper}\"><span class=\"{}\">{label}:</span><span class=\"{value_class}\">{value}</span></div>",
        t.cell_label
    )
}
