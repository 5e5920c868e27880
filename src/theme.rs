//! Class-token table for every construct the markdown pipeline emits.
//!
//! The recognition logic in [`crate::pipeline`] never spells out a CSS class
//! itself; it asks the [`Theme`] for the token string of the construct it is
//! rendering. [`Theme::default()`] reproduces the Tailwind classes the invoice
//! presentation layer expects, so the default output is byte-compatible with
//! the existing stylesheet.
//!
//! Themes are plain serde structs. Every group carries `#[serde(default)]`,
//! so a JSON override only needs the fields it changes:
//!
//! ```json
//! { "paragraph": "my-3", "table": { "row_odd": "bg-slate-50" } }
//! ```

use crate::error::InvoiceError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Grid template shared by the desktop table header and each row.
const LINE_ITEM_GRID: &str = "md:grid-cols-[0.5fr_2fr_0.5fr_1fr_1fr]";

/// Construct → class-token table used by the rendering pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// `<strong>` emitted for `**bold**` spans.
    pub strong: String,
    /// `<p>` wrapper emitted by the paragraph finalizer.
    pub paragraph: String,
    /// `<hr />` emitted for `---` lines.
    pub rule: String,
    pub headings: HeadingClasses,
    pub lists: ListClasses,
    pub table: TableClasses,
    pub pricing: PricingClasses,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            strong: "font-semibold text-gray-900".into(),
            paragraph: "mb-4".into(),
            rule: "my-8 border-t border-gray-200".into(),
            headings: HeadingClasses::default(),
            lists: ListClasses::default(),
            table: TableClasses::default(),
            pricing: PricingClasses::default(),
        }
    }
}

impl Theme {
    /// Parse a (possibly partial) theme from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load a theme override file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InvoiceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| InvoiceError::ThemeLoadFailed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        Self::from_json(&text).map_err(|e| InvoiceError::ThemeLoadFailed {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }
}

/// Heading classes, levels 1–4.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadingClasses {
    pub h1: String,
    pub h2: String,
    pub h3: String,
    pub h4: String,
}

impl Default for HeadingClasses {
    fn default() -> Self {
        Self {
            h1: "text-2xl font-bold text-gray-900 mt-8 mb-6".into(),
            h2: "text-xl font-semibold text-gray-900 mt-8 mb-4".into(),
            h3: "text-lg font-semibold text-gray-900 mt-6 mb-3".into(),
            h4: "text-base font-semibold text-gray-900 mt-4 mb-2".into(),
        }
    }
}

impl HeadingClasses {
    /// Class for heading `level` (1–4). Anything deeper uses the h4 class.
    pub fn for_level(&self, level: usize) -> &str {
        match level {
            1 => &self.h1,
            2 => &self.h2,
            3 => &self.h3,
            _ => &self.h4,
        }
    }
}

/// Bullet list classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListClasses {
    pub list: String,
    pub item: String,
    pub bullet: String,
    /// Literal marker text placed inside the bullet span.
    pub bullet_marker: String,
    pub body: String,
    /// Inline `$amount` emphasis inside list items.
    pub price: String,
}

impl Default for ListClasses {
    fn default() -> Self {
        Self {
            list: "mb-4 space-y-2 list-none".into(),
            item: "flex items-start ml-4".into(),
            bullet: "text-emerald-600 mr-2 mt-1".into(),
            bullet_marker: "•".into(),
            body: "flex-1".into(),
            price: "font-bold text-emerald-600 text-lg".into(),
        }
    }
}

/// Line-items table classes (stacked cards on mobile, grid on desktop).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableClasses {
    pub container: String,
    pub header: String,
    pub header_cell: String,
    /// Marker class every rendered row starts with.
    pub row: String,
    pub row_even: String,
    pub row_odd: String,
    pub row_layout: String,
    /// Item cell: only shown in the stacked (mobile) layout.
    pub item_cell: String,
    pub cell: String,
    pub last_cell: String,
    pub cell_label: String,
    pub cell_value: String,
    pub price_value: String,
    /// Class given to `<br>` markers inside the description cell.
    pub description_break: String,
}

impl Default for TableClasses {
    fn default() -> Self {
        Self {
            container: "overflow-x-auto mb-8".into(),
            header: format!(
                "hidden md:grid {LINE_ITEM_GRID} bg-gray-100 border border-gray-200 rounded-t-lg font-medium text-gray-700 text-sm"
            ),
            header_cell: "py-3 px-4 text-left".into(),
            row: "detailed-line-item-row".into(),
            row_even: "bg-white".into(),
            row_odd: "bg-gray-50".into(),
            row_layout: format!(
                "border-b border-gray-200 last:border-b-0 md:grid {LINE_ITEM_GRID} md:items-start md:py-3 md:px-4"
            ),
            item_cell: "p-4 md:p-0 md:border-none border-b border-gray-200 md:hidden".into(),
            cell: "p-4 md:p-0 md:border-none border-b border-gray-200".into(),
            last_cell: "p-4 md:p-0 md:border-none".into(),
            cell_label: "font-semibold text-gray-600 block md:hidden".into(),
            cell_value: "text-gray-700".into(),
            price_value: "font-bold text-emerald-600 text-lg".into(),
            description_break: "md:hidden".into(),
        }
    }
}

/// Pricing summary and add-on row classes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingClasses {
    pub row: String,
    pub label: String,
    pub value: String,
    pub total_row: String,
    pub total_value: String,
    pub deposit_row: String,
    pub deposit_label: String,
    pub deposit_value: String,
    pub addon_row: String,
    pub addon_title: String,
    pub addon_description: String,
    pub addon_price: String,
}

impl Default for PricingClasses {
    fn default() -> Self {
        Self {
            row: "flex justify-between py-2 border-b border-gray-200".into(),
            label: "text-gray-600".into(),
            value: "font-medium".into(),
            total_row: "flex justify-between py-3 mt-2 text-lg font-semibold".into(),
            total_value: "text-emerald-600".into(),
            deposit_row: "flex justify-between py-2 border-b border-gray-200 bg-blue-50 px-3 rounded"
                .into(),
            deposit_label: "text-blue-800 font-medium".into(),
            deposit_value: "font-bold text-blue-800".into(),
            addon_row: "flex justify-between items-center py-3 border-b border-gray-200".into(),
            addon_title: "font-semibold".into(),
            addon_description: "text-sm text-gray-600".into(),
            addon_price: "font-semibold text-green-600".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_row_marker_is_stable() {
        let theme = Theme::default();
        assert_eq!(theme.table.row, "detailed-line-item-row");
        assert!(theme.table.header.contains(LINE_ITEM_GRID));
        assert!(theme.table.row_layout.contains(LINE_ITEM_GRID));
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let theme = Theme::from_json(r#"{"paragraph":"my-3","table":{"row_odd":"bg-slate-50"}}"#)
            .unwrap();
        assert_eq!(theme.paragraph, "my-3");
        assert_eq!(theme.table.row_odd, "bg-slate-50");
        assert_eq!(theme.table.row_even, "bg-white");
        assert_eq!(theme.headings, HeadingClasses::default());
    }

    #[test]
    fn heading_level_lookup() {
        let h = HeadingClasses::default();
        assert_eq!(h.for_level(1), h.h1);
        assert_eq!(h.for_level(4), h.h4);
        assert_eq!(h.for_level(9), h.h4);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Theme::load("/definitely/not/a/theme.json").unwrap_err();
        assert!(err.to_string().contains("theme.json"), "got: {err}");
    }
}
