//! Inline formatting: `**bold**` spans and inline dollar amounts.
//!
//! The span helpers are shared with the table and list stages, which apply
//! them to their own cells and items before the document-wide pass runs.

use crate::theme::Theme;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static RE_BOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

static RE_DOLLAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$([0-9,]+\.?\d*)").unwrap());

/// Replace every `**text**` span with themed `<strong>` markup.
pub fn emphasize(input: &str, theme: &Theme) -> String {
    RE_BOLD
        .replace_all(input, |caps: &Captures<'_>| {
            format!("<strong class=\"{}\">{}</strong>", theme.strong, &caps[1])
        })
        .into_owned()
}

/// Wrap each `$1,234.56` amount in a highlighted span, amount kept verbatim.
pub fn highlight_amounts(input: &str, class: &str) -> String {
    RE_DOLLAR
        .replace_all(input, |caps: &Captures<'_>| {
            format!("<span class=\"{}\">${}</span>", class, &caps[1])
        })
        .into_owned()
}

/// Document-wide bold pass. Runs after the table and list stages so their
/// own, more specific handling of `**` has already happened.
pub fn render_bold(input: &str, theme: &Theme) -> String {
    emphasize(input, theme)
}
