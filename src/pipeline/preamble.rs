//! Document preamble passes: line endings, the redundant title block, and
//! the conditional "additional work" section.
//!
//! These run before any structural recognition so later stages never see
//! `\r`, the duplicated invoice title, or a zero-value additional-work block.

use once_cell::sync::Lazy;
use regex::Regex;

// ── Line endings ─────────────────────────────────────────────────────────────

/// CRLF / lone CR → LF. Every later pattern is line-anchored on `\n`.
pub fn normalise_line_endings(input: &str) -> String {
    input.replace("\r\n", "\n").replace('\r', "\n")
}

// ── Title + client label ─────────────────────────────────────────────────────

static RE_CLIENT_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?im)^#+[ \t]+(?:QUOTE|INVOICE)[ \t]+[#\d]+[ \t]*\n(?:[ \t]*\n)?\*\*CLIENT\s+INFORMATION\*\*[ \t]*(?:\n|$)",
    )
    .unwrap()
});

/// Remove the first `# INVOICE #123` heading that is directly followed by the
/// bolded `**CLIENT INFORMATION**` label. The page header already shows both.
pub fn strip_client_header(input: &str) -> String {
    RE_CLIENT_HEADER.replacen(input, 1, "").into_owned()
}

// ── Additional work ──────────────────────────────────────────────────────────

static RE_ADDITIONAL_WORK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\*\*ADDITIONAL\s+WORK\*\*").unwrap());

/// Start of the next bolded label line or heading line.
static RE_SECTION_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*(?:\*\*|#)").unwrap());

/// Drop the `**ADDITIONAL WORK**` section when `additional_total` is zero.
///
/// The section runs from the label up to (not including) the newline that
/// starts the next bolded label or heading, or to the end of the document.
/// Only the first occurrence is considered.
pub fn remove_additional_work(input: &str, additional_total: f64) -> String {
    if additional_total != 0.0 {
        return input.to_string();
    }
    let Some(label) = RE_ADDITIONAL_WORK.find(input) else {
        return input.to_string();
    };
    let end = RE_SECTION_END
        .find_at(input, label.end())
        .map_or(input.len(), |m| m.start());

    let mut out = String::with_capacity(input.len());
    out.push_str(&input[..label.start()]);
    out.push_str(&input[end..]);
    out
}
