//! Headings (`#` … `####`) and horizontal rules (`---`).

use crate::theme::Theme;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

// One pattern for all four levels: `#{1,4}` followed by a space cannot match a
// prefix of a deeper heading, so `#### x` is never read as `# ...`, and five
// or more hashes match nothing.
static RE_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^(#{1,4}) (.*)$").unwrap());

static RE_RULE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^-{3,}$").unwrap());

pub fn render_headings(input: &str, theme: &Theme) -> String {
    RE_HEADING
        .replace_all(input, |caps: &Captures<'_>| {
            let level = caps[1].len();
            format!(
                "<h{level} class=\"{}\">{}</h{level}>",
                theme.headings.for_level(level),
                &caps[2]
            )
        })
        .into_owned()
}

pub fn render_rules(input: &str, theme: &Theme) -> String {
    RE_RULE
        .replace_all(input, |_: &Captures<'_>| format!("<hr class=\"{}\" />", theme.rule))
        .into_owned()
}
