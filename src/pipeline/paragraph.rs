//! Final pass: paragraph wrapping and line breaks.

use crate::pipeline::RE_BLOCK_BOUNDARY;
use crate::theme::Theme;
use once_cell::sync::Lazy;
use regex::Regex;

static RE_BLOCK_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<(?:div|table|ul|ol|h[1-6]|hr|blockquote|p)\b").unwrap());

/// Wrap prose blocks in `<p>`; leave blocks that already hold block-level
/// markup as they are apart from line breaks.
pub fn finalize_paragraphs(input: &str, theme: &Theme) -> String {
    RE_BLOCK_BOUNDARY
        .split(input)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(|block| {
            if RE_BLOCK_TAG.is_match(block) {
                break_text_lines(block)
            } else {
                format!(
                    "<p class=\"{}\">{}</p>",
                    theme.paragraph,
                    block.replace('\n', "<br>")
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Turn each newline that is not followed by a tag into `<br>`.
fn break_text_lines(block: &str) -> String {
    let mut out = String::with_capacity(block.len());
    let mut chars = block.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\n' && chars.peek() != Some(&'<') {
            out.push_str("<br>");
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(input: &str) -> String {
        finalize_paragraphs(input, &Theme::default())
    }

    #[test]
    fn test_prose_wrapped() {
        assert_eq!(
            render("Name: Andre\nPhone: 555\n\nThanks"),
            "<p class=\"mb-4\">Name: Andre<br>Phone: 555</p>\n<p class=\"mb-4\">Thanks</p>"
        );
    }

    #[test]
    fn test_block_html_not_wrapped() {
        let input = "<h2 class=\"x\">Scope</h2>\n<ul><li>a</li></ul>";
        assert_eq!(render(input), input);
    }

    #[test]
    fn test_text_inside_block_html_gets_breaks() {
        assert_eq!(
            render("<strong>Label</strong>\n<ul></ul>\ntrailing"),
            "<strong>Label</strong>\n<ul></ul><br>trailing"
        );
    }

    #[test]
    fn test_empty_blocks_dropped() {
        assert_eq!(render("\n\n  \n\nonly\n\n\n"), "<p class=\"mb-4\">only</p>");
    }

    #[test]
    fn test_inline_tags_are_prose() {
        assert_eq!(
            render("<strong>bold</strong> text"),
            "<p class=\"mb-4\"><strong>bold</strong> text</p>"
        );
    }

    #[test]
    fn test_pre_is_not_paragraph_tag() {
        assert_eq!(render("<pre>x</pre>"), "<p class=\"mb-4\"><pre>x</pre></p>");
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let once = render("first line\nsecond\n\nnext paragraph");
        assert_eq!(render(&once), once);
    }
}
