//! Pricing summary rows: subtotal, tax, total, deposit, and `+$` add-ons.
//!
//! The bold pass has already run by the time this stage sees the document, so
//! a label may arrive either as `**Subtotal:**` or as the `<strong>` markup
//! the bold pass produced. Both shapes are recognised. Amounts are copied
//! verbatim; nothing here parses or rounds money.

use crate::theme::{PricingClasses, Theme};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

const OPEN: &str = r"(?:\*\*|<strong[^>]*>)";
const CLOSE: &str = r"(?:\*\*|</strong>)";
const AMOUNT: &str = r"\$[0-9,]+\.?\d*";

fn summary_pattern(label: &str) -> Regex {
    Regex::new(&format!(r"{OPEN}{label}{CLOSE}[ \t]+({AMOUNT})")).unwrap()
}

static RE_SUBTOTAL: Lazy<Regex> = Lazy::new(|| summary_pattern("Subtotal:"));
static RE_TAX: Lazy<Regex> = Lazy::new(|| summary_pattern("Tax:"));
static RE_TOTAL: Lazy<Regex> = Lazy::new(|| summary_pattern("TOTAL:"));
static RE_DEPOSIT: Lazy<Regex> = Lazy::new(|| summary_pattern(r"Deposit Required[^\n]*?"));

static RE_ADDON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"{OPEN}([^\n]*?){CLOSE}[ \t]+([^\n]*?)[ \t]+(\+{AMOUNT})"
    ))
    .unwrap()
});

/// Render the labelled money lines and add-on offers as summary rows.
pub fn render_pricing_summary(input: &str, theme: &Theme) -> String {
    let p = &theme.pricing;
    let s = summary_rows(input, &RE_SUBTOTAL, "Subtotal:", p);
    let s = summary_rows(&s, &RE_TAX, "Tax:", p);
    let s = RE_TOTAL
        .replace_all(&s, |caps: &Captures<'_>| {
            format!(
                "<div class=\"{}\"><span>Total:</span><span class=\"{}\">{}</span></div>",
                p.total_row, p.total_value, &caps[1]
            )
        })
        .into_owned();
    let s = RE_DEPOSIT
        .replace_all(&s, |caps: &Captures<'_>| {
            format!(
                "<div class=\"{}\"><span class=\"{}\">Deposit Required:</span><span class=\"{}\">{}</span></div>",
                p.deposit_row, p.deposit_label, p.deposit_value, &caps[1]
            )
        })
        .into_owned();
    RE_ADDON
        .replace_all(&s, |caps: &Captures<'_>| {
            format!(
                "<div class=\"{}\"><div><div class=\"{}\">{}</div><div class=\"{}\">{}</div></div><div class=\"{}\">{}</div></div>",
                p.addon_row,
                p.addon_title,
                &caps[1],
                p.addon_description,
                &caps[2],
                p.addon_price,
                &caps[3]
            )
        })
        .into_owned()
}

fn summary_rows(input: &str, re: &Regex, label: &str, p: &PricingClasses) -> String {
    re.replace_all(input, |caps: &Captures<'_>| {
        format!(
            "<div class=\"{}\"><span class=\"{}\">{}</span><span class=\"{}\">{}</span></div>",
            p.row, p.label, label, p.value, &caps[1]
        )
    })
    .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::inline::render_bold;

    fn render(input: &str) -> String {
        render_pricing_summary(input, &Theme::default())
    }

    #[test]
    fn test_subtotal_literal_bold() {
        assert_eq!(
            render("**Subtotal:** $100.00"),
            "<div class=\"flex justify-between py-2 border-b border-gray-200\">\
             <span class=\"text-gray-600\">Subtotal:</span>\
             <span class=\"font-medium\">$100.00</span></div>"
        );
    }

    #[test]
    fn test_subtotal_after_bold_pass() {
        let theme = Theme::default();
        let html = render_pricing_summary(&render_bold("**Subtotal:** $1,009.37", &theme), &theme);
        assert!(html.contains("<span class=\"text-gray-600\">Subtotal:</span>"));
        assert!(html.contains(">$1,009.37</span>"));
        assert!(!html.contains("<strong"));
    }

    #[test]
    fn test_tax_and_total() {
        let html = render("**Tax:** $8.25\n**TOTAL:** $108.25");
        assert!(html.contains(">Tax:</span><span class=\"font-medium\">$8.25</span>"));
        assert!(html.contains(
            "<div class=\"flex justify-between py-3 mt-2 text-lg font-semibold\"><span>Total:</span>\
             <span class=\"text-emerald-600\">$108.25</span></div>"
        ));
    }

    #[test]
    fn test_total_label_is_case_sensitive() {
        let input = "**Total:** $108.25";
        assert_eq!(render(input), input);
    }

    #[test]
    fn test_deposit_ignores_label_suffix() {
        let html = render("**Deposit Required (50%):** $504.69");
        assert!(html.contains("<span class=\"text-blue-800 font-medium\">Deposit Required:</span>"));
        assert!(html.contains("<span class=\"font-bold text-blue-800\">$504.69</span>"));
        assert!(!html.contains("50%"));
    }

    #[test]
    fn test_addon_row() {
        let html = render("**Cabinet refresh** Two-tone finish +$450.00");
        assert_eq!(
            html,
            "<div class=\"flex justify-between items-center py-3 border-b border-gray-200\">\
             <div><div class=\"font-semibold\">Cabinet refresh</div>\
             <div class=\"text-sm text-gray-600\">Two-tone finish</div></div>\
             <div class=\"font-semibold text-green-600\">+$450.00</div></div>"
        );
    }

    #[test]
    fn test_amount_on_next_line_not_matched() {
        let input = "**Subtotal:**\n$100.00";
        assert_eq!(render(input), input);
    }
}
