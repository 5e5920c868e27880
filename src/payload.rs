//! Decoding of the webhook's URL-encoded invoice payload.
//!
//! The automation answers with `application/x-www-form-urlencoded` text:
//!
//! ```text
//! invoiceNo=Invoice%20%23315&name=Andre%20Viruez&content=**SCOPE**%0A-%20walls&additionalTotal=&...
//! ```
//!
//! Every field is optional. Numeric fields fall back to `0` when missing or
//! unparsable, mirroring how the page has always treated them.

use crate::pipeline::render_markdown_with;
use crate::theme::Theme;
use once_cell::sync::Lazy;
use percent_encoding::percent_decode_str;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Leading numeric prefix, the way `parseFloat`-style parsers read it.
static RE_NUMBER_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").unwrap());

/// The decoded invoice payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvoicePayload {
    /// `invoiceNo`, e.g. "Invoice #315".
    pub invoice_no: String,
    /// `name`
    pub customer_name: String,
    /// `billingAddress`
    pub billing_address: String,
    /// `content`, the markdown body.
    pub content: String,
    /// `additionalTotal`; gates the additional-work section.
    pub additional_total: f64,
    /// `totalDue`
    pub total_due: f64,
    pub subtotal: f64,
    /// `depositPaid`
    pub deposit_paid: f64,
    /// `originalQuote`
    pub original_quote: f64,
    /// `finalBalance`
    pub final_balance: f64,
    /// `stripePaymentIntent`: payment link, decoded once if it arrived encoded.
    pub stripe_payment_intent: String,
    pub overview: Option<String>,
    pub conclusion: Option<String>,
    pub date: Option<String>,
}

impl InvoicePayload {
    /// Decode a URL-encoded payload. Never fails; missing fields take defaults.
    pub fn parse(body: &str) -> Self {
        let mut fields: HashMap<String, String> = HashMap::new();
        for (key, value) in url::form_urlencoded::parse(body.trim().as_bytes()) {
            // First occurrence wins.
            fields.entry(key.into_owned()).or_insert_with(|| value.into_owned());
        }

        let text = |key: &str| fields.get(key).cloned().unwrap_or_default();
        let optional = |key: &str| fields.get(key).filter(|v| !v.trim().is_empty()).cloned();
        let amount = |key: &str| fields.get(key).map_or(0.0, |v| parse_amount(v));

        Self {
            invoice_no: text("invoiceNo"),
            customer_name: text("name"),
            billing_address: text("billingAddress"),
            content: text("content"),
            additional_total: amount("additionalTotal"),
            total_due: amount("totalDue"),
            subtotal: amount("subtotal"),
            deposit_paid: amount("depositPaid"),
            original_quote: amount("originalQuote"),
            final_balance: amount("finalBalance"),
            stripe_payment_intent: decode_payment_link(&text("stripePaymentIntent")),
            overview: optional("overview"),
            conclusion: optional("conclusion"),
            date: optional("date"),
        }
    }

    /// Render the markdown body, gated by this payload's additional total.
    pub fn render_content(&self, theme: &Theme) -> String {
        render_markdown_with(&self.content, self.additional_total, theme)
    }
}

/// Read the leading number of `raw`; anything unparsable or non-finite is 0.
pub fn parse_amount(raw: &str) -> f64 {
    RE_NUMBER_PREFIX
        .find(raw.trim())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Payment links sometimes arrive double-encoded; decode once when a `%` is
/// still present. Undecodable input is returned unchanged.
fn decode_payment_link(raw: &str) -> String {
    if !raw.contains('%') {
        return raw.to_string();
    }
    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            warn!("Could not decode payment link: {}", e);
            raw.to_string()
        }
    }
}
