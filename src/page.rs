//! Full-page HTML around the rendered invoice body.
//!
//! A page is always in one of three states ([`PageState`]). Only the ready
//! state touches the markdown pipeline; the loading and failed states are
//! static documents. Payload strings are HTML-escaped on the way in. The
//! rendered markdown is inserted as-is because it is pipeline output.
//!
//! Sections marked with the `no-pdf` class (the pay/terms action area) are
//! the ones a print or PDF export is expected to hide.

use crate::config::RenderConfig;
use crate::error::InvoiceError;
use crate::payload::InvoicePayload;
use tracing::{debug, error};

/// Rendering state of an invoice page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    /// The payload has not arrived yet.
    Loading,
    /// The payload could not be fetched. The page offers a manual retry.
    Failed,
    Ready(Box<InvoicePayload>),
}

impl PageState {
    /// Map a fetch outcome onto a page state. The error itself is only logged;
    /// visitors always see the same "not found" card.
    pub fn from_result(result: Result<InvoicePayload, InvoiceError>) -> Self {
        match result {
            Ok(payload) => PageState::Ready(Box::new(payload)),
            Err(e) => {
                error!("Failed to load invoice: {}", e);
                PageState::Failed
            }
        }
    }
}

/// Format a dollar amount the en-US way: `$1,234.50`, `-$20.00`.
///
/// Cents are rounded half away from zero. Non-finite input renders `$0.00`.
///
/// ```rust
/// use invoice2html::format_currency;
///
/// assert_eq!(format_currency(1009.37), "$1,009.37");
/// assert_eq!(format_currency(-504.69), "-$504.69");
/// ```
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0.00".into();
    }
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, c) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}${grouped}.{:02}", cents % 100)
}

/// Escape text for use in element content and double-quoted attributes.
pub fn html_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Render a complete HTML document for `state`.
pub fn render_page(state: &PageState, invoice_id: &str, config: &RenderConfig) -> String {
    match state {
        PageState::Loading => document("Invoice loading...", &loading_body()),
        PageState::Failed => document("Invoice Not Found", &failed_body()),
        PageState::Ready(payload) => {
            let content_html = payload.render_content(&config.theme);
            render_ready_page(payload, &content_html, invoice_id, config)
        }
    }
}

/// Ready page with an already-rendered body.
pub(crate) fn render_ready_page(
    payload: &InvoicePayload,
    content_html: &str,
    invoice_id: &str,
    config: &RenderConfig,
) -> String {
    let title = if payload.invoice_no.is_empty() {
        "Invoice".to_string()
    } else {
        payload.invoice_no.clone()
    };

    let mut body = String::new();
    body.push_str("<div id=\"invoice-content\" class=\"flex flex-col h-full\">\n");
    body.push_str(&header(payload, config));
    body.push_str(&main_section(payload, content_html, config));
    body.push_str(&action_section(payload, invoice_id, config));
    body.push_str("</div>\n");

    let html = document(&title, &body);
    debug!("Rendered invoice page: {} bytes", html.len());
    html
}

fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n\
         </head>\n\
         <body class=\"min-h-screen bg-gray-50\">\n\
         {}\
         </body>\n\
         </html>\n",
        html_escape(title),
        body
    )
}

fn loading_body() -> String {
    "<div class=\"min-h-screen bg-gray-50 flex flex-col items-center justify-center p-4\">\n\
     <div class=\"animate-spin w-12 h-12 mb-4\"></div>\n\
     <h3 class=\"text-xl font-medium text-gray-700\">Invoice loading...</h3>\n\
     <p class=\"text-gray-500 mt-2\">Please wait while we retrieve your invoice details.</p>\n\
     </div>\n"
        .to_string()
}

fn failed_body() -> String {
    "<div class=\"min-h-screen bg-gray-50 flex flex-col items-center justify-center p-4\">\n\
     <div class=\"bg-white rounded-lg shadow-lg p-8 max-w-md w-full text-center\">\n\
     <h3 class=\"text-xl font-semibold text-gray-900 mb-2\">Invoice Not Found</h3>\n\
     <p class=\"text-gray-600 mb-6\">Sorry, we couldn't load your invoice. The link may be invalid or expired.</p>\n\
     <button type=\"button\" class=\"w-full\" onclick=\"window.location.reload()\">Try Again</button>\n\
     </div>\n\
     </div>\n"
        .to_string()
}

fn header(payload: &InvoicePayload, config: &RenderConfig) -> String {
    let brand = match config.logo_url {
        Some(ref logo) => format!(
            "<img src=\"{}\" alt=\"Company Logo\" class=\"h-16 mb-2 object-contain\">",
            html_escape(logo)
        ),
        None => format!(
            "<h1 class=\"text-3xl font-bold mb-1\">{}</h1>",
            html_escape(&config.company_name)
        ),
    };
    let date = payload
        .date
        .as_deref()
        .map(|d| {
            format!(
                "<div class=\"flex items-center text-sm opacity-75\">{}</div>\n",
                html_escape(d)
            )
        })
        .unwrap_or_default();

    format!(
        "<header class=\"bg-gradient-to-r from-slate-800 to-slate-700 text-white py-10 px-6 sm:px-10\">\n\
         <div class=\"max-w-7xl mx-auto flex flex-col sm:flex-row items-center justify-between\">\n\
         <div class=\"flex flex-col items-center sm:items-start mb-4 sm:mb-0\">\n\
         {brand}\n\
         <div class=\"text-lg font-medium opacity-90\">{}</div>\n\
         </div>\n\
         {date}\
         </div>\n\
         </header>\n",
        html_escape(&payload.invoice_no)
    )
}

fn main_section(payload: &InvoicePayload, content_html: &str, config: &RenderConfig) -> String {
    let overview = payload
        .overview
        .as_deref()
        .unwrap_or(&config.default_overview);
    let conclusion = payload
        .conclusion
        .as_deref()
        .unwrap_or(&config.default_conclusion);

    let mut out = String::new();
    out.push_str("<main class=\"flex-grow\">\n<div class=\"max-w-7xl mx-auto px-6 sm:px-10\">\n");
    out.push_str("<div class=\"py-8 border-b border-gray-200\">\n");
    out.push_str(&format!(
        "<p class=\"text-gray-700 mb-6\">{}</p>\n",
        html_escape(overview)
    ));
    if !content_html.is_empty() {
        out.push_str("<div class=\"prose prose-lg max-w-none mb-8 markdown-content\">\n");
        out.push_str(content_html);
        out.push_str("\n</div>\n");
    }
    out.push_str(&pricing_panel(payload));
    out.push_str(&format!(
        "<p class=\"text-gray-700 mt-8\">{}</p>\n",
        html_escape(conclusion)
    ));
    out.push_str("</div>\n</div>\n</main>\n");
    out
}

fn pricing_panel(payload: &InvoicePayload) -> String {
    const ROW: &str = "flex justify-between py-2 border-b border-gray-200";
    let row = |label: &str, value_class: &str, value: String| {
        format!(
            "<div class=\"{ROW}\"><span class=\"text-gray-600\">{label}</span><span class=\"{value_class}\">{value}</span></div>\n"
        )
    };

    let mut out = String::from("<div class=\"mt-8 bg-white rounded-lg p-6 max-w-lg ml-auto shadow-sm\">\n");
    out.push_str(&row(
        "Original Invoice",
        "font-medium text-gray-900",
        format_currency(payload.original_quote),
    ));
    out.push_str(&row(
        "Subtotal",
        "font-medium text-gray-900",
        format_currency(payload.subtotal),
    ));
    out.push_str(&row(
        "Deposit Paid",
        "font-medium text-red-600",
        format!("-{}", format_currency(payload.deposit_paid)),
    ));
    out.push_str(&format!(
        "<div class=\"flex justify-between py-3 mt-2 text-lg font-semibold border-b border-gray-200\">\
         <span class=\"text-gray-900\">Total Due</span><span class=\"text-gray-900\">{}</span></div>\n",
        format_currency(payload.total_due)
    ));
    out.push_str(&format!(
        "<div class=\"flex justify-between py-3 mt-2 text-lg font-semibold bg-blue-50 px-3 rounded\">\
         <span class=\"text-blue-800\">Final Balance</span><span class=\"text-blue-800\">{}</span></div>\n",
        format_currency(payload.final_balance)
    ));
    out.push_str("</div>\n");
    out
}

/// Payment link: the payload's own link, else the local pay path for this id.
pub fn payment_href(payload: &InvoicePayload, invoice_id: &str, config: &RenderConfig) -> String {
    if !payload.stripe_payment_intent.is_empty() {
        return payload.stripe_payment_intent.clone();
    }
    let id: String = url::form_urlencoded::byte_serialize(invoice_id.as_bytes()).collect();
    format!("{}?id={}", config.pay_path, id)
}

fn action_section(payload: &InvoicePayload, invoice_id: &str, config: &RenderConfig) -> String {
    format!(
        "<section class=\"no-pdf bg-gradient-to-r from-slate-800 to-slate-700 text-white py-12 px-6\">\n\
         <div class=\"max-w-7xl mx-auto flex flex-col md:flex-row items-center justify-between\">\n\
         <div class=\"text-center md:text-left mb-6 md:mb-0\">\n\
         <div class=\"text-3xl font-bold mb-2\">{balance}</div>\n\
         <div class=\"text-lg opacity-90\">Final Balance Due</div>\n\
         </div>\n\
         <div class=\"flex flex-col items-center\">\n\
         <a href=\"{pay}\" target=\"_blank\" rel=\"noopener noreferrer\" \
         class=\"inline-block bg-emerald-500 hover:bg-emerald-600 text-white font-semibold px-10 py-4 rounded-lg text-lg\">Pay Final Balance</a>\n\
         <div class=\"mt-4\"><a href=\"{terms}\" target=\"_blank\" rel=\"noreferrer\" \
         class=\"text-gray-300 hover:text-white underline text-sm\">Terms and Conditions</a></div>\n\
         </div>\n\
         </div>\n\
         </section>\n",
        balance = format_currency(payload.final_balance),
        pay = html_escape(&payment_href(payload, invoice_id, config)),
        terms = html_escape(&config.terms_url),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> InvoicePayload {
        InvoicePayload {
            invoice_no: "Invoice #315".into(),
            customer_name: "Andre Viruez".into(),
            content: "## Scope\n\n- Walls".into(),
            original_quote: 1009.37,
            subtotal: 1009.37,
            total_due: 1009.37,
            deposit_paid: 504.69,
            final_balance: 504.68,
            date: Some("July 21, 2025".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(5.0), "$5.00");
        assert_eq!(format_currency(999.999), "$1,000.00");
        assert_eq!(format_currency(1234567.5), "$1,234,567.50");
        assert_eq!(format_currency(-20.0), "-$20.00");
        assert_eq!(format_currency(-0.001), "$0.00");
        assert_eq!(format_currency(f64::NAN), "$0.00");
        assert_eq!(format_currency(f64::INFINITY), "$0.00");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<b>"Tom & Jerry's"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_loading_and_failed_pages() {
        let config = RenderConfig::default();
        let loading = render_page(&PageState::Loading, "315", &config);
        assert!(loading.contains("Invoice loading..."));
        assert!(loading.starts_with("<!DOCTYPE html>"));

        let failed = render_page(&PageState::Failed, "315", &config);
        assert!(failed.contains("Invoice Not Found"));
        assert!(failed.contains("Try Again"));
        assert!(!failed.contains("markdown-content"));
    }

    #[test]
    fn test_from_result() {
        assert_eq!(
            PageState::from_result(Err(InvoiceError::MissingInvoiceId)),
            PageState::Failed
        );
        assert!(matches!(
            PageState::from_result(Ok(payload())),
            PageState::Ready(_)
        ));
    }

    #[test]
    fn test_ready_page_sections() {
        let config = RenderConfig::default();
        let html = render_page(&PageState::Ready(Box::new(payload())), "315", &config);
        assert!(html.contains("<title>Invoice #315</title>"));
        assert!(html.contains(">THOSE GUYS PAINTING CO.</h1>"));
        assert!(html.contains("July 21, 2025"));
        assert!(html.contains("markdown-content"));
        assert!(html.contains(">Scope</h2>"));
        assert!(html.contains(">Original Invoice</span><span class=\"font-medium text-gray-900\">$1,009.37</span>"));
        assert!(html.contains(">-$504.69</span>"));
        assert!(html.contains(">Final Balance</span><span class=\"text-blue-800\">$504.68</span>"));
        assert!(html.contains("class=\"no-pdf"));
        assert!(html.contains("href=\"/pay?id=315\""));
        assert!(html.contains(crate::config::DEFAULT_OVERVIEW));
    }

    #[test]
    fn test_ready_page_escapes_payload_text() {
        let mut p = payload();
        p.invoice_no = "<script>alert(1)</script>".into();
        p.overview = Some("Walls & trim".into());
        let html = render_page(&PageState::Ready(Box::new(p)), "315", &RenderConfig::default());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("Walls &amp; trim"));
    }

    #[test]
    fn test_missing_date_is_omitted() {
        let mut p = payload();
        p.date = None;
        let config = RenderConfig::default();
        let state = PageState::Ready(Box::new(p));
        let html = render_page(&state, "315", &config);
        assert!(!html.contains("flex items-center text-sm opacity-75"));
        assert_eq!(html, render_page(&state, "315", &config));
    }

    #[test]
    fn test_empty_content_has_no_container() {
        let mut p = payload();
        p.content.clear();
        let html = render_page(&PageState::Ready(Box::new(p)), "315", &RenderConfig::default());
        assert!(!html.contains("markdown-content"));
        assert!(html.contains("Final Balance"));
    }

    #[test]
    fn test_payment_href() {
        let config = RenderConfig::default();
        let mut p = payload();
        assert_eq!(payment_href(&p, "Invoice #315", &config), "/pay?id=Invoice+%23315");
        p.stripe_payment_intent = "https://buy.stripe.com/x".into();
        assert_eq!(payment_href(&p, "315", &config), "https://buy.stripe.com/x");
    }

    #[test]
    fn test_logo_replaces_company_name() {
        let config = RenderConfig::builder()
            .logo_url("https://cdn.example.com/logo.png")
            .build()
            .unwrap();
        let html = render_page(&PageState::Ready(Box::new(payload())), "315", &config);
        assert!(html.contains("<img src=\"https://cdn.example.com/logo.png\""));
        assert!(!html.contains("THOSE GUYS PAINTING CO."));
    }
}
