//! Webhook fetch: retrieve the URL-encoded payload for one invoice id.
//!
//! The automation platform answers `GET {webhook}?id={id}` with the payload
//! text. Two quirks shape the error handling:
//!
//! * A scenario that is not configured to return data answers `200` with the
//!   literal body `Redirecting...`. That is checked before the status code so
//!   it surfaces as [`InvoiceError::WebhookRedirecting`] rather than as an
//!   empty invoice.
//! * Redirects are followed (reqwest's default policy); only the final
//!   response counts.
//!
//! There is no automatic retry. The page offers a manual "Try Again" instead.

use crate::config::RenderConfig;
use crate::error::InvoiceError;
use crate::payload::InvoicePayload;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, error, info};

const ACCEPT_PAYLOAD: &str = "text/plain, application/x-www-form-urlencoded, */*";
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const REDIRECT_PLACEHOLDER: &str = "Redirecting...";

/// Characters of the response body kept in logs and error messages.
const PREVIEW_CHARS: usize = 200;

/// Build the request URL, appending `id` as an encoded query pair.
pub fn webhook_request_url(webhook_url: &str, invoice_id: &str) -> Result<Url, InvoiceError> {
    let mut url = Url::parse(webhook_url).map_err(|e| InvoiceError::InvalidWebhookUrl {
        url: webhook_url.to_string(),
        reason: e.to_string(),
    })?;
    url.query_pairs_mut().append_pair("id", invoice_id);
    Ok(url)
}

/// Fetch the raw payload text for `invoice_id`.
pub async fn fetch_invoice_text(
    invoice_id: &str,
    config: &RenderConfig,
) -> Result<String, InvoiceError> {
    let invoice_id = invoice_id.trim();
    if invoice_id.is_empty() {
        error!("Invoice ID is missing");
        return Err(InvoiceError::MissingInvoiceId);
    }
    let webhook = config
        .webhook_url
        .as_deref()
        .ok_or(InvoiceError::WebhookNotConfigured)?;
    let url = webhook_request_url(webhook, invoice_id)?;
    info!("Fetching invoice {} from webhook: {}", invoice_id, url);

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()
        .map_err(|e| InvoiceError::Internal(format!("HTTP client: {e}")))?;

    let response = client
        .get(url.clone())
        .header(ACCEPT, ACCEPT_PAYLOAD)
        .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                InvoiceError::WebhookTimeout {
                    url: url.to_string(),
                    secs: config.request_timeout_secs,
                }
            } else {
                InvoiceError::WebhookFailed {
                    url: url.to_string(),
                    reason: e.to_string(),
                }
            }
        })?;

    let status = response.status();
    debug!("Webhook final response: {} from {}", status, response.url());

    let text = response.text().await.map_err(|e| {
        if e.is_timeout() {
            InvoiceError::WebhookTimeout {
                url: url.to_string(),
                secs: config.request_timeout_secs,
            }
        } else {
            InvoiceError::WebhookFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        }
    })?;
    let preview = preview(&text);
    debug!("Webhook response text (first {} chars): {:?}", PREVIEW_CHARS, preview);

    if text.trim() == REDIRECT_PLACEHOLDER {
        error!("Webhook returned 'Redirecting...'; the scenario is not returning invoice data");
        return Err(InvoiceError::WebhookRedirecting {
            url: webhook.to_string(),
        });
    }

    if !status.is_success() {
        error!("Webhook HTTP error {}: {:?}", status, preview);
        return Err(InvoiceError::WebhookHttp {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            body_preview: preview,
        });
    }

    info!("Fetched invoice {} ({} bytes)", invoice_id, text.len());
    Ok(text)
}

/// Fetch and decode the payload for `invoice_id`.
pub async fn fetch_invoice(
    invoice_id: &str,
    config: &RenderConfig,
) -> Result<InvoicePayload, InvoiceError> {
    let text = fetch_invoice_text(invoice_id, config).await?;
    Ok(InvoicePayload::parse(&text))
}

fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url_encodes_id() {
        let url = webhook_request_url("https://hook.example.com/abc", "Invoice #315").unwrap();
        assert_eq!(url.as_str(), "https://hook.example.com/abc?id=Invoice+%23315");
    }

    #[test]
    fn test_request_url_keeps_existing_query() {
        let url = webhook_request_url("https://hook.example.com/abc?key=1", "7").unwrap();
        assert_eq!(url.as_str(), "https://hook.example.com/abc?key=1&id=7");
    }

    #[test]
    fn test_request_url_invalid() {
        let err = webhook_request_url("not a url", "7").unwrap_err();
        assert!(matches!(err, InvoiceError::InvalidWebhookUrl { .. }));
    }

    #[test]
    fn test_preview_is_char_safe() {
        let text = "é".repeat(300);
        assert_eq!(preview(&text).chars().count(), PREVIEW_CHARS);
    }

    #[tokio::test]
    async fn test_missing_id() {
        let config = RenderConfig::builder()
            .webhook_url("https://hook.example.com/abc")
            .build()
            .unwrap();
        let err = fetch_invoice_text("  ", &config).await.unwrap_err();
        assert!(matches!(err, InvoiceError::MissingInvoiceId));
    }

    #[tokio::test]
    async fn test_webhook_not_configured() {
        let err = fetch_invoice_text("315", &RenderConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, InvoiceError::WebhookNotConfigured));
    }
}
