//! Configuration for fetching and rendering invoice pages.
//!
//! Everything outside the markdown text itself is controlled through
//! [`RenderConfig`], built via its [`RenderConfigBuilder`]. The markdown
//! pipeline only ever sees the [`Theme`]; the remaining fields drive the
//! webhook fetch and the page chrome around the rendered content.

use crate::error::InvoiceError;
use crate::theme::Theme;
use serde::{Deserialize, Serialize};

/// Default overview paragraph when the payload carries none.
pub const DEFAULT_OVERVIEW: &str = "Professional painting services tailored to your needs.";

/// Default closing paragraph when the payload carries none.
pub const DEFAULT_CONCLUSION: &str =
    "Thank you for choosing Those Guys Painting Co. We look forward to transforming your space!";

/// Configuration for an invoice render.
///
/// # Example
/// ```rust
/// use invoice2html::RenderConfig;
///
/// let config = RenderConfig::builder()
///     .webhook_url("https://hook.example.com/invoice")
///     .request_timeout_secs(10)
///     .build()
///     .unwrap();
/// assert_eq!(config.request_timeout_secs, 10);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Automation webhook that answers `?id=<invoice id>` with the
    /// URL-encoded invoice payload. Required only for fetching.
    pub webhook_url: Option<String>,

    /// Whole-request timeout for the webhook call, in seconds. Range: 1–600. Default: 30.
    ///
    /// The automation platform can take several seconds to run its scenario
    /// before responding; anything shorter than ~10 s produces spurious
    /// timeouts under load.
    pub request_timeout_secs: u64,

    /// Class-token table for the markdown pipeline.
    pub theme: Theme,

    /// Name shown in the page header when no logo is configured.
    pub company_name: String,

    /// Optional logo image replacing the company name in the header.
    pub logo_url: Option<String>,

    /// Terms-and-conditions link in the action section.
    pub terms_url: String,

    /// Fallback payment path used when the payload has no payment link.
    /// The invoice id is appended as `?id=`.
    pub pay_path: String,

    pub default_overview: String,
    pub default_conclusion: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            request_timeout_secs: 30,
            theme: Theme::default(),
            company_name: "THOSE GUYS PAINTING CO.".into(),
            logo_url: None,
            terms_url: "https://www.tgpcquotes.com/terms-and-conditions".into(),
            pay_path: "/pay".into(),
            default_overview: DEFAULT_OVERVIEW.into(),
            default_conclusion: DEFAULT_CONCLUSION.into(),
        }
    }
}

impl RenderConfig {
    /// Create a new builder for `RenderConfig`.
    pub fn builder() -> RenderConfigBuilder {
        RenderConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`RenderConfig`].
#[derive(Debug)]
pub struct RenderConfigBuilder {
    config: RenderConfig,
}

impl RenderConfigBuilder {
    pub fn webhook_url(mut self, url: impl Into<String>) -> Self {
        self.config.webhook_url = Some(url.into());
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = secs.clamp(1, 600);
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.config.theme = theme;
        self
    }

    pub fn company_name(mut self, name: impl Into<String>) -> Self {
        self.config.company_name = name.into();
        self
    }

    pub fn logo_url(mut self, url: impl Into<String>) -> Self {
        self.config.logo_url = Some(url.into());
        self
    }

    pub fn terms_url(mut self, url: impl Into<String>) -> Self {
        self.config.terms_url = url.into();
        self
    }

    pub fn pay_path(mut self, path: impl Into<String>) -> Self {
        self.config.pay_path = path.into();
        self
    }

    pub fn default_overview(mut self, text: impl Into<String>) -> Self {
        self.config.default_overview = text.into();
        self
    }

    pub fn default_conclusion(mut self, text: impl Into<String>) -> Self {
        self.config.default_conclusion = text.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<RenderConfig, InvoiceError> {
        let c = &self.config;
        if let Some(ref url) = c.webhook_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(InvoiceError::InvalidConfig(format!(
                    "webhook URL must be HTTP/HTTPS, got '{}'",
                    url
                )));
            }
        }
        Ok(self.config)
    }
}
