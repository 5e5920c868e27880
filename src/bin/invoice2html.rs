//! CLI binary for invoice2html.
//!
//! A thin shim over the library crate that maps CLI flags
//! to `RenderConfig` and prints or writes the rendered HTML.

use anyhow::{Context, Result};
use clap::Parser;
use invoice2html::{
    render_invoice, render_markdown_with, render_payload, write_html, RenderConfig, RenderedInvoice,
    Theme,
};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers ──────────────────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Fetch invoice 315 from the webhook and print the page
  invoice2html 315

  # Write the page to a file
  invoice2html 315 -o invoice-315.html

  # Render a saved webhook response without network access
  invoice2html --payload-file response.txt --invoice-id 315 -o out.html

  # Render only a markdown body (fragment), keeping the additional-work section
  invoice2html --markdown-file body.md --additional-total 250

  # Structured output (payload, content HTML, page HTML, timings)
  invoice2html 315 --json > invoice.json

ENVIRONMENT VARIABLES:
  MAKE_WEBHOOK_URL           Invoice webhook (answers ?id=<invoice id>)
  INVOICE2HTML_TIMEOUT       Webhook timeout in seconds
  INVOICE2HTML_THEME         JSON theme override file
  INVOICE2HTML_LOGO          Logo URL shown in the page header
  RUST_LOG                   Overrides the log filter (e.g. invoice2html=debug)
"#;

/// Render painting-company invoices into styled HTML pages.
#[derive(Parser, Debug)]
#[command(
    name = "invoice2html",
    version,
    about = "Render invoice payloads and markdown bodies into styled HTML",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Invoice id, or a file path with --payload-file / --markdown-file.
    input: String,

    /// Treat INPUT as a saved URL-encoded webhook response.
    #[arg(long, conflicts_with = "markdown_file")]
    payload_file: bool,

    /// Treat INPUT as a raw markdown body and print the HTML fragment.
    #[arg(long)]
    markdown_file: bool,

    /// Additional-work total used with --markdown-file.
    #[arg(long, default_value_t = 0.0, requires = "markdown_file")]
    additional_total: f64,

    /// Invoice id for the pay link when rendering a saved payload.
    #[arg(long, requires = "payload_file")]
    invoice_id: Option<String>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long, env = "INVOICE2HTML_OUTPUT")]
    output: Option<PathBuf>,

    /// Invoice webhook URL.
    #[arg(long, env = "MAKE_WEBHOOK_URL")]
    webhook_url: Option<String>,

    /// Webhook timeout in seconds (1–600).
    #[arg(long, env = "INVOICE2HTML_TIMEOUT", default_value_t = 30,
          value_parser = clap::value_parser!(u64).range(1..=600))]
    timeout: u64,

    /// JSON file overriding theme classes.
    #[arg(long, env = "INVOICE2HTML_THEME")]
    theme: Option<PathBuf>,

    /// Logo URL replacing the company name in the header.
    #[arg(long, env = "INVOICE2HTML_LOGO")]
    logo: Option<String>,

    /// Company name shown in the header.
    #[arg(long, env = "INVOICE2HTML_COMPANY")]
    company: Option<String>,

    /// Emit only the rendered markdown content, not the full page.
    #[arg(long)]
    fragment: bool,

    /// Output structured JSON (RenderedInvoice) instead of HTML.
    #[arg(long, conflicts_with = "fragment")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "INVOICE2HTML_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "INVOICE2HTML_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;

    // ── Markdown-only mode ───────────────────────────────────────────────
    if cli.markdown_file {
        let markdown = tokio::fs::read_to_string(&cli.input)
            .await
            .with_context(|| format!("Failed to read markdown from {:?}", cli.input))?;
        let html = render_markdown_with(&markdown, cli.additional_total, &config.theme);
        let out = if cli.json {
            serde_json::to_string_pretty(&serde_json::json!({ "content_html": html }))
                .context("Failed to serialise output")?
        } else {
            html
        };
        return emit(&cli, &out).await;
    }

    // ── Full invoice render ──────────────────────────────────────────────
    let rendered = if cli.payload_file {
        let body = tokio::fs::read_to_string(&cli.input)
            .await
            .with_context(|| format!("Failed to read payload from {:?}", cli.input))?;
        render_payload(&body, cli.invoice_id.as_deref().unwrap_or(""), &config)
    } else {
        render_invoice(&cli.input, &config)
            .await
            .context("Invoice render failed")?
    };

    let out = select_output(&cli, &rendered)?;
    emit(&cli, &out).await?;

    if !cli.quiet && !cli.json {
        eprintln!(
            "{}  {}  {}",
            green("✔"),
            bold(if rendered.payload.invoice_no.is_empty() {
                "invoice"
            } else {
                rendered.payload.invoice_no.as_str()
            }),
            dim(&format!(
                "{} bytes  fetch {}ms  render {}ms",
                rendered.stats.html_bytes,
                rendered.stats.fetch_duration_ms,
                rendered.stats.render_duration_ms
            )),
        );
    }
    Ok(())
}

/// Map CLI args to `RenderConfig`.
fn build_config(cli: &Cli) -> Result<RenderConfig> {
    let mut builder = RenderConfig::builder().request_timeout_secs(cli.timeout);

    if let Some(ref url) = cli.webhook_url {
        builder = builder.webhook_url(url);
    }
    if let Some(ref path) = cli.theme {
        builder = builder.theme(Theme::load(path).context("Failed to load theme")?);
    }
    if let Some(ref logo) = cli.logo {
        builder = builder.logo_url(logo);
    }
    if let Some(ref company) = cli.company {
        builder = builder.company_name(company);
    }

    builder.build().context("Invalid configuration")
}

fn select_output(cli: &Cli, rendered: &RenderedInvoice) -> Result<String> {
    if cli.json {
        serde_json::to_string_pretty(rendered).context("Failed to serialise output")
    } else if cli.fragment {
        Ok(rendered.content_html.clone())
    } else {
        Ok(rendered.page_html.clone())
    }
}

/// Write to `--output` when given, else stdout with a trailing newline.
async fn emit(cli: &Cli, text: &str) -> Result<()> {
    if let Some(ref path) = cli.output {
        write_html(path, text)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;
        if !cli.quiet {
            eprintln!("{}  →  {}", green("✔"), bold(&path.display().to_string()));
        }
        return Ok(());
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle
        .write_all(text.as_bytes())
        .context("Failed to write to stdout")?;
    if !text.ends_with('\n') {
        handle.write_all(b"\n").ok();
    }
    Ok(())
}
