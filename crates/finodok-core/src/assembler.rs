//! Document assembly
//!
//! Combines the asset embedder, the Markdown converter and the fragment
//! builders into one self-contained HTML document.

use std::fmt;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::assets::{embed_inline, load_and_embed_logo};
use crate::fragments::{build_metrics_panel, build_risk_table, format_inr, format_price, html_escape};
use crate::markdown::to_html;
use crate::request::{MetricMap, ReportRequest};
use crate::template::{self, TemplateSlots, RISK_NOTICE};

/// A fully assembled HTML document
///
/// All images are inlined, so the document converts without access to the
/// filesystem or network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledDocument {
    html: String,
}

impl AssembledDocument {
    /// Wrap pre-built HTML
    pub fn from_html(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }

    pub fn len(&self) -> usize {
        self.html.len()
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

impl fmt::Display for AssembledDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.html)
    }
}

/// Assembler for report documents
pub struct DocumentAssembler;

impl DocumentAssembler {
    /// Assemble a document stamped with the current UTC time
    pub fn assemble(request: &ReportRequest) -> AssembledDocument {
        Self::assemble_at(request, Utc::now())
    }

    /// Assemble a document stamped with `generated_at`
    ///
    /// Identical inputs produce byte-identical output.
    pub fn assemble_at(request: &ReportRequest, generated_at: DateTime<Utc>) -> AssembledDocument {
        let logo_html = load_and_embed_logo(request.logo_path.as_deref())
            .map(|uri| format!(r#"<img class="logo" src="{}" alt="logo"/>"#, uri))
            .unwrap_or_default();

        let overview_html = to_html(&request.overview_text);
        let content_html = to_html(&request.markdown_body);
        let key_metrics_html = build_metrics_panel(&Self::metrics(request));

        let chart_html = request
            .chart_image
            .as_deref()
            .map(|png| {
                format!(
                    r#"<img src="{}" alt="{} price chart"/>"#,
                    embed_inline(png, "image/png"),
                    html_escape(&request.symbol)
                )
            })
            .unwrap_or_default();

        let risk_html = match request.risk_summary.as_deref() {
            Some(records) if !records.is_empty() => build_risk_table(records),
            _ => RISK_NOTICE.to_string(),
        };

        let symbol = html_escape(&request.symbol);
        let exchange = html_escape(&request.exchange);
        let subtitle = format!("{} — Risk Analysis", symbol);
        let as_of = generated_at.format("%Y-%m-%d").to_string();
        let as_of_long = generated_at.format("%Y-%m-%d %H:%M UTC").to_string();

        let html = template::render(&TemplateSlots {
            logo_html: &logo_html,
            subtitle: &subtitle,
            symbol: &symbol,
            exchange: &exchange,
            as_of: &as_of,
            as_of_long: &as_of_long,
            overview_html: &overview_html,
            key_metrics_html: &key_metrics_html,
            chart_html: &chart_html,
            content_html: &content_html,
            risk_html: &risk_html,
        });

        debug!(
            symbol = %request.symbol,
            bytes = html.len(),
            has_logo = !logo_html.is_empty(),
            has_chart = !chart_html.is_empty(),
            "assembled report document"
        );

        AssembledDocument { html }
    }

    /// Compose the key metrics in their fixed order
    ///
    /// Symbol, Exchange, Capital, Last close, then extra metrics. A repeated
    /// label overwrites the earlier value.
    fn metrics(request: &ReportRequest) -> MetricMap {
        let mut metrics = MetricMap::new();
        metrics.insert("Symbol", request.symbol.as_str());
        if !request.exchange.is_empty() {
            metrics.insert("Exchange", request.exchange.as_str());
        }
        if let Some(capital) = request.capital {
            metrics.insert("Capital (INR)", format_inr(capital));
        }
        if let Some(last_close) = request.last_close {
            metrics.insert("Last close", format_price(last_close));
        }
        if let Some(ref extra) = request.extra_metrics {
            metrics.extend_from(extra);
        }
        metrics
    }
}
