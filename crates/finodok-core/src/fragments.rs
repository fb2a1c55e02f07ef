//! HTML fragment builders for the metrics panel and the risk table

use crate::request::{MetricMap, RiskRecord};

/// Build one metric box per entry, in insertion order
pub fn build_metrics_panel(metrics: &MetricMap) -> String {
    metrics
        .iter()
        .map(|(label, value)| {
            format!(
                r#"<div class="metric"><div class="metric-label">{}</div><div class="metric-value">{}</div></div>"#,
                html_escape(label),
                html_escape(value)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Build the risk summary table, one row per record in input order
///
/// An empty slice yields a table with only the header row.
pub fn build_risk_table(records: &[RiskRecord]) -> String {
    let mut html = String::from(
        "<table class=\"table\"><thead><tr><th>Area</th><th>Scenario</th><th>Risk</th><th>Mitigation</th></tr></thead><tbody>",
    );

    let rows: Vec<String> = records
        .iter()
        .map(|record| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                html_escape(&record.area),
                html_escape(&record.scenario),
                html_escape(&record.risk),
                html_escape(&record.mitigation)
            )
        })
        .collect();
    html.push_str(&rows.join("\n"));

    html.push_str("</tbody></table>");
    html
}

/// Format whole rupees with thousands separators, e.g. `₹50,000`
pub fn format_inr(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-₹{}", grouped)
    } else {
        format!("₹{}", grouped)
    }
}

/// Format a price with two decimals, e.g. `₹3500.25`
pub fn format_price(price: f64) -> String {
    format!("₹{:.2}", price)
}

/// Basic HTML escaping for text content
pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
