//! Report request types
//!
//! A [`ReportRequest`] carries everything the assembler needs for one
//! document. It is built once per report and consumed by a single render.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Exchange used when the caller does not name one
pub const DEFAULT_EXCHANGE: &str = "NSE";

/// One row of the risk summary table
///
/// Missing keys deserialize to empty strings, so partial records from an
/// upstream JSON payload still render as a row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskRecord {
    /// Risk area (e.g. "Market")
    pub area: String,
    /// Scenario that triggers the risk
    pub scenario: String,
    /// Risk level or description
    pub risk: String,
    /// Suggested mitigation
    pub mitigation: String,
}

impl RiskRecord {
    /// Create a fully populated record
    pub fn new(
        area: impl Into<String>,
        scenario: impl Into<String>,
        risk: impl Into<String>,
        mitigation: impl Into<String>,
    ) -> Self {
        Self {
            area: area.into(),
            scenario: scenario.into(),
            risk: risk.into(),
            mitigation: mitigation.into(),
        }
    }
}

/// Insertion-ordered label -> value mapping
///
/// Inserting an existing label replaces its value in place, so the label
/// keeps the position of its first insertion (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricMap {
    entries: Vec<(String, String)>,
}

impl MetricMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a metric
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((label, value)),
        }
    }

    /// Look up a metric by label
    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == label)
            .map(|(_, value)| value.as_str())
    }

    /// Number of distinct labels
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(label, value)| (label.as_str(), value.as_str()))
    }

    /// Merge another map into this one, in the other map's order
    pub fn extend_from(&mut self, other: &MetricMap) {
        for (label, value) in other.iter() {
            self.insert(label, value);
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MetricMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = MetricMap::new();
        for (label, value) in iter {
            map.insert(label, value);
        }
        map
    }
}

/// Input for one report render
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRequest {
    /// Full analysis report in Markdown
    pub markdown_body: String,
    /// Short overview blurb in Markdown
    pub overview_text: String,
    /// Uppercase ticker symbol
    pub symbol: String,
    /// Exchange name; an empty string omits the Exchange metric
    pub exchange: String,
    /// PNG bytes of the price chart
    pub chart_image: Option<Vec<u8>>,
    /// Path to a logo image
    pub logo_path: Option<PathBuf>,
    /// Investment capital in whole rupees
    pub capital: Option<i64>,
    /// Last closing price
    pub last_close: Option<f64>,
    /// Caller-supplied metrics, appended after the built-in ones
    pub extra_metrics: Option<MetricMap>,
    /// Rows for the risk summary table
    pub risk_summary: Option<Vec<RiskRecord>>,
}

impl ReportRequest {
    /// Create a request with the required fields
    ///
    /// The symbol is trimmed and uppercased.
    pub fn new(
        markdown_body: impl Into<String>,
        overview_text: impl Into<String>,
        symbol: impl AsRef<str>,
    ) -> Self {
        Self {
            markdown_body: markdown_body.into(),
            overview_text: overview_text.into(),
            symbol: symbol.as_ref().trim().to_uppercase(),
            exchange: DEFAULT_EXCHANGE.to_string(),
            chart_image: None,
            logo_path: None,
            capital: None,
            last_close: None,
            extra_metrics: None,
            risk_summary: None,
        }
    }

    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = exchange.into();
        self
    }

    pub fn with_chart_image(mut self, png: Vec<u8>) -> Self {
        self.chart_image = Some(png);
        self
    }

    pub fn with_logo_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.logo_path = Some(path.into());
        self
    }

    pub fn with_capital(mut self, capital: i64) -> Self {
        self.capital = Some(capital);
        self
    }

    pub fn with_last_close(mut self, last_close: f64) -> Self {
        self.last_close = Some(last_close);
        self
    }

    pub fn with_extra_metrics(mut self, metrics: MetricMap) -> Self {
        self.extra_metrics = Some(metrics);
        self
    }

    /// Append a single extra metric
    pub fn with_metric(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_metrics
            .get_or_insert_with(MetricMap::new)
            .insert(label, value);
        self
    }

    pub fn with_risk_summary(mut self, records: Vec<RiskRecord>) -> Self {
        self.risk_summary = Some(records);
        self
    }
}
