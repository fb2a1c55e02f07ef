//! Request and response payloads

use std::fmt;
use std::str::FromStr;

use finodok_data::PriceSummary;
use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// Investor's appetite for risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RiskTolerance {
    Low,
    #[default]
    Medium,
    High,
}

impl RiskTolerance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTolerance {
    type Err = AgentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(AgentError::UnknownRiskTolerance(s.to_string())),
        }
    }
}

/// Parameters sent to the agent for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisRequest {
    pub stock_symbol: String,
    pub exchange: String,
    /// Investment capital in whole rupees
    pub capital: i64,
    pub risk_tolerance: RiskTolerance,
    /// Trading strategy preference, e.g. "Swing Trading"
    pub strategy: String,
    /// Whether news flow should weigh on the analysis
    pub news_impact: bool,
    pub price_summary: PriceSummary,
}

impl Default for AnalysisRequest {
    fn default() -> Self {
        Self {
            stock_symbol: "RELIANCE".to_string(),
            exchange: "NSE".to_string(),
            capital: 10_000,
            risk_tolerance: RiskTolerance::Medium,
            strategy: "Swing Trading".to_string(),
            news_impact: true,
            price_summary: PriceSummary::default(),
        }
    }
}

impl AnalysisRequest {
    /// Create a request for a symbol with default parameters
    pub fn new(stock_symbol: impl AsRef<str>) -> Self {
        Self {
            stock_symbol: stock_symbol.as_ref().trim().to_uppercase(),
            ..Default::default()
        }
    }

    pub fn with_exchange(mut self, exchange: impl Into<String>) -> Self {
        self.exchange = exchange.into();
        self
    }

    pub fn with_capital(mut self, capital: i64) -> Self {
        self.capital = capital;
        self
    }

    pub fn with_risk_tolerance(mut self, risk_tolerance: RiskTolerance) -> Self {
        self.risk_tolerance = risk_tolerance;
        self
    }

    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy = strategy.into();
        self
    }

    pub fn with_news_impact(mut self, news_impact: bool) -> Self {
        self.news_impact = news_impact;
        self
    }

    pub fn with_price_summary(mut self, summary: PriceSummary) -> Self {
        self.price_summary = summary;
        self
    }
}

/// The agent's answer: a full report and a short company overview
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentReport {
    /// Full analysis in Markdown
    pub markdown_report: String,
    /// Short overview paragraph in Markdown
    pub stock_overview: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let request = AnalysisRequest::default();
        assert_eq!(request.stock_symbol, "RELIANCE");
        assert_eq!(request.capital, 10_000);
        assert_eq!(request.risk_tolerance, RiskTolerance::Medium);
        assert_eq!(request.strategy, "Swing Trading");
        assert!(request.news_impact);
    }

    #[test]
    fn test_request_payload_shape() {
        let request = AnalysisRequest::new(" tcs ")
            .with_capital(50_000)
            .with_risk_tolerance(RiskTolerance::High)
            .with_price_summary(PriceSummary {
                last_close: Some(3500.25),
                mean_30d: None,
            });
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["stock_symbol"], "TCS");
        assert_eq!(json["capital"], 50_000);
        assert_eq!(json["risk_tolerance"], "High");
        assert_eq!(json["news_impact"], true);
        assert_eq!(json["price_summary"]["last_close"], 3500.25);
        assert!(json["price_summary"]["mean_30d"].is_null());
    }

    #[test]
    fn test_risk_tolerance_parse() {
        assert_eq!("low".parse::<RiskTolerance>().unwrap(), RiskTolerance::Low);
        assert_eq!(" HIGH ".parse::<RiskTolerance>().unwrap(), RiskTolerance::High);
        assert!("extreme".parse::<RiskTolerance>().is_err());
    }

    #[test]
    fn test_report_missing_fields() {
        let report: AgentReport = serde_json::from_str(r###"{"markdown_report": "## Hi"}"###).unwrap();
        assert_eq!(report.markdown_report, "## Hi");
        assert_eq!(report.stock_overview, "");
    }
}
