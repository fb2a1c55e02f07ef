//! Agent client trait and HTTP implementation

use std::time::Duration;

use finodok_core::AgentSettings;
use reqwest::blocking::Client;
use tracing::{debug, warn};

use crate::error::{AgentError, Result};
use crate::types::{AgentReport, AnalysisRequest};

/// Report body used when the agent answers with nothing
pub const EMPTY_REPORT_PLACEHOLDER: &str = "## No report returned from Agent.\n";

/// Anything that can run an analysis
pub trait AgentClient: Send + Sync {
    /// Run one analysis and return the agent's report
    fn analyze(&self, request: &AnalysisRequest) -> Result<AgentReport>;
}

/// Client for an agent service reachable over HTTP
///
/// Posts the request as JSON and expects
/// `{"markdown_report": "...", "stock_overview": "..."}` back.
#[derive(Debug, Clone)]
pub struct HttpAgentClient {
    endpoint: String,
    api_key: Option<String>,
    client: Client,
}

impl HttpAgentClient {
    /// Create a client from the agent settings
    pub fn new(settings: &AgentSettings) -> Result<Self> {
        let endpoint = settings
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or(AgentError::NotConfigured)?;

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            endpoint: endpoint.to_string(),
            api_key: settings.api_key.clone().filter(|k| !k.is_empty()),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl AgentClient for HttpAgentClient {
    fn analyze(&self, request: &AnalysisRequest) -> Result<AgentReport> {
        debug!(endpoint = %self.endpoint, symbol = %request.stock_symbol, "calling analysis agent");

        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }
        let response = builder.send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AgentError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Run an analysis, turning every failure into report content
///
/// An empty report becomes a placeholder heading. An error becomes an
/// error heading in both the report and the overview, so a report can
/// still be produced.
pub fn fetch_report(client: &dyn AgentClient, request: &AnalysisRequest) -> AgentReport {
    match client.analyze(request) {
        Ok(mut report) => {
            if report.markdown_report.trim().is_empty() {
                report.markdown_report = EMPTY_REPORT_PLACEHOLDER.to_string();
            }
            report
        }
        Err(e) => {
            warn!(symbol = %request.stock_symbol, error = %e, "agent call failed");
            let message = format!("# Error\nAgent API call failed: {}", e);
            AgentReport {
                markdown_report: message.clone(),
                stock_overview: message,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_endpoint() {
        let settings = AgentSettings::default();
        assert!(matches!(
            HttpAgentClient::new(&settings),
            Err(AgentError::NotConfigured)
        ));

        let blank = AgentSettings {
            endpoint: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            HttpAgentClient::new(&blank),
            Err(AgentError::NotConfigured)
        ));
    }

    #[test]
    fn test_client_from_settings() {
        let settings = AgentSettings {
            endpoint: Some("http://127.0.0.1:9/analyze".to_string()),
            api_key: Some(String::new()),
            timeout_secs: 5,
        };
        let client = HttpAgentClient::new(&settings).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:9/analyze");
        assert!(client.api_key.is_none());
    }
}
