//! finodok-agent - analysis agent client
//!
//! Sends an analysis request to the agent service and returns its Markdown
//! report and company overview. [`fetch_report`] never fails: transport and
//! server errors come back as report content.

pub mod client;
pub mod error;
pub mod types;

pub use client::{fetch_report, AgentClient, HttpAgentClient, EMPTY_REPORT_PLACEHOLDER};
pub use error::{AgentError, Result};
pub use types::{AgentReport, AnalysisRequest, RiskTolerance};
