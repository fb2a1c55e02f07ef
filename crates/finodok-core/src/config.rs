//! Configuration settings
//!
//! All settings are passed explicitly; nothing here reads process state on
//! its own. Callers that want environment overrides apply them once with
//! [`FinodokConfig::with_env_overrides`].

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::request::DEFAULT_EXCHANGE;

/// Environment key overriding the agent endpoint
pub const ENV_AGENT_ENDPOINT: &str = "FINODOK_AGENT_ENDPOINT";

/// Environment key overriding the agent API key
pub const ENV_AGENT_API_KEY: &str = "FINODOK_AGENT_API_KEY";

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FinodokConfig {
    /// Analysis agent connection
    pub agent: AgentSettings,
    /// Conversion engine options
    pub renderer: RendererOptions,
    /// Report defaults
    pub report: ReportSettings,
}

impl FinodokConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&content)?)
    }

    /// Apply agent overrides from a key lookup (usually the environment)
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup(ENV_AGENT_ENDPOINT).filter(|v| !v.is_empty()) {
            self.agent.endpoint = Some(endpoint);
        }
        if let Some(key) = lookup(ENV_AGENT_API_KEY).filter(|v| !v.is_empty()) {
            self.agent.api_key = Some(key);
        }
        self
    }
}

/// Analysis agent settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// URL the analysis payload is POSTed to
    pub endpoint: Option<String>,
    /// Bearer token sent with each request
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            timeout_secs: 60,
        }
    }
}

/// Options for the conversion engines
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererOptions {
    /// WeasyPrint executable
    pub weasyprint_bin: String,
    /// wkhtmltopdf executable
    pub wkhtmltopdf_bin: String,
    /// Base URL for resolving relative links
    pub base_url: Option<String>,
    /// Font files for the plain-text engine
    pub font_paths: Vec<PathBuf>,
    /// Page margin for wkhtmltopdf, in millimetres
    pub margin_mm: u32,
    /// Engines to leave out of the registry, by name
    pub disabled_engines: Vec<String>,
}

impl Default for RendererOptions {
    fn default() -> Self {
        Self {
            weasyprint_bin: "weasyprint".to_string(),
            wkhtmltopdf_bin: "wkhtmltopdf".to_string(),
            base_url: None,
            font_paths: Vec::new(),
            margin_mm: 10,
            disabled_engines: Vec::new(),
        }
    }
}

impl RendererOptions {
    /// Whether an engine has been disabled by name
    pub fn is_disabled(&self, engine: &str) -> bool {
        self.disabled_engines
            .iter()
            .any(|name| name.eq_ignore_ascii_case(engine))
    }
}

/// Report defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Exchange used when the caller does not pass one
    pub exchange: String,
    /// Logo embedded in every report
    pub logo_path: Option<PathBuf>,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            exchange: DEFAULT_EXCHANGE.to_string(),
            logo_path: None,
        }
    }
}
