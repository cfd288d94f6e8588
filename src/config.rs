use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for the JSON relay fetch path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayConfig {
    /// Relay endpoint; the target URL is passed as the `url` query parameter
    #[serde(default = "default_relay_endpoint")]
    pub endpoint: String,
}

/// Configuration for the WebDriver fetch path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,
}

/// How the page markup is retrieved
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FetchMode {
    /// Plain HTTP GET against the target
    #[default]
    Direct,

    /// GET through a relay that wraps the page in `{"contents": "..."}`
    Relay(RelayConfig),

    /// Render the page in a WebDriver-controlled browser
    Browser(BrowserConfig),
}

/// Configuration for the content fetcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetcherConfig {
    #[serde(default)]
    pub mode: FetchMode,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Whether to check `/robots.txt` and `/sitemap.xml`
    #[serde(default = "default_probe_well_known")]
    pub probe_well_known: bool,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            mode: FetchMode::default(),
            timeout_secs: default_timeout_secs(),
            probe_well_known: default_probe_well_known(),
            user_agent: default_user_agent(),
        }
    }
}

/// Top-level analyzer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    #[serde(default)]
    pub fetcher: FetcherConfig,

    /// Number of entries kept in the analysis history
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            fetcher: FetcherConfig::default(),
            history_capacity: default_history_capacity(),
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .map_err(|e| AnalysisError::Config(format!("{}: {}", path.display(), e)))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let mut config: Self =
            serde_json::from_str(json).map_err(|e| AnalysisError::Config(e.to_string()))?;
        config.apply_env();
        Ok(config)
    }

    /// Override the WebDriver URL with an environment variable if provided
    pub fn apply_env(&mut self) {
        if let FetchMode::Browser(browser) = &mut self.fetcher.mode {
            if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
                if !webdriver_url.is_empty() {
                    browser.webdriver_url = webdriver_url;
                }
            }
        }
    }
}

/// Default relay endpoint
pub fn default_relay_endpoint() -> String {
    "https://api.allorigins.win/get".to_string()
}

/// Default value for webdriver_url
pub fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_probe_well_known() -> bool {
    true
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (compatible; SEO-Analyzer/1.0)".to_string()
}

fn default_history_capacity() -> usize {
    10
}
