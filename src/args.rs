use clap::{Parser, ValueEnum};
use seo_score::config::{
    AnalyzerConfig, BrowserConfig, FetchMode, RelayConfig, default_relay_endpoint,
    default_webdriver_url,
};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "seo-score")]
#[command(about = "Fetches a web page and scores its on-page SEO signals")]
#[command(version)]
pub struct Args {
    /// Website to analyze (example.com or https://example.com)
    pub url: String,

    /// How to retrieve the page (direct, relay, browser)
    #[arg(short, long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Relay endpoint used in relay mode
    #[arg(long)]
    pub relay_endpoint: Option<String>,

    /// WebDriver URL used in browser mode
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Skip the robots.txt and sitemap.xml checks
    #[arg(long)]
    pub no_probes: bool,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write a JSON report into this directory
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// Record the result in this history file
    #[arg(long, value_name = "FILE")]
    pub history: Option<PathBuf>,

    /// Print the action plan after the metrics
    #[arg(long)]
    pub plan: bool,

    /// Print a short shareable summary
    #[arg(long)]
    pub share: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Direct,
    Relay,
    Browser,
}

/// Build the analyzer configuration from the config file (if any) and CLI overrides
pub fn build_config(args: &Args) -> seo_score::Result<AnalyzerConfig> {
    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::from_file(path)?,
        None => AnalyzerConfig::default(),
    };

    if let Some(mode) = args.mode {
        config.fetcher.mode = match mode {
            ModeArg::Direct => FetchMode::Direct,
            ModeArg::Relay => FetchMode::Relay(RelayConfig {
                endpoint: default_relay_endpoint(),
            }),
            ModeArg::Browser => FetchMode::Browser(BrowserConfig {
                webdriver_url: default_webdriver_url(),
            }),
        };
    }
    config.apply_env();

    match &mut config.fetcher.mode {
        FetchMode::Relay(relay) => {
            if let Some(endpoint) = &args.relay_endpoint {
                relay.endpoint = endpoint.clone();
            }
        }
        FetchMode::Browser(browser) => {
            if let Some(webdriver_url) = &args.webdriver_url {
                browser.webdriver_url = webdriver_url.clone();
            }
        }
        FetchMode::Direct => {}
    }

    if let Some(timeout) = args.timeout {
        config.fetcher.timeout_secs = timeout;
    }
    if args.no_probes {
        config.fetcher.probe_well_known = false;
    }

    Ok(config)
}
