pub mod analysis;
pub mod config;
pub mod error;
pub mod fallback;
pub mod fetchers;
pub mod history;
pub mod parsers;
pub mod report;
pub mod results;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::AnalyzerConfig;
pub use error::{AnalysisError, Result};
pub use results::{AnalysisReport, SeoMetrics};

use fetchers::Fetcher;
use url::Url;

/// Runs one analysis end to end: normalize, fetch, extract, and fall back on fetch failure
#[derive(Debug, Clone)]
pub struct Analyzer {
    fetcher: Fetcher,
}

impl Analyzer {
    /// Create a new analyzer from the given configuration
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(config.fetcher)?,
        })
    }

    /// Analyze a user-supplied URL string
    ///
    /// Invalid input is returned as an error. A page that cannot be retrieved
    /// yields a report with synthetic metrics flagged as such.
    pub async fn analyze(&self, input: &str) -> Result<AnalysisReport> {
        let url = utils::normalize_url(input)?;
        self.analyze_url(&url).await
    }

    /// Analyze an already-normalized URL
    pub async fn analyze_url(&self, url: &Url) -> Result<AnalysisReport> {
        let metrics = match self.fetcher.fetch(url).await {
            Ok(page) => analysis::analyze(&page),
            Err(e) if e.is_recoverable() => {
                ::log::warn!("Could not analyze {}: {}", url, e);
                fallback::synthesize(url, &e.to_string())
            }
            Err(e) => return Err(e),
        };

        Ok(AnalysisReport::new(metrics))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FetchMode, FetcherConfig, RelayConfig};
    use crate::results::DataSource;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = r#"<html><head>
        <title>Acme Widgets - Quality Widgets for Every Need</title>
        <meta name="description" content="Acme builds durable widgets for homes and offices. Browse our catalog of widgets, read guides, and find the right widget for your project today.">
        </head><body>
        <h1>Widgets</h1><h2>Catalog</h2>
        <p>Widgets are useful. Our widgets last for years.</p>
        <img src="a.png" alt="A widget"><a href="/about">About</a>
        <a href="https://other.org/">Partner</a>
        </body></html>"#;

    fn analyzer_for(mode: FetchMode) -> Analyzer {
        Analyzer::new(AnalyzerConfig {
            fetcher: FetcherConfig {
                mode,
                timeout_secs: 5,
                ..FetcherConfig::default()
            },
            ..AnalyzerConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_live_analysis() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&server)
            .await;

        let report = analyzer_for(FetchMode::Direct)
            .analyze(&server.uri())
            .await
            .unwrap();
        let metrics = &report.metrics;

        assert_eq!(metrics.data_source, DataSource::Live);
        assert!(metrics.fallback_reason.is_none());
        assert_eq!(metrics.on_page.headings.h1, 1);
        assert_eq!(metrics.on_page.links.internal, 1);
        assert_eq!(metrics.on_page.links.external, 1);
        assert!(!metrics.technical.has_robots_txt);
        assert!(!metrics.technical.has_xml_sitemap);
        assert!(metrics.score <= 100);
    }

    #[tokio::test]
    async fn test_relay_analysis() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get"))
            .and(query_param("url", "https://example.com/"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "contents": PAGE })),
            )
            .mount(&server)
            .await;

        let analyzer = Analyzer::new(AnalyzerConfig {
            fetcher: FetcherConfig {
                mode: FetchMode::Relay(RelayConfig {
                    endpoint: format!("{}/get", server.uri()),
                }),
                probe_well_known: false,
                ..FetcherConfig::default()
            },
            ..AnalyzerConfig::default()
        })
        .unwrap();

        let report = analyzer.analyze("example.com").await.unwrap();
        assert!(!report.metrics.is_synthetic());
        assert_eq!(report.metrics.url, "https://example.com/");
        assert_eq!(
            report.metrics.on_page.title.content,
            "Acme Widgets - Quality Widgets for Every Need"
        );
        // probes disabled: assumed values
        assert!(report.metrics.technical.has_robots_txt);
        assert!(!report.metrics.technical.has_xml_sitemap);
    }

    #[tokio::test]
    async fn test_fetch_failure_falls_back_to_flagged_synthetic() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let report = analyzer_for(FetchMode::Direct)
            .analyze(&server.uri())
            .await
            .unwrap();

        assert!(report.metrics.is_synthetic());
        let reason = report.metrics.fallback_reason.as_deref().unwrap();
        assert!(reason.contains("503"), "unexpected reason: {}", reason);
        assert_eq!(
            report.metrics.on_page.title.length,
            report.metrics.on_page.title.content.chars().count()
        );
    }

    #[tokio::test]
    async fn test_invalid_input_surfaces() {
        let analyzer = analyzer_for(FetchMode::Direct);
        assert!(matches!(
            analyzer.analyze("   ").await,
            Err(AnalysisError::InvalidUrl(_))
        ));
        assert!(matches!(
            analyzer.analyze("http://").await,
            Err(AnalysisError::InvalidUrl(_))
        ));
    }
}
