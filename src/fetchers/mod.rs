pub mod browser;
pub mod http;
pub mod probes;

use crate::config::{FetchMode, FetcherConfig};
use crate::error::{AnalysisError, Result};
use crate::results::RawPage;
use std::time::{Duration, Instant};
use url::Url;

/// Retrieves page markup in the configured mode and times the retrieval
#[derive(Debug, Clone)]
pub struct Fetcher {
    config: FetcherConfig,
    http: http::HttpFetcher,
}

impl Fetcher {
    pub fn new(config: FetcherConfig) -> Result<Self> {
        let http = http::HttpFetcher::new(&config)?;
        Ok(Self { config, http })
    }

    /// Fetches `url` once, then runs the well-known probes if enabled
    ///
    /// No retries and no caching: every call goes to the network.
    pub async fn fetch(&self, url: &Url) -> Result<RawPage> {
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AnalysisError::InvalidUrl(format!(
                "unsupported scheme `{}`",
                url.scheme()
            )));
        }

        ::log::info!("Fetching {}", url);
        let start = Instant::now();

        let html = match &self.config.mode {
            FetchMode::Direct => self.http.fetch_direct(url).await?,
            FetchMode::Relay(relay) => self.http.fetch_via_relay(&relay.endpoint, url).await?,
            FetchMode::Browser(browser) => {
                browser::fetch(browser, url, Duration::from_secs(self.config.timeout_secs)).await?
            }
        };

        let fetch_duration_ms = start.elapsed().as_millis() as u64;
        ::log::debug!(
            "Fetched {} bytes from {} in {} ms",
            html.len(),
            url,
            fetch_duration_ms
        );

        let page = RawPage::new(html, url.clone(), fetch_duration_ms);
        if !self.config.probe_well_known {
            return Ok(page);
        }

        let probes = probes::probe_well_known(self.http.client(), url).await;
        Ok(page.with_probes(probes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RelayConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn site() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<h1>home</h1>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/sitemap.xml"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<urlset/>"))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_fetch_with_probes() {
        let server = site().await;
        let fetcher = Fetcher::new(FetcherConfig::default()).unwrap();
        let url = Url::parse(&server.uri()).unwrap();

        let page = fetcher.fetch(&url).await.unwrap();
        assert_eq!(page.html, "<h1>home</h1>");
        assert_eq!(page.source_url, url);
        let probes = page.probes.expect("probes enabled by default");
        assert!(!probes.robots_txt);
        assert!(probes.xml_sitemap);
    }

    #[tokio::test]
    async fn test_fetch_without_probes() {
        let server = site().await;
        let config = FetcherConfig {
            probe_well_known: false,
            ..FetcherConfig::default()
        };
        let fetcher = Fetcher::new(config).unwrap();
        let page = fetcher
            .fetch(&Url::parse(&server.uri()).unwrap())
            .await
            .unwrap();
        assert!(page.probes.is_none());
    }

    #[tokio::test]
    async fn test_relay_mode_reports_missing_contents() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let config = FetcherConfig {
            mode: FetchMode::Relay(RelayConfig {
                endpoint: format!("{}/get", server.uri()),
            }),
            ..FetcherConfig::default()
        };
        let fetcher = Fetcher::new(config).unwrap();
        let result = fetcher
            .fetch(&Url::parse("https://example.com").unwrap())
            .await;
        assert!(matches!(result, Err(AnalysisError::FetchFailed(_))));
    }

    #[tokio::test]
    async fn test_rejects_non_http_scheme() {
        let fetcher = Fetcher::new(FetcherConfig::default()).unwrap();
        let result = fetcher
            .fetch(&Url::parse("ftp://example.com/file").unwrap())
            .await;
        assert!(matches!(result, Err(AnalysisError::InvalidUrl(_))));
    }
}
