use crate::config::FetcherConfig;
use crate::error::{AnalysisError, Result};
use reqwest::{Client, header::ACCEPT};
use std::time::Duration;
use url::Url;

/// reqwest-backed fetcher for the direct and relay paths
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(|e| AnalysisError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Shared client, reused for the well-known probes
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Fetches the page markup straight from the target
    pub async fn fetch_direct(&self, url: &Url) -> Result<String> {
        ::log::debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, "text/html")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::FetchFailed(format!("HTTP {} from {}", status, url)));
        }

        let html = response.text().await?;
        if html.trim().is_empty() {
            return Err(AnalysisError::FetchFailed("No content received".to_string()));
        }
        Ok(html)
    }

    /// Fetches the page markup through a relay answering `{"contents": "<html>"}`
    pub async fn fetch_via_relay(&self, endpoint: &str, url: &Url) -> Result<String> {
        let relay_url = Url::parse_with_params(endpoint, &[("url", url.as_str())]).map_err(|e| {
            AnalysisError::Config(format!("invalid relay endpoint {}: {}", endpoint, e))
        })?;
        ::log::debug!("GET {} via relay {}", url, endpoint);

        let response = self.client.get(relay_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AnalysisError::FetchFailed(format!("relay answered HTTP {}", status)));
        }

        let body = response.text().await?;
        extract_relay_contents(&body)
    }
}

/// Pulls the page markup out of a relay payload
pub fn extract_relay_contents(body: &str) -> Result<String> {
    let payload: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        AnalysisError::NoMetricsAvailable(format!("unreadable relay payload: {}", e))
    })?;

    let contents = payload
        .get("contents")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| {
            AnalysisError::FetchFailed("relay payload has no `contents` field".to_string())
        })?;

    if contents.trim().is_empty() {
        return Err(AnalysisError::FetchFailed("No content received".to_string()));
    }
    Ok(contents.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(&FetcherConfig::default()).unwrap()
    }

    #[test]
    fn test_extract_relay_contents() {
        let html = extract_relay_contents(r#"{"contents": "<p>hi</p>", "status": {}}"#).unwrap();
        assert_eq!(html, "<p>hi</p>");
    }

    #[test]
    fn test_relay_payload_without_contents() {
        assert!(matches!(
            extract_relay_contents(r#"{"status": {"http_code": 404}}"#),
            Err(AnalysisError::FetchFailed(_))
        ));
        assert!(matches!(
            extract_relay_contents(r#"{"contents": null}"#),
            Err(AnalysisError::FetchFailed(_))
        ));
        assert!(matches!(
            extract_relay_contents(r#"{"contents": "  "}"#),
            Err(AnalysisError::FetchFailed(_))
        ));
    }

    #[test]
    fn test_relay_payload_not_json() {
        assert!(matches!(
            extract_relay_contents("<html>rate limited</html>"),
            Err(AnalysisError::NoMetricsAvailable(_))
        ));
    }

    #[tokio::test]
    async fn test_direct_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<title>Hi</title>"))
            .mount(&server)
            .await;

        let url = Url::parse(&format!("{}/page", server.uri())).unwrap();
        let html = fetcher().fetch_direct(&url).await.unwrap();
        assert_eq!(html, "<title>Hi</title>");
    }

    #[tokio::test]
    async fn test_direct_fetch_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("down"))
            .mount(&server)
            .await;

        let url = Url::parse(&server.uri()).unwrap();
        let err = fetcher().fetch_direct(&url).await.unwrap_err();
        assert!(matches!(err, AnalysisError::FetchFailed(ref msg) if msg.contains("503")));
    }

    #[tokio::test]
    async fn test_direct_fetch_empty_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let url = Url::parse(&server.uri()).unwrap();
        assert!(matches!(
            fetcher().fetch_direct(&url).await,
            Err(AnalysisError::FetchFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_relay_fetch_passes_target_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/get"))
            .and(query_param("url", "https://example.com/"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"contents": "<h1>relayed</h1>"})),
            )
            .mount(&server)
            .await;

        let endpoint = format!("{}/get", server.uri());
        let target = Url::parse("https://example.com").unwrap();
        let html = fetcher().fetch_via_relay(&endpoint, &target).await.unwrap();
        assert_eq!(html, "<h1>relayed</h1>");
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        let url = Url::parse("http://127.0.0.1:1/").unwrap();
        assert!(matches!(
            fetcher().fetch_direct(&url).await,
            Err(AnalysisError::FetchFailed(_))
        ));
    }
}
