use crate::config::BrowserConfig;
use crate::error::{AnalysisError, Result};
use fantoccini::{Client, ClientBuilder};
use std::time::Duration;
use tokio::time::{Instant, timeout_at};
use url::Url;

/// Common local WebDriver endpoints tried when the configured one is unreachable
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444",
];

/// Renders `url` in a WebDriver session and returns the resulting page source
///
/// `limit` bounds the whole call, connecting included.
pub async fn fetch(config: &BrowserConfig, url: &Url, limit: Duration) -> Result<String> {
    let deadline = Instant::now() + limit;

    let client = match timeout_at(deadline, connect_to_webdriver(&config.webdriver_url)).await {
        Ok(Some(client)) => client,
        Ok(None) => {
            return Err(AnalysisError::FetchFailed(format!(
                "no WebDriver server reachable at {} (set WEBDRIVER_URL)",
                config.webdriver_url
            )));
        }
        Err(_) => {
            ::log::error!("Timeout connecting to WebDriver at {}", config.webdriver_url);
            return Err(timed_out(limit, url));
        }
    };

    let result = timeout_at(deadline, load_source(&client, url)).await;

    // Close the session whether or not the page loaded
    if let Err(e) = client.close().await {
        ::log::warn!("Failed to close WebDriver session: {}", e);
    }

    match result {
        Ok(source) => source,
        Err(_) => {
            ::log::error!("Timeout rendering: {}", url);
            Err(timed_out(limit, url))
        }
    }
}

fn timed_out(limit: Duration, url: &Url) -> AnalysisError {
    AnalysisError::FetchFailed(format!(
        "timed out after {}s rendering {}",
        limit.as_secs_f64(),
        url
    ))
}

async fn load_source(client: &Client, url: &Url) -> Result<String> {
    client.goto(url.as_str()).await?;
    let source = client.source().await?;

    if source.trim().is_empty() {
        return Err(AnalysisError::FetchFailed("No content received".to_string()));
    }
    Ok(source)
}

/// Connects to the WebDriver instance, falling back to well-known local ports
async fn connect_to_webdriver(webdriver_url: &str) -> Option<Client> {
    match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Some(client);
        }
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
        }
    }

    for url in FALLBACK_WEBDRIVER_URLS.iter() {
        if *url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Some(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    None
}
