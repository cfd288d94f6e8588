use crate::results::ProbeResults;
use reqwest::Client;
use url::Url;

/// Checks `/robots.txt` and `/sitemap.xml` on the page's origin concurrently
///
/// Failures never propagate; an unreachable path is reported as `false`.
pub async fn probe_well_known(client: &Client, page_url: &Url) -> ProbeResults {
    let (robots_txt, xml_sitemap) = tokio::join!(
        probe(client, page_url, "/robots.txt"),
        probe(client, page_url, "/sitemap.xml"),
    );

    ::log::debug!(
        "Probes for {}: robots.txt={}, sitemap.xml={}",
        page_url,
        robots_txt,
        xml_sitemap
    );

    ProbeResults {
        robots_txt,
        xml_sitemap,
    }
}

async fn probe(client: &Client, page_url: &Url, well_known_path: &str) -> bool {
    let Ok(target) = page_url.join(well_known_path) else {
        return false;
    };

    match client.get(target.clone()).send().await {
        Ok(response) => response.status().is_success(),
        Err(e) => {
            ::log::debug!("Probe {} failed: {}", target, e);
            false
        }
    }
}
