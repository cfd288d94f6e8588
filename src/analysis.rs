//! Turns a fetched page into scored SEO metrics.
//!
//! Everything here is pure: the same `RawPage` always yields the same `SeoMetrics`.

use crate::parsers::Parser;
use crate::results::{
    ContentMetrics, DataSource, Headings, Images, Keyword, Links, OnPage, ProbeResults, RawPage,
    SeoMetrics, Status, Technical, TextFactor,
};
use std::ops::RangeInclusive;
use url::Url;

pub const TITLE_RANGE: RangeInclusive<usize> = 30..=60;
pub const DESCRIPTION_RANGE: RangeInclusive<usize> = 120..=160;

/// Placeholder used when the URL has no host to derive a domain from
const UNKNOWN_DOMAIN: &str = "site";

/// Host of `url` and its first label, used for link classification and filler text
pub fn host_and_domain(url: &Url) -> (String, String) {
    let hostname = url.host_str().unwrap_or_default().to_string();
    let domain = hostname
        .split('.')
        .next()
        .filter(|label| !label.is_empty())
        .unwrap_or(UNKNOWN_DOMAIN)
        .to_string();
    (hostname, domain)
}

/// An href is external when it is absolute http(s) and points away from `hostname`
pub fn is_external(href: &str, hostname: &str) -> bool {
    href.starts_with("http") && !href.contains(hostname)
}

/// Extracts and scores SEO signals from a fetched page
pub fn analyze(page: &RawPage) -> SeoMetrics {
    let (hostname, domain) = host_and_domain(&page.source_url);
    let parsed = Parser::parse(&page.html);
    let signals = parsed.signals;
    let stats = parsed.stats;

    let title = TextFactor::with_range(
        signals
            .title
            .unwrap_or_else(|| format!("{} - Website", domain)),
        TITLE_RANGE,
    );
    let meta_description = TextFactor::with_range(
        signals
            .meta_description
            .unwrap_or_else(|| format!("Welcome to {}", domain)),
        DESCRIPTION_RANGE,
    );

    let headings = Headings {
        h1: signals.h1,
        h2: signals.h2,
        h3: signals.h3,
        status: Status::good_if(signals.h1 == 1),
    };

    let images = Images {
        total: signals.images,
        missing_alt: signals.images_missing_alt,
        status: Status::good_if(signals.images_missing_alt == 0),
    };

    let total_links = signals.hrefs.len();
    let external = signals
        .hrefs
        .iter()
        .filter(|href| is_external(href, &hostname))
        .count();
    let links = Links {
        internal: total_links - external,
        external,
        status: Status::good_if(total_links > 0),
    };

    let keywords = stats
        .keywords
        .iter()
        .map(|k| Keyword {
            keyword: k.keyword.clone(),
            density: k.count as f64 / stats.word_count as f64 * 100.0,
        })
        .collect::<Vec<_>>();

    let probes = page.probes.unwrap_or_else(ProbeResults::assumed);

    let mut metrics = SeoMetrics {
        score: 0,
        url: page.source_url.to_string(),
        on_page: OnPage {
            title,
            meta_description,
            headings,
            images,
            links,
        },
        content: ContentMetrics {
            word_count: stats.word_count,
            readability_score: stats.readability.round(),
            keywords,
        },
        technical: Technical {
            has_robots_txt: probes.robots_txt,
            has_xml_sitemap: probes.xml_sitemap,
            load_time: page.fetch_duration_ms,
        },
        data_source: DataSource::Live,
        fallback_reason: None,
    };
    metrics.score = score(&metrics, stats.readability);

    ::log::info!(
        "Scored {} at {}/100 ({} words, {} links)",
        metrics.url,
        metrics.score,
        metrics.content.word_count,
        total_links
    );

    metrics
}

/// Combines the factor thresholds into a 0-100 score
///
/// `readability` is the unrounded value; the one stored in `metrics` is rounded for display.
pub fn score(metrics: &SeoMetrics, readability: f64) -> u8 {
    let on_page = &metrics.on_page;
    let weights = [
        (TITLE_RANGE.contains(&on_page.title.length), 15.0),
        (
            DESCRIPTION_RANGE.contains(&on_page.meta_description.length),
            15.0,
        ),
        (on_page.headings.h1 == 1, 10.0),
        (on_page.headings.h2 > 0, 5.0),
        (on_page.images.missing_alt == 0, 10.0),
        (on_page.links.total() > 0, 5.0),
        (metrics.content.word_count > 300, 10.0),
        (readability > 60.0, 10.0),
        (!metrics.content.keywords.is_empty(), 10.0),
    ];

    let factors: f64 = weights
        .iter()
        .filter(|(passed, _)| *passed)
        .map(|(_, weight)| weight)
        .sum();
    let load_bonus = f64::min(10.0, 10.0 - metrics.technical.load_time as f64 / 200.0);

    (factors + load_bonus).round().clamp(0.0, 100.0) as u8
}
