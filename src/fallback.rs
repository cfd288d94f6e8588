//! Placeholder metrics for when a page cannot be fetched.
//!
//! Records built here are always marked `DataSource::Synthetic` and carry the
//! reason the live fetch failed, so they can never pass for a measurement.

use crate::analysis::host_and_domain;
use crate::results::{
    ContentMetrics, DataSource, Headings, Images, Keyword, Links, OnPage, SeoMetrics, Status,
    Technical, TextFactor,
};
use rand::Rng;
use url::Url;

/// Builds a flagged synthetic record for `url` using the thread-local RNG
pub fn synthesize(url: &Url, reason: &str) -> SeoMetrics {
    synthesize_with_rng(url, reason, &mut rand::rng())
}

/// Builds a flagged synthetic record with an explicit RNG
pub fn synthesize_with_rng<R: Rng>(url: &Url, reason: &str, rng: &mut R) -> SeoMetrics {
    let (_, domain) = host_and_domain(url);
    let brand = capitalize(&domain);

    let title = TextFactor {
        status: Status::Warning,
        ..TextFactor::with_range(format!("{} - Home", brand), 30..=60)
    };
    let meta_description = TextFactor {
        status: Status::Warning,
        ..TextFactor::with_range(
            format!(
                "Welcome to {}. We provide quality services and solutions for your needs.",
                domain
            ),
            120..=160,
        )
    };

    let total_images = rng.random_range(4..12);
    let missing_alt = rng.random_range(0..3).min(total_images);

    let metrics = SeoMetrics {
        score: rng.random_range(65..85),
        url: url.to_string(),
        on_page: OnPage {
            title,
            meta_description,
            headings: Headings {
                h1: 1,
                h2: rng.random_range(2..6),
                h3: rng.random_range(2..8),
                status: Status::Good,
            },
            images: Images {
                total: total_images,
                missing_alt,
                status: Status::good_if(missing_alt == 0),
            },
            links: Links {
                internal: rng.random_range(8..23),
                external: rng.random_range(1..5),
                status: Status::Good,
            },
        },
        content: ContentMetrics {
            word_count: rng.random_range(400..1200),
            readability_score: f64::from(rng.random_range(65u8..85)),
            keywords: vec![
                Keyword {
                    keyword: domain.clone(),
                    density: rng.random::<f64>() * 2.0 + 1.0,
                },
                Keyword {
                    keyword: "services".to_string(),
                    density: rng.random::<f64>() * 1.5 + 0.5,
                },
                Keyword {
                    keyword: "business".to_string(),
                    density: rng.random::<f64>() * 1.5 + 0.5,
                },
            ],
        },
        technical: Technical {
            has_robots_txt: rng.random_bool(0.7),
            has_xml_sitemap: rng.random_bool(0.6),
            load_time: rng.random_range(800..2300),
        },
        data_source: DataSource::Synthetic,
        fallback_reason: Some(reason.to_string()),
    };

    ::log::warn!(
        "Using synthetic demo data for {}: {}",
        metrics.url,
        reason
    );

    metrics
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn url() -> Url {
        Url::parse("https://acme.example.com/pricing").unwrap()
    }

    #[test]
    fn test_synthetic_record_is_flagged() {
        let metrics = synthesize(&url(), "HTTP 503");
        assert!(metrics.is_synthetic());
        assert_eq!(metrics.fallback_reason.as_deref(), Some("HTTP 503"));

        let json = serde_json::to_value(&metrics).unwrap();
        assert_eq!(json["dataSource"], "synthetic");
        assert_eq!(json["fallbackReason"], "HTTP 503");
    }

    #[test]
    fn test_values_within_plausible_ranges() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..200 {
            let m = synthesize_with_rng(&url(), "offline", &mut rng);
            assert!((65..85).contains(&m.score));
            assert!((800..2300).contains(&m.technical.load_time));
            assert!((400..1200).contains(&m.content.word_count));
            assert!(m.on_page.images.missing_alt <= m.on_page.images.total);
            assert_eq!(m.content.keywords.len(), 3);
        }
    }

    #[test]
    fn test_lengths_match_generated_text() {
        let m = synthesize(&url(), "offline");
        assert_eq!(m.on_page.title.content, "Acme - Home");
        assert_eq!(
            m.on_page.title.length,
            m.on_page.title.content.chars().count()
        );
        assert_eq!(
            m.on_page.meta_description.length,
            m.on_page.meta_description.content.chars().count()
        );
        assert_eq!(m.content.keywords[0].keyword, "acme");
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let a = synthesize_with_rng(&url(), "x", &mut StdRng::seed_from_u64(7));
        let b = synthesize_with_rng(&url(), "x", &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
    }
}
