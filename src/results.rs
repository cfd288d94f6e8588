use serde::{Deserialize, Serialize};
use url::Url;

/// Outcome of the best-effort well-known path probes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResults {
    /// `/robots.txt` answered with a 2xx status
    pub robots_txt: bool,

    /// `/sitemap.xml` answered with a 2xx status
    pub xml_sitemap: bool,
}

impl ProbeResults {
    /// Values reported when no probe was run for a page
    pub fn assumed() -> Self {
        Self {
            robots_txt: true,
            xml_sitemap: false,
        }
    }
}

/// A fetched page, consumed once by the analyzer
#[derive(Debug, Clone)]
pub struct RawPage {
    /// Page markup, not necessarily well-formed
    pub html: String,

    /// Absolute URL the markup was retrieved from
    pub source_url: Url,

    /// Wall-clock time spent acquiring `html`
    pub fetch_duration_ms: u64,

    /// Probe results, if probing was enabled
    pub probes: Option<ProbeResults>,
}

impl RawPage {
    /// Create a page without probe results
    pub fn new(html: String, source_url: Url, fetch_duration_ms: u64) -> Self {
        Self {
            html,
            source_url,
            fetch_duration_ms,
            probes: None,
        }
    }

    pub fn with_probes(mut self, probes: ProbeResults) -> Self {
        self.probes = Some(probes);
        self
    }
}

/// Traffic-light status attached to each on-page factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Good,
    Warning,
    Error,
}

impl Status {
    /// `Good` when the condition holds, `Warning` otherwise
    pub fn good_if(condition: bool) -> Self {
        if condition {
            Status::Good
        } else {
            Status::Warning
        }
    }
}

/// Where a metrics record came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    /// Derived from a page that was actually fetched
    Live,
    /// Placeholder values generated after a failed fetch
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFactor {
    pub content: String,
    pub length: usize,
    pub status: Status,
}

impl TextFactor {
    /// Build a factor whose status is `Good` when the char length falls in `range`
    pub fn with_range(content: String, range: std::ops::RangeInclusive<usize>) -> Self {
        let length = content.chars().count();
        Self {
            content,
            length,
            status: Status::good_if(range.contains(&length)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Headings {
    pub h1: usize,
    pub h2: usize,
    pub h3: usize,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Images {
    pub total: usize,
    pub missing_alt: usize,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Links {
    pub internal: usize,
    pub external: usize,
    pub status: Status,
}

impl Links {
    pub fn total(&self) -> usize {
        self.internal + self.external
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnPage {
    pub title: TextFactor,
    pub meta_description: TextFactor,
    pub headings: Headings,
    pub images: Images,
    pub links: Links,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub keyword: String,
    /// Percentage of the total word count
    pub density: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentMetrics {
    pub word_count: usize,
    pub readability_score: f64,
    pub keywords: Vec<Keyword>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Technical {
    pub has_robots_txt: bool,
    pub has_xml_sitemap: bool,
    /// Milliseconds
    pub load_time: u64,
}

/// Structured SEO signals and the combined score for one page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoMetrics {
    pub score: u8,
    pub url: String,
    pub on_page: OnPage,
    pub content: ContentMetrics,
    pub technical: Technical,
    pub data_source: DataSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl SeoMetrics {
    /// True when the record holds placeholder values rather than a measurement
    pub fn is_synthetic(&self) -> bool {
        self.data_source == DataSource::Synthetic
    }
}

/// A metrics record stamped with the time the analysis finished
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub metrics: SeoMetrics,
    pub analysis_date: chrono::DateTime<chrono::Utc>,
}

impl AnalysisReport {
    pub fn new(metrics: SeoMetrics) -> Self {
        Self {
            metrics,
            analysis_date: chrono::Utc::now(),
        }
    }
}
