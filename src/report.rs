use crate::error::Result;
use crate::results::{AnalysisReport, SeoMetrics, Status};
use crate::utils::sanitize_filename;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Maximum number of items in an action plan
const MAX_ACTIONS: usize = 10;

/// Score band shown next to the overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    Excellent,
    NeedsWork,
    Poor,
}

impl Grade {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => Grade::Excellent,
            60..=79 => Grade::NeedsWork,
            _ => Grade::Poor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// One recommendation derived from the metrics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub title: String,
    pub priority: Priority,
    pub completed: bool,
}

impl Action {
    fn new(title: impl Into<String>, priority: Priority, completed: bool) -> Self {
        Self {
            title: title.into(),
            priority,
            completed,
        }
    }
}

/// Builds recommendations from the metrics, open items first, then by priority
pub fn action_plan(metrics: &SeoMetrics) -> Vec<Action> {
    use Priority::{High, Medium};

    let on_page = &metrics.on_page;
    let content = &metrics.content;
    let technical = &metrics.technical;
    let mut actions = Vec::new();

    actions.push(match on_page.title.status {
        Status::Error => Action::new("Add a title tag to your page", High, false),
        Status::Warning => Action::new(
            format!("Optimize title length (current: {} chars)", on_page.title.length),
            High,
            false,
        ),
        Status::Good => Action::new("Title tag is optimized", High, true),
    });

    actions.push(match on_page.meta_description.status {
        Status::Error => Action::new("Add a meta description", High, false),
        Status::Warning => Action::new(
            format!(
                "Optimize meta description length (current: {} chars)",
                on_page.meta_description.length
            ),
            Medium,
            false,
        ),
        Status::Good => Action::new("Meta description is optimized", High, true),
    });

    actions.push(match on_page.headings.h1 {
        0 => Action::new("Add an H1 heading to your page", High, false),
        1 => Action::new("H1 heading structure is correct", High, true),
        n => Action::new(format!("Fix duplicate H1 tags (found {})", n), High, false),
    });

    actions.push(if on_page.images.missing_alt > 0 {
        Action::new(
            format!("Add alt text to {} images", on_page.images.missing_alt),
            High,
            false,
        )
    } else {
        Action::new("All images have alt text", High, true)
    });

    actions.push(match content.word_count {
        0..300 => Action::new("Increase content length (target: 1000+ words)", High, false),
        300..1000 => Action::new(
            format!("Add more detailed content (current: {} words)", content.word_count),
            Medium,
            false,
        ),
        _ => Action::new("Content length is optimal", High, true),
    });

    actions.push(if content.readability_score < 60.0 {
        Action::new("Improve content readability (simplify language)", Medium, false)
    } else {
        Action::new("Content readability is good", Medium, true)
    });

    actions.push(if technical.has_robots_txt {
        Action::new("Robots.txt file exists", Medium, true)
    } else {
        Action::new("Create and upload robots.txt file", Medium, false)
    });

    actions.push(if technical.has_xml_sitemap {
        Action::new("XML sitemap exists", Medium, true)
    } else {
        Action::new("Create XML sitemap and submit to Google", Medium, false)
    });

    actions.push(if technical.load_time > 3000 {
        Action::new(
            format!(
                "Optimize page load speed (current: {:.1}s)",
                technical.load_time as f64 / 1000.0
            ),
            High,
            false,
        )
    } else {
        Action::new("Page load speed is optimal", High, true)
    });

    actions.push(if on_page.links.internal < 5 {
        Action::new("Improve internal linking structure", Medium, false)
    } else {
        Action::new("Internal linking is good", Medium, true)
    });

    // stable sort keeps insertion order within a bucket
    actions.sort_by_key(|action| (action.completed, action.priority));
    actions.truncate(MAX_ACTIONS);
    actions
}

/// JSON document offered for download
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    #[serde(flatten)]
    pub report: AnalysisReport,
    pub export_date: DateTime<Utc>,
    /// Human-readable provenance label
    pub source_label: String,
}

impl ExportDocument {
    pub fn new(report: AnalysisReport, export_date: DateTime<Utc>) -> Self {
        let source_label = if report.metrics.is_synthetic() {
            "Synthetic Demo Data"
        } else {
            "Live Analysis"
        };
        Self {
            report,
            export_date,
            source_label: source_label.to_string(),
        }
    }
}

/// `seo-report-{sanitized url}-{unix millis}.json`
pub fn export_file_name(url: &str, now: DateTime<Utc>) -> String {
    format!(
        "seo-report-{}-{}.json",
        sanitize_filename(url),
        now.timestamp_millis()
    )
}

/// Writes the export document into `dir` and returns the file path
pub fn write_export(dir: &Path, report: &AnalysisReport) -> Result<PathBuf> {
    let now = Utc::now();
    let document = ExportDocument::new(report.clone(), now);
    let path = dir.join(export_file_name(&report.metrics.url, now));

    std::fs::create_dir_all(dir)?;
    std::fs::write(&path, serde_json::to_string_pretty(&document)?)?;

    ::log::info!("Exported report to {}", path.display());
    Ok(path)
}

/// Short shareable summary of a result
pub fn share_text(metrics: &SeoMetrics) -> String {
    let mut text = format!(
        "SEO Analysis for {}\nScore: {}/100\nCheck out the detailed report!",
        metrics.url, metrics.score
    );
    if metrics.is_synthetic() {
        text.push_str("\n(demo data: the site could not be fetched)");
    }
    text
}
