use crate::error::Result;
use crate::results::AnalysisReport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A past analysis, newest entries first in the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub url: String,
    pub score: u8,
    pub date: DateTime<Utc>,
    /// The analysis fell back to synthetic data
    #[serde(default)]
    pub synthetic: bool,
}

impl HistoryEntry {
    pub fn from_report(report: &AnalysisReport) -> Self {
        Self {
            id: report.analysis_date.timestamp_millis().to_string(),
            url: report.metrics.url.clone(),
            score: report.metrics.score,
            date: report.analysis_date,
            synthetic: report.metrics.is_synthetic(),
        }
    }
}

/// Summary figures over the stored history
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStats {
    pub average_score: f64,
    pub latest_score: u8,
    /// Latest score minus the one before it
    pub trend: i16,
}

/// Bounded, file-backed list of recent analyses
#[derive(Debug)]
pub struct HistoryStore {
    path: PathBuf,
    capacity: usize,
    entries: Vec<HistoryEntry>,
}

impl HistoryStore {
    /// Loads the history at `path`; a missing or unreadable file starts empty
    pub fn open(path: impl AsRef<Path>, capacity: usize) -> Self {
        let path = path.as_ref().to_path_buf();
        let mut entries = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Vec<HistoryEntry>>(&contents) {
                Ok(entries) => entries,
                Err(e) => {
                    ::log::error!("Failed to load history from {}: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                ::log::error!("Failed to read history from {}: {}", path.display(), e);
                Vec::new()
            }
        };
        entries.truncate(capacity);

        ::log::debug!("Loaded {} history entries from {}", entries.len(), path.display());
        Self {
            path,
            capacity,
            entries,
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Records a finished analysis, evicting the oldest entries beyond capacity
    pub fn append(&mut self, report: &AnalysisReport) -> Result<()> {
        self.entries.insert(0, HistoryEntry::from_report(report));
        self.entries.truncate(self.capacity);
        self.save()
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&self.entries)?)?;
        Ok(())
    }

    pub fn stats(&self) -> Option<HistoryStats> {
        let latest = self.entries.first()?;
        let total: u32 = self.entries.iter().map(|e| u32::from(e.score)).sum();
        let trend = match self.entries.get(1) {
            Some(previous) => i16::from(latest.score) - i16::from(previous.score),
            None => 0,
        };

        Some(HistoryStats {
            average_score: f64::from(total) / self.entries.len() as f64,
            latest_score: latest.score,
            trend,
        })
    }
}
