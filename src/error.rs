use thiserror::Error;

/// Errors produced while preparing, fetching or persisting an analysis
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The input could not be turned into an absolute http(s) URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Network, relay or browser failure while retrieving the page
    #[error("fetch failed: {0}")]
    FetchFailed(String),

    /// The relay answered with a payload that could not be read at all
    #[error("no metrics available: {0}")]
    NoMetricsAvailable(String),

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Whether the caller should degrade to synthetic metrics instead of surfacing the error
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            AnalysisError::FetchFailed(_) | AnalysisError::NoMetricsAvailable(_)
        )
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(err: reqwest::Error) -> Self {
        AnalysisError::FetchFailed(err.to_string())
    }
}

impl From<fantoccini::error::CmdError> for AnalysisError {
    fn from(err: fantoccini::error::CmdError) -> Self {
        AnalysisError::FetchFailed(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_kinds() {
        assert!(AnalysisError::FetchFailed("timeout".into()).is_recoverable());
        assert!(AnalysisError::NoMetricsAvailable("garbage".into()).is_recoverable());
        assert!(!AnalysisError::InvalidUrl("".into()).is_recoverable());
        assert!(!AnalysisError::Config("bad".into()).is_recoverable());
    }

    #[test]
    fn test_display_messages() {
        let err = AnalysisError::InvalidUrl("URL is required".into());
        assert_eq!(err.to_string(), "invalid URL: URL is required");
    }
}
