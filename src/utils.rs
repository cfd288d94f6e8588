use crate::error::{AnalysisError, Result};
use url::Url;

const INVALID_URL_HINT: &str = "Please enter a valid URL (e.g., example.com or https://example.com)";

/// Turns user input into an absolute http(s) URL, defaulting bare domains to https
pub fn normalize_url(input: &str) -> Result<Url> {
    let input = input.trim();
    if input.is_empty() {
        return Err(AnalysisError::InvalidUrl("URL is required".to_string()));
    }

    let candidate = if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        format!("https://{}", input)
    };

    let url =
        Url::parse(&candidate).map_err(|_| AnalysisError::InvalidUrl(INVALID_URL_HINT.into()))?;
    if url.host_str().is_none_or(str::is_empty) {
        return Err(AnalysisError::InvalidUrl(INVALID_URL_HINT.into()));
    }
    Ok(url)
}

/// Replace every character that is not an ASCII letter or digit with `_`
pub fn sanitize_filename(url: &str) -> String {
    url.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
