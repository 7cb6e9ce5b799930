//! Runtime configuration from environment variables
//!
//! All functions fall back to sensible defaults when env vars are not set.

use std::path::PathBuf;

/// Default classification service address
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Classification service base URL. Override with `SYMPTOM_API_URL`.
pub fn api_url() -> String {
    std::env::var("SYMPTOM_API_URL")
        .ok()
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Temp directory for the log file. Override with `SYMPTOM_TMP_DIR`.
pub fn tmp_dir() -> PathBuf {
    std::env::var("SYMPTOM_TMP_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/tmp"))
}

/// Path to the dashboard log file.
pub fn log_file() -> PathBuf {
    tmp_dir().join("symptom_dashboard.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_file_is_under_tmp_dir() {
        assert!(log_file().starts_with(tmp_dir()));
        assert!(log_file().ends_with("symptom_dashboard.log"));
    }

    #[test]
    fn test_api_url_is_never_blank() {
        assert!(!api_url().trim().is_empty());
    }
}
