use serde::Deserialize;
use std::path::PathBuf;

/// Default endpoint for dependency release-date lookups.
pub const DEFAULT_SEARCH_URI: &str = "https://search.maven.org";

/// The search API quite often times out; keep individual requests short.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 5;

/// How many times a transient lookup failure is retried before the
/// dependency is skipped.
pub const DEFAULT_HTTP_RETRY_COUNT: u32 = 5;

/// Analysis configuration.
///
/// Thresholds set to `0.0` are disabled; `report_file` set to `None`
/// disables the CSV report.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisConfig {
    /// Base URI of the release-date search API.
    pub search_uri: String,
    /// Per-request connect/read timeout in seconds.
    pub http_timeout_secs: u64,
    /// Bounded retry count for transient lookup failures.
    pub http_retry_count: u32,
    /// Fail the build when a module's total meets or exceeds this many
    /// libyears. Applies per module, not to the whole build.
    pub max_lib_years: f32,
    /// Only include dependencies older than this in the CSV report.
    pub min_lib_years_for_report: f32,
    /// Path of the CSV report file, appended to by every module.
    pub report_file: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            search_uri: DEFAULT_SEARCH_URI.to_string(),
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            http_retry_count: DEFAULT_HTTP_RETRY_COUNT,
            max_lib_years: 0.0,
            min_lib_years_for_report: 0.0,
            report_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<AnalysisConfig>(json!({
            "maxLibYears": 1.5
        }))
        .unwrap();

        assert_eq!(result.max_lib_years, 1.5);
        assert_eq!(result.search_uri, DEFAULT_SEARCH_URI);
        assert_eq!(result.http_timeout_secs, DEFAULT_HTTP_TIMEOUT_SECS);
        assert_eq!(result.http_retry_count, DEFAULT_HTTP_RETRY_COUNT);
        assert_eq!(result.report_file, None);
    }

    #[test]
    fn config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<AnalysisConfig>(json!({
            "searchUri": "http://localhost:8080",
            "httpTimeoutSecs": 2,
            "httpRetryCount": 1,
            "maxLibYears": 10.0,
            "minLibYearsForReport": 0.25,
            "reportFile": "target/libyear-report.csv"
        }))
        .unwrap();

        assert_eq!(
            result,
            AnalysisConfig {
                search_uri: "http://localhost:8080".to_string(),
                http_timeout_secs: 2,
                http_retry_count: 1,
                max_lib_years: 10.0,
                min_lib_years_for_report: 0.25,
                report_file: Some(PathBuf::from("target/libyear-report.csv")),
            }
        );
    }

    #[test]
    fn thresholds_default_to_disabled() {
        let config = AnalysisConfig::default();

        assert_eq!(config.max_lib_years, 0.0);
        assert_eq!(config.min_lib_years_for_report, 0.0);
    }
}
