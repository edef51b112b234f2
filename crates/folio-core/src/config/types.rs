//! Sub-configuration structs with their defaults.

use crate::urls::ImageSize;
use serde::{Deserialize, Serialize};

/// Default Flickr REST endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.flickr.com/services/rest/";

/// Tag that marks a photo as part of the portfolio.
pub const DEFAULT_PORTFOLIO_TAG: &str = "portfolio";

/// Flickr API access settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlickrConfig {
    /// REST endpoint URL
    pub endpoint: String,

    /// API key (supports ${ENV_VAR} syntax)
    pub api_key: String,

    /// NSID of the account whose photos make up the portfolio
    /// (supports ${ENV_VAR} syntax)
    pub user_id: String,

    /// Page size for photo searches. Only one page is ever fetched.
    pub per_page: u32,

    /// Per-request timeout in milliseconds (0 disables the timeout)
    pub timeout_ms: u64,

    /// Retries for transient failures (0 = fail on first error)
    pub retry_attempts: u32,

    /// Base delay between retries in milliseconds
    pub retry_delay_ms: u64,
}

impl Default for FlickrConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: "${FLICKR_API_KEY}".to_string(),
            user_id: "${FLICKR_USER_ID}".to_string(),
            per_page: 100,
            timeout_ms: 0,
            retry_attempts: 0,
            retry_delay_ms: 1000,
        }
    }
}

/// Sort orders accepted by `flickr.photos.search`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PhotoSort {
    #[default]
    #[serde(rename = "date-posted-desc")]
    DatePostedDesc,
    #[serde(rename = "date-posted-asc")]
    DatePostedAsc,
    #[serde(rename = "date-taken-desc")]
    DateTakenDesc,
    #[serde(rename = "date-taken-asc")]
    DateTakenAsc,
    #[serde(rename = "interestingness-desc")]
    InterestingnessDesc,
}

impl PhotoSort {
    /// Value sent as the `sort` query parameter.
    pub fn as_param(&self) -> &'static str {
        match self {
            PhotoSort::DatePostedDesc => "date-posted-desc",
            PhotoSort::DatePostedAsc => "date-posted-asc",
            PhotoSort::DateTakenDesc => "date-taken-desc",
            PhotoSort::DateTakenAsc => "date-taken-asc",
            PhotoSort::InterestingnessDesc => "interestingness-desc",
        }
    }
}

/// Portfolio selection and album settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Tag that marks a photo as portfolio material
    pub tag: String,

    /// Tags promoted to virtual albums in navigation.
    /// Also excluded from the browsing tag cloud.
    pub album_tags: Vec<String>,

    /// How many photosets to inspect concurrently when building the
    /// portfolio album list (1 = one at a time)
    pub album_concurrency: usize,

    /// Sort order for the portfolio search
    pub sort: PhotoSort,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            tag: DEFAULT_PORTFOLIO_TAG.to_string(),
            album_tags: Vec::new(),
            album_concurrency: 1,
            sort: PhotoSort::default(),
        }
    }
}

impl PortfolioConfig {
    /// Whether any album tags are configured.
    ///
    /// Front ends use this to decide whether to show an "Albums" entry for
    /// tag-based albums at all.
    pub fn has_album_tags(&self) -> bool {
        !self.album_tags.is_empty()
    }
}

/// Parse a comma-separated album tag list (as found in `FOLIO_ALBUM_TAGS`).
///
/// Entries are trimmed and empty entries dropped, so `" travel, ,bw "`
/// yields `["travel", "bw"]`.
pub fn parse_album_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format ("json", "jsonl" or "text")
    pub format: String,

    /// Pretty-print JSON output
    pub pretty: bool,

    /// Image size used when printing photo URLs
    pub image_size: ImageSize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            pretty: false,
            image_size: ImageSize::Large,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_album_tags_trims_and_drops_empty() {
        assert_eq!(
            parse_album_tags(" travel, ,bw ,"),
            vec!["travel".to_string(), "bw".to_string()]
        );
        assert!(parse_album_tags("").is_empty());
        assert!(parse_album_tags(" , ").is_empty());
    }

    #[test]
    fn test_sort_param_matches_serde_name() {
        let sort = PhotoSort::DateTakenDesc;
        let json = serde_json::to_string(&sort).unwrap();
        assert_eq!(json, format!("\"{}\"", sort.as_param()));
    }

    #[test]
    fn test_has_album_tags() {
        let mut config = PortfolioConfig::default();
        assert!(!config.has_album_tags());
        config.album_tags = vec!["street".to_string()];
        assert!(config.has_album_tags());
    }
}
