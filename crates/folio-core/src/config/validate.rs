//! Configuration validation with range checks.

use crate::error::ConfigError;

use super::Config;

/// Flickr caps `per_page` for searches at 500.
const MAX_PER_PAGE: u32 = 500;

impl Config {
    /// Validate configuration values are within acceptable ranges.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.flickr.endpoint.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "flickr.endpoint must not be empty".into(),
            ));
        }
        if self.flickr.per_page == 0 || self.flickr.per_page > MAX_PER_PAGE {
            return Err(ConfigError::ValidationError(format!(
                "flickr.per_page must be between 1 and {MAX_PER_PAGE}"
            )));
        }
        if self.portfolio.tag.trim().is_empty() || self.portfolio.tag.contains(' ') {
            return Err(ConfigError::ValidationError(
                "portfolio.tag must be a single non-empty tag".into(),
            ));
        }
        if self.portfolio.album_concurrency == 0 {
            return Err(ConfigError::ValidationError(
                "portfolio.album_concurrency must be > 0".into(),
            ));
        }
        if let Some(bad) = self.portfolio.album_tags.iter().find(|t| t.contains(' ')) {
            return Err(ConfigError::ValidationError(format!(
                "portfolio.album_tags entry '{bad}' contains a space"
            )));
        }
        Ok(())
    }
}
