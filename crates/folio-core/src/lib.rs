//! Folio Core - Flickr access layer and portfolio aggregation.
//!
//! Folio treats a Flickr account as the data source for a photo portfolio.
//! A photo is in the portfolio when it carries the `portfolio` tag; every
//! view (gallery, albums, tag cloud, map) is a filter over that set.
//!
//! # Architecture
//!
//! ```text
//! Flickr REST → FlickrApi (HTTP client) → Portfolio → views → JSON / text
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use folio_core::{Config, ImageSize, Portfolio};
//!
//! #[tokio::main]
//! async fn main() -> folio_core::Result<()> {
//!     let config = Config::load()?;
//!     let portfolio = Portfolio::from_config(&config)?;
//!
//!     for photo in portfolio.geotagged_photos().await? {
//!         println!("{}", folio_core::urls::photo_url(&photo, ImageSize::Medium));
//!     }
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
mod de;
pub mod error;
pub mod exif;
pub mod flickr;
pub mod output;
pub mod portfolio;
pub mod types;
pub mod urls;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, FlickrError, FlickrResult, FolioError, Result};
pub use exif::CameraSummary;
pub use flickr::{FlickrApi, FlickrClient};
pub use output::{OutputFormat, OutputWriter, TextLine};
pub use portfolio::{AlbumView, Portfolio};
pub use types::{Album, ExifEntry, Photo, PhotoDetails, PhotoInfo, TagAlbum, TagCount};
pub use urls::ImageSize;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_portfolio_requires_credentials() {
        let mut config = Config::default();
        config.flickr.api_key = String::new();
        let err = Portfolio::from_config(&config).err().unwrap();
        assert!(matches!(
            err,
            FolioError::Config(ConfigError::MissingCredential { .. })
        ));
    }

    #[test]
    fn test_portfolio_from_plain_credentials() {
        let mut config = Config::default();
        config.flickr.api_key = "key".to_string();
        config.flickr.user_id = "12345678@N00".to_string();
        config.set_album_tags("street").unwrap();
        let portfolio = Portfolio::from_config(&config).unwrap();
        assert_eq!(portfolio.config().album_tags, vec!["street"]);
    }
}
