//! Image URL resolution for photos and album covers.
//!
//! A URL Flickr handed us (requested via `extras`) always wins over one we
//! build ourselves: synthesized farm URLs break for some newer uploads and
//! the `_b`/`_c` renditions don't exist for photos uploaded before 2010.
//!
//! See <https://www.flickr.com/services/api/misc.urls.html>.

use crate::types::{Album, Photo};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Size classes a front end can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageSize {
    /// 150x150 square crop
    Thumbnail,
    /// 640px on the longest side
    Medium,
    /// 800px on the longest side
    #[default]
    Large,
    /// 1024px on the longest side
    #[serde(alias = "x-large")]
    XLarge,
    /// As uploaded
    Original,
}

impl ImageSize {
    pub const ALL: [ImageSize; 5] = [
        ImageSize::Thumbnail,
        ImageSize::Medium,
        ImageSize::Large,
        ImageSize::XLarge,
        ImageSize::Original,
    ];

    /// Suffix appended to `{id}_{secret}` when synthesizing a URL.
    pub fn suffix(&self) -> &'static str {
        match self {
            ImageSize::Thumbnail => "_q",
            ImageSize::Medium => "_z",
            ImageSize::Large => "_c",
            ImageSize::XLarge => "_b",
            ImageSize::Original => "_o",
        }
    }

    /// The `extras` values that make Flickr include pre-built URLs.
    pub fn url_extras() -> &'static str {
        "url_q,url_z,url_c,url_b,url_o"
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Thumbnail => "thumbnail",
            ImageSize::Medium => "medium",
            ImageSize::Large => "large",
            ImageSize::XLarge => "xlarge",
            ImageSize::Original => "original",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "thumbnail" | "thumb" | "q" => Ok(ImageSize::Thumbnail),
            "medium" | "z" => Ok(ImageSize::Medium),
            "large" | "c" => Ok(ImageSize::Large),
            "xlarge" | "x-large" | "b" => Ok(ImageSize::XLarge),
            "original" | "o" => Ok(ImageSize::Original),
            other => Err(format!("unknown image size '{other}'")),
        }
    }
}

/// Pre-built URLs on the record to try for `size`, best match first.
fn provided_url(photo: &Photo, size: ImageSize) -> Option<&str> {
    let candidates = match size {
        ImageSize::Thumbnail => [Some(&photo.url_q), None],
        ImageSize::Medium => [Some(&photo.url_z), None],
        ImageSize::Large => [Some(&photo.url_c), Some(&photo.url_z)],
        ImageSize::XLarge => [Some(&photo.url_b), Some(&photo.url_c)],
        ImageSize::Original => [Some(&photo.url_o), None],
    };
    candidates
        .into_iter()
        .flatten()
        .find_map(|url| url.as_deref().filter(|u| !u.is_empty()))
}

/// Build a static CDN URL from an addressing triple.
pub fn static_url(farm: u32, server: &str, id: &str, secret: &str, size: ImageSize) -> String {
    format!(
        "https://farm{farm}.staticflickr.com/{server}/{id}_{secret}{}.jpg",
        size.suffix()
    )
}

/// Resolve the URL for `photo` at `size`.
pub fn photo_url(photo: &Photo, size: ImageSize) -> String {
    match provided_url(photo, size) {
        Some(url) => url.to_string(),
        None => static_url(photo.farm, &photo.server, &photo.id, &photo.secret, size),
    }
}

/// Resolve the cover image URL for a photoset.
pub fn album_cover_url(album: &Album, size: ImageSize) -> String {
    static_url(album.farm, &album.server, &album.primary, &album.secret, size)
}
