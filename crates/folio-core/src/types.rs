//! Core data types for Flickr records and the views derived from them.
//!
//! Field names follow the Flickr wire format on serialization so the CLI's
//! JSON output can be fed to anything that already understands Flickr.
//! Records are never mutated after fetch.

use crate::de;
use serde::{Deserialize, Serialize};

/// A photo as returned by `flickr.photos.search` / `flickr.photosets.getPhotos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,

    /// Owner NSID. Absent in photoset listings.
    #[serde(default)]
    pub owner: String,

    // === URL addressing ===
    pub secret: String,

    #[serde(deserialize_with = "de::id")]
    pub server: String,

    #[serde(default, deserialize_with = "de::lenient")]
    pub farm: u32,

    #[serde(default, deserialize_with = "de::text")]
    pub title: String,

    // === Visibility ===
    #[serde(rename = "ispublic", default, deserialize_with = "de::flag")]
    pub is_public: bool,

    #[serde(rename = "isfriend", default, deserialize_with = "de::flag")]
    pub is_friend: bool,

    #[serde(rename = "isfamily", default, deserialize_with = "de::flag")]
    pub is_family: bool,

    // === Capture date ===
    /// "YYYY-MM-DD HH:MM:SS" in the photo's local time
    #[serde(
        rename = "datetaken",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::text_opt"
    )]
    pub date_taken: Option<String>,

    #[serde(
        rename = "datetakengranularity",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::lenient_opt"
    )]
    pub date_taken_granularity: Option<u32>,

    #[serde(rename = "datetakenunknown", default, deserialize_with = "de::flag")]
    pub date_taken_unknown: bool,

    /// Space-delimited normalized tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,

    // === Geo ===
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::lenient_opt"
    )]
    pub latitude: Option<f64>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::lenient_opt"
    )]
    pub longitude: Option<f64>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::lenient_opt"
    )]
    pub accuracy: Option<u32>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::lenient_opt"
    )]
    pub views: Option<u64>,

    // === Pre-built URLs (requested via `extras`) ===
    /// 150x150 square
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_q: Option<String>,

    /// 640px on the longest side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_z: Option<String>,

    /// 800px on the longest side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_c: Option<String>,

    /// 1024px on the longest side
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_b: Option<String>,

    /// Original upload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url_o: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::lenient_opt"
    )]
    pub width_o: Option<u32>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::lenient_opt"
    )]
    pub height_o: Option<u32>,
}

impl Photo {
    /// Create a minimal photo from its addressing triple.
    pub fn new(id: &str, secret: &str, server: &str, farm: u32) -> Self {
        Self {
            id: id.to_string(),
            owner: String::new(),
            secret: secret.to_string(),
            server: server.to_string(),
            farm,
            title: String::new(),
            is_public: true,
            is_friend: false,
            is_family: false,
            date_taken: None,
            date_taken_granularity: None,
            date_taken_unknown: false,
            tags: None,
            latitude: None,
            longitude: None,
            accuracy: None,
            views: None,
            url_q: None,
            url_z: None,
            url_c: None,
            url_b: None,
            url_o: None,
            width_o: None,
            height_o: None,
        }
    }

    /// Iterate the photo's tags. Empty when the record has no tag string.
    pub fn tag_list(&self) -> impl Iterator<Item = &str> {
        self.tags
            .as_deref()
            .unwrap_or("")
            .split(' ')
            .filter(|t| !t.is_empty())
    }

    /// Whether `tag` appears as a whole token in the tag string.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag_list().any(|t| t == tag)
    }

    /// Latitude/longitude, only when both are present and non-zero.
    ///
    /// Flickr reports `0` for photos without geodata.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) if lat != 0.0 && lon != 0.0 => Some((lat, lon)),
            _ => None,
        }
    }
}

/// Extended single-photo detail from `flickr.photos.getInfo`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoInfo {
    pub id: String,

    #[serde(default, deserialize_with = "de::text")]
    pub title: String,

    #[serde(default, deserialize_with = "de::text")]
    pub description: String,

    #[serde(default)]
    pub dates: PhotoDates,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::lenient_opt"
    )]
    pub views: Option<u64>,

    #[serde(default, deserialize_with = "de_info_tags")]
    pub tags: Vec<PhotoTag>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

/// Date metadata attached to a [`PhotoInfo`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PhotoDates {
    /// Upload time, unix seconds
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::lenient_opt"
    )]
    pub posted: Option<i64>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::text_opt"
    )]
    pub taken: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::lenient_opt"
    )]
    pub takengranularity: Option<u32>,

    #[serde(default, deserialize_with = "de::flag")]
    pub takenunknown: bool,

    /// Last modification, unix seconds
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::lenient_opt"
    )]
    pub lastupdate: Option<i64>,
}

/// One entry of the structured tag list on a [`PhotoInfo`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoTag {
    #[serde(default)]
    pub id: String,

    /// Tag as the author typed it
    pub raw: String,

    /// Normalized form, as used in search results' tag strings
    #[serde(rename(deserialize = "_content"), alias = "normalized")]
    pub normalized: String,
}

/// Geolocation attached to a [`PhotoInfo`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(deserialize_with = "de::lenient")]
    pub latitude: f64,

    #[serde(deserialize_with = "de::lenient")]
    pub longitude: f64,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::lenient_opt"
    )]
    pub accuracy: Option<u32>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::text_opt"
    )]
    pub locality: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::text_opt"
    )]
    pub region: Option<String>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::text_opt"
    )]
    pub country: Option<String>,
}

/// Flickr nests info tags as `{"tag": [...]}`; our own output is a flat list.
fn de_info_tags<'de, D>(deserializer: D) -> Result<Vec<PhotoTag>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum InfoTags {
        Flat(Vec<PhotoTag>),
        Wrapped {
            #[serde(default)]
            tag: Vec<PhotoTag>,
        },
    }

    Ok(match InfoTags::deserialize(deserializer)? {
        InfoTags::Flat(tags) => tags,
        InfoTags::Wrapped { tag } => tag,
    })
}

/// One camera metadata field from `flickr.photos.getExif`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExifEntry {
    /// e.g. "IFD0", "ExifIFD", "Canon"
    #[serde(default)]
    pub tagspace: String,

    #[serde(default, deserialize_with = "de::lenient")]
    pub tagspaceid: i64,

    /// Machine name, e.g. "FNumber"
    pub tag: String,

    /// Human label, e.g. "Aperture"
    #[serde(default)]
    pub label: String,

    #[serde(default, deserialize_with = "de::text")]
    pub raw: String,

    /// Flickr's formatted rendition, when it provides one
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "de::text_opt"
    )]
    pub clean: Option<String>,
}

impl ExifEntry {
    pub fn new(tag: &str, label: &str, raw: &str) -> Self {
        Self {
            tagspace: String::new(),
            tagspaceid: 0,
            tag: tag.to_string(),
            label: label.to_string(),
            raw: raw.to_string(),
            clean: None,
        }
    }
}

/// A Flickr photoset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,

    #[serde(default, deserialize_with = "de::text")]
    pub title: String,

    #[serde(default, deserialize_with = "de::text")]
    pub description: String,

    /// Number of photos in the set (all photos, not only portfolio ones)
    #[serde(default, deserialize_with = "de::lenient")]
    pub photos: u32,

    // === Cover addressing ===
    /// Id of the cover photo
    pub primary: String,

    pub secret: String,

    #[serde(deserialize_with = "de::id")]
    pub server: String,

    #[serde(default, deserialize_with = "de::lenient")]
    pub farm: u32,
}

/// A tag and the number of portfolio photos carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub name: String,
    pub count: usize,
}

/// A virtual album made of all portfolio photos carrying one tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagAlbum {
    pub tag: String,
    pub count: usize,
    /// First matching photo, if any
    pub cover: Option<Photo>,
}

/// A photo together with its lazily fetched detail.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoDetails {
    pub photo: Photo,
    pub info: PhotoInfo,
    /// Allow-listed EXIF entries only
    pub exif: Vec<ExifEntry>,
}
