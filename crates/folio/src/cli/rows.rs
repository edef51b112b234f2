//! Output records for the CLI views.
//!
//! Rows carry resolved image URLs instead of raw Flickr addressing fields,
//! so the output can go straight into a static site generator.

use folio_core::types::Location;
use folio_core::urls::{album_cover_url, photo_url};
use folio_core::{
    Album, AlbumView, CameraSummary, ExifEntry, ImageSize, Photo, PhotoDetails, TagAlbum,
    TextLine,
};
use serde::Serialize;

/// A gallery entry.
#[derive(Debug, Clone, Serialize)]
pub struct PhotoRow {
    pub id: String,
    pub title: String,
    pub url: String,
    pub thumbnail_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_taken: Option<String>,
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl PhotoRow {
    pub fn new(photo: &Photo, size: ImageSize) -> Self {
        let coordinates = photo.coordinates();
        Self {
            id: photo.id.clone(),
            title: photo.title.clone(),
            url: photo_url(photo, size),
            thumbnail_url: photo_url(photo, ImageSize::Thumbnail),
            date_taken: photo.date_taken.clone(),
            tags: photo.tag_list().map(String::from).collect(),
            latitude: coordinates.map(|(lat, _)| lat),
            longitude: coordinates.map(|(_, lon)| lon),
        }
    }

    pub fn from_photos(photos: &[Photo], size: ImageSize) -> Vec<Self> {
        photos.iter().map(|p| Self::new(p, size)).collect()
    }
}

impl TextLine for PhotoRow {
    fn text_line(&self) -> String {
        format!("{}\t{}\t{}", self.id, self.title, self.url)
    }
}

/// A photoset entry.
#[derive(Debug, Clone, Serialize)]
pub struct AlbumRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub photos: u32,
    pub cover_url: String,
}

impl AlbumRow {
    pub fn new(album: &Album, size: ImageSize) -> Self {
        Self {
            id: album.id.clone(),
            title: album.title.clone(),
            description: album.description.clone(),
            photos: album.photos,
            cover_url: album_cover_url(album, size),
        }
    }
}

impl TextLine for AlbumRow {
    fn text_line(&self) -> String {
        format!("{}\t{}\t{}", self.id, self.title, self.photos)
    }
}

/// A tag-based album entry.
#[derive(Debug, Clone, Serialize)]
pub struct TagAlbumRow {
    pub tag: String,
    pub count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
}

impl TagAlbumRow {
    pub fn new(album: &TagAlbum, size: ImageSize) -> Self {
        Self {
            tag: album.tag.clone(),
            count: album.count,
            cover_url: album.cover.as_ref().map(|p| photo_url(p, size)),
        }
    }
}

impl TextLine for TagAlbumRow {
    fn text_line(&self) -> String {
        format!("{}\t{}", self.count, self.tag)
    }
}

/// A map marker for one geotagged photo.
#[derive(Debug, Clone, Serialize)]
pub struct MarkerRow {
    pub id: String,
    pub title: String,
    pub latitude: f64,
    pub longitude: f64,
    pub url: String,
    pub thumbnail_url: String,
}

impl MarkerRow {
    /// `None` for photos without usable coordinates.
    pub fn new(photo: &Photo, size: ImageSize) -> Option<Self> {
        let (latitude, longitude) = photo.coordinates()?;
        Some(Self {
            id: photo.id.clone(),
            title: photo.title.clone(),
            latitude,
            longitude,
            url: photo_url(photo, size),
            thumbnail_url: photo_url(photo, ImageSize::Thumbnail),
        })
    }

    /// GeoJSON point feature. Coordinates are `[longitude, latitude]`.
    pub fn to_feature(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [self.longitude, self.latitude],
            },
            "properties": {
                "id": self.id,
                "title": self.title,
                "url": self.url,
                "thumbnail_url": self.thumbnail_url,
            },
        })
    }
}

impl TextLine for MarkerRow {
    fn text_line(&self) -> String {
        format!(
            "{}\t{:.6}\t{:.6}\t{}",
            self.id, self.latitude, self.longitude, self.title
        )
    }
}

/// Full detail of one photo.
#[derive(Debug, Clone, Serialize)]
pub struct DetailsView {
    #[serde(flatten)]
    pub photo: PhotoRow,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posted: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
    #[serde(skip_serializing_if = "CameraSummary::is_empty")]
    pub camera: CameraSummary,
    pub exif: Vec<ExifEntry>,
}

impl DetailsView {
    pub fn new(details: PhotoDetails, size: ImageSize) -> Self {
        let camera = CameraSummary::from_entries(&details.exif);
        Self {
            photo: PhotoRow::new(&details.photo, size),
            description: details.info.description,
            posted: details.info.dates.posted,
            views: details.info.views.or(details.photo.views),
            location: details.info.location,
            camera,
            exif: details.exif,
        }
    }
}

impl TextLine for DetailsView {
    fn text_line(&self) -> String {
        let mut lines = vec![
            format!("id\t{}", self.photo.id),
            format!("title\t{}", self.photo.title),
            format!("url\t{}", self.photo.url),
        ];
        if !self.description.is_empty() {
            lines.push(format!("description\t{}", self.description));
        }
        if let Some(taken) = &self.photo.date_taken {
            lines.push(format!("taken\t{taken}"));
        }
        let camera = [
            ("camera", &self.camera.camera),
            ("lens", &self.camera.lens),
            ("focal_length", &self.camera.focal_length),
            ("aperture", &self.camera.aperture),
            ("shutter_speed", &self.camera.shutter_speed),
            ("iso", &self.camera.iso),
        ];
        for (label, value) in camera {
            if let Some(value) = value {
                lines.push(format!("{label}\t{value}"));
            }
        }
        lines.join("\n")
    }
}

/// One photoset with its portfolio photos.
#[derive(Debug, Clone, Serialize)]
pub struct AlbumViewRow {
    pub album: AlbumRow,
    pub photos: Vec<PhotoRow>,
}

impl AlbumViewRow {
    pub fn new(view: &AlbumView, size: ImageSize) -> Self {
        Self {
            album: AlbumRow::new(&view.album, size),
            photos: PhotoRow::from_photos(&view.photos, size),
        }
    }
}

impl TextLine for AlbumViewRow {
    fn text_line(&self) -> String {
        std::iter::once(self.album.text_line())
            .chain(self.photos.iter().map(|p| p.text_line()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
