//! Typed wrappers around the Flickr REST methods Folio uses.

use super::api::{decode, FlickrApi};
use crate::config::PhotoSort;
use crate::de;
use crate::error::FlickrResult;
use crate::types::{Album, ExifEntry, Photo, PhotoInfo};
use crate::urls::ImageSize;
use serde::Deserialize;

pub const SEARCH_PHOTOS: &str = "flickr.photos.search";
pub const GET_INFO: &str = "flickr.photos.getInfo";
pub const GET_EXIF: &str = "flickr.photos.getExif";
pub const PHOTOSETS_GET_LIST: &str = "flickr.photosets.getList";
pub const PHOTOSETS_GET_PHOTOS: &str = "flickr.photosets.getPhotos";

/// Metadata fields requested on every photo listing.
pub fn photo_extras() -> String {
    format!("date_taken,tags,geo,views,{}", ImageSize::url_extras())
}

/// Parameters for `flickr.photos.search`.
#[derive(Debug, Clone)]
pub struct PhotoSearch {
    pub user_id: String,
    /// Comma-separated tags; all must match
    pub tags: String,
    pub per_page: u32,
    pub sort: PhotoSort,
}

/// One page of a photo listing.
#[derive(Debug, Deserialize)]
pub struct PhotoPage {
    #[serde(default, deserialize_with = "de::lenient")]
    pub page: u32,

    #[serde(default, deserialize_with = "de::lenient")]
    pub pages: u32,

    #[serde(default, deserialize_with = "de::lenient")]
    pub total: u64,

    #[serde(default)]
    pub photo: Vec<Photo>,
}

/// Search the user's photos. Only the first page is fetched.
pub async fn search_photos(api: &dyn FlickrApi, search: &PhotoSearch) -> FlickrResult<PhotoPage> {
    let per_page = search.per_page.to_string();
    let extras = photo_extras();
    let params = [
        ("user_id", search.user_id.as_str()),
        ("tags", search.tags.as_str()),
        ("tag_mode", "all"),
        ("extras", extras.as_str()),
        ("per_page", per_page.as_str()),
        ("sort", search.sort.as_param()),
    ];

    let body = api.call(SEARCH_PHOTOS, &params).await?;
    let page: PhotoPage = decode(SEARCH_PHOTOS, body, "photos")?;
    if page.pages > 1 {
        tracing::debug!(
            "Search matched {} photos, using the first {}",
            page.total,
            page.photo.len()
        );
    }
    Ok(page)
}

/// Fetch extended detail for one photo.
pub async fn photo_info(api: &dyn FlickrApi, photo_id: &str) -> FlickrResult<PhotoInfo> {
    let body = api.call(GET_INFO, &[("photo_id", photo_id)]).await?;
    decode(GET_INFO, body, "photo")
}

/// Fetch all EXIF entries for one photo (unfiltered).
pub async fn photo_exif(api: &dyn FlickrApi, photo_id: &str) -> FlickrResult<Vec<ExifEntry>> {
    #[derive(Deserialize)]
    struct ExifPayload {
        #[serde(default)]
        exif: Vec<ExifEntry>,
    }

    let body = api.call(GET_EXIF, &[("photo_id", photo_id)]).await?;
    let payload: ExifPayload = decode(GET_EXIF, body, "photo")?;
    Ok(payload.exif)
}

/// List the user's photosets.
pub async fn photosets(api: &dyn FlickrApi, user_id: &str) -> FlickrResult<Vec<Album>> {
    #[derive(Deserialize)]
    struct SetList {
        #[serde(default)]
        photoset: Vec<Album>,
    }

    let body = api.call(PHOTOSETS_GET_LIST, &[("user_id", user_id)]).await?;
    let list: SetList = decode(PHOTOSETS_GET_LIST, body, "photosets")?;
    Ok(list.photoset)
}

/// List the photos of one photoset (all of them, not only portfolio ones).
pub async fn photoset_photos(
    api: &dyn FlickrApi,
    photoset_id: &str,
    user_id: &str,
) -> FlickrResult<Vec<Photo>> {
    let extras = photo_extras();
    let params = [
        ("photoset_id", photoset_id),
        ("user_id", user_id),
        ("extras", extras.as_str()),
    ];

    let body = api.call(PHOTOSETS_GET_PHOTOS, &params).await?;
    let page: PhotoPage = decode(PHOTOSETS_GET_PHOTOS, body, "photoset")?;
    Ok(page.photo)
}
