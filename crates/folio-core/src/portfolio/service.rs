//! The portfolio service: Flickr calls plus the views derived from them.

use super::filters;
use crate::config::{Config, PortfolioConfig};
use crate::error::{FlickrResult, Result};
use crate::exif;
use crate::flickr::methods::{self, PhotoSearch};
use crate::flickr::{FlickrApi, FlickrClient};
use crate::types::{Album, ExifEntry, Photo, PhotoDetails, PhotoInfo, TagAlbum, TagCount};
use futures_util::stream::{self, StreamExt};
use serde::Serialize;

/// A photoset together with its portfolio photos.
#[derive(Debug, Clone, Serialize)]
pub struct AlbumView {
    pub album: Album,
    pub photos: Vec<Photo>,
}

/// Portfolio views backed by one Flickr account.
///
/// Nothing is cached: every call re-fetches from Flickr, so two calls may
/// observe different data if the account changed in between.
pub struct Portfolio {
    api: Box<dyn FlickrApi>,
    user_id: String,
    per_page: u32,
    config: PortfolioConfig,
}

impl Portfolio {
    pub fn new(api: Box<dyn FlickrApi>, user_id: &str, config: &Config) -> Self {
        Self {
            api,
            user_id: user_id.to_string(),
            per_page: config.flickr.per_page,
            config: config.portfolio.clone(),
        }
    }

    /// Build a portfolio backed by the HTTP client described in `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let credentials = config.credentials()?;
        let client = FlickrClient::from_config(&config.flickr, &credentials.api_key);
        tracing::debug!(
            user_id = %credentials.user_id,
            endpoint = %config.flickr.endpoint,
            "Portfolio client ready"
        );
        Ok(Self::new(Box::new(client), &credentials.user_id, config))
    }

    pub fn config(&self) -> &PortfolioConfig {
        &self.config
    }

    fn is_portfolio(&self, photo: &Photo) -> bool {
        photo.has_tag(&self.config.tag)
    }

    // ── Photos ──

    /// All portfolio photos, newest upload first (one page).
    pub async fn photos(&self) -> FlickrResult<Vec<Photo>> {
        let search = PhotoSearch {
            user_id: self.user_id.clone(),
            tags: self.config.tag.clone(),
            per_page: self.per_page,
            sort: self.config.sort,
        };
        let page = methods::search_photos(self.api.as_ref(), &search).await?;
        let photos: Vec<Photo> = page
            .photo
            .into_iter()
            .filter(|p| self.is_portfolio(p))
            .collect();
        tracing::info!("Found {} portfolio photos", photos.len());
        Ok(photos)
    }

    /// A single portfolio photo, or `None` if the id is not in the portfolio.
    pub async fn photo(&self, photo_id: &str) -> FlickrResult<Option<Photo>> {
        Ok(self.photos().await?.into_iter().find(|p| p.id == photo_id))
    }

    /// Portfolio photos carrying `tag`.
    pub async fn photos_by_tag(&self, tag: &str) -> FlickrResult<Vec<Photo>> {
        Ok(filters::filter_by_tag(self.photos().await?, tag))
    }

    /// Portfolio photos with usable coordinates, for the map.
    pub async fn geotagged_photos(&self) -> FlickrResult<Vec<Photo>> {
        let photos = filters::geotagged(self.photos().await?);
        tracing::debug!("{} portfolio photos are geotagged", photos.len());
        Ok(photos)
    }

    /// Extended detail for one photo.
    pub async fn photo_info(&self, photo_id: &str) -> FlickrResult<PhotoInfo> {
        methods::photo_info(self.api.as_ref(), photo_id).await
    }

    /// Allow-listed EXIF entries for one photo.
    pub async fn photo_exif(&self, photo_id: &str) -> FlickrResult<Vec<ExifEntry>> {
        let entries = methods::photo_exif(self.api.as_ref(), photo_id).await?;
        Ok(exif::filter_safe(entries))
    }

    /// Photo, info and EXIF for a portfolio photo.
    ///
    /// Info and EXIF are fetched concurrently; if either fails the whole
    /// call fails.
    pub async fn photo_details(&self, photo_id: &str) -> FlickrResult<Option<PhotoDetails>> {
        let Some(photo) = self.photo(photo_id).await? else {
            return Ok(None);
        };
        let (info, exif) =
            tokio::try_join!(self.photo_info(photo_id), self.photo_exif(photo_id))?;
        Ok(Some(PhotoDetails { photo, info, exif }))
    }

    // ── Tags ──

    /// Every tag on portfolio photos except the portfolio tag, by frequency.
    pub async fn tag_cloud(&self) -> FlickrResult<Vec<TagCount>> {
        Ok(filters::tag_cloud(&self.photos().await?, &self.config.tag))
    }

    /// Tag cloud without the configured album tags.
    pub async fn browsing_tags(&self) -> FlickrResult<Vec<TagCount>> {
        Ok(filters::browsing_tags(
            &self.photos().await?,
            &self.config.tag,
            &self.config.album_tags,
        ))
    }

    /// One virtual album per configured album tag.
    ///
    /// Returns immediately, without a request, when no album tags are set.
    pub async fn tag_albums(&self) -> FlickrResult<Vec<TagAlbum>> {
        if !self.config.has_album_tags() {
            return Ok(Vec::new());
        }
        Ok(filters::tag_albums(
            &self.photos().await?,
            &self.config.album_tags,
        ))
    }

    // ── Photosets ──

    /// All of the user's photosets.
    pub async fn albums(&self) -> FlickrResult<Vec<Album>> {
        methods::photosets(self.api.as_ref(), &self.user_id).await
    }

    /// Portfolio photos of one photoset.
    pub async fn album_photos(&self, album_id: &str) -> FlickrResult<Vec<Photo>> {
        let photos = methods::photoset_photos(self.api.as_ref(), album_id, &self.user_id).await?;
        Ok(photos.into_iter().filter(|p| self.is_portfolio(p)).collect())
    }

    /// A photoset and its portfolio photos, or `None` for an unknown id.
    pub async fn album(&self, album_id: &str) -> FlickrResult<Option<AlbumView>> {
        let Some(album) = self.albums().await?.into_iter().find(|a| a.id == album_id) else {
            return Ok(None);
        };
        let photos = self.album_photos(album_id).await?;
        Ok(Some(AlbumView { album, photos }))
    }

    /// Photosets holding at least one portfolio photo, in Flickr's order.
    pub async fn portfolio_albums(&self) -> FlickrResult<Vec<Album>> {
        self.portfolio_albums_with(|_, _| {}).await
    }

    /// Like [`Portfolio::portfolio_albums`], reporting each photoset's
    /// portfolio photo count as it is checked.
    ///
    /// Costs one `photosets.getPhotos` call per photoset, with up to
    /// `portfolio.album_concurrency` in flight.
    pub async fn portfolio_albums_with<F>(&self, on_checked: F) -> FlickrResult<Vec<Album>>
    where
        F: Fn(&Album, usize),
    {
        let sets = self.albums().await?;
        let total = sets.len();

        let mut checks = std::pin::pin!(stream::iter(sets)
            .map(move |album| async move {
                let photos = self.album_photos(&album.id).await;
                (album, photos)
            })
            .buffered(self.config.album_concurrency));

        let mut kept = Vec::new();
        while let Some((album, photos)) = checks.next().await {
            let count = photos?.len();
            on_checked(&album, count);
            if count > 0 {
                kept.push(album);
            } else {
                tracing::debug!("Skipping photoset '{}': no portfolio photos", album.title);
            }
        }

        tracing::info!("{} of {} photosets hold portfolio photos", kept.len(), total);
        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlickrError;
    use crate::flickr::fake::FakeFlickr;
    use crate::flickr::methods::{
        GET_EXIF, GET_INFO, PHOTOSETS_GET_LIST, PHOTOSETS_GET_PHOTOS, SEARCH_PHOTOS,
    };
    use serde_json::{json, Value};

    fn photo_json(id: &str, tags: &str, lat: f64, lon: f64) -> Value {
        json!({"id": id, "owner": "12345678@N00", "secret": "s", "server": "65535",
               "farm": 66, "title": format!("Photo {id}"), "ispublic": 1,
               "isfriend": 0, "isfamily": 0, "tags": tags,
               "latitude": lat, "longitude": lon})
    }

    fn search_body() -> Value {
        json!({"photos": {"page": 1, "pages": 1, "perpage": 100, "total": 4, "photo": [
            photo_json("1", "portfolio street bw", 53.5, 9.9),
            photo_json("2", "portfolio landscape", 0.0, 0.0),
            photo_json("3", "portfolio street night", 40.7, -74.0),
            photo_json("4", "portfolio", 0.0, 12.0),
        ]}, "stat": "ok"})
    }

    fn set_json(id: &str, title: &str) -> Value {
        json!({"id": id, "primary": "1", "secret": "s", "server": "65535", "farm": 66,
               "photos": 2, "title": {"_content": title}, "description": {"_content": ""}})
    }

    fn set_photos(tags: &[&str]) -> Value {
        let photos: Vec<Value> = tags
            .iter()
            .enumerate()
            .map(|(i, t)| photo_json(&i.to_string(), t, 0.0, 0.0))
            .collect();
        json!({"photoset": {"id": "x", "photo": photos}, "stat": "ok"})
    }

    fn sets_fake() -> FakeFlickr {
        FakeFlickr::new()
            .respond(
                PHOTOSETS_GET_LIST,
                json!({"photosets": {"photoset": [
                    set_json("a", "Hamburg"),
                    set_json("b", "Family"),
                    set_json("c", "Street"),
                ]}, "stat": "ok"}),
            )
            .respond_for(PHOTOSETS_GET_PHOTOS, "a", set_photos(&["portfolio harbour", "misc"]))
            .respond_for(PHOTOSETS_GET_PHOTOS, "b", set_photos(&["family", "portfolios"]))
            .respond_for(PHOTOSETS_GET_PHOTOS, "c", set_photos(&["street portfolio"]))
    }

    fn portfolio_with(fake: FakeFlickr, config: Config) -> (Portfolio, std::sync::Arc<FakeFlickr>) {
        let fake = std::sync::Arc::new(fake);
        let portfolio = Portfolio::new(Box::new(SharedFake(fake.clone())), "12345678@N00", &config);
        (portfolio, fake)
    }

    /// Lets a test keep a handle on the fake after handing it to the service.
    struct SharedFake(std::sync::Arc<FakeFlickr>);

    #[async_trait::async_trait]
    impl FlickrApi for SharedFake {
        async fn call(&self, method: &str, params: &[(&str, &str)]) -> FlickrResult<Value> {
            self.0.call(method, params).await
        }
    }

    fn ids(photos: &[Photo]) -> Vec<&str> {
        photos.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_photos_uses_configured_page_size() {
        let mut config = Config::default();
        config.flickr.per_page = 25;
        let (portfolio, fake) =
            portfolio_with(FakeFlickr::new().respond(SEARCH_PHOTOS, search_body()), config);

        let photos = portfolio.photos().await.unwrap();
        assert_eq!(photos.len(), 4);
        let call = fake.last_call(SEARCH_PHOTOS).unwrap();
        assert_eq!(call.param("per_page"), Some("25"));
        assert_eq!(call.param("user_id"), Some("12345678@N00"));
    }

    #[tokio::test]
    async fn test_geotagged_and_tag_views() {
        let (portfolio, _) = portfolio_with(
            FakeFlickr::new().respond(SEARCH_PHOTOS, search_body()),
            Config::default(),
        );

        assert_eq!(ids(&portfolio.geotagged_photos().await.unwrap()), vec!["1", "3"]);
        assert_eq!(ids(&portfolio.photos_by_tag("street").await.unwrap()), vec!["1", "3"]);
        assert!(portfolio.photos_by_tag("macro").await.unwrap().is_empty());

        let cloud = portfolio.tag_cloud().await.unwrap();
        assert_eq!(cloud[0].name, "street");
        assert_eq!(cloud.iter().map(|t| t.count).sum::<usize>(), 5);
    }

    #[tokio::test]
    async fn test_browsing_tags_and_tag_albums_follow_config() {
        let mut config = Config::default();
        config.set_album_tags("street, landscape").unwrap();
        let (portfolio, _) =
            portfolio_with(FakeFlickr::new().respond(SEARCH_PHOTOS, search_body()), config);

        let browsing: Vec<String> = portfolio
            .browsing_tags()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(browsing, vec!["bw", "night"]);

        let albums = portfolio.tag_albums().await.unwrap();
        assert_eq!(albums.len(), 2);
        assert_eq!((albums[0].tag.as_str(), albums[0].count), ("street", 2));
        assert_eq!((albums[1].tag.as_str(), albums[1].count), ("landscape", 1));
        assert_eq!(albums[1].cover.as_ref().unwrap().id, "2");
    }

    #[tokio::test]
    async fn test_tag_albums_without_config_makes_no_request() {
        let (portfolio, fake) = portfolio_with(FakeFlickr::new(), Config::default());
        assert!(portfolio.tag_albums().await.unwrap().is_empty());
        assert!(fake.calls().is_empty());
    }

    #[tokio::test]
    async fn test_portfolio_albums_exclude_sets_without_portfolio_photos() {
        let (portfolio, fake) = portfolio_with(sets_fake(), Config::default());

        let albums = portfolio.portfolio_albums().await.unwrap();
        let ids: Vec<&str> = albums.iter().map(|a| a.id.as_str()).collect();
        // "portfolios" is a different tag
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(fake.call_count(PHOTOSETS_GET_PHOTOS), 3);
    }

    #[tokio::test]
    async fn test_portfolio_albums_keep_order_when_concurrent() {
        let mut config = Config::default();
        config.portfolio.album_concurrency = 3;
        let (portfolio, _) = portfolio_with(sets_fake(), config);

        let seen = std::sync::Mutex::new(Vec::new());
        let albums = portfolio
            .portfolio_albums_with(|album, count| {
                seen.lock().unwrap().push((album.id.clone(), count));
            })
            .await
            .unwrap();

        assert_eq!(albums.len(), 2);
        assert_eq!(
            *seen.lock().unwrap(),
            vec![("a".to_string(), 1), ("b".to_string(), 0), ("c".to_string(), 1)]
        );
    }

    #[tokio::test]
    async fn test_portfolio_albums_fail_on_any_photoset_error() {
        let fake = FakeFlickr::new()
            .respond(
                PHOTOSETS_GET_LIST,
                json!({"photosets": {"photoset": [set_json("a", "A")]}, "stat": "ok"}),
            )
            .fail(PHOTOSETS_GET_PHOTOS, 1, "Photoset not found");
        let (portfolio, _) = portfolio_with(fake, Config::default());

        let err = portfolio.portfolio_albums().await.unwrap_err();
        assert!(matches!(err, FlickrError::Api { code: 1, .. }));
    }

    #[tokio::test]
    async fn test_album_view() {
        let (portfolio, _) = portfolio_with(sets_fake(), Config::default());

        let view = portfolio.album("a").await.unwrap().unwrap();
        assert_eq!(view.album.title, "Hamburg");
        assert_eq!(view.photos.len(), 1);
        assert!(portfolio.album("zzz").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_photo_details_joins_info_and_safe_exif() {
        let fake = FakeFlickr::new()
            .respond(SEARCH_PHOTOS, search_body())
            .respond(
                GET_INFO,
                json!({"photo": {"id": "3", "title": {"_content": "Photo 3"},
                       "description": {"_content": "Crosswalk"}, "views": "9",
                       "dates": {"taken": "2022-05-01 08:00:00"},
                       "tags": {"tag": []}}, "stat": "ok"}),
            )
            .respond(
                GET_EXIF,
                json!({"photo": {"id": "3", "exif": [
                    {"tagspace": "IFD0", "tagspaceid": 0, "tag": "Model", "label": "Model",
                     "raw": {"_content": "X100V"}},
                    {"tagspace": "ExifIFD", "tagspaceid": 0, "tag": "SerialNumber",
                     "label": "Serial Number", "raw": {"_content": "0042"}}
                ]}, "stat": "ok"}),
            );
        let (portfolio, fake) = portfolio_with(fake, Config::default());

        let details = portfolio.photo_details("3").await.unwrap().unwrap();
        assert_eq!(details.info.description, "Crosswalk");
        assert_eq!(details.exif.len(), 1);
        assert_eq!(details.exif[0].tag, "Model");
        assert_eq!(fake.last_call(GET_INFO).unwrap().param("photo_id"), Some("3"));
    }

    #[tokio::test]
    async fn test_photo_details_outside_portfolio_is_none() {
        let (portfolio, fake) = portfolio_with(
            FakeFlickr::new().respond(SEARCH_PHOTOS, search_body()),
            Config::default(),
        );
        assert!(portfolio.photo_details("999").await.unwrap().is_none());
        assert_eq!(fake.call_count(GET_INFO), 0);
    }

    #[tokio::test]
    async fn test_photo_details_fails_when_exif_fails() {
        let fake = FakeFlickr::new()
            .respond(SEARCH_PHOTOS, search_body())
            .respond(GET_INFO, json!({"photo": {"id": "1"}, "stat": "ok"}))
            .fail(GET_EXIF, 2, "Permission denied");
        let (portfolio, _) = portfolio_with(fake, Config::default());

        let err = portfolio.photo_details("1").await.unwrap_err();
        assert_eq!(err.method(), GET_EXIF);
    }
}
