//! Pure views over in-memory photo lists.
//!
//! Nothing here touches the network; [`super::Portfolio`] feeds these the
//! portfolio set it fetched.

use crate::types::{Photo, TagAlbum, TagCount};
use std::collections::{HashMap, HashSet};

/// Keep photos carrying `tag` as a whole token.
pub fn filter_by_tag(photos: Vec<Photo>, tag: &str) -> Vec<Photo> {
    photos.into_iter().filter(|p| p.has_tag(tag)).collect()
}

/// Keep photos with both coordinates present and non-zero.
pub fn geotagged(photos: Vec<Photo>) -> Vec<Photo> {
    photos
        .into_iter()
        .filter(|p| p.coordinates().is_some())
        .collect()
}

/// Count tag occurrences across `photos`, skipping `exclude`.
///
/// Sorted by count, descending. Ties keep the order in which the tags were
/// first seen, so the output is deterministic for a given input order.
pub fn tag_counts(photos: &[Photo], exclude: &HashSet<&str>) -> Vec<TagCount> {
    let mut counts: Vec<TagCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for tag in photos.iter().flat_map(Photo::tag_list) {
        if exclude.contains(tag) {
            continue;
        }
        match index.get(tag) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(tag, counts.len());
                counts.push(TagCount {
                    name: tag.to_string(),
                    count: 1,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Tag cloud of every tag except the portfolio marker itself.
pub fn tag_cloud(photos: &[Photo], portfolio_tag: &str) -> Vec<TagCount> {
    tag_counts(photos, &HashSet::from([portfolio_tag]))
}

/// Tag cloud minus the portfolio marker and every album tag.
pub fn browsing_tags(photos: &[Photo], portfolio_tag: &str, album_tags: &[String]) -> Vec<TagCount> {
    let exclude: HashSet<&str> = std::iter::once(portfolio_tag)
        .chain(album_tags.iter().map(String::as_str))
        .collect();
    tag_counts(photos, &exclude)
}

/// One virtual album per configured tag, in configuration order.
///
/// Tags without matches still produce an album, with a zero count and no
/// cover.
pub fn tag_albums(photos: &[Photo], album_tags: &[String]) -> Vec<TagAlbum> {
    album_tags
        .iter()
        .map(|tag| {
            let mut matches = photos.iter().filter(|p| p.has_tag(tag));
            let cover = matches.next().cloned();
            let count = cover.as_ref().map_or(0, |_| 1 + matches.count());
            TagAlbum {
                tag: tag.clone(),
                count,
                cover,
            }
        })
        .collect()
}
