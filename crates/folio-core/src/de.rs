//! Lenient deserializers for Flickr's loosely typed JSON.
//!
//! The API is inconsistent about scalars: `farm` is a number, `server` a
//! string, `latitude` either, and flags arrive as `0`, `"0"` or `1`. Text
//! fields are plain strings in search results but `{"_content": "..."}`
//! objects in `getInfo` and `photosets.getList`.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar<T> {
    Native(T),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrContent {
    Plain(String),
    Wrapped {
        #[serde(rename = "_content", default)]
        content: String,
    },
}

/// Number given as a JSON number or a numeric string.
pub(crate) fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: Display,
{
    match Scalar::<T>::deserialize(deserializer)? {
        Scalar::Native(v) => Ok(v),
        Scalar::Text(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

/// Like [`lenient`], but `null`, a missing field or an empty string is `None`.
pub(crate) fn lenient_opt<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Deserialize<'de>,
    T::Err: Display,
{
    match Option::<Scalar<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::Native(v)) => Ok(Some(v)),
        Some(Scalar::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Scalar::Text(s)) => s.trim().parse().map(Some).map_err(de::Error::custom),
    }
}

/// Identifier that may be sent as a number (`server` on old photos).
pub(crate) fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::<i64>::deserialize(deserializer)? {
        Scalar::Native(n) => Ok(n.to_string()),
        Scalar::Text(s) => Ok(s),
    }
}

/// `0`/`1` flag as a bool.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt::<D, i64>(deserializer)?.unwrap_or(0) != 0)
}

/// Plain string or `{"_content": ...}` wrapper.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match TextOrContent::deserialize(deserializer)? {
        TextOrContent::Plain(s) => s,
        TextOrContent::Wrapped { content } => content,
    })
}

/// Optional text; empty content is `None`.
pub(crate) fn text_opt<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<TextOrContent>::deserialize(deserializer)?;
    Ok(value
        .map(|v| match v {
            TextOrContent::Plain(s) => s,
            TextOrContent::Wrapped { content } => content,
        })
        .filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Record {
        #[serde(deserialize_with = "lenient")]
        farm: u32,
        #[serde(default, deserialize_with = "lenient_opt")]
        latitude: Option<f64>,
        #[serde(deserialize_with = "id")]
        server: String,
        #[serde(default, deserialize_with = "flag")]
        ispublic: bool,
        #[serde(deserialize_with = "text")]
        title: String,
        #[serde(default, deserialize_with = "text_opt")]
        description: Option<String>,
    }

    #[test]
    fn test_numbers_and_strings_both_accepted() {
        let a: Record = serde_json::from_str(
            r#"{"farm": 66, "latitude": 51.5, "server": "65535", "ispublic": 1, "title": "Dusk"}"#,
        )
        .unwrap();
        let b: Record = serde_json::from_str(
            r#"{"farm": "66", "latitude": "51.5", "server": 65535, "ispublic": "1",
                "title": {"_content": "Dusk"}}"#,
        )
        .unwrap();
        for p in [a, b] {
            assert_eq!(p.farm, 66);
            assert_eq!(p.latitude, Some(51.5));
            assert_eq!(p.server, "65535");
            assert!(p.ispublic);
            assert_eq!(p.title, "Dusk");
        }
    }

    #[test]
    fn test_missing_and_empty_optionals() {
        let p: Record = serde_json::from_str(
            r#"{"farm": 1, "latitude": "", "server": "1", "title": "",
                "description": {"_content": ""}}"#,
        )
        .unwrap();
        assert_eq!(p.latitude, None);
        assert!(!p.ispublic);
        assert_eq!(p.description, None);
    }

    #[test]
    fn test_garbage_number_is_an_error() {
        let result: Result<Record, _> =
            serde_json::from_str(r#"{"farm": "many", "server": "1", "title": ""}"#);
        assert!(result.is_err());
    }
}
