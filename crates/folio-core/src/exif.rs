//! Privacy filtering and summarizing of Flickr EXIF data.
//!
//! `flickr.photos.getExif` returns everything the camera wrote, including
//! body/lens serial numbers and owner names. Only allow-listed fields are
//! ever shown.

use crate::types::ExifEntry;
use serde::Serialize;

/// EXIF tags that are safe to display.
pub const SAFE_EXIF_TAGS: &[&str] = &[
    "Make",
    "Model",
    "LensModel",
    "FocalLength",
    "FNumber",
    "ExposureTime",
    "ISO",
    "ExposureProgram",
    "MeteringMode",
    "Flash",
    "WhiteBalance",
    "ColorSpace",
    "ExposureBiasValue",
    "MaxApertureValue",
    "SubjectDistance",
    "FocalLengthIn35mmFormat",
    "SceneCaptureType",
    "Contrast",
    "Saturation",
    "Sharpness",
    "DateTimeOriginal",
    "Software",
    "Location",
    "City",
    "Country",
    "State",
    "Province",
];

pub fn is_safe_tag(tag: &str) -> bool {
    SAFE_EXIF_TAGS.contains(&tag)
}

/// Keep only allow-listed entries, preserving order.
pub fn filter_safe(entries: Vec<ExifEntry>) -> Vec<ExifEntry> {
    entries.into_iter().filter(|e| is_safe_tag(&e.tag)).collect()
}

/// Raw value of the first entry with the given tag.
pub fn value<'a>(entries: &'a [ExifEntry], tag: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|e| e.tag == tag)
        .map(|e| e.raw.as_str())
        .filter(|v| !v.is_empty())
}

/// The headline camera settings of a photo.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CameraSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub camera: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub lens: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub focal_length: Option<String>,

    /// e.g. "f/2.8"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aperture: Option<String>,

    /// e.g. "1/250s"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shutter_speed: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub iso: Option<String>,
}

impl CameraSummary {
    pub fn from_entries(entries: &[ExifEntry]) -> Self {
        let owned = |tag: &str| value(entries, tag).map(String::from);
        Self {
            camera: owned("Model"),
            lens: owned("LensModel"),
            focal_length: owned("FocalLength"),
            aperture: value(entries, "FNumber").map(|v| format!("f/{v}")),
            shutter_speed: value(entries, "ExposureTime").map(|v| format!("{v}s")),
            iso: owned("ISO"),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
