//! CLI enum types shared by all commands: output format and image size.

use clap::ValueEnum;
use folio_core::{ImageSize, OutputFormat};

/// Supported output formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Single JSON document
    Json,
    /// One JSON object per line (newline-delimited)
    Jsonl,
    /// Tab-separated text
    Text,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => OutputFormat::Json,
            Format::Jsonl => OutputFormat::JsonLines,
            Format::Text => OutputFormat::Text,
        }
    }
}

/// Image size used for printed URLs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Size {
    /// 150x150 square
    Thumbnail,
    /// 640px
    Medium,
    /// 800px
    Large,
    /// 1024px
    Xlarge,
    /// As uploaded
    Original,
}

impl From<Size> for ImageSize {
    fn from(size: Size) -> Self {
        match size {
            Size::Thumbnail => ImageSize::Thumbnail,
            Size::Medium => ImageSize::Medium,
            Size::Large => ImageSize::Large,
            Size::Xlarge => ImageSize::XLarge,
            Size::Original => ImageSize::Original,
        }
    }
}
