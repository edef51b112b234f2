//! Command implementations and the context they share.

pub mod albums;
pub mod config;
pub mod map;
pub mod photos;
mod rows;
pub mod tags;
pub mod types;

use clap::Args;
use folio_core::{Config, ConfigError, ImageSize, OutputFormat, OutputWriter, Portfolio, TextLine};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Duration;

use types::{Format, Size};

/// Options accepted by every command.
#[derive(Args, Debug, Default)]
pub struct GlobalArgs {
    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "FOLIO_CONFIG")]
    pub config: Option<String>,

    /// Flickr API key (overrides flickr.api_key)
    #[arg(long, global = true, env = "FLICKR_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Flickr user NSID (overrides flickr.user_id)
    #[arg(long, global = true, env = "FLICKR_USER_ID")]
    pub user_id: Option<String>,

    /// Comma-separated tags shown as albums (overrides portfolio.album_tags)
    #[arg(long, global = true, env = "FOLIO_ALBUM_TAGS")]
    pub album_tags: Option<String>,

    /// Output format (defaults to output.format)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<Format>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Image size for printed URLs (defaults to output.image_size)
    #[arg(short, long, global = true, value_enum)]
    pub size: Option<Size>,
}

impl GlobalArgs {
    /// Path of the config file in effect.
    pub fn config_path(&self) -> PathBuf {
        self.config
            .as_deref()
            .map(Config::expand_path)
            .unwrap_or_else(Config::default_path)
    }

    /// Load the config file in effect.
    ///
    /// A missing default file yields defaults; a missing `--config` file is
    /// an error.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let path = self.config_path();
        if self.config.is_some() || path.exists() {
            Config::load_from(&path)
        } else {
            Ok(Config::default())
        }
    }

    /// Apply flag/env overrides on top of the file config.
    pub fn apply_overrides(&self, config: &mut Config) -> Result<(), ConfigError> {
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.is_empty()) {
            config.flickr.api_key = key.to_string();
        }
        if let Some(user) = self.user_id.as_deref().filter(|u| !u.is_empty()) {
            config.flickr.user_id = user.to_string();
        }
        if let Some(tags) = &self.album_tags {
            config.set_album_tags(tags)?;
        }
        Ok(())
    }
}

/// Resolved settings for one command run.
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
    pub format: OutputFormat,
    pub pretty: bool,
    pub size: ImageSize,
}

impl Context {
    pub fn new(mut config: Config, global: &GlobalArgs) -> Result<Self, ConfigError> {
        global.apply_overrides(&mut config)?;

        let format = match global.format {
            Some(format) => format.into(),
            None => OutputFormat::parse(&config.output.format).unwrap_or_else(|| {
                tracing::warn!(
                    "Unknown output.format '{}', using json",
                    config.output.format
                );
                OutputFormat::Json
            }),
        };
        let pretty = global.pretty || config.output.pretty;
        let size = global
            .size
            .map(ImageSize::from)
            .unwrap_or(config.output.image_size);

        Ok(Self {
            config_path: global.config_path(),
            config,
            format,
            pretty,
            size,
        })
    }

    /// Portfolio backed by the live Flickr API.
    pub fn portfolio(&self) -> anyhow::Result<Portfolio> {
        Ok(Portfolio::from_config(&self.config)?)
    }

    /// Write a list of records to stdout.
    pub fn emit_all<T: Serialize + TextLine>(&self, items: &[T]) -> anyhow::Result<()> {
        let mut writer = self.writer();
        writer.write_all(items)?;
        writer.flush()?;
        tracing::debug!("Wrote {} records", writer.items_written());
        Ok(())
    }

    /// Write one record to stdout.
    pub fn emit<T: Serialize + TextLine>(&self, item: &T) -> anyhow::Result<()> {
        let mut writer = self.writer();
        writer.write(item)?;
        writer.flush()?;
        Ok(())
    }

    fn writer(&self) -> OutputWriter<BufWriter<io::StdoutLock<'static>>> {
        OutputWriter::new(BufWriter::new(io::stdout().lock()), self.format, self.pretty)
    }

    /// Spinner on stderr for slow fan-outs. Hidden when stderr isn't a TTY.
    pub fn spinner(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {pos} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(120));
        pb
    }
}
