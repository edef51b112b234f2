//! The `folio config` command for configuration management.

use clap::{Args, Subcommand};
use folio_core::config::parse_album_tags;
use folio_core::Config;
use std::path::Path;

use super::Context;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration (file plus flag/env overrides)
    Show,

    /// Show config file path
    Path,

    /// Initialize a new config file with defaults
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Set one value in the config file, keeping its comments
    Set {
        /// Dotted key, e.g. `portfolio.album_tags` or `flickr.per_page`
        key: String,

        /// New value; album tags take a comma-separated list
        value: String,
    },
}

/// Execute the config command.
pub async fn execute(args: ConfigArgs, ctx: &Context) -> anyhow::Result<()> {
    let path = &ctx.config_path;

    match args.command {
        ConfigCommand::Show => {
            let toml = redacted(&ctx.config).to_toml()?;
            println!("{}", toml);
        }

        ConfigCommand::Path => {
            println!("{}", path.display());
        }

        ConfigCommand::Init { force } => {
            if path.exists() && !force {
                anyhow::bail!(
                    "Config file already exists at: {}\nUse --force to overwrite.",
                    path.display()
                );
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = Config::default().to_toml()?;
            std::fs::write(path, toml)?;

            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }

        ConfigCommand::Set { key, value } => {
            set_value(path, &key, &value)?;
            tracing::info!("Set {} in {}", key, path.display());
        }
    }

    Ok(())
}

/// Hide a literal API key; `${VAR}` references are shown as written.
fn redacted(config: &Config) -> Config {
    let mut config = config.clone();
    let key = &config.flickr.api_key;
    if !key.is_empty() && !key.starts_with("${") {
        config.flickr.api_key = "********".to_string();
    }
    config
}

/// Write `key = value` into the config file at `path`, creating it if needed.
///
/// The edited document must still load as a valid [`Config`], otherwise the
/// file is left untouched.
fn set_value(path: &Path, key: &str, value: &str) -> anyhow::Result<()> {
    let Some((section, field)) = key.split_once('.') else {
        anyhow::bail!("Expected a dotted key like `portfolio.tag`, got `{key}`");
    };

    let defaults: toml_edit::DocumentMut = Config::default().to_toml()?.parse()?;
    let known = defaults
        .get(section)
        .and_then(toml_edit::Item::as_table_like)
        .is_some_and(|t| t.contains_key(field));
    if !known {
        anyhow::bail!("Unknown config key `{key}`");
    }

    let content = if path.exists() {
        std::fs::read_to_string(path)?
    } else {
        String::new()
    };
    let mut doc: toml_edit::DocumentMut = content.parse()?;

    if !doc.contains_key(section) {
        doc[section] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    let Some(table) = doc
        .get_mut(section)
        .and_then(toml_edit::Item::as_table_like_mut)
    else {
        anyhow::bail!("`{section}` in {} is not a table", path.display());
    };
    table.insert(field, toml_edit::value(parse_value(key, value)));

    let updated = doc.to_string();
    Config::from_toml(&updated)?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, updated)?;
    Ok(())
}

fn parse_value(key: &str, raw: &str) -> toml_edit::Value {
    if key == "portfolio.album_tags" {
        return parse_album_tags(raw).into_iter().collect();
    }
    if let Ok(b) = raw.parse::<bool>() {
        return b.into();
    }
    if let Ok(i) = raw.parse::<i64>() {
        return i.into();
    }
    raw.into()
}
