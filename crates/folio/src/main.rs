//! Folio CLI - Flickr-backed photo portfolio data.
//!
//! Folio reads a Flickr account and prints the views a portfolio site needs:
//! the gallery, albums, tag cloud and map markers. Photos are in the
//! portfolio when they carry the `portfolio` tag.
//!
//! # Usage
//!
//! ```bash
//! # Portfolio gallery with large image URLs
//! folio photos --size large
//!
//! # Photos for one tag, one per line
//! folio photos --tag street --format jsonl
//!
//! # Photo detail with camera settings
//! folio photo 53211234567
//!
//! # Albums: photosets with portfolio photos, or tag-based albums
//! folio albums
//! FOLIO_ALBUM_TAGS="street,travel" folio albums --tags
//!
//! # Map markers as GeoJSON
//! folio map --geojson
//! ```

use clap::{Parser, Subcommand};
use std::process::ExitCode;

mod cli;
mod logging;

/// Folio - Flickr-backed photo portfolio: gallery, albums, tag cloud and map data.
#[derive(Parser, Debug)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(flatten)]
    global: cli::GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List portfolio photos (optionally by tag or with coordinates only)
    Photos(cli::photos::PhotosArgs),

    /// Show one portfolio photo with its description and camera settings
    Photo(cli::photos::PhotoArgs),

    /// List albums: photosets holding portfolio photos, or tag-based albums
    Albums(cli::albums::AlbumsArgs),

    /// Show one photoset and its portfolio photos
    Album(cli::albums::AlbumArgs),

    /// Show the tag cloud of the portfolio
    Tags(cli::tags::TagsArgs),

    /// Map markers for geotagged portfolio photos
    Map(cli::map::MapArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so use eprintln for config warnings.
    let config = match cli.global.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `folio config path`."
            );
            folio_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Folio v{}", folio_core::VERSION);

    let ctx = match cli::Context::new(config, &cli.global) {
        Ok(ctx) => ctx,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Dispatch to the appropriate command handler
    let result = match cli.command {
        Commands::Photos(args) => cli::photos::execute_list(args, &ctx).await,
        Commands::Photo(args) => cli::photos::execute_show(args, &ctx).await,
        Commands::Albums(args) => cli::albums::execute_list(args, &ctx).await,
        Commands::Album(args) => cli::albums::execute_show(args, &ctx).await,
        Commands::Tags(args) => cli::tags::execute(args, &ctx).await,
        Commands::Map(args) => cli::map::execute(args, &ctx).await,
        Commands::Config(args) => cli::config::execute(args, &ctx).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
