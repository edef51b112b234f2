//! `folio albums` and `folio album`.

use anyhow::Context as _;
use clap::Args;

use super::rows::{AlbumRow, AlbumViewRow, TagAlbumRow};
use super::Context;

/// Arguments for the albums command.
#[derive(Args, Debug)]
pub struct AlbumsArgs {
    /// List tag-based albums from portfolio.album_tags instead of photosets
    #[arg(short, long)]
    pub tags: bool,

    /// Include photosets without portfolio photos
    #[arg(long, conflicts_with = "tags")]
    pub all: bool,
}

/// Arguments for the album command.
#[derive(Args, Debug)]
pub struct AlbumArgs {
    /// Flickr photoset id
    pub id: String,
}

pub async fn execute_list(args: AlbumsArgs, ctx: &Context) -> anyhow::Result<()> {
    let portfolio = ctx.portfolio()?;

    if args.tags {
        if !portfolio.config().has_album_tags() {
            tracing::warn!(
                "No album tags configured; set portfolio.album_tags or FOLIO_ALBUM_TAGS"
            );
        }
        let albums = portfolio.tag_albums().await?;
        let rows: Vec<TagAlbumRow> = albums
            .iter()
            .map(|a| TagAlbumRow::new(a, ctx.size))
            .collect();
        return ctx.emit_all(&rows);
    }

    let albums = if args.all {
        portfolio.albums().await?
    } else {
        let spinner = ctx.spinner("Checking photosets...");
        let albums = portfolio
            .portfolio_albums_with(|album, count| {
                spinner.inc(1);
                tracing::debug!("Photoset '{}': {} portfolio photos", album.title, count);
            })
            .await;
        spinner.finish_and_clear();
        albums?
    };

    let rows: Vec<AlbumRow> = albums.iter().map(|a| AlbumRow::new(a, ctx.size)).collect();
    ctx.emit_all(&rows)
}

pub async fn execute_show(args: AlbumArgs, ctx: &Context) -> anyhow::Result<()> {
    let portfolio = ctx.portfolio()?;

    let view = portfolio
        .album(&args.id)
        .await
        .with_context(|| format!("Failed to load photoset {}", args.id))?
        .with_context(|| format!("Photoset {} not found", args.id))?;

    ctx.emit(&AlbumViewRow::new(&view, ctx.size))
}
