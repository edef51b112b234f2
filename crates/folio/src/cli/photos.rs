//! `folio photos` and `folio photo`.

use anyhow::Context as _;
use clap::Args;

use super::rows::{DetailsView, PhotoRow};
use super::Context;

/// Arguments for the photos command.
#[derive(Args, Debug)]
pub struct PhotosArgs {
    /// Only photos carrying this tag (whole-tag match)
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Only photos with usable coordinates
    #[arg(short, long)]
    pub geotagged: bool,
}

/// Arguments for the photo command.
#[derive(Args, Debug)]
pub struct PhotoArgs {
    /// Flickr photo id
    pub id: String,
}

pub async fn execute_list(args: PhotosArgs, ctx: &Context) -> anyhow::Result<()> {
    let portfolio = ctx.portfolio()?;

    let photos = match (&args.tag, args.geotagged) {
        (Some(tag), geotagged) => {
            let photos = portfolio.photos_by_tag(tag).await?;
            if geotagged {
                folio_core::portfolio::filters::geotagged(photos)
            } else {
                photos
            }
        }
        (None, true) => portfolio.geotagged_photos().await?,
        (None, false) => portfolio.photos().await?,
    };

    tracing::info!("{} photos", photos.len());
    ctx.emit_all(&PhotoRow::from_photos(&photos, ctx.size))
}

pub async fn execute_show(args: PhotoArgs, ctx: &Context) -> anyhow::Result<()> {
    let portfolio = ctx.portfolio()?;

    let details = portfolio
        .photo_details(&args.id)
        .await
        .with_context(|| format!("Failed to load photo {}", args.id))?
        .with_context(|| format!("Photo {} is not in the portfolio", args.id))?;

    ctx.emit(&DetailsView::new(details, ctx.size))
}
