//! `folio tags`.

use clap::Args;

use super::Context;

/// Arguments for the tags command.
#[derive(Args, Debug)]
pub struct TagsArgs {
    /// Keep album tags in the cloud (by default they are listed by `folio albums --tags`)
    #[arg(short, long)]
    pub all: bool,

    /// Show at most this many tags
    #[arg(short, long)]
    pub limit: Option<usize>,
}

pub async fn execute(args: TagsArgs, ctx: &Context) -> anyhow::Result<()> {
    let portfolio = ctx.portfolio()?;

    let mut tags = if args.all {
        portfolio.tag_cloud().await?
    } else {
        portfolio.browsing_tags().await?
    };
    if let Some(limit) = args.limit {
        tags.truncate(limit);
    }

    ctx.emit_all(&tags)
}
