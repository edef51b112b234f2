//! `folio map`.

use clap::Args;
use serde_json::json;
use std::io::Write;

use super::rows::MarkerRow;
use super::Context;

/// Arguments for the map command.
#[derive(Args, Debug)]
pub struct MapArgs {
    /// Print a GeoJSON FeatureCollection instead of marker records
    #[arg(long)]
    pub geojson: bool,
}

pub async fn execute(args: MapArgs, ctx: &Context) -> anyhow::Result<()> {
    let portfolio = ctx.portfolio()?;
    let photos = portfolio.geotagged_photos().await?;

    let markers: Vec<MarkerRow> = photos
        .iter()
        .filter_map(|p| MarkerRow::new(p, ctx.size))
        .collect();
    tracing::info!("{} map markers", markers.len());

    if args.geojson {
        let collection = feature_collection(&markers);
        let mut stdout = std::io::stdout().lock();
        if ctx.pretty {
            serde_json::to_writer_pretty(&mut stdout, &collection)?;
        } else {
            serde_json::to_writer(&mut stdout, &collection)?;
        }
        writeln!(stdout)?;
        return Ok(());
    }

    ctx.emit_all(&markers)
}

fn feature_collection(markers: &[MarkerRow]) -> serde_json::Value {
    json!({
        "type": "FeatureCollection",
        "features": markers.iter().map(MarkerRow::to_feature).collect::<Vec<_>>(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_feature_collection() {
        let collection = feature_collection(&[]);
        assert_eq!(collection["type"], "FeatureCollection");
        assert_eq!(collection["features"].as_array().unwrap().len(), 0);
    }
}
