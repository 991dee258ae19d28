//! Tile-listing query against the imagery service.

use anyhow::{anyhow, bail};
use log::info;

use stv_imagery::bounding_box::ViewportBounds;
use stv_imagery::client::fetch_tiles;
use stv_imagery::request::{build_request, DateRangeInput};

/// Parse a `west,south,east,north` CLI argument into viewport bounds.
/// Range checking happens in the shared validator, not here.
fn parse_bbox_arg(raw: &str) -> anyhow::Result<ViewportBounds> {
    let parts = raw
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f64>()
                .map_err(|_| anyhow!("not a number in bbox: {part:?}"))
        })
        .collect::<anyhow::Result<Vec<f64>>>()?;

    if parts.len() != 4 {
        bail!("expected bbox as west,south,east,north, got {raw:?}");
    }
    Ok(ViewportBounds::new(parts[0], parts[1], parts[2], parts[3]))
}

/// Run a tile-listing query and print the returned layers.
pub async fn run_tiles(
    start_date: &str,
    end_date: &str,
    bbox: &str,
    base_url: &str,
) -> anyhow::Result<()> {
    let bounds = parse_bbox_arg(bbox)?;
    let request = build_request(&DateRangeInput::new(start_date, end_date), bounds).map_err(
        |errors| {
            anyhow!(
                "invalid parameters: {}",
                errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; ")
            )
        },
    )?;

    info!(
        "querying {} for {} ({} days)",
        base_url,
        request.date_range,
        request.date_range.num_days()
    );

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(60))
        .build()?;
    let response = fetch_tiles(&client, base_url, &request).await?;

    if response.layers.is_empty() {
        println!("No tile layers returned for {}.", request.date_range);
        return Ok(());
    }

    println!(
        "{} tile layer(s) for {}:",
        response.layers.len(),
        request.date_range
    );
    for layer in &response.layers {
        println!(
            "  {} [{} to {}], {} source images",
            layer.label,
            layer.start,
            layer.end,
            layer.images.len()
        );
        println!("    {}", layer.tms_url);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::parse_bbox_arg;

    #[test]
    fn test_parse_bbox_arg() {
        let bounds = parse_bbox_arg("-0.2, 51.4, 0.0, 51.6").unwrap();
        assert_eq!(bounds.west, -0.2);
        assert_eq!(bounds.north, 51.6);
    }

    #[test]
    fn test_parse_bbox_arg_rejects_short_input() {
        assert!(parse_bbox_arg("1,2,3").is_err());
        assert!(parse_bbox_arg("a,b,c,d").is_err());
    }
}
