use anyhow::{bail, Context, Result};
use log::info;
use plotcover::{read_layer_geojson, write_pages_geojson, write_preview_svg, CoverConfig, RectangleCoverer};

use crate::cli::{Cli, CoverArgs};

pub fn run(_cli: &Cli, args: &CoverArgs) -> Result<()> {
    let out_path = &args.output.clone().unwrap_or("./pages.geojson".into());

    let config = super::footprint::load_config(&args.page)?.merged(CoverConfig {
        crs: args.crs.clone(),
        source_crs: args.source_crs.clone(),
        overlap: args.overlap,
        ..Default::default()
    });

    let crs = config.target_crs()
        .context("no working CRS given; pass --crs or set \"crs\" in the config file")?;
    let source_crs = config.source_crs().unwrap_or_else(|| crs.clone());
    let footprint = config.footprint()?;
    let coverer = RectangleCoverer::new(crs.clone(), footprint, config.options()?);

    let layers = args.layers.iter()
        .map(|path| {
            info!("[cover] reading layer {}", path.display());
            read_layer_geojson(path, source_crs.clone(), args.selected_only)
        })
        .collect::<Result<Vec<_>>>()?;

    info!("[cover] page {} x {}, overlap {}", footprint.width(), footprint.height(), coverer.options().overlap());
    let report = coverer.cover_layers(&layers)?;

    info!("[cover] writing {} pages to {}", report.len(), out_path.display());
    write_pages_geojson(out_path, &report, &crs, args.force)?;

    if let Some(svg_path) = &args.svg {
        info!("[cover] writing preview to {}", svg_path.display());
        write_preview_svg(svg_path, &coverer.reprojected(&layers)?, &report, args.force)?;
    }

    println!("{} pages from {} positions", report.len(), report.positions);
    if report.skipped_geometries > 0 {
        println!("{} geometries skipped (null, empty, invalid or not projectable)", report.skipped_geometries);
    }
    if !report.unplaced.is_empty() {
        println!("{} positions could not be placed on any page", report.unplaced.len());
    }
    if !report.uncovered.is_empty() {
        println!("{} positions are not fully inside a single page", report.uncovered.len());
    }

    if args.strict && !report.is_complete() {
        bail!("coverage is incomplete");
    }

    Ok(())
}
