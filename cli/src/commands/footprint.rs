use anyhow::Result;
use plotcover::CoverConfig;

use crate::cli::{Cli, FootprintArgs, PageArgs};

/// Config file contents (if any) overridden by page flags.
pub(crate) fn load_config(page: &PageArgs) -> Result<CoverConfig> {
    let file = match &page.config {
        Some(path) => CoverConfig::from_path(path)?,
        None => CoverConfig::default(),
    };

    Ok(file.merged(CoverConfig {
        page_width: page.page_width,
        page_height: page.page_height,
        paper: page.paper.clone(),
        orientation: page.orientation.clone(),
        scale: page.scale,
        ..Default::default()
    }))
}

pub fn run(_cli: &Cli, args: &FootprintArgs) -> Result<()> {
    let footprint = load_config(&args.page)?.footprint()?;
    println!("{} x {}", footprint.width(), footprint.height());
    Ok(())
}
