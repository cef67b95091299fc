use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    cover::CoverOptions,
    crs::Crs,
    geom::{Orientation, PageFootprint, PaperSize},
    CoverError,
};

/// Settings for a covering run, as read from a JSON file.
///
/// Every key is optional. The page footprint comes either from
/// `page_width`/`page_height` (working CRS units) or from `paper` printed at
/// `1:scale`; an explicit page size wins when both are given. Without an
/// `orientation`, a custom paper keeps the dimensions as written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoverConfig {
    /// PROJ.4 definition of the working CRS.
    pub crs: Option<String>,
    /// PROJ.4 definition of the input layers, if it differs from `crs`.
    pub source_crs: Option<String>,
    pub overlap: Option<f64>,
    pub page_width: Option<f64>,
    pub page_height: Option<f64>,
    /// `A0`..`A5` or `WIDTHxHEIGHT` in millimetres.
    pub paper: Option<String>,
    /// `portrait` or `landscape`.
    pub orientation: Option<String>,
    pub scale: Option<f64>,
}

impl CoverConfig {
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("[config] Failed to read {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("[config] Failed to parse {}", path.display()))
    }

    /// Combine with `overrides`, whose set values take precedence.
    ///
    /// The page size is resolved as a unit: when `overrides` sets an explicit
    /// page size, or a paper size or scale, the other form is dropped from
    /// `self` so it cannot shadow the override.
    pub fn merged(mut self, overrides: CoverConfig) -> Self {
        if overrides.page_width.is_some() || overrides.page_height.is_some() {
            self.paper = None;
            self.orientation = None;
            self.scale = None;
        } else if overrides.paper.is_some() || overrides.scale.is_some() {
            self.page_width = None;
            self.page_height = None;
        }

        Self {
            crs: overrides.crs.or(self.crs),
            source_crs: overrides.source_crs.or(self.source_crs),
            overlap: overrides.overlap.or(self.overlap),
            page_width: overrides.page_width.or(self.page_width),
            page_height: overrides.page_height.or(self.page_height),
            paper: overrides.paper.or(self.paper),
            orientation: overrides.orientation.or(self.orientation),
            scale: overrides.scale.or(self.scale),
        }
    }

    pub fn footprint(&self) -> Result<PageFootprint, CoverError> {
        if let (Some(width), Some(height)) = (self.page_width, self.page_height) {
            return PageFootprint::new(width, height)
        }

        match (&self.paper, self.scale) {
            (Some(paper), Some(scale)) => {
                let orientation = self.orientation.as_deref()
                    .map(str::parse::<Orientation>)
                    .transpose()?;
                PageFootprint::from_paper(paper.parse::<PaperSize>()?, orientation, scale)
            }
            _ => Err(CoverError::MissingFootprint),
        }
    }

    pub fn options(&self) -> Result<CoverOptions, CoverError> {
        match self.overlap {
            Some(overlap) => CoverOptions::new(overlap),
            None => Ok(CoverOptions::default()),
        }
    }

    pub fn target_crs(&self) -> Option<Crs> { self.crs.as_deref().map(Crs::new) }

    /// Source CRS of the input layers, defaulting to the working CRS.
    pub fn source_crs(&self) -> Option<Crs> {
        self.source_crs.as_deref().map(Crs::new).or_else(|| self.target_crs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cover::DEFAULT_OVERLAP;

    #[test]
    fn parses_partial_json() {
        let config: CoverConfig = serde_json::from_str(r#"{ "paper": "A3", "scale": 2000, "orientation": "landscape" }"#).unwrap();
        let footprint = config.footprint().unwrap();
        assert!((footprint.width() - 840.0).abs() < 1e-9);
        assert!((footprint.height() - 594.0).abs() < 1e-9);
        assert_eq!(config.options().unwrap().overlap(), DEFAULT_OVERLAP);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_json::from_str::<CoverConfig>(r#"{ "overlapp": 0.1 }"#).is_err());
    }

    #[test]
    fn explicit_page_size_wins_over_paper() {
        let config = CoverConfig {
            page_width: Some(100.0),
            page_height: Some(80.0),
            paper: Some("A0".into()),
            scale: Some(10_000.0),
            ..Default::default()
        };
        assert_eq!(config.footprint().unwrap(), PageFootprint::new(100.0, 80.0).unwrap());
    }

    #[test]
    fn missing_footprint_is_reported() {
        assert_eq!(CoverConfig::default().footprint(), Err(CoverError::MissingFootprint));
        let paper_only = CoverConfig { paper: Some("A4".into()), ..Default::default() };
        assert_eq!(paper_only.footprint(), Err(CoverError::MissingFootprint));
    }

    #[test]
    fn overrides_take_precedence() {
        let file = CoverConfig { overlap: Some(0.2), crs: Some("+proj=merc".into()), ..Default::default() };
        let flags = CoverConfig { overlap: Some(0.1), ..Default::default() };
        let merged = file.merged(flags);
        assert_eq!(merged.overlap, Some(0.1));
        assert_eq!(merged.target_crs(), Some(Crs::new("+proj=merc")));
        assert_eq!(merged.source_crs(), merged.target_crs());
    }

    #[test]
    fn paper_override_replaces_file_page_size() {
        let file = CoverConfig { page_width: Some(100.0), page_height: Some(80.0), ..Default::default() };
        let flags = CoverConfig { paper: Some("A4".into()), scale: Some(5000.0), ..Default::default() };

        let merged = file.merged(flags);
        assert_eq!(merged.page_width, None);
        let footprint = merged.footprint().unwrap();
        assert!((footprint.width() - 1050.0).abs() < 1e-9);
        assert!((footprint.height() - 1485.0).abs() < 1e-9);
    }

    #[test]
    fn page_size_override_replaces_file_paper() {
        let file = CoverConfig { paper: Some("A0".into()), scale: Some(10_000.0), ..Default::default() };
        let flags = CoverConfig { page_width: Some(100.0), page_height: Some(80.0), ..Default::default() };
        assert_eq!(file.merged(flags).footprint().unwrap(), PageFootprint::new(100.0, 80.0).unwrap());
    }

    #[test]
    fn file_scale_still_applies_to_orientation_override() {
        let file = CoverConfig { paper: Some("A4".into()), scale: Some(1000.0), ..Default::default() };
        let flags = CoverConfig { orientation: Some("landscape".into()), ..Default::default() };
        let footprint = file.merged(flags).footprint().unwrap();
        assert!((footprint.width() - 297.0).abs() < 1e-9);
    }

    #[test]
    fn orientation_override_keeps_file_page_size() {
        let file = CoverConfig { page_width: Some(100.0), page_height: Some(80.0), ..Default::default() };
        let flags = CoverConfig { orientation: Some("landscape".into()), ..Default::default() };
        assert_eq!(file.merged(flags).footprint().unwrap(), PageFootprint::new(100.0, 80.0).unwrap());
    }

    #[test]
    fn custom_paper_is_not_rotated_by_default() {
        let config = CoverConfig { paper: Some("400x300".into()), scale: Some(1000.0), ..Default::default() };
        assert_eq!(config.footprint().unwrap(), PageFootprint::new(400.0, 300.0).unwrap());
    }

    #[test]
    fn out_of_range_overlap_is_rejected() {
        let config = CoverConfig { overlap: Some(1.5), ..Default::default() };
        assert_eq!(config.options(), Err(CoverError::OverlapOutOfRange(1.5)));
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cover.json");
        fs::write(&path, r#"{ "page_width": 500, "page_height": 400, "overlap": 0.1 }"#).unwrap();
        let config = CoverConfig::from_path(&path).unwrap();
        assert_eq!(config.page_width, Some(500.0));
        assert_eq!(config.options().unwrap().overlap(), 0.1);
    }
}
