use std::{borrow::Cow, collections::hash_map::Entry};

use ahash::AHashMap;
use geo::{Geometry, MapCoords};
use log::{debug, info, warn};

use crate::{
    cover::{uncovered, CoverOptions, CoverReport, GreedyGridPacker, PackingStrategy},
    crs::{CoordTransform, Crs, Reprojector},
    geom::{decompose, has_finite_coords, is_usable, PageFootprint, Position},
    layer::FeatureLayer,
    CoverError,
};

/// Covers selected feature geometries with page-sized rectangles in a working CRS.
#[derive(Debug, Clone)]
pub struct RectangleCoverer<S = GreedyGridPacker> {
    crs: Crs,
    footprint: PageFootprint,
    options: CoverOptions,
    strategy: S,
}

impl RectangleCoverer {
    pub fn new(crs: Crs, footprint: PageFootprint, options: CoverOptions) -> Self {
        Self { crs, footprint, options, strategy: GreedyGridPacker }
    }

    /// Build a coverer, rejecting an overlap outside `[0, 1]`.
    pub fn with_overlap(crs: Crs, footprint: PageFootprint, overlap: f64) -> Result<Self, CoverError> {
        Ok(Self::new(crs, footprint, CoverOptions::new(overlap)?))
    }
}

impl<S: PackingStrategy> RectangleCoverer<S> {
    /// Swap the packing heuristic.
    pub fn with_strategy<T: PackingStrategy>(self, strategy: T) -> RectangleCoverer<T> {
        RectangleCoverer { crs: self.crs, footprint: self.footprint, options: self.options, strategy }
    }

    #[inline] pub fn crs(&self) -> &Crs { &self.crs }
    #[inline] pub fn footprint(&self) -> &PageFootprint { &self.footprint }
    #[inline] pub fn options(&self) -> &CoverOptions { &self.options }

    /// Decompose `(geometry, source CRS)` pairs into positions in the working CRS.
    /// Returns the positions and the number of geometries skipped.
    pub fn positions<'a, I>(&self, inputs: I) -> Result<(Vec<Position>, usize), CoverError>
    where
        I: IntoIterator<Item = (Option<&'a Geometry<f64>>, &'a Crs)>,
    {
        let mut reprojectors = AHashMap::<&Crs, Reprojector>::new();
        let mut positions = Vec::new();
        let mut skipped = 0;

        for (geometry, source) in inputs {
            let reprojector: &Reprojector = match reprojectors.entry(source) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(Reprojector::new(source, &self.crs)?),
            };

            match geometry.filter(|geometry| is_usable(Some(*geometry)))
                .and_then(|geometry| reproject(geometry, reprojector))
            {
                Some(geometry) => positions.extend(decompose(&geometry, &self.footprint, self.options.overlap())),
                None => skipped += 1,
            }
        }

        Ok((positions, skipped))
    }

    /// Cover arbitrary geometries, each tagged with its source CRS.
    pub fn cover_geometries<'a, I>(&self, inputs: I) -> Result<CoverReport, CoverError>
    where
        I: IntoIterator<Item = (Option<&'a Geometry<f64>>, &'a Crs)>,
    {
        let (positions, skipped_geometries) = self.positions(inputs)?;
        Ok(self.cover_positions(&positions, skipped_geometries))
    }

    /// Cover the selected features of every layer.
    pub fn cover_layers(&self, layers: &[FeatureLayer]) -> Result<CoverReport, CoverError> {
        let inputs = layers.iter().flat_map(|layer| {
            debug!("[cover] layer '{}': {} of {} features selected", layer.name(), layer.selected_count(), layer.len());
            layer.selected_features().map(move |feature| (feature.geometry.as_ref(), layer.crs()))
        });
        self.cover_geometries(inputs)
    }

    /// Usable selected geometries of `layers`, reprojected into the working CRS.
    pub fn reprojected(&self, layers: &[FeatureLayer]) -> Result<Vec<Geometry<f64>>, CoverError> {
        let mut geometries = Vec::new();
        for layer in layers {
            let reprojector = Reprojector::new(layer.crs(), &self.crs)?;
            geometries.extend(layer.selected_features()
                .filter_map(|feature| feature.geometry.as_ref())
                .filter(|geometry| is_usable(Some(*geometry)))
                .filter_map(|geometry| reproject(geometry, &reprojector))
                .map(Cow::into_owned));
        }
        Ok(geometries)
    }

    /// Pack already decomposed positions.
    pub fn cover_positions(&self, positions: &[Position], skipped_geometries: usize) -> CoverReport {
        let tolerance = self.options.tolerance(&self.footprint);
        let packing = self.strategy.pack(positions, &self.footprint, &tolerance);
        let uncovered = uncovered(positions, &packing.rectangles);

        info!("[cover] {} positions -> {} pages ({} geometries skipped)",
            positions.len(), packing.rectangles.len(), skipped_geometries);
        if !packing.unplaced.is_empty() {
            warn!("[cover] packing stalled; {} positions were left without a page", packing.unplaced.len());
        }
        if !uncovered.is_empty() {
            warn!("[cover] {} positions are not fully inside any page", uncovered.len());
        }

        CoverReport {
            rectangles: packing.rectangles,
            skipped_geometries,
            positions: positions.len(),
            unplaced: packing.unplaced,
            uncovered,
        }
    }
}

/// Reproject a geometry, or `None` when a coordinate fails to transform or
/// lands on a non-finite value.
fn reproject<'g>(geometry: &'g Geometry<f64>, reprojector: &Reprojector) -> Option<Cow<'g, Geometry<f64>>> {
    if reprojector.is_identity() { return Some(Cow::Borrowed(geometry)) }

    let projected = geometry.try_map_coords(|coord| reprojector.transform(coord))
        .inspect_err(|err| debug!("[cover] skipping geometry: {err}"))
        .ok()?;

    if !has_finite_coords(&projected) {
        debug!("[cover] skipping geometry with non-finite projected coordinates");
        return None
    }
    Some(Cow::Owned(projected))
}
