use geo::Rect;

use crate::geom::Position;

/// Outcome of a covering run.
///
/// Besides the page rectangles it records what the run could not account
/// for, so callers can tell an incomplete overview from a complete one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoverReport {
    /// Page rectangles in the working CRS, in placement order.
    pub rectangles: Vec<Rect<f64>>,
    /// Input geometries dropped as null, empty, invalid or not projectable.
    pub skipped_geometries: usize,
    /// Positions produced by decomposition.
    pub positions: usize,
    /// Positions left over when packing stalled; no page was made for them.
    pub unplaced: Vec<Position>,
    /// Positions, placed or not, that no single page fully contains.
    pub uncovered: Vec<Position>,
}

impl CoverReport {
    #[inline] pub fn len(&self) -> usize { self.rectangles.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.rectangles.is_empty() }

    /// True when every input geometry ended up fully inside some page.
    pub fn is_complete(&self) -> bool {
        self.skipped_geometries == 0 && self.unplaced.is_empty() && self.uncovered.is_empty()
    }

    /// Pages numbered from 1.
    pub fn pages(&self) -> impl Iterator<Item = (usize, &Rect<f64>)> {
        self.rectangles.iter().enumerate().map(|(i, rect)| (i + 1, rect))
    }
}
