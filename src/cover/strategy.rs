use geo::Rect;

use crate::{cover::Tolerance, geom::{PageFootprint, Position}};

/// Turns positions into footprint-sized page rectangles.
///
/// Implementations must not assume ownership of `positions`; any consuming
/// state lives in a working copy owned by the call.
pub trait PackingStrategy {
    fn pack(&self, positions: &[Position], footprint: &PageFootprint, tolerance: &Tolerance) -> Packing;
}

/// Result of one packing run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Packing {
    /// Page rectangles in emission order.
    pub rectangles: Vec<Rect<f64>>,
    /// Positions left over when packing stopped making progress.
    pub unplaced: Vec<Position>,
}
