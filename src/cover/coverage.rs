use geo::Rect;
use rstar::{RTree, RTreeObject, AABB};

use crate::geom::Position;

/// A page rectangle in an R-tree.
#[derive(Debug, Clone)]
struct PageBox(Rect<f64>);

impl RTreeObject for PageBox {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners(self.0.min().into(), self.0.max().into())
    }
}

/// Positions whose extent is not wholly inside any single rectangle.
pub fn uncovered(positions: &[Position], rectangles: &[Rect<f64>]) -> Vec<Position> {
    let rtree = RTree::bulk_load(rectangles.iter().copied().map(PageBox).collect());

    positions.iter()
        .filter(|position| !rtree.locate_in_envelope_intersecting(&position.envelope())
            .any(|page| position.is_within(&page.0)))
        .copied()
        .collect()
}
