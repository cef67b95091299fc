use geo::{Coord, Rect};
use log::debug;

use crate::{
    cover::{Packing, PackingStrategy, Tolerance},
    geom::{PageFootprint, Position},
};

/// Greedy page placement, sweeping from the smallest `x_min` eastwards.
///
/// Each pass anchors on the remaining position with the smallest `x_min`
/// (first seen wins on ties), picks the lowest `y_min` among positions that
/// fit a page around the anchor, takes every position inside the
/// tolerance window above that row and centres one page on the group.
/// Packing stops when the positions run out or a pass removes nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyGridPacker;

impl PackingStrategy for GreedyGridPacker {
    fn pack(&self, positions: &[Position], footprint: &PageFootprint, tolerance: &Tolerance) -> Packing {
        let mut remaining = positions.to_vec();
        let mut rectangles = Vec::new();

        while let Some(anchor) = find_anchor(&remaining) {
            let xmin = anchor.x_min();

            let Some(ymin) = row_min_y(&remaining, &anchor, tolerance) else {
                debug!("[greedy] no position fits a page at anchor {anchor:?}; stopping");
                break
            };

            // Pull the group out of the working set, tracking its true extent.
            let (mut xmax, mut ymax) = (f64::NEG_INFINITY, f64::NEG_INFINITY);
            let before = remaining.len();
            remaining.retain(|position| {
                let in_group = xmin <= position.x_min()
                    && position.x_max() <= xmin + tolerance.width
                    && ymin <= position.y_min()
                    && position.y_min() <= ymin + tolerance.height;
                if in_group {
                    xmax = xmax.max(position.x_max());
                    ymax = ymax.max(position.y_max());
                }
                !in_group
            });

            let placed = before - remaining.len();
            if placed == 0 {
                debug!("[greedy] pass placed nothing at anchor {anchor:?}; stopping");
                break
            }

            let rect = page_around(footprint, xmin, ymin, xmax, ymax);
            debug!("[greedy] page {} holds {placed} positions, {} left", rectangles.len() + 1, remaining.len());
            rectangles.push(rect);
        }

        Packing { rectangles, unplaced: remaining }
    }
}

/// First remaining position with the smallest `x_min`.
#[inline]
fn find_anchor(positions: &[Position]) -> Option<Position> {
    positions.iter().copied()
        .reduce(|best, position| if position.x_min() < best.x_min() { position } else { best })
}

/// Lowest `y_min` among positions that lie wholly within the tolerance
/// window of the anchor's `x_min` and `y_min`.
fn row_min_y(positions: &[Position], anchor: &Position, tolerance: &Tolerance) -> Option<f64> {
    let (xmin, yxmin) = (anchor.x_min(), anchor.y_min());
    positions.iter()
        .filter(|position| {
            (position.x_min() - xmin).abs() <= tolerance.width
                && (position.x_max() - xmin).abs() <= tolerance.width
                && (position.y_min() - yxmin).abs() <= tolerance.height
                && (position.y_max() - yxmin).abs() <= tolerance.height
        })
        .map(|position| position.y_min())
        .reduce(f64::min)
}

/// A footprint-sized rectangle centred on the group extent.
fn page_around(footprint: &PageFootprint, xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Rect<f64> {
    let xpos = xmin - (footprint.width() - (xmax - xmin)) / 2.0;
    let ypos = ymin - (footprint.height() - (ymax - ymin)) / 2.0;
    Rect::new(
        Coord { x: xpos, y: ypos },
        Coord { x: xpos + footprint.width(), y: ypos + footprint.height() },
    )
}
