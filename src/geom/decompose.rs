use geo::{BoundingRect, Coord, Geometry, LineString};
use log::debug;

use crate::geom::{PageFootprint, Position};

/// Split a geometry, already in the working CRS, into positions the packer can place.
///
/// Points yield a single degenerate position. Lines are walked vertex to
/// vertex and each segment longer than `footprint.height() * overlap` is cut
/// into `ceil(len / max_len)` equal fragments. Every other geometry yields its
/// bounding box, however large.
pub fn decompose(geometry: &Geometry<f64>, footprint: &PageFootprint, overlap: f64) -> Vec<Position> {
    let max_len = footprint.height() * overlap;
    let mut positions = Vec::new();

    match geometry {
        Geometry::Point(point) => positions.push(Position::from_point(point.0)),
        Geometry::Line(line) => push_segment(&mut positions, line.start, line.end, max_len),
        Geometry::LineString(line) => push_line(&mut positions, line, max_len),
        Geometry::MultiLineString(lines) => {
            for line in lines { push_line(&mut positions, line, max_len) }
        }
        other => {
            if let Some(rect) = other.bounding_rect() { positions.push(Position::from_rect(rect)) }
        }
    }

    positions
}

fn push_line(positions: &mut Vec<Position>, line: &LineString<f64>, max_len: f64) {
    for segment in line.lines() {
        push_segment(positions, segment.start, segment.end, max_len);
    }
}

/// Upper bound on the fragments cut from one segment.
const MAX_FRAGMENTS: f64 = 1_000_000.0;

/// Number of equal fragments a segment of `length` is cut into.
/// A segment that would need more than `MAX_FRAGMENTS` (or whose length
/// overflowed) stays whole and is left to the packer as an oversized position.
#[inline]
pub(crate) fn fragment_count(length: f64, max_len: f64) -> usize {
    if max_len <= 0.0 || length <= max_len { return 1 }

    let parts = (length / max_len).ceil();
    if !parts.is_finite() || parts > MAX_FRAGMENTS {
        debug!("[decompose] segment of length {length} too long to split into {max_len} fragments");
        return 1
    }
    parts as usize
}

fn push_segment(positions: &mut Vec<Position>, start: Coord<f64>, end: Coord<f64>, max_len: f64) {
    let delta = end - start;
    let parts = fragment_count(delta.x.hypot(delta.y), max_len);

    let mut from = start;
    for n in 1..parts {
        let t = n as f64 / parts as f64;
        let to = Coord { x: start.x + delta.x * t, y: start.y + delta.y * t };
        positions.push(Position::from_segment(from, to));
        from = to;
    }
    positions.push(Position::from_segment(from, end));
}
