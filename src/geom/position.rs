use geo::{Coord, Rect};
use rstar::{RTreeObject, AABB};

/// An axis-aligned extent derived from a feature geometry or a line fragment.
/// Positions are the unit the packer groups into pages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    x_min: f64,
    y_min: f64,
    x_max: f64,
    y_max: f64,
}

impl Position {
    /// Create a position from two opposite corners, in any order.
    pub fn new(a: Coord<f64>, b: Coord<f64>) -> Self {
        Self {
            x_min: a.x.min(b.x),
            y_min: a.y.min(b.y),
            x_max: a.x.max(b.x),
            y_max: a.y.max(b.y),
        }
    }

    /// Degenerate zero-area extent at a single point.
    pub fn from_point(coord: Coord<f64>) -> Self { Self::new(coord, coord) }

    /// Extent bounding a straight segment.
    pub fn from_segment(start: Coord<f64>, end: Coord<f64>) -> Self { Self::new(start, end) }

    pub fn from_rect(rect: Rect<f64>) -> Self { Self::new(rect.min(), rect.max()) }

    #[inline] pub fn x_min(&self) -> f64 { self.x_min }
    #[inline] pub fn y_min(&self) -> f64 { self.y_min }
    #[inline] pub fn x_max(&self) -> f64 { self.x_max }
    #[inline] pub fn y_max(&self) -> f64 { self.y_max }

    #[inline] pub fn width(&self) -> f64 { self.x_max - self.x_min }
    #[inline] pub fn height(&self) -> f64 { self.y_max - self.y_min }

    /// The extent as a `geo::Rect`.
    pub fn rect(&self) -> Rect<f64> {
        Rect::new(
            Coord { x: self.x_min, y: self.y_min },
            Coord { x: self.x_max, y: self.y_max },
        )
    }

    /// Check whether the extent lies fully inside `rect` (boundary inclusive).
    pub fn is_within(&self, rect: &Rect<f64>) -> bool {
        rect.min().x <= self.x_min && self.x_max <= rect.max().x
            && rect.min().y <= self.y_min && self.y_max <= rect.max().y
    }
}

impl RTreeObject for Position {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_corners([self.x_min, self.y_min], [self.x_max, self.y_max])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_normalized() {
        let position = Position::new(Coord { x: 5.0, y: -1.0 }, Coord { x: 2.0, y: 3.0 });
        assert_eq!(position.x_min(), 2.0);
        assert_eq!(position.y_min(), -1.0);
        assert_eq!(position.x_max(), 5.0);
        assert_eq!(position.y_max(), 3.0);
        assert_eq!(position.width(), 3.0);
        assert_eq!(position.height(), 4.0);
    }

    #[test]
    fn point_position_is_degenerate() {
        let position = Position::from_point(Coord { x: 7.5, y: 8.5 });
        assert_eq!(position.width(), 0.0);
        assert_eq!(position.height(), 0.0);
        assert!(position.is_within(&Rect::new(Coord { x: 7.5, y: 8.5 }, Coord { x: 7.5, y: 8.5 })));
    }

    #[test]
    fn containment_is_boundary_inclusive() {
        let rect = Rect::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 10.0 });
        assert!(Position::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 10.0, y: 10.0 }).is_within(&rect));
        assert!(!Position::new(Coord { x: 0.0, y: 0.0 }, Coord { x: 10.1, y: 10.0 }).is_within(&rect));
    }
}
