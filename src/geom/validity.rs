use geo::{CoordsIter, Geometry, Validation};

/// Whether a geometry can contribute positions: present, non-empty,
/// topologically valid and free of `inf`/`nan` coordinates.
pub fn is_usable(geometry: Option<&Geometry<f64>>) -> bool {
    match geometry {
        None => false,
        Some(geometry) => !is_empty(geometry) && has_finite_coords(geometry) && geometry.is_valid(),
    }
}

#[inline]
pub(crate) fn is_empty(geometry: &Geometry<f64>) -> bool {
    geometry.coords_count() == 0
}

#[inline]
pub(crate) fn has_finite_coords(geometry: &Geometry<f64>) -> bool {
    geometry.coords_iter().all(|coord| coord.x.is_finite() && coord.y.is_finite())
}

#[cfg(test)]
mod tests {
    use geo::{line_string, point, polygon, LineString, MultiPoint, Point};

    use super::*;

    #[test]
    fn null_and_empty_are_unusable() {
        assert!(!is_usable(None));
        assert!(!is_usable(Some(&Geometry::LineString(LineString::new(vec![])))));
        assert!(!is_usable(Some(&Geometry::MultiPoint(MultiPoint::new(vec![])))));
    }

    #[test]
    fn non_finite_coordinates_are_unusable() {
        assert!(!is_usable(Some(&Geometry::Point(Point::new(f64::NAN, 1.0)))));
        assert!(!is_usable(Some(&Geometry::Point(Point::new(1.0, f64::INFINITY)))));
    }

    #[test]
    fn self_intersecting_polygon_is_unusable() {
        let bowtie = polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 10.0), (x: 10.0, y: 0.0), (x: 0.0, y: 10.0)];
        assert!(!is_usable(Some(&Geometry::Polygon(bowtie))));
    }

    #[test]
    fn simple_shapes_are_usable() {
        assert!(is_usable(Some(&Geometry::Point(point!(x: 1.0, y: 2.0)))));
        assert!(is_usable(Some(&Geometry::LineString(line_string![(x: 0.0, y: 0.0), (x: 5.0, y: 5.0)]))));
        let square = polygon![(x: 0.0, y: 0.0), (x: 4.0, y: 0.0), (x: 4.0, y: 4.0), (x: 0.0, y: 4.0)];
        assert!(is_usable(Some(&Geometry::Polygon(square))));
    }
}
