use geo::Coord;
use proj4rs::{proj::Proj as Proj4, transform::transform};

use crate::{crs::Crs, CoverError};

/// Point-wise coordinate transform into the working CRS.
pub trait CoordTransform {
    fn transform(&self, coord: Coord<f64>) -> Result<Coord<f64>, CoverError>;
}

/// Leaves coordinates untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl CoordTransform for Identity {
    #[inline]
    fn transform(&self, coord: Coord<f64>) -> Result<Coord<f64>, CoverError> { Ok(coord) }
}

/// Transforms coordinates between two PROJ.4 reference systems.
pub enum Reprojector {
    Identity,
    Proj {
        from: Box<Proj4>,
        to: Box<Proj4>,
        from_geographic: bool,
        to_geographic: bool,
    },
}

impl Reprojector {
    pub fn new(source: &Crs, target: &Crs) -> Result<Self, CoverError> {
        if source == target { return Ok(Reprojector::Identity) }

        let build = |crs: &Crs| Proj4::from_proj_string(crs.definition())
            .map(Box::new)
            .map_err(|err| CoverError::Projection(format!("invalid PROJ.4 definition '{crs}': {err}")));

        Ok(Reprojector::Proj {
            from: build(source)?,
            to: build(target)?,
            from_geographic: source.is_geographic(),
            to_geographic: target.is_geographic(),
        })
    }

    #[inline]
    pub fn is_identity(&self) -> bool { matches!(self, Reprojector::Identity) }
}

impl CoordTransform for Reprojector {
    fn transform(&self, coord: Coord<f64>) -> Result<Coord<f64>, CoverError> {
        let Reprojector::Proj { from, to, from_geographic, to_geographic } = self else {
            return Ok(coord)
        };

        // proj4rs works in radians for geographic systems.
        let mut point = if *from_geographic { (coord.x.to_radians(), coord.y.to_radians(), 0.0) }
            else { (coord.x, coord.y, 0.0) };

        transform(from, to, &mut point)
            .map_err(|err| CoverError::Projection(format!("failed to transform ({}, {}): {err}", coord.x, coord.y)))?;

        Ok(if *to_geographic { Coord { x: point.0.to_degrees(), y: point.1.to_degrees() } }
            else { Coord { x: point.0, y: point.1 } })
    }
}
