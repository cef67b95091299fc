use geo::Geometry;

/// A feature of a source layer. A missing geometry models a null geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: u64,
    pub geometry: Option<Geometry<f64>>,
}

impl Feature {
    pub fn new(id: u64, geometry: impl Into<Geometry<f64>>) -> Self {
        Self { id, geometry: Some(geometry.into()) }
    }

    /// A feature without geometry.
    pub fn null(id: u64) -> Self { Self { id, geometry: None } }
}
