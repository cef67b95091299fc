use std::fmt;

/// A coordinate reference system, identified by its PROJ.4 definition.
///
/// The definition is kept verbatim; it is only parsed (by `proj4rs`) when a
/// [`super::Reprojector`] is built from it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Crs {
    definition: String,
}

impl Crs {
    pub fn new(definition: impl Into<String>) -> Self {
        Self { definition: definition.into().trim().to_string() }
    }

    /// WGS84 longitude/latitude in degrees.
    pub fn wgs84() -> Self { Self::new("+proj=longlat +datum=WGS84 +no_defs +type=crs") }

    /// UTM zone on the WGS84 datum, in metres.
    pub fn utm(zone: u8, south: bool) -> Self {
        let south = if south { " +south" } else { "" };
        Self::new(format!("+proj=utm +zone={zone}{south} +datum=WGS84 +units=m +no_defs +type=crs"))
    }

    #[inline] pub fn definition(&self) -> &str { &self.definition }

    /// Whether coordinates in this CRS are angular (degrees on input/output).
    pub fn is_geographic(&self) -> bool {
        self.definition.split_whitespace()
            .any(|token| matches!(token, "+proj=longlat" | "+proj=latlong" | "+proj=lonlat" | "+proj=latlon"))
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.definition) }
}

impl From<&str> for Crs {
    fn from(definition: &str) -> Self { Self::new(definition) }
}
