use std::{fmt, str::FromStr};

use geo::{Coord, Rect};

use crate::CoverError;

/// Fixed size of one printable page's map frame, in working CRS units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFootprint {
    width: f64,
    height: f64,
}

impl PageFootprint {
    pub fn new(width: f64, height: f64) -> Result<Self, CoverError> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(CoverError::InvalidFootprint { width, height })
        }
        Ok(Self { width, height })
    }

    /// Ground extent of a paper map frame printed at `1:scale`.
    /// Paper sizes are in millimetres, the result in metres.
    ///
    /// Without an orientation, named sizes are portrait and custom sizes keep
    /// their width and height as given.
    pub fn from_paper(
        paper: PaperSize,
        orientation: impl Into<Option<Orientation>>,
        scale: f64,
    ) -> Result<Self, CoverError> {
        if !(scale.is_finite() && scale > 0.0) { return Err(CoverError::InvalidScale(scale)) }

        let dimensions = paper.dimensions_mm();
        let (width_mm, height_mm) = match orientation.into() {
            Some(orientation) => orientation.apply(dimensions),
            None => dimensions,
        };
        Self::new(width_mm / 1000.0 * scale, height_mm / 1000.0 * scale)
    }

    #[inline] pub fn width(&self) -> f64 { self.width }
    #[inline] pub fn height(&self) -> f64 { self.height }

    /// A footprint-sized rectangle centred on `center`.
    pub fn centered_at(&self, center: Coord<f64>) -> Rect<f64> {
        let half = Coord { x: self.width / 2.0, y: self.height / 2.0 };
        Rect::new(center - half, center + half)
    }
}

/// Paper formats for the printed map frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PaperSize {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    Custom { width_mm: f64, height_mm: f64 },
}

impl PaperSize {
    /// (width, height) in millimetres; portrait for the named sizes.
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match *self {
            PaperSize::A0 => (841.0, 1189.0),
            PaperSize::A1 => (594.0, 841.0),
            PaperSize::A2 => (420.0, 594.0),
            PaperSize::A3 => (297.0, 420.0),
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::A5 => (148.0, 210.0),
            PaperSize::Custom { width_mm, height_mm } => (width_mm, height_mm),
        }
    }
}

impl FromStr for PaperSize {
    type Err = CoverError;

    /// Accepts `A0`..`A5` (any case) or `WIDTHxHEIGHT` in millimetres.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || CoverError::UnknownPaper(s.to_string());
        match s.trim().to_ascii_uppercase().as_str() {
            "A0" => Ok(PaperSize::A0),
            "A1" => Ok(PaperSize::A1),
            "A2" => Ok(PaperSize::A2),
            "A3" => Ok(PaperSize::A3),
            "A4" => Ok(PaperSize::A4),
            "A5" => Ok(PaperSize::A5),
            other => {
                let (w, h) = other.split_once('X').ok_or_else(unknown)?;
                let width_mm = w.trim().parse::<f64>().map_err(|_| unknown())?;
                let height_mm = h.trim().parse::<f64>().map_err(|_| unknown())?;
                Ok(PaperSize::Custom { width_mm, height_mm })
            }
        }
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaperSize::Custom { width_mm, height_mm } => write!(f, "{width_mm}x{height_mm}"),
            named => write!(f, "{named:?}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// Orient portrait (width, height) dimensions.
    fn apply(&self, (short, long): (f64, f64)) -> (f64, f64) {
        let (short, long) = (short.min(long), short.max(long));
        match self {
            Orientation::Portrait => (short, long),
            Orientation::Landscape => (long, short),
        }
    }
}

impl FromStr for Orientation {
    type Err = CoverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "portrait" | "p" => Ok(Orientation::Portrait),
            "landscape" | "l" => Ok(Orientation::Landscape),
            _ => Err(CoverError::UnknownOrientation(s.to_string())),
        }
    }
}
