use thiserror::Error;

/// Errors raised by the covering operations.
///
/// Degenerate input geometry and packing stalls are not errors; they are
/// reported through [`crate::CoverReport`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoverError {
    #[error("overlap fraction must lie in [0, 1], got {0}")]
    OverlapOutOfRange(f64),

    #[error("page footprint must be finite and positive, got {width} x {height}")]
    InvalidFootprint { width: f64, height: f64 },

    #[error("map scale must be finite and positive, got {0}")]
    InvalidScale(f64),

    #[error("unknown paper size '{0}' (expected A0..A5 or WIDTHxHEIGHT in mm)")]
    UnknownPaper(String),

    #[error("unknown orientation '{0}' (expected portrait or landscape)")]
    UnknownOrientation(String),

    #[error("no page footprint given; set a page size or a paper size with a scale")]
    MissingFootprint,

    #[error("projection error: {0}")]
    Projection(String),
}
