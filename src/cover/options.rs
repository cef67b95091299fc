use crate::{geom::PageFootprint, CoverError};

/// Default share of a page by which neighbouring pages overlap.
pub const DEFAULT_OVERLAP: f64 = 0.075;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverOptions {
    overlap: f64,
}

impl CoverOptions {
    /// `overlap` must lie in `[0, 1]`.
    pub fn new(overlap: f64) -> Result<Self, CoverError> {
        if !(0.0..=1.0).contains(&overlap) { return Err(CoverError::OverlapOutOfRange(overlap)) }
        Ok(Self { overlap })
    }

    #[inline] pub fn overlap(&self) -> f64 { self.overlap }

    /// Grouping tolerance for a footprint under these options.
    pub fn tolerance(&self, footprint: &PageFootprint) -> Tolerance {
        Tolerance {
            width: footprint.width() * (1.0 - self.overlap),
            height: footprint.height() * (1.0 - self.overlap),
        }
    }
}

impl Default for CoverOptions {
    fn default() -> Self { Self { overlap: DEFAULT_OVERLAP } }
}

/// Largest extent-to-extent distance, per axis, at which positions still share a page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub width: f64,
    pub height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_bounds_are_inclusive() {
        assert!(CoverOptions::new(0.0).is_ok());
        assert!(CoverOptions::new(1.0).is_ok());
        assert_eq!(CoverOptions::new(1.5), Err(CoverError::OverlapOutOfRange(1.5)));
        assert_eq!(CoverOptions::new(-0.1), Err(CoverError::OverlapOutOfRange(-0.1)));
        assert!(CoverOptions::new(f64::NAN).is_err());
    }

    #[test]
    fn tolerance_shrinks_page_by_overlap() {
        let footprint = PageFootprint::new(200.0, 100.0).unwrap();
        let tolerance = CoverOptions::new(0.25).unwrap().tolerance(&footprint);
        assert_eq!(tolerance, Tolerance { width: 150.0, height: 75.0 });
        assert_eq!(CoverOptions::default().overlap(), DEFAULT_OVERLAP);
    }
}
