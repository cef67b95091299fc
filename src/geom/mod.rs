mod decompose;
mod footprint;
mod position;
mod validity;

pub use decompose::decompose;
pub use footprint::{Orientation, PageFootprint, PaperSize};
pub use position::Position;
pub use validity::is_usable;
pub(crate) use validity::has_finite_coords;
