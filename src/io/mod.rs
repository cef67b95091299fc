//! File formats for feeding layers in and getting pages out.
//!
//! - `geojson` - feature layers in, page rectangles out
//! - `svg` - preview of pages drawn over the covered features
//! - `fs` - write-then-rename output files

mod fs;
mod geojson;
mod svg;

pub use geojson::{pages_to_geojson, read_layer_from_geojson_bytes, read_layer_geojson, write_pages_geojson};
pub use svg::{render_preview_svg, write_preview_svg};
