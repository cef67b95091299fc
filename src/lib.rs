#![doc = "plotcover: lay out print pages over selected map features"]
mod config;
mod cover;
mod crs;
mod error;
mod geom;
mod io;
mod layer;

#[doc(inline)]
pub use config::CoverConfig;

#[doc(inline)]
pub use cover::{
    uncovered, CoverOptions, CoverReport, GreedyGridPacker, Packing, PackingStrategy,
    RectangleCoverer, Tolerance, DEFAULT_OVERLAP,
};

#[doc(inline)]
pub use crs::{CoordTransform, Crs, Identity, Reprojector};

#[doc(inline)]
pub use error::CoverError;

#[doc(inline)]
pub use geom::{decompose, is_usable, Orientation, PageFootprint, PaperSize, Position};

#[doc(inline)]
pub use io::{
    pages_to_geojson, read_layer_from_geojson_bytes, read_layer_geojson, render_preview_svg,
    write_pages_geojson, write_preview_svg,
};

#[doc(inline)]
pub use layer::{Feature, FeatureLayer};
