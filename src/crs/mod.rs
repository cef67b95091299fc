mod crs;
mod transform;

pub use crs::Crs;
pub use transform::{CoordTransform, Identity, Reprojector};
