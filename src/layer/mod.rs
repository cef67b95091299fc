mod feature;
mod layer;

pub use feature::Feature;
pub use layer::FeatureLayer;
