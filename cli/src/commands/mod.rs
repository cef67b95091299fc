pub mod cover;
pub mod footprint;
