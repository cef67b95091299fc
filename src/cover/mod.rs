mod coverage;
mod coverer;
mod greedy;
mod options;
mod report;
mod strategy;

pub use coverage::uncovered;
pub use coverer::RectangleCoverer;
pub use greedy::GreedyGridPacker;
pub use options::{CoverOptions, Tolerance, DEFAULT_OVERLAP};
pub use report::CoverReport;
pub use strategy::{Packing, PackingStrategy};
