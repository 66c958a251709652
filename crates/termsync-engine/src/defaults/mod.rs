//! Default declarations: normalisation and the engine-owned side table.

mod normalizer;
mod table;

pub use normalizer::{normalize, GroupDefaults};
pub use table::DefaultsTable;
