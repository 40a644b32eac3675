//! Filtering: the type registry and the hierarchical filter walk.

mod hierarchy;
mod types;

pub use hierarchy::{filter_forest, FilterContext};
pub use types::{resolve, FilterFn, FilterTypes, TEXT_FILTER};
