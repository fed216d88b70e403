//! Views module - per-tab view models built from the cleaned table

mod comparison;
mod density;
pub mod geo;
mod rate;
mod selection;

pub use comparison::{ComparisonOutcome, ComparisonView};
pub use density::{DensityEntry, DensityView};
pub use rate::{RateEntry, RateView};
pub use selection::{StateSelection, DEFAULT_SELECTION_COUNT, MIN_COMPARISON_STATES};
