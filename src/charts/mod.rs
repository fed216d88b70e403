//! Charts module - Chart rendering

mod map;
mod plotter;

pub use map::ChoroplethMap;
pub use plotter::ChartPlotter;
