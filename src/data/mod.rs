//! Data module - spreadsheet loading, cleaning and caching

mod cache;
mod loader;
mod pipeline;
mod processor;
mod table;

pub use cache::{content_key, TableCache};
pub use loader::{LoaderError, WorkbookLoader};
pub use pipeline::{prepare, PipelineError, PreparedTable};
pub use processor::{CleanReport, DataProcessor, ProcessorError};
pub use table::CleanTable;
pub(crate) use table::{
    float_values, text_values, MILLIONAIRES, MILLIONAIRE_DENSITY, POPULATION, POVERTY, POVERTY_RATE,
    STATE,
};
#[cfg(test)]
pub(crate) use pipeline::tests::prepared_fixture;
