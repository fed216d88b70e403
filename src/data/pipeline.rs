//! Load → normalize → clean, as one call per uploaded file.

use super::loader::{LoaderError, WorkbookLoader};
use super::processor::{CleanReport, DataProcessor, ProcessorError};
use super::table::CleanTable;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Loader(#[from] LoaderError),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
}

/// A cleaned table together with the counts from cleaning it.
#[derive(Debug, Clone)]
pub struct PreparedTable {
    pub table: CleanTable,
    pub report: CleanReport,
}

/// Run the preparation pipeline over raw workbook bytes.
pub fn prepare(bytes: &[u8]) -> Result<PreparedTable, PipelineError> {
    let raw = WorkbookLoader::read_first_sheet(bytes)?;
    info!(rows = raw.height(), columns = raw.width(), "Parsed worksheet");

    let normalized = DataProcessor::normalize(raw)?;
    let (table, report) = DataProcessor::clean(normalized)?;
    info!("{}", report.summary());

    Ok(PreparedTable { table, report })
}
