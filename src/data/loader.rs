//! Spreadsheet Loader Module
//! Reads the first worksheet of an uploaded workbook into a Polars DataFrame.

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use polars::prelude::*;
use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse spreadsheet: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("Spreadsheet contains no worksheets")]
    NoSheet,
    #[error("Worksheet has no header row")]
    NoHeader,
    #[error("Failed to build table: {0}")]
    Table(#[from] PolarsError),
}

/// A single cell reduced to what the pipeline cares about.
#[derive(Debug, Clone, PartialEq)]
enum RawCell {
    Number(f64),
    Text(String),
    Empty,
}

impl RawCell {
    fn from_data(cell: &Data) -> Self {
        match cell {
            Data::Empty | Data::Error(_) => RawCell::Empty,
            Data::Int(v) => RawCell::Number(*v as f64),
            Data::Float(v) => RawCell::Number(*v),
            Data::DateTime(dt) => RawCell::Number(dt.as_f64()),
            Data::Bool(b) => RawCell::Text(b.to_string()),
            Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
                if s.trim().is_empty() {
                    RawCell::Empty
                } else {
                    RawCell::Text(s.clone())
                }
            }
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, RawCell::Empty)
    }

    fn as_text(&self) -> Option<String> {
        match self {
            RawCell::Number(v) => Some(format_number(*v)),
            RawCell::Text(s) => Some(s.clone()),
            RawCell::Empty => None,
        }
    }
}

/// Render a number the way a spreadsheet shows it: integers without a
/// trailing ".0".
pub(crate) fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        v.to_string()
    }
}

/// Reads workbook bytes into a DataFrame keyed by the original header text.
pub struct WorkbookLoader;

impl WorkbookLoader {
    /// Read a workbook file from disk.
    pub fn read_file(path: &Path) -> Result<Vec<u8>, LoaderError> {
        Ok(std::fs::read(path)?)
    }

    /// Parse the first worksheet of a workbook.
    ///
    /// The first non-empty row is the header. Columns whose non-empty cells
    /// are all numeric become `Float64`; every other column becomes `String`
    /// with numbers rendered as text.
    pub fn read_first_sheet(bytes: &[u8]) -> Result<DataFrame, LoaderError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(LoaderError::NoSheet)??;

        let mut rows = range
            .rows()
            .map(|row| row.iter().map(RawCell::from_data).collect::<Vec<_>>())
            .filter(|row| row.iter().any(|cell| !cell.is_empty()));

        let header_row = rows.next().ok_or(LoaderError::NoHeader)?;
        let headers = Self::header_names(&header_row);
        let body: Vec<Vec<RawCell>> = rows.collect();

        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(idx, name)| {
                let cells: Vec<&RawCell> = body
                    .iter()
                    .map(|row| row.get(idx).unwrap_or(&RawCell::Empty))
                    .collect();
                Self::build_column(name, &cells)
            })
            .collect::<Vec<_>>();

        Ok(DataFrame::new(columns)?)
    }

    /// Header text as written, with blanks and duplicates made unique.
    fn header_names(header_row: &[RawCell]) -> Vec<String> {
        let mut seen: HashSet<String> = HashSet::new();
        header_row
            .iter()
            .enumerate()
            .map(|(idx, cell)| {
                let base = cell
                    .as_text()
                    .unwrap_or_else(|| format!("Unnamed: {}", idx));
                let mut name = base.clone();
                let mut suffix = 1;
                while !seen.insert(name.clone()) {
                    name = format!("{}.{}", base, suffix);
                    suffix += 1;
                }
                name
            })
            .collect()
    }

    fn build_column(name: String, cells: &[&RawCell]) -> Column {
        let all_numeric = cells
            .iter()
            .all(|cell| matches!(cell, RawCell::Number(_) | RawCell::Empty));

        if all_numeric {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| match cell {
                    RawCell::Number(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Column::new(name.into(), values)
        } else {
            let values: Vec<Option<String>> = cells.iter().map(|cell| cell.as_text()).collect();
            Column::new(name.into(), values)
        }
    }
}
