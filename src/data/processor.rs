//! Data Processor Module
//! Handles column normalization, cleaning and derived ratios.

use super::loader::format_number;
use super::table::{
    CleanTable, MILLIONAIRES, MILLIONAIRE_DENSITY, POPULATION, POVERTY, POVERTY_RATE,
    REQUIRED_COLUMNS, STATE,
};
use polars::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

/// Source header → canonical name. The population header is misspelled in
/// the published dataset and must be matched as written.
pub const SOURCE_HEADERS: [(&str, &str); 4] = [
    ("State", STATE),
    ("Number in Poverty", POVERTY),
    ("Number of Millionaires", MILLIONAIRES),
    ("State Popiulation", POPULATION),
];

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Required column '{source_header}' not found (needed for '{canonical}')")]
    MissingColumn {
        source_header: String,
        canonical: String,
    },
}

/// Row counts produced by the cleaning step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanReport {
    pub rows_read: usize,
    pub rows_kept: usize,
    pub dropped_missing: usize,
    pub dropped_population: usize,
}

impl CleanReport {
    pub fn summary(&self) -> String {
        let mut text = format!("Loaded {} of {} rows", self.rows_kept, self.rows_read);
        if self.dropped_missing > 0 {
            text.push_str(&format!(", {} with missing values", self.dropped_missing));
        }
        if self.dropped_population > 0 {
            text.push_str(&format!(
                ", {} with non-positive population",
                self.dropped_population
            ));
        }
        text
    }
}

/// Handles data cleaning and transformation operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Rename the expected headers to canonical names and coerce the numeric
    /// columns. Unparseable values become null.
    pub fn normalize(mut df: DataFrame) -> Result<DataFrame, ProcessorError> {
        for (source, canonical) in SOURCE_HEADERS {
            if df.get_column_index(source).is_none() {
                return Err(ProcessorError::MissingColumn {
                    source_header: source.to_string(),
                    canonical: canonical.to_string(),
                });
            }
        }

        for (source, canonical) in SOURCE_HEADERS {
            df.rename(source, canonical.into())?;
        }

        let state = Self::coerce_text(df.column(STATE)?)?;
        df.with_column(state)?;

        for name in [POVERTY, MILLIONAIRES, POPULATION] {
            let coerced = Self::coerce_numeric(df.column(name)?)?;
            df.with_column(coerced)?;
        }

        Ok(df)
    }

    /// Drop rows missing any required value, then rows whose population is
    /// not positive. Only the canonical columns are kept.
    pub fn clean(df: DataFrame) -> Result<(CleanTable, CleanReport), ProcessorError> {
        let rows_read = df.height();

        let all_present = REQUIRED_COLUMNS
            .iter()
            .map(|name| col(*name).is_not_null())
            .reduce(|acc, expr| acc.and(expr))
            .unwrap_or_else(|| lit(true));

        let complete = df
            .lazy()
            .select(REQUIRED_COLUMNS.iter().map(|name| col(*name)).collect::<Vec<_>>())
            .filter(all_present)
            .collect()?;
        let dropped_missing = rows_read - complete.height();

        let after_missing = complete.height();
        let valid = complete
            .lazy()
            .filter(col(POPULATION).gt(lit(0.0)))
            .collect()?;
        let dropped_population = after_missing - valid.height();

        if dropped_missing > 0 {
            warn!(dropped_missing, "Dropped rows with missing or non-numeric values");
        }
        if dropped_population > 0 {
            warn!(dropped_population, "Dropped rows with non-positive population");
        }

        let report = CleanReport {
            rows_read,
            rows_kept: valid.height(),
            dropped_missing,
            dropped_population,
        };
        debug!(?report, "Cleaned table");

        Ok((CleanTable::from_clean_frame(valid), report))
    }

    /// Working copy with `millionaire_density = millionaires / population`.
    pub fn with_density(table: &CleanTable) -> Result<DataFrame, ProcessorError> {
        let df = table
            .frame()
            .clone()
            .lazy()
            .with_column((col(MILLIONAIRES) / col(POPULATION)).alias(MILLIONAIRE_DENSITY))
            .collect()?;
        Ok(df)
    }

    /// Working copy with `poverty_rate = poverty / population`.
    pub fn with_poverty_rate(table: &CleanTable) -> Result<DataFrame, ProcessorError> {
        let df = table
            .frame()
            .clone()
            .lazy()
            .with_column((col(POVERTY) / col(POPULATION)).alias(POVERTY_RATE))
            .collect()?;
        Ok(df)
    }

    fn coerce_text(column: &Column) -> Result<Column, ProcessorError> {
        let name = column.name().clone();
        let values: Vec<Option<String>> = match column.dtype() {
            DataType::String => column
                .str()?
                .into_iter()
                .map(|v| {
                    v.map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                })
                .collect(),
            _ => {
                let casted = column.cast(&DataType::Float64)?;
                casted
                    .f64()?
                    .into_iter()
                    .map(|v| v.filter(|x| x.is_finite()).map(format_number))
                    .collect()
            }
        };
        Ok(Column::new(name, values))
    }

    fn coerce_numeric(column: &Column) -> Result<Column, ProcessorError> {
        let name = column.name().clone();
        let values: Vec<Option<f64>> = match column.dtype() {
            DataType::String => column
                .str()?
                .into_iter()
                .map(|v| v.and_then(parse_number))
                .collect(),
            _ => {
                let casted = column.cast(&DataType::Float64)?;
                casted
                    .f64()?
                    .into_iter()
                    .map(|v| v.filter(|x| x.is_finite()))
                    .collect()
            }
        };
        Ok(Column::new(name, values))
    }
}

/// Best-effort numeric parse; NaN and infinities count as missing.
fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::{float_values, text_values};

    fn raw_frame() -> DataFrame {
        df!(
            "State" => &["CA", "TX", "NY", "FL", "WA"],
            "Number in Poverty" => &[1000.0, 800.0, 900.0, 700.0, 300.0],
            "Number of Millionaires" => &[50.0, 40.0, 60.0, 30.0, 25.0],
            "State Popiulation" => &["10000", "8000", "9000", "7000", "5000"],
        )
        .unwrap()
    }

    #[test]
    fn normalize_renames_and_coerces() {
        let df = DataProcessor::normalize(raw_frame()).unwrap();
        for name in REQUIRED_COLUMNS {
            assert!(df.get_column_index(name).is_some(), "missing {name}");
        }
        assert_eq!(df.column(POPULATION).unwrap().dtype(), &DataType::Float64);
        assert_eq!(
            float_values(&df, POPULATION).unwrap(),
            vec![10000.0, 8000.0, 9000.0, 7000.0, 5000.0]
        );
    }

    #[test]
    fn normalize_reports_missing_header_by_name() {
        let df = df!(
            "State" => &["CA"],
            "Number in Poverty" => &[1.0],
            "Number of Millionaires" => &[1.0],
            "State Population" => &[1.0],
        )
        .unwrap();

        let err = DataProcessor::normalize(df).unwrap_err();
        match err {
            ProcessorError::MissingColumn {
                source_header,
                canonical,
            } => {
                assert_eq!(source_header, "State Popiulation");
                assert_eq!(canonical, POPULATION);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unparseable_values_become_null_and_are_dropped() {
        let df = df!(
            "State" => &[Some("CA"), Some("TX"), None, Some("NY")],
            "Number in Poverty" => &["1000", "lots", "5", "900"],
            "Number of Millionaires" => &[50.0, 40.0, 1.0, 60.0],
            "State Popiulation" => &["10000", "8000", "100", "N/A"],
        )
        .unwrap();

        let normalized = DataProcessor::normalize(df).unwrap();
        let (table, report) = DataProcessor::clean(normalized).unwrap();

        assert_eq!(table.height(), 1);
        assert_eq!(text_values(table.frame(), STATE).unwrap(), vec!["CA"]);
        assert_eq!(report.rows_read, 4);
        assert_eq!(report.dropped_missing, 3);
        assert_eq!(report.rows_kept, 1);
    }

    #[test]
    fn every_surviving_row_is_fully_populated() {
        let df = df!(
            "State" => &[Some("CA"), Some(" "), Some("TX")],
            "Number in Poverty" => &[Some(1.0), Some(2.0), None],
            "Number of Millionaires" => &[Some(1.0), Some(2.0), Some(3.0)],
            "State Popiulation" => &[Some(10.0), Some(20.0), Some(30.0)],
        )
        .unwrap();

        let (table, _) = DataProcessor::clean(DataProcessor::normalize(df).unwrap()).unwrap();
        for name in REQUIRED_COLUMNS {
            assert_eq!(table.frame().column(name).unwrap().null_count(), 0);
        }
        assert_eq!(table.height(), 1);
    }

    #[test]
    fn non_positive_population_is_dropped() {
        let df = df!(
            "State" => &["CA", "TX", "NY"],
            "Number in Poverty" => &[1.0, 2.0, 3.0],
            "Number of Millionaires" => &[1.0, 2.0, 3.0],
            "State Popiulation" => &[10.0, 0.0, -5.0],
        )
        .unwrap();

        let (table, report) =
            DataProcessor::clean(DataProcessor::normalize(df).unwrap()).unwrap();
        assert_eq!(table.height(), 1);
        assert_eq!(report.dropped_population, 2);
        assert!(report.summary().contains("2 with non-positive population"));
    }

    #[test]
    fn nan_text_counts_as_missing() {
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number(" 42 "), Some(42.0));
    }

    #[test]
    fn derived_ratios_are_simple_quotients() {
        let (table, _) =
            DataProcessor::clean(DataProcessor::normalize(raw_frame()).unwrap()).unwrap();

        let density = DataProcessor::with_density(&table).unwrap();
        let rate = DataProcessor::with_poverty_rate(&table).unwrap();

        let densities = float_values(&density, MILLIONAIRE_DENSITY).unwrap();
        let rates = float_values(&rate, POVERTY_RATE).unwrap();
        assert!((densities[0] - 0.005).abs() < 1e-12);
        assert!((densities[4] - 0.005).abs() < 1e-12);
        assert!((rates[0] - 0.10).abs() < 1e-12);
        assert!((rates[4] - 0.06).abs() < 1e-12);

        // Working copies do not leak derived columns into the table.
        assert!(table.frame().get_column_index(MILLIONAIRE_DENSITY).is_none());
    }
}
