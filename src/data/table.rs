//! Canonical working table.

use super::processor::ProcessorError;
use polars::prelude::*;

pub const STATE: &str = "state";
pub const POVERTY: &str = "poverty";
pub const MILLIONAIRES: &str = "millionaires";
pub const POPULATION: &str = "population";
pub const MILLIONAIRE_DENSITY: &str = "millionaire_density";
pub const POVERTY_RATE: &str = "poverty_rate";

/// Canonical columns every cleaned row must populate.
pub const REQUIRED_COLUMNS: [&str; 4] = [STATE, POVERTY, MILLIONAIRES, POPULATION];

/// One row of the working table.
#[derive(Debug, Clone, PartialEq)]
pub struct StateRecord {
    pub state: String,
    pub poverty: f64,
    pub millionaires: f64,
    pub population: f64,
}

/// A cleaned table: canonical schema, no missing values, positive population.
///
/// Only the cleaner constructs one, so views can rely on the schema.
#[derive(Debug, Clone)]
pub struct CleanTable {
    df: DataFrame,
}

impl CleanTable {
    pub(super) fn from_clean_frame(df: DataFrame) -> Self {
        Self { df }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// All rows in table order.
    pub fn records(&self) -> Result<Vec<StateRecord>, ProcessorError> {
        let states = text_values(&self.df, STATE)?;
        let poverty = float_values(&self.df, POVERTY)?;
        let millionaires = float_values(&self.df, MILLIONAIRES)?;
        let population = float_values(&self.df, POPULATION)?;

        Ok(states
            .into_iter()
            .zip(poverty)
            .zip(millionaires)
            .zip(population)
            .map(|(((state, poverty), millionaires), population)| StateRecord {
                state,
                poverty,
                millionaires,
                population,
            })
            .collect())
    }

    /// Distinct state identifiers in ascending order.
    pub fn distinct_states(&self) -> Result<Vec<String>, ProcessorError> {
        let mut states = text_values(&self.df, STATE)?;
        states.sort();
        states.dedup();
        Ok(states)
    }
}

/// Values of a text column; nulls become empty strings.
pub(crate) fn text_values(df: &DataFrame, name: &str) -> Result<Vec<String>, ProcessorError> {
    Ok(df
        .column(name)?
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or_default().to_string())
        .collect())
}

/// Values of a float column; nulls become NaN.
pub(crate) fn float_values(df: &DataFrame, name: &str) -> Result<Vec<f64>, ProcessorError> {
    Ok(df
        .column(name)?
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect())
}
