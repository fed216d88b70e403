//! Poverty rate ranking.

use crate::data::{
    float_values, text_values, CleanTable, DataProcessor, ProcessorError, POVERTY_RATE, STATE,
};

#[derive(Debug, Clone, PartialEq)]
pub struct RateEntry {
    pub state: String,
    /// Fraction of the population in poverty.
    pub rate: f64,
}

impl RateEntry {
    pub fn percent(&self) -> f64 {
        self.rate * 100.0
    }
}

/// Entries sorted by descending poverty rate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RateView {
    pub entries: Vec<RateEntry>,
}

impl RateView {
    pub fn build(table: &CleanTable) -> Result<Self, ProcessorError> {
        let df = DataProcessor::with_poverty_rate(table)?;
        let states = text_values(&df, STATE)?;
        let rates = float_values(&df, POVERTY_RATE)?;

        let mut entries: Vec<RateEntry> = states
            .into_iter()
            .zip(rates)
            .map(|(state, rate)| RateEntry { state, rate })
            .collect();
        // Stable, so tied states keep table order.
        entries.sort_by(|a, b| b.rate.total_cmp(&a.rate));

        Ok(Self { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::prepared_fixture;
    use polars::prelude::*;

    #[test]
    fn ranks_highest_rate_first() {
        let prepared = prepared_fixture();
        let view = RateView::build(&prepared.table).unwrap();

        assert_eq!(view.entries.len(), 5);
        assert_eq!(view.entries[0].state, "CA");
        assert!((view.entries[0].rate - 0.10).abs() < 1e-12);
        assert!((view.entries[0].percent() - 10.0).abs() < 1e-9);
        assert_eq!(view.entries.last().unwrap().state, "WA");
    }

    #[test]
    fn order_is_descending() {
        let raw = df!(
            "State" => &["A", "B", "C", "D"],
            "Number in Poverty" => &[10.0, 30.0, 20.0, 5.0],
            "Number of Millionaires" => &[1.0, 1.0, 1.0, 1.0],
            "State Popiulation" => &[100.0, 100.0, 100.0, 100.0],
        )
        .unwrap();
        let (table, _) =
            DataProcessor::clean(DataProcessor::normalize(raw).unwrap()).unwrap();

        let view = RateView::build(&table).unwrap();
        let states: Vec<&str> = view.entries.iter().map(|e| e.state.as_str()).collect();
        assert_eq!(states, vec!["B", "C", "A", "D"]);
        assert!(view.entries.windows(2).all(|w| w[0].rate >= w[1].rate));
    }

    #[test]
    fn empty_table_gives_no_entries() {
        let raw = df!(
            "State" => &["CA", "TX"],
            "Number in Poverty" => &[1.0, 2.0],
            "Number of Millionaires" => &[2.0, 3.0],
            "State Popiulation" => &["N/A", ""],
        )
        .unwrap();
        let (table, _) =
            DataProcessor::clean(DataProcessor::normalize(raw).unwrap()).unwrap();

        let view = RateView::build(&table).unwrap();
        assert!(view.is_empty());
    }
}
