//! Millionaire density per state, laid out on the tile grid.

use super::geo::{self, StateTile};
use crate::data::{
    float_values, text_values, CleanTable, DataProcessor, ProcessorError, MILLIONAIRES,
    MILLIONAIRE_DENSITY, POPULATION, POVERTY, STATE,
};
use std::collections::HashMap;
use tracing::warn;

/// Hover details for one state.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityEntry {
    pub state: String,
    pub population: f64,
    pub millionaires: f64,
    pub poverty: f64,
    pub density: f64,
}

#[derive(Debug, Clone)]
pub struct DensityTile {
    pub tile: &'static StateTile,
    pub entry: DensityEntry,
}

#[derive(Debug, Clone, Default)]
pub struct DensityView {
    pub tiles: Vec<DensityTile>,
    /// Rows whose identifier is not a known state.
    pub unmapped: Vec<DensityEntry>,
    /// Lowest and highest density over all rows.
    pub range: Option<(f64, f64)>,
}

impl DensityView {
    pub fn build(table: &CleanTable) -> Result<Self, ProcessorError> {
        let df = DataProcessor::with_density(table)?;
        let states = text_values(&df, STATE)?;
        let population = float_values(&df, POPULATION)?;
        let millionaires = float_values(&df, MILLIONAIRES)?;
        let poverty = float_values(&df, POVERTY)?;
        let density = float_values(&df, MILLIONAIRE_DENSITY)?;

        let mut view = DensityView::default();
        let mut tile_index: HashMap<&'static str, usize> = HashMap::new();

        for i in 0..states.len() {
            let entry = DensityEntry {
                state: states[i].clone(),
                population: population[i],
                millionaires: millionaires[i],
                poverty: poverty[i],
                density: density[i],
            };

            view.range = Some(match view.range {
                Some((lo, hi)) => (lo.min(entry.density), hi.max(entry.density)),
                None => (entry.density, entry.density),
            });

            match geo::resolve(&entry.state) {
                Some(tile) => {
                    if let Some(&existing) = tile_index.get(tile.code) {
                        warn!(state = tile.code, "Duplicate state row; map shows the last one");
                        view.tiles[existing].entry = entry;
                    } else {
                        tile_index.insert(tile.code, view.tiles.len());
                        view.tiles.push(DensityTile { tile, entry });
                    }
                }
                None => view.unmapped.push(entry),
            }
        }

        Ok(view)
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty() && self.unmapped.is_empty()
    }

    pub fn tile_for(&self, code: &str) -> Option<&DensityTile> {
        self.tiles.iter().find(|t| t.tile.code == code)
    }

    /// Entry with the highest density, mapped or not.
    pub fn highest(&self) -> Option<&DensityEntry> {
        self.tiles
            .iter()
            .map(|t| &t.entry)
            .chain(self.unmapped.iter())
            .max_by(|a, b| a.density.total_cmp(&b.density))
    }

    /// Position of `density` within the view's range, in `0.0..=1.0`.
    pub fn normalized(&self, density: f64) -> f32 {
        match self.range {
            Some((lo, hi)) if hi > lo => ((density - lo) / (hi - lo)).clamp(0.0, 1.0) as f32,
            _ => 0.5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::prepared_fixture;
    use polars::prelude::*;

    #[test]
    fn every_row_gets_a_density() {
        let prepared = prepared_fixture();
        let view = DensityView::build(&prepared.table).unwrap();

        assert_eq!(view.tiles.len(), 5);
        assert!(view.unmapped.is_empty());
        let wa = view.tile_for("WA").unwrap();
        assert!((wa.entry.density - 0.005).abs() < 1e-12);
        assert_eq!(wa.entry.population, 5000.0);

        let highest = view.highest().unwrap();
        assert_eq!(highest.state, "NY");
        assert!((highest.density - 60.0 / 9000.0).abs() < 1e-12);
    }

    #[test]
    fn normalization_spans_the_range() {
        let prepared = prepared_fixture();
        let view = DensityView::build(&prepared.table).unwrap();
        let (lo, hi) = view.range.unwrap();
        assert_eq!(view.normalized(lo), 0.0);
        assert_eq!(view.normalized(hi), 1.0);
    }

    #[test]
    fn unknown_identifiers_and_full_names() {
        let raw = df!(
            "State" => &["California", "Atlantis"],
            "Number in Poverty" => &[1.0, 1.0],
            "Number of Millionaires" => &[2.0, 3.0],
            "State Popiulation" => &[100.0, 100.0],
        )
        .unwrap();
        let (table, _) =
            DataProcessor::clean(DataProcessor::normalize(raw).unwrap()).unwrap();

        let view = DensityView::build(&table).unwrap();
        assert!(view.tile_for("CA").is_some());
        assert_eq!(view.unmapped.len(), 1);
        assert_eq!(view.unmapped[0].state, "Atlantis");
    }

    #[test]
    fn empty_table_gives_empty_view() {
        let raw = df!(
            "State" => &["CA"],
            "Number in Poverty" => &[1.0],
            "Number of Millionaires" => &[2.0],
            "State Popiulation" => &["N/A"],
        )
        .unwrap();
        let (table, _) =
            DataProcessor::clean(DataProcessor::normalize(raw).unwrap()).unwrap();

        let view = DensityView::build(&table).unwrap();
        assert!(view.is_empty());
        assert!(view.range.is_none());
        assert_eq!(view.normalized(1.0), 0.5);
    }
}
