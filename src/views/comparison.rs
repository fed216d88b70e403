//! Poverty vs millionaires comparison over the selected states.

use super::selection::{StateSelection, MIN_COMPARISON_STATES};
use crate::data::{CleanTable, ProcessorError};

/// Paired counts for one state.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonBar {
    pub state: String,
    pub poverty: f64,
    pub millionaires: f64,
}

/// Bars in ascending state order.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonView {
    pub bars: Vec<ComparisonBar>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComparisonOutcome {
    /// The cleaned table has no rows.
    NoData,
    /// Too few states selected; no chart is drawn.
    NeedMoreStates { selected: usize, required: usize },
    Ready(ComparisonView),
}

impl ComparisonOutcome {
    /// Notice shown in place of the chart when the selection is too small.
    pub fn need_more_notice(required: usize) -> String {
        format!(
            "Please select at least {} states to render the comparison chart.",
            required
        )
    }
}

impl ComparisonView {
    /// Filter the table to the selection and sort by state. Nothing is
    /// charted until at least `MIN_COMPARISON_STATES` states are selected.
    pub fn build(
        table: &CleanTable,
        selection: &StateSelection,
    ) -> Result<ComparisonOutcome, ProcessorError> {
        if table.is_empty() {
            return Ok(ComparisonOutcome::NoData);
        }
        if !selection.meets_threshold(MIN_COMPARISON_STATES) {
            return Ok(ComparisonOutcome::NeedMoreStates {
                selected: selection.len(),
                required: MIN_COMPARISON_STATES,
            });
        }

        let mut bars: Vec<ComparisonBar> = table
            .records()?
            .into_iter()
            .filter(|r| selection.is_selected(&r.state))
            .map(|r| ComparisonBar {
                state: r.state,
                poverty: r.poverty,
                millionaires: r.millionaires,
            })
            .collect();
        bars.sort_by(|a, b| a.state.cmp(&b.state));

        Ok(ComparisonOutcome::Ready(ComparisonView { bars }))
    }

    pub fn states(&self) -> Vec<&str> {
        self.bars.iter().map(|b| b.state.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::prepared_fixture;
    use crate::data::DataProcessor;
    use crate::views::selection::DEFAULT_SELECTION_COUNT;
    use polars::prelude::*;

    #[test]
    fn five_states_render_sorted_bars() {
        let prepared = prepared_fixture();
        let selection = StateSelection::with_default(
            prepared.table.distinct_states().unwrap(),
            DEFAULT_SELECTION_COUNT,
        );

        let outcome =
            ComparisonView::build(&prepared.table, &selection).unwrap();
        let view = match outcome {
            ComparisonOutcome::Ready(view) => view,
            other => panic!("expected a chart, got {other:?}"),
        };
        assert_eq!(view.states(), vec!["CA", "FL", "NY", "TX", "WA"]);
        assert_eq!(view.bars[0].poverty, 1000.0);
        assert_eq!(view.bars[0].millionaires, 50.0);
    }

    #[test]
    fn four_states_show_notice() {
        let prepared = prepared_fixture();
        let mut selection = StateSelection::with_default(
            prepared.table.distinct_states().unwrap(),
            DEFAULT_SELECTION_COUNT,
        );
        selection.set("WA", false);

        let outcome =
            ComparisonView::build(&prepared.table, &selection).unwrap();
        assert_eq!(
            outcome,
            ComparisonOutcome::NeedMoreStates {
                selected: 4,
                required: 5
            }
        );
        assert_eq!(
            ComparisonOutcome::need_more_notice(5),
            "Please select at least 5 states to render the comparison chart."
        );
    }

    fn six_state_table() -> CleanTable {
        let raw = df!(
            "State" => &["WA", "TX", "OR", "NY", "FL", "CA"],
            "Number in Poverty" => &[300.0, 800.0, 200.0, 900.0, 700.0, 1000.0],
            "Number of Millionaires" => &[25.0, 40.0, 10.0, 60.0, 30.0, 50.0],
            "State Popiulation" => &[5000.0, 8000.0, 4000.0, 9000.0, 7000.0, 10000.0],
        )
        .unwrap();
        DataProcessor::clean(DataProcessor::normalize(raw).unwrap())
            .unwrap()
            .0
    }

    #[test]
    fn only_selected_states_are_charted() {
        let table = six_state_table();
        let mut selection = StateSelection::with_default(table.distinct_states().unwrap(), 0);
        for state in ["WA", "TX", "OR", "FL", "CA"] {
            selection.set(state, true);
        }

        let outcome = ComparisonView::build(&table, &selection).unwrap();
        let ComparisonOutcome::Ready(view) = outcome else {
            panic!("expected a chart");
        };
        assert_eq!(view.states(), vec!["CA", "FL", "OR", "TX", "WA"]);
    }

    #[test]
    fn single_state_never_renders() {
        let prepared = prepared_fixture();
        let mut selection =
            StateSelection::with_default(prepared.table.distinct_states().unwrap(), 0);
        selection.set("CA", true);

        let outcome = ComparisonView::build(&prepared.table, &selection).unwrap();
        assert_eq!(
            outcome,
            ComparisonOutcome::NeedMoreStates {
                selected: 1,
                required: 5
            }
        );
    }

    #[test]
    fn empty_table_has_no_data() {
        let raw = df!(
            "State" => &["CA"],
            "Number in Poverty" => &[1.0],
            "Number of Millionaires" => &[2.0],
            "State Popiulation" => &["N/A"],
        )
        .unwrap();
        let (table, _) = DataProcessor::clean(DataProcessor::normalize(raw).unwrap()).unwrap();
        let selection = StateSelection::with_default(table.distinct_states().unwrap(), 5);

        let outcome = ComparisonView::build(&table, &selection).unwrap();
        assert_eq!(outcome, ComparisonOutcome::NoData);
    }
}
