//! State selection for the comparison view.

use std::collections::BTreeSet;

/// The comparison chart is drawn only when at least this many states are
/// selected.
pub const MIN_COMPARISON_STATES: usize = 5;
/// How many states are pre-selected after a load.
pub const DEFAULT_SELECTION_COUNT: usize = 5;

/// The user's chosen subset of the distinct state identifiers.
///
/// Options are kept sorted and unique; the selection iterates in ascending
/// order regardless of the order in which states were picked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSelection {
    options: Vec<String>,
    selected: BTreeSet<String>,
}

impl StateSelection {
    /// Build a selection over `options` with the first `default_count`
    /// options (in ascending order) pre-selected.
    pub fn with_default(mut options: Vec<String>, default_count: usize) -> Self {
        options.sort();
        options.dedup();
        let selected = options.iter().take(default_count).cloned().collect();
        Self { options, selected }
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn is_selected(&self, state: &str) -> bool {
        self.selected.contains(state)
    }

    /// Select or deselect a state. Unknown identifiers are ignored.
    pub fn set(&mut self, state: &str, on: bool) {
        if on {
            if self.options.iter().any(|o| o == state) {
                self.selected.insert(state.to_string());
            }
        } else {
            self.selected.remove(state);
        }
    }

    pub fn select_all(&mut self) {
        self.selected = self.options.iter().cloned().collect();
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selected states in ascending order.
    pub fn selected(&self) -> impl Iterator<Item = &String> {
        self.selected.iter()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn meets_threshold(&self, min_states: usize) -> bool {
        self.selected.len() >= min_states
    }
}
