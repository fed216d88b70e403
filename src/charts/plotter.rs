//! Chart Plotter Module
//! Draws the comparison and poverty-rate bar charts using egui_plot.

use crate::views::{ComparisonView, RateView};
use egui::Color32;
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot};

pub const POVERTY_COLOR: Color32 = Color32::from_rgb(220, 53, 69); // Red
pub const MILLIONAIRE_COLOR: Color32 = Color32::from_rgb(40, 167, 69); // Green
pub const RATE_COLOR: Color32 = Color32::from_rgb(52, 120, 219); // Blue

const BAR_WIDTH: f64 = 0.4;
const BAR_OFFSET: f64 = 0.2;
const RATE_ROW_HEIGHT: f32 = 22.0;

/// Creates the bar charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Side-by-side bars: poverty left of each state's tick, millionaires right.
    pub fn comparison_bars(view: &ComparisonView) -> (Vec<Bar>, Vec<Bar>) {
        let poverty = view
            .bars
            .iter()
            .enumerate()
            .map(|(i, b)| {
                Bar::new(i as f64 - BAR_OFFSET, b.poverty)
                    .width(BAR_WIDTH)
                    .name(&b.state)
            })
            .collect();
        let millionaires = view
            .bars
            .iter()
            .enumerate()
            .map(|(i, b)| {
                Bar::new(i as f64 + BAR_OFFSET, b.millionaires)
                    .width(BAR_WIDTH)
                    .name(&b.state)
            })
            .collect();
        (poverty, millionaires)
    }

    /// Horizontal bars in percent, first entry at the top.
    pub fn rate_bars(view: &RateView) -> Vec<Bar> {
        let n = view.entries.len();
        view.entries
            .iter()
            .enumerate()
            .map(|(i, e)| {
                Bar::new((n - 1 - i) as f64, e.percent())
                    .width(0.7)
                    .name(&e.state)
            })
            .collect()
    }

    /// Label for an integer tick, empty between ticks.
    pub fn axis_label(labels: &[String], value: f64) -> String {
        let idx = value.round();
        if (value - idx).abs() > 1e-6 || idx < 0.0 {
            return String::new();
        }
        labels.get(idx as usize).cloned().unwrap_or_default()
    }

    fn integer_marks(count: usize) -> Vec<GridMark> {
        (0..count)
            .map(|i| GridMark {
                value: i as f64,
                step_size: 1.0,
            })
            .collect()
    }

    /// Draw grouped poverty / millionaire bars for the selected states.
    pub fn draw_comparison(ui: &mut egui::Ui, view: &ComparisonView) {
        let labels: Vec<String> = view.bars.iter().map(|b| b.state.clone()).collect();
        let count = labels.len();
        let (poverty, millionaires) = Self::comparison_bars(view);

        Plot::new("comparison_chart")
            .height(420.0)
            .legend(Legend::default())
            .allow_scroll(false)
            .include_y(0.0)
            .x_axis_label("State")
            .y_axis_label("People (count)")
            .x_grid_spacer(move |_input| Self::integer_marks(count))
            .x_axis_formatter(move |mark, _range| Self::axis_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(poverty)
                        .name("In Poverty")
                        .color(POVERTY_COLOR),
                );
                plot_ui.bar_chart(
                    BarChart::new(millionaires)
                        .name("Millionaires")
                        .color(MILLIONAIRE_COLOR),
                );
            });
    }

    /// Draw the ranked poverty-rate chart, highest rate at the top.
    pub fn draw_rate(ui: &mut egui::Ui, view: &RateView) {
        let count = view.entries.len();
        // Labels indexed by bar position (bottom to top).
        let labels: Vec<String> = view
            .entries
            .iter()
            .rev()
            .map(|e| e.state.clone())
            .collect();
        let height = (count as f32 * RATE_ROW_HEIGHT).max(400.0);

        Plot::new("poverty_rate_chart")
            .height(height)
            .allow_scroll(false)
            .include_x(0.0)
            .x_axis_label("Poverty rate (%)")
            .y_axis_label("State")
            .y_grid_spacer(move |_input| Self::integer_marks(count))
            .y_axis_formatter(move |mark, _range| Self::axis_label(&labels, mark.value))
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(
                    BarChart::new(Self::rate_bars(view))
                        .name("Poverty rate (%)")
                        .color(RATE_COLOR)
                        .horizontal(),
                );
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::RateEntry;

    #[test]
    fn axis_label_only_on_integer_ticks() {
        let labels = vec!["CA".to_string(), "FL".to_string()];
        assert_eq!(ChartPlotter::axis_label(&labels, 0.0), "CA");
        assert_eq!(ChartPlotter::axis_label(&labels, 1.0), "FL");
        assert_eq!(ChartPlotter::axis_label(&labels, 0.5), "");
        assert_eq!(ChartPlotter::axis_label(&labels, 2.0), "");
        assert_eq!(ChartPlotter::axis_label(&labels, -1.0), "");
    }

    #[test]
    fn rate_bars_put_first_entry_on_top() {
        let view = RateView {
            entries: vec![
                RateEntry {
                    state: "CA".into(),
                    rate: 0.10,
                },
                RateEntry {
                    state: "WA".into(),
                    rate: 0.06,
                },
            ],
        };
        let bars = ChartPlotter::rate_bars(&view);
        assert_eq!(bars[0].argument, 1.0);
        assert!((bars[0].value - 10.0).abs() < 1e-9);
        assert_eq!(bars[1].argument, 0.0);
    }
}
