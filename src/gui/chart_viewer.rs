//! Chart Viewer Widget
//! Central panel with one tab per view. Every view model is rebuilt from the
//! current table on each pass, so nothing derived outlives an upload.

use crate::charts::{ChartPlotter, ChoroplethMap};
use crate::data::CleanTable;
use crate::views::{ComparisonOutcome, ComparisonView, DensityView, RateView, StateSelection};
use egui::{Color32, RichText, ScrollArea};

pub const DASHBOARD_TITLE: &str = "Poverty & Millionaire Analytics Dashboard";
const CAPTION: &str =
    "Interactive insights into per-state poverty and millionaire counts.";
const UPLOAD_NOTICE: &str =
    "Please upload the provided povertymillionaires.xlsx file to proceed.";
const FOOTER_NOTE: &str =
    "Visuals update automatically based on your uploaded dataset and state selections.";
const EMPTY_NOTICE: &str = "No rows remain after cleaning; nothing to chart.";
const DENSITY_INTERPRETATION: &str = "Interpretation: Higher millionaire density tends to \
concentrate in coastal and metro-centric states with strong finance, technology, and services \
sectors. Interior states often show lower density overall but may include pockets of high net \
worth near energy, logistics, or manufacturing hubs. Tax policy, industry mix, and cost of \
living influence where wealth clusters. These patterns reveal how regional economic ecosystems \
and migration shape the geography of wealth.";

const WARNING_COLOR: Color32 = Color32::from_rgb(243, 156, 18);
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewTab {
    #[default]
    Comparison,
    DensityMap,
    PovertyRate,
}

impl ViewTab {
    pub const ALL: [ViewTab; 3] = [ViewTab::Comparison, ViewTab::DensityMap, ViewTab::PovertyRate];

    pub fn title(self) -> &'static str {
        match self {
            ViewTab::Comparison => "Poverty vs Millionaires",
            ViewTab::DensityMap => "Millionaire Density Map",
            ViewTab::PovertyRate => "Poverty Rate",
        }
    }

    pub fn subheader(self) -> &'static str {
        match self {
            ViewTab::Comparison => "Poverty vs Millionaires by Selected States",
            ViewTab::DensityMap => "Millionaire Density by U.S. State",
            ViewTab::PovertyRate => "Poverty Rate Across States",
        }
    }
}

#[derive(Default)]
pub struct ChartViewer {
    pub active_tab: ViewTab,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        table: Option<&CleanTable>,
        selection: Option<&StateSelection>,
    ) {
        ui.label(RichText::new(DASHBOARD_TITLE).size(24.0).strong());
        ui.label(RichText::new(CAPTION).size(12.0).color(Color32::GRAY));
        ui.add_space(8.0);

        let Some(table) = table else {
            Self::notice(ui, UPLOAD_NOTICE, WARNING_COLOR);
            return;
        };

        ui.horizontal(|ui| {
            for tab in ViewTab::ALL {
                ui.selectable_value(&mut self.active_tab, tab, RichText::new(tab.title()).size(14.0));
            }
        });
        ui.separator();

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.label(RichText::new(self.active_tab.subheader()).size(18.0).strong());
                ui.add_space(6.0);

                if table.is_empty() {
                    Self::notice(ui, EMPTY_NOTICE, WARNING_COLOR);
                } else {
                    match self.active_tab {
                        ViewTab::Comparison => Self::show_comparison(ui, table, selection),
                        ViewTab::DensityMap => Self::show_density(ui, table),
                        ViewTab::PovertyRate => Self::show_rate(ui, table),
                    }
                }

                ui.add_space(12.0);
                ui.separator();
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new("Note:").strong());
                    ui.label(FOOTER_NOTE);
                });
            });
    }

    fn show_comparison(ui: &mut egui::Ui, table: &CleanTable, selection: Option<&StateSelection>) {
        let empty = StateSelection::default();
        let selection = selection.unwrap_or(&empty);
        match ComparisonView::build(table, selection) {
            Ok(ComparisonOutcome::Ready(view)) => {
                ui.label(
                    RichText::new("Poverty vs Millionaires (Selected States)")
                        .size(14.0)
                        .strong(),
                );
                ChartPlotter::draw_comparison(ui, &view);
            }
            Ok(ComparisonOutcome::NeedMoreStates { required, .. }) => {
                Self::notice(ui, &ComparisonOutcome::need_more_notice(required), WARNING_COLOR);
            }
            Ok(ComparisonOutcome::NoData) => Self::notice(ui, EMPTY_NOTICE, WARNING_COLOR),
            Err(e) => Self::notice(ui, &format!("Error: {}", e), ERROR_COLOR),
        }
    }

    fn show_density(ui: &mut egui::Ui, table: &CleanTable) {
        let view = match DensityView::build(table) {
            Ok(view) => view,
            Err(e) => {
                Self::notice(ui, &format!("Error: {}", e), ERROR_COLOR);
                return;
            }
        };

        ui.label(RichText::new("Millionaire Density by State").size(14.0).strong());
        ChoroplethMap::draw(ui, &view);

        if !view.unmapped.is_empty() {
            let names: Vec<&str> = view.unmapped.iter().map(|e| e.state.as_str()).collect();
            ui.label(
                RichText::new(format!("Not shown on the map: {}", names.join(", ")))
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        }

        ui.add_space(10.0);
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(DENSITY_INTERPRETATION).italics());
            });
    }

    fn show_rate(ui: &mut egui::Ui, table: &CleanTable) {
        match RateView::build(table) {
            Ok(view) => {
                ui.label(
                    RichText::new("Poverty Rate by State (Highest to Lowest)")
                        .size(14.0)
                        .strong(),
                );
                ChartPlotter::draw_rate(ui, &view);
            }
            Err(e) => Self::notice(ui, &format!("Error: {}", e), ERROR_COLOR),
        }
    }

    fn notice(ui: &mut egui::Ui, text: &str, color: Color32) {
        egui::Frame::none()
            .stroke(egui::Stroke::new(1.5, color))
            .rounding(5.0)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.label(RichText::new(format!("⚠ {}", text)).size(14.0).color(color));
            });
    }
}
