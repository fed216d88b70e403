//! Control Panel Widget
//! Left side panel with the file picker, state selection and status line.

use crate::views::{StateSelection, MIN_COMPARISON_STATES};
use egui::{Color32, RichText, ScrollArea};
use std::path::PathBuf;

/// Left side control panel with file selection and state filter.
pub struct ControlPanel {
    pub file_path: Option<PathBuf>,
    pub status: String,
    pub is_error: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            file_path: None,
            status: "Ready".to_string(),
            is_error: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
        self.is_error = false;
    }

    pub fn set_error(&mut self, error: &str) {
        self.status = format!("Error: {}", error);
        self.is_error = true;
    }

    /// Draw the control panel
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        selection: Option<&mut StateSelection>,
        is_loading: bool,
    ) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("Controls")
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Data Source Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .file_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    let path_color = if self.file_path.is_some() {
                        ui.visuals().text_color()
                    } else {
                        Color32::GRAY
                    };
                    ui.label(RichText::new(&path_text).size(12.0).color(path_color));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.add_enabled_ui(!is_loading, |ui| {
                            if ui.button("📂 Upload .xlsx").clicked() {
                                action = ControlPanelAction::BrowseFile;
                            }
                        });
                    });
                });
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== State Selection Section =====
        ui.label(
            RichText::new(format!("🗺 Select at least {} states", MIN_COMPARISON_STATES))
                .size(14.0)
                .strong(),
        );
        ui.add_space(5.0);

        match selection {
            Some(selection) => Self::show_selection(ui, selection),
            None => {
                ui.label(RichText::new("Load a file to choose states").color(Color32::GRAY));
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        ui.label(RichText::new("📊 Status").size(14.0).strong());
        ui.add_space(5.0);

        if is_loading {
            ui.add(egui::ProgressBar::new(0.0).animate(true));
            ui.add_space(5.0);
        }

        let status_color = if self.is_error {
            Color32::from_rgb(220, 53, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    fn show_selection(ui: &mut egui::Ui, selection: &mut StateSelection) {
        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(5.0)
            .show(ui, |ui| {
                ScrollArea::vertical().max_height(320.0).show(ui, |ui| {
                    let options: Vec<String> = selection.options().to_vec();
                    for state in &options {
                        let mut on = selection.is_selected(state);
                        if ui.checkbox(&mut on, state).changed() {
                            selection.set(state, on);
                        }
                    }
                });
            });

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.small_button("Select All").clicked() {
                selection.select_all();
            }
            if ui.small_button("Clear All").clicked() {
                selection.clear();
            }
        });

        let count_color = if selection.meets_threshold(MIN_COMPARISON_STATES) {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::from_rgb(243, 156, 18)
        };
        ui.label(
            RichText::new(format!(
                "{} of {} states selected",
                selection.len(),
                selection.options().len()
            ))
            .size(11.0)
            .color(count_color),
        );
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseFile,
}
