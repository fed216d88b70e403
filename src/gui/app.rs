//! Dashboard Main Application
//! Main window with control panel and tabbed chart viewer.

use crate::config::DashboardConfig;
use crate::data::{content_key, prepare, PreparedTable, TableCache, WorkbookLoader};
use crate::gui::{ChartViewer, ControlPanel, ControlPanelAction};
use crate::views::{StateSelection, DEFAULT_SELECTION_COUNT};
use egui::SidePanel;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::{error, info};

/// Workbook loading result from background thread
enum LoadResult {
    Complete { key: String, prepared: PreparedTable },
    Error(String),
}

/// Main application window.
pub struct DashboardApp {
    cache: TableCache,
    current: Option<Arc<PreparedTable>>,
    selection: Option<StateSelection>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,

    // Async workbook loading
    load_rx: Option<Receiver<LoadResult>>,
    is_loading: bool,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        Self::with_config(config)
    }

    fn with_config(config: DashboardConfig) -> Self {
        Self {
            cache: TableCache::new(config.cache.max_entries),
            current: None,
            selection: None,
            control_panel: ControlPanel::new(),
            chart_viewer: ChartViewer::new(),
            load_rx: None,
            is_loading: false,
        }
    }

    /// Handle workbook selection
    fn handle_browse_file(&mut self) {
        if self.is_loading {
            return; // Already loading
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Excel Workbook", &["xlsx"])
            .pick_file()
        {
            self.load_file(path);
        }
    }

    fn load_file(&mut self, path: PathBuf) {
        // A new upload supersedes the previous table, even if it fails.
        self.current = None;
        self.selection = None;
        self.control_panel.file_path = Some(path.clone());

        let bytes = match WorkbookLoader::read_file(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Failed to read {}: {}", path.display(), e);
                self.control_panel.set_error(&e.to_string());
                return;
            }
        };

        let key = content_key(&bytes);
        if let Some(prepared) = self.cache.get(&key) {
            info!("Reusing cached table for {}", path.display());
            self.apply_table(prepared);
            return;
        }

        self.control_panel.set_status("Reading workbook...");
        self.is_loading = true;

        let (tx, rx) = channel();
        self.load_rx = Some(rx);

        // Parse in background thread
        thread::spawn(move || {
            let result = match prepare(&bytes) {
                Ok(prepared) => LoadResult::Complete { key, prepared },
                Err(e) => LoadResult::Error(e.to_string()),
            };
            let _ = tx.send(result);
        });
    }

    fn apply_table(&mut self, prepared: Arc<PreparedTable>) {
        match prepared.table.distinct_states() {
            Ok(states) => {
                self.selection = Some(StateSelection::with_default(states, DEFAULT_SELECTION_COUNT));
                self.control_panel.set_status(&prepared.report.summary());
                self.current = Some(prepared);
            }
            Err(e) => {
                error!("Failed to list states: {}", e);
                self.control_panel.set_error(&e.to_string());
            }
        }
    }

    /// Check for workbook loading results
    fn check_load_results(&mut self) {
        let Some(rx) = self.load_rx.take() else {
            return;
        };

        match rx.try_recv() {
            Ok(LoadResult::Complete { key, prepared }) => {
                let prepared = Arc::new(prepared);
                self.cache.insert(key, Arc::clone(&prepared));
                info!(cached_tables = self.cache.len(), "Workbook loaded");
                self.apply_table(prepared);
                self.is_loading = false;
            }
            Ok(LoadResult::Error(e)) => {
                error!("Failed to load workbook: {}", e);
                self.control_panel.set_error(&e);
                self.is_loading = false;
            }
            Err(TryRecvError::Empty) => {
                self.load_rx = Some(rx);
            }
            Err(TryRecvError::Disconnected) => {
                // Worker exited without a result, most likely a panic while parsing.
                error!("Workbook loader stopped without reporting a result");
                self.control_panel.set_error("Loader stopped unexpectedly");
                self.is_loading = false;
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_results();

        if self.is_loading {
            ctx.request_repaint();
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(240.0)
            .max_width(300.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    let action = self.control_panel.show(
                        ui,
                        self.selection.as_mut(),
                        self.is_loading,
                    );

                    match action {
                        ControlPanelAction::BrowseFile => self.handle_browse_file(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            let table = self.current.as_ref().map(|p| &p.table);
            self.chart_viewer.show(ui, table, self.selection.as_ref());
        });
    }
}
