//! Choropleth Map Module
//! Paints millionaire density on the U.S. tile grid with a Viridis scale.

use crate::views::geo::{StateTile, GRID_COLUMNS, GRID_ROWS, US_TILES};
use crate::views::{DensityEntry, DensityView};
use egui::{pos2, vec2, Align2, Color32, FontId, Pos2, Rect, RichText, Sense, Stroke};
use plotters::style::colors::colormaps::{ColorMap, ViridisRGB};

const TILE_GAP: f32 = 4.0;
const MIN_TILE: f32 = 28.0;
const MAX_TILE: f32 = 64.0;
const LEGEND_STEPS: usize = 64;

/// Paints the density tile map and its color legend.
pub struct ChoroplethMap;

impl ChoroplethMap {
    /// Viridis color for a normalized value.
    pub fn color_for(t: f32) -> Color32 {
        let c = ViridisRGB.get_color(t.clamp(0.0, 1.0));
        Color32::from_rgb(c.0, c.1, c.2)
    }

    /// Black or white, whichever reads better on `fill`.
    pub fn text_color(fill: Color32) -> Color32 {
        let luminance =
            0.299 * fill.r() as f32 + 0.587 * fill.g() as f32 + 0.114 * fill.b() as f32;
        if luminance > 150.0 {
            Color32::BLACK
        } else {
            Color32::WHITE
        }
    }

    pub fn hover_text(entry: &DensityEntry) -> String {
        format!(
            "{}\nPopulation: {:.0}\nMillionaires: {:.0}\nIn poverty: {:.0}\nMillionaires per capita: {:.6}",
            entry.state, entry.population, entry.millionaires, entry.poverty, entry.density
        )
    }

    fn cell_rect(origin: Pos2, tile: f32, state: &StateTile) -> Rect {
        let min = pos2(
            origin.x + state.col as f32 * tile,
            origin.y + state.row as f32 * tile,
        );
        Rect::from_min_size(min, vec2(tile - TILE_GAP, tile - TILE_GAP))
    }

    pub fn draw(ui: &mut egui::Ui, view: &DensityView) {
        let tile = (ui.available_width() / GRID_COLUMNS as f32).clamp(MIN_TILE, MAX_TILE);
        let size = vec2(tile * GRID_COLUMNS as f32, tile * GRID_ROWS as f32);
        let (rect, _) = ui.allocate_exact_size(size, Sense::hover());
        let painter = ui.painter_at(rect);
        let outline = ui.visuals().widgets.noninteractive.bg_stroke.color;

        // States with no row still get an outline so the map keeps its shape.
        for state in &US_TILES {
            if view.tile_for(state.code).is_none() {
                let cell = Self::cell_rect(rect.min, tile, state);
                painter.rect_stroke(cell, 4.0, Stroke::new(1.0, outline));
                painter.text(
                    cell.center(),
                    Align2::CENTER_CENTER,
                    state.code,
                    FontId::proportional(tile * 0.28),
                    Color32::GRAY,
                );
            }
        }

        for density_tile in &view.tiles {
            let cell = Self::cell_rect(rect.min, tile, density_tile.tile);
            let fill = Self::color_for(view.normalized(density_tile.entry.density));
            painter.rect_filled(cell, 4.0, fill);
            painter.text(
                cell.center(),
                Align2::CENTER_CENTER,
                density_tile.tile.code,
                FontId::proportional(tile * 0.3),
                Self::text_color(fill),
            );

            let id = ui.id().with(("density_tile", density_tile.tile.code));
            ui.interact(cell, id, Sense::hover())
                .on_hover_text(Self::hover_text(&density_tile.entry));
        }

        ui.add_space(10.0);
        Self::draw_legend(ui, view);
    }

    fn draw_legend(ui: &mut egui::Ui, view: &DensityView) {
        let Some((lo, hi)) = view.range else {
            return;
        };

        ui.label(RichText::new("Millionaires per capita").size(12.0).strong());
        let width = ui.available_width().min(360.0);
        let (rect, _) = ui.allocate_exact_size(vec2(width, 14.0), Sense::hover());
        let painter = ui.painter_at(rect);
        let step = width / LEGEND_STEPS as f32;
        for i in 0..LEGEND_STEPS {
            let t = i as f32 / (LEGEND_STEPS - 1) as f32;
            let segment = Rect::from_min_size(
                pos2(rect.min.x + i as f32 * step, rect.min.y),
                vec2(step + 0.5, rect.height()),
            );
            painter.rect_filled(segment, 0.0, Self::color_for(t));
        }

        ui.horizontal(|ui| {
            ui.set_width(width);
            ui.label(RichText::new(format!("{:.6}", lo)).size(11.0));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(RichText::new(format!("{:.6}", hi)).size(11.0));
            });
        });
    }
}
