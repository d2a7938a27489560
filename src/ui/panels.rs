use std::sync::Arc;

use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::model::Dimension;
use crate::state::{AppState, Page};

// ---------------------------------------------------------------------------
// Left side panel – menu and filter widgets
// ---------------------------------------------------------------------------

/// Render the left panel: navigation menu, then the three filter pickers.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Menu");
    for page in Page::ALL {
        if ui.selectable_label(state.page == page, page.label()).clicked() {
            state.set_page(page);
        }
    }
    ui.separator();

    ui.heading("Please Filter Here:");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for dim in Dimension::ALL {
                filter_picker(ui, state, dim);
            }
        });
}

/// Multi-select for one dimension, with All / None shortcuts.
fn filter_picker(ui: &mut Ui, state: &mut AppState, dim: Dimension) {
    // Own a handle so the options stay readable while `state` is mutated.
    let dataset = Arc::clone(&state.dataset);
    let options = dataset.distinct(dim);

    let n_selected = state.selection.set(dim).len();
    let header_text = format!("Select {dim}:  ({n_selected}/{})", options.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(dim.column())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(dim);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(dim);
                }
            });

            for value in options {
                let mut checked = state.selection.contains(dim, value);
                if ui.checkbox(&mut checked, value.as_str()).changed() {
                    state.toggle(dim, value);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong("Descriptive Analytics");
        ui.separator();

        let visible = state.report.as_ref().map_or(0, |r| r.rows.len());
        ui.label(format!(
            "{} records loaded, {visible} visible",
            state.dataset.len()
        ));
    });
}
