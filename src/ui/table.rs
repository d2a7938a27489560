use eframe::egui::{self, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Dataset;

const ROW_HEIGHT: f32 = 18.0;

/// Collapsible raw table of the filtered records, showing only the
/// columns the user picked.
pub fn raw_table(ui: &mut Ui, dataset: &Dataset, rows: &[usize], columns: &[String]) -> Vec<String> {
    let mut toggled = Vec::new();

    egui::CollapsingHeader::new("My Database")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal_wrapped(|ui: &mut Ui| {
                ui.label("filter:");
                for col in &dataset.column_names {
                    let mut shown = columns.contains(col);
                    if ui.checkbox(&mut shown, col.as_str()).changed() {
                        toggled.push(col.clone());
                    }
                }
            });

            if columns.is_empty() {
                ui.weak("No columns selected.");
                return;
            }
            ui.weak(format!("{} rows", rows.len()));

            ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .max_scroll_height(300.0)
                    .columns(Column::auto().resizable(true), columns.len())
                    .header(20.0, |mut header| {
                        for col in columns {
                            header.col(|ui| {
                                ui.strong(col);
                            });
                        }
                    })
                    .body(|body| {
                        body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                            let record = &dataset.records[rows[row.index()]];
                            for col in columns {
                                row.col(|ui| {
                                    ui.label(record.cell(col).to_string());
                                });
                            }
                        });
                    });
            });
        });

    toggled
}
