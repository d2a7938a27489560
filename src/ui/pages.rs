use eframe::egui::{self, Color32, Frame, ProgressBar, RichText, Ui};

use crate::analytics::metrics::MetricsSnapshot;
use crate::analytics::progress::ProgressState;
use crate::error::PipelineError;
use crate::format::{abbreviate, thousands};
use crate::state::{AppState, Page};
use crate::ui::{charts, table};

/// The only message a failed page shows, whatever the cause.
pub const MANDATORY_WARNING: &str = "one or more options are mandatory !";

/// Render the active page. Whatever rendered before a failure stays; the
/// rest is replaced by the generic warning.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    let result = match state.page {
        Page::Home => home(ui, state),
        Page::Progress => progress(ui, state),
    };
    if result.is_err() {
        ui.colored_label(
            Color32::from_rgb(0xE6, 0xA2, 0x3C),
            format!("⚠ {MANDATORY_WARNING}"),
        );
    }
}

// ---------------------------------------------------------------------------
// Home: raw table, metric cards, charts
// ---------------------------------------------------------------------------

fn home(ui: &mut Ui, state: &mut AppState) -> Result<(), PipelineError> {
    let toggled = table::raw_table(
        ui,
        &state.dataset,
        state.table_rows(),
        &state.table_columns,
    );
    for col in toggled {
        state.toggle_table_column(&col);
    }

    let report = state.report.as_ref().map_err(Clone::clone)?;
    let metrics = report.metrics.as_ref().map_err(Clone::clone)?;
    metric_cards(ui, metrics, &state.config.currency);
    ui.separator();

    let series = report.charts.as_ref().map_err(Clone::clone)?;
    charts::chart_row(ui, series, &state.state_colors, &state.config.currency);
    Ok(())
}

fn metric_cards(ui: &mut Ui, m: &MetricsSnapshot, currency: &str) {
    let cards = [
        ("Total Investment", "sum", m.total_investment),
        ("Most Frequently", "Mode", m.investment_mode),
        ("Investment AVG", "Mean", m.investment_mean),
        ("Investment Margin", "Median", m.investment_median),
    ];
    ui.columns(5, |cols| {
        for (col, (title, stat, value)) in cols.iter_mut().zip(cards) {
            card(col, title, &format!("{stat} {currency}"), &thousands(value));
        }
        card(&mut cols[4], "Ratings", "Ratings", &abbreviate(m.total_rating))
            .on_hover_text(format!("Total rating: {}", m.total_rating));
    });
}

/// One metric card. Returns the value label's response for hover text.
fn card(ui: &mut Ui, title: &str, label: &str, value: &str) -> egui::Response {
    Frame::group(ui.style())
        .show(ui, |ui: &mut Ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new(format!("🔍 {title}")).strong());
            ui.small(label);
            ui.heading(value)
        })
        .inner
}

// ---------------------------------------------------------------------------
// Progress: target bar, then charts
// ---------------------------------------------------------------------------

fn progress(ui: &mut Ui, state: &mut AppState) -> Result<(), PipelineError> {
    let report = state.report.as_ref().map_err(Clone::clone)?;
    let progress = report.progress.as_ref().map_err(Clone::clone)?;

    match progress.state {
        ProgressState::Complete => {
            ui.add(ProgressBar::new(0.0));
            ui.heading("Target 100 completed");
        }
        ProgressState::InProgress => {
            ui.label(format!(
                "you have {} % of {} {}",
                progress.percent,
                thousands(progress.target),
                state.config.currency
            ));
            let shown = state
                .animation
                .as_ref()
                .map_or(progress.percent, |a| a.shown());
            ui.add(
                ProgressBar::new(shown as f32 / 100.0)
                    .text(format!("Target percentage  {shown} %")),
            );
        }
    }
    ui.weak(format!(
        "Current: {} {}",
        thousands(progress.current),
        state.config.currency
    ));
    ui.separator();

    let series = report.charts.as_ref().map_err(Clone::clone)?;
    charts::chart_row(ui, series, &state.state_colors, &state.config.currency);
    Ok(())
}
