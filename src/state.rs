use std::sync::Arc;
use std::time::Instant;

use crate::analytics::progress::{ProgressAnimation, ProgressState};
use crate::analytics::report::Report;
use crate::color::ColorMap;
use crate::config::DashboardConfig;
use crate::data::filter::FilterSelection;
use crate::data::model::{Dataset, Dimension};
use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Progress,
}

impl Page {
    pub const ALL: [Page; 2] = [Page::Home, Page::Progress];

    pub fn label(self) -> &'static str {
        match self {
            Page::Home => "🏠 Home",
            Page::Progress => "👁 Progress",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded once at startup, shared read-only.
    pub dataset: Arc<Dataset>,

    pub config: DashboardConfig,

    /// Current filter selections.
    pub selection: FilterSelection,

    /// Active menu entry.
    pub page: Page,

    /// Columns shown in the raw table, in the order they were picked.
    pub table_columns: Vec<String>,

    /// Result of the latest pass over `selection`.
    pub report: Result<Report, PipelineError>,

    /// Fill animation of the progress bar, restarted by every pass.
    pub animation: Option<ProgressAnimation>,

    /// Pie colours per state.
    pub state_colors: ColorMap,
}

impl AppState {
    pub fn new(dataset: Arc<Dataset>, config: DashboardConfig) -> Self {
        let selection = FilterSelection::all(&dataset);
        let table_columns = config
            .table_columns
            .iter()
            .filter(|c| dataset.column_names.contains(c))
            .cloned()
            .collect();
        let state_colors = ColorMap::new(dataset.records.iter().map(|r| r.state.as_str()));

        let mut state = Self {
            dataset,
            config,
            selection,
            page: Page::Home,
            table_columns,
            report: Err(PipelineError::EmptyView { statistic: "report" }),
            animation: None,
            state_colors,
        };
        state.refresh();
        state
    }

    /// Recompute the report after any interaction.
    pub fn refresh(&mut self) {
        self.report = Report::run(&self.dataset, &self.selection, self.config.target);

        match &self.report {
            Ok(report) => {
                for err in [
                    report.metrics.as_ref().err(),
                    report.charts.as_ref().err(),
                    report.progress.as_ref().err(),
                ]
                .into_iter()
                .flatten()
                {
                    log::warn!("report component failed: {err}");
                }
            }
            Err(err) => log::warn!("report pass rejected: {err}"),
        }

        self.animation = match &self.report {
            Ok(Report {
                progress: Ok(p), ..
            }) if p.state == ProgressState::InProgress => Some(ProgressAnimation::start(
                p.percent,
                self.config.animation_step(),
                Instant::now(),
            )),
            _ => None,
        };
    }

    pub fn set_page(&mut self, page: Page) {
        if self.page != page {
            log::info!("switching to {page:?}");
        }
        self.page = page;
        self.refresh();
    }

    /// Toggle a single value in a dimension's filter.
    pub fn toggle(&mut self, dimension: Dimension, value: &str) {
        self.selection.toggle(dimension, value);
        self.refresh();
    }

    /// Select all values in a dimension.
    pub fn select_all(&mut self, dimension: Dimension) {
        self.selection.select_all(&self.dataset, dimension);
        self.refresh();
    }

    /// Deselect all values in a dimension.
    pub fn select_none(&mut self, dimension: Dimension) {
        self.selection.select_none(dimension);
        self.refresh();
    }

    /// Rows of the raw table. A rejected pass shows no rows.
    pub fn table_rows(&self) -> &[usize] {
        match &self.report {
            Ok(report) => &report.rows,
            Err(_) => &[],
        }
    }

    /// Show or hide a column of the raw table.
    pub fn toggle_table_column(&mut self, column: &str) {
        if let Some(pos) = self.table_columns.iter().position(|c| c == column) {
            self.table_columns.remove(pos);
        } else {
            self.table_columns.push(column.to_string());
        }
    }
}
