use crate::data::filter::{apply, FilterSelection};
use crate::data::model::Dataset;
use crate::error::PipelineError;

use super::charts::ChartSeries;
use super::metrics::MetricsSnapshot;
use super::progress::Progress;

/// Outputs of one synchronous pass over the current selection.
///
/// Each component is computed independently so a page can render what
/// succeeded before the first failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Dataset indices of the filtered records, for the raw table.
    pub rows: Vec<usize>,
    pub metrics: Result<MetricsSnapshot, PipelineError>,
    pub charts: Result<ChartSeries, PipelineError>,
    pub progress: Result<Progress, PipelineError>,
}

impl Report {
    /// Validate the selection, then filter and aggregate from scratch.
    pub fn run(
        dataset: &Dataset,
        selection: &FilterSelection,
        target: f64,
    ) -> Result<Self, PipelineError> {
        selection.validate()?;

        let view = apply(dataset, selection);
        if view.is_empty() {
            log::debug!("selection matches no records");
        } else {
            log::debug!("report pass over {} of {} records", view.len(), dataset.len());
        }

        Ok(Report {
            rows: view.rows().to_vec(),
            metrics: MetricsSnapshot::compute(&view),
            charts: ChartSeries::build(&view),
            progress: Progress::compute(&view, target),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::data::model::{fixtures, Dimension};

    #[test]
    fn north_only_pass_derives_from_north_records() {
        let ds = fixtures::sample();
        let mut sel = FilterSelection::all(&ds);
        sel.regions = BTreeSet::from(["North".to_string()]);

        let report = Report::run(&ds, &sel, 4_500_000.0).unwrap();
        assert_eq!(report.rows, [0, 2, 4]);
        assert!(report.rows.iter().all(|&i| ds.records[i].region == "North"));

        // North amounts are all distinct
        assert!(report.metrics.is_err());
        let charts = report.charts.unwrap();
        assert_eq!(charts.total_investment, 2_250_000);
        let progress = report.progress.unwrap();
        assert_eq!(progress.percent, 50);
    }

    #[test]
    fn empty_dimension_rejects_the_pass() {
        let ds = fixtures::sample();
        let mut sel = FilterSelection::all(&ds);
        sel.select_none(Dimension::Region);
        assert_eq!(
            Report::run(&ds, &sel, 1.0),
            Err(PipelineError::EmptySelection(Dimension::Region))
        );
    }

    #[test]
    fn empty_intersection_still_reports_progress() {
        let ds = fixtures::sample();
        let mut sel = FilterSelection::all(&ds);
        sel.regions = BTreeSet::from(["North".to_string()]);
        sel.locations = BTreeSet::from(["Rural".to_string()]);
        sel.constructions = BTreeSet::from(["Frame".to_string()]);

        let report = Report::run(&ds, &sel, 1_000.0).unwrap();
        assert!(report.rows.is_empty());
        assert!(report.metrics.is_err());
        assert!(report.charts.is_err());
        assert_eq!(report.progress.unwrap().percent, 0);
    }
}
