/// Aggregation layer: everything derived from a filtered view.
///
/// ```text
///   FilteredView ──┬──▶ metrics   sum / mode / mean / median, rating total
///                  ├──▶ charts    counts per category, rating share
///                  └──▶ progress  percent of the investment target
/// ```
///
/// `report` runs all three for one selection.

pub mod charts;
pub mod metrics;
pub mod progress;
pub mod report;
