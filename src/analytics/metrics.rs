use std::collections::HashMap;

use crate::data::filter::FilteredView;
use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// Scalar statistics over a filtered view
// ---------------------------------------------------------------------------

/// The five metric cards of the home page.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    pub total_investment: f64,
    pub investment_mode: f64,
    pub investment_mean: f64,
    pub investment_median: f64,
    pub total_rating: f64,
}

impl MetricsSnapshot {
    /// Compute every statistic from scratch. The first undefined one fails
    /// the whole snapshot.
    pub fn compute(view: &FilteredView<'_>) -> Result<Self, PipelineError> {
        Ok(MetricsSnapshot {
            total_investment: total_investment(view),
            investment_mode: investment_mode(view)?,
            investment_mean: investment_mean(view)?,
            investment_median: investment_median(view)?,
            total_rating: total_rating(view),
        })
    }
}

pub fn total_investment(view: &FilteredView<'_>) -> f64 {
    view.investments().sum()
}

pub fn total_rating(view: &FilteredView<'_>) -> f64 {
    view.ratings().sum()
}

pub fn investment_mean(view: &FilteredView<'_>) -> Result<f64, PipelineError> {
    mean(view.investments()).ok_or(PipelineError::EmptyView {
        statistic: "investment mean",
    })
}

pub fn investment_median(view: &FilteredView<'_>) -> Result<f64, PipelineError> {
    median(view.investments().collect()).ok_or(PipelineError::EmptyView {
        statistic: "investment median",
    })
}

/// Most frequent investment amount.
///
/// Only a unique mode is accepted: an empty view, or several amounts tied
/// for the highest count, is [`PipelineError::AmbiguousOrEmptyMode`].
pub fn investment_mode(view: &FilteredView<'_>) -> Result<f64, PipelineError> {
    let modes = modes(view.investments());
    match modes.as_slice() {
        [single] => Ok(*single),
        _ => Err(PipelineError::AmbiguousOrEmptyMode { modes: modes.len() }),
    }
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

/// All values sharing the highest frequency, ascending.
fn modes(values: impl Iterator<Item = f64>) -> Vec<f64> {
    let mut counts: HashMap<u64, usize> = HashMap::new();
    for v in values {
        // -0.0 and 0.0 are the same amount
        let v = if v == 0.0 { 0.0 } else { v };
        *counts.entry(v.to_bits()).or_default() += 1;
    }
    let Some(&top) = counts.values().max() else {
        return Vec::new();
    };
    let mut modes: Vec<f64> = counts
        .into_iter()
        .filter(|&(_, n)| n == top)
        .map(|(bits, _)| f64::from_bits(bits))
        .collect();
    modes.sort_by(f64::total_cmp);
    modes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply, FilterSelection};
    use crate::data::model::{fixtures, Dimension};

    #[test]
    fn snapshot_over_full_dataset() {
        let ds = fixtures::sample();
        let view = apply(&ds, &FilterSelection::all(&ds));
        let m = MetricsSnapshot::compute(&view).unwrap();

        assert_eq!(m.total_investment, 10_250_000.0);
        assert_eq!(m.investment_mode, 2_500_000.0);
        assert!((m.investment_mean - 10_250_000.0 / 6.0).abs() < 1e-6);
        // sorted: 0.5M 0.75M 1M 2.5M 2.5M 3M
        assert_eq!(m.investment_median, 1_750_000.0);
        assert_eq!(m.total_rating, 22.0);
    }

    #[test]
    fn sum_is_order_independent() {
        let ds = fixtures::sample();
        let view = apply(&ds, &FilterSelection::all(&ds));
        let reversed: f64 = view.rows().iter().rev().map(|&i| ds.records[i].investment).sum();
        assert_eq!(total_investment(&view), reversed);
    }

    #[test]
    fn empty_view_sums_to_zero_and_fails_the_rest() {
        let ds = fixtures::sample();
        let mut sel = FilterSelection::all(&ds);
        sel.select_none(Dimension::Region);
        let view = apply(&ds, &sel);

        assert_eq!(total_investment(&view), 0.0);
        assert_eq!(total_rating(&view), 0.0);
        assert!(matches!(
            investment_mean(&view),
            Err(PipelineError::EmptyView { .. })
        ));
        assert!(matches!(
            investment_median(&view),
            Err(PipelineError::EmptyView { .. })
        ));
        assert_eq!(
            investment_mode(&view),
            Err(PipelineError::AmbiguousOrEmptyMode { modes: 0 })
        );
        assert!(MetricsSnapshot::compute(&view).is_err());
    }

    #[test]
    fn tied_amounts_have_no_mode() {
        let ds = fixtures::sample();
        let mut sel = FilterSelection::all(&ds);
        sel.regions.remove("South");
        // North: 1M, 0.5M, 0.75M, all distinct
        let view = apply(&ds, &sel);
        assert_eq!(
            investment_mode(&view),
            Err(PipelineError::AmbiguousOrEmptyMode { modes: 3 })
        );
    }

    #[test]
    fn single_record_is_its_own_mode() {
        let ds = fixtures::sample();
        let mut sel = FilterSelection::all(&ds);
        sel.regions.remove("South");
        sel.constructions.retain(|c| c == "Concrete");
        let view = apply(&ds, &sel);
        assert_eq!(view.len(), 1);
        assert_eq!(investment_mode(&view), Ok(750_000.0));
    }

    #[test]
    fn median_of_odd_count() {
        assert_eq!(median(vec![3.0, 1.0, 2.0]), Some(2.0));
        assert_eq!(median(Vec::new()), None);
    }
}
