use std::collections::BTreeMap;

use super::metrics::mean;
use crate::data::filter::FilteredView;
use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// Chart payloads
// ---------------------------------------------------------------------------

/// Number of records in one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// One slice of the rating pie.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingShare {
    pub state: String,
    pub rating: f64,
    /// Share of the view's total rating, 0–100.
    pub percent: f64,
}

/// Aggregates behind the three dashboard charts.
///
/// Counts are record frequencies per category, not summed investment.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    /// Horizontal bar chart, ascending by count.
    pub by_business_type: Vec<CategoryCount>,
    /// Line chart, ordered by state name.
    pub by_state: Vec<CategoryCount>,
    /// Pie chart, ordered by state name.
    pub rating_share: Vec<RatingShare>,
    /// Investment sum with the fraction dropped.
    pub total_investment: i64,
    /// Mean rating to one decimal.
    pub mean_rating: f64,
    /// Mean investment to two decimals.
    pub mean_investment: f64,
    /// Number of rating stars: `mean_rating` to the nearest whole number.
    pub stars: usize,
}

impl ChartSeries {
    pub fn build(view: &FilteredView<'_>) -> Result<Self, PipelineError> {
        let mean_rating = mean(view.ratings()).ok_or(PipelineError::EmptyView {
            statistic: "mean rating",
        })?;
        let mean_investment = mean(view.investments()).ok_or(PipelineError::EmptyView {
            statistic: "mean investment",
        })?;
        let mean_rating = round_to(mean_rating, 1);

        Ok(ChartSeries {
            by_business_type: business_type_counts(view),
            by_state: state_counts(view),
            rating_share: rating_share(view),
            total_investment: view.investments().sum::<f64>() as i64,
            mean_rating,
            mean_investment: round_to(mean_investment, 2),
            stars: mean_rating.round_ties_even().max(0.0) as usize,
        })
    }

    /// The star glyph repeated [`stars`](Self::stars) times.
    pub fn star_glyphs(&self) -> String {
        "⭐".repeat(self.stars)
    }
}

/// Records per business type, fewest first. Ties keep name order.
pub fn business_type_counts(view: &FilteredView<'_>) -> Vec<CategoryCount> {
    let mut counts = count_by(view.iter().map(|r| r.business_type.as_str()));
    counts.sort_by_key(|c| c.count);
    counts
}

/// Records per state, by state name.
pub fn state_counts(view: &FilteredView<'_>) -> Vec<CategoryCount> {
    count_by(view.iter().map(|r| r.state.as_str()))
}

/// Rating total per state and its share of the overall rating.
pub fn rating_share(view: &FilteredView<'_>) -> Vec<RatingShare> {
    let mut sums: BTreeMap<&str, f64> = BTreeMap::new();
    for r in view.iter() {
        *sums.entry(r.state.as_str()).or_default() += r.rating;
    }
    let total: f64 = sums.values().sum();
    sums.into_iter()
        .map(|(state, rating)| RatingShare {
            state: state.to_string(),
            rating,
            percent: if total == 0.0 {
                0.0
            } else {
                rating / total * 100.0
            },
        })
        .collect()
}

fn count_by<'a>(keys: impl Iterator<Item = &'a str>) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for k in keys {
        *counts.entry(k).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect()
}

/// Round half to even at `decimals` places.
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply, FilterSelection};
    use crate::data::model::{fixtures, Dataset, Dimension, REQUIRED_COLUMNS};

    fn names(counts: &[CategoryCount]) -> Vec<(&str, usize)> {
        counts
            .iter()
            .map(|c| (c.category.as_str(), c.count))
            .collect()
    }

    #[test]
    fn counts_cover_every_record() {
        let ds = fixtures::sample();
        let view = apply(&ds, &FilterSelection::all(&ds));
        let charts = ChartSeries::build(&view).unwrap();

        let total = |c: &[CategoryCount]| c.iter().map(|c| c.count).sum::<usize>();
        assert_eq!(total(&charts.by_business_type), view.len());
        assert_eq!(total(&charts.by_state), view.len());
    }

    #[test]
    fn business_types_ascend_by_count() {
        let ds = fixtures::sample();
        let view = apply(&ds, &FilterSelection::all(&ds));
        assert_eq!(
            names(&business_type_counts(&view)),
            [("Hotel", 1), ("Farming", 2), ("Retail", 3)]
        );
    }

    #[test]
    fn tied_business_types_keep_name_order() {
        let records = [
            ("Retail", "Arusha"),
            ("Office", "Arusha"),
            ("Retail", "Mbeya"),
            ("Farming", "Mbeya"),
            ("Hotel", "Iringa"),
            ("Farming", "Iringa"),
        ]
        .into_iter()
        .map(|(business, state)| {
            fixtures::record("North", "Urban", "Frame", business, state, 1.0, 1.0)
        })
        .collect();
        let ds = Dataset::from_records(
            records,
            REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        );
        let view = apply(&ds, &FilterSelection::all(&ds));
        assert_eq!(
            names(&business_type_counts(&view)),
            [("Hotel", 1), ("Office", 1), ("Farming", 2), ("Retail", 2)]
        );
    }

    #[test]
    fn states_in_name_order() {
        let ds = fixtures::sample();
        let view = apply(&ds, &FilterSelection::all(&ds));
        assert_eq!(
            names(&state_counts(&view)),
            [("Arusha", 2), ("Iringa", 2), ("Mbeya", 1), ("Mwanza", 1)]
        );
    }

    #[test]
    fn rating_share_sums_to_hundred() {
        let ds = fixtures::sample();
        let view = apply(&ds, &FilterSelection::all(&ds));
        let shares = rating_share(&view);

        let arusha = &shares[0];
        assert_eq!(arusha.state, "Arusha");
        assert_eq!(arusha.rating, 9.0);
        let total: f64 = shares.iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn zero_ratings_give_zero_percent() {
        let mut ds = fixtures::sample();
        for r in &mut ds.records {
            r.rating = 0.0;
        }
        let view = apply(&ds, &FilterSelection::all(&ds));
        assert!(rating_share(&view).iter().all(|s| s.percent == 0.0));
    }

    #[test]
    fn headline_figures() {
        let ds = fixtures::sample();
        let mut sel = FilterSelection::all(&ds);
        sel.regions.remove("South");
        let charts = ChartSeries::build(&apply(&ds, &sel)).unwrap();

        // North: 1M + 0.5M + 0.75M, ratings 4, 5, 4.5
        assert_eq!(charts.total_investment, 2_250_000);
        assert_eq!(charts.mean_rating, 4.5);
        assert_eq!(charts.mean_investment, 750_000.0);
        assert_eq!(charts.stars, 4);
        assert_eq!(charts.star_glyphs().chars().count(), 4);
        assert!(charts.by_state.iter().all(|c| c.category != "Mbeya"));
    }

    #[test]
    fn empty_view_is_an_error() {
        let ds = fixtures::sample();
        let mut sel = FilterSelection::all(&ds);
        sel.select_none(Dimension::Construction);
        assert!(matches!(
            ChartSeries::build(&apply(&ds, &sel)),
            Err(PipelineError::EmptyView { .. })
        ));
    }

    #[test]
    fn rounding_is_half_to_even() {
        assert_eq!(round_to(2.25, 1), 2.2);
        assert_eq!(round_to(0.125, 2), 0.12);
        assert_eq!(round_to(3.5, 0), 4.0);
    }
}
