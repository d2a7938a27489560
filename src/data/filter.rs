use std::collections::BTreeSet;

use super::model::{Dataset, Dimension, Record};
use crate::error::PipelineError;

// ---------------------------------------------------------------------------
// FilterSelection: which category values are selected per dimension
// ---------------------------------------------------------------------------

/// Selected values for each of the three filter dimensions.
///
/// An empty set matches nothing. [`FilterSelection::validate`] rejects it
/// before a report pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub regions: BTreeSet<String>,
    pub locations: BTreeSet<String>,
    pub constructions: BTreeSet<String>,
}

impl FilterSelection {
    /// Every distinct value of every dimension selected (i.e., show everything).
    pub fn all(dataset: &Dataset) -> Self {
        let mut sel = FilterSelection::default();
        for dim in Dimension::ALL {
            sel.select_all(dataset, dim);
        }
        sel
    }

    pub fn set(&self, dimension: Dimension) -> &BTreeSet<String> {
        match dimension {
            Dimension::Region => &self.regions,
            Dimension::Location => &self.locations,
            Dimension::Construction => &self.constructions,
        }
    }

    pub fn set_mut(&mut self, dimension: Dimension) -> &mut BTreeSet<String> {
        match dimension {
            Dimension::Region => &mut self.regions,
            Dimension::Location => &mut self.locations,
            Dimension::Construction => &mut self.constructions,
        }
    }

    pub fn contains(&self, dimension: Dimension, value: &str) -> bool {
        self.set(dimension).contains(value)
    }

    /// Toggle a single value in a dimension.
    pub fn toggle(&mut self, dimension: Dimension, value: &str) {
        let set = self.set_mut(dimension);
        if !set.remove(value) {
            set.insert(value.to_string());
        }
    }

    pub fn select_all(&mut self, dataset: &Dataset, dimension: Dimension) {
        *self.set_mut(dimension) = dataset.distinct(dimension).iter().cloned().collect();
    }

    pub fn select_none(&mut self, dimension: Dimension) {
        self.set_mut(dimension).clear();
    }

    /// Three-way "IN" predicate: each dimension's value must be selected.
    pub fn matches(&self, record: &Record) -> bool {
        Dimension::ALL
            .iter()
            .all(|&dim| self.contains(dim, record.category(dim)))
    }

    /// Reject selections with an empty dimension.
    pub fn validate(&self) -> Result<(), PipelineError> {
        match Dimension::ALL.into_iter().find(|&d| self.set(d).is_empty()) {
            Some(dim) => Err(PipelineError::EmptySelection(dim)),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// FilteredView: the records passing a selection
// ---------------------------------------------------------------------------

/// Records of a [`Dataset`] that satisfy a [`FilterSelection`], in dataset
/// order. Holds row indices into the borrowed dataset.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    rows: Vec<usize>,
}

impl PartialEq for FilteredView<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.dataset, other.dataset) && self.rows == other.rows
    }
}

impl<'a> FilteredView<'a> {
    /// Dataset indices of the kept records.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        let dataset: &'a Dataset = self.dataset;
        self.rows.iter().map(move |&i| &dataset.records[i])
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Investment column of the view.
    pub fn investments(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().map(|r| r.investment)
    }

    /// Rating column of the view.
    pub fn ratings(&self) -> impl Iterator<Item = f64> + '_ {
        self.iter().map(|r| r.rating)
    }

    /// Apply a selection on top of this view.
    pub fn refine(&self, selection: &FilterSelection) -> FilteredView<'a> {
        FilteredView {
            dataset: self.dataset,
            rows: self
                .rows
                .iter()
                .copied()
                .filter(|&i| selection.matches(&self.dataset.records[i]))
                .collect(),
        }
    }
}

/// Return the records of `dataset` that pass `selection`.
pub fn apply<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilteredView<'a> {
    FilteredView {
        dataset,
        rows: dataset
            .records
            .iter()
            .enumerate()
            .filter(|(_, r)| selection.matches(r))
            .map(|(i, _)| i)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures;

    #[test]
    fn kept_records_belong_to_dataset_and_selection() {
        let ds = fixtures::sample();
        let mut sel = FilterSelection::all(&ds);
        sel.toggle(Dimension::Location, "Rural");
        sel.toggle(Dimension::Construction, "Frame");

        let view = apply(&ds, &sel);
        assert_eq!(view.len(), 2);
        for (&i, rec) in view.rows().iter().zip(view.iter()) {
            assert_eq!(&ds.records[i], rec);
            for dim in Dimension::ALL {
                assert!(sel.contains(dim, rec.category(dim)));
            }
        }
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = fixtures::sample();
        let mut sel = FilterSelection::all(&ds);
        sel.toggle(Dimension::Construction, "Masonry");

        let once = apply(&ds, &sel);
        assert_eq!(once.refine(&sel), once);
    }

    #[test]
    fn everything_selected_keeps_dataset() {
        let ds = fixtures::sample();
        let view = apply(&ds, &FilterSelection::all(&ds));
        assert_eq!(view.len(), ds.len());
        assert!(view.iter().zip(&ds.records).all(|(a, b)| a == b));
    }

    #[test]
    fn single_region_scenario() {
        let ds = fixtures::sample();
        let mut sel = FilterSelection::all(&ds);
        sel.regions = BTreeSet::from(["North".to_string()]);

        let view = apply(&ds, &sel);
        assert_eq!(view.len(), 3);
        assert!(view.iter().all(|r| r.region == "North"));
    }

    #[test]
    fn empty_set_yields_empty_view_and_fails_validation() {
        let ds = fixtures::sample();
        let mut sel = FilterSelection::all(&ds);
        sel.select_none(Dimension::Location);

        assert!(apply(&ds, &sel).is_empty());
        assert_eq!(
            sel.validate(),
            Err(PipelineError::EmptySelection(Dimension::Location))
        );
    }

    #[test]
    fn disjoint_selection_is_valid_but_empty() {
        let ds = fixtures::sample();
        let mut sel = FilterSelection::all(&ds);
        sel.regions = BTreeSet::from(["North".to_string()]);
        sel.constructions = BTreeSet::from(["Frame".to_string()]);
        sel.locations = BTreeSet::from(["Rural".to_string()]);

        assert_eq!(sel.validate(), Ok(()));
        assert!(apply(&ds, &sel).is_empty());
    }

    #[test]
    fn toggle_and_select_all() {
        let ds = fixtures::sample();
        let mut sel = FilterSelection::all(&ds);
        sel.toggle(Dimension::Region, "South");
        assert!(!sel.contains(Dimension::Region, "South"));
        sel.toggle(Dimension::Region, "South");
        assert!(sel.contains(Dimension::Region, "South"));

        sel.select_none(Dimension::Region);
        sel.select_all(&ds, Dimension::Region);
        assert_eq!(sel, FilterSelection::all(&ds));
    }
}
