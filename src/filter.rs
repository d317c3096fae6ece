//! Filter engine: narrows the dataset by Product type and Location.
//!
//! Membership is an exact, case-sensitive match on the raw cell value. An
//! empty selected set matches nothing; it never means "all".

use std::collections::HashSet;

use crate::data::{CategoryColumn, Dataset, Record};

/// Selected values for the two filter dimensions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    product_types: HashSet<String>,
    locations: HashSet<String>,
}

impl FilterSelection {
    pub fn new<P, L, S, T>(product_types: P, locations: L) -> Self
    where
        P: IntoIterator<Item = S>,
        L: IntoIterator<Item = T>,
        S: Into<String>,
        T: Into<String>,
    {
        Self {
            product_types: product_types.into_iter().map(Into::into).collect(),
            locations: locations.into_iter().map(Into::into).collect(),
        }
    }

    /// Every observed value of both dimensions (the startup default).
    pub fn all(dataset: &Dataset) -> Self {
        Self::new(dataset.product_types(), dataset.locations())
    }

    /// Replace the selected Product types.
    pub fn with_product_types<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.product_types = values.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the selected Locations.
    pub fn with_locations<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locations = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn product_types(&self) -> &HashSet<String> {
        &self.product_types
    }

    pub fn locations(&self) -> &HashSet<String> {
        &self.locations
    }

    /// True when either dimension has nothing selected.
    pub fn is_empty(&self) -> bool {
        self.product_types.is_empty() || self.locations.is_empty()
    }

    /// Whether a record passes both membership predicates.
    ///
    /// A null Product type or Location never matches.
    pub fn matches(&self, record: &Record) -> bool {
        let member = |set: &HashSet<String>, column: CategoryColumn| {
            column
                .value(record)
                .is_some_and(|v| set.contains(v))
        };
        member(&self.product_types, CategoryColumn::ProductType)
            && member(&self.locations, CategoryColumn::Location)
    }
}

/// The records of a dataset that pass a [`FilterSelection`], in dataset order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredView<'a> {
    records: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    /// A view over every record of the dataset.
    pub fn full(dataset: &'a Dataset) -> Self {
        Self {
            records: dataset.records().iter().collect(),
        }
    }

    /// Build a view from borrowed records (for callers that already hold a subset).
    pub fn from_records(records: Vec<&'a Record>) -> Self {
        Self { records }
    }

    /// Apply a selection on top of this view.
    pub fn refilter(&self, selection: &FilterSelection) -> FilteredView<'a> {
        FilteredView {
            records: self
                .records
                .iter()
                .copied()
                .filter(|r| selection.matches(r))
                .collect(),
        }
    }

    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Produce the filtered view of `dataset` for `selection`.
pub fn filter<'a>(dataset: &'a Dataset, selection: &FilterSelection) -> FilteredView<'a> {
    let view = FilteredView {
        records: dataset
            .records()
            .iter()
            .filter(|r| selection.matches(r))
            .collect(),
    };
    tracing::debug!(
        total = dataset.len(),
        matched = view.len(),
        product_types = selection.product_types.len(),
        locations = selection.locations.len(),
        "applied filter selection"
    );
    view
}
