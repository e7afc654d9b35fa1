//! Grouped weighted aggregation
//!
//! A [`GroupedAggregator`] partitions records by a key and evaluates an ordered
//! list of [`Statistic`]s on every group. Each statistic has its own value
//! selector and optional subgroup predicate, so one pass over the grouping can
//! produce several independently filtered means.

use std::fmt;
use std::hash::Hash;

use itertools::Itertools;
use rayon::prelude::*;

use super::weighted::{Weighted, WeightedMean};

type Selector<R> = Box<dyn Fn(&R) -> Option<f64> + Send + Sync>;
type Predicate<R> = Box<dyn Fn(&R) -> bool + Send + Sync>;
type KeyFn<R, K> = Box<dyn Fn(&R) -> Option<K> + Send + Sync>;

/// A named weighted mean over an optional subgroup
pub struct Statistic<R> {
    name: String,
    value: Selector<R>,
    predicate: Option<Predicate<R>>,
}

impl<R> Statistic<R> {
    /// Statistic over every record of the group
    pub fn new<F>(name: impl Into<String>, value: F) -> Self
    where
        F: Fn(&R) -> Option<f64> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            value: Box::new(value),
            predicate: None,
        }
    }

    /// Restrict the statistic to records matching `predicate`
    #[must_use]
    pub fn filtered<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&R) -> bool + Send + Sync + 'static,
    {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Name of the statistic
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    fn accepts(&self, record: &R) -> bool {
        self.predicate.as_ref().is_none_or(|p| p(record))
    }
}

impl<R: Weighted> Statistic<R> {
    /// Evaluate over one group
    pub fn evaluate<'a, I>(&self, members: I) -> Option<f64>
    where
        I: IntoIterator<Item = &'a R>,
        R: 'a,
    {
        members
            .into_iter()
            .filter(|r| self.accepts(r))
            .map(|r| ((self.value)(r), r.weight()))
            .collect::<WeightedMean>()
            .mean()
    }
}

impl<R> fmt::Debug for Statistic<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Statistic")
            .field("name", &self.name)
            .field("filtered", &self.predicate.is_some())
            .finish()
    }
}

/// Statistics computed for one group
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow<K> {
    /// Group key
    pub key: K,
    /// Weighted records in the group, before any statistic's predicate
    pub group_size: usize,
    /// `(statistic name, value)` in statistic order
    pub values: Vec<(String, Option<f64>)>,
}

impl<K> AggregateRow<K> {
    /// Value of a statistic by name; `None` for unknown names and empty groups
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| *v)
    }
}

/// Group-by-key weighted aggregation
pub struct GroupedAggregator<R, K> {
    key: KeyFn<R, K>,
    statistics: Vec<Statistic<R>>,
}

impl<R, K> GroupedAggregator<R, K>
where
    R: Weighted + Sync,
    K: Ord + Hash + Clone + Send + Sync,
{
    /// Group by `key`; records for which it returns `None` are left out
    pub fn new<F>(key: F) -> Self
    where
        F: Fn(&R) -> Option<K> + Send + Sync + 'static,
    {
        Self {
            key: Box::new(key),
            statistics: Vec::new(),
        }
    }

    /// Add a statistic; output columns follow insertion order
    #[must_use]
    pub fn statistic(mut self, statistic: Statistic<R>) -> Self {
        self.statistics.push(statistic);
        self
    }

    /// Names of the configured statistics
    pub fn statistic_names(&self) -> impl Iterator<Item = &str> {
        self.statistics.iter().map(Statistic::name)
    }

    /// Compute one row per group, sorted ascending by key
    #[must_use]
    pub fn aggregate(&self, records: &[R]) -> Vec<AggregateRow<K>> {
        let groups = records
            .iter()
            .filter_map(|r| (self.key)(r).map(|k| (k, r)))
            .into_group_map();

        let mut rows: Vec<AggregateRow<K>> = groups
            .into_par_iter()
            .map(|(key, members)| AggregateRow {
                key,
                group_size: members.len(),
                values: self
                    .statistics
                    .iter()
                    .map(|s| (s.name.clone(), s.evaluate(members.iter().copied())))
                    .collect(),
            })
            .collect();

        rows.sort_by(|a, b| a.key.cmp(&b.key));
        log::debug!(
            "Aggregated {} records into {} groups with {} statistics",
            records.len(),
            rows.len(),
            self.statistics.len()
        );
        rows
    }
}
