//! Weighted means with missing-value skipping

use crate::error::{Result, SurveyError};

/// Records that carry a sampling weight
pub trait Weighted {
    /// Sampling weight of the record
    fn weight(&self) -> f64;
}

impl Weighted for crate::models::survey::SurveyRecord {
    fn weight(&self) -> f64 {
        self.weight
    }
}

/// Running `sum(value * weight) / sum(weight)`
///
/// Missing values are left out of both sums. Non-finite or negative weights
/// are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedMean {
    weighted_sum: f64,
    total_weight: f64,
    count: usize,
}

impl WeightedMean {
    /// Add one observation
    pub fn add(&mut self, value: Option<f64>, weight: f64) {
        let Some(value) = value else { return };
        if !value.is_finite() || !weight.is_finite() || weight < 0.0 {
            return;
        }
        self.weighted_sum += value * weight;
        self.total_weight += weight;
        self.count += 1;
    }

    /// Observations that contributed
    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    /// Sum of eligible weights
    #[must_use]
    pub const fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// The mean, or `None` when no eligible weight was seen
    #[must_use]
    pub fn mean(&self) -> Option<f64> {
        (self.total_weight > 0.0).then(|| self.weighted_sum / self.total_weight)
    }

    /// The mean, failing with `EmptyGroup` when it is undefined
    pub fn require(&self, statistic: &str) -> Result<f64> {
        self.mean().ok_or_else(|| SurveyError::EmptyGroup {
            statistic: statistic.to_string(),
        })
    }
}

impl FromIterator<(Option<f64>, f64)> for WeightedMean {
    fn from_iter<I: IntoIterator<Item = (Option<f64>, f64)>>(iter: I) -> Self {
        let mut acc = Self::default();
        for (value, weight) in iter {
            acc.add(value, weight);
        }
        acc
    }
}

/// Weighted mean of `(value, weight)` pairs, skipping missing values
#[must_use]
pub fn weighted_mean<I>(pairs: I) -> Option<f64>
where
    I: IntoIterator<Item = (Option<f64>, f64)>,
{
    pairs.into_iter().collect::<WeightedMean>().mean()
}
