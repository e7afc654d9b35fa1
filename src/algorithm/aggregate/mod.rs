//! Weighted aggregation stage

pub mod grouped;
pub mod weighted;

pub use grouped::{AggregateRow, GroupedAggregator, Statistic};
pub use weighted::{Weighted, WeightedMean, weighted_mean};
