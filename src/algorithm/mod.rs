//! Pipeline stages for the survey report
//!
//! Recoding, grouped weighted aggregation, deflation and reshaping. Each stage
//! takes its input by reference and returns new, immutable rows.

pub mod aggregate;
pub mod deflate;
pub mod recode;
pub mod reshape;
pub mod skill;
pub mod yearly;

pub use aggregate::{AggregateRow, GroupedAggregator, Statistic, Weighted, weighted_mean};
pub use deflate::{ConstantDollars, deflate};
pub use recode::{RecodeReport, recode_records};
pub use reshape::{age_lfp_long, reshape_long, reshape_long_ordered, skill_long};
pub use skill::skill_aggregates;
pub use yearly::yearly_aggregates;
