//! Year-indexed summary statistics

use std::time::Instant;

use crate::algorithm::aggregate::{AggregateRow, GroupedAggregator, Statistic};
use crate::models::aggregate::YearlyAggregate;
use crate::models::survey::{AgeGroup, Sex, SurveyRecord};
use crate::utils::logging::log_stage;

fn by_sex(sex: Sex) -> impl Fn(&SurveyRecord) -> bool + Send + Sync + 'static {
    move |r| r.sex == sex
}

fn wage(record: &SurveyRecord) -> Option<f64> {
    record.wage
}

/// Aggregator producing every column of [`YearlyAggregate`] except the
/// constant-dollar wages
#[must_use]
pub fn yearly_aggregator() -> GroupedAggregator<SurveyRecord, i32> {
    let mut aggregator = GroupedAggregator::new(|r: &SurveyRecord| Some(r.year))
        .statistic(Statistic::new("lfp_all", SurveyRecord::lfp_value))
        .statistic(Statistic::new("lfp_m", SurveyRecord::lfp_value).filtered(by_sex(Sex::Male)))
        .statistic(Statistic::new("lfp_f", SurveyRecord::lfp_value).filtered(by_sex(Sex::Female)));

    for group in AgeGroup::ALL {
        aggregator = aggregator.statistic(
            Statistic::new(group.lfp_column(), SurveyRecord::lfp_value)
                .filtered(move |r: &SurveyRecord| r.age_group == Some(group)),
        );
    }

    aggregator
        .statistic(Statistic::new("unemp", SurveyRecord::unemployment_value))
        .statistic(Statistic::new("skilled_share", SurveyRecord::skilled_value))
        .statistic(Statistic::new("wage_all", wage))
        .statistic(Statistic::new("wage_m", wage).filtered(by_sex(Sex::Male)))
        .statistic(Statistic::new("wage_f", wage).filtered(by_sex(Sex::Female)))
}

impl From<&AggregateRow<i32>> for YearlyAggregate {
    fn from(row: &AggregateRow<i32>) -> Self {
        Self {
            year: row.key,
            lfp_all: row.get("lfp_all"),
            lfp_m: row.get("lfp_m"),
            lfp_f: row.get("lfp_f"),
            lfp_under_25: row.get(AgeGroup::Under25.lfp_column()),
            lfp_25_44: row.get(AgeGroup::From25To44.lfp_column()),
            lfp_45_64: row.get(AgeGroup::From45To64.lfp_column()),
            lfp_65_plus: row.get(AgeGroup::From65.lfp_column()),
            unemp: row.get("unemp"),
            skilled_share: row.get("skilled_share"),
            wage_all: row.get("wage_all"),
            wage_m: row.get("wage_m"),
            wage_f: row.get("wage_f"),
            real_wage_all: None,
            real_wage_m: None,
            real_wage_f: None,
        }
    }
}

/// One summary row per survey year, ascending
#[must_use]
pub fn yearly_aggregates(records: &[SurveyRecord]) -> Vec<YearlyAggregate> {
    let start = Instant::now();
    let rows: Vec<YearlyAggregate> = yearly_aggregator()
        .aggregate(records)
        .iter()
        .map(YearlyAggregate::from)
        .collect();
    log_stage("Yearly aggregation", records.len(), rows.len(), start.elapsed());
    rows
}
