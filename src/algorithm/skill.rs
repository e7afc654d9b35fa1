//! Skill-tier statistics for the restricted population
//!
//! Wage and LFP by education tier for one sex within an age band (by default
//! men aged 25 to 64). Records with an unknown tier are left out.

use std::time::Instant;

use crate::algorithm::aggregate::{GroupedAggregator, Statistic};
use crate::config::SkillPopulation;
use crate::models::aggregate::SkillAggregate;
use crate::models::survey::{EducationTier, SurveyRecord};
use crate::utils::logging::log_stage;

impl SkillPopulation {
    /// Whether a record belongs to the restricted population
    #[must_use]
    pub fn includes(&self, record: &SurveyRecord) -> bool {
        record.sex == self.sex && record.age >= self.min_age && record.age <= self.max_age
    }
}

/// Aggregator keyed by `(year, tier)` over the restricted population
#[must_use]
pub fn skill_aggregator(
    population: SkillPopulation,
) -> GroupedAggregator<SurveyRecord, (i32, EducationTier)> {
    GroupedAggregator::new(move |r: &SurveyRecord| {
        (population.includes(r) && r.education_tier.is_known())
            .then_some((r.year, r.education_tier))
    })
    .statistic(Statistic::new("wage", |r: &SurveyRecord| r.wage))
    .statistic(Statistic::new("lfp", SurveyRecord::lfp_value))
}

/// One row per year and known tier, sorted by year then skilled, semiskilled,
/// unskilled
#[must_use]
pub fn skill_aggregates(
    records: &[SurveyRecord],
    population: SkillPopulation,
) -> Vec<SkillAggregate> {
    let start = Instant::now();
    let rows: Vec<SkillAggregate> = skill_aggregator(population)
        .aggregate(records)
        .into_iter()
        .map(|row| SkillAggregate {
            year: row.key.0,
            tier: row.key.1,
            wage: row.get("wage"),
            lfp: row.get("lfp"),
            real_wage: None,
        })
        .collect();
    log_stage("Skill aggregation", records.len(), rows.len(), start.elapsed());
    rows
}
