//! Report assembly
//!
//! Runs the stages in order (recode, aggregate, deflate, reshape) over an
//! explicitly passed dataset and collects the tables handed to presentation
//! code.

pub mod summary;
pub mod writer;

use std::time::Instant;

use crate::algorithm::deflate::deflate;
use crate::algorithm::recode::{RecodeReport, recode_records};
use crate::algorithm::reshape::{age_lfp_long, skill_long};
use crate::algorithm::skill::skill_aggregates;
use crate::algorithm::yearly::yearly_aggregates;
use crate::config::ReportConfig;
use crate::error::Result;
use crate::loader::read_survey_file;
use crate::lookup::deflator::DeflatorTable;
use crate::models::aggregate::{SkillAggregate, SkillMetric, YearlyAggregate};
use crate::models::survey::{RawSurveyRecord, SurveyRecord};
use crate::models::table::LongTable;

pub use summary::render_summary;
pub use writer::write_report;

/// Every table produced by one run
#[derive(Debug, Clone)]
pub struct SurveyReport {
    /// Counts from the recoding stage
    pub recode: RecodeReport,
    /// Version of the deflator table used
    pub deflator_version: String,
    /// Year-indexed summary, constant-dollar wages filled in
    pub yearly: Vec<YearlyAggregate>,
    /// Year-by-tier summary for the restricted population
    pub skill: Vec<SkillAggregate>,
    /// Year by age-group LFP
    pub lfp_by_age: LongTable,
    /// Year by tier constant-dollar wage
    pub wage_by_skill: LongTable,
    /// Year by tier LFP
    pub lfp_by_skill: LongTable,
}

impl SurveyReport {
    /// Build the report from raw extract rows
    pub fn build(
        raw: &[RawSurveyRecord],
        config: &ReportConfig,
        deflators: &DeflatorTable,
    ) -> Result<Self> {
        let (records, recode) = recode_records(raw, config.min_age_exclusive);
        Self::from_records(&records, recode, config, deflators)
    }

    /// Build the report from already recoded records
    ///
    /// # Errors
    /// `OutOfRange` when a survey year is not covered by `deflators`.
    pub fn from_records(
        records: &[SurveyRecord],
        recode: RecodeReport,
        config: &ReportConfig,
        deflators: &DeflatorTable,
    ) -> Result<Self> {
        let start = Instant::now();

        let yearly = deflate(&yearly_aggregates(records), deflators)?;
        let skill = deflate(
            &skill_aggregates(records, config.skill_population),
            deflators,
        )?;

        let lfp_by_age = age_lfp_long(&yearly)?;
        let wage_by_skill = skill_long(&skill, SkillMetric::RealWage)?;
        let lfp_by_skill = skill_long(&skill, SkillMetric::Lfp)?;

        log::info!(
            "Built report over {} years from {} records in {:?}",
            yearly.len(),
            records.len(),
            start.elapsed()
        );

        Ok(Self {
            recode,
            deflator_version: deflators.version.clone(),
            yearly,
            skill,
            lfp_by_age,
            wage_by_skill,
            lfp_by_skill,
        })
    }

    /// First and last survey year in the report
    #[must_use]
    pub fn year_range(&self) -> Option<(i32, i32)> {
        Some((self.yearly.first()?.year, self.yearly.last()?.year))
    }

    /// Summary row of one year
    #[must_use]
    pub fn year(&self, year: i32) -> Option<&YearlyAggregate> {
        self.yearly.iter().find(|r| r.year == year)
    }
}

/// Deflator table for a run: the configured JSON file or the built-in table
pub fn load_deflators(config: &ReportConfig) -> Result<DeflatorTable> {
    match &config.deflator_path {
        Some(path) => {
            let table = DeflatorTable::from_json_file(path)?;
            log::info!(
                "Using deflator table {} from {}",
                table.version,
                path.display()
            );
            Ok(table)
        }
        None => Ok(DeflatorTable::cpi99()),
    }
}

/// Load the configured extract and build the report
pub fn run(config: &ReportConfig) -> Result<SurveyReport> {
    log::info!("{config}");
    let deflators = load_deflators(config)?;
    let raw = read_survey_file(&config.input_path, config.batch_size)?;
    SurveyReport::build(&raw, config, &deflators)
}
