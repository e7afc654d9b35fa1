//! Weighted aggregation and wage deflation for CPS labor-force microdata.
//!
//! Loads a survey extract, recodes each respondent, computes weighted means by
//! year and subgroup, converts nominal wages to constant dollars and reshapes
//! the results into tables for charting.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod loader;
pub mod lookup;
pub mod models;
pub mod report;
pub mod utils;

// Re-export the most common types for easier use
pub use config::{ReportConfig, SkillPopulation};
pub use error::{Result, SurveyError};
pub use loader::read_survey_file;
pub use lookup::{DeflatorTable, TARGET_BASIS_MULTIPLIER};
pub use models::{
    EducationTier, LongTable, RawSurveyRecord, SkillAggregate, SurveyRecord, WideTable,
    YearlyAggregate,
};
pub use report::{SurveyReport, render_summary, write_report};
