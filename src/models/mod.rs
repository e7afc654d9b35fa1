//! Domain models for the survey report
//!
//! Raw and recoded survey records, aggregate rows, and the wide/long table
//! shapes handed to presentation code.

pub mod aggregate;
pub mod survey;
pub mod table;

pub use aggregate::{SkillAggregate, SkillMetric, YearlyAggregate};
pub use survey::{
    AgeGroup, EducationTier, EmploymentStatus, RawSurveyRecord, Sex, SurveyRecord,
};
pub use table::{LongRow, LongTable, WideTable};
