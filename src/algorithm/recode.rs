//! Recoding stage
//!
//! Turns raw extract rows into analysis-ready [`SurveyRecord`]s. Rows outside
//! the eligible population (age at or below the threshold) are dropped.
//! Malformed rows are excluded and counted instead of aborting the batch.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SurveyError};
use crate::lookup::education::education_tier;
use crate::models::survey::{
    AgeGroup, EmploymentStatus, IN_LABOR_FORCE_LABEL, RawSurveyRecord, Sex, SurveyRecord,
    is_missing, parse_number,
};
use crate::utils::logging::{log_stage, log_warning};

/// Counts collected while recoding a batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecodeReport {
    /// Rows handed to the stage
    pub input_rows: usize,
    /// Rows that came out as analysis-ready records
    pub retained: usize,
    /// Rows dropped for being at or below the age threshold
    pub excluded_underage: usize,
    /// Rows whose age could not be parsed
    pub malformed_age: usize,
    /// Rows with an unusable year, weight or sex
    pub malformed_other: usize,
}

impl RecodeReport {
    /// Total rows excluded as malformed
    #[must_use]
    pub const fn malformed(&self) -> usize {
        self.malformed_age + self.malformed_other
    }
}

fn malformed(row: usize, field: &'static str, value: Option<&str>) -> SurveyError {
    SurveyError::MalformedRecord {
        row,
        field,
        value: value.map(str::to_string),
    }
}

/// Labor-force membership; a missing status counts as a member (armed forces)
#[must_use]
pub fn labor_force_indicator(raw: Option<&str>) -> bool {
    match raw {
        Some(value) if !is_missing(Some(value)) => {
            value.trim().eq_ignore_ascii_case(IN_LABOR_FORCE_LABEL)
        }
        _ => true,
    }
}

fn parse_year(row: usize, raw: Option<&str>) -> Result<i32> {
    parse_number(raw)
        .filter(|y| y.fract() == 0.0 && (1.0..=9999.0).contains(y))
        .map(|y| y as i32)
        .ok_or_else(|| malformed(row, "year", raw))
}

/// Recode one row
///
/// Returns `Ok(None)` for rows outside the eligible population and
/// `Err(MalformedRecord)` for rows with an unusable required field.
pub fn recode_record(
    row: usize,
    raw: &RawSurveyRecord,
    min_age_exclusive: f64,
) -> Result<Option<SurveyRecord>> {
    let age = parse_number(raw.age.as_deref())
        .ok_or_else(|| malformed(row, "age", raw.age.as_deref()))?;
    if age <= min_age_exclusive {
        return Ok(None);
    }

    let year = parse_year(row, raw.year.as_deref())?;
    let weight = parse_number(raw.wtsupp.as_deref())
        .filter(|w| *w >= 0.0)
        .ok_or_else(|| malformed(row, "wtsupp", raw.wtsupp.as_deref()))?;
    let sex = raw
        .sex
        .as_deref()
        .and_then(Sex::parse)
        .ok_or_else(|| malformed(row, "sex", raw.sex.as_deref()))?;

    let employment = raw
        .empstatid
        .as_deref()
        .map_or(EmploymentStatus::Other, EmploymentStatus::from);

    Ok(Some(SurveyRecord {
        year,
        age,
        sex,
        employment,
        unemployed: employment.unemployment_indicator(),
        in_labor_force: labor_force_indicator(raw.lfp.as_deref()),
        education_tier: education_tier(raw.educ.as_deref()),
        wage: parse_number(raw.wage.as_deref()),
        weight,
        age_group: raw.age_group.as_deref().and_then(AgeGroup::parse),
    }))
}

/// Recode a batch of rows, excluding and counting malformed ones
#[must_use]
pub fn recode_records(
    raw: &[RawSurveyRecord],
    min_age_exclusive: f64,
) -> (Vec<SurveyRecord>, RecodeReport) {
    let start = Instant::now();
    let mut report = RecodeReport {
        input_rows: raw.len(),
        ..Default::default()
    };
    let mut records = Vec::with_capacity(raw.len());

    for (row, raw_record) in raw.iter().enumerate() {
        match recode_record(row, raw_record, min_age_exclusive) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => report.excluded_underage += 1,
            Err(SurveyError::MalformedRecord { field, row, value }) => {
                log::debug!("Excluding row {row}: unusable `{field}` value {value:?}");
                if field == "age" {
                    report.malformed_age += 1;
                } else {
                    report.malformed_other += 1;
                }
            }
            Err(e) => {
                log::debug!("Excluding row {row}: {e}");
                report.malformed_other += 1;
            }
        }
    }
    report.retained = records.len();

    if report.malformed() > 0 {
        log_warning(
            &format!(
                "Excluded {} malformed rows ({} with unparsable age)",
                report.malformed(),
                report.malformed_age
            ),
            None,
        );
    }
    log_stage("Recoding", report.input_rows, report.retained, start.elapsed());
    (records, report)
}
