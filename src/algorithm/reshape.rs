//! Reshape stage: wide tables to long (tidy) tables for multi-series charts

use crate::error::{Result, SurveyError};
use crate::models::aggregate::{SkillAggregate, SkillMetric, YearlyAggregate};
use crate::models::survey::{AgeGroup, EducationTier};
use crate::models::table::{LongRow, LongTable, WideTable};

/// Melt `table` into one row per year and series
///
/// `series` lists `(column, category label)` pairs; the output follows that
/// order within each year, so legends render in the caller's order rather
/// than alphabetically.
///
/// # Errors
/// `UnknownSeries` when a column is missing from the table, `SchemaMismatch`
/// when a category label is repeated.
pub fn reshape_long(table: &WideTable, series: &[(&str, &str)]) -> Result<LongTable> {
    let mut columns = Vec::with_capacity(series.len());
    let mut categories: Vec<String> = Vec::with_capacity(series.len());
    for (column, label) in series {
        let values = table
            .column(column)
            .ok_or_else(|| SurveyError::UnknownSeries((*column).to_string()))?;
        if categories.iter().any(|c| c == label) {
            return Err(SurveyError::schema_mismatch(format!(
                "category `{label}` listed twice"
            )));
        }
        columns.push(values);
        categories.push((*label).to_string());
    }

    let mut rows = Vec::with_capacity(table.num_rows() * series.len());
    for (i, year) in table.years().iter().enumerate() {
        for (values, category) in columns.iter().zip(&categories) {
            rows.push(LongRow {
                year: *year,
                category: category.clone(),
                value: values[i],
            });
        }
    }

    Ok(LongTable { categories, rows })
}

/// Melt with category labels equal to the column names, in the given order
pub fn reshape_long_ordered(table: &WideTable, order: &[&str]) -> Result<LongTable> {
    let series: Vec<(&str, &str)> = order.iter().map(|c| (*c, *c)).collect();
    reshape_long(table, &series)
}

/// Year by age-group LFP, age groups youngest first
pub fn age_lfp_long(rows: &[YearlyAggregate]) -> Result<LongTable> {
    let columns: Vec<&str> = AgeGroup::ALL.iter().map(|g| g.lfp_column()).collect();
    let wide = WideTable::from_yearly(rows, &columns)?;
    let series: Vec<(&str, &str)> = AgeGroup::ALL
        .iter()
        .map(|g| (g.lfp_column(), g.label()))
        .collect();
    reshape_long(&wide, &series)
}

/// Year by skill-tier table of one metric, skilled first
pub fn skill_long(rows: &[SkillAggregate], metric: SkillMetric) -> Result<LongTable> {
    let wide = WideTable::from_skill(rows, metric);
    let order: Vec<&str> = EducationTier::KNOWN.iter().map(|t| t.label()).collect();
    reshape_long_ordered(&wide, &order)
}
