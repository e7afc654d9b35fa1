//! Wide and long table shapes handed to presentation code

use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SurveyError};
use crate::models::aggregate::{SkillAggregate, SkillMetric, YearlyAggregate};
use crate::models::survey::EducationTier;

/// Year-indexed table with one column per series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WideTable {
    years: Vec<i32>,
    columns: Vec<(String, Vec<Option<f64>>)>,
}

impl WideTable {
    /// Create an empty table over the given years
    #[must_use]
    pub fn new(years: Vec<i32>) -> Self {
        Self {
            years,
            columns: Vec::new(),
        }
    }

    /// Append a column; it must have one value per year
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<Option<f64>>) -> Result<Self> {
        let name = name.into();
        if values.len() != self.years.len() {
            return Err(SurveyError::schema_mismatch(format!(
                "column `{name}` has {} values for {} years",
                values.len(),
                self.years.len()
            )));
        }
        if self.column(&name).is_some() {
            return Err(SurveyError::schema_mismatch(format!(
                "column `{name}` added twice"
            )));
        }
        self.columns.push((name, values));
        Ok(self)
    }

    /// Select columns of the yearly summary
    pub fn from_yearly(rows: &[YearlyAggregate], columns: &[&str]) -> Result<Self> {
        let mut table = Self::new(rows.iter().map(|r| r.year).collect());
        for &name in columns {
            let values = rows
                .iter()
                .map(|r| r.column(name))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| SurveyError::UnknownSeries(name.to_string()))?;
            table = table.with_column(name, values)?;
        }
        Ok(table)
    }

    /// Pivot year-by-tier rows into one column per known tier
    ///
    /// Years missing a tier get a `None` cell.
    #[must_use]
    pub fn from_skill(rows: &[SkillAggregate], metric: SkillMetric) -> Self {
        let years: Vec<i32> = rows.iter().map(|r| r.year).sorted().dedup().collect();
        let cells: FxHashMap<(i32, EducationTier), Option<f64>> = rows
            .iter()
            .map(|r| ((r.year, r.tier), r.metric(metric)))
            .collect();

        let columns = EducationTier::KNOWN
            .iter()
            .map(|tier| {
                let values = years
                    .iter()
                    .map(|year| cells.get(&(*year, *tier)).copied().flatten())
                    .collect();
                (tier.label().to_string(), values)
            })
            .collect();

        Self { years, columns }
    }

    /// Years, one per row
    #[must_use]
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Values of a column by name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    /// Column names in insertion order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    /// Number of rows
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.years.len()
    }
}

/// One observation of a long table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongRow {
    /// Survey year
    pub year: i32,
    /// Series label
    pub category: String,
    /// Value of the series in that year
    pub value: Option<f64>,
}

/// Tidy table: one row per year and series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LongTable {
    /// Category labels in legend order
    pub categories: Vec<String>,
    /// Rows, year-major, categories in legend order within each year
    pub rows: Vec<LongRow>,
}

impl LongTable {
    /// Rows belonging to one category, in year order
    pub fn series<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a LongRow> + 'a {
        self.rows.iter().filter(move |r| r.category == category)
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
