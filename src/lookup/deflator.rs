//! Year-indexed wage deflators
//!
//! The built-in table holds CPI99-style factors (CPI-U of 1999 over CPI-U of
//! the income year, which is the survey year minus one). Multiplying a nominal
//! wage by the factor and by [`TARGET_BASIS_MULTIPLIER`] expresses it in the
//! report's constant-dollar basis.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::util::safe_open_file;
use crate::error::{Result, SurveyError};

/// Converts 1999-basis dollars to the report's target-year basis
pub const TARGET_BASIS_MULTIPLIER: f64 = 1.471;

/// Version tag of the built-in deflator series
pub const CPI99_TABLE_VERSION: &str = "cpi99-1976-2015";

/// First survey year covered by the built-in series
pub const CPI99_BASE_YEAR: i32 = 1976;

/// Built-in factors for survey years 1976 through 2015
pub const CPI99_FACTORS: [f64; 40] = [
    3.097, 2.928, 2.749, 2.555, 2.295, 2.022, 1.833, 1.726, 1.673, 1.603, // 1976-1985
    1.548, 1.520, 1.467, 1.408, 1.344, 1.275, 1.223, 1.187, 1.153, 1.124, // 1986-1995
    1.093, 1.062, 1.038, 1.022, 1.000, 0.967, 0.941, 0.926, 0.905, 0.882, // 1996-2005
    0.853, 0.826, 0.804, 0.774, 0.777, 0.764, 0.741, 0.726, 0.715, 0.704, // 2006-2015
];

/// Explicit year to factor mapping with bounds-checked lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeflatorTable {
    /// Version tag recorded in report manifests
    pub version: String,
    /// Year of the first factor
    pub base_year: i32,
    /// One factor per consecutive year starting at `base_year`
    pub factors: Vec<f64>,
}

impl DeflatorTable {
    /// Build a table, validating that it is non-empty, every factor is positive
    /// and the covered years fit in an `i32`
    pub fn new(version: impl Into<String>, base_year: i32, factors: Vec<f64>) -> Result<Self> {
        if factors.is_empty() {
            return Err(SurveyError::Config("deflator table has no factors".into()));
        }
        let last_year = i32::try_from(factors.len() - 1)
            .ok()
            .and_then(|span| base_year.checked_add(span))
            .ok_or_else(|| {
                SurveyError::Config(format!(
                    "deflator table starting in {base_year} with {} factors runs past year {}",
                    factors.len(),
                    i32::MAX
                ))
            })?;
        if let Some(pos) = factors.iter().position(|f| !f.is_finite() || *f <= 0.0) {
            return Err(SurveyError::Config(format!(
                "deflator factor {pos} (for {}) is not a positive number",
                i64::from(base_year) + pos as i64
            )));
        }
        log::debug!("Deflator table covers {base_year}-{last_year}");
        Ok(Self {
            version: version.into(),
            base_year,
            factors,
        })
    }

    /// The built-in 1976-2015 table
    #[must_use]
    pub fn cpi99() -> Self {
        Self {
            version: CPI99_TABLE_VERSION.to_string(),
            base_year: CPI99_BASE_YEAR,
            factors: CPI99_FACTORS.to_vec(),
        }
    }

    /// Load a table from a JSON file with `version`, `base_year` and `factors`
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = safe_open_file(path, "loading deflator table")?;
        let table: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        Self::new(table.version, table.base_year, table.factors)
    }

    /// First covered year
    #[must_use]
    pub const fn first_year(&self) -> i32 {
        self.base_year
    }

    /// Last covered year, clamped to `i32::MAX` for tables built without `new`
    #[must_use]
    pub fn last_year(&self) -> i32 {
        let last = i64::from(self.base_year) + self.factors.len() as i64 - 1;
        i32::try_from(last).unwrap_or(i32::MAX)
    }

    fn index_of(&self, year: i32) -> Option<usize> {
        let offset = i64::from(year) - i64::from(self.base_year);
        usize::try_from(offset)
            .ok()
            .filter(|idx| *idx < self.factors.len())
    }

    /// Whether `year` has a factor
    #[must_use]
    pub fn covers(&self, year: i32) -> bool {
        self.index_of(year).is_some()
    }

    /// Factor for `year`, failing with `OutOfRange` outside the table
    pub fn factor(&self, year: i32) -> Result<f64> {
        self.index_of(year)
            .map(|idx| self.factors[idx])
            .ok_or_else(|| SurveyError::OutOfRange {
                year,
                first: self.first_year(),
                last: self.last_year(),
            })
    }

    /// Nominal to constant dollars; a missing wage stays missing
    pub fn to_constant_dollars(&self, year: i32, nominal: Option<f64>) -> Result<Option<f64>> {
        let factor = self.factor(year)?;
        Ok(nominal.map(|wage| wage * factor * TARGET_BASIS_MULTIPLIER))
    }
}

impl Default for DeflatorTable {
    fn default() -> Self {
        Self::cpi99()
    }
}
