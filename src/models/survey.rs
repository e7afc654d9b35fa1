//! Survey record models
//!
//! `RawSurveyRecord` mirrors one row of the CPS extract exactly as read from
//! disk (every field optional text). `SurveyRecord` is the analysis-ready form
//! produced by the recoding stage, with all derived fields filled in.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Column names every input file has to provide
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "age",
    "empstatid",
    "lfp",
    "sex",
    "wtsupp",
    "educ",
    "year",
    "wage",
    "age_group",
];

/// Markers the extract uses for missing values (compared case-insensitively)
pub const MISSING_MARKERS: [&str; 5] = ["", "na", "n/a", ".", "nan"];

/// Label the `lfp` column uses for labor-force members
pub const IN_LABOR_FORCE_LABEL: &str = "in labor force";

/// Check whether a raw field should be treated as missing
#[must_use]
pub fn is_missing(raw: Option<&str>) -> bool {
    raw.is_none_or(|value| {
        let value = value.trim();
        MISSING_MARKERS
            .iter()
            .any(|marker| value.eq_ignore_ascii_case(marker))
    })
}

/// Parse a numeric field, returning `None` for missing or unparsable values
#[must_use]
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    if is_missing(raw) {
        return None;
    }
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// One row of the survey extract, before any recoding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSurveyRecord {
    /// Age in years
    pub age: Option<String>,
    /// Employment status label
    pub empstatid: Option<String>,
    /// Labor-force status label
    pub lfp: Option<String>,
    /// Sex label or code
    pub sex: Option<String>,
    /// Supplement sampling weight
    pub wtsupp: Option<String>,
    /// IPUMS education code or label
    pub educ: Option<String>,
    /// Survey year
    pub year: Option<String>,
    /// Nominal hourly wage
    pub wage: Option<String>,
    /// Pre-assigned age bucket
    pub age_group: Option<String>,
}

/// Sex of a respondent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sex {
    /// Male respondent
    Male,
    /// Female respondent
    Female,
}

impl Sex {
    /// Parse a sex label or IPUMS code
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "m" | "male" | "1" => Some(Self::Male),
            "f" | "female" | "2" => Some(Self::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Male => write!(f, "male"),
            Self::Female => write!(f, "female"),
        }
    }
}

/// Employment status as reported in `empstatid`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EmploymentStatus {
    /// At work or with a job
    Employed,
    /// Looking for work
    Unemployed,
    /// Not in universe, not in labor force or missing
    Other,
}

impl From<&str> for EmploymentStatus {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "employed" | "at work" | "has job, not at work last week" => Self::Employed,
            "unemployed" | "unemployed, experienced worker" | "unemployed, new worker" => {
                Self::Unemployed
            }
            _ => Self::Other,
        }
    }
}

impl EmploymentStatus {
    /// Unemployment indicator; `None` when the status says nothing about it
    #[must_use]
    pub const fn unemployment_indicator(self) -> Option<bool> {
        match self {
            Self::Employed => Some(false),
            Self::Unemployed => Some(true),
            Self::Other => None,
        }
    }
}

/// Pre-assigned age bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeGroup {
    /// Younger than 25
    Under25,
    /// 25 to 44
    From25To44,
    /// 45 to 64
    From45To64,
    /// 65 and older
    From65,
}

impl AgeGroup {
    /// All age groups in chart order
    pub const ALL: [Self; 4] = [
        Self::Under25,
        Self::From25To44,
        Self::From45To64,
        Self::From65,
    ];

    /// Parse an `age_group` label; en-dashes and `>=` spellings are accepted
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .replace(['\u{2013}', '\u{2014}'], "-")
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        match normalized.as_str() {
            "<25" => Some(Self::Under25),
            "25-44" => Some(Self::From25To44),
            "45-64" => Some(Self::From45To64),
            "65+" | ">=65" | "\u{2265}65" | ">64" => Some(Self::From65),
            _ => None,
        }
    }

    /// Display label, also used as the long-table category
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Under25 => "<25",
            Self::From25To44 => "25-44",
            Self::From45To64 => "45-64",
            Self::From65 => "65+",
        }
    }

    /// Column name of the LFP statistic for this group
    #[must_use]
    pub const fn lfp_column(self) -> &'static str {
        match self {
            Self::Under25 => "lfp_under_25",
            Self::From25To44 => "lfp_25_44",
            Self::From45To64 => "lfp_45_64",
            Self::From65 => "lfp_65_plus",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Education-based skill stratification
///
/// Variant order is the presentation order (skilled first) and drives the
/// secondary sort of year-by-tier tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EducationTier {
    /// Bachelor's degree or higher
    Skilled,
    /// Some college, no bachelor's degree
    Semiskilled,
    /// High school or less
    Unskilled,
    /// Missing or unmapped education code
    Unknown,
}

impl EducationTier {
    /// Tiers that take part in skill-stratified aggregates, in chart order
    pub const KNOWN: [Self; 3] = [Self::Skilled, Self::Semiskilled, Self::Unskilled];

    /// Lowercase label used in output tables
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Skilled => "skilled",
            Self::Semiskilled => "semiskilled",
            Self::Unskilled => "unskilled",
            Self::Unknown => "unknown",
        }
    }

    /// Whether this tier takes part in skill-stratified statistics
    #[must_use]
    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl fmt::Display for EducationTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Analysis-ready survey record
#[derive(Debug, Clone, PartialEq)]
pub struct SurveyRecord {
    /// Survey year
    pub year: i32,
    /// Age in years (always above the eligibility threshold)
    pub age: f64,
    /// Respondent sex
    pub sex: Sex,
    /// Employment status
    pub employment: EmploymentStatus,
    /// Unemployment indicator, `None` when employment status is neither
    /// employed nor unemployed
    pub unemployed: Option<bool>,
    /// Labor-force membership; missing status already counted as a member
    pub in_labor_force: bool,
    /// Skill tier derived from the education code
    pub education_tier: EducationTier,
    /// Nominal hourly wage
    pub wage: Option<f64>,
    /// Sampling weight
    pub weight: f64,
    /// Age bucket, `None` if the label was not recognised
    pub age_group: Option<AgeGroup>,
}

impl SurveyRecord {
    /// Labor-force indicator as a 0/1 value
    #[must_use]
    pub fn lfp_value(&self) -> Option<f64> {
        Some(if self.in_labor_force { 1.0 } else { 0.0 })
    }

    /// Unemployment indicator as a 0/1 value
    #[must_use]
    pub fn unemployment_value(&self) -> Option<f64> {
        self.unemployed.map(|u| if u { 1.0 } else { 0.0 })
    }

    /// Skilled indicator; `None` when the tier is unknown
    #[must_use]
    pub fn skilled_value(&self) -> Option<f64> {
        match self.education_tier {
            EducationTier::Unknown => None,
            EducationTier::Skilled => Some(1.0),
            _ => Some(0.0),
        }
    }
}
