//! Aggregate table rows produced by the pipeline

use serde::{Deserialize, Serialize};

use crate::models::survey::EducationTier;

/// One row of the year-indexed summary table
///
/// Every statistic is a weighted mean; `None` means no record in the year
/// was eligible for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearlyAggregate {
    /// Survey year
    pub year: i32,
    /// Labor-force participation, everyone
    pub lfp_all: Option<f64>,
    /// Labor-force participation, men
    pub lfp_m: Option<f64>,
    /// Labor-force participation, women
    pub lfp_f: Option<f64>,
    /// Labor-force participation, under 25
    pub lfp_under_25: Option<f64>,
    /// Labor-force participation, 25 to 44
    pub lfp_25_44: Option<f64>,
    /// Labor-force participation, 45 to 64
    pub lfp_45_64: Option<f64>,
    /// Labor-force participation, 65 and over
    pub lfp_65_plus: Option<f64>,
    /// Unemployment rate among employed and unemployed respondents
    pub unemp: Option<f64>,
    /// Share of respondents with a known tier who are skilled
    pub skilled_share: Option<f64>,
    /// Mean nominal wage, everyone
    pub wage_all: Option<f64>,
    /// Mean nominal wage, men
    pub wage_m: Option<f64>,
    /// Mean nominal wage, women
    pub wage_f: Option<f64>,
    /// Constant-dollar wage, everyone
    pub real_wage_all: Option<f64>,
    /// Constant-dollar wage, men
    pub real_wage_m: Option<f64>,
    /// Constant-dollar wage, women
    pub real_wage_f: Option<f64>,
}

impl YearlyAggregate {
    /// Names of the columns `column` can look up, in table order
    pub const COLUMNS: [&'static str; 15] = [
        "lfp_all",
        "lfp_m",
        "lfp_f",
        "lfp_under_25",
        "lfp_25_44",
        "lfp_45_64",
        "lfp_65_plus",
        "unemp",
        "skilled_share",
        "wage_all",
        "wage_m",
        "wage_f",
        "real_wage_all",
        "real_wage_m",
        "real_wage_f",
    ];

    /// Look up a statistic by column name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Option<f64>> {
        let value = match name {
            "lfp_all" => self.lfp_all,
            "lfp_m" => self.lfp_m,
            "lfp_f" => self.lfp_f,
            "lfp_under_25" => self.lfp_under_25,
            "lfp_25_44" => self.lfp_25_44,
            "lfp_45_64" => self.lfp_45_64,
            "lfp_65_plus" => self.lfp_65_plus,
            "unemp" => self.unemp,
            "skilled_share" => self.skilled_share,
            "wage_all" => self.wage_all,
            "wage_m" => self.wage_m,
            "wage_f" => self.wage_f,
            "real_wage_all" => self.real_wage_all,
            "real_wage_m" => self.real_wage_m,
            "real_wage_f" => self.real_wage_f,
            _ => return None,
        };
        Some(value)
    }
}

/// One row of the year-by-skill-tier table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillAggregate {
    /// Survey year
    pub year: i32,
    /// Skill tier
    pub tier: EducationTier,
    /// Mean nominal wage
    pub wage: Option<f64>,
    /// Labor-force participation
    pub lfp: Option<f64>,
    /// Constant-dollar wage
    pub real_wage: Option<f64>,
}

/// Metric of a [`SkillAggregate`] row to pivot on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillMetric {
    /// Nominal wage
    Wage,
    /// Constant-dollar wage
    RealWage,
    /// Labor-force participation
    Lfp,
}

impl SkillAggregate {
    /// Value of `metric` on this row
    #[must_use]
    pub const fn metric(&self, metric: SkillMetric) -> Option<f64> {
        match metric {
            SkillMetric::Wage => self.wage,
            SkillMetric::RealWage => self.real_wage,
            SkillMetric::Lfp => self.lfp,
        }
    }
}
