//! Builders for synthetic survey rows used in tests and demos

use crate::models::survey::RawSurveyRecord;

/// Fluent builder for [`RawSurveyRecord`]
///
/// Defaults describe an employed 30-year-old man in the labor force with
/// weight 1, a bachelor's degree and no wage.
#[derive(Debug, Clone)]
pub struct RawRecordBuilder {
    record: RawSurveyRecord,
}

impl RawRecordBuilder {
    /// Start a record for `year`
    #[must_use]
    pub fn new(year: i32) -> Self {
        Self {
            record: RawSurveyRecord {
                age: Some("30".to_string()),
                empstatid: Some("Employed".to_string()),
                lfp: Some("In labor force".to_string()),
                sex: Some("Male".to_string()),
                wtsupp: Some("1".to_string()),
                educ: Some("111".to_string()),
                year: Some(year.to_string()),
                wage: None,
                age_group: Some("25-44".to_string()),
            },
        }
    }

    /// Set the raw age field
    #[must_use]
    pub fn age(mut self, age: &str) -> Self {
        self.record.age = Some(age.to_string());
        self
    }

    /// Set the sex label
    #[must_use]
    pub fn sex(mut self, sex: &str) -> Self {
        self.record.sex = Some(sex.to_string());
        self
    }

    /// Set the employment status label (`None` for missing)
    #[must_use]
    pub fn employment(mut self, status: Option<&str>) -> Self {
        self.record.empstatid = status.map(str::to_string);
        self
    }

    /// Set the labor-force label (`None` for missing)
    #[must_use]
    pub fn lfp(mut self, status: Option<&str>) -> Self {
        self.record.lfp = status.map(str::to_string);
        self
    }

    /// Set the sampling weight
    #[must_use]
    pub fn weight(mut self, weight: f64) -> Self {
        self.record.wtsupp = Some(weight.to_string());
        self
    }

    /// Set the education code (`None` for missing)
    #[must_use]
    pub fn educ(mut self, code: Option<&str>) -> Self {
        self.record.educ = code.map(str::to_string);
        self
    }

    /// Set the nominal wage
    #[must_use]
    pub fn wage(mut self, wage: f64) -> Self {
        self.record.wage = Some(wage.to_string());
        self
    }

    /// Set the age group label
    #[must_use]
    pub fn age_group(mut self, group: &str) -> Self {
        self.record.age_group = Some(group.to_string());
        self
    }

    /// Finish the record
    #[must_use]
    pub fn build(self) -> RawSurveyRecord {
        self.record
    }
}
