//! Education code to skill tier lookup
//!
//! Keys are IPUMS-CPS `EDUC` codes (leading zeros ignored) and the matching
//! value labels, so both numeric and labelled extracts map the same way.

use std::sync::LazyLock;

use rustc_hash::FxHashMap;

use crate::models::survey::{EducationTier, is_missing};

/// Version tag of the education lookup table
pub const EDUCATION_TABLE_VERSION: &str = "ipums-educ-2015";

/// Codes for bachelor's degree or higher
pub const SKILLED_CODES: &[u16] = &[110, 111, 120, 121, 122, 123, 124, 125];

/// Codes for some college without a bachelor's degree
pub const SEMISKILLED_CODES: &[u16] = &[80, 81, 90, 91, 92, 100];

/// Codes for high school or less
pub const UNSKILLED_CODES: &[u16] = &[
    1, 2, 10, 11, 12, 13, 14, 20, 21, 22, 30, 31, 32, 40, 50, 60, 70, 71, 72, 73,
];

const SKILLED_LABELS: &[&str] = &[
    "4 years of college",
    "bachelor's degree",
    "5+ years of college",
    "5 years of college",
    "6+ years of college",
    "master's degree",
    "professional school degree",
    "doctorate degree",
];

const SEMISKILLED_LABELS: &[&str] = &[
    "1 year of college",
    "some college but no degree",
    "2 years of college",
    "associate's degree, occupational/vocational program",
    "associate's degree, academic program",
    "3 years of college",
];

const UNSKILLED_LABELS: &[&str] = &[
    "none or preschool",
    "none",
    "grades 1, 2, 3, or 4",
    "grades 5 or 6",
    "grades 7 or 8",
    "grade 9",
    "grade 10",
    "grade 11",
    "grade 12",
    "12th grade, no diploma",
    "12th grade, diploma unclear",
    "high school diploma or equivalent",
];

static TIER_BY_KEY: LazyLock<FxHashMap<String, EducationTier>> = LazyLock::new(|| {
    let mut table = FxHashMap::default();
    let buckets = [
        (EducationTier::Skilled, SKILLED_CODES, SKILLED_LABELS),
        (EducationTier::Semiskilled, SEMISKILLED_CODES, SEMISKILLED_LABELS),
        (EducationTier::Unskilled, UNSKILLED_CODES, UNSKILLED_LABELS),
    ];
    for (tier, codes, labels) in buckets {
        for code in codes {
            table.insert(code.to_string(), tier);
        }
        for label in labels {
            table.insert((*label).to_string(), tier);
        }
    }
    table
});

fn normalize_key(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        // "073", "73" and "73.0" all name the same code
        Ok(code) if code.fract() == 0.0 && code >= 0.0 => format!("{code:.0}"),
        _ => trimmed.to_lowercase().replace('\u{2019}', "'"),
    }
}

/// Map a raw education code to its skill tier
///
/// Missing values and codes outside every bucket map to
/// [`EducationTier::Unknown`].
#[must_use]
pub fn education_tier(raw: Option<&str>) -> EducationTier {
    if is_missing(raw) {
        return EducationTier::Unknown;
    }
    raw.map(normalize_key)
        .and_then(|key| TIER_BY_KEY.get(&key).copied())
        .unwrap_or(EducationTier::Unknown)
}

/// Number of keys in the lookup table
#[must_use]
pub fn table_size() -> usize {
    TIER_BY_KEY.len()
}
