//! Tests for the deflator and education reference tables

use cps_trends::SurveyError;
use cps_trends::lookup::deflator::{CPI99_FACTORS, CPI99_TABLE_VERSION};
use cps_trends::lookup::education::{
    SEMISKILLED_CODES, SKILLED_CODES, UNSKILLED_CODES, table_size,
};
use cps_trends::lookup::{DeflatorTable, EDUCATION_TABLE_VERSION, education_tier};
use cps_trends::models::EducationTier;

#[test]
fn test_cpi99_covers_every_survey_year() {
    let table = DeflatorTable::cpi99();
    assert_eq!(table.version, CPI99_TABLE_VERSION);
    assert_eq!(table.factors.len(), CPI99_FACTORS.len());
    for year in 1976..=2015 {
        assert!(table.covers(year), "{year} not covered");
        assert!(table.factor(year).unwrap() > 0.0);
    }
    assert_eq!(table.factor(1976).unwrap(), 3.097);
    assert_eq!(table.factor(2015).unwrap(), 0.704);
}

#[test]
fn test_factors_fall_as_prices_rise() {
    assert!(CPI99_FACTORS.windows(2).all(|w| w[0] >= w[1] || (w[1] - w[0]) < 0.01));
}

#[test]
fn test_years_outside_table_fail() {
    let table = DeflatorTable::cpi99();
    for year in [1975, 2016, 0] {
        match table.to_constant_dollars(year, Some(10.0)) {
            Err(SurveyError::OutOfRange { year: y, first, last }) => {
                assert_eq!((y, first, last), (year, 1976, 2015));
            }
            other => panic!("expected OutOfRange for {year}, got {other:?}"),
        }
    }
    // a missing wage does not hide an uncovered year
    assert!(table.to_constant_dollars(2020, None).is_err());
}

#[test]
fn test_custom_table_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deflators.json");
    std::fs::write(
        &path,
        r#"{"version": "test-2", "base_year": 2010, "factors": [1.2, 1.1]}"#,
    )
    .unwrap();

    let table = DeflatorTable::from_json_file(&path).unwrap();
    assert_eq!(table.version, "test-2");
    assert_eq!(table.last_year(), 2011);
    let real = table.to_constant_dollars(2011, Some(10.0)).unwrap().unwrap();
    assert!((real - 10.0 * 1.1 * 1.471).abs() < 1e-9);

    std::fs::write(
        &path,
        r#"{"version": "bad", "base_year": 2010, "factors": [1.2, -1.0]}"#,
    )
    .unwrap();
    assert!(matches!(
        DeflatorTable::from_json_file(&path),
        Err(SurveyError::Config(_))
    ));
}

#[test]
fn test_json_table_running_past_last_year_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deflators.json");
    std::fs::write(
        &path,
        r#"{"version": "late", "base_year": 2147483647, "factors": [1.0, 1.0]}"#,
    )
    .unwrap();

    match DeflatorTable::from_json_file(&path) {
        Err(SurveyError::Config(msg)) => assert!(msg.contains("2147483647")),
        other => panic!("expected Config error, got {other:?}"),
    }
}

#[test]
fn test_every_code_maps_to_its_tier() {
    for code in SKILLED_CODES {
        assert_eq!(education_tier(Some(&code.to_string())), EducationTier::Skilled);
    }
    for code in SEMISKILLED_CODES {
        assert_eq!(
            education_tier(Some(&format!("{code:03}"))),
            EducationTier::Semiskilled
        );
    }
    for code in UNSKILLED_CODES {
        assert_eq!(
            education_tier(Some(&format!("{code:03}"))),
            EducationTier::Unskilled
        );
    }
    assert!(table_size() >= SKILLED_CODES.len() + SEMISKILLED_CODES.len() + UNSKILLED_CODES.len());
}

#[test]
fn test_labels_and_unknown_codes() {
    assert_eq!(
        education_tier(Some("Bachelor's degree")),
        EducationTier::Skilled
    );
    assert_eq!(
        education_tier(Some("High school diploma or equivalent")),
        EducationTier::Unskilled
    );
    assert_eq!(education_tier(Some("999")), EducationTier::Unknown);
    assert_eq!(education_tier(Some("NA")), EducationTier::Unknown);
    assert_eq!(education_tier(None), EducationTier::Unknown);
    assert_eq!(EDUCATION_TABLE_VERSION, "ipums-educ-2015");
}
