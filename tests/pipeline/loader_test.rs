//! Tests for loading survey extracts from CSV and Parquet

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use cps_trends::config::ReportConfig;
use cps_trends::error::SurveyError;
use cps_trends::loader::read_survey_file;
use cps_trends::report;

fn fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/cps_sample.csv")
}

fn close(a: Option<f64>, b: f64) -> bool {
    a.is_some_and(|a| (a - b).abs() < 1e-9)
}

#[test]
fn test_csv_fixture_loads_by_column_name() {
    let records = read_survey_file(&fixture(), 4).unwrap();
    assert_eq!(records.len(), 10);

    let first = &records[0];
    assert_eq!(first.year.as_deref(), Some("1976"));
    assert_eq!(first.age.as_deref(), Some("34"));
    assert_eq!(first.wtsupp.as_deref(), Some("1200.5"));
    assert_eq!(first.educ.as_deref(), Some("111"));
    assert_eq!(records[3].empstatid.as_deref(), Some("NILF, retired"));
    assert_eq!(records[2].wage.as_deref(), Some("NA"));
}

#[test]
fn test_csv_missing_column_fails_before_aggregation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    std::fs::write(
        &path,
        "year,age,sex,empstatid,lfp,educ,wage,age_group\n2000,30,Male,Employed,In labor force,111,10,25-44\n",
    )
    .unwrap();

    match read_survey_file(&path, 1024) {
        Err(SurveyError::SchemaMismatch(msg)) => assert!(msg.contains("wtsupp")),
        other => panic!("expected SchemaMismatch, got {other:?}"),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let result = read_survey_file(Path::new("/no/such/extract.csv"), 1024);
    assert!(matches!(result, Err(SurveyError::Io(_))));
}

#[test]
fn test_parquet_with_typed_columns() {
    let schema = Arc::new(Schema::new(vec![
        Field::new("year", DataType::Int32, false),
        Field::new("age", DataType::Int32, true),
        Field::new("sex", DataType::Utf8, true),
        Field::new("empstatid", DataType::Utf8, true),
        Field::new("lfp", DataType::Utf8, true),
        Field::new("educ", DataType::Int32, true),
        Field::new("wage", DataType::Float64, true),
        Field::new("wtsupp", DataType::Float64, true),
        Field::new("age_group", DataType::Utf8, true),
    ]));
    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int32Array::from(vec![2000, 2000, 2000])),
        Arc::new(Int32Array::from(vec![Some(40), Some(35), Some(8)])),
        Arc::new(StringArray::from(vec!["Male", "Female", "Male"])),
        Arc::new(StringArray::from(vec![
            Some("Employed"),
            Some("Unemployed"),
            None,
        ])),
        Arc::new(StringArray::from(vec![
            Some("In labor force"),
            Some("In labor force"),
            None,
        ])),
        Arc::new(Int32Array::from(vec![Some(111), Some(73), None])),
        Arc::new(Float64Array::from(vec![Some(20.0), Some(15.0), None])),
        Arc::new(Float64Array::from(vec![1.0, 2.0, 1.0])),
        Arc::new(StringArray::from(vec!["25-44", "25-44", "<25"])),
    ];
    let batch = RecordBatch::try_new(Arc::clone(&schema), columns).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cps.parquet");
    let mut writer = ArrowWriter::try_new(File::create(&path).unwrap(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let records = read_survey_file(&path, 1024).unwrap();
    assert_eq!(records.len(), 3);
    let wage: Option<f64> = records[0].wage.as_deref().and_then(|w| w.parse().ok());
    assert_eq!(wage, Some(20.0));
    assert_eq!(records[2].educ, None);

    let config = ReportConfig::default().with_input(&path);
    let built = report::run(&config).unwrap();
    let row = built.year(2000).unwrap();
    assert!(close(row.lfp_all, 1.0));
    assert!(close(row.unemp, 2.0 / 3.0));
    assert!(close(row.wage_m, 20.0));
    assert!(close(row.wage_f, 15.0));
    assert_eq!(built.recode.excluded_underage, 1);
}

#[test]
fn test_fixture_report() {
    let config = ReportConfig::default().with_input(fixture());
    let built = report::run(&config).unwrap();

    assert_eq!(built.recode.input_rows, 10);
    assert_eq!(built.recode.retained, 8);
    assert_eq!(built.recode.excluded_underage, 1);
    assert_eq!(built.recode.malformed_age, 1);
    assert_eq!(built.year_range(), Some((1976, 2015)));

    let y1976 = built.year(1976).unwrap();
    assert!(close(y1976.lfp_all, 3200.5 / 4000.5));
    assert!(close(y1976.unemp, 900.0 / 3200.5));
    assert!(close(y1976.wage_m, 6.5));
    assert!(close(y1976.wage_f, 3.25));
    assert!(close(y1976.real_wage_m, 6.5 * 3.097 * 1.471));
    assert!(close(y1976.lfp_65_plus, 0.0));

    let y2015 = built.year(2015).unwrap();
    // armed forces respondent with missing LFP status counts as a member
    assert!(close(y2015.lfp_all, 1.0));
    assert!(close(y2015.lfp_45_64, 1.0));
    let wage_m = (35.0 * 1400.0 + 18.0 * 1000.0) / 2400.0;
    assert!(close(y2015.wage_m, wage_m));
    assert!(close(y2015.real_wage_m, wage_m * 0.704 * 1.471));

    let skilled_2015: Vec<_> = built
        .wage_by_skill
        .rows
        .iter()
        .filter(|r| r.year == 2015)
        .map(|r| (r.category.as_str(), r.value))
        .collect();
    assert_eq!(skilled_2015.len(), 3);
    assert_eq!(skilled_2015[0].0, "skilled");
    assert!(close(skilled_2015[0].1, 35.0 * 0.704 * 1.471));
    assert_eq!(skilled_2015[1], ("semiskilled", None));
    assert!(close(skilled_2015[2].1, 18.0 * 0.704 * 1.471));
}
