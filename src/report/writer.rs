//! Output tables and run manifest
//!
//! Rows are converted to Arrow batches with `serde_arrow` and written as CSV
//! (and optionally Parquet) for the charting and typesetting tools.

use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::csv::WriterBuilder;
use arrow::datatypes::FieldRef;
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use parquet::arrow::ArrowWriter;
use serde::{Deserialize, Serialize};
use serde_arrow::schema::{SchemaLike, TracingOptions};

use crate::algorithm::recode::RecodeReport;
use crate::config::ReportConfig;
use crate::error::util::ensure_directory;
use crate::error::{Result, SurveyError};
use crate::lookup::education::EDUCATION_TABLE_VERSION;
use crate::models::aggregate::SkillAggregate;
use crate::utils::logging::log_operation_complete;

use super::SurveyReport;

/// Flat form of a [`SkillAggregate`] with the tier as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillRow {
    /// Survey year
    pub year: i32,
    /// Tier label
    pub tier: String,
    /// Mean nominal wage
    pub wage: Option<f64>,
    /// Labor-force participation
    pub lfp: Option<f64>,
    /// Constant-dollar wage
    pub real_wage: Option<f64>,
}

impl From<&SkillAggregate> for SkillRow {
    fn from(row: &SkillAggregate) -> Self {
        Self {
            year: row.year,
            tier: row.tier.label().to_string(),
            wage: row.wage,
            lfp: row.lfp,
            real_wage: row.real_wage,
        }
    }
}

/// Description of a run, written next to the tables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportManifest {
    /// When the tables were written
    pub generated_at: DateTime<Utc>,
    /// Extract the report was built from
    pub input: String,
    /// Recoding counts
    pub recode: RecodeReport,
    /// Deflator table version
    pub deflator_version: String,
    /// Education lookup version
    pub education_table_version: String,
    /// First survey year
    pub first_year: Option<i32>,
    /// Last survey year
    pub last_year: Option<i32>,
    /// Files written, relative to the output directory
    pub files: Vec<String>,
}

/// Convert rows to a record batch
pub fn rows_to_batch<T>(rows: &[T]) -> Result<RecordBatch>
where
    T: Serialize + for<'de> Deserialize<'de>,
{
    let fields = Vec::<FieldRef>::from_type::<T>(TracingOptions::default())?;
    Ok(serde_arrow::to_record_batch(&fields, &rows)?)
}

fn write_csv(batch: &RecordBatch, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(batch)?;
    Ok(())
}

fn write_parquet(batch: &RecordBatch, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;
    Ok(())
}

/// Write every table of `report` into `config.output_dir`
///
/// Returns the paths written, manifest last.
pub fn write_report(report: &SurveyReport, config: &ReportConfig) -> Result<Vec<PathBuf>> {
    let dir = &config.output_dir;
    ensure_directory(dir, "writing report tables")?;

    let skill_rows: Vec<SkillRow> = report.skill.iter().map(SkillRow::from).collect();
    let tables = [
        ("yearly_summary", rows_to_batch(&report.yearly)?),
        ("skill_summary", rows_to_batch(&skill_rows)?),
        ("lfp_by_age", rows_to_batch(&report.lfp_by_age.rows)?),
        ("wage_by_skill", rows_to_batch(&report.wage_by_skill.rows)?),
        ("lfp_by_skill", rows_to_batch(&report.lfp_by_skill.rows)?),
    ];

    let mut written = Vec::new();
    for (name, batch) in &tables {
        let csv_path = dir.join(format!("{name}.csv"));
        write_csv(batch, &csv_path)?;
        log_operation_complete("wrote", &csv_path, batch.num_rows(), None);
        written.push(csv_path);

        if config.write_parquet {
            let parquet_path = dir.join(format!("{name}.parquet"));
            write_parquet(batch, &parquet_path)?;
            written.push(parquet_path);
        }
    }

    let (first_year, last_year) = report.year_range().unzip();
    let manifest = ReportManifest {
        generated_at: Utc::now(),
        input: config.input_path.display().to_string(),
        recode: report.recode.clone(),
        deflator_version: report.deflator_version.clone(),
        education_table_version: EDUCATION_TABLE_VERSION.to_string(),
        first_year,
        last_year,
        files: written
            .iter()
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect(),
    };
    let manifest_path = dir.join("manifest.json");
    let file = File::create(&manifest_path)?;
    serde_json::to_writer_pretty(file, &manifest)
        .map_err(|e| SurveyError::serialization("writing manifest", e))?;
    written.push(manifest_path);

    Ok(written)
}
