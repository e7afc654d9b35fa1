//! Survey extract loading
//!
//! Reads CSV or Parquet extracts through Arrow, checks the nine required
//! columns, normalises them to nullable UTF-8 and deserialises the rows into
//! [`RawSurveyRecord`]s. Typing and missing-value handling happen later in the
//! recoding stage, so typed Parquet columns and text CSV columns share one path.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::array::ArrayRef;
use arrow::compute::cast;
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use indicatif::ProgressBar;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::util::safe_open_file;
use crate::error::{Result, SurveyError};
use crate::models::survey::{REQUIRED_COLUMNS, RawSurveyRecord};
use crate::utils::logging::{log_operation_complete, log_operation_start, with_spinner};

/// Input formats the loader understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Delimited text with a header row
    Csv,
    /// Apache Parquet
    Parquet,
}

impl InputFormat {
    /// Pick the format from a file extension; anything unknown is read as CSV
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("parquet" | "pq") => Self::Parquet,
            _ => Self::Csv,
        }
    }
}

fn find_column(schema: &Schema, name: &str) -> Option<usize> {
    schema
        .fields()
        .iter()
        .position(|f| f.name().trim().eq_ignore_ascii_case(name))
}

/// Resolve the indices of the required columns, in `REQUIRED_COLUMNS` order
///
/// # Errors
/// `SchemaMismatch` naming every missing column.
pub fn validate_columns(schema: &Schema) -> Result<Vec<usize>> {
    let mut indices = Vec::with_capacity(REQUIRED_COLUMNS.len());
    let mut missing = Vec::new();
    for name in REQUIRED_COLUMNS {
        match find_column(schema, name) {
            Some(idx) => indices.push(idx),
            None => missing.push(name),
        }
    }
    if missing.is_empty() {
        Ok(indices)
    } else {
        Err(SurveyError::schema_mismatch(format!(
            "missing required column(s): {}",
            missing.join(", ")
        )))
    }
}

/// Project a batch onto the required columns, cast to nullable UTF-8 and
/// renamed to their canonical names
pub fn normalize_batch(batch: &RecordBatch) -> Result<RecordBatch> {
    let indices = validate_columns(&batch.schema())?;

    let mut fields = Vec::with_capacity(indices.len());
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(indices.len());
    for (name, idx) in REQUIRED_COLUMNS.iter().zip(indices) {
        let column = batch.column(idx);
        let column = if column.data_type() == &DataType::Utf8 {
            Arc::clone(column)
        } else {
            cast(column, &DataType::Utf8).map_err(|e| {
                SurveyError::schema_mismatch(format!(
                    "column `{name}` of type {} cannot be read as text: {e}",
                    column.data_type()
                ))
            })?
        };
        fields.push(Field::new(*name, DataType::Utf8, true));
        columns.push(column);
    }

    Ok(RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)?)
}

/// Deserialize a normalised batch into raw records
pub fn batch_to_records(batch: &RecordBatch) -> Result<Vec<RawSurveyRecord>> {
    let normalized = normalize_batch(batch)?;
    Ok(serde_arrow::from_record_batch::<Vec<RawSurveyRecord>>(&normalized)?)
}

/// Read a CSV extract into record batches holding only the required columns
pub fn read_csv_batches(path: &Path, batch_size: usize) -> Result<Vec<RecordBatch>> {
    let format = Format::default().with_header(true);
    let header_file = safe_open_file(path, "reading survey header")?;
    let (header, _) = format.infer_schema(header_file, Some(0))?;
    let indices = validate_columns(&header)?;

    // Read every column as text; typing happens during recoding
    let text_schema = Schema::new(
        header
            .fields()
            .iter()
            .map(|f| Field::new(f.name(), DataType::Utf8, true))
            .collect::<Vec<_>>(),
    );

    let file = safe_open_file(path, "reading survey data")?;
    let reader = ReaderBuilder::new(Arc::new(text_schema))
        .with_format(format)
        .with_batch_size(batch_size)
        .with_projection(indices)
        .build(file)?;

    reader
        .map(|batch| batch.map_err(SurveyError::from))
        .collect()
}

/// Read a Parquet extract into record batches
pub fn read_parquet_batches(path: &Path, batch_size: usize) -> Result<Vec<RecordBatch>> {
    let file = safe_open_file(path, "reading survey data")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;
    validate_columns(builder.schema())?;

    let reader = builder.with_batch_size(batch_size).build()?;
    reader
        .map(|batch| batch.map_err(SurveyError::from))
        .collect()
}

fn load_records(
    path: &Path,
    batch_size: usize,
    spinner: &ProgressBar,
) -> Result<Vec<RawSurveyRecord>> {
    let batches = match InputFormat::from_path(path) {
        InputFormat::Csv => read_csv_batches(path, batch_size)?,
        InputFormat::Parquet => read_parquet_batches(path, batch_size)?,
    };

    let mut records = Vec::with_capacity(batches.iter().map(RecordBatch::num_rows).sum());
    for (i, batch) in batches.iter().enumerate() {
        spinner.set_message(format!("Decoding batch {}/{}", i + 1, batches.len()));
        records.extend(batch_to_records(batch)?);
    }
    Ok(records)
}

/// Load every row of a survey extract
///
/// # Errors
/// `SchemaMismatch` when a required column is absent, IO/Arrow/Parquet errors
/// when the file cannot be read, `Serialization` when a batch cannot be decoded.
pub fn read_survey_file(path: &Path, batch_size: usize) -> Result<Vec<RawSurveyRecord>> {
    log_operation_start("Loading survey extract", path);
    let start = Instant::now();
    let records = with_spinner("Reading survey extract", |spinner| {
        load_records(path, batch_size, spinner)
    })?;

    log_operation_complete("loaded", path, records.len(), Some(start.elapsed()));
    Ok(records)
}
