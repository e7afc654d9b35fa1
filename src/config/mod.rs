//! Configuration for the survey report run.

use std::fmt;
use std::path::PathBuf;

use crate::models::survey::Sex;
use crate::utils::logging::log_warning;

/// Default Arrow batch size when reading the extract
pub const DEFAULT_BATCH_SIZE: usize = 8192;

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Restricted population used for the skill-tier analysis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkillPopulation {
    /// Sex included in the analysis
    pub sex: Sex,
    /// Minimum age (inclusive)
    pub min_age: f64,
    /// Maximum age (inclusive)
    pub max_age: f64,
}

impl Default for SkillPopulation {
    fn default() -> Self {
        Self {
            sex: Sex::Male,
            min_age: 25.0,
            max_age: 64.0,
        }
    }
}

/// Configuration for a report run
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// CSV or Parquet extract to read
    pub input_path: PathBuf,
    /// Directory the output tables are written to
    pub output_dir: PathBuf,
    /// Records with age at or below this value are outside the eligible population
    pub min_age_exclusive: f64,
    /// Population for the skill-tier tables
    pub skill_population: SkillPopulation,
    /// Batch size for the Arrow readers
    pub batch_size: usize,
    /// Also write Parquet copies of the output tables
    pub write_parquet: bool,
    /// JSON file replacing the built-in deflator table
    pub deflator_path: Option<PathBuf>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("cps_data.csv"),
            output_dir: PathBuf::from("report_output"),
            min_age_exclusive: 15.0,
            skill_population: SkillPopulation::default(),
            batch_size: DEFAULT_BATCH_SIZE,
            write_parquet: false,
            deflator_path: None,
        }
    }
}

impl ReportConfig {
    /// Default configuration with environment overrides applied
    ///
    /// Recognised variables: `CPS_BATCH_SIZE`, `CPS_WRITE_PARQUET`,
    /// `CPS_DEFLATOR_PATH`, `CPS_OUTPUT_DIR`. Values that cannot be parsed are
    /// logged and the default is kept.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Default configuration with overrides read through `lookup`
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(raw) = lookup("CPS_BATCH_SIZE") {
            match raw.trim().parse::<usize>() {
                Ok(size) if size > 0 => config.batch_size = size,
                _ => log_warning(
                    &format!(
                        "Ignoring CPS_BATCH_SIZE={raw:?}, using default batch size {}",
                        config.batch_size
                    ),
                    None,
                ),
            }
        }
        if let Some(raw) = lookup("CPS_WRITE_PARQUET") {
            match parse_flag(&raw) {
                Some(flag) => config.write_parquet = flag,
                None => log_warning(
                    &format!("Ignoring CPS_WRITE_PARQUET={raw:?}, Parquet output stays off"),
                    None,
                ),
            }
        }
        if let Some(path) = lookup("CPS_DEFLATOR_PATH") {
            config.deflator_path = Some(PathBuf::from(path));
        }
        if let Some(dir) = lookup("CPS_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }
        config
    }

    /// Set the input path
    #[must_use]
    pub fn with_input(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = path.into();
        self
    }

    /// Set the output directory
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}

impl fmt::Display for ReportConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Report Configuration:")?;
        writeln!(f, "  Input: {}", self.input_path.display())?;
        writeln!(f, "  Output Directory: {}", self.output_dir.display())?;
        writeln!(f, "  Eligible Age: > {}", self.min_age_exclusive)?;
        writeln!(
            f,
            "  Skill Population: {} aged {}-{}",
            self.skill_population.sex,
            self.skill_population.min_age,
            self.skill_population.max_age
        )?;
        writeln!(f, "  Batch Size: {}", self.batch_size)?;
        writeln!(f, "  Write Parquet: {}", self.write_parquet)?;
        if let Some(path) = &self.deflator_path {
            writeln!(f, "  Deflator Table: {}", path.display())?;
        }
        Ok(())
    }
}
