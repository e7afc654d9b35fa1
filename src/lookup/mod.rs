//! Versioned reference tables
//!
//! Configuration data that the pipeline consumes but never derives: the
//! wage deflator series and the education-to-skill lookup.

pub mod deflator;
pub mod education;

pub use deflator::{DeflatorTable, TARGET_BASIS_MULTIPLIER};
pub use education::{EDUCATION_TABLE_VERSION, education_tier};
