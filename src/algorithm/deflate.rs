//! Deflation stage: attach constant-dollar wage columns

use crate::error::Result;
use crate::lookup::deflator::DeflatorTable;
use crate::models::aggregate::{SkillAggregate, YearlyAggregate};

/// Rows that carry nominal wages which can be expressed in constant dollars
pub trait ConstantDollars: Sized {
    /// Survey year of the row
    fn year(&self) -> i32;

    /// Copy of the row with every constant-dollar column filled in
    ///
    /// # Errors
    /// `OutOfRange` when the table does not cover the row's year.
    fn with_constant_dollars(&self, table: &DeflatorTable) -> Result<Self>;
}

impl ConstantDollars for YearlyAggregate {
    fn year(&self) -> i32 {
        self.year
    }

    fn with_constant_dollars(&self, table: &DeflatorTable) -> Result<Self> {
        Ok(Self {
            real_wage_all: table.to_constant_dollars(self.year, self.wage_all)?,
            real_wage_m: table.to_constant_dollars(self.year, self.wage_m)?,
            real_wage_f: table.to_constant_dollars(self.year, self.wage_f)?,
            ..self.clone()
        })
    }
}

impl ConstantDollars for SkillAggregate {
    fn year(&self) -> i32 {
        self.year
    }

    fn with_constant_dollars(&self, table: &DeflatorTable) -> Result<Self> {
        Ok(Self {
            real_wage: table.to_constant_dollars(self.year, self.wage)?,
            ..self.clone()
        })
    }
}

/// Deflate every row; the first year outside the table aborts the stage
pub fn deflate<T: ConstantDollars>(rows: &[T], table: &DeflatorTable) -> Result<Vec<T>> {
    let deflated = rows
        .iter()
        .map(|row| row.with_constant_dollars(table))
        .collect::<Result<Vec<_>>>()?;
    log::info!(
        "Deflated {} rows with table {} ({}-{})",
        deflated.len(),
        table.version,
        table.first_year(),
        table.last_year()
    );
    Ok(deflated)
}
