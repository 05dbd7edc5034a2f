//! Immutable sales table shared by every report request.

use polars::prelude::*;

use crate::data::{COL_RECESSION, COL_YEAR};

/// Read-only view over the loaded dataset.
///
/// Constructed once at startup by the loader and only ever filtered into
/// per-request subsets; no writes happen after load.
#[derive(Debug, Clone)]
pub struct SalesTable {
    df: DataFrame,
}

impl SalesTable {
    pub fn new(df: DataFrame) -> Self {
        Self { df }
    }

    /// Number of records in the table.
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Records flagged as falling inside a recession period.
    pub fn recession_only(&self) -> PolarsResult<SalesTable> {
        let df = self
            .df
            .clone()
            .lazy()
            .filter(col(COL_RECESSION).eq(lit(1)))
            .collect()?;
        Ok(SalesTable::new(df))
    }

    /// Records for a single calendar year.
    pub fn for_year(&self, year: i32) -> PolarsResult<SalesTable> {
        let df = self
            .df
            .clone()
            .lazy()
            .filter(col(COL_YEAR).eq(lit(year)))
            .collect()?;
        Ok(SalesTable::new(df))
    }

    pub(crate) fn frame(&self) -> &DataFrame {
        &self.df
    }
}
