//! CSV Dataset Loader
//! Loads the historical sales file with Polars and validates its schema.

use polars::prelude::*;
use std::path::Path;
use thiserror::Error;

use crate::data::{
    SalesTable, COL_AD_SPEND, COL_RECESSION, COL_SALES, COL_UNEMPLOYMENT, COL_YEAR,
    REQUIRED_COLUMNS,
};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("dataset file not found: {path}")]
    FileNotFound { path: String },
    #[error("failed to read CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("dataset missing required columns: {}", .columns.join(", "))]
    MissingColumns { columns: Vec<String> },
    #[error("dataset columns hold non-numeric data: {}", .columns.join(", "))]
    InvalidColumns { columns: Vec<String> },
}

/// Load the sales dataset and validate it against the required schema.
///
/// Numeric columns are normalized once here (Year/Recession to Int32, the
/// measures to Float64) so the aggregation pipeline never casts again. Any
/// failure is fatal to startup.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<SalesTable, LoadError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(10_000))
        .finish()?
        .collect()?;

    let columns: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !columns.iter().any(|have| have == *required))
        .map(|required| required.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::MissingColumns { columns: missing });
    }

    let mut invalid: Vec<String> = Vec::new();
    for name in [COL_YEAR, COL_SALES, COL_AD_SPEND, COL_UNEMPLOYMENT] {
        if !is_numeric(df.column(name)?.dtype()) {
            invalid.push(name.to_string());
        }
    }
    let recession_dtype = df.column(COL_RECESSION)?.dtype();
    if !is_numeric(recession_dtype) && !matches!(recession_dtype, DataType::Boolean) {
        invalid.push(COL_RECESSION.to_string());
    }
    if !invalid.is_empty() {
        return Err(LoadError::InvalidColumns { columns: invalid });
    }

    let df = df
        .lazy()
        .with_columns([
            col(COL_YEAR).cast(DataType::Int32),
            col(COL_SALES).cast(DataType::Float64),
            col(COL_AD_SPEND).cast(DataType::Float64),
            col(COL_UNEMPLOYMENT).cast(DataType::Float64),
            col(COL_RECESSION).cast(DataType::Int32),
        ])
        .collect()?;

    tracing::debug!(rows = df.height(), path = %path.display(), "dataset validated");
    Ok(SalesTable::new(df))
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}
