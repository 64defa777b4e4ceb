//! Loading and cleaning of raw input files before analysis

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Marker used by raw exports for a missing cell.
pub const MISSING_MARKER: &str = "?";

/// Read a CSV or Parquet file into a DataFrame.
pub fn load_frame(path: &Path) -> Result<DataFrame> {
    let ext = path.extension().and_then(|s| s.to_str());
    let df = match ext {
        Some("csv") => LazyCsvReader::new(path)
            .with_null_values(Some(NullValues::AllColumnsSingle(MISSING_MARKER.to_string())))
            .finish()
            .with_context(|| format!("Failed to read CSV {:?}", path))?
            .collect()
            .with_context(|| format!("Failed to collect CSV {:?}", path))?,
        Some("parquet") => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open {:?}", path))?;
            ParquetReader::new(file)
                .finish()
                .with_context(|| format!("Failed to read {:?}", path))?
        }
        _ => bail!("Unsupported input file {:?}: expected .csv or .parquet", path),
    };

    info!("Loaded {} rows x {} columns from {:?}", df.height(), df.width(), path);
    Ok(df)
}

/// Fill missing values so equality grouping is meaningful on every column.
///
/// Numeric columns take the column mean; every other column (dates,
/// datetimes, text) takes its most frequent value.
pub fn impute_missing(df: DataFrame) -> Result<DataFrame> {
    let fills: Vec<Expr> = df
        .get_columns()
        .iter()
        .filter(|s| s.null_count() > 0)
        .map(|s| {
            let name = s.name();
            debug!("Imputing {} missing values in {}", s.null_count(), name);
            if s.dtype().is_numeric() {
                col(name).fill_null(col(name).mean())
            } else {
                col(name).fill_null(col(name).mode().first())
            }
        })
        .collect();

    if fills.is_empty() {
        return Ok(df);
    }

    df.lazy()
        .with_columns(fills)
        .collect()
        .context("Failed to impute missing values")
}
