//! File formats owned by the cli: point CSV in, Betti log and table out.

use anyhow::{bail, Context, Result};
use homology::api::BettiNumbers;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// One point per row; every column is a coordinate. Header row required.
pub fn read_points(path: &Path) -> Result<Vec<Vec<f64>>> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .collect()?;
    tracing::info!(rows = df.height(), cols = df.width(), "points_csv_shape");

    let mut rows = vec![Vec::with_capacity(df.width()); df.height()];
    for series in df.get_columns() {
        let col = series.cast(&DataType::Float64)?;
        for (i, v) in col.f64()?.into_iter().enumerate() {
            let Some(v) = v else {
                bail!("row {i}: missing value in column {}", series.name());
            };
            rows[i].push(v);
        }
    }
    Ok(rows)
}

/// `B0, B1, B2, epsilon`, the line format the plotting side reads.
pub fn log_line(b: &BettiNumbers) -> String {
    format!("{}, {}, {}, {}", b.b0, b.b1, b.b2, b.epsilon)
}

/// `start, start + step, …` strictly below `stop`.
pub fn thresholds(start: f64, stop: f64, step: f64) -> Result<Vec<f64>> {
    if !(step.is_finite() && step > 0.0) {
        bail!("step must be a positive number, got {step}");
    }
    if !(start.is_finite() && stop.is_finite()) {
        bail!("start/stop must be finite");
    }
    Ok((0u64..)
        .map(|k| start + k as f64 * step)
        .take_while(|t| *t < stop)
        .collect())
}

/// Columns `epsilon, B_0, B_1, B_2`; Parquet for `.parquet`, CSV otherwise.
pub fn write_table(path: &Path, rows: &[BettiNumbers]) -> Result<()> {
    let count = |f: fn(&BettiNumbers) -> usize| -> Vec<i64> {
        rows.iter().map(|b| f(b) as i64).collect()
    };
    let mut df = df!(
        "epsilon" => rows.iter().map(|b| b.epsilon).collect::<Vec<f64>>(),
        "B_0" => count(|b| b.b0),
        "B_1" => count(|b| b.b1),
        "B_2" => count(|b| b.b2)
    )?;
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    if path.extension().is_some_and(|e| e == "parquet") {
        ParquetWriter::new(file).finish(&mut df)?;
    } else {
        CsvWriter::new(file).include_header(true).finish(&mut df)?;
    }
    Ok(())
}
