use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::dataset::record::{AdmissionRecord, RoundCutoffs};
use crate::dataset::snapshot::Snapshot;
use crate::types::identifiers::CollegeCode;

#[derive(Debug, Error)]
pub enum DatasetLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid record at row {row}: {reason}")]
    InvalidRecord { row: usize, reason: String },
    #[error("Unsupported dataset format: {0}")]
    UnsupportedFormat(PathBuf),
}

/// Row shape of the exported cutoff table. The original database column
/// names are accepted as aliases.
#[derive(Debug, Deserialize)]
struct RawRow {
    college_code: String,
    college_name: String,
    branch_name: String,
    #[serde(alias = "GM_rank_r1", default)]
    cutoff_rank_round1: Option<RawCell>,
    #[serde(alias = "GM_rank_r2", default)]
    cutoff_rank_round2: Option<RawCell>,
    #[serde(alias = "GM_rank_r3", default)]
    cutoff_rank_round3: Option<RawCell>,
}

/// A cutoff cell as exported: a number, or text that should hold one.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCell {
    Number(f64),
    Text(String),
}

/// Builds a [`Snapshot`] from CSV or JSON exports.
///
/// Loading is the only fallible, I/O-bound step; everything after it is a
/// pure read of the snapshot.
pub struct SnapshotLoader;

impl SnapshotLoader {
    /// Dispatches on the file extension (`.csv` or `.json`).
    pub fn from_path(path: &Path) -> Result<Snapshot, DatasetLoadError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        let file = || File::open(path);
        let snapshot = match extension.as_deref() {
            Some("csv") => Self::from_csv_reader(file()?)?,
            Some("json") => Self::from_json_reader(file()?)?,
            _ => return Err(DatasetLoadError::UnsupportedFormat(path.to_path_buf())),
        };

        tracing::debug!(path = %path.display(), "dataset file read");
        Ok(snapshot)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Snapshot, DatasetLoadError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut rows = Vec::new();
        for row in csv_reader.deserialize::<RawRow>() {
            rows.push(row?);
        }
        Self::build(rows)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Snapshot, DatasetLoadError> {
        let rows: Vec<RawRow> = serde_json::from_reader(reader)?;
        Self::build(rows)
    }

    fn build(rows: Vec<RawRow>) -> Result<Snapshot, DatasetLoadError> {
        let mut records = Vec::with_capacity(rows.len());
        let mut zero_cutoffs = 0usize;

        for (idx, raw) in rows.into_iter().enumerate() {
            // 1-based, header excluded
            let row = idx + 1;

            if raw.college_code.trim().is_empty() {
                return Err(DatasetLoadError::InvalidRecord {
                    row,
                    reason: "college_code is empty".into(),
                });
            }

            let mut columns = [None; 3];
            for (slot, cell) in columns.iter_mut().zip([
                raw.cutoff_rank_round1,
                raw.cutoff_rank_round2,
                raw.cutoff_rank_round3,
            ]) {
                *slot = parse_cutoff(cell, row)?;
                if *slot == Some(0) {
                    zero_cutoffs += 1;
                }
            }

            records.push(AdmissionRecord::new(
                CollegeCode::new(raw.college_code),
                raw.college_name.trim(),
                raw.branch_name.trim(),
                RoundCutoffs::new(columns[0], columns[1], columns[2]),
            ));
        }

        if zero_cutoffs > 0 {
            tracing::warn!(zero_cutoffs, "cutoff value 0 treated as absent");
        }

        let snapshot = Snapshot::new(records);
        let info = snapshot.info();
        tracing::info!(
            records = info.record_count,
            colleges = info.college_count,
            branches = info.branch_count,
            version = info.version.as_str(),
            "dataset snapshot loaded"
        );

        Ok(snapshot)
    }
}

fn parse_cutoff(cell: Option<RawCell>, row: usize) -> Result<Option<u32>, DatasetLoadError> {
    let value = match cell {
        None => return Ok(None),
        Some(RawCell::Number(value)) => value,
        Some(RawCell::Text(text)) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(None);
            }
            text.parse::<f64>().map_err(|_| DatasetLoadError::InvalidRecord {
                row,
                reason: format!("cutoff rank '{text}' is not a number"),
            })?
        }
    };

    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > u32::MAX as f64 {
        return Err(DatasetLoadError::InvalidRecord {
            row,
            reason: format!("cutoff rank {value} is not a non-negative integer"),
        });
    }

    Ok(Some(value as u32))
}
