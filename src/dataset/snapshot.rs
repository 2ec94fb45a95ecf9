// Read-only by construction:
// no mutation after `new`
// reload means building a new Snapshot

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::dataset::record::AdmissionRecord;
use crate::types::error::QueryError;
use crate::types::identifiers::{CollegeCode, DatasetVersion, Round};
use crate::types::reports::{BranchCutoffs, CollegeBranches, CutoffTrend};

/// A dataset row seen through one round.
#[derive(Debug, Clone, Copy)]
pub struct RoundView<'a> {
    pub record: &'a AdmissionRecord,
    pub cutoff_rank: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollegeEntry {
    pub college_code: CollegeCode,
    pub college_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SnapshotInfo {
    pub version: DatasetVersion,
    pub record_count: usize,
    pub college_count: usize,
    pub branch_count: usize,
    pub loaded_at: DateTime<Utc>, // informational only
}

/// Immutable in-memory dataset shared by every query component.
#[derive(Debug)]
pub struct Snapshot {
    records: Vec<AdmissionRecord>,
    by_college: BTreeMap<CollegeCode, Vec<usize>>,
    colleges: Vec<CollegeEntry>,
    version: DatasetVersion,
    loaded_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(records: Vec<AdmissionRecord>) -> Self {
        let mut by_college: BTreeMap<CollegeCode, Vec<usize>> = BTreeMap::new();
        let mut colleges = Vec::new();
        let mut content = String::new();

        for (idx, record) in records.iter().enumerate() {
            let rows = by_college.entry(record.college_code.clone()).or_default();
            if rows.is_empty() {
                colleges.push(CollegeEntry {
                    college_code: record.college_code.clone(),
                    college_name: record.college_name.clone(),
                });
            }
            rows.push(idx);
            content.push_str(&record.canonical_line());
        }

        Self {
            version: DatasetVersion::from_content(content.as_bytes()),
            records,
            by_college,
            colleges,
            loaded_at: Utc::now(),
        }
    }

    pub fn records(&self) -> &[AdmissionRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every row in dataset order with the cutoff of `round` resolved.
    pub fn records_for_round(&self, round: Round) -> impl Iterator<Item = RoundView<'_>> + '_ {
        self.records.iter().map(move |record| RoundView {
            record,
            cutoff_rank: record.cutoff(round),
        })
    }

    pub fn all_branch_names(&self) -> BTreeSet<String> {
        self.records
            .iter()
            .map(|record| record.branch_name.clone())
            .collect()
    }

    /// Rows of one college in dataset order; empty for an unknown code.
    pub fn records_for_college(&self, college_code: &str) -> Vec<&AdmissionRecord> {
        self.by_college
            .get(&CollegeCode::new(college_code))
            .map(|rows| rows.iter().map(|&idx| &self.records[idx]).collect())
            .unwrap_or_default()
    }

    /// Distinct colleges in order of first appearance.
    pub fn colleges(&self) -> &[CollegeEntry] {
        &self.colleges
    }

    pub fn college_branches(&self, college_code: &str) -> Result<CollegeBranches, QueryError> {
        let rows = self.records_for_college(college_code);
        let first = rows
            .first()
            .ok_or_else(|| QueryError::NotFound(format!("college {college_code}")))?;

        Ok(CollegeBranches {
            college_code: first.college_code.clone(),
            college_name: first.college_name.clone(),
            branches: rows
                .iter()
                .map(|record| BranchCutoffs {
                    branch_name: record.branch_name.clone(),
                    cutoff_ranks: record.cutoffs,
                })
                .collect(),
        })
    }

    pub fn cutoff_trends(&self, college_code: &str, branch: &str) -> Result<CutoffTrend, QueryError> {
        let wanted = branch.trim().to_lowercase();
        self.records_for_college(college_code)
            .into_iter()
            .find(|record| record.branch_name.to_lowercase() == wanted)
            .map(|record| CutoffTrend {
                college_code: record.college_code.clone(),
                college_name: record.college_name.clone(),
                branch_name: record.branch_name.clone(),
                cutoff_trends: record.cutoffs,
            })
            .ok_or_else(|| {
                QueryError::NotFound(format!("branch '{branch}' at college {college_code}"))
            })
    }

    pub fn version(&self) -> &DatasetVersion {
        &self.version
    }

    pub fn info(&self) -> SnapshotInfo {
        SnapshotInfo {
            version: self.version.clone(),
            record_count: self.records.len(),
            college_count: self.colleges.len(),
            branch_count: self.all_branch_names().len(),
            loaded_at: self.loaded_at,
        }
    }
}
