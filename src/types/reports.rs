use serde::{Deserialize, Serialize};

use crate::dataset::RoundCutoffs;
use crate::types::identifiers::{CollegeCode, Round};

/// One college/branch seat with the cutoff of a single round resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollegeCutoff {
    pub college_code: CollegeCode,
    pub college_name: String,
    pub branch_name: String,
    pub cutoff_rank: u32,
    pub round: Round,
}

/// A fuzzy-match candidate with its score in `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// College code for college matches, exact branch name for branch matches.
    pub candidate_key: String,
    pub display_name: String,
    pub score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RankCategory {
    Best,
    Good,
    Moderate,
    Reach,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub best: usize,
    pub good: usize,
    pub moderate: usize,
    pub reach: usize,
}

impl CategoryCounts {
    pub fn total(&self) -> usize {
        self.best + self.good + self.moderate + self.reach
    }
}

/// Outcome of a rank-prospect analysis.
///
/// `counts` always describe the full partition; the per-category lists are
/// previews and may be shorter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProspectReport {
    pub rank: u32,
    pub round: Round,
    pub percentile_estimate: f64,
    pub total_options: usize,
    pub counts: CategoryCounts,
    pub best: Vec<CollegeCutoff>,
    pub good: Vec<CollegeCutoff>,
    pub moderate: Vec<CollegeCutoff>,
    pub reach: Vec<CollegeCutoff>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
}

/// Per-college aggregate for one round.
///
/// Cutoff fields are `0` when `cutoffs_counted` is `0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollegeSummary {
    pub college_code: CollegeCode,
    pub college_name: String,
    pub branches_offered: usize,
    pub cutoffs_counted: usize,
    pub best_cutoff: u32,
    pub worst_cutoff: u32,
    pub avg_cutoff: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub round: Round,
    pub colleges: Vec<CollegeSummary>,
    /// Set when more codes were supplied than the comparison accepts.
    pub truncated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Competitiveness {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchStats {
    pub branch_name: String,
    pub total_colleges: usize,
    pub best_cutoff: u32,
    pub avg_cutoff: u32,
    pub worst_cutoff: u32,
    pub competitiveness: Competitiveness,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchReport {
    pub round: Round,
    #[serde(flatten)]
    pub stats: BranchStats,
    pub top_colleges: Vec<CollegeCutoff>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchSummaryReport {
    pub round: Round,
    pub total_branches: usize,
    pub branches: Vec<BranchStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PopularityReport {
    Branch(BranchReport),
    Summary(BranchSummaryReport),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchCutoffs {
    pub branch_name: String,
    pub cutoff_ranks: RoundCutoffs,
}

/// Every branch of one college with all three rounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollegeBranches {
    pub college_code: CollegeCode,
    pub college_name: String,
    pub branches: Vec<BranchCutoffs>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CutoffTrend {
    pub college_code: CollegeCode,
    pub college_name: String,
    pub branch_name: String,
    pub cutoff_trends: RoundCutoffs,
}
