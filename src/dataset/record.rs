use serde::{Deserialize, Serialize};

use crate::types::identifiers::{CollegeCode, Round};
use crate::types::reports::CollegeCutoff;

/// Cutoff ranks of one college/branch across the three rounds.
///
/// A present value is always a positive rank; `None` means nobody was admitted
/// or the round did not run. `0` is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawRoundCutoffs")]
pub struct RoundCutoffs {
    round1: Option<u32>,
    round2: Option<u32>,
    round3: Option<u32>,
}

#[derive(Deserialize)]
struct RawRoundCutoffs {
    round1: Option<u32>,
    round2: Option<u32>,
    round3: Option<u32>,
}

impl From<RawRoundCutoffs> for RoundCutoffs {
    fn from(raw: RawRoundCutoffs) -> Self {
        RoundCutoffs::new(raw.round1, raw.round2, raw.round3)
    }
}

impl RoundCutoffs {
    pub fn new(round1: Option<u32>, round2: Option<u32>, round3: Option<u32>) -> Self {
        Self {
            round1: round1.filter(|&rank| rank > 0),
            round2: round2.filter(|&rank| rank > 0),
            round3: round3.filter(|&rank| rank > 0),
        }
    }

    /// The only place a round is mapped to its column.
    pub fn get(&self, round: Round) -> Option<u32> {
        match round {
            Round::One => self.round1,
            Round::Two => self.round2,
            Round::Three => self.round3,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Round, Option<u32>)> + '_ {
        Round::ALL.into_iter().map(|round| (round, self.get(round)))
    }
}

/// One row of the dataset: a single branch of a single college.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionRecord {
    pub college_code: CollegeCode,
    pub college_name: String,
    pub branch_name: String,
    pub cutoffs: RoundCutoffs,
}

impl AdmissionRecord {
    pub fn new(
        college_code: impl Into<CollegeCode>,
        college_name: impl Into<String>,
        branch_name: impl Into<String>,
        cutoffs: RoundCutoffs,
    ) -> Self {
        Self {
            college_code: college_code.into(),
            college_name: college_name.into(),
            branch_name: branch_name.into(),
            cutoffs,
        }
    }

    pub fn cutoff(&self, round: Round) -> Option<u32> {
        self.cutoffs.get(round)
    }

    /// Project this row onto one round. `None` if the round has no cutoff.
    pub fn resolve(&self, round: Round) -> Option<CollegeCutoff> {
        self.cutoff(round).map(|cutoff_rank| CollegeCutoff {
            college_code: self.college_code.clone(),
            college_name: self.college_name.clone(),
            branch_name: self.branch_name.clone(),
            cutoff_rank,
            round,
        })
    }

    pub(crate) fn canonical_line(&self) -> String {
        let column = |round| {
            self.cutoff(round)
                .map(|rank: u32| rank.to_string())
                .unwrap_or_default()
        };
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\n",
            self.college_code,
            self.college_name,
            self.branch_name,
            column(Round::One),
            column(Round::Two),
            column(Round::Three),
        )
    }
}
