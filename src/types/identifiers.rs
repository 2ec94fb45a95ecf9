use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::error::QueryError;

/// Largest page size any listing accepts.
pub const MAX_LIMIT: usize = 500;

/// Stable college identifier (e.g. `E005`). Unique per college, shared by
/// every branch row of that college.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollegeCode(String);

impl CollegeCode {
    pub fn new(code: impl Into<String>) -> Self {
        CollegeCode(code.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CollegeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CollegeCode {
    fn from(code: &str) -> Self {
        CollegeCode::new(code)
    }
}

/// One of the three counselling rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Round {
    One,
    Two,
    Three,
}

impl Round {
    pub const ALL: [Round; 3] = [Round::One, Round::Two, Round::Three];

    pub fn number(self) -> u8 {
        match self {
            Round::One => 1,
            Round::Two => 2,
            Round::Three => 3,
        }
    }
}

impl TryFrom<u8> for Round {
    type Error = QueryError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Round::One),
            2 => Ok(Round::Two),
            3 => Ok(Round::Three),
            other => Err(QueryError::InvalidArgument(format!(
                "round must be 1, 2 or 3, got {other}"
            ))),
        }
    }
}

impl From<Round> for u8 {
    fn from(round: Round) -> u8 {
        round.number()
    }
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// A student's rank. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rank(u32);

impl Rank {
    pub fn new(rank: i64) -> Result<Self, QueryError> {
        if rank <= 0 {
            return Err(QueryError::InvalidArgument(format!(
                "rank must be a positive integer, got {rank}"
            )));
        }
        u32::try_from(rank)
            .map(Rank)
            .map_err(|_| QueryError::InvalidArgument(format!("rank {rank} is out of range")))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Page size for listings, in `[1, max]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Limit(usize);

impl Limit {
    pub fn new(limit: usize) -> Result<Self, QueryError> {
        Self::bounded(limit, MAX_LIMIT)
    }

    pub fn bounded(limit: usize, max: usize) -> Result<Self, QueryError> {
        if limit == 0 || limit > max {
            return Err(QueryError::InvalidArgument(format!(
                "limit must be between 1 and {max}, got {limit}"
            )));
        }
        Ok(Limit(limit))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

/// `Asc` lists the most selective (lowest cutoff) seats first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Content hash of a loaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DatasetVersion(String);

impl DatasetVersion {
    pub fn from_content(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);

        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        DatasetVersion(format!("sha256:{hex}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
