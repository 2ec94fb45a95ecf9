use crate::analytics::CutoffStats;
use crate::config::ComparisonConfig;
use crate::dataset::Snapshot;
use crate::types::error::QueryError;
use crate::types::identifiers::Round;
use crate::types::reports::{CollegeSummary, ComparisonReport};

pub struct ComparisonAggregator<'s> {
    snapshot: &'s Snapshot,
    config: &'s ComparisonConfig,
}

impl<'s> ComparisonAggregator<'s> {
    pub fn new(snapshot: &'s Snapshot, config: &'s ComparisonConfig) -> Self {
        Self { snapshot, config }
    }

    /// Side-by-side summary of 2..=4 colleges in the order given. Codes past
    /// the maximum are dropped and `truncated` is set.
    pub fn compare<C>(&self, college_codes: &[C], round: Round) -> Result<ComparisonReport, QueryError>
    where
        C: AsRef<str>,
    {
        if college_codes.len() < self.config.min_colleges {
            return Err(QueryError::InvalidArgument(format!(
                "at least {} college codes are required to compare, got {}",
                self.config.min_colleges,
                college_codes.len()
            )));
        }

        let truncated = college_codes.len() > self.config.max_colleges;
        let colleges = college_codes
            .iter()
            .take(self.config.max_colleges)
            .map(|code| self.summarize(code.as_ref(), round))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ComparisonReport {
            round,
            colleges,
            truncated,
        })
    }

    fn summarize(&self, college_code: &str, round: Round) -> Result<CollegeSummary, QueryError> {
        let rows = self.snapshot.records_for_college(college_code);
        let first = rows
            .first()
            .ok_or_else(|| QueryError::NotFound(format!("college {college_code}")))?;

        let stats = CutoffStats::collect(rows.iter().filter_map(|record| record.cutoff(round)));

        Ok(CollegeSummary {
            college_code: first.college_code.clone(),
            college_name: first.college_name.clone(),
            branches_offered: rows.len(),
            cutoffs_counted: stats.map_or(0, |s| s.count),
            best_cutoff: stats.map_or(0, |s| s.best),
            worst_cutoff: stats.map_or(0, |s| s.worst),
            avg_cutoff: stats.map_or(0, |s| s.avg),
        })
    }
}
