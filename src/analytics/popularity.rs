use std::collections::BTreeMap;

use crate::analytics::CutoffStats;
use crate::config::PopularityConfig;
use crate::dataset::Snapshot;
use crate::filter::RankFilter;
use crate::types::error::QueryError;
use crate::types::identifiers::{Round, SortOrder};
use crate::types::reports::{
    BranchReport, BranchStats, BranchSummaryReport, Competitiveness, PopularityReport,
};

impl Competitiveness {
    pub fn from_best_cutoff(best_cutoff: u32, config: &PopularityConfig) -> Self {
        if best_cutoff < config.high_below {
            Competitiveness::High
        } else if best_cutoff < config.medium_below {
            Competitiveness::Medium
        } else {
            Competitiveness::Low
        }
    }
}

pub struct PopularityAnalyzer<'s> {
    snapshot: &'s Snapshot,
    config: &'s PopularityConfig,
}

impl<'s> PopularityAnalyzer<'s> {
    pub fn new(snapshot: &'s Snapshot, config: &'s PopularityConfig) -> Self {
        Self { snapshot, config }
    }

    /// One branch when a name is given, every branch otherwise.
    pub fn branch_stats(&self, branch: Option<&str>, round: Round) -> Result<PopularityReport, QueryError> {
        match branch {
            Some(name) => self.branch_report(name, round).map(PopularityReport::Branch),
            None => Ok(PopularityReport::Summary(self.summary(round))),
        }
    }

    pub fn branch_report(&self, branch: &str, round: Round) -> Result<BranchReport, QueryError> {
        let seats = RankFilter::new(self.snapshot).filter_by_branch(branch, round, None, SortOrder::Asc);
        let stats = CutoffStats::collect(seats.iter().map(|seat| seat.cutoff_rank))
            .ok_or_else(|| QueryError::NotFound(format!("branch '{branch}' in round {round}")))?;

        let branch_name = self.display_name(branch, round).unwrap_or_else(|| branch.trim().to_string());
        let top_colleges = seats.into_iter().take(self.config.top_colleges).collect();

        Ok(BranchReport {
            round,
            stats: self.to_branch_stats(branch_name, stats),
            top_colleges,
        })
    }

    /// Every branch with a cutoff in `round`, most selective first.
    pub fn summary(&self, round: Round) -> BranchSummaryReport {
        // keyed case-insensitively, as `branch_report` matches; first spelling wins
        let mut by_branch: BTreeMap<String, (&str, Vec<u32>)> = BTreeMap::new();
        for view in self.snapshot.records_for_round(round) {
            if let Some(cutoff) = view.cutoff_rank {
                let name = view.record.branch_name.as_str();
                by_branch
                    .entry(name.to_lowercase())
                    .or_insert_with(|| (name, Vec::new()))
                    .1
                    .push(cutoff);
            }
        }

        let mut branches: Vec<BranchStats> = by_branch
            .into_values()
            .filter_map(|(name, cutoffs)| {
                CutoffStats::collect(cutoffs).map(|stats| self.to_branch_stats(name.to_string(), stats))
            })
            .collect();

        // BTreeMap iteration already orders equal cutoffs by lowercased name
        branches.sort_by_key(|stats| stats.best_cutoff);

        BranchSummaryReport {
            round,
            total_branches: branches.len(),
            branches,
        }
    }

    /// First dataset spelling of `branch` among rows with a cutoff in `round`.
    fn display_name(&self, branch: &str, round: Round) -> Option<String> {
        let wanted = branch.trim().to_lowercase();
        self.snapshot
            .records_for_round(round)
            .find(|view| view.cutoff_rank.is_some() && view.record.branch_name.to_lowercase() == wanted)
            .map(|view| view.record.branch_name.clone())
    }

    fn to_branch_stats(&self, branch_name: String, stats: CutoffStats) -> BranchStats {
        BranchStats {
            branch_name,
            total_colleges: stats.count,
            best_cutoff: stats.best,
            avg_cutoff: stats.avg,
            worst_cutoff: stats.worst,
            competitiveness: Competitiveness::from_best_cutoff(stats.best, self.config),
        }
    }
}
