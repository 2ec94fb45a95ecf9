//! Entry point for calling layers (HTTP handlers, tool adapters).
//!
//! Takes primitive arguments, validates them into typed ones, and delegates to
//! the components. Holds an `Arc` of the snapshot and no mutable state, so one
//! engine can be cloned into any number of threads or tasks.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::analytics::{ComparisonAggregator, PopularityAnalyzer, ProspectAnalyzer};
use crate::config::{ConfigError, EngineConfig};
use crate::dataset::Snapshot;
use crate::filter::{RankFilter, SearchFilter};
use crate::matching::{Candidate, FuzzyMatcher, Resolution};
use crate::types::error::QueryError;
use crate::types::identifiers::{Limit, Rank, Round, SortOrder};
use crate::types::reports::{
    CollegeBranches, CollegeCutoff, ComparisonReport, CutoffTrend, MatchResult, PopularityReport,
    ProspectReport,
};

/// Arguments of [`AdmissionEngine::search_colleges`].
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub min_rank: Option<i64>,
    pub max_rank: Option<i64>,
    pub branches: Vec<String>,
    pub round: u8,
    pub limit: Option<usize>,
    pub sort_order: SortOrder,
}

#[derive(Clone)]
pub struct AdmissionEngine {
    snapshot: Arc<Snapshot>,
    config: Arc<EngineConfig>,
}

impl AdmissionEngine {
    /// Fails when `config` does not pass [`EngineConfig::validate`].
    pub fn new(snapshot: Arc<Snapshot>, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            snapshot,
            config: Arc::new(config),
        })
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn limit(&self, limit: Option<usize>) -> Result<Option<Limit>, QueryError> {
        limit
            .map(|n| Limit::bounded(n, self.config.max_limit))
            .transpose()
    }

    fn required_limit(&self, limit: usize) -> Result<Limit, QueryError> {
        Limit::bounded(limit, self.config.max_limit)
    }

    pub fn colleges_by_rank(
        &self,
        rank: i64,
        round: u8,
        limit: Option<usize>,
        sort_order: SortOrder,
    ) -> Result<Vec<CollegeCutoff>, QueryError> {
        let rank = Rank::new(rank)?;
        let round = Round::try_from(round)?;
        let limit = self.limit(limit)?;
        Ok(RankFilter::new(&self.snapshot).filter_by_rank(rank, round, limit, sort_order))
    }

    pub fn colleges_by_branch(
        &self,
        branch: &str,
        round: u8,
        limit: Option<usize>,
        sort_order: SortOrder,
    ) -> Result<Vec<CollegeCutoff>, QueryError> {
        let round = Round::try_from(round)?;
        let limit = self.limit(limit)?;
        Ok(RankFilter::new(&self.snapshot).filter_by_branch(branch, round, limit, sort_order))
    }

    pub fn search_colleges(&self, params: &SearchParams) -> Result<Vec<CollegeCutoff>, QueryError> {
        let round = Round::try_from(params.round)?;
        let limit = self.limit(params.limit)?;

        let mut filter = SearchFilter::new().branches(&params.branches);
        if let Some(min) = params.min_rank {
            filter = filter.min_rank(Rank::new(min)?);
        }
        if let Some(max) = params.max_rank {
            filter = filter.max_rank(Rank::new(max)?);
        }

        Ok(RankFilter::new(&self.snapshot).search(&filter, round, limit, params.sort_order))
    }

    pub fn all_branches(&self) -> BTreeSet<String> {
        self.snapshot.all_branch_names()
    }

    pub fn college_branches(&self, college_code: &str) -> Result<CollegeBranches, QueryError> {
        self.snapshot.college_branches(college_code)
    }

    pub fn cutoff_trends(&self, college_code: &str, branch: &str) -> Result<CutoffTrend, QueryError> {
        self.snapshot.cutoff_trends(college_code, branch)
    }

    pub fn search_college_by_name(&self, query: &str, limit: usize) -> Result<Vec<MatchResult>, QueryError> {
        let limit = self.required_limit(limit)?;
        let matcher = FuzzyMatcher::for_colleges(&self.config.matching);
        Ok(matcher.match_candidates(query, self.college_candidates(), limit))
    }

    pub fn match_branch_names(&self, query: &str, limit: usize) -> Result<Vec<MatchResult>, QueryError> {
        let limit = self.required_limit(limit)?;
        let branches = self.snapshot.all_branch_names();
        let matcher = FuzzyMatcher::for_branches(&self.config.matching);
        Ok(matcher.match_candidates(query, branch_candidates(&branches), limit))
    }

    pub fn resolve_college(&self, query: &str, limit: usize) -> Result<Resolution, QueryError> {
        let limit = self.required_limit(limit)?;
        let matcher = FuzzyMatcher::for_colleges(&self.config.matching);
        Ok(matcher.resolve(query, self.college_candidates(), limit))
    }

    pub fn resolve_branch(&self, query: &str, limit: usize) -> Result<Resolution, QueryError> {
        let limit = self.required_limit(limit)?;
        let branches = self.snapshot.all_branch_names();
        let matcher = FuzzyMatcher::for_branches(&self.config.matching);
        Ok(matcher.resolve(query, branch_candidates(&branches), limit))
    }

    pub fn analyze_rank_prospects(&self, rank: i64, round: u8) -> Result<ProspectReport, QueryError> {
        let rank = Rank::new(rank)?;
        let round = Round::try_from(round)?;
        Ok(ProspectAnalyzer::new(&self.snapshot, &self.config.prospects).analyze(rank, round))
    }

    pub fn compare_colleges<C>(&self, college_codes: &[C], round: u8) -> Result<ComparisonReport, QueryError>
    where
        C: AsRef<str>,
    {
        let round = Round::try_from(round)?;
        ComparisonAggregator::new(&self.snapshot, &self.config.comparison).compare(college_codes, round)
    }

    pub fn branch_popularity(&self, branch: Option<&str>, round: u8) -> Result<PopularityReport, QueryError> {
        let round = Round::try_from(round)?;
        PopularityAnalyzer::new(&self.snapshot, &self.config.popularity).branch_stats(branch, round)
    }

    fn college_candidates(&self) -> impl Iterator<Item = Candidate<'_>> + '_ {
        self.snapshot.colleges().iter().map(|college| Candidate {
            key: college.college_code.as_str(),
            display: college.college_name.as_str(),
        })
    }
}

fn branch_candidates(branches: &BTreeSet<String>) -> impl Iterator<Item = Candidate<'_>> + '_ {
    branches.iter().map(|branch| Candidate {
        key: branch.as_str(),
        display: branch.as_str(),
    })
}
