//! Rank and branch eligibility filtering over one round of the snapshot.

mod ordering;

use std::collections::BTreeSet;

use crate::dataset::{RoundView, Snapshot};
use crate::types::identifiers::{Limit, Rank, Round, SortOrder};
use crate::types::reports::CollegeCutoff;
use ordering::{order_and_page, Eligible};

/// Conjunction of optional filters for [`RankFilter::search`].
///
/// Branches are OR-ed together and compared case-insensitively; an empty
/// branch set applies no branch filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    pub min_rank: Option<Rank>,
    pub max_rank: Option<Rank>,
    branches: BTreeSet<String>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_rank(mut self, rank: Rank) -> Self {
        self.min_rank = Some(rank);
        self
    }

    pub fn max_rank(mut self, rank: Rank) -> Self {
        self.max_rank = Some(rank);
        self
    }

    pub fn branches<I, B>(mut self, branches: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<str>,
    {
        self.branches = branches
            .into_iter()
            .map(|b| b.as_ref().trim().to_lowercase())
            .filter(|b| !b.is_empty())
            .collect();
        self
    }

    fn accepts(&self, view: &RoundView<'_>, cutoff: u32) -> bool {
        self.min_rank.map_or(true, |min| cutoff >= min.get())
            && self.max_rank.map_or(true, |max| cutoff <= max.get())
            && (self.branches.is_empty()
                || self
                    .branches
                    .contains(&view.record.branch_name.to_lowercase()))
    }
}

/// Rows without a cutoff for the requested round never appear in a listing.
pub struct RankFilter<'s> {
    snapshot: &'s Snapshot,
}

impl<'s> RankFilter<'s> {
    pub fn new(snapshot: &'s Snapshot) -> Self {
        Self { snapshot }
    }

    /// Seats a student of `rank` can plausibly get: those whose cutoff is at
    /// or beyond the student's rank.
    pub fn filter_by_rank(
        &self,
        rank: Rank,
        round: Round,
        limit: Option<Limit>,
        order: SortOrder,
    ) -> Vec<CollegeCutoff> {
        self.collect(round, limit, order, |_, cutoff| cutoff >= rank.get())
    }

    /// Every college offering `branch` (case-insensitive exact name).
    pub fn filter_by_branch(
        &self,
        branch: &str,
        round: Round,
        limit: Option<Limit>,
        order: SortOrder,
    ) -> Vec<CollegeCutoff> {
        let wanted = branch.trim().to_lowercase();
        self.collect(round, limit, order, |view, _| {
            view.record.branch_name.to_lowercase() == wanted
        })
    }

    pub fn search(
        &self,
        filter: &SearchFilter,
        round: Round,
        limit: Option<Limit>,
        order: SortOrder,
    ) -> Vec<CollegeCutoff> {
        self.collect(round, limit, order, |view, cutoff| filter.accepts(view, cutoff))
    }

    fn collect<F>(
        &self,
        round: Round,
        limit: Option<Limit>,
        order: SortOrder,
        keep: F,
    ) -> Vec<CollegeCutoff>
    where
        F: Fn(&RoundView<'_>, u32) -> bool,
    {
        let eligible: Vec<Eligible<'_>> = self
            .snapshot
            .records_for_round(round)
            .filter_map(|view| {
                let cutoff = view.cutoff_rank?;
                keep(&view, cutoff).then_some(Eligible {
                    record: view.record,
                    cutoff_rank: cutoff,
                })
            })
            .collect();

        order_and_page(eligible, round, limit, order)
    }
}
