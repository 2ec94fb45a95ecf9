use crate::config::ProspectConfig;
use crate::dataset::Snapshot;
use crate::filter::RankFilter;
use crate::types::identifiers::{Rank, Round, SortOrder};
use crate::types::reports::{CategoryCounts, CollegeCutoff, ProspectReport, RankCategory};

impl RankCategory {
    /// Bucket by `margin = cutoff_rank - student_rank`; a larger margin is a
    /// safer seat.
    pub fn from_margin(margin: u32, config: &ProspectConfig) -> Self {
        if margin <= config.best_margin {
            RankCategory::Best
        } else if margin <= config.good_margin {
            RankCategory::Good
        } else if margin <= config.moderate_margin {
            RankCategory::Moderate
        } else {
            RankCategory::Reach
        }
    }
}

/// `((ceiling - rank) / ceiling) * 100`, one decimal, never below zero.
///
/// The ceiling is an assumed maximum rank, not the real candidate pool, so this
/// is an approximation.
pub fn percentile_estimate(rank: Rank, ceiling: u32) -> f64 {
    let ceiling = f64::from(ceiling.max(1));
    let raw = (ceiling - f64::from(rank.get())) / ceiling * 100.0;
    ((raw * 10.0).round_ties_even() / 10.0).max(0.0)
}

pub struct ProspectAnalyzer<'s> {
    snapshot: &'s Snapshot,
    config: &'s ProspectConfig,
}

impl<'s> ProspectAnalyzer<'s> {
    pub fn new(snapshot: &'s Snapshot, config: &'s ProspectConfig) -> Self {
        Self { snapshot, config }
    }

    pub fn analyze(&self, rank: Rank, round: Round) -> ProspectReport {
        let eligible = RankFilter::new(self.snapshot).filter_by_rank(rank, round, None, SortOrder::Asc);
        let percentile = percentile_estimate(rank, self.config.percentile_ceiling);

        let mut report = ProspectReport {
            rank: rank.get(),
            round,
            percentile_estimate: percentile,
            total_options: eligible.len(),
            counts: CategoryCounts::default(),
            best: Vec::new(),
            good: Vec::new(),
            moderate: Vec::new(),
            reach: Vec::new(),
            message: None,
        };

        if eligible.is_empty() {
            report.message = Some(format!(
                "No colleges have a round {round} cutoff at or beyond rank {rank}"
            ));
            return report;
        }

        for seat in eligible {
            let margin = seat.cutoff_rank - rank.get();
            let (count, preview, cap) = match RankCategory::from_margin(margin, self.config) {
                RankCategory::Best => (&mut report.counts.best, &mut report.best, self.config.preview_limit),
                RankCategory::Good => (&mut report.counts.good, &mut report.good, self.config.preview_limit),
                RankCategory::Moderate => {
                    (&mut report.counts.moderate, &mut report.moderate, self.config.preview_limit)
                }
                RankCategory::Reach => {
                    (&mut report.counts.reach, &mut report.reach, self.config.reach_preview_limit)
                }
            };
            *count += 1;
            push_capped(preview, seat, cap);
        }

        debug_assert_eq!(report.counts.total(), report.total_options);
        report
    }
}

fn push_capped(preview: &mut Vec<CollegeCutoff>, seat: CollegeCutoff, cap: usize) {
    if preview.len() < cap {
        preview.push(seat);
    }
}
