use std::cmp::Ordering;

use crate::dataset::AdmissionRecord;
use crate::types::identifiers::{Limit, Round, SortOrder};
use crate::types::reports::CollegeCutoff;

/// Internal: a row that passed filtering, with its round's cutoff resolved.
/// Holds a reference to avoid cloning names before pagination.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Eligible<'a> {
    pub record: &'a AdmissionRecord,
    pub cutoff_rank: u32,
}

/// Total order used by every listing: `(cutoff_rank, college_code,
/// branch_name)` ascending, dataset order for anything still equal.
fn ascending(a: &Eligible<'_>, b: &Eligible<'_>) -> Ordering {
    a.cutoff_rank
        .cmp(&b.cutoff_rank)
        .then_with(|| a.record.college_code.cmp(&b.record.college_code))
        .then_with(|| a.record.branch_name.cmp(&b.record.branch_name))
}

/// Sort, then cut to `limit`. `Desc` is the exact reverse of `Asc`.
pub(crate) fn order_and_page(
    mut entries: Vec<Eligible<'_>>,
    round: Round,
    limit: Option<Limit>,
    order: SortOrder,
) -> Vec<CollegeCutoff> {
    entries.sort_by(ascending);
    if order == SortOrder::Desc {
        entries.reverse();
    }

    debug_assert!(entries.windows(2).all(|w| match order {
        SortOrder::Asc => w[0].cutoff_rank <= w[1].cutoff_rank,
        SortOrder::Desc => w[0].cutoff_rank >= w[1].cutoff_rank,
    }));

    let take = limit.map_or(entries.len(), Limit::get);
    entries
        .into_iter()
        .take(take)
        .map(|entry| CollegeCutoff {
            college_code: entry.record.college_code.clone(),
            college_name: entry.record.college_name.clone(),
            branch_name: entry.record.branch_name.clone(),
            cutoff_rank: entry.cutoff_rank,
            round,
        })
        .collect()
}
