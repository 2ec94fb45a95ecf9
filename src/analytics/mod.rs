pub mod comparison;
pub mod popularity;
pub mod prospects;

pub use comparison::ComparisonAggregator;
pub use popularity::PopularityAnalyzer;
pub use prospects::{percentile_estimate, ProspectAnalyzer};

/// Internal: min / max / rounded mean of a non-empty set of cutoffs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CutoffStats {
    pub count: usize,
    pub best: u32,
    pub worst: u32,
    pub avg: u32,
}

impl CutoffStats {
    pub fn collect<I>(cutoffs: I) -> Option<Self>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut count = 0usize;
        let mut sum = 0u64;
        let mut best = u32::MAX;
        let mut worst = 0u32;

        for cutoff in cutoffs {
            count += 1;
            sum += u64::from(cutoff);
            best = best.min(cutoff);
            worst = worst.max(cutoff);
        }

        if count == 0 {
            return None;
        }

        let mean = sum as f64 / count as f64;
        Some(Self {
            count,
            best,
            worst,
            avg: mean.round_ties_even() as u32,
        })
    }
}
