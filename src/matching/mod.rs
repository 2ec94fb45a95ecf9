//! Approximate matching of user-typed college and branch names.
//!
//! One scoring routine serves both uses; a [`MatchStrategy`] switches the
//! name-only initials rule and the branch-only word-overlap and abbreviation
//! rules on or off.

pub mod abbreviations;
pub mod similarity;

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

use crate::config::MatchingConfig;
use crate::types::identifiers::Limit;
use crate::types::reports::MatchResult;
pub use abbreviations::expand_query;
pub use similarity::{SequenceRatio, Similarity};

/// Words ignored when building a college's initials. City names are included
/// because "RV" means "R V College of Engineering, Bengaluru".
const INITIALS_STOP_WORDS: &[&str] = &[
    "of", "the", "and",
    "institute", "college", "university", "engineering",
    "bangalore", "bengaluru", "mysore", "mysuru", "mangalore", "mangaluru",
    "hubli", "dharwad", "belgaum", "belagavi", "tumkur", "tumakuru",
    "davangere", "shimoga", "shivamogga", "hassan", "mandya", "udupi",
    "manipal", "kalaburagi", "gulbarga", "bidar", "chikmagalur", "karwar",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialsRule {
    pub max_query_len: usize,
    pub floor: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchStrategy {
    /// Candidates must score strictly above this.
    pub min_score: f64,
    pub substring_base: f64,
    pub substring_weight: f64,
    pub initials: Option<InitialsRule>,
    pub word_overlap_weight: Option<f64>,
    pub expand_abbreviations: bool,
    pub auto_resolve_score: f64,
}

impl MatchStrategy {
    pub fn college_names(config: &MatchingConfig) -> Self {
        Self {
            min_score: config.name_min_score,
            substring_base: config.name_substring_base,
            substring_weight: config.name_substring_weight,
            initials: Some(InitialsRule {
                max_query_len: config.initials_max_query_len,
                floor: config.initials_floor,
            }),
            word_overlap_weight: None,
            expand_abbreviations: false,
            auto_resolve_score: config.auto_resolve_score,
        }
    }

    pub fn branch_names(config: &MatchingConfig) -> Self {
        Self {
            min_score: config.branch_min_score,
            substring_base: config.branch_substring_base,
            substring_weight: config.branch_substring_weight,
            initials: None,
            word_overlap_weight: Some(config.word_overlap_weight),
            expand_abbreviations: true,
            auto_resolve_score: config.auto_resolve_score,
        }
    }
}

/// Something a query can match: a key handed back to the caller and the
/// display text that is scored.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub key: &'a str,
    pub display: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "matches", rename_all = "snake_case")]
pub enum Resolution {
    /// Exactly one candidate is strong enough to use without asking.
    Unique(MatchResult),
    /// Several plausible candidates, best first.
    Ambiguous(Vec<MatchResult>),
    NoMatch,
}

pub struct FuzzyMatcher<S = SequenceRatio> {
    strategy: MatchStrategy,
    similarity: S,
}

impl FuzzyMatcher<SequenceRatio> {
    pub fn for_colleges(config: &MatchingConfig) -> Self {
        Self::new(MatchStrategy::college_names(config), SequenceRatio)
    }

    pub fn for_branches(config: &MatchingConfig) -> Self {
        Self::new(MatchStrategy::branch_names(config), SequenceRatio)
    }
}

impl<S> FuzzyMatcher<S>
where
    S: Similarity,
{
    pub fn new(strategy: MatchStrategy, similarity: S) -> Self {
        Self {
            strategy,
            similarity,
        }
    }

    pub fn strategy(&self) -> &MatchStrategy {
        &self.strategy
    }

    /// Score `query` against one candidate text. Both sides are lowercased
    /// and whitespace-normalised first.
    pub fn score(&self, query: &str, candidate: &str) -> f64 {
        let query = normalize(query);
        let candidate = normalize(candidate);
        if query.is_empty() || candidate.is_empty() {
            return 0.0;
        }

        let variants = if self.strategy.expand_abbreviations {
            expand_query(&query)
        } else {
            vec![query]
        };

        let score = variants
            .iter()
            .map(|variant| self.score_variant(variant, &candidate))
            .fold(0.0_f64, f64::max)
            .clamp(0.0, 1.0);

        debug_assert!((0.0..=1.0).contains(&score), "score {score} out of range [0.0, 1.0]");
        score
    }

    fn score_variant(&self, query: &str, candidate: &str) -> f64 {
        let mut best = self.similarity.similarity(query, candidate);

        if candidate.contains(query) {
            let ratio = query.chars().count() as f64 / candidate.chars().count() as f64;
            best = best.max(self.strategy.substring_base + ratio * self.strategy.substring_weight);
        }

        if let Some(rule) = self.strategy.initials {
            if query.chars().count() <= rule.max_query_len {
                let compact: String = query.chars().filter(|c| !c.is_whitespace()).collect();
                let initials = initials_of(candidate);
                if !compact.is_empty() && initials.starts_with(&compact) {
                    best = best.max(rule.floor);
                }
            }
        }

        if let Some(weight) = self.strategy.word_overlap_weight {
            best = best.max(word_overlap(query, candidate) * weight);
        }

        best
    }

    /// Candidates scoring above the strategy's threshold, best first. Equal
    /// scores keep the order in which candidates were supplied.
    pub fn match_candidates<'a, I>(&self, query: &str, candidates: I, limit: Limit) -> Vec<MatchResult>
    where
        I: IntoIterator<Item = Candidate<'a>>,
    {
        let mut matches = self.ranked(query, candidates);
        matches.truncate(limit.get());
        matches
    }

    /// Strong matches are counted over every candidate; `limit` only bounds
    /// the `Ambiguous` list.
    pub fn resolve<'a, I>(&self, query: &str, candidates: I, limit: Limit) -> Resolution
    where
        I: IntoIterator<Item = Candidate<'a>>,
    {
        let mut matches = self.ranked(query, candidates);
        let strong = matches
            .iter()
            .filter(|m| m.score >= self.strategy.auto_resolve_score)
            .count();

        match (matches.len(), strong) {
            (0, _) => Resolution::NoMatch,
            // sorted desc, so the lone strong match is first
            (_, 1) => Resolution::Unique(matches.swap_remove(0)),
            _ => {
                matches.truncate(limit.get());
                Resolution::Ambiguous(matches)
            }
        }
    }

    fn ranked<'a, I>(&self, query: &str, candidates: I) -> Vec<MatchResult>
    where
        I: IntoIterator<Item = Candidate<'a>>,
    {
        let mut matches: Vec<MatchResult> = candidates
            .into_iter()
            .filter_map(|candidate| {
                let score = self.score(query, candidate.display);
                (score > self.strategy.min_score).then(|| MatchResult {
                    candidate_key: candidate.key.to_string(),
                    display_name: candidate.display.to_string(),
                    score,
                })
            })
            .collect();

        // stable: ties stay in enumeration order
        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        matches
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// First letters of the significant words, e.g. `"r v college of engineering"`
/// gives `"rv"`.
fn initials_of(candidate: &str) -> String {
    candidate
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty() && !INITIALS_STOP_WORDS.contains(word))
        .filter_map(|word| word.chars().next())
        .collect()
}

fn word_overlap(query: &str, candidate: &str) -> f64 {
    let query_words: Vec<&str> = query.split_whitespace().collect();
    if query_words.is_empty() {
        return 0.0;
    }
    let candidate_words: HashSet<&str> = candidate.split_whitespace().collect();
    let shared = query_words
        .iter()
        .filter(|word| candidate_words.contains(*word))
        .count();
    shared as f64 / query_words.len() as f64
}
