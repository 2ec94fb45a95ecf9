//! Deterministic cutoff-rank matching and analytics for engineering admissions.
//!
//! `cutoff-core` answers eligibility questions against an immutable snapshot of
//! college/branch cutoff ranks across three counselling rounds: rank and branch
//! filtering, fuzzy college and branch name resolution, rank-prospect
//! categorisation, multi-college comparison and branch popularity. Every query
//! is a pure read; identical inputs always produce identical outputs.

pub mod analytics;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod filter;
pub mod matching;
pub mod types;

pub use config::EngineConfig;
pub use dataset::{AdmissionRecord, RoundCutoffs, Snapshot, SnapshotLoader};
pub use engine::{AdmissionEngine, SearchParams};
pub use types::{QueryError, Round, SortOrder};
