pub mod loader;
pub mod record;
pub mod snapshot;

pub use loader::{DatasetLoadError, SnapshotLoader};
pub use record::{AdmissionRecord, RoundCutoffs};
pub use snapshot::{CollegeEntry, RoundView, Snapshot, SnapshotInfo};
