pub mod error;
pub mod identifiers;
pub mod reports;

pub use error::QueryError;
pub use identifiers::{CollegeCode, DatasetVersion, Limit, Rank, Round, SortOrder, MAX_LIMIT};
pub use reports::*;
