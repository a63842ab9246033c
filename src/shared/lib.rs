// Declare modules at the root level
pub mod catalog;
pub mod domain;
pub mod error;
pub mod normalize;
pub mod poll;
pub mod recommend;
pub mod store;
pub mod time;

// Test utilities module (available in test and integration test builds)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export at root for convenience
pub use catalog::catalog;
pub use domain::{Difficulty, PlantProfile, Range, SoilReading};
pub use error::{error_codes, ErrorResponse};
pub use normalize::{normalize, reject_wrong_types, IngestPayload, NormalizationReport};
pub use poll::{PollConfig, PollError, Poller};
pub use recommend::{match_score, recommend, MATCH_THRESHOLD};
pub use store::LatestReadingSlot;
pub use time::{Clock, FixedClock, SystemClock};
