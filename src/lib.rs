pub mod compare;
pub mod config;
pub mod feed;
pub mod fetch;
pub mod geohash;
pub mod layout;
pub mod logging;
pub mod report;
pub mod retailers;
pub mod utils;
pub mod validate;

pub use compare::{compare, Comparison, DuplicateTally, Mismatch};
pub use config::{FetchSettings, ValidateSettings};
pub use feed::{Feed, FeedError, Station};
pub use layout::RunDate;
