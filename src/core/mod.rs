pub mod client;
pub mod engine;
pub mod filter;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{FilteredResults, Opportunity, SavedFiles};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
