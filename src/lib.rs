pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::LocalStorage;
pub use crate::core::{
    client::{OpportunitySearchClient, SearchOutcome},
    engine::{RunReport, SearchEngine},
    filter::filter_opportunities,
    pipeline::OpportunityPipeline,
    report::{print_summary, save_opportunities},
};
pub use domain::model::{Opportunity, SearchQuery};
pub use utils::error::{OpportunityError, Result};
