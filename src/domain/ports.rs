use crate::domain::model::{FilteredResults, Opportunity, SavedFiles};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn api_key(&self) -> &str;
    fn output_path(&self) -> &str;
    fn keywords(&self) -> &[String];
    fn must_include(&self) -> &[String];
    fn days_back(&self) -> u32;
    fn limit(&self) -> u32;

    fn all_prefix(&self) -> &str {
        "all_opportunities"
    }

    fn filtered_prefix(&self) -> &str {
        "filtered_opportunities"
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Opportunity>>;
    async fn transform(&self, data: Vec<Opportunity>) -> Result<FilteredResults>;
    async fn load(&self, results: &FilteredResults) -> Result<SavedFiles>;
}
