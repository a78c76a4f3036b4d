use crate::core::client::OpportunitySearchClient;
use crate::core::filter::filter_opportunities;
use crate::core::report::save_opportunities;
use crate::core::{ConfigProvider, FilteredResults, Opportunity, Pipeline, SavedFiles, Storage};
use crate::domain::model::SearchQuery;
use crate::utils::error::Result;

/// search -> filter -> save，一次執行寫出兩個 JSON 檔
pub struct OpportunityPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: OpportunitySearchClient,
}

impl<S: Storage, C: ConfigProvider> OpportunityPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let client =
            OpportunitySearchClient::with_base_url(config.api_key(), config.api_endpoint());
        Self {
            storage,
            config,
            client,
        }
    }

    pub fn search_query(&self) -> SearchQuery {
        SearchQuery::new(self.config.keywords().to_vec())
            .with_days_back(self.config.days_back())
            .with_limit(self.config.limit())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for OpportunityPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Opportunity>> {
        let query = self.search_query();
        Ok(self.client.search_opportunities(&query).await)
    }

    async fn transform(&self, data: Vec<Opportunity>) -> Result<FilteredResults> {
        let filtered = filter_opportunities(&data, self.config.must_include());
        tracing::debug!(
            "Kept {} of {} opportunities matching {:?}",
            filtered.len(),
            data.len(),
            self.config.must_include()
        );
        Ok(FilteredResults {
            all: data,
            filtered,
        })
    }

    async fn load(&self, results: &FilteredResults) -> Result<SavedFiles> {
        let all_name =
            save_opportunities(&self.storage, &results.all, self.config.all_prefix()).await?;
        let filtered_name = save_opportunities(
            &self.storage,
            &results.filtered,
            self.config.filtered_prefix(),
        )
        .await?;

        Ok(SavedFiles {
            all_path: format!("{}/{}", self.config.output_path(), all_name),
            filtered_path: format!("{}/{}", self.config.output_path(), filtered_name),
        })
    }
}
