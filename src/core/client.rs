use crate::domain::model::{Opportunity, SearchQuery};
use crate::utils::error::{OpportunityError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::Value;

pub const DEFAULT_BASE_URL: &str = "https://api.sam.gov/opportunities/v2/search";

/// 成功回應中存放機會清單的欄位
const OPPORTUNITIES_KEY: &str = "opportunitiesData";

/// Result of a search that reached the API and got a 2xx answer.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(Vec<Opportunity>),
    /// The body parsed as JSON but had no usable `opportunitiesData` array.
    UnexpectedPayload(Value),
}

impl SearchOutcome {
    pub fn into_opportunities(self) -> Vec<Opportunity> {
        match self {
            SearchOutcome::Found(opportunities) => opportunities,
            SearchOutcome::UnexpectedPayload(_) => Vec::new(),
        }
    }
}

/// Client for the contract opportunity search endpoint.
///
/// Holds only immutable configuration, so one instance can serve any number
/// of sequential searches.
#[derive(Debug, Clone)]
pub struct OpportunitySearchClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl OpportunitySearchClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query parameters in the order the API documents them.
    pub fn query_params(&self, query: &SearchQuery) -> Result<Vec<(&'static str, String)>> {
        let (posted_from, posted_to) = query.posted_window()?;
        Ok(vec![
            ("api_key", self.api_key.clone()),
            ("limit", query.limit.to_string()),
            ("postedFrom", posted_from),
            ("postedTo", posted_to),
            ("keywords", query.keyword_query()),
        ])
    }

    /// Searches and never fails: transport errors, error statuses and
    /// unexpected payloads are logged and come back as an empty list.
    pub async fn search_opportunities(&self, query: &SearchQuery) -> Vec<Opportunity> {
        match self.fetch_opportunities(query).await {
            Ok(outcome) => outcome.into_opportunities(),
            Err(e) => {
                tracing::error!("❌ Error fetching opportunities: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn fetch_opportunities(&self, query: &SearchQuery) -> Result<SearchOutcome> {
        let params = self.query_params(query)?;

        tracing::info!("📡 Making request to {}", self.base_url);
        tracing::info!("🔧 Parameters: {}", redacted(&params));

        let response = self
            .client
            .get(&self.base_url)
            .header(CONTENT_TYPE, "application/json")
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Error response: {}", body);
            return Err(OpportunityError::HttpStatusError {
                status: status.as_u16(),
                body,
            });
        }

        let mut data: Value = response.json().await?;

        match data.get_mut(OPPORTUNITIES_KEY).map(Value::take) {
            Some(items @ Value::Array(_)) => {
                let opportunities: Vec<Opportunity> = serde_json::from_value(items)?;
                tracing::debug!("Received {} opportunities", opportunities.len());
                Ok(SearchOutcome::Found(opportunities))
            }
            Some(other) => {
                // 欄位存在但不是陣列，放回去讓日誌顯示原始內容
                if let Some(obj) = data.as_object_mut() {
                    obj.insert(OPPORTUNITIES_KEY.to_string(), other);
                }
                tracing::warn!("⚠️ Unexpected response format: {}", data);
                Ok(SearchOutcome::UnexpectedPayload(data))
            }
            None => {
                tracing::warn!("⚠️ Unexpected response format: {}", data);
                Ok(SearchOutcome::UnexpectedPayload(data))
            }
        }
    }
}

fn redacted(params: &[(&'static str, String)]) -> String {
    params
        .iter()
        .map(|(key, value)| {
            if *key == "api_key" {
                format!("{}=***", key)
            } else {
                format!("{}={}", key, value)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
