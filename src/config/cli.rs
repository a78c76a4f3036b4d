use crate::core::client::DEFAULT_BASE_URL;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "sam-opportunities")]
#[command(about = "Search SAM.gov contract opportunities and keep the ones matching all required keywords")]
pub struct CliConfig {
    /// SAM.gov API key
    #[arg(long, env = "SAM_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Keywords sent to the search API, OR-ed together
    #[arg(long, value_delimiter = ',', default_value = "software,development,cloud")]
    pub keywords: Vec<String>,

    /// Keywords that must all appear in a kept opportunity
    #[arg(long, value_delimiter = ',', default_value = "python,aws")]
    pub must_include: Vec<String>,

    #[arg(long, default_value = "30")]
    pub days_back: u32,

    #[arg(long, default_value = "100")]
    pub limit: u32,

    #[arg(long, default_value = ".")]
    pub output_path: String,

    /// Load search settings from a TOML file instead of the flags above
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// `--keywords ""` 之類的空項目不送出，空清單才是真正的「不限關鍵字」
    pub fn normalized(mut self) -> Self {
        self.keywords = non_empty(self.keywords);
        self.must_include = non_empty(self.must_include);
        self
    }
}

fn non_empty(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .filter(|value| !value.trim().is_empty())
        .collect()
}

impl ConfigProvider for CliConfig {
    fn api_endpoint(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn keywords(&self) -> &[String] {
        &self.keywords
    }

    fn must_include(&self) -> &[String] {
        &self.must_include
    }

    fn days_back(&self) -> u32 {
        self.days_back
    }

    fn limit(&self) -> u32 {
        self.limit
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        let api_key = validation::validate_required_field("api_key", &self.api_key)?;
        validation::validate_non_empty_string("api_key", api_key)?;
        validation::validate_url("base_url", &self.base_url)?;
        validation::validate_range("limit", self.limit, 1, super::MAX_LIMIT)?;
        validation::validate_range("days_back", self.days_back, 0, super::MAX_DAYS_BACK)?;
        validation::validate_path("output_path", &self.output_path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CliConfig::parse_from(["sam-opportunities", "--api-key", "k"]);

        assert_eq!(config.api_endpoint(), DEFAULT_BASE_URL);
        assert_eq!(config.keywords(), ["software", "development", "cloud"]);
        assert_eq!(config.must_include(), ["python", "aws"]);
        assert_eq!(config.days_back(), 30);
        assert_eq!(config.limit(), 100);
        assert_eq!(config.output_path(), ".");
        assert_eq!(config.all_prefix(), "all_opportunities");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_comma_separated_keywords() {
        let config = CliConfig::parse_from([
            "sam-opportunities",
            "--api-key",
            "k",
            "--keywords",
            "cyber,zero trust",
            "--must-include",
            "fedramp",
            "--limit",
            "5",
        ]);

        assert_eq!(config.keywords(), ["cyber", "zero trust"]);
        assert_eq!(config.must_include(), ["fedramp"]);
        assert_eq!(config.limit(), 5);
    }

    #[test]
    fn test_validation_failures() {
        let mut config = CliConfig::parse_from(["sam-opportunities", "--api-key", "k"]);

        config.limit = 0;
        assert!(config.validate().is_err());

        config.limit = 100;
        config.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.base_url = DEFAULT_BASE_URL.to_string();
        config.api_key = Some("   ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_days_back_out_of_range_is_rejected() {
        let config = CliConfig::parse_from([
            "sam-opportunities",
            "--api-key",
            "k",
            "--days-back",
            "4294967295",
        ]);
        assert!(matches!(
            config.validate(),
            Err(crate::utils::error::OpportunityError::InvalidConfigValueError { .. })
        ));

        let config =
            CliConfig::parse_from(["sam-opportunities", "--api-key", "k", "--days-back", "0"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_keyword_items_are_dropped() {
        let config = CliConfig::parse_from([
            "sam-opportunities",
            "--api-key",
            "k",
            "--keywords",
            "",
            "--must-include",
            "python,,aws",
        ])
        .normalized();

        assert!(config.keywords().is_empty());
        assert_eq!(
            crate::domain::model::build_keyword_query(config.keywords()),
            ""
        );
        assert_eq!(config.must_include(), ["python", "aws"]);
    }
}
