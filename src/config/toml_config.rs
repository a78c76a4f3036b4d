use crate::core::client::DEFAULT_BASE_URL;
use crate::core::ConfigProvider;
use crate::domain::model::{DEFAULT_DAYS_BACK, DEFAULT_LIMIT};
use crate::utils::error::{OpportunityError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub source: SourceConfig,
    pub search: SearchConfig,
    #[serde(default)]
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub keywords: Vec<String>,
    #[serde(default)]
    pub must_include: Vec<String>,
    #[serde(default = "default_days_back")]
    pub days_back: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_all_prefix")]
    pub all_prefix: String,
    #[serde(default = "default_filtered_prefix")]
    pub filtered_prefix: String,
}

fn default_endpoint() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_days_back() -> u32 {
    DEFAULT_DAYS_BACK
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

fn default_output_path() -> String {
    ".".to_string()
}

fn default_all_prefix() -> String {
    "all_opportunities".to_string()
}

fn default_filtered_prefix() -> String {
    "filtered_opportunities".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
        }
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            all_prefix: default_all_prefix(),
            filtered_prefix: default_filtered_prefix(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| OpportunityError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SAM_API_KEY})；未設定的變數原樣保留
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| OpportunityError::ConfigError {
            message: format!("Invalid placeholder pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 檔案未提供 api_key (或佔位符未被替換) 時，改用命令列/環境變數的值
    pub fn with_api_key_fallback(mut self, api_key: Option<String>) -> Self {
        let unresolved = match &self.source.api_key {
            None => true,
            Some(key) => key.contains("${"),
        };
        if unresolved {
            if let Some(key) = api_key {
                self.source.api_key = Some(key);
            }
        }
        self
    }
}

impl ConfigProvider for TomlConfig {
    fn api_endpoint(&self) -> &str {
        &self.source.endpoint
    }

    fn api_key(&self) -> &str {
        self.source.api_key.as_deref().unwrap_or_default()
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn keywords(&self) -> &[String] {
        &self.search.keywords
    }

    fn must_include(&self) -> &[String] {
        &self.search.must_include
    }

    fn days_back(&self) -> u32 {
        self.search.days_back
    }

    fn limit(&self) -> u32 {
        self.search.limit
    }

    fn all_prefix(&self) -> &str {
        &self.load.all_prefix
    }

    fn filtered_prefix(&self) -> &str {
        &self.load.filtered_prefix
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        let api_key = validation::validate_required_field("source.api_key", &self.source.api_key)?;
        if api_key.contains("${") {
            return Err(OpportunityError::MissingConfigError {
                field: format!("source.api_key ({})", api_key),
            });
        }
        validation::validate_non_empty_string("source.api_key", api_key)?;
        validation::validate_url("source.endpoint", &self.source.endpoint)?;
        validation::validate_range("search.limit", self.search.limit, 1, super::MAX_LIMIT)?;
        validation::validate_range(
            "search.days_back",
            self.search.days_back,
            0,
            super::MAX_DAYS_BACK,
        )?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_filename_prefix("load.all_prefix", &self.load.all_prefix)?;
        validation::validate_filename_prefix("load.filtered_prefix", &self.load.filtered_prefix)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[source]
endpoint = "https://api.example.com/search"
api_key = "abc"

[search]
keywords = ["software", "cloud"]
must_include = ["python"]
days_back = 14
limit = 50

[load]
output_path = "./reports"
all_prefix = "raw"
filtered_prefix = "matched"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.api_endpoint(), "https://api.example.com/search");
        assert_eq!(config.api_key(), "abc");
        assert_eq!(config.keywords(), ["software", "cloud"]);
        assert_eq!(config.must_include(), ["python"]);
        assert_eq!(config.days_back(), 14);
        assert_eq!(config.limit(), 50);
        assert_eq!(config.output_path(), "./reports");
        assert_eq!(config.all_prefix(), "raw");
        assert_eq!(config.filtered_prefix(), "matched");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("[search]\nkeywords = [\"cloud\"]\n").unwrap();

        assert_eq!(config.api_endpoint(), DEFAULT_BASE_URL);
        assert!(config.must_include().is_empty());
        assert_eq!(config.days_back(), 30);
        assert_eq!(config.limit(), 100);
        assert_eq!(config.all_prefix(), "all_opportunities");
        assert_eq!(config.filtered_prefix(), "filtered_opportunities");

        // api_key 缺漏
        assert!(matches!(
            config.validate(),
            Err(OpportunityError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SAM_OPPORTUNITIES_TEST_KEY", "from-env");

        let toml_content = r#"
[source]
api_key = "${SAM_OPPORTUNITIES_TEST_KEY}"

[search]
keywords = []
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.api_key(), "from-env");

        std::env::remove_var("SAM_OPPORTUNITIES_TEST_KEY");
    }

    #[test]
    fn test_unresolved_placeholder_falls_back() {
        let toml_content = r#"
[source]
api_key = "${SAM_OPPORTUNITIES_UNSET_VARIABLE}"

[search]
keywords = ["cloud"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let config = config.with_api_key_fallback(Some("cli-key".to_string()));
        assert_eq!(config.api_key(), "cli-key");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_explicit_key_wins_over_fallback() {
        let config = TomlConfig::from_toml_str(
            "[source]\napi_key = \"file-key\"\n[search]\nkeywords = []\n",
        )
        .unwrap()
        .with_api_key_fallback(Some("cli-key".to_string()));

        assert_eq!(config.api_key(), "file-key");
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[source]
endpoint = "invalid-url"
api_key = "abc"

[search]
keywords = ["cloud"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let too_far_back = TomlConfig::from_toml_str(
            "[source]\napi_key = \"abc\"\n[search]\nkeywords = []\ndays_back = 4294967295\n",
        )
        .unwrap();
        assert!(too_far_back.validate().is_err());

        let bad_prefix = TomlConfig::from_toml_str(
            "[source]\napi_key = \"abc\"\n[search]\nkeywords = []\n[load]\nall_prefix = \"a/b\"\n",
        )
        .unwrap();
        assert!(bad_prefix.validate().is_err());
    }

    #[test]
    fn test_invalid_toml() {
        let err = TomlConfig::from_toml_str("[search\nkeywords = 1").unwrap_err();
        assert!(matches!(err, OpportunityError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[source]
api_key = "abc"

[search]
keywords = ["software"]
must_include = ["python", "aws"]
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.must_include(), ["python", "aws"]);
    }
}
