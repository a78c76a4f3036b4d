#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

/// 搜尋 API 單次請求的筆數上限
pub const MAX_LIMIT: u32 = 1000;

/// 日期窗口最多往回一百年
pub const MAX_DAYS_BACK: u32 = 36_500;
