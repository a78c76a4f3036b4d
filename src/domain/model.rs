use crate::utils::error::{OpportunityError, Result};
use chrono::{Days, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 搜尋 API 使用的日期格式 (MM/dd/yyyy)
pub const POSTED_DATE_FORMAT: &str = "%m/%d/%Y";

pub const DEFAULT_DAYS_BACK: u32 = 30;
pub const DEFAULT_LIMIT: u32 = 100;

/// One contract notice as returned by the search API.
///
/// The record is kept as an opaque JSON object so that saving it writes back
/// exactly what the API sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Opportunity {
    pub data: Map<String, Value>,
}

impl Opportunity {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// 欄位的字串形式；缺漏或 null 視為空字串
    pub fn field_text(&self, key: &str) -> String {
        match self.data.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

impl From<Map<String, Value>> for Opportunity {
    fn from(data: Map<String, Value>) -> Self {
        Self { data }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub keywords: Vec<String>,
    pub days_back: u32,
    pub limit: u32,
}

impl SearchQuery {
    pub fn new(keywords: Vec<String>) -> Self {
        Self {
            keywords,
            days_back: DEFAULT_DAYS_BACK,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_days_back(mut self, days_back: u32) -> Self {
        self.days_back = days_back;
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    pub fn keyword_query(&self) -> String {
        build_keyword_query(&self.keywords)
    }

    /// (postedFrom, postedTo) ending on `today`.
    ///
    /// Counts calendar days, so a DST change inside the window does not
    /// shift the start date.
    pub fn date_window(&self, today: NaiveDate) -> Result<(String, String)> {
        let from = today
            .checked_sub_days(Days::new(u64::from(self.days_back)))
            .ok_or_else(|| OpportunityError::InvalidConfigValueError {
                field: "days_back".to_string(),
                value: self.days_back.to_string(),
                reason: format!("Window start falls before {}", NaiveDate::MIN),
            })?;
        Ok((
            from.format(POSTED_DATE_FORMAT).to_string(),
            today.format(POSTED_DATE_FORMAT).to_string(),
        ))
    }

    pub fn posted_window(&self) -> Result<(String, String)> {
        self.date_window(Local::now().date_naive())
    }
}

/// `["a", "b"]` -> `"a" OR "b"`
pub fn build_keyword_query(keywords: &[String]) -> String {
    keywords
        .iter()
        .map(|k| format!("\"{}\"", k))
        .collect::<Vec<_>>()
        .join(" OR ")
}

/// 過濾前後的兩份結果，順序與 API 回傳一致
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilteredResults {
    pub all: Vec<Opportunity>,
    pub filtered: Vec<Opportunity>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedFiles {
    pub all_path: String,
    pub filtered_path: String,
}
