use crate::domain::model::Opportunity;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use chrono::{DateTime, Local};
use std::fmt::Write;

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// 摘要中顯示的欄位與標籤
const SUMMARY_FIELDS: [(&str, &str); 4] = [
    ("Title", "title"),
    ("Notice ID", "noticeId"),
    ("Posted Date", "postedDate"),
    ("Response Due Date", "responseDueDate"),
];

const MISSING_PLACEHOLDER: &str = "N/A";

pub fn timestamped_filename(prefix: &str, now: DateTime<Local>) -> String {
    format!("{}_{}.json", prefix, now.format(TIMESTAMP_FORMAT))
}

/// Pretty JSON with 2-space indentation; non-ASCII text is written as-is.
pub fn to_pretty_json(opportunities: &[Opportunity]) -> Result<String> {
    Ok(serde_json::to_string_pretty(opportunities)?)
}

/// Writes `{prefix}_{YYYYMMDD_HHMMSS}.json` and returns the file name.
///
/// Storage errors are returned to the caller untouched.
pub async fn save_opportunities<S: Storage>(
    storage: &S,
    opportunities: &[Opportunity],
    prefix: &str,
) -> Result<String> {
    let filename = timestamped_filename(prefix, Local::now());
    let json = to_pretty_json(opportunities)?;

    storage.write_file(&filename, json.as_bytes()).await?;

    tracing::info!(
        "💾 Saved {} opportunities to {}",
        opportunities.len(),
        filename
    );
    Ok(filename)
}

pub fn format_summary(opportunities: &[Opportunity], title: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "\n{} Summary:", title);
    let _ = writeln!(out, "Total count: {}", opportunities.len());

    for opportunity in opportunities {
        let _ = writeln!(out, "\n{}", "-".repeat(80));
        for (label, key) in SUMMARY_FIELDS {
            let value = opportunity.field_text(key);
            let shown = if value.is_empty() {
                MISSING_PLACEHOLDER
            } else {
                value.as_str()
            };
            let _ = writeln!(out, "{}: {}", label, shown);
        }
    }

    out
}

pub fn print_summary(opportunities: &[Opportunity], title: &str) {
    print!("{}", format_summary(opportunities, title));
}
