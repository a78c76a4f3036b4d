use crate::domain::model::Opportunity;

/// 參與關鍵字比對的欄位
pub const SEARCHABLE_FIELDS: [&str; 4] = ["title", "description", "type", "classificationCode"];

/// Lowercased, space-joined text of the searchable fields.
pub fn searchable_text(opportunity: &Opportunity) -> String {
    SEARCHABLE_FIELDS
        .iter()
        .map(|field| opportunity.field_text(field))
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Keeps the opportunities whose searchable text contains every keyword,
/// ignoring case. An empty keyword list keeps everything.
pub fn filter_opportunities(
    opportunities: &[Opportunity],
    must_include_keywords: &[String],
) -> Vec<Opportunity> {
    let needles: Vec<String> = must_include_keywords
        .iter()
        .map(|k| k.to_lowercase())
        .collect();

    opportunities
        .iter()
        .filter(|opportunity| {
            let text = searchable_text(opportunity);
            needles.iter().all(|needle| text.contains(needle.as_str()))
        })
        .cloned()
        .collect()
}
