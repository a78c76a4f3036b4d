use crate::core::{FilteredResults, Pipeline, SavedFiles};
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct RunReport {
    pub results: FilteredResults,
    pub files: SavedFiles,
}

pub struct SearchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> SearchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("🔍 Searching for opportunities...");
        let raw = self.pipeline.extract().await?;
        tracing::info!("Retrieved {} opportunities", raw.len());

        let results = self.pipeline.transform(raw).await?;
        tracing::info!(
            "Filtered down to {} opportunities",
            results.filtered.len()
        );

        let files = self.pipeline.load(&results).await?;

        Ok(RunReport { results, files })
    }
}
