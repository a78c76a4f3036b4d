use clap::Parser;
use sam_opportunities::core::ConfigProvider;
use sam_opportunities::utils::{logger, validation::Validate};
use sam_opportunities::{
    print_summary, CliConfig, LocalStorage, OpportunityError, OpportunityPipeline, RunReport,
    SearchEngine, TomlConfig,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse().normalized();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting sam-opportunities");

    let outcome = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => run(config.with_api_key_fallback(cli.api_key.clone())).await,
                Err(e) => Err(e),
            }
        }
        None => run(cli.clone()).await,
    };

    match outcome {
        Ok(report) => {
            print_summary(&report.results.all, "All Opportunities");
            print_summary(&report.results.filtered, "Filtered Opportunities");

            tracing::info!("✅ Search completed");
            tracing::info!("📁 All results: {}", report.files.all_path);
            tracing::info!("📁 Filtered results: {}", report.files.filtered_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

async fn run<C: ConfigProvider + Validate>(config: C) -> Result<RunReport, OpportunityError> {
    config.validate()?;

    tracing::debug!(
        "Search settings: endpoint={}, keywords={:?}, must_include={:?}, days_back={}, limit={}, output={}",
        config.api_endpoint(),
        config.keywords(),
        config.must_include(),
        config.days_back(),
        config.limit(),
        config.output_path()
    );

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = OpportunityPipeline::new(storage, config);

    SearchEngine::new(pipeline).run().await
}
