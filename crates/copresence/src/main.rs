mod bootstrap;
mod enrich;
mod report;

use anyhow::Result;
use clap::Parser;
use copresence_core::settings::Settings;
use copresence_data::loader;
use copresence_engine::orchestrator;

#[tokio::main]
async fn main() -> Result<()> {
    let started = std::time::Instant::now();

    let settings = Settings::parse();
    bootstrap::setup_logging(&settings.log_level)?;

    // Invalid thresholds or year bounds are fatal before any file is touched.
    let config = settings.validate()?;

    tracing::info!("copresence v{} starting", env!("CARGO_PKG_VERSION"));

    let (timelines, failures) = loader::load_all(&settings.files, &config.year_filter);
    for err in &failures {
        report::file_failed(err);
    }
    for timeline in &timelines {
        report::file_loaded(timeline);
    }

    if timelines.len() < 2 {
        report::not_enough_timelines();
        return Ok(());
    }

    let result = orchestrator::compare_all(&timelines, &config.thresholds);
    report::pair_results(&result);
    report::summary(&result);

    if let Some(closest) = result.closest.as_ref() {
        let pair = &result.pairs[closest.pair_index];
        let enrichment = enrich::enrich(&closest.matched, &config).await;
        report::closest_match(pair, &closest.matched, &enrichment);
    }

    report::elapsed(started.elapsed());
    Ok(())
}
