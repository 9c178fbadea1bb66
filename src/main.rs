use chrono::Utc;
use flyer_deals::analyzer::{Analyzer, AnalyzerImpl};
use flyer_deals::config::{load_config, AppConfig};
use flyer_deals::model::ShoppingMatch;
use flyer_deals::pipeline::NormalizationPipeline;
use flyer_deals::report::{build_report, write_report};
use flyer_deals::source::{JsonFileSource, MatchSource, OfferSource};
use std::process::ExitCode;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so a report on stdout stays valid JSON
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.json".to_string());
    let config: AppConfig = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Loading offers from {}...", config.offers_path);
    let records = match JsonFileSource::new(&config.offers_path).load_offers().await {
        Ok(records) => records,
        Err(e) => {
            error!("Offer source error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let matches: Vec<ShoppingMatch> = match &config.matches_path {
        Some(path) => match JsonFileSource::new(path).load_matches().await {
            Ok(matches) => matches,
            Err(e) => {
                error!("Match source error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => Vec::new(),
    };

    let pipeline = NormalizationPipeline::from_config(&config);
    let offers = pipeline.run(records).await;

    let degraded = offers.iter().filter(|o| !o.comparable_unit.is_known()).count();
    if degraded > 0 {
        warn!("{} of {} offers have no comparable unit", degraded, offers.len());
    }

    let analyzer = AnalyzerImpl::new(&config.currency);
    for (unit, offer) in analyzer.cheapest(&offers) {
        if let Some(price) = offer.standardized_unit_price {
            info!("Cheapest per {}: {}: {} {}", unit, offer.raw.product_name, price, config.currency);
        }
    }

    let report = build_report(offers, &matches, &analyzer, Utc::now());
    if let Some(summary) = &report.shopping_summary {
        info!(
            "🛒 {} matched, {} unmatched, total {} {}",
            summary.number_of_matched_items,
            summary.number_of_unmatched_items,
            summary.total_cost_of_matched_items,
            summary.currency
        );
    }

    if let Err(e) = write_report(&report, config.output_path.as_deref()).await {
        error!("Report write error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
