use deal_scout::{
    config::Config,
    expander::QueryExpander,
    notifier::DiscordNotifier,
    scanner::{DealScanner, ScanOptions},
    scheduler::{self, IntervalTicker},
    source::build_sources,
    status,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("deal_scout=info")))
        .init();

    info!("==================================================");
    info!("  DEAL SCOUT");
    info!("==================================================");

    let config = Config::from_env()?;
    info!(
        "Watchlist: {} keyword(s), every {} min, {} mode, verbose={}, ebay={}",
        config.watchlist.len(),
        config.interval.as_secs() / 60,
        config.report_mode,
        config.verbose,
        config.active_ebay().is_some()
    );
    if config.marketplace_ignored() {
        warn!("eBay credentials are set but listing mode only queries SerpApi; set REPORT_MODE=price-level to use them");
    }

    let client = reqwest::Client::builder()
        .user_agent(concat!("deal-scout/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(30))
        .build()?;

    let discord = DiscordNotifier::new(client.clone(), &config.discord_token);
    if let Err(e) = discord.authenticate().await {
        error!("Discord login failed: {}", e);
        return Err(e.into());
    }

    let sources = build_sources(&config, &client)?;
    let scanner = Arc::new(DealScanner::new(
        ScanOptions {
            channel_id: config.channel_id.clone(),
            watchlist: config.watchlist.clone(),
            max_keywords_per_tick: config.max_keywords_per_tick,
            report_mode: config.report_mode,
            verbose: config.verbose,
            heartbeat: config.heartbeat,
        },
        QueryExpander::default(),
        sources,
        Arc::new(discord),
    ));
    info!("Scanner ready with {} source(s)", scanner.source_count());

    let scan_loop = tokio::spawn(scheduler::run(Arc::clone(&scanner), IntervalTicker::new(config.interval)));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    info!("Status server running on port {}", config.port);
    axum::serve(listener, status::router(scanner)).await?;

    scan_loop.abort();
    Ok(())
}
