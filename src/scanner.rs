use crate::deduplication::{item_key, keyword_key, Deduplicator};
use crate::expander::QueryExpander;
use crate::message::NotificationMessage;
use crate::notifier::{Destination, Notifier};
use crate::source::{median_ask, PriceSource};
use crate::types::{PriceCandidate, ReportMode, ScanState, ScanStats, TickOutcome, TickReport};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub channel_id: String,
    pub watchlist: Vec<String>,
    pub max_keywords_per_tick: usize,
    pub report_mode: ReportMode,
    pub verbose: bool,
    pub heartbeat: bool,
}

/// Results gathered for one keyword across all of its expanded terms.
struct KeywordResults {
    candidates: Vec<PriceCandidate>,
    calls_ok: usize,
    errors: usize,
}

/// Walks the watchlist once per tick and reports what has not been seen before.
pub struct DealScanner {
    options: ScanOptions,
    expander: QueryExpander,
    sources: Vec<Arc<dyn PriceSource>>,
    notifier: Arc<dyn Notifier>,
    deduplicator: Deduplicator,
    state: RwLock<ScanState>,
    stats: RwLock<ScanStats>,
}

impl DealScanner {
    pub fn new(
        options: ScanOptions,
        expander: QueryExpander,
        sources: Vec<Arc<dyn PriceSource>>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            options,
            expander,
            sources,
            notifier,
            deduplicator: Deduplicator::new(),
            state: RwLock::new(ScanState::Idle),
            stats: RwLock::new(ScanStats::default()),
        }
    }

    pub fn report_mode(&self) -> ReportMode {
        self.options.report_mode
    }

    pub fn watchlist(&self) -> &[String] {
        &self.options.watchlist
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn deduplicator(&self) -> &Deduplicator {
        &self.deduplicator
    }

    pub async fn state(&self) -> ScanState {
        *self.state.read().await
    }

    pub async fn stats(&self) -> ScanStats {
        self.stats.read().await.clone()
    }

    /// One full pass over the watchlist. Always runs to completion unless the destination
    /// cannot be resolved, in which case nothing is scanned.
    pub async fn run_tick(&self) -> TickOutcome {
        *self.state.write().await = ScanState::Scanning;
        let outcome = self.scan().await;
        *self.state.write().await = ScanState::Idle;

        let mut stats = self.stats.write().await;
        match &outcome {
            TickOutcome::Completed(report) => {
                stats.ticks_completed += 1;
                stats.notifications_sent += report.notifications_sent as u64;
                stats.delivery_failures += report.delivery_failures as u64;
                stats.source_errors += report.source_errors as u64;
            }
            TickOutcome::Aborted(_) => stats.ticks_aborted += 1,
        }
        outcome
    }

    async fn scan(&self) -> TickOutcome {
        let destination = match self.notifier.resolve(&self.options.channel_id).await {
            Ok(d) => d,
            Err(e) => {
                error!("Cannot resolve channel {}: {} - skipping this tick", self.options.channel_id, e);
                return TickOutcome::Aborted(e.to_string());
            }
        };

        let mut report = TickReport::default();

        if self.options.heartbeat {
            let msg = NotificationMessage::heartbeat(self.keywords().len(), self.options.report_mode, Utc::now());
            self.deliver(&destination, &msg, &mut report).await;
        }

        for keyword in self.keywords() {
            report.keywords_scanned += 1;
            let results = self.collect(keyword, &destination, &mut report).await;

            if results.candidates.is_empty() {
                debug!("{}: no results ({} call(s) ok, {} failed)", keyword, results.calls_ok, results.errors);
                if self.options.verbose && results.calls_ok > 0 {
                    self.deliver(&destination, &NotificationMessage::no_results(keyword), &mut report).await;
                }
                continue;
            }

            match self.options.report_mode {
                ReportMode::Listing => self.report_listings(&results.candidates, &destination, &mut report).await,
                ReportMode::PriceLevel => self.report_price_level(keyword, &results.candidates, &destination, &mut report).await,
            }
        }

        info!(
            "Scan complete: {} keyword(s), {} sent, {} already seen, {} source error(s), {} delivery failure(s)",
            report.keywords_scanned, report.notifications_sent, report.skipped_seen, report.source_errors, report.delivery_failures
        );
        TickOutcome::Completed(report)
    }

    fn keywords(&self) -> &[String] {
        let n = self.options.watchlist.len().min(self.options.max_keywords_per_tick);
        &self.options.watchlist[..n]
    }

    async fn collect(&self, keyword: &str, destination: &Destination, report: &mut TickReport) -> KeywordResults {
        let mut results = KeywordResults { candidates: Vec::new(), calls_ok: 0, errors: 0 };

        for term in self.expander.expand(keyword) {
            for source in &self.sources {
                match source.search(&term).await {
                    Ok(found) => {
                        debug!("{} / '{}' via {}: {} candidate(s)", keyword, term, source.kind(), found.len());
                        results.calls_ok += 1;
                        results.candidates.extend(found);
                    }
                    Err(e) => {
                        warn!("{} / '{}' via {} failed: {}", keyword, term, source.kind(), e);
                        results.errors += 1;
                        report.source_errors += 1;
                        if self.options.verbose {
                            let msg = NotificationMessage::diagnostic(keyword, &term, &e.to_string());
                            self.deliver(destination, &msg, report).await;
                        }
                    }
                }
            }
        }
        results
    }

    async fn report_listings(&self, candidates: &[PriceCandidate], destination: &Destination, report: &mut TickReport) {
        for candidate in candidates {
            if !self.deduplicator.check_and_record(&item_key(&candidate.title)).await {
                report.skipped_seen += 1;
                continue;
            }
            info!("NEW: {} {:?} via {}", candidate.title, candidate.price, candidate.source);
            self.deliver(destination, &NotificationMessage::listing(candidate), report).await;
        }
    }

    async fn report_price_level(&self, keyword: &str, candidates: &[PriceCandidate], destination: &Destination, report: &mut TickReport) {
        let prices: Vec<f64> = candidates.iter().filter_map(|c| c.price).collect();
        let Some(median) = median_ask(&prices) else {
            debug!("{}: no usable prices for a summary", keyword);
            return;
        };

        if !self.deduplicator.check_and_record(&keyword_key(keyword)).await {
            report.skipped_seen += 1;
            return;
        }
        info!("PRICE: {} median ask ${:.2} over {} value(s)", keyword, median, prices.len());
        let msg = NotificationMessage::summary(keyword, median, prices.len(), Utc::now());
        self.deliver(destination, &msg, report).await;
    }

    async fn deliver(&self, destination: &Destination, message: &NotificationMessage, report: &mut TickReport) {
        match self.notifier.send(destination, message).await {
            Ok(()) => report.notifications_sent += 1,
            Err(e) => {
                warn!("Failed to deliver {:?} message to {}: {}", message.kind, destination.id, e);
                report.delivery_failures += 1;
            }
        }
    }
}
