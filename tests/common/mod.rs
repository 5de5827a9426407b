#![allow(dead_code)]

use async_trait::async_trait;
use deal_scout::error::{NotifyError, SourceError};
use deal_scout::expander::QueryExpander;
use deal_scout::message::{MessageKind, NotificationMessage};
use deal_scout::notifier::{Destination, Notifier};
use deal_scout::source::PriceSource;
use deal_scout::types::{PriceCandidate, ReportMode, SourceKind};
use deal_scout::{DealScanner, ScanOptions};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Serves canned results per term; terms listed in `failing` return an upstream error.
pub struct FakeSource {
    kind: SourceKind,
    results: HashMap<String, Vec<PriceCandidate>>,
    failing: Vec<String>,
    fail_all: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new(kind: SourceKind) -> Self {
        Self { kind, results: HashMap::new(), failing: vec![], fail_all: false, calls: Mutex::new(vec![]) }
    }

    pub fn with(mut self, term: &str, candidates: Vec<PriceCandidate>) -> Self {
        self.results.insert(term.to_string(), candidates);
        self
    }

    pub fn failing_on(mut self, term: &str) -> Self {
        self.failing.push(term.to_string());
        self
    }

    pub fn always_failing(mut self) -> Self {
        self.fail_all = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PriceSource for FakeSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    async fn search(&self, term: &str) -> Result<Vec<PriceCandidate>, SourceError> {
        self.calls.lock().unwrap().push(term.to_string());
        if self.fail_all || self.failing.iter().any(|t| t == term) {
            return Err(SourceError::Status { status: 503, body: "unavailable".into() });
        }
        Ok(self.results.get(term).cloned().unwrap_or_default())
    }
}

/// Records every message; can be told to reject sends or to fail channel lookup.
#[derive(Default)]
pub struct RecordingNotifier {
    pub sent: Mutex<Vec<NotificationMessage>>,
    pub reject_sends: bool,
    pub unresolvable: bool,
}

impl RecordingNotifier {
    pub fn rejecting() -> Self {
        Self { reject_sends: true, ..Default::default() }
    }

    pub fn unresolvable() -> Self {
        Self { unresolvable: true, ..Default::default() }
    }

    pub fn messages(&self) -> Vec<NotificationMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn of_kind(&self, kind: MessageKind) -> Vec<NotificationMessage> {
        self.messages().into_iter().filter(|m| m.kind == kind).collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn resolve(&self, destination: &str) -> Result<Destination, NotifyError> {
        if self.unresolvable {
            return Err(NotifyError::DestinationUnavailable { id: destination.to_string(), reason: "404 Not Found".into() });
        }
        Ok(Destination { id: destination.to_string() })
    }

    async fn send(&self, _destination: &Destination, message: &NotificationMessage) -> Result<(), NotifyError> {
        if self.reject_sends {
            return Err(NotifyError::Rejected { status: 403, body: "Missing Access".into() });
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

pub fn listing(title: &str, price: Option<f64>, link: Option<&str>) -> PriceCandidate {
    PriceCandidate {
        title: title.to_string(),
        price,
        link: link.map(String::from),
        source: SourceKind::GeneralMerchandise,
    }
}

pub fn options(watchlist: &[&str], mode: ReportMode) -> ScanOptions {
    ScanOptions {
        channel_id: "1234567890".into(),
        watchlist: watchlist.iter().map(|s| s.to_string()).collect(),
        max_keywords_per_tick: 25,
        report_mode: mode,
        verbose: false,
        heartbeat: false,
    }
}

pub fn scanner(options: ScanOptions, source: Arc<dyn PriceSource>, notifier: Arc<RecordingNotifier>) -> DealScanner {
    scanner_with(options, vec![source], notifier)
}

pub fn scanner_with(options: ScanOptions, sources: Vec<Arc<dyn PriceSource>>, notifier: Arc<RecordingNotifier>) -> DealScanner {
    DealScanner::new(options, QueryExpander::default(), sources, notifier)
}
