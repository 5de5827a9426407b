use crate::config::Config;
use crate::ebay::EbayClient;
use crate::error::{ConfigError, SourceError};
use crate::serpapi::SerpApiClient;
use crate::types::{PriceCandidate, ReportMode, SourceKind};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value as JsonValue;
use std::sync::Arc;

/// An external price API turned into normalized candidates.
#[async_trait]
pub trait PriceSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    /// May return an empty list. Errors are scoped to this one term.
    async fn search(&self, term: &str) -> Result<Vec<PriceCandidate>, SourceError>;
}

/// Keeps only finite, strictly positive prices.
pub fn valid_price(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Reads a price from a JSON number or a display string such as `"$1,299.99"`.
pub fn price_from_json(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64().and_then(valid_price),
        JsonValue::String(s) => first_number(s).and_then(valid_price),
        _ => None,
    }
}

/// First numeric token of a display string, ignoring thousands separators. `"2 for $5"` is `2`.
fn first_number(raw: &str) -> Option<f64> {
    let cleaned = raw.replace(',', "");
    let start = cleaned.find(|c: char| c.is_ascii_digit())?;
    let token: String = cleaned[start..].chars().take_while(|c| c.is_ascii_digit() || *c == '.').collect();
    let value = token.parse::<f64>().ok()?;
    Some(if cleaned[..start].ends_with('-') { -value } else { value })
}

/// Element at index `n / 2` of the sorted valid prices. For even counts that is the upper of
/// the two middle values: `[5, 10]` gives `10`.
pub fn median_ask(prices: &[f64]) -> Option<f64> {
    let mut sorted: Vec<f64> = prices.iter().copied().filter_map(valid_price).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(sorted[sorted.len() / 2])
}

/// Sources queried in the configured mode, in query order.
///
/// Listing mode uses the general merchandise search. Price-level mode uses the marketplace
/// when it is enabled and credentialed, and otherwise takes the median over general
/// merchandise prices.
pub fn build_sources(config: &Config, client: &Client) -> Result<Vec<Arc<dyn PriceSource>>, ConfigError> {
    let serpapi = config.serpapi.as_ref().map(|c| Arc::new(SerpApiClient::new(client.clone(), c)) as Arc<dyn PriceSource>);
    let ebay = config.active_ebay().map(|c| Arc::new(EbayClient::new(client.clone(), c)) as Arc<dyn PriceSource>);

    let chosen = match config.report_mode {
        ReportMode::Listing => serpapi,
        ReportMode::PriceLevel => ebay.or(serpapi),
    };
    chosen
        .map(|source| vec![source])
        .ok_or_else(|| ConfigError::NoSources { mode: config.report_mode.to_string() })
}
