use crate::config::SerpApiConfig;
use crate::error::{truncate_body, SourceError};
use crate::source::{price_from_json, PriceSource};
use crate::types::{PriceCandidate, SourceKind};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

pub const SERPAPI_URL: &str = "https://serpapi.com";

/// General merchandise search through SerpApi (Walmart engine by default).
#[derive(Clone)]
pub struct SerpApiClient {
    client: Client,
    url: String,
    api_key: String,
    engine: String,
    max_results: usize,
}

impl SerpApiClient {
    pub fn new(client: Client, config: &SerpApiConfig) -> Self {
        Self::with_base_url(client, SERPAPI_URL, config)
    }

    pub fn with_base_url(client: Client, url: &str, config: &SerpApiConfig) -> Self {
        Self {
            client,
            url: url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            engine: config.engine.clone(),
            max_results: config.max_results,
        }
    }
}

#[async_trait]
impl PriceSource for SerpApiClient {
    fn kind(&self) -> SourceKind {
        SourceKind::GeneralMerchandise
    }

    async fn search(&self, term: &str) -> Result<Vec<PriceCandidate>, SourceError> {
        let response = self
            .client
            .get(format!("{}/search.json", self.url))
            .query(&[("engine", self.engine.as_str()), ("q", term), ("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!("[SerpApi] {} for '{}'", status, term);
            return Err(SourceError::Status { status: status.as_u16(), body: truncate_body(&body) });
        }

        let json: JsonValue = serde_json::from_str(&body)?;
        let candidates = parse_search_response(&json, self.max_results)?;
        debug!("[SerpApi] '{}' -> {} candidate(s)", term, candidates.len());
        Ok(candidates)
    }
}

/// Normalizes a search.json body. Results live under `organic_results` or, for some result
/// types, `shopping_results`; a body with neither is an empty result rather than an error.
pub fn parse_search_response(json: &JsonValue, max_results: usize) -> Result<Vec<PriceCandidate>, SourceError> {
    if let Some(message) = json.get("error").and_then(|v| v.as_str()) {
        if is_empty_search(json, message) {
            debug!("[SerpApi] no results: {}", message);
            return Ok(vec![]);
        }
        return Err(SourceError::Api(message.to_string()));
    }
    if !json.is_object() {
        return Err(SourceError::Malformed("expected a JSON object".into()));
    }

    let items = ["organic_results", "shopping_results"]
        .iter()
        .find_map(|field| json.get(*field).and_then(|v| v.as_array()));

    let Some(items) = items else {
        debug!("[SerpApi] response carried no result array");
        return Ok(vec![]);
    };

    Ok(items.iter().take(max_results).filter_map(to_candidate).collect())
}

/// SerpApi answers a search with no matches with a successful status and an `error` string.
fn is_empty_search(json: &JsonValue, message: &str) -> bool {
    let succeeded = json.pointer("/search_metadata/status").and_then(|v| v.as_str()) == Some("Success");
    succeeded || message.contains("hasn't returned any results")
}

fn to_candidate(item: &JsonValue) -> Option<PriceCandidate> {
    let title = item.get("title").and_then(|v| v.as_str()).map(str::trim).filter(|t| !t.is_empty())?;

    let price = item
        .get("extracted_price")
        .and_then(price_from_json)
        .or_else(|| item.get("price").and_then(price_from_json))
        .or_else(|| item.pointer("/primary_offer/offer_price").and_then(price_from_json));

    let link = ["link", "product_page_url"]
        .iter()
        .find_map(|field| item.get(*field).and_then(|v| v.as_str()))
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from);

    if price.is_none() && link.is_none() {
        return None;
    }

    Some(PriceCandidate { title: title.to_string(), price, link, source: SourceKind::GeneralMerchandise })
}
