use crate::config::EbayConfig;
use crate::error::{truncate_body, SourceError};
use crate::source::{median_ask, price_from_json, PriceSource};
use crate::types::{PriceCandidate, SourceKind};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

pub const SEARCH_LIMIT: usize = 20;
const OAUTH_SCOPE: &str = "https://api.ebay.com/oauth/api_scope";

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// eBay Browse API. Reports the median ask for a term instead of individual listings.
#[derive(Clone)]
pub struct EbayClient {
    client: Client,
    url: String,
    client_id: String,
    client_secret: String,
    marketplace_id: String,
}

impl EbayClient {
    pub fn new(client: Client, config: &EbayConfig) -> Self {
        Self {
            client,
            url: config.api_base.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            marketplace_id: config.marketplace_id.clone(),
        }
    }

    async fn fetch_token(&self) -> Result<String, SourceError> {
        let response = self
            .client
            .post(format!("{}/identity/v1/oauth2/token", self.url))
            .header("Authorization", basic_auth_header(&self.client_id, &self.client_secret))
            .form(&[("grant_type", "client_credentials"), ("scope", OAUTH_SCOPE)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!("[eBay] Token exchange failed: {}", status);
            return Err(SourceError::TokenExchange(format!("{}: {}", status, truncate_body(&body))));
        }

        let token: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| SourceError::TokenExchange(format!("unreadable token response: {}", e)))?;
        Ok(token.access_token)
    }

    /// Valid ask prices for the first [`SEARCH_LIMIT`] items matching `term`.
    pub async fn ask_prices(&self, term: &str) -> Result<Vec<f64>, SourceError> {
        let token = self.fetch_token().await?;
        let limit = SEARCH_LIMIT.to_string();

        let response = self
            .client
            .get(format!("{}/buy/browse/v1/item_summary/search", self.url))
            .header("Authorization", format!("Bearer {}", token))
            .header("X-EBAY-C-MARKETPLACE-ID", &self.marketplace_id)
            .query(&[("q", term), ("limit", limit.as_str())])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!("[eBay] Search for '{}' failed: {}", term, status);
            return Err(SourceError::Status { status: status.as_u16(), body: truncate_body(&body) });
        }

        let json: JsonValue = serde_json::from_str(&body)?;
        parse_item_prices(&json)
    }
}

#[async_trait]
impl PriceSource for EbayClient {
    fn kind(&self) -> SourceKind {
        SourceKind::Marketplace
    }

    async fn search(&self, term: &str) -> Result<Vec<PriceCandidate>, SourceError> {
        let prices = self.ask_prices(term).await?;
        debug!("[eBay] '{}' -> {} valid price(s)", term, prices.len());
        Ok(median_candidate(term, &prices).into_iter().collect())
    }
}

/// `Basic base64(client_id:client_secret)`.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let encoded = general_purpose::STANDARD.encode(format!("{}:{}", client_id, client_secret));
    format!("Basic {}", encoded)
}

/// Extracts `itemSummaries[].price.value`, dropping non-finite and non-positive values.
/// A body without `itemSummaries` means no matches.
pub fn parse_item_prices(json: &JsonValue) -> Result<Vec<f64>, SourceError> {
    if !json.is_object() {
        return Err(SourceError::Malformed("expected a JSON object".into()));
    }
    let Some(items) = json.get("itemSummaries").and_then(|v| v.as_array()) else {
        return Ok(vec![]);
    };
    Ok(items
        .iter()
        .take(SEARCH_LIMIT)
        .filter_map(|item| item.pointer("/price/value").and_then(price_from_json))
        .collect())
}

/// The single summary candidate for a term, if any price survived validation.
pub fn median_candidate(term: &str, prices: &[f64]) -> Option<PriceCandidate> {
    median_ask(prices).map(|median| PriceCandidate {
        title: term.to_string(),
        price: Some(median),
        link: None,
        source: SourceKind::Marketplace,
    })
}
