use crate::error::ConfigError;
use crate::types::ReportMode;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_INTERVAL_MINUTES: u64 = 10;
pub const DEFAULT_MAX_KEYWORDS: usize = 25;
pub const DEFAULT_SERPAPI_ENGINE: &str = "walmart";
pub const DEFAULT_SERPAPI_RESULTS: usize = 3;
/// Upper bound on results kept per SerpApi search. Larger settings are clamped.
pub const MAX_SERPAPI_RESULTS: usize = 3;
pub const DEFAULT_EBAY_MARKETPLACE: &str = "EBAY_US";
pub const DEFAULT_EBAY_BASE: &str = "https://api.ebay.com";
pub const DEFAULT_PORT: u16 = 3003;

#[derive(Debug, Clone)]
pub struct SerpApiConfig {
    pub api_key: String,
    pub engine: String,
    pub max_results: usize,
}

#[derive(Debug, Clone)]
pub struct EbayConfig {
    pub client_id: String,
    pub client_secret: String,
    pub marketplace_id: String,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub channel_id: String,
    pub watchlist: Vec<String>,
    pub interval: Duration,
    pub max_keywords_per_tick: usize,
    pub report_mode: ReportMode,
    pub verbose: bool,
    pub heartbeat: bool,
    pub disable_ebay: bool,
    pub serpapi: Option<SerpApiConfig>,
    pub ebay: Option<EbayConfig>,
    pub port: u16,
}

impl Config {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let discord_token = get("DISCORD_TOKEN").ok_or(ConfigError::MissingField { field: "DISCORD_TOKEN" })?;
        let channel_id = get("DEALS_CHANNEL_ID").ok_or(ConfigError::MissingField { field: "DEALS_CHANNEL_ID" })?;

        let interval_minutes: u64 = parse_or("SCAN_INTERVAL_MINUTES", get("SCAN_INTERVAL_MINUTES"), DEFAULT_INTERVAL_MINUTES)?;
        if interval_minutes == 0 {
            return Err(ConfigError::InvalidValue { field: "SCAN_INTERVAL_MINUTES", reason: "must be at least 1".into() });
        }
        let interval = interval_minutes
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(|| ConfigError::InvalidValue { field: "SCAN_INTERVAL_MINUTES", reason: "too large".into() })?;
        let max_keywords_per_tick: usize = parse_or("MAX_KEYWORDS_PER_TICK", get("MAX_KEYWORDS_PER_TICK"), DEFAULT_MAX_KEYWORDS)?;
        if max_keywords_per_tick == 0 {
            return Err(ConfigError::InvalidValue { field: "MAX_KEYWORDS_PER_TICK", reason: "must be at least 1".into() });
        }

        let report_mode = match get("REPORT_MODE") {
            Some(raw) => raw.parse::<ReportMode>().map_err(|reason| ConfigError::InvalidValue { field: "REPORT_MODE", reason })?,
            None => ReportMode::default(),
        };

        let serpapi = match get("SERPAPI_KEY") {
            Some(api_key) => {
                let max_results: usize = parse_or("SERPAPI_MAX_RESULTS", get("SERPAPI_MAX_RESULTS"), DEFAULT_SERPAPI_RESULTS)?;
                if max_results == 0 {
                    return Err(ConfigError::InvalidValue { field: "SERPAPI_MAX_RESULTS", reason: "must be at least 1".into() });
                }
                if max_results > MAX_SERPAPI_RESULTS {
                    warn!("SERPAPI_MAX_RESULTS={} clamped to {}", max_results, MAX_SERPAPI_RESULTS);
                }
                Some(SerpApiConfig {
                    api_key,
                    engine: get("SERPAPI_ENGINE").unwrap_or_else(|| DEFAULT_SERPAPI_ENGINE.into()),
                    max_results: max_results.min(MAX_SERPAPI_RESULTS),
                })
            }
            None => None,
        };

        let ebay = match (get("EBAY_CLIENT_ID"), get("EBAY_CLIENT_SECRET")) {
            (Some(client_id), Some(client_secret)) => Some(EbayConfig {
                client_id,
                client_secret,
                marketplace_id: get("EBAY_MARKETPLACE_ID").unwrap_or_else(|| DEFAULT_EBAY_MARKETPLACE.into()),
                api_base: get("EBAY_API_BASE").unwrap_or_else(|| DEFAULT_EBAY_BASE.into()),
            }),
            _ => None,
        };

        Ok(Self {
            discord_token,
            channel_id,
            watchlist: parse_watchlist(&get("WATCHLIST").unwrap_or_default()),
            interval,
            max_keywords_per_tick,
            report_mode,
            verbose: parse_flag("VERBOSE", get("VERBOSE"))?,
            heartbeat: parse_flag("HEARTBEAT", get("HEARTBEAT"))?,
            disable_ebay: parse_flag("DISABLE_EBAY", get("DISABLE_EBAY"))?,
            serpapi,
            ebay,
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
        })
    }

    /// Marketplace credentials, unless the source is switched off.
    pub fn active_ebay(&self) -> Option<&EbayConfig> {
        if self.disable_ebay { None } else { self.ebay.as_ref() }
    }

    /// Marketplace credentials are active but listing mode never queries them.
    pub fn marketplace_ignored(&self) -> bool {
        self.report_mode == ReportMode::Listing && self.active_ebay().is_some()
    }
}

/// Splits a `|`-separated watchlist, trimming entries and dropping empties.
pub fn parse_watchlist(raw: &str) -> Vec<String> {
    raw.split('|').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
}

fn parse_flag(field: &'static str, raw: Option<String>) -> Result<bool, ConfigError> {
    let Some(raw) = raw else { return Ok(false) };
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue { field, reason: format!("'{}' is not a boolean", other) }),
    }
}

fn parse_or<T>(field: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::InvalidValue { field, reason: e.to_string() }),
        None => Ok(default),
    }
}
