use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind { GeneralMerchandise, Marketplace }

impl SourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::GeneralMerchandise => "WALMART",
            Self::Marketplace => "EBAY",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self { Self::GeneralMerchandise => "general-merchandise", Self::Marketplace => "marketplace" })
    }
}

/// A normalized search hit. `title` is never empty; `price` is finite and positive when set.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCandidate { pub title: String, pub price: Option<f64>, pub link: Option<String>, pub source: SourceKind }

/// Which notification policy the scanner applies to a keyword's results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportMode {
    /// One message per new candidate item.
    #[default]
    Listing,
    /// One median-ask summary per keyword.
    PriceLevel,
}

impl std::fmt::Display for ReportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self { Self::Listing => "listing", Self::PriceLevel => "price-level" })
    }
}

impl std::str::FromStr for ReportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "listing" | "listings" => Ok(Self::Listing),
            "price-level" | "price_level" | "pricelevel" | "median" => Ok(Self::PriceLevel),
            other => Err(format!("unknown report mode '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ScanState { #[default] Idle, Scanning }

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStats {
    pub ticks_completed: u64,
    pub ticks_aborted: u64,
    pub notifications_sent: u64,
    pub delivery_failures: u64,
    pub source_errors: u64,
}

/// Counts for a single completed pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub keywords_scanned: usize,
    pub notifications_sent: usize,
    pub delivery_failures: usize,
    pub source_errors: usize,
    pub skipped_seen: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome { Completed(TickReport), Aborted(String) }
