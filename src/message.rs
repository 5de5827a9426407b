use crate::types::{PriceCandidate, ReportMode};
use chrono::{DateTime, Utc};

/// Discord rejects message content longer than this.
pub const MAX_MESSAGE_CHARS: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind { Listing, Summary, Heartbeat, NoResults, Diagnostic }

/// Text ready for delivery. Built only from its inputs so identical inputs give identical text.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl NotificationMessage {
    fn new(kind: MessageKind, text: String) -> Self {
        let text = if text.chars().count() > MAX_MESSAGE_CHARS {
            let mut clipped: String = text.chars().take(MAX_MESSAGE_CHARS - 1).collect();
            clipped.push('…');
            clipped
        } else {
            text
        };
        Self { kind, text }
    }

    pub fn listing(candidate: &PriceCandidate) -> Self {
        let mut text = format!("🛒 **{} ITEM FOUND**\n**{}**", candidate.source.label(), candidate.title);
        if let Some(price) = candidate.price {
            text.push_str(&format!("\nPrice: **{}**", format_price(price)));
        }
        if let Some(link) = &candidate.link {
            text.push('\n');
            text.push_str(link);
        }
        Self::new(MessageKind::Listing, text)
    }

    pub fn summary(keyword: &str, median: f64, sample_size: usize, at: DateTime<Utc>) -> Self {
        Self::new(
            MessageKind::Summary,
            format!(
                "📈 **PRICE CHECK: {}**\nMedian ask: **{}** ({} price{})\n{}",
                keyword,
                format_price(median),
                sample_size,
                if sample_size == 1 { "" } else { "s" },
                at.format("%Y-%m-%d %H:%M UTC")
            ),
        )
    }

    pub fn heartbeat(keywords: usize, mode: ReportMode, at: DateTime<Utc>) -> Self {
        Self::new(
            MessageKind::Heartbeat,
            format!("🔎 Scanning {} keyword{} ({} mode) at {}", keywords, if keywords == 1 { "" } else { "s" }, mode, at.format("%H:%M UTC")),
        )
    }

    pub fn no_results(keyword: &str) -> Self {
        Self::new(MessageKind::NoResults, format!("🤷 No results for **{}**", keyword))
    }

    pub fn diagnostic(keyword: &str, term: &str, error: &str) -> Self {
        Self::new(MessageKind::Diagnostic, format!("⚠️ Error scanning **{}** (`{}`): {}", keyword, term, error))
    }
}

pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}
