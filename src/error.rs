use thiserror::Error;

/// Configuration errors raised while reading the environment.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required variable: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("no price source is usable in {mode} mode")]
    NoSources { mode: String },
}

/// Failure of a single call against an upstream price API.
///
/// Always scoped to one term of one keyword; the scanner logs it and moves on.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response body: {0}")]
    Malformed(String),

    #[error("upstream API error: {0}")]
    Api(String),

    #[error("token exchange failed: {0}")]
    TokenExchange(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Malformed(e.to_string())
    }
}

/// Errors from the delivery platform.
#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("authentication rejected: {0}")]
    Unauthorized(String),

    #[error("destination {id} unavailable: {reason}")]
    DestinationUnavailable { id: String, reason: String },

    #[error("message rejected ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Keeps upstream error bodies short enough for logs and diagnostics.
pub(crate) fn truncate_body(body: &str) -> String {
    body.chars().take(300).collect()
}
