pub mod config;
pub mod deduplication;
pub mod ebay;
pub mod error;
pub mod expander;
pub mod message;
pub mod notifier;
pub mod scanner;
pub mod scheduler;
pub mod serpapi;
pub mod source;
pub mod status;
pub mod types;

// Re-export for tests
pub use scanner::{DealScanner, ScanOptions};
