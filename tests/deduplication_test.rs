use deal_scout::deduplication::{item_key, keyword_key, normalize_key, Deduplicator, MAX_KEY_CHARS};

#[tokio::test]
async fn test_recorded_key_is_seen() {
    let ledger = Deduplicator::new();
    assert!(!ledger.seen("item:lego city").await);
    ledger.record("item:lego city").await;
    assert!(ledger.seen("item:lego city").await);
    assert_eq!(ledger.len().await, 1);
}

#[tokio::test]
async fn test_keys_are_case_folded() {
    let ledger = Deduplicator::new();
    ledger.record("Item:LEGO  City").await;
    assert!(ledger.seen("item:lego city").await);
    assert!(!ledger.check_and_record("ITEM:Lego City").await);
    assert_eq!(ledger.len().await, 1);
}

#[tokio::test]
async fn test_check_and_record_reports_first_sighting_only() {
    let ledger = Deduplicator::default();
    assert!(ledger.is_empty().await);
    assert!(ledger.check_and_record(&keyword_key("pokemon")).await);
    assert!(!ledger.check_and_record(&keyword_key("Pokemon")).await);
}

#[test]
fn test_normalize_trims_collapses_and_truncates() {
    assert_eq!(normalize_key("  Pokemon   Booster\tBox "), "pokemon booster box");
    let long = "x".repeat(500);
    assert_eq!(normalize_key(&long).chars().count(), MAX_KEY_CHARS);
}

#[test]
fn test_truncation_counts_characters_not_bytes() {
    let title = "é".repeat(300);
    let key = normalize_key(&title);
    assert_eq!(key.chars().count(), MAX_KEY_CHARS);
}

#[test]
fn test_item_and_keyword_keys_live_in_separate_namespaces() {
    assert_eq!(item_key("LEGO City"), "item:lego city");
    assert_eq!(keyword_key(" LEGO "), "keyword:lego");
    assert_ne!(item_key("lego"), keyword_key("lego"));
}
