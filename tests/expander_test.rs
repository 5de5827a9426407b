use deal_scout::expander::QueryExpander;

#[test]
fn test_mapped_keyword_returns_full_phrase_list_in_order() {
    let expander = QueryExpander::default();
    assert_eq!(expander.expand("pokemon"), vec!["pokemon cards", "pokemon booster box"]);
}

#[test]
fn test_lookup_ignores_case_and_surrounding_space() {
    let expander = QueryExpander::default();
    assert_eq!(expander.expand("  Pokemon "), vec!["pokemon cards", "pokemon booster box"]);
    assert_eq!(expander.expand("PS5"), expander.expand("ps5"));
}

#[test]
fn test_unmapped_keyword_is_returned_unchanged() {
    let expander = QueryExpander::default();
    assert_eq!(expander.expand("Lego Star Wars"), vec!["Lego Star Wars"]);
    assert_eq!(expander.expand("lego"), vec!["lego"]);
}

#[test]
fn test_every_default_entry_expands_to_its_table_phrases() {
    let expander = QueryExpander::default();
    assert!(!expander.is_empty());
    for keyword in ["pokemon", "one piece", "mtg", "switch", "ps5", "xbox", "airpods"] {
        let terms = expander.expand(keyword);
        assert!(terms.len() >= 2, "{} should expand", keyword);
        assert!(!terms.iter().any(|t| t == keyword));
    }
}

#[test]
fn test_custom_table_preserves_order_and_skips_empty_entries() {
    let expander = QueryExpander::from_pairs(vec![
        ("Lego", vec!["lego technic", "lego icons", "lego star wars"]),
        ("empty", vec![]),
    ]);
    assert_eq!(expander.len(), 1);
    assert_eq!(expander.expand("lego"), vec!["lego technic", "lego icons", "lego star wars"]);
    assert_eq!(expander.expand("empty"), vec!["empty"]);
    assert_eq!(expander.expand("pokemon"), vec!["pokemon"]);
}
