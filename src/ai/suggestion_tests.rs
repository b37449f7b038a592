//! Tests for suggestion parsing

use super::*;
use proptest::prelude::*;

#[test]
fn test_parse_drops_empty_entries_and_trims() {
    assert_eq!(
        parse_suggestions("olive oil, salt,  pepper ,"),
        vec!["olive oil", "salt", "pepper"]
    );
}

#[test]
fn test_parse_empty_text() {
    assert!(parse_suggestions("").is_empty());
    assert!(parse_suggestions("   \n").is_empty());
}

#[test]
fn test_parse_only_commas() {
    assert!(parse_suggestions(" , ,, ").is_empty());
}

#[test]
fn test_parse_single_item() {
    assert_eq!(parse_suggestions("garlic\n"), vec!["garlic"]);
}

#[test]
fn test_parse_keeps_order_and_duplicates() {
    assert_eq!(
        parse_suggestions("onion, garlic, onion"),
        vec!["onion", "garlic", "onion"]
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Joining clean names with any comma/space padding parses back to the names
    #[test]
    fn prop_padded_list_parses_to_names(
        names in prop::collection::vec("[a-z]{1,8}( [a-z]{1,8})?", 0..6),
        padding in prop::collection::vec("[ ]{0,3}", 6),
    ) {
        let text = names
            .iter()
            .zip(padding.iter())
            .map(|(name, pad)| format!("{pad}{name}{pad}"))
            .collect::<Vec<_>>()
            .join(",");

        prop_assert_eq!(parse_suggestions(&text), names);
    }

    #[test]
    fn prop_entries_are_trimmed_and_non_empty(text in ".{0,100}") {
        for entry in parse_suggestions(&text) {
            prop_assert!(!entry.is_empty());
            prop_assert_eq!(entry.trim(), entry.as_str());
            prop_assert!(!entry.contains(','));
        }
    }
}
