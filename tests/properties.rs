// tests/properties.rs

use std::collections::HashSet;

use autobuild::cli::prepare_command;
use autobuild::config::parse_env;
use autobuild::watch::{classify_entry, EntryDecision};
use proptest::prelude::*;

proptest! {
    /// Prepared commands have no empty or repeated words and keep the first
    /// occurrence order of the input.
    #[test]
    fn prepare_command_dedups_in_order(words in prop::collection::vec("[a-z-]{1,6}", 0..12), sep in "[ \t]{1,3}") {
        let raw = words.join(&sep);
        let prepared = prepare_command(&raw);

        let mut seen = HashSet::new();
        let expected: Vec<String> = words.iter().filter(|w| seen.insert(w.as_str())).cloned().collect();

        prop_assert_eq!(prepared, expected);
    }

    #[test]
    fn parsed_env_keys_are_trimmed_and_non_empty(contents in "[A-Za-z0-9_= \n]{0,80}") {
        for (key, value) in parse_env(&contents) {
            prop_assert!(!key.is_empty());
            prop_assert_eq!(key.trim(), key.as_str());
            prop_assert_eq!(value.trim(), value.as_str());
            prop_assert!(!key.contains('='));
        }
    }

    #[test]
    fn hidden_entries_are_never_checked_or_descended(name in "\\.[a-z.]{0,10}", is_dir in any::<bool>()) {
        let decision = classify_entry(&name, is_dir, !is_dir, "go");
        prop_assert!(matches!(decision, EntryDecision::Skip | EntryDecision::SkipSubtree));
    }

    #[test]
    fn visible_tracked_files_are_checked(stem in "[a-z_][a-z0-9_]{0,10}") {
        let name = format!("{stem}.go");
        prop_assert_eq!(classify_entry(&name, false, true, "go"), EntryDecision::Check);
    }
}
