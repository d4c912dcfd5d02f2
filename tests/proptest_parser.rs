//! Property-based tests for the script parser
//!
//! Coverage targets:
//! - parse_panels never panics, whatever the input
//! - normalization always yields 7..=20 contiguously numbered panels
//! - the paragraph fallback only fires without markers, and is capped at 4

use groqtales::{extract_title, normalize_panel_count, parse_panels, MAX_PANELS, MIN_PANELS};
use proptest::prelude::*;

prop_compose! {
    /// A script built from markers, dialogue, captions, and noise lines
    fn arb_script()(lines in prop::collection::vec(arb_line(), 0..60)) -> String {
        lines.join("\n")
    }
}

fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u32..40, "[ -~]{0,30}").prop_map(|(n, rest)| format!("Panel {n}: {rest}")),
        ("[A-Za-z ]{1,12}", "[ -~]{1,30}").prop_map(|(who, what)| format!("{who}: {what}")),
        "[ -~]{0,40}",
        Just(String::new()),
        Just("# heading".to_string()),
        Just("- note".to_string()),
    ]
}

/// Prose with no digit anywhere can never contain a panel marker
fn arb_prose() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Za-z ,.!?]{0,40}", 0..12).prop_map(|parts| parts.join("\n\n"))
}

proptest! {
    /// Property: parsing is total on arbitrary input
    #[test]
    fn test_parse_never_panics(text in ".*") {
        let _ = parse_panels(&text);
        let _ = extract_title(&text, None);
    }

    /// Property: normalized count is always within limits
    #[test]
    fn test_count_invariant(text in arb_script()) {
        let panels = normalize_panel_count(parse_panels(&text));
        prop_assert!(panels.len() >= MIN_PANELS);
        prop_assert!(panels.len() <= MAX_PANELS);
    }

    /// Property: normalized numbering is 1..=len with no gaps
    #[test]
    fn test_contiguous_numbering(text in arb_script()) {
        let panels = normalize_panel_count(parse_panels(&text));
        for (i, panel) in panels.iter().enumerate() {
            prop_assert_eq!(panel.number as usize, i + 1);
        }
    }

    /// Property: without markers the fallback yields min(4, non-empty chunks) panels
    #[test]
    fn test_fallback_count(text in arb_prose()) {
        let chunks = text.split("\n\n").filter(|c| !c.trim().is_empty()).count();
        let panels = parse_panels(&text);

        prop_assert_eq!(panels.len(), chunks.min(4));
        prop_assert!(panels.iter().all(|p| p.dialogue.is_empty()));
    }

    /// Property: every marker line opens exactly one panel
    #[test]
    fn test_marker_count(numbers in prop::collection::vec(0u32..1000, 1..30)) {
        let text: String = numbers
            .iter()
            .map(|n| format!("Panel {n}: scene\nHero: line\n"))
            .collect();
        let panels = parse_panels(&text);

        prop_assert_eq!(panels.len(), numbers.len());
        for (panel, n) in panels.iter().zip(&numbers) {
            prop_assert_eq!(panel.number, *n);
            prop_assert_eq!(panel.dialogue.len(), 1);
        }
    }

    /// Property: an explicit non-empty title always wins
    #[test]
    fn test_explicit_title_wins(text in ".*", title in "[ -~]{1,20}") {
        prop_assert_eq!(extract_title(&text, Some(title.as_str())), title);
    }
}
