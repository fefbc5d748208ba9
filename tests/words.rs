// Additional integration tests for vocabulary dataset invariants.
// These tests are native-friendly and avoid wasm/browser APIs.

use std::collections::HashSet;

#[test]
fn word_entries_are_unique_and_valid() {
    let mut seen = HashSet::new();
    for (w, m) in word_dash::WORDS {
        assert!(seen.insert(*w), "duplicate word '{}' in WORDS", w);
        assert!(!w.is_empty(), "empty word in WORDS");
        for c in w.chars() {
            assert!(
                c.is_ascii_lowercase(),
                "invalid char '{}' in word '{}'",
                c,
                w
            );
        }
        assert!(!m.is_empty(), "empty meaning for word '{}'", w);
    }
}

#[test]
fn meanings_are_hangul() {
    for (w, m) in word_dash::WORDS {
        let mut hangul = 0;
        for c in m.chars() {
            assert!(
                ('가'..='힣').contains(&c) || c == ' ',
                "invalid char '{}' in meaning '{}' for '{}'",
                c,
                m,
                w
            );
            if c != ' ' {
                hangul += 1;
            }
        }
        assert!(hangul >= 1, "meaning '{}' for '{}' contains no hangul", m, w);
    }
}

#[test]
fn meanings_do_not_repeat() {
    let mut seen = HashSet::new();
    for (w, m) in word_dash::WORDS {
        assert!(seen.insert(*m), "duplicate meaning '{}' for word '{}'", m, w);
    }
}
