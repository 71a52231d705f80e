use super::*;

fn plain(text: &str) -> Segment {
    Segment { text: text.to_owned(), highlighted: false }
}

fn hit(text: &str) -> Segment {
    Segment { text: text.to_owned(), highlighted: true }
}

#[test]
fn empty_needle_returns_whole_text_plain() {
    assert_eq!(highlight_segments("Anna, Bob", ""), vec![plain("Anna, Bob")]);
}

#[test]
fn empty_text_returns_nothing() {
    assert!(highlight_segments("", "ann").is_empty());
}

#[test]
fn match_is_case_insensitive_and_keeps_original_case() {
    assert_eq!(highlight_segments("Anna, Bob", "ann"), vec![hit("Ann"), plain("a, Bob")]);
}

#[test]
fn every_occurrence_is_highlighted() {
    assert_eq!(
        highlight_segments("bob, Bobby", "bob"),
        vec![hit("bob"), plain(", "), hit("Bob"), plain("by")]
    );
}

#[test]
fn no_match_returns_plain_text() {
    assert_eq!(highlight_segments("Anna", "zed"), vec![plain("Anna")]);
}

#[test]
fn multibyte_text_is_split_on_char_boundaries() {
    assert_eq!(highlight_segments("Zoë, zoë", "ZOË"), vec![hit("Zoë"), plain(", "), hit("zoë")]);
}
