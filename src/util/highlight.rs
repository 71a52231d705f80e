//! Case-insensitive match segmentation for highlighted text.

#[cfg(test)]
#[path = "highlight_test.rs"]
mod highlight_test;

/// A run of text and whether it matched the highlight needle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub highlighted: bool,
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Byte length of a case-insensitive match of `needle` at the start of `hay`.
fn match_len(hay: &str, needle: &[char]) -> Option<usize> {
    let mut len = 0;
    let mut hay_chars = hay.chars();
    for &n in needle {
        let c = hay_chars.next()?;
        if !chars_eq_ignore_case(c, n) {
            return None;
        }
        len += c.len_utf8();
    }
    Some(len)
}

/// Split `text` into highlighted and plain runs for every non-overlapping
/// case-insensitive occurrence of `needle`.
#[must_use]
pub fn highlight_segments(text: &str, needle: &str) -> Vec<Segment> {
    if text.is_empty() {
        return Vec::new();
    }
    let needle = needle.chars().collect::<Vec<_>>();
    if needle.is_empty() {
        return vec![Segment { text: text.to_owned(), highlighted: false }];
    }

    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;
    while pos < text.len() {
        if let Some(len) = match_len(&text[pos..], &needle) {
            if plain_start < pos {
                segments.push(Segment { text: text[plain_start..pos].to_owned(), highlighted: false });
            }
            segments.push(Segment { text: text[pos..pos + len].to_owned(), highlighted: true });
            pos += len;
            plain_start = pos;
        } else {
            pos += text[pos..].chars().next().map_or(1, char::len_utf8);
        }
    }
    if plain_start < text.len() {
        segments.push(Segment { text: text[plain_start..].to_owned(), highlighted: false });
    }
    segments
}
