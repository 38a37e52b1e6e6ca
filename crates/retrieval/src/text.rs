//! Text canonicalization and token segmentation
//!
//! Handles mixed CJK/alphanumeric text. Alphanumeric runs become one
//! lowercase token each; a CJK run of length >= 2 is segmented into
//! overlapping bigrams, trading precision for recall in place of real
//! word segmentation. Everything else (punctuation, symbols) carries
//! no tokens.

/// CJK Unified Ideographs block
fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

/// Lowercase, collapse whitespace runs (including full-width space)
/// to a single ASCII space and trim both ends. Pure and total.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_space = false;
    for c in lowered.chars() {
        if c.is_whitespace() {
            pending_space = true;
        } else {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        }
    }
    out
}

/// Segment text into CJK bigrams and lowercase alphanumeric runs
pub fn tokenize(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if is_cjk(chars[i]) {
            let start = i;
            while i < chars.len() && is_cjk(chars[i]) {
                i += 1;
            }
            let run = &chars[start..i];
            if run.len() == 1 {
                tokens.push(run[0].to_string());
            } else {
                for pair in run.windows(2) {
                    tokens.push(pair.iter().collect());
                }
            }
        } else if chars[i].is_ascii_alphanumeric() {
            let start = i;
            while i < chars.len() && chars[i].is_ascii_alphanumeric() {
                i += 1;
            }
            let run: String = chars[start..i].iter().collect();
            tokens.push(run.to_lowercase());
        } else {
            i += 1;
        }
    }
    tokens
}

/// True iff any marker occurs as a substring of `text`
pub fn contains_referential(text: &str, markers: &[String]) -> bool {
    markers.iter().any(|m| text.contains(m.as_str()))
}
