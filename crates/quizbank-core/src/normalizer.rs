//! Idempotent filler-marker injection and removal for option text.
//!
//! The unit the rebalancer and the cleanup pass build on. A filler marker is
//! a fixed hedge clause appended to an option purely to adjust its length
//! and plausibility; because the table is fixed, a marker can always be
//! detected and removed again later.
//!
//! Laws (for text that does not already contain a marker):
//! `strip(apply(s, m)) == s` byte-identical, and `apply(apply(s, m), m) ==
//! apply(s, m)`. Both hold regardless of which marker-choice branch fires,
//! because insertion is membership-checked and splices the marker in as one
//! contiguous string.

use crate::model::text_len;

/// Fixed, ordered table of filler-marker templates.
///
/// The first three are the content-sensitive choices (refutation,
/// simplification, complexity); the rest form the mechanical rotation.
pub const FILLER_MARKERS: [&str; 10] = [
    ", which is not supported by the empirical findings",
    " - this is, however, a simplification",
    ", which understates the complexity of the concept",
    " according to several studies",
    " as commonly understood",
    " in line with established theory",
    ", as empirical findings suggest",
    " according to the current state of research",
    " in organizational contexts",
    ", which is often overlooked",
];

/// Options shorter than this get the complexity hedge, which reads better
/// on terse statements than the rotation markers do.
const SHORT_TEXT_CHARS: usize = 30;

/// True if any known marker occurs anywhere in the text.
pub fn contains_marker(text: &str) -> bool {
    FILLER_MARKERS.iter().any(|m| text.contains(m))
}

/// Append a marker to the text, unless any known marker is already present.
///
/// When the text ends in terminal punctuation the marker is spliced in
/// before it, so the clause stays inside the sentence and `strip` can
/// restore the original bytes exactly.
pub fn apply(text: &str, marker: &str) -> String {
    if contains_marker(text) {
        return text.to_string();
    }

    match text.bytes().last() {
        Some(b'.' | b'!' | b'?') => {
            let body = &text[..text.len() - 1];
            let punct = &text[text.len() - 1..];
            format!("{body}{marker}{punct}")
        }
        _ => format!("{text}{marker}"),
    }
}

/// Remove every known marker wherever it occurs as a substring.
///
/// Upstream passes insert markers mid-sentence via punctuation-aware
/// concatenation, so a suffix check is not enough.
pub fn strip(text: &str) -> String {
    let mut out = text.to_string();
    for marker in FILLER_MARKERS {
        while let Some(pos) = out.find(marker) {
            out.replace_range(pos..pos + marker.len(), "");
        }
    }
    out
}

/// Choose a marker that reads plausibly for the given text.
///
/// Negated claims get the refutation hedge, absolute claims the
/// simplification hedge, very short text the complexity hedge; everything
/// else rotates deterministically through the rest of the table, keyed by
/// the caller-provided salt (typically the option's index).
pub fn pick_marker(text: &str, salt: usize) -> &'static str {
    let lower = text.to_lowercase();

    if lower.contains("not ") || lower.contains("never ") || lower.contains(" no ") {
        FILLER_MARKERS[0]
    } else if lower.contains("always") || lower.contains("only") {
        FILLER_MARKERS[1]
    } else if text_len(text) < SHORT_TEXT_CHARS {
        FILLER_MARKERS[2]
    } else {
        FILLER_MARKERS[3 + salt % (FILLER_MARKERS.len() - 3)]
    }
}

/// Pick a fitting marker and apply it.
pub fn lengthen(text: &str, salt: usize) -> String {
    apply(text, pick_marker(text, salt))
}
