//! Content sanitization and excerpt generation.
//!
//! Long-form episode notes from the upstream host end with a donation
//! solicitation block; everything from that marker onward is dropped.
//! Excerpts are whitespace-collapsed and cut on a word boundary.

use once_cell::sync::Lazy;
use regex::Regex;

/// Marker phrase opening the boilerplate block appended by the host.
const SUPPORTER_MARKER: &str = "Become a supporter of this podcast:";

// Case-insensitive fallback for marker variants the literal find misses.
static SUPPORTER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)Become a supporter of this podcast:.*$").unwrap());
static BR_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)(<br\s*/?>\s*){3,}").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Final excerpt cap, in characters (one trailing ellipsis not counted).
pub const EXCERPT_MAX: usize = 220;
/// A word-boundary backtrack earlier than this keeps the hard cut instead,
/// so excerpts never end up excessively short.
const EXCERPT_MIN_CUT: usize = 120;

/// Strips the trailing supporter-solicitation block and collapses runs of
/// three or more `<br>` elements down to exactly two.
pub fn strip_promo(html: &str) -> String {
    let html = match html.find(SUPPORTER_MARKER) {
        Some(idx) => &html[..idx],
        None => html,
    };
    let html = SUPPORTER_RE.replace(html, "");
    BR_RUN_RE.replace_all(&html, "<br /><br />").trim().to_string()
}

/// Collapses whitespace and truncates to [`EXCERPT_MAX`] characters on a
/// word boundary, appending an ellipsis.
///
/// The cut backtracks to the last space before the cap, but only when that
/// space falls after position [`EXCERPT_MIN_CUT`]; otherwise the hard cut
/// stands. Re-applying to its own output is a no-op.
pub fn clean_excerpt(text: &str) -> String {
    let collapsed = WHITESPACE_RE.replace_all(text.trim(), " ").into_owned();
    let chars: Vec<char> = collapsed.chars().collect();
    if chars.len() <= EXCERPT_MAX {
        return collapsed;
    }

    let window = &chars[..EXCERPT_MAX];
    let cut = window
        .iter()
        .rposition(|&c| c == ' ')
        .filter(|&pos| pos > EXCERPT_MIN_CUT)
        .unwrap_or(EXCERPT_MAX);

    let mut out: String = chars[..cut].iter().collect();
    out.push('…');
    out
}
