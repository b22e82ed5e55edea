//! Slug building and season/episode code normalization.
//!
//! Slugs are lower-cased, ASCII-folded, hyphen-separated, with leading
//! zeros and hyphens stripped. Titles that start with a digit pair
//! (`07-08-...` once slugged) are rewritten to a stable `t07e08-` style
//! prefix. Separately, raw titles of the form `#07 - 08 - ...` yield a
//! display code `T07E08` and a rewritten display title.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static SEASON_EPISODE_SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)-(\d+)-").unwrap());
// Anchored to the start: the detected code must correspond to the prefix
// that gets rewritten, so a non-empty code always implies a "CODE - " title.
static CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*#\s*(\d{1,2})\s*-\s*(\d{1,2})\s*-").unwrap());
static CODE_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*#\s*\d{1,2}\s*-\s*\d{1,2}\s*-\s*").unwrap());
static NORMALIZED_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(T\d{2}E\d{2}) - ").unwrap());

/// Builds a URL-safe slug from a display title.
pub fn build_slug(title: &str) -> String {
    // NFKD then drop combining marks: "prática" → "pratica"
    let folded: String = title.nfkd().filter(|c| !is_combining_mark(*c)).collect();

    let mut slug = String::with_capacity(folded.len());
    let mut last_was_separator = false;
    for c in folded.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_separator = false;
        } else if !last_was_separator && !slug.is_empty() {
            slug.push('-');
            last_was_separator = true;
        }
    }
    let slug = slug.trim_end_matches('-');

    let slug = slug.trim_start_matches('0');
    let slug = SEASON_EPISODE_SLUG_RE.replace(slug, "t${1}e${2}-");
    slug.trim_start_matches('-').to_string()
}

/// Detects a `#NN - NN -` leading pattern in a raw title and returns the
/// normalized code (`T07E08`), or an empty string when absent. Absence is
/// not an error; most titles simply carry no code.
pub fn detect_code(title: &str) -> String {
    match CODE_RE.captures(title) {
        Some(c) => format!("T{:0>2}E{:0>2}", &c[1], &c[2]),
        None => String::new(),
    }
}

/// Reads the code back out of an already-normalized title (`T07E08 - ...`).
/// Keeps repeated reconciliation passes from clobbering a derived code once
/// the raw `#NN - NN -` prefix has been rewritten away.
pub fn code_from_normalized(title: &str) -> String {
    match NORMALIZED_CODE_RE.captures(title) {
        Some(c) => c[1].to_string(),
        None => String::new(),
    }
}

/// Rewrites the leading `#NN - NN - ` segment of a title to `CODE - ` form.
/// Titles without a detectable code are returned unchanged.
pub fn normalize_title(title: &str) -> String {
    let code = detect_code(title);
    if code.is_empty() {
        return title.to_string();
    }
    CODE_PREFIX_RE
        .replace(title, format!("{code} - "))
        .trim()
        .to_string()
}
