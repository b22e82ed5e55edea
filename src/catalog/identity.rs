//! Stable episode identity resolution.
//!
//! Two complementary heuristics recover the upstream numeric id:
//!
//! - At ingestion time the episode page link ends in a double-dash suffix
//!   (`.../zero-trust--52461925`).
//! - At reconciliation time the id is embedded in whatever media URLs the
//!   record already carries (`/episode/<id>/` on CDN paths,
//!   `/v2/episodes/<id>/` on canonical API paths).
//!
//! Records can arrive from either stage with different URL shapes, so both
//! are kept; the reconciliation-time heuristic is authoritative on conflict.

use once_cell::sync::Lazy;
use regex::Regex;

static LINK_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"--(\d+)\s*$").unwrap());
static EPISODE_PATH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)/episode/(\d+)/").unwrap());
static API_PATH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)/v2/episodes/(\d+)/").unwrap());

/// Extracts the trailing numeric id from an episode page link.
///
/// `https://www.spreaker.com/episode/offensive-security--52461925` → `52461925`
pub fn id_from_link(link: &str) -> Option<String> {
    LINK_SUFFIX_RE
        .captures(link)
        .map(|c| c[1].to_string())
}

/// Recovers the numeric id from URLs already stored on a record.
///
/// Tries the CDN-style `/episode/<digits>/` pattern across all candidates
/// first, then the canonical `/v2/episodes/<digits>/` API pattern.
pub fn id_from_urls<'a>(candidates: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let joined = candidates.into_iter().collect::<Vec<_>>().join(" ");
    EPISODE_PATH_RE
        .captures(&joined)
        .or_else(|| API_PATH_RE.captures(&joined))
        .map(|c| c[1].to_string())
}

/// The canonical download endpoint for a resolved episode id.
pub fn download_url(id: &str) -> String {
    format!("https://api.spreaker.com/v2/episodes/{id}/download.mp3")
}
