//! Per-item field derivation: raw feed item → fresh episode record.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::catalog::{identity, slug, EpisodeRecord};
use crate::config::Config;
use crate::feed::{ChannelMeta, RawFeedItem};

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Excerpt pre-cap applied at ingestion; the sanitizer applies the final
/// word-boundary cap later.
const EXCERPT_PRECAP: usize = 260;

/// Reduces feed text to plain display text: CDATA markers and literal tags
/// removed, whitespace runs collapsed, trimmed.
pub fn clean_text(text: &str) -> String {
    let text = text.replace("<![CDATA[", "").replace("]]>", "");
    let text = TAG_RE.replace_all(&text, " ");
    WHITESPACE_RE.replace_all(&text, " ").trim().to_string()
}

/// Parses a feed-native timestamp into an ISO calendar date (`YYYY-MM-DD`).
///
/// Unparseable input yields an empty string, never an error: a record with
/// a broken date is still worth cataloguing, it just sorts last.
pub fn to_iso_date(pub_date: &str) -> String {
    let parsed = DateTime::parse_from_rfc2822(pub_date.trim())
        .or_else(|_| DateTime::parse_from_rfc3339(pub_date.trim()));
    match parsed {
        Ok(dt) => dt.with_timezone(&Utc).format("%Y-%m-%d").to_string(),
        Err(_) => String::new(),
    }
}

/// Derives a fresh [`EpisodeRecord`] from one raw feed item.
///
/// Heuristics, in feed-convention order:
/// - content prefers `content:encoded` over `description`
/// - excerpt comes from `description`, falling back to `itunes:summary`
/// - the media URL is the canonical download endpoint when the page link
///   carries a resolvable id, otherwise the raw enclosure URL
/// - the slug falls back to the episode id, then a fixed literal, when the
///   title is empty
///
/// Curated fields (`youtube`, `tags`) start empty; `code` and the title
/// rewrite are left to the reconciliation pass.
pub fn extract_record(item: &RawFeedItem, channel: &ChannelMeta, config: &Config) -> EpisodeRecord {
    let title = clean_text(&item.title);
    let date = to_iso_date(&item.pub_date);

    let content_html = if !item.content_encoded.trim().is_empty() {
        item.content_encoded.clone()
    } else {
        item.description.clone()
    };

    let summary_source = if !item.description.trim().is_empty() {
        item.description.as_str()
    } else {
        item.itunes_summary.as_str()
    };
    let excerpt: String = clean_text(summary_source).chars().take(EXCERPT_PRECAP).collect();

    let link = clean_text(&item.link);
    let episode_id = identity::id_from_link(&link).unwrap_or_default();
    let download = if episode_id.is_empty() {
        item.enclosure_url.clone()
    } else {
        identity::download_url(&episode_id)
    };

    let slug_source = if !title.is_empty() {
        title.as_str()
    } else if !episode_id.is_empty() {
        episode_id.as_str()
    } else {
        "episode"
    };
    let slug = slug::build_slug(slug_source);

    let id = if episode_id.is_empty() {
        slug.clone()
    } else {
        episode_id.clone()
    };

    let author = {
        let channel_author = clean_text(&channel.author);
        if channel_author.is_empty() {
            config.fallback_author.clone()
        } else {
            channel_author
        }
    };

    EpisodeRecord {
        id,
        slug,
        code: String::new(),
        title,
        date,
        author,
        excerpt,
        content_html,
        mp3: download.clone(),
        download,
        youtube: String::new(),
        tags: Vec::new(),
        spreaker_id: String::new(),
    }
}
