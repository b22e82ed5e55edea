use serde::{Deserialize, Serialize};

/// Channel-level metadata for the catalog document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMeta {
    pub title: String,
    #[serde(rename = "rssUrl", default)]
    pub rss_url: String,
    #[serde(rename = "youtubeChannelUrl", default)]
    pub youtube_channel_url: String,
}

/// One episode as persisted in the catalog document.
///
/// Serialization order is the document's key order; keep new fields at the
/// end so existing snapshots stay byte-comparable.
///
/// `youtube` and `tags` are curated by hand after the fact — the pipeline
/// reads and preserves them but never derives or overwrites them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeRecord {
    /// Upstream-assigned numeric id when resolvable, otherwise the slug.
    /// Unique across the catalog.
    pub id: String,
    /// URL-safe lookup key derived from the title. Unique across the catalog.
    pub slug: String,
    /// Normalized season/episode label, e.g. "T07E08". Derived, may be empty.
    #[serde(default)]
    pub code: String,
    /// Display title; a detectable `#NN - NN -` prefix is rewritten to `code` form.
    pub title: String,
    /// ISO calendar date (`YYYY-MM-DD`), or empty when the source timestamp
    /// was unparseable.
    pub date: String,
    pub author: String,
    /// Plain-text summary, word-boundary truncated to the excerpt cap.
    #[serde(default)]
    pub excerpt: String,
    /// Sanitized long-form markup, or empty.
    #[serde(rename = "contentHtml", default)]
    pub content_html: String,
    /// Resolved media URL; the canonical download endpoint when an id was
    /// resolved, otherwise the raw enclosure URL.
    #[serde(default)]
    pub mp3: String,
    #[serde(default)]
    pub download: String,
    /// Manually curated; never touched by the pipeline.
    #[serde(default)]
    pub youtube: String,
    /// Manually curated; always present, possibly empty.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Upstream numeric identifier, preserved once discovered.
    #[serde(rename = "spreakerId", default, skip_serializing_if = "String::is_empty")]
    pub spreaker_id: String,
}

/// The full client-facing catalog document.
///
/// `episodes` is ordered by `date` descending, ties broken by input order;
/// no two records share a `slug` or an `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogDocument {
    pub meta: CatalogMeta,
    pub episodes: Vec<EpisodeRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_key_names() {
        let record = EpisodeRecord {
            id: "1".into(),
            slug: "ep".into(),
            content_html: "<p>x</p>".into(),
            spreaker_id: "1".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"contentHtml\""));
        assert!(json.contains("\"spreakerId\""));
        assert!(!json.contains("content_html"));
    }

    #[test]
    fn test_empty_spreaker_id_omitted() {
        let record = EpisodeRecord::default();
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("spreakerId"));
    }

    #[test]
    fn test_missing_optional_fields_deserialize() {
        // A hand-edited snapshot may omit derived/curated keys entirely
        let json = r#"{
            "id": "52461925",
            "slug": "t07e08-zero-trust",
            "title": "T07E08 - Zero Trust",
            "date": "2024-06-05",
            "author": "Host"
        }"#;
        let record: EpisodeRecord = serde_json::from_str(json).unwrap();
        assert!(record.tags.is_empty());
        assert!(record.youtube.is_empty());
        assert!(record.code.is_empty());
        assert!(record.spreaker_id.is_empty());
    }
}
