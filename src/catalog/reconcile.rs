//! The idempotent reconciliation pass.
//!
//! Consumes either a freshly extracted record list (build) or a previously
//! persisted document (cleanup) and re-derives every derived field from its
//! inputs. Curated fields are read-then-preserve: the pipeline never
//! recomputes `youtube` or `tags`, it only carries them forward.
//!
//! The correctness contract of the whole pipeline lives here: running the
//! pass twice on its own output is a byte-identical no-op.

use std::collections::{HashMap, HashSet};

use crate::catalog::{extract, identity, sanitize, slug, CatalogDocument, EpisodeRecord};

/// Carries curated fields from a previous snapshot onto freshly extracted
/// records, matching by `id` first, then by `slug`.
///
/// Build runs are feed-driven: records the upstream feed no longer lists
/// are not resurrected from the previous snapshot.
pub fn merge_previous(
    fresh: Vec<EpisodeRecord>,
    previous: Option<&CatalogDocument>,
) -> Vec<EpisodeRecord> {
    let Some(previous) = previous else {
        return fresh;
    };

    let by_id: HashMap<&str, &EpisodeRecord> = previous
        .episodes
        .iter()
        .map(|ep| (ep.id.as_str(), ep))
        .collect();
    let by_slug: HashMap<&str, &EpisodeRecord> = previous
        .episodes
        .iter()
        .map(|ep| (ep.slug.as_str(), ep))
        .collect();

    fresh
        .into_iter()
        .map(|mut ep| {
            let old = by_id
                .get(ep.id.as_str())
                .or_else(|| by_slug.get(ep.slug.as_str()));
            if let Some(old) = old {
                if !old.youtube.is_empty() {
                    ep.youtube = old.youtube.clone();
                }
                if !old.tags.is_empty() {
                    ep.tags = old.tags.clone();
                }
                if ep.spreaker_id.is_empty() && !old.spreaker_id.is_empty() {
                    ep.spreaker_id = old.spreaker_id.clone();
                }
            }
            ep
        })
        .collect()
}

/// Re-derives every derived field, enforces slug/id uniqueness, and sorts
/// newest-first. Idempotent.
pub fn reconcile(mut doc: CatalogDocument) -> CatalogDocument {
    for episode in &mut doc.episodes {
        reconcile_record(episode);
    }

    // Stable sort: ties keep input order; empty dates sort after all dated
    // records under the descending lexicographic comparison.
    doc.episodes.sort_by(|a, b| b.date.cmp(&a.date));

    dedupe(&mut doc.episodes);
    doc
}

fn reconcile_record(episode: &mut EpisodeRecord) {
    // The URL-path heuristic is authoritative over whatever id was stored
    // at ingestion time; a disagreement is flagged for manual review.
    if let Some(id) = identity::id_from_urls([episode.mp3.as_str(), episode.download.as_str()]) {
        if !episode.spreaker_id.is_empty() && episode.spreaker_id != id {
            tracing::warn!(
                slug = %episode.slug,
                stored = %episode.spreaker_id,
                derived = %id,
                "Stored episode id disagrees with media URLs; using URL-derived id"
            );
        }
        let download = identity::download_url(&id);
        episode.mp3 = download.clone();
        episode.download = download;
        episode.spreaker_id = id;
    }

    episode.content_html = sanitize::strip_promo(&episode.content_html);

    // Regenerate from sanitized content only when no excerpt exists;
    // whitespace-only counts as none, or the second pass would disagree
    // with the first.
    let summary_source = if episode.excerpt.trim().is_empty() {
        extract::clean_text(&episode.content_html)
    } else {
        episode.excerpt.clone()
    };
    episode.excerpt = sanitize::clean_excerpt(&summary_source);

    let code = slug::detect_code(&episode.title);
    if code.is_empty() {
        // A previous pass may already have rewritten the raw prefix away.
        episode.code = slug::code_from_normalized(&episode.title);
    } else {
        episode.title = slug::normalize_title(&episode.title);
        episode.code = code;
    }
}

/// Drops records whose `slug` or `id` was already seen. Runs after the
/// sort, so the newest record wins.
fn dedupe(episodes: &mut Vec<EpisodeRecord>) {
    let mut seen_slugs: HashSet<String> = HashSet::new();
    let mut seen_ids: HashSet<String> = HashSet::new();
    episodes.retain(|ep| {
        if seen_slugs.contains(&ep.slug) || seen_ids.contains(&ep.id) {
            tracing::warn!(slug = %ep.slug, id = %ep.id, "Dropping duplicate episode record");
            return false;
        }
        seen_slugs.insert(ep.slug.clone());
        seen_ids.insert(ep.id.clone());
        true
    });
}
