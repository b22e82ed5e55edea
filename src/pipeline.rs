//! The two batch operations: `build` and `cleanup`.
//!
//! Both are single linear passes. A run either completes and writes a
//! fully-formed document, or fails before any write occurs — there is no
//! partially persisted catalog.

use anyhow::{Context, Result};
use std::time::Duration;

use crate::catalog::{extract, reconcile, writer, CatalogDocument, CatalogMeta};
use crate::config::Config;
use crate::feed;

/// Full ingestion: fetch the feed, extract every item, merge curated
/// fields from the previous snapshot, reconcile, and write the catalog.
pub async fn run_build(config: &Config) -> Result<()> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(30))
        .build()
        .context("Failed to build HTTP client")?;

    let xml = feed::fetch_feed(&client, &config.feed_url)
        .await
        .context("Failed to fetch feed")?;

    let parsed = feed::parse_feed(&xml).context("Failed to parse feed")?;
    tracing::info!(items = parsed.items.len(), "Parsed feed");

    let fresh: Vec<_> = parsed
        .items
        .iter()
        .map(|item| extract::extract_record(item, &parsed.channel, config))
        .collect();

    let previous = writer::load_catalog(&config.output_path)
        .context("Failed to read previous catalog snapshot")?;

    let episodes = reconcile::merge_previous(fresh, previous.as_ref());
    let meta = build_meta(&parsed.channel, config, previous.as_ref());

    let doc = reconcile::reconcile(CatalogDocument { meta, episodes });

    writer::write_catalog(&config.output_path, &doc)
        .context("Failed to write catalog")?;
    tracing::info!(
        episodes = doc.episodes.len(),
        path = %config.output_path.display(),
        "Catalog written"
    );
    Ok(())
}

/// In-place reconciliation of the existing catalog. Idempotent: a second
/// run over its own output writes byte-identical content.
pub fn run_cleanup(config: &Config) -> Result<()> {
    let doc = writer::load_catalog(&config.output_path)
        .context("Failed to read catalog")?
        .with_context(|| {
            format!(
                "No catalog found at {} (run `build` first)",
                config.output_path.display()
            )
        })?;

    let doc = reconcile::reconcile(doc);

    writer::write_catalog(&config.output_path, &doc)
        .context("Failed to write catalog")?;
    tracing::info!(
        episodes = doc.episodes.len(),
        path = %config.output_path.display(),
        "Catalog cleaned up"
    );
    Ok(())
}

fn build_meta(
    channel: &feed::ChannelMeta,
    config: &Config,
    previous: Option<&CatalogDocument>,
) -> CatalogMeta {
    let title = {
        let t = extract::clean_text(&channel.title);
        if t.is_empty() {
            "Podcast".to_string()
        } else {
            t
        }
    };

    // The YouTube channel URL is curated: config wins, then whatever the
    // previous snapshot carries.
    let youtube_channel_url = if !config.youtube_channel_url.is_empty() {
        config.youtube_channel_url.clone()
    } else {
        previous
            .map(|p| p.meta.youtube_channel_url.clone())
            .unwrap_or_default()
    };

    CatalogMeta {
        title,
        rss_url: config.feed_url.clone(),
        youtube_channel_url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::ChannelMeta;

    #[test]
    fn test_build_meta_falls_back_to_generic_title() {
        let channel = ChannelMeta::default();
        let meta = build_meta(&channel, &Config::default(), None);
        assert_eq!(meta.title, "Podcast");
    }

    #[test]
    fn test_build_meta_preserves_previous_youtube_url() {
        let channel = ChannelMeta {
            title: "Show".into(),
            author: String::new(),
        };
        let previous = CatalogDocument {
            meta: CatalogMeta {
                title: "Show".into(),
                rss_url: "x".into(),
                youtube_channel_url: "https://www.youtube.com/@kept".into(),
            },
            episodes: vec![],
        };
        let meta = build_meta(&channel, &Config::default(), Some(&previous));
        assert_eq!(meta.youtube_channel_url, "https://www.youtube.com/@kept");
    }

    #[test]
    fn test_build_meta_config_youtube_url_wins() {
        let channel = ChannelMeta {
            title: "Show".into(),
            author: String::new(),
        };
        let mut config = Config::default();
        config.youtube_channel_url = "https://www.youtube.com/@configured".into();
        let previous = CatalogDocument {
            meta: CatalogMeta {
                youtube_channel_url: "https://www.youtube.com/@old".into(),
                ..Default::default()
            },
            episodes: vec![],
        };
        let meta = build_meta(&channel, &config, Some(&previous));
        assert_eq!(meta.youtube_channel_url, "https://www.youtube.com/@configured");
    }
}
