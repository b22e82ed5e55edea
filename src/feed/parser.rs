//! Event-driven RSS parsing.
//!
//! The pipeline needs more of the raw document than a schema-level feed
//! crate exposes: the verbatim inner markup of `description` and
//! `content:encoded` (CDATA or not), the `itunes:summary` fallback, the
//! channel-level `itunes:author`, and the `url` attribute of `enclosure`.
//! So items are read straight off the quick-xml event stream.
//!
//! Upstream feeds may carry zero, one, or many `<item>` elements; all three
//! shapes normalize to the `items` vector here, so no downstream code ever
//! inspects the feed's own serialization of the list.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

/// Errors from feed parsing.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Structurally broken markup.
    #[error("Malformed feed: {0}")]
    Xml(#[from] quick_xml::Error),
    /// The document parsed but contains no `<channel>` element.
    #[error("Malformed feed: no rss channel found")]
    MissingChannel,
}

/// Channel-level metadata inherited by every item.
#[derive(Debug, Clone, Default)]
pub struct ChannelMeta {
    pub title: String,
    /// `itunes:author` on the channel; items inherit this.
    pub author: String,
}

/// One upstream feed entry, fields verbatim as found in the document.
///
/// Transient: created per parse pass, consumed by the field extractor,
/// never persisted.
#[derive(Debug, Clone, Default)]
pub struct RawFeedItem {
    pub title: String,
    /// Feed-native timestamp text (usually RFC 2822).
    pub pub_date: String,
    pub link: String,
    /// Inner markup of `<description>`, CDATA included.
    pub description: String,
    /// Inner markup of `<content:encoded>`, if present.
    pub content_encoded: String,
    pub itunes_summary: String,
    /// `url` attribute of `<enclosure>`, if present.
    pub enclosure_url: String,
}

#[derive(Debug, Clone)]
pub struct ParsedFeed {
    pub channel: ChannelMeta,
    pub items: Vec<RawFeedItem>,
}

/// Parses the raw feed text into channel metadata and a sequence of items.
///
/// # Errors
///
/// [`ParseError::MissingChannel`] when the expected channel structure is
/// absent, [`ParseError::Xml`] when the markup itself is broken.
pub fn parse_feed(xml: &str) -> Result<ParsedFeed, ParseError> {
    let mut reader = Reader::from_str(xml);
    // Descriptions sometimes carry sloppy HTML outside CDATA; don't let an
    // unclosed <br> inside them abort the whole parse.
    reader.config_mut().check_end_names = false;

    let mut saw_channel = false;
    let mut channel = ChannelMeta::default();
    let mut items: Vec<RawFeedItem> = Vec::new();
    let mut current: Option<RawFeedItem> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"channel" => saw_channel = true,
                b"item" => current = Some(RawFeedItem::default()),
                b"title" => {
                    let text = reader.read_text(e.name())?.into_owned();
                    if let Some(item) = current.as_mut() {
                        item.title = text;
                    } else if saw_channel && channel.title.is_empty() {
                        // first title wins; <image><title> comes later
                        channel.title = text;
                    }
                }
                b"pubDate" => {
                    if let Some(item) = current.as_mut() {
                        item.pub_date = reader.read_text(e.name())?.into_owned();
                    }
                }
                b"link" => {
                    if let Some(item) = current.as_mut() {
                        item.link = reader.read_text(e.name())?.into_owned();
                    }
                }
                b"description" => {
                    if let Some(item) = current.as_mut() {
                        item.description = reader.read_text(e.name())?.into_owned();
                    }
                }
                b"content:encoded" => {
                    if let Some(item) = current.as_mut() {
                        item.content_encoded = reader.read_text(e.name())?.into_owned();
                    }
                }
                b"itunes:summary" => {
                    if let Some(item) = current.as_mut() {
                        item.itunes_summary = reader.read_text(e.name())?.into_owned();
                    }
                }
                b"itunes:author" => {
                    let text = reader.read_text(e.name())?.into_owned();
                    if current.is_none() && saw_channel {
                        channel.author = text;
                    }
                }
                b"enclosure" => {
                    if let Some(item) = current.as_mut() {
                        item.enclosure_url = enclosure_url(&e);
                    }
                }
                _ => {}
            },
            Event::Empty(e) if e.name().as_ref() == b"enclosure" => {
                if let Some(item) = current.as_mut() {
                    item.enclosure_url = enclosure_url(&e);
                }
            }
            Event::End(e) if e.name().as_ref() == b"item" => {
                if let Some(item) = current.take() {
                    items.push(item);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_channel {
        return Err(ParseError::MissingChannel);
    }

    Ok(ParsedFeed { channel, items })
}

fn enclosure_url(e: &BytesStart<'_>) -> String {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"url" {
            if let Ok(value) = attr.unescape_value() {
                return value.trim().to_string();
            }
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:itunes="http://www.itunes.com/dtds/podcast-1.0.dtd" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>DevSecOps Podcast</title>
    <itunes:author>Host Name</itunes:author>
    <image><title>cover art title</title></image>
    <item>
      <title><![CDATA[#07 - 08 - Zero Trust na prática]]></title>
      <pubDate>Wed, 05 Jun 2024 12:00:00 +0000</pubDate>
      <link>https://www.spreaker.com/episode/zero-trust--52461925</link>
      <description><![CDATA[<p>Neste episódio falamos de Zero Trust.</p>]]></description>
      <itunes:summary>Resumo curto</itunes:summary>
      <content:encoded><![CDATA[<p>Conteúdo completo.</p><br/><br/>]]></content:encoded>
      <enclosure url="https://cdn.example.com/ep.mp3" length="123" type="audio/mpeg"/>
    </item>
    <item>
      <title>Untagged episode</title>
      <pubDate>not a date</pubDate>
      <link>https://example.com/ep2</link>
      <description>plain text summary</description>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parses_channel_meta() {
        let parsed = parse_feed(FEED).unwrap();
        assert_eq!(parsed.channel.title, "DevSecOps Podcast");
        assert_eq!(parsed.channel.author, "Host Name");
    }

    #[test]
    fn test_image_title_does_not_override_channel_title() {
        let parsed = parse_feed(FEED).unwrap();
        assert_eq!(parsed.channel.title, "DevSecOps Podcast");
    }

    #[test]
    fn test_parses_items_in_order() {
        let parsed = parse_feed(FEED).unwrap();
        assert_eq!(parsed.items.len(), 2);
        assert_eq!(parsed.items[0].title, "#07 - 08 - Zero Trust na prática");
        assert_eq!(parsed.items[1].title, "Untagged episode");
    }

    #[test]
    fn test_item_fields() {
        let parsed = parse_feed(FEED).unwrap();
        let item = &parsed.items[0];
        assert_eq!(item.pub_date, "Wed, 05 Jun 2024 12:00:00 +0000");
        assert_eq!(item.link, "https://www.spreaker.com/episode/zero-trust--52461925");
        assert_eq!(item.description, "<p>Neste episódio falamos de Zero Trust.</p>");
        assert_eq!(item.itunes_summary, "Resumo curto");
        assert_eq!(item.content_encoded, "<p>Conteúdo completo.</p><br/><br/>");
        assert_eq!(item.enclosure_url, "https://cdn.example.com/ep.mp3");
    }

    #[test]
    fn test_optional_fields_default_empty() {
        let parsed = parse_feed(FEED).unwrap();
        let item = &parsed.items[1];
        assert_eq!(item.content_encoded, "");
        assert_eq!(item.itunes_summary, "");
        assert_eq!(item.enclosure_url, "");
    }

    #[test]
    fn test_single_item_feed() {
        let xml = r#"<rss><channel><title>T</title>
            <item><title>only one</title></item>
        </channel></rss>"#;
        let parsed = parse_feed(xml).unwrap();
        assert_eq!(parsed.items.len(), 1);
        assert_eq!(parsed.items[0].title, "only one");
    }

    #[test]
    fn test_empty_channel_yields_no_items() {
        let xml = "<rss><channel><title>T</title></channel></rss>";
        let parsed = parse_feed(xml).unwrap();
        assert!(parsed.items.is_empty());
    }

    #[test]
    fn test_missing_channel_is_error() {
        let err = parse_feed("<html><body>not a feed</body></html>").unwrap_err();
        assert!(matches!(err, ParseError::MissingChannel));
    }

    #[test]
    fn test_plain_text_document_is_error() {
        let err = parse_feed("definitely not xml at all").unwrap_err();
        assert!(matches!(err, ParseError::MissingChannel));
    }

    #[test]
    fn test_enclosure_with_separate_end_tag() {
        let xml = r#"<rss><channel>
            <item><enclosure url="https://cdn.example.com/a.mp3" type="audio/mpeg"></enclosure></item>
        </channel></rss>"#;
        let parsed = parse_feed(xml).unwrap();
        assert_eq!(parsed.items[0].enclosure_url, "https://cdn.example.com/a.mp3");
    }
}
