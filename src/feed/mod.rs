//! Feed retrieval and parsing.
//!
//! - [`fetcher`] - One-shot HTTP retrieval of the raw feed document
//! - [`parser`] - Event-driven RSS parsing into per-item raw fields

mod fetcher;
mod parser;

pub use fetcher::{fetch_feed, FetchError};
pub use parser::{parse_feed, ChannelMeta, ParseError, ParsedFeed, RawFeedItem};
