//! Podcast episode catalog pipeline.
//!
//! `podgen` ingests a podcast RSS feed and maintains a derived
//! `episodes.json` catalog for a static site to render:
//!
//! - **Fetching**: one tagged HTTP request for the raw feed document
//! - **Parsing**: event-driven RSS parse into per-item raw fields
//! - **Normalization**: stable ids, URL-safe slugs, season/episode codes,
//!   sanitized content, bounded excerpts
//! - **Reconciliation**: idempotent re-derivation that preserves manually
//!   curated fields (`youtube`, `tags`) across runs
//!
//! The pipeline runs as two independent batch commands: `build` (full
//! ingestion from the feed) and `cleanup` (in-place reconciliation of an
//! existing catalog). Both either write a fully-formed document or fail
//! before touching the previous snapshot.

pub mod catalog;
pub mod config;
pub mod feed;
pub mod pipeline;

pub use config::Config;
