//! The episode catalog: record types, field derivation, normalization,
//! reconciliation, and persistence.
//!
//! Field derivation is split by concern:
//!
//! - [`extract`] - raw feed item → fresh [`EpisodeRecord`]
//! - [`identity`] - stable episode id heuristics and canonical media URLs
//! - [`slug`] - URL-safe slugs and season/episode codes
//! - [`sanitize`] - boilerplate removal and bounded excerpts
//! - [`reconcile`] - the idempotent merge/re-derivation pass
//! - [`writer`] - atomic persistence of the catalog document

pub mod extract;
pub mod identity;
pub mod reconcile;
pub mod sanitize;
pub mod slug;
mod types;
pub mod writer;

pub use types::{CatalogDocument, CatalogMeta, EpisodeRecord};
