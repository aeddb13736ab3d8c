//! Core raw lexicon reader module.
//!
//! # Module Organization
//!
//! - [`types`]: Error type, module descriptor, index layout, keys
//! - [`codec`]: Index record decoding and Sapphire decipherment
//! - [`format`]: Data entry parsing (stored key, link marker, body)
//! - [`keys`]: Category-specific key normalization
//! - [`search`]: Binary search with the ordinal-0 title exception
//! - [`resolver`]: Record loading, link following, text rendering
//! - [`state`]: Scoped per-operation file state
//! - [`backend`]: The public retrieval facade
//!
//! ```text
//! RawLdBackend ─► KeyScheme ─► search ─► EntryResolver ─► RawLdState (.idx / .dat)
//! ```

pub mod backend;
pub mod codec;
pub mod format;
pub mod keys;
pub mod resolver;
pub mod search;
pub mod state;
pub mod types;
pub mod utils;

pub use backend::RawLdBackend;
pub use types::error::{LexiconError, Result};
