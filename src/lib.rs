//! # lexicon-reader
//!
//! A reader for SWORD raw lexicon and dictionary modules: a fixed-record
//! `.idx` file of `(offset, size)` pairs and a `.dat` file of record bytes.
//! Keys are resolved by binary search over the index with random-access
//! reads; nothing is loaded into memory up front.
//!
//! Supports plain dictionaries, Strong's-number lexicons, date-keyed daily
//! devotionals, `@LINK` indirections and enciphered modules.
pub mod lexicon;

// Re-export the main types for convenience
pub use lexicon::{
    LexiconError,
    RawLdBackend,
    Result,
    format::entry::DataEntry,
    keys::KeyScheme,
    resolver::{EntryTransform, Passthrough},
    state::{DirectStateProvider, RawLdState, StateProvider},
    types::models::{BookCategory, Features, IndexLayout, Key, ModuleDescriptor, Position},
};
