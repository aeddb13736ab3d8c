//! Codec layer for the on-disk binary formats.
//!
//! # Submodules
//!
//! - [`index`][]: Fixed-size little-endian index records
//! - [`crypto`][]: Sapphire II decipherment of record bodies

pub mod crypto;
pub mod index;
