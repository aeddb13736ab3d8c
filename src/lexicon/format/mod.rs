//! Record format layer: turns raw data-file bytes into structured entries.
//!
//! - [`entry`]: Parses stored keys, link markers and record bodies

pub mod entry;
