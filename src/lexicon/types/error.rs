//! Custom error types for the lexicon-reader crate.

use thiserror::Error;

/// The primary error type for all operations in this crate.
#[derive(Debug, Error)]
pub enum LexiconError {
    /// An error originating from I/O operations on the index or data file.
    #[error("I/O error: {0:?}")]
    Io(#[from] std::io::Error),

    /// The normalized key is absent from the index.
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// The key could not be parsed for the module's category (e.g. a bad devotional date).
    #[error("Invalid key format for {key:?}: {reason}")]
    InvalidKeyFormat { key: String, reason: String },

    /// An ordinal beyond the end of the index was requested.
    #[error("Index {ordinal} out of range for {cardinality} entries")]
    IndexOutOfRange { ordinal: usize, cardinality: usize },

    /// The index or data file is inconsistent: a record points outside the data file,
    /// or a link chain does not terminate.
    #[error("Corrupt store: {0}")]
    CorruptStore(String),

    /// The size field of an index record must be 2 or 4 bytes wide.
    #[error("Unsupported index data size: {0}. Only 2 and 4 are supported.")]
    UnsupportedDataSize(usize),
}

/// A convenience `Result` type alias using the crate's `LexiconError` type.
pub type Result<T> = std::result::Result<T, LexiconError>;
