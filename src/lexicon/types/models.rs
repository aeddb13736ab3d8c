//! Core data structures for raw lexicon modules.
//!
//! This module defines the fundamental types used throughout the library:
//! - Module metadata (category, charset, cipher key, feature flags)
//! - Index layout and index records
//! - Keys and search positions

use std::fmt;
use std::path::{Path, PathBuf};

use encoding_rs::{Encoding, WINDOWS_1252};

use super::error::{LexiconError, Result};

/// Content category of a module, as declared in its configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookCategory {
    /// Ordinary dictionaries and glossaries keyed by headword.
    #[default]
    Dictionary,
    /// Daily devotionals keyed by calendar date (`MM.DD` on disk).
    DailyDevotional,
}

/// Feature flags relevant to key normalization.
///
/// Lexicons keyed by Strong's numbers declare which testament's
/// definitions they carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Features {
    pub greek_definitions: bool,
    pub hebrew_definitions: bool,
}

impl Features {
    pub const GREEK: Features = Features { greek_definitions: true, hebrew_definitions: false };
    pub const HEBREW: Features = Features { greek_definitions: false, hebrew_definitions: true };
    pub const BOTH: Features = Features { greek_definitions: true, hebrew_definitions: true };

    /// Whether the module is keyed by Strong's numbers at all.
    pub fn has_strongs(&self) -> bool {
        self.greek_definitions || self.hebrew_definitions
    }
}

/// Read-only description of a module, supplied by whoever discovered and configured it.
///
/// `data_path` is the common prefix of the module's files: the index lives at
/// `<data_path>.idx` and the record data at `<data_path>.dat`.
#[derive(Debug, Clone)]
pub struct ModuleDescriptor {
    pub initials: String,
    pub data_path: PathBuf,
    pub category: BookCategory,
    pub features: Features,
    pub encoding: &'static Encoding,
    /// Module-level secret used to obscure record bodies. `None` for plain modules.
    pub cipher_key: Option<String>,
}

impl ModuleDescriptor {
    /// Creates a plain dictionary descriptor with SWORD's default Latin-1 charset.
    pub fn new(initials: impl Into<String>, data_path: impl AsRef<Path>) -> Self {
        Self {
            initials: initials.into(),
            data_path: data_path.as_ref().to_path_buf(),
            category: BookCategory::default(),
            features: Features::default(),
            encoding: WINDOWS_1252,
            cipher_key: None,
        }
    }

    pub fn with_category(mut self, category: BookCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Sets the cipher key. An empty key means the module is not enciphered.
    pub fn with_cipher_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.cipher_key = if key.is_empty() { None } else { Some(key) };
        self
    }

    pub fn with_initials(mut self, initials: impl Into<String>) -> Self {
        self.initials = initials.into();
        self
    }

    /// Path of the fixed-record index file.
    pub fn index_path(&self) -> PathBuf {
        with_suffix(&self.data_path, "idx")
    }

    /// Path of the record data file.
    pub fn data_file_path(&self) -> PathBuf {
        with_suffix(&self.data_path, "dat")
    }
}

fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut os = prefix.as_os_str().to_os_string();
    os.push(".");
    os.push(suffix);
    PathBuf::from(os)
}

/// Width of the offset field in every index record.
pub const OFFSET_SIZE: usize = 4;

/// Fixed layout of index records for one module.
///
/// Each record is a little-endian `u32` offset followed by a `u16` or `u32`
/// size, so `entry_size` is either 6 or 8 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexLayout {
    data_size: usize,
}

impl IndexLayout {
    pub fn new(data_size: usize) -> Result<Self> {
        match data_size {
            2 | 4 => Ok(Self { data_size }),
            other => Err(LexiconError::UnsupportedDataSize(other)),
        }
    }

    /// Bytes used by the size field (2 or 4).
    pub fn data_size(&self) -> usize {
        self.data_size
    }

    /// Bytes per index record (`4 + data_size`).
    pub fn entry_size(&self) -> usize {
        OFFSET_SIZE + self.data_size
    }
}

/// Location of one record in the data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataIndex {
    pub offset: u32,
    pub size: u32,
}

impl DataIndex {
    /// Exclusive end of the addressed byte range.
    pub fn end(&self) -> u64 {
        self.offset as u64 + self.size as u64
    }
}

/// A single-entry key as handed back to callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Key {
    name: String,
}

impl Key {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Outcome of a binary search over the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Found(usize),
    /// The key is absent; it would sort at `insertion`.
    Absent { insertion: usize },
}

impl Position {
    /// Encodes the position the way callers of `index_of` expect it:
    /// the ordinal when found, `-(insertion + 1)` otherwise.
    pub fn to_raw(self) -> i64 {
        match self {
            Position::Found(ordinal) => ordinal as i64,
            Position::Absent { insertion } => -(insertion as i64) - 1,
        }
    }

    pub fn found(self) -> Option<usize> {
        match self {
            Position::Found(ordinal) => Some(ordinal),
            Position::Absent { .. } => None,
        }
    }
}
