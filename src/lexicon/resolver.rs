//! Entry resolution: from a key or ordinal to decoded record text.
//!
//! An [`EntryResolver`] borrows one acquired [`RawLdState`] for the duration
//! of a single public operation. It loads records, follows `@LINK`
//! indirections by searching the index again, and deciphers/decodes bodies.

use std::collections::HashSet;
use std::fmt;

use log::{debug, trace};

use super::codec::crypto;
use super::format::entry::DataEntry;
use super::keys::KeyScheme;
use super::search::{self, SortedKeys};
use super::state::RawLdState;
use super::types::error::{LexiconError, Result};
use super::types::models::{IndexLayout, ModuleDescriptor, Position};

/// Default bound on the number of link hops per lookup.
pub const DEFAULT_MAX_LINK_DEPTH: usize = 8;

/// Hook applied to every loaded entry before links are examined.
///
/// Compressed lexicon formats use it to swap an entry that only points into a
/// compressed block for the decompressed entry.
pub trait EntryTransform: Send + Sync + fmt::Debug {
    fn transform(&self, entry: DataEntry) -> Result<DataEntry>;
}

/// Leaves entries untouched; raw modules store record text directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct Passthrough;

impl EntryTransform for Passthrough {
    fn transform(&self, entry: DataEntry) -> Result<DataEntry> {
        Ok(entry)
    }
}

/// Everything about a module that stays fixed while it is open.
#[derive(Debug)]
pub struct ModuleContext {
    pub descriptor: ModuleDescriptor,
    pub layout: IndexLayout,
    pub scheme: KeyScheme,
    /// Cipher key already encoded in the module charset.
    pub cipher_key: Option<Vec<u8>>,
    pub transform: Box<dyn EntryTransform>,
    pub max_link_depth: usize,
}

impl ModuleContext {
    pub fn new(descriptor: ModuleDescriptor, layout: IndexLayout) -> Self {
        let scheme = KeyScheme::for_module(&descriptor);
        let cipher_key = descriptor.cipher_key.as_deref().map(|key| {
            debug!("Module {} is enciphered", descriptor.initials);
            crypto::cipher_key_bytes(key, descriptor.encoding)
        });
        Self {
            descriptor,
            layout,
            scheme,
            cipher_key,
            transform: Box::new(Passthrough),
            max_link_depth: DEFAULT_MAX_LINK_DEPTH,
        }
    }
}

pub struct EntryResolver<'a> {
    state: &'a mut RawLdState,
    ctx: &'a ModuleContext,
    /// Stored key of the representative non-intro record, read on first use.
    sample: Option<Option<String>>,
}

impl<'a> EntryResolver<'a> {
    pub fn new(state: &'a mut RawLdState, ctx: &'a ModuleContext) -> Self {
        Self {
            state,
            ctx,
            sample: None,
        }
    }

    pub fn cardinality(&mut self) -> usize {
        self.state.cardinality(self.ctx.layout)
    }

    /// Loads the record at `ordinal`, tagged with the key it was requested by.
    pub fn load(&mut self, name: &str, ordinal: usize) -> Result<DataEntry> {
        let location = self.state.read_index(ordinal, self.ctx.layout)?;
        let data = self.state.read_data(location)?;
        Ok(DataEntry::new(name, data, self.ctx.descriptor.encoding))
    }

    /// The stored key of ordinal 1 (or 0 for a single-record module), used to
    /// learn how Strong's numbers are padded.
    fn sample_key(&mut self) -> Result<Option<String>> {
        if let Some(sample) = &self.sample {
            return Ok(sample.clone());
        }
        let sample = match self.cardinality() {
            0 => None,
            1 => Some(self.load("", 0)?.key()),
            _ => Some(self.load("", 1)?.key()),
        };
        trace!("Sample key: {:?}", sample);
        self.sample = Some(sample.clone());
        Ok(sample)
    }

    /// Normalizes an external key and searches the index for it.
    pub fn locate(&mut self, external: &str) -> Result<Position> {
        let sample = if self.ctx.scheme.needs_sample() {
            self.sample_key()?
        } else {
            None
        };
        let target = self.ctx.scheme.search_key(external, sample.as_deref())?;
        let position = search::search(self, &target)?;
        debug!("Located {:?} as {:?}: {:?}", external, target, position);
        Ok(position)
    }

    /// Applies the entry transform and follows link entries to real content.
    ///
    /// A chain that revisits a target or exceeds the depth bound is treated as
    /// a corrupt store. A link to a missing key reports that key as not found.
    pub fn resolve(&mut self, entry: DataEntry) -> Result<DataEntry> {
        let mut entry = self.ctx.transform.transform(entry)?;
        let mut visited = HashSet::new();
        while let Some(target) = entry.link_target() {
            if visited.len() >= self.ctx.max_link_depth {
                return Err(LexiconError::CorruptStore(format!(
                    "Link chain from {:?} exceeds {} hops",
                    entry.name(),
                    self.ctx.max_link_depth
                )));
            }
            if !visited.insert(target.clone()) {
                return Err(LexiconError::CorruptStore(format!(
                    "Circular link to {:?}",
                    target
                )));
            }
            debug!("Following link {:?} -> {:?}", entry.key(), target);
            let ordinal = self
                .locate(&target)?
                .found()
                .ok_or_else(|| LexiconError::KeyNotFound(target.clone()))?;
            let next = self.load(&target, ordinal)?;
            entry = self.ctx.transform.transform(next)?;
        }
        Ok(entry)
    }

    pub fn render_text(&self, entry: &DataEntry) -> String {
        entry.raw_text(self.ctx.cipher_key.as_deref())
    }

    /// Full lookup: normalize, search, load, follow links, decode.
    pub fn get_raw_content(&mut self, external: &str) -> Result<String> {
        let ordinal = self
            .locate(external)?
            .found()
            .ok_or_else(|| LexiconError::KeyNotFound(external.to_string()))?;
        let entry = self.load(external, ordinal)?;
        let entry = self.resolve(entry)?;
        Ok(self.render_text(&entry))
    }
}

impl SortedKeys for EntryResolver<'_> {
    fn key_count(&mut self) -> usize {
        self.cardinality()
    }

    fn search_key_at(&mut self, ordinal: usize) -> Result<String> {
        let key = self.load("", ordinal)?.key();
        Ok(self.ctx.scheme.normalize_for_search(&key))
    }
}
