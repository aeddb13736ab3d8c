use std::sync::Arc;

use log::{debug, info};

use super::resolver::{EntryResolver, EntryTransform, ModuleContext};
use super::state::{DirectStateProvider, StateGuard, StateProvider};
use super::types::error::{LexiconError, Result};
use super::types::models::{IndexLayout, Key, ModuleDescriptor};

/// Read-only access to a raw lexicon/dictionary module.
///
/// Holds only immutable module configuration. Every operation acquires its
/// own file state from the provider and releases it before returning, so one
/// backend can serve lookups from many threads at once.
#[derive(Debug)]
pub struct RawLdBackend {
    ctx: ModuleContext,
    provider: Arc<dyn StateProvider>,
}

impl RawLdBackend {
    /// Opens a module whose index records use a `datasize`-byte size field (2 or 4).
    ///
    /// # Errors
    /// Returns [`LexiconError::UnsupportedDataSize`] for any other width.
    pub fn new(descriptor: ModuleDescriptor, datasize: usize) -> Result<Self> {
        Self::with_provider(descriptor, datasize, Arc::new(DirectStateProvider))
    }

    /// Like [`new`](Self::new), acquiring file handles from `provider`.
    pub fn with_provider(
        descriptor: ModuleDescriptor,
        datasize: usize,
        provider: Arc<dyn StateProvider>,
    ) -> Result<Self> {
        let layout = IndexLayout::new(datasize)?;
        info!(
            "Opening raw lexicon {} ({}, {}-byte index records)",
            descriptor.initials,
            descriptor.encoding.name(),
            layout.entry_size()
        );
        Ok(Self {
            ctx: ModuleContext::new(descriptor, layout),
            provider,
        })
    }

    /// Bounds the number of `@LINK` hops followed per lookup.
    pub fn with_max_link_depth(mut self, depth: usize) -> Self {
        self.ctx.max_link_depth = depth;
        self
    }

    /// Installs a transform applied to every entry before links are followed.
    pub fn with_transform(mut self, transform: impl EntryTransform + 'static) -> Self {
        self.ctx.transform = Box::new(transform);
        self
    }

    pub fn descriptor(&self) -> &ModuleDescriptor {
        &self.ctx.descriptor
    }

    pub fn layout(&self) -> IndexLayout {
        self.ctx.layout
    }

    fn acquire(&self) -> Result<StateGuard<'_>> {
        StateGuard::acquire(self.provider.as_ref(), &self.ctx.descriptor)
    }

    /// Returns the decoded text stored under `key`, following links.
    ///
    /// # Errors
    /// - [`LexiconError::KeyNotFound`] carrying `key` when it is absent
    /// - [`LexiconError::InvalidKeyFormat`] when `key` cannot be parsed for this category
    /// - [`LexiconError::CorruptStore`] for out-of-bounds records or runaway link chains
    pub fn get_raw_content(&self, key: &str) -> Result<String> {
        debug!("Reading {:?} from {}", key, self.ctx.descriptor.initials);
        let mut state = self.acquire()?;
        let mut resolver = EntryResolver::new(&mut state, &self.ctx);
        resolver.get_raw_content(key)
    }

    /// [`get_raw_content`](Self::get_raw_content) for a key returned by [`get`](Self::get).
    pub fn read_raw_content(&self, key: &Key) -> Result<String> {
        self.get_raw_content(key.name())
    }

    /// Number of records in the index.
    pub fn cardinality(&self) -> Result<usize> {
        let mut state = self.acquire()?;
        Ok(state.cardinality(self.ctx.layout))
    }

    /// The external key of the record at `ordinal`.
    ///
    /// # Errors
    /// [`LexiconError::IndexOutOfRange`] when `ordinal >= cardinality()`.
    pub fn get(&self, ordinal: usize) -> Result<Key> {
        let mut state = self.acquire()?;
        let mut resolver = EntryResolver::new(&mut state, &self.ctx);
        let cardinality = resolver.cardinality();
        if ordinal >= cardinality {
            return Err(LexiconError::IndexOutOfRange { ordinal, cardinality });
        }
        let entry = resolver.load(&self.ctx.descriptor.initials, ordinal)?;
        Ok(Key::new(self.ctx.scheme.internal_to_external(&entry.key())))
    }

    /// Ordinal of `key`, or `-(insertion + 1)` when it is absent.
    ///
    /// A negative result is not an error; `-result - 1` is where the key would sort.
    pub fn index_of(&self, key: &str) -> Result<i64> {
        let mut state = self.acquire()?;
        let mut resolver = EntryResolver::new(&mut state, &self.ctx);
        let position = resolver.locate(key)?;
        Ok(position.to_raw())
    }
}
