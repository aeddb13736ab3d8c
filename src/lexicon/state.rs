//! Per-operation file state.
//!
//! Every public lookup acquires a [`RawLdState`] from a [`StateProvider`],
//! wrapped in a [`StateGuard`] that hands it back on drop, so handles are
//! released on every exit path, including errors. The state owns the only
//! mutable things a lookup needs: the two file cursors and the memoized entry
//! count. Nothing is shared between concurrent lookups.

use std::fmt;
use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::ops::{Deref, DerefMut};

use log::{debug, trace};

use super::codec::index;
use super::types::error::{LexiconError, Result};
use super::types::models::{DataIndex, IndexLayout, ModuleDescriptor};

/// Open index and data files of one module.
#[derive(Debug)]
pub struct RawLdState {
    idx: File,
    dat: File,
    idx_len: u64,
    dat_len: u64,
    cardinality: Option<usize>,
}

impl RawLdState {
    /// Opens `<data_path>.idx` and `<data_path>.dat`.
    pub fn open(descriptor: &ModuleDescriptor) -> Result<Self> {
        let idx_path = descriptor.index_path();
        let dat_path = descriptor.data_file_path();
        debug!("Opening {} and {}", idx_path.display(), dat_path.display());
        let idx = File::open(&idx_path)?;
        let dat = File::open(&dat_path)?;
        let idx_len = idx.metadata()?.len();
        let dat_len = dat.metadata()?.len();
        Ok(Self {
            idx,
            dat,
            idx_len,
            dat_len,
            cardinality: None,
        })
    }

    /// Number of index records, computed once per state.
    pub fn cardinality(&mut self, layout: IndexLayout) -> usize {
        let idx_len = self.idx_len;
        *self
            .cardinality
            .get_or_insert_with(|| (idx_len / layout.entry_size() as u64) as usize)
    }

    pub fn read_index(&mut self, ordinal: usize, layout: IndexLayout) -> Result<DataIndex> {
        let cardinality = self.cardinality(layout);
        if ordinal >= cardinality {
            return Err(LexiconError::IndexOutOfRange { ordinal, cardinality });
        }
        index::read_record(&mut self.idx, ordinal, layout)
    }

    /// Reads the bytes an index record points at.
    ///
    /// A range that runs past the end of the data file is corruption, never a
    /// short read.
    pub fn read_data(&mut self, location: DataIndex) -> Result<Vec<u8>> {
        if location.end() > self.dat_len {
            return Err(LexiconError::CorruptStore(format!(
                "Record [{}..{}] is out of bounds for data file of {} bytes",
                location.offset,
                location.end(),
                self.dat_len
            )));
        }
        trace!("Reading {} bytes at offset {}", location.size, location.offset);
        self.dat.seek(SeekFrom::Start(location.offset as u64))?;
        let mut buf = vec![0u8; location.size as usize];
        self.dat.read_exact(&mut buf)?;
        Ok(buf)
    }
}

/// Supplies open file state for a module.
///
/// Implementations may pool states; [`release`](StateProvider::release) is
/// called exactly once for every successful [`acquire`](StateProvider::acquire).
pub trait StateProvider: Send + Sync + fmt::Debug {
    fn acquire(&self, descriptor: &ModuleDescriptor) -> Result<RawLdState>;

    fn release(&self, state: RawLdState) {
        drop(state);
    }
}

/// Opens fresh file handles for every acquisition and closes them on release.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectStateProvider;

impl StateProvider for DirectStateProvider {
    fn acquire(&self, descriptor: &ModuleDescriptor) -> Result<RawLdState> {
        RawLdState::open(descriptor)
    }
}

/// Scoped ownership of a [`RawLdState`]; returns it to its provider on drop.
pub struct StateGuard<'a> {
    provider: &'a dyn StateProvider,
    state: Option<RawLdState>,
}

impl<'a> StateGuard<'a> {
    pub fn acquire(provider: &'a dyn StateProvider, descriptor: &ModuleDescriptor) -> Result<Self> {
        let state = provider.acquire(descriptor)?;
        Ok(Self {
            provider,
            state: Some(state),
        })
    }
}

impl Deref for StateGuard<'_> {
    type Target = RawLdState;

    fn deref(&self) -> &RawLdState {
        self.state.as_ref().expect("state is present until drop")
    }
}

impl DerefMut for StateGuard<'_> {
    fn deref_mut(&mut self) -> &mut RawLdState {
        self.state.as_mut().expect("state is present until drop")
    }
}

impl Drop for StateGuard<'_> {
    fn drop(&mut self) {
        if let Some(state) = self.state.take() {
            self.provider.release(state);
        }
    }
}
