//! Index record codec.
//!
//! # Record Structure
//! ```text
//! [4 bytes]   Offset into the data file (little-endian u32)
//! [2|4 bytes] Record size (little-endian u16 or u32, fixed per module)
//! ```

use std::io::{Read, Seek, SeekFrom};

use byteorder::{ByteOrder, LittleEndian};
use log::trace;

use crate::lexicon::types::error::{LexiconError, Result};
use crate::lexicon::types::models::{DataIndex, IndexLayout, OFFSET_SIZE};

/// Decodes one index record from exactly `layout.entry_size()` bytes.
pub fn decode_record(buf: &[u8], layout: IndexLayout) -> Result<DataIndex> {
    if buf.len() < layout.entry_size() {
        return Err(LexiconError::CorruptStore(format!(
            "Index record truncated: {} of {} bytes",
            buf.len(),
            layout.entry_size()
        )));
    }
    let offset = LittleEndian::read_u32(&buf[..OFFSET_SIZE]);
    let size = match layout.data_size() {
        2 => LittleEndian::read_u16(&buf[OFFSET_SIZE..]) as u32,
        _ => LittleEndian::read_u32(&buf[OFFSET_SIZE..]),
    };
    Ok(DataIndex { offset, size })
}

/// Reads and decodes the index record at `ordinal`.
pub fn read_record<R: Read + Seek>(
    idx: &mut R,
    ordinal: usize,
    layout: IndexLayout,
) -> Result<DataIndex> {
    let entry_size = layout.entry_size();
    idx.seek(SeekFrom::Start((ordinal * entry_size) as u64))?;
    let mut buf = [0u8; 8];
    idx.read_exact(&mut buf[..entry_size])?;
    let record = decode_record(&buf[..entry_size], layout)?;
    trace!("Index record {}: offset={}, size={}", ordinal, record.offset, record.size);
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn decodes_short_size_field() {
        let layout = IndexLayout::new(2).unwrap();
        let rec = decode_record(&[0x10, 0x02, 0, 0, 0x34, 0x12], layout).unwrap();
        assert_eq!(rec, DataIndex { offset: 0x0210, size: 0x1234 });
    }

    #[test]
    fn decodes_long_size_field() {
        let layout = IndexLayout::new(4).unwrap();
        let rec = decode_record(&[1, 0, 0, 0x80, 0x78, 0x56, 0x34, 0x12], layout).unwrap();
        assert_eq!(rec, DataIndex { offset: 0x8000_0001, size: 0x1234_5678 });
        assert_eq!(rec.end(), 0x8000_0001u64 + 0x1234_5678u64);
    }

    #[test]
    fn truncated_record_is_corrupt() {
        let layout = IndexLayout::new(4).unwrap();
        assert!(matches!(
            decode_record(&[0, 0, 0, 0, 1, 0], layout),
            Err(LexiconError::CorruptStore(_))
        ));
    }

    #[test]
    fn reads_record_at_ordinal() {
        let layout = IndexLayout::new(2).unwrap();
        let bytes = vec![0, 0, 0, 0, 5, 0, 5, 0, 0, 0, 9, 0];
        let mut cursor = Cursor::new(bytes);
        let rec = read_record(&mut cursor, 1, layout).unwrap();
        assert_eq!(rec, DataIndex { offset: 5, size: 9 });
    }
}
