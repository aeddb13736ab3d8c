//! # Data Entry Parsing
//!
//! A record in the data file is laid out as:
//!
//! ```text
//! <stored key> '\n' <body>
//! ```
//!
//! The stored key may end in `\r\n`. A body beginning with `@LINK` is an
//! indirection: the real content lives under the key that follows the marker.
//! Bodies of enciphered modules are deciphered before decoding; the stored key
//! and the link marker are always plain.

use encoding_rs::Encoding;

use crate::lexicon::codec::crypto;

const LINK_MARKER: &[u8] = b"@LINK";

/// Raw bytes of one record together with the key it was looked up by.
///
/// Transient: built for one retrieval call and dropped afterwards.
#[derive(Debug, Clone)]
pub struct DataEntry {
    name: String,
    data: Vec<u8>,
    encoding: &'static Encoding,
    /// Position of the `\n` ending the stored key, or `None` for a key-only record.
    key_end: Option<usize>,
}

impl DataEntry {
    pub fn new(name: impl Into<String>, data: Vec<u8>, encoding: &'static Encoding) -> Self {
        let key_end = data.iter().position(|&b| b == b'\n');
        Self {
            name: name.into(),
            data,
            encoding,
            key_end,
        }
    }

    /// The key this entry was requested by.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// The key stored at the head of the record (internal form).
    pub fn key(&self) -> String {
        let end = self.key_end.unwrap_or(self.data.len());
        decode(&self.data[..end], self.encoding)
    }

    fn body_start(&self) -> usize {
        self.key_end.map_or(self.data.len(), |end| end + 1)
    }

    fn body(&self) -> &[u8] {
        &self.data[self.body_start()..]
    }

    pub fn is_link_entry(&self) -> bool {
        self.body().starts_with(LINK_MARKER)
    }

    /// Target key of a link entry, `None` for ordinary entries.
    pub fn link_target(&self) -> Option<String> {
        let rest = self.body().strip_prefix(LINK_MARKER)?;
        let end = rest
            .iter()
            .position(|&b| b == b'\n' || b == b'\r')
            .unwrap_or(rest.len());
        Some(decode(&rest[..end], self.encoding))
    }

    /// Decodes the body, deciphering it first when a cipher key is given.
    pub fn raw_text(&self, cipher_key: Option<&[u8]>) -> String {
        match cipher_key {
            Some(key) if !key.is_empty() => {
                let mut body = self.body().to_vec();
                crypto::decipher_in_place(&mut body, key);
                decode(&body, self.encoding)
            }
            _ => decode(self.body(), self.encoding),
        }
    }
}

fn decode(bytes: &[u8], encoding: &'static Encoding) -> String {
    let (text, _, _) = encoding.decode(bytes);
    text.trim_matches(|c: char| c == '\0' || c.is_whitespace()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::{UTF_8, WINDOWS_1252};

    #[test]
    fn splits_key_and_body() {
        let entry = DataEntry::new("g25", b"G0025\r\nto love\n".to_vec(), UTF_8);
        assert_eq!(entry.key(), "G0025");
        assert_eq!(entry.raw_text(None), "to love");
        assert!(!entry.is_link_entry());
        assert_eq!(entry.link_target(), None);
        assert_eq!(entry.name(), "g25");
    }

    #[test]
    fn detects_link_entries() {
        let entry = DataEntry::new("colour", b"COLOUR\n@LINK COLOR\r\n".to_vec(), UTF_8);
        assert!(entry.is_link_entry());
        assert_eq!(entry.link_target().as_deref(), Some("COLOR"));
    }

    #[test]
    fn key_only_record_has_empty_body() {
        let entry = DataEntry::new("x", b"LONELY".to_vec(), UTF_8);
        assert_eq!(entry.key(), "LONELY");
        assert_eq!(entry.raw_text(None), "");
        assert!(!entry.is_link_entry());
    }

    #[test]
    fn decodes_with_module_charset() {
        let entry = DataEntry::new("x", b"CAF\xc9\ncr\xe8me".to_vec(), WINDOWS_1252);
        assert_eq!(entry.key(), "CAFÉ");
        assert_eq!(entry.raw_text(None), "crème");
    }

    #[test]
    fn deciphers_body_only() {
        let mut body = b"hidden text".to_vec();
        crypto::encipher_in_place(&mut body, b"k3y");
        let mut data = b"WORD\n".to_vec();
        data.extend_from_slice(&body);
        let entry = DataEntry::new("word", data, UTF_8);
        assert_eq!(entry.key(), "WORD");
        assert_eq!(entry.raw_text(Some(b"k3y")), "hidden text");
    }
}
