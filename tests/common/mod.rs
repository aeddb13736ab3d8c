#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use lexicon_reader::lexicon::codec::crypto;
use lexicon_reader::ModuleDescriptor;
use tempfile::TempDir;

/// A module written to a temporary directory; removed on drop.
pub struct ModuleFixture {
    _dir: TempDir,
    pub prefix: PathBuf,
}

impl ModuleFixture {
    pub fn descriptor(&self, initials: &str) -> ModuleDescriptor {
        ModuleDescriptor::new(initials, &self.prefix)
    }
}

/// Writes `records` in order, each addressed by one index record.
pub fn build(datasize: usize, records: &[Vec<u8>]) -> ModuleFixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let prefix = dir.path().join("module");

    let mut idx = Vec::new();
    let mut dat = Vec::new();
    for record in records {
        idx.extend_from_slice(&(dat.len() as u32).to_le_bytes());
        match datasize {
            2 => idx.extend_from_slice(&(record.len() as u16).to_le_bytes()),
            _ => idx.extend_from_slice(&(record.len() as u32).to_le_bytes()),
        }
        dat.extend_from_slice(record);
    }
    fs::write(dir.path().join("module.idx"), idx).expect("write idx");
    fs::write(dir.path().join("module.dat"), dat).expect("write dat");

    ModuleFixture { _dir: dir, prefix }
}

/// Writes raw index and data bytes verbatim.
pub fn build_raw(idx: &[u8], dat: &[u8]) -> ModuleFixture {
    let dir = tempfile::tempdir().expect("tempdir");
    let prefix = dir.path().join("module");
    fs::write(dir.path().join("module.idx"), idx).expect("write idx");
    fs::write(dir.path().join("module.dat"), dat).expect("write dat");
    ModuleFixture { _dir: dir, prefix }
}

pub fn entry(key: &str, body: &str) -> Vec<u8> {
    format!("{key}\r\n{body}\n").into_bytes()
}

pub fn link(key: &str, target: &str) -> Vec<u8> {
    format!("{key}\n@LINK {target}\n").into_bytes()
}

pub fn enciphered(key: &str, body: &str, cipher_key: &[u8]) -> Vec<u8> {
    let mut body = body.as_bytes().to_vec();
    crypto::encipher_in_place(&mut body, cipher_key);
    let mut record = format!("{key}\n").into_bytes();
    record.extend_from_slice(&body);
    record
}

/// A small dictionary with an out-of-order title record at ordinal 0.
pub fn dictionary() -> Vec<Vec<u8>> {
    vec![
        entry("MODULE INFO", "Easton's Bible Dictionary"),
        entry("AARON", "The eldest son of Amram and Jochebed."),
        entry("ABEL", "A keeper of sheep."),
        entry("ABRAHAM", "Father of a multitude."),
        link("ABRAM", "ABRAHAM"),
        entry("BETHEL", "House of God."),
        link("JACOB'S LADDER", "BETHEL"),
        entry("MOSES", "Drawn out."),
        entry("ZION", "A hill of Jerusalem."),
    ]
}
