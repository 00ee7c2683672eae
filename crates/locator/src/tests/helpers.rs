use index::{IndexEntry, IndexWriter};
use std::fs;
use std::path::{Path, PathBuf};

pub fn e(offset: u32, position: u32) -> IndexEntry {
    IndexEntry::new(offset, position)
}

/// Writes a segment pair named after `base_offset` into `dir`.
///
/// The data file is `data_len` bytes where byte `i` is `i % 251`.
pub fn write_pair(dir: &Path, base_offset: u64, entries: &[IndexEntry], data_len: usize) -> (PathBuf, PathBuf) {
    fs::create_dir_all(dir).unwrap();
    let index = dir.join(format!("{base_offset:020}.index"));
    let data = dir.join(format!("{base_offset:020}.log"));
    IndexWriter::write(&index, entries, 0).unwrap();
    let bytes: Vec<u8> = (0..data_len).map(|i| (i % 251) as u8).collect();
    fs::write(&data, bytes).unwrap();
    (index, data)
}

pub fn sample_entries() -> Vec<IndexEntry> {
    vec![e(0, 0), e(100, 50), e(250, 120)]
}
