use crate::{IndexEntry, IndexEntryReader, IndexWriter};
use std::io::Cursor;

pub fn e(offset: u32, position: u32) -> IndexEntry {
    IndexEntry::new(offset, position)
}

/// The index used throughout the bracket tests: three checkpoints.
pub fn sample_entries() -> Vec<IndexEntry> {
    vec![e(0, 0), e(100, 50), e(250, 120)]
}

pub fn reader_over(entries: &[IndexEntry]) -> IndexEntryReader<Cursor<Vec<u8>>> {
    IndexEntryReader::from_reader(Cursor::new(IndexWriter::to_bytes(entries)))
}

pub fn reader_over_bytes(bytes: Vec<u8>) -> IndexEntryReader<Cursor<Vec<u8>>> {
    IndexEntryReader::from_reader(Cursor::new(bytes))
}
