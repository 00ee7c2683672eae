use super::*;
use index::{Bracket, IndexEntry, LookupError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

// -------------------- Helpers --------------------

fn bracket(lo: (u32, u32), hi: (u32, u32)) -> Bracket {
    Bracket {
        lower: IndexEntry::new(lo.0, lo.1),
        upper: IndexEntry::new(hi.0, hi.1),
    }
}

/// A segment whose byte at position `i` is `i % 251`, so any slice can be
/// checked against its expected contents.
fn write_segment(dir: &Path, len: usize) -> PathBuf {
    let path = dir.join("00000000000000000000.log");
    let data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
    fs::write(&path, data).unwrap();
    path
}

// -------------------- Naming --------------------

#[test]
fn data_path_swaps_suffix_and_keeps_directory() {
    let naming = SegmentNaming::default();
    let p = naming
        .data_path_for(Path::new("/tmp/kafka-logs-0/orders-0/00000000000000000000.index"))
        .unwrap();
    assert_eq!(p, PathBuf::from("/tmp/kafka-logs-0/orders-0/00000000000000000000.log"));
}

#[test]
fn suffix_swap_round_trips() {
    let naming = SegmentNaming::default();
    for name in ["a/b/00000000000000000042.index", "x.y.index", "rel.index"] {
        let index = PathBuf::from(name);
        let data = naming.data_path_for(&index).unwrap();
        assert_eq!(naming.index_path_for(&data).unwrap(), index);
    }
    let data = PathBuf::from("/d/00000000000000000100.log");
    let index = naming.index_path_for(&data).unwrap();
    assert_eq!(naming.data_path_for(&index).unwrap(), data);
}

#[test]
fn missing_suffix_is_invalid_path() {
    let naming = SegmentNaming::default();
    for bad in ["/d/00000000000000000000.timeindex.x", "/d/segment", "/d/.index", "/"] {
        let err = naming.data_path_for(Path::new(bad)).unwrap_err();
        assert!(matches!(err, LookupError::InvalidPath(_)), "{bad}: {err:?}");
    }
    assert!(matches!(
        naming.index_path_for(Path::new("/d/00000000000000000000.index")),
        Err(LookupError::InvalidPath(_))
    ));
}

#[test]
fn timeindex_is_not_an_index() {
    let naming = SegmentNaming::default();
    assert!(!naming.is_index(Path::new("/d/00000000000000000000.timeindex")));
    assert!(naming.is_index(Path::new("/d/00000000000000000000.index")));
    assert!(naming.is_data(Path::new("/d/00000000000000000000.log")));
}

#[test]
fn has_suffix_needs_a_stem() {
    assert!(has_suffix(Path::new("/x/00000000000000000000.index"), ".index"));
    assert!(!has_suffix(Path::new("/x/.index"), ".index"));
    assert!(!has_suffix(Path::new("/x/00000000000000000000.timeindex"), ".log"));
}

#[test]
fn custom_suffixes() {
    let naming = SegmentNaming::new(".idx", ".seg");
    let p = naming.data_path_for(Path::new("d/7.idx")).unwrap();
    assert_eq!(p, PathBuf::from("d/7.seg"));
}

#[test]
fn base_offset_parses_zero_padded_stem() {
    let naming = SegmentNaming::default();
    assert_eq!(naming.base_offset(Path::new("/d/00000000000000368769.log")), Some(368_769));
    assert_eq!(naming.base_offset(Path::new("/d/00000000000000000000.index")), Some(0));
    assert_eq!(naming.base_offset(Path::new("/d/leader-epoch-checkpoint")), None);
}

#[test]
fn partition_dir_names() {
    assert_eq!(partition_of(Path::new("/r/orders-3")), Some(("orders".to_string(), 3)));
    assert_eq!(
        partition_of(Path::new("/r/my-topic-12")),
        Some(("my-topic".to_string(), 12))
    );
    assert_eq!(partition_of(Path::new("/r/orders")), None);
    assert_eq!(partition_of(Path::new("/r/orders-x")), None);
    assert_eq!(partition_of(Path::new("/r/-1")), None);
}

// -------------------- Window extraction --------------------

#[test]
fn extracts_exact_window() {
    let dir = tempdir().unwrap();
    let seg = write_segment(dir.path(), 200);

    let w = extract_window(&seg, &bracket((100, 50), (250, 120))).unwrap();
    assert_eq!(w.len(), 70);
    assert_eq!(w.start(), 50);
    assert_eq!(w.end(), 120);
    let expected: Vec<u8> = (50..120).map(|i| (i % 251) as u8).collect();
    assert_eq!(w.bytes(), expected.as_slice());
    assert_eq!(w.segment(), seg.as_path());
}

#[test]
fn window_ending_at_eof_is_complete() {
    let dir = tempdir().unwrap();
    let seg = write_segment(dir.path(), 120);
    let w = extract_window(&seg, &bracket((0, 0), (9, 120))).unwrap();
    assert_eq!(w.len(), 120);
}

#[test]
fn empty_window_is_allowed() {
    let dir = tempdir().unwrap();
    let seg = write_segment(dir.path(), 10);
    let w = extract_window(&seg, &bracket((1, 5), (2, 5))).unwrap();
    assert!(w.is_empty());
}

#[test]
fn truncated_segment_is_short_read() {
    let dir = tempdir().unwrap();
    let seg = write_segment(dir.path(), 100);
    let err = extract_window(&seg, &bracket((100, 50), (250, 120))).unwrap_err();
    assert!(matches!(
        err,
        LookupError::ShortRead {
            expected: 70,
            actual: 50
        }
    ));
}

#[test]
fn window_past_eof_is_short_read() {
    let dir = tempdir().unwrap();
    let seg = write_segment(dir.path(), 10);
    let err = extract_window(&seg, &bracket((1, 50), (2, 60))).unwrap_err();
    assert!(matches!(err, LookupError::ShortRead { expected: 10, actual: 0 }));
}

#[test]
fn huge_bracket_on_tiny_segment_is_short_read() {
    let dir = tempdir().unwrap();
    let seg = write_segment(dir.path(), 10);
    let err = extract_window(&seg, &bracket((0, 0), (1, u32::MAX))).unwrap_err();
    assert!(matches!(
        err,
        LookupError::ShortRead {
            expected: u32::MAX,
            actual: 10
        }
    ));
}

#[test]
fn backwards_bracket_is_corrupt_before_any_io() {
    // The segment does not exist: a read attempt would report NotFound.
    let err = extract_window(Path::new("/nonexistent/x.log"), &bracket((1, 100), (2, 80))).unwrap_err();
    assert!(matches!(err, LookupError::CorruptIndex { .. }));
}

#[test]
fn missing_segment_is_not_found() {
    let dir = tempdir().unwrap();
    let err = extract_window(&dir.path().join("gone.log"), &bracket((0, 0), (1, 4))).unwrap_err();
    assert!(matches!(err, LookupError::NotFound(_)));
}

// -------------------- Materialization --------------------

#[test]
fn materialized_window_keeps_name_and_is_removed_on_drop() {
    let dir = tempdir().unwrap();
    let seg = write_segment(dir.path(), 200);
    let w = extract_window(&seg, &bracket((100, 50), (250, 120))).unwrap();

    let tmp_root = tempdir().unwrap();
    let path = {
        let m = w.materialize(Some(tmp_root.path())).unwrap();
        assert_eq!(m.path().file_name().unwrap(), "00000000000000000000.log");
        assert_eq!(fs::read(m.path()).unwrap(), w.bytes());
        m.path().to_path_buf()
    };
    assert!(!path.exists());
    assert!(!path.parent().unwrap().exists());
}

#[test]
fn materialize_into_missing_root_fails() {
    let dir = tempdir().unwrap();
    let seg = write_segment(dir.path(), 20);
    let w = extract_window(&seg, &bracket((0, 0), (1, 10))).unwrap();
    let err = w.materialize(Some(&dir.path().join("no-such-dir"))).unwrap_err();
    assert!(matches!(err, LookupError::NotFound(_)));
}
