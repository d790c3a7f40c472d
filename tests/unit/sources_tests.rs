//! Tests for the source-list file store.

#![allow(clippy::expect_used)]

use provis_cli::application::ports::SourceListStore;
use provis_cli::infra::sources::{FsSourceList, probe_source_list};

const LINE: &str = "deb https://www.deb-multimedia.org jessie main non-free";

#[test]
fn test_append_creates_file_with_terminated_line() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("sources.list");

    FsSourceList.append_line(&file, LINE).expect("append");

    let content = std::fs::read_to_string(&file).expect("read");
    assert_eq!(content, format!("{LINE}\n"));
}

#[test]
fn test_contains_line_after_append() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("sources.list");

    assert!(!FsSourceList.contains_line(&file, LINE).expect("probe"));
    FsSourceList.append_line(&file, LINE).expect("append");
    assert!(FsSourceList.contains_line(&file, LINE).expect("probe"));
}

#[test]
fn test_contains_line_ignores_surrounding_whitespace() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("sources.list");
    std::fs::write(&file, format!("  {LINE}  \n")).expect("write");

    assert!(FsSourceList.contains_line(&file, LINE).expect("probe"));
}

#[test]
fn test_contains_line_missing_file_is_false() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("missing.list");
    assert!(!FsSourceList.contains_line(&file, LINE).expect("probe"));
}

#[test]
fn test_append_repairs_missing_trailing_newline() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("sources.list");
    std::fs::write(&file, "deb http://existing main").expect("write");

    FsSourceList.append_line(&file, LINE).expect("append");

    let content = std::fs::read_to_string(&file).expect("read");
    assert_eq!(content, format!("deb http://existing main\n{LINE}\n"));
    // The existing entry is still its own line.
    assert!(FsSourceList.contains_line(&file, "deb http://existing main").expect("probe"));
}

#[test]
fn test_append_preserves_existing_entries() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("sources.list");
    std::fs::write(&file, "deb http://a main\ndeb http://b main\n").expect("write");

    FsSourceList.append_line(&file, LINE).expect("append");

    let content = std::fs::read_to_string(&file).expect("read");
    assert_eq!(content.lines().count(), 3);
    assert!(content.ends_with(&format!("{LINE}\n")));
}

#[test]
fn test_probe_source_list_existing_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("sources.list");
    std::fs::write(&file, "deb http://a main\n").expect("write");

    let checks = probe_source_list(&file);
    assert!(checks.exists);
    assert!(checks.writable);
    assert_eq!(checks.path, file.display().to_string());
}

#[test]
fn test_probe_source_list_absent_file_in_writable_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let file = dir.path().join("sources.list");

    let checks = probe_source_list(&file);
    assert!(!checks.exists);
    assert!(checks.writable);
}
