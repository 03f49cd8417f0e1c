//! Custom assertions for batch download tests

use publit_production::{BatchReport, Error, FileId};
use std::path::Path;

/// Assert `dir/name` exists and holds exactly `expected`
pub fn assert_file_contents(dir: &Path, name: &str, expected: &[u8]) {
    let target = dir.join(name);
    let actual = std::fs::read(&target)
        .unwrap_or_else(|e| panic!("Expected {} to exist: {}", target.display(), e));
    assert_eq!(
        actual,
        expected,
        "Content mismatch for {}",
        target.display()
    );
}

/// Assert `dir` contains no entries
pub fn assert_dir_empty(dir: &Path) {
    let entries: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert!(entries.is_empty(), "Expected empty dir, found {:?}", entries);
}

/// Assert the report covers exactly `ids`, all of them successful
pub fn assert_all_succeeded(report: &BatchReport, ids: &[i64]) {
    assert_eq!(report.len(), ids.len(), "Report size mismatch: {:?}", report);
    for id in ids {
        match report.get(FileId(*id)) {
            Some(Ok(())) => {}
            other => panic!("Expected success for file {}, got {:?}", id, other),
        }
    }
}

/// Assert the error recorded for `id` is a batch abort
pub fn assert_aborted(report: &BatchReport, id: i64) {
    match report.error(FileId(id)) {
        Some(Error::BatchAborted { .. }) => {}
        other => panic!("Expected BatchAborted for file {}, got {:?}", id, other),
    }
}
