//! Writing a rendered report to a file (§6 "Persisted state").
//!
//! Report files are written atomically (write-temp-then-rename) with mode
//! `0600`, reusing [`repoauditor_utils::atomic_write`] rather than a bare
//! `std::fs::write`.

use camino::Utf8Path;
use repoauditor_utils::atomic_write::{write_file_atomic, AtomicWriteResult};

/// Write `content` to `path` atomically.
///
/// # Errors
/// Propagates any I/O failure from creating the parent directory, writing
/// the temp file, or renaming it into place.
pub fn write_report(path: &Utf8Path, content: &str) -> anyhow::Result<AtomicWriteResult> {
    write_file_atomic(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    #[test]
    fn writes_report_contents_to_disk() {
        let dir = TempDir::new().expect("tempdir");
        let path = Utf8PathBuf::from_path_buf(dir.path().join("report.txt")).expect("utf8 path");
        write_report(&path, "hello\n").expect("write succeeds");
        assert_eq!(std::fs::read_to_string(path.as_std_path()).expect("read back"), "hello\n");
    }
}
