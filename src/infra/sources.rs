//! Source-list file store: trimmed-line containment and append.

use std::io::Write;
use std::path::Path;

use crate::application::ports::SourceListStore;
use crate::domain::error::StepError;
use crate::domain::health::SourceListChecks;

/// Plain-filesystem implementation of `SourceListStore`.
pub struct FsSourceList;

impl SourceListStore for FsSourceList {
    fn contains_line(&self, file: &Path, line: &str) -> Result<bool, StepError> {
        let content = match std::fs::read_to_string(file) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(fs_error(file, e)),
        };
        let wanted = line.trim();
        Ok(content.lines().any(|l| l.trim() == wanted))
    }

    fn append_line(&self, file: &Path, line: &str) -> Result<(), StepError> {
        // If the file exists without a trailing newline, a bare append would
        // glue our entry onto its last line.
        let needs_leading_newline = match std::fs::read_to_string(file) {
            Ok(c) => !c.is_empty() && !c.ends_with('\n'),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
            Err(e) => return Err(fs_error(file, e)),
        };

        let mut handle = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
            .map_err(|e| fs_error(file, e))?;
        if needs_leading_newline {
            writeln!(handle).map_err(|e| fs_error(file, e))?;
        }
        writeln!(handle, "{}", line.trim_end()).map_err(|e| fs_error(file, e))?;
        Ok(())
    }
}

/// Probe the source list for the doctor command: existence, and whether an
/// append handle can be opened (no bytes are written).
#[must_use]
pub fn probe_source_list(file: &Path) -> SourceListChecks {
    let exists = file.is_file();
    let writable = if exists {
        std::fs::OpenOptions::new().append(true).open(file).is_ok()
    } else {
        // Absent file: an append would create it, so probe the directory.
        file.parent().is_some_and(|dir| {
            !dir.as_os_str().is_empty()
                && std::fs::metadata(dir).map(|m| !m.permissions().readonly()).unwrap_or(false)
        })
    };
    SourceListChecks {
        path: file.display().to_string(),
        exists,
        writable,
    }
}

fn fs_error(path: &Path, source: std::io::Error) -> StepError {
    StepError::Filesystem {
        path: path.to_path_buf(),
        source,
    }
}
