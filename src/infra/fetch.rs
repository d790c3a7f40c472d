//! Artifact download adapter: curl through the command runner, with an
//! atomic rename so the destination never holds partial bytes.
//!
//! A transfer writes into a temporary file in the destination directory and
//! is renamed into place only after the (optional) digest verifies. The
//! presence probe therefore only ever sees complete artifacts.

use std::io::Read;
use std::path::Path;
use std::time::Duration;

use sha2::{Digest, Sha256};

use crate::application::ports::{ArtifactFetcher, CommandRunner};
use crate::domain::error::StepError;
use crate::infra::{ensure_success, invocation_error};

/// Downloads URLs with `curl`, verifying and atomically persisting results.
pub struct CurlFetcher<R: CommandRunner> {
    runner: R,
    attempt_timeout: Duration,
}

impl<R: CommandRunner> CurlFetcher<R> {
    pub fn new(runner: R, attempt_timeout: Duration) -> Self {
        Self {
            runner,
            attempt_timeout,
        }
    }
}

impl<R: CommandRunner> ArtifactFetcher for CurlFetcher<R> {
    async fn fetch(&self, url: &str, dest: &Path, sha256: Option<&str>) -> Result<(), StepError> {
        let dir = match dest.parent() {
            Some(d) if !d.as_os_str().is_empty() => d,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| fs_error(dir, e))?;

        let tmp = tempfile::Builder::new()
            .prefix(".provis-fetch-")
            .tempfile_in(dir)
            .map_err(|e| fs_error(dir, e))?;
        let tmp_path = tmp.path().to_string_lossy().to_string();

        let output = self
            .runner
            .run_with_timeout(
                "curl",
                &["-fsSL", "--output", tmp_path.as_str(), url],
                self.attempt_timeout,
            )
            .await
            .map_err(|e| invocation_error("curl", &e))?;
        ensure_success("curl", &output)?;

        if let Some(expected) = sha256 {
            let actual = sha256_file(tmp.path())?;
            if !actual.eq_ignore_ascii_case(expected) {
                return Err(StepError::TransientNetwork {
                    url: url.to_string(),
                    attempts: 1,
                    detail: format!("sha256 mismatch: expected {expected}, got {actual}"),
                });
            }
        }

        tmp.persist(dest).map_err(|e| fs_error(dest, e.error))?;
        Ok(())
    }

    fn is_present(&self, dest: &Path, sha256: Option<&str>) -> Result<bool, StepError> {
        if !dest.is_file() {
            return Ok(false);
        }
        match sha256 {
            // A mismatching digest counts as absent so the step re-fetches.
            Some(expected) => Ok(sha256_file(dest)?.eq_ignore_ascii_case(expected)),
            None => Ok(true),
        }
    }

    fn discard(&self, path: &Path) -> Result<(), StepError> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(fs_error(path, e)),
        }
    }
}

fn fs_error(path: &Path, source: std::io::Error) -> StepError {
    StepError::Filesystem {
        path: path.to_path_buf(),
        source,
    }
}

/// Compute the SHA-256 hex digest of a file.
///
/// Reads the file in 64 KB chunks to avoid loading large files into memory.
pub fn sha256_file(path: &Path) -> Result<String, StepError> {
    let mut file = std::fs::File::open(path).map_err(|e| fs_error(path, e))?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; 65536];
    loop {
        let n = file.read(&mut buf).map_err(|e| fs_error(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(hex_encode(&hasher.finalize()))
}

fn hex_encode(bytes: &[u8]) -> String {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    let mut out = String::with_capacity(bytes.len() * 2);
    for &b in bytes {
        out.push(char::from(HEX[(b >> 4) as usize]));
        out.push(char::from(HEX[(b & 0xf) as usize]));
    }
    out
}
