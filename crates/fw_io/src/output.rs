//! Output writing (fw_io)
//! - Explicit path: temp file in the destination directory + fsync + rename;
//!   fsync(dir) on Unix. If the rename fails (e.g., cross-device), write the
//!   target directly instead.
//! - No path: a uniquely named file in the system temp directory that is
//!   kept after the process exits, so a viewer can open it later.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};
use tracing::info;

use crate::{IoError, IoResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputTarget {
    Path(PathBuf),
    /// e.g. prefix `QsTabled`, suffix `.html`.
    Temp { prefix: String, suffix: String },
}

impl OutputTarget {
    pub fn temp(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        OutputTarget::Temp { prefix: prefix.into(), suffix: suffix.into() }
    }
}

/// Write `contents` to the target and return the final path.
pub fn write_output(target: &OutputTarget, contents: &str) -> IoResult<PathBuf> {
    let path = match target {
        OutputTarget::Path(p) => {
            write_atomic(p, contents.as_bytes())?;
            p.clone()
        }
        OutputTarget::Temp { prefix, suffix } => write_kept_temp(prefix, suffix, contents.as_bytes())?,
    };
    info!(path = %path.display(), bytes = contents.len(), "wrote output");
    Ok(path)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> IoResult<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent)
        .map_err(|e| IoError::Path(format!("create {}: {e}", parent.display())))?;

    let mut tmp = NamedTempFile::new_in(&parent)
        .map_err(|e| IoError::Path(format!("temp file in {}: {e}", parent.display())))?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    match tmp.persist(path) {
        Ok(_) => {
            let _ = fsync_dir(&parent);
            Ok(())
        }
        Err(persist_err) => {
            // Fallback: write directly; the temp file is removed when dropped.
            drop(persist_err.file);
            let mut f = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(path)
                .map_err(|e| IoError::Path(format!("write {}: {e}", path.display())))?;
            f.write_all(bytes)?;
            f.sync_all()?;
            let _ = fsync_dir(&parent);
            Ok(())
        }
    }
}

fn write_kept_temp(prefix: &str, suffix: &str, bytes: &[u8]) -> IoResult<PathBuf> {
    let mut tmp = Builder::new()
        .prefix(prefix)
        .suffix(suffix)
        .tempfile()
        .map_err(|e| IoError::Path(format!("temp file: {e}")))?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    let (_file, path) = tmp.keep().map_err(|e| IoError::Path(format!("keep temp file: {e}")))?;
    Ok(path)
}

#[cfg(unix)]
fn fsync_dir(dir: &Path) -> std::io::Result<()> {
    let df = OpenOptions::new().read(true).open(dir)?;
    df.sync_all()
}

#[cfg(not(unix))]
#[inline]
fn fsync_dir(_dir: &Path) -> std::io::Result<()> {
    Ok(())
}
