//! Atomic file operations for safe JSON persistence.
//!
//! Writes go through:
//! 1. Write to temp file with unique PID+TID suffix
//! 2. fsync to ensure data reaches disk
//! 3. Optional backup of the previous file
//! 4. Atomic rename to target path

use crate::{LarderError, Result};
use serde::{de::DeserializeOwned, Serialize};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::process;
use std::thread;
use tracing::{debug, warn};

/// Read and parse a JSON file.
///
/// Returns `None` if the file doesn't exist, or an error if reading or parsing fails.
pub fn atomic_read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|e| LarderError::Io {
        message: format!("Failed to read {}", path.display()),
        path: Some(path.to_path_buf()),
        source: Some(e),
    })?;

    let data: T = serde_json::from_str(&contents).map_err(|e| LarderError::Json {
        message: format!("Failed to parse {}: {}", path.display(), e),
        source: Some(e),
    })?;

    Ok(Some(data))
}

/// Write data to a JSON file atomically, pretty-printed.
pub fn atomic_write_json<T: Serialize>(path: &Path, data: &T, keep_backup: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| LarderError::Io {
                message: format!("Failed to create directory {}", parent.display()),
                path: Some(parent.to_path_buf()),
                source: Some(e),
            })?;
        }
    }

    let temp_path = path.with_extension(format!("json.{}.{}.tmp", process::id(), thread_id()));

    let serialized = serde_json::to_string_pretty(data).map_err(|e| LarderError::Json {
        message: format!("Failed to serialize data: {}", e),
        source: Some(e),
    })?;

    {
        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| LarderError::Io {
                message: format!("Failed to create temp file {}", temp_path.display()),
                path: Some(temp_path.clone()),
                source: Some(e),
            })?;

        file.write_all(serialized.as_bytes())
            .and_then(|()| file.flush())
            .and_then(|()| file.sync_all())
            .map_err(|e| LarderError::Io {
                message: format!("Failed to write temp file {}", temp_path.display()),
                path: Some(temp_path.clone()),
                source: Some(e),
            })?;
    }

    if keep_backup && path.exists() {
        let backup_path = path.with_extension("json.bak");
        if let Err(e) = fs::copy(path, &backup_path) {
            // Not fatal: the new contents are already safely on disk.
            warn!("Failed to create backup {}: {}", backup_path.display(), e);
        } else {
            debug!("Created backup: {}", backup_path.display());
        }
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(LarderError::Io {
            message: format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                path.display()
            ),
            path: Some(path.to_path_buf()),
            source: Some(e),
        });
    }

    debug!("Atomically wrote {}", path.display());
    Ok(())
}

fn thread_id() -> u64 {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};
    let mut hasher = DefaultHasher::new();
    format!("{:?}", thread::current().id()).hash(&mut hasher);
    hasher.finish()
}
