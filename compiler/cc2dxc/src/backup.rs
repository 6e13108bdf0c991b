//! `.bak` copies of converted inputs.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::discovery::{discover_backups, BACKUP_EXTENSION};
use crate::DriverError;

/// `Foo.m` → `Foo.m.bak`.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(BACKUP_EXTENSION);
    PathBuf::from(name)
}

/// `Foo.m.bak` → `Foo.m`. `None` if `backup` has no `.bak` extension.
pub fn original_path(backup: &Path) -> Option<PathBuf> {
    if backup.extension()? != BACKUP_EXTENSION {
        return None;
    }
    Some(backup.with_extension(""))
}

/// Copy `path` to its backup location, replacing an older backup.
pub fn make_backup(path: &Path) -> Result<PathBuf, DriverError> {
    let target = backup_path(path);
    fs::copy(path, &target).map_err(|source| DriverError::Backup {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(file = %path.display(), "backed up");
    Ok(target)
}

/// Copy every backup under `root` back over its original. Returns the
/// number of files restored.
///
/// Converted `.cpp` files are left alone.
pub fn rollback(root: &Path, subfolders: bool) -> Result<usize, DriverError> {
    let backups = discover_backups(root, subfolders);
    for backup in &backups {
        let Some(original) = original_path(backup) else {
            continue;
        };
        fs::copy(backup, &original).map_err(|source| DriverError::Restore {
            path: original.clone(),
            source,
        })?;
        debug!(file = %original.display(), "restored");
    }
    Ok(backups.len())
}

/// Delete every backup under `root`. Returns the number removed.
pub fn remove_backups(root: &Path, subfolders: bool) -> Result<usize, DriverError> {
    let backups = discover_backups(root, subfolders);
    for backup in &backups {
        fs::remove_file(backup).map_err(|source| DriverError::Remove {
            path: backup.clone(),
            source,
        })?;
    }
    debug!(count = backups.len(), "backups removed");
    Ok(backups.len())
}
