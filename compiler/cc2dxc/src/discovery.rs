//! Input discovery.
//!
//! A path is either one file or a directory. Directories are listed one
//! level deep unless subfolders are requested. Hidden entries are skipped.

use std::fs;
use std::path::{Path, PathBuf};

use cc2dx_lexer::FileKind;

/// Extension appended to backup copies.
pub const BACKUP_EXTENSION: &str = "bak";

/// A file the translator accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub kind: FileKind,
}

impl SourceFile {
    /// `None` unless the extension is `.h`, `.m`, or `.mm`.
    pub fn from_path(path: PathBuf) -> Option<SourceFile> {
        let kind = FileKind::from_path(&path)?;
        Some(SourceFile { path, kind })
    }
}

/// Every translatable file at or under `path`, sorted by path.
pub fn discover_sources(path: &Path, subfolders: bool) -> Vec<SourceFile> {
    let mut files: Vec<SourceFile> = collect(path, subfolders, |p| FileKind::from_path(p).is_some())
        .into_iter()
        .filter_map(SourceFile::from_path)
        .collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

/// Every `.h.bak`, `.m.bak`, or `.mm.bak` at or under `path`, sorted.
pub fn discover_backups(path: &Path, subfolders: bool) -> Vec<PathBuf> {
    let mut files = collect(path, subfolders, is_backup);
    files.sort();
    files
}

/// Whether `path` is a backup of a translatable file.
pub fn is_backup(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == BACKUP_EXTENSION)
        && path.file_stem().is_some_and(|stem| FileKind::from_path(Path::new(stem)).is_some())
}

fn collect(path: &Path, subfolders: bool, accept: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if path.is_file() {
        if accept(path) {
            files.push(path.to_path_buf());
        }
    } else if path.is_dir() {
        collect_dir(path, subfolders, &accept, &mut files);
    }
    files
}

fn collect_dir(dir: &Path, recursive: bool, accept: &impl Fn(&Path) -> bool, files: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        tracing::debug!(dir = %dir.display(), "unreadable directory skipped");
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();

        if path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.starts_with('.'))
        {
            continue;
        }

        if path.is_dir() {
            if recursive {
                collect_dir(&path, recursive, accept, files);
            }
        } else if accept(&path) {
            files.push(path);
        }
    }
}
