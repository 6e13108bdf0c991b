//! Converting files on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use cc2dx_catalog::Catalog;
use cc2dx_lexer::{Diagnostic, Severity, TranslatedFile, Translator};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::backup::make_backup;
use crate::discovery::{discover_sources, SourceFile};
use crate::output::{output_path, render, render_tokens};
use crate::{ConvertConfig, DriverError};

/// A diagnostic with its position resolved against the file's text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportedDiagnostic {
    /// 1-based.
    pub line: usize,
    /// 1-based, in bytes.
    pub column: usize,
    pub diagnostic: Diagnostic,
}

/// What happened to one input file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    /// Where the translation was written. `None` if nothing was written.
    pub output: Option<PathBuf>,
    pub diagnostics: Vec<ReportedDiagnostic>,
    pub error: Option<DriverError>,
}

impl FileReport {
    fn new(path: PathBuf) -> Self {
        FileReport {
            path,
            output: None,
            diagnostics: Vec::new(),
            error: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.diagnostic.severity() == Severity::Warning)
            .count()
    }
}

/// Reports for a whole run, in discovery order.
#[derive(Debug, Default)]
pub struct ConvertSummary {
    pub files: Vec<FileReport>,
    pub duration: Duration,
}

impl ConvertSummary {
    pub fn converted(&self) -> usize {
        self.files.iter().filter(|f| f.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.files.len() - self.converted()
    }

    pub fn warnings(&self) -> usize {
        self.files.iter().map(FileReport::warning_count).sum()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }
}

/// Converts files with one shared catalog.
pub struct Converter {
    config: ConvertConfig,
    catalog: Catalog,
}

impl Converter {
    pub fn new(config: ConvertConfig) -> Self {
        let catalog = Catalog::new(config.target);
        Converter { config, catalog }
    }

    /// Convert every source at or under `path`.
    pub fn convert_path(&self, path: &Path) -> ConvertSummary {
        let files = discover_sources(path, self.config.subfolders);
        debug!(count = files.len(), root = %path.display(), "discovered sources");
        if self.config.parallel && files.len() > 1 {
            self.convert_parallel(&files)
        } else {
            self.convert_sequential(&files)
        }
    }

    fn convert_sequential(&self, files: &[SourceFile]) -> ConvertSummary {
        let start = Instant::now();
        let reports = files.iter().map(|file| self.convert_file(file)).collect();
        ConvertSummary {
            files: reports,
            duration: start.elapsed(),
        }
    }

    /// Convert on a scoped rayon pool, torn down before returning.
    ///
    /// Falls back to sequential conversion when the pool cannot be built.
    fn convert_parallel(&self, files: &[SourceFile]) -> ConvertSummary {
        let start = Instant::now();
        let reports = rayon::ThreadPoolBuilder::new()
            .build_scoped(rayon::ThreadBuilder::run, |pool| {
                pool.install(|| {
                    files
                        .par_iter()
                        .map(|file| self.convert_file(file))
                        .collect::<Vec<_>>()
                })
            })
            .unwrap_or_else(|e| {
                warn!("failed to create thread pool ({e}), converting sequentially");
                files.iter().map(|file| self.convert_file(file)).collect()
            });
        ConvertSummary {
            files: reports,
            duration: start.elapsed(),
        }
    }

    /// Translate, back up, write, and remove the original if renamed.
    ///
    /// Nothing touches the disk unless translation succeeded.
    pub fn convert_file(&self, file: &SourceFile) -> FileReport {
        let mut report = FileReport::new(file.path.clone());

        let (source, translated) = match self.translate_file(file) {
            Ok(result) => result,
            Err(err) => {
                warn!("{err}");
                report.error = Some(err);
                return report;
            }
        };
        report.diagnostics = locate(&source, translated.diagnostics.iter().cloned());
        for diag in &report.diagnostics {
            log_diagnostic(&file.path, diag);
        }

        match self.write_translation(file, &translated) {
            Ok(output) => report.output = Some(output),
            Err(err) => {
                warn!("{err}");
                report.error = Some(err);
            }
        }
        report
    }

    /// Render the first source under `path` without writing anything.
    ///
    /// `tokens` selects the `KIND text` listing instead of C++ text.
    pub fn preview(&self, path: &Path, tokens: bool) -> Result<Option<String>, DriverError> {
        let Some(file) = discover_sources(path, self.config.subfolders).into_iter().next() else {
            return Ok(None);
        };
        let (_, translated) = self.translate_file(&file)?;
        Ok(Some(if tokens {
            render_tokens(&translated)
        } else {
            render(&translated)
        }))
    }

    fn translate_file(&self, file: &SourceFile) -> Result<(String, TranslatedFile), DriverError> {
        let bytes = fs::read(&file.path).map_err(|source| DriverError::Read {
            path: file.path.clone(),
            source,
        })?;
        // Old Xcode projects are not always UTF-8; keep going with replacements.
        let source = String::from_utf8_lossy(&bytes).into_owned();
        let translated = Translator::new(&self.catalog)
            .translate(&source, file.kind)
            .map_err(|source| DriverError::Translate {
                path: file.path.clone(),
                source,
            })?;
        Ok((source, translated))
    }

    fn write_translation(&self, file: &SourceFile, translated: &TranslatedFile) -> Result<PathBuf, DriverError> {
        let output = output_path(&file.path).unwrap_or_else(|| file.path.clone());
        if self.config.backup {
            make_backup(&file.path)?;
        }
        fs::write(&output, render(translated)).map_err(|source| DriverError::Write {
            path: output.clone(),
            source,
        })?;
        if output != file.path {
            fs::remove_file(&file.path).map_err(|source| DriverError::Remove {
                path: file.path.clone(),
                source,
            })?;
        }
        debug!(from = %file.path.display(), to = %output.display(), "converted");
        Ok(output)
    }
}

fn log_diagnostic(path: &Path, diag: &ReportedDiagnostic) {
    let file = path.display();
    match diag.diagnostic.severity() {
        Severity::Warning => warn!(%file, line = diag.line, column = diag.column, "{}", diag.diagnostic.message()),
        Severity::Note => debug!(%file, line = diag.line, column = diag.column, "{}", diag.diagnostic.message()),
    }
}

fn locate(source: &str, diagnostics: impl Iterator<Item = Diagnostic>) -> Vec<ReportedDiagnostic> {
    diagnostics
        .map(|diagnostic| {
            let (line, column) = diagnostic.span.line_col(source);
            ReportedDiagnostic {
                line,
                column,
                diagnostic,
            }
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests;
