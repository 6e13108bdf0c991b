//! cc2dx command line.

use std::path::PathBuf;
use std::process::ExitCode;

use cc2dx_catalog::TargetVersion;
use cc2dxc::{backup, init_tracing, ConvertConfig, ConvertSummary, Converter, DriverError};
use clap::Parser;

/// Convert Cocos2d (Objective-C) sources to Cocos2d-x (C++).
#[derive(Parser, Debug)]
#[command(name = "cc2dx", version, about, long_about = None)]
#[command(override_usage = "cc2dx <FILE_OR_FOLDER> [OPTIONS]")]
struct Cli {
    /// File or folder to convert
    #[arg(value_name = "FILE_OR_FOLDER")]
    path: PathBuf,

    /// Descend into subfolders
    #[arg(short, long)]
    subfolders: bool,

    /// Keep the old code in *.bak files
    #[arg(short, long)]
    backup: bool,

    /// Restore files from their backups, then exit
    #[arg(short, long, conflicts_with = "remove_backup")]
    rollback: bool,

    /// Delete backup files, then exit
    #[arg(short = 'm', long)]
    remove_backup: bool,

    /// Print the translation of the first file and stop without writing
    #[arg(short, long)]
    debug: bool,

    /// With --debug, print one `KIND text` line per token
    #[arg(long, requires = "debug")]
    tokens: bool,

    /// Cocos2d-x version to target
    #[arg(long, value_name = "VERSION", default_value_t = TargetVersion::V2)]
    target: TargetVersion,

    /// Convert files one at a time
    #[arg(long)]
    no_parallel: bool,

    /// Log conversion progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, DriverError> {
    if cli.rollback {
        let restored = backup::rollback(&cli.path, cli.subfolders)?;
        eprintln!("restored {restored} file(s)");
        return Ok(ExitCode::SUCCESS);
    }
    if cli.remove_backup {
        let removed = backup::remove_backups(&cli.path, cli.subfolders)?;
        eprintln!("removed {removed} backup(s)");
        return Ok(ExitCode::SUCCESS);
    }

    let converter = Converter::new(ConvertConfig {
        subfolders: cli.subfolders,
        backup: cli.backup,
        target: cli.target,
        parallel: !cli.no_parallel,
    });

    if cli.debug {
        match converter.preview(&cli.path, cli.tokens)? {
            Some(text) => print!("{text}"),
            None => eprintln!("no .h, .m or .mm files at {}", cli.path.display()),
        }
        return Ok(ExitCode::SUCCESS);
    }

    let summary = converter.convert_path(&cli.path);
    print_summary(&summary);
    Ok(if summary.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

fn print_summary(summary: &ConvertSummary) {
    for report in &summary.files {
        for diag in &report.diagnostics {
            eprintln!(
                "{}:{}:{}: {}: {}",
                report.path.display(),
                diag.line,
                diag.column,
                diag.diagnostic.severity(),
                diag.diagnostic.message()
            );
        }
        if let Some(err) = &report.error {
            eprintln!("error: {err}");
        }
    }

    if summary.files.is_empty() {
        eprintln!("nothing to convert");
        return;
    }
    eprintln!(
        "converted {} file(s), {} failed, {} warning(s) in {:.2?}",
        summary.converted(),
        summary.failed(),
        summary.warnings(),
        summary.duration
    );
}
