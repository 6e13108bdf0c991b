//! Driver for the cc2dx converter.
//!
//! Finds the Objective-C files of a Cocos2d project, runs each through
//! [`cc2dx_lexer::Translator`], and writes the Cocos2d-x C++ result next to
//! the input:
//!
//! - `Foo.h` is rewritten in place (with `#pragma once` added if missing).
//! - `Foo.m` / `Foo.mm` become `Foo.cpp` and the original is removed.
//!
//! Optional `.bak` copies make a conversion reversible with
//! [`backup::rollback`].

pub mod backup;
mod config;
pub mod convert;
pub mod discovery;
mod error;
pub mod output;
mod tracing_setup;

pub use config::ConvertConfig;
pub use convert::{ConvertSummary, Converter, FileReport, ReportedDiagnostic};
pub use error::DriverError;
pub use tracing_setup::init_tracing;
