//! Rendering translated tokens back to text.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use cc2dx_lexer::{FileKind, TranslatedFile};

/// Text written to headers that do not already have it.
pub const INCLUDE_GUARD: &str = "#pragma once\n";

/// Where the translation of `path` goes: headers stay `.h`, sources
/// become `.cpp`. `None` for files the translator does not accept.
pub fn output_path(path: &Path) -> Option<PathBuf> {
    match FileKind::from_path(path)? {
        FileKind::Header => Some(path.with_extension("h")),
        FileKind::Source => Some(path.with_extension("cpp")),
    }
}

/// Render a translated file as C++ source.
///
/// Tokens are separated by one space. A newline token is followed by one
/// tab per brace level; a line that starts by closing a brace is indented
/// one level less, and empty lines get no indentation.
pub fn render(file: &TranslatedFile) -> String {
    let mut out = String::new();
    if file.needs_include_guard() {
        out.push_str(INCLUDE_GUARD);
    }

    let mut line_start = true;
    let mut tokens = file.tokens.iter().peekable();
    while let Some(token) = tokens.next() {
        if let Some(indent) = token.kind.indent() {
            out.push_str(&token.text);
            let depth = match tokens.peek() {
                None => 0,
                Some(next) if next.is_newline() => 0,
                Some(next) if next.text.starts_with('}') => indent.saturating_sub(1),
                Some(_) => indent,
            };
            out.extend(std::iter::repeat('\t').take(depth as usize));
            line_start = true;
        } else {
            if !line_start {
                out.push(' ');
            }
            out.push_str(&token.text);
            line_start = false;
        }
    }
    out
}

/// One `KIND text` line per token, for `--debug --tokens`.
pub fn render_tokens(file: &TranslatedFile) -> String {
    let mut out = String::new();
    if file.needs_include_guard() {
        out.push_str("DIRECTIVE \"#pragma once\"\n");
    }
    for token in &file.tokens {
        let _ = writeln!(out, "{} {:?}", token.kind.label(), token.text);
    }
    out
}
