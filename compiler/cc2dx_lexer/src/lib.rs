//! Stateful token translator from Cocos2d Objective-C to Cocos2d-x C++.
//!
//! Objective-C is not context-free at the token level: `[` opens either a
//! message send or an array subscript, and an identifier inside brackets is
//! a receiver, a selector, or an argument depending on what came before.
//! The translator resolves this in a single pass with a handful of
//! carried-forward facts instead of a syntax tree.
//!
//! # Architecture
//!
//! ```text
//! source → RawToken (logos) → Scan::step (state + BracketStack + Catalog) → Token
//! ```
//!
//! - [`raw_token`]: the generated scanner. Rules that need a lookahead
//!   decision (`#import` vs. any directive, `word:` vs. `word`) resolve it
//!   inside logos callbacks.
//! - [`bracket_stack`]: one frame per open `[`.
//! - `state`: the per-file lexer state machine.
//! - [`translator`]: maps each raw token to zero or one output token.
//!
//! # Errors
//!
//! Recoverable problems become [`Diagnostic`]s on the [`TranslatedFile`].
//! Broken internal invariants (a `]` with no open bracket) come back as
//! [`InvariantViolation`] and abort that file only.

pub mod bracket_stack;
mod lex_error;
pub mod raw_token;
mod span;
mod state;
mod token;
pub mod translator;

pub use bracket_stack::{BracketFrame, BracketStack};
pub use lex_error::{Diagnostic, DiagnosticKind, InvariantViolation, Severity};
pub use span::Span;
pub use state::Mode;
pub use token::{Token, TokenKind};
pub use translator::{FileKind, TranslatedFile, Translator};
