//! Diagnostics and invariant violations.
//!
//! Two tiers:
//! - [`Diagnostic`]: recoverable. Recorded on the translated file; the
//!   token stream is still complete.
//! - [`InvariantViolation`]: the translator's own bookkeeping broke (a `]`
//!   with nothing open). Translation of that file stops.

use std::fmt;

use crate::Span;

/// How much a diagnostic matters.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Note,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Note => f.write_str("note"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A recoverable problem found while translating.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Diagnostic {
    pub span: Span,
    pub kind: DiagnosticKind,
}

/// What was found.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// The scanner matched nothing; the character was dropped.
    UnexpectedCharacter { found: char },
    /// `}` with no open brace. Depth stays at zero.
    UnbalancedClosingBrace,
    /// A construct that names the current class appeared outside any
    /// `@interface`/`@implementation`; it was emitted unqualified.
    MissingClassContext { construct: &'static str },
    /// An identifier mapped to a name the target version deprecates.
    DeprecatedName { name: String },
}

impl Diagnostic {
    pub fn unexpected_character(span: Span, found: char) -> Self {
        Diagnostic {
            span,
            kind: DiagnosticKind::UnexpectedCharacter { found },
        }
    }

    pub fn unbalanced_closing_brace(span: Span) -> Self {
        Diagnostic {
            span,
            kind: DiagnosticKind::UnbalancedClosingBrace,
        }
    }

    pub fn missing_class_context(span: Span, construct: &'static str) -> Self {
        Diagnostic {
            span,
            kind: DiagnosticKind::MissingClassContext { construct },
        }
    }

    pub fn deprecated_name(span: Span, name: impl Into<String>) -> Self {
        Diagnostic {
            span,
            kind: DiagnosticKind::DeprecatedName { name: name.into() },
        }
    }

    pub fn severity(&self) -> Severity {
        match self.kind {
            DiagnosticKind::DeprecatedName { .. } => Severity::Note,
            DiagnosticKind::UnexpectedCharacter { .. }
            | DiagnosticKind::UnbalancedClosingBrace
            | DiagnosticKind::MissingClassContext { .. } => Severity::Warning,
        }
    }

    pub fn message(&self) -> String {
        match &self.kind {
            DiagnosticKind::UnexpectedCharacter { found } => {
                format!("unexpected character {found:?}, dropped")
            }
            DiagnosticKind::UnbalancedClosingBrace => {
                "`}` without a matching `{`".to_string()
            }
            DiagnosticKind::MissingClassContext { construct } => {
                format!("{construct} outside of a class; emitted without a class qualifier")
            }
            DiagnosticKind::DeprecatedName { name } => {
                format!("`{name}` is deprecated in the target version")
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} at {}", self.severity(), self.message(), self.span)
    }
}

/// The translator's internal bookkeeping became inconsistent.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("bracket stack is empty during `{operation}`")]
    EmptyBracketStack { operation: &'static str },
    #[error("`]` at {span} closes no open `[`")]
    UnmatchedClosingBracket { span: Span },
}
