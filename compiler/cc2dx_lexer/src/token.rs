//! Output tokens.

use std::fmt;

use crate::Span;

/// What an output token is. The translator only needs the distinction for
/// newlines, but the debug listing and the tests read the rest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Number,
    Str,
    Char,
    Comment,
    /// Line break run; `indent` is the brace depth when it was scanned.
    Newline {
        indent: u32,
    },
    /// Preprocessor line or fragment (`#include`, `#define `, ...).
    Directive,
    /// Class boundary: `class Foo`, `}; // Foo`, commented `@implementation`.
    ClassMarker,
    /// `@selector(...)` rewritten to a selector macro.
    Selector,
    Brace,
    /// `[`, `]`, or the `)` closing a message send.
    Bracket,
    Operator,
    Identifier,
    /// Selector keyword turned into a call opener or an inline comment.
    MethodPart,
    /// Parenthesized type: a cast, or a parameter/return type.
    TypeName,
    Other,
}

impl TokenKind {
    /// Upper-case label used by the token listing.
    pub fn label(self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER",
            TokenKind::Str => "STRING",
            TokenKind::Char => "CHAR",
            TokenKind::Comment => "COMMENT",
            TokenKind::Newline { .. } => "NEWLINE",
            TokenKind::Directive => "DIRECTIVE",
            TokenKind::ClassMarker => "CLASSMARKER",
            TokenKind::Selector => "SELECTOR",
            TokenKind::Brace => "BRACE",
            TokenKind::Bracket => "BRACKET",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Identifier => "ID",
            TokenKind::MethodPart => "METHODPART",
            TokenKind::TypeName => "TYPE",
            TokenKind::Other => "OTHER",
        }
    }

    /// The reindent hint carried by newline tokens.
    pub fn indent(self) -> Option<u32> {
        match self {
            TokenKind::Newline { indent } => Some(indent),
            _ => None,
        }
    }
}

/// One translated token: its kind, replacement text, and source span.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
        }
    }

    pub fn is_newline(&self) -> bool {
        matches!(self.kind, TokenKind::Newline { .. })
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.kind.label(), self.text)
    }
}
