//! Raw token definition.
//!
//! `RawToken` is the logos-derived scanner output before any translation.
//! Logos picks the longest match and breaks ties by priority. A few rules
//! in the dialect overlap in ways longest-match alone gets wrong:
//!
//! - `#import <a.h> // note` must be an import, not a longer generic
//!   directive line, and `#define` must stop after its keyword so the body
//!   is still translated.
//! - `name:` is a selector keyword, but `name::` is a scope.
//! - `self.` and `cocos2d::Name` are single units.
//! - `(Type *)` is one token, but `(name,` is just an opening parenthesis.
//!
//! Those start from a short literal (`#`, `@`, `(`) or identifier match and
//! extend themselves in a callback, in the order the rules are tried.
//! Comments and string literals are scanned the same way: the generated
//! automaton does not fall back to a shorter match once a longer one fails.

use logos::{Lexer, Logos};

/// What follows a `#`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `#import <header>` or `#import "header"`.
    Import,
    /// `#pragma once`.
    PragmaOnce,
    /// `#define` and its trailing blanks; the body is scanned as code.
    Define,
    /// Any other directive, to the end of the line (with `\` continuations).
    Other,
}

/// What follows an `@` that does not start a string literal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AtKeyword {
    /// `@interface Name` or `@protocol Name`.
    ClassOpener,
    /// `@implementation Name`.
    Implementation,
    /// `@property`, `@synthesize`, `@optional`, to the end of the line.
    CommentedOut,
    /// `@selector(name)` or `@selector(name:)`.
    Selector,
    /// `@end`.
    End,
    /// `@class` (forward declaration).
    ForwardClass,
    /// A lone `@`.
    Bare,
}

/// How an identifier relates to what follows it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WordShape {
    Plain,
    /// `name:` (not `name::`); the colon is part of the token.
    SelectorPart,
    /// `self.`; the dot is part of the token.
    SelfAccess,
    /// `cocos2d::Name`, already in the target dialect.
    Qualified,
}

/// What an opening parenthesis starts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParenKind {
    /// `(Type)`, `(Type *)`, `(Type **)`, up to and including the `)`.
    Type,
    /// Any other `(`, on its own.
    Open,
}

/// Raw token from logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f]+")]
pub enum RawToken {
    #[regex(r"[+-]?[0-9]+(\.[0-9]*([eE][+-]?[0-9]+)?)?[fFlL]?", priority = 4)]
    Number,

    #[regex(r"'([^'\\\n]|\\[^\n])'")]
    Char,

    #[token("//", lex_line_comment)]
    LineComment,

    #[token("/*", lex_block_comment)]
    BlockComment,

    /// `"..."` or `@"..."`. An unterminated literal is a lexical error.
    #[token("\"", lex_string)]
    #[token("@\"", lex_string)]
    Str,

    #[regex(r"\n[ \t\r\f\n]*")]
    Newline,

    #[token("#", lex_directive)]
    Directive(DirectiveKind),

    #[token("@", lex_at_keyword)]
    At(AtKeyword),

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,

    // Compound assignment, shifts, `::`, `->`, `->*`, `.*`, `...`
    #[regex(r"([-+*!%<>^=/]|<<|>>)=|[-+&|<>:][-+&|<>:]|\.\.\.|\.\*|->\*")]
    CompoundOp,

    #[token("+")]
    #[token("-")]
    Sign,

    #[token("(", lex_paren)]
    Paren(ParenKind),

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", lex_word, priority = 3)]
    Word(WordShape),

    #[regex(r"[^ \t\r\f\n]", priority = 1)]
    Other,
}

impl RawToken {
    /// Whether the token ends the "first token on this line" window.
    pub fn is_significant(self) -> bool {
        !matches!(
            self,
            RawToken::Newline | RawToken::LineComment | RawToken::BlockComment
        )
    }
}

fn lex_line_comment(lex: &mut Lexer<'_, RawToken>) {
    lex.bump(logical_line_len(lex.remainder()));
}

fn lex_block_comment(lex: &mut Lexer<'_, RawToken>) {
    lex.bump(block_comment_len(lex.remainder()));
}

fn lex_string(lex: &mut Lexer<'_, RawToken>) -> bool {
    match string_len(lex.remainder()) {
        Some(len) => {
            lex.bump(len);
            true
        }
        None => false,
    }
}

fn lex_paren(lex: &mut Lexer<'_, RawToken>) -> ParenKind {
    let (kind, len) = classify_paren(lex.remainder());
    lex.bump(len);
    kind
}

fn lex_directive(lex: &mut Lexer<'_, RawToken>) -> DirectiveKind {
    let (kind, len) = classify_directive(lex.remainder());
    lex.bump(len);
    kind
}

fn lex_at_keyword(lex: &mut Lexer<'_, RawToken>) -> AtKeyword {
    let (keyword, len) = classify_at_keyword(lex.remainder());
    lex.bump(len);
    keyword
}

fn lex_word(lex: &mut Lexer<'_, RawToken>) -> WordShape {
    let (shape, len) = classify_word(lex.slice(), lex.remainder());
    lex.bump(len);
    shape
}

/// Classify the text after `#`. Returns the kind and how many more bytes
/// belong to the token.
pub(crate) fn classify_directive(rest: &str) -> (DirectiveKind, usize) {
    let import = || {
        let mut probe = Probe::new(rest);
        if !probe.eat_str("import") {
            return None;
        }
        probe.skip_whitespace();
        if !probe.eat_char('<') && !probe.eat_char('"') {
            return None;
        }
        // The header ends at the first delimiter of either kind, on this line.
        let body = probe.tail();
        let end = body.find(|c| c == '>' || c == '"' || c == '\n')?;
        (body.as_bytes()[end] != b'\n').then_some(probe.pos() + end + 1)
    };
    if let Some(len) = import() {
        return (DirectiveKind::Import, len);
    }

    let mut probe = Probe::new(rest);
    if probe.eat_str("pragma") && probe.skip_whitespace() > 0 && probe.eat_str("once") {
        return (DirectiveKind::PragmaOnce, probe.pos());
    }

    let mut probe = Probe::new(rest);
    if probe.eat_str("define") && probe.skip_blanks() > 0 {
        return (DirectiveKind::Define, probe.pos());
    }

    (DirectiveKind::Other, logical_line_len(rest))
}

/// Classify the text after a non-string `@`.
pub(crate) fn classify_at_keyword(rest: &str) -> (AtKeyword, usize) {
    if let Some(len) = keyword_and_name(rest, "interface").or_else(|| keyword_and_name(rest, "protocol")) {
        return (AtKeyword::ClassOpener, len);
    }
    if let Some(len) = keyword_and_name(rest, "implementation") {
        return (AtKeyword::Implementation, len);
    }

    let mut probe = Probe::new(rest);
    probe.skip_whitespace();
    if ["property", "synthesize", "optional"]
        .iter()
        .any(|kw| probe.tail().starts_with(kw))
    {
        let tail = probe.tail();
        let line = tail.find('\n').unwrap_or(tail.len());
        return (AtKeyword::CommentedOut, probe.pos() + line);
    }

    if let Some(len) = selector_len(rest) {
        return (AtKeyword::Selector, len);
    }
    if rest.starts_with("end") {
        return (AtKeyword::End, "end".len());
    }
    if rest.starts_with("class") {
        return (AtKeyword::ForwardClass, "class".len());
    }
    (AtKeyword::Bare, 0)
}

/// Classify an identifier by what follows it.
pub(crate) fn classify_word(word: &str, rest: &str) -> (WordShape, usize) {
    let mut probe = Probe::new(rest);
    probe.skip_whitespace();
    if probe.eat_char(':') && probe.peek() != Some(':') {
        return (WordShape::SelectorPart, probe.pos());
    }

    if word == "self" {
        let mut probe = Probe::new(rest);
        probe.skip_whitespace();
        if probe.eat_char('.') {
            return (WordShape::SelfAccess, probe.pos());
        }
    }

    if word == "cocos2d" {
        let mut probe = Probe::new(rest);
        probe.skip_whitespace();
        if probe.eat_str("::") {
            probe.skip_whitespace();
            if probe.peek().is_some_and(|c| c.is_ascii_alphabetic() || c == '_') {
                probe.eat_identifier();
                return (WordShape::Qualified, probe.pos());
            }
        }
    }

    (WordShape::Plain, 0)
}

/// Classify the text after `(`: a type name with optional pointer stars,
/// closed on the spot, or anything else.
pub(crate) fn classify_paren(rest: &str) -> (ParenKind, usize) {
    let mut probe = Probe::new(rest);
    probe.skip_whitespace();
    if !probe.peek().is_some_and(|c| c.is_ascii_alphabetic() || c == '_') {
        return (ParenKind::Open, 0);
    }
    probe.eat_identifier();
    loop {
        probe.skip_whitespace();
        if !probe.eat_char('*') {
            break;
        }
    }
    if probe.eat_char(')') {
        (ParenKind::Type, probe.pos())
    } else {
        (ParenKind::Open, 0)
    }
}

/// Length of a block comment body after `/*`, including the closing `*/`.
/// An unterminated comment runs to the end of the input.
pub(crate) fn block_comment_len(rest: &str) -> usize {
    rest.find("*/").map_or(rest.len(), |end| end + "*/".len())
}

/// Length of a string literal after its opening quote, including the
/// closing one. `None` if the line or input ends first; a `\` before the
/// line break continues the literal.
pub(crate) fn string_len(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if i + 1 < bytes.len() => i += 2,
            b'"' => return Some(i + 1),
            b'\n' | b'\\' => return None,
            _ => i += 1,
        }
    }
    None
}

/// `keyword`, at least one whitespace, then a name.
fn keyword_and_name(rest: &str, keyword: &str) -> Option<usize> {
    let mut probe = Probe::new(rest);
    if !probe.eat_str(keyword) || probe.skip_whitespace() == 0 || probe.eat_identifier() == 0 {
        return None;
    }
    Some(probe.pos())
}

/// `selector ( name [:] )` with free whitespace.
fn selector_len(rest: &str) -> Option<usize> {
    let mut probe = Probe::new(rest);
    if !probe.eat_str("selector") {
        return None;
    }
    probe.skip_whitespace();
    if !probe.eat_char('(') {
        return None;
    }
    probe.skip_whitespace();
    if probe.eat_identifier() == 0 {
        return None;
    }
    probe.skip_whitespace();
    probe.eat_char(':');
    probe.skip_whitespace();
    probe.eat_char(')').then(|| probe.pos())
}

/// Length up to the end of a line, following `\`-newline continuations.
fn logical_line_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' if bytes.get(i + 1) == Some(&b'\n') => i += 2,
            b'\n' => break,
            _ => i += 1,
        }
    }
    i
}

/// Forward-only cursor over the text following a match.
///
/// Only ever advances over ASCII, so every position is a char boundary.
struct Probe<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Probe<'a> {
    fn new(text: &'a str) -> Self {
        Probe { text, pos: 0 }
    }

    fn pos(&self) -> usize {
        self.pos
    }

    fn tail(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.tail().chars().next()
    }

    fn eat_char(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, s: &str) -> bool {
        if self.tail().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> usize {
        let n = self.tail().bytes().take_while(|&b| pred(b)).count();
        self.pos += n;
        n
    }

    /// Spaces, tabs, and line breaks.
    fn skip_whitespace(&mut self) -> usize {
        self.eat_while(|b| b.is_ascii_whitespace())
    }

    /// Spaces and tabs only.
    fn skip_blanks(&mut self) -> usize {
        self.eat_while(|b| b == b' ' || b == b'\t')
    }

    fn eat_identifier(&mut self) -> usize {
        self.eat_while(|b| b.is_ascii_alphanumeric() || b == b'_')
    }
}
