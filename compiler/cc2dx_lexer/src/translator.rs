//! The translating pass.
//!
//! [`Translator::translate`] drives the logos scanner over one file and
//! feeds every raw token through `Scan::step`, which consults the lexer
//! state, the bracket stack, and the catalog to decide what replaces it.
//! A raw token produces zero or one output token.

use std::path::Path;

use cc2dx_catalog::{rewrite_format_placeholders, Catalog, TARGET_NAMESPACE};
use logos::Logos;
use tracing::{debug, trace};

use crate::raw_token::{AtKeyword, DirectiveKind, ParenKind, RawToken, WordShape};
use crate::state::{BraceClose, LexerState};
use crate::{BracketStack, Diagnostic, InvariantViolation, Span, Token, TokenKind};

/// Words after which `[` always opens a message send.
const SEND_AFTER_KEYWORDS: &[&str] = &["do", "else", "in", "return"];

/// `last_word` after a string literal.
const STRING_SENTINEL: &str = "nsstring";

/// Which side of a header/implementation pair a file is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FileKind {
    Header,
    Source,
}

impl FileKind {
    /// `.h` is a header; `.m` and `.mm` are sources. Anything else is not a
    /// translation input.
    pub fn from_path(path: &Path) -> Option<FileKind> {
        match path.extension()?.to_str()? {
            "h" => Some(FileKind::Header),
            "m" | "mm" => Some(FileKind::Source),
            _ => None,
        }
    }

    #[inline]
    pub fn is_header(self) -> bool {
        self == FileKind::Header
    }
}

/// Output of translating one file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranslatedFile {
    pub tokens: Vec<Token>,
    pub is_header: bool,
    /// The input already had `#pragma once`.
    pub emitted_pragma_once: bool,
    /// Brace depth at end of input. Zero for balanced input.
    pub final_brace_depth: u32,
    /// `[` left open at end of input.
    pub open_brackets: usize,
    pub diagnostics: Vec<Diagnostic>,
}

impl TranslatedFile {
    /// Headers without their own `#pragma once` get one prepended.
    pub fn needs_include_guard(&self) -> bool {
        self.is_header && !self.emitted_pragma_once
    }

    /// Token texts concatenated with no separators. Mostly for tests.
    pub fn compact(&self) -> String {
        self.tokens
            .iter()
            .flat_map(|t| t.text.chars().filter(|c| !c.is_whitespace()))
            .collect()
    }
}

/// Translates files against one catalog.
///
/// The translator itself is stateless; every call to [`translate`] gets
/// fresh lexer state, so one translator can be shared across threads.
///
/// [`translate`]: Translator::translate
#[derive(Copy, Clone, Debug)]
pub struct Translator<'cat> {
    catalog: &'cat Catalog,
}

impl<'cat> Translator<'cat> {
    pub fn new(catalog: &'cat Catalog) -> Self {
        Translator { catalog }
    }

    /// Translate one file.
    ///
    /// Recoverable problems are collected as diagnostics. A character that
    /// starts no token is reported and skipped, and scanning resumes right
    /// after it. An [`InvariantViolation`] abandons the file.
    pub fn translate(&self, source: &str, kind: FileKind) -> Result<TranslatedFile, InvariantViolation> {
        let mut scan = Scan::new(self.catalog, kind.is_header());
        let mut lexer = RawToken::lexer(source);

        while let Some(result) = lexer.next() {
            let span = Span::from_range(lexer.span());
            let slice = lexer.slice();
            match result {
                Ok(raw) => {
                    scan.step(raw, slice, span, lexer.remainder())?;
                    if raw.is_significant() {
                        scan.state.at_line_start = false;
                    }
                }
                Err(()) => {
                    let Some(found) = slice.chars().next() else {
                        continue;
                    };
                    let resume = lexer.span().start + found.len_utf8();
                    let bad = Span::from_range(lexer.span().start..resume);
                    scan.diagnostics.push(Diagnostic::unexpected_character(bad, found));
                    if resume < lexer.span().end {
                        lexer = RawToken::lexer(source);
                        lexer.bump(resume);
                    }
                }
            }
        }

        let file = scan.finish();
        debug!(
            tokens = file.tokens.len(),
            diagnostics = file.diagnostics.len(),
            depth = file.final_brace_depth,
            "translated file"
        );
        Ok(file)
    }
}

type Step = Result<(), InvariantViolation>;

/// State of one translation in progress.
struct Scan<'cat> {
    catalog: &'cat Catalog,
    state: LexerState,
    brackets: BracketStack,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
}

impl<'cat> Scan<'cat> {
    fn new(catalog: &'cat Catalog, is_header: bool) -> Self {
        Scan {
            catalog,
            state: LexerState::new(is_header),
            brackets: BracketStack::new(),
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn finish(self) -> TranslatedFile {
        TranslatedFile {
            tokens: self.tokens,
            is_header: self.state.is_header_file,
            emitted_pragma_once: self.state.emitted_pragma_once,
            final_brace_depth: self.state.brace_depth,
            open_brackets: self.brackets.depth(),
            diagnostics: self.diagnostics,
        }
    }

    fn emit(&mut self, kind: TokenKind, text: impl Into<String>, span: Span) {
        self.tokens.push(Token::new(kind, text, span));
    }

    /// `rest` is the unscanned input after this token.
    fn step(&mut self, raw: RawToken, slice: &str, span: Span, rest: &str) -> Step {
        match raw {
            RawToken::Number => self.emit(TokenKind::Number, slice, span),
            RawToken::Char => self.emit(TokenKind::Char, slice, span),
            RawToken::LineComment | RawToken::BlockComment => {
                self.emit(TokenKind::Comment, slice, span);
            }
            RawToken::Str => self.string(slice, span),
            RawToken::Newline => self.newline(slice, span),
            RawToken::Directive(kind) => self.directive(kind, slice, span),
            RawToken::At(keyword) => self.at_keyword(keyword, slice, span),
            RawToken::LBrace => self.open_brace(span),
            RawToken::RBrace => self.close_brace(span),
            RawToken::LBracket => self.open_bracket(span),
            RawToken::RBracket => return self.close_bracket(span),
            RawToken::Semicolon => self.semicolon(span),
            RawToken::CompoundOp => {
                self.state.last_significant_symbol = slice.chars().last();
                self.emit(TokenKind::Operator, slice, span);
            }
            RawToken::Sign => self.sign(slice, span),
            RawToken::Paren(ParenKind::Type) => self.type_paren(slice, span),
            RawToken::Word(shape) => return self.word(shape, slice, span, rest),
            RawToken::Paren(ParenKind::Open) | RawToken::Other => {
                self.state.last_significant_symbol = slice.chars().next();
                self.emit(TokenKind::Other, slice, span);
            }
        }
        Ok(())
    }

    fn string(&mut self, slice: &str, span: Span) {
        let literal = slice.strip_prefix('@').unwrap_or(slice);
        let text = rewrite_format_placeholders(literal).into_owned();
        self.state.last_significant_symbol = Some('"');
        self.state.last_word = Some(STRING_SENTINEL.to_string());
        self.emit(TokenKind::Str, text, span);
    }

    fn newline(&mut self, slice: &str, span: Span) {
        let text = if slice.bytes().filter(|&b| b == b'\n').count() >= 2 {
            "\n\n"
        } else {
            "\n"
        };
        let indent = self.state.brace_depth;
        self.state.at_line_start = true;
        self.emit(TokenKind::Newline { indent }, text, span);
    }

    fn directive(&mut self, kind: DirectiveKind, slice: &str, span: Span) {
        let text = match kind {
            DirectiveKind::Import => {
                let header = slice.trim_start_matches("#import").trim_start();
                let name = header.get(1..header.len().saturating_sub(1)).unwrap_or("").trim();
                if self.catalog.is_ignored_header(name) {
                    format!("//{slice}")
                } else {
                    format!("#include {header}")
                }
            }
            DirectiveKind::PragmaOnce => {
                self.state.emitted_pragma_once = true;
                slice.to_string()
            }
            DirectiveKind::Define => "#define ".to_string(),
            DirectiveKind::Other => slice.to_string(),
        };
        self.emit(TokenKind::Directive, text, span);
    }

    fn at_keyword(&mut self, keyword: AtKeyword, slice: &str, span: Span) {
        match keyword {
            AtKeyword::ClassOpener => {
                let name = last_word_of(slice);
                self.state.enter_class_zone(name);
                self.state.last_significant_symbol = Some('_');
                trace!(class = name, "entering class zone");
                self.emit(TokenKind::ClassMarker, format!("class {name}"), span);
            }
            AtKeyword::Implementation => {
                self.state.current_class_name = Some(last_word_of(slice).to_string());
                self.emit(TokenKind::ClassMarker, format!("//{slice}"), span);
            }
            AtKeyword::CommentedOut => self.emit(TokenKind::Comment, format!("//{slice}"), span),
            AtKeyword::Selector => self.selector(slice, span),
            AtKeyword::End => {
                let text = if self.state.in_class_zone {
                    // An ivar-less class never opened a brace; zero stays zero.
                    let _ = self.state.close_brace();
                    let name = self.state.current_class_name.as_deref().unwrap_or_default();
                    format!("}}; // {name}")
                } else {
                    "//@end".to_string()
                };
                self.state.leave_class();
                self.state.last_significant_symbol = Some(';');
                self.emit(TokenKind::ClassMarker, text, span);
            }
            AtKeyword::ForwardClass => self.emit(TokenKind::Identifier, "class", span),
            AtKeyword::Bare => {
                self.state.last_significant_symbol = Some('@');
                self.emit(TokenKind::Other, slice, span);
            }
        }
    }

    fn selector(&mut self, slice: &str, span: Span) {
        let inner = slice
            .split_once('(')
            .map_or("", |(_, rest)| rest.trim_end_matches(')'))
            .trim();
        let takes_argument = inner.ends_with(':');
        let method = inner.trim_end_matches(':').trim_end();

        let macro_name = if matches!(self.state.last_word.as_deref(), Some("schedule" | "unschedule")) {
            "schedule_selector("
        } else if !takes_argument {
            "callfunc_selector("
        } else {
            "@selector("
        };
        let target = self.class_member(method, span, "@selector");
        self.emit(TokenKind::Selector, format!("{macro_name}{target})"), span);
    }

    fn open_brace(&mut self, span: Span) {
        if self.state.in_method_declaration() {
            self.finish_declaration('{', span);
            return;
        }
        self.state.open_brace();
        self.state.last_significant_symbol = Some('{');
        self.state.last_word = None;
        self.emit(TokenKind::Brace, "{", span);
    }

    fn close_brace(&mut self, span: Span) {
        // The ivar block of an `@interface` closes with the class at `@end`.
        if self.state.brace_depth == 1 && self.state.in_class_zone {
            return;
        }
        if self.state.close_brace() == BraceClose::Clamped {
            self.diagnostics.push(Diagnostic::unbalanced_closing_brace(span));
        }
        self.state.last_significant_symbol = Some('}');
        self.emit(TokenKind::Brace, "}", span);
    }

    fn semicolon(&mut self, span: Span) {
        if self.state.in_method_declaration() {
            self.finish_declaration(';', span);
            return;
        }
        self.state.last_significant_symbol = Some(';');
        self.emit(TokenKind::Other, ";", span);
    }

    /// `{` or `;` after a method signature.
    fn finish_declaration(&mut self, end: char, span: Span) {
        let kind = if end == '{' {
            self.state.open_brace();
            TokenKind::Brace
        } else {
            TokenKind::Other
        };
        self.state.last_significant_symbol = Some(end);
        self.state.end_method_declaration();
        trace!(depth = self.state.brace_depth, "method declaration finished");
        self.emit(kind, format!("){end}"), span);
    }

    fn open_bracket(&mut self, span: Span) {
        let after_keyword = self
            .state
            .last_word
            .as_deref()
            .is_some_and(|w| SEND_AFTER_KEYWORDS.contains(&w));
        let is_send = match self.state.last_significant_symbol {
            None => true,
            Some(c) => !continues_expression(c) || after_keyword,
        };
        self.brackets.push(is_send);
        self.state.last_significant_symbol = Some('[');
        if !is_send {
            self.emit(TokenKind::Bracket, "[", span);
        }
    }

    fn close_bracket(&mut self, span: Span) -> Step {
        if self.brackets.is_empty() {
            return Err(InvariantViolation::UnmatchedClosingBracket { span });
        }
        let closer = if self.brackets.current_is_message_send() { ')' } else { ']' };
        self.brackets.pop()?;
        self.state.last_significant_symbol = Some(closer);
        self.emit(TokenKind::Bracket, closer.to_string(), span);
        Ok(())
    }

    fn sign(&mut self, slice: &str, span: Span) {
        if self.state.sign_starts_method(self.brackets.is_empty()) {
            self.state.begin_method_declaration(slice == "+");
            trace!(is_static = slice == "+", "method declaration");
            return;
        }
        self.state.last_significant_symbol = slice.chars().next();
        self.emit(TokenKind::Operator, slice, span);
    }

    /// `(Type)` / `(Type **)`: a parameter or return type in a signature,
    /// otherwise a cast.
    fn type_paren(&mut self, slice: &str, span: Span) {
        let inner = slice.trim_start_matches('(').trim_end_matches(')');
        let name: &str = {
            let trimmed = inner.trim_start();
            let end = trimmed
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(trimmed.len());
            &trimmed[..end]
        };
        let stars = inner.matches('*').count();
        let pointer = if stars == 0 {
            String::new()
        } else {
            format!(" {}", "*".repeat(stars))
        };
        let translated = self.translate_name(name, self.state.is_header_file, span);

        let text = if self.state.in_method_declaration() {
            let storage = if self.state.is_static_method && self.state.is_header_file {
                "static "
            } else {
                ""
            };
            format!("{storage}{translated}{pointer}")
        } else {
            self.state.last_word = None;
            format!("({translated}{pointer})")
        };
        self.emit(TokenKind::TypeName, text, span);
    }

    fn word(&mut self, shape: WordShape, slice: &str, span: Span, rest: &str) -> Step {
        match shape {
            WordShape::SelectorPart => {
                let part = slice.trim_end_matches(':').trim_end();
                if self.state.in_method_declaration() {
                    self.declaration_part(part, span);
                    Ok(())
                } else {
                    self.message_part(part, slice, span)
                }
            }
            WordShape::SelfAccess => {
                self.state.last_significant_symbol = Some('>');
                self.emit(TokenKind::Operator, "this->", span);
                Ok(())
            }
            WordShape::Qualified => self.qualified(slice, span),
            WordShape::Plain => {
                if self.state.in_method_declaration() {
                    self.declaration_word(slice, span);
                    Ok(())
                } else {
                    self.identifier(slice, span, rest)
                }
            }
        }
    }

    /// `name:` inside a method signature.
    fn declaration_part(&mut self, part: &str, span: Span) {
        if self.state.first_selector_part_consumed {
            self.emit(TokenKind::MethodPart, format!(", /*{part}*/"), span);
            return;
        }
        let member = self.declared_member(part, span);
        self.state.first_selector_part_consumed = true;
        self.state.last_word = Some(part.to_string());
        self.emit(TokenKind::MethodPart, format!("{member}("), span);
    }

    /// A bare word inside a method signature: the name of a method without
    /// arguments, or a parameter name.
    fn declaration_word(&mut self, word: &str, span: Span) {
        let text = if self.state.first_selector_part_consumed {
            word.to_string()
        } else {
            self.state.first_selector_part_consumed = true;
            format!("{}(", self.declared_member(word, span))
        };
        self.state.last_word = None;
        self.emit(TokenKind::MethodPart, text, span);
    }

    /// `name:` in code. Only meaningful inside a message send; elsewhere
    /// (labels, `case x:`, `a ? b : c`) it is left alone.
    fn message_part(&mut self, part: &str, slice: &str, span: Span) -> Step {
        if !self.brackets.current_is_message_send() {
            self.emit(TokenKind::Identifier, slice, span);
            return Ok(());
        }
        let text = if self.brackets.selector_part_consumed()? {
            format!(", /*{part}*/")
        } else {
            let opener = self
                .catalog
                .translate_method_call(part, self.state.last_word.as_deref());
            self.brackets.mark_selector_part_consumed()?;
            self.state.last_word = Some(part.to_string());
            opener
        };
        self.state.last_significant_symbol = Some(':');
        self.emit(TokenKind::MethodPart, text, span);
        Ok(())
    }

    /// `cocos2d::Name` is already target code.
    fn qualified(&mut self, slice: &str, span: Span) -> Step {
        let text: String = slice.split_whitespace().collect();
        if self.brackets.current_is_message_send() && !self.brackets.object_part_consumed()? {
            self.brackets.mark_object_part_consumed()?;
        }
        let name = text.rsplit("::").next().unwrap_or(&text).to_string();
        self.state.last_significant_symbol = Some('_');
        self.state.last_word = Some(name);
        self.emit(TokenKind::Identifier, text, span);
        Ok(())
    }

    fn identifier(&mut self, word: &str, span: Span, rest: &str) -> Step {
        let (kind, text) = if self.brackets.current_is_message_send() {
            if !self.brackets.object_part_consumed()? {
                self.brackets.mark_object_part_consumed()?;
                (TokenKind::Identifier, self.translate_name(word, false, span))
            } else if !self.brackets.selector_part_consumed()? && rest.trim_start().starts_with(']') {
                self.brackets.mark_selector_part_consumed()?;
                let call = self
                    .catalog
                    .translate_method_call(word, self.state.last_word.as_deref());
                (TokenKind::MethodPart, call)
            } else {
                (TokenKind::Identifier, self.translate_name(word, false, span))
            }
        } else {
            let qualify = self.state.is_header_file;
            (TokenKind::Identifier, self.translate_name(word, qualify, span))
        };

        self.state.last_significant_symbol = Some('_');
        self.state.last_word = Some(if word == "super" {
            "Super".to_string()
        } else {
            word.to_string()
        });
        self.emit(kind, text, span);
        Ok(())
    }

    /// Catalog lookup that also notes names the target deprecates.
    fn translate_name(&mut self, word: &str, qualify: bool, span: Span) -> String {
        let translated = self.catalog.translate_identifier(word, qualify);
        let bare = translated.strip_prefix(TARGET_NAMESPACE).unwrap_or(&translated);
        if self.catalog.is_deprecated(bare.trim_end_matches([' ', '*'])) {
            self.diagnostics.push(Diagnostic::deprecated_name(span, bare));
        }
        translated.into_owned()
    }

    /// Method name in a signature: bare inside `@interface`, `Class::name`
    /// in an implementation.
    fn declared_member(&mut self, name: &str, span: Span) -> String {
        if self.state.in_class_zone {
            name.to_string()
        } else {
            self.class_member(name, span, "method declaration")
        }
    }

    fn class_member(&mut self, name: &str, span: Span, construct: &'static str) -> String {
        match &self.state.current_class_name {
            Some(class) => format!("{class}::{name}"),
            None => {
                self.diagnostics.push(Diagnostic::missing_class_context(span, construct));
                name.to_string()
            }
        }
    }
}

/// Whether a `[` after `symbol` indexes the preceding expression.
fn continues_expression(symbol: char) -> bool {
    symbol.is_alphanumeric() || matches!(symbol, '_' | ')' | ']')
}

/// `@interface Foo` → `Foo`.
fn last_word_of(slice: &str) -> &str {
    slice.split_whitespace().last().unwrap_or_default()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests;
