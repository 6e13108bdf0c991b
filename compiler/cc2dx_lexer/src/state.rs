//! Per-file lexer state.

/// What the translator is currently inside.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    /// Between a leading `-`/`+` and the `;` or `{` that ends the method
    /// signature.
    MethodDeclarationHeader,
}

/// Result of closing a brace.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum BraceClose {
    Closed,
    /// Depth was already zero and stays there.
    Clamped,
}

/// Everything the translator carries from one token to the next.
///
/// Created fresh for every file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LexerState {
    pub mode: Mode,
    pub brace_depth: u32,
    /// Between `@interface`/`@protocol` and `@end`.
    pub in_class_zone: bool,
    pub current_class_name: Option<String>,
    pub is_static_method: bool,
    pub first_selector_part_consumed: bool,
    /// Last character of the most recent significant token.
    pub last_significant_symbol: Option<char>,
    pub last_word: Option<String>,
    pub is_header_file: bool,
    pub emitted_pragma_once: bool,
    /// No significant token yet on the current line.
    pub at_line_start: bool,
}

impl LexerState {
    pub fn new(is_header_file: bool) -> Self {
        LexerState {
            mode: Mode::Normal,
            brace_depth: 0,
            in_class_zone: false,
            current_class_name: None,
            is_static_method: false,
            first_selector_part_consumed: false,
            last_significant_symbol: None,
            last_word: None,
            is_header_file,
            emitted_pragma_once: false,
            at_line_start: true,
        }
    }

    pub fn in_method_declaration(&self) -> bool {
        self.mode == Mode::MethodDeclarationHeader
    }

    pub fn open_brace(&mut self) {
        self.brace_depth = self.brace_depth.saturating_add(1);
    }

    pub fn close_brace(&mut self) -> BraceClose {
        match self.brace_depth.checked_sub(1) {
            Some(depth) => {
                self.brace_depth = depth;
                BraceClose::Closed
            }
            None => BraceClose::Clamped,
        }
    }

    pub fn begin_method_declaration(&mut self, is_static: bool) {
        self.mode = Mode::MethodDeclarationHeader;
        self.is_static_method = is_static;
        self.first_selector_part_consumed = false;
    }

    /// Back to normal code after a method signature.
    pub fn end_method_declaration(&mut self) {
        self.mode = Mode::Normal;
        self.is_static_method = false;
        self.first_selector_part_consumed = false;
        self.last_word = None;
    }

    pub fn enter_class_zone(&mut self, name: &str) {
        self.in_class_zone = true;
        self.current_class_name = Some(name.to_string());
    }

    /// `@end`: leave the class, whichever kind it was.
    pub fn leave_class(&mut self) {
        self.in_class_zone = false;
        self.current_class_name = None;
    }

    /// Whether a leading `-`/`+` here starts a method signature.
    ///
    /// After `}` or `;` or at the very start of a file it always does.
    /// Inside an `@interface` body, the first token of a line with no open
    /// bracket does too, so declarations after an ivar block or another
    /// `@end`-less construct are still recognized.
    pub fn sign_starts_method(&self, brackets_empty: bool) -> bool {
        matches!(self.last_significant_symbol, None | Some('}' | ';'))
            || (self.in_class_zone && self.at_line_start && brackets_empty)
    }
}
