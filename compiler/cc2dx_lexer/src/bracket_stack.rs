//! Open-bracket tracking.
//!
//! Every `[` pushes a frame, every `]` pops one. A frame that opened a
//! message send remembers whether the receiver and the first selector
//! keyword have been seen, which decides how the next identifier or
//! `name:` inside it is rewritten.

use smallvec::SmallVec;

use crate::InvariantViolation;

/// One open `[`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BracketFrame {
    /// `[` started a message send rather than a subscript.
    pub is_message_send: bool,
    /// The receiver expression has been emitted.
    pub object_part_consumed: bool,
    /// The first selector keyword has been emitted.
    pub selector_part_consumed: bool,
}

impl BracketFrame {
    pub fn new(is_message_send: bool) -> Self {
        BracketFrame {
            is_message_send,
            ..BracketFrame::default()
        }
    }

    /// Whether anything of this send has been emitted yet.
    fn has_output(self) -> bool {
        self.object_part_consumed || self.selector_part_consumed
    }
}

/// Stack of open brackets, innermost last.
///
/// Nesting deeper than eight is rare in real code, so frames live inline.
#[derive(Clone, Debug, Default)]
pub struct BracketStack {
    frames: SmallVec<[BracketFrame; 8]>,
}

impl BracketStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, is_message_send: bool) {
        self.frames.push(BracketFrame::new(is_message_send));
    }

    /// Close the innermost bracket.
    ///
    /// A nested send that produced output is a complete expression, so the
    /// enclosing frame now has its receiver: `[[Foo alloc] init]`.
    pub fn pop(&mut self) -> Result<BracketFrame, InvariantViolation> {
        let frame = self
            .frames
            .pop()
            .ok_or(InvariantViolation::EmptyBracketStack { operation: "pop" })?;
        if frame.has_output() {
            if let Some(outer) = self.frames.last_mut() {
                if outer.is_message_send {
                    outer.object_part_consumed = true;
                }
            }
        }
        Ok(frame)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Whether the innermost bracket is a message send. False when empty.
    pub fn current_is_message_send(&self) -> bool {
        self.frames.last().is_some_and(|f| f.is_message_send)
    }

    pub fn object_part_consumed(&self) -> Result<bool, InvariantViolation> {
        Ok(self.top("object_part_consumed")?.object_part_consumed)
    }

    pub fn selector_part_consumed(&self) -> Result<bool, InvariantViolation> {
        Ok(self.top("selector_part_consumed")?.selector_part_consumed)
    }

    /// Record the receiver. No effect on a subscript frame.
    pub fn mark_object_part_consumed(&mut self) -> Result<(), InvariantViolation> {
        let frame = self.top_mut("mark_object_part_consumed")?;
        if frame.is_message_send {
            frame.object_part_consumed = true;
        }
        Ok(())
    }

    /// Record the first selector keyword. No effect on a subscript frame.
    pub fn mark_selector_part_consumed(&mut self) -> Result<(), InvariantViolation> {
        let frame = self.top_mut("mark_selector_part_consumed")?;
        if frame.is_message_send {
            frame.selector_part_consumed = true;
        }
        Ok(())
    }

    fn top(&self, operation: &'static str) -> Result<&BracketFrame, InvariantViolation> {
        self.frames
            .last()
            .ok_or(InvariantViolation::EmptyBracketStack { operation })
    }

    fn top_mut(&mut self, operation: &'static str) -> Result<&mut BracketFrame, InvariantViolation> {
        self.frames
            .last_mut()
            .ok_or(InvariantViolation::EmptyBracketStack { operation })
    }
}
