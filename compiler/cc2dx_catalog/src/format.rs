//! Format-string placeholder rewriting.
//!
//! Objective-C format strings print objects with `%@`; Cocos2d-x formats
//! through `printf`, where the closest match is `%s`. The `%` escape doubles
//! itself, so only an odd-length run of `%` in front of `@` is a real
//! placeholder: `%%@` is a literal percent sign followed by `@`.

use std::borrow::Cow;

/// Rewrite object placeholders (`%@`) in a string literal to `%s`.
///
/// A maximal run of `%` directly followed by `@` keeps its percent signs;
/// when the run is odd the `@` becomes `s`, when it is even nothing changes.
/// Strings without any `%@` are returned borrowed.
pub fn rewrite_format_placeholders(text: &str) -> Cow<'_, str> {
    if !text.contains("%@") {
        return Cow::Borrowed(text);
    }

    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;
    for ch in text.chars() {
        match ch {
            '%' => {
                run += 1;
                out.push('%');
            }
            '@' if run % 2 == 1 => {
                run = 0;
                out.push('s');
            }
            _ => {
                run = 0;
                out.push(ch);
            }
        }
    }
    Cow::Owned(out)
}
