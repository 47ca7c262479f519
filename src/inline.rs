//! Inline emphasis and link parsing for text runs.
//!
//! Bold and italic are plain toggles: they do not have to balance, and an
//! unterminated marker styles the rest of the text.

use crate::element::Span;

#[derive(Default)]
struct InlineState {
    spans: Vec<Span>,
    buffer: String,
    bold: bool,
    italic: bool,
}

impl InlineState {
    fn flush(&mut self) {
        if self.buffer.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.buffer);
        self.spans.push(Span {
            text,
            bold: self.bold,
            italic: self.italic,
            underline: false,
        });
    }
}

/// Parse `**bold**`, `*italic*` and `[text](url)` into styled spans.
pub fn parse_inline(text: &str) -> Vec<Span> {
    let mut state = InlineState::default();
    let mut rest = text;

    while let Some(ch) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix("**") {
            state.flush();
            state.bold = !state.bold;
            rest = after;
        } else if let Some(after) = rest.strip_prefix('*') {
            state.flush();
            state.italic = !state.italic;
            rest = after;
        } else if let Some((label, after)) = link(rest) {
            state.flush();
            state.spans.push(Span {
                text: label.to_string(),
                bold: state.bold,
                italic: state.italic,
                underline: true,
            });
            rest = after;
        } else {
            state.buffer.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }

    state.flush();
    state.spans
}

/// Match `[label](target)` at the start of `text`, returning the label and
/// what follows the closing parenthesis. The target is discarded.
fn link(text: &str) -> Option<(&str, &str)> {
    let inner = text.strip_prefix('[')?;
    let close = inner.find(']')?;
    let after_label = inner[close + 1..].strip_prefix('(')?;
    let end = after_label.find(')')?;
    Some((&inner[..close], &after_label[end + 1..]))
}

/// Concatenated text of a run, styling dropped.
pub fn plain_text(spans: &[Span]) -> String {
    spans.iter().map(|s| s.text.as_str()).collect()
}
