//! Content stream assembly: text escaping and text-showing operators.

use std::borrow::Cow;
use std::fmt::Write as _;

use super::options::{ControlCharPolicy, LayoutOptions};
use super::FONT_RESOURCE;
use crate::error::{Error, Result};

/// Escape a string for use inside a PDF literal string `( ... )`.
///
/// Backslash is escaped first so the escapes added for parentheses are not
/// escaped again.
pub fn escape_text(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '(', ')']) {
        return Cow::Borrowed(value);
    }

    let escaped = value
        .replace('\\', "\\\\")
        .replace('(', "\\(")
        .replace(')', "\\)");
    Cow::Owned(escaped)
}

/// Apply the control character policy to one line.
pub fn sanitize_line(index: usize, line: &str, policy: ControlCharPolicy) -> Result<Cow<'_, str>> {
    let Some(position) = line.chars().position(char::is_control) else {
        return Ok(Cow::Borrowed(line));
    };

    match policy {
        ControlCharPolicy::Reject => Err(Error::InvalidLine {
            index,
            reason: format!("control character at position {}", position),
        }),
        ControlCharPolicy::Replace => {
            log::debug!("Replacing control characters in line {}", index);
            Ok(Cow::Owned(
                line.chars()
                    .map(|c| if c.is_control() { ' ' } else { c })
                    .collect(),
            ))
        }
    }
}

/// Text operators for a single page, one absolutely positioned line per row.
#[derive(Debug, Clone)]
pub struct ContentStream {
    commands: Vec<String>,
    lines: usize,
}

impl ContentStream {
    /// Start a text object with the page font selected.
    pub fn begin(options: &LayoutOptions) -> Self {
        Self {
            commands: vec![
                "BT".to_string(),
                format!("/{} {} Tf", FONT_RESOURCE, options.font_size),
            ],
            lines: 0,
        }
    }

    /// Append a line at the next baseline. `text` must already be sanitized.
    pub fn push_line(&mut self, text: &str, options: &LayoutOptions) {
        let y = options.baseline(self.lines);
        self.commands
            .push(format!("1 0 0 1 {} {} Tm", options.margin_left, y));

        let mut show = String::with_capacity(text.len() + 5);
        let _ = write!(show, "({}) Tj", escape_text(text));
        self.commands.push(show);

        self.lines += 1;
    }

    /// Number of lines placed so far.
    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// Close the text object and return the encoded payload.
    pub fn finish(mut self) -> Vec<u8> {
        self.commands.push("ET".to_string());
        self.commands.join("\n").into_bytes()
    }
}
