//! Shared text utilities for diagram generation
//!
//! Contains name escaping for Mermaid syntax and an indentation-aware line
//! builder used by the renderer and the transport encoders.

use std::fmt;

/// Escape generic brackets for Mermaid class diagram syntax.
///
/// Every `<` and `>` becomes `~`. The function is total and idempotent.
///
/// # Example
/// ```
/// use dotuml::core::sanitize_name;
///
/// assert_eq!(sanitize_name("List<Product>"), "List~Product~");
/// assert_eq!(sanitize_name("Order"), "Order");
/// ```
pub fn sanitize_name(name: &str) -> String {
    name.replace(['<', '>'], "~")
}

/// Drop trailing blank lines from a block of lines
pub fn trim_trailing_blank(lines: &mut Vec<String>) {
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
}

/// Line builder that prefixes each line with the current indentation
#[derive(Debug, Clone)]
pub struct IndentedText {
    buffer: String,
    level: usize,
    indent_width: usize,
}

impl IndentedText {
    pub fn new(indent_width: usize) -> Self {
        Self {
            buffer: String::new(),
            level: 0,
            indent_width,
        }
    }

    /// Current indentation level
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    /// Decrease indentation; never goes below zero
    pub fn dedent(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    /// Append one line at the current indentation, trailing whitespace removed
    pub fn line(&mut self, text: &str) -> &mut Self {
        let text = text.trim_end();
        if !text.is_empty() {
            self.buffer
                .extend(std::iter::repeat(' ').take(self.level * self.indent_width));
            self.buffer.push_str(text);
        }
        self.buffer.push('\n');
        self
    }

    /// Append a block of lines at the current indentation
    pub fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.line(line.as_ref());
        }
        self
    }

    /// Append pre-formatted text verbatim
    pub fn raw(&mut self, text: &str) -> &mut Self {
        self.buffer.push_str(text);
        self
    }

    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }
}

impl Default for IndentedText {
    fn default() -> Self {
        Self::new(4)
    }
}

impl fmt::Display for IndentedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buffer)
    }
}
