//! Fenced markdown encoder

use anyhow::Result;

use crate::core::{Encoder, OutputFormat};

/// Fence marker followed by the language tag
pub const FENCE_OPEN: &str = "```mermaid";
pub const FENCE_CLOSE: &str = "```";

/// Wraps diagram text in a mermaid code fence
#[derive(Debug, Clone, Default)]
pub struct MarkdownEncoder;

impl MarkdownEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl Encoder for MarkdownEncoder {
    fn encode(&self, diagram: &str) -> Result<String> {
        let mut output = String::with_capacity(diagram.len() + FENCE_OPEN.len() + 8);
        output.push_str(FENCE_OPEN);
        output.push('\n');
        output.push_str(diagram);
        if !diagram.is_empty() && !diagram.ends_with('\n') {
            output.push('\n');
        }
        output.push_str(FENCE_CLOSE);
        output.push('\n');
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "markdown"
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}
