//! Standalone HTML page encoder
//!
//! The page loads the Mermaid ES module from a CDN, renders every
//! `.mermaid` container on load and shows parse errors in the page.

use anyhow::Result;
use tracing::debug;

use crate::core::{Encoder, IndentedText, OutputFormat, DEFAULT_MERMAID_VERSION};

/// Wraps escaped diagram text in a minimal HTML document
#[derive(Debug, Clone)]
pub struct HtmlEncoder {
    mermaid_version: String,
    indent_width: usize,
}

impl HtmlEncoder {
    pub fn new() -> Self {
        Self::with_mermaid_version(DEFAULT_MERMAID_VERSION)
    }

    pub fn with_mermaid_version(version: impl Into<String>) -> Self {
        Self {
            mermaid_version: version.into(),
            indent_width: 4,
        }
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn mermaid_version(&self) -> &str {
        &self.mermaid_version
    }

    fn script_url(&self) -> String {
        format!(
            "https://cdn.jsdelivr.net/npm/mermaid@{}/dist/mermaid.esm.min.mjs",
            self.mermaid_version
        )
    }
}

impl Default for HtmlEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for HtmlEncoder {
    fn encode(&self, diagram: &str) -> Result<String> {
        let escaped = html_escape::encode_safe(diagram);
        debug!(
            input_len = diagram.len(),
            escaped_len = escaped.len(),
            "Escaped diagram for HTML"
        );

        let mut page = IndentedText::new(self.indent_width);
        page.line("<!DOCTYPE html>");
        page.line("<html lang=\"en\">");
        page.line("<head>");
        page.indent()
            .line("<meta charset=\"UTF-8\">")
            .line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">")
            .line("<title>Mermaid Diagram</title>")
            .line("<script type=\"module\">");
        page.indent()
            .line(&format!("import mermaid from '{}';", self.script_url()))
            .line("mermaid.parseError = (err) => {")
            .indent()
            .line("const target = document.getElementById('diagram-error');")
            .line("target.textContent = String(err && err.message ? err.message : err);")
            .line("target.hidden = false;")
            .dedent()
            .line("};")
            .line("mermaid.initialize({ startOnLoad: true });");
        page.dedent().line("</script>");
        page.dedent().line("</head>");
        page.line("<body>");
        page.indent().line("<pre id=\"diagram-error\" hidden></pre>");
        page.line("<div class=\"mermaid\">");
        page.indent().lines(escaped.lines());
        page.dedent().line("</div>");
        page.dedent().line("</body>");
        page.line("</html>");
        Ok(page.into_string())
    }

    fn name(&self) -> &'static str {
        "html"
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}
