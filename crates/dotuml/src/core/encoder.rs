//! Core encoder trait for transport artifacts
//!
//! An encoder wraps finished diagram text into something a consumer can
//! store or fetch: a markdown fence, an HTML page or an image URL.

use anyhow::Result;

use super::OutputFormat;

/// Core trait for transport encoders
///
/// # Example
/// ```
/// use dotuml::core::Encoder;
/// use dotuml::plugins::transport::MarkdownEncoder;
///
/// let encoder = MarkdownEncoder::new();
/// let artifact = encoder.encode("classDiagram\n").unwrap();
/// assert!(artifact.starts_with("```mermaid"));
/// ```
pub trait Encoder: Send + Sync {
    /// Encode diagram text into the transport representation
    fn encode(&self, diagram: &str) -> Result<String>;

    /// Get the name of this encoder
    fn name(&self) -> &'static str;

    /// Output format produced by this encoder
    fn format(&self) -> OutputFormat;

    /// File extension for artifacts of this encoder
    fn extension(&self) -> &'static str {
        self.format().extension()
    }
}
