//! Generation settings and output format selection

use std::fmt;
use std::str::FromStr;

use super::DiagramError;

/// Mermaid keyword that opens every generated diagram
pub const DIAGRAM_KEYWORD: &str = "classDiagram";

/// Default remote rendering service
pub const DEFAULT_RENDER_HOST: &str = "https://kroki.io";

/// Default major version of the Mermaid browser script
pub const DEFAULT_MERMAID_VERSION: &str = "10";

/// Compression level hint for the image transport
///
/// Each level selects both the deflate effort and the second byte of the
/// zlib header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum CompressionLevel {
    /// Stored blocks only
    NoCompression,
    /// Fastest deflate
    Fastest,
    /// Fast deflate
    Fast,
    /// Library default
    #[default]
    Default,
    /// Best compression
    Optimal,
}

impl CompressionLevel {
    /// Second byte of the zlib header (FLG) for this level
    pub fn header_byte(self) -> u8 {
        match self {
            CompressionLevel::NoCompression | CompressionLevel::Fastest => 0x01,
            CompressionLevel::Fast => 0x5E,
            CompressionLevel::Default => 0x9C,
            CompressionLevel::Optimal => 0xDA,
        }
    }

    /// Deflate effort passed to the compressor
    pub fn compression(self) -> flate2::Compression {
        match self {
            CompressionLevel::NoCompression => flate2::Compression::none(),
            CompressionLevel::Fastest => flate2::Compression::fast(),
            CompressionLevel::Fast => flate2::Compression::new(5),
            CompressionLevel::Default => flate2::Compression::default(),
            CompressionLevel::Optimal => flate2::Compression::best(),
        }
    }
}

/// Output artifact produced by a generation run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Fenced Mermaid block for markdown documents
    Markdown,
    /// Standalone HTML page rendered in the browser
    Html,
    /// PNG rendered by a remote service
    Image,
}

impl OutputFormat {
    /// All supported formats
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Markdown, OutputFormat::Html, OutputFormat::Image]
    }

    /// File extension used for default output paths
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
            OutputFormat::Image => "png",
        }
    }

    /// Short human description
    pub fn description(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "Fenced mermaid block for markdown files",
            OutputFormat::Html => "Standalone HTML page rendered with mermaid.js",
            OutputFormat::Image => "PNG image rendered by a remote kroki service",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = DiagramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "markdown" | "md" | "fenced" => Ok(OutputFormat::Markdown),
            "html" | "hypertext" => Ok(OutputFormat::Html),
            "image" | "png" => Ok(OutputFormat::Image),
            _ => Err(DiagramError::unknown_output_format(s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Html => write!(f, "html"),
            OutputFormat::Image => write!(f, "image"),
        }
    }
}

/// Settings for one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Spaces per indentation level in the diagram text
    pub indent_width: usize,
    /// Base URL of the remote rendering service
    pub render_host: String,
    /// Mermaid script version referenced by the HTML page
    pub mermaid_version: String,
    /// Compression hint for the image transport
    pub compression: CompressionLevel,
    /// Insert placeholder nodes for referenced base types and interfaces
    pub include_referenced_types: bool,
}

impl GenerateConfig {
    pub fn new() -> Self {
        Self {
            indent_width: 4,
            render_host: DEFAULT_RENDER_HOST.to_string(),
            mermaid_version: DEFAULT_MERMAID_VERSION.to_string(),
            compression: CompressionLevel::default(),
            include_referenced_types: true,
        }
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn with_render_host(mut self, host: impl Into<String>) -> Self {
        self.render_host = host.into();
        self
    }

    pub fn with_mermaid_version(mut self, version: impl Into<String>) -> Self {
        self.mermaid_version = version.into();
        self
    }

    pub fn with_compression(mut self, level: CompressionLevel) -> Self {
        self.compression = level;
        self
    }

    pub fn with_referenced_types(mut self, include: bool) -> Self {
        self.include_referenced_types = include;
        self
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self::new()
    }
}
