//! Transport encoders
//!
//! Turn finished diagram text into a fenced markdown block, an HTML page or
//! an image URL for a remote rendering service.

mod fenced;
mod html;
mod image;
mod zlib;

pub use fenced::{MarkdownEncoder, FENCE_CLOSE, FENCE_OPEN};
pub use html::HtmlEncoder;
pub use image::{ImageEncoder, DIAGRAM_TYPE};
pub use zlib::{adler32, zlib_envelope, ZLIB_CMF};

use crate::core::{Encoder, GenerateConfig, OutputFormat};

/// Build the encoder for an output format
pub fn encoder_for(format: OutputFormat, config: &GenerateConfig) -> Box<dyn Encoder> {
    match format {
        OutputFormat::Markdown => Box::new(MarkdownEncoder::new()),
        OutputFormat::Html => Box::new(
            HtmlEncoder::with_mermaid_version(&config.mermaid_version)
                .with_indent_width(config.indent_width),
        ),
        OutputFormat::Image => Box::new(
            ImageEncoder::with_host(&config.render_host).with_compression(config.compression),
        ),
    }
}
