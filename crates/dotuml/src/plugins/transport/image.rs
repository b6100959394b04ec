//! Image URL encoder
//!
//! Produces a GET URL for a kroki-compatible rendering service:
//! `{host}/mermaid/png/{payload}`, where the payload is the URL-safe base64
//! of the zlib envelope of the diagram text.

use anyhow::Result;
use base64::{engine::general_purpose::URL_SAFE, Engine as _};
use tracing::{debug, span, Level};

use super::zlib::zlib_envelope;
use crate::core::{CompressionLevel, DiagramError, Encoder, OutputFormat, DEFAULT_RENDER_HOST};

/// Diagram type segment of the rendering service path
pub const DIAGRAM_TYPE: &str = "mermaid";

/// Encodes diagram text into a rendering-service image URL
#[derive(Debug, Clone)]
pub struct ImageEncoder {
    host: String,
    compression: CompressionLevel,
}

impl ImageEncoder {
    pub fn new() -> Self {
        Self::with_host(DEFAULT_RENDER_HOST)
    }

    pub fn with_host(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            compression: CompressionLevel::default(),
        }
    }

    pub fn with_compression(mut self, compression: CompressionLevel) -> Self {
        self.compression = compression;
        self
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// URL-safe base64 of the zlib envelope, padding kept
    pub fn payload(&self, diagram: &str) -> Result<String> {
        let envelope = zlib_envelope(diagram.as_bytes(), self.compression)
            .map_err(|e| DiagramError::transport_failure(format!("compression failed: {}", e)))?;
        Ok(URL_SAFE.encode(envelope))
    }
}

impl Default for ImageEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder for ImageEncoder {
    fn encode(&self, diagram: &str) -> Result<String> {
        let encode_span = span!(Level::DEBUG, "encode_image_url", host = %self.host);
        let _enter = encode_span.enter();

        let payload = self.payload(diagram)?;
        debug!(
            input_len = diagram.len(),
            payload_len = payload.len(),
            compression = ?self.compression,
            "Encoded image payload"
        );
        Ok(format!(
            "{}/{}/png/{}",
            self.host.trim_end_matches('/'),
            DIAGRAM_TYPE,
            payload
        ))
    }

    fn name(&self) -> &'static str {
        "image"
    }

    fn format(&self) -> OutputFormat {
        OutputFormat::Image
    }
}
