//! Core renderer trait for diagram output
//!
//! A renderer turns an accumulated model into diagram text.

use anyhow::Result;

/// Core trait for diagram renderers
///
/// # Example
/// ```
/// use dotuml::core::Renderer;
/// use dotuml::plugins::class::{ClassDiagramRenderer, NamespaceCollection};
///
/// let model = NamespaceCollection::new();
/// let renderer = ClassDiagramRenderer::new();
/// let output = renderer.render(&model).unwrap();
/// assert!(output.starts_with("classDiagram"));
/// ```
pub trait Renderer<M>: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the model into the output format
    fn render(&self, model: &M) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the version of this renderer
    fn version(&self) -> &'static str;

    /// Get the supported output format
    fn format(&self) -> &'static str;
}
