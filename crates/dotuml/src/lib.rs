//! dotuml - Mermaid class diagrams from declared-type facts
//!
//! Reads structural facts about classes, interfaces and enums, infers the
//! relationships between them and renders a Mermaid `classDiagram`, which
//! can be wrapped as fenced markdown, an HTML page or an image URL.
//!
//! # Quick Start
//!
//! ```rust
//! use dotuml::{generate, OutputFormat};
//!
//! let facts = r#"{ "units": [ { "name": "Status.cs", "namespaces": [ { "name": "",
//!     "objects": [ { "kind": "enum", "name": "Status", "members": ["Open", "Closed"] } ] } ] } ] }"#;
//! let markdown = generate(facts, OutputFormat::Markdown).unwrap();
//! assert!(markdown.contains("<<enumeration>>"));
//! ```
//!
//! # Advanced Usage
//!
//! Build the model directly when facts come from somewhere else:
//!
//! ```rust
//! use dotuml::prelude::*;
//!
//! let mut order = ClassBuilder::new("Order");
//! order.add_property(PropertyInfo::new("Items", "public", TypeRef::classify("List<Product>")));
//!
//! let mut model = NamespaceCollection::new();
//! model.namespace_mut("Shop").add_object(order);
//!
//! let diagram = ClassDiagramRenderer::new().render(&model).unwrap();
//! assert!(diagram.contains("+Items : List~Product~"));
//! assert!(diagram.contains("Order o-- Product"));
//! ```

pub mod core;
pub mod plugins;

pub use core::*;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        CompressionLevel, DiagramError, Encoder, GenerateConfig, OutputFormat, Renderer,
    };
    pub use crate::plugins::class::{
        ClassBuilder, ClassDiagramRenderer, DependencyInfo, EnumBuilder, FactDocument,
        FactSource, InterfaceBuilder, JsonFactSource, MethodArgumentInfo, MethodInfo,
        NamespaceCollection, NamespaceInfo, ObjectInfo, PropertyInfo, Relational, TypeRef,
    };
    pub use crate::plugins::orchestrator::{Generation, Generator};
    pub use crate::plugins::transport::{encoder_for, HtmlEncoder, ImageEncoder, MarkdownEncoder};
}

/// Generate an artifact from a JSON fact document
///
/// Units that fail validation are skipped; see [`plugins::orchestrator::Generator`]
/// for access to the extraction report.
///
/// # Example
/// ```rust
/// use dotuml::{generate, OutputFormat};
///
/// let url = generate(r#"{ "units": [] }"#, OutputFormat::Image).unwrap();
/// assert!(url.starts_with("https://kroki.io/mermaid/png/"));
/// ```
pub fn generate(facts_json: &str, format: OutputFormat) -> anyhow::Result<String> {
    use crate::plugins::class::FactDocument;
    use crate::plugins::orchestrator::Generator;

    let document = FactDocument::from_json(facts_json)?;
    let generation = Generator::default().generate(&document, format)?;
    Ok(generation.artifact)
}

/// Render a JSON fact document to plain diagram text
///
/// # Example
/// ```rust
/// let text = dotuml::render(r#"{ "units": [] }"#).unwrap();
/// assert_eq!(text, "classDiagram\n");
/// ```
pub fn render(facts_json: &str) -> anyhow::Result<String> {
    use crate::plugins::class::FactDocument;
    use crate::plugins::orchestrator::Generator;

    let document = FactDocument::from_json(facts_json)?;
    let generator = Generator::default();
    let (collection, _) = generator.extract(&document)?;
    generator.render(&collection)
}
