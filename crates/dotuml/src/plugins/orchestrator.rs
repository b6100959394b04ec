//! Generation pipeline
//!
//! The generator runs the whole flow for one invocation:
//! FactSource → NamespaceCollection → diagram text → transport artifact

use anyhow::Result;
use tracing::{debug, info, span, warn, Level};

use crate::core::{DiagramError, GenerateConfig, OutputFormat, Renderer};
use crate::plugins::class::{ClassDiagramRenderer, ExtractionReport, FactSource, NamespaceCollection};
use crate::plugins::transport::encoder_for;

/// Output of one generation run
#[derive(Debug)]
pub struct Generation {
    /// Rendered diagram text
    pub diagram: String,
    /// Transport artifact for the requested format
    pub artifact: String,
    pub format: OutputFormat,
    /// Units that could not be extracted
    pub report: ExtractionReport,
}

/// Pipeline that turns declaration facts into a diagram artifact
#[derive(Debug, Clone, Default)]
pub struct Generator {
    config: GenerateConfig,
}

impl Generator {
    pub fn new(config: GenerateConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GenerateConfig {
        &self.config
    }

    /// Load facts and merge them into one collection
    ///
    /// Individual unit failures end up in the report. The run only fails
    /// when the source cannot be read or when no unit survives.
    pub fn extract(&self, source: &dyn FactSource) -> Result<(NamespaceCollection, ExtractionReport)> {
        let extract_span = span!(Level::INFO, "pipeline_extract", source = %source.describe());
        let _enter = extract_span.enter();

        let document = source.load()?;
        let (collection, report) = document.to_namespaces(&self.config);

        if !document.units.is_empty() && report.units_merged == 0 {
            warn!(failures = report.failure_count(), "No unit could be extracted");
            return Err(DiagramError::extraction_failure(
                source.describe(),
                format!("all {} units failed extraction", document.units.len()),
            )
            .into());
        }

        for failure in &report.failures {
            warn!(error = %failure, "Unit skipped");
        }
        Ok((collection, report))
    }

    /// Render the collection to diagram text
    pub fn render(&self, collection: &NamespaceCollection) -> Result<String> {
        let renderer = ClassDiagramRenderer::with_indent_width(self.config.indent_width);
        renderer.render(collection)
    }

    /// Wrap diagram text for the requested format
    pub fn encode(&self, diagram: &str, format: OutputFormat) -> Result<String> {
        let encode_span = span!(Level::DEBUG, "pipeline_encode", %format);
        let _enter = encode_span.enter();

        let encoder = encoder_for(format, &self.config);
        let artifact = encoder.encode(diagram)?;
        debug!(encoder = encoder.name(), artifact_len = artifact.len(), "Encoding completed");
        Ok(artifact)
    }

    /// Run the full pipeline
    pub fn generate(&self, source: &dyn FactSource, format: OutputFormat) -> Result<Generation> {
        let generate_span = span!(Level::INFO, "generate_diagram", %format);
        let _enter = generate_span.enter();

        info!("Starting diagram generation");
        let (collection, report) = self.extract(source)?;
        let diagram = self.render(&collection)?;
        let artifact = self.encode(&diagram, format)?;

        info!(
            objects = collection.object_count(),
            skipped_units = report.failure_count(),
            "Diagram generation completed"
        );
        Ok(Generation {
            diagram,
            artifact,
            format,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::class::{FactDocument, NamespaceFacts, ObjectFacts, ObjectKind, UnitFacts};

    fn document(objects: Vec<ObjectFacts>) -> FactDocument {
        FactDocument {
            units: vec![UnitFacts {
                name: "Shop.cs".to_string(),
                namespaces: vec![NamespaceFacts {
                    name: String::new(),
                    objects,
                }],
            }],
        }
    }

    fn enumeration(name: &str, members: &[&str]) -> ObjectFacts {
        ObjectFacts {
            kind: ObjectKind::Enum,
            name: name.to_string(),
            base_type: None,
            implements: Vec::new(),
            properties: Vec::new(),
            methods: Vec::new(),
            members: members.iter().map(|m| m.to_string()).collect(),
            constructor_parameters: Vec::new(),
        }
    }

    #[test]
    fn test_generate_markdown() {
        let source = document(vec![enumeration("Status", &["Open", "Closed"])]);
        let generation = Generator::default()
            .generate(&source, OutputFormat::Markdown)
            .unwrap();

        assert_eq!(
            generation.diagram,
            "classDiagram\n    class Status {\n        <<enumeration>>\n        Open\n        Closed\n    }\n"
        );
        assert!(generation.artifact.starts_with("```mermaid\nclassDiagram\n"));
        assert!(generation.report.is_clean());
    }

    #[test]
    fn test_generate_image_url() {
        let source = document(vec![enumeration("Status", &["Open"])]);
        let generation = Generator::default()
            .generate(&source, OutputFormat::Image)
            .unwrap();
        assert!(generation.artifact.starts_with("https://kroki.io/mermaid/png/"));
    }

    #[test]
    fn test_empty_document_is_not_an_error() {
        let generation = Generator::default()
            .generate(&FactDocument::default(), OutputFormat::Markdown)
            .unwrap();
        assert_eq!(generation.diagram, "classDiagram\n");
    }

    #[test]
    fn test_all_units_failing_is_fatal() {
        let mut nameless = enumeration("", &[]);
        nameless.name = " ".to_string();
        let err = Generator::default()
            .generate(&document(vec![nameless]), OutputFormat::Markdown)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DiagramError>(),
            Some(DiagramError::ExtractionFailure { .. })
        ));
    }

    #[test]
    fn test_indent_width_from_config() {
        let source = document(vec![enumeration("Status", &["Open"])]);
        let generator = Generator::new(GenerateConfig::default().with_indent_width(2));
        let (collection, _) = generator.extract(&source).unwrap();
        let diagram = generator.render(&collection).unwrap();
        assert!(diagram.contains("\n  class Status {\n    <<enumeration>>\n"));
    }
}
