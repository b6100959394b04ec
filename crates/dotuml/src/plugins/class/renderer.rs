//! Class diagram renderer
//!
//! Renders a [`NamespaceCollection`] to Mermaid class diagram text. Object
//! bodies are nested inside their namespace blocks; relationships follow in
//! one flat, deduplicated section after every body.

use std::collections::HashSet;

use anyhow::Result;
use indexmap::IndexSet;
use tracing::{debug, info, span, trace, Level};

use super::database::{
    ClassInfo, EnumInfo, InterfaceInfo, MethodInfo, NamespaceCollection, ObjectInfo, PropertyInfo,
    Visibility,
};
use crate::core::{sanitize_name, trim_trailing_blank, IndentedText, Renderer, DIAGRAM_KEYWORD};

/// Body rendering capability shared by every object kind
pub trait DiagramBody {
    /// Opening line of the block, without indentation
    fn header(&self) -> String;

    /// Lines inside the block, without indentation
    fn members(&self) -> Vec<String>;
}

fn visibility_marker(token: &str, member: &str) -> String {
    let marker = Visibility::marker(token);
    if marker.is_empty() && !token.trim().is_empty() {
        debug!(member, visibility = token, "Unrecognized visibility, rendering without marker");
    }
    marker
}

fn property_line(property: &PropertyInfo) -> String {
    format!(
        "{}{} : {}",
        visibility_marker(&property.visibility, &property.name),
        property.name,
        property.type_ref.sanitized_name()
    )
}

fn method_line(method: &MethodInfo) -> String {
    let arguments: Vec<String> = method
        .arguments()
        .iter()
        .map(|a| format!("{} {}", a.type_ref.sanitized_name(), a.name))
        .collect();
    let return_type = if method.return_type.is_void() {
        String::new()
    } else {
        format!(" : {}", method.return_type.sanitized_name())
    };
    format!(
        "{}{}({}){}",
        visibility_marker(&method.visibility, &method.name),
        method.name,
        arguments.join(", "),
        return_type
    )
}

impl DiagramBody for ClassInfo {
    fn header(&self) -> String {
        format!("class {} {{", sanitize_name(self.name()))
    }

    fn members(&self) -> Vec<String> {
        self.properties()
            .iter()
            .map(property_line)
            .chain(self.methods().iter().map(method_line))
            .collect()
    }
}

impl DiagramBody for InterfaceInfo {
    fn header(&self) -> String {
        format!("class {} {{", sanitize_name(self.name()))
    }

    fn members(&self) -> Vec<String> {
        std::iter::once("<<interface>>".to_string())
            .chain(self.properties().iter().map(property_line))
            .chain(self.methods().iter().map(method_line))
            .collect()
    }
}

impl DiagramBody for EnumInfo {
    fn header(&self) -> String {
        format!("class {} {{", sanitize_name(self.name()))
    }

    fn members(&self) -> Vec<String> {
        std::iter::once("<<enumeration>>".to_string())
            .chain(self.values().iter().cloned())
            .collect()
    }
}

impl ObjectInfo {
    /// Body rendering capability of the wrapped object
    pub fn as_body(&self) -> &dyn DiagramBody {
        match self {
            ObjectInfo::Class(info) => info,
            ObjectInfo::Interface(info) => info,
            ObjectInfo::Enum(info) => info,
        }
    }
}

/// Class diagram renderer
#[derive(Debug, Clone)]
pub struct ClassDiagramRenderer {
    indent_width: usize,
}

impl ClassDiagramRenderer {
    pub fn new() -> Self {
        Self::with_indent_width(4)
    }

    pub fn with_indent_width(indent_width: usize) -> Self {
        Self { indent_width }
    }

    fn write_object(&self, text: &mut IndentedText, object: &ObjectInfo) {
        let body = object.as_body();
        let mut members = body.members();
        trim_trailing_blank(&mut members);

        trace!(object = object.name(), kind = object.kind(), members = members.len(), "Rendering object");
        text.line(&body.header());
        text.indent().lines(&members);
        text.dedent().line("}");
    }

    /// Every relationship line across the model, deduplicated, first-seen order
    ///
    /// Edges touching a declared enum are dropped on either end.
    pub fn relationship_lines(&self, model: &NamespaceCollection) -> Vec<String> {
        let enums: HashSet<String> = model
            .objects()
            .filter(|object| matches!(object, ObjectInfo::Enum(_)))
            .map(|object| sanitize_name(object.name()))
            .collect();

        let mut seen = IndexSet::new();
        for object in model.objects() {
            let Some(relational) = object.as_relational() else {
                continue;
            };
            for edge in relational.relationships() {
                if enums.contains(&edge.from) || enums.contains(&edge.to) {
                    trace!(edge = %edge, "Dropping edge to enum");
                    continue;
                }
                let line = edge.to_string().trim().to_string();
                if !line.is_empty() {
                    seen.insert(line);
                }
            }
        }
        seen.into_iter().collect()
    }

    /// Render the model to diagram text
    pub fn render_text(&self, model: &NamespaceCollection) -> String {
        let render_span = span!(
            Level::INFO,
            "render_class_diagram",
            namespaces = model.namespace_count(),
            objects = model.object_count()
        );
        let _enter = render_span.enter();

        let mut text = IndentedText::new(self.indent_width);
        text.line(DIAGRAM_KEYWORD);
        text.indent();

        for namespace in model.namespaces() {
            if namespace.is_empty() {
                debug!(namespace = namespace.name(), "Skipping empty namespace");
                continue;
            }

            let named = namespace.is_named();
            if named {
                text.line(&format!("namespace {} {{", sanitize_name(namespace.name())));
                text.indent();
            }

            for object in namespace.objects() {
                self.write_object(&mut text, object);
            }

            if named {
                text.dedent().line("}");
            }
        }

        let relationships = self.relationship_lines(model);
        debug!(count = relationships.len(), "Collected relationships");
        text.lines(&relationships);

        info!(output_len = text.as_str().len(), "Rendering completed");
        text.into_string()
    }
}

impl Default for ClassDiagramRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer<NamespaceCollection> for ClassDiagramRenderer {
    type Output = String;

    fn render(&self, model: &NamespaceCollection) -> Result<String> {
        Ok(self.render_text(model))
    }

    fn name(&self) -> &'static str {
        "mermaid-class"
    }

    fn version(&self) -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    fn format(&self) -> &'static str {
        "mermaid"
    }
}

impl NamespaceCollection {
    /// Render the collection with the default renderer
    pub fn render(&self) -> String {
        ClassDiagramRenderer::new().render_text(self)
    }
}
