//! Class diagram plugin
//!
//! Classifies type tokens, accumulates declared objects per namespace,
//! infers relationships and renders Mermaid class diagram text.

mod database;
mod facts;
mod relationships;
mod renderer;
mod type_ref;

pub use database::{
    ClassBuilder, ClassInfo, DependencyInfo, EnumBuilder, EnumInfo, InterfaceBuilder,
    InterfaceInfo, MethodArgumentInfo, MethodInfo, NamespaceCollection, NamespaceInfo, ObjectInfo,
    PropertyInfo, Visibility,
};
pub use facts::{
    ExtractionReport, FactDocument, FactSource, JsonFactSource, MethodFacts, NamespaceFacts,
    ObjectFacts, ObjectKind, ParameterFacts, PropertyFacts, UnitFacts,
};
pub use relationships::{property_relationship, Relational, Relationship, RelationshipKind};
pub use renderer::{ClassDiagramRenderer, DiagramBody};
pub use type_ref::{TypeRef, CONTAINER_TYPES, PRIMITIVE_TYPES};
