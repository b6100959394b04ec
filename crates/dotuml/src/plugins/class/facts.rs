//! Declaration fact reader
//!
//! The fact extractor writes one JSON document per run. Each unit (usually
//! one source file) lists namespaces and the objects declared in them. This
//! module validates units independently and merges the good ones into a
//! single [`NamespaceCollection`].

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, span, trace, warn, Level};

use super::database::{
    ClassBuilder, DependencyInfo, EnumBuilder, InterfaceBuilder, MethodArgumentInfo, MethodInfo,
    NamespaceCollection, NamespaceInfo, ObjectInfo, PropertyInfo,
};
use super::type_ref::TypeRef;
use crate::core::{DiagramError, GenerateConfig};

/// Kind of a declared object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Class,
    Interface,
    Enum,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyFacts {
    pub name: String,
    #[serde(default)]
    pub visibility: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterFacts {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodFacts {
    pub name: String,
    #[serde(default)]
    pub visibility: String,
    #[serde(default)]
    pub return_type: String,
    #[serde(default)]
    pub parameters: Vec<ParameterFacts>,
}

/// Facts about one declared class, interface or enum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectFacts {
    pub kind: ObjectKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
    #[serde(default)]
    pub implements: Vec<String>,
    #[serde(default)]
    pub properties: Vec<PropertyFacts>,
    #[serde(default)]
    pub methods: Vec<MethodFacts>,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub constructor_parameters: Vec<String>,
}

impl ObjectFacts {
    fn validate(&self) -> std::result::Result<(), String> {
        if self.name.trim().is_empty() {
            return Err(format!("{:?} declared without a name", self.kind));
        }
        match self.kind {
            ObjectKind::Enum if !self.properties.is_empty() || !self.methods.is_empty() => Err(
                format!("enum '{}' carries properties or methods", self.name),
            ),
            ObjectKind::Interface
                if self.base_type.is_some() || !self.constructor_parameters.is_empty() =>
            {
                Err(format!(
                    "interface '{}' carries a base type or constructor parameters",
                    self.name
                ))
            }
            _ => Ok(()),
        }
    }

    fn properties(&self) -> impl Iterator<Item = PropertyInfo> + '_ {
        self.properties
            .iter()
            .map(|p| PropertyInfo::new(&p.name, &p.visibility, TypeRef::classify(&p.type_name)))
    }

    fn methods(&self) -> impl Iterator<Item = MethodInfo> + '_ {
        self.methods.iter().map(|m| {
            m.parameters.iter().fold(
                MethodInfo::new(&m.name, &m.visibility, TypeRef::classify(&m.return_type)),
                |method, p| {
                    method.with_argument(MethodArgumentInfo::new(
                        &p.name,
                        TypeRef::classify(&p.type_name),
                    ))
                },
            )
        })
    }

    /// Build the frozen object
    fn to_object(&self) -> ObjectInfo {
        match self.kind {
            ObjectKind::Class => {
                let mut builder = ClassBuilder::new(&self.name);
                if let Some(base) = self.base_type() {
                    builder.inherits(TypeRef::classify(base));
                }
                for interface in &self.implements {
                    builder.implements(interface.trim());
                }
                for property in self.properties() {
                    builder.add_property(property);
                }
                for method in self.methods() {
                    builder.add_method(method);
                }
                for parameter in &self.constructor_parameters {
                    builder.add_dependency(DependencyInfo::new(TypeRef::classify(parameter)));
                }
                builder.into()
            }
            ObjectKind::Interface => {
                let mut builder = InterfaceBuilder::new(&self.name);
                for property in self.properties() {
                    builder.add_property(property);
                }
                for method in self.methods() {
                    builder.add_method(method);
                }
                builder.into()
            }
            ObjectKind::Enum => {
                let mut builder = EnumBuilder::new(&self.name);
                for member in &self.members {
                    builder.add_value(member);
                }
                builder.into()
            }
        }
    }

    fn base_type(&self) -> Option<&str> {
        self.base_type
            .as_deref()
            .map(str::trim)
            .filter(|base| !base.is_empty())
    }

    /// Empty nodes for the base type and implemented interfaces
    fn referenced_types(&self) -> Vec<ObjectInfo> {
        if self.kind != ObjectKind::Class {
            return Vec::new();
        }
        self.base_type()
            .map(|base| ObjectInfo::from(ClassBuilder::new(base)))
            .into_iter()
            .chain(
                self.implements
                    .iter()
                    .map(|interface| ObjectInfo::from(InterfaceBuilder::new(interface.trim()))),
            )
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NamespaceFacts {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub objects: Vec<ObjectFacts>,
}

/// Facts from one extraction unit
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitFacts {
    pub name: String,
    #[serde(default)]
    pub namespaces: Vec<NamespaceFacts>,
}

impl UnitFacts {
    /// Validate and build this unit's local collection
    ///
    /// Any invalid object discards the whole unit.
    pub fn to_collection(&self) -> std::result::Result<NamespaceCollection, DiagramError> {
        let mut collection = NamespaceCollection::new();
        for namespace in &self.namespaces {
            let mut info = NamespaceInfo::new(namespace.name.trim());
            for object in &namespace.objects {
                object
                    .validate()
                    .map_err(|message| DiagramError::extraction_failure(&self.name, message))?;
                info.add_object(object.to_object());
            }
            collection.add_namespace(info);
        }
        Ok(collection)
    }

    /// Placeholder nodes this unit references, keyed by namespace
    fn referenced_types(&self) -> Vec<(&str, ObjectInfo)> {
        self.namespaces
            .iter()
            .flat_map(|namespace| {
                namespace
                    .objects
                    .iter()
                    .flat_map(ObjectFacts::referenced_types)
                    .map(move |object| (namespace.name.trim(), object))
            })
            .collect()
    }
}

/// Per-unit failures collected during one run
#[derive(Debug, Default)]
pub struct ExtractionReport {
    pub failures: Vec<DiagramError>,
    pub units_merged: usize,
}

impl ExtractionReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }
}

/// Complete output of one extractor run
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FactDocument {
    #[serde(default)]
    pub units: Vec<UnitFacts>,
}

impl FactDocument {
    pub fn from_json(json: &str) -> std::result::Result<Self, DiagramError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: &Path) -> std::result::Result<Self, DiagramError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Merge every valid unit into one collection, in document order
    ///
    /// With `include_referenced_types`, base types and interfaces that no
    /// unit declares are added as empty nodes after the merge.
    pub fn to_namespaces(&self, config: &GenerateConfig) -> (NamespaceCollection, ExtractionReport) {
        let extract_span = span!(Level::INFO, "extract_facts", units = self.units.len());
        let _enter = extract_span.enter();

        let mut collection = NamespaceCollection::new();
        let mut report = ExtractionReport::default();
        let mut referenced = Vec::new();

        for unit in &self.units {
            match unit.to_collection() {
                Ok(local) => {
                    debug!(unit = %unit.name, objects = local.object_count(), "Merging unit");
                    collection.merge(local);
                    referenced.extend(unit.referenced_types());
                    report.units_merged += 1;
                }
                Err(err) => {
                    warn!(unit = %unit.name, error = %err, "Skipping unit");
                    report.failures.push(err);
                }
            }
        }

        if config.include_referenced_types {
            for (namespace, placeholder) in referenced {
                if !collection.contains_name(placeholder.name()) {
                    trace!(namespace, name = placeholder.name(), "Adding referenced type");
                    collection.namespace_mut(namespace).add_object(placeholder);
                }
            }
        }

        info!(
            namespaces = collection.namespace_count(),
            objects = collection.object_count(),
            failures = report.failure_count(),
            "Fact extraction completed"
        );
        (collection, report)
    }
}

/// Where declaration facts come from
pub trait FactSource {
    /// Human-readable description of the source, used in logs
    fn describe(&self) -> String;

    fn load(&self) -> Result<FactDocument>;
}

impl FactSource for FactDocument {
    fn describe(&self) -> String {
        format!("in-memory document ({} units)", self.units.len())
    }

    fn load(&self) -> Result<FactDocument> {
        Ok(self.clone())
    }
}

/// Facts read from a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFactSource {
    path: PathBuf,
}

impl JsonFactSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FactSource for JsonFactSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<FactDocument> {
        Ok(FactDocument::from_path(&self.path)?)
    }
}
