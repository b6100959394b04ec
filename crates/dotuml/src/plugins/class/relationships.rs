//! Relationship inference
//!
//! Derives diagram edges from the facts stored on classes and interfaces.
//! Per class the edges come out in a fixed order: realizations, the
//! generalization, property edges, then dependency edges.

use std::fmt;

use super::database::{ClassInfo, InterfaceInfo, PropertyInfo};
use super::type_ref::TypeRef;
use crate::core::sanitize_name;

/// Relationship type between objects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    Inheritance, // <|--
    Realization, // <|..
    Aggregation, // o--
    Association, // -->
    Dependency,  // ..>
}

impl RelationshipKind {
    /// Mermaid arrow for this kind, written left to right
    pub fn arrow(self) -> &'static str {
        match self {
            RelationshipKind::Inheritance => "<|--",
            RelationshipKind::Realization => "<|..",
            RelationshipKind::Aggregation => "o--",
            RelationshipKind::Association => "-->",
            RelationshipKind::Dependency => "..>",
        }
    }
}

/// A directed edge as written in the diagram: `from arrow [cardinality] to`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relationship {
    pub from: String,
    pub to: String,
    pub kind: RelationshipKind,
    pub cardinality: Option<String>,
}

impl Relationship {
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: RelationshipKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
            cardinality: None,
        }
    }

    /// Cardinality label placed next to the target
    pub fn with_cardinality(mut self, cardinality: impl Into<String>) -> Self {
        self.cardinality = Some(cardinality.into());
        self
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.from, self.kind.arrow())?;
        if let Some(cardinality) = &self.cardinality {
            write!(f, "\"{}\" ", cardinality)?;
        }
        write!(f, "{}", self.to)
    }
}

/// Objects that contribute edges to the relationship section
pub trait Relational {
    fn relationships(&self) -> Vec<Relationship>;
}

/// Edge for one property, if any
///
/// Aggregates and nullables only produce an edge when nothing primitive sits
/// at their core; created types always produce a direct reference.
pub fn property_relationship(owner: &str, property: &PropertyInfo) -> Option<Relationship> {
    let owner = sanitize_name(owner);
    match &property.type_ref {
        TypeRef::Aggregate(_, element) if !element.is_primitive_at_core() => Some(Relationship::new(
            owner,
            element.sanitized_name(),
            RelationshipKind::Aggregation,
        )),
        TypeRef::Created(_) => Some(Relationship::new(
            owner,
            property.type_ref.sanitized_name(),
            RelationshipKind::Association,
        )),
        TypeRef::Nullable(_, element) if !element.is_primitive_at_core() => Some(
            Relationship::new(owner, element.sanitized_name(), RelationshipKind::Association)
                .with_cardinality("0..1"),
        ),
        _ => None,
    }
}

impl Relational for ClassInfo {
    fn relationships(&self) -> Vec<Relationship> {
        let name = sanitize_name(self.name());
        let mut edges = Vec::new();

        for interface in self.interfaces() {
            edges.push(Relationship::new(
                sanitize_name(interface),
                name.clone(),
                RelationshipKind::Realization,
            ));
        }

        if let Some(base) = self.base_type() {
            edges.push(Relationship::new(
                base.sanitized_name(),
                name.clone(),
                RelationshipKind::Inheritance,
            ));
        }

        edges.extend(
            self.properties()
                .iter()
                .filter_map(|property| property_relationship(self.name(), property)),
        );

        edges.extend(
            self.dependencies()
                .iter()
                .filter(|dependency| !dependency.type_ref.is_primitive_at_core())
                .map(|dependency| {
                    Relationship::new(
                        name.clone(),
                        dependency.type_ref.sanitized_name(),
                        RelationshipKind::Dependency,
                    )
                }),
        );

        edges
    }
}

impl Relational for InterfaceInfo {
    fn relationships(&self) -> Vec<Relationship> {
        self.properties()
            .iter()
            .filter_map(|property| property_relationship(self.name(), property))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::class::database::{ClassBuilder, DependencyInfo, InterfaceBuilder};

    fn property(name: &str, token: &str) -> PropertyInfo {
        PropertyInfo::new(name, "public", TypeRef::classify(token))
    }

    fn lines(edges: &[Relationship]) -> Vec<String> {
        edges.iter().map(|e| e.to_string()).collect()
    }

    #[test]
    fn test_aggregation_for_container_of_created() {
        let edge = property_relationship("Order", &property("Items", "List<Product>"));
        assert_eq!(edge.unwrap().to_string(), "Order o-- Product");
    }

    #[test]
    fn test_aggregation_for_array() {
        let edge = property_relationship("Order", &property("Lines", "OrderLine[]"));
        assert_eq!(edge.unwrap().to_string(), "Order o-- OrderLine");
    }

    #[test]
    fn test_association_for_created() {
        let edge = property_relationship("Order", &property("Customer", "Customer"));
        assert_eq!(edge.unwrap().to_string(), "Order --> Customer");
    }

    #[test]
    fn test_association_for_non_container_generic_is_sanitized() {
        let edge = property_relationship("Cache", &property("Map", "Dictionary<string, Order>"));
        assert_eq!(edge.unwrap().to_string(), "Cache --> Dictionary~string, Order~");
    }

    #[test]
    fn test_optional_reference() {
        let edge = property_relationship("Order", &property("Coupon", "Coupon?"));
        assert_eq!(edge.unwrap().to_string(), "Order --> \"0..1\" Coupon");
    }

    #[test]
    fn test_primitive_members_have_no_edge() {
        for token in ["int", "string", "int[]", "List<string>", "decimal?", "HashSet<bool>"] {
            assert!(
                property_relationship("Order", &property("X", token)).is_none(),
                "unexpected edge for {}",
                token
            );
        }
    }

    #[test]
    fn test_nested_primitive_wrappers_have_no_edge() {
        for token in ["List<int?>", "int?[]", "IList<List<string>>", "bool[]?"] {
            assert!(
                property_relationship("Holder", &property("X", token)).is_none(),
                "unexpected edge for {}",
                token
            );
        }
    }

    #[test]
    fn test_wrapped_primitive_dependencies_are_skipped() {
        let mut builder = ClassBuilder::new("Service");
        builder
            .add_dependency(DependencyInfo::new(TypeRef::classify("int[]")))
            .add_dependency(DependencyInfo::new(TypeRef::classify("int?")))
            .add_dependency(DependencyInfo::new(TypeRef::classify("List<string>")))
            .add_dependency(DependencyInfo::new(TypeRef::classify("IOptions<Settings>")));
        let class = builder.build();
        assert_eq!(lines(&class.relationships()), vec!["Service ..> IOptions~Settings~"]);
    }

    #[test]
    fn test_nested_container_element_is_aggregated() {
        let edge = property_relationship("Grid", &property("Rows", "List<List<Cell>>"));
        assert_eq!(edge.unwrap().to_string(), "Grid o-- List~Cell~");
    }

    #[test]
    fn test_class_edges_in_category_order() {
        let mut builder = ClassBuilder::new("Invoice");
        builder
            .inherits(TypeRef::classify("Document"))
            .implements("IPrintable")
            .add_property(property("Customer", "Customer"))
            .add_dependency(DependencyInfo::new(TypeRef::classify("ILogger")));
        let class = builder.build();

        assert_eq!(
            lines(&class.relationships()),
            vec![
                "IPrintable <|.. Invoice",
                "Document <|-- Invoice",
                "Invoice --> Customer",
                "Invoice ..> ILogger",
            ]
        );
    }

    #[test]
    fn test_generic_class_names_sanitized() {
        let mut builder = ClassBuilder::new("Repository<T>");
        builder.implements("IRepository<T>");
        let class = builder.build();
        assert_eq!(lines(&class.relationships()), vec!["IRepository~T~ <|.. Repository~T~"]);
    }

    #[test]
    fn test_interface_edges_only_from_properties() {
        let mut builder = InterfaceBuilder::new("IOrderSource");
        builder
            .add_property(property("Orders", "IEnumerable<Order>"))
            .add_property(property("Count", "int"));
        let interface = builder.build();
        assert_eq!(lines(&interface.relationships()), vec!["IOrderSource o-- Order"]);
    }
}
