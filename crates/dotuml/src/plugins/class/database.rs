//! Class diagram model
//!
//! Stores classes, interfaces and enums per namespace. Objects are assembled
//! with mutable builders and frozen into hashable values before they enter a
//! deduplicating collection.

use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use super::relationships::Relational;
use super::type_ref::TypeRef;

/// Accessibility of a member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,    // +
    Protected, // #
    Private,   // -
    Internal,  // ~
}

impl Visibility {
    /// Find the accessibility keyword in a modifier list
    ///
    /// The token may hold several modifiers (`public static`,
    /// `protected internal`); the first accessibility keyword wins.
    pub fn from_token(token: &str) -> Option<Self> {
        token.split_whitespace().find_map(|word| match word {
            "public" => Some(Visibility::Public),
            "protected" => Some(Visibility::Protected),
            "private" => Some(Visibility::Private),
            "internal" => Some(Visibility::Internal),
            _ => None,
        })
    }

    pub fn to_char(self) -> char {
        match self {
            Visibility::Public => '+',
            Visibility::Protected => '#',
            Visibility::Private => '-',
            Visibility::Internal => '~',
        }
    }

    /// Diagram marker for a raw visibility token, empty when unrecognized
    pub fn marker(token: &str) -> String {
        Self::from_token(token)
            .map(|v| v.to_char().to_string())
            .unwrap_or_default()
    }
}

/// A property (field or auto-property) of a class or interface
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyInfo {
    pub name: String,
    pub visibility: String,
    pub type_ref: TypeRef,
}

impl PropertyInfo {
    pub fn new(name: impl Into<String>, visibility: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            visibility: visibility.into(),
            type_ref,
        }
    }
}

/// A method parameter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodArgumentInfo {
    pub name: String,
    pub type_ref: TypeRef,
}

impl MethodArgumentInfo {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
        }
    }
}

/// A method with its ordered parameters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MethodInfo {
    pub name: String,
    pub visibility: String,
    pub return_type: TypeRef,
    arguments: Vec<MethodArgumentInfo>,
}

impl MethodInfo {
    pub fn new(name: impl Into<String>, visibility: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            visibility: visibility.into(),
            return_type,
            arguments: Vec::new(),
        }
    }

    pub fn add_argument(&mut self, argument: MethodArgumentInfo) {
        self.arguments.push(argument);
    }

    pub fn with_argument(mut self, argument: MethodArgumentInfo) -> Self {
        self.add_argument(argument);
        self
    }

    pub fn arguments(&self) -> &[MethodArgumentInfo] {
        &self.arguments
    }
}

/// A non-primitive constructor parameter type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyInfo {
    pub type_ref: TypeRef,
}

impl DependencyInfo {
    pub fn new(type_ref: TypeRef) -> Self {
        Self { type_ref }
    }
}

/// A frozen class
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassInfo {
    name: String,
    base_type: Option<TypeRef>,
    interfaces: Vec<String>,
    properties: Vec<PropertyInfo>,
    methods: Vec<MethodInfo>,
    dependencies: Vec<DependencyInfo>,
}

impl ClassInfo {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_type(&self) -> Option<&TypeRef> {
        self.base_type.as_ref()
    }

    pub fn interfaces(&self) -> &[String] {
        &self.interfaces
    }

    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }

    pub fn dependencies(&self) -> &[DependencyInfo] {
        &self.dependencies
    }
}

/// A frozen interface
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InterfaceInfo {
    name: String,
    properties: Vec<PropertyInfo>,
    methods: Vec<MethodInfo>,
}

impl InterfaceInfo {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    pub fn methods(&self) -> &[MethodInfo] {
        &self.methods
    }
}

/// A frozen enum
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnumInfo {
    name: String,
    values: Vec<String>,
}

impl EnumInfo {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// Accumulates facts about one class
#[derive(Debug, Clone)]
pub struct ClassBuilder {
    info: ClassInfo,
}

impl ClassBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            info: ClassInfo {
                name: name.into(),
                base_type: None,
                interfaces: Vec::new(),
                properties: Vec::new(),
                methods: Vec::new(),
                dependencies: Vec::new(),
            },
        }
    }

    /// Set the base type; a later call replaces an earlier one
    pub fn inherits(&mut self, base_type: TypeRef) -> &mut Self {
        self.info.base_type = Some(base_type);
        self
    }

    pub fn implements(&mut self, interface: impl Into<String>) -> &mut Self {
        self.info.interfaces.push(interface.into());
        self
    }

    pub fn add_property(&mut self, property: PropertyInfo) -> &mut Self {
        self.info.properties.push(property);
        self
    }

    pub fn add_method(&mut self, method: MethodInfo) -> &mut Self {
        self.info.methods.push(method);
        self
    }

    /// Record a constructor dependency; primitive types, wrapped or not, are ignored
    pub fn add_dependency(&mut self, dependency: DependencyInfo) -> &mut Self {
        if dependency.type_ref.is_primitive_at_core() {
            trace!(class = %self.info.name, dependency = %dependency.type_ref, "Skipping primitive dependency");
        } else {
            self.info.dependencies.push(dependency);
        }
        self
    }

    pub fn build(self) -> ClassInfo {
        self.info
    }
}

/// Accumulates facts about one interface
#[derive(Debug, Clone)]
pub struct InterfaceBuilder {
    info: InterfaceInfo,
}

impl InterfaceBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            info: InterfaceInfo {
                name: name.into(),
                properties: Vec::new(),
                methods: Vec::new(),
            },
        }
    }

    pub fn add_property(&mut self, property: PropertyInfo) -> &mut Self {
        self.info.properties.push(property);
        self
    }

    pub fn add_method(&mut self, method: MethodInfo) -> &mut Self {
        self.info.methods.push(method);
        self
    }

    pub fn build(self) -> InterfaceInfo {
        self.info
    }
}

/// Accumulates the members of one enum
#[derive(Debug, Clone)]
pub struct EnumBuilder {
    info: EnumInfo,
}

impl EnumBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            info: EnumInfo {
                name: name.into(),
                values: Vec::new(),
            },
        }
    }

    pub fn add_value(&mut self, value: impl Into<String>) -> &mut Self {
        self.info.values.push(value.into());
        self
    }

    pub fn build(self) -> EnumInfo {
        self.info
    }
}

/// Any object that can appear in a class diagram
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectInfo {
    Class(ClassInfo),
    Interface(InterfaceInfo),
    Enum(EnumInfo),
}

impl ObjectInfo {
    pub fn name(&self) -> &str {
        match self {
            ObjectInfo::Class(info) => info.name(),
            ObjectInfo::Interface(info) => info.name(),
            ObjectInfo::Enum(info) => info.name(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ObjectInfo::Class(_) => "class",
            ObjectInfo::Interface(_) => "interface",
            ObjectInfo::Enum(_) => "enum",
        }
    }

    /// Relationship capability; enums have none
    pub fn as_relational(&self) -> Option<&dyn Relational> {
        match self {
            ObjectInfo::Class(info) => Some(info),
            ObjectInfo::Interface(info) => Some(info),
            ObjectInfo::Enum(_) => None,
        }
    }
}

impl From<ClassInfo> for ObjectInfo {
    fn from(info: ClassInfo) -> Self {
        ObjectInfo::Class(info)
    }
}

impl From<InterfaceInfo> for ObjectInfo {
    fn from(info: InterfaceInfo) -> Self {
        ObjectInfo::Interface(info)
    }
}

impl From<EnumInfo> for ObjectInfo {
    fn from(info: EnumInfo) -> Self {
        ObjectInfo::Enum(info)
    }
}

impl From<ClassBuilder> for ObjectInfo {
    fn from(builder: ClassBuilder) -> Self {
        ObjectInfo::Class(builder.build())
    }
}

impl From<InterfaceBuilder> for ObjectInfo {
    fn from(builder: InterfaceBuilder) -> Self {
        ObjectInfo::Interface(builder.build())
    }
}

impl From<EnumBuilder> for ObjectInfo {
    fn from(builder: EnumBuilder) -> Self {
        ObjectInfo::Enum(builder.build())
    }
}

/// Objects declared in one namespace, deduplicated by structural equality
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceInfo {
    name: String,
    objects: IndexSet<ObjectInfo>,
}

impl NamespaceInfo {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: IndexSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the namespace renders as a named block
    pub fn is_named(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Insert an object; returns false when an equal object is already present
    pub fn add_object(&mut self, object: impl Into<ObjectInfo>) -> bool {
        self.objects.insert(object.into())
    }

    pub fn add_objects<I>(&mut self, objects: I)
    where
        I: IntoIterator,
        I::Item: Into<ObjectInfo>,
    {
        for object in objects {
            self.add_object(object);
        }
    }

    /// Objects in first-seen order
    pub fn objects(&self) -> impl Iterator<Item = &ObjectInfo> {
        self.objects.iter()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Union another namespace's objects into this one
    pub fn merge(&mut self, other: NamespaceInfo) {
        self.objects.extend(other.objects);
    }
}

/// All namespaces of one generation run, merged by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceCollection {
    namespaces: IndexMap<String, NamespaceInfo>,
}

impl NamespaceCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a namespace, merging into an existing one of the same name
    pub fn add_namespace(&mut self, namespace: NamespaceInfo) {
        match self.namespaces.get_mut(namespace.name()) {
            Some(existing) => existing.merge(namespace),
            None => {
                self.namespaces.insert(namespace.name.clone(), namespace);
            }
        }
    }

    /// Get or create a namespace by name
    pub fn namespace_mut(&mut self, name: &str) -> &mut NamespaceInfo {
        self.namespaces
            .entry(name.to_string())
            .or_insert_with(|| NamespaceInfo::new(name))
    }

    pub fn get_namespace(&self, name: &str) -> Option<&NamespaceInfo> {
        self.namespaces.get(name)
    }

    /// Namespaces in first-seen order
    pub fn namespaces(&self) -> impl Iterator<Item = &NamespaceInfo> {
        self.namespaces.values()
    }

    /// Every object across all namespaces, in rendering order
    pub fn objects(&self) -> impl Iterator<Item = &ObjectInfo> {
        self.namespaces.values().flat_map(NamespaceInfo::objects)
    }

    /// Whether any namespace holds an object with this name
    pub fn contains_name(&self, name: &str) -> bool {
        self.objects().any(|object| object.name() == name)
    }

    pub fn namespace_count(&self) -> usize {
        self.namespaces.len()
    }

    pub fn object_count(&self) -> usize {
        self.namespaces.values().map(NamespaceInfo::object_count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.object_count() == 0
    }

    /// Dedup-union another collection into this one
    pub fn merge(&mut self, other: NamespaceCollection) {
        for namespace in other.namespaces.into_values() {
            self.add_namespace(namespace);
        }
    }
}

impl FromIterator<NamespaceInfo> for NamespaceCollection {
    fn from_iter<I: IntoIterator<Item = NamespaceInfo>>(iter: I) -> Self {
        let mut collection = NamespaceCollection::new();
        for namespace in iter {
            collection.add_namespace(namespace);
        }
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_class() -> ClassInfo {
        let mut builder = ClassBuilder::new("Order");
        builder
            .add_property(PropertyInfo::new("Id", "public", TypeRef::classify("int")))
            .add_method(MethodInfo::new("Total", "public", TypeRef::classify("decimal")));
        builder.build()
    }

    #[test]
    fn test_create_empty_class() {
        let class = ClassBuilder::new("Animal").build();
        assert_eq!(class.name(), "Animal");
        assert!(class.base_type().is_none());
        assert!(class.properties().is_empty());
        assert!(class.methods().is_empty());
        assert!(class.dependencies().is_empty());
    }

    #[test]
    fn test_inherits_last_write_wins() {
        let mut builder = ClassBuilder::new("Dog");
        builder.inherits(TypeRef::classify("Animal"));
        builder.inherits(TypeRef::classify("Mammal"));
        let class = builder.build();
        assert_eq!(class.base_type().map(TypeRef::name), Some("Mammal"));
    }

    #[test]
    fn test_duplicate_members_are_kept() {
        let mut builder = ClassBuilder::new("Person");
        let property = PropertyInfo::new("Name", "public", TypeRef::classify("string"));
        builder.add_property(property.clone()).add_property(property);
        builder.implements("IEntity").implements("IEntity");
        let class = builder.build();
        assert_eq!(class.properties().len(), 2);
        assert_eq!(class.interfaces(), ["IEntity", "IEntity"]);
    }

    #[test]
    fn test_primitive_dependency_ignored() {
        let mut builder = ClassBuilder::new("Service");
        builder
            .add_dependency(DependencyInfo::new(TypeRef::classify("int")))
            .add_dependency(DependencyInfo::new(TypeRef::classify("ILogger")))
            .add_dependency(DependencyInfo::new(TypeRef::classify("string")));
        let class = builder.build();
        assert_eq!(class.dependencies().len(), 1);
        assert_eq!(class.dependencies()[0].type_ref.name(), "ILogger");
    }

    #[test]
    fn test_method_arguments_in_order() {
        let method = MethodInfo::new("Add", "public", TypeRef::classify("void"))
            .with_argument(MethodArgumentInfo::new("item", TypeRef::classify("Product")))
            .with_argument(MethodArgumentInfo::new("count", TypeRef::classify("int")));
        let names: Vec<_> = method.arguments().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["item", "count"]);
    }

    #[test]
    fn test_visibility_from_token() {
        assert_eq!(Visibility::from_token("public"), Some(Visibility::Public));
        assert_eq!(Visibility::from_token("protected"), Some(Visibility::Protected));
        assert_eq!(Visibility::from_token("private"), Some(Visibility::Private));
        assert_eq!(Visibility::from_token("internal"), Some(Visibility::Internal));
        assert_eq!(Visibility::from_token("public static"), Some(Visibility::Public));
        assert_eq!(Visibility::from_token("static readonly"), None);
        assert_eq!(Visibility::from_token(""), None);
        assert_eq!(Visibility::from_token("Public"), None);
    }

    #[test]
    fn test_visibility_marker() {
        assert_eq!(Visibility::marker("public"), "+");
        assert_eq!(Visibility::marker("protected"), "#");
        assert_eq!(Visibility::marker("private"), "-");
        assert_eq!(Visibility::marker("internal"), "~");
        assert_eq!(Visibility::marker("friend"), "");
    }

    #[test]
    fn test_namespace_dedup_structural() {
        let mut ns = NamespaceInfo::new("Shop");
        assert!(ns.add_object(order_class()));
        assert!(!ns.add_object(order_class()));
        assert_eq!(ns.object_count(), 1);

        // Same name, different members: both kept
        assert!(ns.add_object(ClassBuilder::new("Order")));
        assert_eq!(ns.object_count(), 2);
    }

    #[test]
    fn test_same_name_different_kind_not_equal() {
        let class: ObjectInfo = ClassBuilder::new("Shape").into();
        let interface: ObjectInfo = InterfaceBuilder::new("Shape").into();
        assert_ne!(class, interface);
    }

    #[test]
    fn test_collection_merges_by_name() {
        let mut first = NamespaceInfo::new("Shop");
        first.add_object(order_class());
        let mut second = NamespaceInfo::new("Shop");
        second.add_object(order_class());
        second.add_object(EnumBuilder::new("Status"));

        let collection: NamespaceCollection = vec![first, second].into_iter().collect();
        assert_eq!(collection.namespace_count(), 1);
        assert_eq!(collection.object_count(), 2);
    }

    #[test]
    fn test_collection_merge() {
        let mut left = NamespaceCollection::new();
        left.namespace_mut("A").add_object(ClassBuilder::new("X"));
        let mut right = NamespaceCollection::new();
        right.namespace_mut("A").add_object(ClassBuilder::new("X"));
        right.namespace_mut("").add_object(ClassBuilder::new("Y"));

        left.merge(right);
        assert_eq!(left.namespace_count(), 2);
        assert_eq!(left.object_count(), 2);
        let names: Vec<_> = left.objects().map(ObjectInfo::name).collect();
        assert_eq!(names, vec!["X", "Y"]);
        assert!(left.contains_name("Y"));
        assert!(!left.contains_name("Z"));
    }

    #[test]
    fn test_relational_capability() {
        let class: ObjectInfo = ClassBuilder::new("A").into();
        let interface: ObjectInfo = InterfaceBuilder::new("IA").into();
        let enumeration: ObjectInfo = EnumBuilder::new("E").into();
        assert!(class.as_relational().is_some());
        assert!(interface.as_relational().is_some());
        assert!(enumeration.as_relational().is_none());
    }

    #[test]
    fn test_unnamed_namespace() {
        assert!(!NamespaceInfo::new("").is_named());
        assert!(NamespaceInfo::new("Shop.Orders").is_named());
    }
}
