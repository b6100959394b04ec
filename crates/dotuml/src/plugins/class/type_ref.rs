//! Type reference classification
//!
//! Turns the textual type token supplied by the fact extractor into a
//! [`TypeRef`]. Classification is purely lexical: the token is parsed with a
//! small chumsky grammar and the resulting shape decides the category.
//!
//! Rules, first match wins:
//!
//! 1. exact primitive name → [`TypeRef::Primitive`]
//! 2. trailing array suffix (`T[]`, `T[,]`) → [`TypeRef::Aggregate`] of `T`
//! 3. trailing nullable suffix (`T?`) → [`TypeRef::Nullable`] of `T`
//! 4. allow-listed container with one type argument (`List<T>`) → [`TypeRef::Aggregate`] of `T`
//! 5. anything else, including tokens the grammar rejects → [`TypeRef::Created`]

use std::fmt;

use chumsky::prelude::*;
use tracing::trace;

use crate::core::chumsky_utils::{comma_list, dotted_identifier, inline_whitespace};
use crate::core::sanitize_name;

/// Primitive type keywords
pub const PRIMITIVE_TYPES: &[&str] = &[
    "sbyte", "byte", "short", "ushort", "int", "uint", "long", "ulong", "float", "double",
    "decimal", "bool", "char", "string",
];

/// Single-argument container names treated as "zero or more of"
pub const CONTAINER_TYPES: &[&str] = &[
    "IEnumerable",
    "IAsyncEnumerable",
    "ICollection",
    "IReadOnlyCollection",
    "IList",
    "IReadOnlyList",
    "List",
    "Collection",
    "ReadOnlyCollection",
    "ObservableCollection",
    "LinkedList",
    "Queue",
    "Stack",
    "ISet",
    "IReadOnlySet",
    "HashSet",
    "SortedSet",
    "ImmutableArray",
    "ImmutableList",
    "ImmutableHashSet",
];

/// Classified type reference
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Built-in value or string type
    Primitive(String),
    /// Opaque reference to a declared type
    Created(String),
    /// Array or collection of an element type
    Aggregate(String, Box<TypeRef>),
    /// Optional value of an element type
    Nullable(String, Box<TypeRef>),
}

impl TypeRef {
    /// Classify a raw type token
    ///
    /// # Example
    /// ```
    /// use dotuml::plugins::class::TypeRef;
    ///
    /// let t = TypeRef::classify("List<Product>");
    /// assert_eq!(t.element().map(TypeRef::name), Some("Product"));
    /// assert!(TypeRef::classify("int").is_primitive());
    /// ```
    pub fn classify(token: &str) -> TypeRef {
        let token = token.trim();
        if is_primitive_name(token) {
            return TypeRef::Primitive(token.to_string());
        }

        match type_syntax_parser().parse(token).into_result() {
            Ok(syntax) => {
                let classified = Self::from_syntax(token.to_string(), &syntax);
                trace!(token, kind = classified.kind(), "Classified type token");
                classified
            }
            Err(_) => {
                trace!(token, "Unparseable type token, treating as created type");
                TypeRef::Created(token.to_string())
            }
        }
    }

    fn from_syntax(name: String, syntax: &TypeSyntax) -> TypeRef {
        match syntax {
            TypeSyntax::Array { element, .. } => {
                TypeRef::Aggregate(name, Box::new(Self::classify_inner(element)))
            }
            TypeSyntax::Nullable(inner) => {
                TypeRef::Nullable(name, Box::new(Self::classify_inner(inner)))
            }
            TypeSyntax::Named { path, args } => match args.as_slice() {
                [argument] if is_container_name(path) => {
                    TypeRef::Aggregate(name, Box::new(Self::classify_inner(argument)))
                }
                _ if args.is_empty() && is_primitive_name(path) => TypeRef::Primitive(name),
                _ => TypeRef::Created(name),
            },
        }
    }

    fn classify_inner(syntax: &TypeSyntax) -> TypeRef {
        Self::from_syntax(syntax.to_string(), syntax)
    }

    /// The type name as written
    pub fn name(&self) -> &str {
        match self {
            TypeRef::Primitive(name)
            | TypeRef::Created(name)
            | TypeRef::Aggregate(name, _)
            | TypeRef::Nullable(name, _) => name,
        }
    }

    /// Name with generic brackets escaped for Mermaid
    pub fn sanitized_name(&self) -> String {
        sanitize_name(self.name())
    }

    /// Wrapped element type for aggregates and nullables
    pub fn element(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Aggregate(_, element) | TypeRef::Nullable(_, element) => Some(element),
            TypeRef::Primitive(_) | TypeRef::Created(_) => None,
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Primitive(_))
    }

    /// Innermost type after unwrapping every aggregate and nullable layer
    pub fn core(&self) -> &TypeRef {
        let mut current = self;
        while let Some(element) = current.element() {
            current = element;
        }
        current
    }

    /// Whether the type is a primitive, possibly wrapped (`int?[]`, `List<int?>`)
    pub fn is_primitive_at_core(&self) -> bool {
        self.core().is_primitive()
    }

    /// Whether the type denotes "no value" (a `void` return)
    pub fn is_void(&self) -> bool {
        let name = self.name().trim();
        name.is_empty() || name == "void"
    }

    /// Short category label, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            TypeRef::Primitive(_) => "primitive",
            TypeRef::Created(_) => "created",
            TypeRef::Aggregate(..) => "aggregate",
            TypeRef::Nullable(..) => "nullable",
        }
    }
}

impl From<&str> for TypeRef {
    fn from(token: &str) -> Self {
        TypeRef::classify(token)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn is_primitive_name(name: &str) -> bool {
    PRIMITIVE_TYPES.contains(&name)
}

fn is_container_name(path: &str) -> bool {
    let last = path.rsplit('.').next().unwrap_or(path);
    CONTAINER_TYPES.contains(&last)
}

/// Parsed shape of a type token
#[derive(Debug, Clone, PartialEq)]
enum TypeSyntax {
    Named { path: String, args: Vec<TypeSyntax> },
    Array { element: Box<TypeSyntax>, rank: usize },
    Nullable(Box<TypeSyntax>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Suffix {
    Array(usize),
    Nullable,
}

impl Suffix {
    fn wrap(self, inner: TypeSyntax) -> TypeSyntax {
        match self {
            Suffix::Array(rank) => TypeSyntax::Array {
                element: Box::new(inner),
                rank,
            },
            Suffix::Nullable => TypeSyntax::Nullable(Box::new(inner)),
        }
    }
}

impl fmt::Display for TypeSyntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSyntax::Named { path, args } => {
                write!(f, "{}", path)?;
                if !args.is_empty() {
                    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                    write!(f, "<{}>", args.join(", "))?;
                }
                Ok(())
            }
            TypeSyntax::Array { element, rank } => {
                write!(f, "{}[{}]", element, ",".repeat(rank.saturating_sub(1)))
            }
            TypeSyntax::Nullable(inner) => write!(f, "{}?", inner),
        }
    }
}

fn type_syntax_parser<'src>() -> impl Parser<'src, &'src str, TypeSyntax> {
    let ty = recursive(|ty| {
        let args = comma_list(ty)
            .delimited_by(just('<').then(inline_whitespace()), inline_whitespace().then(just('>')));

        let named = dotted_identifier()
            .then(args.or_not())
            .map(|(path, args)| TypeSyntax::Named {
                path,
                args: args.unwrap_or_default(),
            });

        let array = just('[')
            .ignore_then(just(',').repeated().count())
            .then_ignore(just(']'))
            .map(|commas| Suffix::Array(commas + 1));
        let nullable = just('?').to(Suffix::Nullable);
        let suffix = inline_whitespace().ignore_then(array.or(nullable));

        named
            .then(suffix.repeated().collect::<Vec<Suffix>>())
            .map(|(base, suffixes)| {
                suffixes
                    .into_iter()
                    .fold(base, |inner, suffix| suffix.wrap(inner))
            })
    });

    ty.padded_by(inline_whitespace()).then_ignore(end())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn created(name: &str) -> TypeRef {
        TypeRef::Created(name.to_string())
    }

    fn primitive(name: &str) -> TypeRef {
        TypeRef::Primitive(name.to_string())
    }

    #[test]
    fn test_primitives() {
        for name in PRIMITIVE_TYPES {
            assert_eq!(TypeRef::classify(name), primitive(name));
        }
    }

    #[test]
    fn test_created() {
        assert_eq!(TypeRef::classify("Order"), created("Order"));
        assert_eq!(TypeRef::classify(" ILogger "), created("ILogger"));
        assert_eq!(TypeRef::classify("Shop.Models.Order"), created("Shop.Models.Order"));
    }

    #[test]
    fn test_array_of_created() {
        let t = TypeRef::classify("Product[]");
        assert_eq!(
            t,
            TypeRef::Aggregate("Product[]".to_string(), Box::new(created("Product")))
        );
    }

    #[test]
    fn test_array_of_primitive() {
        let t = TypeRef::classify("int[]");
        assert_eq!(t.element(), Some(&primitive("int")));
        assert_eq!(t.kind(), "aggregate");
    }

    #[test]
    fn test_multidimensional_array() {
        let t = TypeRef::classify("double[,]");
        assert_eq!(t.name(), "double[,]");
        assert_eq!(t.element(), Some(&primitive("double")));
    }

    #[test]
    fn test_nullable() {
        assert_eq!(
            TypeRef::classify("int?"),
            TypeRef::Nullable("int?".to_string(), Box::new(primitive("int")))
        );
        assert_eq!(
            TypeRef::classify("Customer?"),
            TypeRef::Nullable("Customer?".to_string(), Box::new(created("Customer")))
        );
    }

    #[test]
    fn test_array_suffix_is_outermost() {
        // `Order?[]` is an array of nullable orders
        let t = TypeRef::classify("Order?[]");
        assert_eq!(t.kind(), "aggregate");
        assert_eq!(t.element().map(TypeRef::kind), Some("nullable"));

        // `Order[]?` is a nullable array
        let t = TypeRef::classify("Order[]?");
        assert_eq!(t.kind(), "nullable");
        assert_eq!(t.element().map(TypeRef::kind), Some("aggregate"));
    }

    #[test]
    fn test_containers() {
        let t = TypeRef::classify("List<Product>");
        assert_eq!(
            t,
            TypeRef::Aggregate("List<Product>".to_string(), Box::new(created("Product")))
        );

        let t = TypeRef::classify("IEnumerable<string>");
        assert_eq!(t.element(), Some(&primitive("string")));

        let t = TypeRef::classify("System.Collections.Generic.HashSet<Tag>");
        assert_eq!(t.element(), Some(&created("Tag")));
    }

    #[test]
    fn test_nested_generic_element() {
        let t = TypeRef::classify("List<List<Product>>");
        let inner = t.element().unwrap();
        assert_eq!(inner.name(), "List<Product>");
        assert_eq!(inner.element(), Some(&created("Product")));
    }

    #[test]
    fn test_primitive_at_core_looks_through_wrappers() {
        for token in ["int", "int?", "int[]", "int?[]", "List<int?>", "IEnumerable<List<string>>", "decimal[]?"] {
            assert!(TypeRef::classify(token).is_primitive_at_core(), "{} should be primitive at core", token);
        }
        for token in ["Order", "Order?[]", "List<Order?>", "Dictionary<string, int>"] {
            assert!(!TypeRef::classify(token).is_primitive_at_core(), "{} should not be primitive at core", token);
        }
        assert_eq!(TypeRef::classify("List<Product?>").core(), &created("Product"));
    }

    #[test]
    fn test_non_container_generic_is_created() {
        assert_eq!(
            TypeRef::classify("Dictionary<string, Order>"),
            created("Dictionary<string, Order>")
        );
        assert_eq!(TypeRef::classify("Task<Order>"), created("Task<Order>"));
        // Containers with more than one argument are not aggregates
        assert_eq!(TypeRef::classify("List<int, int>"), created("List<int, int>"));
    }

    #[test]
    fn test_whitespace_inside_arguments() {
        let t = TypeRef::classify("List< Product >");
        assert_eq!(t.name(), "List< Product >");
        assert_eq!(t.element(), Some(&created("Product")));
    }

    #[test]
    fn test_malformed_tokens_degrade() {
        assert_eq!(TypeRef::classify("List<Product"), created("List<Product"));
        assert_eq!(TypeRef::classify("(int, string)"), created("(int, string)"));
        assert_eq!(TypeRef::classify(""), created(""));
    }

    #[test]
    fn test_sanitized_name() {
        assert_eq!(TypeRef::classify("List<Product>").sanitized_name(), "List~Product~");
        assert_eq!(TypeRef::classify("Order").sanitized_name(), "Order");
    }

    #[test]
    fn test_void() {
        assert!(TypeRef::classify("void").is_void());
        assert!(TypeRef::classify("").is_void());
        assert!(!TypeRef::classify("Task").is_void());
        assert!(!TypeRef::classify("int").is_void());
    }

    #[test]
    fn test_syntax_display_round_trip() {
        let syntax = type_syntax_parser()
            .parse("Dictionary<string,List<int[]>>")
            .into_result()
            .unwrap();
        assert_eq!(syntax.to_string(), "Dictionary<string, List<int[]>>");
    }
}
