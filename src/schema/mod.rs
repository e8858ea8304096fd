//! Schema model: named types, fields and root operation types.
//!
//! This is the already-validated view of a GraphQL schema that the rest of the
//! crate reads. Loading from SDL or introspection JSON lives in [`loader`].

pub mod loader;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Names carrying this prefix belong to introspection and are skipped everywhere.
pub const INTROSPECTION_PREFIX: &str = "__";

/// The five scalars every GraphQL schema has.
pub const BUILTIN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

/// Whether a name is reserved for introspection.
pub fn is_introspection(name: &str) -> bool {
    name.starts_with(INTROSPECTION_PREFIX)
}

/// Whether a name is one of the built-in primitive scalars.
pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    /// Objects, interfaces and unions.
    Composite,
    Scalar,
    Enum,
    /// Input objects only appear as argument types.
    Input,
}

impl TypeKind {
    /// Leaves are selected by bare name and never become graph nodes.
    pub fn is_leaf(self) -> bool {
        !matches!(self, TypeKind::Composite)
    }
}

impl std::fmt::Display for TypeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TypeKind::Composite => "composite",
            TypeKind::Scalar => "scalar",
            TypeKind::Enum => "enum",
            TypeKind::Input => "input",
        };
        write!(f, "{}", s)
    }
}

/// A possibly wrapped reference to a named type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    /// Strip every list/non-null wrapper and return the underlying type name.
    pub fn unwrap_name(&self) -> &str {
        let mut current = self;
        loop {
            match current {
                TypeRef::Named(name) => return name,
                TypeRef::List(inner) | TypeRef::NonNull(inner) => current = inner,
            }
        }
    }
}

/// Renders the wire-format type string, e.g. `[ID!]!`.
impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeRef::Named(name) => write!(f, "{}", name),
            TypeRef::List(inner) => write!(f, "[{}]", inner),
            TypeRef::NonNull(inner) => write!(f, "{}!", inner),
        }
    }
}

/// An argument on a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputValue {
    pub name: String,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    /// `None` when the source declared no type; such fields are skipped.
    pub ty: Option<TypeRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<InputValue>,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty),
            arguments: Vec::new(),
        }
    }

    pub fn with_argument(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.arguments.push(InputValue {
            name: name.into(),
            ty,
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedType {
    pub name: String,
    pub kind: TypeKind,
    /// Declaration-ordered; empty for leaves and unions.
    #[serde(default)]
    pub fields: IndexMap<String, FieldDef>,
}

impl NamedType {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            fields: IndexMap::new(),
        }
    }

    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }
}

/// The two root operation types a selection can start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
}

impl OperationKind {
    /// Keyword used in an operation header.
    pub fn keyword(self) -> &'static str {
        match self {
            OperationKind::Query => "query",
            OperationKind::Mutation => "mutation",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// A loaded schema. Types keep their declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    types: IndexMap<String, NamedType>,
    query_type: Option<String>,
    mutation_type: Option<String>,
}

impl Schema {
    /// An empty schema holding only the built-in scalars.
    pub fn new() -> Self {
        let mut schema = Self::default();
        for name in BUILTIN_SCALARS {
            schema.add_type(NamedType::new(name, TypeKind::Scalar));
        }
        schema
    }

    /// Insert or replace a type. Replacing keeps the original position.
    pub fn add_type(&mut self, ty: NamedType) {
        self.types.insert(ty.name.clone(), ty);
    }

    pub fn with_type(mut self, ty: NamedType) -> Self {
        self.add_type(ty);
        self
    }

    pub fn set_query_type(&mut self, name: Option<String>) {
        self.query_type = name;
    }

    pub fn set_mutation_type(&mut self, name: Option<String>) {
        self.mutation_type = name;
    }

    pub fn get(&self, name: &str) -> Option<&NamedType> {
        self.types.get(name)
    }

    pub fn kind_of(&self, name: &str) -> Option<TypeKind> {
        self.types.get(name).map(|t| t.kind)
    }

    /// All types in declaration order, introspection types included.
    pub fn types(&self) -> impl Iterator<Item = &NamedType> {
        self.types.values()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn query_type(&self) -> Option<&str> {
        self.query_type.as_deref()
    }

    pub fn mutation_type(&self) -> Option<&str> {
        self.mutation_type.as_deref()
    }

    /// Root operation types that are declared and actually present, query first.
    pub fn root_types(&self) -> Vec<(OperationKind, &NamedType)> {
        [
            (OperationKind::Query, self.query_type.as_deref()),
            (OperationKind::Mutation, self.mutation_type.as_deref()),
        ]
        .into_iter()
        .filter_map(|(kind, name)| {
            let ty = self.types.get(name?)?;
            (ty.kind == TypeKind::Composite).then_some((kind, ty))
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_nested_wrappers() {
        let ty = TypeRef::NonNull(Box::new(TypeRef::List(Box::new(TypeRef::NonNull(
            Box::new(TypeRef::named("Track")),
        )))));
        assert_eq!(ty.unwrap_name(), "Track");
        assert_eq!(ty.to_string(), "[Track!]!");
    }

    #[test]
    fn test_new_schema_has_builtin_scalars() {
        let schema = Schema::new();
        for name in BUILTIN_SCALARS {
            assert_eq!(schema.kind_of(name), Some(TypeKind::Scalar));
        }
        assert!(schema.root_types().is_empty());
    }

    #[test]
    fn test_root_types_skip_missing() {
        let mut schema = Schema::new().with_type(NamedType::new("Query", TypeKind::Composite));
        schema.set_query_type(Some("Query".to_string()));
        schema.set_mutation_type(Some("Mutation".to_string()));

        let roots = schema.root_types();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].0, OperationKind::Query);
    }

    #[test]
    fn test_introspection_prefix() {
        assert!(is_introspection("__Schema"));
        assert!(!is_introspection("_Entity"));
    }
}
