//! Type graph reader: the composite types of a schema and their field targets.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schema::{is_introspection, Schema, TypeKind};

/// How a field's unwrapped target participates in selections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    /// Scalars, enums and anything the schema does not define.
    Leaf,
    Composite,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTarget {
    pub name: String,
    /// Unwrapped target type name.
    pub target: String,
    pub kind: TargetKind,
}

impl FieldTarget {
    pub fn is_composite(&self) -> bool {
        self.kind == TargetKind::Composite
    }
}

/// Composite types in declaration order, each with its declaration-ordered fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeGraph {
    composites: IndexMap<String, Vec<FieldTarget>>,
}

impl TypeGraph {
    /// Read every non-introspection composite type from the schema.
    pub fn read(schema: &Schema) -> Self {
        let mut composites = IndexMap::new();

        for ty in schema.types() {
            if ty.kind != TypeKind::Composite || is_introspection(&ty.name) {
                continue;
            }

            let mut fields = Vec::with_capacity(ty.fields.len());
            for field in ty.fields.values() {
                if is_introspection(&field.name) {
                    continue;
                }
                let Some(field_ty) = &field.ty else {
                    debug!(ty = %ty.name, field = %field.name, "skipping field without a type");
                    continue;
                };

                let target = field_ty.unwrap_name();
                let kind = match schema.kind_of(target) {
                    Some(TypeKind::Composite) if !is_introspection(target) => {
                        TargetKind::Composite
                    }
                    Some(_) => TargetKind::Leaf,
                    None => {
                        debug!(
                            ty = %ty.name,
                            field = %field.name,
                            target_type = target,
                            "unknown target type, treated as leaf"
                        );
                        TargetKind::Leaf
                    }
                };

                fields.push(FieldTarget {
                    name: field.name.clone(),
                    target: target.to_string(),
                    kind,
                });
            }

            composites.insert(ty.name.clone(), fields);
        }

        Self { composites }
    }

    /// Fields of a composite type, or `None` if the type is not composite.
    pub fn fields(&self, name: &str) -> Option<&[FieldTarget]> {
        self.composites.get(name).map(|f| f.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.composites.contains_key(name)
    }

    /// Composite type names in discovery (declaration) order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.composites.keys().map(|k| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FieldTarget])> {
        self.composites
            .iter()
            .map(|(name, fields)| (name.as_str(), fields.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.composites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.composites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_classifies_targets() {
        let schema = Schema::from_sdl(
            r#"
            type Query { item(id: ID!): Item }
            type Item {
                id: ID!
                tags: [String!]!
                status: Status
                related: [Item!]
                media: Media
                ghost: Missing
            }
            enum Status { ON OFF }
            union Media = Item
            "#,
        )
        .unwrap();

        let graph = TypeGraph::read(&schema);
        assert_eq!(graph.names().collect::<Vec<_>>(), vec!["Query", "Item", "Media"]);

        let fields = graph.fields("Item").unwrap();
        let kinds: Vec<(&str, &str, TargetKind)> = fields
            .iter()
            .map(|f| (f.name.as_str(), f.target.as_str(), f.kind))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("id", "ID", TargetKind::Leaf),
                ("tags", "String", TargetKind::Leaf),
                ("status", "Status", TargetKind::Leaf),
                ("related", "Item", TargetKind::Composite),
                ("media", "Media", TargetKind::Composite),
                ("ghost", "Missing", TargetKind::Leaf),
            ]
        );
    }

    #[test]
    fn test_read_skips_introspection_types() {
        let schema = Schema::from_sdl(
            r#"
            type Query { a: String }
            type __Hidden { b: String }
            "#,
        )
        .unwrap();

        let graph = TypeGraph::read(&schema);
        assert!(graph.contains("Query"));
        assert!(!graph.contains("__Hidden"));
        assert_eq!(graph.len(), 1);
    }
}
