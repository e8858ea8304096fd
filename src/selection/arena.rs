//! Descriptor arena: every submodel descriptor, keyed by type name.
//!
//! All entries are registered (empty) before any is filled, so a reference to
//! a type later in the emission order, or to a member of the same cycle, is
//! always a valid lookup.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::{Selection, SelectionElement};
use crate::schema::OperationKind;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmodelDescriptor {
    pub type_name: String,
    /// Accepted for symmetry with the inline builder; unused with references.
    pub depth: usize,
    pub selection: Selection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootDescriptor {
    pub field: String,
    pub operation: OperationKind,
    /// Unwrapped return type of the operation field.
    pub return_type: String,
    /// Resolution depth for this operation.
    pub depth: usize,
    pub selection: Selection,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorArena {
    entries: IndexMap<String, SubmodelDescriptor>,
}

impl DescriptorArena {
    /// Pre-register one empty descriptor per type, in emission order.
    pub fn with_order<'a>(order: impl IntoIterator<Item = &'a str>, depth: usize) -> Self {
        let entries = order
            .into_iter()
            .map(|name| {
                (
                    name.to_string(),
                    SubmodelDescriptor {
                        type_name: name.to_string(),
                        depth,
                        selection: Vec::new(),
                    },
                )
            })
            .collect();
        Self { entries }
    }

    /// Replace a registered descriptor. Returns `false` for unregistered types,
    /// which keeps the emission order closed.
    pub fn fill(&mut self, descriptor: SubmodelDescriptor) -> bool {
        match self.entries.get_mut(&descriptor.type_name) {
            Some(slot) => {
                *slot = descriptor;
                true
            }
            None => false,
        }
    }

    pub fn get(&self, type_name: &str) -> Option<&SubmodelDescriptor> {
        self.entries.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    /// Descriptors in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &SubmodelDescriptor> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace references with the referenced descriptors, producing a tree
    /// the renderer can walk.
    ///
    /// A reference is expanded while `depth > 1`, with `depth - 1` left for its
    /// children; at depth 1 it becomes a bare field name, like the inline
    /// builder. Inline children also consume one unit of depth. Cycles
    /// terminate because depth strictly decreases.
    pub fn resolve(&self, selection: &[SelectionElement], depth: usize) -> Selection {
        selection
            .iter()
            .map(|element| match element {
                SelectionElement::Field(name) => SelectionElement::Field(name.clone()),
                SelectionElement::Nested(name, children) => SelectionElement::Nested(
                    name.clone(),
                    self.resolve(children, depth.saturating_sub(1)),
                ),
                SelectionElement::Reference { field, descriptor } => {
                    match self.get(descriptor) {
                        Some(target) if depth > 1 => SelectionElement::Nested(
                            field.clone(),
                            self.resolve(&target.selection, depth - 1),
                        ),
                        _ => SelectionElement::Field(field.clone()),
                    }
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> DescriptorArena {
        // User <-> Post cycle, registered before either is filled.
        let mut arena = DescriptorArena::with_order(["User", "Post"], 1);
        assert!(arena.fill(SubmodelDescriptor {
            type_name: "User".to_string(),
            depth: 1,
            selection: vec![
                SelectionElement::field("name"),
                SelectionElement::reference("posts", "Post"),
            ],
        }));
        assert!(arena.fill(SubmodelDescriptor {
            type_name: "Post".to_string(),
            depth: 1,
            selection: vec![
                SelectionElement::field("title"),
                SelectionElement::reference("author", "User"),
            ],
        }));
        arena
    }

    #[test]
    fn test_registration_order_is_kept() {
        let arena = arena();
        let names: Vec<&str> = arena.iter().map(|d| d.type_name.as_str()).collect();
        assert_eq!(names, vec!["User", "Post"]);
    }

    #[test]
    fn test_fill_rejects_unregistered() {
        let mut arena = arena();
        assert!(!arena.fill(SubmodelDescriptor {
            type_name: "Ghost".to_string(),
            depth: 1,
            selection: Vec::new(),
        }));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_resolve_expands_until_budget() {
        let arena = arena();
        let user = &arena.get("User").unwrap().selection;

        assert_eq!(
            arena.resolve(user, 1),
            vec![SelectionElement::field("name"), SelectionElement::field("posts")]
        );

        assert_eq!(
            arena.resolve(user, 3),
            vec![
                SelectionElement::field("name"),
                SelectionElement::nested(
                    "posts",
                    vec![
                        SelectionElement::field("title"),
                        SelectionElement::nested(
                            "author",
                            vec![
                                SelectionElement::field("name"),
                                SelectionElement::field("posts"),
                            ],
                        ),
                    ],
                ),
            ]
        );
    }

    #[test]
    fn test_resolve_dangling_reference_is_bare() {
        let arena = DescriptorArena::default();
        let selection = vec![SelectionElement::reference("x", "Missing")];
        assert_eq!(arena.resolve(&selection, 5), vec![SelectionElement::field("x")]);
    }
}
