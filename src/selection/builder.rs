//! Selection descriptor construction.
//!
//! Both descriptor tiers are built with references enabled: submodels point
//! at each other, roots point into submodels. The inline path
//! (`allow_refs = false`) expands composite fields in place under a depth
//! budget and is available for standalone descriptors that must not depend
//! on any other descriptor.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::arena::{RootDescriptor, SubmodelDescriptor};
use super::{Selection, SelectionElement};
use crate::graph::TypeGraph;
use crate::schema::{FieldDef, OperationKind};

/// Which descriptor tier is being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildMode {
    /// One reusable descriptor per composite type.
    Sub,
    /// One descriptor per root operation field.
    Parent,
}

pub struct SelectionBuilder<'g> {
    types: &'g TypeGraph,
}

impl<'g> SelectionBuilder<'g> {
    pub fn new(types: &'g TypeGraph) -> Self {
        Self { types }
    }

    /// Describe the fields of `type_name`.
    ///
    /// With `allow_refs`, every composite field becomes a reference to the
    /// target type's descriptor and `depth` is ignored. Without it, composite
    /// fields are inlined while `depth > 1` and degrade to a bare field name
    /// once the budget reaches 1.
    ///
    /// Non-composite or unknown types yield an empty selection.
    pub fn build(&self, type_name: &str, depth: usize, allow_refs: bool) -> Selection {
        let Some(fields) = self.types.fields(type_name) else {
            return Vec::new();
        };

        fields
            .iter()
            .map(|field| {
                if !field.is_composite() {
                    SelectionElement::Field(field.name.clone())
                } else if allow_refs {
                    SelectionElement::reference(&field.name, &field.target)
                } else if depth > 1 {
                    SelectionElement::Nested(
                        field.name.clone(),
                        self.build(&field.target, depth - 1, false),
                    )
                } else {
                    SelectionElement::Field(field.name.clone())
                }
            })
            .collect()
    }

    /// Build a descriptor for `type_name` in the given tier.
    pub fn build_mode(&self, mode: BuildMode, type_name: &str, depth: usize) -> Selection {
        match mode {
            // Both tiers reference submodels; the tier only changes how depth is used later.
            BuildMode::Sub | BuildMode::Parent => self.build(type_name, depth, true),
        }
    }

    /// The submodel descriptor of a composite type.
    pub fn submodel(&self, type_name: &str, depth: usize) -> SubmodelDescriptor {
        SubmodelDescriptor {
            type_name: type_name.to_string(),
            depth,
            selection: self.build_mode(BuildMode::Sub, type_name, depth),
        }
    }

    /// The root descriptor of a query or mutation field: one level of its
    /// return type, composite fields referencing submodels. `depth` is
    /// recorded for resolution, never used for inlining.
    pub fn root(&self, operation: OperationKind, field: &FieldDef, depth: usize) -> RootDescriptor {
        let return_type = field
            .ty
            .as_ref()
            .map(|ty| ty.unwrap_name().to_string())
            .unwrap_or_default();

        if !self.types.contains(&return_type) {
            debug!(field = %field.name, return_type = %return_type, "root field returns a leaf");
        }

        RootDescriptor {
            field: field.name.clone(),
            operation,
            selection: self.build_mode(BuildMode::Parent, &return_type, depth),
            return_type,
            depth,
        }
    }
}
