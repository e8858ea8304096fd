//! Selection descriptors: which fields to fetch for a type or an operation.
//!
//! A descriptor is an ordered list of [`SelectionElement`]s. Leaves are bare
//! field names, composite fields are either inlined ([`SelectionElement::Nested`])
//! or point at another type's descriptor ([`SelectionElement::Reference`]).
//! References are resolved through a [`DescriptorArena`] before rendering.

pub mod arena;
pub mod builder;
pub mod statics;

pub use arena::{DescriptorArena, RootDescriptor, SubmodelDescriptor};
pub use builder::{BuildMode, SelectionBuilder};
pub use statics::StaticSelection;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionElement {
    /// A scalar or enum field, selected by name.
    Field(String),
    /// A composite field with its children inlined.
    Nested(String, Vec<SelectionElement>),
    /// A composite field whose children are the descriptor of another type.
    Reference { field: String, descriptor: String },
}

pub type Selection = Vec<SelectionElement>;

impl SelectionElement {
    pub fn field(name: impl Into<String>) -> Self {
        SelectionElement::Field(name.into())
    }

    pub fn nested(name: impl Into<String>, children: Selection) -> Self {
        SelectionElement::Nested(name.into(), children)
    }

    pub fn reference(field: impl Into<String>, descriptor: impl Into<String>) -> Self {
        SelectionElement::Reference {
            field: field.into(),
            descriptor: descriptor.into(),
        }
    }

    /// The schema field this element selects.
    pub fn field_name(&self) -> &str {
        match self {
            SelectionElement::Field(name) | SelectionElement::Nested(name, _) => name,
            SelectionElement::Reference { field, .. } => field,
        }
    }

    /// Build a selection from its loose JSON shape: strings are fields,
    /// single-key objects holding an array are nested selections.
    ///
    /// Anything else becomes an empty field name rather than an error, so a
    /// malformed value costs one fragment of output instead of the whole render.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(name) => SelectionElement::Field(name.clone()),
            Value::Object(map) if map.len() == 1 => match map.iter().next() {
                Some((name, Value::Array(children))) => SelectionElement::Nested(
                    name.clone(),
                    children.iter().map(SelectionElement::from_json).collect(),
                ),
                _ => SelectionElement::Field(String::new()),
            },
            _ => SelectionElement::Field(String::new()),
        }
    }
}

/// Parse a JSON array into a selection. Non-array input yields an empty selection.
pub fn selection_from_json(value: &Value) -> Selection {
    match value {
        Value::Array(items) => items.iter().map(SelectionElement::from_json).collect(),
        _ => Vec::new(),
    }
}

/// Field names used at the top level of a selection.
pub fn field_names(selection: &[SelectionElement]) -> Vec<&str> {
    selection.iter().map(|e| e.field_name()).collect()
}
