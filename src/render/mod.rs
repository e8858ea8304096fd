//! Query rendering: a resolved selection plus call arguments to query text.
//!
//! ```
//! use schemamap::render::{Arguments, Renderer};
//! use schemamap::selection::selection_from_json;
//! use serde_json::json;
//!
//! let selection = selection_from_json(&json!(["id", { "audio": ["url"] }]));
//! let mut args = Arguments::new();
//! args.insert("id".to_string(), Some(json!("abc")));
//!
//! let query = Renderer::default().render("loadItem", &selection, &args);
//! assert_eq!(query, r#"{loadItem(id:"abc") { id audio { url } } }"#);
//! ```

pub mod args;
pub mod selection;

pub use args::{arguments_from_json, render_arguments, ArgumentStyle, Arguments};
pub use selection::{render_braces, render_fields};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::classify::Classification;
use crate::schema::{OperationKind, Schema};
use crate::selection::SelectionElement;

/// A request ready for a GraphQL endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLRequest {
    pub query: String,
    pub variables: IndexMap<String, Value>,
}

/// Input for [`Renderer::render_operation`].
#[derive(Debug, Clone)]
pub struct NamedOperation<'a> {
    pub kind: OperationKind,
    pub name: &'a str,
    /// Root field the operation calls.
    pub root: &'a str,
    pub selection: &'a [SelectionElement],
    /// Variable name -> wire type (`"ID!"`), in declaration order.
    pub variable_types: &'a IndexMap<String, String>,
    /// Variable values, in call-site order.
    pub variables: &'a Arguments,
}

/// Renders queries with a fixed classification.
///
/// Cloning is cheap and every render is a pure function of its inputs, so a
/// renderer can be shared freely between threads once built.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    classification: Arc<Classification>,
}

impl Renderer {
    pub fn new(classification: Classification) -> Self {
        Self {
            classification: Arc::new(classification),
        }
    }

    /// A renderer classifying arguments against `schema`.
    pub fn for_schema(schema: &Schema, extra_flags: &[String]) -> Self {
        Self::new(Classification::analyze(schema, extra_flags))
    }

    /// Swap in a fresh classification. Needs `&mut self`, so it cannot race
    /// with renders borrowing this renderer.
    pub fn reanalyze(&mut self, schema: &Schema, extra_flags: &[String]) {
        self.classification = Arc::new(Classification::analyze(schema, extra_flags));
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// `{root(args) { selection } }`
    pub fn render(&self, root: &str, selection: &[SelectionElement], args: &Arguments) -> String {
        format!(
            "{{{}{} {} }}",
            root,
            render_arguments(args, &self.classification),
            render_braces(selection)
        )
    }

    /// `query Name($v: T) { root(v: $v) { selection } }` plus its variables.
    ///
    /// Argument values travel in `variables`, so classification plays no part here.
    pub fn render_operation(&self, op: &NamedOperation<'_>) -> GraphQLRequest {
        let declarations: Vec<String> = op
            .variable_types
            .iter()
            .map(|(name, ty)| format!("${}: {}", name, ty))
            .collect();
        let call_args: Vec<String> = op
            .variables
            .iter()
            .filter(|(_, value)| value.is_some())
            .map(|(name, _)| format!("{}: ${}", name, name))
            .collect();

        let query = format!(
            "{} {}{} {{ {}{} {} }}",
            op.kind.keyword(),
            op.name,
            parenthesize(&declarations, ", "),
            op.root,
            parenthesize(&call_args, ", "),
            render_braces(op.selection)
        );

        let variables = op
            .variables
            .iter()
            .filter_map(|(name, value)| Some((name.clone(), value.clone()?)))
            .collect();

        GraphQLRequest { query, variables }
    }
}

fn parenthesize(parts: &[String], separator: &str) -> String {
    if parts.is_empty() {
        String::new()
    } else {
        format!("({})", parts.join(separator))
    }
}
