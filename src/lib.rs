//! # schemamap
//!
//! Selection descriptors and query rendering for typed GraphQL schemas.
//!
//! schemamap reads a schema once at build time and compiles it into reusable
//! *selection descriptors*: one per composite type (a submodel) and one per
//! root operation field. At runtime a descriptor plus a map of call arguments
//! is rendered into query text.
//!
//! ## Key Features
//!
//! - **Cycle-safe**: descriptors reference each other by name, so recursive
//!   types never recurse at build time
//! - **Deterministic**: same schema, same output, byte for byte
//! - **Depth-bounded**: references are expanded to a fixed depth when rendering
//! - **Argument-aware**: flags and enums are written bare, everything else as a literal
//!
//! ## Quick Start
//!
//! ```rust
//! use schemamap::{Arguments, Compiler, Renderer, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::from_sdl(r#"
//!     type Query { loadItem(id: ID!, status: String): Item }
//!     type Item { id: ID! audio: Audio }
//!     type Audio { url: String! }
//! "#).unwrap();
//!
//! let compilation = Compiler::default().compile(&schema);
//! let selection = compilation.resolved_root("loadItem").unwrap();
//!
//! let mut args = Arguments::new();
//! args.insert("id".to_string(), Some(json!("abc")));
//! args.insert("status".to_string(), Some(json!("ACTIVE")));
//!
//! let query = Renderer::for_schema(&schema, &[]).render("loadItem", &selection, &args);
//! assert_eq!(query, r#"{loadItem(id:"abc" status:ACTIVE) { id audio { url } } }"#);
//! ```

pub mod classify;
pub mod compiler;
pub mod config;
pub mod emit;
pub mod error;
pub mod graph;
pub mod naming;
pub mod render;
pub mod schema;
pub mod selection;

// Re-exports for convenience
pub use error::{Result, SchemaMapError};

pub use classify::Classification;
pub use compiler::{Compilation, Compiler};
pub use config::CompilerConfig;
pub use graph::{topological_order, DependencyGraph, TypeGraph};
pub use naming::{Naming, NamingPolicy};
pub use render::{ArgumentStyle, Arguments, GraphQLRequest, NamedOperation, Renderer};
pub use schema::{OperationKind, Schema, TypeKind};
pub use selection::{
    DescriptorArena, RootDescriptor, Selection, SelectionBuilder, SelectionElement,
    StaticSelection, SubmodelDescriptor,
};
