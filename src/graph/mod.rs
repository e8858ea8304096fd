//! Schema graph: composite types, their dependencies and the emission order.

pub mod dependency;
pub mod order;
pub mod reader;

pub use dependency::DependencyGraph;
pub use order::topological_order;
pub use reader::{FieldTarget, TargetKind, TypeGraph};
