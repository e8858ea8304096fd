//! Schema compiler: emission order, submodel descriptors and root descriptors.
//!
//! Runs once per build, start to finish, and produces an immutable
//! [`Compilation`].

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::CompilerConfig;
use crate::emit;
use crate::error::{Result, SchemaMapError};
use crate::graph::{topological_order, DependencyGraph, TypeGraph};
use crate::naming::Naming;
use crate::schema::{is_introspection, Schema};
use crate::selection::{
    DescriptorArena, RootDescriptor, Selection, SelectionBuilder, SelectionElement,
};

#[derive(Debug, Clone)]
pub struct Compiler {
    config: CompilerConfig,
    naming: Naming,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CompilerConfig::default())
    }
}

impl Compiler {
    pub fn new(config: CompilerConfig) -> Self {
        let naming = config.naming();
        Self { config, naming }
    }

    /// Use a custom type naming function. Explicit renames still win.
    pub fn with_namer(mut self, name: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.naming = self.naming.with_fn(name);
        self
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn naming(&self) -> &Naming {
        &self.naming
    }

    pub fn compile(&self, schema: &Schema) -> Compilation {
        info!(types = schema.type_count(), "compiling schema");

        let types = TypeGraph::read(schema);
        let deps = DependencyGraph::build(&types);
        let order = topological_order(&deps);
        debug!(
            composites = types.len(),
            edges = deps.edge_count(),
            "dependency graph built"
        );

        let builder = SelectionBuilder::new(&types);

        let mut submodels = DescriptorArena::with_order(
            order.iter().map(String::as_str),
            self.config.submodel_depth,
        );
        for name in &order {
            submodels.fill(builder.submodel(name, self.config.submodel_depth));
        }

        let mut roots: IndexMap<String, RootDescriptor> = IndexMap::new();
        for (operation, root_type) in schema.root_types() {
            for field in root_type.fields.values() {
                if is_introspection(&field.name) {
                    continue;
                }
                if field.ty.is_none() {
                    debug!(field = %field.name, "skipping root field without a type");
                    continue;
                }
                if let Some(existing) = roots.get(&field.name) {
                    warn!(
                        field = %field.name,
                        kept = %existing.operation,
                        skipped = %operation,
                        "duplicate root field name"
                    );
                    continue;
                }
                roots.insert(
                    field.name.clone(),
                    builder.root(operation, field, self.config.root_depth),
                );
            }
        }

        info!(
            submodels = submodels.len(),
            roots = roots.len(),
            "schema compiled"
        );

        Compilation {
            order,
            submodels,
            roots,
        }
    }

    /// Compile and emit a Rust module.
    pub fn generate_rust(&self, schema: &Schema) -> String {
        emit::rust(&self.compile(schema), &self.naming, &self.config)
    }
}

/// Everything the compiler produces for one schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Compilation {
    order: Vec<String>,
    submodels: DescriptorArena,
    roots: IndexMap<String, RootDescriptor>,
}

impl Compilation {
    /// Composite type names in emission order.
    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn submodels(&self) -> &DescriptorArena {
        &self.submodels
    }

    /// Root descriptors, query fields first.
    pub fn roots(&self) -> impl Iterator<Item = &RootDescriptor> {
        self.roots.values()
    }

    pub fn root(&self, field: &str) -> Option<&RootDescriptor> {
        self.roots.get(field)
    }

    /// A root descriptor resolved at its recorded depth, ready to render.
    pub fn resolved_root(&self, field: &str) -> Result<Selection> {
        let root = self
            .root(field)
            .ok_or_else(|| SchemaMapError::UnknownOperation(field.to_string()))?;
        Ok(self.submodels.resolve(&root.selection, root.depth))
    }

    /// Resolve any descriptor against this compilation's submodels.
    pub fn resolve(&self, selection: &[SelectionElement], depth: usize) -> Selection {
        self.submodels.resolve(selection, depth)
    }
}
