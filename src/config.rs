//! Compiler configuration.
//!
//! Every field is optional in the TOML file:
//!
//! ```toml
//! root_depth = 2
//! submodel_depth = 1
//! naming = "pascal"          # keep | pascal | camel | snake
//! extra_flags = ["sort"]
//! helpers_path = "schemamap::selection"
//! types_path = "crate::types"
//!
//! [renames]
//! user_profile = "Profile"
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::{Result, SchemaMapError};
use crate::naming::{Naming, NamingPolicy};

pub const DEFAULT_ROOT_DEPTH: usize = 2;
pub const DEFAULT_SUBMODEL_DEPTH: usize = 1;
pub const DEFAULT_HELPERS_PATH: &str = "schemamap::selection";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Resolution depth recorded on every root descriptor.
    pub root_depth: usize,
    /// Depth passed to submodel construction. No effect while submodels use references.
    pub submodel_depth: usize,
    pub naming: NamingPolicy,
    /// Explicit type name overrides, applied before `naming`.
    pub renames: IndexMap<String, String>,
    /// Argument names always rendered as flags.
    pub extra_flags: Vec<String>,
    /// Module the generated code imports `StaticSelection` from.
    pub helpers_path: String,
    /// Module holding the schema's Rust types, linked from generated docs.
    pub types_path: Option<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            root_depth: DEFAULT_ROOT_DEPTH,
            submodel_depth: DEFAULT_SUBMODEL_DEPTH,
            naming: NamingPolicy::default(),
            renames: IndexMap::new(),
            extra_flags: Vec::new(),
            helpers_path: DEFAULT_HELPERS_PATH.to_string(),
            types_path: None,
        }
    }
}

impl CompilerConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");
        let source = fs::read_to_string(path)?;
        toml::from_str(&source).map_err(|e| SchemaMapError::Config(path.to_path_buf(), e.to_string()))
    }

    /// The naming policy with renames applied.
    pub fn naming(&self) -> Naming {
        Naming::new(self.naming).with_renames(self.renames.clone())
    }
}
