//! Type name rendering for generated descriptors.
//!
//! A [`Naming`] combines a casing policy, explicit per-name overrides and an
//! optional caller-supplied function. Overrides always win.

use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Suffix appended to a rendered type name to name its submodel descriptor.
pub const DESCRIPTOR_SUFFIX: &str = "Map";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamingPolicy {
    /// Use schema names verbatim.
    Keep,
    /// `user_profile` -> `UserProfile`
    #[default]
    Pascal,
    /// `UserProfile` -> `userProfile`
    Camel,
    /// `UserProfile` -> `user_profile`
    Snake,
}

impl NamingPolicy {
    pub fn apply(self, raw: &str) -> String {
        match self {
            NamingPolicy::Keep => raw.to_string(),
            NamingPolicy::Pascal => raw.to_upper_camel_case(),
            NamingPolicy::Camel => raw.to_lower_camel_case(),
            NamingPolicy::Snake => raw.to_snake_case(),
        }
    }
}

pub type NameFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

#[derive(Clone, Default)]
pub struct Naming {
    policy: NamingPolicy,
    renames: IndexMap<String, String>,
    custom: Option<NameFn>,
}

impl std::fmt::Debug for Naming {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Naming")
            .field("policy", &self.policy)
            .field("renames", &self.renames)
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

impl Naming {
    pub fn new(policy: NamingPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn with_renames(mut self, renames: IndexMap<String, String>) -> Self {
        self.renames = renames;
        self
    }

    /// Replace the casing policy with an arbitrary function.
    pub fn with_fn(mut self, name: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        self.custom = Some(Arc::new(name));
        self
    }

    /// Rendered name of a schema type.
    pub fn render(&self, raw: &str) -> String {
        if let Some(renamed) = self.renames.get(raw) {
            return renamed.clone();
        }
        match &self.custom {
            Some(custom) => custom(raw),
            None => self.policy.apply(raw),
        }
    }

    /// Name of the submodel descriptor generated for a schema type.
    pub fn descriptor_name(&self, raw: &str) -> String {
        format!("{}{}", self.render(raw), DESCRIPTOR_SUFFIX)
    }
}
