//! Flag/enum classification of argument names.
//!
//! A [`Classification`] is computed once per schema and then only read. It is
//! an ordinary value: hand it to a [`Renderer`](crate::render::Renderer) and
//! build a fresh one to re-analyze.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::render::ArgumentStyle;
use crate::schema::{is_builtin_scalar, is_introspection, Schema, TypeKind};

/// Argument names that are flags for every schema.
pub const DEFAULT_FLAGS: [&str; 5] = ["flags", "type", "status", "mode", "kind"];

/// Flags assumed when no schema has been analyzed.
pub const STANDALONE_FLAGS: [&str; 2] = ["flags", "type"];

/// Enums assumed when no schema has been analyzed.
pub const STANDALONE_ENUMS: [&str; 1] = ["sectionType"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    flags: IndexSet<String>,
    enums: IndexSet<String>,
}

impl Default for Classification {
    fn default() -> Self {
        Self::standalone()
    }
}

impl Classification {
    /// The permissive defaults used without a schema.
    pub fn standalone() -> Self {
        Self {
            flags: STANDALONE_FLAGS.iter().map(|s| s.to_string()).collect(),
            enums: STANDALONE_ENUMS.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Classify the arguments of every root operation field.
    ///
    /// Flags are `extra_flags`, the [`DEFAULT_FLAGS`], and arguments typed
    /// with a custom scalar. Enums are every enum type name plus arguments
    /// typed with an enum. Computed from scratch on every call.
    pub fn analyze(schema: &Schema, extra_flags: &[String]) -> Self {
        let mut flags: IndexSet<String> = extra_flags.iter().cloned().collect();
        flags.extend(DEFAULT_FLAGS.iter().map(|s| s.to_string()));

        let mut enums: IndexSet<String> = schema
            .types()
            .filter(|t| t.kind == TypeKind::Enum && !is_introspection(&t.name))
            .map(|t| t.name.clone())
            .collect();

        for (_, root) in schema.root_types() {
            for field in root.fields.values() {
                for arg in &field.arguments {
                    let target = arg.ty.unwrap_name();
                    match schema.kind_of(target) {
                        Some(TypeKind::Scalar) if !is_builtin_scalar(target) => {
                            flags.insert(arg.name.clone());
                        }
                        Some(TypeKind::Enum) => {
                            enums.insert(arg.name.clone());
                        }
                        _ => {}
                    }
                }
            }
        }

        debug!(flags = flags.len(), enums = enums.len(), "classified arguments");
        Self { flags, enums }
    }

    pub fn is_flag(&self, name: &str) -> bool {
        self.flags.contains(name)
    }

    pub fn is_enum(&self, name: &str) -> bool {
        self.enums.contains(name)
    }

    /// How an argument is rendered. Flags take precedence over enums;
    /// anything unclassified is a plain literal.
    pub fn style_of(&self, name: &str) -> ArgumentStyle {
        if self.is_flag(name) {
            ArgumentStyle::Flag
        } else if self.is_enum(name) {
            ArgumentStyle::Enum
        } else {
            ArgumentStyle::Plain
        }
    }

    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(|s| s.as_str())
    }

    pub fn enums(&self) -> impl Iterator<Item = &str> {
        self.enums.iter().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SDL: &str = r#"
        type Query {
            loadItem(id: ID!, cursor: Cursor, order: SortOrder, limit: Int): Item
        }
        type Mutation {
            tagItem(id: ID!, tags: [Tag!]!, when: DateTime): Item
        }
        type Item { id: ID! }
        enum SortOrder { ASC DESC }
        enum Visibility { PUBLIC PRIVATE }
        scalar Cursor
        scalar Tag
        scalar DateTime
    "#;

    #[test]
    fn test_standalone_defaults() {
        let c = Classification::default();
        assert_eq!(c.flags().collect::<Vec<_>>(), vec!["flags", "type"]);
        assert_eq!(c.enums().collect::<Vec<_>>(), vec!["sectionType"]);
        assert!(!c.is_flag("status"));
        assert_eq!(c.style_of("sectionType"), ArgumentStyle::Enum);
    }

    #[test]
    fn test_analyze_schema() {
        let schema = Schema::from_sdl(SDL).unwrap();
        let c = Classification::analyze(&schema, &["sort".to_string()]);

        for name in ["sort", "flags", "type", "status", "mode", "kind", "cursor", "tags", "when"] {
            assert!(c.is_flag(name), "{} should be a flag", name);
        }
        for name in ["SortOrder", "Visibility", "order"] {
            assert!(c.is_enum(name), "{} should be an enum", name);
        }
        assert_eq!(c.style_of("id"), ArgumentStyle::Plain);
        assert_eq!(c.style_of("limit"), ArgumentStyle::Plain);
    }

    #[test]
    fn test_default_flags_always_classify_as_flag() {
        let schema = Schema::from_sdl("type Query { a(status: String, kind: Int): Int }").unwrap();
        let c = Classification::analyze(&schema, &[]);
        for name in DEFAULT_FLAGS {
            assert_eq!(c.style_of(name), ArgumentStyle::Flag);
        }
    }

    #[test]
    fn test_analyze_without_roots() {
        let schema = Schema::from_sdl("enum Color { RED }").unwrap();
        let c = Classification::analyze(&schema, &[]);
        assert_eq!(c.enums().collect::<Vec<_>>(), vec!["Color"]);
        assert_eq!(c.flags().count(), DEFAULT_FLAGS.len());
    }

    #[test]
    fn test_reanalysis_starts_from_scratch() {
        let schema = Schema::from_sdl(SDL).unwrap();
        let first = Classification::analyze(&schema, &["sort".to_string()]);
        let second = Classification::analyze(&schema, &[]);
        assert!(first.is_flag("sort"));
        assert!(!second.is_flag("sort"));
    }
}
