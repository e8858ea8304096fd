//! Output emission for a [`Compilation`].
//!
//! The Rust output is one module: a `static` per submodel descriptor in
//! emission order, then a `static` per root operation field. Descriptors
//! refer to each other by name, never by copy.

use heck::ToShoutySnakeCase;
use std::collections::{HashMap, HashSet};
use std::fmt::Write as _;
use std::fs;
use std::io::Write as _;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::compiler::Compilation;
use crate::config::CompilerConfig;
use crate::error::Result;
use crate::naming::Naming;
use crate::selection::SelectionElement;

const HEADER: &str = "// Generated by schemamap. Do not edit.\n";

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut",
    "pub", "ref", "return", "static", "struct", "trait", "true", "type", "unsafe", "use",
    "where", "while", "abstract", "become", "box", "do", "final", "gen", "macro", "override",
    "priv", "try", "typeof", "unsized", "virtual", "yield",
];

/// Keywords that cannot be raw identifiers.
const RESERVED_IDENTS: &[&str] = &["self", "Self", "super", "crate", "_"];

/// A name usable as a Rust item identifier.
pub fn rust_ident(name: &str) -> String {
    if RESERVED_IDENTS.contains(&name) {
        format!("{}_", name)
    } else if RUST_KEYWORDS.contains(&name) {
        format!("r#{}", name)
    } else {
        name.to_string()
    }
}

/// Emit the compilation as a Rust module.
///
/// Schema names that map to the same Rust identifier (`user_profile` and
/// `UserProfile` under the Pascal policy, `loadItem` and `load_item` for
/// depth consts) are disambiguated with a numeric suffix and logged.
pub fn rust(compilation: &Compilation, naming: &Naming, config: &CompilerConfig) -> String {
    let mut emitter = RustEmitter {
        used: HashSet::new(),
        descriptors: HashMap::new(),
        out: String::new(),
    };

    // Claim every descriptor name up front so references to types later in
    // the emission order already know their identifier.
    for descriptor in compilation.submodels().iter() {
        let ident = emitter.claim(&naming.descriptor_name(&descriptor.type_name));
        emitter
            .descriptors
            .insert(descriptor.type_name.clone(), ident);
    }

    emitter.out.push_str(HEADER);
    let _ = writeln!(emitter.out, "\nuse {}::StaticSelection;", config.helpers_path);

    for descriptor in compilation.submodels().iter() {
        let rendered = naming.render(&descriptor.type_name);
        let doc = match &config.types_path {
            Some(types) => format!("Fields of [`{}::{}`].", types, rendered),
            None => format!("Fields of `{}`.", descriptor.type_name),
        };
        let ident = emitter.descriptor_ident(&descriptor.type_name);
        emitter.emit_static(&ident, &descriptor.type_name, &descriptor.selection, &doc);
    }

    for root in compilation.roots() {
        let doc = format!(
            "`{} {}` returning `{}`.",
            root.operation, root.field, root.return_type
        );
        let ident = emitter.claim(&root.field);
        emitter.emit_static(&ident, &root.field, &root.selection, &doc);
        let depth_ident = emitter.claim(&format!("{}_DEPTH", root.field.to_shouty_snake_case()));
        let _ = writeln!(
            emitter.out,
            "pub const {}: usize = {};",
            depth_ident, root.depth
        );
    }

    emitter.out
}

/// Emit the compilation as pretty JSON, for hosts that are not Rust.
pub fn json(compilation: &Compilation) -> Result<String> {
    Ok(serde_json::to_string_pretty(compilation)?)
}

/// Write emitted output to `path`: written to a `.tmp` sibling first, then
/// renamed over the target.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    info!(path = %path.display(), "writing output");

    let tmp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    fs::rename(&tmp_path, path)?;

    debug!(bytes = contents.len(), "output written");
    Ok(())
}

struct RustEmitter {
    /// Identifiers already emitted, in the module's value namespace.
    used: HashSet<String>,
    /// Schema type name -> descriptor static identifier.
    descriptors: HashMap<String, String>,
    out: String,
}

impl RustEmitter {
    /// Reserve a unique identifier for `wanted`.
    fn claim(&mut self, wanted: &str) -> String {
        let ident = rust_ident(wanted);
        if self.used.insert(ident.clone()) {
            return ident;
        }

        let mut n = 2;
        loop {
            let candidate = rust_ident(&format!("{}_{}", wanted, n));
            if self.used.insert(candidate.clone()) {
                warn!(wanted = %wanted, ident = %candidate, "generated name collision, renamed");
                return candidate;
            }
            n += 1;
        }
    }

    fn descriptor_ident(&self, type_name: &str) -> String {
        self.descriptors
            .get(type_name)
            .cloned()
            .unwrap_or_else(|| rust_ident(type_name))
    }

    /// Write `ident` as a static. `base` names the helper statics of inline children.
    fn emit_static(&mut self, ident: &str, base: &str, selection: &[SelectionElement], doc: &str) {
        let mut pending = Vec::new();

        let _ = writeln!(self.out, "\n/// {}", doc);
        let _ = writeln!(self.out, "#[allow(non_upper_case_globals)]");
        let _ = writeln!(
            self.out,
            "pub static {}: [StaticSelection; {}] = [",
            ident,
            selection.len()
        );
        for element in selection {
            let item = match element {
                SelectionElement::Field(field) => format!("StaticSelection::Field({:?})", field),
                SelectionElement::Nested(field, children) => {
                    let child_base = format!("{}_{}", base, field);
                    let child = self.claim(&child_base);
                    let item = format!("StaticSelection::Nested({:?}, &{})", field, child);
                    pending.push((child, child_base, children));
                    item
                }
                SelectionElement::Reference { field, descriptor } => format!(
                    "StaticSelection::Reference({:?}, &{})",
                    field,
                    self.descriptor_ident(descriptor)
                ),
            };
            let _ = writeln!(self.out, "    {},", item);
        }
        let _ = writeln!(self.out, "];");

        for (child, child_base, children) in pending {
            let doc = format!("Inline selection of `{}`.", child_base);
            self.emit_static(&child, &child_base, children, &doc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::Compiler;
    use crate::schema::Schema;
    use pretty_assertions::assert_eq;

    const SDL: &str = r#"
        type Query {
            loadItem(id: ID!): Item
            type: String
        }
        type Item {
            id: ID!
            audio: audio_clip
        }
        type audio_clip {
            url: String!
            item: Item
        }
    "#;

    #[test]
    fn test_rust_output() {
        let schema = Schema::from_sdl(SDL).unwrap();
        let output = Compiler::default().generate_rust(&schema);

        let expected = r#"// Generated by schemamap. Do not edit.

use schemamap::selection::StaticSelection;

/// Fields of `Query`.
#[allow(non_upper_case_globals)]
pub static QueryMap: [StaticSelection; 2] = [
    StaticSelection::Reference("loadItem", &ItemMap),
    StaticSelection::Field("type"),
];

/// Fields of `Item`.
#[allow(non_upper_case_globals)]
pub static ItemMap: [StaticSelection; 2] = [
    StaticSelection::Field("id"),
    StaticSelection::Reference("audio", &AudioClipMap),
];

/// Fields of `audio_clip`.
#[allow(non_upper_case_globals)]
pub static AudioClipMap: [StaticSelection; 2] = [
    StaticSelection::Field("url"),
    StaticSelection::Reference("item", &ItemMap),
];

/// `query loadItem` returning `Item`.
#[allow(non_upper_case_globals)]
pub static loadItem: [StaticSelection; 2] = [
    StaticSelection::Field("id"),
    StaticSelection::Reference("audio", &AudioClipMap),
];
pub const LOAD_ITEM_DEPTH: usize = 2;

/// `query type` returning `String`.
#[allow(non_upper_case_globals)]
pub static r#type: [StaticSelection; 0] = [
];
pub const TYPE_DEPTH: usize = 2;
"#;
        assert_eq!(output, expected);
    }

    #[test]
    fn test_types_path_and_helpers_path() {
        let schema = Schema::from_sdl("type Query { ping: String }").unwrap();
        let config = CompilerConfig {
            helpers_path: "crate::sel".to_string(),
            types_path: Some("crate::types".to_string()),
            ..CompilerConfig::default()
        };
        let output = Compiler::new(config).generate_rust(&schema);
        assert!(output.contains("use crate::sel::StaticSelection;"));
        assert!(output.contains("/// Fields of [`crate::types::Query`]."));
    }

    #[test]
    fn test_custom_namer() {
        let schema = Schema::from_sdl("type Query { ping: String }").unwrap();
        let output = Compiler::default()
            .with_namer(|raw| format!("Api{}", raw))
            .generate_rust(&schema);
        assert!(output.contains("pub static ApiQueryMap"));
    }

    #[test]
    fn test_nested_elements_get_helper_statics() {
        let mut emitter = RustEmitter {
            used: HashSet::new(),
            descriptors: HashMap::new(),
            out: String::new(),
        };
        emitter.emit_static(
            "item",
            "item",
            &[SelectionElement::nested("audio", vec![SelectionElement::field("url")])],
            "doc",
        );
        assert!(emitter
            .out
            .contains("StaticSelection::Nested(\"audio\", &item_audio),"));
        assert!(emitter
            .out
            .contains("pub static item_audio: [StaticSelection; 1] = ["));
    }

    #[test]
    fn test_colliding_names_are_disambiguated() {
        let schema = Schema::from_sdl(
            r#"
            type Query {
                loadItem: user_profile
                load_item: UserProfile
            }
            type user_profile { id: ID }
            type UserProfile { name: String }
            "#,
        )
        .unwrap();
        let output = Compiler::default().generate_rust(&schema);

        assert_eq!(output.matches("pub static UserProfileMap:").count(), 1);
        assert_eq!(output.matches("pub static UserProfileMap_2:").count(), 1);
        assert_eq!(output.matches("pub const LOAD_ITEM_DEPTH:").count(), 1);
        assert_eq!(output.matches("pub const LOAD_ITEM_DEPTH_2:").count(), 1);

        // Each reference points at the static of its own type.
        assert!(output.contains("StaticSelection::Reference(\"loadItem\", &UserProfileMap),"));
        assert!(output.contains("StaticSelection::Reference(\"load_item\", &UserProfileMap_2),"));
    }

    #[test]
    fn test_claim_skips_taken_suffixes() {
        let mut emitter = RustEmitter {
            used: HashSet::new(),
            descriptors: HashMap::new(),
            out: String::new(),
        };
        assert_eq!(emitter.claim("a"), "a");
        assert_eq!(emitter.claim("a_2"), "a_2");
        assert_eq!(emitter.claim("a"), "a_3");
        assert_eq!(emitter.claim("type"), "r#type");
    }

    #[test]
    fn test_rust_ident() {
        assert_eq!(rust_ident("loadItem"), "loadItem");
        assert_eq!(rust_ident("match"), "r#match");
        assert_eq!(rust_ident("self"), "self_");
    }

    #[test]
    fn test_write_atomic_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maps.rs");
        std::fs::write(&path, "old").unwrap();

        write_atomic(&path, "new").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_json_output() {
        let schema = Schema::from_sdl(SDL).unwrap();
        let compilation = Compiler::default().compile(&schema);
        let output = json(&compilation).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        // Every type sits on or behind the Item/audio_clip cycle: discovery order.
        assert_eq!(value["order"][0], "Query");
        assert_eq!(value["roots"]["loadItem"]["depth"], 2);
    }
}
